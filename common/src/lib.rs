//! Works Gallery Common Library
//!
//! CLIとWebフロントエンドで共有される型とコアエンジン

pub mod aliases;
pub mod carousel;
pub mod error;
pub mod filter;
pub mod normalizer;
pub mod parser;
pub mod session;
pub mod types;
pub mod urlstate;
pub mod viewer;

pub use carousel::{build_items, CarouselController, CarouselItem, Phase};
pub use error::{Error, Result};
pub use filter::{apply_filters, compute_vocabulary};
pub use normalizer::{build_working_set, normalize, normalize_asset_path, AssetKind};
pub use parser::{parse_csv, RawRow};
pub use session::GalleryState;
pub use types::{FilterCriteria, Vocabulary, WorkRecord};
pub use urlstate::{from_query, to_query, HistorySink, UrlSync};
