//! ギャラリーセッション
//!
//! CSVテキストから作業セットを構築し、フィルタ適用・語彙導出・
//! URL同期を束ねる。作業セットはセッション中保持し、絞り込み結果は
//! 条件変更のたびに丸ごと差し替える（その場更新はしない）。

use std::path::Path;
use std::rc::Rc;

use crate::carousel::{self, CarouselItem};
use crate::error::Result;
use crate::filter;
use crate::normalizer;
use crate::parser;
use crate::types::{FilterCriteria, Vocabulary, WorkRecord};
use crate::urlstate::{self, HistorySink, UrlSync};

pub struct GalleryState {
    works: Vec<WorkRecord>,
    filtered: Vec<WorkRecord>,
    criteria: FilterCriteria,
    sync: Rc<UrlSync>,
}

impl GalleryState {
    /// CSVテキストから作業セットを構築する
    ///
    /// 掲載ゲートを通ったレコードだけが入る。初期状態では
    /// 絞り込みなし（全件表示）。
    pub fn from_csv(text: &str) -> Self {
        let rows = parser::parse_csv(text);
        let works = normalizer::build_working_set(&rows);
        let filtered = works.clone();
        Self {
            works,
            filtered,
            criteria: FilterCriteria::default(),
            sync: UrlSync::new(),
        }
    }

    /// CSVファイルから読み込む
    pub fn from_csv_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_csv(&text))
    }

    pub fn works(&self) -> &[WorkRecord] {
        &self.works
    }

    pub fn filtered(&self) -> &[WorkRecord] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn vocabulary(&self) -> Vocabulary {
        filter::compute_vocabulary(&self.works)
    }

    pub fn carousel_items(&self) -> Vec<CarouselItem> {
        carousel::build_items(&self.works)
    }

    /// 条件を適用して絞り込み結果を再計算する
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.filtered = filter::apply_filters(&self.works, &self.criteria);
    }

    /// 現在の条件をURL履歴へ反映する（抑制スコープ中は何もしない）
    pub fn sync_url(&self, sink: &mut dyn HistorySink) {
        self.sync.push(&self.criteria, sink);
    }

    /// URLクエリから初期条件を適用する
    ///
    /// プログラム的な適用は利用者編集ではないため、
    /// この間の書き戻しは抑制される。
    pub fn apply_query(&mut self, query: &str, sink: &mut dyn HistorySink) {
        let criteria = urlstate::from_query(query);
        let _scope = self.sync.suppress_scope();
        self.set_criteria(criteria);
        self.sync_url(sink);
    }

    /// フィルタを初期状態に戻す（ホーム操作）
    pub fn reset(&mut self, sink: &mut dyn HistorySink) {
        self.set_criteria(FilterCriteria::default());
        self.sync_url(sink);
    }

    /// 作業セットをJSONで書き出す
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.works)?)
    }
}
