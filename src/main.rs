use clap::Parser;
use works_gallery::{cli, config, error, fetch};

use cli::{Cli, Commands};
use config::Config;
use error::Result;

use works_gallery_common::session::GalleryState;
use works_gallery_common::types::FilterCriteria;
use works_gallery_common::{carousel, normalizer, parser, urlstate};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { output, source } => {
            println!("📥 works-gallery - CSV取得\n");

            let config = Config::load()?;
            let source = source.unwrap_or_else(|| config.data_source());

            println!("[1/2] 取得中: {}", source);
            let text = match fetch::fetch_csv(&source).await {
                Ok(text) => text,
                Err(e) => {
                    // フェイルファスト: 再試行せずプレースホルダ相当の表示で終える
                    eprintln!("CSVの読み込みに失敗しました。");
                    return Err(e);
                }
            };

            println!("[2/2] 保存中...");
            std::fs::write(&output, &text)?;
            println!("✔ 保存しました: {}", output.display());
        }

        Commands::Filter {
            input,
            keyword,
            year,
            tags,
            json,
        } => {
            let text = std::fs::read_to_string(&input)?;
            let mut state = GalleryState::from_csv(&text);

            let criteria = FilterCriteria {
                keyword: keyword.unwrap_or_default().trim().to_string(),
                year: year.unwrap_or_default(),
                tags,
            };
            state.set_criteria(criteria);

            if json {
                println!("{}", serde_json::to_string_pretty(state.filtered())?);
            } else {
                let query = urlstate::to_query(state.criteria());
                if query.is_empty() {
                    println!("🔎 {} 件", state.filtered().len());
                } else {
                    println!("🔎 {} 件 (クエリ: ?{})", state.filtered().len(), query);
                }
                for work in state.filtered() {
                    println!(
                        "  {} / {} / {} [{}]",
                        work.title,
                        work.student,
                        work.year,
                        work.tags.join(", ")
                    );
                }
            }
        }

        Commands::Vocab { input } => {
            let state = GalleryState::from_csv_file(&input)?;
            let vocab = state.vocabulary();

            println!("年度: {}", vocab.years.join(", "));
            println!("タグ: {}", vocab.tags.join(", "));
        }

        Commands::Check { input } => {
            println!("🔍 works-gallery - 取り込み確認\n");

            let text = std::fs::read_to_string(&input)?;
            let rows = parser::parse_csv(&text);
            let works = normalizer::build_working_set(&rows);
            let items = carousel::build_items(&works);

            println!("  データ行数: {}", rows.len());
            println!("  掲載レコード数: {}", works.len());
            println!("  ゲート除外数: {}", rows.len() - works.len());
            println!("  PDFあり（カルーセル対象）: {}", items.len());

            if cli.verbose {
                for item in &items {
                    println!("    {} -> {}", item.title, item.thumbnail_path);
                }
            }
        }

        Commands::Export { input, output } => {
            let state = GalleryState::from_csv_file(&input)?;
            let json = state.to_json()?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ 書き出しました: {} ({} 件)", path.display(), state.works().len());
                }
                None => println!("{}", json),
            }
        }

        Commands::Config { set_sheet_id, show } => {
            let mut config = Config::load()?;

            if let Some(id) = set_sheet_id {
                config.set_sheet_id(id)?;
                println!("✔ スプレッドシートIDを設定しました");
            }

            if show {
                println!("設定:");
                println!("  シートID: {}", config.sheet_id.as_deref().unwrap_or("未設定"));
                println!("  gid: {}", config.sheet_gid);
                println!("  ローカルCSV: {}", config.csv_path);
                println!("  データソース: {}", config.data_source());
            }
        }
    }

    Ok(())
}
