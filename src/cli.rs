use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "works-gallery")]
#[command(about = "学生制作物ギャラリー データ取り込み・フィルタCLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// データソースからCSVを取得して保存
    Fetch {
        /// 保存先（デフォルト: works.csv）
        #[arg(short, long, default_value = "works.csv")]
        output: PathBuf,

        /// 取得元URL/パス（省略時は設定から合成）
        #[arg(long)]
        source: Option<String>,
    },

    /// CSVを読み込んでフィルタを適用
    Filter {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,

        /// キーワード（大文字小文字を区別しない部分一致）
        #[arg(short = 'q', long)]
        keyword: Option<String>,

        /// 年度（完全一致）
        #[arg(short, long)]
        year: Option<String>,

        /// タグ（複数指定可・いずれかに一致）
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 年度・タグの選択肢語彙を表示
    Vocab {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 取り込み統計を表示
    Check {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 作業セットをJSONで書き出し
    Export {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// スプレッドシートIDを設定
        #[arg(long)]
        set_sheet_id: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
