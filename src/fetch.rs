//! CSVデータソースの取得
//!
//! 起動時に一度だけ取得する。失敗時は再試行せず、呼び出し側が
//! エラープレースホルダ表示に切り替える（フェイルファスト）。

use crate::error::Result;
use std::path::Path;

/// データソースからCSVテキストを取得する
///
/// `http` で始まる場合は公開エンドポイントから、
/// それ以外はローカルファイルから読む。
pub async fn fetch_csv(source: &str) -> Result<String> {
    if source.starts_with("http") {
        let response = reqwest::get(source).await?;
        let text = response.error_for_status()?.text().await?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(Path::new(source))?)
    }
}
