//! CSVパーサー
//!
//! 引用符対応のステートマシンで区切りテキストを行レコードに変換する。
//! 引用符内の `""` はリテラルの引用符、引用符内の改行はセルの一部として扱う。

use std::collections::HashMap;

/// ヘッダー名からセル値へのマッピング
///
/// ヘッダーが重複した場合は後の値が勝つ。
pub type RawRow = HashMap<String, String>;

/// CSVテキストを行×セルの行列に分解する
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut current));
            }
            '\n' | '\r' if !in_quotes => {
                // CRLFは1つの改行として扱う
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut current));
                rows.push(std::mem::take(&mut row));
            }
            _ => current.push(ch),
        }
    }

    // 終端に改行がない場合も最終行を出力する
    if !current.is_empty() || !row.is_empty() {
        row.push(current);
        rows.push(row);
    }

    rows
}

/// CSVテキストをRawRowの列に変換する
///
/// 行0をヘッダーとして扱い、以降の行を位置対応でマッピングする。
/// ヘッダーより短い行は空文字列で埋め、長い行の余剰セルは捨てる。
/// 空入力は空の列を返す。
///
/// # Examples
/// ```
/// use works_gallery_common::parser::parse_csv;
///
/// let rows = parse_csv("title,year\nランプ,2023");
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].get("title").map(String::as_str), Some("ランプ"));
/// ```
pub fn parse_csv(text: &str) -> Vec<RawRow> {
    let rows = parse_rows(text);
    if rows.is_empty() {
        return Vec::new();
    }

    let headers: Vec<String> = rows[0].iter().map(|h| h.trim().to_string()).collect();

    rows[1..]
        .iter()
        .map(|cells| {
            let mut item = RawRow::new();
            for (idx, header) in headers.iter().enumerate() {
                let value = cells.get(idx).map(|c| c.trim()).unwrap_or("");
                item.insert(header.clone(), value.to_string());
            }
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_field() {
        // カンマ・改行・エスケープ引用符を含むセルが1セルとして残る
        let rows = parse_rows("\"a,b\n\"\"c\"\"\"");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0][0], "a,b\n\"c\"");
    }

    #[test]
    fn test_parse_no_trailing_newline() {
        // ヘッダー行＋データ1行、終端改行なしでも1件返る
        let rows = parse_csv("title,year\nランプ,2023");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("year").map(String::as_str), Some("2023"));
    }

    #[test]
    fn test_parse_crlf() {
        let rows = parse_csv("title,year\r\nランプ,2023\r\nスタンド,2024\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("title").map(String::as_str), Some("スタンド"));
    }

    #[test]
    fn test_parse_short_row_padded() {
        // ヘッダーより短い行は空文字列で埋まる
        let rows = parse_csv("title,year,tags\nランプ\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("year").map(String::as_str), Some(""));
        assert_eq!(rows[0].get("tags").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_long_row_truncated() {
        // ヘッダーを超える余剰セルは捨てられる
        let rows = parse_csv("title\nランプ,2023,wood\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("title").map(String::as_str), Some("ランプ"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_csv("").is_empty());
    }

    #[test]
    fn test_parse_header_only() {
        assert!(parse_csv("title,year\n").is_empty());
    }

    #[test]
    fn test_parse_duplicate_header_last_wins() {
        let rows = parse_csv("title,title\n一つ目,二つ目\n");
        assert_eq!(rows[0].get("title").map(String::as_str), Some("二つ目"));
    }

    #[test]
    fn test_parse_header_trimmed() {
        let rows = parse_csv(" title , year \nランプ,2023\n");
        assert_eq!(rows[0].get("title").map(String::as_str), Some("ランプ"));
    }

    #[test]
    fn test_parse_cell_values_trimmed() {
        let rows = parse_csv("title\n  ランプ  \n");
        assert_eq!(rows[0].get("title").map(String::as_str), Some("ランプ"));
    }

    #[test]
    fn test_parse_embedded_newline_does_not_end_row() {
        let rows = parse_csv("title,description\nランプ,\"1行目\n2行目\"\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].get("description").map(String::as_str),
            Some("1行目\n2行目")
        );
    }
}
