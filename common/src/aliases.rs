//! 列名エイリアス解決モジュール
//!
//! スプレッドシートの列名は日英・新旧の表記ゆれがあるため、
//! 正規フィールドごとに順序付きのエイリアス表を静的に持ち、
//! 最初に見つかった空でない値を採用する。

use crate::parser::RawRow;

/// 学籍番号・通し番号
pub const ID: &[&str] = &["id", "No.", "学籍番号", "ID"];
/// 作品タイトル
pub const TITLE: &[&str] = &["title", "制作物", "TITLE"];
/// 制作者氏名
pub const STUDENT: &[&str] = &["student", "氏名", "NAME_JA"];
/// 年度
pub const YEAR: &[&str] = &["year", "年度", "YEAR"];
/// 所属学年
pub const DEPARTMENT: &[&str] = &["department", "所属学年", "COURSE_YEAR"];
/// 作品説明
pub const DESCRIPTION: &[&str] = &["description", "説明"];
/// 画像ファイル（複数値）
pub const IMAGES: &[&str] = &["image", "images", "IMAGES_FILENAME"];
/// STLファイル
pub const STL: &[&str] = &["stl", "STL", "STL_FILENAME"];
/// PDFファイル
pub const PDF: &[&str] = &["pdf", "PDF", "PDF_FILENAME"];
/// Tinkercad等の外部URL
pub const TINKERCAD: &[&str] = &["tinkercad", "URL"];
/// 発表フラグ（掲載ゲート）
pub const PRESENTATION: &[&str] = &["発表", "PRESENTATION"];
/// タグ（複数値）
pub const TAGS: &[&str] = &["tags", "タグ", "TAGS"];

/// エイリアス表を順に引き、最初の空でない値を返す
///
/// どのエイリアスにも値がなければ空文字列を返す。
pub fn resolve(row: &RawRow, keys: &[&str]) -> String {
    for key in keys {
        if let Some(value) = row.get(*key) {
            let value = value.trim();
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_primary_key() {
        let row = row(&[("title", "ランプ")]);
        assert_eq!(resolve(&row, TITLE), "ランプ");
    }

    #[test]
    fn test_resolve_japanese_fallback() {
        // 主キーが無い場合は日本語エイリアスへフォールバックする
        let row = row(&[("制作物", "ランプ")]);
        assert_eq!(resolve(&row, TITLE), "ランプ");
    }

    #[test]
    fn test_resolve_first_nonempty_wins() {
        // 主キーが空文字列なら次のエイリアスを採用する
        let row = row(&[("title", ""), ("制作物", "スタンド"), ("TITLE", "無視")]);
        assert_eq!(resolve(&row, TITLE), "スタンド");
    }

    #[test]
    fn test_resolve_missing_returns_empty() {
        let row = row(&[("year", "2023")]);
        assert_eq!(resolve(&row, TITLE), "");
    }

    #[test]
    fn test_resolve_trims_value() {
        let row = row(&[("氏名", "  山田  ")]);
        assert_eq!(resolve(&row, STUDENT), "山田");
    }

    #[test]
    fn test_presentation_aliases() {
        let row_en = row(&[("PRESENTATION", "TRUE")]);
        assert_eq!(resolve(&row_en, PRESENTATION), "TRUE");

        let row_ja = row(&[("発表", "true")]);
        assert_eq!(resolve(&row_ja, PRESENTATION), "true");
    }
}
