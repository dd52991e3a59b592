//! レコード正規化モジュール
//!
//! RawRowをエイリアス解決で正規の作品レコードに変換し、
//! アセットパスの正規化と掲載ゲートを適用する。
//!
//! ## 処理フロー
//! 1. エイリアス表で各フィールドを解決
//! 2. パスのレガシー接頭辞書き換えとフォルダ修飾
//! 3. 複数値フィールド（画像・タグ）の分割
//! 4. 掲載ゲート（タイトルあり かつ 発表フラグtrue）

use crate::aliases;
use crate::parser::RawRow;
use crate::types::WorkRecord;

/// タイトル未設定時のフォールバック
pub const DEFAULT_TITLE: &str = "無題";

/// アセット種別（ファイル名単体に付くフォルダ接頭辞を決める）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Stl,
    Image,
    Pdf,
}

impl AssetKind {
    fn folder(self) -> &'static str {
        match self {
            AssetKind::Stl => "stl",
            AssetKind::Image => "images",
            AssetKind::Pdf => "pdf",
        }
    }
}

/// レガシー接頭辞の書き換え（先頭の .stl/ .images/ .pdf/ のみ）
fn rewrite_legacy_prefix(value: &str) -> String {
    let text = value.trim();
    for (legacy, replacement) in [
        (".stl/", "stl/"),
        (".images/", "images/"),
        (".pdf/", "pdf/"),
    ] {
        if let Some(rest) = text.strip_prefix(legacy) {
            return format!("{}{}", replacement, rest);
        }
    }
    text.to_string()
}

/// アセットパスを正規化する
///
/// ファイル名単体（`/`を含まず`http`で始まらない）は種別ごとの
/// フォルダで修飾し、それ以外は接頭辞書き換え後そのまま通す。
pub fn normalize_asset_path(value: &str, kind: AssetKind) -> String {
    let text = rewrite_legacy_prefix(value);
    if text.is_empty() {
        return text;
    }
    if text.contains('/') || text.starts_with("http") {
        return text;
    }
    format!("{}/{}", kind.folder(), text)
}

/// 複数値パスフィールドを `|` または `,` で分割し、各要素を正規化する
///
/// 空要素は捨て、出現順は維持する。
pub fn normalize_paths(value: &str, kind: AssetKind) -> Vec<String> {
    value
        .split(['|', ','])
        .map(|entry| normalize_asset_path(entry, kind))
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// タグを `|` または `,` で分割する（出現順維持・重複除去なし）
pub fn split_tags(value: &str) -> Vec<String> {
    value
        .split(['|', ','])
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// RawRowを作品レコードに変換する
pub fn normalize(row: &RawRow) -> WorkRecord {
    let title = aliases::resolve(row, aliases::TITLE);
    let title = if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    };

    let images = normalize_paths(&aliases::resolve(row, aliases::IMAGES), AssetKind::Image);
    let image = images.first().cloned().unwrap_or_default();

    WorkRecord {
        id: aliases::resolve(row, aliases::ID),
        title,
        student: aliases::resolve(row, aliases::STUDENT),
        year: aliases::resolve(row, aliases::YEAR),
        department: aliases::resolve(row, aliases::DEPARTMENT),
        description: aliases::resolve(row, aliases::DESCRIPTION),
        image,
        images,
        stl: normalize_asset_path(&aliases::resolve(row, aliases::STL), AssetKind::Stl),
        pdf: normalize_asset_path(&aliases::resolve(row, aliases::PDF), AssetKind::Pdf),
        tinkercad: aliases::resolve(row, aliases::TINKERCAD),
        present_flag: aliases::resolve(row, aliases::PRESENTATION),
        tags: split_tags(&aliases::resolve(row, aliases::TAGS)),
    }
}

/// 掲載ゲート
///
/// タイトルが空でなく、発表フラグが大文字小文字を無視して
/// "true" のレコードだけが作業セットに入る。
pub fn passes_gate(record: &WorkRecord) -> bool {
    !record.title.is_empty() && record.present_flag.eq_ignore_ascii_case("true")
}

/// RawRow列から作業セットを構築する
///
/// ゲートを満たさないレコードは黙って捨てる（エラーにはしない）。
pub fn build_working_set(rows: &[RawRow]) -> Vec<WorkRecord> {
    rows.iter()
        .map(normalize)
        .filter(passes_gate)
        .collect()
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

    // =============================================
    // パス正規化
    // =============================================

    #[test]
    fn test_legacy_prefix_rewrite() {
        assert_eq!(
            normalize_asset_path(".stl/model.stl", AssetKind::Stl),
            "stl/model.stl"
        );
        assert_eq!(
            normalize_asset_path(".images/photo.jpg", AssetKind::Image),
            "images/photo.jpg"
        );
        assert_eq!(
            normalize_asset_path(".pdf/report.pdf", AssetKind::Pdf),
            "pdf/report.pdf"
        );
    }

    #[test]
    fn test_bare_filename_qualified() {
        assert_eq!(
            normalize_asset_path("model.stl", AssetKind::Stl),
            "stl/model.stl"
        );
        assert_eq!(
            normalize_asset_path("photo.jpg", AssetKind::Image),
            "images/photo.jpg"
        );
    }

    #[test]
    fn test_url_passes_through() {
        assert_eq!(
            normalize_asset_path("http://x/model.stl", AssetKind::Stl),
            "http://x/model.stl"
        );
        assert_eq!(
            normalize_asset_path("https://example.com/a.pdf", AssetKind::Pdf),
            "https://example.com/a.pdf"
        );
    }

    #[test]
    fn test_path_with_separator_passes_through() {
        assert_eq!(
            normalize_asset_path("assets/photo.jpg", AssetKind::Image),
            "assets/photo.jpg"
        );
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(normalize_asset_path("", AssetKind::Stl), "");
        assert_eq!(normalize_asset_path("  ", AssetKind::Stl), "");
    }

    #[test]
    fn test_normalize_paths_split_and_drop_empty() {
        let paths = normalize_paths("a.jpg|b.jpg||c.jpg", AssetKind::Image);
        assert_eq!(paths, vec!["images/a.jpg", "images/b.jpg", "images/c.jpg"]);

        let paths = normalize_paths("a.jpg, .images/b.jpg", AssetKind::Image);
        assert_eq!(paths, vec!["images/a.jpg", "images/b.jpg"]);
    }

    // =============================================
    // タグ分割
    // =============================================

    #[test]
    fn test_split_tags_order_preserved() {
        assert_eq!(split_tags("wood|metal,wood"), vec!["wood", "metal", "wood"]);
    }

    #[test]
    fn test_split_tags_trim_and_drop_empty() {
        assert_eq!(split_tags(" wood | , metal "), vec!["wood", "metal"]);
        assert!(split_tags("").is_empty());
    }

    // =============================================
    // レコード変換
    // =============================================

    #[test]
    fn test_normalize_full_record() {
        let row = row(&[
            ("id", "S001"),
            ("制作物", "ランプシェード"),
            ("氏名", "山田"),
            ("年度", "2023"),
            ("所属学年", "2年"),
            ("説明", "木製のシェード"),
            ("images", "lamp1.jpg|lamp2.jpg"),
            ("STL", "lamp.stl"),
            ("PDF", "lamp.pdf"),
            ("URL", "https://www.tinkercad.com/things/abc"),
            ("発表", "true"),
            ("タグ", "wood|light"),
        ]);

        let work = normalize(&row);
        assert_eq!(work.id, "S001");
        assert_eq!(work.title, "ランプシェード");
        assert_eq!(work.student, "山田");
        assert_eq!(work.year, "2023");
        assert_eq!(work.image, "images/lamp1.jpg");
        assert_eq!(work.images, vec!["images/lamp1.jpg", "images/lamp2.jpg"]);
        assert_eq!(work.stl, "stl/lamp.stl");
        assert_eq!(work.pdf, "pdf/lamp.pdf");
        assert_eq!(work.tinkercad, "https://www.tinkercad.com/things/abc");
        assert_eq!(work.tags, vec!["wood", "light"]);
    }

    #[test]
    fn test_normalize_title_fallback() {
        let work = normalize(&row(&[("year", "2023")]));
        assert_eq!(work.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_normalize_missing_fields_empty() {
        let work = normalize(&row(&[("title", "ランプ")]));
        assert_eq!(work.student, "");
        assert_eq!(work.pdf, "");
        assert!(work.images.is_empty());
        assert_eq!(work.image, "");
    }

    // =============================================
    // 掲載ゲート
    // =============================================

    #[test]
    fn test_gate_case_insensitive_true() {
        for flag in ["true", "TRUE", "True"] {
            let work = normalize(&row(&[("title", "ランプ"), ("発表", flag)]));
            assert!(passes_gate(&work), "flag={}", flag);
        }
    }

    #[test]
    fn test_gate_rejects_false_or_missing() {
        let work = normalize(&row(&[("title", "ランプ"), ("発表", "false")]));
        assert!(!passes_gate(&work));

        let work = normalize(&row(&[("title", "ランプ"), ("発表", "")]));
        assert!(!passes_gate(&work));

        let work = normalize(&row(&[("title", "ランプ")]));
        assert!(!passes_gate(&work));
    }

    #[test]
    fn test_build_working_set_drops_silently() {
        let rows = vec![
            row(&[("title", "掲載"), ("発表", "true")]),
            row(&[("title", "非掲載"), ("発表", "false")]),
            row(&[("title", "掲載2"), ("PRESENTATION", "TRUE")]),
        ];

        let works = build_working_set(&rows);
        assert_eq!(works.len(), 2);
        assert_eq!(works[0].title, "掲載");
        assert_eq!(works[1].title, "掲載2");
    }
}
