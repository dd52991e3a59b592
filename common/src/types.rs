//! 作品レコードとフィルタ条件の型定義
//!
//! CLIとWebフロントエンドで共有される型:
//! - WorkRecord: 正規化済みの作品レコード（構築後は不変）
//! - FilterCriteria: キーワード・年度・タグの絞り込み条件
//! - Vocabulary: 作業セットから導出される選択肢語彙

use serde::{Deserialize, Serialize};

/// 正規化済みの作品レコード
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkRecord {
    pub id: String,
    pub title: String,
    pub student: String,
    pub year: String,
    pub department: String,
    pub description: String,

    /// 一覧カード用の代表画像（imagesの先頭）
    pub image: String,
    pub images: Vec<String>,

    pub stl: String,
    pub pdf: String,
    pub tinkercad: String,

    /// 掲載ゲートの生値（"true" で掲載）
    pub present_flag: String,

    /// 出現順を維持したタグ列（重複除去はしない）
    pub tags: Vec<String>,
}

/// フィルタ条件
///
/// UIコントロールとURLクエリの両方から構築され、
/// 空でない値については両表現が損失なく往復する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub keyword: String,
    pub year: String,
    pub tags: Vec<String>,
}

impl FilterCriteria {
    /// 全条件が空か
    pub fn is_empty(&self) -> bool {
        self.keyword.is_empty() && self.year.is_empty() && self.tags.is_empty()
    }
}

/// 作業セットから導出される選択肢語彙（表示用にソート済み）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub years: Vec<String>,
    pub tags: Vec<String>,
}
