//! フィルタエンジン
//!
//! 作業セットから絞り込み結果と選択肢語彙を導出する。
//! 述語は純粋で、結果の順序は入力の順序を保つ。

use std::collections::BTreeSet;

use crate::types::{FilterCriteria, Vocabulary, WorkRecord};

/// 作業セットから年度・タグの選択肢語彙を導出する
///
/// いずれもソート済みの重複なし列で、レコードの並び順に依存しない。
pub fn compute_vocabulary(records: &[WorkRecord]) -> Vocabulary {
    let mut years = BTreeSet::new();
    let mut tags = BTreeSet::new();

    for work in records {
        if !work.year.is_empty() {
            years.insert(work.year.clone());
        }
        for tag in &work.tags {
            tags.insert(tag.clone());
        }
    }

    Vocabulary {
        years: years.into_iter().collect(),
        tags: tags.into_iter().collect(),
    }
}

/// キーワード述語
///
/// タイトル・氏名・説明・所属学年・年度・タグ連結に対する
/// 大文字小文字を無視した部分一致。空キーワードは常に一致。
fn matches_keyword(work: &WorkRecord, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    let tag_text = work.tags.join(" ");
    let source = [
        work.title.as_str(),
        work.student.as_str(),
        work.description.as_str(),
        work.department.as_str(),
        work.year.as_str(),
        tag_text.as_str(),
    ]
    .join(" ")
    .to_lowercase();
    source.contains(&keyword.to_lowercase())
}

/// レコードが条件に一致するか
///
/// 年度→タグ→キーワードの順に評価する（年度・タグの比較が安いため）。
/// タグは選択タグのいずれかを持てば一致（OR）。
pub fn matches(work: &WorkRecord, criteria: &FilterCriteria) -> bool {
    if !criteria.year.is_empty() && work.year != criteria.year {
        return false;
    }
    if !criteria.tags.is_empty() && !work.tags.iter().any(|tag| criteria.tags.contains(tag)) {
        return false;
    }
    matches_keyword(work, criteria.keyword.trim())
}

/// 条件を適用して絞り込み結果を返す（安定フィルタ・再ソートなし）
pub fn apply_filters(records: &[WorkRecord], criteria: &FilterCriteria) -> Vec<WorkRecord> {
    records
        .iter()
        .filter(|work| matches(work, criteria))
        .cloned()
        .collect()
}
