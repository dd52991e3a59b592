//! URLクエリ同期モジュール
//!
//! フィルタ条件とクエリ文字列（q / year / tags）の双方向変換と、
//! プログラム的な条件適用時の書き戻し抑制を担う。
//! 履歴への書き込みは常に置換で行い、新規エントリは作らない。

use std::cell::Cell;
use std::rc::Rc;

use crate::types::FilterCriteria;

/// フィルタ条件をクエリ文字列に変換する
///
/// 空の条件はキーごと省略する（空文字列では出さない）。
/// 全条件が空なら空文字列を返す。
pub fn to_query(criteria: &FilterCriteria) -> String {
    let mut parts = Vec::new();

    let keyword = criteria.keyword.trim();
    if !keyword.is_empty() {
        parts.push(format!("q={}", urlencoding::encode(keyword)));
    }
    if !criteria.year.is_empty() {
        parts.push(format!("year={}", urlencoding::encode(&criteria.year)));
    }
    if !criteria.tags.is_empty() {
        parts.push(format!(
            "tags={}",
            urlencoding::encode(&criteria.tags.join(","))
        ));
    }

    parts.join("&")
}

/// クエリ文字列をフィルタ条件に変換する
///
/// 欠けたキーは空のデフォルトになる。tagsは `,` で分割し、
/// 各要素をトリムして空要素を捨てる。先頭の `?` は無視する。
pub fn from_query(query: &str) -> FilterCriteria {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut criteria = FilterCriteria::default();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = match urlencoding::decode(value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => value.to_string(),
        };

        match key {
            "q" => criteria.keyword = value.trim().to_string(),
            "year" => criteria.year = value,
            "tags" => {
                criteria.tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            _ => {}
        }
    }

    criteria
}

/// クエリ文字列の書き込み先
///
/// ブラウザ履歴に相当する。置換のみで、新規エントリは作らない。
pub trait HistorySink {
    fn replace(&mut self, query: &str);
}

/// 条件変更とURLの同期を司る
///
/// 初期ロードなどプログラム的に条件を適用するときは利用者編集ではないため、
/// `suppress_scope` のスコープ内では書き戻しを行わない。
#[derive(Debug, Default)]
pub struct UrlSync {
    suppress: Cell<bool>,
}

/// 抑制スコープのガード（ドロップで必ず解除される）
pub struct SuppressGuard {
    sync: Rc<UrlSync>,
}

impl Drop for SuppressGuard {
    fn drop(&mut self) {
        self.sync.suppress.set(false);
    }
}

impl UrlSync {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// 書き戻し抑制スコープを開始する
    pub fn suppress_scope(self: &Rc<Self>) -> SuppressGuard {
        self.suppress.set(true);
        SuppressGuard {
            sync: Rc::clone(self),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppress.get()
    }

    /// 条件変更を履歴へ反映する（抑制スコープ中は何もしない）
    pub fn push(&self, criteria: &FilterCriteria, sink: &mut dyn HistorySink) {
        if self.suppress.get() {
            return;
        }
        sink.replace(&to_query(criteria));
    }
}
