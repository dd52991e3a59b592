//! 詳細ビューア契約
//!
//! PDFビューアのURL合成・ページ送りと、外部STLプレビューの
//! 呼び出し順序のみを担う。実際の描画は埋め込みビューアと
//! 外部サービスに委譲する。

use crate::types::WorkRecord;

/// PDFビューアのURLを合成する
///
/// 1始まりのページ指定とフィット・ツールバーのヒントを付ける。
pub fn pdf_view_url(pdf_path: &str, page: u32) -> String {
    format!("{}#page={}&view=FitH&toolbar=1", pdf_path, page.max(1))
}

/// 1始まりのページ送り
///
/// 下限は1。上限はここでは検証せず、範囲外の指定は
/// 埋め込みビューア側の挙動（無視または丸め）に委ねる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfPager {
    page: u32,
}

impl Default for PdfPager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfPager {
    pub fn new() -> Self {
        Self { page: 1 }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn set_page(&mut self, page: u32) -> u32 {
        self.page = page.max(1);
        self.page
    }

    pub fn next_page(&mut self) -> u32 {
        self.set_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> u32 {
        self.set_page(self.page.saturating_sub(1))
    }
}

/// 外部STLビューアサービスの契約
///
/// コンテナIDとモデルURLを渡して描画させ、閉じるときに
/// リソースを破棄させる。コアは呼び出し順序だけを保証する。
pub trait StlPreview {
    fn render(&mut self, container_id: &str, url: &str);
    fn dispose(&mut self);
}

/// 詳細モーダルの開閉に合わせてSTLプレビューを順序付ける
pub struct DetailSession<V: StlPreview> {
    viewer: V,
    is_open: bool,
}

impl<V: StlPreview> DetailSession<V> {
    pub fn new(viewer: V) -> Self {
        Self {
            viewer,
            is_open: false,
        }
    }

    /// 詳細表示を開く。STLを持つ作品ならプレビューを起動する
    pub fn open(&mut self, work: &WorkRecord, container_id: &str) {
        self.is_open = true;
        if !work.stl.is_empty() {
            self.viewer.render(container_id, &work.stl);
        }
    }

    /// 閉じてプレビューのリソースを破棄する
    pub fn close(&mut self) {
        if self.is_open {
            self.viewer.dispose();
            self.is_open = false;
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }
}
