//! PDFカルーセルの状態機械
//!
//! アイドル→自動送りの切り替え、遷移アニメーションの排他、
//! 方向付きナビゲーションをタグ付き状態で表現する。
//! タイマーの期限は状態の中に持ち、種類ごとに同時に1つしか存在しない。
//!
//! 状態遷移:
//! - 構築: 項目0件 → Empty（操作無効・タイマーなし）
//!         1件以上 → 先頭を表示し PendingIdleSwitch を装備
//! - 利用者操作: Animating中は破棄。それ以外は Animating へ入り、
//!   完了時にインデックスを確定してアイドル時計をリセット
//! - PendingIdleSwitch 期限切れ → AutoMode（6秒周期で前送り）
//! - AutoMode 発火 → 同じ「アニメーション→確定」列を自動で実行

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use crate::types::WorkRecord;

/// 自動送りの周期
pub const AUTO_ADVANCE_INTERVAL: Duration = Duration::from_secs(6);
/// 最終操作から自動送り開始までの待ち時間
pub const IDLE_DELAY: Duration = Duration::from_secs(10);
/// スライド遷移の所要時間
pub const TRANSITION_DURATION: Duration = Duration::from_millis(700);
/// 完了イベントが届かない場合のフォールバック余裕
pub const TRANSITION_SLACK: Duration = Duration::from_millis(50);

/// サムネイルが導出できない場合の代替画像
pub const PLACEHOLDER_THUMB: &str = "assets/images/placeholder.svg";

/// カルーセル1項目（PDFを持つ作品のみから作られる）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselItem {
    pub title: String,
    pub pdf_path: String,
    pub thumbnail_path: String,
}

/// PDFパスからサムネイルパスを導出する
///
/// `thumbnails/<基底名>.png`。基底名が取れない場合は代替画像。
pub fn thumbnail_for_pdf(pdf_path: &str) -> String {
    let filename = pdf_path.rsplit('/').next().unwrap_or("");
    let base = if filename.to_ascii_lowercase().ends_with(".pdf") {
        &filename[..filename.len() - 4]
    } else {
        filename
    };
    if base.is_empty() {
        PLACEHOLDER_THUMB.to_string()
    } else {
        format!("thumbnails/{}.png", base)
    }
}

/// 作業セットからカルーセル項目列を作る（PDFなしは除外・順序維持）
pub fn build_items(records: &[WorkRecord]) -> Vec<CarouselItem> {
    records
        .iter()
        .filter(|work| !work.pdf.is_empty())
        .map(|work| CarouselItem {
            title: work.title.clone(),
            pdf_path: work.pdf.clone(),
            thumbnail_path: thumbnail_for_pdf(&work.pdf),
        })
        .collect()
}

/// スライド方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// 確定待ちの移動内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingMove {
    /// 符号付きステップ（±1）
    Step(isize),
    /// ドット選択などの直接指定
    Jump(usize),
}

/// 遷移の起点（確定後のタイマー処理が異なる）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Initiator {
    User,
    /// 自動送り。確定後に復帰する次回発火時刻を持つ
    Auto { next_fire: Instant },
}

/// カルーセルの動作フェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 項目なし（操作無効・タイマーなし）
    Empty,
    /// タイマーなしの静止状態（駆動停止後）
    Idle,
    /// 最終操作からの待機中。期限が来たら自動送りへ
    PendingIdleSwitch { deadline: Instant },
    /// 自動送り中。次回発火時刻を保持
    AutoMode { next_fire: Instant },
    /// 遷移アニメーション実行中。再入するナビゲーションは破棄される
    Animating { started: Instant },
}

/// ナビゲーション要求の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// 遷移を開始した
    Started(Direction),
    /// アニメーション中のため破棄した
    Dropped,
    /// 項目がないため無効
    Disabled,
}

/// カルーセルコントローラ
///
/// 時刻は引数で注入するため、テストは実時間に依存しない。
/// 非同期駆動は [`run_driver`] が担う。
pub struct CarouselController {
    items: Vec<CarouselItem>,
    current_index: usize,
    phase: Phase,
    // Animating中のみ有効
    pending: Option<(PendingMove, Initiator)>,
}

impl CarouselController {
    pub fn new(items: Vec<CarouselItem>, now: Instant) -> Self {
        let phase = if items.is_empty() {
            Phase::Empty
        } else {
            Phase::PendingIdleSwitch {
                deadline: now + IDLE_DELAY,
            }
        };
        Self {
            items,
            current_index: 0,
            phase,
            pending: None,
        }
    }

    pub fn from_records(records: &[WorkRecord], now: Instant) -> Self {
        Self::new(build_items(records), now)
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&CarouselItem> {
        self.items.get(self.current_index)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    /// ナビゲーション操作が有効か（Emptyでは常に無効）
    pub fn controls_enabled(&self) -> bool {
        !matches!(self.phase, Phase::Empty)
    }

    fn wrap(&self, index: isize) -> usize {
        let count = self.items.len() as isize;
        index.rem_euclid(count) as usize
    }

    /// 前後2枚を含む表示ウィンドウ [prev2, prev, current, next, next2]
    ///
    /// それぞれが直接ジャンプの対象になる。
    pub fn visible_window(&self) -> Option<[usize; 5]> {
        if self.items.is_empty() {
            return None;
        }
        let cur = self.current_index as isize;
        Some([
            self.wrap(cur - 2),
            self.wrap(cur - 1),
            self.current_index,
            self.wrap(cur + 1),
            self.wrap(cur + 2),
        ])
    }

    pub fn next(&mut self, now: Instant) -> NavOutcome {
        self.begin(PendingMove::Step(1), Direction::Forward, Initiator::User, now)
    }

    pub fn prev(&mut self, now: Instant) -> NavOutcome {
        self.begin(
            PendingMove::Step(-1),
            Direction::Backward,
            Initiator::User,
            now,
        )
    }

    /// ドット選択などの直接指定
    ///
    /// 方向は生インデックスの大小比較で決める（target >= current で前送り）。
    /// 最短巡回路は考慮しない。
    pub fn select(&mut self, target: usize, now: Instant) -> NavOutcome {
        if self.items.is_empty() {
            return NavOutcome::Disabled;
        }
        let target = target % self.items.len();
        let direction = if target >= self.current_index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.begin(PendingMove::Jump(target), direction, Initiator::User, now)
    }

    fn begin(
        &mut self,
        pending: PendingMove,
        direction: Direction,
        initiator: Initiator,
        now: Instant,
    ) -> NavOutcome {
        match self.phase {
            Phase::Empty => NavOutcome::Disabled,
            Phase::Animating { .. } => NavOutcome::Dropped,
            _ => {
                self.phase = Phase::Animating { started: now };
                self.pending = Some((pending, initiator));
                NavOutcome::Started(direction)
            }
        }
    }

    /// 遷移の確定
    ///
    /// 完了イベントかフォールバックタイムアウトの早い方で呼ばれる。
    /// インデックスを巡回で進め、利用者操作なら自動送りを止めて
    /// アイドル時計を装備し直す。自動送りなら次回発火時刻へ復帰する。
    pub fn settle(&mut self, now: Instant) {
        if !self.is_animating() {
            return;
        }
        let Some((pending, initiator)) = self.pending.take() else {
            return;
        };

        self.current_index = match pending {
            PendingMove::Step(step) => self.wrap(self.current_index as isize + step),
            PendingMove::Jump(target) => target,
        };

        self.phase = match initiator {
            Initiator::User => Phase::PendingIdleSwitch {
                deadline: now + IDLE_DELAY,
            },
            Initiator::Auto { next_fire } => Phase::AutoMode { next_fire },
        };
    }

    /// タイマー期限を処理する（期限未到達なら何もしない）
    pub fn tick(&mut self, now: Instant) {
        match self.phase {
            Phase::PendingIdleSwitch { deadline } if now >= deadline => {
                self.phase = Phase::AutoMode {
                    next_fire: now + AUTO_ADVANCE_INTERVAL,
                };
            }
            Phase::AutoMode { next_fire } if now >= next_fire => {
                // 自動送りは常に前方向へ1つ。同じアニメーション列を再利用する
                self.phase = Phase::Animating { started: now };
                self.pending = Some((
                    PendingMove::Step(1),
                    Initiator::Auto {
                        next_fire: next_fire + AUTO_ADVANCE_INTERVAL,
                    },
                ));
            }
            _ => {}
        }
    }

    /// 次に処理すべき期限
    ///
    /// Animating中はフォールバックタイムアウト時刻を返す。
    /// EmptyとIdleには期限がない。
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::PendingIdleSwitch { deadline } => Some(deadline),
            Phase::AutoMode { next_fire } => Some(next_fire),
            Phase::Animating { started } => {
                Some(started + TRANSITION_DURATION + TRANSITION_SLACK)
            }
            Phase::Empty | Phase::Idle => None,
        }
    }

    /// タイマーを破棄して静止状態へ戻す（駆動停止時）
    pub fn stop(&mut self) {
        if !matches!(self.phase, Phase::Empty) {
            self.phase = Phase::Idle;
            self.pending = None;
        }
    }
}

/// 駆動コマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Select(usize),
    /// 遷移完了イベント（レイアウト異常時は届かないことがある）
    TransitionEnded,
    Shutdown,
}

/// コントローラをtokioタスク上で駆動する
///
/// コマンド・タイマー期限・遷移完了を単一のselectループで直列に処理する。
/// 遷移はTransitionEndedイベントとフォールバックタイムアウトの
/// 早い方で確定するため、イベントが来なくても必ず前へ進む。
/// 確定のたびに表示インデックスをwatchで通知する。
pub async fn run_driver(
    mut controller: CarouselController,
    mut commands: mpsc::Receiver<Command>,
    updates: watch::Sender<usize>,
) -> CarouselController {
    loop {
        let deadline = controller.next_deadline();

        tokio::select! {
            command = commands.recv() => {
                let now = tokio::time::Instant::now().into_std();
                match command {
                    Some(Command::Next) => {
                        controller.next(now);
                    }
                    Some(Command::Prev) => {
                        controller.prev(now);
                    }
                    Some(Command::Select(index)) => {
                        controller.select(index, now);
                    }
                    Some(Command::TransitionEnded) => {
                        controller.settle(now);
                        let _ = updates.send(controller.current_index());
                    }
                    Some(Command::Shutdown) | None => {
                        controller.stop();
                        return controller;
                    }
                }
            }
            _ = sleep_until_opt(deadline) => {
                let now = tokio::time::Instant::now().into_std();
                if controller.is_animating() {
                    // 完了イベントが来なかった場合のフォールバック確定
                    controller.settle(now);
                    let _ = updates.send(controller.current_index());
                } else {
                    controller.tick(now);
                }
            }
        }
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}
