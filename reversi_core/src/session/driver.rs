use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info, warn};

use crate::ai::alphabeta;
use crate::engine::game::{Game, Status};
use crate::engine::types::Square;

use super::settings::Settings;
use super::{Event, Snapshot};

/// ドライバスレッドの受信箱に届くメッセージ。
#[derive(Debug)]
pub(super) enum Message {
    /// UI からのイベント。
    Event(Event),
    /// 探索スレッドの結果。`revision` は探索開始時の局面番号。
    SearchDone {
        /// 選ばれた手（取り消し時は `None`）。
        best_move: Option<Square>,
        /// 探索開始時の局面番号。
        revision: u64,
    },
    /// ドライバを停止する。
    Shutdown,
}

/// 実行中の探索。
#[derive(Debug)]
struct Pending {
    /// 取り消しフラグ。
    cancel: Arc<AtomicBool>,
    /// 探索スレッド。
    handle: JoinHandle<()>,
    /// 探索開始時の局面番号。
    revision: u64,
}

/// ゲームの系列を1本だけ進めるドライバ。
///
/// 公開する `Snapshot` は常にこのスレッドから順番に送られる。
pub(super) struct Driver {
    /// 現在のゲーム。
    game: Game,
    /// 探索スレッドが結果を返す宛先。
    inbox: Sender<Message>,
    /// リスタートのたびに増える系列番号。
    lineage: u64,
    /// 実行中の探索。
    pending: Option<Pending>,
    /// 公開したスナップショットの通し番号。
    revision: u64,
    /// 設定。
    settings: Settings,
    /// スナップショットの送信先。
    states: Sender<Snapshot>,
}

impl Driver {
    /// 新しい局面を公開し、必要ならコンピュータの探索を始める。
    fn advance(&mut self, next: Game) {
        self.game = next;
        self.revision = self.revision.wrapping_add(1);
        self.publish();

        if let Some(outcome) = self.game.outcome() {
            info!(lineage = self.lineage, %outcome, "game over");
        }
        self.start_search_if_computer_turn();
    }

    /// 実行中の探索を取り消して回収する。
    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.store(true, Ordering::Relaxed);
            if pending.handle.join().is_err() {
                error!(revision = pending.revision, "search worker panicked");
            }
        }
    }

    /// 探索結果を反映する。古い局面から始まった結果は捨てる。
    fn finish_search(&mut self, revision: u64, best_move: Option<Square>) {
        if revision != self.revision {
            debug!(
                stale = revision,
                current = self.revision,
                "discarding stale search result"
            );
            return;
        }

        if let Some(pending) = self.pending.take() {
            if pending.handle.join().is_err() {
                error!(revision, "search worker panicked");
            }
        }

        match best_move.and_then(|square| self.game.play(square)) {
            Some(next) => {
                debug!(revision, best_move = ?best_move, "computer moved");
                self.advance(next);
            }
            None => warn!(revision, "search returned no playable move"),
        }
    }

    /// 人間の着手を処理する。
    fn human_move(&mut self, x: u8, y: u8) {
        if self.game.status() != Status::InProgress(self.settings.human()) {
            debug!(x, y, "ignoring move outside the human turn");
            return;
        }

        match self.game.update_for_move(x, y) {
            Ok(next) if next == self.game => debug!(x, y, "illegal move absorbed"),
            Ok(next) => self.advance(next),
            Err(err) => warn!(%err, "rejected human move"),
        }
    }

    /// ドライバを生成する。
    pub(super) fn new(
        settings: Settings,
        game: Game,
        inbox: Sender<Message>,
        states: Sender<Snapshot>,
    ) -> Self {
        Self {
            game,
            inbox,
            lineage: 0,
            pending: None,
            revision: 0,
            settings,
            states,
        }
    }

    /// 現在の局面を公開する。
    fn publish(&self) {
        let snapshot = Snapshot {
            game: self.game,
            lineage: self.lineage,
            revision: self.revision,
        };
        if self.states.send(snapshot).is_err() {
            debug!(revision = self.revision, "no subscriber for snapshot");
        }
    }

    /// 初期局面から始め直す。
    fn restart(&mut self) {
        self.cancel_pending();
        self.lineage = self.lineage.wrapping_add(1);
        info!(lineage = self.lineage, "restarting game");
        self.advance(Game::initial());
    }

    /// 受信箱が `Shutdown` を受け取るまでイベントを処理する。
    pub(super) fn run(mut self, inbox: &Receiver<Message>) {
        self.publish();
        self.start_search_if_computer_turn();

        for message in inbox {
            match message {
                Message::Event(Event::HumanMove { x, y }) => self.human_move(x, y),
                Message::Event(Event::Restart) => self.restart(),
                Message::SearchDone {
                    best_move,
                    revision,
                } => self.finish_search(revision, best_move),
                Message::Shutdown => break,
            }
        }

        self.cancel_pending();
        debug!(lineage = self.lineage, revision = self.revision, "session driver stopped");
    }

    /// コンピュータの手番なら探索スレッドを起動する。
    fn start_search_if_computer_turn(&mut self) {
        if self.pending.is_some() {
            return;
        }
        if self.game.status() != Status::InProgress(self.settings.computer()) {
            return;
        }

        let board = self.game.board();
        let color = self.game.current_player();
        let depth = i32::from(self.settings.depth());
        let revision = self.revision;
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let inbox = self.inbox.clone();

        let spawned = thread::Builder::new()
            .name("reversi-search".to_owned())
            .spawn(move || {
                let best_move = alphabeta::search(board, color, depth, Some(&flag))
                    .and_then(alphabeta::SearchOutcome::best_move);
                // ドライバが先に止まっていれば結果は不要。
                let _ignored = inbox.send(Message::SearchDone {
                    best_move,
                    revision,
                });
            });

        match spawned {
            Ok(handle) => {
                debug!(revision, depth, "search started");
                self.pending = Some(Pending {
                    cancel,
                    handle,
                    revision,
                });
            }
            Err(err) => {
                error!(%err, "failed to spawn search worker; searching inline");
                let best_move = alphabeta::find_next_move(board, color, depth);
                self.finish_search(revision, best_move);
            }
        }
    }
}
