//! 人間とコンピュータの対局を進めるセッション。
//!
//! ドライバスレッドが現在の `Game` を1つだけ持ち、UI からのイベントと探索結果を
//! 1本の受信箱で順に処理する。公開される `Snapshot` は厳密に直列化されている
//! （人間の手、0手以上のコンピュータの手、次の人間の手…）。

mod driver;
/// セッションの設定。
pub mod settings;

use core::fmt;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::error;

use crate::engine::game::Game;

use driver::{Driver, Message};

pub type Settings = settings::Settings;

/// UI から届くイベント。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Event {
    /// 人間の着手。
    HumanMove {
        /// x 座標。
        x: u8,
        /// y 座標。
        y: u8,
    },
    /// 初期局面からやり直す。
    Restart,
}

/// セッション操作の失敗理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SessionError {
    /// ドライバスレッドが停止している。
    Disconnected,
    /// ドライバスレッドを起動できなかった。
    Spawn,
}

impl fmt::Display for SessionError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Disconnected => f.write_str("session driver is no longer running"),
            Self::Spawn => f.write_str("failed to spawn session driver thread"),
        }
    }
}

impl core::error::Error for SessionError {}

/// 公開された局面。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    /// 局面。
    game: Game,
    /// リスタートのたびに増える系列番号。
    lineage: u64,
    /// 公開ごとに増える通し番号。
    revision: u64,
}

impl Snapshot {
    /// 局面を返す。
    #[inline]
    #[must_use]
    pub const fn game(self) -> Game {
        self.game
    }

    /// 系列番号を返す。
    #[inline]
    #[must_use]
    pub const fn lineage(self) -> u64 {
        self.lineage
    }

    /// 通し番号を返す。
    #[inline]
    #[must_use]
    pub const fn revision(self) -> u64 {
        self.revision
    }
}

/// 対局セッション（ドライバスレッドへのハンドル）。
///
/// 破棄するとドライバを停止して待ち合わせる。
#[derive(Debug)]
pub struct Session {
    /// ドライバスレッド。
    driver: Option<JoinHandle<()>>,
    /// ドライバの受信箱。
    inbox: Sender<Message>,
    /// 公開された局面の受信口。
    states: Receiver<Snapshot>,
}

impl Session {
    /// 新しい局面が届くまで最大 `timeout` 待つ。
    #[inline]
    #[must_use]
    pub fn next_state(&self, timeout: Duration) -> Option<Snapshot> {
        match self.states.recv_timeout(timeout) {
            Ok(snapshot) => Some(snapshot),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// 人間の着手を送る。
    ///
    /// 合法でない手は黙って無視され、新しい局面は公開されない。
    ///
    /// # Errors
    ///
    /// ドライバが停止している場合、`SessionError::Disconnected` を返す。
    #[inline]
    pub fn play(&self, x: u8, y: u8) -> Result<(), SessionError> {
        self.send(Event::HumanMove { x, y })
    }

    /// 初期局面からやり直す。実行中の探索結果は破棄される。
    ///
    /// # Errors
    ///
    /// ドライバが停止している場合、`SessionError::Disconnected` を返す。
    #[inline]
    pub fn restart(&self) -> Result<(), SessionError> {
        self.send(Event::Restart)
    }

    /// イベントをドライバへ送る。
    ///
    /// # Errors
    ///
    /// ドライバが停止している場合、`SessionError::Disconnected` を返す。
    #[inline]
    pub fn send(&self, event: Event) -> Result<(), SessionError> {
        self.inbox
            .send(Message::Event(event))
            .map_err(|_closed| SessionError::Disconnected)
    }

    /// ドライバを停止して待ち合わせる。
    #[inline]
    pub fn shutdown(mut self) {
        self.stop();
    }

    /// ドライバスレッドを起動する。最初に初期局面が公開される。
    ///
    /// # Errors
    ///
    /// スレッドを起動できなかった場合、`SessionError::Spawn` を返す。
    #[inline]
    pub fn start(settings: Settings) -> Result<Self, SessionError> {
        Self::start_with(settings, Game::initial())
    }

    /// 任意の局面からドライバスレッドを起動する。最初に `game` が公開される。
    ///
    /// リスタート後は通常の初期局面から始まる。
    ///
    /// # Errors
    ///
    /// スレッドを起動できなかった場合、`SessionError::Spawn` を返す。
    #[inline]
    pub fn start_with(settings: Settings, game: Game) -> Result<Self, SessionError> {
        let (inbox, inbox_rx) = mpsc::channel();
        let (states_tx, states) = mpsc::channel();
        let driver = Driver::new(settings, game, inbox.clone(), states_tx);

        let spawned = thread::Builder::new()
            .name("reversi-session".to_owned())
            .spawn(move || driver.run(&inbox_rx));

        match spawned {
            Ok(handle) => Ok(Self {
                driver: Some(handle),
                inbox,
                states,
            }),
            Err(err) => {
                error!(%err, "failed to spawn session driver");
                Err(SessionError::Spawn)
            }
        }
    }

    /// 公開された局面を順に返す（次が届くまでブロックする）。
    ///
    /// セッションが停止すると終わる。
    #[inline]
    pub fn states(&self) -> mpsc::Iter<'_, Snapshot> {
        self.states.iter()
    }

    /// ドライバに停止を伝えて待ち合わせる。
    fn stop(&mut self) {
        if let Some(handle) = self.driver.take() {
            let _ignored = self.inbox.send(Message::Shutdown);
            if handle.join().is_err() {
                error!("session driver panicked");
            }
        }
    }

    /// 既に届いている局面をブロックせずに返す。
    #[inline]
    pub fn try_states(&self) -> mpsc::TryIter<'_, Snapshot> {
        self.states.try_iter()
    }
}

impl Drop for Session {
    #[inline]
    fn drop(&mut self) {
        self.stop();
    }
}
