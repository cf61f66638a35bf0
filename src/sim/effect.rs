/// Status-effect scheduler: timed power effects racing the tick loop.
///
/// Each pickup trigger runs on its own thread:
///   1. Lock the effect's slot.
///   2. Bulk-set the target board to the onset status.
///   3. Cancel the countdown already running for this effect, if any.
///   4. Start a new countdown under a fresh generation number.
///   5. Unlock and wait for the countdown (or an early cancel).
///   6. Re-lock; if the generation is still current, bulk-set Normal.
///
/// Re-triggering restarts the duration instead of stacking. A cancelled
/// countdown wakes early and returns without touching the board, so the
/// class reverts exactly once, after the last trigger's duration.
///
/// Each effect kind has its own slot lock; kinds never block each other.
/// The board has its own lock, independent of the slot lock.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::EffectDurations;
use crate::domain::entity::{HostileKind, Status};
use super::world::StatusBoard;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EffectKind {
    /// Wash pickup: viruses turn vulnerable.
    Wash,
    /// People pickup: zombies turn vulnerable.
    Crowd,
    /// Food pickup: forces viruses back to Normal at onset and at expiry.
    Food,
}

impl EffectKind {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        match self {
            EffectKind::Wash => 0,
            EffectKind::Crowd => 1,
            EffectKind::Food => 2,
        }
    }

    /// Status written to the whole target class when the effect starts.
    pub fn onset(self) -> Status {
        match self {
            EffectKind::Wash | EffectKind::Crowd => Status::Vulnerable,
            EffectKind::Food => Status::Normal,
        }
    }

    pub fn target(self) -> HostileKind {
        match self {
            EffectKind::Wash | EffectKind::Food => HostileKind::Virus,
            EffectKind::Crowd => HostileKind::Zombie,
        }
    }

    pub fn duration(self, durations: &EffectDurations) -> Duration {
        match self {
            EffectKind::Wash | EffectKind::Crowd => durations.wash,
            EffectKind::Food => durations.food,
        }
    }
}

/// The countdown currently owning an effect slot.
#[derive(Default)]
struct Countdown {
    generation: u64,
    cancel: Option<Sender<()>>,
}

#[derive(Default)]
struct EffectSlot {
    state: Mutex<Countdown>,
}

impl EffectSlot {
    fn lock(&self) -> MutexGuard<'_, Countdown> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared handle to the three effect slots. Cheap to clone.
#[derive(Clone, Default)]
pub struct EffectScheduler {
    slots: Arc<[EffectSlot; EffectKind::COUNT]>,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `kind` against `board` on a background thread.
    /// The caller does not wait; the handle is only useful to tests.
    pub fn trigger(&self, kind: EffectKind, board: StatusBoard, duration: Duration) -> JoinHandle<()> {
        let slots = Arc::clone(&self.slots);
        thread::spawn(move || run_countdown(&slots[kind.index()], kind, &board, duration))
    }

    /// Is a countdown for `kind` still pending?
    #[cfg(test)]
    pub fn is_pending(&self, kind: EffectKind) -> bool {
        self.slots[kind.index()].lock().cancel.is_some()
    }
}

fn run_countdown(slot: &EffectSlot, kind: EffectKind, board: &StatusBoard, duration: Duration) {
    let (cancel_tx, cancel_rx) = mpsc::channel::<()>();

    let generation = {
        let mut state = slot.lock();
        board.set_all(kind.onset());
        if let Some(previous) = state.cancel.take() {
            // The previous waiter may already be past its timeout; the
            // generation check below covers that case.
            let _ = previous.send(());
            tracing::debug!(?kind, superseded = state.generation, "effect restarted");
        }
        state.generation += 1;
        state.cancel = Some(cancel_tx);
        state.generation
    };
    tracing::debug!(?kind, generation, ?duration, "effect started");

    match cancel_rx.recv_timeout(duration) {
        Err(RecvTimeoutError::Timeout) => {}
        Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
    }

    let mut state = slot.lock();
    if state.generation != generation {
        return;
    }
    state.cancel = None;
    board.set_all(Status::Normal);
    tracing::debug!(?kind, generation, "effect expired");
}
