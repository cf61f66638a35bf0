/// WorldState: the complete snapshot of a running session.
///
/// The tick loop owns the world and is the only writer of the grid,
/// positions, score and lives. Hostile statuses are the exception: each
/// class keeps them in a `StatusBoard` (one `RwLock` per class) shared
/// with the effect timer threads.
///
/// Readers of a board (rendering, collision checks) take the read lock;
/// bulk updates from the effect timers and single-hostile resets take the
/// write lock. A caller never holds the read guard while asking for the
/// write guard: the guard is dropped first, then the write is issued.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::Rng;

use crate::config::EffectDurations;
use crate::domain::entity::{Direction, HostileKind, Position, Sprite, Status};
use crate::domain::grid::Grid;
use crate::domain::movement;
use super::level::MazeLayout;

pub const STARTING_LIVES: u32 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Won,
    Lost,
}

// ── Status board ──

/// Per-class hostile statuses behind one read/write lock.
/// Cloning shares the same board.
#[derive(Clone, Debug, Default)]
pub struct StatusBoard {
    inner: Arc<RwLock<Vec<Status>>>,
}

impl StatusBoard {
    pub fn new(len: usize) -> Self {
        StatusBoard {
            inner: Arc::new(RwLock::new(vec![Status::Normal; len])),
        }
    }

    /// Status of one member. Unknown indices read as Normal.
    pub fn get(&self, idx: usize) -> Status {
        self.read().get(idx).copied().unwrap_or_default()
    }

    pub fn set(&self, idx: usize, status: Status) {
        if let Some(slot) = self.write().get_mut(idx) {
            *slot = status;
        }
    }

    /// Set every member at once. Idempotent.
    pub fn set_all(&self, status: Status) {
        self.write().iter_mut().for_each(|s| *s = status);
    }

    pub fn snapshot(&self) -> Vec<Status> {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Status>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Status>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Horde: one hostile class ──

#[derive(Clone, Debug)]
pub struct Horde {
    pub kind: HostileKind,
    pub members: Vec<Sprite>,
    pub status: StatusBoard,
}

impl Horde {
    pub fn new(kind: HostileKind, spawns: &[Position]) -> Self {
        Horde {
            kind,
            members: spawns.iter().copied().map(Sprite::new).collect(),
            status: StatusBoard::new(spawns.len()),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Random walk: every member draws its own direction.
    pub fn roam<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        for sprite in &mut self.members {
            let dir = Direction::random(rng);
            sprite.pos = movement::make_move(grid, sprite.pos, dir);
        }
    }
}

// ── World ──

pub struct WorldState {
    pub grid: Grid,
    pub player: Sprite,
    pub viruses: Horde,
    pub zombies: Horde,

    // ── Game tracking ──
    pub score: i64,
    pub lives: u32,
    pub dots_remaining: usize,
    pub phase: Phase,
    pub tick: u64,

    // ── Effect timings (from config) ──
    pub effects: EffectDurations,
}

impl WorldState {
    pub fn new(layout: MazeLayout, effects: EffectDurations) -> Self {
        WorldState {
            grid: layout.grid,
            player: Sprite::new(layout.player_spawn),
            viruses: Horde::new(HostileKind::Virus, &layout.virus_spawns),
            zombies: Horde::new(HostileKind::Zombie, &layout.zombie_spawns),
            score: 0,
            lives: STARTING_LIVES,
            dots_remaining: layout.dots,
            phase: Phase::Running,
            tick: 0,
            effects,
        }
    }

    pub fn horde(&self, kind: HostileKind) -> &Horde {
        match kind {
            HostileKind::Virus => &self.viruses,
            HostileKind::Zombie => &self.zombies,
        }
    }
}
