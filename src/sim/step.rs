/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Input: at most one command (quit / move), then pickup on the new cell
///   2. Virus random walk
///   3. Virus collisions
///   4. Zombie random walk
///   5. Zombie collisions
///   6. Win / lose check
///
/// Rendering happens between the step and the next tick; the loop reads
/// `world.phase` afterwards to decide whether to stop.

use rand::Rng;

use crate::domain::entity::{Command, HostileKind, Status};
use crate::domain::movement;
use crate::domain::tile::Tile;
use super::effect::{EffectKind, EffectScheduler};
use super::event::GameEvent;
use super::world::{Phase, WorldState};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step<R: Rng + ?Sized>(
    world: &mut WorldState,
    command: Option<Command>,
    effects: &EffectScheduler,
    rng: &mut R,
) -> Vec<GameEvent> {
    if world.phase != Phase::Running { return vec![]; }

    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    if let Some(command) = command {
        resolve_command(world, command, &mut events);
        resolve_pickup(world, effects, &mut events);
    }

    for kind in [HostileKind::Virus, HostileKind::Zombie] {
        resolve_hostile_movement(world, kind, rng);
        resolve_collisions(world, kind, &mut events);
    }

    resolve_outcome(world, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Player
// ══════════════════════════════════════════════════════════════

fn resolve_command(world: &mut WorldState, command: Command, events: &mut Vec<GameEvent>) {
    match command {
        Command::Move(dir) => {
            world.player.pos = movement::make_move(&world.grid, world.player.pos, dir);
        }
        Command::Quit => {
            // Takes effect at the outcome check below, not immediately.
            world.lives = 0;
            events.push(GameEvent::QuitRequested);
        }
        Command::Idle => {}
    }
}

fn resolve_pickup(world: &mut WorldState, effects: &EffectScheduler, events: &mut Vec<GameEvent>) {
    let at = world.player.pos;
    let tile = world.grid.tile_at(at);
    if !tile.is_pickup() { return; }

    world.score += tile.points();
    world.grid.clear(at);

    let kind = match tile {
        Tile::Dot => {
            world.dots_remaining = world.dots_remaining.saturating_sub(1);
            events.push(GameEvent::DotEaten { at });
            return;
        }
        Tile::Wash => EffectKind::Wash,
        Tile::People => EffectKind::Crowd,
        Tile::Food => EffectKind::Food,
        _ => return,
    };

    let board = world.horde(kind.target()).status.clone();
    let duration = kind.duration(&world.effects);
    // Detached: the countdown outlives this tick.
    let _ = effects.trigger(kind, board, duration);
    events.push(GameEvent::PowerPicked { kind, at });
}

// ══════════════════════════════════════════════════════════════
// Hostiles
// ══════════════════════════════════════════════════════════════

fn resolve_hostile_movement<R: Rng + ?Sized>(world: &mut WorldState, kind: HostileKind, rng: &mut R) {
    let WorldState { grid, viruses, zombies, .. } = world;
    let horde = match kind {
        HostileKind::Virus => viruses,
        HostileKind::Zombie => zombies,
    };
    horde.roam(grid, rng);
}

/// Contact outcome depends on the hostile's status:
///   - Normal: the player loses a life. If any remain, the player respawns
///     and the whole class is forced back to Normal.
///   - Vulnerable: the hostile alone resets to Normal at its spawn.
fn resolve_collisions(world: &mut WorldState, kind: HostileKind, events: &mut Vec<GameEvent>) {
    let WorldState { player, lives, viruses, zombies, .. } = world;
    let horde = match kind {
        HostileKind::Virus => viruses,
        HostileKind::Zombie => zombies,
    };

    for (idx, hostile) in horde.members.iter_mut().enumerate() {
        if hostile.pos != player.pos { continue; }

        // Read guard is released inside `get`, before any write below.
        match horde.status.get(idx) {
            Status::Normal => {
                let at = player.pos;
                *lives = lives.saturating_sub(1);
                if *lives > 0 {
                    player.respawn();
                    horde.status.set_all(Status::Normal);
                    events.push(GameEvent::PlayerCaught { at, by: horde.kind });
                } else {
                    events.push(GameEvent::PlayerKilled { at, by: horde.kind });
                }
                tracing::info!(kind = ?horde.kind, lives = *lives, "player caught");
            }
            Status::Vulnerable => {
                horde.status.set(idx, Status::Normal);
                hostile.respawn();
                events.push(GameEvent::HostileCaught { kind: horde.kind, idx });
                tracing::info!(kind = ?horde.kind, idx, "hostile caught");
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Win / lose
// ══════════════════════════════════════════════════════════════

fn resolve_outcome(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.lives == 0 {
        world.phase = Phase::Lost;
        events.push(GameEvent::GameOver);
    } else if world.dots_remaining == 0 {
        world.phase = Phase::Won;
        events.push(GameEvent::AllDotsEaten);
    }
}
