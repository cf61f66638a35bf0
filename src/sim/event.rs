/// Events emitted during a simulation step.
/// The presentation layer consumes these for the death pause and sound.

use crate::domain::entity::{HostileKind, Position};
use super::effect::EffectKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    DotEaten { at: Position },
    PowerPicked { kind: EffectKind, at: Position },
    /// A vulnerable hostile was caught and sent back to its spawn.
    HostileCaught { kind: HostileKind, idx: usize },
    /// The player lost a life but has more; already moved back to spawn.
    PlayerCaught { at: Position, by: HostileKind },
    /// The player lost the last life.
    PlayerKilled { at: Position, by: HostileKind },
    QuitRequested,
    AllDotsEaten,
    GameOver,
}
