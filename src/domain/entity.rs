/// Entities: positions, sprites, hostile status, movement commands.

use rand::Rng;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// A movable sprite remembering where it spawned.
/// The spawn point is fixed at construction; it is the reset target
/// after the player loses a life or a vulnerable hostile is caught.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Sprite {
    pub pos: Position,
    spawn: Position,
}

impl Sprite {
    pub fn new(spawn: Position) -> Self {
        Sprite { pos: spawn, spawn }
    }

    pub fn spawn(&self) -> Position {
        self.spawn
    }

    pub fn respawn(&mut self) {
        self.pos = self.spawn;
    }
}

/// Hostile status. Vulnerable only while a power effect is running.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Status {
    #[default]
    Normal,
    Vulnerable,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HostileKind {
    Virus,
    Zombie,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Right, Direction::Left];

    /// Uniformly random direction (hostile random walk).
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// One classified keyboard read, handed from the input thread to the loop.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(Direction),
    Quit,
    /// Unrecognized input. Consumes the tick's input slot and does nothing.
    Idle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn respawn_returns_to_spawn() {
        let mut s = Sprite::new(Position::new(2, 3));
        s.pos = Position::new(7, 7);
        s.respawn();
        assert_eq!(s.pos, Position::new(2, 3));
        assert_eq!(s.spawn(), Position::new(2, 3));
    }

    #[test]
    fn zero_rng_always_draws_up() {
        let mut rng = StepRng::new(0, 0);
        for _ in 0..10 {
            assert_eq!(Direction::random(&mut rng), Direction::Up);
        }
    }

    #[test]
    fn random_walk_uses_every_direction() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let d = Direction::random(&mut rng);
            let idx = Direction::ALL.iter().position(|x| *x == d).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
