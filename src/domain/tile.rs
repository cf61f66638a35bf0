/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Floor,
    Wall,      // Blocks every sprite, never changes
    Dot,       // Plain pickup, counts toward the win
    Wash,      // Power pickup: viruses turn vulnerable
    People,    // Power pickup: zombies turn vulnerable
    Food,      // Bonus pickup
    StartFlag, // Decorative
}

impl Tile {
    /// Map a maze-file character to its tile.
    /// Spawn markers (`P`, `V`, `Z`) and unknown characters are floor.
    pub fn from_char(ch: char) -> Self {
        match ch {
            'W' => Tile::Wall,
            '.' => Tile::Dot,
            'X' => Tile::Wash,
            'Y' => Tile::People,
            'O' => Tile::Food,
            'F' => Tile::StartFlag,
            _ => Tile::Floor,
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// Is this tile consumed (cleared to floor) when the player steps on it?
    pub fn is_pickup(self) -> bool {
        matches!(self, Tile::Dot | Tile::Wash | Tile::People | Tile::Food)
    }

    /// Score change for consuming this tile. People cost points.
    pub fn points(self) -> i64 {
        match self {
            Tile::Dot => 1,
            Tile::Wash => 10,
            Tile::People => -10,
            Tile::Food => 25,
            _ => 0,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_map_to_tiles() {
        assert_eq!(Tile::from_char('W'), Tile::Wall);
        assert_eq!(Tile::from_char('.'), Tile::Dot);
        assert_eq!(Tile::from_char('X'), Tile::Wash);
        assert_eq!(Tile::from_char('Y'), Tile::People);
        assert_eq!(Tile::from_char('O'), Tile::Food);
        assert_eq!(Tile::from_char('F'), Tile::StartFlag);
    }

    #[test]
    fn spawn_markers_are_floor() {
        for ch in ['P', 'V', 'Z', ' ', '?'] {
            assert_eq!(Tile::from_char(ch), Tile::Floor, "char {ch:?}");
        }
    }

    #[test]
    fn only_collectibles_are_pickups() {
        assert!(Tile::Dot.is_pickup());
        assert!(Tile::Food.is_pickup());
        assert!(!Tile::StartFlag.is_pickup());
        assert!(!Tile::Wall.is_pickup());
        assert!(Tile::Wall.is_wall());
        assert!(!Tile::Floor.is_wall());
    }

    #[test]
    fn pickup_points() {
        assert_eq!(Tile::Dot.points(), 1);
        assert_eq!(Tile::Wash.points(), 10);
        assert_eq!(Tile::People.points(), -10);
        assert_eq!(Tile::Food.points(), 25);
        assert_eq!(Tile::StartFlag.points(), 0);
    }
}
