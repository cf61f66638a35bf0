/// Maze loader.
///
/// ## Format
/// One text line per maze row, one character per cell. Every row must
/// have the same width. Trailing blank lines are ignored.
///
/// ## Tile legend:
///   'W' = Wall                   '.' = Dot
///   'X' = Wash (viruses)         'Y' = People (zombies)
///   'O' = Food (bonus)           'F' = Start flag (decorative)
///   'P' = Player start           'V' = Virus spawn
///   'Z' = Zombie spawn           anything else = Floor
///
/// Each `V`/`Z` spawns one hostile. If several `P` markers exist, the last
/// one wins.

use std::path::Path;

use crate::domain::entity::Position;
use crate::domain::grid::Grid;
use crate::domain::tile::Tile;
use crate::error::{GameError, MazeError};

/// A parsed maze: the grid plus every spawn point found in it.
#[derive(Clone, Debug)]
pub struct MazeLayout {
    pub grid: Grid,
    pub player_spawn: Position,
    pub virus_spawns: Vec<Position>,
    pub zombie_spawns: Vec<Position>,
    pub dots: usize,
}

/// Read and parse the maze file at `path`.
pub fn load_maze(path: &Path) -> Result<MazeLayout, GameError> {
    let text = std::fs::read_to_string(path).map_err(|source| GameError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = parse_maze(&text).map_err(|source| GameError::Maze {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        rows = layout.grid.rows(),
        cols = layout.grid.cols(),
        dots = layout.dots,
        viruses = layout.virus_spawns.len(),
        zombies = layout.zombie_spawns.len(),
        "maze loaded"
    );
    Ok(layout)
}

pub fn parse_maze(text: &str) -> Result<MazeLayout, MazeError> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(MazeError::Empty);
    }

    let width = lines[0].chars().count();
    let mut tiles = Vec::with_capacity(lines.len());
    let mut player_spawn = None;
    let mut virus_spawns = Vec::new();
    let mut zombie_spawns = Vec::new();
    let mut dots = 0;

    for (row, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(MazeError::Ragged { row, expected: width, found });
        }

        let mut cells = Vec::with_capacity(width);
        for (col, ch) in line.chars().enumerate() {
            let pos = Position::new(row, col);
            match ch {
                'P' => player_spawn = Some(pos),
                'V' => virus_spawns.push(pos),
                'Z' => zombie_spawns.push(pos),
                _ => {}
            }
            let tile = Tile::from_char(ch);
            if tile == Tile::Dot {
                dots += 1;
            }
            cells.push(tile);
        }
        tiles.push(cells);
    }

    Ok(MazeLayout {
        grid: Grid::new(tiles),
        player_spawn: player_spawn.ok_or(MazeError::NoPlayer)?,
        virus_spawns,
        zombie_spawns,
        dots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_spawns_and_dots() {
        let layout = parse_maze("WWWWW\nW.PVW\nWZ.XW\nWWWWW\n").unwrap();
        assert_eq!(layout.grid.rows(), 4);
        assert_eq!(layout.grid.cols(), 5);
        assert_eq!(layout.player_spawn, Position::new(1, 2));
        assert_eq!(layout.virus_spawns, vec![Position::new(1, 3)]);
        assert_eq!(layout.zombie_spawns, vec![Position::new(2, 1)]);
        assert_eq!(layout.dots, 2);
        assert_eq!(layout.grid.tile_at(Position::new(2, 3)), Tile::Wash);
        assert_eq!(layout.grid.tile_at(Position::new(1, 2)), Tile::Floor);
    }

    #[test]
    fn each_marker_spawns_one_hostile() {
        let layout = parse_maze("PVVZ\nVZZ.").unwrap();
        assert_eq!(layout.virus_spawns.len(), 3);
        assert_eq!(layout.zombie_spawns.len(), 3);
    }

    #[test]
    fn last_player_marker_wins() {
        let layout = parse_maze("P..\n..P").unwrap();
        assert_eq!(layout.player_spawn, Position::new(1, 2));
    }

    #[test]
    fn crlf_and_trailing_blank_lines_are_ignored() {
        let layout = parse_maze("P.\r\n..\r\n\r\n\n").unwrap();
        assert_eq!(layout.grid.rows(), 2);
        assert_eq!(layout.dots, 3);
    }

    #[test]
    fn rejects_empty_maze() {
        assert_eq!(parse_maze("").unwrap_err(), MazeError::Empty);
        assert_eq!(parse_maze("\n\n").unwrap_err(), MazeError::Empty);
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            parse_maze("P..\n..\n").unwrap_err(),
            MazeError::Ragged { row: 1, expected: 3, found: 2 }
        );
    }

    #[test]
    fn rejects_maze_without_player() {
        assert_eq!(parse_maze("...\n.V.").unwrap_err(), MazeError::NoPlayer);
    }

    #[test]
    fn load_reports_path_on_failure() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"...\n").unwrap();
        let err = load_maze(f.path()).unwrap_err();
        assert!(matches!(err, GameError::Maze { source: MazeError::NoPlayer, .. }));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_maze(&dir.path().join("missing.txt")),
            Err(GameError::Io { .. })
        ));
    }

    #[test]
    fn shipped_maze_is_playable() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("maze01.txt");
        let layout = load_maze(&path).unwrap();
        assert_eq!(layout.grid.cols(), 28);
        assert!(layout.dots > 0);
        assert!(!layout.virus_spawns.is_empty());
        assert!(!layout.zombie_spawns.is_empty());
        assert!(!layout.grid.is_wall(layout.player_spawn));
    }
}
