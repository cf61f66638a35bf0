/// Presentation layer: full-frame terminal repaint with cursor-positioned
/// glyph prints.
///
/// Every tick the whole maze is redrawn, then sprites are printed on top at
/// their cells, then the status line. All commands are batched with
/// `queue!` and flushed once per frame.
///
/// Emoji glyphs occupy two terminal columns, so in emoji mode every column
/// offset is doubled.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::config::{GameConfig, Glyphs};
use crate::domain::entity::{Position, Status};
use crate::domain::tile::Tile;
use crate::sim::world::{Horde, Phase, WorldState};

const WALL_BG: Color = Color::Blue;

const BOX_TOP: &str = "╔══════════╗";
const BOX_BOTTOM: &str = "╚══════════╝";
const LOST_TEXT: &str = "GAME OVER";
const WON_TEXT: &str = " YOU WIN ";

// ── Terminal mode ──

/// Raw input mode for the lifetime of the game.
///
/// `restore()` is the normal exit path and reports failure. If the guard is
/// dropped without it (early return, panic unwind), drop restores the
/// terminal on a best-effort basis.
pub struct TerminalGuard {
    restored: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard { restored: false };
        execute!(io::stdout(), cursor::Hide)?;
        Ok(guard)
    }

    pub fn restore(mut self) -> io::Result<()> {
        self.restored = true;
        execute!(io::stdout(), ResetColor, cursor::Show)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.restored {
            let _ = execute!(io::stdout(), ResetColor, cursor::Show);
            let _ = terminal::disable_raw_mode();
        }
    }
}

// ── Renderer ──

pub struct Renderer<W: Write> {
    out: W,
    glyphs: Glyphs,
    use_emoji: bool,
}

impl Renderer<BufWriter<Stdout>> {
    pub fn stdout(config: &GameConfig) -> Self {
        Renderer::new(BufWriter::with_capacity(16384, io::stdout()), config)
    }
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, config: &GameConfig) -> Self {
        Renderer {
            out,
            glyphs: config.glyphs.clone(),
            use_emoji: config.use_emoji,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Repaint the whole frame: maze, sprites, status line.
    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;

        for (row, tiles) in world.grid.iter_rows().enumerate() {
            queue!(self.out, MoveTo(0, row as u16))?;
            for tile in tiles {
                self.queue_tile(*tile)?;
            }
        }

        self.move_to(world.player.pos)?;
        queue!(self.out, Print(&self.glyphs.player))?;

        let (virus, virus_blue) = (self.glyphs.virus.clone(), self.glyphs.virus_blue.clone());
        self.queue_horde(&world.viruses, &virus, &virus_blue)?;
        let (zombie, zombie_blue) = (self.glyphs.zombie.clone(), self.glyphs.zombie_blue.clone());
        self.queue_horde(&world.zombies, &zombie, &zombie_blue)?;

        self.queue_status_line(world)?;
        self.out.flush()
    }

    /// Mark where the player was caught. Shown during the pause before respawn.
    pub fn draw_death(&mut self, at: Position, rows: usize) -> io::Result<()> {
        self.move_to(at)?;
        queue!(self.out, Print(&self.glyphs.death))?;
        self.move_to(Position::new(rows + 2, 0))?;
        self.out.flush()
    }

    /// Final overlay: death glyph on the player and a banner boxed around
    /// the player's spawn point.
    pub fn draw_outcome(&mut self, world: &WorldState) -> io::Result<()> {
        let text = match world.phase {
            Phase::Lost => LOST_TEXT,
            Phase::Won => WON_TEXT,
            Phase::Running => return Ok(()),
        };
        let spawn = world.player.spawn();

        self.move_to(world.player.pos)?;
        queue!(self.out, Print(&self.glyphs.death))?;

        self.move_to(offset(spawn, 4, 3))?;
        queue!(self.out, Print(BOX_TOP))?;
        self.move_to(offset(spawn, 3, 2))?;
        queue!(self.out, Print(text))?;
        self.move_to(offset(spawn, 2, 3))?;
        queue!(self.out, Print(BOX_BOTTOM))?;

        self.move_to(Position::new(world.grid.rows() + 4, 0))?;
        self.out.flush()
    }

    // ── Internal ──

    fn move_to(&mut self, pos: Position) -> io::Result<()> {
        let col = if self.use_emoji { pos.col * 2 } else { pos.col };
        queue!(self.out, MoveTo(col as u16, pos.row as u16))
    }

    fn queue_tile(&mut self, tile: Tile) -> io::Result<()> {
        let g = &self.glyphs;
        match tile {
            Tile::Wall => queue!(
                self.out,
                SetBackgroundColor(WALL_BG),
                Print(&g.wall),
                ResetColor
            ),
            Tile::Dot => queue!(self.out, Print(&g.dot)),
            Tile::Wash => queue!(self.out, Print(&g.wash)),
            Tile::People => queue!(self.out, Print(&g.people)),
            Tile::Food => queue!(self.out, Print(&g.food)),
            Tile::StartFlag => queue!(self.out, Print(&g.start_flag)),
            Tile::Floor => queue!(self.out, Print(&g.space)),
        }
    }

    fn queue_horde(&mut self, horde: &Horde, normal: &str, vulnerable: &str) -> io::Result<()> {
        // One read of the board per frame; the guard is not held while drawing.
        let statuses = horde.status.snapshot();
        for (sprite, status) in horde.members.iter().zip(statuses) {
            self.move_to(sprite.pos)?;
            let glyph = match status {
                Status::Normal => normal,
                Status::Vulnerable => vulnerable,
            };
            queue!(self.out, Print(glyph))?;
        }
        Ok(())
    }

    fn queue_status_line(&mut self, world: &WorldState) -> io::Result<()> {
        let lives = if self.use_emoji {
            self.glyphs.player.repeat(world.lives as usize)
        } else {
            world.lives.to_string()
        };
        self.move_to(Position::new(world.grid.rows() + 1, 0))?;
        queue!(self.out, Print(format!("Score: {} \tLives: {}", world.score, lives)))
    }
}

/// Position `up` rows above and `left` columns left of `pos`, clamped at 0.
fn offset(pos: Position, up: usize, left: usize) -> Position {
    Position::new(pos.row.saturating_sub(up), pos.col.saturating_sub(left))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EffectDurations;
    use crate::sim::level::parse_maze;
    use std::time::Duration;

    fn world_from(rows: &[&str]) -> WorldState {
        let layout = parse_maze(&rows.join("\n")).unwrap();
        WorldState::new(
            layout,
            EffectDurations { wash: Duration::from_secs(1), food: Duration::from_secs(1) },
        )
    }

    fn render_to_string(config: &GameConfig, world: &WorldState) -> String {
        let mut r = Renderer::new(Vec::new(), config);
        r.render(world).unwrap();
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[test]
    fn frame_shows_tiles_sprites_and_status_line() {
        let cfg = GameConfig::default();
        let w = world_from(&["WWWWW", "W.PVW", "WXOYW", "WZF W"]);
        let out = render_to_string(&cfg, &w);

        assert!(out.contains("Score: 0 \tLives: 3"));
        for glyph in ["#", ".", "X", "O", "Y", "F", "@", "V", "Z"] {
            assert!(out.contains(glyph), "missing {glyph:?}");
        }
        // Status line sits one row below the maze (0-based row 5).
        assert!(out.contains("\x1b[6;1H"));
    }

    #[test]
    fn vulnerable_hostiles_use_blue_glyphs() {
        let cfg = GameConfig::default();
        let w = world_from(&["P V Z"]);
        w.viruses.status.set_all(Status::Vulnerable);
        let out = render_to_string(&cfg, &w);
        assert!(out.contains(&cfg.glyphs.virus_blue));
        assert!(out.contains(&cfg.glyphs.zombie));
        assert!(!out.contains(&cfg.glyphs.zombie_blue));
    }

    #[test]
    fn emoji_mode_doubles_columns_and_draws_lives_as_players() {
        let mut cfg = GameConfig::default();
        cfg.use_emoji = true;
        cfg.glyphs.player = "😋".into();
        let w = world_from(&["  P"]);
        let out = render_to_string(&cfg, &w);

        // Player at column 2 → terminal column 4 (1-based 5).
        assert!(out.contains("\x1b[1;5H😋"));
        assert!(out.contains("Lives: 😋😋😋"));
    }

    #[test]
    fn outcome_banner_matches_phase() {
        let cfg = GameConfig::default();
        let mut w = world_from(&[".....", ".....", ".....", ".....", "..P.."]);

        let mut r = Renderer::new(Vec::new(), &cfg);
        r.draw_outcome(&w).unwrap();
        assert!(r.into_inner().is_empty());

        w.phase = Phase::Lost;
        let mut r = Renderer::new(Vec::new(), &cfg);
        r.draw_outcome(&w).unwrap();
        let out = String::from_utf8(r.into_inner()).unwrap();
        assert!(out.contains(LOST_TEXT));
        assert!(out.contains(BOX_TOP));
        assert!(out.contains(&cfg.glyphs.death));

        w.phase = Phase::Won;
        let mut r = Renderer::new(Vec::new(), &cfg);
        r.draw_outcome(&w).unwrap();
        let out = String::from_utf8(r.into_inner()).unwrap();
        assert!(out.contains(WON_TEXT));
    }

    #[test]
    fn death_marker_is_drawn_at_position() {
        let cfg = GameConfig::default();
        let mut r = Renderer::new(Vec::new(), &cfg);
        r.draw_death(Position::new(2, 3), 5).unwrap();
        let out = String::from_utf8(r.into_inner()).unwrap();
        assert!(out.contains("\x1b[3;4H*"));
    }

    #[test]
    fn banner_offsets_clamp_at_the_edge() {
        assert_eq!(offset(Position::new(1, 1), 4, 3), Position::new(0, 0));
        assert_eq!(offset(Position::new(9, 9), 4, 3), Position::new(5, 6));
    }
}
