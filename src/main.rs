/// Entry point and game loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::env;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use config::GameConfig;
use sim::effect::EffectScheduler;
use sim::event::GameEvent;
use sim::level::load_maze;
use sim::step::step;
use sim::world::{Phase, WorldState};
use ui::input::InputQueue;
use ui::renderer::{Renderer, TerminalGuard};
use ui::sound::{cue_for, SoundEngine};

/// Fixed seed for hostile movement. Unset means seeded from entropy.
const SEED_VAR: &str = "MAZECHASE_SEED";
/// Log destination. Unset means stderr.
const LOG_FILE_VAR: &str = "MAZECHASE_LOG_FILE";

/// Terminal maze chase: eat every dot, dodge the viruses and zombies.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Maze layout file
    #[arg(long, default_value = "maze01.txt")]
    maze_file: PathBuf,

    /// Glyph and timing configuration (JSON, or TOML by extension)
    #[arg(long, default_value = "config.json")]
    config_file: PathBuf,
}

/// Loop timing.
#[derive(Clone, Copy, Debug)]
struct Pacing {
    tick: Duration,
    /// Freeze after a non-fatal catch. Added to that tick's budget.
    death_pause: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            tick: Duration::from_millis(200),
            death_pause: Duration::from_secs(1),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(env::var_os(LOG_FILE_VAR)) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(log_file: Option<OsString>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let path = PathBuf::from(path);
            let file = File::create(&path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn seed_from_env() -> anyhow::Result<Option<u64>> {
    parse_seed(env::var(SEED_VAR))
}

fn parse_seed(var: Result<String, env::VarError>) -> anyhow::Result<Option<u64>> {
    match var {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{SEED_VAR} must be an unsigned integer, got {raw:?}")),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("cannot read {SEED_VAR}")),
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let layout = load_maze(&args.maze_file).context("failed to load maze")?;
    let config = GameConfig::load(&args.config_file).context("failed to load configuration")?;

    let mut world = WorldState::new(layout, config.effects);
    let mut rng = match seed_from_env()? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let terminal = TerminalGuard::enter().context("failed to initialise terminal")?;

    let input = InputQueue::spawn(io::stdin());
    let effects = EffectScheduler::new();
    let sound = SoundEngine::new();
    let mut renderer = Renderer::stdout(&config);

    let result = game_loop(
        &mut world,
        &mut renderer,
        &input,
        &effects,
        sound.as_ref(),
        &mut rng,
        Pacing::default(),
    );

    terminal.restore().context("failed to restore terminal")?;
    result.context("rendering failed")?;

    info!(
        score = world.score,
        lives = world.lives,
        ticks = world.tick,
        outcome = ?world.phase,
        "game finished"
    );
    Ok(())
}

fn game_loop<W: Write, R: Rng + ?Sized>(
    world: &mut WorldState,
    renderer: &mut Renderer<W>,
    input: &InputQueue,
    effects: &EffectScheduler,
    sound: Option<&SoundEngine>,
    rng: &mut R,
    pacing: Pacing,
) -> io::Result<()> {
    loop {
        let started = Instant::now();
        let mut budget = pacing.tick;

        let events = step(world, input.poll(), effects, rng);
        for event in &events {
            debug!(tick = world.tick, ?event);
            play_cue(sound, event);
            if let GameEvent::PlayerCaught { at, .. } = event {
                renderer.draw_death(*at, world.grid.rows())?;
                thread::sleep(pacing.death_pause);
                budget += pacing.death_pause;
            }
        }

        renderer.render(world)?;

        if world.phase != Phase::Running {
            renderer.draw_outcome(world)?;
            return Ok(());
        }

        if let Some(rest) = budget.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

fn play_cue(sound: Option<&SoundEngine>, event: &GameEvent) {
    if let (Some(sfx), Some(cue)) = (sound, cue_for(event)) {
        sfx.play(cue);
    }
}
