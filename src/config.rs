/// External configuration loader.
///
/// Reads the glyph/timing record named on the command line. JSON is the
/// default format; a `.toml` extension switches to TOML. The file itself
/// must exist and parse, but individual keys fall back to defaults.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::GameError;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub glyphs: Glyphs,
    /// Emoji glyphs are two columns wide; the renderer doubles column offsets.
    pub use_emoji: bool,
    pub effects: EffectDurations,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub player: String,
    pub start_flag: String,
    pub virus: String,
    pub virus_blue: String,
    pub zombie: String,
    pub zombie_blue: String,
    pub wall: String,
    pub dot: String,
    pub wash: String,
    pub people: String,
    pub food: String,
    pub death: String,
    pub space: String,
}

/// How long each power effect lasts. Read at trigger time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectDurations {
    /// Wash (viruses) and people (zombies) pickups.
    pub wash: Duration,
    /// Food pickup.
    pub food: Duration,
}

// ── File Schema (with serde defaults) ──

#[derive(Deserialize, Debug)]
struct FileConfig {
    #[serde(default = "default_player")]
    player: String,
    #[serde(default = "default_start_flag")]
    startflag: String,
    #[serde(default = "default_virus")]
    virus: String,
    #[serde(default = "default_virus_blue")]
    virus_blue: String,
    #[serde(default = "default_zombie")]
    zombie: String,
    #[serde(default = "default_zombie_blue")]
    zombie_blue: String,
    #[serde(default = "default_wall")]
    wall: String,
    #[serde(default = "default_dot")]
    dot: String,
    #[serde(default = "default_wash")]
    wash: String,
    #[serde(default = "default_people")]
    people: String,
    #[serde(default = "default_food")]
    food: String,
    #[serde(default = "default_death")]
    death: String,
    #[serde(default = "default_space")]
    space: String,
    #[serde(default)]
    use_emoji: bool,
    #[serde(default = "default_wash_secs")]
    wash_duration_secs: u64,
    #[serde(default = "default_food_secs")]
    food_duration_secs: u64,
}

// ── Defaults ──

fn default_player() -> String { "@".into() }
fn default_start_flag() -> String { "F".into() }
fn default_virus() -> String { "V".into() }
fn default_virus_blue() -> String { "v".into() }
fn default_zombie() -> String { "Z".into() }
fn default_zombie_blue() -> String { "z".into() }
fn default_wall() -> String { "#".into() }
fn default_dot() -> String { ".".into() }
fn default_wash() -> String { "X".into() }
fn default_people() -> String { "Y".into() }
fn default_food() -> String { "O".into() }
fn default_death() -> String { "*".into() }
fn default_space() -> String { " ".into() }
fn default_wash_secs() -> u64 { 10 }
fn default_food_secs() -> u64 { 10 }

impl From<FileConfig> for GameConfig {
    fn from(f: FileConfig) -> Self {
        GameConfig {
            glyphs: Glyphs {
                player: f.player,
                start_flag: f.startflag,
                virus: f.virus,
                virus_blue: f.virus_blue,
                zombie: f.zombie,
                zombie_blue: f.zombie_blue,
                wall: f.wall,
                dot: f.dot,
                wash: f.wash,
                people: f.people,
                food: f.food,
                death: f.death,
                space: f.space,
            },
            use_emoji: f.use_emoji,
            effects: EffectDurations {
                wash: Duration::from_secs(f.wash_duration_secs),
                food: Duration::from_secs(f.food_duration_secs),
            },
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `path`. Missing or malformed files are errors;
    /// missing keys are not.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let file: FileConfig = if is_toml {
            toml::from_str(&text).map_err(|source| GameError::ConfigToml {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_json::from_str(&text).map_err(|source| GameError::ConfigJson {
                path: path.to_path_buf(),
                source,
            })?
        };

        let config = GameConfig::from(file);
        tracing::debug!(
            path = %path.display(),
            use_emoji = config.use_emoji,
            wash_secs = config.effects.wash.as_secs(),
            food_secs = config.effects.food.as_secs(),
            "configuration loaded"
        );
        Ok(config)
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        FileConfig {
            player: default_player(),
            startflag: default_start_flag(),
            virus: default_virus(),
            virus_blue: default_virus_blue(),
            zombie: default_zombie(),
            zombie_blue: default_zombie_blue(),
            wall: default_wall(),
            dot: default_dot(),
            wash: default_wash(),
            people: default_people(),
            food: default_food(),
            death: default_death(),
            space: default_space(),
            use_emoji: false,
            wash_duration_secs: default_wash_secs(),
            food_duration_secs: default_food_secs(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from(FileConfig::default())
    }
}
