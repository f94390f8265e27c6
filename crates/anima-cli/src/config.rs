//! Simulation configuration – reads/writes `anima.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Where to place a person when the world is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: i32,
    pub y: i32,
}

/// Persisted simulation configuration stored in `anima.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Grid width in cells.
    #[serde(default = "default_width")]
    pub width: i32,

    /// Grid height in cells.
    #[serde(default = "default_height")]
    pub height: i32,

    /// Seed for the run's random stream. Two runs with the same config and
    /// seed replay identically.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of simulation ticks to run.
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Perception ticks per simulated hour (time base of memory decay).
    #[serde(default = "default_ticks_per_hour")]
    pub ticks_per_hour: u64,

    /// The first person vocalises every this many ticks. `0` disables
    /// vocalisation entirely.
    #[serde(default = "default_utter_every")]
    pub utter_every: u64,

    /// Spawn positions, one person each.
    #[serde(default = "default_spawn_points")]
    pub spawn_points: Vec<SpawnPoint>,

    /// Where to write the memory-graph JSON snapshot after the run.
    /// Empty disables the export.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub graph_path: String,
}

fn default_width() -> i32 {
    5
}
fn default_height() -> i32 {
    5
}
fn default_seed() -> u64 {
    42
}
fn default_ticks() -> u64 {
    200
}
fn default_ticks_per_hour() -> u64 {
    anima_mind::DEFAULT_TICKS_PER_HOUR
}
fn default_utter_every() -> u64 {
    50
}
fn default_spawn_points() -> Vec<SpawnPoint> {
    vec![
        SpawnPoint { x: 1, y: 0 },
        SpawnPoint { x: 3, y: 0 },
        SpawnPoint { x: 0, y: 1 },
        SpawnPoint { x: 0, y: 2 },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            seed: default_seed(),
            ticks: default_ticks(),
            ticks_per_hour: default_ticks_per_hour(),
            utter_every: default_utter_every(),
            spawn_points: default_spawn_points(),
            graph_path: String::new(),
        }
    }
}

/// Return the config path: `$ANIMA_CONFIG` when set, `anima.toml` otherwise.
pub fn config_path() -> PathBuf {
    std::env::var("ANIMA_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("anima.toml"))
}

/// Load the config from disk.  Returns `None` if the file does not exist.
pub fn load() -> Result<Option<Config>, String> {
    load_from(&config_path())
}

/// Load the config from a specific path.
pub(crate) fn load_from(path: &PathBuf) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let mut cfg: Config =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))?;
    apply_env_overrides(&mut cfg);
    Ok(Some(cfg))
}

/// Apply `ANIMA_*` environment variable overrides to `cfg`.
///
/// Supported variables:
///
/// | Variable | Config field |
/// |---|---|
/// | `ANIMA_SEED` | `seed` |
/// | `ANIMA_TICKS` | `ticks` |
/// | `ANIMA_GRAPH_PATH` | `graph_path` |
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("ANIMA_SEED")
        && let Ok(seed) = v.parse::<u64>()
    {
        cfg.seed = seed;
    }
    if let Ok(v) = std::env::var("ANIMA_TICKS")
        && let Ok(ticks) = v.parse::<u64>()
    {
        cfg.ticks = ticks;
    }
    if let Ok(v) = std::env::var("ANIMA_GRAPH_PATH") {
        cfg.graph_path = v;
    }
}

/// Save the config to disk.
pub fn save(cfg: &Config) -> Result<(), String> {
    save_to(cfg, &config_path())
}

/// Save the config to a specific path.
pub(crate) fn save_to(cfg: &Config, path: &PathBuf) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let raw =
        toml::to_string_pretty(cfg).map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(path, raw)
        .map_err(|e| format!("Failed to write config at {}: {}", path.display(), e))?;
    Ok(())
}
