/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub general: GeneralConfig,
    pub audio: AudioConfig,
    pub gamepad: GamepadConfig,
}

#[derive(Clone, Debug)]
pub struct GeneralConfig {
    pub seed: Option<u64>,
    pub log_file: PathBuf,
    pub frame_ms: u64,
}

#[derive(Clone, Debug)]
pub struct AudioConfig {
    pub enabled: bool,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub mine: Vec<String>,
    pub restart: Vec<String>,
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub quit: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config.toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    audio: TomlAudio,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_log_file")]
    log_file: String,
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlAudio {
    #[serde(default = "default_audio_enabled")]
    enabled: bool,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_mine")]
    mine: Vec<String>,
    #[serde(default = "default_restart")]
    restart: Vec<String>,
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

// ── Defaults ──

fn default_log_file() -> String { "minicraft.log".into() }
fn default_frame_ms() -> u64 { 16 }
fn default_audio_enabled() -> bool { true }

fn default_mine() -> Vec<String> { vec!["A".into(), "X".into()] }
fn default_restart() -> Vec<String> { vec!["Start".into()] }
fn default_confirm() -> Vec<String> { vec!["Y".into(), "Start".into()] }
fn default_cancel() -> Vec<String> { vec!["B".into()] }
fn default_quit() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            seed: None,
            log_file: default_log_file(),
            frame_ms: default_frame_ms(),
        }
    }
}

impl Default for TomlAudio {
    fn default() -> Self {
        TomlAudio { enabled: default_audio_enabled() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            mine: default_mine(),
            restart: default_restart(),
            confirm: default_confirm(),
            cancel: default_cancel(),
            quit: default_quit(),
        }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(t: TomlConfig) -> Self {
        GameConfig {
            general: GeneralConfig {
                seed: t.general.seed,
                log_file: PathBuf::from(t.general.log_file),
                frame_ms: t.general.frame_ms.max(1),
            },
            audio: AudioConfig { enabled: t.audio.enabled },
            gamepad: GamepadConfig {
                mine: t.gamepad.mine,
                restart: t.gamepad.restart,
                confirm: t.gamepad.confirm,
                cancel: t.gamepad.cancel,
                quit: t.gamepad.quit,
            },
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    /// Problems are reported on stderr (the terminal is not yet in raw
    /// mode) and handed back so they can be logged once logging is up.
    pub fn load() -> (Self, Vec<ConfigError>) {
        let (cfg, problems) = load_from(&candidate_dirs());
        for e in &problems {
            eprintln!("Warning: {e}");
        }
        if problems.iter().any(|e| matches!(e, ConfigError::Parse(_))) {
            eprintln!("Using default settings.");
        }
        (cfg, problems)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: TomlConfig = toml::from_str(text)?;
        Ok(cfg.into())
    }
}

/// First readable `config.toml` in `dirs` wins. A parse error stops the
/// search and yields defaults; an unreadable file moves on to the next dir.
fn load_from(dirs: &[PathBuf]) -> (GameConfig, Vec<ConfigError>) {
    let mut problems = Vec::new();
    for dir in dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match load_file(&path) {
            Ok(cfg) => return (cfg, problems),
            Err(e @ ConfigError::Parse(_)) => {
                problems.push(e);
                return (GameConfig::default(), problems);
            }
            Err(e) => problems.push(e),
        }
    }
    (GameConfig::default(), problems)
}

fn load_file(path: &Path) -> Result<GameConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    GameConfig::from_toml_str(&text)
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}
