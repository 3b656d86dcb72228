use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::categories::{DEFAULT_OPEN_COMMAND, DEFAULT_PLAY_COMMAND};

const APP_DIR_NAME: &str = "JumpList";
const CONFIG_FILE_NAME: &str = "jumplist.toml";
/// Shell limit for explicit application user model ids.
pub const MAX_APP_ID_CHARS: usize = 128;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid json5: {0}")]
    Json5(#[from] json5::Error),
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app_id: String,
    pub delete_on_start: bool,
    pub icon_path: PathBuf,
    pub recent: bool,
    pub frequent: bool,
    pub tasks: bool,
    pub bookmarks: bool,
    pub playlists: bool,
    pub bookmark_category: String,
    pub playlist_category: String,
    pub play_title: String,
    pub open_title: String,
    pub play_command: String,
    pub open_command: String,
    pub history_cache_id: Option<String>,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: "JumpList.Player".to_string(),
            delete_on_start: false,
            icon_path: PathBuf::new(),
            recent: true,
            frequent: false,
            tasks: true,
            bookmarks: true,
            playlists: false,
            bookmark_category: "Bookmarks".to_string(),
            playlist_category: "Playlists".to_string(),
            play_title: "Resume playback".to_string(),
            open_title: "Open file".to_string(),
            play_command: DEFAULT_PLAY_COMMAND.to_string(),
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            history_cache_id: None,
            config_path: stable_app_data_dir().join(CONFIG_FILE_NAME),
        }
    }
}

/// Roaming application data for the current user, when the environment names it.
pub fn roaming_app_data_dir() -> Option<PathBuf> {
    std::env::var_os("APPDATA")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn stable_app_data_dir() -> PathBuf {
    roaming_app_data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

/// Loads the config at `path` (or the default location). A missing file yields defaults.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| stable_app_data_dir().join(CONFIG_FILE_NAME));

    let raw = match std::fs::read_to_string(&config_path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Config {
                config_path,
                ..Config::default()
            });
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: config_path,
                source,
            })
        }
    };

    let mut config = parse(&raw, &config_path)?;
    config.config_path = config_path;
    validate(&config)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = config.config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let encoded = toml::to_string_pretty(config)?;
    std::fs::write(&config.config_path, encoded).map_err(|source| ConfigError::Io {
        path: config.config_path.clone(),
        source,
    })
}

fn parse(raw: &str, path: &Path) -> Result<Config, ConfigError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);

    if is_json {
        Ok(json5::from_str(raw)?)
    } else {
        Ok(toml::from_str(raw)?)
    }
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let app_id = cfg.app_id.trim();
    if app_id.is_empty() {
        return Err(ConfigError::Invalid("app_id is required".into()));
    }
    if app_id.chars().count() > MAX_APP_ID_CHARS {
        return Err(ConfigError::Invalid(format!(
            "app_id exceeds {MAX_APP_ID_CHARS} characters"
        )));
    }
    if app_id.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid("app_id must not contain spaces".into()));
    }

    if cfg.tasks {
        if cfg.play_command.trim().is_empty() || cfg.open_command.trim().is_empty() {
            return Err(ConfigError::Invalid("task commands are required".into()));
        }
        if cfg.play_title.trim().is_empty() || cfg.open_title.trim().is_empty() {
            return Err(ConfigError::Invalid("task titles are required".into()));
        }
    }
    if cfg.bookmarks && cfg.bookmark_category.trim().is_empty() {
        return Err(ConfigError::Invalid("bookmark_category is required".into()));
    }
    if cfg.playlists && cfg.playlist_category.trim().is_empty() {
        return Err(ConfigError::Invalid("playlist_category is required".into()));
    }

    Ok(())
}
