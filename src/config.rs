use crate::game::Mode;
use crate::highscore::FileStore;
use log::LevelFilter;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Game mode selected when the program starts
    #[serde(default)]
    pub(crate) mode: Mode,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    /// Settings about the log file
    #[serde(default)]
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snakebite").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which the high score should be stored: the file
    /// given in the configuration or, if that is not set, the default high
    /// score file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    fn high_score_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .high_score_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| FileStore::default_path().map(Cow::from))
    }

    /// Return the store in which to keep the high score, or `None` if the high
    /// score should not be saved
    pub(crate) fn high_score_store(&self) -> Option<FileStore> {
        if !self.files.save_high_score {
            return None;
        }
        let store = self
            .high_score_file()
            .map(|p| FileStore::new(p.into_owned()));
        if store.is_none() {
            log::warn!("Could not determine where to save the high score; it will not be saved");
        }
        store
    }

    /// Return the path of the log file, or `None` if it could not be
    /// determined
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.log.file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("snakebite").join("snakebite.log"))
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    pub(crate) save_high_score: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    high_score_file: Option<String>,
    save_high_score: bool,
}

impl Default for RawFileConfig {
    fn default() -> RawFileConfig {
        RawFileConfig {
            high_score_file: None,
            save_high_score: true,
        }
    }
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = RawConfigError;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, RawConfigError> {
        Ok(FileConfig {
            high_score_file: value.high_score_file.map(expand_tilde).transpose()?,
            save_high_score: value.save_high_score,
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawLogConfig")]
pub(crate) struct LogConfig {
    /// Path to the log file
    file: Option<PathBuf>,

    /// Minimum level of messages to write to the log file
    pub(crate) level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawLogConfig {
    file: Option<String>,
    level: String,
}

impl Default for RawLogConfig {
    fn default() -> RawLogConfig {
        RawLogConfig {
            file: None,
            level: String::from("info"),
        }
    }
}

impl TryFrom<RawLogConfig> for LogConfig {
    type Error = RawConfigError;

    fn try_from(value: RawLogConfig) -> Result<LogConfig, RawConfigError> {
        let level = value
            .level
            .parse::<LevelFilter>()
            .map_err(|_| RawConfigError::Level(value.level))?;
        Ok(LogConfig {
            file: value.file.map(expand_tilde).transpose()?,
            level,
        })
    }
}

/// Expand a leading `~/` in `path` to the user's home directory
fn expand_tilde(path: String) -> Result<PathBuf, RawConfigError> {
    if path == "~" {
        dirs::home_dir().ok_or(RawConfigError::NoHome(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .map(|home| home.join(rest))
            .ok_or(RawConfigError::NoHome(path))
    } else {
        Ok(PathBuf::from(path))
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub(crate) enum RawConfigError {
    #[error("invalid log level {0:?}")]
    Level(String),
    #[error("failed to determine home directory while expanding {0:?}")]
    NoHome(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn empty_config() {
        let cfg = toml::from_str::<Config>("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.mode, Mode::Normal);
        assert!(cfg.files.save_high_score);
        assert_eq!(cfg.log.level, LevelFilter::Info);
    }

    #[test]
    fn full_config() {
        let cfg = toml::from_str::<Config>(concat!(
            "mode = \"easy\"\n",
            "\n",
            "[files]\n",
            "high-score-file = \"/var/games/snakebite.json\"\n",
            "save-high-score = false\n",
            "\n",
            "[log]\n",
            "file = \"/tmp/snakebite.log\"\n",
            "level = \"DEBUG\"\n",
        ))
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                mode: Mode::Easy,
                files: FileConfig {
                    high_score_file: Some(PathBuf::from("/var/games/snakebite.json")),
                    save_high_score: false,
                },
                log: LogConfig {
                    file: Some(PathBuf::from("/tmp/snakebite.log")),
                    level: LevelFilter::Debug,
                },
            }
        );
        assert_eq!(cfg.high_score_store(), None);
        assert_eq!(cfg.log_file(), Some(PathBuf::from("/tmp/snakebite.log")));
    }

    #[test]
    fn configured_high_score_file() {
        let cfg = toml::from_str::<Config>(concat!(
            "[files]\n",
            "high-score-file = \"/var/games/snakebite.json\"\n",
        ))
        .unwrap();
        assert_eq!(
            cfg.high_score_store(),
            Some(FileStore::new(PathBuf::from("/var/games/snakebite.json")))
        );
    }

    #[test]
    fn bad_mode() {
        assert!(toml::from_str::<Config>("mode = \"nightmare\"\n").is_err());
    }

    #[test]
    fn bad_log_level() {
        assert!(toml::from_str::<Config>("[log]\nlevel = \"loud\"\n").is_err());
    }

    #[test]
    fn load_missing_allowed() {
        let tmpdir = tempdir().unwrap();
        let cfg = Config::load(&tmpdir.path().join("config.toml"), true).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_missing_not_allowed() {
        let tmpdir = tempdir().unwrap();
        let r = Config::load(&tmpdir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_file() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "mode = \"still\"\n[log]\nlevel = \"off\"\n").unwrap();
        let cfg = Config::load(&path, false).unwrap();
        assert_eq!(cfg.mode, Mode::Still);
        assert_eq!(cfg.log.level, LevelFilter::Off);
    }

    #[test]
    fn expand_plain_path() {
        assert_eq!(
            expand_tilde(String::from("/etc/snakebite")),
            Ok(PathBuf::from("/etc/snakebite"))
        );
    }
}
