//! Trainer configuration loaded from the process environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use character_core::CharacterConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read character config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid character config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug)]
pub struct TrainerConfig {
    /// Fixed simulation step in seconds.
    pub dt: f32,
    pub character: CharacterConfig,
    /// Directory for the trainer log file; stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl TrainerConfig {
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TRAINER_DT` - Simulation step in seconds (default: 1/60)
    /// - `TRAINER_CHARACTER_CONFIG` - Path to a JSON `CharacterConfig` (default: built-in tuning)
    /// - `TRAINER_LOG_DIR` - Directory for `trainer.log` (default: none)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dt) = read_var::<f32, _>(&lookup, "TRAINER_DT") {
            if dt.is_finite() && dt > 0.0 {
                config.dt = dt;
            }
        }
        if let Some(path) = lookup("TRAINER_CHARACTER_CONFIG") {
            config.character = load_character_config(Path::new(&path))?;
        }
        if let Some(dir) = lookup("TRAINER_LOG_DIR").filter(|dir| !dir.is_empty()) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            dt: Self::DEFAULT_DT,
            character: CharacterConfig::default(),
            log_dir: None,
        }
    }
}

/// Reads a JSON character tuning file. Missing fields keep their defaults.
pub fn load_character_config(path: &Path) -> Result<CharacterConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}

fn read_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = TrainerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.dt, TrainerConfig::DEFAULT_DT);
        assert_eq!(config.character, CharacterConfig::default());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn invalid_dt_keeps_default() {
        for value in ["abc", "0", "-0.5", "NaN"] {
            let config = TrainerConfig::from_lookup(lookup(&[("TRAINER_DT", value)])).unwrap();
            assert_eq!(config.dt, TrainerConfig::DEFAULT_DT, "{value}");
        }

        let config = TrainerConfig::from_lookup(lookup(&[("TRAINER_DT", "0.05")])).unwrap();
        assert_eq!(config.dt, 0.05);
    }

    #[test]
    fn partial_character_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"locomotion": {{"move_speed": 3.5}}, "recovery": {{"idle_state": "Stand"}}}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_owned();

        let config = TrainerConfig::from_lookup(lookup(&[
            ("TRAINER_CHARACTER_CONFIG", path.as_str()),
            ("TRAINER_LOG_DIR", "/tmp/trainer-logs"),
        ]))
        .unwrap();

        assert_eq!(config.character.locomotion.move_speed, 3.5);
        assert_eq!(
            config.character.locomotion.sprint_speed,
            character_core::LocomotionConfig::DEFAULT_SPRINT_SPEED
        );
        assert_eq!(config.character.recovery.idle_state, "Stand");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/trainer-logs")));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = load_character_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = load_character_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
