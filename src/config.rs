//! Application-level configuration loading: club defaults used when scheduling and balancing.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use time::{Time, macros::time};
use tracing::{info, warn};

use crate::services::team_balancer::DEFAULT_MIN_PLAYERS;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PENA_BACK_CONFIG_PATH";
const DEFAULT_KICKOFF: Time = time!(19:00);
const DEFAULT_VENUE: &str = "Campo Municipal";
const DEFAULT_TEAM_NAMES: [&str; 2] = ["Equipo A", "Equipo B"];

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Minimum number of selected players required to generate teams.
    pub min_players: usize,
    /// Kickoff used when a match is created without an explicit time.
    pub default_kickoff: Time,
    /// Venue used when a match is created without an explicit pitch.
    pub default_venue: String,
    /// Names given to the two sides of a generated match.
    pub team_names: [String; 2],
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        min_players = app_config.min_players,
                        "loaded club configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            min_players: DEFAULT_MIN_PLAYERS,
            default_kickoff: DEFAULT_KICKOFF,
            default_venue: DEFAULT_VENUE.to_string(),
            team_names: DEFAULT_TEAM_NAMES.map(String::from),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
///
/// Every field is optional; omitted ones keep their built-in default.
struct RawConfig {
    min_players: Option<usize>,
    #[serde(default, with = "crate::dao::models::kickoff_time::option")]
    default_kickoff: Option<Time>,
    default_venue: Option<String>,
    team_names: Option<[String; 2]>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            min_players: value
                .min_players
                .filter(|min| *min > 0)
                .unwrap_or(defaults.min_players),
            default_kickoff: value.default_kickoff.unwrap_or(defaults.default_kickoff),
            default_venue: value
                .default_venue
                .filter(|venue| !venue.trim().is_empty())
                .unwrap_or(defaults.default_venue),
            team_names: value.team_names.unwrap_or(defaults.team_names),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
