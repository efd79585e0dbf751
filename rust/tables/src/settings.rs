use holdem_engine::config::TableConfig;
use holdem_engine::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "HOLDEM_CONFIG";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything a registry needs to open tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub table: TableConfig,
    /// Append hand records here as JSON lines when set
    pub history_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    #[default]
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SettingsSources {
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub starting_chips: ValueSource,
    pub max_seats: ValueSource,
    pub seed: ValueSource,
    pub history_path: ValueSource,
}

#[derive(Debug, Clone)]
pub struct SettingsResolved {
    pub settings: Settings,
    pub sources: SettingsSources,
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_chips: Option<u32>,
    #[serde(default)]
    max_seats: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    history_path: Option<PathBuf>,
}

impl Settings {
    /// Parses a TOML document on top of the defaults and validates it.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let mut resolved = SettingsResolved::defaults();
        resolved.apply_file(toml::from_str(s)?);
        resolved.settings.table.validate()?;
        Ok(resolved.settings)
    }
}

impl SettingsResolved {
    fn defaults() -> Self {
        Self {
            settings: Settings::default(),
            sources: SettingsSources::default(),
        }
    }

    fn apply_file(&mut self, f: FileSettings) {
        let table = &mut self.settings.table;
        let sources = &mut self.sources;
        if let Some(v) = f.small_blind {
            table.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            table.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.starting_chips {
            table.starting_chips = v;
            sources.starting_chips = ValueSource::File;
        }
        if let Some(v) = f.max_seats {
            table.max_seats = v;
            sources.max_seats = ValueSource::File;
        }
        if let Some(v) = f.seed {
            table.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.history_path {
            self.settings.history_path = Some(v);
            sources.history_path = ValueSource::File;
        }
    }

    fn apply_env<F>(&mut self, var: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &'static str| var(name).filter(|v| !v.is_empty()).map(|v| (name, v));
        let table = &mut self.settings.table;
        let sources = &mut self.sources;

        if let Some((name, v)) = lookup("HOLDEM_SMALL_BLIND") {
            table.small_blind = parse(name, v)?;
            sources.small_blind = ValueSource::Env;
        }
        if let Some((name, v)) = lookup("HOLDEM_BIG_BLIND") {
            table.big_blind = parse(name, v)?;
            sources.big_blind = ValueSource::Env;
        }
        if let Some((name, v)) = lookup("HOLDEM_STARTING_CHIPS") {
            table.starting_chips = parse(name, v)?;
            sources.starting_chips = ValueSource::Env;
        }
        if let Some((name, v)) = lookup("HOLDEM_MAX_SEATS") {
            table.max_seats = parse(name, v)?;
            sources.max_seats = ValueSource::Env;
        }
        if let Some((name, v)) = lookup("HOLDEM_SEED") {
            table.seed = Some(parse(name, v)?);
            sources.seed = ValueSource::Env;
        }
        if let Some((_, v)) = lookup("HOLDEM_HISTORY_PATH") {
            self.settings.history_path = Some(PathBuf::from(v));
            sources.history_path = ValueSource::Env;
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidValue { var, value })
}

/// Resolves settings from the process environment: defaults, then the TOML
/// file named by `HOLDEM_CONFIG`, then `HOLDEM_*` overrides.
pub fn load_with_sources() -> Result<SettingsResolved, SettingsError> {
    resolve(|name| std::env::var(name).ok())
}

pub fn load() -> Result<Settings, SettingsError> {
    load_with_sources().map(|resolved| resolved.settings)
}

/// Same as [`load_with_sources`] with a caller-supplied variable lookup.
pub fn resolve<F>(var: F) -> Result<SettingsResolved, SettingsError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut resolved = SettingsResolved::defaults();

    if let Some(path) = var(CONFIG_PATH_VAR).filter(|p| !p.is_empty()) {
        let s = fs::read_to_string(&path)?;
        resolved.apply_file(toml::from_str(&s)?);
        tracing::debug!(path = %path, "loaded config file");
    }
    resolved.apply_env(&var)?;
    resolved.settings.table.validate()?;
    Ok(resolved)
}
