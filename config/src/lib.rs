//! Load configuration from XDG `config.toml` and project `.env`, then apply to the process
//! environment with priority: **existing env > .env > XDG**.
//!
//! Strand reads its settings from the environment (see `strand::ChatSettings::from_env`);
//! this crate only decides which values end up there. [`env_value`] parses one variable.

mod dotenv;
#[cfg(feature = "tracing-init")]
mod tracing_init;
mod xdg_toml;

use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "tracing-init")]
pub use tracing_init::init_tracing;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Loads `$XDG_CONFIG_HOME/<app_name>/config.toml` (`[env]` table) and the project `.env`,
/// then sets only the variables that are **not** already present in the process environment.
///
/// For a key missing from the environment, `.env` wins over XDG.
///
/// * `app_name`: e.g. `"strand"`; selects `~/.config/<app_name>/config.toml`.
/// * `override_dir`: look for `.env` here instead of the current directory.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let mut merged = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
    merged.extend(dotenv_map);

    for (key, value) in merged {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
        }
    }
    Ok(())
}

/// Reads and parses one environment variable.
///
/// Unset or empty yields `Ok(None)`; a value that does not parse as `T` is
/// [`LoadError::InvalidValue`].
pub fn env_value<T: FromStr>(key: &str) -> Result<Option<T>, LoadError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| LoadError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
        _ => Ok(None),
    }
}
