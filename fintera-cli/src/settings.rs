//! Settings file.
//!
//! `settings.json` in the config directory; every field is optional. Command
//! line flags (and their environment variables) take precedence over it.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use fintera_lib::config::ListConfig;
use fintera_lib::i18n::Catalog;
use serde::Deserialize;
use serde::Serialize;

use crate::error::CliError;

/// Locale whose strings ship with the binary.
const BUNDLED_LOCALE: &str = "en";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub locale: Option<String>,
    /// Per-key overrides of the user-facing strings.
    pub strings: HashMap<String, String>,
    pub list: ListConfig,
}

impl Settings {
    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no settings file at {}", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CliError::SettingsIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&raw).map_err(|source| CliError::SettingsJson {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Resolves the backend URL; `flag` already carries the environment value.
    pub fn base_url(&self, flag: Option<String>) -> Result<String, CliError> {
        flag.or_else(|| self.base_url.clone())
            .filter(|url| !url.trim().is_empty())
            .ok_or(CliError::MissingUrl)
    }

    /// Resolves the access token; `flag` already carries the environment value.
    pub fn token(&self, flag: Option<String>) -> Result<String, CliError> {
        flag.or_else(|| self.token.clone())
            .filter(|token| !token.trim().is_empty())
            .ok_or(CliError::MissingToken)
    }

    /// Builds the string catalog: the bundled English strings, then overrides.
    pub fn catalog(&self) -> Catalog {
        if let Some(locale) = self.locale.as_deref().filter(|l| *l != BUNDLED_LOCALE) {
            log::warn!("no bundled strings for locale {}, using English", locale);
        }
        let mut catalog = Catalog::english();
        catalog.extend(self.strings.clone());
        catalog
    }
}
