//! libemoji-core
//!
//! Alias table, country-flag codec, skin-tone templates and configuration
//! shared by the `libemoji` crate.
//!
//! Public API:
//! - `AliasTable` - alias <-> sequence registry with the `flag-XX` rule
//! - `FlagCodec` - two-letter country code <-> regional-indicator pair
//! - `Tone`, `ToneTemplate` - skin tones and tone rendering
//! - `Config` - delimiter, placeholder and reverse-mapping priority
//! - `Error` - failures returned by the above
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

pub mod flag;
pub use flag::{country_flag, is_regional_indicator, FlagCodec};

pub mod tone;
pub use tone::{get_all_tones, get_tone, has_tone, is_tone_modifier, Tone, ToneTemplate};

pub mod table;
pub use table::AliasTable;

/// Which alias a sequence maps back to when several aliases share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReversePriority {
    /// The alias registered first keeps the reverse entry.
    #[default]
    FirstRegistered,
    /// Every registration overwrites the reverse entry.
    LastRegistered,
}

/// Table and parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Character that opens and closes an alias token (`:pizza:`).
    pub delimiter: char,

    /// Marker for skin-tone slots in tone templates, for assets that do not
    /// declare their own.
    pub placeholder: char,

    /// Collision policy for the sequence -> alias mapping.
    pub reverse_priority: ReversePriority,

    /// Resolve `:flag-XX:` structurally and synthesize it when deparsing
    /// unregistered flags.
    pub flag_aliases: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: ':',
            placeholder: tone::TONE_PLACEHOLDER,
            reverse_priority: ReversePriority::FirstRegistered,
            flag_aliases: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The alias `flag-<code>` wrapped in delimiters.
    pub fn flag_alias(&self, code: &str) -> String {
        let d = self.delimiter;
        format!("{d}flag-{code}{d}")
    }
}
