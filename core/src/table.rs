//! Bidirectional alias table.
//!
//! `AliasTable` maps alias tokens (`:thumbs_up:`) to the exact code-point
//! sequence they stand for, and sequences back to one alias. Sequences are
//! stored byte-for-byte; no normalization is applied.
//!
//! The forward side is injective: registering an alias twice fails. The
//! reverse side is not; when several aliases share one sequence the
//! configured `ReversePriority` picks the one that is reported.
//!
//! Besides literal entries, `lookup` recognizes `<d>flag-XX<d>` for any two
//! letters and synthesizes the flag through `FlagCodec`.
//!
//! Tables are loaded from a TOML (or JSON) asset:
//!
//! ```toml
//! emoji = [
//!     [":thumbs_up:", "\U0001F44D"],
//!     [":+1:", "\U0001F44D"],
//! ]
//!
//! [[tone]]
//! alias = ":waving_hand:"
//! one = "\U0001F44B@"
//! ```
//!
//! An asset may declare its own tone marker with a top-level
//! `placeholder = "@"`; otherwise the config's placeholder is assumed.
//! Every toned rendering of a `[[tone]]` record deparses to its alias.

use crate::error::{Error, Result};
use crate::flag::FlagCodec;
use crate::tone::{Tone, ToneTemplate};
use crate::{Config, ReversePriority};
use ahash::{AHashMap, AHashSet};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One `[[tone]]` record of the data asset.
#[derive(Debug, Clone, Deserialize)]
struct ToneRecord {
    alias: String,
    one: String,
    #[serde(default)]
    two: Option<String>,
    #[serde(default)]
    default_tone: Tone,
}

/// On-disk shape of the data asset.
#[derive(Debug, Clone, Default, Deserialize)]
struct TableAsset {
    /// Tone marker used by this asset's templates.
    #[serde(default)]
    placeholder: Option<char>,
    #[serde(default)]
    emoji: Vec<(String, String)>,
    #[serde(default)]
    tone: Vec<ToneRecord>,
}

/// Alias <-> sequence registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasTable {
    config: Config,
    forward: AHashMap<String, String>,
    reverse: AHashMap<String, String>,
    tones: AHashMap<String, ToneTemplate>,
    /// Digit, `#` and `*` keycap sequences.
    numbers: AHashSet<String>,
    /// Longest registered sequence, in code points.
    max_sequence_chars: usize,
}

impl AliasTable {
    /// Create an empty table with the default config.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty table.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build a table from a TOML data asset.
    pub fn from_toml_str(content: &str, config: Config) -> Result<Self> {
        let asset: TableAsset = toml::from_str(content)?;
        Ok(Self::from_asset(asset, config))
    }

    /// Build a table from the same asset shape encoded as JSON.
    pub fn from_json_str(content: &str, config: Config) -> Result<Self> {
        let asset: TableAsset = serde_json::from_str(content)?;
        Ok(Self::from_asset(asset, config))
    }

    /// Read a TOML data asset from disk.
    pub fn load_toml<P: AsRef<Path>>(path: P, config: Config) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading emoji table {}", path.display()))?;
        let table = Self::from_toml_str(&content, config)
            .with_context(|| format!("parsing emoji table {}", path.display()))?;
        Ok(table)
    }

    /// Save the table (config included) using bincode serialization.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Load a table produced by `save_bincode`.
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let reader = BufReader::new(file);
        let table: Self = bincode::deserialize_from(reader)?;
        Ok(table)
    }

    fn from_asset(asset: TableAsset, config: Config) -> Self {
        let mut table = Self::with_config(config);

        for (alias, sequence) in asset.emoji {
            if let Err(err) = table.append(&alias, &sequence) {
                tracing::warn!(%alias, %err, "skipping emoji table entry");
            }
        }

        let placeholder = asset.placeholder.unwrap_or(table.config.placeholder);
        for record in asset.tone {
            let template = ToneTemplate::new(record.one, record.two)
                .with_default_tone(record.default_tone)
                .with_placeholder(placeholder);
            if let Err(err) = table.add_tone_template(&record.alias, template) {
                tracing::warn!(alias = %record.alias, %err, "skipping tone template");
            }
        }

        tracing::debug!(
            aliases = table.forward.len(),
            sequences = table.reverse.len(),
            tones = table.tones.len(),
            numbers = table.numbers.len(),
            "built emoji alias table"
        );
        table
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve an alias to its sequence.
    ///
    /// Literal entries win; otherwise `<d>flag-XX<d>` (two ASCII letters)
    /// yields the synthesized flag when `flag_aliases` is enabled.
    pub fn lookup(&self, alias: &str) -> Option<Cow<'_, str>> {
        if let Some(sequence) = self.forward.get(alias) {
            return Some(Cow::Borrowed(sequence.as_str()));
        }
        if !self.config.flag_aliases {
            return None;
        }
        let code = self.flag_code(alias)?;
        FlagCodec::encode(code).ok().map(Cow::Owned)
    }

    /// `(sequence, found)` lookup in the shape callers of `find` expect.
    pub fn find(&self, alias: &str) -> (String, bool) {
        match self.lookup(alias) {
            Some(sequence) => (sequence.into_owned(), true),
            None => (String::new(), false),
        }
    }

    /// True if the alias resolves, literally or through the flag rule.
    pub fn exists(&self, alias: &str) -> bool {
        self.lookup(alias).is_some()
    }

    /// The alias reported for an exact sequence.
    pub fn reverse_lookup(&self, sequence: &str) -> Option<&str> {
        self.reverse.get(sequence).map(String::as_str)
    }

    /// Same as `reverse_lookup`, shaped like `find`.
    pub fn find_reverse(&self, sequence: &str) -> (String, bool) {
        match self.reverse_lookup(sequence) {
            Some(alias) => (alias.to_string(), true),
            None => (String::new(), false),
        }
    }

    pub fn contains_sequence(&self, sequence: &str) -> bool {
        self.reverse.contains_key(sequence)
    }

    /// Member of the keycap set: a digit, `#` or `*`, then the optional
    /// variation selector and enclosing keycap.
    pub fn is_number_emoji(&self, sequence: &str) -> bool {
        self.numbers.contains(sequence)
    }

    /// Length of the longest registered sequence, in code points.
    pub fn max_sequence_chars(&self) -> usize {
        self.max_sequence_chars
    }

    /// Register a new alias.
    ///
    /// Fails if the alias already resolves (including `flag-XX` aliases,
    /// which exist structurally) or if it contains whitespace.
    pub fn append(&mut self, alias: &str, sequence: &str) -> Result<()> {
        if let Some(existing) = self.lookup(alias) {
            return Err(Error::AliasAlreadyRegistered {
                alias: alias.to_string(),
                sequence: existing.into_owned(),
            });
        }
        if alias.chars().any(char::is_whitespace) {
            return Err(Error::AliasContainsWhitespace(alias.to_string()));
        }

        self.insert(alias.to_string(), sequence.to_string());
        tracing::trace!(%alias, "registered emoji alias");
        Ok(())
    }

    fn insert(&mut self, alias: String, sequence: String) {
        let overwrite = self.config.reverse_priority == ReversePriority::LastRegistered;
        self.index_sequence(&alias, &sequence, overwrite);
        self.forward.insert(alias, sequence);
    }

    /// Reverse side only: number set, longest length and sequence -> alias.
    fn index_sequence(&mut self, alias: &str, sequence: &str, overwrite: bool) {
        if is_keycap_shape(sequence) {
            self.numbers.insert(sequence.to_string());
        }
        self.max_sequence_chars = self.max_sequence_chars.max(sequence.chars().count());

        if overwrite || !self.reverse.contains_key(sequence) {
            self.reverse.insert(sequence.to_string(), alias.to_string());
        }
    }

    /// Tone template registered for an alias.
    pub fn tone_template(&self, alias: &str) -> Option<&ToneTemplate> {
        self.tones.get(alias)
    }

    /// Attach a tone template to an alias.
    ///
    /// The alias is also registered with the template's default rendering
    /// unless it is already in the table. Every toned rendering maps back to
    /// the alias on the reverse side, unless another entry claimed it first.
    pub fn add_tone_template(&mut self, alias: &str, template: ToneTemplate) -> Result<()> {
        if alias.chars().any(char::is_whitespace) {
            return Err(Error::AliasContainsWhitespace(alias.to_string()));
        }
        if self.tones.contains_key(alias) {
            return Err(Error::AliasAlreadyRegistered {
                alias: alias.to_string(),
                sequence: template.render_default(),
            });
        }
        if !self.forward.contains_key(alias) {
            self.insert(alias.to_string(), template.render_default());
        }
        for rendering in template.toned_renderings() {
            self.index_sequence(alias, &rendering, false);
        }
        self.tones.insert(alias.to_string(), template);
        Ok(())
    }

    /// Render the tone template registered under `alias`.
    pub fn render_tone(&self, alias: &str, tones: &[Tone]) -> Result<String> {
        self.tone_template(alias)
            .ok_or_else(|| Error::UnknownAlias(alias.to_string()))?
            .render(tones)
    }

    /// Read-only copy of the alias -> sequence side.
    pub fn snapshot(&self) -> AHashMap<String, String> {
        self.forward.clone()
    }

    /// Read-only copy of the sequence -> alias side.
    pub fn reverse_snapshot(&self) -> AHashMap<String, String> {
        self.reverse.clone()
    }

    /// Iterate literal `(alias, sequence)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward.iter().map(|(a, s)| (a.as_str(), s.as_str()))
    }

    /// Number of literal aliases.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Country code inside `<d>flag-XX<d>`, if `alias` has that shape.
    fn flag_code<'a>(&self, alias: &'a str) -> Option<&'a str> {
        let d = self.config.delimiter;
        let code = alias
            .strip_prefix(d)?
            .strip_suffix(d)?
            .strip_prefix("flag-")?;
        let two_letters = code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic());
        two_letters.then_some(code)
    }
}

/// `[0-9#*]` optionally followed by U+FE0F and/or U+20E3.
fn is_keycap_shape(sequence: &str) -> bool {
    let mut chars = sequence.chars();
    matches!(chars.next(), Some('0'..='9' | '#' | '*'))
        && matches!(
            chars.as_str(),
            "" | "\u{FE0F}" | "\u{20E3}" | "\u{FE0F}\u{20E3}"
        )
}
