//! Emoji engine
//!
//! `Engine` bundles an alias table with every text operation of the crate:
//! alias replacement, deparsing, emoji detection and stripping, tone
//! inspection and rendering.
//!
//! The table is held in an `Arc` so engines clone cheaply and can be shared
//! across threads. `append_alias` is copy-on-write: clones made before the
//! append keep seeing the old table.

use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use libemoji_core::{tone, AliasTable, Config, FlagCodec, Result, Tone};

use crate::parser::{self, Replacer};
use crate::{data, deparser, scanner};

/// Public engine for libemoji.
#[derive(Debug, Clone)]
pub struct Engine {
    table: Arc<AliasTable>,
}

impl Engine {
    /// Construct an engine over `table`.
    pub fn new(table: AliasTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Construct an engine sharing an existing table.
    pub fn from_shared(table: Arc<AliasTable>) -> Self {
        Self { table }
    }

    /// Engine over the built-in table with `config`.
    pub fn with_config(config: Config) -> Self {
        Self::new(data::builtin_table(config))
    }

    /// Engine over the current process-wide table.
    ///
    /// Later `crate::append_alias` calls are not visible to the returned
    /// engine.
    pub fn global() -> Self {
        Self::from_shared(crate::current_table())
    }

    /// Load an engine from a TOML table on disk.
    pub fn load_toml<P: AsRef<Path>>(path: P, config: Config) -> anyhow::Result<Self> {
        Ok(Self::new(AliasTable::load_toml(path, config)?))
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// Shared handle to the table.
    pub fn table_arc(&self) -> Arc<AliasTable> {
        Arc::clone(&self.table)
    }

    /// Replace `:alias:` tokens with their sequences.
    pub fn replace(&self, text: &str) -> String {
        parser::replace(&self.table, text)
    }

    /// `replace` reusing the buffer owned by `replacer`.
    pub fn replace_reusable(&self, replacer: &mut Replacer, text: &str) -> String {
        replacer.replace(&self.table, text)
    }

    /// Replace registered sequences with their aliases.
    pub fn deparse(&self, text: &str) -> String {
        deparser::deparse(&self.table, text)
    }

    pub fn find(&self, alias: &str) -> (String, bool) {
        self.table.find(alias)
    }

    pub fn exists(&self, alias: &str) -> bool {
        self.table.exists(alias)
    }

    /// `(alias, true)` for a registered sequence, `("", false)` otherwise.
    pub fn find_reverse(&self, sequence: &str) -> (String, bool) {
        self.table.find_reverse(sequence)
    }

    /// Register a new alias on this engine's copy of the table.
    pub fn append_alias(&mut self, alias: &str, sequence: &str) -> Result<()> {
        Arc::make_mut(&mut self.table).append(alias, sequence)?;
        tracing::debug!(%alias, "appended emoji alias");
        Ok(())
    }

    pub fn snapshot_table(&self) -> AHashMap<String, String> {
        self.table.snapshot()
    }

    pub fn snapshot_reverse_table(&self) -> AHashMap<String, String> {
        self.table.reverse_snapshot()
    }

    pub fn contains_emoji(&self, text: &str) -> bool {
        scanner::contains_emoji(&self.table, text)
    }

    pub fn remove_emojis(&self, text: &str) -> String {
        scanner::remove_emojis(&self.table, text)
    }

    pub fn find_all_emojis<'a>(&self, text: &'a str) -> Vec<&'a str> {
        scanner::find_all_emojis(&self.table, text)
    }

    pub fn has_tone(&self, text: &str) -> bool {
        tone::has_tone(text)
    }

    pub fn get_tone(&self, text: &str) -> Option<Tone> {
        tone::get_tone(text)
    }

    pub fn get_all_tones(&self, text: &str) -> Vec<Tone> {
        tone::get_all_tones(text)
    }

    pub fn country_flag(&self, code: &str) -> Result<String> {
        FlagCodec::encode(code)
    }

    /// Render the tone template registered under `alias`.
    pub fn render_tone(&self, alias: &str, tones: &[Tone]) -> Result<String> {
        self.table.render_tone(alias, tones)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libemoji_core::Error;

    #[test]
    fn append_is_copy_on_write() {
        let mut engine = Engine::default();
        let before = engine.clone();
        engine.append_alias(":my_pizza:", "\u{1F355}").unwrap();
        assert!(engine.exists(":my_pizza:"));
        assert!(!before.exists(":my_pizza:"));
        assert_eq!(engine.replace(":my_pizza:"), "\u{1F355}");
    }

    #[test]
    fn append_errors() {
        let mut engine = Engine::default();
        assert!(matches!(
            engine.append_alias(":pizza:", "\u{1F355}"),
            Err(Error::AliasAlreadyRegistered { .. })
        ));
        assert_eq!(
            engine.append_alias(":my pizza:", "\u{1F355}"),
            Err(Error::AliasContainsWhitespace(":my pizza:".into()))
        );
    }

    #[test]
    fn operations_share_one_table() {
        let engine = Engine::default();
        let text = engine.replace("I :red_heart: :pizza:");
        assert_eq!(text, "I \u{2764}\u{FE0F} \u{1F355}");
        assert_eq!(engine.deparse(&text), "I :red_heart: :pizza:");
        assert_eq!(engine.find_all_emojis(&text), vec!["\u{2764}\u{FE0F}", "\u{1F355}"]);
        assert_eq!(engine.remove_emojis(&text), "I");
        assert!(engine.contains_emoji(&text));
    }

    #[test]
    fn custom_config() {
        let engine = Engine::with_config(Config {
            delimiter: ';',
            ..Config::default()
        });
        // the built-in asset spells aliases with ':'
        assert_eq!(engine.replace(";pizza;"), ";pizza;");
        assert_eq!(engine.replace(";flag-de;"), "\u{1F1E9}\u{1F1EA}");
        assert_eq!(engine.deparse("\u{1F1E8}\u{1F1E6}"), ";flag-ca;");
    }

    #[test]
    fn placeholder_config_keeps_builtin_tones() {
        let engine = Engine::with_config(Config {
            placeholder: '%',
            ..Config::default()
        });
        assert_eq!(engine.find(":waving_hand:"), ("\u{1F44B}".to_string(), true));
        assert_eq!(engine.render_tone(":waving_hand:", &[]).unwrap(), "\u{1F44B}");
        assert_eq!(
            engine.render_tone(":waving_hand:", &[Tone::Dark]).unwrap(),
            "\u{1F44B}\u{1F3FF}"
        );
        assert_eq!(engine.replace(":waving_hand:"), "\u{1F44B}");
    }

    #[test]
    fn find_reverse_through_engine() {
        let mut engine = Engine::default();
        assert_eq!(engine.find_reverse("\u{1F44D}"), (":thumbs_up:".to_string(), true));
        assert_eq!(engine.find_reverse("\u{1F44B}\u{1F3FE}"), (":waving_hand:".to_string(), true));
        assert_eq!(engine.find_reverse("abc"), (String::new(), false));
        engine.append_alias(":my_sign:", "\u{1FAAC}\u{1FAAC}").unwrap();
        assert_eq!(
            engine.find_reverse("\u{1FAAC}\u{1FAAC}"),
            (":my_sign:".to_string(), true)
        );
    }

    #[test]
    fn render_tone_through_engine() {
        let engine = Engine::default();
        assert_eq!(
            engine.render_tone(":waving_hand:", &[Tone::MediumDark]).unwrap(),
            "\u{1F44B}\u{1F3FE}"
        );
        assert_eq!(
            engine.render_tone(":pizza:", &[]),
            Err(Error::UnknownAlias(":pizza:".into()))
        );
    }
}
