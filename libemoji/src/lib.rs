//! libemoji crate root
//!
//! Emoji alias handling on top of the shared `libemoji-core` table types:
//! `:alias:` replacement, the inverse deparse, emoji detection/stripping and
//! skin-tone helpers.
//!
//! Public API exported here:
//! - `Replacer` and `replace` from `parser`
//! - `deparse` from `deparser`
//! - `GraphemeScanner` and `Segment` from `scanner`
//! - `Engine` from `engine`
//! - crate-level functions over a process-wide table built from the
//!   embedded asset (`replace`, `deparse`, `append_alias`, ...)
//!
//! # Example
//! ```
//! let text = libemoji::replace("I :red_heart: :pizza:");
//! assert_eq!(text, "I \u{2764}\u{FE0F} \u{1F355}");
//! assert_eq!(libemoji::deparse(&text), "I :red_heart: :pizza:");
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use ahash::AHashMap;
use once_cell::sync::Lazy;

pub mod data;
pub mod deparser;
pub mod engine;
pub mod parser;
pub mod scanner;

pub use libemoji_core::{
    AliasTable, Config, Error, FlagCodec, ReversePriority, Result, Tone, ToneTemplate,
};

pub use engine::Engine;
pub use parser::Replacer;
pub use scanner::{GraphemeScanner, Segment};

/// Process-wide table. Readers clone the `Arc`; appends replace the table
/// under the write lock.
static REGISTRY: Lazy<RwLock<Arc<AliasTable>>> =
    Lazy::new(|| RwLock::new(Arc::new(data::builtin_table(Config::default()))));

pub(crate) fn current_table() -> Arc<AliasTable> {
    let guard = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&guard)
}

/// Replace every `:alias:` token in `text` with its emoji.
///
/// Unknown tokens are left as they are.
pub fn replace(text: &str) -> String {
    parser::replace(&current_table(), text)
}

/// Same as `replace`.
pub fn parse(text: &str) -> String {
    replace(text)
}

/// `replace` reusing the buffer owned by `replacer`.
pub fn replace_reusable(replacer: &mut Replacer, text: &str) -> String {
    replacer.replace(&current_table(), text)
}

/// Replace emoji in `text` with their aliases.
pub fn deparse(text: &str) -> String {
    deparser::deparse(&current_table(), text)
}

/// `(sequence, true)` for a known alias, `("", false)` otherwise.
pub fn find(alias: &str) -> (String, bool) {
    current_table().find(alias)
}

pub fn exists(alias: &str) -> bool {
    current_table().exists(alias)
}

/// `(alias, true)` for a registered sequence, `("", false)` otherwise.
pub fn find_reverse(sequence: &str) -> (String, bool) {
    current_table().find_reverse(sequence)
}

/// Register a new alias in the process-wide table.
///
/// Fails if the alias is already known or contains whitespace. Tables
/// obtained earlier (`Engine::global`, snapshots) do not change.
pub fn append_alias(alias: &str, sequence: &str) -> Result<()> {
    let mut guard = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    Arc::make_mut(&mut *guard).append(alias, sequence)?;
    tracing::debug!(%alias, "appended emoji alias");
    Ok(())
}

/// Copy of the alias -> sequence mapping.
pub fn snapshot_table() -> AHashMap<String, String> {
    current_table().snapshot()
}

/// Copy of the sequence -> alias mapping.
pub fn snapshot_reverse_table() -> AHashMap<String, String> {
    current_table().reverse_snapshot()
}

pub fn contains_emoji(text: &str) -> bool {
    scanner::contains_emoji(&current_table(), text)
}

/// `text` without emoji, trimmed.
pub fn remove_emojis(text: &str) -> String {
    scanner::remove_emojis(&current_table(), text)
}

/// Every emoji cluster in `text`, left to right.
pub fn find_all_emojis(text: &str) -> Vec<&str> {
    scanner::find_all_emojis(&current_table(), text)
}

pub fn has_tone(text: &str) -> bool {
    libemoji_core::has_tone(text)
}

/// The first skin tone in `text`.
pub fn get_tone(text: &str) -> Option<Tone> {
    libemoji_core::get_tone(text)
}

pub fn get_all_tones(text: &str) -> Vec<Tone> {
    libemoji_core::get_all_tones(text)
}

/// Flag emoji for a two-letter country code.
pub fn country_flag(code: &str) -> Result<String> {
    libemoji_core::country_flag(code)
}

/// Render the emoji registered under `alias` with up to two skin tones.
pub fn render_tone(alias: &str, tones: &[Tone]) -> Result<String> {
    current_table().render_tone(alias, tones)
}
