//! Skin tones and tone templates.
//!
//! Public API:
//! - `Tone` - the five Fitzpatrick modifiers plus `Default`
//! - `ToneTemplate` - one-slot and two-slot templates with a default tone
//! - `has_tone` / `get_tone` / `get_all_tones` - tone inspection of free text

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder marker used by templates unless the config says otherwise.
pub const TONE_PLACEHOLDER: char = '@';

/// A skin tone option for emojis that support one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// No explicit modifier: the entity's own default applies.
    #[default]
    Default,
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl Tone {
    /// All tones that carry a modifier code point, lightest first.
    pub const MODIFIERS: [Tone; 5] = [
        Tone::Light,
        Tone::MediumLight,
        Tone::Medium,
        Tone::MediumDark,
        Tone::Dark,
    ];

    /// The modifier code point, `None` for `Default`.
    pub fn modifier(self) -> Option<char> {
        match self {
            Tone::Default => None,
            Tone::Light => Some('\u{1F3FB}'),
            Tone::MediumLight => Some('\u{1F3FC}'),
            Tone::Medium => Some('\u{1F3FD}'),
            Tone::MediumDark => Some('\u{1F3FE}'),
            Tone::Dark => Some('\u{1F3FF}'),
        }
    }

    /// String form of the modifier; empty for `Default`.
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Default => "",
            Tone::Light => "\u{1F3FB}",
            Tone::MediumLight => "\u{1F3FC}",
            Tone::Medium => "\u{1F3FD}",
            Tone::MediumDark => "\u{1F3FE}",
            Tone::Dark => "\u{1F3FF}",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<char> for Tone {
    type Error = Error;

    fn try_from(ch: char) -> Result<Self> {
        Tone::MODIFIERS
            .into_iter()
            .find(|tone| tone.modifier() == Some(ch))
            .ok_or_else(|| Error::InvalidTone(ch.to_string()))
    }
}

impl FromStr for Tone {
    type Err = Error;

    /// Parses a single modifier code point. The empty string is not a tone.
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Tone::try_from(ch),
            _ => Err(Error::InvalidTone(s.to_string())),
        }
    }
}

/// True if `ch` is one of the five skin-tone modifier code points.
pub fn is_tone_modifier(ch: char) -> bool {
    Tone::try_from(ch).is_ok()
}

/// Checks whether any emoji in `text` has a skin tone applied.
pub fn has_tone(text: &str) -> bool {
    text.chars().any(is_tone_modifier)
}

/// The tone of the first toned emoji in `text`, if any.
pub fn get_tone(text: &str) -> Option<Tone> {
    text.chars().find_map(|ch| Tone::try_from(ch).ok())
}

/// Every tone applied in `text`, in order of appearance.
pub fn get_all_tones(text: &str) -> Vec<Tone> {
    // a non-modifier is "no tone here", not an error
    text.chars().filter_map(|ch| Tone::try_from(ch).ok()).collect()
}

/// Emoji template with skin-tone slots.
///
/// `one` carries a single placeholder (or several, all filled with the same
/// tone); `two` carries two independent placeholders for two-person emoji.
/// Single-person emoji reuse `one` as their two-slot template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneTemplate {
    one: String,
    two: String,
    default_tone: Tone,
    placeholder: char,
}

impl ToneTemplate {
    /// Create a template; `two` falls back to `one` when absent.
    pub fn new<T: Into<String>>(one: T, two: Option<String>) -> Self {
        let one = one.into();
        let two = two.unwrap_or_else(|| one.clone());
        Self {
            one,
            two,
            default_tone: Tone::Default,
            placeholder: TONE_PLACEHOLDER,
        }
    }

    /// Set the tone used when none (or `Tone::Default`) is requested.
    pub fn with_default_tone(mut self, tone: Tone) -> Self {
        self.default_tone = tone;
        self
    }

    /// Use a different placeholder marker.
    pub fn with_placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn default_tone(&self) -> Tone {
        self.default_tone
    }

    pub fn one_slot(&self) -> &str {
        &self.one
    }

    pub fn two_slot(&self) -> &str {
        &self.two
    }

    fn resolve(&self, tone: Tone) -> &'static str {
        match tone {
            Tone::Default => self.default_tone.as_str(),
            other => other.as_str(),
        }
    }

    /// Render with the entity's default tone.
    pub fn render_default(&self) -> String {
        self.one
            .replace(self.placeholder, self.resolve(self.default_tone))
    }

    /// Render the template with the requested tones.
    ///
    /// - no tone: the one-slot template with the default tone
    /// - one tone: the one-slot template, every placeholder gets that tone
    /// - two tones: the two-slot template, placeholders filled left to right
    ///
    /// `Tone::Default` always stands for the entity's default tone. Asking for
    /// more than two tones fails with [`Error::TooManyTones`].
    ///
    /// # Example
    /// ```
    /// use libemoji_core::{Tone, ToneTemplate};
    ///
    /// let wave = ToneTemplate::new("\u{1F44B}@", None);
    /// assert_eq!(wave.render(&[]).unwrap(), "\u{1F44B}");
    /// assert_eq!(wave.render(&[Tone::Dark]).unwrap(), "\u{1F44B}\u{1F3FF}");
    /// ```
    pub fn render(&self, tones: &[Tone]) -> Result<String> {
        match tones {
            [] => Ok(self.render_default()),
            [tone] => Ok(self.one.replace(self.placeholder, self.resolve(*tone))),
            [first, second] => Ok(self.render_pair(*first, *second)),
            _ => Err(Error::TooManyTones(tones.len())),
        }
    }

    fn render_pair(&self, first: Tone, second: Tone) -> String {
        let mut buf = [0u8; 4];
        let marker: &str = self.placeholder.encode_utf8(&mut buf);
        self.two
            .replacen(marker, self.resolve(first), 1)
            .replacen(marker, self.resolve(second), 1)
    }

    /// Every rendering that carries explicit modifiers: each tone on the
    /// one-slot template, then each ordered pair on the two-slot template.
    /// May yield the same string more than once.
    pub fn toned_renderings(&self) -> impl Iterator<Item = String> + '_ {
        let single = Tone::MODIFIERS
            .into_iter()
            .map(move |tone| self.one.replace(self.placeholder, tone.as_str()));
        let pairs = Tone::MODIFIERS.into_iter().flat_map(move |first| {
            Tone::MODIFIERS
                .into_iter()
                .map(move |second| self.render_pair(first, second))
        });
        single.chain(pairs)
    }
}
