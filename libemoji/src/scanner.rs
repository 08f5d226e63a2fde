//! Emoji-aware text scanner.
//!
//! `GraphemeScanner` splits text into alternating runs of plain text and
//! emoji clusters. A cluster is:
//!
//! - a keycap (`[0-9#*]` + U+FE0F + U+20E3, plus two literal token forms),
//! - or the longest registered sequence starting at the current position,
//! - or a structural fallback (a regional-indicator pair, a lone tone
//!   modifier),
//!
//! extended by any following tone modifiers, variation selectors and
//! ZWJ-joined emoji. This is a heuristic for emoji, not the full Unicode
//! segmentation algorithm.
//!
//! Plain digits, `#` and `*` are never emoji on their own even if the table
//! registers them.

use libemoji_core::{is_regional_indicator, is_tone_modifier, AliasTable};
use once_cell::sync::Lazy;
use regex::Regex;

/// U+200D ZERO WIDTH JOINER.
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// Keycap at the start of the text. Besides the real sequence, the literal
/// tokens `20E3` and `FE0F<other>` are accepted after the base character.
static KEYCAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[*#0-9](?:\x{FE0F}\x{20E3}|(?i:20E3|FE0F<other>))")
        .expect("keycap pattern is valid")
});

/// Characters at or above U+1000 may continue a multi-code-point sequence.
pub fn is_multi_code_point_candidate(ch: char) -> bool {
    ch as u32 >= 0x1000
}

pub fn is_joiner(ch: char) -> bool {
    ch == ZERO_WIDTH_JOINER
}

/// U+FE0E (text style) or U+FE0F (emoji style).
pub fn is_variation_selector(ch: char) -> bool {
    matches!(ch, '\u{FE0E}' | '\u{FE0F}')
}

/// Byte length of a keycap at the start of `text`.
pub fn keycap_len(text: &str) -> Option<usize> {
    match text.as_bytes().first() {
        Some(b'0'..=b'9' | b'#' | b'*') => KEYCAP.find(text).map(|m| m.end()),
        _ => None,
    }
}

/// Byte length of the longest registered sequence at the start of `text`.
///
/// Candidates are the first character plus following characters that pass
/// `is_multi_code_point_candidate`, up to the table's longest sequence.
pub fn longest_registered(table: &AliasTable, text: &str) -> Option<usize> {
    let limit = table.max_sequence_chars();
    let mut best = None;
    for (count, (idx, ch)) in text.char_indices().enumerate() {
        if count >= limit || (count > 0 && !is_multi_code_point_candidate(ch)) {
            break;
        }
        let end = idx + ch.len_utf8();
        if table.contains_sequence(&text[..end]) {
            best = Some(end);
        }
    }
    best
}

/// Byte length of two regional indicators at the start of `text`.
pub fn regional_indicator_pair(text: &str) -> Option<usize> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if is_regional_indicator(a) && is_regional_indicator(b) => {
            Some(a.len_utf8() + b.len_utf8())
        }
        _ => None,
    }
}

/// Byte length of a cluster that needs no table entry: a regional-indicator
/// pair or a lone tone modifier.
pub fn structural_cluster(text: &str) -> Option<usize> {
    regional_indicator_pair(text).or_else(|| {
        text.chars()
            .next()
            .filter(|ch| is_tone_modifier(*ch))
            .map(char::len_utf8)
    })
}

/// A piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Emoji(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Text(s) | Segment::Emoji(s) => s,
        }
    }

    pub fn is_emoji(&self) -> bool {
        matches!(self, Segment::Emoji(_))
    }

    /// The cluster text, `None` for plain text.
    pub fn emoji(self) -> Option<&'a str> {
        match self {
            Segment::Emoji(s) => Some(s),
            Segment::Text(_) => None,
        }
    }
}

/// Iterator over the text and emoji segments of a string.
///
/// Segments borrow from the input and concatenate back to it exactly.
/// Text segments are maximal: two text segments are never adjacent.
pub struct GraphemeScanner<'t, 'a> {
    table: &'t AliasTable,
    input: &'a str,
    cursor: usize,
    queued: Option<Segment<'a>>,
}

impl<'t, 'a> GraphemeScanner<'t, 'a> {
    pub fn new(table: &'t AliasTable, input: &'a str) -> Self {
        Self {
            table,
            input,
            cursor: 0,
            queued: None,
        }
    }

    /// Length of the base cluster at `at`, before extension.
    fn base_cluster(&self, at: usize) -> Option<usize> {
        let rest = &self.input[at..];
        if let Some(len) = keycap_len(rest) {
            return Some(len);
        }

        let registered = match longest_registered(self.table, rest) {
            // a digit that did not continue into a keycap
            Some(len) if self.table.is_number_emoji(&rest[..len]) => return None,
            other => other,
        };
        let structural = structural_cluster(rest);

        match (registered, structural) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    /// Absorb modifiers, selectors and ZWJ-joined emoji following a cluster.
    ///
    /// Only an emoji is joined after a ZWJ; anything else ends the cluster
    /// and the ZWJ stays attached to it.
    fn extend(&self, mut end: usize) -> usize {
        let mut pending_join = false;
        while let Some(ch) = self.input[end..].chars().next() {
            if pending_join {
                pending_join = false;
                let rest = &self.input[end..];
                let joined = longest_registered(self.table, rest)
                    .filter(|&len| !self.table.is_number_emoji(&rest[..len]))
                    .or_else(|| structural_cluster(rest));
                match joined {
                    Some(len) => end += len,
                    None => break,
                }
            } else if is_joiner(ch) {
                pending_join = true;
                end += ch.len_utf8();
            } else if is_tone_modifier(ch) || is_variation_selector(ch) {
                end += ch.len_utf8();
            } else {
                break;
            }
        }
        end
    }
}

impl<'t, 'a> Iterator for GraphemeScanner<'t, 'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if let Some(segment) = self.queued.take() {
            return Some(segment);
        }

        let text_start = self.cursor;
        while self.cursor < self.input.len() {
            let at = self.cursor;
            if let Some(len) = self.base_cluster(at) {
                let end = self.extend(at + len);
                self.cursor = end;
                let cluster = Segment::Emoji(&self.input[at..end]);
                if at == text_start {
                    return Some(cluster);
                }
                self.queued = Some(cluster);
                return Some(Segment::Text(&self.input[text_start..at]));
            }
            let step = self.input[at..].chars().next().map_or(1, char::len_utf8);
            self.cursor += step;
        }

        (self.cursor > text_start).then(|| Segment::Text(&self.input[text_start..]))
    }
}

/// True if `text` contains at least one emoji cluster.
pub fn contains_emoji(table: &AliasTable, text: &str) -> bool {
    GraphemeScanner::new(table, text).any(|segment| segment.is_emoji())
}

/// `text` with every emoji cluster removed, trimmed of surrounding
/// whitespace.
pub fn remove_emojis(table: &AliasTable, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in GraphemeScanner::new(table, text) {
        if let Segment::Text(plain) = segment {
            out.push_str(plain);
        }
    }
    out.trim().to_string()
}

/// Every emoji cluster in `text`, in order.
pub fn find_all_emojis<'a>(table: &AliasTable, text: &'a str) -> Vec<&'a str> {
    GraphemeScanner::new(table, text)
        .filter_map(Segment::emoji)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use libemoji_core::Config;

    const ASSET: &str = r#"
emoji = [
    [":thumbs_up:", "\U0001F44D"],
    [":woman:", "\U0001F469"],
    [":man:", "\U0001F468"],
    [":red_heart:", "\u2764\uFE0F"],
    [":kiss_mark:", "\U0001F48B"],
    [":laptop:", "\U0001F4BB"],
    [":man_technologist:", "\U0001F468\u200D\U0001F4BB"],
    [":one:", "1\uFE0F\u20E3"],
    [":digit_one:", "1"],
    [":flag_for_turkey:", "\U0001F1F9\U0001F1F7"],
]
"#;

    fn table() -> AliasTable {
        AliasTable::from_toml_str(ASSET, Config::default()).unwrap()
    }

    fn segments<'a>(t: &AliasTable, text: &'a str) -> Vec<Segment<'a>> {
        GraphemeScanner::new(t, text).collect()
    }

    #[test]
    fn predicates() {
        assert!(is_multi_code_point_candidate('\u{1F44D}'));
        assert!(is_multi_code_point_candidate('\u{200D}'));
        assert!(!is_multi_code_point_candidate('a'));
        assert!(!is_multi_code_point_candidate('\u{A9}'));
        assert!(is_joiner('\u{200D}'));
        assert!(is_variation_selector('\u{FE0E}'));
        assert!(is_variation_selector('\u{FE0F}'));
        assert!(!is_variation_selector('\u{20E3}'));
    }

    #[test]
    fn keycap_forms() {
        assert_eq!(keycap_len("1\u{FE0F}\u{20E3}rest"), Some(7));
        assert_eq!(keycap_len("#\u{FE0F}\u{20E3}"), Some(7));
        assert_eq!(keycap_len("520E3"), Some(5));
        assert_eq!(keycap_len("5fe0f<other>"), Some(12));
        assert_eq!(keycap_len("5\u{20E3}"), None);
        assert_eq!(keycap_len("12"), None);
        assert_eq!(keycap_len("a\u{FE0F}\u{20E3}"), None);
    }

    #[test]
    fn longest_prefix_wins() {
        let t = table();
        let tech = "\u{1F468}\u{200D}\u{1F4BB}";
        assert_eq!(longest_registered(&t, tech), Some(tech.len()));
        assert_eq!(longest_registered(&t, "\u{1F468}x"), Some(4));
        assert_eq!(longest_registered(&t, "x\u{1F468}"), None);
        assert_eq!(longest_registered(&AliasTable::new(), tech), None);
    }

    #[test]
    fn segments_concatenate_to_input() {
        let t = table();
        let text = "hi \u{1F44D}\u{1F3FD} and \u{2764}\u{FE0F}!";
        let parts = segments(&t, text);
        assert_eq!(
            parts,
            vec![
                Segment::Text("hi "),
                Segment::Emoji("\u{1F44D}\u{1F3FD}"),
                Segment::Text(" and "),
                Segment::Emoji("\u{2764}\u{FE0F}"),
                Segment::Text("!"),
            ]
        );
        let joined: String = parts.iter().map(Segment::as_str).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn zwj_joins_clusters() {
        let t = table();
        let couple = "\u{1F469}\u{1F3FE}\u{200D}\u{2764}\u{FE0F}\u{200D}\u{1F468}\u{1F3FF}";
        assert_eq!(find_all_emojis(&t, &format!("a{couple}b")), vec![couple]);

        let dangling = "\u{1F44D}\u{200D}";
        assert_eq!(find_all_emojis(&t, &format!("{dangling}x")), vec![dangling]);
    }

    #[test]
    fn zwj_before_non_emoji_keeps_the_text() {
        let t = table();
        let text = "\u{1F44D}\u{200D}\u{4F60}\u{597D}";
        assert_eq!(find_all_emojis(&t, text), vec!["\u{1F44D}\u{200D}"]);
        assert_eq!(remove_emojis(&t, text), "\u{4F60}\u{597D}");
        assert_eq!(
            segments(&t, text),
            vec![
                Segment::Emoji("\u{1F44D}\u{200D}"),
                Segment::Text("\u{4F60}\u{597D}"),
            ]
        );

        // unregistered pictographs are not pulled in either
        assert_eq!(
            find_all_emojis(&t, "\u{1F468}\u{200D}\u{1F9B0}"),
            vec!["\u{1F468}\u{200D}"]
        );
        // structural clusters still join
        assert_eq!(
            find_all_emojis(&t, "\u{1F44D}\u{200D}\u{1F3FB}"),
            vec!["\u{1F44D}\u{200D}\u{1F3FB}"]
        );
    }

    #[test]
    fn digits_are_not_emoji() {
        let t = table();
        assert!(!contains_emoji(&t, "1"));
        assert!(!contains_emoji(&t, "hello world, I'm number 1!"));
        assert_eq!(find_all_emojis(&t, "31\u{FE0F}\u{20E3}"), vec!["1\u{FE0F}\u{20E3}"]);
    }

    #[test]
    fn structural_fallbacks() {
        let t = table();
        assert_eq!(find_all_emojis(&t, "go \u{1F1FA}\u{1F1F8}!"), vec!["\u{1F1FA}\u{1F1F8}"]);
        assert_eq!(find_all_emojis(&t, "\u{1F3FB}x"), vec!["\u{1F3FB}"]);
        assert!(!contains_emoji(&t, "\u{1F1FA}"));
    }

    #[test]
    fn non_emoji_high_code_points_stay_text() {
        let t = table();
        assert_eq!(segments(&t, "\u{4F60}\u{597D}"), vec![Segment::Text("\u{4F60}\u{597D}")]);
        assert_eq!(remove_emojis(&t, "\u{4F60}\u{1F44D}\u{597D}"), "\u{4F60}\u{597D}");
    }

    #[test]
    fn empty_input() {
        let t = table();
        assert!(segments(&t, "").is_empty());
        assert!(!contains_emoji(&t, ""));
        assert_eq!(remove_emojis(&t, ""), "");
        assert!(find_all_emojis(&t, "").is_empty());
    }
}
