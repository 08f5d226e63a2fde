//! Alias token parser.
//!
//! Replaces `:alias:` tokens in free text with their emoji sequence. The
//! parser is a two-state automaton over the configured delimiter:
//!
//! - outside a token, text is copied through until a delimiter opens one;
//! - inside a token, characters are buffered until the next delimiter closes
//!   it. A resolved token is replaced by its sequence. An unresolved token
//!   is emitted without its closing delimiter, which then opens the next
//!   candidate, so `::+1:` still finds `:+1:`.
//!
//! Whitespace inside a token aborts it and the buffer is copied through
//! verbatim; so is an unterminated token at the end of the input.

use libemoji_core::AliasTable;

/// Parser with a reusable token buffer.
///
/// Each call starts from a clean state; keeping one `Replacer` around only
/// saves the buffer allocation between calls.
#[derive(Debug, Default)]
pub struct Replacer {
    matched: String,
}

impl Replacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every resolvable alias token in `input`.
    pub fn replace(&mut self, table: &AliasTable, input: &str) -> String {
        self.matched.clear();
        replace_with_buffer(table, input, &mut self.matched)
    }
}

/// Replace every resolvable alias token in `input` using a fresh buffer.
///
/// # Example
/// ```
/// use libemoji::{parser, AliasTable, Config};
///
/// let mut table = AliasTable::with_config(Config::default());
/// table.append(":pizza:", "\u{1F355}").unwrap();
/// assert_eq!(parser::replace(&table, "I like :pizza:"), "I like \u{1F355}");
/// assert_eq!(parser::replace(&table, "::pizza:"), ":\u{1F355}");
/// ```
pub fn replace(table: &AliasTable, input: &str) -> String {
    replace_with_buffer(table, input, &mut String::new())
}

fn replace_with_buffer(table: &AliasTable, input: &str, matched: &mut String) -> String {
    let delimiter = table.config().delimiter;
    let mut output = String::with_capacity(input.len());

    for ch in input.chars() {
        if ch != delimiter {
            if matched.is_empty() {
                output.push(ch);
            } else {
                matched.push(ch);
                if ch.is_whitespace() {
                    output.push_str(matched);
                    matched.clear();
                }
            }
            continue;
        }

        if matched.is_empty() {
            matched.push(ch);
            continue;
        }

        let open_len = matched.len();
        matched.push(ch);
        if let Some(sequence) = table.lookup(matched) {
            tracing::trace!(alias = %matched.as_str(), "resolved alias token");
            output.push_str(&sequence);
            matched.clear();
            continue;
        }

        // the closing delimiter may open the next token
        output.push_str(&matched[..open_len]);
        matched.clear();
        matched.push(delimiter);
    }

    if !matched.is_empty() {
        output.push_str(matched);
        matched.clear();
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use libemoji_core::Config;

    const ASSET: &str = r#"
emoji = [
    [":thumbs_up:", "\U0001F44D"],
    [":+1:", "\U0001F44D"],
    [":dragon:", "\U0001F409"],
    [":anchor:", "\u2693"],
    [":anguished:", "\U0001F627"],
    [":man_technologist:", "\U0001F468\u200D\U0001F4BB"],
]
"#;

    fn table() -> AliasTable {
        AliasTable::from_toml_str(ASSET, Config::default()).unwrap()
    }

    #[test]
    fn replaces_known_aliases() {
        let t = table();
        assert_eq!(replace(&t, ":thumbs_up:"), "\u{1F44D}");
        assert_eq!(
            replace(&t, "I am :man_technologist: from :flag-tr:"),
            "I am \u{1F468}\u{200D}\u{1F4BB} from \u{1F1F9}\u{1F1F7}"
        );
        assert_eq!(replace(&t, "no aliases here"), "no aliases here");
        assert_eq!(replace(&t, ""), "");
    }

    #[test]
    fn extra_delimiters() {
        let t = table();
        assert_eq!(replace(&t, "::+1:"), ":\u{1F44D}");
        assert_eq!(replace(&t, ":dragon::"), "\u{1F409}:");
        assert_eq!(replace(&t, "::anchor::"), ":\u{2693}:");
        assert_eq!(replace(&t, ":anguished:::"), "\u{1F627}::");
        assert_eq!(
            replace(&t, "too many colon::::closed_book:::"),
            "too many colon::::closed_book:::"
        );
        assert_eq!(replace(&t, "a :dragon::anchor: b"), "a \u{1F409}\u{2693} b");
    }

    #[test]
    fn shared_delimiter_between_tokens() {
        let t = table();
        assert_eq!(replace(&t, ":nope:dragon:"), ":nope\u{1F409}");
    }

    #[test]
    fn whitespace_aborts_a_token() {
        let t = table();
        assert_eq!(replace(&t, ":thumbs up: :+1:"), ":thumbs up: \u{1F44D}");
        assert_eq!(replace(&t, "12:30 :dragon:"), "12:30 \u{1F409}");
    }

    #[test]
    fn unknown_and_unterminated_tokens_pass_through() {
        let t = table();
        assert_eq!(replace(&t, ":not_an_alias:"), ":not_an_alias:");
        assert_eq!(replace(&t, "open :dragon"), "open :dragon");
        assert_eq!(replace(&t, ":flag-tra: :flag-t:"), ":flag-tra: :flag-t:");
    }

    #[test]
    fn custom_delimiter() {
        let cfg = Config {
            delimiter: ';',
            ..Config::default()
        };
        let mut t = AliasTable::with_config(cfg);
        t.append(";pizza;", "\u{1F355}").unwrap();
        assert_eq!(replace(&t, "a ;pizza; :pizza:"), "a \u{1F355} :pizza:");
        assert_eq!(replace(&t, ";flag-us;"), "\u{1F1FA}\u{1F1F8}");
    }

    #[test]
    fn replacer_reuse_is_stateless() {
        let t = table();
        let mut r = Replacer::new();
        assert_eq!(r.replace(&t, "unterminated :drag"), "unterminated :drag");
        assert_eq!(r.replace(&t, "on:"), "on:");
        assert_eq!(r.replace(&t, ":dragon:"), "\u{1F409}");
    }
}
