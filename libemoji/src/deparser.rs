//! Sequence -> alias rewriting.
//!
//! Walks the text left to right and at each position tries, in order:
//!
//! 1. a keycap (see `scanner::keycap_len`), rewritten to its alias, or to
//!    nothing when the matched text has no alias (the literal token forms);
//! 2. the longest registered sequence, rewritten to its reverse alias;
//! 3. an unregistered regional-indicator pair, rewritten to the synthesized
//!    `flag-XX` alias when flag aliases are enabled.
//!
//! Anything else is copied through unchanged. Plain digits stay digits even
//! if the table registers them.

use crate::scanner::{keycap_len, longest_registered, regional_indicator_pair};
use libemoji_core::{AliasTable, FlagCodec};

/// Rewrite every registered sequence in `input` to its alias.
pub fn deparse(table: &AliasTable, input: &str) -> String {
    let mut output = String::with_capacity(input.len() * 2);
    let mut rest = input;

    while let Some(ch) = rest.chars().next() {
        if let Some(len) = keycap_len(rest) {
            if let Some(alias) = table.reverse_lookup(&rest[..len]) {
                output.push_str(alias);
            }
            rest = &rest[len..];
            continue;
        }

        if let Some(len) = longest_registered(table, rest) {
            let sequence = &rest[..len];
            if !table.is_number_emoji(sequence) {
                if let Some(alias) = table.reverse_lookup(sequence) {
                    output.push_str(alias);
                    rest = &rest[len..];
                    continue;
                }
            }
        }

        if table.config().flag_aliases {
            let flag = regional_indicator_pair(rest)
                .and_then(|len| FlagCodec::decode(&rest[..len]).map(|code| (len, code)));
            if let Some((len, code)) = flag {
                output.push_str(&table.config().flag_alias(&code));
                rest = &rest[len..];
                continue;
            }
        }

        output.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    output
}
