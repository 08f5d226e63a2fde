//! Built-in alias table.

use libemoji_core::{AliasTable, Config};

/// TOML source of the built-in table, see `data/emoji.toml`.
pub const BUILTIN_TABLE: &str = include_str!("../data/emoji.toml");

/// Build the built-in table with `config`.
///
/// The asset is compiled in; if it ever fails to parse the error is logged
/// and an empty table is returned instead.
pub fn builtin_table(config: Config) -> AliasTable {
    match AliasTable::from_toml_str(BUILTIN_TABLE, config.clone()) {
        Ok(table) => table,
        Err(err) => {
            tracing::error!(%err, "built-in emoji table is malformed");
            AliasTable::with_config(config)
        }
    }
}
