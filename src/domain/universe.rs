//! Symbol universe parsing.
//!
//! The configured symbol list is a comma-separated string. Symbols are
//! upper-cased and kept in a sorted set so every run walks them in the same
//! order.

use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),
}

pub fn parse_symbols(input: &str) -> Result<BTreeSet<String>, UniverseError> {
    let mut symbols = BTreeSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !symbols.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
    }

    Ok(symbols)
}
