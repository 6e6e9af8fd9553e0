use std::collections::HashMap;

use crate::error::Error;

/// Numeric lexical code -> terminal name, the contract between an upstream
/// lexer and the parser. Passed explicitly so several grammars and mappings
/// can coexist; must stay consistent with the grammar's terminal set.
#[derive(Debug, Clone, Default)]
pub struct TokenCodeMap {
    map: HashMap<u32, String>,
}

impl TokenCodeMap {
    pub fn new(entries: impl IntoIterator<Item = (u32, String)>) -> Self {
        Self {
            map: entries.into_iter().collect(),
        }
    }

    /// Loads a map from lines of the form `<code> <terminal>`; blank lines
    /// are ignored.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut map = HashMap::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let code = parts
                .next()
                .and_then(|c| c.parse::<u32>().ok())
                .ok_or_else(|| Error::TokenLine {
                    line: i + 1,
                    content: line.to_string(),
                })?;
            let terminal = parts.next().ok_or_else(|| Error::TokenLine {
                line: i + 1,
                content: line.to_string(),
            })?;
            map.insert(code, terminal.to_string());
        }
        Ok(Self { map })
    }

    pub fn resolve(&self, code: u32) -> Result<&str, Error> {
        self.map
            .get(&code)
            .map(|s| s.as_str())
            .ok_or(Error::UnknownCode { code })
    }
}

/// Decodes a coded token file into terminal names. Each non-blank line has
/// the form `(code, value)`; only the code matters here, the value is the
/// lexeme recorded by the lexer.
pub fn decode_token_file(text: &str, map: &TokenCodeMap) -> Result<Vec<String>, Error> {
    let mut tokens = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let malformed = || Error::TokenLine {
            line: i + 1,
            content: line.to_string(),
        };
        let body = line.strip_prefix('(').ok_or_else(malformed)?;
        let (code, _value) = body.split_once(',').ok_or_else(malformed)?;
        let code: u32 = code.trim().parse().map_err(|_| malformed())?;
        tokens.push(map.resolve(code)?.to_string());
    }
    Ok(tokens)
}
