use crate::error::Error;
use crate::Grammar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    NonTerminals,
    Terminals,
    StartSymbol,
    Productions,
}

impl Grammar {
    /// Loads a grammar from the line-oriented section format:
    ///
    /// ```text
    /// # NonTerminals
    /// S
    /// ---
    /// # Terminals
    /// a
    /// b
    /// ---
    /// # StartSymbol
    /// S
    /// ---
    /// # Productions
    /// S -> a S b
    /// S ->
    /// ---
    /// ```
    ///
    /// Blank lines are ignored; `---` closes the current section. An empty
    /// production right side denotes the epsilon production. Symbols used in
    /// a right side without a declaration are interned as terminals equal to
    /// themselves.
    pub fn parse(grammar: &str) -> Result<Self, Error> {
        let mut g = Self::new();

        let mut section = Section::None;
        let mut start_name: Option<String> = None;
        let mut raw_productions: Vec<(usize, String, String)> = Vec::new();

        for (i, line) in grammar.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('#') {
                section = match header.trim() {
                    "NonTerminals" => Section::NonTerminals,
                    "Terminals" => Section::Terminals,
                    "StartSymbol" => Section::StartSymbol,
                    "Productions" => Section::Productions,
                    other => {
                        return Err(Error::format(i + 1, format!("unknown section: {}", other)))
                    }
                };
                continue;
            }
            if line == "---" {
                section = Section::None;
                continue;
            }

            match section {
                Section::None => {
                    return Err(Error::format(i + 1, "content outside of any section"));
                }
                Section::NonTerminals => {
                    if g.get_symbol_index(line).is_none() {
                        g.add_non_terminal(line);
                    }
                }
                Section::Terminals => {
                    if g.get_symbol_index(line).is_none() {
                        g.add_terminal(line.to_string());
                    }
                }
                Section::StartSymbol => {
                    start_name = Some(line.to_string());
                }
                Section::Productions => {
                    let (left, right) = line
                        .split_once("->")
                        .ok_or_else(|| Error::format(i + 1, "production line has no \"->\""))?;
                    let left = left.trim();
                    if left.is_empty() {
                        return Err(Error::format(i + 1, "empty left side"));
                    }
                    raw_productions.push((i + 1, left.to_string(), right.trim().to_string()));
                }
            }
        }

        for (line, left, right) in raw_productions {
            let left_idx = match g.get_symbol_index(&left) {
                Some(idx) if g.is_nonterminal_idx(idx) => idx,
                Some(_) => {
                    return Err(Error::format(
                        line,
                        format!("left side {} is not a nonterminal", left),
                    ))
                }
                None => g.add_non_terminal(&left),
            };
            let symbols = right
                .split_whitespace()
                .map(|s| {
                    if let Some(idx) = g.get_symbol_index(s) {
                        idx
                    } else {
                        g.add_terminal(s.to_string())
                    }
                })
                .collect();
            g.add_production(left_idx, symbols);
        }

        let start_name = match start_name {
            Some(s) if !s.is_empty() => s,
            _ => return Err(Error::format(0, "missing or empty start symbol")),
        };
        match g.get_symbol_index(&start_name) {
            Some(idx) if g.is_nonterminal_idx(idx) => g.start_symbol = Some(idx),
            _ => {
                return Err(Error::format(
                    0,
                    format!("start symbol {} is not a nonterminal", start_name),
                ))
            }
        }

        Ok(g)
    }
}
