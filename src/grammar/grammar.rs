use std::collections::{HashMap, HashSet};

use super::{END_MARK, EPSILON, EPSILON_IDX};

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub first: HashSet<usize>,
    pub follow: HashSet<usize>,
    pub productions: Vec<Vec<usize>>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            first: HashSet::new(),
            follow: HashSet::new(),
            productions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Symbol {
    NonTerminal(NonTerminal),
    Terminal(String),
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn mut_non_terminal(&mut self) -> Option<&mut NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            Symbol::Terminal(_) => None,
        }
    }
}

/// A context-free grammar with interned symbols. All cross-references
/// (productions, FIRST/FOLLOW members, table keys) are indices into
/// `symbols`. Index 0 is the epsilon marker, index 1 the end-marker.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub symbols: Vec<Symbol>,
    pub symbol_table: HashMap<String, usize>,
    pub start_symbol: Option<usize>,
}

impl Grammar {
    pub fn new() -> Self {
        let mut g = Self {
            symbols: Vec::new(),
            symbol_table: HashMap::new(),
            start_symbol: None,
        };

        let e_idx = g.add_terminal(EPSILON.to_string());
        debug_assert_eq!(e_idx, EPSILON_IDX);
        g.symbol_table.insert("ε".to_string(), e_idx);

        g.add_terminal(END_MARK.to_string());

        g
    }

    /// Declared terminals, excluding the epsilon marker.
    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.symbols.iter().skip(1).filter_map(|s| {
            if let Symbol::Terminal(name) = s {
                Some(name)
            } else {
                None
            }
        })
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.symbols.iter().filter_map(|s| s.non_terminal())
    }

    pub fn non_terminal_iter_mut(&mut self) -> impl Iterator<Item = &mut NonTerminal> {
        self.symbols.iter_mut().filter_map(|s| s.mut_non_terminal())
    }

    pub fn get_symbol_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.get(name).cloned()
    }

    pub fn get_symbol_name(&self, index: usize) -> &str {
        match &self.symbols[index] {
            Symbol::NonTerminal(e) => e.name.as_str(),
            Symbol::Terminal(e) => e.as_str(),
        }
    }

    /// True for declared terminals and permissively interned RHS symbols.
    /// The epsilon marker and the end-marker are not terminals.
    pub fn is_terminal_idx(&self, index: usize) -> bool {
        index != EPSILON_IDX && matches!(self.symbols[index], Symbol::Terminal(_))
    }

    pub fn is_nonterminal_idx(&self, index: usize) -> bool {
        matches!(self.symbols[index], Symbol::NonTerminal(_))
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.get_symbol_index(name)
            .map_or(false, |i| self.is_terminal_idx(i))
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.get_symbol_index(name)
            .map_or(false, |i| self.is_nonterminal_idx(i))
    }

    pub fn add_non_terminal(&mut self, name: &str) -> usize {
        let idx = self.symbols.len();
        self.symbols
            .push(Symbol::NonTerminal(NonTerminal::new(idx, name.to_string())));
        self.symbol_table.insert(name.to_string(), idx);
        idx
    }

    pub fn add_terminal(&mut self, name: String) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::Terminal(name.clone()));
        self.symbol_table.insert(name, idx);
        idx
    }

    /// An empty `right` is normalized to the explicit epsilon production.
    pub fn add_production(&mut self, left: usize, right: Vec<usize>) {
        let right = if right.is_empty() {
            vec![EPSILON_IDX]
        } else {
            right
        };
        self.symbols[left]
            .mut_non_terminal()
            .expect("production left side must be a nonterminal")
            .productions
            .push(right);
    }

    pub fn production_to_vec_str(&self, production: &[usize]) -> Vec<&str> {
        production.iter().map(|i| self.get_symbol_name(*i)).collect()
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}
