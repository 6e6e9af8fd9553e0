pub mod tree;

pub use tree::{Node, ParseTree};

use crate::error::Error;
use crate::grammar::{Ll1Table, END_MARK, END_MARK_IDX, EPSILON_IDX};
use crate::Grammar;

/// One step of a leftmost derivation: `left -> right` was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedProduction {
    pub left: usize,
    pub right: Vec<usize>,
}

/// Table-driven predictive parser. Borrows an immutable grammar and table, so
/// one instance can run any number of parses.
pub struct PredictiveParser<'a> {
    grammar: &'a Grammar,
    table: &'a Ll1Table,
}

impl<'a> PredictiveParser<'a> {
    pub fn new(grammar: &'a Grammar, table: &'a Ll1Table) -> Self {
        Self { grammar, table }
    }

    /// Checks that `tokens` belongs to the grammar's language and returns the
    /// productions of its leftmost derivation, in application order.
    pub fn validate(&self, tokens: &[&str]) -> Result<Vec<AppliedProduction>, Error> {
        self.run(tokens, None)
    }

    /// Parses `tokens` into a derivation tree.
    pub fn parse_tree(&self, tokens: &[&str]) -> Result<ParseTree, Error> {
        let mut tree = ParseTree::new();
        self.run(tokens, Some(&mut tree))?;
        Ok(tree)
    }

    // Shared stack loop for both variants. Stack entries pair a symbol with
    // the tree node it was allocated for; in validation mode no nodes exist.
    fn run(
        &self,
        tokens: &[&str],
        mut tree: Option<&mut ParseTree>,
    ) -> Result<Vec<AppliedProduction>, Error> {
        let start = self
            .grammar
            .start_symbol
            .ok_or_else(|| Error::internal("grammar has no start symbol"))?;

        let root = match tree.as_deref_mut() {
            Some(t) => t.push(start, -1),
            None => 0,
        };

        let mut applied: Vec<AppliedProduction> = Vec::new();
        let mut stack: Vec<(usize, usize)> = vec![(END_MARK_IDX, usize::MAX), (start, root)];
        let mut cursor = 0usize;

        while let Some((top, node)) = stack.pop() {
            let current = tokens.get(cursor).copied().unwrap_or(END_MARK);

            if top == END_MARK_IDX || self.grammar.is_terminal_idx(top) {
                if self.grammar.get_symbol_name(top) == current {
                    cursor += 1;
                } else {
                    return Err(Error::UnexpectedToken {
                        position: cursor,
                        expected: self.grammar.get_symbol_name(top).to_string(),
                        found: current.to_string(),
                    });
                }
            } else if self.grammar.is_nonterminal_idx(top) {
                let lookahead = self.grammar.get_symbol_index(current);
                let right = lookahead
                    .and_then(|la| self.table.get(top, la))
                    .ok_or_else(|| Error::NoProduction {
                        position: cursor,
                        nonterminal: self.grammar.get_symbol_name(top).to_string(),
                        lookahead: current.to_string(),
                    })?;

                applied.push(AppliedProduction {
                    left: top,
                    right: right.clone(),
                });

                if *right != [EPSILON_IDX] {
                    match tree.as_deref_mut() {
                        Some(t) => {
                            let children: Vec<usize> =
                                right.iter().map(|&sym| t.push(sym, node as i64)).collect();
                            for w in children.windows(2) {
                                t.set_sibling(w[0], w[1]);
                            }
                            for (&sym, &idx) in right.iter().zip(children.iter()).rev() {
                                stack.push((sym, idx));
                            }
                        }
                        None => {
                            for &sym in right.iter().rev() {
                                stack.push((sym, 0));
                            }
                        }
                    }
                }
            } else {
                // Only the epsilon marker can end up here; it is never pushed.
                return Err(Error::internal(format!(
                    "unclassifiable symbol on stack: {}",
                    self.grammar.get_symbol_name(top)
                )));
            }
        }

        Ok(applied)
    }
}
