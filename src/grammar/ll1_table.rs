use std::collections::HashMap;

use crate::error::Error;

use super::{Grammar, EPSILON_IDX};

/// The LL(1) decision function: (nonterminal, lookahead terminal) -> the
/// right-hand side to apply. At most one entry per cell; construction fails
/// on the second write. Immutable once built.
#[derive(Debug, Clone)]
pub struct Ll1Table {
    cells: HashMap<(usize, usize), Vec<usize>>,
}

impl Ll1Table {
    pub fn get(&self, nonterminal: usize, lookahead: usize) -> Option<&Vec<usize>> {
        self.cells.get(&(nonterminal, lookahead))
    }

    pub fn cells(&self) -> impl Iterator<Item = (&(usize, usize), &Vec<usize>)> {
        self.cells.iter()
    }

    fn set(
        &mut self,
        grammar: &Grammar,
        nonterminal: usize,
        lookahead: usize,
        right: &[usize],
    ) -> Result<(), Error> {
        if self.cells.contains_key(&(nonterminal, lookahead)) {
            return Err(Error::Conflict {
                nonterminal: grammar.get_symbol_name(nonterminal).to_string(),
                lookahead: grammar.get_symbol_name(lookahead).to_string(),
            });
        }
        self.cells.insert((nonterminal, lookahead), right.to_vec());
        Ok(())
    }
}

impl Grammar {
    /// Builds the predictive parsing table. Recomputes FIRST/FOLLOW first so
    /// this can be called directly on a freshly loaded grammar.
    pub fn build_ll1_table(&mut self) -> Result<Ll1Table, Error> {
        self.calculate_first_follow();

        let mut table = Ll1Table {
            cells: HashMap::new(),
        };

        for nt in self.non_terminal_iter() {
            for production in &nt.productions {
                let first = self.first_of_sequence(production);
                for &a in first.iter().filter(|&&a| a != EPSILON_IDX) {
                    table.set(self, nt.index, a, production)?;
                }
                if first.contains(&EPSILON_IDX) {
                    for &b in &nt.follow {
                        table.set(self, nt.index, b, production)?;
                    }
                }
            }
        }

        Ok(table)
    }
}
