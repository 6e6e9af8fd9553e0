use std::collections::HashSet;

use super::{grammar::Symbol, Grammar, END_MARK_IDX, EPSILON_IDX};

impl Grammar {
    /// Recomputes FIRST and FOLLOW from scratch. Running it again on its own
    /// output changes nothing.
    pub fn calculate_first_follow(&mut self) {
        self.reset_first_follow();
        if let Some(start_idx) = self.start_symbol {
            self.calculate_first();
            self.symbols[start_idx]
                .mut_non_terminal()
                .expect("start symbol must be a nonterminal")
                .follow
                .insert(END_MARK_IDX);
            self.calculate_follow();
        }
    }

    pub fn reset_first_follow(&mut self) {
        for nt in self.non_terminal_iter_mut() {
            nt.first = HashSet::new();
            nt.follow = HashSet::new();
        }
    }

    /// FIRST of a single symbol. For terminals (the epsilon marker included)
    /// this is the singleton of the symbol itself.
    pub fn first_of_symbol(&self, index: usize) -> HashSet<usize> {
        match &self.symbols[index] {
            Symbol::Terminal(_) => std::iter::once(index).collect(),
            Symbol::NonTerminal(nt) => nt.first.clone(),
        }
    }

    /// FIRST of a symbol sequence: the union of FIRST(Xi) minus epsilon while
    /// the prefix stays nullable, plus epsilon if the whole sequence is
    /// nullable (or empty).
    pub fn first_of_sequence(&self, sequence: &[usize]) -> HashSet<usize> {
        let mut first: HashSet<usize> = HashSet::new();
        let mut nullable_prefix = true;
        for &x in sequence {
            let sym_first = self.first_of_symbol(x);
            first.extend(sym_first.iter().filter(|&&a| a != EPSILON_IDX));
            if !sym_first.contains(&EPSILON_IDX) {
                nullable_prefix = false;
                break;
            }
        }
        if nullable_prefix {
            first.insert(EPSILON_IDX);
        }
        first
    }

    fn calculate_first(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.symbols.len() {
                let first: HashSet<usize> = match &self.symbols[i] {
                    Symbol::Terminal(_) => continue,
                    Symbol::NonTerminal(nt) => {
                        nt.productions
                            .iter()
                            .fold(HashSet::new(), |mut first, production| {
                                first.extend(self.first_of_sequence(production));
                                first
                            })
                    }
                };

                let nt = self.symbols[i].mut_non_terminal().unwrap();
                if nt.first.len() != first.len() {
                    changed = true;
                    nt.first = first;
                }
            }
        }
    }

    fn calculate_follow(&mut self) {
        let productions: Vec<(usize, Vec<usize>)> = self
            .non_terminal_iter()
            .flat_map(|nt| {
                nt.productions
                    .iter()
                    .map(|p| (nt.index, p.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut changed = true;
        while changed {
            changed = false;
            for (left, production) in &productions {
                // Trailer: everything that can follow the suffix seen so far.
                let mut trailer: HashSet<usize> = self.symbols[*left]
                    .non_terminal()
                    .unwrap()
                    .follow
                    .clone();

                for &x in production.iter().rev() {
                    if !self.is_nonterminal_idx(x) {
                        trailer = std::iter::once(x).collect();
                        continue;
                    }

                    let first_x = self.first_of_symbol(x);

                    let follow = &mut self.symbols[x].mut_non_terminal().unwrap().follow;
                    let before = follow.len();
                    follow.extend(trailer.iter());
                    if follow.len() != before {
                        changed = true;
                    }

                    if first_x.contains(&EPSILON_IDX) {
                        trailer.extend(first_x.iter().filter(|&&a| a != EPSILON_IDX));
                    } else {
                        trailer = first_x;
                    }
                }
            }
        }
    }
}
