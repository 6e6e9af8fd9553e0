extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod error;
pub mod grammar;
pub mod parser;
pub mod token;

pub use error::{Error, ErrorKind};
pub use grammar::Grammar;
pub use parser::PredictiveParser;

fn error_to_json(e: &Error) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn first_follow_to_json(grammar: &str) -> String {
    match Grammar::parse(grammar) {
        Ok(mut g) => {
            g.calculate_first_follow();
            g.to_non_terminal_output_vec().to_json()
        }
        Err(e) => error_to_json(&e),
    }
}

#[wasm_bindgen]
pub fn ll1_table_to_json(grammar: &str) -> String {
    let result = Grammar::parse(grammar).and_then(|mut g| {
        let table = g.build_ll1_table()?;
        Ok(serde_json::to_string(&g.to_ll1_table_output(&table)).unwrap())
    });
    match result {
        Ok(json) => json,
        Err(e) => error_to_json(&e),
    }
}

/// Validates a whitespace-separated token sequence against a grammar and
/// returns the applied productions as JSON.
#[wasm_bindgen]
pub fn validate_to_json(grammar: &str, tokens: &str) -> String {
    let result = Grammar::parse(grammar).and_then(|mut g| {
        let table = g.build_ll1_table()?;
        let tokens: Vec<&str> = tokens.split_whitespace().collect();
        let applied = PredictiveParser::new(&g, &table).validate(&tokens)?;
        Ok(serde_json::to_string(&g.to_derivation_output(&applied)).unwrap())
    });
    match result {
        Ok(json) => json,
        Err(e) => error_to_json(&e),
    }
}

#[cfg(test)]
fn anbn_grammar() -> Grammar {
    Grammar::parse(
        "# NonTerminals\n\
         S\n\
         ---\n\
         # Terminals\n\
         a\n\
         b\n\
         ---\n\
         # StartSymbol\n\
         S\n\
         ---\n\
         # Productions\n\
         S -> a S b\n\
         S ->\n\
         ---\n",
    )
    .unwrap()
}

#[cfg(test)]
fn expression_grammar() -> Grammar {
    Grammar::parse(
        "# NonTerminals\n\
         E\n\
         E'\n\
         T\n\
         T'\n\
         F\n\
         ---\n\
         # Terminals\n\
         +\n\
         *\n\
         (\n\
         )\n\
         id\n\
         ---\n\
         # StartSymbol\n\
         E\n\
         ---\n\
         # Productions\n\
         E -> T E'\n\
         E' -> + T E'\n\
         E' ->\n\
         T -> F T'\n\
         T' -> * F T'\n\
         T' ->\n\
         F -> ( E )\n\
         F -> id\n\
         ---\n",
    )
    .unwrap()
}


#[cfg(test)]
mod first_follow_tests {
    use std::collections::HashSet;

    use crate::grammar::{END_MARK, EPSILON, EPSILON_IDX};
    use crate::Grammar;

    fn names(g: &Grammar, set: &HashSet<usize>) -> HashSet<String> {
        set.iter()
            .map(|&i| g.get_symbol_name(i).to_string())
            .collect()
    }

    fn set_of(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn first(g: &Grammar, name: &str) -> HashSet<String> {
        let idx = g.get_symbol_index(name).unwrap();
        names(g, &g.symbols[idx].non_terminal().unwrap().first)
    }

    fn follow(g: &Grammar, name: &str) -> HashSet<String> {
        let idx = g.get_symbol_index(name).unwrap();
        names(g, &g.symbols[idx].non_terminal().unwrap().follow)
    }

    #[test]
    fn expression_grammar_first_sets() {
        let mut g = super::expression_grammar();
        g.calculate_first_follow();

        assert_eq!(first(&g, "E"), set_of(&["(", "id"]));
        assert_eq!(first(&g, "T"), set_of(&["(", "id"]));
        assert_eq!(first(&g, "F"), set_of(&["(", "id"]));
        assert_eq!(first(&g, "E'"), set_of(&["+", EPSILON]));
        assert_eq!(first(&g, "T'"), set_of(&["*", EPSILON]));
    }

    #[test]
    fn expression_grammar_follow_sets() {
        let mut g = super::expression_grammar();
        g.calculate_first_follow();

        assert_eq!(follow(&g, "E"), set_of(&[")", END_MARK]));
        assert_eq!(follow(&g, "E'"), set_of(&[")", END_MARK]));
        assert_eq!(follow(&g, "T"), set_of(&["+", ")", END_MARK]));
        assert_eq!(follow(&g, "T'"), set_of(&["+", ")", END_MARK]));
        assert_eq!(follow(&g, "F"), set_of(&["*", "+", ")", END_MARK]));
    }

    #[test]
    fn follow_of_start_contains_end_marker() {
        let mut g = super::anbn_grammar();
        g.calculate_first_follow();
        assert!(follow(&g, "S").contains(END_MARK));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let mut g = super::expression_grammar();
        g.calculate_first_follow();
        let snapshot: Vec<_> = g
            .non_terminal_iter()
            .map(|nt| (nt.first.clone(), nt.follow.clone()))
            .collect();

        g.calculate_first_follow();
        let again: Vec<_> = g
            .non_terminal_iter()
            .map(|nt| (nt.first.clone(), nt.follow.clone()))
            .collect();

        assert_eq!(snapshot, again);
    }

    #[test]
    fn first_of_sequence_skips_nullable_prefix() {
        let mut g = super::expression_grammar();
        g.calculate_first_follow();

        let e_prime = g.get_symbol_index("E'").unwrap();
        let t_prime = g.get_symbol_index("T'").unwrap();
        let id = g.get_symbol_index("id").unwrap();

        let first = g.first_of_sequence(&[e_prime, t_prime, id]);
        assert!(first.contains(&g.get_symbol_index("+").unwrap()));
        assert!(first.contains(&g.get_symbol_index("*").unwrap()));
        assert!(first.contains(&id));
        assert!(!first.contains(&EPSILON_IDX));
    }

    #[test]
    fn first_of_empty_sequence_is_epsilon() {
        let g = super::expression_grammar();
        let first = g.first_of_sequence(&[]);
        assert_eq!(first, std::iter::once(EPSILON_IDX).collect());
    }
}

#[cfg(test)]
mod ll1_table_tests {
    use crate::{ErrorKind, Grammar};

    #[test]
    fn expression_grammar_table() {
        let mut g = super::expression_grammar();
        let table = g.build_ll1_table().unwrap();

        let e = g.get_symbol_index("E").unwrap();
        let e_prime = g.get_symbol_index("E'").unwrap();
        let id = g.get_symbol_index("id").unwrap();
        let plus = g.get_symbol_index("+").unwrap();
        let rparen = g.get_symbol_index(")").unwrap();
        let t = g.get_symbol_index("T").unwrap();

        assert_eq!(
            table.get(e, id),
            Some(&vec![t, g.get_symbol_index("E'").unwrap()])
        );
        // E' -> + T E' on '+', epsilon on FOLLOW(E').
        assert!(table.get(e_prime, plus).is_some());
        assert_eq!(
            table.get(e_prime, rparen),
            Some(&vec![crate::grammar::EPSILON_IDX])
        );
        assert!(table.get(e, plus).is_none());
    }

    #[test]
    fn first_first_overlap_is_conflict() {
        let mut g = Grammar::parse(
            "# NonTerminals\nS\n---\n# Terminals\nx\ny\nz\n---\n# StartSymbol\nS\n---\n\
             # Productions\nS -> x y\nS -> x z\n---\n",
        )
        .unwrap();
        let e = g.build_ll1_table().unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn conflict_is_order_independent() {
        let forward = "# NonTerminals\nS\n---\n# Terminals\nx\ny\nz\n---\n# StartSymbol\nS\n---\n\
                       # Productions\nS -> x y\nS -> x z\n---\n";
        let reversed = "# NonTerminals\nS\n---\n# Terminals\nx\ny\nz\n---\n# StartSymbol\nS\n---\n\
                        # Productions\nS -> x z\nS -> x y\n---\n";
        for text in [forward, reversed] {
            let mut g = Grammar::parse(text).unwrap();
            let e = g.build_ll1_table().unwrap_err();
            assert_eq!(e.kind(), ErrorKind::Conflict);
        }
    }

    #[test]
    fn first_follow_overlap_is_conflict() {
        // FIRST(A) and FOLLOW(A) both contain x, and A is nullable.
        let mut g = Grammar::parse(
            "# NonTerminals\nS\nA\n---\n# Terminals\nx\n---\n# StartSymbol\nS\n---\n\
             # Productions\nS -> A x\nA -> x\nA ->\n---\n",
        )
        .unwrap();
        let e = g.build_ll1_table().unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Conflict);
    }
}

#[cfg(test)]
mod parser_tests {
    use crate::grammar::EPSILON_IDX;
    use crate::parser::AppliedProduction;
    use crate::{Error, ErrorKind, Grammar, PredictiveParser};

    fn replay(g: &Grammar, applied: &[AppliedProduction]) -> Vec<String> {
        let mut form = vec![g.start_symbol.unwrap()];
        for step in applied {
            let pos = form
                .iter()
                .position(|&s| g.is_nonterminal_idx(s))
                .expect("leftmost derivation ran out of nonterminals");
            assert_eq!(form[pos], step.left);
            let replacement: Vec<usize> = if step.right == [EPSILON_IDX] {
                Vec::new()
            } else {
                step.right.clone()
            };
            form.splice(pos..=pos, replacement);
        }
        form.iter()
            .map(|&s| g.get_symbol_name(s).to_string())
            .collect()
    }

    #[test]
    fn validates_anbn() {
        let mut g = super::anbn_grammar();
        let table = g.build_ll1_table().unwrap();
        let parser = PredictiveParser::new(&g, &table);

        let applied = parser.validate(&["a", "a", "b", "b"]).unwrap();

        let s = g.get_symbol_index("S").unwrap();
        let a = g.get_symbol_index("a").unwrap();
        let b = g.get_symbol_index("b").unwrap();
        let expected = vec![
            AppliedProduction {
                left: s,
                right: vec![a, s, b],
            },
            AppliedProduction {
                left: s,
                right: vec![a, s, b],
            },
            AppliedProduction {
                left: s,
                right: vec![EPSILON_IDX],
            },
        ];
        assert_eq!(applied, expected);
    }

    #[test]
    fn rejects_unbalanced_input() {
        let mut g = super::anbn_grammar();
        let table = g.build_ll1_table().unwrap();
        let parser = PredictiveParser::new(&g, &table);

        let e = parser.validate(&["a", "b", "b"]).unwrap_err();
        assert_eq!(
            e,
            Error::UnexpectedToken {
                position: 2,
                expected: "$".to_string(),
                found: "b".to_string(),
            }
        );
    }

    #[test]
    fn reports_missing_table_entry() {
        let mut g = super::expression_grammar();
        let table = g.build_ll1_table().unwrap();
        let parser = PredictiveParser::new(&g, &table);

        // '+' cannot start an expression.
        let e = parser.validate(&["+", "id"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Syntax);
        assert!(matches!(e, Error::NoProduction { position: 0, .. }));
    }

    #[test]
    fn rejects_token_unknown_to_the_grammar() {
        let mut g = super::anbn_grammar();
        let table = g.build_ll1_table().unwrap();
        let parser = PredictiveParser::new(&g, &table);

        let e = parser.validate(&["a", "what", "b"]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn accepts_empty_input_for_nullable_start() {
        let mut g = super::anbn_grammar();
        let table = g.build_ll1_table().unwrap();
        let parser = PredictiveParser::new(&g, &table);

        let applied = parser.validate(&[]).unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].right, vec![EPSILON_IDX]);
    }

    #[test]
    fn derivation_replay_reproduces_input() {
        let mut g = super::expression_grammar();
        let table = g.build_ll1_table().unwrap();
        let parser = PredictiveParser::new(&g, &table);

        let tokens = ["id", "+", "id", "*", "(", "id", ")"];
        let applied = parser.validate(&tokens).unwrap();
        assert_eq!(replay(&g, &applied), tokens.to_vec());
    }
}
