use std::collections::{HashMap, HashSet};

use crowbook_text_processing::escape;
use serde::Serialize;

use crate::parser::{AppliedProduction, ParseTree};

use super::{Grammar, Ll1Table, EPSILON, EPSILON_IDX};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize, multiline: bool) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else if multiline {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                } else {
                    format!(" | {}", right)
                }
            })
            .collect::<Vec<_>>()
            .join(if multiline { "\n" } else { "" })
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(*s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        (left + &right).replace(EPSILON, "\\epsilon")
    }
}

#[derive(Debug, Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.len())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len, true))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex(true)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

#[derive(Serialize)]
struct NonTerminalOutput<'a> {
    name: &'a str,
    nullable: bool,
    first: Vec<&'a str>,
    follow: Vec<&'a str>,
}

impl NonTerminalOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.name,
            self.nullable,
            self.first.join(", "),
            self.follow.join(", ")
        )
    }

    fn to_latex(&self) -> String {
        fn f(a: &Vec<&str>) -> String {
            a.iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(r"\ ")
                .replace(EPSILON, r"$\epsilon$")
        }

        format!(
            "{} & {} & {} & {}",
            escape::tex(self.name),
            self.nullable,
            f(&self.first),
            f(&self.follow)
        )
    }
}

#[derive(Serialize)]
pub struct NonTerminalOutputVec<'a> {
    data: Vec<NonTerminalOutput<'a>>,
}

impl NonTerminalOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cccc}".to_string())
            .chain(
                std::iter::once(
                    "\\text{nonterminal} & \\text{nullable} & \\text{first} & \\text{follow}"
                        .to_string(),
                )
                .chain(self.data.iter().map(|s| s.to_latex())),
            )
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

#[derive(Serialize)]
pub struct Ll1TableOutput<'a> {
    terminals: Vec<&'a str>,
    rows: Vec<(&'a str, Vec<ProductionOutput<'a>>)>,
}

impl Ll1TableOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        let mut header: Vec<String> = vec![String::new()];
        header.extend(self.terminals.iter().map(|&t| t.to_string()));
        let mut output: Vec<Vec<String>> = vec![header];
        for (left, row) in &self.rows {
            let mut line: Vec<String> = vec![left.to_string()];
            line.extend(row.iter().map(|p| p.to_plaintext(left.len(), false)));
            output.push(line);
        }

        let mut width = vec![0; self.terminals.len() + 1];
        for (j, w) in width.iter_mut().enumerate() {
            *w = output.iter().map(|line| line[j].len()).max().unwrap_or(0);
        }
        output
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let mut header: Vec<String> = vec![format!(
            "\\[\\begin{{array}}{{c{}}}\n",
            "|l".repeat(self.terminals.len()),
        )];
        header.extend(
            self.terminals
                .iter()
                .map(|&t| format!("\\text{{{}}}", escape::tex(t))),
        );
        let header = header.join(" & ");

        let mut output: Vec<String> = Vec::new();
        for (left, row) in &self.rows {
            let mut line: Vec<String> = vec![escape::tex(*left).to_string()];
            line.extend(row.iter().map(|p| p.to_latex(false)));
            output.push(line.join(" & "));
        }
        let output = output.join("\\\\\n");

        header + "\\\\\\hline\n" + &output + "\n\\end{array}\\]"
    }
}

#[derive(Serialize)]
pub struct TreeNodeOutput<'a> {
    index: usize,
    symbol: &'a str,
    father: i64,
    sibling: i64,
}

#[derive(Serialize)]
pub struct ParseTreeOutput<'a> {
    nodes: Vec<TreeNodeOutput<'a>>,
}

impl ParseTreeOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        let mut lines = vec![format!(
            "{:<5} {:<15} {:<10} {:<10}",
            "Idx", "Symbol", "Father", "Sibling"
        )];
        lines.extend(self.nodes.iter().map(|n| {
            format!(
                "{:<5} {:<15} {:<10} {:<10}",
                n.index, n.symbol, n.father, n.sibling
            )
        }));
        lines.join("\n")
    }
}

fn sorted_names<'a>(grammar: &'a Grammar, set: &HashSet<usize>) -> Vec<&'a str> {
    let mut names: Vec<&str> = set.iter().map(|&i| grammar.get_symbol_name(i)).collect();
    names.sort_unstable();
    names
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let mut productions = Vec::new();
        for non_terminal in self.non_terminal_iter() {
            let rights = non_terminal
                .productions
                .iter()
                .map(|p| self.production_to_vec_str(p))
                .collect();
            productions.push(ProductionOutput {
                left: non_terminal.name.as_str(),
                rights,
            });
        }
        ProductionOutputVec { productions }
    }

    pub fn to_non_terminal_output_vec(&self) -> NonTerminalOutputVec {
        let data = self
            .non_terminal_iter()
            .map(|nt| NonTerminalOutput {
                name: nt.name.as_str(),
                nullable: nt.first.contains(&EPSILON_IDX),
                first: sorted_names(self, &nt.first),
                follow: sorted_names(self, &nt.follow),
            })
            .collect();
        NonTerminalOutputVec { data }
    }

    pub fn to_ll1_table_output<'a>(&'a self, table: &'a Ll1Table) -> Ll1TableOutput<'a> {
        let terminals: Vec<&str> = self.terminal_iter().map(|t| t.as_str()).collect();
        let columns: HashMap<usize, usize> = terminals
            .iter()
            .enumerate()
            .map(|(i, t)| (self.get_symbol_index(t).unwrap(), i))
            .collect();

        let mut rows = Vec::new();
        for nt in self.non_terminal_iter() {
            let left = nt.name.as_str();
            let mut row: Vec<ProductionOutput> = vec![
                ProductionOutput {
                    left,
                    rights: Vec::new()
                };
                terminals.len()
            ];
            for (&(nonterminal, lookahead), right) in table.cells() {
                if nonterminal == nt.index {
                    row[columns[&lookahead]]
                        .rights
                        .push(self.production_to_vec_str(right));
                }
            }
            rows.push((left, row));
        }

        Ll1TableOutput { terminals, rows }
    }

    pub fn to_derivation_output(&self, applied: &[AppliedProduction]) -> ProductionOutputVec {
        let productions = applied
            .iter()
            .map(|p| ProductionOutput {
                left: self.get_symbol_name(p.left),
                rights: vec![self.production_to_vec_str(&p.right)],
            })
            .collect();
        ProductionOutputVec { productions }
    }

    pub fn to_parse_tree_output<'a>(&'a self, tree: &ParseTree) -> ParseTreeOutput<'a> {
        let nodes = tree
            .iter()
            .enumerate()
            .map(|(index, n)| TreeNodeOutput {
                index,
                symbol: self.get_symbol_name(n.symbol),
                father: n.father,
                sibling: n.sibling,
            })
            .collect();
        ParseTreeOutput { nodes }
    }
}
