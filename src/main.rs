pub mod error;
pub mod grammar;
pub mod parser;
pub mod token;

use std::{fs, io::BufRead};

use error::Error;
pub use grammar::Grammar;
use parser::PredictiveParser;
use token::{decode_token_file, TokenCodeMap};

fn print_help() {
    println!("Usage: ll1-parser-helper outputs [options] [grammar file] [inputs]");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  ff: First and follow sets");
    println!("  ll1: LL(1) parsing table");
    println!("  validate: Run the predictive parser, print the applied productions");
    println!("  tree: Parse a coded token file, print the derivation tree");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("inputs:");
    println!("  validate: the input tokens, one argument each");
    println!("  tree: a code map file (lines \"code terminal\") and a coded token file");
}

enum OutputFormat {
    Plain,
    LaTeX,
    Json,
}

fn read_file(path: &str) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_string(),
        message: e.to_string(),
    })
}

fn run() -> Result<(), Error> {
    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;

    while i < args.len() && ["prod", "ff", "ll1", "validate", "tree"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    let mut output_format = OutputFormat::Plain;
    while i < args.len() && ["-h", "--help", "-l", "-j"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return Ok(());
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::Json;
        }
        i += 1;
    }

    if outputs.is_empty() {
        print_help();
        return Ok(());
    }

    let input: String = if i == args.len() {
        std::io::stdin()
            .lock()
            .lines()
            .map(|l| l.unwrap_or_default())
            .collect::<Vec<String>>()
            .join("\n")
    } else {
        let text = read_file(args[i].as_str())?;
        i += 1;
        text
    };
    let rest = &args[i..];

    let mut g = Grammar::parse(&input)?;

    for output in outputs {
        if output == "prod" {
            let t = g.to_production_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => serde_json::to_string(&t).unwrap(),
                }
            );
        }
        if output == "ff" {
            g.calculate_first_follow();
            let t = g.to_non_terminal_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => t.to_json(),
                }
            );
        }
        if output == "ll1" {
            let table = g.build_ll1_table()?;
            let t = g.to_ll1_table_output(&table);
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => serde_json::to_string(&t).unwrap(),
                }
            );
        }
        if output == "validate" {
            let table = g.build_ll1_table()?;
            let tokens: Vec<&str> = rest.iter().map(|s| s.as_str()).collect();
            let applied = PredictiveParser::new(&g, &table).validate(&tokens)?;
            let t = g.to_derivation_output(&applied);
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => serde_json::to_string(&t).unwrap(),
                }
            );
        }
        if output == "tree" {
            if rest.len() != 2 {
                print_help();
                return Ok(());
            }
            let table = g.build_ll1_table()?;
            let map = TokenCodeMap::parse(&read_file(rest[0].as_str())?)?;
            let tokens = decode_token_file(&read_file(rest[1].as_str())?, &map)?;
            let tokens: Vec<&str> = tokens.iter().map(|s| s.as_str()).collect();
            let tree = PredictiveParser::new(&g, &table).parse_tree(&tokens)?;
            let t = g.to_parse_tree_output(&tree);
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX | OutputFormat::Json =>
                        serde_json::to_string(&t).unwrap(),
                }
            );
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
