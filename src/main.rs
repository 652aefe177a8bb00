use std::{fs, io::Read, process};

use grammar_normalizer::Grammar;
use tracing::{debug, Level};

fn print_help() {
    println!("Usage: grammar-normalizer [actions] outputs [options] [grammar file]");
    println!("actions:");
    println!("  elf: Eliminate left recursion");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  eps: Epsilon non-terminals");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("  -t: Read rules as text (S -> A b | c) instead of JSON");
    println!("  -v: Verbose logging on stderr");
}

enum OutputFormat {
    Plain,
    LaTeX,
    JSON,
}

fn read_input(path: Option<&str>) -> Result<String, String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))
        }
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            Ok(input)
        }
    }
}

fn main() {
    let mut actions: Vec<&str> = Vec::new();
    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len() && args[i] == "elf" {
        actions.push(args[i].as_str());
        i += 1;
    }
    while i < args.len() && ["prod", "eps"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    let mut output_format = OutputFormat::Plain;
    let mut text_input = false;
    let mut max_level = Level::WARN;

    while i < args.len() && ["-h", "--help", "-l", "-j", "-t", "-v"].contains(&args[i].as_str()) {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-l" => output_format = OutputFormat::LaTeX,
            "-j" => output_format = OutputFormat::JSON,
            "-t" => text_input = true,
            "-v" => max_level = Level::TRACE,
            _ => {}
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() {
        print_help();
        return;
    }

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();

    let input = match read_input(args.get(i).map(String::as_str)) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let parsed = if text_input {
        Grammar::parse_rules(&input)
    } else {
        Grammar::parse(&input)
    };
    let mut g = match parsed {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    debug!(
        "loaded {} rules, start symbol '{}'",
        g.productions.len(),
        g.start
    );

    for action in actions {
        if action == "elf" {
            g = g.eliminate_left_recursion();
        }
    }

    for output in outputs {
        if output == "prod" {
            let t = g.to_production_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
        if output == "eps" {
            let t = g.to_epsilon_output();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
    }
}
