use std::{fs, process};

use clap::Parser;
use log::error;
use symexpr::interpreter::expression::Expression;

/// symexpr evaluates arithmetic expressions over scalar and array variables
/// whose values are loaded from a records file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells symexpr to read the expression from a file instead.
    #[arg(short, long)]
    file: bool,

    /// File of value records, one `name value` or
    /// `name size (index,value) ...` per line.
    #[arg(short, long, value_name = "VALUES_FILE")]
    values: Option<String>,

    /// Prints every discovered symbol with its loaded value.
    #[arg(short, long)]
    list_symbols: bool,

    contents: String,
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{path}'. Perhaps this file does not exist?");
        process::exit(1);
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let source = if args.file {
        read_file(&args.contents).trim().to_string()
    } else {
        args.contents
    };

    let mut expr = Expression::new(source);
    if let Err(e) = expr.build_symbols() {
        eprintln!("{e}");
        process::exit(1);
    }

    if let Some(path) = &args.values
       && let Err(e) = expr.load_symbol_text(&read_file(path))
    {
        error!("failed to load values from '{path}'");
        eprintln!("{e}");
        process::exit(1);
    }

    if args.list_symbols {
        print!("{}", expr.symbol_listing());
    }

    match expr.evaluate() {
        Ok(value) => println!("{value}"),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}
