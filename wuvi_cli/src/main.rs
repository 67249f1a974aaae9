#![forbid(unsafe_code, clippy::unwrap_used)]
mod repl;

use std::process::exit;

use clap::{App, Arg};
use tracing::Level;
use wuvi::consts;
use wuvi::interpret::ExecEnv;
use wuvi::parser::Parser;

fn main() {
    let matches = App::new("Wuvi")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Wuvi interpreter")
        .arg(
            Arg::with_name("file")
                .short("f")
                .long("file")
                .value_name("FILE")
                .help("Set the path to interpret from")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("demo")
                .long("demo")
                .conflicts_with("file")
                .help("Run the built-in sample program"),
        )
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Print classified statements before running them"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Diagnostics written to stderr: error, warn, info, debug or trace")
                .takes_value(true)
                .default_value("warn"),
        )
        .get_matches();

    let level = match matches.value_of("log-level").unwrap_or("warn").parse::<Level>() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Invalid log level: {}", e);
            exit(2)
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let debug = matches.is_present("debug");

    if matches.is_present("demo") {
        println!("Wuvi Interpreter");
        println!("Executing program...");
        println!();
        run(consts::DEMO, debug);
        println!();
        println!("Wuvin' done");
        return;
    }

    match matches.value_of("file") {
        Some(file_path) => {
            let source = match std::fs::read_to_string(file_path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to read file \"{}\": {}", file_path, e);
                    exit(1)
                }
            };

            run(&source, debug);
        }
        None => {
            println!("Hi [Wuvi {}]", env!("CARGO_PKG_VERSION"));
            repl::repl(debug);
        }
    }
}

/// Run a whole program, exiting on the first error.
fn run(source: &str, debug: bool) {
    let mut env = ExecEnv::new();
    let result = if debug {
        let stmts = Parser::new(source).parse();
        println!("{:#?}", stmts);
        env.eval_stmts(&stmts)
    } else {
        env.execute(source)
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        if let Some(line) = source.lines().nth(e.line.wrapping_sub(1)) {
            eprintln!(" | {}", line);
        }
        exit(1);
    }
}
