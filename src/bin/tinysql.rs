//! Interactive SQL shell
//!
//! Accumulates input lines until one ends with `;`, executes the statement,
//! prints the rendered result or the error diagnostic, and keeps going.
//! The store lives for the session and is discarded on exit.

use std::io::{self, BufRead, Write};

use tinysql::render::format_result;
use tinysql::{execute_sql, TableStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> io::Result<()> {
    println!("tinysql v{}", VERSION);
    println!("Statements end with ';'. Type '.exit' to quit.\n");

    let mut store = TableStore::new();
    let stdin = io::stdin();
    let mut buffer = String::new();
    let mut pending = String::new();

    loop {
        if pending.is_empty() {
            print!("sql> ");
        } else {
            print!("  -> ");
        }
        io::stdout().flush()?;

        buffer.clear();
        if stdin.lock().read_line(&mut buffer)? == 0 {
            break; // EOF
        }

        let line = buffer.trim();

        if line.starts_with('.') {
            if !pending.is_empty() {
                eprintln!("Warning: incomplete statement discarded");
                pending.clear();
            }
            match line {
                ".exit" | ".quit" => break,
                _ => {
                    eprintln!("Unknown command: {}", line);
                }
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        pending.push_str(line);
        pending.push(' ');

        // A statement is complete once a line ends with the terminator
        if line.ends_with(';') {
            match execute_sql(&mut store, pending.trim()) {
                Ok(result) => println!("{}\n", format_result(&result)),
                Err(e) => println!("{}\n", e),
            }
            pending.clear();
        }
    }

    Ok(())
}
