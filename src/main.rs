use std::io::{IsTerminal, Read};

use cmdscan::{Config, InputError, Prompt, Token, Tokenizer, Usage};
use tracing_subscriber::EnvFilter;

fn usage() -> Usage {
    let mut usage = Usage::new();
    usage.describe_plain("help", "Show this message.");
    usage.describe_plain("quit", "Exit.");
    usage.describe("<text>", "[prefix:]", "Report how the text parses.");
    usage
}

fn classify(token: &Token) -> String {
    if token.is_blank() {
        "blank".to_string()
    } else if let Ok(b) = token.parse_bool() {
        format!("bool {b}")
    } else if let Ok(n) = token.parse_int(0, 64) {
        format!("int {n}")
    } else if let Ok(n) = token.parse_uint(0, 64) {
        format!("uint {n}")
    } else {
        match token.parse_float(64) {
            Ok(n) => format!("float {n}"),
            Err(e) if e.is_range() => format!("float out of range: {e}"),
            Err(_) => format!("text {:?}", token.body()),
        }
    }
}

fn run<R: Read>(mut tokenizer: Tokenizer<R>) -> i32 {
    let usage = usage();
    while tokenizer.advance() {
        let Some(token) = tokenizer.token_mut() else {
            break;
        };

        if token.equals(&["quit", "exit"]) {
            return 0;
        } else if token.equals(&["help", "?"]) {
            print!("{usage}");
            continue;
        }

        if let Some((prefix, _)) = token.full().split_once(':') {
            let prefix = format!("{prefix}:");
            token.has_prefix(&[prefix.as_str()]);
            println!("{prefix} {}", classify(token));
        } else {
            println!("{}", classify(token));
        }
    }

    match tokenizer.last_error() {
        None => 0,
        Some(e) if InputError::is_interrupt(e) => 0,
        Some(e) => {
            eprintln!("Input error: {e}");
            1
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CMDSCAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let code = if std::io::stdin().is_terminal() {
        match Prompt::new() {
            Ok(prompt) => run(Tokenizer::with_config(prompt, config)),
            Err(e) => {
                eprintln!("Input error: {e}");
                1
            }
        }
    } else {
        run(Tokenizer::with_config(std::io::stdin().lock(), config))
    };
    std::process::exit(code);
}
