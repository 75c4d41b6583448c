use anyhow::Result;
use clap::Parser;
use monkey_interpreter::repl::{self, ReplConfig, PROMPT};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[clap(name = "monkey", about = "Read-eval-print loop for the Monkey language")]
struct Cli {
    /// Prompt printed before each line
    #[clap(long, default_value = PROMPT)]
    prompt: String,
    /// Print the parsed program before its result
    #[clap(long)]
    echo: bool,
}

/// Logs go to stderr and only when `RUST_LOG` is set, e.g.
/// `RUST_LOG=monkey_interpreter=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = ReplConfig {
        prompt: cli.prompt,
        echo: cli.echo,
    };
    let stdin = io::stdin();
    let stdout = Rc::new(RefCell::new(io::stdout()));
    repl::start(&config, stdin.lock(), stdout)
}
