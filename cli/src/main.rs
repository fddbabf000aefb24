//! Interactive terminal front end for the todo service.
//!
//! Loads the list once at start, then reads one command per line. Every
//! request goes through `todo-core`; this binary only moves bytes and prints.

mod commands;
mod session;
mod transport;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use todo_core::{TodoApp, TodoClient};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use session::{Flow, Session};
use transport::UreqTransport;

#[derive(Debug, Parser)]
#[command(name = "todo-cli", about = "Terminal client for the todo service")]
struct Args {
    /// Base URL of the todo service
    #[arg(long, env = "TODO_API_URL", default_value = "http://localhost:3000")]
    base_url: String,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let app = TodoApp::new(TodoClient::new(&args.base_url));
    let mut session = Session::new(app, UreqTransport::new());
    session.load();
    print!("{}", session.render());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ").and_then(|()| stdout.flush()).context("failed to write prompt")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("failed to read stdin")? == 0 {
            break;
        }

        match commands::parse(&line) {
            Ok(Some(command)) => {
                if session.run(command) == Flow::Quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("{e}"),
        }
    }
    Ok(())
}
