mod config;
mod error;
mod task;
mod task_list;
mod ui;

use clap::Parser;
use config::{Config, ViewFormat};
use std::io;
use task_list::TaskList;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ui::Console;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Menu-driven, in-memory to-do list manager")]
struct Cli {
    /// Print without colors
    #[arg(long)]
    no_color: bool,

    /// Print View Tasks results as JSON
    #[arg(long)]
    json: bool,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            color: !self.no_color,
            view_format: if self.json {
                ViewFormat::Json
            } else {
                ViewFormat::Text
            },
        }
    }
}

/// Logs go to stderr so the prompts on stdout stay readable.
fn init_tracing(verbose: bool) {
    let default = if verbose { "tasklist=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut list = TaskList::new();
    let mut console = Console::new(io::stdin().lock(), io::stdout(), cli.config());
    console.run(&mut list)?;

    if !list.is_empty() {
        tracing::info!(discarded = list.len(), "session ended with unsaved tasks");
    }
    Ok(())
}
