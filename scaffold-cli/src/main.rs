//! Scaffold — generate a new project from a template directory.
//!
//! # Usage
//!
//! ```text
//! scaffold <location> <name> [--template DIR] [--policy FILE] [--verbatim-ext EXT]...
//!          [--var KEY=VALUE]... [--dry-run [--json]] [--atomic]
//! ```
//!
//! Creates `<location>/<name>` from the template tree. Silent on success; on
//! failure the error is printed to stderr and the exit status is non-zero.

mod commands;

use anyhow::Result;
use clap::Parser;

use commands::generate::GenerateArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "scaffold",
    version,
    about = "Generate a new project from a template directory",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    generate: GenerateArgs,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log to stderr, filtered by `SCAFFOLD_LOG` (default `warn`).
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_env("SCAFFOLD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    cli.generate.run()
}
