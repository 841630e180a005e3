use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for the random walk visualizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run fmt, clippy, tests and doc in sequence
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates, denying warnings
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
}

impl Commands {
    /// Arguments passed to cargo for this step.
    fn cargo_args(self) -> &'static [&'static str] {
        match self {
            Commands::Fmt => &["fmt", "--all", "--", "--check"],
            Commands::Clippy => &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            Commands::Test => &["test", "--workspace"],
            Commands::Doc => &["doc", "--workspace", "--no-deps"],
            Commands::Build => &["build", "--workspace"],
            Commands::Check => &["check", "--workspace"],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let steps: &[Commands] = match cli.command {
        Commands::Check => &[
            Commands::Fmt,
            Commands::Clippy,
            Commands::Test,
            Commands::Doc,
        ],
        ref single => std::slice::from_ref(single),
    };

    for step in steps {
        run_cargo(*step)?;
    }
    Ok(())
}

fn run_cargo(step: Commands) -> Result<()> {
    let args = step.cargo_args();
    let name = args.join(" ");
    println!("==> Running cargo {name}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("cargo {name} failed");
    }
    Ok(())
}
