use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for showroom")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc, smoke
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Run the combat step benchmark in release mode
    Bench,
    /// Headless run of every demo through the CLI
    Smoke,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_doc()?;
            run_smoke()?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Doc => run_doc()?,
        Commands::Build => run_build()?,
        Commands::Bench => run_bench()?,
        Commands::Smoke => run_smoke()?,
    }

    Ok(())
}

fn cargo(what: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {what}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {what} failed");
    }
    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo("fmt --check", &["fmt", "--all", "--", "--check"])
}

fn run_clippy() -> Result<()> {
    cargo(
        "clippy",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )
}

fn run_tests() -> Result<()> {
    cargo("test", &["test", "--workspace"])
}

fn run_doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn run_build() -> Result<()> {
    cargo("build", &["build", "--workspace"])
}

fn run_bench() -> Result<()> {
    cargo(
        "bench",
        &["bench", "-p", "showroom-kernel", "--bench", "bench_combat_step"],
    )
}

/// Each demo for a few simulated seconds; fails if any run errors.
fn run_smoke() -> Result<()> {
    let runs: [&[&str]; 4] = [
        &["info"],
        &["drive", "--frames", "120", "--hold", "forward,left"],
        &["combat", "--frames", "300", "--fire-every", "20", "--seed", "7"],
        &["lights", "--frames", "120", "--json"],
    ];
    for args in runs {
        let mut full = vec!["run", "-q", "-p", "showroom-cli", "--"];
        full.extend_from_slice(args);
        cargo(&format!("smoke {}", args[0]), &full)?;
    }
    Ok(())
}
