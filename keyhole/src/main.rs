//! Interactive console client for the keyhole solver.
//!
//! Loads `keyhole.toml`, builds the configured oracle, and runs the key
//! search on a worker thread while the main thread reads pause/resume/stop
//! commands from stdin.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use keyhole::control::SearchControl;
use keyhole::exit_codes;
use keyhole::io::config::{OracleMode, SolverConfig, load_config, write_config};
use keyhole::io::local::LocalOracle;
use keyhole::io::oracle::KeyOracle;
use keyhole::io::remote::RemoteOracle;
use keyhole::search::{SearchOutcome, run_search};

#[derive(Parser)]
#[command(
    name = "keyhole",
    version,
    about = "Searches for the correct key to a keyhole service"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default `keyhole.toml` config file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Run the key search against the configured oracle.
    Solve {
        /// Path to the config file.
        #[arg(short, long, default_value = "keyhole.toml")]
        config: PathBuf,
        /// Override the configured search limit.
        #[arg(long)]
        limit: Option<u32>,
        /// Do not read pause/stop commands from stdin.
        #[arg(long)]
        no_input: bool,
    },
}

fn main() {
    keyhole::logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("The search hit an unexpected snag:");
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(force),
        Command::Solve {
            config,
            limit,
            no_input,
        } => cmd_solve(&config, limit, no_input),
    }
}

fn cmd_init(force: bool) -> Result<i32> {
    let path = Path::new("keyhole.toml");
    if path.exists() && !force {
        bail!("keyhole.toml already exists (use --force to overwrite)");
    }
    write_config(path, &SolverConfig::default())?;
    println!("Wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_solve(config_path: &Path, limit: Option<u32>, no_input: bool) -> Result<i32> {
    let mut cfg = load_config(config_path)?;
    if limit.is_some() {
        cfg.search_limit = limit;
    }
    cfg.validate()?;

    let oracle = build_oracle(&cfg)?;
    print_intro(&cfg, no_input);

    let control = Arc::new(SearchControl::new());
    let outcome = if no_input {
        run_search(oracle.as_ref(), &control, cfg.search_limit, print_status)?
    } else {
        solve_interactive(oracle, &control, cfg.search_limit)?
    };

    print_outcome(&outcome);
    Ok(if outcome.found {
        exit_codes::OK
    } else {
        exit_codes::NOT_FOUND
    })
}

fn build_oracle(cfg: &SolverConfig) -> Result<Box<dyn KeyOracle + Send>> {
    match cfg.oracle.mode {
        OracleMode::Local => {
            let oracle = LocalOracle::new(&cfg.oracle.local_key)?
                .with_latency(Duration::from_millis(cfg.oracle.local_latency_ms));
            Ok(Box::new(oracle))
        }
        OracleMode::Remote => {
            let oracle = RemoteOracle::new(
                &cfg.oracle.remote_url,
                cfg.oracle.remote_key_override.as_deref(),
            )?;
            Ok(Box::new(oracle))
        }
    }
}

enum Event {
    Input(String),
    Finished(Result<SearchOutcome>),
}

/// Run the search on a worker thread and steer it from stdin.
///
/// A second thread forwards stdin lines; both post to one channel so this
/// thread never blocks on input after the search has finished.
fn solve_interactive(
    oracle: Box<dyn KeyOracle + Send>,
    control: &Arc<SearchControl>,
    search_limit: Option<u32>,
) -> Result<SearchOutcome> {
    let (tx, rx) = mpsc::channel();

    let worker_tx = tx.clone();
    let worker_control = Arc::clone(control);
    thread::spawn(move || {
        let result = run_search(oracle.as_ref(), &worker_control, search_limit, print_status);
        // The receiver only goes away when the process is already exiting.
        let _ = worker_tx.send(Event::Finished(result));
    });

    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Event::Input(line)).is_err() {
                break;
            }
        }
    });

    loop {
        match rx.recv().context("search worker disappeared")? {
            Event::Input(line) => handle_command(line.trim(), control),
            Event::Finished(result) => return result,
        }
    }
}

fn handle_command(command: &str, control: &SearchControl) {
    match command {
        "p" => {
            control.request_pause();
            println!("Pausing. Type 'r' to resume or 's' to stop.");
        }
        "r" => {
            control.request_resume();
            println!("Resuming.");
        }
        "s" => {
            control.request_stop();
            println!("Stopping.");
        }
        "" => {}
        other => println!("Unknown command '{other}' (use 'p', 'r', or 's')."),
    }
}

fn print_status(message: &str) {
    println!("{message}");
}

fn print_intro(cfg: &SolverConfig, no_input: bool) {
    println!("Starting keyhole key search");
    match cfg.oracle.mode {
        OracleMode::Remote => println!(
            "The solver will connect to the service at {}",
            cfg.oracle.remote_url
        ),
        OracleMode::Local => println!("The solver will use the local oracle."),
    }
    if !no_input {
        println!("Type 'p' to pause, 'r' to resume, or 's' to stop the search.");
    }
}

fn print_outcome(outcome: &SearchOutcome) {
    println!(
        "A correct key was {}found.",
        if outcome.found { "" } else { "not " }
    );
    println!("The last key used was '{}'", outcome.final_key);
    let plural = if outcome.attempts_made == 1 {
        "attempt was"
    } else {
        "attempts were"
    };
    println!("{} {plural} made", outcome.attempts_made);
    if !outcome.message.is_empty() {
        println!("Additional information: '{}'", outcome.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::parse_from(["keyhole", "init"]);
        assert!(matches!(cli.command, Command::Init { force: false }));
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["keyhole", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true }));
    }

    #[test]
    fn parse_solve_defaults() {
        let cli = Cli::parse_from(["keyhole", "solve"]);
        match cli.command {
            Command::Solve {
                config,
                limit,
                no_input,
            } => {
                assert_eq!(config, PathBuf::from("keyhole.toml"));
                assert_eq!(limit, None);
                assert!(!no_input);
            }
            Command::Init { .. } => panic!("expected solve"),
        }
    }

    #[test]
    fn parse_solve_with_limit() {
        let cli = Cli::parse_from(["keyhole", "solve", "--limit", "25", "--no-input"]);
        match cli.command {
            Command::Solve { limit, no_input, .. } => {
                assert_eq!(limit, Some(25));
                assert!(no_input);
            }
            Command::Init { .. } => panic!("expected solve"),
        }
    }
}
