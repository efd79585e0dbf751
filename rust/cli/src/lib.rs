//! # holdem CLI Library
//!
//! Command-line front end for the Texas Hold'em table engine.
//!
//! The entry point is [`run`], which parses arguments and dispatches to a
//! subcommand, writing to the given streams and returning an exit code.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = holdem_cli::run(["holdem", "eval", "--hole", "As Ks"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `eval`: Evaluate hole cards with an optional board
//! - `deal`: Start a single hand and print the snapshot
//! - `sim`: Play many hands and verify chip conservation
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod error;
pub mod exit_code;

use cli::{Commands, HoldemCli, COMMANDS};
use commands::{handle_cfg_command, handle_deal_command, handle_eval_command, handle_sim_command};

pub use error::CliError;

/// Parses `args` and runs the selected command.
///
/// Returns [`exit_code::SUCCESS`] on success and [`exit_code::ERROR`] for
/// argument errors or failed commands. Help and version go to `out`.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(&e, out, err),
    };

    let result = match cli.cmd {
        Commands::Eval { hole, board } => handle_eval_command(&hole, &board, out),
        Commands::Deal { seed, players } => handle_deal_command(seed, players, out),
        Commands::Sim {
            hands,
            players,
            seed,
            output,
        } => handle_sim_command(hands, players, seed, output, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: &clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "Usage: holdem <command> [options]\n\nCommands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: holdem --help");
    exit_code::ERROR
}
