//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Texas Hold'em table engine: evaluate hands, deal, and simulate sessions"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate hole cards against an optional board
    Eval {
        /// Two hole cards, e.g. "As Ks"
        #[arg(long)]
        hole: String,
        /// Zero to five board cards, e.g. "Qs Js Ts 2d 3c"
        #[arg(long, default_value = "")]
        board: String,
    },
    /// Start one hand and print the table snapshot as JSON
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2)]
        players: usize,
    },
    /// Play many hands through the table registry and check chip totals
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long, default_value_t = 3)]
        players: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Append hand records to this JSONL file
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

pub const COMMANDS: &[&str] = &["eval", "deal", "sim", "cfg"];
