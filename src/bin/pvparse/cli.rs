use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pvparse",
    about = "Parse molecular-dynamics output for physical validation",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse the output of a HOOMD-blue run (metadata, GSD trajectory, log)
    #[command(visible_alias = "h")]
    Hoomd(HoomdArgs),
}

#[derive(Args)]
pub struct HoomdArgs {
    /// Metadata JSON written by hoomd.meta.dump_metadata
    #[arg(long, value_name = "FILE")]
    pub meta: PathBuf,

    /// GSD trajectory
    #[arg(long, value_name = "FILE")]
    pub gsd: PathBuf,

    /// Thermodynamic log written by hoomd.analyze.log
    #[arg(long, value_name = "FILE")]
    pub log: PathBuf,

    /// Parser settings (TOML file)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write a JSON summary to stdout
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
