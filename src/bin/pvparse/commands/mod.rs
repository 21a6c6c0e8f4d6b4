mod hoomd;

use hoomd::run_hoomd;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Hoomd(args) => run_hoomd(args, ctx),
    }
}
