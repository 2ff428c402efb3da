//! Command handlers, one module per subcommand.

pub mod move_group;
pub mod stale_lte;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

use self::util::Context;

pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::MoveGroup(args) => move_group::handle(args, ctx, global).await,
        Command::StaleLte(args) => stale_lte::handle(args, ctx, global).await,
    }
}
