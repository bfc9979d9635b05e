use clap::{Args, Subcommand};

mod clean;

#[derive(Debug, Args)]
pub(crate) struct CartsCommand {
    #[command(subcommand)]
    command: CartsSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartsSubcommand {
    /// Delete carts idle for more than a week
    Clean(clean::CleanArgs),
}

pub(crate) async fn run(command: CartsCommand) -> Result<(), String> {
    match command.command {
        CartsSubcommand::Clean(args) => clean::run(args).await,
    }
}
