use clap::{Args, Subcommand};

mod complete_elapsed;

#[derive(Debug, Args)]
pub(crate) struct AppointmentsCommand {
    #[command(subcommand)]
    command: AppointmentsSubcommand,
}

#[derive(Debug, Subcommand)]
enum AppointmentsSubcommand {
    /// Mark paid appointments that have ended as completed
    CompleteElapsed(complete_elapsed::CompleteElapsedArgs),
}

pub(crate) async fn run(command: AppointmentsCommand) -> Result<(), String> {
    match command.command {
        AppointmentsSubcommand::CompleteElapsed(args) => complete_elapsed::run(args).await,
    }
}
