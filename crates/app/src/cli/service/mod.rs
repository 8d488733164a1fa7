use clap::{Args, Subcommand};

mod create;
mod deactivate;
mod list;

#[derive(Debug, Args)]
pub(crate) struct ServiceCommand {
    #[command(subcommand)]
    command: ServiceSubcommand,
}

#[derive(Debug, Subcommand)]
enum ServiceSubcommand {
    Create(create::CreateServiceArgs),
    List(list::ListServicesArgs),
    Deactivate(deactivate::DeactivateServiceArgs),
}

pub(crate) async fn run(command: ServiceCommand) -> Result<(), String> {
    match command.command {
        ServiceSubcommand::Create(args) => create::run(args).await,
        ServiceSubcommand::List(args) => list::run(args).await,
        ServiceSubcommand::Deactivate(args) => deactivate::run(args).await,
    }
}
