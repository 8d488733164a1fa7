use clap::{Parser, Subcommand};

mod appointments;
mod salon;
mod service;

#[derive(Debug, Parser)]
#[command(name = "salon-app", about = "Salon booking administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage bookable service types
    Service(service::ServiceCommand),

    /// Maintain appointments
    Appointments(appointments::AppointmentsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Service(command) => service::run(command).await,
            Commands::Appointments(command) => appointments::run(command).await,
        }
    }
}
