use clap::Args;
use salon_app::domain::service_types::{PgServiceTypesService, ServiceTypesService};

use crate::cli::salon::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListServicesArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Include deactivated service types
    #[arg(long)]
    all: bool,
}

pub(crate) async fn run(args: ListServicesArgs) -> Result<(), String> {
    let service = PgServiceTypesService::new(args.database.connect().await?);

    let service_types = service
        .list_service_types(args.all)
        .await
        .map_err(|error| format!("failed to list service types: {error}"))?;

    if service_types.is_empty() {
        println!("no service types found");
        return Ok(());
    }

    for service_type in service_types {
        println!("service_type_uuid: {}", service_type.uuid);
        println!("name: {}", service_type.name);
        println!("category: {}", service_type.category);
        println!("duration_minutes: {}", service_type.duration_minutes);
        println!("price: {}", service_type.price);
        println!("deposit: {}", service_type.deposit());
        println!(
            "status: {}",
            if service_type.active { "active" } else { "inactive" }
        );
        println!();
    }

    Ok(())
}
