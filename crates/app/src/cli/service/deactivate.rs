use clap::Args;
use salon_app::domain::service_types::{
    PgServiceTypesService, ServiceTypesService, records::ServiceTypeUuid,
};
use uuid::Uuid;

use crate::cli::salon::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct DeactivateServiceArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Service type to withdraw from booking
    #[arg(long)]
    uuid: Uuid,
}

pub(crate) async fn run(args: DeactivateServiceArgs) -> Result<(), String> {
    let service = PgServiceTypesService::new(args.database.connect().await?);

    let updated = service
        .deactivate_service_type(ServiceTypeUuid::from_uuid(args.uuid))
        .await
        .map_err(|error| format!("failed to deactivate service type: {error}"))?;

    println!("service_type_uuid: {}", updated.uuid);
    println!("status: inactive");

    Ok(())
}
