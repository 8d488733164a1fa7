use clap::Args;
use salon_app::domain::service_types::{
    PgServiceTypesService, ServiceTypesService, data::NewServiceType, records::ServiceTypeUuid,
};
use uuid::Uuid;

use crate::cli::salon::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateServiceArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Display name
    #[arg(long)]
    name: String,

    /// Grouping shown to customers
    #[arg(long, default_value = "")]
    category: String,

    /// Length of the appointment in minutes
    #[arg(long)]
    duration_minutes: u32,

    /// Price in minor currency units
    #[arg(long)]
    price: u64,

    /// Optional service type UUID; generated when omitted
    #[arg(long)]
    uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateServiceArgs) -> Result<(), String> {
    let service = PgServiceTypesService::new(args.database.connect().await?);

    let created = service
        .create_service_type(NewServiceType {
            uuid: args
                .uuid
                .map_or_else(ServiceTypeUuid::new, ServiceTypeUuid::from_uuid),
            name: args.name,
            category: args.category,
            duration_minutes: args.duration_minutes,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create service type: {error}"))?;

    println!("service_type_uuid: {}", created.uuid);
    println!("name: {}", created.name);
    println!("duration_minutes: {}", created.duration_minutes);
    println!("price: {}", created.price);
    println!("deposit: {}", created.deposit());

    Ok(())
}
