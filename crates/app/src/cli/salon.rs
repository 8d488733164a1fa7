use clap::Args;
use jiff::tz::TimeZone;
use salon_app::{
    database::{self, Db},
    settings::{ResourceUuid, SalonSettings},
};
use uuid::Uuid;

/// Connection and salon identity shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct SalonArgs {
    #[command(flatten)]
    pub(crate) database: DatabaseArgs,

    /// Resource (stylist) appointments are scheduled for
    #[arg(long, env = "SALON_RESOURCE_UUID")]
    pub(crate) resource_uuid: Uuid,

    /// IANA time zone calendar dates are interpreted in
    #[arg(long, env = "SALON_TIME_ZONE", default_value = "UTC")]
    pub(crate) time_zone: String,

    /// ISO 4217 code deposits are charged in
    #[arg(long, env = "PAYMENTS_CURRENCY", default_value = "GBP")]
    pub(crate) currency: String,
}

impl SalonArgs {
    pub(crate) fn settings(&self) -> Result<SalonSettings, String> {
        let time_zone = TimeZone::get(&self.time_zone)
            .map_err(|error| format!("unknown time zone '{}': {error}", self.time_zone))?;

        Ok(SalonSettings::new(
            ResourceUuid::from_uuid(self.resource_uuid),
            time_zone,
            self.currency.clone(),
        ))
    }
}

/// Database connection only.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub(crate) database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        let pool = database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        Ok(Db::new(pool))
    }
}
