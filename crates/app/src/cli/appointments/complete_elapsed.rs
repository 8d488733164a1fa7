use std::{sync::Arc, time::Duration};

use clap::Args;
use jiff::Timestamp;
use salon_app::{
    domain::{
        appointments::{AppointmentsService, PgAppointmentsService},
        reminders::ReminderScheduler,
        subscriptions::NotificationDispatcher,
    },
    notifications::{HttpNotifier, HttpNotifierConfig, Notifier},
};

use crate::cli::salon::SalonArgs;

#[derive(Debug, Args)]
pub(crate) struct CompleteElapsedArgs {
    #[command(flatten)]
    salon: SalonArgs,

    /// Notification service address
    #[arg(long, env = "NOTIFICATIONS_ADDR", default_value = "http://localhost:8400")]
    notifications_addr: String,

    /// Notification service API key
    #[arg(long, env = "NOTIFICATIONS_API_KEY", hide_env_values = true, default_value = "")]
    notifications_api_key: String,

    /// Seconds to wait on each notification service request
    #[arg(long, env = "NOTIFICATIONS_TIMEOUT_SECONDS", default_value_t = 5)]
    notifications_timeout_seconds: u64,

    /// Completion cut-off; defaults to now
    #[arg(long)]
    now: Option<Timestamp>,
}

pub(crate) async fn run(args: CompleteElapsedArgs) -> Result<(), String> {
    let db = args.salon.database.connect().await?;
    let settings = args.salon.settings()?;

    let notifier = HttpNotifier::new(HttpNotifierConfig {
        addr: args.notifications_addr,
        api_key: args.notifications_api_key,
        timeout: Duration::from_secs(args.notifications_timeout_seconds),
    })
    .map_err(|error| format!("failed to build notifications client: {error}"))?;

    let notifier: Arc<dyn Notifier> = Arc::new(notifier);

    let service = PgAppointmentsService::new(
        db.clone(),
        settings.clone(),
        NotificationDispatcher::new(db, Arc::clone(&notifier)),
        ReminderScheduler::new(settings.reminders, notifier),
    );

    let completed = service
        .complete_elapsed(args.now.unwrap_or_else(Timestamp::now))
        .await
        .map_err(|error| format!("failed to complete appointments: {error}"))?;

    println!("completed: {}", completed.len());

    for appointment in completed {
        println!("appointment_uuid: {}", appointment.uuid);
    }

    Ok(())
}
