//! App Router

use salvo::Router;

use crate::{
    appointments, auth, availability, blocked_dates, healthcheck, observability, payments,
    reminders, service_types, slots, subscriptions,
};

/// Routes that need no bearer token.
pub(crate) fn public_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("payments/webhook").post(payments::webhook::handler))
}

/// Routes resolved against the caller's bearer token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("service-types").get(service_types::index::handler))
        .push(Router::with_path("slots").get(slots::index::handler))
        .push(
            Router::with_path("appointments")
                .post(appointments::create::handler)
                .push(
                    Router::with_path("{appointment}")
                        .get(appointments::get::handler)
                        .push(Router::with_path("cancel").post(appointments::cancel::handler))
                        .push(Router::with_path("checkout").post(appointments::checkout::handler))
                        .push(Router::with_path("status").post(appointments::status::handler)),
                ),
        )
        .push(Router::with_path("reminders/{appointment}").post(reminders::deliver::handler))
        .push(
            Router::with_path("availability/{date}")
                .get(availability::get::handler)
                .put(availability::replace::handler),
        )
        .push(
            Router::with_path("blocked-dates")
                .post(blocked_dates::create::handler)
                .push(Router::with_path("{date}").delete(blocked_dates::delete::handler)),
        )
        .push(Router::with_path("subscriptions").post(subscriptions::create::handler))
}
