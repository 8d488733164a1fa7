//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use salon_app::identity::Principal;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}

/// Access to the caller resolved by the auth middleware.
pub(crate) trait PrincipalDepotExt {
    fn insert_principal(&mut self, principal: Principal);

    fn principal_or_401(&self) -> Result<Principal, StatusError>;

    /// The caller, when they administer the salon.
    fn admin_or_403(&self) -> Result<Principal, StatusError>;
}

impl PrincipalDepotExt for Depot {
    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<Principal, StatusError> {
        self.obtain::<Principal>()
            .cloned()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn admin_or_403(&self) -> Result<Principal, StatusError> {
        let principal = self.principal_or_401()?;

        if !principal.is_admin {
            return Err(StatusError::forbidden().brief("Administrator access required"));
        }

        Ok(principal)
    }
}
