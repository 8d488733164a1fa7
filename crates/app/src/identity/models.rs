//! Identity models.

use salon::status::Actor;

use crate::uuids::TypedUuid;

/// A customer account held by the identity provider.
#[derive(Debug)]
pub struct Customer;

/// Customer UUID
pub type CustomerUuid = TypedUuid<Customer>;

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Account the token belongs to.
    pub customer: CustomerUuid,

    /// Contact address, when the provider shares one.
    pub email: Option<String>,

    /// Whether the caller administers the salon.
    pub is_admin: bool,
}

impl Principal {
    /// A customer principal.
    #[must_use]
    pub fn customer(customer: CustomerUuid) -> Self {
        Self {
            customer,
            email: None,
            is_admin: false,
        }
    }

    /// An administrator principal.
    #[must_use]
    pub fn admin(customer: CustomerUuid) -> Self {
        Self {
            customer,
            email: None,
            is_admin: true,
        }
    }

    /// Role the caller acts in for status changes.
    #[must_use]
    pub fn actor(&self) -> Actor {
        if self.is_admin {
            Actor::Administrator
        } else {
            Actor::Customer
        }
    }

    /// Whether the caller may read or change a record owned by `owner`.
    #[must_use]
    pub fn can_access(&self, owner: CustomerUuid) -> bool {
        self.is_admin || self.customer == owner
    }
}
