//! Catalog port - services, specialists and customers
//!
//! Read-mostly directory the lifecycle consults during validation. The only
//! write path is guest-profile creation.

use anyhow::Result;

use crate::domain::entities::{Customer, ServiceItem, Specialist};
use crate::domain::value_objects::{CustomerId, ServiceId, SpecialistId};

/// Abstract directory of services, specialists and customers
pub trait Catalog: Send + Sync {
    /// Resolve service ids, preserving request order; missing ids are
    /// simply absent from the result
    fn services(&self, ids: &[ServiceId]) -> Result<Vec<ServiceItem>>;

    fn specialist(&self, id: SpecialistId) -> Result<Option<Specialist>>;

    /// All ACTIVE specialists in ascending-id order
    fn active_specialists(&self) -> Result<Vec<Specialist>>;

    fn customer(&self, id: CustomerId) -> Result<Option<Customer>>;

    fn customer_by_email(&self, email: &str) -> Result<Option<Customer>>;

    /// Insert a customer record, assigning its id; returns the stored copy
    fn create_customer(&self, customer: Customer) -> Result<Customer>;
}
