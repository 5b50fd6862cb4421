//! Actor value object - explicit caller identity
//!
//! Identity is always passed into lifecycle calls as a parameter; the engine
//! never reads an ambient security context.

use serde::{Deserialize, Serialize};

use super::ids::CustomerId;

/// Role of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Guest,
    Specialist,
    Staff,
    Admin,
}

impl Role {
    /// Staff and admins may override timing and ownership guards
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Staff | Role::Admin)
    }
}

/// The caller of a lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: u64,
    pub role: Role,
}

impl Actor {
    pub fn new(id: u64, role: Role) -> Self {
        Self { id, role }
    }

    pub fn customer(id: CustomerId) -> Self {
        Self::new(id, Role::Customer)
    }

    pub fn specialist(id: u64) -> Self {
        Self::new(id, Role::Specialist)
    }

    pub fn staff(id: u64) -> Self {
        Self::new(id, Role::Staff)
    }

    pub fn admin(id: u64) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}
