//! Customer entity and guest profiles

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CustomerId, Role};
use crate::error::{BookingError, BookingResult};

/// A registered customer or a temporary guest profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
}

impl Customer {
    pub fn registered(id: CustomerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: None,
            role: Role::Customer,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.role == Role::Guest
    }
}

/// Contact details supplied with a guest booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestProfile {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl GuestProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Reject empty names and emails that cannot possibly be addresses
    pub fn validate(&self) -> BookingResult<()> {
        if self.name.trim().is_empty() {
            return Err(BookingError::InvalidGuestName);
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(BookingError::InvalidGuestEmail {
                email: self.email.clone(),
            });
        }
        Ok(())
    }

    /// The temporary customer record a guest booking creates
    pub fn into_customer(self) -> Customer {
        Customer {
            id: 0,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: Role::Guest,
        }
    }
}
