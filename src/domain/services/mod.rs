//! Domain services - pure business logic, no I/O

pub mod checkout_gate;
pub mod selector;

pub use checkout_gate::CheckoutGate;
pub use selector::{SelectionPolicy, SpecialistSelector};
