//! Expiry sweeper use case

pub mod use_case;

#[cfg(test)]
mod tests;

pub use use_case::{ExpirySweeper, SweepReport};
