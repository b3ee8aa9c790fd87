//! Utility functions

pub mod prize;
pub mod validation;

pub use prize::parse_amount;
pub use validation::{validate_email, validate_password, validate_team_mode};
