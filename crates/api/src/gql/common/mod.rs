pub mod helpers;
pub mod types;
pub mod validation;

pub use types::{Group, Guest, RsvpStatus};
