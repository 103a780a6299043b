pub mod guest_groups;
pub mod guests;
pub mod settings;
pub mod wedding_tables;

pub use guest_groups::GroupDetails;
pub use guests::{CreateGuest, GuestFilter, NamePair, RsvpStatus, UpdateGuest};
