// Each domain contains: mod.rs, resolvers.rs, types.rs, and service.rs where
// the logic is more than a repository call.

pub mod groups;
pub mod guests;
pub mod layout;
pub mod reports;
pub mod rsvp;
pub mod search;
pub mod seating;
