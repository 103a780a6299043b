mod guests;
mod layout;
mod reports;
mod routes;
mod rsvp;
mod search;
mod system;
