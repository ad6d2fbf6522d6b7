//! Request-independent business logic
//!
//! Each service takes the store (and provider) it needs as arguments so tests
//! can run it against a temporary database.

pub mod admin;
pub mod gifts;
pub mod guest_session;
pub mod guestbook;
pub mod rsvp;
pub mod upload;

pub use guest_session::LoginOutcome;
pub use rsvp::{RsvpOutcome, RsvpSubmission, StatusUpdate};
