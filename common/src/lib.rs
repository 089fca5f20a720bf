//! Shared model and client-side logic for the timetable publisher.
//!
//! Everything here is plain Rust with no browser or server dependency, so the
//! state machines that the Yew frontend drives can be exercised natively.

pub mod error;
pub mod model;
pub mod notifications;
pub mod requests;
pub mod service;
pub mod session;
pub mod shell;
