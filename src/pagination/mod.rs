//! Button-driven browsing over game lists.
//!
//! # Modules
//!
//! - `store` - Sessions binding a token to a game list and its cursor
//! - `navigation` - Control identifiers and index transitions
//!
//! A browsing command opens a session and renders its first page with a pair of
//! previous/next controls. Each control activation moves the session cursor by
//! one; moves past either end are rejected and leave the cursor unchanged.

mod navigation;
mod store;

use thiserror::Error;

pub use crate::pagination::navigation::{ControlId, Direction, navigation_controls};
pub use crate::pagination::store::{Page, PageView, SessionStore};

/// Failures of a control activation.
///
/// The display text is the transient notice shown to the clicking user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// The control identifier is not one of ours.
    #[error("Invalid button interaction.")]
    InvalidControl,
    /// The session expired or never existed.
    #[error("This game list has expired. Please request a new one.")]
    SessionNotFound,
    /// The move would leave the list.
    #[error("No more games to display.")]
    OutOfRange,
}
