//! Bot command parsing, dispatch and response rendering.
//!
//! # Overview
//!
//! The commands module handles the lifecycle of a chat command:
//! 1. **Parsing** - Splitting the message into a verb and argument tokens
//! 2. **Validation** - Checking arity and argument types before any network call
//! 3. **Execution** - Routing the command to its handler, which calls the gateway
//! 4. **Response** - Rendering the outcome as a structured [`Embed`]
//!
//! Navigation controls attached to paginated responses are routed through the
//! same [`Commander`].
//!
//! # Architecture
//!
//! ```text
//! Chat message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← parse() + dispatch() + handle_control()
//! └─────────────┘
//!      │
//!      ├── parse() ───────────────► ParsedCommand
//!      │
//!      └── dispatch() ──┐
//!                       ▼
//!            ┌──────────────────────┐
//!            │ Action Handlers      │
//!            │  - seasons           │
//!            │  - betting           │
//!            │  - leaderboard       │
//!            │  - nfl (paginated)   │
//!            │  - help, purge       │
//!            └──────────────────────┘
//!                       │
//!                       ▼
//!            ┌──────────────────────┐
//!            │  CommandResult       │
//!            │  - response          │
//!            │  - purge request     │
//!            └──────────────────────┘
//! ```
//!
//! # Error Handling
//!
//! - [`NotACommand`]: the message does not start with `!` and is ignored silently.
//! - Usage errors: wrong arity or argument types, rendered with usage and example.
//! - [`DomainError`]: a business rule rejected the command.
//! - Gateway errors: rendered with a short diagnostic line, never the upstream body.
//!
//! # Module Organization
//!
//! - [`commander`] - Entry point routing verbs and controls
//! - [`command`] - Verb table and argument validation
//! - [`actions`] - Command handlers
//! - [`embed`] - Structured response type
//! - [`embed_response`] - Response formatting
//! - [`calendar`] - NFL week arithmetic

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::gateway::GatewayError;

mod actions;
mod calendar;
mod command;
mod commander;
mod embed;
mod embed_response;

pub use crate::commands::calendar::NflCalendar;
pub use crate::commands::command::NotACommand;
pub use crate::commands::commander::Commander;
pub use crate::commands::embed::{Control, Embed};

/// Who issued a command, and when.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Platform identifier of the author
    pub author_id: String,
    /// Display name of the author, used in footers and for user creation
    pub author_name: String,
    /// Whether the platform grants the author the manage-messages permission
    pub can_manage_messages: bool,
    /// Instant the command is handled at
    pub now: DateTime<Utc>,
}

/// What the platform should show.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    /// A new structured message
    Embed { embed: Embed },
    /// A new plain text message
    Text { text: String },
    /// Replaces the message the activated control belongs to
    Update { embed: Embed },
    /// A transient message only the activating user sees
    Notice { text: String },
}

/// Result of command execution.
///
/// Handlers never touch the channel. Side effects on it, like purging
/// messages, are requested through this structure and applied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    pub response: Response,
    /// Number of recent messages to delete before posting the response
    pub purge: Option<u32>,
    /// Delete the response itself after this many seconds
    pub delete_after_secs: Option<u64>,
}

impl CommandResult {
    pub fn embed(embed: Embed) -> Self {
        CommandResult {
            response: Response::Embed { embed },
            purge: None,
            delete_after_secs: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        CommandResult {
            response: Response::Text { text: text.into() },
            purge: None,
            delete_after_secs: None,
        }
    }

    /// The embed of the response, if it is one.
    #[cfg(test)]
    pub fn as_embed(&self) -> Option<&Embed> {
        match &self.response {
            Response::Embed { embed } | Response::Update { embed } => Some(embed),
            _ => None,
        }
    }
}

/// Business rules rejecting a command after its arguments were validated.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("Invalid bet type. Must be HOME or AWAY.")]
    InvalidBetType,
    #[error("Bet amount must be a positive number of coins.")]
    InvalidAmount,
    #[error("Failed to create or retrieve user. Please try again.")]
    UserUnavailable,
    #[error("Game not found. Please check the game ID.")]
    GameNotFound,
    #[error("Failed to retrieve game details. Please try again.")]
    GameUnavailable,
    #[error("The game data is missing the start time. Please try again later.")]
    MissingStartTime,
    #[error("Betting is closed for this game as it has already started.")]
    GameAlreadyStarted {
        home_team: String,
        away_team: String,
        commence_time: DateTime<Utc>,
    },
    #[error("Failed to retrieve your balance. Please try again.")]
    BalanceUnavailable,
    #[error("Not enough coins to place bet. You have {balance} coins.")]
    InsufficientFunds { balance: i64 },
    #[error("Failed to place the bet. Please try again.")]
    BetNotPlaced,
    #[error("Failed to retrieve season information. Please try again.")]
    SeasonUnavailable,
}

/// Failure of a handler step.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
