//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler receives the
//! validated arguments and a [`CommandContext`](crate::commands::CommandContext),
//! calls the [`Gateway`](crate::gateway::Gateway) in sequence, and returns a
//! [`CommandResult`](crate::commands::CommandResult).
//!
//! # Handler Pattern
//!
//! Handlers follow a consistent pattern:
//! 1. Receive arguments already checked for arity and type
//! 2. Chain gateway calls and domain checks, stopping at the first failure
//! 3. Render exactly one response, success or error
//!
//! # Available Handlers
//!
//! - [`handle_help`] - Display help information
//! - [`handle_create_season`], [`handle_join_season`], [`handle_delete_season`],
//!   [`handle_season_info`], [`handle_active_seasons`] - Season management
//! - [`handle_bet`], [`handle_my_bets`], [`handle_balance`] - Betting
//! - [`handle_leaderboard`] - Ranking of a season
//! - [`handle_nfl_weeks`], [`handle_nfl_games`], [`handle_team_schedule`] - NFL data,
//!   the last two opening a pagination session
//! - [`handle_purge`] - Request deletion of recent messages
//!
//! # Side Effects
//!
//! Handlers never touch the channel. A purge is requested through the `purge`
//! field of the [`CommandResult`](crate::commands::CommandResult).

mod betting;
mod help;
mod leaderboard;
mod nfl;
mod purge;
mod seasons;

pub use crate::commands::actions::{
    betting::{handle_balance, handle_bet, handle_my_bets},
    help::handle_help,
    leaderboard::handle_leaderboard,
    nfl::{handle_nfl_games, handle_nfl_weeks, handle_team_schedule},
    purge::handle_purge,
    seasons::{
        handle_active_seasons, handle_create_season, handle_delete_season, handle_join_season,
        handle_season_info,
    },
};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Utc};

    use crate::commands::CommandContext;

    /// Context of `alice` (id `42`) at a fixed instant.
    pub fn create_test_context(now: &str) -> CommandContext {
        CommandContext {
            author_id: "42".to_string(),
            author_name: "alice".to_string(),
            can_manage_messages: false,
            now: now.parse::<DateTime<Utc>>().unwrap(),
        }
    }
}
