//! Purge command handler.
//!
//! The manage-messages permission is checked by the commander before any
//! argument validation; this handler only bounds the count and requests the
//! deletion from the platform.

use log::debug;

use crate::commands::{
    CommandContext, CommandResult, Response,
    embed_response::{format_channel_cleared, format_purge_out_of_range},
};

/// Most messages a single purge may delete.
pub const MAX_MESSAGES_TO_DELETE: i64 = 100;

/// Seconds the confirmation stays in the channel.
const CONFIRMATION_LIFETIME_SECS: u64 = 5;

/// Requests the deletion of the `count` most recent messages.
///
/// Counts outside `1..=100` are answered in plain text without any purge.
pub fn handle_purge(count: i64, context: &CommandContext) -> CommandResult {
    debug!("handling purge command with count {}", count);

    if !(1..=MAX_MESSAGES_TO_DELETE).contains(&count) {
        return CommandResult::text(format_purge_out_of_range(MAX_MESSAGES_TO_DELETE));
    }

    CommandResult {
        response: Response::Embed {
            embed: format_channel_cleared(count, context),
        },
        // Bounded by the range check above
        purge: u32::try_from(count).ok(),
        delete_after_secs: Some(CONFIRMATION_LIFETIME_SECS),
    }
}
