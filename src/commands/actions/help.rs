//! Help command handler.
//!
//! Displays the command guide. This is a stateless command that always returns
//! the same help message, attributed to the requester.

use log::debug;

use crate::commands::{CommandContext, CommandResult, embed_response::format_help};

/// Returns the guide to every available command.
pub fn handle_help(context: &CommandContext) -> CommandResult {
    debug!("handling help command");

    CommandResult::embed(format_help(context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::actions::test_support::create_test_context;

    #[test]
    fn test_handle_help() {
        let context = create_test_context("2024-09-10T12:00:00Z");
        let result = handle_help(&context);

        let embed = result.as_embed().unwrap();
        assert_eq!(embed.title, "NFL Betting Bot Help");
        assert_eq!(embed.footer.as_deref(), Some("Requested by alice"));
        assert!(result.purge.is_none());
    }
}
