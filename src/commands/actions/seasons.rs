//! Season management handlers.
//!
//! Creation, membership, deletion and inspection of betting seasons. Each
//! handler issues a single gateway call.

use log::debug;

use crate::{
    commands::{
        CommandContext, CommandResult, NflCalendar,
        embed_response::{
            format_active_seasons, format_error, format_gateway_error, format_season_created,
            format_season_deleted, format_season_info, format_season_joined,
            format_season_not_found,
        },
    },
    gateway::Gateway,
};

/// Creates a season and shows its identifier with the requested parameters.
///
/// A success without identifier in the body is reported as a failure.
pub async fn handle_create_season<G: Gateway>(
    gateway: &G,
    start_week: i64,
    end_week: i64,
    initial_coins: i64,
    context: &CommandContext,
) -> CommandResult {
    debug!(
        "handling create_season command ({}, {}, {})",
        start_week, end_week, initial_coins
    );

    let embed = match gateway
        .create_season(start_week, end_week, initial_coins)
        .await
    {
        Ok(Some(season_id)) => {
            format_season_created(season_id, start_week, end_week, initial_coins, context)
        }
        Ok(None) => format_error(
            "Season Creation Failed",
            &["The server returned an empty response. Please try again."],
        ),
        Err(error) => format_gateway_error(
            "Season Creation Failed",
            "An error occurred while creating the season. Please try again.",
            &error,
        ),
    };

    CommandResult::embed(embed)
}

/// Registers the requester and adds them to the season in one call.
pub async fn handle_join_season<G: Gateway>(
    gateway: &G,
    season_id: i64,
    context: &CommandContext,
) -> CommandResult {
    debug!("handling join_season command for season {}", season_id);

    let embed = match gateway
        .create_user_and_join_season(&context.author_id, &context.author_name, season_id)
        .await
    {
        Ok(()) => format_season_joined(season_id, context),
        Err(error) => format_gateway_error(
            "Failed to Join Season",
            "An error occurred while joining the season. Please try again.",
            &error,
        ),
    };

    CommandResult::embed(embed)
}

/// Deletes a season.
///
/// Refusals of the API come back as a `deleted: false` outcome and are shown
/// with the API message.
pub async fn handle_delete_season<G: Gateway>(
    gateway: &G,
    season_id: i64,
    context: &CommandContext,
) -> CommandResult {
    debug!("handling delete_season command for season {}", season_id);

    let embed = match gateway.delete_season(season_id).await {
        Ok(outcome) if outcome.deleted => format_season_deleted(&outcome.message, context),
        Ok(outcome) => format_error("Failed to Delete Season", &[outcome.message]),
        Err(error) => format_gateway_error(
            "Failed to Delete Season",
            "An error occurred while deleting the season. Please try again.",
            &error,
        ),
    };

    CommandResult::embed(embed)
}

/// Shows the details of a season, its status and progress.
pub async fn handle_season_info<G: Gateway>(
    gateway: &G,
    calendar: &NflCalendar,
    season_id: i64,
    context: &CommandContext,
) -> CommandResult {
    debug!("handling season_info command for season {}", season_id);

    let embed = match gateway.get_season_by_id(season_id).await {
        Ok(Some(season)) => {
            format_season_info(&season, calendar.current_week(context.now), context)
        }
        Ok(None) => format_season_not_found(season_id, context),
        Err(error) if error.is_not_found() => format_season_not_found(season_id, context),
        Err(error) => format_gateway_error(
            "Failed to Retrieve Season Information",
            "An error occurred while retrieving season information. Please try again.",
            &error,
        ),
    };

    CommandResult::embed(embed)
}

/// Lists the seasons the API reports as active.
pub async fn handle_active_seasons<G: Gateway>(
    gateway: &G,
    calendar: &NflCalendar,
    context: &CommandContext,
) -> CommandResult {
    debug!("handling active_seasons command");

    let embed = match gateway.get_active_seasons().await {
        Ok(seasons) => {
            format_active_seasons(&seasons, calendar.current_week(context.now), context)
        }
        Err(error) => format_gateway_error(
            "Failed to Retrieve Active Seasons",
            "An error occurred while retrieving active seasons. Please try again.",
            &error,
        ),
    };

    CommandResult::embed(embed)
}
