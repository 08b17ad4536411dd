//! Leaderboard command handler.
//!
//! Ranks the participants of a season by decreasing coins. Users with the same
//! balance keep the order the API returned them in.

use log::debug;

use crate::{
    commands::{
        CommandContext, CommandResult,
        embed_response::{format_gateway_error, format_leaderboard},
    },
    gateway::{Gateway, User},
};

/// Sorts users by decreasing coins and finds the one-based rank of `discord_id`.
fn rank_users(mut users: Vec<User>, discord_id: &str) -> (Vec<User>, Option<usize>) {
    // Stable, so ties keep their upstream order
    users.sort_by(|a, b| b.coins.cmp(&a.coins));

    let rank = users
        .iter()
        .position(|user| user.discord_id.as_deref() == Some(discord_id))
        .map(|index| index + 1);

    (users, rank)
}

/// Shows the top of the season, and the rank of the requester when below it.
pub async fn handle_leaderboard<G: Gateway>(
    gateway: &G,
    season_id: i64,
    context: &CommandContext,
) -> CommandResult {
    debug!("handling leaderboard command for season {}", season_id);

    let embed = match gateway.get_users_by_season(season_id).await {
        Ok(users) => {
            let (ranked, requester_rank) = rank_users(users, &context.author_id);
            format_leaderboard(season_id, &ranked, requester_rank, context)
        }
        Err(error) => format_gateway_error(
            "Failed to Retrieve Leaderboard",
            "An error occurred while retrieving the leaderboard. Please try again.",
            &error,
        ),
    };

    CommandResult::embed(embed)
}
