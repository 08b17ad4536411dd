//! Response formatters for bot commands.
//!
//! Every user-visible text lives here. Field names and their order are part of
//! what the platform relay renders, so they are kept stable.

use log::warn;

use crate::{
    commands::{
        CommandContext, DomainError, HandlerError, Response,
        calendar::{NflCalendar, SeasonStatus, format_day, format_kickoff},
        command::{UsageError, Verb},
        embed::{Category, Embed},
    },
    gateway::{Bet, BetType, Game, GatewayError, Season, User},
    pagination::{Page, PageView, navigation_controls},
};

/// Number of ranked users shown on a leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

/// Formats a response for an unknown command.
///
/// # Examples
///
/// ```
/// let msg = format_unknown_command();
/// assert!(msg.contains("Unknown command"));
/// ```
pub fn format_unknown_command() -> String {
    "Unknown command. Type !help for a list of commands.".to_owned()
}

pub fn format_missing_permission() -> String {
    "You do not have permission to use this command.".to_owned()
}

pub fn format_purge_out_of_range(max: i64) -> String {
    format!("Please provide a number between 1 and {}.", max)
}

/// Formats an error embed.
///
/// Each line becomes a field without name, in order.
///
/// # Arguments
///
/// * `title` - What failed; rendered as `Error: <title>`
/// * `lines` - Explanations, one per field
pub fn format_error<S: AsRef<str>>(title: &str, lines: &[S]) -> Embed {
    lines.iter().fold(
        Embed::new(format!("Error: {}", title), Category::Error),
        |embed, line| embed.field("", line.as_ref()),
    )
}

/// Formats a usage error.
///
/// Wrong arity shows the syntax, an example and any note; a badly typed
/// argument shows a hint first. `purge` answers in plain text.
pub fn format_usage_error(error: &UsageError) -> Response {
    match error {
        UsageError::Arity(verb) => {
            let syntax = verb.syntax();
            let mut lines = vec![
                format!("Usage: `{}`", syntax.usage),
                format!("Example: `{}`", syntax.example),
            ];
            lines.extend(syntax.notes.iter().map(|note| note.to_string()));

            Response::Embed {
                embed: format_error("Invalid Command Usage", &lines),
            }
        }
        UsageError::InvalidArgument(Verb::Purge) => Response::Text {
            text: Verb::Purge.syntax().invalid_hint.to_owned(),
        },
        UsageError::InvalidArgument(verb) => {
            let syntax = verb.syntax();
            let lines = [
                syntax.invalid_hint.to_owned(),
                format!("Correct Usage: `{}`", syntax.usage),
                format!("Example: `{}`", syntax.example),
            ];

            Response::Embed {
                embed: format_error(syntax.invalid_title, &lines),
            }
        }
    }
}

/// Formats a business rule violation.
pub fn format_domain_error(error: &DomainError) -> Embed {
    let message = error.to_string();

    match error {
        DomainError::InvalidBetType => {
            format_error("Invalid Input", &[message.as_str(), "Valid Bet Types: HOME, AWAY"])
        }
        DomainError::InvalidAmount
        | DomainError::GameNotFound
        | DomainError::InsufficientFunds { .. } => format_error("Invalid Input", &[message]),
        DomainError::UserUnavailable => format_error("User Creation Failed", &[message]),
        DomainError::GameUnavailable => format_error("Game Details Retrieval Failed", &[message]),
        DomainError::MissingStartTime => format_error("Invalid Game Data", &[message]),
        DomainError::GameAlreadyStarted {
            home_team,
            away_team,
            commence_time,
        } => format_error(
            "Game Already Started",
            &[
                message,
                format!("Game: {} vs {}", home_team, away_team),
                format!("Start Time: {}", commence_time.to_rfc3339()),
            ],
        ),
        DomainError::BalanceUnavailable => format_error("Balance Retrieval Failed", &[message]),
        DomainError::BetNotPlaced => format_error("Bet Placement Failed", &[message]),
        DomainError::SeasonUnavailable => format_error("Season Info Retrieval Failed", &[message]),
    }
}

/// Formats a gateway failure with a short diagnostic line.
///
/// # Arguments
///
/// * `title` - What failed
/// * `summary` - Sentence explaining the failure to the user
/// * `error` - The gateway failure; only its diagnostic is shown
pub fn format_gateway_error(title: &str, summary: &str, error: &GatewayError) -> Embed {
    warn!("{}: {}", title, error);

    format_error(
        title,
        &[
            summary.to_owned(),
            format!("Error Details: {}", error.diagnostic()),
        ],
    )
}

/// Formats the failure of a multi-step handler.
pub fn format_handler_error(title: &str, summary: &str, error: &HandlerError) -> Embed {
    match error {
        HandlerError::Domain(error) => format_domain_error(error),
        HandlerError::Gateway(error) => format_gateway_error(title, summary, error),
    }
}

/// Footer naming the requester.
fn requested_by(context: &CommandContext) -> String {
    format!("Requested by {}", context.author_name)
}

pub fn format_season_created(
    season_id: i64,
    start_week: i64,
    end_week: i64,
    initial_coins: i64,
    context: &CommandContext,
) -> Embed {
    Embed::new("Season Created Successfully", Category::Success)
        .description("A new season has been created with the following details:")
        .inline_field("Season ID", season_id.to_string())
        .inline_field("Start Week", start_week.to_string())
        .inline_field("End Week", end_week.to_string())
        .inline_field("Initial Coins", initial_coins.to_string())
        .footer(format!("Created by {}", context.author_name))
        .timestamp(context.now)
}

pub fn format_season_joined(season_id: i64, context: &CommandContext) -> Embed {
    Embed::new("Successfully Joined Season", Category::Success)
        .description("You have successfully joined the season!")
        .inline_field("Season ID", season_id.to_string())
        .footer(format!("Joined by {}", context.author_name))
        .timestamp(context.now)
}

pub fn format_season_deleted(message: &str, context: &CommandContext) -> Embed {
    Embed::new("Season Deleted Successfully", Category::Success)
        .description(message)
        .footer(format!("Deleted by {}", context.author_name))
        .timestamp(context.now)
}

/// Formats a placed bet.
///
/// The game is listed away team first, the backed team and its odds follow
/// the bet type.
pub fn format_bet_placed(
    bet_id: i64,
    season_id: i64,
    game: &Game,
    bet_type: BetType,
    amount: i64,
    context: &CommandContext,
) -> Embed {
    let (team, odds) = match bet_type {
        BetType::Home => (&game.home_team, game.home_odds),
        BetType::Away => (&game.away_team, game.away_odds),
    };

    Embed::new("Bet Placed Successfully", Category::Success)
        .description(format!(
            "Your bet on the {} has been placed successfully!",
            team
        ))
        .field(
            "Bet Details",
            format!("Bet ID: {} | Season ID: {}", bet_id, season_id),
        )
        .field("Game", format!("{} vs {}", game.away_team, game.home_team))
        .inline_field("Bet Amount", format!("{} coins", amount))
        .inline_field("Bet Type", bet_type.as_str())
        .inline_field("Odds", format_odds(odds))
        .footer(format!("Placed by {}", context.author_name))
        .timestamp(context.now)
}

/// Formats the bets of the requester, or an empty state.
pub fn format_bets(season_id: i64, bets: &[Bet], context: &CommandContext) -> Embed {
    if bets.is_empty() {
        return Embed::new("No Bets Found", Category::Info)
            .description("You haven't placed any bets in this season yet.")
            .footer(format!("Season ID: {}", season_id))
            .timestamp(context.now);
    }

    bets.iter()
        .fold(
            Embed::new(format!("Your Bets for Season {}", season_id), Category::Success)
                .description("Here's a list of your bets for this season:"),
            |embed, bet| {
                embed.field(
                    format!("Bet ID: {}", bet.id),
                    format!(
                        "{} vs {}\nBet: {} coins on the {}\nResult: {}",
                        bet.home_team,
                        bet.away_team,
                        bet.amount,
                        bet.backed_team(),
                        bet.outcome()
                    ),
                )
            },
        )
        .footer(requested_by(context))
        .timestamp(context.now)
}

/// Mood line comparing a balance to the initial coins of its season.
fn balance_mood(balance: i64, initial_coins: i64) -> &'static str {
    if balance > initial_coins * 2 {
        "Wow! You're on fire! 🔥"
    } else if balance > initial_coins {
        "Nice job! You're in the green. 💰"
    } else if balance == initial_coins {
        "Breaking even. Slow and steady! 🐢"
    } else if balance > initial_coins / 2 {
        "Hang in there, you can turn this around! 💪"
    } else {
        "Ouch! Time to change up your strategy? 🤔"
    }
}

pub fn format_balance(season: &Season, balance: i64, context: &CommandContext) -> Embed {
    Embed::new(format!("Balance for Season {}", season.id), Category::Highlight)
        .description("Here's your current balance for this season:")
        .field("Current Balance", format!("{} coins", balance))
        .inline_field("Initial Balance", format!("{} coins", season.initial_coins))
        .inline_field(
            "Net Change",
            format!("{} coins", balance - season.initial_coins),
        )
        .field(
            "Season Duration",
            format!("Week {} to Week {}", season.start_week, season.end_week),
        )
        .field("Status", balance_mood(balance, season.initial_coins))
        .footer(requested_by(context))
        .timestamp(context.now)
}

fn medal(rank: usize) -> &'static str {
    match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "🏅",
    }
}

/// Formats a leaderboard.
///
/// # Arguments
///
/// * `season_id` - Season the leaderboard belongs to
/// * `ranked` - Users sorted by decreasing coins
/// * `requester_rank` - One-based rank of the requester, if they take part
/// * `context` - Requester and time of the request
///
/// Only the top [`LEADERBOARD_SIZE`] users are listed. A requester ranked below
/// them gets an extra `Your Position` field.
pub fn format_leaderboard(
    season_id: i64,
    ranked: &[User],
    requester_rank: Option<usize>,
    context: &CommandContext,
) -> Embed {
    if ranked.is_empty() {
        return Embed::new("No Users Found", Category::Info)
            .description("There are no users participating in this season yet.")
            .footer(format!("Season ID: {}", season_id))
            .timestamp(context.now);
    }

    let mut embed = ranked.iter().take(LEADERBOARD_SIZE).enumerate().fold(
        Embed::new(format!("Leaderboard for Season {}", season_id), Category::Highlight)
            .description("Here are the top performers for this season:"),
        |embed, (index, user)| {
            let rank = index + 1;
            embed.field(
                format!("{}.", rank),
                format!("{} **{}**\nCoins: {}", medal(rank), user.username, user.coins),
            )
        },
    );

    let requester = requester_rank
        .filter(|rank| *rank > LEADERBOARD_SIZE)
        .and_then(|rank| ranked.get(rank - 1).map(|user| (rank, user)));
    if let Some((rank, user)) = requester {
        embed = embed.field(
            format!("Your Position: {}", rank),
            format!("**{}**\nCoins: {}", user.username, user.coins),
        );
    }

    embed.footer(requested_by(context)).timestamp(context.now)
}

/// Ten-segment progress bar.
fn progress_bar(percentage: i64) -> String {
    let filled = percentage / 10;
    (0..10)
        .map(|segment| if segment < filled { '█' } else { '░' })
        .collect()
}

pub fn format_season_not_found(season_id: i64, context: &CommandContext) -> Embed {
    Embed::new("Season Not Found", Category::Warning)
        .description(format!("No season found with ID: {}", season_id))
        .timestamp(context.now)
}

pub fn format_season_info(season: &Season, current_week: i64, context: &CommandContext) -> Embed {
    let status = SeasonStatus::of(season, current_week);
    let created_on = season
        .created_at
        .map(format_day)
        .unwrap_or_else(|| "Unknown".to_owned());

    let embed = Embed::new("Season Information", Category::Info)
        .description(format!("Details for Season ID: {}", season.id))
        .inline_field("Start Week", season.start_week.to_string())
        .inline_field("End Week", season.end_week.to_string())
        .inline_field("Duration", format!("{} weeks", season.duration_weeks()))
        .inline_field("Initial Coins", format!("{} coins", season.initial_coins))
        .inline_field("Created On", created_on)
        .inline_field("Status", status.to_string());

    let embed = match SeasonStatus::progress(season, current_week) {
        Some(progress) => embed.field(
            "Progress",
            format!("{} {}%", progress_bar(progress), progress),
        ),
        None => embed,
    };

    embed.footer(requested_by(context)).timestamp(context.now)
}

/// Time left until `days` from now, e.g. `Tomorrow` or `3 weeks`.
fn format_time_until(days: i64) -> String {
    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        2..=6 => format!("{} days", days),
        7..=13 => "1 week".to_string(),
        _ => format!("{} weeks", days / 7),
    }
}

pub fn format_active_seasons(
    seasons: &[Season],
    current_week: i64,
    context: &CommandContext,
) -> Embed {
    if seasons.is_empty() {
        return Embed::new("No Active Seasons", Category::Info)
            .description("There are currently no active seasons with future games.")
            .footer(requested_by(context))
            .timestamp(context.now);
    }

    seasons
        .iter()
        .fold(
            Embed::new("Active Seasons", Category::Success)
                .description("Here are the currently active seasons with future games:"),
            |embed, season| {
                // Past dates have no upcoming game to count down to
                let next_game = season
                    .created_at
                    .map(|at| (at - context.now).num_days())
                    .filter(|days| *days >= 0)
                    .map_or_else(|| "N/A".to_string(), format_time_until);

                embed.field(
                    format!("Season {}", season.id),
                    format!(
                        "Weeks: {}-{} | Initial Coins: {}\nNext game: {}\nStatus: {}",
                        season.start_week,
                        season.end_week,
                        season.initial_coins,
                        next_game,
                        SeasonStatus::of(season, current_week)
                    ),
                )
            },
        )
        .footer(requested_by(context))
        .timestamp(context.now)
}

/// Compresses sorted weeks into ranges, e.g. `Weeks 1-5` and `Week 7`.
fn week_ranges(weeks: &[i64]) -> Vec<String> {
    let mut ranges: Vec<(i64, i64)> = Vec::new();

    for &week in weeks {
        match ranges.last_mut() {
            Some((_, end)) if *end + 1 == week => *end = week,
            _ => ranges.push((week, week)),
        }
    }

    ranges
        .into_iter()
        .map(|(start, end)| {
            if start == end {
                format!("Week {}", start)
            } else {
                format!("Weeks {}-{}", start, end)
            }
        })
        .collect()
}

pub fn format_nfl_weeks(weeks: &[i64], current_week: i64, context: &CommandContext) -> Embed {
    let mut weeks = weeks.to_vec();
    weeks.sort_unstable();
    weeks.dedup();

    let (Some(first), Some(last)) = (weeks.first(), weeks.last()) else {
        return Embed::new("No NFL Weeks Available", Category::Warning)
            .description("There are currently no NFL weeks available.")
            .footer(requested_by(context))
            .timestamp(context.now);
    };

    let current = if weeks.contains(&current_week) {
        format!("Current Week: {}", current_week)
    } else {
        "Current Week: Not in available weeks".to_owned()
    };

    Embed::new("Available NFL Weeks", Category::Schedule)
        .description("Here are the available NFL weeks for this season:")
        .field("Weeks", week_ranges(&weeks).join("\n"))
        .field("Current Week", current)
        .inline_field("Total Weeks", weeks.len().to_string())
        .inline_field("First Week", first.to_string())
        .inline_field("Last Week", last.to_string())
        .footer(requested_by(context))
        .timestamp(context.now)
}

pub fn format_no_games(week: i64, context: &CommandContext) -> Embed {
    Embed::new("No NFL Games Available", Category::Warning)
        .description(format!(
            "There are no NFL games available for Week {}.",
            week
        ))
        .footer(requested_by(context))
        .timestamp(context.now)
}

pub fn format_no_games_in_week(week: i64) -> Embed {
    format_error(
        "No Games Found",
        &[
            format!("No games found for Week {}.", week),
            "Please try a different week number.".to_owned(),
        ],
    )
}

pub fn format_no_schedule(team: &str, context: &CommandContext) -> Embed {
    Embed::new("No Schedule Available", Category::Warning)
        .description(format!("There is no schedule available for {}.", team))
        .footer(requested_by(context))
        .timestamp(context.now)
}

/// Decimal odds, always with a fractional part (`2.0`, `1.85`).
fn format_odds(odds: f64) -> String {
    if odds.fract() == 0.0 {
        format!("{:.1}", odds)
    } else {
        odds.to_string()
    }
}

/// Formats the game under a pagination cursor with its navigation controls.
///
/// Week pages are titled `Week <w> - Game <i> of <n>`, team pages
/// `<team> Schedule - Game <i> of <n>`.
pub fn format_game_page(page: &Page, calendar: &NflCalendar) -> Embed {
    let game = &page.game;
    let position = page.index + 1;
    let kickoff = game
        .commence_time
        .map(format_kickoff)
        .unwrap_or_else(|| "Not available".to_owned());

    let embed = match &page.view {
        PageView::Week(week) => Embed::new(
            format!("Week {} - Game {} of {}", week, position, page.total),
            Category::Schedule,
        )
        .description(format!(
            "{away} @ {home}\n\n{away} Odds: {away_odds}  |  {home} Odds: {home_odds}",
            away = game.away_team,
            home = game.home_team,
            away_odds = format_odds(game.away_odds),
            home_odds = format_odds(game.home_odds),
        ))
        .field("Date & Time", kickoff)
        .field("Game ID", game.id.to_string()),
        PageView::Team(team) => Embed::new(
            format!("{} Schedule - Game {} of {}", team, position, page.total),
            Category::Schedule,
        )
        .description(format!(
            "{} @ {}\n\nAway Odds: {}  |  Home Odds: {}",
            game.away_team,
            game.home_team,
            format_odds(game.away_odds),
            format_odds(game.home_odds),
        ))
        .field("Date & Time", kickoff)
        .inline_field("Week", calendar.week_of(game.commence_time).to_string())
        .inline_field("Game ID", game.id.to_string()),
    };

    embed.controls(navigation_controls(&page.token, page.index, page.total))
}

/// Formats the help message listing every command.
pub fn format_help(context: &CommandContext) -> Embed {
    Embed::new("NFL Betting Bot Help", Category::Info)
        .description(
            "Welcome to the NFL Betting Bot! Here's a guide to all available commands:",
        )
        .field(
            "🏈 Season Management",
            "`!create_season <start_week> <end_week> <initial_coins>` - Create a new season\n\
             `!join_season <season_id>` - Join an existing season\n\
             `!season_info <season_id>` - Get information about a season\n\
             `!active_seasons` - List all active seasons\n\
             `!delete_season <season_id>` - Delete a season",
        )
        .field(
            "💰 Betting",
            "`!bet <season_id> <game_id> <bet_type> <amount>` - Place a bet\n\
             `!my_bets <season_id>` - View your bets for a season\n\
             `!balance <season_id>` - Check your balance for a season",
        )
        .field(
            "🏆 Leaderboard",
            "`!leaderboard <season_id>` - View the leaderboard for a season",
        )
        .field(
            "📅 NFL Information",
            "`!nfl_weeks` - List the available NFL weeks\n\
             `!nfl_games <week>` - Get NFL games for a specific week\n\
             `!team_schedule <team_name>` - Get schedule for a specific team",
        )
        .field(
            "🧹 Utility",
            "`!help` - Display this help message\n\
             `!purge <number>` - Delete a number of recent messages (admin only)",
        )
        .field(
            "📘 Quick Start Guide",
            "1. Join or create a season using `!join_season` or `!create_season`\n\
             2. Check available games with `!nfl_games`\n\
             3. Place a bet using the `!bet` command\n\
             4. Track your progress with `!my_bets` and `!balance`\n\
             5. Compare your standing using `!leaderboard`",
        )
        .field(
            "🎲 Betting Example",
            "To bet 100 coins on the home team for game 456 in season 123:\n\
             `!bet 123 456 HOME 100`",
        )
        .field(
            "❓ Need More Help?",
            "If you need more information about a specific command, try using it with no arguments or incorrect arguments. \
             The bot will provide you with more detailed usage instructions.",
        )
        .footer(requested_by(context))
        .timestamp(context.now)
}

pub fn format_channel_cleared(count: i64, context: &CommandContext) -> Embed {
    Embed::new("Channel Cleared", Category::Success)
        .description(format!("{} messages have been deleted.", count))
        .footer(requested_by(context))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn context() -> CommandContext {
        CommandContext {
            author_id: "42".to_owned(),
            author_name: "alice".to_owned(),
            can_manage_messages: false,
            now: Utc::now(),
        }
    }

    fn season() -> Season {
        Season {
            id: 5,
            start_week: 1,
            end_week: 10,
            initial_coins: 1000,
            created_at: Some("2024-09-01T12:00:00Z".parse().unwrap()),
            is_active: true,
        }
    }

    fn game() -> Game {
        Game {
            id: 1985,
            home_team: "Kansas City Chiefs".to_owned(),
            away_team: "Baltimore Ravens".to_owned(),
            commence_time: Some("2024-09-06T00:20:00Z".parse().unwrap()),
            home_odds: 1.85,
            away_odds: 2.0,
        }
    }

    fn user(name: &str, coins: i64) -> User {
        User {
            id: coins,
            discord_id: Some(name.to_owned()),
            username: name.to_owned(),
            coins,
        }
    }

    #[test]
    fn test_format_time_until() {
        assert_eq!(format_time_until(0), "Today");
        assert_eq!(format_time_until(1), "Tomorrow");
        assert_eq!(format_time_until(6), "6 days");
        assert_eq!(format_time_until(7), "1 week");
        assert_eq!(format_time_until(13), "1 week");
        assert_eq!(format_time_until(15), "2 weeks");
    }

    #[test]
    fn test_format_error() {
        let embed = format_error("Failed to Delete Season", &["Season has pending bets"]);

        assert_eq!(embed.title, "Error: Failed to Delete Season");
        assert_eq!(embed.category, Category::Error);
        assert_eq!(embed.fields.len(), 1);
        assert_eq!(embed.fields[0].name, "");
        assert_eq!(embed.fields[0].value, "Season has pending bets");
    }

    #[test]
    fn test_format_usage_error_arity() {
        let Response::Embed { embed } = format_usage_error(&UsageError::Arity(Verb::Bet)) else {
            panic!("Expected an embed");
        };

        assert_eq!(embed.title, "Error: Invalid Command Usage");
        let lines: Vec<&str> = embed.fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(
            lines,
            vec![
                "Usage: `!bet <season_id> <game_id> <bet_type> <amount>`",
                "Example: `!bet 1 1985 HOME 125`",
                "Bet Types: HOME, AWAY",
            ]
        );
    }

    #[test]
    fn test_format_usage_error_invalid_argument() {
        let Response::Embed { embed } =
            format_usage_error(&UsageError::InvalidArgument(Verb::NflGames))
        else {
            panic!("Expected an embed");
        };

        assert_eq!(embed.title, "Error: Invalid Week Number");
        assert_eq!(embed.fields[1].value, "Correct Usage: `!nfl_games <week>`");

        assert_eq!(
            format_usage_error(&UsageError::InvalidArgument(Verb::Purge)),
            Response::Text {
                text: "Please provide a valid number.".to_owned()
            }
        );
    }

    #[test]
    fn test_format_game_already_started() {
        let embed = format_domain_error(&DomainError::GameAlreadyStarted {
            home_team: "Chiefs".to_owned(),
            away_team: "Ravens".to_owned(),
            commence_time: "2024-09-06T00:20:00Z".parse().unwrap(),
        });

        assert_eq!(embed.title, "Error: Game Already Started");
        assert_eq!(
            embed.fields[0].value,
            "Betting is closed for this game as it has already started."
        );
        assert_eq!(embed.fields[1].value, "Game: Chiefs vs Ravens");
        assert!(embed.fields[2].value.starts_with("Start Time: 2024-09-06T00:20:00"));
    }

    #[test]
    fn test_format_gateway_error_hides_body() {
        let error = GatewayError::ServerError {
            status: 502,
            body: "<html>bad gateway</html>".to_owned(),
        };
        let embed = format_gateway_error(
            "Failed to Join Season",
            "An error occurred while joining the season. Please try again.",
            &error,
        );

        assert_eq!(embed.title, "Error: Failed to Join Season");
        assert_eq!(
            embed.fields[1].value,
            "Error Details: the betting service failed (HTTP 502)"
        );
        assert!(embed.fields.iter().all(|f| !f.value.contains("html")));
    }

    #[test]
    fn test_format_season_created() {
        let embed = format_season_created(1, 1, 17, 1000, &context());

        assert_eq!(embed.title, "Season Created Successfully");
        let values: Vec<(&str, &str)> = embed
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Season ID", "1"),
                ("Start Week", "1"),
                ("End Week", "17"),
                ("Initial Coins", "1000"),
            ]
        );
        assert_eq!(embed.footer.as_deref(), Some("Created by alice"));
    }

    #[test]
    fn test_format_bet_placed() {
        let embed = format_bet_placed(77, 1, &game(), BetType::Away, 125, &context());

        assert_eq!(
            embed.description.as_deref(),
            Some("Your bet on the Baltimore Ravens has been placed successfully!")
        );
        assert_eq!(
            embed.field_value("Bet Details"),
            Some("Bet ID: 77 | Season ID: 1")
        );
        assert_eq!(
            embed.field_value("Game"),
            Some("Baltimore Ravens vs Kansas City Chiefs")
        );
        assert_eq!(embed.field_value("Bet Amount"), Some("125 coins"));
        assert_eq!(embed.field_value("Bet Type"), Some("AWAY"));
        assert_eq!(embed.field_value("Odds"), Some("2.0"));
        assert_eq!(embed.footer.as_deref(), Some("Placed by alice"));
    }

    #[test]
    fn test_format_bets() {
        let bets = vec![Bet {
            id: 3,
            game_id: 1985,
            bet_type: "HOME".to_owned(),
            amount: 50,
            status: Some("won".to_owned()),
            home_team: "Chiefs".to_owned(),
            away_team: "Ravens".to_owned(),
        }];

        let embed = format_bets(1, &bets, &context());
        assert_eq!(embed.title, "Your Bets for Season 1");
        assert_eq!(
            embed.field_value("Bet ID: 3"),
            Some("Chiefs vs Ravens\nBet: 50 coins on the Chiefs\nResult: Won")
        );

        let embed = format_bets(1, &[], &context());
        assert_eq!(embed.title, "No Bets Found");
        assert_eq!(embed.footer.as_deref(), Some("Season ID: 1"));
    }

    #[test]
    fn test_balance_mood() {
        assert_eq!(balance_mood(2001, 1000), "Wow! You're on fire! 🔥");
        assert_eq!(balance_mood(2000, 1000), "Nice job! You're in the green. 💰");
        assert_eq!(balance_mood(1000, 1000), "Breaking even. Slow and steady! 🐢");
        assert_eq!(
            balance_mood(501, 1000),
            "Hang in there, you can turn this around! 💪"
        );
        assert_eq!(
            balance_mood(500, 1000),
            "Ouch! Time to change up your strategy? 🤔"
        );
    }

    #[test]
    fn test_format_balance() {
        let embed = format_balance(&season(), 1250, &context());

        assert_eq!(embed.title, "Balance for Season 5");
        let names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Current Balance",
                "Initial Balance",
                "Net Change",
                "Season Duration",
                "Status"
            ]
        );
        assert_eq!(embed.field_value("Net Change"), Some("250 coins"));
        assert_eq!(embed.field_value("Season Duration"), Some("Week 1 to Week 10"));
    }

    #[test]
    fn test_format_leaderboard() {
        let ranked: Vec<User> = (0..12).map(|i| user(&format!("u{}", i), 1000 - i)).collect();

        let embed = format_leaderboard(9, &ranked, Some(12), &context());

        assert_eq!(embed.title, "Leaderboard for Season 9");
        assert_eq!(embed.fields.len(), 11);
        assert_eq!(embed.fields[0].name, "1.");
        assert_eq!(embed.fields[0].value, "🥇 **u0**\nCoins: 1000");
        assert_eq!(embed.fields[3].value, "🏅 **u3**\nCoins: 997");
        assert_eq!(embed.fields[10].name, "Your Position: 12");
        assert_eq!(embed.fields[10].value, "**u11**\nCoins: 989");

        let embed = format_leaderboard(9, &ranked, Some(3), &context());
        assert_eq!(embed.fields.len(), 10);

        let embed = format_leaderboard(9, &[], None, &context());
        assert_eq!(embed.title, "No Users Found");
    }

    #[test]
    fn test_format_season_info_progress() {
        let embed = format_season_info(&season(), 5, &context());

        assert_eq!(embed.title, "Season Information");
        assert_eq!(embed.description.as_deref(), Some("Details for Season ID: 5"));
        assert_eq!(embed.field_value("Duration"), Some("10 weeks"));
        assert_eq!(embed.field_value("Created On"), Some("September 1, 2024"));
        assert_eq!(embed.field_value("Status"), Some("Active"));
        assert_eq!(embed.field_value("Progress"), Some("█████░░░░░ 50%"));

        let embed = format_season_info(&season(), 11, &context());
        assert_eq!(embed.field_value("Status"), Some("Completed"));
        assert_eq!(embed.field_value("Progress"), None);
    }

    #[test]
    fn test_week_ranges() {
        assert_eq!(
            week_ranges(&[1, 2, 3, 4, 5, 7, 9, 10]),
            vec!["Weeks 1-5", "Week 7", "Weeks 9-10"]
        );
        assert_eq!(week_ranges(&[4]), vec!["Week 4"]);
        assert!(week_ranges(&[]).is_empty());
    }

    #[test]
    fn test_format_nfl_weeks() {
        let embed = format_nfl_weeks(&[3, 1, 2], 2, &context());

        assert_eq!(embed.field_value("Weeks"), Some("Weeks 1-3"));
        assert_eq!(embed.field_value("Current Week"), Some("Current Week: 2"));
        assert_eq!(embed.field_value("Total Weeks"), Some("3"));
        assert_eq!(embed.field_value("First Week"), Some("1"));
        assert_eq!(embed.field_value("Last Week"), Some("3"));

        let embed = format_nfl_weeks(&[1, 2], 9, &context());
        assert_eq!(
            embed.field_value("Current Week"),
            Some("Current Week: Not in available weeks")
        );

        let embed = format_nfl_weeks(&[], 9, &context());
        assert_eq!(embed.title, "No NFL Weeks Available");
    }

    #[test]
    fn test_format_game_page() {
        let calendar = NflCalendar::new(NaiveDate::from_ymd_opt(2024, 9, 5).unwrap(), 18);
        let page = Page {
            token: "token".to_owned(),
            view: PageView::Week(1),
            game: game(),
            index: 0,
            total: 2,
        };

        let embed = format_game_page(&page, &calendar);

        assert_eq!(embed.title, "Week 1 - Game 1 of 2");
        assert_eq!(
            embed.description.as_deref(),
            Some(
                "Baltimore Ravens @ Kansas City Chiefs\n\n\
                 Baltimore Ravens Odds: 2.0  |  Kansas City Chiefs Odds: 1.85"
            )
        );
        assert_eq!(
            embed.field_value("Date & Time"),
            Some("Thursday, September 5 2024, 20:20 EDT")
        );
        assert_eq!(embed.field_value("Game ID"), Some("1985"));
        assert!(embed.controls[0].disabled);
        assert!(!embed.controls[1].disabled);

        let page = Page {
            view: PageView::Team("Kansas City Chiefs".to_owned()),
            index: 1,
            ..page
        };
        let embed = format_game_page(&page, &calendar);

        assert_eq!(embed.title, "Kansas City Chiefs Schedule - Game 2 of 2");
        assert_eq!(embed.field_value("Week"), Some("1"));
        assert!(!embed.controls[0].disabled);
        assert!(embed.controls[1].disabled);
    }

    #[test]
    fn test_format_help_sections() {
        let embed = format_help(&context());
        let names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "🏈 Season Management",
                "💰 Betting",
                "🏆 Leaderboard",
                "📅 NFL Information",
                "🧹 Utility",
                "📘 Quick Start Guide",
                "🎲 Betting Example",
                "❓ Need More Help?",
            ]
        );
    }
}
