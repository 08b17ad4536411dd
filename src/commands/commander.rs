//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, which serves as the main entry point
//! for processing bot commands. It coordinates command parsing and execution, routing
//! commands to their appropriate handlers, and serves the navigation controls of
//! paginated responses.
//!
//! # Flow
//!
//! ```text
//! Message → parse() → ParsedCommand → dispatch() → CommandResult
//! Control → handle_control() → Response
//! ```
//!
//! # Examples
//!
//! ```no_run
//! let commander = Commander::new(gateway, sessions, calendar);
//!
//! let parsed = commander.parse("!leaderboard 3")?;
//! let result = commander.dispatch(&parsed, &context).await;
//! ```

use command_parser::Parser;
use log::debug;

use crate::{
    commands::{
        CommandContext, CommandResult, NflCalendar, NotACommand, Response,
        actions::{
            handle_active_seasons, handle_balance, handle_bet, handle_create_season,
            handle_delete_season, handle_help, handle_join_season, handle_leaderboard,
            handle_my_bets, handle_nfl_games, handle_nfl_weeks, handle_purge, handle_season_info,
            handle_team_schedule,
        },
        command::{COMMAND_PREFIX, Command, ParsedCommand, Verb},
        embed_response::{
            format_game_page, format_missing_permission, format_unknown_command,
            format_usage_error,
        },
    },
    gateway::Gateway,
    pagination::{ControlId, SessionStore},
};

/// Command orchestrator for parsing and executing bot commands.
///
/// The Commander is responsible for:
/// - Parsing raw message text into a verb and its arguments
/// - Validating arguments before any gateway call
/// - Routing commands to appropriate handlers
/// - Moving pagination sessions on control activations
///
/// # Command Prefix
///
/// All commands must start with `!`. Messages without this prefix are silently
/// ignored (returning [`NotACommand`]).
pub struct Commander<G: Gateway> {
    /// Command parser recognising the verb token
    parser: Parser,
    /// The season/bet API
    gateway: G,
    /// Browsing sessions opened by `nfl_games` and `team_schedule`
    sessions: SessionStore,
    /// Week arithmetic
    calendar: NflCalendar,
}

impl<G: Gateway> Commander<G> {
    /// Creates a new Commander instance with a configured command parser.
    ///
    /// The parser is configured to recognize commands starting with `!` as the command
    /// prefix and `-` as the option prefix.
    pub fn new(gateway: G, sessions: SessionStore, calendar: NflCalendar) -> Self {
        let parser = Parser::new(COMMAND_PREFIX, '-');
        Commander {
            parser,
            gateway,
            sessions,
            calendar,
        }
    }

    /// Parses a message body into a verb and its arguments.
    ///
    /// # Returns
    ///
    /// * `Ok(ParsedCommand)` - The message starts with `!`; the verb may still be unknown
    /// * `Err(NotACommand)` - Regular chat, to be ignored
    pub fn parse(&self, body: &str) -> Result<ParsedCommand, NotACommand> {
        ParsedCommand::parse(&self.parser, body)
    }

    /// Executes a parsed command and returns its single response.
    ///
    /// Unknown verbs get a fixed reply. `purge` checks the manage-messages
    /// permission before its arguments. Usage errors are answered before any
    /// gateway call.
    pub async fn dispatch(&self, parsed: &ParsedCommand, context: &CommandContext) -> CommandResult {
        let Some(verb) = Verb::from_name(&parsed.verb) else {
            debug!("unknown verb {}", parsed.verb);
            return CommandResult::text(format_unknown_command());
        };

        if verb == Verb::Purge && !context.can_manage_messages {
            debug!("{} is not allowed to purge", context.author_id);
            return CommandResult::text(format_missing_permission());
        }

        let command = match Command::from_parsed(verb, &parsed.args) {
            Ok(command) => command,
            Err(error) => {
                debug!("usage error: {}", error);
                return CommandResult {
                    response: format_usage_error(&error),
                    purge: None,
                    delete_after_secs: None,
                };
            }
        };

        let gateway = &self.gateway;
        let calendar = &self.calendar;

        match command {
            Command::CreateSeason {
                start_week,
                end_week,
                initial_coins,
            } => handle_create_season(gateway, start_week, end_week, initial_coins, context).await,
            Command::JoinSeason(season_id) => handle_join_season(gateway, season_id, context).await,
            Command::DeleteSeason(season_id) => {
                handle_delete_season(gateway, season_id, context).await
            }
            Command::Bet {
                season_id,
                game_id,
                bet_type,
                amount,
            } => handle_bet(gateway, season_id, game_id, &bet_type, amount, context).await,
            Command::MyBets(season_id) => handle_my_bets(gateway, season_id, context).await,
            Command::Balance(season_id) => handle_balance(gateway, season_id, context).await,
            Command::Leaderboard(season_id) => {
                handle_leaderboard(gateway, season_id, context).await
            }
            Command::SeasonInfo(season_id) => {
                handle_season_info(gateway, calendar, season_id, context).await
            }
            Command::ActiveSeasons => handle_active_seasons(gateway, calendar, context).await,
            Command::NflWeeks => handle_nfl_weeks(gateway, calendar, context).await,
            Command::NflGames(week) => {
                handle_nfl_games(gateway, &self.sessions, calendar, week, context).await
            }
            Command::TeamSchedule(team) => {
                handle_team_schedule(gateway, &self.sessions, calendar, &team, context).await
            }
            Command::Help => handle_help(context),
            Command::Purge(count) => handle_purge(count, context),
        }
    }

    /// Serves a navigation control activation.
    ///
    /// A valid step replaces the paginated message with the new page. A rejected
    /// one leaves the session untouched and answers with a transient notice.
    pub fn handle_control(&self, control_id: &str) -> Response {
        let page = ControlId::parse(control_id)
            .and_then(|control| self.sessions.advance(&control.token, control.direction));

        match page {
            Ok(page) => Response::Update {
                embed: format_game_page(&page, &self.calendar),
            },
            Err(error) => {
                debug!("control {} rejected: {}", control_id, error);
                Response::Notice {
                    text: error.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        commands::{actions::test_support::create_test_context, embed::Category},
        gateway::{Game, MockGateway},
    };

    const NOW: &str = "2024-09-01T12:00:00Z";

    fn create_commander(gateway: MockGateway) -> Commander<MockGateway> {
        Commander::new(
            gateway,
            SessionStore::new(Duration::from_secs(60), 10),
            NflCalendar::new(NaiveDate::from_ymd_opt(2024, 9, 5).unwrap(), 18),
        )
    }

    fn create_game(id: i64) -> Game {
        Game {
            id,
            home_team: "Kansas City Chiefs".to_string(),
            away_team: format!("Opponent {}", id),
            commence_time: None,
            home_odds: 1.5,
            away_odds: 2.5,
        }
    }

    async fn run(commander: &Commander<MockGateway>, body: &str) -> CommandResult {
        let context = create_test_context(NOW);
        let parsed = commander.parse(body).unwrap();
        commander.dispatch(&parsed, &context).await
    }

    #[test]
    fn test_parse_not_a_command() {
        let commander = create_commander(MockGateway::new());

        assert_eq!(commander.parse("good game everyone"), Err(NotACommand));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_verb() {
        let commander = create_commander(MockGateway::new());

        let result = run(&commander, "!dance").await;

        assert_eq!(
            result.response,
            Response::Text {
                text: "Unknown command. Type !help for a list of commands.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_dispatch_create_season() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_create_season()
            .with(eq(1), eq(17), eq(1000))
            .times(1)
            .returning(|_, _, _| Ok(Some(1)));
        let commander = create_commander(gateway);

        let result = run(&commander, "!create_season 1 17 1000").await;

        let embed = result.as_embed().unwrap();
        assert_eq!(embed.title, "Season Created Successfully");
        let values: Vec<&str> = embed.fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["1", "1", "17", "1000"]);
    }

    #[tokio::test]
    async fn test_dispatch_usage_error_skips_gateway() {
        let mut gateway = MockGateway::new();
        gateway.expect_create_season().never();
        let commander = create_commander(gateway);

        let result = run(&commander, "!create_season 1 17").await;

        let embed = result.as_embed().unwrap();
        assert_eq!(embed.title, "Error: Invalid Command Usage");
        assert_eq!(embed.category, Category::Error);
        assert_eq!(
            embed.fields[0].value,
            "Usage: `!create_season <start_week> <end_week> <initial_coins>`"
        );
        assert_eq!(embed.fields[1].value, "Example: `!create_season 1 17 1000`");
    }

    #[tokio::test]
    async fn test_dispatch_verb_is_case_insensitive() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_users_by_season()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let commander = create_commander(gateway);

        let result = run(&commander, "!LeaderBoard 3").await;

        assert_eq!(result.as_embed().unwrap().title, "No Users Found");
    }

    #[tokio::test]
    async fn test_dispatch_purge_permission_checked_first() {
        let commander = create_commander(MockGateway::new());

        let result = run(&commander, "!purge").await;

        assert_eq!(
            result.response,
            Response::Text {
                text: "You do not have permission to use this command.".to_string()
            }
        );
        assert!(result.purge.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_purge_allowed() {
        let commander = create_commander(MockGateway::new());
        let context = CommandContext {
            can_manage_messages: true,
            ..create_test_context(NOW)
        };

        let parsed = commander.parse("!purge 10").unwrap();
        let result = commander.dispatch(&parsed, &context).await;
        assert_eq!(result.purge, Some(10));

        let parsed = commander.parse("!purge ten").unwrap();
        let result = commander.dispatch(&parsed, &context).await;
        assert_eq!(
            result.response,
            Response::Text {
                text: "Please provide a valid number.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_navigation_sequence() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_team_schedule()
            .with(eq("Kansas City Chiefs"))
            .times(1)
            .returning(|_| Ok((1..=3).map(create_game).collect()));
        let commander = create_commander(gateway);

        let result = run(&commander, "!team_schedule Kansas City Chiefs").await;
        let embed = result.as_embed().unwrap();
        assert_eq!(embed.title, "Kansas City Chiefs Schedule - Game 1 of 3");
        let previous = embed.controls[0].id.clone();
        let next = embed.controls[1].id.clone();

        assert_eq!(
            commander.handle_control(&previous),
            Response::Notice {
                text: "No more games to display.".to_string()
            }
        );

        let Response::Update { embed } = commander.handle_control(&next) else {
            panic!("Expected an update");
        };
        assert_eq!(embed.title, "Kansas City Chiefs Schedule - Game 2 of 3");
        assert!(!embed.controls[0].disabled);
        assert_eq!(embed.controls[1].id, next);

        let Response::Update { embed } = commander.handle_control(&next) else {
            panic!("Expected an update");
        };
        assert_eq!(embed.title, "Kansas City Chiefs Schedule - Game 3 of 3");
        assert!(embed.controls[1].disabled);

        assert!(matches!(
            commander.handle_control(&next),
            Response::Notice { .. }
        ));
    }

    #[test]
    fn test_control_unknown_session() {
        let commander = create_commander(MockGateway::new());

        assert_eq!(
            commander.handle_control("nfl:next:missing"),
            Response::Notice {
                text: "This game list has expired. Please request a new one.".to_string()
            }
        );
        assert_eq!(
            commander.handle_control("shop:next:abc"),
            Response::Notice {
                text: "Invalid button interaction.".to_string()
            }
        );
    }
}
