//! Command parsing and argument validation.
//!
//! Parsing happens in two steps:
//!
//! 1. [`ParsedCommand::parse`] turns a raw message into a lowercased verb and its
//!    whitespace-separated argument tokens, or rejects it as [`NotACommand`].
//! 2. [`Command::from_parsed`] checks the arity and types of the arguments of a
//!    known [`Verb`], producing a typed [`Command`] or a [`UsageError`].
//!
//! Both steps are pure: no gateway call can happen before a command is valid.

use std::fmt;

use command_parser::Parser;
use log::debug;
use thiserror::Error;

/// Character every command starts with.
pub const COMMAND_PREFIX: char = '!';

/// The message does not start with the command prefix.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("message is not a command")]
pub struct NotACommand;

/// A verb and its raw argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased verb, without the prefix
    pub verb: String,
    /// Tokens following the verb, original casing kept
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// Splits a raw message into verb and arguments.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// let parser = Parser::new('!', '-');
    /// let parsed = ParsedCommand::parse(&parser, "!BET 1 1985 home 125")?;
    /// assert_eq!(parsed.verb, "bet");
    /// assert_eq!(parsed.args, vec!["1", "1985", "home", "125"]);
    /// ```
    pub fn parse(parser: &Parser, body: &str) -> Result<Self, NotACommand> {
        if !body.starts_with(COMMAND_PREFIX) {
            return Err(NotACommand);
        }

        let mut tokens = body.split_whitespace();
        let head = tokens.next().unwrap_or_default();
        let args: Vec<String> = tokens.map(str::to_owned).collect();

        // The parser treats `-` tokens as options, so only the verb token goes through it.
        // For an unknown reason the parser ignores the last word, so we add a dummy word at the end
        let verb = match parser.parse(&format!("{} dummy", head)) {
            Ok(command) => command.name,
            Err(_) => head
                .strip_prefix(COMMAND_PREFIX)
                .unwrap_or(head)
                .to_owned(),
        };

        let parsed = ParsedCommand {
            verb: verb.to_lowercase(),
            args,
        };
        debug!("Parsed command: {:?}", parsed);

        Ok(parsed)
    }
}

/// Verbs understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    CreateSeason,
    JoinSeason,
    DeleteSeason,
    Bet,
    MyBets,
    Balance,
    Leaderboard,
    SeasonInfo,
    ActiveSeasons,
    NflWeeks,
    NflGames,
    TeamSchedule,
    Help,
    Purge,
}

/// How a verb is meant to be used, shown on usage errors.
pub struct Syntax {
    pub usage: &'static str,
    pub example: &'static str,
    /// Extra lines appended to arity errors
    pub notes: &'static [&'static str],
    /// Title of the error shown when an argument has the wrong type
    pub invalid_title: &'static str,
    /// First line of the error shown when an argument has the wrong type
    pub invalid_hint: &'static str,
}

const SEASON_ID_HINT: &str = "Please enter a valid number for the season ID.";

impl Verb {
    const ALL: [Verb; 14] = [
        Verb::CreateSeason,
        Verb::JoinSeason,
        Verb::DeleteSeason,
        Verb::Bet,
        Verb::MyBets,
        Verb::Balance,
        Verb::Leaderboard,
        Verb::SeasonInfo,
        Verb::ActiveSeasons,
        Verb::NflWeeks,
        Verb::NflGames,
        Verb::TeamSchedule,
        Verb::Help,
        Verb::Purge,
    ];

    /// Looks a verb up by its lowercased name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verb| verb.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Verb::CreateSeason => "create_season",
            Verb::JoinSeason => "join_season",
            Verb::DeleteSeason => "delete_season",
            Verb::Bet => "bet",
            Verb::MyBets => "my_bets",
            Verb::Balance => "balance",
            Verb::Leaderboard => "leaderboard",
            Verb::SeasonInfo => "season_info",
            Verb::ActiveSeasons => "active_seasons",
            Verb::NflWeeks => "nfl_weeks",
            Verb::NflGames => "nfl_games",
            Verb::TeamSchedule => "team_schedule",
            Verb::Help => "help",
            Verb::Purge => "purge",
        }
    }

    pub fn syntax(&self) -> Syntax {
        let season = |usage, example| Syntax {
            usage,
            example,
            notes: &[],
            invalid_title: "Invalid Season ID",
            invalid_hint: SEASON_ID_HINT,
        };
        let bare = |usage| Syntax {
            usage,
            example: usage,
            notes: &[],
            invalid_title: "Invalid Input",
            invalid_hint: "This command takes no arguments.",
        };

        match self {
            Verb::CreateSeason => Syntax {
                usage: "!create_season <start_week> <end_week> <initial_coins>",
                example: "!create_season 1 17 1000",
                notes: &[],
                invalid_title: "Invalid Input",
                invalid_hint: "Please enter valid numbers for weeks and coins.",
            },
            Verb::JoinSeason => season("!join_season <season_id>", "!join_season 123"),
            Verb::DeleteSeason => season("!delete_season <season_id>", "!delete_season 123"),
            Verb::Bet => Syntax {
                usage: "!bet <season_id> <game_id> <bet_type> <amount>",
                example: "!bet 1 1985 HOME 125",
                notes: &["Bet Types: HOME, AWAY"],
                invalid_title: "Invalid Input",
                invalid_hint: "Please enter valid numbers for season ID, game ID, and amount.",
            },
            Verb::MyBets => season("!my_bets <season_id>", "!my_bets 123"),
            Verb::Balance => season("!balance <season_id>", "!balance 123"),
            Verb::Leaderboard => season("!leaderboard <season_id>", "!leaderboard 123"),
            Verb::SeasonInfo => season("!season_info <season_id>", "!season_info 123"),
            Verb::ActiveSeasons => bare("!active_seasons"),
            Verb::NflWeeks => bare("!nfl_weeks"),
            Verb::NflGames => Syntax {
                usage: "!nfl_games <week>",
                example: "!nfl_games 1",
                notes: &[],
                invalid_title: "Invalid Week Number",
                invalid_hint: "Please enter a valid number for the week.",
            },
            Verb::TeamSchedule => Syntax {
                usage: "!team_schedule <team_name>",
                example: "!team_schedule San Francisco 49ers",
                notes: &[],
                invalid_title: "Invalid Input",
                invalid_hint: "Please enter a team name.",
            },
            Verb::Help => bare("!help"),
            Verb::Purge => Syntax {
                usage: "!purge <number>",
                example: "!purge 100",
                notes: &["Note: Maximum number of messages to delete is 100"],
                invalid_title: "Invalid Input",
                invalid_hint: "Please provide a valid number.",
            },
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arguments that do not match a verb's syntax.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    /// Wrong number of arguments
    #[error("wrong number of arguments for {0}")]
    Arity(Verb),
    /// An argument has the wrong type
    #[error("invalid argument for {0}")]
    InvalidArgument(Verb),
}

/// A validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateSeason {
        start_week: i64,
        end_week: i64,
        initial_coins: i64,
    },
    JoinSeason(i64),
    DeleteSeason(i64),
    /// The bet type is kept as typed; it is checked against HOME/AWAY by the handler
    Bet {
        season_id: i64,
        game_id: i64,
        bet_type: String,
        amount: i64,
    },
    MyBets(i64),
    Balance(i64),
    Leaderboard(i64),
    SeasonInfo(i64),
    ActiveSeasons,
    NflWeeks,
    NflGames(i64),
    /// Team name rebuilt from every token after the verb
    TeamSchedule(String),
    Help,
    Purge(i64),
}

impl Command {
    /// Validates the arguments of `verb`.
    ///
    /// Verbs taking no argument ignore extra tokens; the others require their
    /// exact arity, except `team_schedule` which takes a free-text tail.
    pub fn from_parsed(verb: Verb, args: &[String]) -> Result<Self, UsageError> {
        let expect = |arity: usize| {
            if args.len() == arity {
                Ok(())
            } else {
                Err(UsageError::Arity(verb))
            }
        };
        let number = |index: usize| -> Result<i64, UsageError> {
            args[index]
                .parse::<i64>()
                .map_err(|_| UsageError::InvalidArgument(verb))
        };

        let command = match verb {
            Verb::CreateSeason => {
                expect(3)?;
                Command::CreateSeason {
                    start_week: number(0)?,
                    end_week: number(1)?,
                    initial_coins: number(2)?,
                }
            }
            Verb::JoinSeason => {
                expect(1)?;
                Command::JoinSeason(number(0)?)
            }
            Verb::DeleteSeason => {
                expect(1)?;
                Command::DeleteSeason(number(0)?)
            }
            Verb::Bet => {
                expect(4)?;
                Command::Bet {
                    season_id: number(0)?,
                    game_id: number(1)?,
                    bet_type: args[2].clone(),
                    amount: number(3)?,
                }
            }
            Verb::MyBets => {
                expect(1)?;
                Command::MyBets(number(0)?)
            }
            Verb::Balance => {
                expect(1)?;
                Command::Balance(number(0)?)
            }
            Verb::Leaderboard => {
                expect(1)?;
                Command::Leaderboard(number(0)?)
            }
            Verb::SeasonInfo => {
                expect(1)?;
                Command::SeasonInfo(number(0)?)
            }
            Verb::NflGames => {
                expect(1)?;
                Command::NflGames(number(0)?)
            }
            Verb::TeamSchedule => {
                if args.is_empty() {
                    return Err(UsageError::Arity(verb));
                }
                Command::TeamSchedule(args.join(" "))
            }
            Verb::Purge => {
                expect(1)?;
                Command::Purge(number(0)?)
            }
            Verb::ActiveSeasons => Command::ActiveSeasons,
            Verb::NflWeeks => Command::NflWeeks,
            Verb::Help => Command::Help,
        };

        debug!("Validated command: {:?}", command);

        Ok(command)
    }
}
