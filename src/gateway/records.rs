//! Typed records returned by the season/bet API.
//!
//! The upstream service answers with snake_case JSON objects. Some endpoints
//! serialise the same record in camelCase, so every multi-word field accepts
//! both spellings. Required fields are enforced here: a record missing one of
//! them fails deserialization and surfaces as a [`GatewayError::Decode`](crate::gateway::GatewayError::Decode).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A betting season from `/api/seasons/{id}` or `/api/seasons/active`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Season {
    /// Unique identifier of the season.
    pub id: i64,
    /// First NFL week covered by the season.
    #[serde(alias = "startWeek")]
    pub start_week: i64,
    /// Last NFL week covered by the season (inclusive).
    #[serde(alias = "endWeek")]
    pub end_week: i64,
    /// Coins every participant starts with.
    #[serde(alias = "initialCoins")]
    pub initial_coins: i64,
    /// Creation instant, when the upstream reports it.
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    /// Whether the season still has games to bet on.
    #[serde(default, alias = "isActive", alias = "active")]
    pub is_active: bool,
}

impl Season {
    /// Number of weeks the season spans, bounds included.
    pub fn duration_weeks(&self) -> i64 {
        self.end_week - self.start_week + 1
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={}, weeks={}-{}, initial_coins={}",
            self.id, self.start_week, self.end_week, self.initial_coins
        )
    }
}

/// A participant of a season from `/api/users/seasons/{seasonId}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    /// Upstream user identifier.
    pub id: i64,
    /// Chat platform identifier of the user.
    #[serde(default, alias = "discordId")]
    pub discord_id: Option<String>,
    /// Display name recorded when the user was created.
    pub username: String,
    /// Current coin balance in the season.
    pub coins: i64,
}

/// A bet placed by a user from `/api/bets/users/{userId}/seasons/{seasonId}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Bet {
    /// Unique identifier of the bet.
    pub id: i64,
    /// Game the bet is on.
    #[serde(alias = "gameId")]
    pub game_id: i64,
    /// `HOME` or `AWAY`.
    #[serde(alias = "betType")]
    pub bet_type: String,
    /// Stake in coins.
    pub amount: i64,
    /// Settlement status (`won`, `lost`, or pending when absent).
    #[serde(default)]
    pub status: Option<String>,
    /// Home team of the game.
    #[serde(alias = "homeTeam")]
    pub home_team: String,
    /// Away team of the game.
    #[serde(alias = "awayTeam")]
    pub away_team: String,
}

impl Bet {
    /// Team the bet backs.
    pub fn backed_team(&self) -> &str {
        if self.bet_type.eq_ignore_ascii_case("HOME") {
            &self.home_team
        } else {
            &self.away_team
        }
    }

    /// Human readable settlement.
    pub fn outcome(&self) -> &'static str {
        match self.status.as_deref() {
            Some(status) if status.eq_ignore_ascii_case("won") => "Won",
            Some(status) if status.eq_ignore_ascii_case("lost") => "Lost",
            _ => "Pending",
        }
    }
}

/// An NFL game with its moneyline odds.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Game {
    /// Unique identifier of the game.
    pub id: i64,
    /// Home team name.
    #[serde(alias = "homeTeam")]
    pub home_team: String,
    /// Away team name.
    #[serde(alias = "awayTeam")]
    pub away_team: String,
    /// Kick-off instant, unknown for some scheduled games.
    #[serde(default, alias = "commenceTime")]
    pub commence_time: Option<DateTime<Utc>>,
    /// Decimal odds of the home team.
    #[serde(alias = "homeOdds")]
    pub home_odds: f64,
    /// Decimal odds of the away team.
    #[serde(alias = "awayOdds")]
    pub away_odds: f64,
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={}, {} @ {}, commence_time={:?}",
            self.id, self.away_team, self.home_team, self.commence_time
        )
    }
}

/// Outcome of `DELETE /api/seasons/{id}`.
///
/// Non-2xx answers are folded into `deleted: false` by the requester, so this
/// record is always renderable.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Whether the season was removed.
    pub deleted: bool,
    /// Message to show to the requester.
    #[serde(default)]
    pub message: String,
}
