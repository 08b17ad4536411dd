//! HTTP client for the season/bet API.
//!
//! This module provides the [`Gateway`] trait, one method per upstream endpoint,
//! and [`HttpGateway`], its `reqwest` implementation.

use std::time::Duration;

use log::{debug, info, warn};
use mockall::automock;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::gateway::{
    GatewayError,
    records::{Bet, DeleteOutcome, Game, Season, User},
};

/// Side of a game a bet backs, as sent to `/api/bets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetType {
    Home,
    Away,
}

impl BetType {
    /// Parses a user token, ignoring case.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_uppercase().as_str() {
            "HOME" => Some(BetType::Home),
            "AWAY" => Some(BetType::Away),
            _ => None,
        }
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BetType::Home => "HOME",
            BetType::Away => "AWAY",
        }
    }
}

/// Operations exposed by the season/bet API.
///
/// Scalar answers are `Option` because the API may answer `200` with an empty
/// or `null` body; callers decide whether that absence is an error. List
/// answers treat a `null` body as an empty list.
#[automock]
pub trait Gateway {
    /// `POST /api/seasons` and returns the new season id.
    async fn create_season(
        &self,
        start_week: i64,
        end_week: i64,
        initial_coins: i64,
    ) -> Result<Option<i64>, GatewayError>;
    /// `GET /api/seasons/active`.
    async fn get_active_seasons(&self) -> Result<Vec<Season>, GatewayError>;
    /// `GET /api/seasons/{id}`.
    async fn get_season_by_id(&self, season_id: i64) -> Result<Option<Season>, GatewayError>;
    /// `POST /api/users` and returns the user id. Idempotent upstream.
    async fn create_user(&self, discord_id: &str, username: &str)
    -> Result<Option<i64>, GatewayError>;
    /// `POST /api/users/{userId}/seasons/{seasonId}`.
    async fn add_user_to_season(&self, user_id: i64, season_id: i64) -> Result<(), GatewayError>;
    /// `POST /api/users/join-season`.
    async fn create_user_and_join_season(
        &self,
        discord_id: &str,
        username: &str,
        season_id: i64,
    ) -> Result<(), GatewayError>;
    /// `GET /api/users/seasons/{seasonId}`.
    async fn get_users_by_season(&self, season_id: i64) -> Result<Vec<User>, GatewayError>;
    /// `GET /api/users/{userId}/seasons/{seasonId}/coins`.
    async fn get_user_coins(&self, user_id: i64, season_id: i64)
    -> Result<Option<i64>, GatewayError>;
    /// `POST /api/bets` and returns the bet id.
    async fn place_bet(
        &self,
        user_id: i64,
        season_id: i64,
        game_id: i64,
        bet_type: BetType,
        amount: i64,
    ) -> Result<Option<i64>, GatewayError>;
    /// `GET /api/bets/users/{userId}/seasons/{seasonId}`.
    async fn get_user_bets(&self, user_id: i64, season_id: i64) -> Result<Vec<Bet>, GatewayError>;
    /// `GET /api/nfl/weeks`.
    async fn get_nfl_weeks(&self) -> Result<Vec<i64>, GatewayError>;
    /// `GET /api/nfl/games/{week}`.
    async fn get_nfl_games_by_week(&self, week: i64) -> Result<Vec<Game>, GatewayError>;
    /// `GET /api/nfl/schedule/{team}`.
    async fn get_team_schedule(&self, team: &str) -> Result<Vec<Game>, GatewayError>;
    /// `GET /api/nfl/games/id/{gameId}`.
    async fn get_game_by_id(&self, game_id: i64) -> Result<Option<Game>, GatewayError>;
    /// `DELETE /api/seasons/{id}`.
    ///
    /// A non-2xx answer is not an error: it becomes `deleted: false` with a
    /// message. Only transport and decode failures are returned as `Err`.
    async fn delete_season(&self, season_id: i64) -> Result<DeleteOutcome, GatewayError>;
}

/// HTTP client for the season/bet API.
///
/// # Examples
///
/// ```no_run
/// let gateway = HttpGateway::new("http://localhost:8080", Duration::from_secs(5))?;
/// let weeks = gateway.get_nfl_weeks().await?;
/// println!("Weeks: {:?}", weeks);
/// ```
pub struct HttpGateway {
    /// Base URL of the API, without trailing slash
    base: Url,
    /// HTTP client with the request timeout applied
    client: Client,
}

impl HttpGateway {
    /// Create a new [HttpGateway].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the season/bet API.
    /// * `timeout` - Upper bound for each request; expiry maps to [`GatewayError::Unreachable`].
    pub fn new(url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let base = Url::parse(url)?;
        if base.cannot_be_a_base() {
            anyhow::bail!("gateway url {} cannot carry a path", url);
        }
        let client = Client::builder().timeout(timeout).build()?;

        Ok(HttpGateway { base, client })
    }

    /// Builds the URL of an endpoint. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a request and returns the raw body of a 2xx answer.
    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<String, GatewayError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        debug!("response from {} -> {} {}", url.path(), status, body);

        if status.is_success() {
            Ok(body)
        } else {
            Err(status_error(status, body))
        }
    }

    async fn get(&self, segments: &[&str]) -> Result<String, GatewayError> {
        let url = self.endpoint(segments);
        info!("request GET {}", url.path());

        self.send(self.client.get(url.clone()), &url).await
    }

    async fn post(&self, segments: &[&str], query: &[(&str, String)]) -> Result<String, GatewayError> {
        let url = self.endpoint(segments);
        info!("request POST {}", url.path());
        debug!("query {:?}", query);

        self.send(self.client.post(url.clone()).query(query), &url)
            .await
    }
}

/// Maps a `reqwest` failure to the gateway taxonomy.
fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_decode() {
        GatewayError::Decode(error.to_string())
    } else {
        GatewayError::Unreachable(error.to_string())
    }
}

/// Maps a non-2xx status to the gateway taxonomy.
fn status_error(status: StatusCode, body: String) -> GatewayError {
    if status.is_client_error() {
        GatewayError::ClientError {
            status: status.as_u16(),
            body,
        }
    } else {
        GatewayError::ServerError {
            status: status.as_u16(),
            body,
        }
    }
}

/// Decodes a body that may be empty or `null`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<Option<T>, GatewayError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(None);
    }

    serde_json::from_str::<Option<T>>(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Decodes a list body, `null` and empty bodies being empty lists.
fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, GatewayError> {
    Ok(decode::<Vec<T>>(body)?.unwrap_or_default())
}

impl Gateway for HttpGateway {
    async fn create_season(
        &self,
        start_week: i64,
        end_week: i64,
        initial_coins: i64,
    ) -> Result<Option<i64>, GatewayError> {
        let body = self
            .post(
                &["api", "seasons"],
                &[
                    ("startWeek", start_week.to_string()),
                    ("endWeek", end_week.to_string()),
                    ("initialCoins", initial_coins.to_string()),
                ],
            )
            .await?;

        decode(&body)
    }

    async fn get_active_seasons(&self) -> Result<Vec<Season>, GatewayError> {
        let body = self.get(&["api", "seasons", "active"]).await?;
        decode_list(&body)
    }

    async fn get_season_by_id(&self, season_id: i64) -> Result<Option<Season>, GatewayError> {
        let body = self
            .get(&["api", "seasons", &season_id.to_string()])
            .await?;
        decode(&body)
    }

    async fn create_user(
        &self,
        discord_id: &str,
        username: &str,
    ) -> Result<Option<i64>, GatewayError> {
        let body = self
            .post(
                &["api", "users"],
                &[
                    ("discordId", discord_id.to_owned()),
                    ("username", username.to_owned()),
                ],
            )
            .await?;

        decode(&body)
    }

    async fn add_user_to_season(&self, user_id: i64, season_id: i64) -> Result<(), GatewayError> {
        self.post(
            &[
                "api",
                "users",
                &user_id.to_string(),
                "seasons",
                &season_id.to_string(),
            ],
            &[],
        )
        .await?;

        Ok(())
    }

    async fn create_user_and_join_season(
        &self,
        discord_id: &str,
        username: &str,
        season_id: i64,
    ) -> Result<(), GatewayError> {
        self.post(
            &["api", "users", "join-season"],
            &[
                ("discordId", discord_id.to_owned()),
                ("username", username.to_owned()),
                ("seasonId", season_id.to_string()),
            ],
        )
        .await?;

        Ok(())
    }

    async fn get_users_by_season(&self, season_id: i64) -> Result<Vec<User>, GatewayError> {
        let body = self
            .get(&["api", "users", "seasons", &season_id.to_string()])
            .await?;
        decode_list(&body)
    }

    async fn get_user_coins(
        &self,
        user_id: i64,
        season_id: i64,
    ) -> Result<Option<i64>, GatewayError> {
        let body = self
            .get(&[
                "api",
                "users",
                &user_id.to_string(),
                "seasons",
                &season_id.to_string(),
                "coins",
            ])
            .await?;
        decode(&body)
    }

    async fn place_bet(
        &self,
        user_id: i64,
        season_id: i64,
        game_id: i64,
        bet_type: BetType,
        amount: i64,
    ) -> Result<Option<i64>, GatewayError> {
        let body = self
            .post(
                &["api", "bets"],
                &[
                    ("userId", user_id.to_string()),
                    ("seasonId", season_id.to_string()),
                    ("gameId", game_id.to_string()),
                    ("betType", bet_type.as_str().to_owned()),
                    ("amount", amount.to_string()),
                ],
            )
            .await?;

        decode(&body)
    }

    async fn get_user_bets(&self, user_id: i64, season_id: i64) -> Result<Vec<Bet>, GatewayError> {
        let body = self
            .get(&[
                "api",
                "bets",
                "users",
                &user_id.to_string(),
                "seasons",
                &season_id.to_string(),
            ])
            .await?;
        decode_list(&body)
    }

    async fn get_nfl_weeks(&self) -> Result<Vec<i64>, GatewayError> {
        let body = self.get(&["api", "nfl", "weeks"]).await?;
        decode_list(&body)
    }

    async fn get_nfl_games_by_week(&self, week: i64) -> Result<Vec<Game>, GatewayError> {
        let body = self
            .get(&["api", "nfl", "games", &week.to_string()])
            .await?;
        decode_list(&body)
    }

    async fn get_team_schedule(&self, team: &str) -> Result<Vec<Game>, GatewayError> {
        let body = self.get(&["api", "nfl", "schedule", team]).await?;
        decode_list(&body)
    }

    async fn get_game_by_id(&self, game_id: i64) -> Result<Option<Game>, GatewayError> {
        let body = self
            .get(&["api", "nfl", "games", "id", &game_id.to_string()])
            .await?;
        decode(&body)
    }

    async fn delete_season(&self, season_id: i64) -> Result<DeleteOutcome, GatewayError> {
        let url = self.endpoint(&["api", "seasons", &season_id.to_string()]);
        info!("request DELETE {}", url.path());

        match self.send(self.client.delete(url.clone()), &url).await {
            Ok(body) => decode::<DeleteOutcome>(&body)?
                .ok_or_else(|| GatewayError::Decode("empty delete response".to_owned())),
            Err(
                GatewayError::ClientError { status, body }
                | GatewayError::ServerError { status, body },
            ) => {
                warn!("failed to delete season {}: {} {}", season_id, status, body);

                // Keep the upstream message when the error body is a delete outcome
                let message = serde_json::from_str::<DeleteOutcome>(&body)
                    .ok()
                    .map(|outcome| outcome.message)
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| format!("Error: HTTP {}", status));

                Ok(DeleteOutcome {
                    deleted: false,
                    message,
                })
            }
            Err(error) => Err(error),
        }
    }
}
