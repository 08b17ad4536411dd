//! Betting handlers.
//!
//! A bet goes through a fixed sequence, stopping at the first failure:
//!
//! 1. check the bet type and the amount, without any network call
//! 2. resolve the requester to an upstream user
//! 3. fetch the game and refuse it once started
//! 4. fetch the balance and refuse a stake above it
//! 5. place the bet
//!
//! A refused bet therefore never reaches the placement call.

use log::{debug, info};

use crate::{
    commands::{
        CommandContext, CommandResult, DomainError, HandlerError,
        embed::Embed,
        embed_response::{format_balance, format_bet_placed, format_bets, format_handler_error},
    },
    gateway::{BetType, Gateway},
};

/// Resolves the requester to an upstream user id, creating the user if needed.
async fn resolve_user<G: Gateway>(
    gateway: &G,
    context: &CommandContext,
) -> Result<i64, HandlerError> {
    gateway
        .create_user(&context.author_id, &context.author_name)
        .await?
        .ok_or(HandlerError::Domain(DomainError::UserUnavailable))
}

async fn place_bet<G: Gateway>(
    gateway: &G,
    season_id: i64,
    game_id: i64,
    bet_type: &str,
    amount: i64,
    context: &CommandContext,
) -> Result<Embed, HandlerError> {
    let bet_type = BetType::parse(bet_type).ok_or(DomainError::InvalidBetType)?;
    if amount <= 0 {
        return Err(DomainError::InvalidAmount.into());
    }

    let user_id = resolve_user(gateway, context).await?;

    let game = match gateway.get_game_by_id(game_id).await {
        Ok(Some(game)) => game,
        Ok(None) => return Err(DomainError::GameUnavailable.into()),
        Err(error) if error.is_not_found() => return Err(DomainError::GameNotFound.into()),
        Err(error) => return Err(error.into()),
    };

    let commence_time = game.commence_time.ok_or(DomainError::MissingStartTime)?;
    if context.now >= commence_time {
        return Err(DomainError::GameAlreadyStarted {
            home_team: game.home_team,
            away_team: game.away_team,
            commence_time,
        }
        .into());
    }

    let balance = gateway
        .get_user_coins(user_id, season_id)
        .await?
        .ok_or(DomainError::BalanceUnavailable)?;
    if balance < amount {
        return Err(DomainError::InsufficientFunds { balance }.into());
    }

    let bet_id = gateway
        .place_bet(user_id, season_id, game_id, bet_type, amount)
        .await?
        .ok_or(DomainError::BetNotPlaced)?;

    info!(
        "bet {} placed by user {} on game {} ({} {} coins)",
        bet_id,
        user_id,
        game_id,
        bet_type.as_str(),
        amount
    );

    Ok(format_bet_placed(
        bet_id, season_id, &game, bet_type, amount, context,
    ))
}

/// Places a bet of the requester.
///
/// # Arguments
///
/// * `gateway` - The season/bet API
/// * `season_id` - Season the bet counts for
/// * `game_id` - Game to bet on
/// * `bet_type` - `HOME` or `AWAY`, in any case
/// * `amount` - Stake in coins
/// * `context` - Requester and time of the request
pub async fn handle_bet<G: Gateway>(
    gateway: &G,
    season_id: i64,
    game_id: i64,
    bet_type: &str,
    amount: i64,
    context: &CommandContext,
) -> CommandResult {
    debug!(
        "handling bet command ({}, {}, {}, {})",
        season_id, game_id, bet_type, amount
    );

    let embed = place_bet(gateway, season_id, game_id, bet_type, amount, context)
        .await
        .unwrap_or_else(|error| {
            format_handler_error(
                "Failed to Place Bet",
                "An error occurred while placing the bet. Please try again.",
                &error,
            )
        });

    CommandResult::embed(embed)
}

/// Lists the bets of the requester in a season.
pub async fn handle_my_bets<G: Gateway>(
    gateway: &G,
    season_id: i64,
    context: &CommandContext,
) -> CommandResult {
    debug!("handling my_bets command for season {}", season_id);

    let bets = async {
        let user_id = resolve_user(gateway, context).await?;
        Ok::<_, HandlerError>(gateway.get_user_bets(user_id, season_id).await?)
    };

    let embed = match bets.await {
        Ok(bets) => format_bets(season_id, &bets, context),
        Err(error) => format_handler_error(
            "Failed to Retrieve Bets",
            "An error occurred while retrieving your bets. Please try again.",
            &error,
        ),
    };

    CommandResult::embed(embed)
}

/// Shows the balance of the requester against the initial coins of the season.
pub async fn handle_balance<G: Gateway>(
    gateway: &G,
    season_id: i64,
    context: &CommandContext,
) -> CommandResult {
    debug!("handling balance command for season {}", season_id);

    let balance = async {
        let user_id = resolve_user(gateway, context).await?;
        let balance = gateway
            .get_user_coins(user_id, season_id)
            .await?
            .ok_or(DomainError::BalanceUnavailable)?;
        let season = gateway
            .get_season_by_id(season_id)
            .await?
            .ok_or(DomainError::SeasonUnavailable)?;
        Ok::<_, HandlerError>((season, balance))
    };

    let embed = match balance.await {
        Ok((season, balance)) => format_balance(&season, balance, context),
        Err(error) => format_handler_error(
            "Failed to Retrieve Balance",
            "An error occurred while retrieving your balance. Please try again.",
            &error,
        ),
    };

    CommandResult::embed(embed)
}
