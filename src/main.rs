//! Seasons Bot - A chat bot for NFL betting seasons.
//!
//! This is the main entry point of the bot, which answers chat commands by calling a
//! remote season/bet API and rendering the results as rich embeds.
//!
//! # Overview
//!
//! Players create and join betting seasons, bet virtual coins on NFL games and compare
//! their balances on a leaderboard. The bot holds no betting state of its own: seasons,
//! users, bets and games all live behind the API. The bot only keeps short-lived state,
//! the recently seen events and the game lists being browsed.
//!
//! # Features
//!
//! - **Seasons**: Create, join, inspect and delete betting seasons
//! - **Bets**: Place bets on upcoming games, list them, check the coin balance
//! - **Leaderboard**: Top ten players of a season, with the caller's position
//! - **NFL Schedule**: Week ranges, games of a week and team schedules, browsed one game
//!   at a time with previous/next controls
//! - **Moderation**: Bulk deletion of recent channel messages
//! - **Duplicate Suppression**: Redelivered platform events are handled once
//! - **YAML Configuration**: Simple configuration file format with environment variable support
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! gateway:
//!   url: "http://localhost:8080"
//!   timeout_secs: 5
//!
//! nfl:
//!   season_start: "2024-09-05"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `SEASONS_BOT_` prefix:
//!
//! ```bash
//! export SEASONS_BOT_GATEWAY__URL="http://bets.internal:8080"
//! export SEASONS_BOT_PAGINATION__TTL_SECS="600"
//! ```
//!
//! # Usage
//!
//! The chat platform is reached through a relay process exchanging JSON lines on the
//! bot's stdin and stdout (see [`bridge`]):
//!
//! ```bash
//! relay | seasons-bot --config config.yaml | relay-apply
//! ```
//!
//! # Bot Commands
//!
//! - `!help` - Display help information
//! - `!create_season <start_week> <end_week> <initial_coins>` - Create a season
//! - `!join_season <season_id>` - Join a season
//! - `!bet <season_id> <game_id> <HOME|AWAY> <amount>` - Place a bet
//! - `!my_bets <season_id>` / `!balance <season_id>` / `!leaderboard <season_id>`
//! - `!nfl_weeks`, `!nfl_games <week>`, `!team_schedule <team name>`
//!
//! # Architecture
//!
//! - [`bot`] - Event loop wiring the relay, the dedup window and the commander
//! - [`bridge`] - JSON lines exchange with the chat platform relay
//! - [`commands`] - Command parsing, routing, handlers and embed rendering
//! - [`config`] - YAML configuration file structures and loading with environment variable support
//! - [`dedup`] - Time-boxed suppression of repeated event identifiers
//! - [`gateway`] - Season/bet API client
//! - [`pagination`] - Browsing sessions and their navigation controls
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//!   - Set to `debug` for verbose output
//!   - Set to `warn` or `error` for minimal logging

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod bridge;
mod commands;
mod config;
mod dedup;
mod gateway;
mod pagination;

/// Command-line arguments for the seasons bot.
///
/// Everything else is configured through the YAML file (see [`config::Config`]).
///
/// # Examples
///
/// ```bash
/// seasons-bot --config config.yaml
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Values can be overridden with `SEASONS_BOT_` environment variables, nested
    /// keys being separated by `__`.
    #[arg(short, long)]
    config: String,
}

/// Main entry point for the seasons bot.
///
/// 1. **Logging Setup**: `info` level by default, overridable with `RUST_LOG`.
///    Logs go to stderr, stdout carries the outbound messages
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML file merged with the environment
/// 4. **Bot Initialization**: Builds the API client and the in-memory stores
/// 5. **Bot Execution**: Handles relay events until end of input or Ctrl-C
///
/// # Error Handling
///
/// Configuration and initialization errors are logged and the process returns early.
/// Failures while handling a command are answered in the chat and never stop the bot.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug seasons-bot --config config.yaml
/// ```
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting seasons-bot {}...", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments
    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    // Launch bot
    let bot = match Bot::new(config) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };
    bot.start().await;
}
