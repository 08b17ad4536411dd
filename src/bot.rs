//! Bot module wiring the relay, the deduplication window and the commander.
//!
//! This module provides the main [`Bot`] implementation. It owns every shared
//! component, created at startup and torn down at shutdown.
//!
//! # Event Processing Flow
//!
//! ```text
//! Relay line → Decode → Bot author? → Dedup gate → Parse → Dispatch → Relay line
//!                                              └─ Control → Navigation → Relay line
//! ```
//!
//! Each inbound event is handled on its own task so a slow API call never stalls
//! unrelated events. A single writer task serialises the answers.
//!
//! # Example
//!
//! ```no_run
//! let config = Config::load("config.yaml")?;
//!
//! // Create and start the bot
//! let bot = Bot::new(config)?;
//! bot.start().await; // Runs until end of input or Ctrl-C
//! ```

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use log::{debug, info};

use crate::{
    bridge::{InboundEvent, LineReader, OutboundMessage, spawn_writer},
    commands::{CommandContext, Commander, NflCalendar},
    config::Config,
    dedup::DedupWindow,
    gateway::{Gateway, HttpGateway},
    pagination::SessionStore,
};

/// Main bot structure.
///
/// # Thread Safety
///
/// The bot is shared between event tasks behind an `Arc`. The deduplication
/// window and the session store lock internally; the gateway is stateless.
pub struct Bot<G: Gateway> {
    /// Gate suppressing redelivered events
    dedup: DedupWindow,
    /// Command parser and executor
    commander: Commander<G>,
}

impl<G: Gateway> Bot<G> {
    /// Assembles a bot from its components.
    pub fn with_components(dedup: DedupWindow, commander: Commander<G>) -> Self {
        Bot { dedup, commander }
    }

    /// Handles one inbound event and returns the answer to send, if any.
    ///
    /// Nothing is answered for messages of bots, for redelivered events and for
    /// chat messages that are not commands.
    pub async fn handle(&self, event: InboundEvent) -> Option<OutboundMessage> {
        match event {
            InboundEvent::Command(event) => {
                if event.author_is_bot {
                    return None;
                }
                if !self.dedup.admit(&event.event_id) {
                    return None;
                }

                // Return silently if the message is not a command
                let parsed = self.commander.parse(&event.text).ok()?;

                info!(
                    "handling {} from {} in {}",
                    parsed.verb, event.author_id, event.channel
                );

                let context = CommandContext {
                    author_id: event.author_id,
                    author_name: event.author_name,
                    can_manage_messages: event.can_manage_messages,
                    now: Utc::now(),
                };
                let result = self.commander.dispatch(&parsed, &context).await;

                Some(OutboundMessage {
                    channel: event.channel,
                    reply_to: event.event_id,
                    response: result.response,
                    purge: result.purge,
                    delete_after_secs: result.delete_after_secs,
                })
            }
            InboundEvent::Control(event) => {
                if !self.dedup.admit(&event.interaction_id) {
                    return None;
                }

                debug!(
                    "handling control {} from {}",
                    event.control_id, event.user_id
                );

                Some(OutboundMessage {
                    response: self.commander.handle_control(&event.control_id),
                    channel: event.channel,
                    reply_to: event.interaction_id,
                    purge: None,
                    delete_after_secs: None,
                })
            }
        }
    }
}

impl Bot<HttpGateway> {
    /// Creates a new Bot instance from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is not a valid base URL or the HTTP
    /// client cannot be built.
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let gateway = HttpGateway::new(&config.gateway.url, config.gateway.timeout())?;

        let sessions = SessionStore::new(
            Duration::from_secs(config.pagination.ttl_secs),
            config.pagination.max_sessions,
        );
        let calendar = NflCalendar::new(config.nfl.season_start, config.nfl.last_week);
        let dedup = DedupWindow::new(Duration::from_secs(config.dedup.window_secs));

        info!("using season/bet API at {}", config.gateway.url);

        Ok(Bot::with_components(
            dedup,
            Commander::new(gateway, sessions, calendar),
        ))
    }

    /// Reads events from stdin and answers on stdout until end of input or Ctrl-C.
    ///
    /// Every event is handled on its own task. On shutdown the pending dedup
    /// releases are aborted and the answers of in-flight events are flushed.
    pub async fn start(self) {
        let bot = Arc::new(self);
        let mut reader = LineReader::new(tokio::io::stdin());
        let (sender, writer) = spawn_writer(tokio::io::stdout());

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        info!("waiting for events on stdin");

        loop {
            tokio::select! {
                event = reader.next_event() => {
                    let Some(event) = event else {
                        info!("end of input");
                        break;
                    };

                    let bot = Arc::clone(&bot);
                    let sender = sender.clone();
                    tokio::spawn(async move {
                        if let Some(message) = bot.handle(event).await {
                            // The writer only stops once every sender is gone
                            let _ = sender.send(message);
                        }
                    });
                }
                _ = &mut shutdown => {
                    info!("interrupted");
                    break;
                }
            }
        }

        bot.dedup.shutdown();
        drop(sender);
        let _ = writer.await;

        info!("stopped");
    }
}
