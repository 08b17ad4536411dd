//! Event exchange with the chat platform relay.
//!
//! The chat platform itself is external: a relay process forwards its events to
//! the bot and applies the bot's answers. Both sides exchange one JSON document
//! per line over the bot's stdin and stdout.
//!
//! # Inbound
//!
//! ```json
//! {"type":"command","event_id":"e1","author_id":"42","author_name":"alice","channel":"c1","text":"!help"}
//! {"type":"control","interaction_id":"i1","user_id":"42","channel":"c1","control_id":"nfl:next:<token>"}
//! ```
//!
//! # Outbound
//!
//! ```json
//! {"channel":"c1","reply_to":"e1","response":{"kind":"embed","embed":{...}}}
//! ```
//!
//! # Modules
//!
//! - `stdio` - Line reader and writer task

mod stdio;

use serde::{Deserialize, Serialize};

use crate::commands::Response;

pub use crate::bridge::stdio::{LineReader, spawn_writer};

/// An event forwarded by the relay.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// A chat message, possibly a command
    Command(CommandEvent),
    /// A navigation control activation
    Control(ControlEvent),
}

/// A chat message.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CommandEvent {
    /// Platform identifier of the message, unique per event
    pub event_id: String,
    pub author_id: String,
    pub author_name: String,
    /// Messages of bots, this one included, are never handled
    #[serde(default)]
    pub author_is_bot: bool,
    /// Whether the author may delete messages of the channel
    #[serde(default)]
    pub can_manage_messages: bool,
    pub channel: String,
    pub text: String,
}

/// A click on a navigation control.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ControlEvent {
    /// Platform identifier of the interaction, unique per click
    pub interaction_id: String,
    pub user_id: String,
    pub channel: String,
    /// Identifier of the control, as rendered by the bot
    pub control_id: String,
}

/// An answer for the relay to apply.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub channel: String,
    /// Event or interaction the message answers
    pub reply_to: String,
    pub response: Response,
    /// Number of recent messages to delete first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purge: Option<u32>,
    /// Delete the message itself after this many seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_after_secs: Option<u64>,
}
