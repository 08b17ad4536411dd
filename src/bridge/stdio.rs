//! JSON lines transport.

use log::{error, warn};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader},
    sync::mpsc::{self, UnboundedSender},
    task::JoinHandle,
};

use crate::bridge::{InboundEvent, OutboundMessage};

/// Reads inbound events, one JSON document per line.
pub struct LineReader<R> {
    input: BufReader<R>,
    /// Bytes of the line being read
    line: Vec<u8>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(input: R) -> Self {
        LineReader {
            input: BufReader::new(input),
            line: Vec::new(),
        }
    }

    /// Next well-formed event, or `None` at end of input.
    ///
    /// Blank lines, lines that are not UTF-8 and lines that are not a known
    /// event are skipped. Only a read failure ends the input early.
    pub async fn next_event(&mut self) -> Option<InboundEvent> {
        loop {
            self.line.clear();
            match self.input.read_until(b'\n', &mut self.line).await {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    error!("Failed to read inbound event: {}", e);
                    return None;
                }
            }

            if self.line.trim_ascii().is_empty() {
                continue;
            }

            match serde_json::from_slice(&self.line) {
                Ok(event) => return Some(event),
                Err(e) => warn!("Skipping malformed inbound event: {}", e),
            }
        }
    }
}

/// Spawns the task writing outbound messages, one JSON document per line.
///
/// The task ends once every sender is dropped, or when the output fails.
pub fn spawn_writer<W>(mut output: W) -> (UnboundedSender<OutboundMessage>, JoinHandle<()>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (sender, mut receiver) = mpsc::unbounded_channel::<OutboundMessage>();

    let handle = tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            let mut line = match serde_json::to_string(&message) {
                Ok(line) => line,
                Err(e) => {
                    error!("Failed to encode outbound message: {}", e);
                    continue;
                }
            };
            line.push('\n');

            let written = async {
                output.write_all(line.as_bytes()).await?;
                output.flush().await
            };
            if let Err(e) = written.await {
                error!("Failed to write outbound message: {}", e);
                break;
            }
        }
    });

    (sender, handle)
}
