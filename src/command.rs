use std::fmt;
use std::str::FromStr;

use crate::error::FrameError;

/// The STOMP 1.2 commands exchanged by this client.
///
/// `Connect`, `Disconnect`, `Subscribe`, `Unsubscribe` and `Send` are sent
/// by the client; `Connected`, `Message` and `Error` arrive from the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Connect,
    Disconnect,
    Subscribe,
    Unsubscribe,
    Send,
    Connected,
    Message,
    Error,
}

impl Command {
    /// Every command, client commands first.
    pub const ALL: [Command; 8] = [
        Command::Connect,
        Command::Disconnect,
        Command::Subscribe,
        Command::Unsubscribe,
        Command::Send,
        Command::Connected,
        Command::Message,
        Command::Error,
    ];

    /// The exact uppercase wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Connect => "CONNECT",
            Command::Disconnect => "DISCONNECT",
            Command::Subscribe => "SUBSCRIBE",
            Command::Unsubscribe => "UNSUBSCRIBE",
            Command::Send => "SEND",
            Command::Connected => "CONNECTED",
            Command::Message => "MESSAGE",
            Command::Error => "ERROR",
        }
    }

    /// Whether the broker (rather than the client) originates this command.
    pub fn is_server_command(&self) -> bool {
        matches!(
            self,
            Command::Connected | Command::Message | Command::Error
        )
    }
}

impl FromStr for Command {
    type Err = FrameError;

    /// Case-sensitive exact match; no trimming.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.as_str() == text)
            .ok_or_else(|| FrameError::UnrecognizedCommand(text.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
