use thiserror::Error;

/// Errors produced while parsing STOMP wire text into a `Frame`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The text contained nothing to parse.
    #[error("received frame is empty")]
    EmptyFrame,
    /// More than one blank-line separator was found.
    #[error("frame does not follow the protocol: {segments} segments, at most 2 allowed")]
    MalformedFrame { segments: usize },
    /// The command/header segment has no first line.
    #[error("frame has no command")]
    MissingCommand,
    /// The first line is not one of the eight STOMP commands.
    #[error("unrecognized command: {0:?}")]
    UnrecognizedCommand(String),
}

/// Errors reported to the consumer through `Delegate::on_error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Inbound text could not be parsed. The session stays connected.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
    /// The broker sent an ERROR frame; `message` is its `message` header.
    #[error("{message}")]
    Server { message: String },
    /// Best-effort description forwarded from the transport.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors returned by `Client` operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The background session task has stopped.
    #[error("session task closed")]
    Closed,
}
