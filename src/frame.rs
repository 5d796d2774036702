use std::fmt;
use std::str::FromStr;

use crate::codec::serialize_frame;
use crate::command::Command;
use crate::error::FrameError;
use crate::header::{Header, Headers};
use crate::parser::parse_frame;

/// A STOMP frame: a command, a set of headers unique by key, and an
/// optional text body.
///
/// Frames are built once (by the session for outbound traffic, by the
/// parser for inbound text) and then only read. "No body" (`None`) and
/// "empty body" (`Some("")`) are distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    command: Command,
    headers: Headers,
    body: Option<String>,
}

impl Frame {
    /// Create a frame with no headers and no body.
    pub fn new(command: Command) -> Self {
        Self {
            command,
            headers: Headers::new(),
            body: None,
        }
    }

    pub(crate) fn from_parts(command: Command, headers: Headers, body: Option<String>) -> Self {
        Self {
            command,
            headers,
            body,
        }
    }

    /// Add a header (builder style). A header with the same key replaces
    /// the existing one.
    pub fn header(mut self, header: Header) -> Self {
        self.headers.insert(header);
        self
    }

    /// Set the body (builder style).
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// The header set, one header per key.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The body, if the frame has one. `Some("")` is an empty body.
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Consume the frame, returning its body.
    pub fn into_body(self) -> Option<String> {
        self.body
    }

    /// Value of the `message` header, or `""` when there is none.
    pub fn message(&self) -> &str {
        self.headers.get("message").unwrap_or_default()
    }

    /// Value of the `destination` header, or `""` when there is none.
    pub fn destination(&self) -> &str {
        self.headers.get("destination").unwrap_or_default()
    }

    /// Render the frame in STOMP wire format.
    pub fn to_wire(&self) -> String {
        serialize_frame(self)
    }
}

impl FromStr for Frame {
    type Err = FrameError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_frame(text)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Command: {}", self.command)?;
        for h in &self.headers {
            writeln!(f, "{}: {}", h.key(), h.value())?;
        }
        match &self.body {
            Some(body) => writeln!(f, "Body ({} bytes)", body.len()),
            None => writeln!(f, "Body (absent)"),
        }
    }
}
