//! STOMP 1.2 client session over any message-oriented transport.
//!
//! [`Session`] drives the protocol (CONNECT, heart-beats, SUBSCRIBE, SEND,
//! DISCONNECT, reconnect) on top of a [`Transport`], and reports broker
//! traffic to a [`Delegate`]. [`Client`] runs a session on a tokio task;
//! [`TcpTransport`] is a ready-made transport for plain TCP brokers.
pub mod client;
pub mod codec;
pub mod command;
pub mod config;
pub mod error;
pub mod frame;
pub mod header;
pub mod heartbeat;
pub mod parser;
pub mod session;
pub mod tcp;
pub mod timer;
pub mod transport;

pub use client::Client;
pub use codec::{StompCodec, StompItem, serialize_frame};
pub use command::Command;
pub use config::{ReconnectPolicy, SessionConfig};
pub use error::{ClientError, FrameError, SessionError};
pub use frame::Frame;
pub use header::{Header, HeaderKind, Headers};
pub use heartbeat::parse_heartbeat_header;
pub use parser::parse_frame;
pub use session::{Delegate, STOMP_VERSION, Session, SessionState};
pub use tcp::TcpTransport;
pub use transport::{Transport, TransportEvent};
