//! Test doubles shared by the session and client tests.
#![allow(dead_code)]

use bytes::Bytes;
use std::sync::{Arc, Weak};
use stomp_session::{Delegate, SessionError, Transport};
use tokio::sync::mpsc;

/// Everything the session asked of its transport, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect,
    Disconnect,
    Write(String),
}

pub struct MockTransport {
    calls: mpsc::UnboundedSender<Call>,
}

impl Transport for MockTransport {
    fn connect(&mut self) {
        let _ = self.calls.send(Call::Connect);
    }

    fn disconnect(&mut self) {
        let _ = self.calls.send(Call::Disconnect);
    }

    fn write(&mut self, text: &str) {
        let _ = self.calls.send(Call::Write(text.to_string()));
    }
}

pub fn mock_transport() -> (MockTransport, mpsc::UnboundedReceiver<Call>) {
    let (calls, rx) = mpsc::unbounded_channel();
    (MockTransport { calls }, rx)
}

/// Collect the calls recorded so far without waiting.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Call>) -> Vec<Call> {
    let mut calls = Vec::new();
    while let Ok(call) = rx.try_recv() {
        calls.push(call);
    }
    calls
}

/// The text of every `Write` call recorded so far.
pub fn drain_writes(rx: &mut mpsc::UnboundedReceiver<Call>) -> Vec<String> {
    drain(rx)
        .into_iter()
        .filter_map(|call| match call {
            Call::Write(text) => Some(text),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Connected,
    Error(SessionError),
    Message(Bytes, String),
}

pub struct ChannelDelegate {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Delegate for ChannelDelegate {
    fn on_connected(&self) {
        let _ = self.tx.send(Notification::Connected);
    }

    fn on_error(&self, error: SessionError) {
        let _ = self.tx.send(Notification::Error(error));
    }

    fn on_message(&self, body: Bytes, destination: &str) {
        let _ = self
            .tx
            .send(Notification::Message(body, destination.to_string()));
    }
}

pub fn channel_delegate() -> (Arc<ChannelDelegate>, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Arc::new(ChannelDelegate { tx }), rx)
}

pub fn weak(delegate: &Arc<ChannelDelegate>) -> Weak<dyn Delegate> {
    let weak: Weak<ChannelDelegate> = Arc::downgrade(delegate);
    weak
}

/// Route `tracing` output through the test harness. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
