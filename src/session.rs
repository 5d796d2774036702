use bytes::Bytes;
use std::sync::{Arc, Weak};
use tokio::time::Instant;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::command::Command;
use crate::config::{ReconnectPolicy, SessionConfig};
use crate::error::SessionError;
use crate::frame::Frame;
use crate::header::Header;
use crate::heartbeat::{
    KEEP_ALIVE, client_heartbeat_header, keep_alive_period, parse_heartbeat_header,
};
use crate::parser::parse_frame;
use crate::timer::Timer;
use crate::transport::{Transport, TransportEvent};

/// Protocol version requested in CONNECT.
pub const STOMP_VERSION: &str = "1.2";

/// Receives what the session learns from the broker.
///
/// At most one call per relevant event. `on_message` may arrive before
/// `on_connected`.
pub trait Delegate: Send + Sync {
    /// The broker answered CONNECT with CONNECTED.
    fn on_connected(&self);
    /// An inbound frame failed to parse, the broker sent ERROR, or the
    /// transport reported a problem.
    fn on_error(&self, error: SessionError);
    /// A MESSAGE frame with a body arrived for `destination`.
    fn on_message(&self, body: Bytes, destination: &str);
}

/// Lifecycle of a `Session`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// Transport opening, or CONNECT sent and CONNECTED not yet seen.
    Connecting,
    Connected,
    /// `disconnect()` was called; waiting for the transport to close.
    Disconnecting,
    /// The transport closed; a reconnect attempt is scheduled.
    ReconnectPending,
}

/// Client-side STOMP session over a `Transport`.
///
/// The session builds outbound frames, keeps the heart-beat timer, reacts
/// to transport events and forwards broker traffic to its `Delegate`.
/// It owns no task and takes no locks: whoever drives it must call every
/// method from one context, feed transport events through `handle_event`,
/// and call `poll_timers` once `next_deadline` has passed. `Client` does
/// this on a tokio task.
pub struct Session<T> {
    transport: T,
    config: SessionConfig,
    state: SessionState,
    heartbeat: Timer,
    reconnect: Timer,
    /// Closes still owed by links torn down with `disconnect()` before
    /// `connect()` was called again. Those closes are not acted on.
    stale_closes: usize,
    delegate: Option<Weak<dyn Delegate>>,
}

impl<T: Transport> Session<T> {
    /// Create an `Idle` session. Nothing is sent until `connect()`.
    pub fn new(transport: T, config: SessionConfig) -> Self {
        Self {
            transport,
            config,
            state: SessionState::Idle,
            heartbeat: Timer::new(),
            reconnect: Timer::new(),
            stale_closes: 0,
            delegate: None,
        }
    }

    /// Register the delegate. Only a weak reference is kept; the caller
    /// decides how long it lives.
    pub fn set_delegate(&mut self, delegate: Weak<dyn Delegate>) {
        self.delegate = Some(delegate);
    }

    /// Builder-style `set_delegate`.
    pub fn with_delegate(mut self, delegate: Weak<dyn Delegate>) -> Self {
        self.set_delegate(delegate);
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The configuration the session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// When the next keep-alive is due, if heart-beating is active.
    pub fn heartbeat_deadline(&self) -> Option<Instant> {
        self.heartbeat.deadline()
    }

    /// When the pending reconnect attempt fires, if one is scheduled.
    pub fn reconnect_deadline(&self) -> Option<Instant> {
        self.reconnect.deadline()
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.heartbeat.deadline(), self.reconnect.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Ask the transport to open. CONNECT is sent once it reports `Opened`.
    /// Cancels a pending reconnect.
    ///
    /// Called while a `disconnect()` is still waiting for its `Closed`,
    /// that close is ignored when it arrives: it belongs to the old link.
    pub fn connect(&mut self) {
        if self.state == SessionState::Disconnecting {
            self.stale_closes += 1;
        }
        self.reconnect.cancel();
        self.state = SessionState::Connecting;
        debug!("opening transport");
        self.transport.connect();
    }

    /// Send DISCONNECT and ask the transport to close.
    ///
    /// The frame is sent whatever the current state; the broker is not
    /// asked to confirm it. Both timers are cancelled.
    ///
    /// With a link open or opening the session moves to `Disconnecting`
    /// and waits for `Closed`; whether that close triggers a reconnect
    /// depends on `ReconnectPolicy`. With no link (`Idle`, or a reconnect
    /// pending) there is nothing to wait for and the session goes straight
    /// to `Idle`.
    pub fn disconnect(&mut self) {
        self.send_frame(Frame::new(Command::Disconnect));
        self.heartbeat.cancel();
        self.reconnect.cancel();
        self.state = match self.state {
            SessionState::Connecting | SessionState::Connected | SessionState::Disconnecting => {
                SessionState::Disconnecting
            }
            SessionState::Idle | SessionState::ReconnectPending => SessionState::Idle,
        };
        debug!(state = ?self.state, "closing transport");
        self.transport.disconnect();
    }

    /// Subscribe to `destination` and return the generated subscription id.
    pub fn subscribe(&mut self, destination: &str) -> String {
        self.subscribe_with_parameters(destination, std::iter::empty::<(String, String)>())
    }

    /// Subscribe to `destination`, adding one custom header per parameter.
    ///
    /// Returns the generated subscription id. Parameters are not checked:
    /// an `id` or `destination` parameter replaces the generated header of
    /// the same name, and the returned id then no longer matches the one
    /// on the wire.
    pub fn subscribe_with_parameters<I, K, V>(&mut self, destination: &str, parameters: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let id = Uuid::new_v4().to_string();
        let mut frame = Frame::new(Command::Subscribe)
            .header(Header::Id(id.clone()))
            .header(Header::Destination(destination.to_string()));
        for (key, value) in parameters {
            frame = frame.header(Header::custom(key, value));
        }
        self.send_frame(frame);
        id
    }

    /// Send UNSUBSCRIBE for `subscription_id`, the value `subscribe`
    /// returned.
    pub fn unsubscribe(&mut self, destination: &str, subscription_id: &str) {
        let frame = Frame::new(Command::Unsubscribe)
            .header(Header::Id(subscription_id.to_string()))
            .header(Header::Destination(destination.to_string()));
        self.send_frame(frame);
    }

    /// Send `body` to `destination`, with a `content-type` header when one
    /// is given.
    pub fn send(&mut self, body: &str, destination: &str, content_type: Option<&str>) {
        let mut frame = Frame::new(Command::Send)
            .header(Header::Destination(destination.to_string()))
            .body(body);
        if let Some(content_type) = content_type {
            frame = frame.header(Header::ContentType(content_type.to_string()));
        }
        self.send_frame(frame);
    }

    /// Send a plain-text body with no `content-type` header.
    pub fn send_text(&mut self, body: &str, destination: &str) {
        self.send(body, destination, None);
    }

    /// Send a JSON document; sets `content-type:application/json`.
    pub fn send_json(&mut self, json: &str, destination: &str) {
        self.send(json, destination, Some("application/json"));
    }

    /// Route one transport event to the matching `on_transport_*` method.
    pub fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Opened => self.on_transport_opened(),
            TransportEvent::Closed => self.on_transport_closed(),
            TransportEvent::Text(text) => self.on_transport_text(&text),
            TransportEvent::Error(description) => self.on_transport_error(description),
        }
    }

    /// Send CONNECT advertising `heart-beat:<interval_ms>,0`.
    ///
    /// Configured pass-through headers go first so they cannot replace
    /// `accept-version` or `heart-beat`.
    ///
    /// Cancels a pending reconnect. Ignored while `Disconnecting`: the
    /// link was given up before it opened.
    pub fn on_transport_opened(&mut self) {
        if self.state == SessionState::Disconnecting {
            debug!("transport opened after disconnect, ignoring");
            return;
        }
        debug!("transport opened");
        self.reconnect.cancel();
        let mut frame = Frame::new(Command::Connect);
        for (key, value) in &self.config.headers {
            frame = frame.header(Header::from_wire(key.as_str(), value.as_str()));
        }
        let frame = frame
            .header(Header::AcceptVersion(STOMP_VERSION.to_string()))
            .header(Header::HeartBeat(client_heartbeat_header(
                self.config.heartbeat_interval,
            )));
        self.state = SessionState::Connecting;
        self.send_frame(frame);
    }

    /// The transport closed. Cancels the heart-beat and, per
    /// `ReconnectPolicy`, schedules a reconnect after `reconnect_delay`.
    ///
    /// A close owed by a link dropped before the latest `connect()` is
    /// ignored.
    pub fn on_transport_closed(&mut self) {
        if self.stale_closes > 0 {
            self.stale_closes -= 1;
            debug!("previous transport closed, ignoring");
            return;
        }
        self.heartbeat.cancel();
        let intentional = self.state == SessionState::Disconnecting;
        let reconnect = match self.config.reconnect {
            ReconnectPolicy::Always => true,
            ReconnectPolicy::UnlessDisconnected => !intentional,
            ReconnectPolicy::Never => false,
        };
        if reconnect {
            debug!(
                delay = ?self.config.reconnect_delay,
                intentional, "transport closed, reconnect scheduled"
            );
            self.reconnect
                .schedule(Instant::now() + self.config.reconnect_delay);
            self.state = SessionState::ReconnectPending;
        } else {
            debug!(intentional, "transport closed");
            self.state = SessionState::Idle;
        }
    }

    /// Parse inbound text and dispatch it.
    ///
    /// - CONNECTED: state becomes `Connected`, then `on_connected`.
    /// - MESSAGE: `on_message` with the body; a MESSAGE without body is
    ///   dropped.
    /// - ERROR: `on_error` with the `message` header.
    /// - Unparsable text: `on_error` with the parse error.
    ///
    /// Text made only of line breaks is a broker heart-beat and ignored.
    pub fn on_transport_text(&mut self, text: &str) {
        if !text.is_empty() && text.bytes().all(|b| b == b'\r' || b == b'\n') {
            trace!("received heart-beat");
            return;
        }

        let frame = match parse_frame(text) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "failed to parse inbound frame");
                self.notify_error(e.into());
                return;
            }
        };
        trace!(command = %frame.command(), "received frame");

        match frame.command() {
            Command::Connected => {
                self.state = SessionState::Connected;
                if let Some(value) = frame.headers().get("heart-beat") {
                    let (sx, sy) = parse_heartbeat_header(value);
                    debug!(sx, sy, "broker heart-beat");
                }
                if let Some(delegate) = self.delegate() {
                    delegate.on_connected();
                }
            }
            Command::Message => {
                let destination = frame.destination().to_string();
                match frame.into_body() {
                    Some(body) => {
                        if let Some(delegate) = self.delegate() {
                            delegate.on_message(Bytes::from(body), &destination);
                        }
                    }
                    None => debug!(%destination, "dropping MESSAGE without body"),
                }
            }
            Command::Error => {
                let message = frame.message().to_string();
                warn!(%message, "broker sent ERROR");
                self.notify_error(SessionError::Server { message });
            }
            other => trace!(command = %other, "ignoring frame"),
        }
    }

    /// Forward a transport problem to the delegate. Does not reconnect;
    /// only `Closed` does.
    pub fn on_transport_error(&mut self, description: String) {
        warn!(%description, "transport error");
        self.notify_error(SessionError::Transport(description));
    }

    /// Fire every timer whose deadline is at or before `now`.
    ///
    /// A due heart-beat writes a bare keep-alive and reschedules itself; a
    /// due reconnect asks the transport to open again.
    pub fn poll_timers(&mut self, now: Instant) {
        if self.heartbeat.fire_if_due(now) {
            trace!("writing keep-alive");
            self.transport.write(KEEP_ALIVE);
            self.reset_heartbeat(now);
        }
        if self.reconnect.fire_if_due(now) {
            debug!("reconnecting");
            self.state = SessionState::Connecting;
            self.transport.connect();
        }
    }

    fn send_frame(&mut self, frame: Frame) {
        trace!(command = %frame.command(), "sending frame");
        self.transport.write(&frame.to_wire());
        self.reset_heartbeat(Instant::now());
    }

    fn reset_heartbeat(&mut self, now: Instant) {
        self.heartbeat.cancel();
        if let Some(period) = keep_alive_period(self.config.heartbeat_interval) {
            self.heartbeat.schedule(now + period);
        }
    }

    fn delegate(&self) -> Option<Arc<dyn Delegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    fn notify_error(&self, error: SessionError) {
        if let Some(delegate) = self.delegate() {
            delegate.on_error(error);
        }
    }
}
