/// A bidirectional, message-oriented transport carrying STOMP text.
///
/// All three operations are non-blocking: they start the work and return.
/// Outcomes come back to the session as `TransportEvent`s, delivered one
/// at a time, in order.
///
/// Every link started by `connect` ends with exactly one `Closed`,
/// whether or not it reported `Opened` first. A link abandoned by
/// `disconnect` before it opened should report only `Closed`.
pub trait Transport {
    /// Begin opening the connection. Success is reported as `Opened`.
    fn connect(&mut self);
    /// Begin closing the connection. Completion is reported as `Closed`.
    /// With no link open or opening there is nothing to report.
    fn disconnect(&mut self);
    /// Send one opaque text message.
    fn write(&mut self, text: &str);
}

/// Notifications a transport delivers back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The link is open; the session sends CONNECT.
    Opened,
    /// The link is gone, after `disconnect` or on its own.
    Closed,
    /// One complete inbound message.
    Text(String),
    /// A problem worth reporting. Does not imply `Closed`.
    Error(String),
}
