use std::time::Duration;

/// What the session does when the transport reports it has closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconnectPolicy {
    /// Reconnect after every close, including one that follows an
    /// intentional `disconnect()`.
    #[default]
    Always,
    /// Reconnect after unexpected closes only.
    UnlessDisconnected,
    /// Never reconnect automatically.
    Never,
}

/// Options for a `Session`.
///
/// Use builder-style methods to customise:
///
/// ```ignore
/// let config = SessionConfig::default()
///     .heartbeat_interval(Duration::from_secs(10))
///     .reconnect(ReconnectPolicy::UnlessDisconnected)
///     .login("guest", "guest");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Interval advertised in the CONNECT `heart-beat` header. Keep-alives
    /// are written every half interval. Zero disables heart-beating.
    pub heartbeat_interval: Duration,
    /// Delay between a transport close and the reconnect attempt.
    pub reconnect_delay: Duration,
    pub reconnect: ReconnectPolicy,
    /// Extra CONNECT headers, passed through verbatim.
    pub headers: Vec<(String, String)>,
}

impl SessionConfig {
    pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);
    pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interval advertised in CONNECT. `Duration::ZERO` disables
    /// keep-alives.
    pub fn heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Set the delay between a transport close and the reconnect attempt.
    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Choose when a transport close triggers a reconnect.
    pub fn reconnect(mut self, policy: ReconnectPolicy) -> Self {
        self.reconnect = policy;
        self
    }

    /// Add a custom CONNECT header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Add `login` and `passcode` CONNECT headers.
    pub fn login(self, login: impl Into<String>, passcode: impl Into<String>) -> Self {
        self.header("login", login).header("passcode", passcode)
    }

    /// Add the `host` CONNECT header (the broker's virtual host).
    pub fn host(self, host: impl Into<String>) -> Self {
        self.header("host", host)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Self::DEFAULT_HEARTBEAT_INTERVAL,
            reconnect_delay: Self::DEFAULT_RECONNECT_DELAY,
            reconnect: ReconnectPolicy::default(),
            headers: Vec::new(),
        }
    }
}
