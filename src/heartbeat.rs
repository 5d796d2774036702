use std::time::Duration;

/// Keep-alive written between frames when the connection is otherwise idle.
pub const KEEP_ALIVE: &str = "\r\n";

/// Value of the `heart-beat` header sent with CONNECT.
///
/// The client promises a keep-alive at most every `interval` and asks
/// nothing of the server, so the second field is always `0`.
pub fn client_heartbeat_header(interval: Duration) -> String {
    format!("{},0", interval.as_millis())
}

/// How long after the last outbound write the next keep-alive is due.
///
/// Half the advertised interval, to absorb network jitter. `None` when
/// heart-beating is disabled.
pub fn keep_alive_period(interval: Duration) -> Option<Duration> {
    if interval.is_zero() {
        None
    } else {
        Some(interval / 2)
    }
}

/// Parse the STOMP `heart-beat` header value (format: "cx,cy").
///
/// Returns `(cx, cy)` in milliseconds. Missing or invalid fields default
/// to `0`.
pub fn parse_heartbeat_header(header: &str) -> (u64, u64) {
    let mut parts = header.split(',');
    let cx = parts
        .next()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let cy = parts
        .next()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    (cx, cy)
}
