use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::Framed;
use tracing::{debug, trace, warn};

use crate::codec::{StompCodec, StompItem};
use crate::transport::{Transport, TransportEvent};

/// `Transport` over a plain TCP connection to a STOMP broker.
///
/// Each `connect` spawns a tokio task that owns the socket, framed with
/// `StompCodec`. Text written before the socket opens is queued and sent
/// in order once it does. `disconnect` lets the task flush queued writes,
/// then close the socket.
pub struct TcpTransport {
    addr: String,
    events: mpsc::UnboundedSender<TransportEvent>,
    writer: Option<mpsc::UnboundedSender<String>>,
}

impl TcpTransport {
    /// Create a transport for `addr` (host:port) and the channel its events
    /// are delivered on.
    pub fn new(addr: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (events, event_rx) = mpsc::unbounded_channel();
        let transport = Self {
            addr: addr.into(),
            events,
            writer: None,
        };
        (transport, event_rx)
    }

    /// The broker address given to `new`.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Transport for TcpTransport {
    /// Must be called within a tokio runtime.
    fn connect(&mut self) {
        if self.writer.as_ref().is_some_and(|w| !w.is_closed()) {
            warn!(addr = %self.addr, "connect called while a connection is active");
            return;
        }
        let (writer, outbound) = mpsc::unbounded_channel();
        self.writer = Some(writer);
        tokio::spawn(run_connection(
            self.addr.clone(),
            outbound,
            self.events.clone(),
        ));
    }

    /// The connection task flushes queued writes, closes the socket and
    /// reports `Closed`. A connect still in flight is abandoned without
    /// reporting `Opened`.
    fn disconnect(&mut self) {
        // Dropping the sender ends the task once queued writes are flushed.
        if self.writer.take().is_none() {
            debug!(addr = %self.addr, "disconnect without connection");
        }
    }

    fn write(&mut self, text: &str) {
        match &self.writer {
            Some(writer) => {
                if writer.send(text.to_string()).is_err() {
                    warn!(addr = %self.addr, "write on closed connection dropped");
                }
            }
            None => warn!(addr = %self.addr, "write without connection dropped"),
        }
    }
}

async fn run_connection(
    addr: String,
    mut outbound: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<TransportEvent>,
) {
    let stream = match TcpStream::connect(&addr).await {
        Ok(stream) => stream,
        Err(e) => {
            debug!(%addr, error = %e, "tcp connect failed");
            let _ = events.send(TransportEvent::Error(e.to_string()));
            let _ = events.send(TransportEvent::Closed);
            return;
        }
    };
    if outbound.is_closed() {
        debug!(%addr, "tcp connected after disconnect, dropping");
        let _ = events.send(TransportEvent::Closed);
        return;
    }
    debug!(%addr, "tcp connected");
    let _ = events.send(TransportEvent::Opened);

    let (mut sink, mut stream) = Framed::new(stream, StompCodec::new()).split();
    loop {
        tokio::select! {
            maybe = outbound.recv() => match maybe {
                Some(text) => {
                    if let Err(e) = sink.send(text).await {
                        let _ = events.send(TransportEvent::Error(e.to_string()));
                        break;
                    }
                }
                None => {
                    let _ = sink.close().await;
                    break;
                }
            },
            item = stream.next() => match item {
                Some(Ok(StompItem::Text(text))) => {
                    let _ = events.send(TransportEvent::Text(text));
                }
                Some(Ok(StompItem::Heartbeat)) => trace!(%addr, "received heart-beat"),
                Some(Err(e)) => {
                    let _ = events.send(TransportEvent::Error(e.to_string()));
                    break;
                }
                None => break,
            },
        }
    }
    debug!(%addr, "tcp connection closed");
    let _ = events.send(TransportEvent::Closed);
}
