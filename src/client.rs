use futures::future;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Instant;
use tracing::debug;

use crate::error::ClientError;
use crate::session::Session;
use crate::transport::{Transport, TransportEvent};

/// Work queued by a `Client` handle for the session task.
enum Request {
    Connect,
    Disconnect,
    Subscribe {
        destination: String,
        parameters: Vec<(String, String)>,
        reply: oneshot::Sender<String>,
    },
    Unsubscribe {
        destination: String,
        subscription_id: String,
    },
    Send {
        body: String,
        destination: String,
        content_type: Option<String>,
    },
}

/// Async handle to a `Session` running on its own tokio task.
///
/// The task is the only owner of the session: it applies requests from
/// every clone of this handle, transport events and timer expiries one at
/// a time. Operations return once the request is queued (subscribe waits
/// for the generated id); none waits for the broker.
#[derive(Clone)]
pub struct Client {
    requests: mpsc::Sender<Request>,
    shutdown_tx: broadcast::Sender<()>,
}

impl Client {
    /// Spawn the session task. `events` is the channel the session's
    /// transport reports on. Must be called within a tokio runtime.
    pub fn spawn<T>(session: Session<T>, events: mpsc::UnboundedReceiver<TransportEvent>) -> Self
    where
        T: Transport + Send + 'static,
    {
        let (requests, request_rx) = mpsc::channel::<Request>(32);
        let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
        tokio::spawn(run_session(session, request_rx, events, shutdown_rx));
        Self {
            requests,
            shutdown_tx,
        }
    }

    async fn request(&self, request: Request) -> Result<(), ClientError> {
        self.requests
            .send(request)
            .await
            .map_err(|_| ClientError::Closed)
    }

    /// Queue `Session::connect`.
    ///
    /// Returns `Err(ClientError::Closed)` once the session task has stopped.
    pub async fn connect(&self) -> Result<(), ClientError> {
        self.request(Request::Connect).await
    }

    /// Queue `Session::disconnect`: DISCONNECT, then close the transport.
    /// The task keeps running; call `close` to stop it.
    pub async fn disconnect(&self) -> Result<(), ClientError> {
        self.request(Request::Disconnect).await
    }

    /// Subscribe to `destination`; returns the generated subscription id.
    pub async fn subscribe(&self, destination: &str) -> Result<String, ClientError> {
        self.subscribe_with_parameters(destination, Vec::<(String, String)>::new())
            .await
    }

    /// Subscribe with extra headers. See `Session::subscribe_with_parameters`.
    pub async fn subscribe_with_parameters<I, K, V>(
        &self,
        destination: &str,
        parameters: I,
    ) -> Result<String, ClientError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let parameters: Vec<(String, String)> = parameters
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let (reply, id) = oneshot::channel();
        self.request(Request::Subscribe {
            destination: destination.to_string(),
            parameters,
            reply,
        })
        .await?;
        id.await.map_err(|_| ClientError::Closed)
    }

    /// Queue an UNSUBSCRIBE.
    ///
    /// Parameters
    /// - `destination`: the destination given to `subscribe`.
    /// - `subscription_id`: the id `subscribe` returned.
    pub async fn unsubscribe(
        &self,
        destination: &str,
        subscription_id: &str,
    ) -> Result<(), ClientError> {
        self.request(Request::Unsubscribe {
            destination: destination.to_string(),
            subscription_id: subscription_id.to_string(),
        })
        .await
    }

    /// Queue a SEND.
    ///
    /// Parameters
    /// - `body`: frame body, sent as text.
    /// - `destination`: broker destination.
    /// - `content_type`: value of the `content-type` header; `None` omits it.
    pub async fn send(
        &self,
        body: &str,
        destination: &str,
        content_type: Option<&str>,
    ) -> Result<(), ClientError> {
        self.request(Request::Send {
            body: body.to_string(),
            destination: destination.to_string(),
            content_type: content_type.map(str::to_string),
        })
        .await
    }

    /// `send` without a `content-type` header.
    pub async fn send_text(&self, body: &str, destination: &str) -> Result<(), ClientError> {
        self.send(body, destination, None).await
    }

    /// `send` with `content-type:application/json`.
    pub async fn send_json(&self, json: &str, destination: &str) -> Result<(), ClientError> {
        self.send(json, destination, Some("application/json"))
            .await
    }

    /// Stop the session task. Pending timers die with it; no DISCONNECT is
    /// sent (call `disconnect` first for that).
    pub async fn close(self) {
        let _ = self.shutdown_tx.send(());
    }
}

async fn run_session<T: Transport>(
    mut session: Session<T>,
    mut requests: mpsc::Receiver<Request>,
    mut events: mpsc::UnboundedReceiver<TransportEvent>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        let deadline = session.next_deadline();
        tokio::select! {
            _ = shutdown.recv() => break,
            request = requests.recv() => match request {
                Some(request) => apply(&mut session, request),
                None => break,
            },
            event = events.recv() => match event {
                Some(event) => session.handle_event(event),
                None => {
                    debug!("transport event channel closed");
                    break;
                }
            },
            _ = async {
                match deadline {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => future::pending::<()>().await,
                }
            } => session.poll_timers(Instant::now()),
        }
    }
    debug!("session task stopped");
}

fn apply<T: Transport>(session: &mut Session<T>, request: Request) {
    match request {
        Request::Connect => session.connect(),
        Request::Disconnect => session.disconnect(),
        Request::Subscribe {
            destination,
            parameters,
            reply,
        } => {
            let id = session.subscribe_with_parameters(&destination, parameters);
            let _ = reply.send(id);
        }
        Request::Unsubscribe {
            destination,
            subscription_id,
        } => session.unsubscribe(&destination, &subscription_id),
        Request::Send {
            body,
            destination,
            content_type,
        } => session.send(&body, &destination, content_type.as_deref()),
    }
}
