//! WebSocket transport for the client.
//!
//! Provides [`ConnectedClient`] which handles WebSocket I/O for envelope
//! transport. This is a thin layer that just encodes/decodes JSON frames -
//! protocol logic remains in the Sans-IO [`crate::Client`].
//!
//! Undecodable inbound frames are dropped and logged; they never reach the
//! dispatcher and never tear the connection down.

use futures::{SinkExt, StreamExt};
use palaver_proto::{ClientEnvelope, ServerEnvelope};
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};
use url::Url;

use crate::{CloseReason, ConnectParams, TransportEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint is not a valid URL.
    #[error("invalid endpoint: {0}")]
    Endpoint(String),

    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Handle to a connected client with WebSocket transport.
///
/// Envelopes are sent and received via the channels; an internal task
/// handles the socket I/O. The `from_server` channel yields a final
/// [`TransportEvent::Closed`] when the connection ends.
pub struct ConnectedClient {
    /// Send envelopes to the server.
    pub to_server: mpsc::Sender<ClientEnvelope>,
    /// Receive envelopes and lifecycle events from the server.
    pub from_server: mpsc::Receiver<TransportEvent>,
    /// Abort handle to stop the connection task.
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectedClient {
    /// Stop the connection.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Connect to a Palaver server over WebSocket.
///
/// The display name and, when present, the prior session id are encoded as
/// `name` and `session` query parameters of the endpoint URL.
pub async fn connect(
    endpoint: &str,
    params: &ConnectParams,
) -> Result<ConnectedClient, TransportError> {
    let url = connection_url(endpoint, params)?;

    let (stream, _response) = tokio_tungstenite::connect_async(url.as_str())
        .await
        .map_err(|e| TransportError::Connection(e.to_string()))?;

    let (to_server_tx, to_server_rx) = mpsc::channel::<ClientEnvelope>(32);
    let (from_server_tx, from_server_rx) = mpsc::channel::<TransportEvent>(32);

    let handle = tokio::spawn(run_connection(stream, to_server_rx, from_server_tx));

    Ok(ConnectedClient {
        to_server: to_server_tx,
        from_server: from_server_rx,
        abort_handle: handle.abort_handle(),
    })
}

/// Build the connection URL with identity query parameters.
fn connection_url(endpoint: &str, params: &ConnectParams) -> Result<Url, TransportError> {
    let mut url = Url::parse(endpoint).map_err(|e| TransportError::Endpoint(e.to_string()))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("name", &params.name);
        if let Some(session) = &params.session {
            pairs.append_pair("session", session);
        }
    }
    Ok(url)
}

/// Run the connection, bridging between channels and the socket.
async fn run_connection(
    stream: WsStream,
    mut to_server: mpsc::Receiver<ClientEnvelope>,
    from_server: mpsc::Sender<TransportEvent>,
) {
    let (mut write, mut read) = stream.split();

    let reason = loop {
        tokio::select! {
            outbound = to_server.recv() => match outbound {
                Some(envelope) => match serde_json::to_string(&envelope) {
                    Ok(json) => {
                        if let Err(e) = write.send(Message::Text(json.into())).await {
                            break CloseReason::Error(e.to_string());
                        }
                    },
                    Err(e) => tracing::error!(error = %e, "failed to encode outbound envelope"),
                },
                None => {
                    let _ = write.send(Message::Close(None)).await;
                    break CloseReason::Clean;
                },
            },

            inbound = read.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ServerEnvelope>(&text) {
                        Ok(envelope) => {
                            if from_server.send(TransportEvent::Envelope(envelope)).await.is_err() {
                                break CloseReason::Clean;
                            }
                        },
                        Err(e) => {
                            tracing::warn!(error = %e, "dropping undecodable envelope");
                        },
                    }
                },
                Some(Ok(Message::Close(_))) | None => break CloseReason::Clean,
                Some(Ok(_)) => {},
                Some(Err(e)) => break CloseReason::Error(e.to_string()),
            },
        }
    };

    let _ = from_server.send(TransportEvent::Closed { reason }).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_url_carries_name_and_session() {
        let params =
            ConnectParams { name: "alice b".into(), session: Some("abc".into()) };
        let url = connection_url("ws://localhost:8080/ws/chat", &params).expect("valid url");
        assert_eq!(url.as_str(), "ws://localhost:8080/ws/chat?name=alice+b&session=abc");
    }

    #[test]
    fn connection_url_omits_missing_session() {
        let params = ConnectParams { name: "alice".into(), session: None };
        let url = connection_url("ws://localhost:8080/ws/chat", &params).expect("valid url");
        assert_eq!(url.as_str(), "ws://localhost:8080/ws/chat?name=alice");
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        let params = ConnectParams { name: "alice".into(), session: None };
        assert!(matches!(
            connection_url("not a url", &params),
            Err(TransportError::Endpoint(_))
        ));
    }
}
