//! WebSocket server: accept loop and per-surface session handling.
//!
//! Extension surfaces connect here and exchange JSON text frames with the
//! coordinator. The transport stays deliberately dumb:
//!
//! 1. Bind a TCP listener on the configured address.
//! 2. Accept connections and upgrade each to a WebSocket session.
//! 3. Per text frame: hand it to the [`MessageRouter`] and send the reply
//!    frame back — or nothing, when the router says the frame was not ours.
//! 4. Exit cleanly when the shared `running` flag is cleared.
//!
//! Every session runs in its own Tokio task, so one slow surface never
//! blocks another. There is no per-session state: each frame is a complete
//! request, each reply a complete point-in-time snapshot.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_async,
    tungstenite::{Error as WsError, Message as WsMessage},
};
use tracing::{debug, error, info, warn};

use crec_core::encode_response;

use crate::application::handle_requests::{DispatchOutcome, MessageRouter};
use crate::domain::config::CoordinatorConfig;

// ── Public API ────────────────────────────────────────────────────────────────

/// Binds the configured address and runs the accept loop until `running` is
/// cleared.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot be bound (port in use,
/// missing permission).
pub async fn run_server(
    config: CoordinatorConfig,
    router: Arc<MessageRouter>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.ws_bind_addr)
        .await
        .with_context(|| format!("failed to bind listener on {}", config.ws_bind_addr))?;

    info!("configuration coordinator listening on {}", config.ws_bind_addr);

    run_with_listener(listener, router, running).await
}

/// Runs the accept loop on an already bound listener.
///
/// Split out from [`run_server`] so tests can bind an ephemeral port and
/// learn the actual address before starting the loop.
pub async fn run_with_listener(
    listener: TcpListener,
    router: Arc<MessageRouter>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        // A short timeout on accept() keeps the loop responsive to the
        // `running` flag even when no surface is connecting.
        let accept_result = timeout(Duration::from_millis(200), listener.accept()).await;

        match accept_result {
            Ok(Ok((stream, peer_addr))) => {
                debug!("new surface connection from {peer_addr}");
                let router = Arc::clone(&router);

                tokio::spawn(async move {
                    handle_surface_session(stream, peer_addr, router).await;
                });
            }
            Ok(Err(e)) => {
                // Transient accept error; keep serving other surfaces.
                error!("accept error: {e}");
            }
            Err(_) => {
                // Timeout: loop back to check the `running` flag.
            }
        }
    }

    Ok(())
}

// ── Per-session handler ───────────────────────────────────────────────────────

/// Entry point of each per-session task; logs the session outcome.
async fn handle_surface_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    router: Arc<MessageRouter>,
) {
    match run_session(raw_stream, peer_addr, router).await {
        Ok(()) => debug!("session {peer_addr} closed normally"),
        Err(e) => warn!("session {peer_addr} closed with error: {e:#}"),
    }
}

/// Runs the request/response loop of a single surface session.
///
/// # Errors
///
/// Returns an error if the WebSocket handshake fails.
async fn run_session(
    raw_stream: TcpStream,
    peer_addr: SocketAddr,
    router: Arc<MessageRouter>,
) -> anyhow::Result<()> {
    let mut ws_stream = accept_async(raw_stream)
        .await
        .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    while let Some(frame) = ws_stream.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(WsError::ConnectionClosed | WsError::Protocol(_)) => {
                debug!("session {peer_addr}: surface closed the connection");
                break;
            }
            Err(e) => {
                warn!("session {peer_addr}: WebSocket error: {e}");
                break;
            }
        };

        match frame {
            WsMessage::Text(raw) => match router.dispatch_frame(&raw).await {
                DispatchOutcome::Replied(response) => {
                    let reply = match encode_response(&response) {
                        Ok(reply) => reply,
                        Err(e) => {
                            error!("session {peer_addr}: {e}");
                            continue;
                        }
                    };
                    if ws_stream.send(WsMessage::Text(reply)).await.is_err() {
                        debug!("session {peer_addr}: send failed (surface disconnected)");
                        break;
                    }
                }
                DispatchOutcome::NotHandled => {
                    // Not a coordinator request; whoever it was meant for
                    // answers it. No reply frame from us.
                }
            },

            WsMessage::Binary(_) => {
                // The surface protocol is JSON text only.
                warn!("session {peer_addr}: unexpected binary frame (ignored)");
            }

            WsMessage::Ping(_) | WsMessage::Pong(_) => {
                // Protocol-level keepalive; tungstenite answers pings when
                // the sink is flushed.
            }

            WsMessage::Close(_) => {
                debug!("session {peer_addr}: Close frame received");
                break;
            }

            WsMessage::Frame(_) => {
                debug!("session {peer_addr}: raw frame (ignored)");
            }
        }
    }

    Ok(())
}
