//! WebSocket upgrade handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use chatline_core::types::UserId;

use crate::dto::request::WsQuery;
use crate::state::AppState;

/// GET /ws?userId={id}
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Response {
    let user_id = query.user_id();
    if user_id.is_none() && query.user_id.is_some() {
        warn!(raw = ?query.user_id, "Unparseable userId, connecting as observer");
    }

    ws.max_message_size(state.config.realtime.max_message_bytes)
        .on_upgrade(move |socket| handle_socket(state, user_id, socket))
}

/// Runs one socket until the client leaves or the server shuts down.
async fn handle_socket(state: AppState, user_id: Option<UserId>, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let realtime = state.realtime.clone();
    let mut shutdown = realtime.shutdown_receiver();

    let (handle, mut outbox) = realtime.open(user_id).await;
    let conn_id = handle.id;
    info!(%conn_id, ?user_id, "WebSocket connection established");

    // Writes only the newest snapshot; ones superseded while a write was
    // in flight are skipped.
    let outbound_task = tokio::spawn(async move {
        while outbox.changed().await.is_ok() {
            let Some(msg) = outbox.borrow_and_update().clone() else {
                continue;
            };
            let frame = match msg.to_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    warn!(%conn_id, error = %e, "Failed to encode frame");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_tx.close().await;
    });

    loop {
        tokio::select! {
            frame = ws_rx.next() => match frame {
                None | Some(Ok(Message::Close(_))) => break,
                // Pings are answered by axum; client payloads are ignored.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(%conn_id, error = %e, "WebSocket error");
                    break;
                }
            },
            _ = shutdown.recv() => break,
        }
    }

    realtime.close(&handle).await;
    outbound_task.abort();

    info!(%conn_id, ?user_id, "WebSocket connection closed");
}
