//! WebSocket handlers

use axum::{
    extract::{
        Path, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};

use crate::api::cafes::resolve_public;
use crate::core::ServerState;
use crate::realtime::{Subscription, Topic};
use crate::utils::AppResult;

/// GET /api/cafes/{slug}/events/ws - café-wide stream
pub async fn cafe_events(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    let (_, cafe_id) = resolve_public(&state, &slug).await?;
    let subscription = state.events.subscribe(Topic::Cafe(cafe_id.to_string()));
    Ok(ws.on_upgrade(move |socket| pump(socket, subscription)))
}

/// GET /api/cafes/{slug}/tables/{table}/events/ws - one table's stream
pub async fn table_events(
    State(state): State<ServerState>,
    Path((slug, table)): Path<(String, String)>,
    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    let (_, cafe_id) = resolve_public(&state, &slug).await?;
    let subscription = state.events.subscribe(Topic::Table {
        cafe: cafe_id.to_string(),
        table,
    });
    Ok(ws.on_upgrade(move |socket| pump(socket, subscription)))
}

/// Forward bus events to the socket until either side goes away.
/// Dropping the subscription on exit unsubscribes the topic.
async fn pump(mut socket: WebSocket, mut subscription: Subscription) {
    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else { break };
                let frame = match serde_json::to_string(&event) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to encode order event");
                        continue;
                    }
                };
                if socket.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                // clients only ever close or ping; both end in either
                // None (gone) or a frame axum answers automatically
                match incoming {
                    None | Some(Ok(Message::Close(_))) => break,
                    Some(Err(_)) => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}
