//! `GET /events` — relays [`DashboardEvent`]s to a browser over a WebSocket.
//!
//! Each event is one text frame, `{"event": "<name>", "data": <payload>}`.
//! Inbound frames are ignored apart from close.

use axum::{
  extract::{
    State,
    ws::{Message, WebSocket, WebSocketUpgrade},
  },
  response::Response,
};
use switchboard_api::ApiState;
use switchboard_core::{event::DashboardEvent, store::DashboardStore};
use tokio::sync::broadcast::{Receiver, error::RecvError};

pub async fn events<S>(
  State(state): State<ApiState<S>>,
  ws: WebSocketUpgrade,
) -> Response
where
  S: DashboardStore + 'static,
{
  let rx = state.events.subscribe();
  ws.on_upgrade(move |socket| relay(socket, rx))
}

async fn relay(mut socket: WebSocket, mut rx: Receiver<DashboardEvent>) {
  tracing::debug!("event subscriber connected");

  loop {
    tokio::select! {
      event = rx.recv() => match event {
        Ok(event) => {
          let frame = match serde_json::to_string(&event) {
            Ok(frame) => frame,
            Err(e) => {
              tracing::warn!(event = event.name(), error = %e, "failed to encode event");
              continue;
            }
          };
          if socket.send(Message::Text(frame.into())).await.is_err() {
            break;
          }
        }
        Err(RecvError::Lagged(skipped)) => {
          tracing::warn!(skipped, "event subscriber lagging, events dropped");
        }
        Err(RecvError::Closed) => break,
      },
      inbound = socket.recv() => match inbound {
        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
        Some(Ok(_)) => {}
      },
    }
  }

  tracing::debug!("event subscriber disconnected");
}
