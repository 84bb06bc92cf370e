//! Push subscription for newly inserted reviews.
//!
//! Speaks the service's Phoenix-style websocket protocol: join the table
//! topic, answer with a heartbeat every 30 s, and turn INSERT frames into
//! [`Review`] values delivered through a [`Callback`]. The owning component
//! cancels the whole task by setting a shared flag; every wait in the task
//! is sliced into short poll ticks, so the flag is observed and the socket
//! dropped within [`CANCEL_POLL_MS`] of teardown.
//!
//! The observed upstream design had no reconnect policy; here a dropped
//! channel is resubscribed with exponential backoff (1 s doubling, capped at
//! 30 s, reset after each successful rejoin) so live updates are not lost
//! silently.

use std::cell::Cell;
use std::rc::Rc;

use futures_util::future::{Either, select};
use futures_util::{SinkExt, StreamExt, pin_mut};
use gloo_console::warn;
use gloo_net::websocket::Message;
use gloo_net::websocket::futures::WebSocket;
use gloo_timers::future::TimeoutFuture;
use js_sys::Date;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

use common::model::review::Review;

use super::{REVIEWS_TABLE, ServiceError, Supabase};

const HEARTBEAT_INTERVAL_MS: u32 = 30_000;
const BACKOFF_START_MS: u32 = 1_000;
const BACKOFF_CAP_MS: u32 = 30_000;
/// Longest any wait goes without re-checking the cancellation flag.
const CANCEL_POLL_MS: u32 = 200;

/// Spawns the subscription task. Runs until `cancelled` is set.
pub fn subscribe_inserts(
    client: Supabase,
    cancelled: Rc<Cell<bool>>,
    on_insert: Callback<Review>,
) {
    spawn_local(async move {
        let mut backoff = BACKOFF_START_MS;
        loop {
            if cancelled.get() {
                break;
            }
            match run_channel(&client, &cancelled, &on_insert, &mut backoff).await {
                // Clean exit: the owning component was torn down.
                Ok(()) => break,
                Err(err) => warn!("realtime channel dropped:", err.to_string()),
            }
            if !sleep_unless_cancelled(backoff, &cancelled).await {
                break;
            }
            backoff = (backoff * 2).min(BACKOFF_CAP_MS);
        }
    });
}

/// One channel session: connect, join, then pump frames until the channel
/// drops (`Err`) or the cancellation flag is observed (`Ok`).
async fn run_channel(
    client: &Supabase,
    cancelled: &Rc<Cell<bool>>,
    on_insert: &Callback<Review>,
    backoff: &mut u32,
) -> Result<(), ServiceError> {
    let ws_url = format!(
        "{}/realtime/v1/websocket?apikey={}&vsn=1.0.0",
        client.url().replacen("http", "ws", 1),
        client.key()
    );
    let ws = WebSocket::open(&ws_url).map_err(|err| ServiceError(err.to_string()))?;
    let (mut sink, mut stream) = ws.split();

    sink.send(Message::Text(join_frame()))
        .await
        .map_err(|err| ServiceError(err.to_string()))?;
    *backoff = BACKOFF_START_MS;

    // Wall-clock schedule: a steady frame stream must not starve the
    // heartbeat, or the server drops the channel for heartbeat timeout.
    let mut heartbeat = Heartbeat::new(Date::now());

    loop {
        if cancelled.get() {
            return Ok(());
        }
        if heartbeat.due(Date::now()) {
            sink.send(Message::Text(heartbeat_frame()))
                .await
                .map_err(|err| ServiceError(err.to_string()))?;
            heartbeat.mark_sent(Date::now());
        }

        let next = stream.next();
        let tick = TimeoutFuture::new(CANCEL_POLL_MS);
        pin_mut!(next, tick);
        match select(next, tick).await {
            Either::Left((item, _)) => match item {
                Some(Ok(Message::Text(text))) => {
                    if let Some(review) = parse_insert(&text) {
                        on_insert.emit(review);
                    }
                }
                Some(Ok(Message::Bytes(_))) => {}
                Some(Err(err)) => return Err(ServiceError(err.to_string())),
                None => return Err(ServiceError("connection closed".to_string())),
            },
            // Poll tick: loop around to re-check the flag and the schedule.
            Either::Right(((), _)) => {}
        }
    }
}

/// Sleeps `total_ms` in [`CANCEL_POLL_MS`] slices. Returns `false` as soon
/// as the cancellation flag is seen set.
async fn sleep_unless_cancelled(total_ms: u32, cancelled: &Rc<Cell<bool>>) -> bool {
    let mut waited = 0;
    while waited < total_ms {
        if cancelled.get() {
            return false;
        }
        let slice = CANCEL_POLL_MS.min(total_ms - waited);
        TimeoutFuture::new(slice).await;
        waited += slice;
    }
    !cancelled.get()
}

/// When the next heartbeat is owed, measured against the wall clock so
/// inbound frames cannot defer it.
struct Heartbeat {
    next_due: f64,
}

impl Heartbeat {
    fn new(now: f64) -> Self {
        Self {
            next_due: now + f64::from(HEARTBEAT_INTERVAL_MS),
        }
    }

    fn due(&self, now: f64) -> bool {
        now >= self.next_due
    }

    fn mark_sent(&mut self, now: f64) {
        self.next_due = now + f64::from(HEARTBEAT_INTERVAL_MS);
    }
}

fn join_frame() -> String {
    serde_json::json!({
        "topic": format!("realtime:public:{REVIEWS_TABLE}"),
        "event": "phx_join",
        "payload": {},
        "ref": "1",
    })
    .to_string()
}

fn heartbeat_frame() -> String {
    serde_json::json!({
        "topic": "phoenix",
        "event": "heartbeat",
        "payload": {},
        "ref": "heartbeat",
    })
    .to_string()
}

/// Extracts the inserted row from an INSERT frame; every other frame
/// (replies, heartbeat acks, other change types) yields `None`.
fn parse_insert(text: &str) -> Option<Review> {
    let frame: serde_json::Value = serde_json::from_str(text).ok()?;
    if frame.get("event")?.as_str()? != "INSERT" {
        return None;
    }
    let record = frame.get("payload")?.get("record")?;
    serde_json::from_value(record.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::{CANCEL_POLL_MS, HEARTBEAT_INTERVAL_MS, Heartbeat, parse_insert};
    use common::model::review::Role;

    const RECORD: &str = r#"{
        "id": "e1", "created_at": "2026-02-01T09:30:00Z",
        "name": "Tomás", "role": "student", "rating": 5,
        "experience": "Great", "reliability_rating": 5,
        "would_recommend": true, "security_issues": null,
        "bugs_glitches": null, "database_issues": null,
        "feature_requests": null, "ui_ux_feedback": null,
        "other_feedback": null
    }"#;

    #[test]
    fn insert_frame_yields_the_inserted_row() {
        let frame = format!(
            r#"{{"topic":"realtime:public:reviews","event":"INSERT","payload":{{"record":{RECORD}}},"ref":null}}"#
        );
        let review = parse_insert(&frame).expect("INSERT frame carries a row");
        assert_eq!(review.id, "e1");
        assert_eq!(review.role, Role::Student);
    }

    #[test]
    fn non_insert_frames_are_ignored() {
        let reply = r#"{"topic":"realtime:public:reviews","event":"phx_reply","payload":{"status":"ok"},"ref":"1"}"#;
        assert!(parse_insert(reply).is_none());
        let update = format!(
            r#"{{"topic":"realtime:public:reviews","event":"UPDATE","payload":{{"record":{RECORD}}},"ref":null}}"#
        );
        assert!(parse_insert(&update).is_none());
        assert!(parse_insert("not json").is_none());
    }

    #[test]
    fn malformed_insert_payload_is_dropped_not_a_panic() {
        let frame = r#"{"topic":"realtime:public:reviews","event":"INSERT","payload":{"record":{"id":1}},"ref":null}"#;
        assert!(parse_insert(frame).is_none());
    }

    #[test]
    fn heartbeat_runs_on_the_wall_clock_not_on_traffic() {
        let t0 = 1_000_000.0;
        let heartbeat = Heartbeat::new(t0);

        // A burst of inbound frames performs many loop turns without
        // touching the schedule; the heartbeat still comes due on time.
        assert!(!heartbeat.due(t0 + 1.0));
        assert!(!heartbeat.due(t0 + f64::from(HEARTBEAT_INTERVAL_MS) - 1.0));
        assert!(heartbeat.due(t0 + f64::from(HEARTBEAT_INTERVAL_MS)));
    }

    #[test]
    fn sending_a_heartbeat_schedules_the_next_one() {
        let t0 = 1_000_000.0;
        let mut heartbeat = Heartbeat::new(t0);
        let sent_at = t0 + f64::from(HEARTBEAT_INTERVAL_MS) + 500.0;
        heartbeat.mark_sent(sent_at);
        assert!(!heartbeat.due(sent_at + 1.0));
        assert!(heartbeat.due(sent_at + f64::from(HEARTBEAT_INTERVAL_MS)));
    }

    #[test]
    fn cancellation_poll_bounds_every_wait() {
        // Waits between flag checks never exceed the poll interval, so
        // teardown is observed promptly even during a 30 s backoff.
        assert!(CANCEL_POLL_MS <= 200);
        assert!(CANCEL_POLL_MS < HEARTBEAT_INTERVAL_MS);
    }
}
