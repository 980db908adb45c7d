use std::sync::Arc;

use anyhow::Context;
use base64::Engine;
use sha1::{Digest, Sha1};

use crate::db::queries;
use crate::models::{BusinessRecord, ReservationSlots};
use crate::state::AppState;

const TOP_SUGGESTIONS: usize = 5;
const LEDGER_RETENTION_DAYS: i64 = 30;

/// Drains one batch from the reservation queue: look up suggestions for
/// each message, notify the user, delete the message. Returns how many
/// messages were taken off the queue.
pub async fn drain_queue(state: &Arc<AppState>) -> anyhow::Result<usize> {
    let messages = state.queue.receive(state.config.batch_size).await?;
    if messages.is_empty() {
        tracing::debug!("queue is empty");
        return Ok(0);
    }

    let mut drained = 0;
    for message in messages {
        match process_message(state, &message.body).await {
            Ok(()) => {
                state.queue.delete(&message.receipt_handle).await?;
                drained += 1;
            }
            Err(e) => {
                // Leave the message for the queue's redelivery policy.
                tracing::error!(error = %e, "failed to process reservation, leaving on queue");
            }
        }
    }

    {
        let db = state.db.lock().unwrap();
        if let Err(e) = queries::purge_old_entries(&db, LEDGER_RETENTION_DAYS) {
            tracing::warn!(error = %e, "failed to purge notification ledger");
        }
    }

    Ok(drained)
}

/// Handles a single queued reservation. `Ok` means the message is done and
/// may be deleted — including the no-candidates and duplicate cases; only
/// transport failures propagate so the queue redelivers.
async fn process_message(state: &Arc<AppState>, body: &str) -> anyhow::Result<()> {
    let reservation: ReservationSlots =
        serde_json::from_str(body).context("malformed reservation payload")?;

    let payload_hash = hash_payload(body);
    let already_notified = {
        let db = state.db.lock().unwrap();
        queries::is_notified(&db, &payload_hash).unwrap_or(false)
    };
    if already_notified {
        tracing::info!(hash = %payload_hash, "reservation already notified, skipping duplicate");
        return Ok(());
    }

    let resolved = match reservation.cuisine.as_deref() {
        Some(cuisine) => lookup_candidates(state, cuisine).await?,
        None => {
            tracing::warn!("queued reservation has no cuisine, nothing to match");
            Vec::new()
        }
    };

    if resolved.is_empty() {
        notify_fallback(state).await?;
    } else {
        match reservation.phone_number.as_deref() {
            Some(phone) => {
                let message = compose_suggestions(
                    reservation.cuisine.as_deref().unwrap_or_default(),
                    reservation.number_of_people.as_deref(),
                    &resolved,
                );
                state
                    .messaging
                    .send_message(phone, &message)
                    .await
                    .context("failed to send suggestion SMS")?;
                tracing::info!(count = resolved.len(), "sent dining suggestions");
            }
            None => {
                tracing::warn!("queued reservation has no phone number, dropping notification");
            }
        }
    }

    let db = state.db.lock().unwrap();
    queries::mark_notified(&db, &payload_hash)?;
    Ok(())
}

/// Ranks index matches by score and resolves the top entries to display
/// records. Lookup misses and transient errors skip the candidate; they
/// never abort the batch.
async fn lookup_candidates(
    state: &Arc<AppState>,
    cuisine: &str,
) -> anyhow::Result<Vec<BusinessRecord>> {
    let mut hits = state.index.search_cuisine(cuisine).await?;
    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hits.truncate(TOP_SUGGESTIONS);

    let mut resolved = Vec::new();
    for hit in &hits {
        match state.directory.get_business(&hit.business_id).await {
            Ok(Some(record)) => resolved.push(record),
            Ok(None) => {
                tracing::info!(business_id = %hit.business_id, "business not found, skipping");
            }
            Err(e) => {
                tracing::warn!(business_id = %hit.business_id, error = %e, "lookup failed, skipping");
            }
        }
    }
    Ok(resolved)
}

async fn notify_fallback(state: &Arc<AppState>) -> anyhow::Result<()> {
    if state.config.fallback_phone.is_empty() {
        tracing::warn!("no suggestions resolved and no fallback destination configured, suppressing notification");
        return Ok(());
    }
    state
        .messaging
        .send_message(
            &state.config.fallback_phone,
            "Sorry, we fail to get the result. Please try again with the appropriate requirements!",
        )
        .await
        .context("failed to send fallback notification")
}

fn compose_suggestions(
    cuisine: &str,
    party_size: Option<&str>,
    picks: &[BusinessRecord],
) -> String {
    let mut message = match party_size {
        Some(n) => format!("Hello! Here are your {cuisine} suggestions for {n} people.\n"),
        None => format!("Hello! Here are your {cuisine} suggestions.\n"),
    };
    for (i, pick) in picks.iter().enumerate() {
        message.push_str(&format!(
            "{}. {} located at {}, rating as {}\n",
            i + 1,
            pick.name,
            pick.address,
            pick.rating
        ));
    }
    message
}

fn hash_payload(body: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(body.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(hasher.finalize())
}
