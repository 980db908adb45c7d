use std::sync::Arc;

use chrono::Utc;

use crate::errors::AppError;
use crate::models::{
    ConfirmationStatus, ConversationState, DialogResponse, FulfillmentState, IntentRequest,
    InvocationSource, ReservationSlots, ResponseMessage, SlotName, ValidationOutcome,
};
use crate::services::validation::{normalize_relative_date, validate_reservation};
use crate::state::AppState;

const AUTO_POPULATE: &str = "AutoPopulate";

/// Routes one conversational turn to its intent handler. Unrecognized
/// intents are a protocol error and fail the turn explicitly.
pub async fn dispatch(
    state: &Arc<AppState>,
    event: IntentRequest,
) -> Result<DialogResponse, AppError> {
    match event.current_intent.name.as_str() {
        "DiningSuggestions" => order_dining(state, event).await,
        "Greeting" => Ok(fixed_close(event, "Hi there. May I help you?")),
        "Thanks" => Ok(fixed_close(event, "You are welcome!")),
        other => Err(AppError::UnsupportedIntent(other.to_string())),
    }
}

fn fixed_close(event: IntentRequest, content: &str) -> DialogResponse {
    DialogResponse::close(
        event.session_attributes.unwrap_or_default(),
        FulfillmentState::Fulfilled,
        ResponseMessage::plain(content),
    )
}

/// Drives one turn of the reservation slot-filling machine.
///
/// Order of decisions: normalize relative dates, track the in-progress
/// snapshot in the session bag, re-elicit the first invalid slot, then
/// branch on the fulfillment hook and the confirmation status. Validation
/// runs on every turn, fulfillment turns included, so a snapshot never
/// reaches the queue without passing the current policy.
async fn order_dining(
    state: &Arc<AppState>,
    event: IntentRequest,
) -> Result<DialogResponse, AppError> {
    let policy = state.config.policy();
    let today = Utc::now().date_naive();
    let intent_name = event.current_intent.name.clone();
    let mut slots = event.current_intent.slots.clone();
    let mut session =
        ConversationState::from_attributes(event.session_attributes.unwrap_or_default());

    normalize_relative_date(&mut slots, &policy, today);

    // Track the in-progress reservation across turns. The snapshot is kept
    // in the session bag until fulfillment succeeds.
    let reservation = serde_json::to_string(&slots)
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;
    session.current_reservation = Some(reservation.clone());

    if let ValidationOutcome::Invalid { slot, message } =
        validate_reservation(&slots, &policy, today)
    {
        tracing::info!(user = %event.user_id, slot = slot.as_str(), "slot failed validation, re-eliciting");
        slots.clear(slot);
        return Ok(DialogResponse::elicit_slot(
            session.into_attributes(),
            &intent_name,
            slots,
            slot,
            message.map(ResponseMessage::plain),
        ));
    }

    if event.invocation_source == InvocationSource::FulfillmentCodeHook {
        // Terminal step: the front end has signalled fulfillment.
        tracing::info!(user = %event.user_id, reservation = %reservation, "placing reservation");
        session.current_reservation = None;
        session.last_confirmed_reservation = Some(reservation.clone());
        enqueue(state, &reservation).await?;
        return Ok(DialogResponse::close(
            session.into_attributes(),
            FulfillmentState::Fulfilled,
            ResponseMessage::plain("Thanks, I have placed your reservation."),
        ));
    }

    match event.current_intent.confirmation_status {
        ConfirmationStatus::Denied => {
            let auto_populated =
                session.confirmation_context.take().as_deref() == Some(AUTO_POPULATE);
            if auto_populated {
                // The denied values were our own suggestion; start the form
                // over from the first slot.
                session.current_reservation = None;
                return Ok(DialogResponse::elicit_slot(
                    session.into_attributes(),
                    &intent_name,
                    ReservationSlots::default(),
                    SlotName::Location,
                    Some(ResponseMessage::plain(
                        "Where would you like to make your dining reservation?",
                    )),
                ));
            }
            Ok(DialogResponse::delegate(session.into_attributes(), slots))
        }
        ConfirmationStatus::Confirmed => {
            session.confirmation_context = None;
            tracing::info!(user = %event.user_id, "reservation confirmed, queueing");
            enqueue(state, &reservation).await?;
            Ok(DialogResponse::delegate(session.into_attributes(), slots))
        }
        // Not yet time to confirm; the front end keeps driving elicitation.
        ConfirmationStatus::None | ConfirmationStatus::Unknown => {
            Ok(DialogResponse::delegate(session.into_attributes(), slots))
        }
    }
}

async fn enqueue(state: &Arc<AppState>, reservation: &str) -> Result<(), AppError> {
    state
        .queue
        .send(reservation)
        .await
        .map_err(|e| AppError::Queue(e.to_string()))
}
