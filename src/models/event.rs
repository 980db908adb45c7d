use std::collections::HashMap;

use serde::Deserialize;

use super::slots::ReservationSlots;

/// Yes/no state of the front end's confirmation prompt. A value we do not
/// recognize degrades to the not-yet-confirmed path instead of failing the
/// turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ConfirmationStatus {
    #[default]
    None,
    Denied,
    Confirmed,
    #[serde(other)]
    Unknown,
}

/// Which hook of the turn lifecycle invoked us: mid-dialog validation or the
/// terminal fulfillment step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum InvocationSource {
    #[default]
    DialogCodeHook,
    FulfillmentCodeHook,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotInfo {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIntent {
    pub name: String,
    #[serde(default)]
    pub slots: ReservationSlots,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
}

/// One conversational turn as posted by the front end. All state the machine
/// needs beyond this event rides in `session_attributes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    #[serde(default)]
    pub bot: BotInfo,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub invocation_source: InvocationSource,
    #[serde(default)]
    pub session_attributes: Option<HashMap<String, String>>,
    pub current_intent: CurrentIntent,
}
