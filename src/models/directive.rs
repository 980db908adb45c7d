use std::collections::HashMap;

use serde::Serialize;

use super::slots::{ReservationSlots, SlotName};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    pub content_type: String,
    pub content: String,
}

impl ResponseMessage {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content_type: "PlainText".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FulfillmentState {
    Fulfilled,
    Failed,
}

/// The four directive shapes the front end understands. Exactly one is
/// returned per invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum DialogAction {
    /// Ask the user for one named slot, carrying the current snapshot.
    #[serde(rename_all = "camelCase")]
    ElicitSlot {
        intent_name: String,
        slots: ReservationSlots,
        slot_to_elicit: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<ResponseMessage>,
    },
    /// Ask yes/no before proceeding. Part of the wire contract; the slot
    /// machine currently always delegates instead.
    #[serde(rename_all = "camelCase")]
    ConfirmIntent {
        intent_name: String,
        slots: ReservationSlots,
        message: ResponseMessage,
    },
    /// Hand control back to the front end's own elicitation policy.
    Delegate { slots: ReservationSlots },
    /// Terminate the turn with a final message and a fulfillment verdict.
    #[serde(rename_all = "camelCase")]
    Close {
        fulfillment_state: FulfillmentState,
        message: ResponseMessage,
    },
}

/// A directive plus the (possibly mutated) session bag, the sole return
/// value of the dialog controller per turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogResponse {
    pub session_attributes: HashMap<String, String>,
    pub dialog_action: DialogAction,
}

impl DialogResponse {
    pub fn elicit_slot(
        session_attributes: HashMap<String, String>,
        intent_name: &str,
        slots: ReservationSlots,
        slot_to_elicit: SlotName,
        message: Option<ResponseMessage>,
    ) -> Self {
        Self {
            session_attributes,
            dialog_action: DialogAction::ElicitSlot {
                intent_name: intent_name.to_string(),
                slots,
                slot_to_elicit: slot_to_elicit.as_str().to_string(),
                message,
            },
        }
    }

    pub fn confirm_intent(
        session_attributes: HashMap<String, String>,
        intent_name: &str,
        slots: ReservationSlots,
        message: ResponseMessage,
    ) -> Self {
        Self {
            session_attributes,
            dialog_action: DialogAction::ConfirmIntent {
                intent_name: intent_name.to_string(),
                slots,
                message,
            },
        }
    }

    pub fn delegate(
        session_attributes: HashMap<String, String>,
        slots: ReservationSlots,
    ) -> Self {
        Self {
            session_attributes,
            dialog_action: DialogAction::Delegate { slots },
        }
    }

    pub fn close(
        session_attributes: HashMap<String, String>,
        fulfillment_state: FulfillmentState,
        message: ResponseMessage,
    ) -> Self {
        Self {
            session_attributes,
            dialog_action: DialogAction::Close {
                fulfillment_state,
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elicit_slot_shape() {
        let response = DialogResponse::elicit_slot(
            HashMap::new(),
            "DiningSuggestions",
            ReservationSlots::default(),
            SlotName::Cuisine,
            Some(ResponseMessage::plain("What cuisine?")),
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["dialogAction"]["type"], "ElicitSlot");
        assert_eq!(json["dialogAction"]["intentName"], "DiningSuggestions");
        assert_eq!(json["dialogAction"]["slotToElicit"], "Cuisine");
        assert_eq!(json["dialogAction"]["message"]["contentType"], "PlainText");
        assert_eq!(json["dialogAction"]["message"]["content"], "What cuisine?");
        assert!(json["dialogAction"]["slots"]["Location"].is_null());
    }

    #[test]
    fn test_elicit_slot_without_message_omits_key() {
        let response = DialogResponse::elicit_slot(
            HashMap::new(),
            "DiningSuggestions",
            ReservationSlots::default(),
            SlotName::DiningTime,
            None,
        );
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["dialogAction"].get("message").is_none());
    }

    #[test]
    fn test_delegate_shape() {
        let response = DialogResponse::delegate(HashMap::new(), ReservationSlots::default());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["dialogAction"]["type"], "Delegate");
    }

    #[test]
    fn test_close_shape() {
        let mut attrs = HashMap::new();
        attrs.insert("k".to_string(), "v".to_string());
        let response = DialogResponse::close(
            attrs,
            FulfillmentState::Fulfilled,
            ResponseMessage::plain("Done."),
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["dialogAction"]["type"], "Close");
        assert_eq!(json["dialogAction"]["fulfillmentState"], "Fulfilled");
        assert_eq!(json["sessionAttributes"]["k"], "v");
    }

    #[test]
    fn test_confirm_intent_shape() {
        let response = DialogResponse::confirm_intent(
            HashMap::new(),
            "DiningSuggestions",
            ReservationSlots::default(),
            ResponseMessage::plain("Shall I book it?"),
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["dialogAction"]["type"], "ConfirmIntent");
    }
}
