use std::collections::HashMap;

const CURRENT_RESERVATION: &str = "currentReservation";
const LAST_CONFIRMED_RESERVATION: &str = "lastConfirmedReservation";
const CONFIRMATION_CONTEXT: &str = "confirmationContext";

/// Typed view of the session-attribute bag the front end round-trips every
/// turn. `current_reservation` holds the in-progress form as JSON and is
/// dropped when fulfillment succeeds, at which point
/// `last_confirmed_reservation` takes the same payload. Keys we do not own
/// pass through `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationState {
    pub current_reservation: Option<String>,
    pub last_confirmed_reservation: Option<String>,
    pub confirmation_context: Option<String>,
    pub extra: HashMap<String, String>,
}

impl ConversationState {
    pub fn from_attributes(mut attrs: HashMap<String, String>) -> Self {
        Self {
            current_reservation: attrs.remove(CURRENT_RESERVATION),
            last_confirmed_reservation: attrs.remove(LAST_CONFIRMED_RESERVATION),
            confirmation_context: attrs.remove(CONFIRMATION_CONTEXT),
            extra: attrs,
        }
    }

    pub fn into_attributes(self) -> HashMap<String, String> {
        let mut attrs = self.extra;
        if let Some(v) = self.current_reservation {
            attrs.insert(CURRENT_RESERVATION.to_string(), v);
        }
        if let Some(v) = self.last_confirmed_reservation {
            attrs.insert(LAST_CONFIRMED_RESERVATION.to_string(), v);
        }
        if let Some(v) = self.confirmation_context {
            attrs.insert(CONFIRMATION_CONTEXT.to_string(), v);
        }
        attrs
    }
}
