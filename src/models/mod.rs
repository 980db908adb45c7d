pub mod business;
pub mod directive;
pub mod event;
pub mod session;
pub mod slots;
pub mod validation;

pub use business::{BusinessRecord, IndexHit};
pub use directive::{DialogAction, DialogResponse, FulfillmentState, ResponseMessage};
pub use event::{ConfirmationStatus, CurrentIntent, IntentRequest, InvocationSource};
pub use session::ConversationState;
pub use slots::{ReservationSlots, SlotName};
pub use validation::ValidationOutcome;
