use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::directory::BusinessDirectory;
use crate::services::messaging::MessagingProvider;
use crate::services::queue::ReservationQueue;
use crate::services::search::BusinessIndex;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub queue: Box<dyn ReservationQueue>,
    pub index: Box<dyn BusinessIndex>,
    pub directory: Box<dyn BusinessDirectory>,
    pub messaging: Box<dyn MessagingProvider>,
}
