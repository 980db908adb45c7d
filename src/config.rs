use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub dialog_signing_secret: String,
    pub queue_url: String,
    pub search_url: String,
    pub search_index: String,
    pub directory_url: String,
    pub directory_token: String,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
    pub sms_country_prefix: String,
    pub fallback_phone: String,
    pub poll_interval_secs: u64,
    pub batch_size: u32,
    pub cuisines: Vec<String>,
    pub cities: Vec<String>,
    pub check_location: bool,
    pub strict_date_format: bool,
    pub accept_relative_dates: bool,
    pub require_two_digit_hour: bool,
    pub open_hour: u32,
    pub close_hour: u32,
    pub max_party_size: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", 3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "concierge.db".to_string()),
            dialog_signing_secret: env::var("DIALOG_SIGNING_SECRET").unwrap_or_default(),
            queue_url: env::var("QUEUE_URL").unwrap_or_default(),
            search_url: env::var("SEARCH_URL")
                .unwrap_or_else(|_| "http://localhost:9200".to_string()),
            search_index: env::var("SEARCH_INDEX").unwrap_or_else(|_| "restaurants".to_string()),
            directory_url: env::var("DIRECTORY_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            directory_token: env::var("DIRECTORY_TOKEN").unwrap_or_default(),
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            twilio_phone_number: env::var("TWILIO_PHONE_NUMBER").unwrap_or_default(),
            sms_country_prefix: env::var("SMS_COUNTRY_PREFIX").unwrap_or_else(|_| "+1".to_string()),
            fallback_phone: env::var("FALLBACK_PHONE").unwrap_or_default(),
            poll_interval_secs: env_parse("POLL_INTERVAL_SECS", 60),
            batch_size: env_parse("BATCH_SIZE", 5),
            cuisines: env_list("CUISINES", "french,italian,chinese,thailand,japanese"),
            cities: env_list("CITIES", "new york"),
            check_location: env_bool("CHECK_LOCATION", true),
            strict_date_format: env_bool("STRICT_DATE_FORMAT", true),
            accept_relative_dates: env_bool("ACCEPT_RELATIVE_DATES", true),
            require_two_digit_hour: env_bool("REQUIRE_TWO_DIGIT_HOUR", false),
            open_hour: env_parse("OPEN_HOUR", 10),
            close_hour: env_parse("CLOSE_HOUR", 17),
            max_party_size: env_parse("MAX_PARTY_SIZE", 50),
        }
    }

    pub fn policy(&self) -> ReservationPolicy {
        ReservationPolicy {
            cuisines: self.cuisines.clone(),
            cities: self.cities.clone(),
            check_location: self.check_location,
            strict_date_format: self.strict_date_format,
            accept_relative_dates: self.accept_relative_dates,
            require_two_digit_hour: self.require_two_digit_hour,
            open_hour: self.open_hour,
            close_hour: self.close_hour,
            max_party_size: self.max_party_size,
        }
    }
}

/// Validation policy for the slot-filling machine. The deployed behavior
/// variants differ only in these values, never in code paths.
#[derive(Clone, Debug)]
pub struct ReservationPolicy {
    pub cuisines: Vec<String>,
    pub cities: Vec<String>,
    pub check_location: bool,
    pub strict_date_format: bool,
    pub accept_relative_dates: bool,
    pub require_two_digit_hour: bool,
    pub open_hour: u32,
    pub close_hour: u32,
    pub max_party_size: i64,
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}

fn env_list(key: &str, default: &str) -> Vec<String> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
