use anyhow::Context;
use async_trait::async_trait;

use super::MessagingProvider;

pub struct TwilioSmsProvider {
    account_sid: String,
    auth_token: String,
    from_number: String,
    country_prefix: String,
    client: reqwest::Client,
}

impl TwilioSmsProvider {
    pub fn new(
        account_sid: String,
        auth_token: String,
        from_number: String,
        country_prefix: String,
    ) -> Self {
        Self {
            account_sid,
            auth_token,
            from_number,
            country_prefix,
            client: reqwest::Client::new(),
        }
    }

    /// Reservation records carry raw 10-digit numbers; the gateway needs the
    /// country prefix. Anything already prefixed passes through.
    fn normalize_destination(&self, to: &str) -> String {
        if to.len() == 10 && to.bytes().all(|b| b.is_ascii_digit()) {
            format!("{}{}", self.country_prefix, to)
        } else {
            to.to_string()
        }
    }
}

#[async_trait]
impl MessagingProvider for TwilioSmsProvider {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );
        let to = self.normalize_destination(to);

        self.client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to.as_str()), ("From", &self.from_number), ("Body", body)])
            .send()
            .await
            .context("failed to send SMS")?
            .error_for_status()
            .context("SMS gateway returned error")?;

        Ok(())
    }
}
