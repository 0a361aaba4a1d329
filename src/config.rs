use serde::{Deserialize, Serialize};
use std::env;

/// Engine-level configuration.
#[derive(Debug, Clone)]
pub struct AutomationConfig {
    /// Subject used for `send_email` actions that do not configure one.
    pub default_email_subject: String,
    /// How often the deferred-action scheduler polls the queue (seconds).
    pub queue_poll_interval_secs: u32,
    pub smtp: Option<SmtpConfig>,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            default_email_subject: "Message from your LeadFlow team".to_string(),
            queue_poll_interval_secs: 30,
            smtp: None,
        }
    }
}

impl AutomationConfig {
    pub fn from_env() -> Self {
        // SMTP config is picked up only when a host is set
        let smtp = if env::var("SMTP_HOST").is_ok() {
            Some(SmtpConfig::from_env())
        } else {
            None
        };

        Self {
            default_email_subject: env::var("AUTOMATION_DEFAULT_EMAIL_SUBJECT")
                .unwrap_or_else(|_| "Message from your LeadFlow team".to_string()),
            queue_poll_interval_secs: env::var("AUTOMATION_QUEUE_POLL_INTERVAL")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            smtp,
        }
    }
}

/// SMTP configuration for the outbound email adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    pub use_tls: bool,
}

impl SmtpConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("SMTP_HOST").unwrap_or_default(),
            port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "2525".to_string())
                .parse()
                .unwrap_or(2525),
            username: env::var("SMTP_USERNAME").unwrap_or_default(),
            password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_email: env::var("SMTP_FROM_EMAIL")
                .unwrap_or_else(|_| "no-reply@leadflow.app".to_string()),
            from_name: env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "LeadFlow".to_string()),
            use_tls: env::var("SMTP_USE_TLS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        }
    }

    /// Check if SMTP is properly configured
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }
}
