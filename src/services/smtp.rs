// SMTP email adapter

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{authentication::Credentials, PoolConfig},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::{error, info};

use super::delivery::{DeliveryReceipt, EmailMessage, EmailSender};
use crate::config::SmtpConfig;
use crate::error::{AutomationError, AutomationResult};

/// `EmailSender` backed by a pooled async SMTP transport.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_email: String,
    from_name: String,
}

impl SmtpMailer {
    pub fn new(smtp_config: &SmtpConfig) -> AutomationResult<Self> {
        if !smtp_config.is_configured() {
            return Err(AutomationError::Config(
                "SMTP host/username/password not configured".to_string(),
            ));
        }

        let creds = Credentials::new(
            smtp_config.username.clone(),
            smtp_config.password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp_config.host)
            .port(smtp_config.port)
            .credentials(creds)
            .pool_config(PoolConfig::new().max_size(10))
            .timeout(Some(Duration::from_secs(10)))
            .build();

        Ok(Self {
            transport,
            from_email: smtp_config.from_email.clone(),
            from_name: smtp_config.from_name.clone(),
        })
    }
}

#[async_trait]
impl EmailSender for SmtpMailer {
    async fn send_email(&self, message: &EmailMessage) -> AutomationResult<DeliveryReceipt> {
        let from = format!("{} <{}>", self.from_name, self.from_email).parse::<Mailbox>()?;
        let to = message.to.parse::<Mailbox>()?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(message.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(message.html_body.clone()),
                    ),
            )?;

        match self.transport.send(email).await {
            Ok(response) => {
                info!("Email sent successfully to {}", message.to);
                let provider_id = response.message().collect::<Vec<_>>().join(" ");
                Ok(DeliveryReceipt::accepted(provider_id))
            }
            Err(e) => {
                error!("Failed to send email to {}: {}", message.to, e);
                Ok(DeliveryReceipt::rejected(e.to_string()))
            }
        }
    }
}
