// Error types shared across the automation engine and its collaborators.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("Rule store error: {0}")]
    Store(String),
    #[error("Delivery error: {0}")]
    Delivery(String),
    #[error("Message log error: {0}")]
    MessageLog(String),
    #[error("Contact lookup error: {0}")]
    ContactLookup(String),
    #[error("Invalid rule configuration: {0}")]
    InvalidRule(String),
    #[error("Queue error: {0}")]
    Queue(String),
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AutomationResult<T> = Result<T, AutomationError>;

impl From<lettre::address::AddressError> for AutomationError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::Delivery(format!("invalid address: {}", err))
    }
}

impl From<lettre::error::Error> for AutomationError {
    fn from(err: lettre::error::Error) -> Self {
        Self::Delivery(err.to_string())
    }
}
