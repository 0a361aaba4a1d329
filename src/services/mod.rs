pub mod contacts;
pub mod delivery;
pub mod message_log;
pub mod smtp;

pub use contacts::{ContactDirectory, InMemoryContactDirectory};
pub use delivery::{DeliveryReceipt, EmailMessage, EmailSender, SmsMessage, SmsSender};
pub use message_log::{
    InMemoryMessageLog, MessageChannel, MessageDirection, MessageLog, MessageStatus,
    OutboundMessageRecord,
};
pub use smtp::SmtpMailer;
