//! One service, two channel capabilities with clashing `send` operations.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Delivery channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Sms => write!(f, "sms"),
        }
    }
}

/// A message handed to a channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub channel: Channel,
    pub recipient: String,
    /// Rendered message text.
    pub text: String,
}

impl std::fmt::Display for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Email capability.
pub trait EmailService {
    fn send(&self, to: &str, subject: &str, body: &str) -> Delivery;
}

/// SMS capability.
pub trait SmsService {
    fn send(&self, number: &str, message: &str) -> Delivery;
}

/// Implements both [`EmailService`] and [`SmsService`].
///
/// Calling `send` on this type is ambiguous; use [`send_as_email`] or
/// [`send_as_sms`], or a qualified trait call.
///
/// [`send_as_email`]: NotificationService::send_as_email
/// [`send_as_sms`]: NotificationService::send_as_sms
#[derive(Debug, Default)]
pub struct NotificationService {
    outbox: Mutex<Vec<Delivery>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send_as_email(&self, to: &str, subject: &str, body: &str) -> Delivery {
        EmailService::send(self, to, subject, body)
    }

    pub fn send_as_sms(&self, number: &str, message: &str) -> Delivery {
        SmsService::send(self, number, message)
    }

    /// Everything sent so far, oldest first.
    pub fn sent(&self) -> Vec<Delivery> {
        match self.outbox.lock() {
            Ok(outbox) => outbox.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn deliver(&self, delivery: Delivery) -> Delivery {
        info!(channel = %delivery.channel, recipient = %delivery.recipient, "notification sent");
        let mut outbox = match self.outbox.lock() {
            Ok(outbox) => outbox,
            Err(poisoned) => poisoned.into_inner(),
        };
        outbox.push(delivery.clone());
        delivery
    }
}

impl EmailService for NotificationService {
    fn send(&self, to: &str, subject: &str, body: &str) -> Delivery {
        self.deliver(Delivery {
            channel: Channel::Email,
            recipient: to.to_string(),
            text: format!("Email to {to}: {subject} - {body}"),
        })
    }
}

impl SmsService for NotificationService {
    fn send(&self, number: &str, message: &str) -> Delivery {
        self.deliver(Delivery {
            channel: Channel::Sms,
            recipient: number.to_string(),
            text: format!("SMS to {number}: {message}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rendering() {
        let service = NotificationService::new();
        let d = service.send_as_email("ana@example.com", "Invoice", "Due Friday");
        assert_eq!(d.channel, Channel::Email);
        assert_eq!(d.recipient, "ana@example.com");
        assert_eq!(d.to_string(), "Email to ana@example.com: Invoice - Due Friday");
    }

    #[test]
    fn sms_rendering() {
        let service = NotificationService::new();
        let d = service.send_as_sms("+5511999990000", "Code 1234");
        assert_eq!(d.channel, Channel::Sms);
        assert_eq!(d.to_string(), "SMS to +5511999990000: Code 1234");
    }

    #[test]
    fn qualified_calls_pick_the_capability() {
        let service = NotificationService::new();
        let email = <NotificationService as EmailService>::send(&service, "a@b", "s", "b");
        let sms = <NotificationService as SmsService>::send(&service, "123", "m");
        assert_eq!(email.channel, Channel::Email);
        assert_eq!(sms.channel, Channel::Sms);
    }

    #[test]
    fn capabilities_work_as_trait_objects() {
        let service = NotificationService::new();
        let email: &dyn EmailService = &service;
        let sms: &dyn SmsService = &service;
        email.send("x@y", "hi", "there");
        sms.send("555", "ping");

        let sent = service.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].channel, Channel::Email);
        assert_eq!(sent[1].channel, Channel::Sms);
    }

    #[test]
    fn delivery_serializes_lowercase_channel() {
        let service = NotificationService::new();
        let d = service.send_as_sms("1", "m");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["channel"], "sms");
        assert_eq!(json["text"], "SMS to 1: m");
    }
}
