//! Pattern 2: Factory Method
//! Notification Senders
//!
//! Run with: cargo run --bin p2_factory_notifications

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub trait Notification {
    /// Simulates sending and returns a confirmation line.
    fn send(&self, message: &str) -> String;
}

struct EmailNotification;
struct SmsNotification;
struct PushNotification;

impl Notification for EmailNotification {
    fn send(&self, message: &str) -> String {
        format!("Sending email: {}", message)
    }
}

impl Notification for SmsNotification {
    fn send(&self, message: &str) -> String {
        format!("Sending SMS: {}", message)
    }
}

impl Notification for PushNotification {
    fn send(&self, message: &str) -> String {
        format!("Sending push notification: {}", message)
    }
}

pub trait NotificationCreator {
    fn create_notification(&self) -> Box<dyn Notification>;

    fn dispatch_notification(&self, message: &str) -> String {
        self.create_notification().send(message)
    }
}

struct EmailNotificationCreator;
struct SmsNotificationCreator;
struct PushNotificationCreator;

impl NotificationCreator for EmailNotificationCreator {
    fn create_notification(&self) -> Box<dyn Notification> {
        Box::new(EmailNotification)
    }
}

impl NotificationCreator for SmsNotificationCreator {
    fn create_notification(&self) -> Box<dyn Notification> {
        Box::new(SmsNotification)
    }
}

impl NotificationCreator for PushNotificationCreator {
    fn create_notification(&self) -> Box<dyn Notification> {
        Box::new(PushNotification)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Sms,
    Push,
}

impl Channel {
    const ALL: [Channel; 3] = [Channel::Email, Channel::Sms, Channel::Push];

    pub fn creator(self) -> Box<dyn NotificationCreator> {
        match self {
            Channel::Email => Box::new(EmailNotificationCreator),
            Channel::Sms => Box::new(SmsNotificationCreator),
            Channel::Push => Box::new(PushNotificationCreator),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Push => "push",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown notification channel '{0}' (expected email, sms or push)")]
pub struct UnknownChannel(String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|channel| channel.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}

fn main() {
    println!("=== Factory Method: Notifications ===\n");

    let messages = [
        "Welcome to our platform!",
        "Your code is 123456.",
        "You have a new follower!",
    ];
    for (channel, message) in Channel::ALL.into_iter().zip(messages) {
        println!("{}", channel.creator().dispatch_notification(message));
    }

    println!("\n=== Routing From User Preferences ===");
    let preferences = [("alice", "SMS"), ("bob", "push"), ("carol", "pigeon")];
    for (user, preferred) in preferences {
        let line = preferred
            .parse::<Channel>()
            .map(|channel| channel.creator().dispatch_notification(&format!("Hi {}!", user)));
        match line {
            Ok(line) => println!("  {}", line),
            Err(err) => println!("  {}: {}", user, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_creator_sends_through_its_channel() {
        assert_eq!(
            EmailNotificationCreator.dispatch_notification("Welcome to our platform!"),
            "Sending email: Welcome to our platform!"
        );
        assert_eq!(
            SmsNotificationCreator.dispatch_notification("Your code is 123456."),
            "Sending SMS: Your code is 123456."
        );
        assert_eq!(
            PushNotificationCreator.dispatch_notification("You have a new follower!"),
            "Sending push notification: You have a new follower!"
        );
    }

    #[test]
    fn test_channel_parse_is_case_insensitive() {
        assert_eq!("EMAIL".parse::<Channel>(), Ok(Channel::Email));
        assert_eq!("Sms".parse::<Channel>(), Ok(Channel::Sms));
        assert_eq!(
            "fax".parse::<Channel>(),
            Err(UnknownChannel("fax".to_string()))
        );
    }

    #[test]
    fn test_channel_creator_round_trip() {
        for channel in Channel::ALL {
            let sent = channel.creator().dispatch_notification("x");
            assert!(sent.ends_with(": x"), "{} produced {}", channel, sent);
        }
    }
}
