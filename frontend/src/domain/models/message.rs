use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Internal note sent between back-office users
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Option<String>,
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub read: bool,
}

/// Messages addressed to `username` that are still unread
pub fn unread_for<'a>(messages: &'a [Message], username: &str) -> Vec<&'a Message> {
    messages
        .iter()
        .filter(|m| !m.read && m.recipient.eq_ignore_ascii_case(username))
        .collect()
}
