use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::MessageDto;

use super::require_id;
use crate::domain::models::Message;

/// Mapper to convert between shared Message DTOs and domain Message models.
pub struct MessageMapper;

impl MessageMapper {
    pub fn to_domain(dto: MessageDto) -> Result<Message> {
        let id = require_id(dto.id, "message")?;
        let sent_at = if dto.sent_at.trim().is_empty() {
            None
        } else {
            match DateTime::parse_from_rfc3339(dto.sent_at.trim()) {
                Ok(ts) => Some(ts.with_timezone(&Utc)),
                Err(e) => {
                    log::warn!("Unreadable timestamp {:?} on message {}: {}", dto.sent_at, id, e);
                    None
                }
            }
        };

        Ok(Message {
            id: Some(id),
            sender: dto.sender,
            recipient: dto.recipient,
            subject: dto.subject,
            body: dto.body,
            sent_at,
            read: dto.read,
        })
    }

    pub fn to_dto(domain: Message) -> MessageDto {
        MessageDto {
            id: domain.id,
            sender: domain.sender,
            recipient: domain.recipient,
            subject: domain.subject,
            body: domain.body,
            sent_at: domain.sent_at.map(|ts| ts.to_rfc3339()).unwrap_or_default(),
            read: domain.read,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sent_at_parsing() {
        let dto = MessageDto {
            id: Some("m1".to_string()),
            sent_at: "2025-03-01T08:30:00+07:00".to_string(),
            ..Default::default()
        };
        let message = MessageMapper::to_domain(dto).unwrap();
        assert_eq!(
            message.sent_at.map(|ts| ts.to_rfc3339()),
            Some("2025-03-01T01:30:00+00:00".to_string())
        );
    }
}
