use anyhow::{Context, Result};
use shared::PortCallDto;

use super::{optional_date, require_id};
use crate::domain::models::{PortCall, PortCallStatus};
use crate::services::date_utils::format_iso;

/// Mapper to convert between shared PortCall DTOs and domain PortCall models.
pub struct PortCallMapper;

impl PortCallMapper {
    pub fn to_domain(dto: PortCallDto) -> Result<PortCall> {
        let id = require_id(dto.id, "port call")?;
        let vessel_id = require_id(dto.vessel_id, "port call vessel")
            .with_context(|| format!("port call {}", id))?;
        let port_id = require_id(dto.port_id, "port call port")
            .with_context(|| format!("port call {}", id))?;

        let status = PortCallStatus::from_label(&dto.status).unwrap_or_else(|| {
            log::warn!("Unknown port call status {:?} on {}, showing as planned", dto.status, id);
            PortCallStatus::Planned
        });

        Ok(PortCall {
            id: Some(id),
            vessel_id,
            port_id,
            customer_id: dto.customer_id.unwrap_or_default(),
            eta: optional_date(dto.eta.as_deref(), "ETA"),
            etd: optional_date(dto.etd.as_deref(), "ETD"),
            status,
            service_ids: dto.service_ids,
        })
    }

    pub fn to_dto(domain: PortCall) -> PortCallDto {
        PortCallDto {
            id: domain.id,
            vessel_id: Some(domain.vessel_id),
            port_id: Some(domain.port_id),
            customer_id: Some(domain.customer_id).filter(|id| !id.is_empty()),
            eta: domain.eta.map(format_iso),
            etd: domain.etd.map(format_iso),
            status: domain.status.label().to_string(),
            service_ids: domain.service_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_to_domain() {
        let dto = PortCallDto {
            id: Some("pc-1".to_string()),
            vessel_id: Some("v-1".to_string()),
            port_id: Some("p-1".to_string()),
            eta: Some("2025-03-01T06:00:00Z".to_string()),
            status: "berthed".to_string(),
            ..Default::default()
        };
        let call = PortCallMapper::to_domain(dto).unwrap();
        assert_eq!(call.eta, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(call.status, PortCallStatus::Berthed);
        assert_eq!(call.customer_id, "");
    }

    #[test]
    fn test_missing_vessel_is_rejected() {
        let dto = PortCallDto {
            id: Some("pc-1".to_string()),
            port_id: Some("p-1".to_string()),
            ..Default::default()
        };
        let err = PortCallMapper::to_domain(dto).unwrap_err();
        assert_eq!(format!("{:#}", err), "port call pc-1: port call vessel record has no id");
    }
}
