use anyhow::{anyhow, Context, Result};
use shared::VesselDto;

use super::{optional_date, require_id};
use crate::domain::models::Vessel;
use crate::domain::sscec::CertificateWindow;
use crate::domain::validation::normalize_imo;
use crate::services::date_utils::{format_display, format_iso, DisplayStyle};

/// Mapper to convert between shared Vessel DTOs and domain Vessel models.
pub struct VesselMapper;

impl VesselMapper {
    /// A record that stored one certificate field keeps that field as given
    /// and gets the other derived. When both are present and out of step the
    /// issue date wins.
    pub fn to_domain(dto: VesselDto) -> Result<Vessel> {
        let id = require_id(dto.id, "vessel")?;
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(anyhow!("vessel has no name")).context(format!("vessel {}", id));
        }

        let sscec = CertificateWindow::from_stored(
            optional_date(dto.sscec_issued.as_deref(), "SSCEC issue date"),
            optional_date(dto.sscec_expiry.as_deref(), "SSCEC expiry"),
        );

        Ok(Vessel {
            id: Some(id),
            name,
            imo: normalize_imo(&dto.imo),
            flag: dto.flag,
            vessel_type: dto.vessel_type,
            gross_tonnage: dto.gross_tonnage,
            owner: dto.owner,
            sscec,
        })
    }

    /// Both certificate fields are sent exactly as the window holds them
    pub fn to_dto(domain: Vessel) -> VesselDto {
        let window = domain.sscec_window();
        VesselDto {
            id: domain.id,
            name: domain.name,
            imo: domain.imo,
            flag: domain.flag,
            vessel_type: domain.vessel_type,
            gross_tonnage: domain.gross_tonnage,
            owner: domain.owner,
            sscec_issued: window.map(|w| format_iso(w.issued)),
            sscec_expiry: window.map(|w| format_display(w.expiry, DisplayStyle::Dotted)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dto() -> VesselDto {
        VesselDto {
            id: Some("v-1".to_string()),
            name: "MV Horizon".to_string(),
            imo: "IMO9321483".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_issue_date_from_expiry_only_record() {
        let mut dto = dto();
        dto.sscec_expiry = Some("15.03.2025".to_string());
        let vessel = VesselMapper::to_domain(dto).unwrap();
        assert_eq!(vessel.imo, "9321483");
        assert_eq!(vessel.sscec_issued(), NaiveDate::from_ymd_opt(2024, 9, 15));
    }

    #[test]
    fn test_month_end_expiry_round_trips_unchanged() {
        let mut dto = dto();
        dto.sscec_expiry = Some("31.08.2025".to_string());
        let vessel = VesselMapper::to_domain(dto).unwrap();
        assert_eq!(vessel.sscec_expiry(), NaiveDate::from_ymd_opt(2025, 8, 31));

        let out = VesselMapper::to_dto(vessel.clone());
        assert_eq!(out.sscec_issued.as_deref(), Some("2025-02-28"));
        assert_eq!(out.sscec_expiry.as_deref(), Some("31.08.2025"));

        let reloaded = VesselMapper::to_domain(out).unwrap();
        assert_eq!(reloaded.sscec, vessel.sscec);
    }

    #[test]
    fn test_issue_date_preferred() {
        let mut dto = dto();
        dto.sscec_issued = Some("2024-10-01".to_string());
        dto.sscec_expiry = Some("15.03.2025".to_string());
        let vessel = VesselMapper::to_domain(dto).unwrap();
        assert_eq!(vessel.sscec_issued(), NaiveDate::from_ymd_opt(2024, 10, 1));
        assert_eq!(vessel.sscec_expiry(), NaiveDate::from_ymd_opt(2025, 4, 1));
    }

    #[test]
    fn test_to_dto_sends_both_dates() {
        let mut dto = dto();
        dto.sscec_issued = Some("2024-09-15".to_string());
        let out = VesselMapper::to_dto(VesselMapper::to_domain(dto).unwrap());
        assert_eq!(out.sscec_issued.as_deref(), Some("2024-09-15"));
        assert_eq!(out.sscec_expiry.as_deref(), Some("15.03.2025"));
    }

    #[test]
    fn test_nameless_vessel_is_rejected() {
        let mut dto = dto();
        dto.name = " ".to_string();
        assert!(VesselMapper::to_domain(dto).is_err());
    }
}
