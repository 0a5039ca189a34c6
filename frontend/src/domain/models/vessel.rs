use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::sscec::{classify_date_with, CertificateWindow, SscecStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    pub id: Option<String>,
    pub name: String,
    /// Seven digit IMO number, without the "IMO" prefix
    pub imo: String,
    pub flag: String,
    pub vessel_type: String,
    pub gross_tonnage: Option<f64>,
    pub owner: String,
    /// Sanitation certificate dates as stored on the record
    pub sscec: Option<CertificateWindow>,
}

impl Vessel {
    pub fn sscec_window(&self) -> Option<CertificateWindow> {
        self.sscec
    }

    pub fn sscec_issued(&self) -> Option<NaiveDate> {
        self.sscec.map(|window| window.issued)
    }

    pub fn sscec_expiry(&self) -> Option<NaiveDate> {
        self.sscec_window().map(|window| window.expiry)
    }

    /// Certificate status; a vessel without a certificate counts as expired
    pub fn sscec_status(&self, today: NaiveDate, warning_days: i64) -> SscecStatus {
        match self.sscec_expiry() {
            Some(expiry) => classify_date_with(expiry, today, warning_days),
            None => SscecStatus::Expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_vessel_sscec_status() {
        let vessel = Vessel {
            name: "MV Horizon".to_string(),
            sscec: CertificateWindow::from_issued(date(2024, 9, 15)),
            ..Default::default()
        };
        assert_eq!(vessel.sscec_expiry(), Some(date(2025, 3, 15)));
        assert_eq!(vessel.sscec_status(date(2025, 1, 1), 30), SscecStatus::Valid);
        assert_eq!(vessel.sscec_status(date(2025, 3, 1), 30), SscecStatus::Expiring);
        assert_eq!(vessel.sscec_status(date(2025, 4, 1), 30), SscecStatus::Expired);
    }

    #[test]
    fn test_month_end_expiry_is_not_moved() {
        let vessel = Vessel {
            name: "MV Horizon".to_string(),
            sscec: CertificateWindow::from_expiry(date(2025, 8, 31)),
            ..Default::default()
        };
        assert_eq!(vessel.sscec_issued(), Some(date(2025, 2, 28)));
        assert_eq!(vessel.sscec_expiry(), Some(date(2025, 8, 31)));
        assert_eq!(vessel.sscec_status(date(2025, 8, 30), 30), SscecStatus::Expiring);
    }

    #[test]
    fn test_vessel_without_certificate_is_expired() {
        let vessel = Vessel::default();
        assert_eq!(vessel.sscec_window(), None);
        assert_eq!(vessel.sscec_status(date(2025, 1, 1), 30), SscecStatus::Expired);
    }
}
