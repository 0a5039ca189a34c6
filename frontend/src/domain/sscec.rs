//! Ship Sanitation Control Exemption Certificate rules.
//!
//! An SSCEC is valid for six calendar months from issue. Vessel records
//! store one side of that window and the other side is derived here.
//! When the target month is shorter than the source day (Aug 31 + 6 months),
//! the date is clamped to the last day of the target month.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::date_utils::{format_iso, parse_date};

/// Validity period of a certificate, in calendar months
pub const SSCEC_VALIDITY_MONTHS: u32 = 6;

/// Certificates expiring within this many days are flagged as expiring
pub const DEFAULT_WARNING_DAYS: i64 = 30;

/// Certificate state as shown in the vessel list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SscecStatus {
    Valid,
    Expiring,
    Expired,
}

impl SscecStatus {
    pub fn label(self) -> &'static str {
        match self {
            SscecStatus::Valid => "Valid",
            SscecStatus::Expiring => "Expiring",
            SscecStatus::Expired => "Expired",
        }
    }
}

impl fmt::Display for SscecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Issue and expiry dates of one certificate.
///
/// Built from the issue date, `expiry == issued + 6 months` always holds.
/// Built from a stored expiry, the expiry is kept as given and the issue date
/// is derived, so month-end clamping can leave the two a few days short of
/// an exact six month span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateWindow {
    pub issued: NaiveDate,
    pub expiry: NaiveDate,
}

impl CertificateWindow {
    pub fn from_issued(issued: NaiveDate) -> Option<Self> {
        let expiry = add_validity(issued)?;
        Some(Self { issued, expiry })
    }

    pub fn from_expiry(expiry: NaiveDate) -> Option<Self> {
        let issued = subtract_validity(expiry)?;
        Some(Self { issued, expiry })
    }

    /// Window for whatever a record stored.
    ///
    /// A pair that belongs together is kept exactly, so an expiry saved on a
    /// month end survives a reload. A pair that does not is rebuilt from the
    /// issue date.
    pub fn from_stored(issued: Option<NaiveDate>, expiry: Option<NaiveDate>) -> Option<Self> {
        match (issued, expiry) {
            (Some(issued), Some(expiry)) => {
                let window = Self { issued, expiry };
                if window.is_linked() {
                    Some(window)
                } else {
                    Self::from_issued(issued)
                }
            }
            (Some(issued), None) => Self::from_issued(issued),
            (None, Some(expiry)) => Self::from_expiry(expiry),
            (None, None) => None,
        }
    }

    /// One side is the other shifted by the validity period
    pub fn is_linked(&self) -> bool {
        add_validity(self.issued) == Some(self.expiry)
            || subtract_validity(self.expiry) == Some(self.issued)
    }

    /// Whole days left until expiry, negative once expired
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry - today).num_days()
    }

    pub fn status(&self, today: NaiveDate) -> SscecStatus {
        classify_date_with(self.expiry, today, DEFAULT_WARNING_DAYS)
    }
}

/// Issue date plus the validity period
pub fn add_validity(issued: NaiveDate) -> Option<NaiveDate> {
    issued.checked_add_months(Months::new(SSCEC_VALIDITY_MONTHS))
}

/// Expiry date minus the validity period
pub fn subtract_validity(expiry: NaiveDate) -> Option<NaiveDate> {
    expiry.checked_sub_months(Months::new(SSCEC_VALIDITY_MONTHS))
}

/// Expiry (ISO) for an issue date typed in a form; empty when the input is not a date
pub fn compute_expiry(issued: &str) -> String {
    parse_date(issued)
        .and_then(add_validity)
        .map(format_iso)
        .unwrap_or_default()
}

/// Issue date (ISO) for a displayed expiry; empty when the input is not a date
pub fn compute_issued_from_expiry(expiry: &str) -> String {
    parse_date(expiry)
        .and_then(subtract_validity)
        .map(format_iso)
        .unwrap_or_default()
}

/// Classify a displayed expiry date. Unreadable dates count as expired.
pub fn classify(expiry: &str, today: NaiveDate) -> SscecStatus {
    match parse_date(expiry) {
        Some(expiry) => classify_date(expiry, today),
        None => {
            log::debug!("Unreadable SSCEC expiry {:?}, treating as expired", expiry);
            SscecStatus::Expired
        }
    }
}

pub fn classify_date(expiry: NaiveDate, today: NaiveDate) -> SscecStatus {
    classify_date_with(expiry, today, DEFAULT_WARNING_DAYS)
}

/// Classify with a custom warning window (in days)
pub fn classify_date_with(expiry: NaiveDate, today: NaiveDate, warning_days: i64) -> SscecStatus {
    let days_until_expiry = (expiry - today).num_days();
    if days_until_expiry < 0 {
        SscecStatus::Expired
    } else if days_until_expiry <= warning_days {
        SscecStatus::Expiring
    } else {
        SscecStatus::Valid
    }
}
