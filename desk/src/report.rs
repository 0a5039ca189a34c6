//! Plain-text rendering of command output.
//!
//! Pure functions over loaded records so the layout can be tested without
//! a server.

use chrono::NaiveDate;
use port_agency_frontend::domain::birthday::BirthdayAlert;
use port_agency_frontend::domain::models::{Customer, Vendor, Vessel, User};
use port_agency_frontend::services::date_utils::{format_date_long, format_display, DisplayStyle};
use port_agency_frontend::services::SessionUser;

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

fn footer(out: &mut String, shown: usize, noun: &str) {
    out.push_str(&format!("{} {}\n", shown, noun));
}

pub fn customers(rows: &[&Customer]) -> String {
    let mut out = format!("{:<36} {:<28} {:<16} {}\n", "COMPANY", "EMAIL", "PHONE", "PICS");
    for customer in rows {
        out.push_str(&format!(
            "{:<36} {:<28} {:<16} {}\n",
            customer.company_name,
            or_dash(&customer.email),
            or_dash(&customer.phone),
            customer.pics.len()
        ));
    }
    footer(&mut out, rows.len(), "customer(s)");
    out
}

pub fn vendors(rows: &[&Vendor]) -> String {
    let mut out = format!("{:<36} {:<20} {:<10} {}\n", "COMPANY", "CATEGORY", "KYC", "PICS");
    for vendor in rows {
        out.push_str(&format!(
            "{:<36} {:<20} {:<10} {}\n",
            vendor.company_name,
            or_dash(&vendor.service_category),
            vendor.kyc_status.label(),
            vendor.pics.len()
        ));
    }
    footer(&mut out, rows.len(), "vendor(s)");
    out
}

/// Vessels with their certificate window and status as of `today`
pub fn vessels(rows: &[&Vessel], today: NaiveDate, warning_days: i64, style: DisplayStyle) -> String {
    let mut out = format!(
        "{:<28} {:<8} {:<11} {:<11} {}\n",
        "VESSEL", "IMO", "ISSUED", "EXPIRES", "SSCEC"
    );
    for vessel in rows {
        let (issued, expiry, days) = match vessel.sscec_window() {
            Some(window) => (
                format_display(window.issued, style),
                format_display(window.expiry, style),
                Some(window.days_until_expiry(today)),
            ),
            None => ("-".to_string(), "-".to_string(), None),
        };
        let status = vessel.sscec_status(today, warning_days);
        let status = match days {
            Some(days) if days >= 0 => format!("{} ({} days left)", status, days),
            Some(days) => format!("{} ({} days ago)", status, -days),
            None => format!("{} (no certificate)", status),
        };
        out.push_str(&format!(
            "{:<28} {:<8} {:<11} {:<11} {}\n",
            vessel.name,
            or_dash(&vessel.imo),
            issued,
            expiry,
            status
        ));
    }
    footer(&mut out, rows.len(), "vessel(s)");
    out
}

pub fn users(rows: &[&User]) -> String {
    let mut out = format!("{:<16} {:<28} {:<12} {}\n", "USERNAME", "NAME", "ROLE", "STATUS");
    for user in rows {
        out.push_str(&format!(
            "{:<16} {:<28} {:<12} {}\n",
            user.username,
            user.display_name(),
            or_dash(&user.role),
            if user.active { "active" } else { "inactive" }
        ));
    }
    footer(&mut out, rows.len(), "user(s)");
    out
}

pub fn birthdays(alerts: &[BirthdayAlert], window_days: i64) -> String {
    if alerts.is_empty() {
        return format!("No birthdays in the next {} days\n", window_days);
    }
    let mut out = String::new();
    for alert in alerts {
        let when = match alert.days_until {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            days => format!("in {} days", days),
        };
        out.push_str(&format!(
            "{} ({}): {}, {}\n",
            alert.person_name,
            alert.affiliation,
            format_date_long(alert.occurs_on),
            when
        ));
    }
    out
}

pub fn whoami(user: Option<&SessionUser>) -> String {
    match user {
        Some(user) if !user.full_name.trim().is_empty() => {
            format!("{} ({}), role {}\n", user.full_name, user.username, or_dash(&user.role))
        }
        Some(user) => format!("{}, role {}\n", user.username, or_dash(&user.role)),
        None => "Not logged in\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use port_agency_frontend::domain::models::KycStatus;
    use port_agency_frontend::domain::sscec::CertificateWindow;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_vessels_show_window_and_status() {
        let vessels = vec![
            Vessel {
                name: "MV Horizon".to_string(),
                imo: "9321483".to_string(),
                sscec: CertificateWindow::from_issued(date(2024, 9, 15)),
                ..Default::default()
            },
            Vessel {
                name: "MV Nusantara".to_string(),
                ..Default::default()
            },
        ];
        let rows: Vec<&Vessel> = vessels.iter().collect();
        let out = super::vessels(&rows, date(2025, 3, 1), 30, DisplayStyle::Dotted);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[1].contains("15.09.2024"));
        assert!(lines[1].contains("15.03.2025"));
        assert!(lines[1].ends_with("Expiring (14 days left)"));
        assert!(lines[2].ends_with("Expired (no certificate)"));
        assert_eq!(lines[3], "2 vessel(s)");
    }

    #[test]
    fn test_expired_vessel_counts_days_ago() {
        let vessel = Vessel {
            name: "MV Horizon".to_string(),
            sscec: CertificateWindow::from_issued(date(2024, 9, 15)),
            ..Default::default()
        };
        let out = vessels(&[&vessel], date(2025, 4, 1), 30, DisplayStyle::Dashed);
        assert!(out.contains("15-03-2025"));
        assert!(out.contains("Expired (17 days ago)"));
    }

    #[test]
    fn test_birthdays() {
        assert_eq!(birthdays(&[], 7), "No birthdays in the next 7 days\n");

        let alerts = vec![
            BirthdayAlert {
                person_name: "Budi".to_string(),
                affiliation: "PT Samudera Lines".to_string(),
                occurs_on: date(2025, 3, 1),
                days_until: 0,
            },
            BirthdayAlert {
                person_name: "Rina".to_string(),
                affiliation: "Staff".to_string(),
                occurs_on: date(2025, 3, 4),
                days_until: 3,
            },
        ];
        assert_eq!(
            birthdays(&alerts, 7),
            "Budi (PT Samudera Lines): March 1, 2025, today\nRina (Staff): March 4, 2025, in 3 days\n"
        );
    }

    #[test]
    fn test_vendor_rows() {
        let vendor = Vendor {
            company_name: "CV Bunker Jaya".to_string(),
            kyc_status: KycStatus::Approved,
            ..Default::default()
        };
        let out = vendors(&[&vendor]);
        assert!(out.lines().nth(1).unwrap().contains("Approved"));
        assert!(out.ends_with("1 vendor(s)\n"));
    }

    #[test]
    fn test_whoami() {
        assert_eq!(whoami(None), "Not logged in\n");
        let user = SessionUser {
            username: "ops".to_string(),
            role: "admin".to_string(),
            ..Default::default()
        };
        assert_eq!(whoami(Some(&user)), "ops, role admin\n");
    }
}
