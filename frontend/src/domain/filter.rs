//! Client-side search over loaded lists.
//!
//! Every list screen keeps the full result of its last load and narrows it
//! locally as the user types. Matching is a case-insensitive substring test
//! over the columns the screen shows.

use chrono::NaiveDate;

use crate::domain::models::{
    Customer, KycStatus, Message, Port, PortCall, Service, SofStatus, User, Vendor, Vessel,
};
use crate::domain::sscec::SscecStatus;

/// Records that take part in the search box
pub trait Searchable {
    /// Text of the searchable columns
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Rows matching `query`, in their original order
pub fn filter_records<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(query)).collect()
}

pub fn filter_vendors_by_kyc(vendors: &[Vendor], status: KycStatus) -> Vec<&Vendor> {
    vendors.iter().filter(|v| v.kyc_status == status).collect()
}

pub fn filter_vessels_by_status<'a>(
    vessels: &'a [Vessel],
    status: SscecStatus,
    today: NaiveDate,
    warning_days: i64,
) -> Vec<&'a Vessel> {
    vessels
        .iter()
        .filter(|v| v.sscec_status(today, warning_days) == status)
        .collect()
}

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.company_name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.tax_number.as_str(),
        ];
        fields.extend(self.pics.iter().map(|p| p.name.as_str()));
        fields
    }
}

impl Searchable for Vendor {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.company_name.as_str(),
            self.service_category.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        ];
        fields.extend(self.pics.iter().map(|p| p.name.as_str()));
        fields
    }
}

impl Searchable for Vessel {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.imo.as_str(),
            self.flag.as_str(),
            self.owner.as_str(),
        ]
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.username.as_str(),
            self.full_name.as_str(),
            self.email.as_str(),
            self.role.as_str(),
        ]
    }
}

impl Searchable for Port {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.code.as_str(), self.country.as_str()]
    }
}

impl Searchable for Service {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

impl Searchable for SofStatus {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

impl Searchable for PortCall {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.vessel_id.as_str(),
            self.port_id.as_str(),
            self.customer_id.as_str(),
            self.status.label(),
        ]
    }
}

impl Searchable for Message {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.sender.as_str(),
            self.recipient.as_str(),
            self.subject.as_str(),
            self.body.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Pic;
    use crate::domain::sscec::CertificateWindow;

    fn customer(name: &str, pic: &str) -> Customer {
        Customer {
            company_name: name.to_string(),
            pics: vec![Pic {
                name: pic.to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let customers = vec![customer("Bravo", "x"), customer("Alpha", "y")];
        let found = filter_records(&customers, "   ");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].company_name, "Bravo");
    }

    #[test]
    fn test_case_insensitive_match_on_nested_pic() {
        let customers = vec![
            customer("PT Samudera Lines", "Budi Santoso"),
            customer("CV Kapal Mas", "Rina"),
        ];
        let found = filter_records(&customers, "SANTOSO");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].company_name, "PT Samudera Lines");

        assert!(filter_records(&customers, "bunker").is_empty());
    }

    #[test]
    fn test_vendor_kyc_filter() {
        let vendors = vec![
            Vendor {
                company_name: "A".to_string(),
                kyc_status: KycStatus::Approved,
                ..Default::default()
            },
            Vendor {
                company_name: "B".to_string(),
                ..Default::default()
            },
        ];
        let pending = filter_vendors_by_kyc(&vendors, KycStatus::Pending);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].company_name, "B");
    }

    #[test]
    fn test_vessel_status_filter() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let vessels = vec![
            Vessel {
                name: "Fresh".to_string(),
                sscec: NaiveDate::from_ymd_opt(2025, 2, 1).and_then(CertificateWindow::from_issued),
                ..Default::default()
            },
            Vessel {
                name: "Soon".to_string(),
                sscec: NaiveDate::from_ymd_opt(2024, 9, 15).and_then(CertificateWindow::from_issued),
                ..Default::default()
            },
            Vessel {
                name: "Missing".to_string(),
                ..Default::default()
            },
        ];
        let names = |status| -> Vec<String> {
            filter_vessels_by_status(&vessels, status, today, 30)
                .iter()
                .map(|v| v.name.clone())
                .collect()
        };
        assert_eq!(names(SscecStatus::Valid), vec!["Fresh"]);
        assert_eq!(names(SscecStatus::Expiring), vec!["Soon"]);
        assert_eq!(names(SscecStatus::Expired), vec!["Missing"]);
    }

    #[test]
    fn test_vessel_search_by_imo() {
        let vessels = vec![Vessel {
            name: "MV Horizon".to_string(),
            imo: "9321483".to_string(),
            ..Default::default()
        }];
        assert_eq!(filter_records(&vessels, "93214").len(), 1);
    }
}
