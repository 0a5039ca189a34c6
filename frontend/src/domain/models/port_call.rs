use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortCallStatus {
    #[default]
    Planned,
    Arrived,
    Berthed,
    Departed,
    Cancelled,
}

impl PortCallStatus {
    /// Parse the backend's label; unknown labels are `None`
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "" | "planned" | "scheduled" => Some(PortCallStatus::Planned),
            "arrived" => Some(PortCallStatus::Arrived),
            "berthed" | "alongside" => Some(PortCallStatus::Berthed),
            "departed" | "sailed" | "completed" => Some(PortCallStatus::Departed),
            "cancelled" | "canceled" => Some(PortCallStatus::Cancelled),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PortCallStatus::Planned => "Planned",
            PortCallStatus::Arrived => "Arrived",
            PortCallStatus::Berthed => "Berthed",
            PortCallStatus::Departed => "Departed",
            PortCallStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for PortCallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scheduled vessel visit to a port
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortCall {
    pub id: Option<String>,
    pub vessel_id: String,
    pub port_id: String,
    pub customer_id: String,
    pub eta: Option<NaiveDate>,
    pub etd: Option<NaiveDate>,
    pub status: PortCallStatus,
    pub service_ids: Vec<String>,
}

impl PortCall {
    /// Days alongside between arrival and departure, when both are known
    pub fn length_of_stay(&self) -> Option<i64> {
        match (self.eta, self.etd) {
            (Some(eta), Some(etd)) => Some((etd - eta).num_days()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_label() {
        assert_eq!(PortCallStatus::from_label("Berthed"), Some(PortCallStatus::Berthed));
        assert_eq!(PortCallStatus::from_label("canceled"), Some(PortCallStatus::Cancelled));
        assert_eq!(PortCallStatus::from_label(""), Some(PortCallStatus::Planned));
        assert_eq!(PortCallStatus::from_label("adrift"), None);
    }

    #[test]
    fn test_length_of_stay() {
        let call = PortCall {
            eta: NaiveDate::from_ymd_opt(2025, 3, 1),
            etd: NaiveDate::from_ymd_opt(2025, 3, 4),
            ..Default::default()
        };
        assert_eq!(call.length_of_stay(), Some(3));
        assert_eq!(PortCall::default().length_of_stay(), None);
    }
}
