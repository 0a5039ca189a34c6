use serde::{Deserialize, Serialize};
use std::fmt;

use super::pic::Pic;

/// Know-your-customer approval state of a vendor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KycStatus {
    Approved,
    #[default]
    Pending,
}

impl KycStatus {
    /// Parse the backend's label; anything unrecognised stays pending
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "approved" | "approve" | "verified" => KycStatus::Approved,
            _ => KycStatus::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KycStatus::Approved => "Approved",
            KycStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: Option<String>,
    pub company_name: String,
    pub service_category: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub kyc_status: KycStatus,
    pub pics: Vec<Pic>,
}
