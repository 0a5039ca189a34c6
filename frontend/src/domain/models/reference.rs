//! Master data that other records point at: agency services, ports and
//! formality (statement of facts) statuses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: Option<String>,
    pub name: String,
    /// UN/LOCODE style code, e.g. IDTPP
    pub code: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SofStatus {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
}
