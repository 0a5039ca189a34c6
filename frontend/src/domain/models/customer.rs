use serde::{Deserialize, Serialize};

use super::pic::Pic;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<String>,
    pub company_name: String,
    pub address: String,
    pub tax_number: String,
    pub email: String,
    pub phone: String,
    pub pics: Vec<Pic>,
}
