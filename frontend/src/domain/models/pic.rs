use serde::{Deserialize, Serialize};

use crate::domain::birthday::Birthday;

/// Person in charge at a customer or vendor company
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pic {
    pub id: Option<String>,
    pub name: String,
    pub position: String,
    pub birthday: Option<Birthday>,
    pub contact_numbers: Vec<String>,
    pub emails: Vec<String>,
}

impl Pic {
    /// First contact number, used in list columns
    pub fn primary_number(&self) -> Option<&str> {
        self.contact_numbers.first().map(String::as_str)
    }

    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }
}

/// A PIC row from `/customerpic`, which carries its owning customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerPic {
    pub customer_id: Option<String>,
    pub pic: Pic,
}
