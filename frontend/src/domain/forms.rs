//! Editable form state behind the create/edit modals.
//!
//! Company editors (customers and vendors) nest three levels deep: the
//! company, its people in charge, and each person's contact numbers and
//! email addresses. Fields are kept as raw strings while the user types and
//! are only turned into typed records on submit.

use chrono::NaiveDate;

use crate::domain::birthday::Birthday;
use crate::domain::models::{Customer, KycStatus, Pic, Vendor, Vessel};
use crate::domain::sscec::{compute_expiry, compute_issued_from_expiry, CertificateWindow};
use crate::domain::validation::{normalize_imo, Validate, ValidationError, ValidationErrors};
use crate::services::date_utils::{format_display, format_iso, parse_date, to_display, DisplayStyle};

/// One person in charge being edited
#[derive(Debug, Clone, PartialEq)]
pub struct PicForm {
    pub id: Option<String>,
    pub name: String,
    pub position: String,
    /// ISO date from the date input, or empty
    pub birthday: String,
    pub contact_numbers: Vec<String>,
    pub emails: Vec<String>,
}

impl Default for PicForm {
    /// A fresh row starts with one empty number and one empty email input
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            position: String::new(),
            birthday: String::new(),
            contact_numbers: vec![String::new()],
            emails: vec![String::new()],
        }
    }
}

impl PicForm {
    pub fn from_pic(pic: &Pic) -> Self {
        let mut form = Self {
            id: pic.id.clone(),
            name: pic.name.clone(),
            position: pic.position.clone(),
            birthday: pic.birthday.map(|birthday| birthday.to_iso()).unwrap_or_default(),
            contact_numbers: pic.contact_numbers.clone(),
            emails: pic.emails.clone(),
        };
        if form.contact_numbers.is_empty() {
            form.contact_numbers.push(String::new());
        }
        if form.emails.is_empty() {
            form.emails.push(String::new());
        }
        form
    }

    pub fn add_contact_number(&mut self) {
        self.contact_numbers.push(String::new());
    }

    pub fn remove_contact_number(&mut self, index: usize) {
        if index < self.contact_numbers.len() {
            self.contact_numbers.remove(index);
        }
    }

    pub fn set_contact_number(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.contact_numbers.get_mut(index) {
            *slot = value.into();
        }
    }

    pub fn add_email(&mut self) {
        self.emails.push(String::new());
    }

    pub fn remove_email(&mut self, index: usize) {
        if index < self.emails.len() {
            self.emails.remove(index);
        }
    }

    pub fn set_email(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.emails.get_mut(index) {
            *slot = value.into();
        }
    }

    /// Trimmed record with blank rows dropped
    fn to_pic(&self, index: usize, errors: &mut ValidationErrors) -> Pic {
        let birthday = if self.birthday.trim().is_empty() {
            None
        } else {
            let parsed = Birthday::parse(&self.birthday);
            if parsed.is_none() {
                errors.push(ValidationError::InvalidDate {
                    field: format!("pics[{}].birthday", index),
                });
            }
            parsed
        };

        Pic {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            position: self.position.trim().to_string(),
            birthday,
            contact_numbers: non_blank(&self.contact_numbers),
            emails: non_blank(&self.emails),
        }
    }
}

fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Customer or vendor editor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyForm {
    pub id: Option<String>,
    pub company_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    /// Customers only
    pub tax_number: String,
    /// Vendors only
    pub service_category: String,
    /// Vendors only
    pub kyc_status: KycStatus,
    pub pics: Vec<PicForm>,
}

impl CompanyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            company_name: customer.company_name.clone(),
            address: customer.address.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            tax_number: customer.tax_number.clone(),
            pics: customer.pics.iter().map(PicForm::from_pic).collect(),
            ..Default::default()
        }
    }

    pub fn from_vendor(vendor: &Vendor) -> Self {
        Self {
            id: vendor.id.clone(),
            company_name: vendor.company_name.clone(),
            address: vendor.address.clone(),
            email: vendor.email.clone(),
            phone: vendor.phone.clone(),
            service_category: vendor.service_category.clone(),
            kyc_status: vendor.kyc_status,
            pics: vendor.pics.iter().map(PicForm::from_pic).collect(),
            ..Default::default()
        }
    }

    /// Append an empty PIC row and return its index
    pub fn add_pic(&mut self) -> usize {
        self.pics.push(PicForm::default());
        self.pics.len() - 1
    }

    pub fn remove_pic(&mut self, index: usize) {
        if index < self.pics.len() {
            self.pics.remove(index);
        }
    }

    pub fn pic_mut(&mut self, index: usize) -> Option<&mut PicForm> {
        self.pics.get_mut(index)
    }

    pub fn add_contact_number(&mut self, pic: usize) {
        if let Some(pic) = self.pics.get_mut(pic) {
            pic.add_contact_number();
        }
    }

    pub fn remove_contact_number(&mut self, pic: usize, index: usize) {
        if let Some(pic) = self.pics.get_mut(pic) {
            pic.remove_contact_number(index);
        }
    }

    pub fn set_contact_number(&mut self, pic: usize, index: usize, value: impl Into<String>) {
        if let Some(pic) = self.pics.get_mut(pic) {
            pic.set_contact_number(index, value);
        }
    }

    pub fn add_email(&mut self, pic: usize) {
        if let Some(pic) = self.pics.get_mut(pic) {
            pic.add_email();
        }
    }

    pub fn remove_email(&mut self, pic: usize, index: usize) {
        if let Some(pic) = self.pics.get_mut(pic) {
            pic.remove_email(index);
        }
    }

    pub fn set_email(&mut self, pic: usize, index: usize, value: impl Into<String>) {
        if let Some(pic) = self.pics.get_mut(pic) {
            pic.set_email(index, value);
        }
    }

    fn collect_pics(&self, errors: &mut ValidationErrors) -> Vec<Pic> {
        self.pics
            .iter()
            .enumerate()
            .map(|(index, pic)| pic.to_pic(index, errors))
            .collect()
    }

    pub fn to_customer(&self) -> Result<Customer, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let customer = Customer {
            id: self.id.clone(),
            company_name: self.company_name.trim().to_string(),
            address: self.address.trim().to_string(),
            tax_number: self.tax_number.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            pics: self.collect_pics(&mut errors),
        };
        merge(errors, customer.validate())?;
        Ok(customer)
    }

    pub fn to_vendor(&self) -> Result<Vendor, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let vendor = Vendor {
            id: self.id.clone(),
            company_name: self.company_name.trim().to_string(),
            service_category: self.service_category.trim().to_string(),
            address: self.address.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            kyc_status: self.kyc_status,
            pics: self.collect_pics(&mut errors),
        };
        merge(errors, vendor.validate())?;
        Ok(vendor)
    }
}

fn merge(mut errors: ValidationErrors, result: Result<(), ValidationErrors>) -> Result<(), ValidationErrors> {
    if let Err(more) = result {
        for error in more.errors() {
            errors.push(error.clone());
        }
    }
    errors.into_result()
}

/// Blank is absent; anything else must read as a date
fn form_date(value: &str, field: &str, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    if value.trim().is_empty() {
        return None;
    }
    let parsed = parse_date(value);
    if parsed.is_none() {
        errors.push(ValidationError::InvalidDate { field: field.to_string() });
    }
    parsed
}

/// Vessel editor with the two linked certificate inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VesselForm {
    pub id: Option<String>,
    pub name: String,
    pub imo: String,
    pub flag: String,
    pub vessel_type: String,
    pub gross_tonnage: String,
    pub owner: String,
    /// ISO issue date, typed or derived from the expiry
    pub sscec_issued: String,
    /// Expiry in display form, typed or derived from the issue date
    pub sscec_expiry: String,
    pub display_style: DisplayStyle,
}

impl VesselForm {
    pub fn new(display_style: DisplayStyle) -> Self {
        Self {
            display_style,
            ..Default::default()
        }
    }

    pub fn from_vessel(vessel: &Vessel, display_style: DisplayStyle) -> Self {
        let mut form = Self {
            id: vessel.id.clone(),
            name: vessel.name.clone(),
            imo: vessel.imo.clone(),
            flag: vessel.flag.clone(),
            vessel_type: vessel.vessel_type.clone(),
            gross_tonnage: vessel.gross_tonnage.map(|g| g.to_string()).unwrap_or_default(),
            owner: vessel.owner.clone(),
            display_style,
            ..Default::default()
        };
        if let Some(window) = vessel.sscec {
            form.sscec_issued = format_iso(window.issued);
            form.sscec_expiry = format_display(window.expiry, display_style);
        }
        form
    }

    /// Typing an issue date fills in the expiry
    pub fn set_sscec_issued(&mut self, value: &str) {
        self.sscec_issued = value.to_string();
        let expiry = compute_expiry(value);
        self.sscec_expiry = if expiry.is_empty() {
            expiry
        } else {
            to_display(&expiry, self.display_style)
        };
    }

    /// Typing an expiry date fills in the issue date
    pub fn set_sscec_expiry(&mut self, value: &str) {
        self.sscec_expiry = value.to_string();
        self.sscec_issued = compute_issued_from_expiry(value);
    }

    pub fn to_vessel(&self) -> Result<Vessel, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let gross_tonnage = match self.gross_tonnage.trim() {
            "" => None,
            raw => match raw.replace(',', "").parse::<f64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    errors.push(ValidationError::InvalidNumber {
                        field: "gross_tonnage".to_string(),
                    });
                    None
                }
            },
        };

        let issued = form_date(&self.sscec_issued, "sscec_issued", &mut errors);
        let expiry = form_date(&self.sscec_expiry, "sscec_expiry", &mut errors);

        let vessel = Vessel {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            imo: normalize_imo(&self.imo),
            flag: self.flag.trim().to_string(),
            vessel_type: self.vessel_type.trim().to_string(),
            gross_tonnage,
            owner: self.owner.trim().to_string(),
            sscec: CertificateWindow::from_stored(issued, expiry),
        };
        merge(errors, vessel.validate())?;
        Ok(vessel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_nested_pic_editing() {
        let mut form = CompanyForm::new();
        form.company_name = " PT Samudera Lines ".to_string();

        let first = form.add_pic();
        form.pic_mut(first).unwrap().name = "Budi".to_string();
        form.set_contact_number(first, 0, "0811-222-333");
        form.add_contact_number(first);
        form.set_contact_number(first, 1, "  ");
        form.add_contact_number(first);
        form.set_contact_number(first, 2, "021-555");
        form.set_email(first, 0, "budi@samudera.co.id");

        let second = form.add_pic();
        form.pic_mut(second).unwrap().name = "Sari".to_string();
        form.remove_email(second, 0);

        let customer = form.to_customer().unwrap();
        assert_eq!(customer.company_name, "PT Samudera Lines");
        assert_eq!(customer.pics.len(), 2);
        assert_eq!(customer.pics[0].contact_numbers, vec!["0811-222-333", "021-555"]);
        assert_eq!(customer.pics[0].emails, vec!["budi@samudera.co.id"]);
        assert!(customer.pics[1].emails.is_empty());
        assert!(customer.pics[1].contact_numbers.is_empty());
    }

    #[test]
    fn test_out_of_range_indices_are_ignored() {
        let mut form = CompanyForm::new();
        form.add_contact_number(3);
        form.set_email(0, 0, "x@y.z");
        form.remove_pic(5);
        let pic = form.add_pic();
        form.remove_contact_number(pic, 9);
        form.set_contact_number(pic, 4, "123");
        assert_eq!(form.pics.len(), 1);
        assert_eq!(form.pics[0].contact_numbers, vec![String::new()]);
    }

    #[test]
    fn test_remove_pic() {
        let mut form = CompanyForm::new();
        form.add_pic();
        form.add_pic();
        form.pics[1].name = "Keep".to_string();
        form.remove_pic(0);
        assert_eq!(form.pics.len(), 1);
        assert_eq!(form.pics[0].name, "Keep");
    }

    #[test]
    fn test_invalid_pic_birthday_blocks_submit() {
        let mut form = CompanyForm::new();
        form.company_name = "PT Samudera Lines".to_string();
        let pic = form.add_pic();
        form.pics[pic].name = "Budi".to_string();
        form.pics[pic].birthday = "31.02.1990".to_string();

        let errors = form.to_customer().unwrap_err();
        assert_eq!(errors.for_field("pics[0].birthday").len(), 1);
    }

    #[test]
    fn test_pic_leap_day_birthday_is_accepted() {
        let mut form = CompanyForm::new();
        form.company_name = "PT Samudera Lines".to_string();
        let pic = form.add_pic();
        form.pics[pic].name = "Rina".to_string();
        form.pics[pic].birthday = "29.02.1990".to_string();

        let customer = form.to_customer().unwrap();
        assert_eq!(customer.pics[0].birthday, Birthday::new(1990, 2, 29));
        assert_eq!(CompanyForm::from_customer(&customer).pics[0].birthday, "1990-02-29");
    }

    #[test]
    fn test_vendor_round_trip_through_form() {
        let vendor = Vendor {
            id: Some("v-7".to_string()),
            company_name: "CV Bunker Jaya".to_string(),
            service_category: "Bunkering".to_string(),
            kyc_status: KycStatus::Approved,
            pics: vec![Pic {
                name: "Andi".to_string(),
                birthday: Birthday::new(1985, 3, 12),
                contact_numbers: vec!["0812".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let form = CompanyForm::from_vendor(&vendor);
        assert_eq!(form.pics[0].birthday, "1985-03-12");
        assert_eq!(form.pics[0].emails, vec![String::new()]);
        assert_eq!(form.to_vendor().unwrap(), vendor);
    }

    #[test]
    fn test_vessel_form_links_certificate_dates() {
        let mut form = VesselForm::new(DisplayStyle::Dotted);
        form.set_sscec_issued("2024-09-15");
        assert_eq!(form.sscec_expiry, "15.03.2025");

        form.set_sscec_expiry("31.03.2025");
        assert_eq!(form.sscec_issued, "2024-09-30");

        form.set_sscec_issued("");
        assert_eq!(form.sscec_expiry, "");
    }

    #[test]
    fn test_vessel_form_to_vessel() {
        let mut form = VesselForm::new(DisplayStyle::Dashed);
        form.name = "MV Horizon".to_string();
        form.imo = "IMO 9321483".to_string();
        form.gross_tonnage = "12,500".to_string();
        form.set_sscec_expiry("15-03-2025");

        let vessel = form.to_vessel().unwrap();
        assert_eq!(vessel.imo, "9321483");
        assert_eq!(vessel.gross_tonnage, Some(12500.0));
        assert_eq!(vessel.sscec_issued(), Some(date(2024, 9, 15)));
        assert_eq!(vessel.sscec_expiry(), Some(date(2025, 3, 15)));

        let reopened = VesselForm::from_vessel(&vessel, DisplayStyle::Dashed);
        assert_eq!(reopened.sscec_expiry, "15-03-2025");
    }

    #[test]
    fn test_typed_month_end_expiry_is_kept() {
        let mut form = VesselForm::new(DisplayStyle::Dotted);
        form.name = "MV Horizon".to_string();
        form.imo = "9321483".to_string();
        form.set_sscec_expiry("31.08.2025");
        assert_eq!(form.sscec_issued, "2025-02-28");

        let vessel = form.to_vessel().unwrap();
        assert_eq!(vessel.sscec_expiry(), Some(date(2025, 8, 31)));

        let reopened = VesselForm::from_vessel(&vessel, DisplayStyle::Dotted);
        assert_eq!(reopened.sscec_issued, "2025-02-28");
        assert_eq!(reopened.sscec_expiry, "31.08.2025");
    }

    #[test]
    fn test_unreadable_expiry_blocks_submit() {
        let mut form = VesselForm::new(DisplayStyle::Dotted);
        form.name = "MV Horizon".to_string();
        form.imo = "9321483".to_string();
        form.set_sscec_expiry("end of August");
        let errors = form.to_vessel().unwrap_err();
        assert_eq!(errors.for_field("sscec_expiry").len(), 1);
    }

    #[test]
    fn test_vessel_form_reports_bad_numbers() {
        let mut form = VesselForm::new(DisplayStyle::Dotted);
        form.name = "MV Horizon".to_string();
        form.imo = "9321483".to_string();
        form.gross_tonnage = "heavy".to_string();
        let errors = form.to_vessel().unwrap_err();
        assert_eq!(errors.for_field("gross_tonnage").len(), 1);
    }
}
