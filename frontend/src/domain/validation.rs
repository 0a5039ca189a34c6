//! Client-side checks run before a record is sent to the API.
//!
//! A form that fails validation never reaches the network layer; the caller
//! shows the collected messages next to the offending fields.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use shared::{CreateUserRequest, SendMessageRequest, UpdateUserRequest};

use crate::domain::models::{Customer, Pic, PortCall, Port, Service, SofStatus, Vendor, Vessel};
use crate::domain::birthday::Birthday;

pub const MAX_NAME_LENGTH: usize = 150;
pub const MAX_SUBJECT_LENGTH: usize = 200;
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },
    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: String, max: usize },
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: String },
    #[error("{field} must be a valid date")]
    InvalidDate { field: String },
    #[error("{field} must be a number")]
    InvalidNumber { field: String },
    #[error("IMO number must be exactly 7 digits")]
    InvalidImo,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("ETD cannot be before ETA")]
    DepartureBeforeArrival,
}

impl ValidationError {
    /// The form field this error belongs to
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidEmail { field }
            | ValidationError::InvalidDate { field }
            | ValidationError::InvalidNumber { field } => field,
            ValidationError::InvalidImo => "imo",
            ValidationError::PasswordTooShort { .. } => "password",
            ValidationError::DepartureBeforeArrival => "etd",
        }
    }
}

/// Every problem found in one form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Messages for one field, for inline display
    pub fn for_field(&self, field: &str) -> Vec<String> {
        self.errors
            .iter()
            .filter(|e| e.field() == field)
            .map(ToString::to_string)
            .collect()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(ValidationError::Required { field: field.to_string() });
        } else if value.chars().count() > MAX_NAME_LENGTH {
            self.push(ValidationError::TooLong {
                field: field.to_string(),
                max: MAX_NAME_LENGTH,
            });
        }
    }

    fn optional_email(&mut self, field: &str, value: &str) {
        if !value.trim().is_empty() && !is_valid_email(value) {
            self.push(ValidationError::InvalidEmail { field: field.to_string() });
        }
    }

    fn optional_birthday(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            if !value.trim().is_empty() && Birthday::parse(value).is_none() {
                self.push(ValidationError::InvalidDate { field: field.to_string() });
            }
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self { errors: vec![error] }
    }
}

/// Records that can be checked before saving
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("valid email regex")
});

/// Loose shape check: something@domain.tld, no spaces
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

/// Strip an optional "IMO" prefix and spaces
pub fn normalize_imo(value: &str) -> String {
    let trimmed = value.trim();
    let without_prefix = trimmed
        .strip_prefix("IMO")
        .or_else(|| trimmed.strip_prefix("imo"))
        .unwrap_or(trimmed);
    without_prefix.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn is_valid_imo(value: &str) -> bool {
    let imo = normalize_imo(value);
    imo.len() == 7 && imo.chars().all(|c| c.is_ascii_digit())
}

fn validate_pics(errors: &mut ValidationErrors, pics: &[Pic]) {
    for (index, pic) in pics.iter().enumerate() {
        errors.require(&format!("pics[{}].name", index), &pic.name);
        for (i, email) in pic.emails.iter().enumerate() {
            errors.optional_email(&format!("pics[{}].emails[{}]", index, i), email);
        }
    }
}

impl Validate for Pic {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_pics(&mut errors, std::slice::from_ref(self));
        errors.into_result()
    }
}

impl Validate for Customer {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("company_name", &self.company_name);
        errors.optional_email("email", &self.email);
        validate_pics(&mut errors, &self.pics);
        errors.into_result()
    }
}

impl Validate for Vendor {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("company_name", &self.company_name);
        errors.optional_email("email", &self.email);
        validate_pics(&mut errors, &self.pics);
        errors.into_result()
    }
}

impl Validate for Vessel {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        if self.imo.trim().is_empty() {
            errors.push(ValidationError::Required { field: "imo".to_string() });
        } else if !is_valid_imo(&self.imo) {
            errors.push(ValidationError::InvalidImo);
        }
        errors.into_result()
    }
}

impl Validate for Service {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.into_result()
    }
}

impl Validate for Port {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("code", &self.code);
        errors.into_result()
    }
}

impl Validate for SofStatus {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.into_result()
    }
}

impl Validate for PortCall {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("vessel_id", &self.vessel_id);
        errors.require("port_id", &self.port_id);
        errors.require("customer_id", &self.customer_id);
        if self.eta.is_none() {
            errors.push(ValidationError::Required { field: "eta".to_string() });
        }
        if let (Some(eta), Some(etd)) = (self.eta, self.etd) {
            if etd < eta {
                errors.push(ValidationError::DepartureBeforeArrival);
            }
        }
        errors.into_result()
    }
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("username", &self.username);
        errors.require("full_name", &self.full_name);
        errors.require("role", &self.role);
        if self.email.trim().is_empty() {
            errors.push(ValidationError::Required { field: "email".to_string() });
        } else {
            errors.optional_email("email", &self.email);
        }
        if self.password.is_empty() {
            errors.push(ValidationError::Required { field: "password".to_string() });
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LENGTH });
        }
        errors.optional_birthday("birthday", self.birthday.as_deref());
        errors.into_result()
    }
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(full_name) = &self.full_name {
            errors.require("full_name", full_name);
        }
        if let Some(email) = &self.email {
            if email.trim().is_empty() {
                errors.push(ValidationError::Required { field: "email".to_string() });
            } else {
                errors.optional_email("email", email);
            }
        }
        if let Some(password) = &self.password {
            if password.chars().count() < MIN_PASSWORD_LENGTH {
                errors.push(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LENGTH });
            }
        }
        errors.optional_birthday("birthday", self.birthday.as_deref());
        errors.into_result()
    }
}

impl Validate for SendMessageRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("recipient", &self.recipient);
        if self.subject.trim().is_empty() {
            errors.push(ValidationError::Required { field: "subject".to_string() });
        } else if self.subject.chars().count() > MAX_SUBJECT_LENGTH {
            errors.push(ValidationError::TooLong {
                field: "subject".to_string(),
                max: MAX_SUBJECT_LENGTH,
            });
        }
        if self.body.trim().is_empty() {
            errors.push(ValidationError::Required { field: "body".to_string() });
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_customer_requires_company_name() {
        let customer = Customer::default();
        let errors = customer.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.for_field("company_name"), vec!["company_name is required".to_string()]);
    }

    #[test]
    fn test_customer_pic_rows_are_checked() {
        let customer = Customer {
            company_name: "PT Samudera Lines".to_string(),
            email: "ops@samudera".to_string(),
            pics: vec![Pic {
                name: "  ".to_string(),
                emails: vec!["budi@samudera.co.id".to_string(), "not an email".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let errors = customer.validate().unwrap_err();
        let fields: Vec<&str> = errors.errors().iter().map(ValidationError::field).collect();
        assert_eq!(fields, vec!["email", "pics[0].name", "pics[0].emails[1]"]);
    }

    #[test]
    fn test_vessel_imo() {
        let mut vessel = Vessel {
            name: "MV Horizon".to_string(),
            imo: "IMO 9321483".to_string(),
            ..Default::default()
        };
        assert!(vessel.validate().is_ok());

        vessel.imo = "93214".to_string();
        assert_eq!(vessel.validate().unwrap_err().errors(), &[ValidationError::InvalidImo]);

        vessel.imo = String::new();
        assert_eq!(vessel.validate().unwrap_err().for_field("imo"), vec!["imo is required".to_string()]);
    }

    #[test]
    fn test_port_call_dates() {
        let call = PortCall {
            vessel_id: "v1".to_string(),
            port_id: "p1".to_string(),
            customer_id: "c1".to_string(),
            eta: NaiveDate::from_ymd_opt(2025, 3, 4),
            etd: NaiveDate::from_ymd_opt(2025, 3, 1),
            ..Default::default()
        };
        assert_eq!(
            call.validate().unwrap_err().errors(),
            &[ValidationError::DepartureBeforeArrival]
        );
    }

    #[test]
    fn test_create_user_request() {
        let request = CreateUserRequest {
            username: "finance".to_string(),
            full_name: "Finance Desk".to_string(),
            email: "finance@agency.co.id".to_string(),
            role: "staff".to_string(),
            password: "abc".to_string(),
            birthday: Some("31.02.1990".to_string()),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.errors(),
            &[
                ValidationError::PasswordTooShort { min: MIN_PASSWORD_LENGTH },
                ValidationError::InvalidDate { field: "birthday".to_string() },
            ]
        );
    }

    #[test]
    fn test_user_birthday_may_be_leap_day() {
        let request = UpdateUserRequest {
            birthday: Some("29.02.1990".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_user_request_only_checks_present_fields() {
        assert!(UpdateUserRequest::default().validate().is_ok());
        let request = UpdateUserRequest {
            email: Some("".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_send_message_request() {
        let request = SendMessageRequest {
            recipient: "ops".to_string(),
            subject: "ETA update".to_string(),
            body: String::new(),
        };
        assert_eq!(request.validate().unwrap_err().for_field("body").len(), 1);
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ops@agency.co.id"));
        assert!(!is_valid_email("ops@agency"));
        assert!(!is_valid_email("ops agency@x.com"));
        assert!(!is_valid_email("@agency.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("ops@.agency.com"));
        assert!(!is_valid_email("ops@agency.com."));
        assert!(!is_valid_email("ops@agency..com"));
        assert!(is_valid_email("  finance.desk@samudera.co.id "));
    }

    #[test]
    fn test_display_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::Required { field: "name".to_string() });
        errors.push(ValidationError::InvalidImo);
        assert_eq!(errors.to_string(), "name is required; IMO number must be exactly 7 digits");
    }
}
