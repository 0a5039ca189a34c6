use serde::{Deserialize, Serialize};
use std::fmt;

/// Deserializers that accept the loosely typed values the back office emits
/// (numeric or string ids, nulls where strings are expected).
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn value_to_string(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Optional identifier, string or number on the wire
    pub fn id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value_to_string(value).filter(|s| !s.trim().is_empty()))
    }

    /// Text field where `null` or a number may show up instead of a string
    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value_to_string(value).unwrap_or_default())
    }

    /// List of strings where single values or nulls are tolerated
    pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(items) => items.into_iter().filter_map(value_to_string).collect(),
            other => value_to_string(other).into_iter().collect(),
        })
    }

    /// Boolean that may arrive as `0`/`1` or `"true"`/`"false"`
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_i64().map(|n| n != 0).unwrap_or(false),
            Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
            _ => false,
        })
    }
}

/// Person in charge attached to a customer or vendor company
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning customer, only present on `/customerpic` rows
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: String,
    /// ISO 8601 date (YYYY-MM-DD), free text on older records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub contact_numbers: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub emails: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "name", deserialize_with = "lenient::string")]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, alias = "npwp", deserialize_with = "lenient::string")]
    pub tax_number: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(default)]
    pub pics: Vec<PicDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "name", deserialize_with = "lenient::string")]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub service_category: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: String,
    /// "Approved" or "Pending"
    #[serde(default, alias = "kyc", deserialize_with = "lenient::string")]
    pub kyc_status: String,
    #[serde(default)]
    pub pics: Vec<PicDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "vesselName", deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub imo: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub flag: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub vessel_type: String,
    #[serde(default, alias = "grt", skip_serializing_if = "Option::is_none")]
    pub gross_tonnage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub owner: String,
    /// ISO 8601 issue date of the sanitation certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sscec_issued: Option<String>,
    /// Display date (DD.MM.YYYY) some screens stored instead of the issue date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sscec_expiry: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, alias = "portCode", deserialize_with = "lenient::string")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub country: String,
}

/// Formality status used on statements of facts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SofDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortCallDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub vessel_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub port_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub customer_id: Option<String>,
    /// ISO 8601 date or RFC 3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etd: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, alias = "services", deserialize_with = "lenient::string_list")]
    pub service_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub username: String,
    #[serde(default, alias = "name", deserialize_with = "lenient::string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(default, alias = "isActive", deserialize_with = "lenient::flag")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDto {
    #[serde(default, alias = "menu", deserialize_with = "lenient::string")]
    pub module: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub can_view: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub can_create: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub can_edit: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub can_delete: bool,
}

/// Internal message between back-office users
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sender: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub recipient: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subject: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub body: String,
    /// RFC 3339 timestamp
    #[serde(default, alias = "createdAt", deserialize_with = "lenient::string")]
    pub sent_at: String,
    #[serde(default, alias = "isRead", deserialize_with = "lenient::flag")]
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>, // ISO 8601 date format (YYYY-MM-DD)
}

/// Partial update; absent fields are left untouched by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleUserStatusRequest {
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Error payload returned by the API on non-2xx responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// The human readable part of the payload, if the backend sent one
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text().unwrap_or("Unknown error"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_accepts_numeric_id_and_nulls() {
        let json = r#"{
            "id": 42,
            "companyName": "PT Samudera",
            "address": null,
            "pics": [
                { "name": "Budi", "contactNumbers": ["0811", null], "emails": "budi@example.com" }
            ]
        }"#;

        let customer: CustomerDto = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id.as_deref(), Some("42"));
        assert_eq!(customer.company_name, "PT Samudera");
        assert_eq!(customer.address, "");
        assert_eq!(customer.pics[0].contact_numbers, vec!["0811".to_string()]);
        assert_eq!(customer.pics[0].emails, vec!["budi@example.com".to_string()]);
    }

    #[test]
    fn test_mongo_style_id_alias() {
        let json = r#"{ "_id": "65af", "vesselName": "MV Horizon", "imo": 9321483 }"#;
        let vessel: VesselDto = serde_json::from_str(json).unwrap();
        assert_eq!(vessel.id.as_deref(), Some("65af"));
        assert_eq!(vessel.name, "MV Horizon");
        assert_eq!(vessel.imo, "9321483");
    }

    #[test]
    fn test_user_flag_variants() {
        let user: UserDto = serde_json::from_str(r#"{ "username": "ops", "isActive": 1 }"#).unwrap();
        assert!(user.active);

        let user: UserDto = serde_json::from_str(r#"{ "username": "ops", "active": "false" }"#).unwrap();
        assert!(!user.active);
    }

    #[test]
    fn test_missing_id_is_not_serialized() {
        let port = PortDto {
            name: "Tanjung Priok".to_string(),
            code: "IDTPP".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&port).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["code"], "IDTPP");
    }

    #[test]
    fn test_api_error_body_text() {
        let body: ApiErrorBody = serde_json::from_str(r#"{ "error": "IMO already exists" }"#).unwrap();
        assert_eq!(body.text(), Some("IMO already exists"));
        assert_eq!(body.to_string(), "IMO already exists");

        let empty = ApiErrorBody::default();
        assert_eq!(empty.text(), None);
        assert_eq!(empty.to_string(), "Unknown error");
    }
}
