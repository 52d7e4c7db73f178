use super::{decode, lenient, lenient_list, ListRecord, Record};
use crate::zoom_api::collection::PagedCollection;
use crate::zoom_api::types::ZoomError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Zoom user type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum UserType {
    Basic,
    Licensed,
    OnPrem,
    None,
}

impl UserType {
    pub fn code(self) -> i64 {
        match self {
            UserType::Basic => 1,
            UserType::Licensed => 2,
            UserType::OnPrem => 3,
            UserType::None => 99,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UserType::Basic => "Basic",
            UserType::Licensed => "Licensed",
            UserType::OnPrem => "On-Prem",
            UserType::None => "None",
        }
    }

    pub fn is_licensed(self) -> bool {
        self == UserType::Licensed
    }

    pub fn is_basic(self) -> bool {
        self == UserType::Basic
    }

    pub fn is_on_prem(self) -> bool {
        self == UserType::OnPrem
    }
}

impl TryFrom<i64> for UserType {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(UserType::Basic),
            2 => Ok(UserType::Licensed),
            3 => Ok(UserType::OnPrem),
            99 => Ok(UserType::None),
            other => Err(format!("unknown user type {}", other)),
        }
    }
}

impl From<UserType> for i64 {
    fn from(user_type: UserType) -> Self {
        user_type.code()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAttribute {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    #[serde(default)]
    pub license_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_option: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
}

/// A Zoom user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_type: Option<UserType>,
    /// `active`, `inactive` or `pending`
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pmi: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// 1 when the user's email has been verified
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub verified: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub user_created_at: Option<DateTime<Utc>>,
    /// Older endpoints report the creation time under this name
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub last_login_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub last_client_version: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub phone_country: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub vanity_url: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub personal_meeting_url: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pic_url: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub host_key: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub jid: Option<String>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub group_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub division_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub im_group_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cmr_user_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub dept: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Whether the user's PMI is used for instant meetings
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub use_pmi: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub plan_united_type: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub employee_unique_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub custom_attributes: Vec<CustomAttribute>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub license_info_list: Vec<LicenseInfo>,
    #[serde(skip)]
    raw: Value,
}

impl User {
    /// First and last name joined by a space, or the email when both are blank
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.user_type.map_or("Unknown", UserType::name)
    }

    /// Account creation time, from `user_created_at` or else `created_at`
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.user_created_at.or(self.created_at)
    }

    pub fn is_verified(&self) -> bool {
        self.verified == Some(1)
    }

    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }

    pub fn is_licensed(&self) -> bool {
        self.user_type.is_some_and(UserType::is_licensed)
    }

    /// Look up a custom attribute by its key or its display name
    pub fn custom_attribute(&self, key_or_name: &str) -> Option<&CustomAttribute> {
        self.custom_attributes
            .iter()
            .find(|attribute| attribute.key == key_or_name || attribute.name == key_or_name)
    }

    pub fn custom_attribute_value(&self, key_or_name: &str) -> Option<&str> {
        self.custom_attribute(key_or_name)
            .and_then(|attribute| attribute.value.as_deref())
    }

    pub fn has_license_type(&self, license_type: &str) -> bool {
        self.license_info_list
            .iter()
            .any(|license| license.license_type == license_type)
    }

    pub fn license_types(&self) -> Vec<&str> {
        self.license_info_list
            .iter()
            .map(|license| license.license_type.as_str())
            .collect()
    }
}

impl Record for User {
    fn from_json(raw: Value) -> Result<Self, ZoomError> {
        let mut user: User = decode(&raw, "user")?;
        user.raw = raw;
        Ok(user)
    }

    fn raw(&self) -> &Value {
        &self.raw
    }
}

impl ListRecord for User {
    const LIST_KEY: &'static str = "users";
}

impl PagedCollection<User> {
    pub fn active(&self) -> Self {
        self.filter(User::is_active)
    }

    pub fn licensed(&self) -> Self {
        self.filter(User::is_licensed)
    }

    pub fn by_type(&self, user_type: UserType) -> Self {
        self.filter(|user| user.user_type == Some(user_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn user(value: Value) -> User {
        User::from_json(value).unwrap()
    }

    #[test]
    fn test_from_json() {
        let user = user(json!({
            "id": "z8yAAAAA8bbbQ",
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "type": 2,
            "status": "active",
            "pmi": 3542471135_i64,
            "verified": 1,
            "group_ids": ["g1", "g2"],
            "user_created_at": "2019-06-01T07:58:03Z",
            "feature": {"meeting_capacity": 300}
        }));

        assert_eq!(user.full_name(), "Ada Lovelace");
        assert_eq!(user.type_name(), "Licensed");
        assert!(user.is_licensed());
        assert!(user.is_active());
        assert!(user.is_verified());
        assert_eq!(user.pmi, Some(3542471135));
        assert_eq!(user.group_ids, vec!["g1", "g2"]);
        assert_eq!(user.raw()["feature"]["meeting_capacity"], json!(300));
    }

    #[test]
    fn test_full_name_falls_back_to_email() {
        let user = user(json!({"id": "u1", "email": "nobody@example.com", "first_name": ""}));
        assert_eq!(user.full_name(), "nobody@example.com");

        let user = User::from_json(json!({"id": "u2", "email": "x@example.com", "last_name": "Hopper"})).unwrap();
        assert_eq!(user.full_name(), "Hopper");
    }

    #[test]
    fn test_created_falls_back_to_created_at() {
        let expected = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();

        let user = user(json!({"id": "u1", "email": "a@b.c", "created_at": "2020-01-02T03:04:05Z"}));
        assert_eq!(user.created(), Some(expected));

        let user = User::from_json(json!({
            "id": "u1",
            "email": "a@b.c",
            "created_at": "2010-01-01T00:00:00Z",
            "user_created_at": "2020-01-02T03:04:05Z"
        }))
        .unwrap();
        assert_eq!(user.created(), Some(expected));
    }

    #[test]
    fn test_unknown_type_and_status() {
        let user = user(json!({"id": "u1", "email": "a@b.c", "type": 7, "status": "pending"}));
        assert_eq!(user.user_type, None);
        assert_eq!(user.type_name(), "Unknown");
        assert!(!user.is_licensed());
        assert!(!user.is_active());
        assert!(!user.is_verified());
    }

    #[test]
    fn test_custom_attributes_and_licenses() {
        let user = user(json!({
            "id": "u1",
            "email": "a@b.c",
            "custom_attributes": [
                {"key": "cbf_1", "name": "Cost center", "value": "R&D"},
                "not an attribute"
            ],
            "license_info_list": [
                {"license_type": "LARGE_MEETING", "license_option": 500},
                {"license_type": "WEBINAR"}
            ]
        }));

        assert_eq!(user.custom_attributes.len(), 1);
        assert_eq!(user.custom_attribute_value("cbf_1"), Some("R&D"));
        assert_eq!(user.custom_attribute_value("Cost center"), Some("R&D"));
        assert_eq!(user.custom_attribute("missing"), None);

        assert!(user.has_license_type("WEBINAR"));
        assert!(!user.has_license_type("ZOOM_ROOMS"));
        assert_eq!(user.license_types(), vec!["LARGE_MEETING", "WEBINAR"]);
    }

    #[test]
    fn test_collection_filters() {
        let body = json!({
            "page_count": 1,
            "total_records": 3,
            "users": [
                {"id": "a", "email": "a@x.io", "type": 2, "status": "active"},
                {"id": "b", "email": "b@x.io", "type": 1, "status": "active"},
                {"id": "c", "email": "c@x.io", "type": 2, "status": "inactive"}
            ]
        });

        let users = PagedCollection::<User>::from_body(&body, None);
        let ids = |c: &PagedCollection<User>| c.map(|u| u.id.clone());

        assert_eq!(ids(&users.active()), vec!["a", "b"]);
        assert_eq!(ids(&users.licensed()), vec!["a", "c"]);
        assert_eq!(ids(&users.by_type(UserType::Basic)), vec!["b"]);
        assert_eq!(ids(&users.active().licensed()), vec!["a"]);
    }

    #[test]
    fn test_to_json_reproduces_modeled_fields() {
        let raw = json!({
            "id": "u-1",
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "display_name": "Ada L",
            "type": 2,
            "status": "active",
            "pmi": 3542471135_i64,
            "timezone": "Europe/London",
            "verified": 1,
            "user_created_at": "2019-06-01T07:58:03Z",
            "created_at": "2019-06-01T07:58:03Z",
            "last_login_time": "2024-03-01T08:00:00Z",
            "last_client_version": "5.17.0",
            "language": "en-US",
            "phone_number": "+44 20 7946 0000",
            "phone_country": "GB",
            "vanity_url": "https://example.zoom.us/my/ada",
            "personal_meeting_url": "https://zoom.us/j/3542471135",
            "pic_url": "https://example.com/ada.png",
            "host_key": "123456",
            "jid": "ada@xmpp.zoom.us",
            "group_ids": ["g1"],
            "division_ids": ["d1"],
            "im_group_ids": ["im1"],
            "account_id": "acc-1",
            "cmr_user_id": 7,
            "dept": "Engineering",
            "job_title": "Analyst",
            "location": "London",
            "role_id": "2",
            "company": "Analytical Engines",
            "use_pmi": false,
            "cluster": "us05",
            "plan_united_type": "1",
            "employee_unique_id": "E-1",
            "custom_attributes": [{"key": "cbf_1", "name": "Badge", "value": "42"}],
            "license_info_list": [{"license_type": "ZOOM_WEBINAR", "license_option": 100, "subscription_id": "sub-1"}],
            "feature": {"meeting_capacity": 300}
        });

        let user = user(raw.clone());
        let json = user.to_json();
        let modeled = json.as_object().unwrap();
        for (key, value) in modeled {
            assert_eq!(&raw[key], value, "field {}", key);
        }
        assert_eq!(modeled.len(), raw.as_object().unwrap().len() - 1);
        assert!(json.get("feature").is_none());
        assert_eq!(user.raw()["feature"]["meeting_capacity"], json!(300));
    }
}
