use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which auth endpoint a credential submission goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn endpoint(self) -> &'static str {
        match self {
            AuthMode::Login => "/auth/login/",
            AuthMode::Register => "/auth/register/",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Register",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

/// Body of a login or register request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: None,
        }
    }

    /// Attach an email, treating a blank one as absent.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.email = if email.trim().is_empty() { None } else { Some(email) };
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Auth endpoint response. The token is optional here so that a 2xx reply
/// without one can be told apart from a decode failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

/// One row of the recent-datasets list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: i64,
    pub filename: String,
    pub uploaded_at: String,
    pub total_records: u64,
    #[serde(default)]
    pub avg_flowrate: Option<f64>,
    #[serde(default)]
    pub avg_pressure: Option<f64>,
    #[serde(default)]
    pub avg_temperature: Option<f64>,
    #[serde(default)]
    pub equipment_count: Option<u64>,
}

/// A single parsed equipment reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub equipment_name: String,
    pub equipment_type: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

/// Full dataset as returned by upload and summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDetail {
    pub id: i64,
    pub filename: String,
    pub uploaded_at: String,
    pub total_records: u64,
    pub avg_flowrate: Option<f64>,
    pub avg_pressure: Option<f64>,
    pub avg_temperature: Option<f64>,
    #[serde(default)]
    pub type_distribution: TypeDistribution,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

/// Equipment type → count, in the order the server sent it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeDistribution(Vec<(String, u64)>);

impl TypeDistribution {
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn get(&self, equipment_type: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(name, _)| name == equipment_type)
            .map(|(_, count)| *count)
    }
}

impl Serialize for TypeDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TypeDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedCounts;

        impl<'de> Visitor<'de> for OrderedCounts {
            type Value = TypeDistribution;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of equipment type to count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, count)) = access.next_entry::<String, u64>()? {
                    entries.push((name, count));
                }
                Ok(TypeDistribution(entries))
            }
        }

        deserializer.deserialize_map(OrderedCounts)
    }
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn is_csv(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".csv")
    }
}

/// A downloaded PDF report ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub dataset_id: i64,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Report {
    pub fn new(dataset_id: i64, bytes: Vec<u8>) -> Self {
        Self {
            dataset_id,
            filename: report_filename(dataset_id),
            bytes,
        }
    }
}

pub fn report_filename(dataset_id: i64) -> String {
    format!("equipment_report_{}.pdf", dataset_id)
}
