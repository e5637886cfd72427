use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use serde::{Deserialize, Serialize};

/// A tracked fax/correspondence record. The three file fields are either
/// all set (a stored upload exists) or all `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub _id: ObjectId,
    pub name: String,
    pub fax_number: Option<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub status: Option<String>,
    pub fax_type: Option<String>,
    pub number_of_pages: Option<i32>,
    pub notes: Option<String>,
    pub file_path: Option<String>,
    pub file_url: Option<String>,
    pub file_size: Option<i64>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub upload_date: DateTime<Utc>,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default, with = "opt_chrono_as_bson")]
    pub commitment_date: Option<DateTime<Utc>>,
}

impl Document {
    pub fn has_file(&self) -> bool {
        self.file_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Case-insensitive status check used by every report aggregation.
    pub fn has_status(&self, status: &str) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(status))
    }
}

/// Serde helper for `Option<DateTime<Utc>>` stored as an optional bson date.
mod opt_chrono_as_bson {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value
            .map(mongodb::bson::DateTime::from_chrono)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value = Option::<mongodb::bson::DateTime>::deserialize(deserializer)?;
        Ok(value.map(|v| v.to_chrono()))
    }
}
