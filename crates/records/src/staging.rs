// Field staging for record creation
// Raw request fields are put into a dsa::HashMap, then read back and validated

use chrono::{DateTime, Utc};
use dsa::{DsaError, HashMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const USER_FIELDS: [&str; 4] = ["username", "email", "address", "phone"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

// A raw field value as staged before record construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Timestamp(DateTime<Utc>),
    ForeignKey(i64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_foreign_key(&self) -> Option<i64> {
        match self {
            FieldValue::ForeignKey(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{text}"),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            FieldValue::ForeignKey(id) => write!(f, "{id}"),
        }
    }
}

// Incoming user fields; every field is optional until validated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl UserPayload {
    /// Stage the provided text fields into a fresh map
    pub fn stage(&self, bucket_count: usize) -> Result<HashMap<FieldValue>, DsaError> {
        let mut fields = HashMap::new(bucket_count)?;
        let values = [&self.username, &self.email, &self.address, &self.phone];

        for (name, value) in USER_FIELDS.into_iter().zip(values) {
            if let Some(value) = value {
                fields.put(name, FieldValue::Text(value.clone()));
            }
        }

        Ok(fields)
    }
}

// Incoming blog post fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogPostPayload {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl BlogPostPayload {
    /// Stage title and body along with the creation timestamp and the author's id
    pub fn stage(
        &self,
        user_id: i64,
        date: DateTime<Utc>,
        bucket_count: usize,
    ) -> Result<HashMap<FieldValue>, DsaError> {
        let mut fields = HashMap::new(bucket_count)?;

        if let Some(title) = &self.title {
            fields.put("title", FieldValue::Text(title.clone()));
        }
        if let Some(body) = &self.body {
            fields.put("body", FieldValue::Text(body.clone()));
        }
        fields.put("date", FieldValue::Timestamp(date));
        fields.put("user_id", FieldValue::ForeignKey(user_id));

        Ok(fields)
    }
}

// A validated user, ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

impl NewUser {
    pub fn from_staged(fields: &HashMap<FieldValue>) -> Result<Self, RecordError> {
        let mut missing = Vec::new();
        let mut text = |name: &str| required_text(fields, name, &mut missing);

        let username = text("username");
        let email = text("email");
        let address = text("address");
        let phone = text("phone");

        match (username, email, address, phone) {
            (Some(username), Some(email), Some(address), Some(phone)) => Ok(NewUser {
                username,
                email,
                address,
                phone,
            }),
            _ => Err(RecordError::MissingFields(missing)),
        }
    }
}

// A validated blog post, ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBlogPost {
    pub title: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub user_id: i64,
}

impl NewBlogPost {
    pub fn from_staged(fields: &HashMap<FieldValue>) -> Result<Self, RecordError> {
        let mut missing = Vec::new();

        let title = required_text(fields, "title", &mut missing);
        let body = required_text(fields, "body", &mut missing);
        let date = fields.get("date").and_then(FieldValue::as_timestamp);
        if date.is_none() {
            missing.push("date".to_string());
        }
        let user_id = fields.get("user_id").and_then(FieldValue::as_foreign_key);
        if user_id.is_none() {
            missing.push("user_id".to_string());
        }

        match (title, body, date, user_id) {
            (Some(title), Some(body), Some(date), Some(user_id)) => Ok(NewBlogPost {
                title,
                body,
                date,
                user_id,
            }),
            _ => Err(RecordError::MissingFields(missing)),
        }
    }
}

// Non-empty text under `name`, or record it as missing
fn required_text(
    fields: &HashMap<FieldValue>,
    name: &str,
    missing: &mut Vec<String>,
) -> Option<String> {
    let value = fields
        .get(name)
        .and_then(FieldValue::as_text)
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    if value.is_none() {
        missing.push(name.to_string());
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_user() -> UserPayload {
        UserPayload {
            username: Some("ada".to_string()),
            email: Some("ada@email.com".to_string()),
            address: Some("1 Main St".to_string()),
            phone: Some("5550100".to_string()),
        }
    }

    #[test]
    fn test_user_round_trip_through_staging() {
        let fields = full_user().stage(8).unwrap();
        assert_eq!(fields.len(), 4);

        let user = NewUser::from_staged(&fields).unwrap();
        assert_eq!(user.username, "ada");
        assert_eq!(user.phone, "5550100");
    }

    #[test]
    fn test_missing_and_empty_user_fields() {
        let payload = UserPayload {
            email: Some(String::new()),
            phone: None,
            ..full_user()
        };
        let fields = payload.stage(8).unwrap();

        let err = NewUser::from_staged(&fields).unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingFields(vec!["email".to_string(), "phone".to_string()])
        );
        assert_eq!(err.to_string(), "missing required fields: email, phone");
    }

    #[test]
    fn test_zero_buckets_fail_staging() {
        assert!(matches!(
            full_user().stage(0),
            Err(DsaError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_staging_works_with_heavy_collisions() {
        // a single bucket chains every field
        let fields = full_user().stage(1).unwrap();
        assert_eq!(fields.bucket_len(0), 4);
        assert!(NewUser::from_staged(&fields).is_ok());
    }

    #[test]
    fn test_blogpost_staging_carries_timestamp_and_foreign_key() {
        let now = Utc::now();
        let payload = BlogPostPayload {
            title: Some("Ma go".to_string()),
            body: Some("This is a post.".to_string()),
        };
        let fields = payload.stage(12, now, 4).unwrap();

        let post = NewBlogPost::from_staged(&fields).unwrap();
        assert_eq!(post.title, "Ma go");
        assert_eq!(post.date, now);
        assert_eq!(post.user_id, 12);
    }

    #[test]
    fn test_blogpost_with_empty_title() {
        let payload = BlogPostPayload {
            title: Some(String::new()),
            body: Some("A new post.".to_string()),
        };
        let fields = payload.stage(12, Utc::now(), 4).unwrap();

        assert_eq!(
            NewBlogPost::from_staged(&fields),
            Err(RecordError::MissingFields(vec!["title".to_string()]))
        );
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Text("x".to_string()).to_string(), "x");
        assert_eq!(FieldValue::ForeignKey(7).to_string(), "7");
    }
}
