use crate::staging::{BlogPostPayload, UserPayload};
use chrono::{DateTime, Utc};
use dsa::Keyed;
use serde::{Deserialize, Serialize};

// A registered user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

impl User {
    // Overwrite every field the payload carries a non-empty value for
    pub fn apply(&mut self, changes: &UserPayload) {
        merge(&mut self.username, &changes.username);
        merge(&mut self.email, &changes.email);
        merge(&mut self.address, &changes.address);
        merge(&mut self.phone, &changes.phone);
    }
}

// A blog post written by a user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub user_id: i64,
}

impl BlogPost {
    pub fn apply(&mut self, changes: &BlogPostPayload) {
        merge(&mut self.title, &changes.title);
        merge(&mut self.body, &changes.body);
    }

    /// Replace the body with the sum of its code points
    pub fn into_numeric(self) -> NumericBlogPost {
        NumericBlogPost {
            id: self.id,
            body: code_point_sum(&self.body),
            title: self.title,
            date: self.date,
            user_id: self.user_id,
        }
    }
}

// A blog post whose body has been reduced to a number
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericBlogPost {
    pub id: i64,
    pub title: String,
    pub body: u64,
    pub date: DateTime<Utc>,
    pub user_id: i64,
}

pub fn code_point_sum(text: &str) -> u64 {
    text.chars().map(|c| u64::from(u32::from(c))).sum()
}

fn merge(field: &mut String, change: &Option<String>) {
    if let Some(value) = change.as_deref().filter(|v| !v.is_empty()) {
        *field = value.to_string();
    }
}

impl Keyed for User {
    type Key = i64;

    fn key(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl Keyed for BlogPost {
    type Key = i64;

    fn key(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl Keyed for NumericBlogPost {
    type Key = i64;

    fn key(&self) -> Option<i64> {
        Some(self.id)
    }
}
