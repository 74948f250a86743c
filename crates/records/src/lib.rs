// Record types exchanged between the store and the request flows

pub mod models;
pub mod staging;

pub use {
    models::{code_point_sum, BlogPost, NumericBlogPost, User},
    staging::{BlogPostPayload, FieldValue, NewBlogPost, NewUser, RecordError, UserPayload},
};
