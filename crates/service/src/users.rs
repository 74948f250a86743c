// User flows
// Each call fetches the current batch, builds one structure, traverses it, and drops it

use crate::config::Config;
use crate::database::Database;
use crate::error::{parse_id, ApiError, ApiResult};
use dsa::LinkedList;
use records::{BlogPost, NewUser, User, UserPayload};

// Stage the fields in a hash map, validate, and insert
pub async fn create_user(db: &Database, config: &Config, payload: &UserPayload) -> ApiResult<User> {
    let staged = payload.stage(config.hashmap_buckets)?;
    tracing::debug!(
        "Staged {} user fields across {} buckets (load factor {:.2})",
        staged.len(),
        staged.bucket_count(),
        staged.load_factor()
    );
    let new_user = NewUser::from_staged(&staged)?;

    if db
        .find_user_by_identity(&new_user.username, &new_user.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("User"));
    }

    Ok(db.insert_user(&new_user).await?)
}

// Store order preserved by appending at the tail
pub async fn users_ascending(db: &Database) -> ApiResult<Vec<User>> {
    let mut list = LinkedList::new();
    for user in db.list_users().await? {
        list.add_to_tail(user);
    }

    Ok(list.to_sequence())
}

// Store order reversed by inserting at the head
pub async fn users_descending(db: &Database) -> ApiResult<Vec<User>> {
    let mut list = LinkedList::new();
    for user in db.list_users().await? {
        list.add_to_head(user);
    }

    Ok(list.to_sequence())
}

pub async fn read_user(db: &Database, user_id: &str) -> ApiResult<User> {
    parse_id(user_id)?;
    let list: LinkedList<User> = db.list_users().await?.into_iter().collect();

    list.find_by_id(user_id)
        .cloned()
        .ok_or(ApiError::NotFound("User"))
}

pub async fn update_user(db: &Database, user_id: &str, changes: &UserPayload) -> ApiResult<User> {
    parse_id(user_id)?;
    let list: LinkedList<User> = db.list_users().await?.into_iter().collect();

    let mut user = list
        .find_by_id(user_id)
        .cloned()
        .ok_or(ApiError::NotFound("User"))?;
    user.apply(changes);

    // The new identity must not collide with another user's
    let taken = list.iter().any(|other| {
        other.id != user.id && (other.username == user.username || other.email == user.email)
    });
    if taken {
        return Err(ApiError::Conflict("User"));
    }

    db.update_user(&user).await?;
    tracing::info!("Updated user {}", user.id);
    Ok(user)
}

pub async fn delete_user(db: &Database, user_id: &str) -> ApiResult<()> {
    let id = parse_id(user_id)?;
    if !db.delete_user(id).await? {
        return Err(ApiError::NotFound("User"));
    }
    Ok(())
}

// The user's posts in id order
pub async fn user_blogposts(db: &Database, user_id: &str) -> ApiResult<Vec<BlogPost>> {
    let user = read_user(db, user_id).await?;

    let mut list = LinkedList::new();
    for post in db.list_user_blogposts(user.id).await? {
        list.add_to_tail(post);
    }
    tracing::debug!("Listed {} blog posts of user {}", list.len(), user.id);

    Ok(list.to_sequence())
}
