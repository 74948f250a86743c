// Blog post flows
// Lookup goes through a shuffled BST, the numeric transform through a queue,
// and bulk deletion of the newest posts through a stack

use crate::config::Config;
use crate::database::Database;
use crate::error::{parse_id, ApiError, ApiResult};
use chrono::Utc;
use dsa::{Bst, Queue, Stack};
use records::{BlogPost, BlogPostPayload, NewBlogPost, NumericBlogPost};

pub async fn create_blogpost(
    db: &Database,
    config: &Config,
    user_id: &str,
    payload: &BlogPostPayload,
) -> ApiResult<BlogPost> {
    let user_id = parse_id(user_id)?;

    let staged = payload.stage(user_id, Utc::now(), config.hashmap_buckets)?;
    let new_post = NewBlogPost::from_staged(&staged)?;

    if !db.user_exists(user_id).await? {
        return Err(ApiError::UserMissing);
    }

    Ok(db.insert_blogpost(&new_post).await?)
}

pub async fn read_blogpost(db: &Database, post_id: &str) -> ApiResult<BlogPost> {
    parse_id(post_id)?;

    let posts = db.list_blogposts().await?;
    let tree = Bst::from_shuffled(posts, &mut rand::thread_rng());
    tracing::debug!(
        "Built search tree of {} blog posts with height {}",
        tree.len(),
        tree.height()
    );

    tree.search(post_id)
        .cloned()
        .ok_or(ApiError::NotFound("Blog post"))
}

pub async fn update_blogpost(
    db: &Database,
    post_id: &str,
    changes: &BlogPostPayload,
) -> ApiResult<BlogPost> {
    let mut post = read_blogpost(db, post_id).await?;
    post.apply(changes);

    db.update_blogpost(&post).await?;
    tracing::info!("Updated blog post {}", post.id);
    Ok(post)
}

pub async fn delete_blogpost(db: &Database, post_id: &str) -> ApiResult<()> {
    let id = parse_id(post_id)?;
    if !db.delete_blogpost(id).await? {
        return Err(ApiError::NotFound("Blog post"));
    }
    Ok(())
}

// Every post with its body replaced by the sum of its code points, in store order
pub async fn numeric_blogposts(db: &Database) -> ApiResult<Vec<NumericBlogPost>> {
    let mut queue = Queue::new();
    for post in db.list_blogposts().await? {
        queue.enqueue(post);
    }

    let mut numeric = Vec::with_capacity(queue.len());
    while let Some(post) = queue.dequeue() {
        numeric.push(post.into_numeric());
    }

    Ok(numeric)
}

/// Delete the `count` most recently created posts, newest first.
///
/// Posts are pushed in store order, so popping yields the newest first.
/// Each delete is independent: if one fails, the ones before it stay
/// deleted and the error is returned.
pub async fn delete_recent_blogposts(db: &Database, count: usize) -> ApiResult<Vec<i64>> {
    let mut stack = Stack::new();
    for post in db.list_blogposts().await? {
        stack.push(post);
    }

    delete_popped(db, &mut stack, count).await
}

// Pop up to `count` posts and delete each; ids already gone from the store are skipped
async fn delete_popped(
    db: &Database,
    stack: &mut Stack<BlogPost>,
    count: usize,
) -> ApiResult<Vec<i64>> {
    let mut deleted = Vec::with_capacity(count.min(stack.len()));
    for _ in 0..count {
        let Some(post) = stack.pop() else {
            break;
        };

        match db.delete_blogpost(post.id).await {
            Ok(true) => deleted.push(post.id),
            Ok(false) => tracing::warn!("Blog post {} was already gone from the store", post.id),
            Err(e) => {
                tracing::warn!(
                    "Deleted {} of {} recent blog posts before failing on {}",
                    deleted.len(),
                    count,
                    post.id
                );
                return Err(e.into());
            }
        }
    }

    tracing::info!("Deleted {} recent blog posts", deleted.len());
    Ok(deleted)
}
