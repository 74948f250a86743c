// Dummy data generation for local runs

use crate::database::Database;
use anyhow::{bail, Result};
use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use records::{NewBlogPost, NewUser};
use serde::Serialize;

const FIRST_NAMES: [&str; 12] = [
    "Ada", "Alan", "Barbara", "Dennis", "Edsger", "Frances", "Grace", "John", "Ken", "Linus",
    "Margaret", "Niklaus",
];

const LAST_NAMES: [&str; 12] = [
    "Lovelace", "Turing", "Liskov", "Ritchie", "Dijkstra", "Allen", "Hopper", "Backus",
    "Thompson", "Torvalds", "Hamilton", "Wirth",
];

const STREETS: [&str; 6] = ["Main St", "Oak Ave", "Pine Rd", "Elm St", "Lake Dr", "Hill Ln"];

const CITIES: [&str; 6] = ["Springfield", "Riverton", "Fairview", "Georgetown", "Salem", "Madison"];

const WORDS: [&str; 24] = [
    "tree", "node", "bucket", "queue", "stack", "hash", "list", "pointer", "search", "order",
    "insert", "chain", "record", "batch", "request", "index", "balance", "height", "key",
    "value", "root", "leaf", "tail", "head",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub posts: usize,
}

// Insert `users` generated users, then `posts` posts by random existing authors
pub async fn seed<R: Rng>(db: &Database, users: usize, posts: usize, rng: &mut R) -> Result<SeedSummary> {
    for _ in 0..users {
        db.insert_user(&fake_user(rng)).await?;
    }

    let author_ids: Vec<i64> = db.list_users().await?.iter().map(|u| u.id).collect();
    if posts > 0 && author_ids.is_empty() {
        bail!("Cannot seed blog posts without any users");
    }

    for _ in 0..posts {
        let Some(&author) = author_ids.choose(rng) else {
            break;
        };
        db.insert_blogpost(&fake_post(author, rng)).await?;
    }

    tracing::info!("Seeded {} users and {} blog posts", users, posts);
    Ok(SeedSummary { users, posts })
}

fn pick<R: Rng>(words: &[&'static str], rng: &mut R) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

fn fake_user<R: Rng>(rng: &mut R) -> NewUser {
    let username = format!("{} {}", pick(&FIRST_NAMES, rng), pick(&LAST_NAMES, rng));

    NewUser {
        email: format!("{}@email.com", username.replace(' ', "_")),
        address: format!(
            "{} {}, {}",
            rng.gen_range(1..=9999),
            pick(&STREETS, rng),
            pick(&CITIES, rng)
        ),
        phone: format!("{}", rng.gen_range(10_000_000_000u64..99_999_999_999)),
        username,
    }
}

fn sentence<R: Rng>(words: usize, rng: &mut R) -> String {
    let text: Vec<&str> = (0..words).map(|_| pick(&WORDS, rng)).collect();
    format!("{}.", capitalize(&text.join(" ")))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn fake_post<R: Rng>(user_id: i64, rng: &mut R) -> NewBlogPost {
    let sentences = rng.gen_range(3..=8);
    let body: Vec<String> = (0..sentences)
        .map(|_| {
            let words = rng.gen_range(4..=12);
            sentence(words, rng)
        })
        .collect();

    NewBlogPost {
        title: sentence(5, rng),
        body: body.join(" "),
        date: Utc::now() - Duration::seconds(rng.gen_range(0..10 * 365 * 24 * 3600)),
        user_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::memory_db;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn test_seed_populates_store() {
        let db = memory_db().await;
        let mut rng = StdRng::seed_from_u64(1);

        let summary = seed(&db, 20, 30, &mut rng).await.unwrap();
        assert_eq!(summary, SeedSummary { users: 20, posts: 30 });

        let users = db.list_users().await.unwrap();
        assert_eq!(users.len(), 20);
        assert!(users.iter().all(|u| u.email.ends_with("@email.com")));

        let posts = db.list_blogposts().await.unwrap();
        assert_eq!(posts.len(), 30);
        assert!(posts.iter().all(|p| p.user_id >= 1 && p.user_id <= 20));
        assert!(posts.iter().all(|p| p.date <= Utc::now()));
    }

    #[tokio::test]
    async fn test_posts_need_users() {
        let db = memory_db().await;
        let mut rng = StdRng::seed_from_u64(1);
        assert!(seed(&db, 0, 5, &mut rng).await.is_err());
    }

    #[test]
    fn test_sentence_shape() {
        let mut rng = StdRng::seed_from_u64(4);
        let text = sentence(5, &mut rng);

        assert!(text.ends_with('.'));
        assert_eq!(text.split(' ').count(), 5);
    }
}
