// Record store backed by SQL
// The flows only read ordered batches from it and write single records back

use crate::config::Config;
use anyhow::{Context, Result};
use records::{BlogPost, NewBlogPost, NewUser, User};
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    // Connect and make sure the schema exists
    pub async fn connect(config: &Config) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let enforce_foreign_keys = config.database_url.starts_with("sqlite");
        let mut options = AnyPoolOptions::new()
            .max_connections(config.pool_size())
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    if enforce_foreign_keys {
                        sqlx::query("PRAGMA foreign_keys = ON").execute(conn).await?;
                    }
                    Ok(())
                })
            });

        // Closing the only connection would discard an in-memory database
        if config.is_in_memory() {
            options = options.idle_timeout(None).max_lifetime(None);
        }

        let pool = options
            .connect(&config.database_url)
            .await
            .context("Failed to connect to database")?;

        let db = Database { pool };
        db.init().await?;

        Ok(db)
    }

    // Initialize database schema
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username VARCHAR(50) NOT NULL,
                email VARCHAR(50) NOT NULL,
                address VARCHAR(200) NOT NULL,
                phone VARCHAR(50) NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create users table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blogposts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title VARCHAR(50) NOT NULL,
                body TEXT NOT NULL,
                date TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create blogposts table")?;

        tracing::info!("Database initialized successfully");
        Ok(())
    }

    // All users, ascending by id
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, email, address, phone FROM users ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list users")?;

        Ok(rows.into_iter().map(UserRecord::into_user).collect())
    }

    pub async fn user_exists(&self, user_id: i64) -> Result<bool> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check user existence")?;

        Ok(result.0 > 0)
    }

    // A user already holding this username or email, if any
    pub async fn find_user_by_identity(&self, username: &str, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, address, phone
            FROM users
            WHERE username = ? OR email = ?
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to look up user identity")?;

        Ok(row.map(UserRecord::into_user))
    }

    pub async fn insert_user(&self, user: &NewUser) -> Result<User> {
        // The Any driver does not surface SQLite's rowid, so the insert returns it
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO users (username, email, address, phone) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.address)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create user")?;

        tracing::info!("Created user {} in database", id);
        Ok(User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            address: user.address.clone(),
            phone: user.phone.clone(),
        })
    }

    pub async fn update_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            "UPDATE users SET username = ?, email = ?, address = ?, phone = ? WHERE id = ?",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.address)
        .bind(&user.phone)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .context("Failed to update user")?;

        Ok(())
    }

    // Returns whether a row was removed; the user's posts cascade
    pub async fn delete_user(&self, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete user")?;

        if result.rows_affected() > 0 {
            tracing::info!("Deleted user {} from database", user_id);
        }
        Ok(result.rows_affected() > 0)
    }

    // All blog posts, ascending by id
    pub async fn list_blogposts(&self) -> Result<Vec<BlogPost>> {
        let rows = sqlx::query_as::<_, BlogPostRecord>(
            "SELECT id, title, body, date, user_id FROM blogposts ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list blog posts")?;

        rows.into_iter().map(BlogPostRecord::into_blogpost).collect()
    }

    pub async fn list_user_blogposts(&self, user_id: i64) -> Result<Vec<BlogPost>> {
        let rows = sqlx::query_as::<_, BlogPostRecord>(
            r#"
            SELECT id, title, body, date, user_id
            FROM blogposts
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list user blog posts")?;

        rows.into_iter().map(BlogPostRecord::into_blogpost).collect()
    }

    pub async fn insert_blogpost(&self, post: &NewBlogPost) -> Result<BlogPost> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO blogposts (title, body, date, user_id) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.date.to_rfc3339())
        .bind(post.user_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create blog post")?;

        tracing::info!("Created blog post {} for user {}", id, post.user_id);
        Ok(BlogPost {
            id,
            title: post.title.clone(),
            body: post.body.clone(),
            date: post.date,
            user_id: post.user_id,
        })
    }

    pub async fn update_blogpost(&self, post: &BlogPost) -> Result<()> {
        sqlx::query("UPDATE blogposts SET title = ?, body = ? WHERE id = ?")
            .bind(&post.title)
            .bind(&post.body)
            .bind(post.id)
            .execute(&self.pool)
            .await
            .context("Failed to update blog post")?;

        Ok(())
    }

    pub async fn delete_blogpost(&self, post_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogposts WHERE id = ?")
            .bind(post_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete blog post")?;

        Ok(result.rows_affected() > 0)
    }
}

// User database record
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRecord {
    id: i64,
    username: String,
    email: String,
    address: String,
    phone: String,
}

impl UserRecord {
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            address: self.address,
            phone: self.phone,
        }
    }
}

// Blog post database record; `date` is stored as RFC 3339 text
#[derive(Debug, Clone, sqlx::FromRow)]
struct BlogPostRecord {
    id: i64,
    title: String,
    body: String,
    date: String,
    user_id: i64,
}

impl BlogPostRecord {
    fn into_blogpost(self) -> Result<BlogPost> {
        let date = chrono::DateTime::parse_from_rfc3339(&self.date)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .with_context(|| format!("Failed to parse date of blog post {}", self.id))?;

        Ok(BlogPost {
            id: self.id,
            title: self.title,
            body: self.body,
            date,
            user_id: self.user_id,
        })
    }
}
