//! Command line definitions
//!
//! Each subcommand runs exactly one request flow against the configured store
//! and prints the result as JSON.

use crate::visualize::Structure;
use clap::{Args, Parser, Subcommand};
use records::{BlogPostPayload, UserPayload};

/// Request flows over per-request data structures
#[derive(Parser, Debug)]
#[command(name = "service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Populate the store with generated users and blog posts
    Seed {
        #[arg(long, default_value_t = 200)]
        users: usize,

        #[arg(long, default_value_t = 200)]
        posts: usize,
    },

    /// List users in ascending id order
    UsersAsc,

    /// List users in descending id order
    UsersDesc,

    /// Read one user
    User { id: String },

    /// Create a user
    CreateUser {
        #[command(flatten)]
        fields: UserFields,
    },

    /// Update the given fields of a user
    UpdateUser {
        id: String,

        #[command(flatten)]
        fields: UserFields,
    },

    /// Delete a user and their blog posts
    DeleteUser { id: String },

    /// List a user's blog posts
    UserPosts { id: String },

    /// Create a blog post for a user
    CreatePost {
        user_id: String,

        #[command(flatten)]
        fields: PostFields,
    },

    /// Read one blog post
    Post { id: String },

    /// Update the given fields of a blog post
    UpdatePost {
        id: String,

        #[command(flatten)]
        fields: PostFields,
    },

    /// Delete a blog post
    DeletePost { id: String },

    /// List blog posts with each body replaced by its code point sum
    Numerics,

    /// Delete the most recently created blog posts
    DeleteRecent {
        /// Defaults to DELETE_RECENT_COUNT
        #[arg(long)]
        count: Option<usize>,
    },

    /// Print the layout of a structure built over the current records
    Visualize {
        #[arg(value_enum)]
        structure: Structure,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct UserFields {
    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

impl From<UserFields> for UserPayload {
    fn from(fields: UserFields) -> Self {
        UserPayload {
            username: fields.username,
            email: fields.email,
            address: fields.address,
            phone: fields.phone,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PostFields {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub body: Option<String>,
}

impl From<PostFields> for BlogPostPayload {
    fn from(fields: PostFields) -> Self {
        BlogPostPayload {
            title: fields.title,
            body: fields.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_user() {
        let cli = Cli::try_parse_from([
            "service",
            "create-user",
            "--username",
            "ada",
            "--email",
            "ada@email.com",
        ])
        .unwrap();

        let Command::CreateUser { fields } = cli.command else {
            panic!("expected create-user");
        };
        let payload = UserPayload::from(fields);
        assert_eq!(payload.username.as_deref(), Some("ada"));
        assert!(payload.phone.is_none());
    }

    #[test]
    fn test_parse_delete_recent_and_visualize() {
        let cli = Cli::try_parse_from(["service", "delete-recent", "--count", "3"]).unwrap();
        assert!(matches!(cli.command, Command::DeleteRecent { count: Some(3) }));

        let cli = Cli::try_parse_from(["service", "visualize", "linked-list"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Visualize {
                structure: Structure::LinkedList
            }
        ));
    }

    #[test]
    fn test_seed_defaults() {
        let cli = Cli::try_parse_from(["service", "seed"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Seed {
                users: 200,
                posts: 200
            }
        ));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
