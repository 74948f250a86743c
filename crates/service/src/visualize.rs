// Layout snapshots of each structure built over the current batch
// Users feed the hash map and the linked list; blog post ids feed the rest

use crate::config::Config;
use crate::database::Database;
use crate::error::ApiResult;
use anyhow::Context;
use dsa::{Bst, HashMap, LinkedList, Queue, Stack};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Structure {
    Hashmap,
    LinkedList,
    Bst,
    Queue,
    Stack,
}

pub async fn visualize(db: &Database, config: &Config, structure: Structure) -> ApiResult<Value> {
    let snapshot = match structure {
        Structure::Hashmap => {
            let mut map = HashMap::new(config.hashmap_buckets)?;
            for user in db.list_users().await? {
                map.put(user.username, user.email);
            }
            serde_json::to_value(&map)
        }
        Structure::LinkedList => {
            let mut list = LinkedList::new();
            for user in db.list_users().await? {
                list.add_to_tail(user.id);
            }
            serde_json::to_value(&list)
        }
        Structure::Bst => {
            let ids = post_ids(db).await?;
            let tree = Bst::from_shuffled(ids, &mut rand::thread_rng());
            serde_json::to_value(&tree)
        }
        Structure::Queue => {
            let queue: Queue<i64> = post_ids(db).await?.into_iter().collect();
            serde_json::to_value(&queue)
        }
        Structure::Stack => {
            let stack: Stack<i64> = post_ids(db).await?.into_iter().collect();
            serde_json::to_value(&stack)
        }
    };

    Ok(snapshot.context("Failed to serialize structure snapshot")?)
}

async fn post_ids(db: &Database) -> ApiResult<Vec<i64>> {
    Ok(db.list_blogposts().await?.iter().map(|p| p.id).collect())
}
