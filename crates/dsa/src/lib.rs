// Ephemeral data structures rebuilt for every request
// Each one is populated from a freshly fetched record batch, traversed once, then dropped

pub mod bst;
pub mod error;
pub mod hashmap;
pub mod keyed;
pub mod linked_list;
mod node;
pub mod queue;
pub mod stack;

pub use {
    bst::Bst,
    error::DsaError,
    hashmap::HashMap,
    keyed::{parse_key, Keyed},
    linked_list::LinkedList,
    node::TreeNode,
    queue::Queue,
    stack::Stack,
};
