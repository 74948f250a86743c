use serde::Serialize;

// Singly linked node
// Exclusively owned by its predecessor, or by the structure's top pointer
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub data: T,
    pub next: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    pub fn new(data: T, next: Option<Box<Node<T>>>) -> Box<Self> {
        Box::new(Node { data, next })
    }
}

// Arena slot for chains that also keep a tail
// `next` is an index into the same arena, so the tail stays a plain non-owning index
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub data: T,
    pub next: Option<usize>,
}

/// Binary tree node, owned by its parent or by the tree root.
#[derive(Debug, Serialize)]
pub struct TreeNode<T> {
    pub(crate) data: T,
    pub(crate) left: Option<Box<TreeNode<T>>>,
    pub(crate) right: Option<Box<TreeNode<T>>>,
}

impl<T> TreeNode<T> {
    pub(crate) fn new(data: T) -> Box<Self> {
        Box::new(TreeNode {
            data,
            left: None,
            right: None,
        })
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn left(&self) -> Option<&TreeNode<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&TreeNode<T>> {
        self.right.as_deref()
    }

    pub(crate) fn take_children(&mut self) -> [Option<Box<TreeNode<T>>>; 2] {
        [self.left.take(), self.right.take()]
    }
}
