// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Height-balanced binary search trees.
//!
//! The rotation machinery is written once against the [`Balanced`] trait so
//! that the stats tree ([`crate::index::BalancedIndex`]) and the general
//! purpose [`AvlTree`] share it. Nodes own their children outright and keep
//! no parent pointer, so every structural operation takes a subtree by value
//! and hands back the (possibly different) root of that subtree.
//!
//! Heights are cached on each node: an empty subtree has height -1 and a
//! leaf has height 0. After every insertion or removal the nodes along the
//! affected path are rebalanced bottom-up, which keeps
//! `|height(left) - height(right)| <= 1` everywhere and bounds the height at
//! roughly `1.44 * log2(n + 2)`.

use std::cmp::Ordering;
use std::cmp::max;

/// An owned, possibly empty, subtree.
pub type Link<N> = Option<Box<N>>;

/// A node that can live in a height-balanced tree.
pub trait Balanced: Sized {
    type Key: Ord;

    fn key(&self) -> &Self::Key;
    fn height(&self) -> i32;
    fn set_height(&mut self, height: i32);
    fn left(&self) -> &Link<Self>;
    fn right(&self) -> &Link<Self>;
    fn left_mut(&mut self) -> &mut Link<Self>;
    fn right_mut(&mut self) -> &mut Link<Self>;
}

/// Height of a subtree, -1 when empty.
pub fn height<N: Balanced>(link: &Link<N>) -> i32 {
    link.as_ref().map_or(-1, |node| node.height())
}

/// `height(right) - height(left)`; positive means right-heavy.
pub fn balance<N: Balanced>(node: &N) -> i32 {
    height(node.right()) - height(node.left())
}

fn update_height<N: Balanced>(node: &mut N) {
    let height = 1 + max(height(node.left()), height(node.right()));
    node.set_height(height);
}

/// Promote the right child. The child's left subtree is reattached as the
/// old root's right subtree.
pub fn rotate_left<N: Balanced>(mut node: Box<N>) -> Box<N> {
    let Some(mut right) = node.right_mut().take() else {
        return node;
    };
    *node.right_mut() = right.left_mut().take();
    update_height(&mut *node);
    *right.left_mut() = Some(node);
    update_height(&mut *right);
    right
}

/// Promote the left child. Mirror image of [`rotate_left`].
pub fn rotate_right<N: Balanced>(mut node: Box<N>) -> Box<N> {
    let Some(mut left) = node.left_mut().take() else {
        return node;
    };
    *node.left_mut() = left.right_mut().take();
    update_height(&mut *node);
    *left.right_mut() = Some(node);
    update_height(&mut *left);
    left
}

/// Refresh the cached height of `node` and restore the balance invariant,
/// assuming both children already satisfy it.
pub fn rebalance<N: Balanced>(mut node: Box<N>) -> Box<N> {
    update_height(&mut *node);
    let balance = balance(&*node);

    if balance > 1 {
        // Right-left case: straighten the right child first.
        if let Some(right) = node.right_mut().take() {
            let right = if height(right.right()) >= height(right.left()) {
                right
            } else {
                rotate_right(right)
            };
            *node.right_mut() = Some(right);
        }
        return rotate_left(node);
    }

    if balance < -1 {
        if let Some(left) = node.left_mut().take() {
            let left = if height(left.left()) >= height(left.right()) {
                left
            } else {
                rotate_left(left)
            };
            *node.left_mut() = Some(left);
        }
        return rotate_right(node);
    }

    node
}

/// Insert `node` below `current` and return the new subtree root.
///
/// When a node with the same key already exists the subtree is returned
/// exactly as it was, together with the rejected node.
pub fn insert<N: Balanced>(current: Link<N>, node: Box<N>) -> (Box<N>, Option<Box<N>>) {
    let Some(mut current) = current else {
        return (node, None);
    };

    let rejected = match node.key().cmp(current.key()) {
        Ordering::Less => {
            let (left, rejected) = insert(current.left_mut().take(), node);
            *current.left_mut() = Some(left);
            rejected
        }
        Ordering::Greater => {
            let (right, rejected) = insert(current.right_mut().take(), node);
            *current.right_mut() = Some(right);
            rejected
        }
        Ordering::Equal => return (current, Some(node)),
    };

    match rejected {
        Some(rejected) => (current, Some(rejected)),
        None => (rebalance(current), None),
    }
}

/// Detach the smallest node of a subtree.
/// Returns `(min, rest)` where `rest` is the rebalanced remainder.
fn take_min<N: Balanced>(mut node: Box<N>) -> (Box<N>, Link<N>) {
    match node.left_mut().take() {
        None => {
            let rest = node.right_mut().take();
            (node, rest)
        }
        Some(left) => {
            let (min, rest) = take_min(left);
            *node.left_mut() = rest;
            (min, Some(rebalance(node)))
        }
    }
}

/// Remove the node with `key` from the subtree rooted at `current`.
///
/// A node with two children is replaced by its in-order successor. Returns
/// the new subtree root and the detached node, if one matched.
pub fn remove<N: Balanced>(current: Link<N>, key: &N::Key) -> (Link<N>, Option<Box<N>>) {
    let Some(mut current) = current else {
        return (None, None);
    };

    match key.cmp(current.key()) {
        Ordering::Less => {
            let (left, removed) = remove(current.left_mut().take(), key);
            *current.left_mut() = left;
            (Some(rebalance(current)), removed)
        }
        Ordering::Greater => {
            let (right, removed) = remove(current.right_mut().take(), key);
            *current.right_mut() = right;
            (Some(rebalance(current)), removed)
        }
        Ordering::Equal => {
            let left = current.left_mut().take();
            let right = current.right_mut().take();
            let replacement = match (left, right) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    let (mut successor, rest) = take_min(right);
                    *successor.left_mut() = Some(left);
                    *successor.right_mut() = rest;
                    Some(rebalance(successor))
                }
            };
            current.set_height(0);
            (replacement, Some(current))
        }
    }
}

/// Iterative descent by key.
pub fn find<'a, N: Balanced>(mut link: &'a Link<N>, key: &N::Key) -> Option<&'a N> {
    while let Some(node) = link {
        link = match key.cmp(node.key()) {
            Ordering::Less => node.left(),
            Ordering::Greater => node.right(),
            Ordering::Equal => return Some(node),
        };
    }
    None
}

pub fn preorder<'a, N: Balanced>(link: &'a Link<N>, out: &mut Vec<&'a N>) {
    if let Some(node) = link {
        out.push(node);
        preorder(node.left(), out);
        preorder(node.right(), out);
    }
}

pub fn inorder<'a, N: Balanced>(link: &'a Link<N>, out: &mut Vec<&'a N>) {
    if let Some(node) = link {
        inorder(node.left(), out);
        out.push(node);
        inorder(node.right(), out);
    }
}

pub fn postorder<'a, N: Balanced>(link: &'a Link<N>, out: &mut Vec<&'a N>) {
    if let Some(node) = link {
        postorder(node.left(), out);
        postorder(node.right(), out);
        out.push(node);
    }
}

/// In-order walk restricted to keys in `[first, last]`. Subtrees that lie
/// entirely outside the interval are never entered.
pub fn range<'a, N: Balanced>(
    link: &'a Link<N>,
    first: &N::Key,
    last: &N::Key,
    out: &mut Vec<&'a N>,
) {
    if let Some(node) = link {
        let key = node.key();
        if key > first {
            range(node.left(), first, last, out);
        }
        if key >= first && key <= last {
            out.push(node);
        }
        if key < last {
            range(node.right(), first, last, out);
        }
    }
}

/// Check ordering, cached heights and balance of every node.
/// Returns the height of the subtree on success.
pub fn validate<N: Balanced>(link: &Link<N>) -> Result<i32, String> {
    validate_within(link, None, None)
}

fn validate_within<N: Balanced>(
    link: &Link<N>,
    lower: Option<&N::Key>,
    upper: Option<&N::Key>,
) -> Result<i32, String> {
    let Some(node) = link else {
        return Ok(-1);
    };

    if lower.is_some_and(|lower| node.key() <= lower) {
        return Err("key is not greater than its left ancestor".to_string());
    }
    if upper.is_some_and(|upper| node.key() >= upper) {
        return Err("key is not smaller than its right ancestor".to_string());
    }

    let left = validate_within(node.left(), lower, Some(node.key()))?;
    let right = validate_within(node.right(), Some(node.key()), upper)?;
    let expected = 1 + max(left, right);

    if node.height() != expected {
        return Err(format!("cached height {} but subtree height is {}", node.height(), expected));
    }
    if (right - left).abs() > 1 {
        return Err(format!("balance factor {} out of range", right - left));
    }

    Ok(expected)
}

/// A node of the general purpose [`AvlTree`].
pub struct Node<K, V> {
    key: K,
    value: V,
    height: i32,
    left: Link<Node<K, V>>,
    right: Link<Node<K, V>>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node {
            key,
            value,
            height: 0,
            left: None,
            right: None,
        }
    }
}

impl<K: Ord, V> Balanced for Node<K, V> {
    type Key = K;

    fn key(&self) -> &K {
        &self.key
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_height(&mut self, height: i32) {
        self.height = height;
    }

    fn left(&self) -> &Link<Self> {
        &self.left
    }

    fn right(&self) -> &Link<Self> {
        &self.right
    }

    fn left_mut(&mut self) -> &mut Link<Self> {
        &mut self.left
    }

    fn right_mut(&mut self) -> &mut Link<Self> {
        &mut self.right
    }
}

/// An ordered map backed by an AVL tree, with removal.
///
/// The stats tree never deletes; this is the general variant for callers
/// that need the full set of map operations.
pub struct AvlTree<K, V> {
    root: Link<Node<K, V>>,
    len: usize,
}

impl<K: Ord, V> AvlTree<K, V> {
    pub fn new() -> Self {
        AvlTree { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the whole tree, -1 when empty.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        find(&self.root, key).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            };
        }
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        find(&self.root, key).is_some()
    }

    /// Insert a key, returning the previous value if the key was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        let (root, rejected) = insert(self.root.take(), Box::new(Node::new(key, value)));
        debug_assert!(rejected.is_none());
        self.root = Some(root);
        self.len += 1;
        None
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let (root, removed) = remove(self.root.take(), key);
        self.root = root;
        let removed = removed?;
        self.len -= 1;
        Some(removed.value)
    }

    fn pairs<'a>(nodes: Vec<&'a Node<K, V>>) -> Vec<(&'a K, &'a V)> {
        nodes.into_iter().map(|node| (&node.key, &node.value)).collect()
    }

    pub fn preorder(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.len);
        preorder(&self.root, &mut out);
        Self::pairs(out)
    }

    /// Entries in ascending key order.
    pub fn inorder(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.len);
        inorder(&self.root, &mut out);
        Self::pairs(out)
    }

    pub fn postorder(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.len);
        postorder(&self.root, &mut out);
        Self::pairs(out)
    }

    pub fn validate(&self) -> Result<(), String> {
        validate(&self.root).map(|_| ())
    }
}

impl<K: Ord, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(tree: &AvlTree<i32, i32>) -> Vec<i32> {
        tree.inorder().into_iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn empty_tree() {
        let tree: AvlTree<i32, ()> = AvlTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = AvlTree::new();
        for i in 0..7 {
            tree.insert(i, i * 10);
            tree.validate().unwrap();
        }
        // Seven ascending keys fill a perfect tree of height 2.
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.preorder()[0].0, &3);
    }

    #[test]
    fn double_rotations() {
        // right-left
        let mut tree = AvlTree::new();
        for key in [10, 30, 20] {
            tree.insert(key, ());
        }
        assert_eq!(tree.preorder()[0].0, &20);
        tree.validate().unwrap();

        // left-right
        let mut tree = AvlTree::new();
        for key in [30, 10, 20] {
            tree.insert(key, ());
        }
        assert_eq!(tree.preorder()[0].0, &20);
        tree.validate().unwrap();
    }

    #[test]
    fn insert_replaces_value() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.insert(1, "a"), None);
        assert_eq!(tree.insert(1, "b"), Some("a"));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&1), Some(&"b"));
    }

    #[test]
    fn remove_leaf_inner_and_root() {
        let mut tree = AvlTree::new();
        for key in [50, 30, 70, 20, 40, 60, 80, 35] {
            tree.insert(key, key);
        }

        assert_eq!(tree.remove(&20), Some(20));
        tree.validate().unwrap();
        assert_eq!(tree.remove(&30), Some(30));
        tree.validate().unwrap();
        assert_eq!(tree.remove(&50), Some(50));
        tree.validate().unwrap();
        assert_eq!(tree.remove(&50), None);

        assert_eq!(keys(&tree), vec![35, 40, 60, 70, 80]);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn remove_everything() {
        let mut tree = AvlTree::new();
        for key in 0..200 {
            tree.insert((key * 37) % 200, key);
        }
        for key in 0..200 {
            assert!(tree.remove(&key).is_some());
            tree.validate().unwrap();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn range_walk_prunes_to_interval() {
        let mut tree = AvlTree::new();
        for key in (0..100).step_by(3) {
            tree.insert(key, ());
        }
        let mut out = Vec::new();
        range(&tree.root, &10, &20, &mut out);
        let found: Vec<i32> = out.into_iter().map(|node| node.key).collect();
        assert_eq!(found, vec![12, 15, 18]);
    }
}
