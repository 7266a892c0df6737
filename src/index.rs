// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! The per-country, per-metric date index.
//!
//! A [`BalancedIndex`] is an AVL tree of [`StatNode`]s keyed by date. The
//! first node inserted fixes the identity of the tree: every later node must
//! carry the same metric kind and the same country. Stats history is
//! append-only, so there is no point deletion.

use chrono::NaiveDate;
use tracing::debug;

use crate::avl;
use crate::avl::Balanced;
use crate::avl::Link;
use crate::error::Error;
use crate::error::Result;
use crate::metric::MetricKind;
use crate::node::StatNode;
use crate::statistic::VirusStatistic;

#[derive(Debug, Default)]
pub struct BalancedIndex {
    root: Link<StatNode>,
    len: usize,
}

impl BalancedIndex {
    pub fn new() -> Self {
        BalancedIndex { root: None, len: 0 }
    }

    /// Start a tree whose identity is taken from `root`.
    pub fn with_root(root: StatNode) -> Self {
        BalancedIndex {
            root: Some(Box::new(root)),
            len: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree in edges; -1 when empty.
    pub fn height(&self) -> i32 {
        avl::height(&self.root)
    }

    /// The metric every node of this tree holds, once a node exists.
    pub fn kind(&self) -> Option<MetricKind> {
        self.root.as_ref().map(|root| root.kind())
    }

    pub fn country(&self) -> Option<&str> {
        self.root.as_ref().map(|root| root.country())
    }

    /// Insert a reading.
    ///
    /// Rejects nodes whose metric or country disagree with the root, and
    /// dates that are already present. A rejected insert leaves the tree
    /// exactly as it was.
    pub fn insert(&mut self, node: StatNode) -> Result<()> {
        if let Some(root) = &self.root {
            if root.kind() != node.kind() {
                return Err(Error::TypeMismatch {
                    expected: root.kind(),
                    found: node.kind(),
                });
            }
            if root.country() != node.country() {
                return Err(Error::CountryMismatch {
                    expected: root.country().to_string(),
                    found: node.country().to_string(),
                });
            }
        }

        let (root, rejected) = avl::insert(self.root.take(), Box::new(node));
        self.root = Some(root);

        if let Some(rejected) = rejected {
            debug!(date = %rejected.date(), country = rejected.country(), "duplicate date rejected");
            return Err(Error::DuplicateKey {
                date: rejected.date(),
            });
        }

        self.len += 1;
        Ok(())
    }

    /// Point lookup. A missing date is a normal outcome, not an error.
    pub fn get(&self, date: NaiveDate) -> Option<VirusStatistic> {
        avl::find(&self.root, &date).map(StatNode::to_statistic)
    }

    /// Every stored reading dated within `[first, last]`, oldest first.
    /// Days without a reading are skipped; an inverted interval is empty.
    pub fn between_dates(&self, first: NaiveDate, last: NaiveDate) -> Vec<VirusStatistic> {
        if first > last {
            return Vec::new();
        }
        let mut nodes = Vec::new();
        avl::range(&self.root, &first, &last, &mut nodes);
        Self::materialize(nodes)
    }

    /// Structural order: each node before its subtrees.
    pub fn preorder(&self) -> Vec<VirusStatistic> {
        let mut nodes = Vec::with_capacity(self.len);
        avl::preorder(&self.root, &mut nodes);
        Self::materialize(nodes)
    }

    /// Chronological order.
    pub fn inorder(&self) -> Vec<VirusStatistic> {
        let mut nodes = Vec::with_capacity(self.len);
        avl::inorder(&self.root, &mut nodes);
        Self::materialize(nodes)
    }

    pub fn postorder(&self) -> Vec<VirusStatistic> {
        let mut nodes = Vec::with_capacity(self.len);
        avl::postorder(&self.root, &mut nodes);
        Self::materialize(nodes)
    }

    /// The readings alone, oldest first.
    pub fn values(&self) -> Vec<i64> {
        let mut nodes = Vec::with_capacity(self.len);
        avl::inorder(&self.root, &mut nodes);
        nodes.into_iter().map(StatNode::value).collect()
    }

    /// Earliest and latest stored dates.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut first = self.root.as_deref()?;
        while let Some(left) = first.left().as_deref() {
            first = left;
        }
        let mut last = self.root.as_deref()?;
        while let Some(right) = last.right().as_deref() {
            last = right;
        }
        Some((first.date(), last.date()))
    }

    /// Stats history is append-only.
    pub fn delete(&mut self, _date: NaiveDate) -> Result<()> {
        Err(Error::UnsupportedOperation("delete"))
    }

    /// Check the search-tree, balance and identity invariants.
    pub fn validate(&self) -> std::result::Result<(), String> {
        avl::validate(&self.root)?;
        let (Some(kind), Some(country)) = (self.kind(), self.country()) else {
            return Ok(());
        };
        let mut nodes = Vec::with_capacity(self.len);
        avl::preorder(&self.root, &mut nodes);
        if nodes.len() != self.len {
            return Err(format!("tracked {} nodes but found {}", self.len, nodes.len()));
        }
        match nodes.iter().find(|node| node.kind() != kind || node.country() != country) {
            Some(node) => Err(format!("node dated {} does not match the root identity", node.date())),
            None => Ok(()),
        }
    }

    fn materialize(nodes: Vec<&StatNode>) -> Vec<VirusStatistic> {
        nodes.into_iter().map(StatNode::to_statistic).collect()
    }
}
