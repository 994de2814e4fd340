use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use derivative::Derivative;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A node of the Huffman tree.
///
/// Nodes order by weight first and then by the order in which they entered
/// the work queue, so that equal weights are merged oldest-first.
#[derive(Debug, Clone, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
pub struct Node {
    weight: u64,

    order: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    kind: NodeKind,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf(u8),
    Internal { left: Box<Node>, right: Box<Node> },
}

impl Node {
    fn new(symbol: u8, weight: u64, order: usize) -> Self {
        Self {
            weight,
            order,
            kind: NodeKind::Leaf(symbol),
        }
    }

    fn from_children(left: Node, right: Node, order: usize) -> Self {
        Self {
            weight: left.weight + right.weight,
            order,
            kind: NodeKind::Internal {
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// The byte value of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Leaf(s) => Some(s),
            NodeKind::Internal { .. } => None,
        }
    }

    /// `(left, right)` of an internal node, `None` for leaves.
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { left, right } => Some((left, right)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves are queued in ascending byte order. A merged node is queued
    /// after everything already pending, so it loses ties against older
    /// nodes of the same weight. The first node taken becomes the left child.
    pub fn build(freq: &FrequencyTable) -> Result<Self> {
        let distinct = freq.distinct();
        if distinct < 2 {
            return Err(Error::InsufficientAlphabet { distinct });
        }

        let mut pq: BinaryHeap<_> = freq
            .iter()
            .enumerate()
            .map(|(order, (s, count))| Reverse(Node::new(s, count, order)))
            .collect();
        let mut next_order = pq.len();

        let root = loop {
            let Some(Reverse(left)) = pq.pop() else {
                return Err(Error::InsufficientAlphabet { distinct: 0 });
            };
            let Some(Reverse(right)) = pq.pop() else {
                break left;
            };

            pq.push(Reverse(Node::from_children(left, right, next_order)));
            next_order += 1;
        };

        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub(crate) fn into_root(self) -> Node {
        self.root
    }
}
