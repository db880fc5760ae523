use std::cmp::Ordering;

use itertools::Itertools;

use crate::frequency::FrequencyTable;

pub fn build_tree(frequencies: &FrequencyTable) -> Option<Tree> {
    Tree::new(frequencies)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// `None` when no symbol has a nonzero frequency.
    pub fn new(frequencies: &FrequencyTable) -> Option<Self> {
        let trees = Trees::from_iter(
            frequencies
                .iter_nonzero()
                .map(|(symbol, weight)| Node::leaf(symbol, weight)),
        );
        trees.merge().map(|root| Tree { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn weight(&self) -> u64 {
        self.root.weight
    }

    pub fn is_single_symbol(&self) -> bool {
        self.root.is_leaf()
    }
}

/// `symbol` is the smallest symbol among the node's leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    symbol: u8,
    weight: u64,
    children: Option<Box<Children>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Children {
    left: Node,
    right: Node,
}

impl Node {
    fn leaf(symbol: u8, weight: u64) -> Self {
        Node {
            symbol,
            weight,
            children: None,
        }
    }

    fn merge(left: Node, right: Node) -> Self {
        debug_assert!(left.comes_before(&right));
        Node {
            symbol: left.symbol.min(right.symbol),
            weight: left.weight + right.weight,
            children: Some(Box::new(Children { left, right })),
        }
    }

    pub fn symbol(&self) -> u8 {
        self.symbol
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn left(&self) -> Option<&Node> {
        self.children.as_ref().map(|children| &children.left)
    }

    pub fn right(&self) -> Option<&Node> {
        self.children.as_ref().map(|children| &children.right)
    }

    pub fn children(&self) -> Option<(&Node, &Node)> {
        self.children
            .as_ref()
            .map(|children| (&children.left, &children.right))
    }

    pub fn comes_before(&self, other: &Node) -> bool {
        cmp_nodes(self, other) == Ordering::Less
    }
}

/// Weight ascending, ties broken by symbol ascending.
pub fn cmp_nodes(a: &Node, b: &Node) -> Ordering {
    a.weight
        .cmp(&b.weight)
        .then_with(|| a.symbol.cmp(&b.symbol))
}

fn cmp_tree_desc(a: &Node, b: &Node) -> Ordering {
    cmp_nodes(b, a)
}

struct Trees(Vec<Node>);

impl FromIterator<Node> for Trees {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        let sorted_trees = iter.into_iter().sorted_by(cmp_tree_desc).collect_vec();
        Self(sorted_trees)
    }
}

impl Trees {
    fn merge(mut self) -> Option<Node> {
        loop {
            let result = self.pop_lowest()?;
            match result {
                PopResult::TreesToMerge { left, right } => {
                    self.insert(Node::merge(left, right));
                }
                PopResult::Single(tree) => {
                    return Some(tree);
                }
            }
        }
    }

    fn pop_lowest(&mut self) -> Option<PopResult> {
        let left = self.0.pop()?;

        let item_result = match self.0.pop() {
            Some(right) => PopResult::TreesToMerge { left, right },
            None => PopResult::Single(left),
        };

        Some(item_result)
    }

    fn insert(&mut self, tree: Node) {
        self.0.push(tree);
        self.0.sort_unstable_by(cmp_tree_desc);
    }
}

enum PopResult {
    TreesToMerge { left: Node, right: Node },
    Single(Node),
}
