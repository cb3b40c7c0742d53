// tree.rs - Arena-backed phylogenetic tree structure
//
// Sampled trees arrive from an upstream collaborator already parsed; this
// module only provides the in-memory shape split extraction walks over.
// Nodes live in a flat arena and refer to each other by index, so the
// parent/child structure carries no owning cycles.

use std::collections::BTreeSet;

/// A single node in the arena. Leaf nodes carry a taxon name and have no
/// children; internal nodes may be unnamed.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: Option<String>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// A rooted tree over an arena of nodes. Index 0 is the root once any node
/// has been added.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a node under `parent` (`None` for the root) and return its index.
    pub fn add_node(&mut self, name: Option<&str>, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(TreeNode {
            name: name.map(|s| s.to_string()),
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p].children.push(index);
        }
        index
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<usize> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    pub fn node(&self, index: usize) -> &TreeNode {
        &self.nodes[index]
    }

    pub fn is_leaf(&self, index: usize) -> bool {
        self.nodes[index].children.is_empty()
    }

    /// Names of all leaves in the subtree rooted at `index`.
    pub fn leaves_of(&self, index: usize) -> BTreeSet<String> {
        let mut leaves = BTreeSet::new();
        let mut stack = vec![index];
        while let Some(n) = stack.pop() {
            let node = &self.nodes[n];
            if node.children.is_empty() {
                if let Some(name) = &node.name {
                    leaves.insert(name.clone());
                }
            } else {
                stack.extend(node.children.iter().copied());
            }
        }
        leaves
    }

    /// Names of all leaves in the tree.
    pub fn all_leaves(&self) -> BTreeSet<String> {
        match self.root() {
            Some(root) => self.leaves_of(root),
            None => BTreeSet::new(),
        }
    }

    /// Indices of the internal (non-leaf, non-root) nodes, each of which
    /// induces one non-trivial bipartition.
    pub fn internal_nodes(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&i| !self.nodes[i].children.is_empty() && self.nodes[i].parent.is_some())
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// ((A,B),(C,D)); builds the arena by hand the way upstream parsers do.
    pub fn four_leaf_tree() -> Tree {
        let mut t = Tree::new();
        let root = t.add_node(None, None);
        let left = t.add_node(None, Some(root));
        let right = t.add_node(None, Some(root));
        t.add_node(Some("A"), Some(left));
        t.add_node(Some("B"), Some(left));
        t.add_node(Some("C"), Some(right));
        t.add_node(Some("D"), Some(right));
        t
    }

    #[test]
    fn test_leaves_of_subtree() {
        let t = four_leaf_tree();
        let left = t.node(0).children[0];
        let leaves = t.leaves_of(left);
        assert_eq!(
            leaves.iter().cloned().collect::<Vec<_>>(),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn test_all_leaves() {
        let t = four_leaf_tree();
        assert_eq!(t.all_leaves().len(), 4);
        assert!(t.all_leaves().contains("D"));
    }

    #[test]
    fn test_internal_nodes_skip_root_and_leaves() {
        let t = four_leaf_tree();
        let internal = t.internal_nodes();
        assert_eq!(internal, vec![1, 2]);
    }

    #[test]
    fn test_empty_tree() {
        let t = Tree::new();
        assert!(t.is_empty());
        assert!(t.root().is_none());
        assert!(t.all_leaves().is_empty());
    }
}
