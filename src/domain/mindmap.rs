//! Labeled mindmap trees.
//!
//! Trees are acyclic by construction: children are always freshly created by
//! the generator and spliced in structurally, never re-attached from another
//! part of the tree. Attachment is by node reference, not by label lookup, so
//! duplicate labels are harmless.

use serde::{Deserialize, Serialize};

/// One node of a mindmap. Owns its children exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindmapNode {
    pub label: String,
    #[serde(default)]
    pub children: Vec<MindmapNode>,
}

impl MindmapNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MindmapNode::node_count).sum::<usize>()
    }

    /// Height of this subtree; a leaf has height 1.
    pub fn height(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(MindmapNode::height)
            .max()
            .unwrap_or(0)
    }
}

/// A fully generated mindmap: root node plus the depth bound it was
/// expanded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mindmap {
    pub root: MindmapNode,
    pub depth: u32,
}

impl Mindmap {
    pub fn new(root: MindmapNode, depth: u32) -> Self {
        Self { root, depth }
    }

    /// True when generation produced no subtopics at all.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

/// A node row produced by breadth-first flattening: local sequential id plus
/// the parent's (already assigned) id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatNode {
    pub id: usize,
    pub label: String,
    pub parent: Option<usize>,
}

/// Flattens a tree breadth-first, assigning each node a sequential id before
/// any of its children are visited. A child's parent id is therefore always
/// already assigned when the child's row is emitted, which is what lets a
/// store insert rows in order with valid parent references.
pub fn flatten_bfs(root: &MindmapNode) -> Vec<FlatNode> {
    let mut out = Vec::with_capacity(root.node_count());
    let mut queue: std::collections::VecDeque<(&MindmapNode, Option<usize>)> =
        std::collections::VecDeque::new();
    queue.push_back((root, None));

    while let Some((node, parent)) = queue.pop_front() {
        let id = out.len();
        out.push(FlatNode {
            id,
            label: node.label.clone(),
            parent,
        });
        for child in &node.children {
            queue.push_back((child, Some(id)));
        }
    }
    out
}

/// Rebuilds a tree from flat rows by parent id. Returns `None` when the rows
/// do not describe exactly one tree (no root, several roots, or a parent id
/// that never appears).
pub fn rebuild_from_flat(rows: &[FlatNode]) -> Option<MindmapNode> {
    use std::collections::HashMap;

    let mut roots = rows.iter().filter(|r| r.parent.is_none());
    let root_row = roots.next()?;
    if roots.next().is_some() {
        return None;
    }

    // children grouped by parent id, preserving row order
    let mut children: HashMap<usize, Vec<&FlatNode>> = HashMap::new();
    let ids: std::collections::HashSet<usize> = rows.iter().map(|r| r.id).collect();
    for row in rows {
        if let Some(parent) = row.parent {
            if !ids.contains(&parent) {
                return None;
            }
            children.entry(parent).or_default().push(row);
        }
    }

    fn build(row: &FlatNode, children: &HashMap<usize, Vec<&FlatNode>>) -> MindmapNode {
        let mut node = MindmapNode::new(row.label.clone());
        if let Some(kids) = children.get(&row.id) {
            for kid in kids {
                node.children.push(build(kid, children));
            }
        }
        node
    }

    Some(build(root_row, &children))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Full binary tree of the given height.
    fn binary_tree(label: &str, height: usize) -> MindmapNode {
        let mut node = MindmapNode::new(label);
        if height > 1 {
            node.children.push(binary_tree(&format!("{}L", label), height - 1));
            node.children.push(binary_tree(&format!("{}R", label), height - 1));
        }
        node
    }

    #[test]
    fn height_and_count_of_binary_tree() {
        let tree = binary_tree("r", 3);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.node_count(), 7);
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].children.len(), 2);
    }

    #[test]
    fn flatten_assigns_parent_ids_before_children() {
        let tree = binary_tree("r", 3);
        let flat = flatten_bfs(&tree);
        assert_eq!(flat.len(), 7);
        assert_eq!(flat[0].parent, None);
        for row in &flat {
            if let Some(parent) = row.parent {
                // BFS ids are assigned pre-visit, so parents precede children
                assert!(parent < row.id);
            }
        }
    }

    #[test]
    fn flatten_then_rebuild_is_isomorphic() {
        let tree = binary_tree("root", 4);
        let flat = flatten_bfs(&tree);
        let rebuilt = rebuild_from_flat(&flat).unwrap();
        assert_eq!(rebuilt, tree);
    }

    #[test]
    fn rebuild_rejects_multiple_roots() {
        let rows = vec![
            FlatNode { id: 0, label: "a".into(), parent: None },
            FlatNode { id: 1, label: "b".into(), parent: None },
        ];
        assert!(rebuild_from_flat(&rows).is_none());
    }

    #[test]
    fn rebuild_rejects_dangling_parent() {
        let rows = vec![
            FlatNode { id: 0, label: "a".into(), parent: None },
            FlatNode { id: 1, label: "b".into(), parent: Some(9) },
        ];
        assert!(rebuild_from_flat(&rows).is_none());
    }

    #[test]
    fn empty_mindmap_is_distinct_from_absent() {
        let map = Mindmap::new(MindmapNode::new("topic"), 2);
        assert!(map.is_empty());
        assert_eq!(map.root.label, "topic");
    }
}
