//! Property tests for the mindmap tree <-> flat-row conversion.

use proptest::prelude::*;

use agent_learn::domain::mindmap::{flatten_bfs, rebuild_from_flat, MindmapNode};

/// Arbitrary labeled trees, bounded in depth and branching.
fn arb_tree() -> impl Strategy<Value = MindmapNode> {
    let leaf = "[a-z]{1,8}".prop_map(MindmapNode::new);
    leaf.prop_recursive(4, 64, 5, |inner| {
        ("[a-z]{1,8}", prop::collection::vec(inner, 0..5)).prop_map(|(label, children)| {
            let mut node = MindmapNode::new(label);
            node.children = children;
            node
        })
    })
}

proptest! {
    #[test]
    fn flatten_then_rebuild_is_identity(tree in arb_tree()) {
        let flat = flatten_bfs(&tree);
        let rebuilt = rebuild_from_flat(&flat).unwrap();
        prop_assert_eq!(rebuilt, tree);
    }

    #[test]
    fn flat_rows_reference_earlier_parents(tree in arb_tree()) {
        let flat = flatten_bfs(&tree);
        prop_assert_eq!(flat.len(), tree.node_count());
        prop_assert_eq!(flat[0].parent, None);
        for row in &flat {
            if let Some(parent) = row.parent {
                prop_assert!(parent < row.id);
            }
        }
    }

    #[test]
    fn exactly_one_root_row(tree in arb_tree()) {
        let flat = flatten_bfs(&tree);
        prop_assert_eq!(flat.iter().filter(|r| r.parent.is_none()).count(), 1);
    }
}
