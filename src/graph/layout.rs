//! Deterministic grid placement for visualization. Nothing else in the
//! pipeline depends on positions; there is no force-directed adjustment.

use crate::model::{Node, NodeRole, Position};

const COLUMNS: i32 = 5;
const H_SPACING: i32 = 260;
const V_SPACING: i32 = 140;
const BUCKET_GAP: i32 = 80;

/// Display order for role buckets; roles not listed are appended last.
const ROLE_ORDER: &[NodeRole] = &[
    NodeRole::Type,
    NodeRole::Interface,
    NodeRole::Context,
    NodeRole::Hook,
    NodeRole::Component,
    NodeRole::Api,
    NodeRole::Function,
    NodeRole::Class,
    NodeRole::File,
];

/// Assign grid coordinates to every node, grouped and ordered by role,
/// left-to-right then top-to-bottom within each bucket.
pub fn assign_positions(nodes: &mut [Node]) {
    let mut y_cursor = 0i32;

    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); ROLE_ORDER.len() + 1];
    for (i, node) in nodes.iter().enumerate() {
        let bucket = ROLE_ORDER
            .iter()
            .position(|r| *r == node.role)
            .unwrap_or(ROLE_ORDER.len());
        buckets[bucket].push(i);
    }

    for bucket in buckets {
        if bucket.is_empty() {
            continue;
        }
        let mut rows = 0i32;
        for (slot, node_idx) in bucket.iter().enumerate() {
            let col = (slot as i32) % COLUMNS;
            let row = (slot as i32) / COLUMNS;
            nodes[*node_idx].position = Position {
                x: col * H_SPACING,
                y: y_cursor + row * V_SPACING,
            };
            rows = row + 1;
        }
        y_cursor += rows * V_SPACING + BUCKET_GAP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    fn node(path: &str, role: NodeRole) -> Node {
        let mut n = Node::new(path);
        n.set_role(role);
        n
    }

    #[test]
    fn fills_rows_of_five_within_a_bucket() {
        let mut nodes: Vec<Node> = (0..7)
            .map(|i| node(&format!("src/c{}.tsx", i), NodeRole::Component))
            .collect();
        assign_positions(&mut nodes);

        assert_eq!(nodes[0].position, Position { x: 0, y: 0 });
        assert_eq!(nodes[4].position, Position { x: 4 * H_SPACING, y: 0 });
        assert_eq!(nodes[5].position, Position { x: 0, y: V_SPACING });
        assert_eq!(nodes[6].position, Position { x: H_SPACING, y: V_SPACING });
    }

    #[test]
    fn buckets_stack_vertically_in_role_order() {
        let mut nodes = vec![
            node("src/App.tsx", NodeRole::Component),
            node("src/types.ts", NodeRole::Type),
        ];
        assign_positions(&mut nodes);

        // Types come first in display order, components after the gap.
        assert_eq!(nodes[1].position.y, 0);
        assert_eq!(nodes[0].position.y, V_SPACING + BUCKET_GAP);
    }

    #[test]
    fn placement_is_deterministic() {
        let build = || {
            let mut nodes = vec![
                node("src/a.ts", NodeRole::Function),
                node("src/b.tsx", NodeRole::Component),
                node("src/c.ts", NodeRole::Type),
            ];
            assign_positions(&mut nodes);
            nodes.iter().map(|n| n.position).collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }
}
