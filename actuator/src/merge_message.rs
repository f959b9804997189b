use engine::{ClassList, NodeId, Surface};

use crate::rainbow::Rainbow;

pub const MERGE_MESSAGE_CLASS: &str = "merge-message";

/// Appends a floating rainbow message under `host`. The caller schedules `expire`.
pub fn show<S: Surface>(surface: &mut S, host: NodeId, text: &str) -> NodeId {
    let node = surface.create_node(host, ClassList::from_names([MERGE_MESSAGE_CLASS]));
    Rainbow::MERGE_MESSAGE.write(surface, node, text);
    node
}

/// Removes a merge message once its animation has run. Already gone is fine.
pub fn expire<S: Surface>(surface: &mut S, node: NodeId) {
    if surface.remove_node(node) {
        tracing::trace!(node = node.0, "merge message expired");
    }
}

#[cfg(test)]
mod tests {
    use engine::ViewTree;

    use super::*;

    #[test]
    fn message_is_spelled_out_in_rainbow_spans() {
        let mut tree = ViewTree::new();
        let root = tree.root();
        let node = show(&mut tree, root, "Nice!");

        let spans = tree.children(node);
        assert_eq!(spans.len(), 5);
        assert_eq!(tree.text(spans[4]), Some("!"));
        assert_eq!(tree.style(spans[1], "animation-delay"), Some("50ms"));
    }

    #[test]
    fn expire_is_idempotent() {
        let mut tree = ViewTree::new();
        let root = tree.root();
        let node = show(&mut tree, root, "2048");

        expire(&mut tree, node);
        expire(&mut tree, node);
        assert!(tree.find_by_class(MERGE_MESSAGE_CLASS).is_empty());
        assert_eq!(tree.len(), 1);
    }
}
