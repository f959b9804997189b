use engine::{ClassList, NodeId, Surface};

/// Node ids of the host page's static layout.
///
/// Building the page is the host's job; the actuator only ever writes into these nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mount {
    /// Receives page-wide tint classes.
    pub page: NodeId,
    pub tile_container: NodeId,
    pub score_container: NodeId,
    pub best_container: NodeId,
    pub message_container: NodeId,
    pub message_text: NodeId,
    /// Parent for the forced dialog, the penalty overlay and merge messages.
    pub overlay_host: NodeId,
}

impl Mount {
    /// Builds the standard page layout under the surface root.
    pub fn scaffold<S: Surface>(surface: &mut S) -> Self {
        let page = surface.root();
        let container = surface.create_node(page, ClassList::from_names(["container"]));

        let scores = surface.create_node(container, ClassList::from_names(["scores-container"]));
        let score_container =
            surface.create_node(scores, ClassList::from_names(["score-container"]));
        let best_container = surface.create_node(scores, ClassList::from_names(["best-container"]));

        let game = surface.create_node(container, ClassList::from_names(["game-container"]));
        let message_container = surface.create_node(game, ClassList::from_names(["game-message"]));
        let message_text = surface.create_node(message_container, ClassList::new());
        let tile_container = surface.create_node(game, ClassList::from_names(["tile-container"]));

        Self {
            page,
            tile_container,
            score_container,
            best_container,
            message_container,
            message_text,
            overlay_host: container,
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::ViewTree;

    use super::*;

    #[test]
    fn scaffold_wires_every_container() {
        let mut tree = ViewTree::new();
        let mount = Mount::scaffold(&mut tree);

        assert_eq!(mount.page, tree.root());
        assert!(tree.has_class(mount.tile_container, "tile-container"));
        assert!(tree.has_class(mount.score_container, "score-container"));
        assert!(tree.has_class(mount.best_container, "best-container"));
        assert!(tree.has_class(mount.message_container, "game-message"));
        assert_eq!(tree.parent(mount.message_text), Some(mount.message_container));
        assert!(tree.has_class(mount.overlay_host, "container"));
    }
}
