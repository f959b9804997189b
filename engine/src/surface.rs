use crate::view_tree::{ClassList, NodeId, ViewTree};

/// The presentation host as seen by game code.
///
/// This is the whole contract between:
/// - presentation logic (deciding which nodes exist and which classes they carry), and
/// - the host (a DOM, a retained GPU scene, or the headless `ViewTree` used in tests).
///
/// Every operation on an unknown or already detached node is a no-op. Hosts must never panic on a
/// stale id: deferred callbacks routinely outlive the nodes they were scheduled for.
pub trait Surface {
    fn root(&self) -> NodeId;

    /// Appends a new node as the last child of `parent`.
    fn create_node(&mut self, parent: NodeId, classes: ClassList) -> NodeId;

    /// Detaches `id` and its subtree. Returns `false` if it was already gone.
    fn remove_node(&mut self, id: NodeId) -> bool;

    fn clear_children(&mut self, id: NodeId);

    fn set_classes(&mut self, id: NodeId, classes: &ClassList);
    fn add_class(&mut self, id: NodeId, class: &str);
    fn remove_class(&mut self, id: NodeId, class: &str);

    fn set_text(&mut self, id: NodeId, text: &str);
    fn set_style(&mut self, id: NodeId, property: &str, value: Option<&str>);

    /// Forces the host to restart any running animation on `id` (a reflow on the web).
    fn restart_animation(&mut self, id: NodeId);

    fn is_attached(&self, id: NodeId) -> bool;

    fn create_text_node(&mut self, parent: NodeId, classes: ClassList, text: &str) -> NodeId {
        let id = self.create_node(parent, classes);
        self.set_text(id, text);
        id
    }
}

impl Surface for ViewTree {
    fn root(&self) -> NodeId {
        ViewTree::root(self)
    }

    fn create_node(&mut self, parent: NodeId, classes: ClassList) -> NodeId {
        self.insert(parent, classes)
    }

    fn remove_node(&mut self, id: NodeId) -> bool {
        self.detach(id)
    }

    fn clear_children(&mut self, id: NodeId) {
        self.clear(id);
    }

    fn set_classes(&mut self, id: NodeId, classes: &ClassList) {
        if let Some(node) = self.node_mut(id) {
            *node.classes_mut() = classes.clone();
        }
    }

    fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes_mut().push(class);
        }
    }

    fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes_mut().remove(class);
        }
    }

    fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(node) = self.node_mut(id) {
            node.set_text(text);
        }
    }

    fn set_style(&mut self, id: NodeId, property: &str, value: Option<&str>) {
        if let Some(node) = self.node_mut(id) {
            node.set_style(property, value);
        }
    }

    fn restart_animation(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.restart();
        }
    }

    fn is_attached(&self, id: NodeId) -> bool {
        self.contains(id)
    }
}
