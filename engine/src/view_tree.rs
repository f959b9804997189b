use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Ordered, duplicate-free list of style classes.
///
/// Order is kept so a class can be swapped in place (e.g. the position class of a tile) without
/// reshuffling the rest of the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for name in names {
            list.push(name);
        }
        list
    }

    pub fn push(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.contains(&name) {
            self.0.push(name);
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != name);
        self.0.len() != before
    }

    /// Replaces the class at `index`; out of range indices append instead.
    pub fn replace(&mut self, index: usize, name: impl Into<String>) {
        let name = name.into();
        match self.0.get_mut(index) {
            Some(slot) => *slot = name,
            None => self.push(name),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The space separated form used for a `class` attribute.
    pub fn to_attr(&self) -> String {
        self.0.join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ViewNode {
    classes: ClassList,
    text: Option<String>,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    restarts: u32,
}

impl ViewNode {
    fn new(parent: Option<NodeId>, classes: ClassList) -> Self {
        Self {
            classes,
            text: None,
            style: BTreeMap::new(),
            parent,
            children: Vec::new(),
            restarts: 0,
        }
    }
}

/// Retained tree of visual nodes for headless presentation and tests.
///
/// Removing a node drops its whole subtree, so every id stored in the tree is reachable from the
/// root.
#[derive(Debug, Clone)]
pub struct ViewTree {
    nodes: HashMap<NodeId, ViewNode>,
    root: NodeId,
    next_id: u32,
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTree {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, ViewNode::new(None, ClassList::new()));
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn classes(&self, id: NodeId) -> Option<&ClassList> {
        self.nodes.get(&id).map(|n| &n.classes)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).is_some_and(|c| c.contains(class))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).and_then(|n| n.text.as_deref())
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(&id)
            .and_then(|n| n.style.get(property))
            .map(String::as_str)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// How many times the node's animations were restarted.
    pub fn restart_count(&self, id: NodeId) -> u32 {
        self.nodes.get(&id).map(|n| n.restarts).unwrap_or(0)
    }

    /// All nodes carrying `class`, in document (pre-order) order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            if node.classes.contains(class) {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    pub fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.find_by_class(class).into_iter().next()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        // The root always exists.
        self.snapshot_of(self.root).unwrap_or_default()
    }

    pub fn snapshot_of(&self, id: NodeId) -> Option<ViewSnapshot> {
        let node = self.nodes.get(&id)?;
        Some(ViewSnapshot {
            classes: node.classes.iter().map(str::to_string).collect(),
            text: node.text.clone(),
            style: node.style.clone(),
            children: node
                .children
                .iter()
                .filter_map(|child| self.snapshot_of(*child))
                .collect(),
        })
    }

    pub(crate) fn insert(&mut self, parent: NodeId, classes: ClassList) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            tracing::trace!(parent = parent.0, "create under detached parent ignored");
            return id;
        };
        parent_node.children.push(id);
        self.nodes.insert(id, ViewNode::new(Some(parent), classes));
        id
    }

    pub(crate) fn detach(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.nodes.contains_key(&id) {
            return false;
        }
        if let Some(parent) = self.parent(id) {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|c| *c != id);
            }
        }
        self.drop_subtree(id);
        true
    }

    pub(crate) fn clear(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(&id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            self.drop_subtree(child);
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(&id)
    }

    fn drop_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
            }
        }
    }
}

impl ViewNode {
    pub(crate) fn classes_mut(&mut self) -> &mut ClassList {
        &mut self.classes
    }

    pub(crate) fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }

    pub(crate) fn set_style(&mut self, property: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.style.insert(property.to_string(), value.to_string());
            }
            None => {
                self.style.remove(property);
            }
        }
    }

    pub(crate) fn restart(&mut self) {
        self.restarts = self.restarts.wrapping_add(1);
    }
}

/// Id-free, serializable copy of a subtree; two trees that look the same compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewSnapshot>,
}

impl ViewSnapshot {
    /// Pre-order walk over this snapshot and all descendants.
    pub fn walk(&self) -> Vec<&ViewSnapshot> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
