use crate::utils::error::{Result, TripError};
use crate::view::components::Component;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write;
use std::rc::Rc;

pub type SharedView = Rc<RefCell<ViewTree>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPosition {
    AfterBegin,
    BeforeEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Root,
    Node(NodeId),
}

#[derive(Debug)]
struct Node {
    component: Component,
    parent: Option<Container>,
    children: Vec<NodeId>,
}

/// In-memory view tree with mount/unmount primitives.
///
/// Nodes are created detached, mounted into a container, and either detached (subtree kept
/// for re-mounting) or removed (subtree destroyed). Mounting an attached node moves it.
#[derive(Debug, Default)]
pub struct ViewTree {
    nodes: HashMap<NodeId, Node>,
    root: Vec<NodeId>,
    next_id: u64,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedView {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn create(&mut self, component: Component) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(
            id,
            Node {
                component,
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    /// Creates a node and mounts it in one step.
    pub fn mount(
        &mut self,
        component: Component,
        container: Container,
        position: RenderPosition,
    ) -> Result<NodeId> {
        let id = self.create(component);
        self.render(id, container, position)?;
        Ok(id)
    }

    pub fn render(&mut self, node: NodeId, container: Container, position: RenderPosition) -> Result<()> {
        self.ensure(node)?;
        if let Container::Node(parent) = container {
            self.ensure(parent)?;
            if parent == node || self.is_descendant(parent, node) {
                return Err(TripError::ValidationError {
                    message: format!("cannot mount node {} inside itself", node.0),
                });
            }
        }

        self.unlink(node);
        let siblings = self.siblings_mut(container);
        match position {
            RenderPosition::AfterBegin => siblings.insert(0, node),
            RenderPosition::BeforeEnd => siblings.push(node),
        }
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.parent = Some(container);
        }
        Ok(())
    }

    /// Unmounts `node` but keeps it and its subtree alive.
    pub fn detach(&mut self, node: NodeId) -> Result<()> {
        self.ensure(node)?;
        self.unlink(node);
        Ok(())
    }

    /// Unmounts `node` and releases it with its whole subtree.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        self.ensure(node)?;
        self.unlink(node);
        self.drop_subtree(node);
        Ok(())
    }

    /// Swaps `old` for a new node built from `component`, at the same position.
    pub fn replace(&mut self, old: NodeId, component: Component) -> Result<NodeId> {
        self.ensure(old)?;
        let parent = self.nodes.get(&old).and_then(|n| n.parent);
        let id = self.create(component);

        if let Some(container) = parent {
            let siblings = self.siblings_mut(container);
            if let Some(index) = siblings.iter().position(|n| *n == old) {
                siblings[index] = id;
            }
            if let Some(entry) = self.nodes.get_mut(&id) {
                entry.parent = Some(container);
            }
            if let Some(entry) = self.nodes.get_mut(&old) {
                entry.parent = None;
            }
        }

        self.drop_subtree(old);
        Ok(id)
    }

    pub fn component(&self, node: NodeId) -> Option<&Component> {
        self.nodes.get(&node).map(|n| &n.component)
    }

    pub fn children(&self, container: Container) -> Vec<NodeId> {
        match container {
            Container::Root => self.root.clone(),
            Container::Node(id) => self
                .nodes
                .get(&id)
                .map(|n| n.children.clone())
                .unwrap_or_default(),
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// True when `node` is reachable from the root.
    pub fn is_mounted(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            match self.nodes.get(&current).and_then(|n| n.parent) {
                Some(Container::Root) => return true,
                Some(Container::Node(parent)) => current = parent,
                None => return false,
            }
        }
    }

    /// Indented text rendering of the mounted tree.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for id in &self.root {
            self.write_outline(&mut out, *id, 0);
        }
        out
    }

    fn write_outline(&self, out: &mut String, id: NodeId, depth: usize) {
        if let Some(node) = self.nodes.get(&id) {
            let _ = writeln!(out, "{}{}", "  ".repeat(depth), node.component);
            for child in &node.children {
                self.write_outline(out, *child, depth + 1);
            }
        }
    }

    fn ensure(&self, node: NodeId) -> Result<()> {
        if self.nodes.contains_key(&node) {
            Ok(())
        } else {
            Err(TripError::NodeNotFound { node: node.0 })
        }
    }

    fn is_descendant(&self, candidate: NodeId, ancestor: NodeId) -> bool {
        let mut current = candidate;
        while let Some(Container::Node(parent)) = self.nodes.get(&current).and_then(|n| n.parent) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    fn siblings_mut(&mut self, container: Container) -> &mut Vec<NodeId> {
        match container {
            Container::Root => &mut self.root,
            Container::Node(id) => match self.nodes.get_mut(&id) {
                Some(node) => &mut node.children,
                // Callers check the container exists first.
                None => &mut self.root,
            },
        }
    }

    fn unlink(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(&node).and_then(|n| n.parent.take()) else {
            return;
        };
        self.siblings_mut(parent).retain(|n| *n != node);
    }

    fn drop_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(removed) = self.nodes.remove(&id) {
                stack.extend(removed.children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_list() -> (ViewTree, NodeId) {
        let mut tree = ViewTree::new();
        let list = tree
            .mount(Component::TripList, Container::Root, RenderPosition::BeforeEnd)
            .unwrap();
        (tree, list)
    }

    #[test]
    fn test_positions() {
        let (mut tree, list) = tree_with_list();
        let a = tree
            .mount(Component::FirstMessage, Container::Node(list), RenderPosition::BeforeEnd)
            .unwrap();
        let b = tree
            .mount(Component::FirstMessage, Container::Node(list), RenderPosition::AfterBegin)
            .unwrap();
        assert_eq!(tree.children(Container::Node(list)), vec![b, a]);
    }

    #[test]
    fn test_remove_releases_subtree() {
        let (mut tree, list) = tree_with_list();
        let child = tree
            .mount(Component::FirstMessage, Container::Node(list), RenderPosition::BeforeEnd)
            .unwrap();

        tree.remove(list).unwrap();
        assert!(!tree.contains(list));
        assert!(!tree.contains(child));
        assert!(tree.children(Container::Root).is_empty());
        assert!(matches!(tree.remove(list), Err(TripError::NodeNotFound { .. })));
    }

    #[test]
    fn test_detach_keeps_subtree_for_remount() {
        let (mut tree, list) = tree_with_list();
        let child = tree
            .mount(Component::FirstMessage, Container::Node(list), RenderPosition::BeforeEnd)
            .unwrap();

        tree.detach(list).unwrap();
        assert!(!tree.is_mounted(child));
        assert!(tree.contains(child));

        tree.render(list, Container::Root, RenderPosition::BeforeEnd).unwrap();
        assert!(tree.is_mounted(child));
    }

    #[test]
    fn test_render_moves_attached_node() {
        let mut tree = ViewTree::new();
        let first = tree
            .mount(Component::TripList, Container::Root, RenderPosition::BeforeEnd)
            .unwrap();
        let second = tree
            .mount(Component::FirstMessage, Container::Root, RenderPosition::BeforeEnd)
            .unwrap();

        tree.render(first, Container::Root, RenderPosition::BeforeEnd).unwrap();
        assert_eq!(tree.children(Container::Root), vec![second, first]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let (mut tree, list) = tree_with_list();
        let a = tree
            .mount(Component::FirstMessage, Container::Node(list), RenderPosition::BeforeEnd)
            .unwrap();
        let b = tree
            .mount(Component::FirstMessage, Container::Node(list), RenderPosition::BeforeEnd)
            .unwrap();

        let replaced = tree.replace(a, Component::TripList).unwrap();
        assert_eq!(tree.children(Container::Node(list)), vec![replaced, b]);
        assert!(!tree.contains(a));
        assert_eq!(tree.component(replaced), Some(&Component::TripList));
    }

    #[test]
    fn test_cannot_mount_into_own_subtree() {
        let (mut tree, list) = tree_with_list();
        let child = tree
            .mount(Component::TripList, Container::Node(list), RenderPosition::BeforeEnd)
            .unwrap();
        assert!(tree.render(list, Container::Node(child), RenderPosition::BeforeEnd).is_err());
    }

    #[test]
    fn test_outline_indents_children() {
        let (mut tree, list) = tree_with_list();
        tree.mount(Component::FirstMessage, Container::Node(list), RenderPosition::BeforeEnd)
            .unwrap();
        let outline = tree.outline();
        assert!(outline.starts_with("trip-list\n  message:"));
    }
}
