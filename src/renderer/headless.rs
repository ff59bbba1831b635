use crate::app::{AtomError, AtomResult};
use crate::renderer::surface::{ContainerProvider, ShapeNode, Surface};

/// Slot index plus the generation it was issued in; a cleared node's handle
/// stops resolving once its slot is reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Clone, Debug)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

/// Minimal in-memory element tree standing in for a browser document.
///
/// Supports the selector forms `#id`, `.class` and bare tag names, which is all
/// a container lookup needs.
#[derive(Clone, Debug)]
pub struct HeadlessDocument {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDocument {
    pub fn new() -> Self {
        let body = NodeData {
            tag: "body".to_owned(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                data: Some(body),
            }],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Appends an empty `<div id="...">` to the body.
    pub fn add_container(&mut self, id: &str) -> NodeId {
        let node = ShapeNode::new("div").attr("id", id);
        self.insert(self.root, &node)
    }

    pub fn insert(&mut self, parent: NodeId, shape: &ShapeNode) -> NodeId {
        let data = NodeData {
            tag: shape.tag.to_owned(),
            attributes: shape
                .attributes
                .iter()
                .map(|(name, value)| ((*name).to_owned(), value.clone()))
                .collect(),
            text: shape.text.clone(),
            children: Vec::new(),
        };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.data = Some(data);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    data: Some(data),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        };
        if let Some(parent) = self.data_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.data(node).map(|data| data.tag.as_str())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.data(node)?
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.data(node)
            .map(|data| data.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.data(node).is_some()
    }

    /// First node in document order matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.select_all(self.root, selector).into_iter().next()
    }

    /// Descendants of `scope` (excluding `scope`) matching `selector`, in document order.
    pub fn select_all(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.matches(node, selector) {
                found.push(node);
            }
            stack.extend(self.children(node).iter().rev());
        }
        found
    }

    /// Serializes the children of `node`, like `innerHTML`.
    pub fn inner_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(node) {
            self.write_markup(child, &mut out);
        }
        out
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.attribute(node, "id") == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.attribute(node, "class")
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
        } else {
            self.tag(node) == Some(selector)
        }
    }

    fn remove_children(&mut self, node: NodeId) {
        let mut stack = match self.data_mut(node) {
            Some(data) => std::mem::take(&mut data.children),
            None => return,
        };
        while let Some(child) = stack.pop() {
            let Some(slot) = self.slots.get_mut(child.index) else {
                continue;
            };
            if slot.generation != child.generation {
                continue;
            }
            if let Some(data) = slot.data.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(child.index);
                stack.extend(data.children);
            }
        }
    }

    fn write_markup(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.data(node) else {
            return;
        };
        out.push('<');
        out.push_str(&data.tag);
        for (name, value) in &data.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value, true)));
        }
        if data.children.is_empty() && data.text.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &data.text {
            out.push_str(&escape(text, false));
        }
        for &child in &data.children {
            self.write_markup(child, out);
        }
        out.push_str(&format!("</{}>", data.tag));
    }

    fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.slots
            .get(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.data.as_ref())
    }

    fn data_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.slots
            .get_mut(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.data.as_mut())
    }
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// One container of a [`HeadlessDocument`], borrowed for a render call.
pub struct HeadlessContainer<'a> {
    document: &'a mut HeadlessDocument,
    root: NodeId,
}

impl HeadlessContainer<'_> {
    fn ensure(&self, node: NodeId) -> AtomResult<NodeId> {
        if self.document.contains(node) {
            Ok(node)
        } else {
            Err(AtomError::Surface(format!("node {node} is detached")))
        }
    }
}

impl Surface for HeadlessContainer<'_> {
    type Node = NodeId;

    fn key(&self) -> String {
        format!("node:{}", self.root)
    }

    fn clear(&mut self) -> AtomResult<()> {
        self.document.remove_children(self.root);
        Ok(())
    }

    fn append(&mut self, parent: Option<&NodeId>, shape: &ShapeNode) -> AtomResult<NodeId> {
        let parent = self.ensure(parent.copied().unwrap_or(self.root))?;
        Ok(self.document.insert(parent, shape))
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> AtomResult<()> {
        let data = self
            .document
            .data_mut(*node)
            .ok_or_else(|| AtomError::Surface(format!("node {node} is detached")))?;
        match data.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_owned(),
            None => data.attributes.push((name.to_owned(), value.to_owned())),
        }
        Ok(())
    }
}

impl ContainerProvider for HeadlessDocument {
    type Container<'a> = HeadlessContainer<'a>;

    fn query(&mut self, selector: &str) -> Option<HeadlessContainer<'_>> {
        let root = self.query_selector(selector)?;
        Some(HeadlessContainer {
            document: self,
            root,
        })
    }
}
