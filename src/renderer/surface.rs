use crate::app::AtomResult;

/// Platform-neutral description of one drawable node: a tag plus attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeNode {
    pub tag: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub text: Option<String>,
}

impl ShapeNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attributes.push((name, value.to_string()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A container that shape nodes can be attached to.
pub trait Surface {
    type Node: Clone;

    /// Identifies the container across queries, so per-container state survives
    /// the surface being dropped and looked up again.
    fn key(&self) -> String;

    /// Removes everything previously attached to the container.
    fn clear(&mut self) -> AtomResult<()>;

    /// Creates `shape` and appends it under `parent`, or under the container root.
    fn append(&mut self, parent: Option<&Self::Node>, shape: &ShapeNode)
    -> AtomResult<Self::Node>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> AtomResult<()>;
}

/// Resolves container selectors to surfaces.
pub trait ContainerProvider {
    type Container<'a>: Surface
    where
        Self: 'a;

    fn query(&mut self, selector: &str) -> Option<Self::Container<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lookup_returns_first_match() {
        let node = ShapeNode::new("circle").attr("r", 5.0_f32).attr("class", "dot");
        assert_eq!(node.attribute("r"), Some("5"));
        assert_eq!(node.attribute("class"), Some("dot"));
        assert_eq!(node.attribute("cx"), None);
    }
}
