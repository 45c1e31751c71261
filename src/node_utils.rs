use crate::parser::NodeRef;
use crate::utils::content_len;

/// Attribute and text helpers implemented on [`NodeRef`].
///
/// This trait is automatically in scope when you import from
/// [`crate::parser`].
pub trait NodeExt {
    /// Look up an attribute by name and return its value, or `None` if the
    /// attribute is absent or this is not an element node.
    fn attr_value(&self, name: &str) -> Option<String>;

    /// The `id` attribute, lowercased.
    fn lowercase_id(&self) -> Option<String>;

    /// The class tokens concatenated *without* a separator and lowercased,
    /// so `class="main Content"` yields `"maincontent"`.  A marker may
    /// therefore match across two adjacent class names.
    fn joined_classes(&self) -> Option<String>;

    /// Length of the node's text content in characters, with whitespace
    /// runs collapsed and the ends trimmed.
    fn text_len(&self) -> usize;
}

impl NodeExt for NodeRef {
    fn attr_value(&self, name: &str) -> Option<String> {
        self.as_element()
            .and_then(|e| e.attributes.borrow().get(name).map(|v| v.to_string()))
    }

    fn lowercase_id(&self) -> Option<String> {
        self.attr_value("id").map(|id| id.to_lowercase())
    }

    fn joined_classes(&self) -> Option<String> {
        self.attr_value("class")
            .map(|class| class.split_whitespace().collect::<String>().to_lowercase())
    }

    fn text_len(&self) -> usize {
        content_len(self.text_contents().as_str())
    }
}
