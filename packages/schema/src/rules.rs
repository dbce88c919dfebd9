use crate::node::Element;
use crate::registry::ElementType;
use std::collections::HashSet;

/// Session-level inline/void classification
///
/// Built once when a session is created (usually from plugin metadata) and
/// consulted by every command afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementRules {
    inline: HashSet<ElementType>,
    void: HashSet<ElementType>,
}

impl ElementRules {
    pub fn new(
        inline: impl IntoIterator<Item = ElementType>,
        void: impl IntoIterator<Item = ElementType>,
    ) -> Self {
        Self {
            inline: inline.into_iter().collect(),
            void: void.into_iter().collect(),
        }
    }

    pub fn is_inline(&self, element: &Element) -> bool {
        self.inline.contains(&element.kind)
    }

    pub fn is_void(&self, element: &Element) -> bool {
        self.void.contains(&element.kind)
    }

    pub fn is_inline_type(&self, kind: &ElementType) -> bool {
        self.inline.contains(kind)
    }

    pub fn is_void_type(&self, kind: &ElementType) -> bool {
        self.void.contains(kind)
    }
}

impl ElementRules {
    /// Link is inline, image is void
    pub fn standard() -> Self {
        Self::new([ElementType::Link], [ElementType::Image])
    }
}
