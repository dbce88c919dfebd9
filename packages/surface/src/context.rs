use proseline_editor::Selection;
use proseline_schema::{ElementRules, Path, Theme};

/// Values threaded through one render pass
///
/// The theme is passed explicitly instead of being looked up ambiently.
/// Without a theme provider it is [`Theme::default()`].
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub theme: Theme,
    pub selection: Option<Selection>,
    pub rules: ElementRules,
}

impl RenderContext {
    pub fn new(rules: ElementRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_selection(mut self, selection: Option<Selection>) -> Self {
        self.selection = selection;
        self
    }

    /// True when either selection endpoint lies inside the node at `path`
    pub fn is_selected(&self, path: &Path) -> bool {
        self.selection.as_ref().is_some_and(|selection| {
            [&selection.anchor, &selection.focus]
                .iter()
                .any(|point| path == &point.path || path.is_ancestor_of(&point.path))
        })
    }
}
