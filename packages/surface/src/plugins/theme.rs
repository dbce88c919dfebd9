use crate::context::RenderContext;
use crate::plugin::{Plugin, Provider};
use crate::vdom::VNode;
use proseline_schema::Theme;

/// Installs a theme for the render pass and paints the surface with it
#[derive(Debug, Clone)]
pub struct ThemeProvider {
    pub theme: Theme,
}

impl Provider for ThemeProvider {
    fn provide(&self, ctx: &mut RenderContext) {
        ctx.theme = self.theme.clone();
    }

    fn wrap(&self, surface: VNode, ctx: &RenderContext) -> VNode {
        VNode::element("div")
            .with_attr("data-theme", ctx.theme.primary_color.as_str())
            .with_style("color", ctx.theme.text_color())
            .with_style("background-color", ctx.theme.background_color())
            .with_style("font-family", ctx.theme.font_family())
            .with_child(surface)
    }
}

pub fn theme_plugin(theme: Theme) -> Plugin {
    Plugin::new("theme").provider(ThemeProvider { theme })
}
