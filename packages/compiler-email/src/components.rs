//! # Email Components
//!
//! The email counterpart of the surface's element table: one component per
//! element type, producing email-safe markup (tables, inline styles,
//! literal list markers) from the element and its already-rendered content.

use crate::compiler::{escape_html, CompileError};
use proseline_schema::{Element, ElementType, Mark, Theme};
use proseline_styles::{email as styles, Style};
use std::collections::BTreeMap;
use std::fmt;

/// What a component sees about the element it renders
pub struct ComponentProps<'a> {
    pub element: &'a Element,
    /// Rendered children, in document order (empty for void elements)
    pub content: String,
    pub theme: &'a Theme,
    pub parent: Option<&'a Element>,
    /// Position among the parent's children
    pub index: usize,
}

type RenderFn = dyn Fn(&ComponentProps) -> Result<String, CompileError>;
type LeafFn = dyn Fn(String) -> String;

pub struct EmailComponent {
    render: Box<RenderFn>,
    pub is_void: bool,
    pub is_inline: bool,
    /// Table cells never get a block-style wrapper
    pub is_cell: bool,
}

impl EmailComponent {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&ComponentProps) -> Result<String, CompileError> + 'static,
    {
        Self {
            render: Box::new(render),
            is_void: false,
            is_inline: false,
            is_cell: false,
        }
    }

    pub fn void(mut self) -> Self {
        self.is_void = true;
        self
    }

    pub fn inline(mut self) -> Self {
        self.is_inline = true;
        self
    }

    pub fn cell(mut self) -> Self {
        self.is_cell = true;
        self
    }

    pub fn render(&self, props: &ComponentProps) -> Result<String, CompileError> {
        (self.render)(props)
    }
}

impl fmt::Debug for EmailComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailComponent")
            .field("is_void", &self.is_void)
            .field("is_inline", &self.is_inline)
            .field("is_cell", &self.is_cell)
            .finish_non_exhaustive()
    }
}

/// Element type to component, plus mark renderers in registration order
#[derive(Default)]
pub struct ComponentsMap {
    elements: BTreeMap<ElementType, EmailComponent>,
    leaves: Vec<(Mark, Box<LeafFn>)>,
}

impl ComponentsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component; replaces any earlier one for `kind`
    pub fn element(mut self, kind: ElementType, component: EmailComponent) -> Self {
        self.elements.insert(kind, component);
        self
    }

    /// Register a mark renderer; an override keeps the earlier position
    pub fn leaf<F>(mut self, mark: Mark, render: F) -> Self
    where
        F: Fn(String) -> String + 'static,
    {
        match self.leaves.iter_mut().find(|(existing, _)| *existing == mark) {
            Some(slot) => slot.1 = Box::new(render),
            None => self.leaves.push((mark, Box::new(render))),
        }
        self
    }

    pub fn get(&self, kind: &ElementType) -> Option<&EmailComponent> {
        self.elements.get(kind)
    }

    pub fn contains(&self, kind: &ElementType) -> bool {
        self.elements.contains_key(kind)
    }

    /// Apply every mark `is_set` reports, in registration order
    pub fn fold_marks(&self, content: String, is_set: impl Fn(Mark) -> bool) -> String {
        self.leaves
            .iter()
            .filter(|(mark, _)| is_set(*mark))
            .fold(content, |content, (_, render)| render(content))
    }

    /// Components for every built-in element type and mark
    pub fn standard() -> Self {
        Self::new()
            .element(ElementType::Paragraph, text_block("p", styles::paragraph_styles))
            .element(ElementType::HeadingOne, heading(1))
            .element(ElementType::HeadingTwo, heading(2))
            .element(ElementType::HeadingThree, heading(3))
            .element(
                ElementType::BlockQuote,
                text_block("blockquote", styles::block_quote_styles),
            )
            .element(ElementType::BulletedList, EmailComponent::new(list))
            .element(ElementType::NumberedList, EmailComponent::new(list))
            .element(ElementType::ListItem, EmailComponent::new(list_item))
            .element(ElementType::Link, EmailComponent::new(link).inline())
            .element(ElementType::Image, EmailComponent::new(image).void())
            .element(
                ElementType::LayoutContainer,
                EmailComponent::new(layout_container),
            )
            .element(
                ElementType::LayoutColumn,
                EmailComponent::new(layout_column).cell(),
            )
            .leaf(Mark::Bold, |s| format!("<strong>{}</strong>", s))
            .leaf(Mark::Italic, |s| format!("<em>{}</em>", s))
            .leaf(Mark::Underline, |s| format!("<u>{}</u>", s))
            .leaf(Mark::Strikethrough, |s| format!("<s>{}</s>", s))
            .leaf(Mark::Code, |s| {
                format!(
                    "<code style=\"font-family: monospace; background-color: #f3f4f6; padding: 0 2px;\">{}</code>",
                    s
                )
            })
    }
}

impl fmt::Debug for ComponentsMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentsMap")
            .field("elements", &self.elements.keys().collect::<Vec<_>>())
            .field(
                "leaves",
                &self.leaves.iter().map(|(m, _)| m).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// ` style="..."` for a non-empty style
pub(crate) fn style_attr(style: &Style) -> String {
    if style.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", escape_html(&style.to_css()))
    }
}

/// Email clients collapse empty blocks, so keep them one line tall
fn or_nbsp(content: &str) -> &str {
    if content.is_empty() {
        "&nbsp;"
    } else {
        content
    }
}

fn text_block(tag: &'static str, style: fn(Option<&Element>, &Theme) -> Style) -> EmailComponent {
    EmailComponent::new(move |props| {
        Ok(format!(
            "<{tag}{}>{}</{tag}>",
            style_attr(&style(Some(props.element), props.theme)),
            or_nbsp(&props.content),
        ))
    })
}

fn heading(level: u8) -> EmailComponent {
    EmailComponent::new(move |props| {
        let style = styles::heading_styles(level, Some(props.element), props.theme);
        Ok(format!(
            "<h{level}{}>{}</h{level}>",
            style_attr(&style),
            or_nbsp(&props.content),
        ))
    })
}

fn list(props: &ComponentProps) -> Result<String, CompileError> {
    Ok(format!(
        "<div{}>{}</div>",
        style_attr(&styles::list_styles(Some(props.element), props.theme)),
        props.content
    ))
}

fn list_item(props: &ComponentProps) -> Result<String, CompileError> {
    let prefix = match props.parent.map(|parent| &parent.kind) {
        Some(ElementType::NumberedList) => styles::number_prefix(props.index + 1),
        _ => styles::bullet_prefix(props.element.attrs.indent),
    };
    Ok(format!(
        "<p{}>{}{}</p>",
        style_attr(&styles::list_item_styles(Some(props.element), props.theme)),
        prefix,
        props.content
    ))
}

fn link(props: &ComponentProps) -> Result<String, CompileError> {
    let url = props
        .element
        .attrs
        .url
        .as_deref()
        .ok_or_else(|| CompileError::MissingAttribute {
            kind: props.element.kind.tag().to_string(),
            attribute: "url",
        })?;
    Ok(format!(
        "<a href=\"{}\" target=\"_blank\"{}>{}</a>",
        escape_html(url),
        style_attr(&styles::link_styles(props.theme)),
        props.content
    ))
}

fn image(props: &ComponentProps) -> Result<String, CompileError> {
    let attrs = &props.element.attrs;
    match attrs.url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => Ok(format!(
            "<img src=\"{}\" alt=\"{}\"{} />",
            escape_html(url),
            escape_html(attrs.alt.as_deref().unwrap_or_default()),
            style_attr(&styles::image_styles())
        )),
        None => Ok(format!(
            "<div data-image-placeholder=\"true\"{}></div>",
            style_attr(&styles::image_placeholder_styles())
        )),
    }
}

fn layout_container(props: &ComponentProps) -> Result<String, CompileError> {
    Ok(format!(
        "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\"{}><tr>{}</tr></table>",
        style_attr(&styles::layout_table_styles()),
        props.content
    ))
}

fn layout_column(props: &ComponentProps) -> Result<String, CompileError> {
    let count = props.parent.map_or(1, |parent| parent.children.len());
    let width = props
        .parent
        .and_then(|parent| parent.attrs.column_widths.as_ref())
        .and_then(|widths| widths.get(props.index));
    let width_attr = width
        .map(|width| format!(" width=\"{}\"", escape_html(width)))
        .unwrap_or_default();

    Ok(format!(
        "<td{}{}>{}</td>",
        width_attr,
        style_attr(&styles::layout_cell_styles(props.index, count)),
        props.content
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proseline_schema::Attributes;

    fn props<'a>(element: &'a Element, theme: &'a Theme, content: &str) -> ComponentProps<'a> {
        ComponentProps {
            element,
            content: content.to_string(),
            theme,
            parent: None,
            index: 0,
        }
    }

    #[test]
    fn test_later_registration_replaces() {
        let map = ComponentsMap::standard().element(
            ElementType::Paragraph,
            EmailComponent::new(|props| Ok(format!("<section>{}</section>", props.content))),
        );
        let theme = Theme::default();
        let element = Element::empty(ElementType::Paragraph);

        let html = map
            .get(&ElementType::Paragraph)
            .unwrap()
            .render(&props(&element, &theme, "x"))
            .unwrap();
        assert_eq!(html, "<section>x</section>");
    }

    #[test]
    fn test_mark_override_keeps_position() {
        let map = ComponentsMap::standard().leaf(Mark::Bold, |s| format!("<b>{}</b>", s));
        let folded = map.fold_marks("x".into(), |mark| matches!(mark, Mark::Bold | Mark::Italic));
        assert_eq!(folded, "<em><b>x</b></em>");
    }

    #[test]
    fn test_empty_text_block_keeps_height() {
        let map = ComponentsMap::standard();
        let theme = Theme::default();
        let element = Element::empty(ElementType::Paragraph);

        let html = map
            .get(&ElementType::Paragraph)
            .unwrap()
            .render(&props(&element, &theme, ""))
            .unwrap();
        assert!(html.ends_with(">&nbsp;</p>"));
    }

    #[test]
    fn test_image_without_url_is_a_placeholder() {
        let map = ComponentsMap::standard();
        let theme = Theme::default();
        let element = Element::empty(ElementType::Image).with_attrs(Attributes {
            url: Some(String::new()),
            ..Attributes::default()
        });

        let html = map
            .get(&ElementType::Image)
            .unwrap()
            .render(&props(&element, &theme, ""))
            .unwrap();
        assert!(html.starts_with("<div data-image-placeholder=\"true\""));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_link_requires_url() {
        let map = ComponentsMap::standard();
        let theme = Theme::default();
        let element = Element::empty(ElementType::Link);

        let err = map
            .get(&ElementType::Link)
            .unwrap()
            .render(&props(&element, &theme, "x"))
            .unwrap_err();
        assert!(matches!(err, CompileError::MissingAttribute { attribute: "url", .. }));
    }
}
