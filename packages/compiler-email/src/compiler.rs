use crate::components::{style_attr, ComponentProps, ComponentsMap};
use crate::options::CompileOptions;
use proseline_schema::{Document, Element, Node, Text, Theme};
use proseline_styles::{email as styles, Style};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Shown in place of an element whose component failed
pub const ERROR_MESSAGE: &str = "This block could not be displayed.";

/// Errors that can occur during email compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("`{kind}` is missing required attribute `{attribute}`")]
    MissingAttribute { kind: String, attribute: &'static str },

    #[error("Component for `{kind}` failed: {message}")]
    Component { kind: String, message: String },

    #[error("Compilation error: {0}")]
    Generic(String),
}

impl From<String> for CompileError {
    fn from(s: String) -> Self {
        CompileError::Generic(s)
    }
}

impl From<&str> for CompileError {
    fn from(s: &str) -> Self {
        CompileError::Generic(s.to_string())
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a document to a self-contained email HTML document
///
/// Pure and deterministic: the same document, components and theme always
/// produce the same string. A component that fails or panics is replaced by
/// an in-place error block; the rest of the email still renders.
#[instrument(skip_all, fields(blocks = document.children.len()))]
pub fn compile_to_email(
    document: &Document,
    components: &ComponentsMap,
    theme: &Theme,
    options: CompileOptions,
) -> Result<String, CompileError> {
    let blocks = compile_blocks(document, components, theme)?;
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(&mut ctx);
    compile_body(&blocks, theme, &mut ctx);

    ctx.dedent();
    ctx.add_line("</html>");

    let output = ctx.get_output();
    info!(blocks = blocks.len(), bytes = output.len(), "Compiled email");
    Ok(output)
}

/// Render each top-level block to markup, without the document shell
pub fn compile_blocks(
    document: &Document,
    components: &ComponentsMap,
    theme: &Theme,
) -> Result<Vec<String>, CompileError> {
    let walker = Walker { components, theme };
    document
        .children
        .iter()
        .enumerate()
        .map(|(index, node)| walker.node(node, None, index))
        .collect()
}

fn compile_head(ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line("<meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\">");
    let title = escape_html(ctx.options.title.as_deref().unwrap_or_default());
    ctx.add_line(&format!("<title>{}</title>", title));

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_body(blocks: &[String], theme: &Theme, ctx: &mut Context) {
    let background = theme.background_color();
    let width = ctx.options.container_width;

    ctx.add_line(&format!(
        "<body style=\"margin: 0; padding: 0; background-color: {};\">",
        background
    ));
    ctx.indent();

    if let Some(preheader) = ctx.options.preheader.clone() {
        ctx.add_line(&format!(
            "<span style=\"display: none; max-height: 0; overflow: hidden; opacity: 0; mso-hide: all;\">{}</span>",
            escape_html(&preheader)
        ));
    }

    let container = Style::new()
        .with("width", "100%")
        .with("max-width", format!("{}px", width))
        .with("background-color", background)
        .with("color", theme.text_color())
        .with("font-family", theme.font_family());

    ctx.add_line(&format!(
        "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"background-color: {};\">",
        background
    ));
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();
    ctx.add_line("<td align=\"center\">");
    ctx.indent();
    ctx.add_line(&format!(
        "<table role=\"presentation\" width=\"{}\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\"{}>",
        width,
        style_attr(&container)
    ));
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();
    ctx.add_line("<td style=\"padding: 24px;\">");
    ctx.indent();

    for block in blocks {
        ctx.add_line(block);
    }

    ctx.dedent();
    ctx.add_line("</td>");
    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");
    ctx.dedent();
    ctx.add_line("</td>");
    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");

    ctx.dedent();
    ctx.add_line("</body>");
}

/// Depth-first walk in document order; the walker owns the recursion so
/// container components receive their children already rendered
struct Walker<'a> {
    components: &'a ComponentsMap,
    theme: &'a Theme,
}

impl<'a> Walker<'a> {
    fn node(&self, node: &Node, parent: Option<&Element>, index: usize) -> Result<String, CompileError> {
        match node {
            Node::Element(element) => self.element(element, parent, index),
            Node::Text(text) => Ok(self.leaf(text)),
        }
    }

    fn children(&self, element: &Element) -> Result<String, CompileError> {
        let rendered = element
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| self.node(child, Some(element), index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.concat())
    }

    fn element(&self, element: &Element, parent: Option<&Element>, index: usize) -> Result<String, CompileError> {
        let Some(component) = self.components.get(&element.kind) else {
            warn!(kind = %element.kind, "No email component for element type");
            return self.fallback(element);
        };

        let rendered = panic::catch_unwind(AssertUnwindSafe(|| {
            let content = if component.is_void {
                String::new()
            } else {
                self.children(element)?
            };
            component.render(&ComponentProps {
                element,
                content,
                theme: self.theme,
                parent,
                index,
            })
        }))
        .unwrap_or_else(|payload| {
            Err(CompileError::Component {
                kind: element.kind.tag().to_string(),
                message: panic_message(payload.as_ref()),
            })
        });

        let rendered = match rendered {
            Ok(rendered) => rendered,
            Err(err) => {
                warn!(kind = %element.kind, error = %err, "Email component failed");
                return Ok(error_block(&err));
            }
        };

        if component.is_inline || component.is_cell || !styles::has_block_styles(element) {
            return Ok(rendered);
        }
        Ok(format!(
            "<div{}>{}</div>",
            style_attr(&styles::block_styles(element)),
            rendered
        ))
    }

    fn leaf(&self, text: &Text) -> String {
        self.components
            .fold_marks(escape_html(&text.text), |mark| text.has_mark(mark))
    }

    /// Visible marker for a type no component handles, followed by any
    /// content the element has
    fn fallback(&self, element: &Element) -> Result<String, CompileError> {
        let marker = Style::new()
            .with("color", "#b91c1c")
            .with("font-style", "italic");
        Ok(format!(
            "<div data-unsupported=\"true\"{}><span{}>{}</span>{}</div>",
            style_attr(&styles::paragraph_styles(Some(element), self.theme)),
            style_attr(&marker),
            escape_html(&element.kind.fallback_label()),
            self.children(element)?
        ))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// In-place marker for an element whose component failed or panicked; the
/// detail sits in a collapsed `<details>`
fn error_block(err: &CompileError) -> String {
    let block = Style::new()
        .with("margin", "0 0 16px")
        .with("padding", "8px 12px")
        .with("border", "1px solid #fca5a5")
        .with("background-color", "#fef2f2")
        .with("color", "#b91c1c");
    format!(
        "<div role=\"alert\" data-render-error=\"true\"{}>{}<details><summary>Details</summary><pre>{}</pre></details></div>",
        style_attr(&block),
        ERROR_MESSAGE,
        escape_html(&err.to_string())
    )
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
