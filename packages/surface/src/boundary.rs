//! Per-element render error boundary
//!
//! A renderer that returns an error or panics is replaced by an in-place
//! alert. The rest of the surface keeps rendering. The alert can be
//! dismissed and keeps the failure detail in a collapsed `<details>` block.

use crate::errors::{RenderError, RenderResult};
use crate::vdom::VNode;
use proseline_schema::ElementType;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

pub const ERROR_MESSAGE: &str = "This block could not be displayed.";

/// Run one renderer, converting failure into [`VNode::Error`]
pub(crate) fn guard<F>(kind: &ElementType, render: F) -> VNode
where
    F: FnOnce() -> RenderResult<VNode>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(render))
        .unwrap_or_else(|payload| Err(RenderError::Panic(panic_message(payload.as_ref()))));

    match outcome {
        Ok(node) => node,
        Err(err) => {
            warn!(kind = %kind, error = %err, "Renderer failed");
            VNode::error(ERROR_MESSAGE, Some(err.to_string()))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The markup an error node expands to
pub fn error_view(message: &str, detail: Option<&str>) -> VNode {
    let mut view = VNode::element("div")
        .with_attr("role", "alert")
        .with_attr("data-render-error", "true")
        .with_attr("contenteditable", "false")
        .with_style("position", "relative")
        .with_style("padding", "8px 32px 8px 12px")
        .with_style("margin", "0 0 16px")
        .with_style("border", "1px solid #fca5a5")
        .with_style("border-radius", "4px")
        .with_style("background-color", "#fef2f2")
        .with_style("color", "#991b1b")
        .with_style("font-size", "14px")
        .with_child(VNode::element("span").with_child(VNode::text(message)))
        .with_child(
            VNode::element("button")
                .with_attr("type", "button")
                .with_attr("aria-label", "Dismiss")
                .with_attr("onclick", "this.parentElement.remove()")
                .with_style("position", "absolute")
                .with_style("top", "4px")
                .with_style("right", "8px")
                .with_style("border", "none")
                .with_style("background", "none")
                .with_style("cursor", "pointer")
                .with_child(VNode::text("×")),
        );

    if let Some(detail) = detail {
        view = view.with_child(
            VNode::element("details")
                .with_child(VNode::element("summary").with_child(VNode::text("Details")))
                .with_child(VNode::element("pre").with_child(VNode::text(detail))),
        );
    }
    view
}
