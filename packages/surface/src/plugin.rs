//! # Plugin Descriptors
//!
//! A [`Plugin`] is the declarative bundle one feature contributes to the
//! surface. Every field is optional:
//!
//! - `elements`: element type to [`ElementConfig`] (renderer plus void,
//!   inline and block-menu metadata)
//! - `leaves`: mark to [`LeafRenderer`]
//! - `utils`: name to [`UtilFactory`], bound to the live editor once per
//!   session
//! - `provider`: adjusts the render context and wraps the whole surface
//! - `element_decorator`: wraps every rendered block

use crate::context::RenderContext;
use crate::errors::RenderResult;
use crate::vdom::VNode;
use proseline_editor::Editor;
use proseline_schema::{Element, ElementType, Mark, Path, Text};
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Everything a renderer sees about the element it draws
pub struct ElementProps<'a> {
    pub element: &'a Element,
    pub path: &'a Path,
    /// Already-rendered children (empty for void elements)
    pub children: Vec<VNode>,
    pub ctx: &'a RenderContext,
    pub selected: bool,
    pub parent: Option<&'a Element>,
    /// Position among the parent's children
    pub index: usize,
}

pub struct LeafProps<'a> {
    pub text: &'a Text,
    pub path: &'a Path,
    pub ctx: &'a RenderContext,
}

pub type ElementRenderer = Rc<dyn Fn(&ElementProps) -> RenderResult<VNode>>;

/// Folds one mark onto already-rendered leaf content
pub type LeafRenderer = Rc<dyn Fn(VNode, &LeafProps) -> VNode>;

pub type EditorHandle = Rc<RefCell<Editor>>;

/// A util after binding: JSON arguments in, JSON result out
pub type BoundUtil = Rc<dyn Fn(Value) -> Value>;

pub type UtilFactory = Rc<dyn Fn(EditorHandle) -> BoundUtil>;

/// Block menu metadata for an element type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMenu {
    pub label: String,
    /// Offer this type as a conversion target
    pub convertible: bool,
}

#[derive(Clone)]
pub struct ElementConfig {
    pub render: ElementRenderer,
    pub is_void: bool,
    pub is_inline: bool,
    /// Skip the element decorators (handles, block styles) for this type
    pub hide_block_menu: bool,
    pub block_menu: Option<BlockMenu>,
}

impl ElementConfig {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&ElementProps) -> RenderResult<VNode> + 'static,
    {
        Self {
            render: Rc::new(render),
            is_void: false,
            is_inline: false,
            hide_block_menu: false,
            block_menu: None,
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

    pub fn hide_block_menu(mut self) -> Self {
        self.hide_block_menu = true;
        self
    }

    pub fn block_menu(mut self, label: impl Into<String>, convertible: bool) -> Self {
        self.block_menu = Some(BlockMenu {
            label: label.into(),
            convertible,
        });
        self
    }
}

impl fmt::Debug for ElementConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementConfig")
            .field("is_void", &self.is_void)
            .field("is_inline", &self.is_inline)
            .field("hide_block_menu", &self.hide_block_menu)
            .field("block_menu", &self.block_menu)
            .finish_non_exhaustive()
    }
}

/// Wraps the whole surface and may adjust the context first
pub trait Provider {
    fn provide(&self, _ctx: &mut RenderContext) {}

    fn wrap(&self, surface: VNode, _ctx: &RenderContext) -> VNode {
        surface
    }
}

/// Wraps one rendered block
pub trait ElementDecorator {
    fn decorate(&self, rendered: VNode, props: &ElementProps) -> VNode;
}

#[derive(Clone, Default)]
pub struct Plugin {
    pub name: String,
    pub elements: Vec<(ElementType, ElementConfig)>,
    pub leaves: Vec<(Mark, LeafRenderer)>,
    pub utils: Vec<(String, UtilFactory)>,
    pub provider: Option<Rc<dyn Provider>>,
    pub element_decorator: Option<Rc<dyn ElementDecorator>>,
}

impl Plugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn element(mut self, kind: ElementType, config: ElementConfig) -> Self {
        self.elements.push((kind, config));
        self
    }

    pub fn leaf<F>(mut self, mark: Mark, render: F) -> Self
    where
        F: Fn(VNode, &LeafProps) -> VNode + 'static,
    {
        self.leaves.push((mark, Rc::new(render)));
        self
    }

    pub fn util(mut self, name: impl Into<String>, factory: UtilFactory) -> Self {
        self.utils.push((name.into(), factory));
        self
    }

    pub fn provider(mut self, provider: impl Provider + 'static) -> Self {
        self.provider = Some(Rc::new(provider));
        self
    }

    pub fn element_decorator(mut self, decorator: impl ElementDecorator + 'static) -> Self {
        self.element_decorator = Some(Rc::new(decorator));
        self
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field(
                "elements",
                &self.elements.iter().map(|(k, _)| k.tag()).collect::<Vec<_>>(),
            )
            .field(
                "leaves",
                &self.leaves.iter().map(|(m, _)| m.as_str()).collect::<Vec<_>>(),
            )
            .field(
                "utils",
                &self.utils.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
            )
            .field("provider", &self.provider.is_some())
            .field("element_decorator", &self.element_decorator.is_some())
            .finish()
    }
}
