//! # Composition Root
//!
//! Folds an ordered list of plugins into fixed-shape tables, once:
//!
//! ```text
//! plugins ──▶ elements   type → config     (later plugin wins, in place)
//!         ──▶ leaves     mark → renderer   (later plugin wins, in place)
//!         ──▶ utils      name → factory    (later plugin wins, in place)
//!         ──▶ decorators ordered chain     (first registered is innermost)
//!         ──▶ providers  nested            (first registered is outermost)
//!         ──▶ rules      inline/void sets  (from element metadata)
//! ```
//!
//! A [`Session`] binds the composition to one live editor. Utils are bound
//! to the editor handle when the session is created, not on each call.

use crate::context::RenderContext;
use crate::dispatcher::Dispatcher;
use crate::plugin::{
    BoundUtil, EditorHandle, ElementConfig, ElementDecorator, LeafRenderer, Plugin, Provider,
    UtilFactory,
};
use crate::vdom::VNode;
use proseline_editor::Editor;
use proseline_schema::{Document, ElementRules, ElementType, Mark, Theme};
use serde_json::Value;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

pub struct Composition {
    elements: Vec<(ElementType, ElementConfig)>,
    leaves: Vec<(Mark, LeafRenderer)>,
    utils: Vec<(String, UtilFactory)>,
    decorators: Vec<Rc<dyn ElementDecorator>>,
    providers: Vec<Rc<dyn Provider>>,
    rules: ElementRules,
}

impl Composition {
    #[instrument(skip_all, fields(plugins = plugins.len()))]
    pub fn new(plugins: Vec<Plugin>) -> Self {
        let mut elements = Vec::new();
        let mut leaves = Vec::new();
        let mut utils = Vec::new();
        let mut decorators = Vec::new();
        let mut providers = Vec::new();

        for plugin in plugins {
            for (kind, config) in plugin.elements {
                upsert(&mut elements, kind, config, &plugin.name, "element");
            }
            for (mark, render) in plugin.leaves {
                upsert(&mut leaves, mark, render, &plugin.name, "leaf");
            }
            for (name, factory) in plugin.utils {
                upsert(&mut utils, name, factory, &plugin.name, "util");
            }
            if let Some(decorator) = plugin.element_decorator {
                decorators.push(decorator);
            }
            if let Some(provider) = plugin.provider {
                providers.push(provider);
            }
        }

        let rules = ElementRules::new(
            elements
                .iter()
                .filter(|(_, config)| config.is_inline)
                .map(|(kind, _)| kind.clone()),
            elements
                .iter()
                .filter(|(_, config)| config.is_void)
                .map(|(kind, _)| kind.clone()),
        );

        info!(
            elements = elements.len(),
            leaves = leaves.len(),
            utils = utils.len(),
            decorators = decorators.len(),
            providers = providers.len(),
            "Composed plugins"
        );

        Self {
            elements,
            leaves,
            utils,
            decorators,
            providers,
            rules,
        }
    }

    pub fn element(&self, kind: &ElementType) -> Option<&ElementConfig> {
        self.elements
            .iter()
            .find(|(known, _)| known == kind)
            .map(|(_, config)| config)
    }

    /// Leaf renderers in mark registration order
    pub fn leaves(&self) -> &[(Mark, LeafRenderer)] {
        &self.leaves
    }

    pub fn decorators(&self) -> &[Rc<dyn ElementDecorator>] {
        &self.decorators
    }

    pub fn rules(&self) -> &ElementRules {
        &self.rules
    }

    pub fn util_names(&self) -> Vec<&str> {
        self.utils.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Types offered as conversion targets, with their labels
    pub fn block_menu_entries(&self) -> Vec<(ElementType, String)> {
        self.elements
            .iter()
            .filter_map(|(kind, config)| {
                let menu = config.block_menu.as_ref()?;
                menu.convertible.then(|| (kind.clone(), menu.label.clone()))
            })
            .collect()
    }

    /// Start a session over `document` with this composition's rules
    pub fn create_session(self: &Rc<Self>, document: Document) -> Session {
        let editor = Rc::new(RefCell::new(Editor::new(document, self.rules.clone())));
        let utils = self
            .utils
            .iter()
            .map(|(name, factory)| (name.clone(), factory(editor.clone())))
            .collect();

        debug!("Created session");
        Session {
            editor,
            utils,
            composition: Rc::clone(self),
        }
    }

    /// Render `document` without a live session (no selection)
    pub fn render_document(&self, document: &Document, theme: Option<Theme>) -> VNode {
        let mut ctx = RenderContext::new(self.rules.clone());
        if let Some(theme) = theme {
            ctx.theme = theme;
        }
        self.render_with(document, ctx)
    }

    fn render_with(&self, document: &Document, mut ctx: RenderContext) -> VNode {
        for provider in &self.providers {
            provider.provide(&mut ctx);
        }

        let blocks = Dispatcher::new(self, &ctx).render_children(&document.children, None);
        let surface = VNode::element("div")
            .with_attr("class", "proseline-surface")
            .with_attr("data-proseline-surface", "true")
            .with_children(blocks);

        self.providers
            .iter()
            .rev()
            .fold(surface, |surface, provider| provider.wrap(surface, &ctx))
    }
}

fn upsert<K, V>(table: &mut Vec<(K, V)>, key: K, value: V, plugin: &str, what: &str)
where
    K: PartialEq + Display,
{
    match table.iter_mut().find(|(existing, _)| *existing == key) {
        Some(slot) => {
            warn!(plugin, key = %key, "Plugin overrides an earlier {}", what);
            slot.1 = value;
        }
        None => table.push((key, value)),
    }
}

/// One editor bound to a composition
pub struct Session {
    editor: EditorHandle,
    utils: BTreeMap<String, BoundUtil>,
    composition: Rc<Composition>,
}

impl Session {
    pub fn editor(&self) -> Ref<'_, Editor> {
        self.editor.borrow()
    }

    pub fn editor_mut(&self) -> RefMut<'_, Editor> {
        self.editor.borrow_mut()
    }

    pub fn editor_handle(&self) -> EditorHandle {
        self.editor.clone()
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn util(&self, name: &str) -> Option<BoundUtil> {
        self.utils.get(name).cloned()
    }

    /// Call a util by name; `None` if no plugin registered it
    pub fn call(&self, name: &str, args: Value) -> Option<Value> {
        let util = self.util(name)?;
        Some(util(args))
    }

    #[instrument(skip_all)]
    pub fn render(&self) -> VNode {
        self.render_themed(None)
    }

    /// Render with an explicit theme; a theme provider still overrides it
    pub fn render_themed(&self, theme: Option<Theme>) -> VNode {
        let editor = self.editor.borrow();
        let mut ctx = RenderContext::new(editor.rules().clone())
            .with_selection(editor.selection().cloned());
        if let Some(theme) = theme {
            ctx.theme = theme;
        }
        self.composition.render_with(editor.document(), ctx)
    }

    pub fn render_html(&self) -> String {
        self.render().to_html()
    }
}
