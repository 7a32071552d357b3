//! Menu tabs.
//!
//! A [`Tab`] is one entry of a menu. It owns its selection rules and HTML
//! attributes, and renders itself through a shared [`LinkRenderer`].
//!
//! Visibility and selection are never stored: every call asks the view
//! context for the current route again, so a tab kept across requests always
//! reflects the request being rendered.

use std::borrow::Cow;
use std::sync::Arc;

use crate::attributes::HtmlAttributes;
use crate::error::MenuError;
use crate::renderer::LinkRenderer;
use crate::route::{CurrentRoute, Route, TabValue};
use crate::selector::PageSelector;
use crate::view::ViewContext;

type VisibilityPredicate = Box<dyn Fn(&Tab, &CurrentRoute) -> bool + Send + Sync>;

/// A single menu entry.
pub struct Tab {
    view: Arc<dyn ViewContext>,
    renderer: Arc<dyn LinkRenderer>,
    name: TabValue<String>,
    target: TabValue<Route>,
    html_attributes: HtmlAttributes,
    selected_attributes: HtmlAttributes,
    visible_on: Option<VisibilityPredicate>,
    page_selector: PageSelector,
}

impl Tab {
    /// Create a tab.
    ///
    /// # Arguments
    ///
    /// * `view` - View context providing the current route
    /// * `renderer` - Link renderer used by [`render`](Self::render)
    /// * `name` - Link text, fixed or computed at render time
    /// * `target` - Link target, fixed or computed at render time
    /// * `page_selector` - Selection rules; an empty selector is created if `None`
    pub fn new(
        view: Arc<dyn ViewContext>,
        renderer: Arc<dyn LinkRenderer>,
        name: impl Into<TabValue<String>>,
        target: impl Into<TabValue<Route>>,
        page_selector: Option<PageSelector>,
    ) -> Self {
        let page_selector =
            page_selector.unwrap_or_else(|| PageSelector::new(Arc::clone(&view)));
        Self {
            view,
            renderer,
            name: name.into(),
            target: target.into(),
            html_attributes: HtmlAttributes::new(),
            selected_attributes: HtmlAttributes::new(),
            visible_on: None,
            page_selector,
        }
    }

    /// Tab name as configured.
    #[must_use]
    pub fn name(&self) -> &TabValue<String> {
        &self.name
    }

    /// Link target as configured.
    #[must_use]
    pub fn target(&self) -> &TabValue<Route> {
        &self.target
    }

    /// Replace the link target.
    pub fn set_target(&mut self, target: impl Into<TabValue<Route>>) {
        self.target = target.into();
    }

    /// Base HTML attributes.
    #[must_use]
    pub fn html_attributes(&self) -> &HtmlAttributes {
        &self.html_attributes
    }

    /// Mutable base HTML attributes.
    pub fn html_attributes_mut(&mut self) -> &mut HtmlAttributes {
        &mut self.html_attributes
    }

    /// Replace the base HTML attributes.
    pub fn set_html_attributes(&mut self, attributes: HtmlAttributes) {
        self.html_attributes = attributes;
    }

    /// Attributes merged over the base attributes when the tab is selected.
    #[must_use]
    pub fn selected_attributes(&self) -> &HtmlAttributes {
        &self.selected_attributes
    }

    /// Mutable selected-state attributes.
    pub fn selected_attributes_mut(&mut self) -> &mut HtmlAttributes {
        &mut self.selected_attributes
    }

    /// Replace the selected-state attributes.
    pub fn set_selected_attributes(&mut self, attributes: HtmlAttributes) {
        self.selected_attributes = attributes;
    }

    /// Link renderer.
    #[must_use]
    pub fn renderer(&self) -> &Arc<dyn LinkRenderer> {
        &self.renderer
    }

    /// Replace the link renderer for this tab only.
    pub fn set_renderer(&mut self, renderer: Arc<dyn LinkRenderer>) {
        self.renderer = renderer;
    }

    /// Selection rules.
    #[must_use]
    pub fn page_selector(&self) -> &PageSelector {
        &self.page_selector
    }

    /// Mutable selection rules, for adding conditions after creation.
    pub fn page_selector_mut(&mut self) -> &mut PageSelector {
        &mut self.page_selector
    }

    /// Show the tab only while `predicate` returns `true`.
    ///
    /// The predicate is evaluated on every visibility check and receives the
    /// tab and the current route.
    pub fn visible_on<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&Tab, &CurrentRoute) -> bool + Send + Sync + 'static,
    {
        self.visible_on = Some(Box::new(predicate));
        self
    }

    /// Whether the tab should appear in the menu.
    pub fn is_visible(&self) -> bool {
        self.visible_on
            .as_ref()
            .is_none_or(|predicate| predicate(self, &self.view.current_route()))
    }

    /// Whether the tab represents the page currently being rendered.
    ///
    /// Tab-scoped selector conditions receive this tab.
    ///
    /// # Errors
    ///
    /// Propagates view context failures from options conditions.
    pub fn is_selected(&self) -> Result<bool, MenuError> {
        self.page_selector
            .is_selected_for(self, &self.view.current_route())
    }

    /// Resolve the display name for the current route.
    pub fn label(&self) -> Cow<'_, String> {
        self.name.resolve(self, &self.view.current_route())
    }

    /// Attributes the tab renders with for the current route.
    ///
    /// # Errors
    ///
    /// Propagates view context failures from options conditions.
    pub fn render_attributes(&self) -> Result<Cow<'_, HtmlAttributes>, MenuError> {
        self.attributes_for(&self.view.current_route())
    }

    /// Render the tab's link.
    ///
    /// Prefers [`TabAwareLinkRenderer::render_tab`](crate::TabAwareLinkRenderer::render_tab)
    /// when the renderer supports it.
    ///
    /// # Errors
    ///
    /// Propagates view context failures from selection checks and link rendering.
    pub fn render(&self) -> Result<String, MenuError> {
        let route = self.view.current_route();
        let label = self.name.resolve(self, &route);
        let target = self.target.resolve(self, &route);
        let attributes = self.attributes_for(&route)?;

        let html = match self.renderer.tab_aware() {
            Some(renderer) => renderer.render_tab(self, &label, &target, &attributes)?,
            None => self.renderer.render(&label, &target, &attributes)?,
        };
        Ok(html)
    }

    fn attributes_for(&self, route: &CurrentRoute) -> Result<Cow<'_, HtmlAttributes>, MenuError> {
        if self.page_selector.is_selected_for(self, route)? {
            Ok(Cow::Owned(self.html_attributes.merged(&self.selected_attributes)))
        } else {
            Ok(Cow::Borrowed(&self.html_attributes))
        }
    }
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("html_attributes", &self.html_attributes)
            .field("selected_attributes", &self.selected_attributes)
            .field("page_selector", &self.page_selector)
            .finish_non_exhaustive()
    }
}
