//! Menu builder.
//!
//! Keeps the logic of a menu in one place: tabs are declared once, with their
//! selection rules, and rendered from any view that shares the context.
//!
//! The builder does not render menu chrome. It only renders each tab's link
//! with the right selection state and attributes; wrapping the links is left
//! to the caller.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tabmenu::{HtmlAttributes, HtmlView, MenuBuilder, MenuDefaults, Pattern};
//!
//! let view = Arc::new(HtmlView::new("/users/5/edit", "users", "edit"));
//! let mut menu = MenuBuilder::with_defaults(
//!     view,
//!     MenuDefaults {
//!         html_attributes: HtmlAttributes::new().with("class", "tab"),
//!         selected_attributes: HtmlAttributes::new().with("class", "tab selected"),
//!         ..MenuDefaults::default()
//!     },
//! );
//! menu.add_tab_with_selected_on_options("Home", "/", vec![]);
//! menu.add_tab_with_selected_on_match("Users", "/users", "^users", Pattern::Any)
//!     .unwrap();
//!
//! let links = menu.render_visible().unwrap();
//! assert_eq!(
//!     links,
//!     vec![
//!         r#"<a href="/" class="tab">Home</a>"#,
//!         r#"<a href="/users" class="tab selected">Users</a>"#,
//!     ]
//! );
//! ```

use std::sync::Arc;

use crate::attributes::HtmlAttributes;
use crate::error::MenuError;
use crate::renderer::{LinkRenderer, StandardLinkRenderer};
use crate::route::{CurrentRoute, Route, RouteDescriptor, TabValue};
use crate::selector::{PageSelector, Pattern};
use crate::tab::Tab;
use crate::view::ViewContext;

/// Defaults applied to every tab added to a [`MenuBuilder`].
#[derive(Clone, Default)]
pub struct MenuDefaults {
    /// Base HTML attributes for each tab's link.
    pub html_attributes: HtmlAttributes,
    /// Attributes merged over the base attributes when a tab is selected.
    pub selected_attributes: HtmlAttributes,
    /// Link renderer; a [`StandardLinkRenderer`] over the view if `None`.
    pub renderer: Option<Arc<dyn LinkRenderer>>,
}

/// Ordered collection of menu tabs.
///
/// Tabs are rendered and iterated in insertion order. Defaults are copied into
/// each tab when it is added, so changing them later only affects tabs added
/// afterwards.
pub struct MenuBuilder {
    view: Arc<dyn ViewContext>,
    html_attributes: HtmlAttributes,
    selected_attributes: HtmlAttributes,
    renderer: Arc<dyn LinkRenderer>,
    tabs: Vec<Tab>,
}

impl MenuBuilder {
    /// Create a builder with empty default attributes and the standard link renderer.
    #[must_use]
    pub fn new(view: Arc<dyn ViewContext>) -> Self {
        Self::with_defaults(view, MenuDefaults::default())
    }

    /// Create a builder with the given defaults.
    #[must_use]
    pub fn with_defaults(view: Arc<dyn ViewContext>, defaults: MenuDefaults) -> Self {
        let renderer: Arc<dyn LinkRenderer> = match defaults.renderer {
            Some(renderer) => renderer,
            None => Arc::new(StandardLinkRenderer::new(Arc::clone(&view))),
        };
        Self {
            view,
            html_attributes: defaults.html_attributes,
            selected_attributes: defaults.selected_attributes,
            renderer,
            tabs: Vec::new(),
        }
    }

    /// View context shared by the menu's tabs.
    #[must_use]
    pub fn view(&self) -> &Arc<dyn ViewContext> {
        &self.view
    }

    /// Change the base attributes for tabs added from now on.
    pub fn set_html_attributes(&mut self, attributes: HtmlAttributes) {
        self.html_attributes = attributes;
    }

    /// Change the selected-state attributes for tabs added from now on.
    pub fn set_selected_attributes(&mut self, attributes: HtmlAttributes) {
        self.selected_attributes = attributes;
    }

    /// Change the renderer for tabs added from now on.
    pub fn set_renderer(&mut self, renderer: Arc<dyn LinkRenderer>) {
        self.renderer = renderer;
    }

    /// Add a tab and return it for further customization.
    ///
    /// The tab receives copies of the builder's default attributes and shares
    /// its renderer. Without a `page_selector` the tab is never selected until
    /// conditions are added to it.
    pub fn add_tab(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<TabValue<Route>>,
        page_selector: Option<PageSelector>,
    ) -> &mut Tab {
        let mut tab = Tab::new(
            Arc::clone(&self.view),
            Arc::clone(&self.renderer),
            name,
            target,
            page_selector,
        );
        tab.set_html_attributes(self.html_attributes.clone());
        tab.set_selected_attributes(self.selected_attributes.clone());

        tracing::debug!(
            tab = ?tab.name(),
            position = self.tabs.len(),
            conditions = tab.page_selector().len(),
            "Added menu tab"
        );

        self.tabs.push(tab);
        let last = self.tabs.len() - 1;
        &mut self.tabs[last]
    }

    /// Add a tab selected when any of `selected` is the current page.
    ///
    /// An empty `selected` list selects the tab on its own target.
    pub fn add_tab_with_selected_on_options(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<Route>,
        selected: Vec<RouteDescriptor>,
    ) -> &mut Tab {
        let target = target.into();
        let selected = if selected.is_empty() {
            vec![RouteDescriptor::Static(target.clone())]
        } else {
            selected
        };
        let selector = PageSelector::on_options(Arc::clone(&self.view), selected);
        self.add_tab(name, target, Some(selector))
    }

    /// Add a tab selected when the controller path and action match.
    ///
    /// # Errors
    ///
    /// Fails if both patterns are [`Pattern::Any`] or a pattern source is invalid.
    pub fn add_tab_with_selected_on_match(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<TabValue<Route>>,
        controller: impl Into<Pattern>,
        action: impl Into<Pattern>,
    ) -> Result<&mut Tab, MenuError> {
        let selector =
            PageSelector::on_matching_regex(Arc::clone(&self.view), controller, action)?;
        Ok(self.add_tab(name, target, Some(selector)))
    }

    /// Add a tab selected when `predicate` returns `true`.
    ///
    /// The predicate receives the tab itself and the current route.
    pub fn add_tab_with_selected_on_predicate<F>(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<TabValue<Route>>,
        predicate: F,
    ) -> &mut Tab
    where
        F: Fn(&Tab, &CurrentRoute) -> bool + Send + Sync + 'static,
    {
        let selector = PageSelector::on_tab(Arc::clone(&self.view), predicate);
        self.add_tab(name, target, Some(selector))
    }

    /// Call `visitor` for each visible tab, in insertion order.
    pub fn for_each_visible<F: FnMut(&Tab)>(&self, visitor: F) {
        self.visible_tabs().for_each(visitor);
    }

    /// Call `visitor` for every tab, hidden ones included.
    pub fn for_each_all<F: FnMut(&Tab)>(&self, visitor: F) {
        self.tabs.iter().for_each(visitor);
    }

    /// Iterate visible tabs in insertion order.
    pub fn visible_tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter().filter(|tab| tab.is_visible())
    }

    /// Iterate every tab in insertion order.
    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    /// Render every visible tab, in insertion order.
    ///
    /// # Errors
    ///
    /// Stops at the first tab whose rendering fails.
    pub fn render_visible(&self) -> Result<Vec<String>, MenuError> {
        self.visible_tabs().map(Tab::render).collect()
    }

    /// Number of tabs, hidden ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether the menu has no tabs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

// Aliases for menus that call their entries items or options.
impl MenuBuilder {
    /// Alias for [`add_tab`](Self::add_tab).
    pub fn add_item(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<TabValue<Route>>,
        page_selector: Option<PageSelector>,
    ) -> &mut Tab {
        self.add_tab(name, target, page_selector)
    }

    /// Alias for [`add_tab`](Self::add_tab).
    pub fn add_option(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<TabValue<Route>>,
        page_selector: Option<PageSelector>,
    ) -> &mut Tab {
        self.add_tab(name, target, page_selector)
    }

    /// Alias for [`add_tab_with_selected_on_options`](Self::add_tab_with_selected_on_options).
    pub fn add_item_with_selected_on_options(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<Route>,
        selected: Vec<RouteDescriptor>,
    ) -> &mut Tab {
        self.add_tab_with_selected_on_options(name, target, selected)
    }

    /// Alias for [`add_tab_with_selected_on_options`](Self::add_tab_with_selected_on_options).
    pub fn add_option_with_selected_on_options(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<Route>,
        selected: Vec<RouteDescriptor>,
    ) -> &mut Tab {
        self.add_tab_with_selected_on_options(name, target, selected)
    }

    /// Alias for [`add_tab_with_selected_on_match`](Self::add_tab_with_selected_on_match).
    pub fn add_item_with_selected_on_match(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<TabValue<Route>>,
        controller: impl Into<Pattern>,
        action: impl Into<Pattern>,
    ) -> Result<&mut Tab, MenuError> {
        self.add_tab_with_selected_on_match(name, target, controller, action)
    }

    /// Alias for [`add_tab_with_selected_on_match`](Self::add_tab_with_selected_on_match).
    pub fn add_option_with_selected_on_match(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<TabValue<Route>>,
        controller: impl Into<Pattern>,
        action: impl Into<Pattern>,
    ) -> Result<&mut Tab, MenuError> {
        self.add_tab_with_selected_on_match(name, target, controller, action)
    }

    /// Alias for [`add_tab_with_selected_on_predicate`](Self::add_tab_with_selected_on_predicate).
    pub fn add_item_with_selected_on_predicate<F>(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<TabValue<Route>>,
        predicate: F,
    ) -> &mut Tab
    where
        F: Fn(&Tab, &CurrentRoute) -> bool + Send + Sync + 'static,
    {
        self.add_tab_with_selected_on_predicate(name, target, predicate)
    }

    /// Alias for [`add_tab_with_selected_on_predicate`](Self::add_tab_with_selected_on_predicate).
    pub fn add_option_with_selected_on_predicate<F>(
        &mut self,
        name: impl Into<TabValue<String>>,
        target: impl Into<TabValue<Route>>,
        predicate: F,
    ) -> &mut Tab
    where
        F: Fn(&Tab, &CurrentRoute) -> bool + Send + Sync + 'static,
    {
        self.add_tab_with_selected_on_predicate(name, target, predicate)
    }
}

impl std::fmt::Debug for MenuBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuBuilder")
            .field("html_attributes", &self.html_attributes)
            .field("selected_attributes", &self.selected_attributes)
            .field("tabs", &self.tabs)
            .finish_non_exhaustive()
    }
}
