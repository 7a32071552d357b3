//! Tabbed navigation menus for server-rendered views.
//!
//! Declare a menu's tabs once, with the rules that decide when each tab is
//! the current one, and render them from any view sharing the same
//! [`ViewContext`].
//!
//! # Architecture
//!
//! - [`MenuBuilder`]: ordered collection of [`Tab`]s with default attributes
//! - [`Tab`]: link text, target, attributes, visibility and selection rules
//! - [`PageSelector`]: ORed selection conditions (regex, route options, predicate)
//! - [`LinkRenderer`]: link markup strategy ([`StandardLinkRenderer`],
//!   [`ScriptLinkRenderer`], or a custom [`TabAwareLinkRenderer`])
//! - [`ViewContext`]: the web framework's side (current route, link markup)
//!
//! [`HtmlView`] is a ready-made [`ViewContext`] producing plain HTML anchors.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tabmenu::{HtmlView, MenuBuilder, Pattern};
//!
//! let view = Arc::new(HtmlView::new("/admin/users", "admin/users", "index"));
//! let mut menu = MenuBuilder::new(Arc::clone(&view) as Arc<dyn tabmenu::ViewContext>);
//! menu.add_tab_with_selected_on_options("Home", "/", vec![]);
//! menu.add_tab_with_selected_on_match("Users", "/admin/users", "users$", Pattern::Any)?
//!     .selected_attributes_mut()
//!     .insert("class", "current");
//! menu.add_tab("Settings", "/settings", None)
//!     .visible_on(|_, route| route.controller_path.starts_with("admin"));
//!
//! let html = menu.render_visible()?.join("\n");
//! assert!(html.contains(r#"<a href="/admin/users" class="current">Users</a>"#));
//! assert!(html.contains("Settings"));
//!
//! view.navigate("/", "home", "index");
//! assert!(!menu.render_visible()?.join("\n").contains("Settings"));
//! # Ok::<(), tabmenu::MenuError>(())
//! ```

mod attributes;
mod builder;
mod error;
mod html;
mod renderer;
mod route;
mod selector;
mod tab;
mod view;

pub use attributes::HtmlAttributes;
pub use builder::{MenuBuilder, MenuDefaults};
pub use error::{MenuError, ViewError, ViewErrorKind};
pub use html::{HtmlView, escape_html};
pub use renderer::{
    LinkRenderer, RendererKind, ScriptLinkRenderer, StandardLinkRenderer, TabAwareLinkRenderer,
};
pub use route::{CurrentRoute, Route, RouteDescriptor, TabValue};
pub use selector::{PageSelector, Pattern};
pub use tab::Tab;
pub use view::ViewContext;
