//! View context contract.
//!
//! The view context is the web framework's side of the menu: it knows which
//! request is being rendered, whether a route descriptor points at that
//! request, and how to produce link markup.

use crate::attributes::HtmlAttributes;
use crate::error::ViewError;
use crate::route::{CurrentRoute, Route};

/// Rendering context consumed by tabs, selectors and link renderers.
///
/// Implementations are shared between every tab of a menu through `Arc`.
pub trait ViewContext: Send + Sync {
    /// Identity of the request currently being rendered.
    ///
    /// Called on every selection check; implementations must not assume the
    /// value is cached by callers.
    fn current_route(&self) -> CurrentRoute;

    /// Whether `route` resolves to the page currently being rendered.
    fn is_current_page(&self, route: &Route) -> Result<bool, ViewError>;

    /// Render a hyperlink pointing at `target`.
    fn link_to(
        &self,
        label: &str,
        target: &Route,
        attributes: &HtmlAttributes,
    ) -> Result<String, ViewError>;

    /// Render a link that runs the client-side `script` when activated.
    fn link_to_function(
        &self,
        label: &str,
        script: &str,
        attributes: &HtmlAttributes,
    ) -> Result<String, ViewError>;
}
