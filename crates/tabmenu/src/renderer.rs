//! Link renderers.
//!
//! A renderer turns a tab's label, target and effective attributes into
//! markup. Both built-in renderers only shape arguments for the
//! [`ViewContext`]; markup generation stays with the view.

use std::sync::Arc;

use crate::attributes::HtmlAttributes;
use crate::error::ViewError;
use crate::route::Route;
use crate::tab::Tab;
use crate::view::ViewContext;

/// Strategy for rendering a tab link.
pub trait LinkRenderer: Send + Sync {
    /// Render a link with the given label, target and attributes.
    fn render(
        &self,
        label: &str,
        target: &Route,
        attributes: &HtmlAttributes,
    ) -> Result<String, ViewError>;

    /// Tab-aware rendering capability, if this renderer supports it.
    ///
    /// When present, [`Tab::render`] calls
    /// [`TabAwareLinkRenderer::render_tab`] instead of [`LinkRenderer::render`].
    fn tab_aware(&self) -> Option<&dyn TabAwareLinkRenderer> {
        None
    }
}

/// Renderer that needs the tab being rendered for context.
///
/// Implementors expose themselves through [`LinkRenderer::tab_aware`]:
///
/// ```
/// use tabmenu::{HtmlAttributes, LinkRenderer, Route, Tab, TabAwareLinkRenderer, ViewError};
///
/// struct ListItemRenderer;
///
/// impl LinkRenderer for ListItemRenderer {
///     fn render(&self, label: &str, _: &Route, _: &HtmlAttributes) -> Result<String, ViewError> {
///         Ok(format!("<li>{label}</li>"))
///     }
///
///     fn tab_aware(&self) -> Option<&dyn TabAwareLinkRenderer> {
///         Some(self)
///     }
/// }
///
/// impl TabAwareLinkRenderer for ListItemRenderer {
///     fn render_tab(
///         &self,
///         tab: &Tab,
///         label: &str,
///         _: &Route,
///         _: &HtmlAttributes,
///     ) -> Result<String, ViewError> {
///         let class = if tab.is_selected().unwrap_or(false) { "current" } else { "" };
///         Ok(format!(r#"<li class="{class}">{label}</li>"#))
///     }
/// }
/// ```
pub trait TabAwareLinkRenderer: Send + Sync {
    /// Render `tab` with its resolved label, target and effective attributes.
    fn render_tab(
        &self,
        tab: &Tab,
        label: &str,
        target: &Route,
        attributes: &HtmlAttributes,
    ) -> Result<String, ViewError>;
}

/// Renders tabs as plain hyperlinks via [`ViewContext::link_to`].
pub struct StandardLinkRenderer {
    view: Arc<dyn ViewContext>,
}

impl StandardLinkRenderer {
    /// Create a renderer bound to `view`.
    #[must_use]
    pub fn new(view: Arc<dyn ViewContext>) -> Self {
        Self { view }
    }
}

impl LinkRenderer for StandardLinkRenderer {
    fn render(
        &self,
        label: &str,
        target: &Route,
        attributes: &HtmlAttributes,
    ) -> Result<String, ViewError> {
        self.view.link_to(label, target, attributes)
    }
}

/// Renders tabs as script links via [`ViewContext::link_to_function`].
///
/// The target's URL text is used as the script reference. Options targets
/// carry no script and render with an empty reference.
pub struct ScriptLinkRenderer {
    view: Arc<dyn ViewContext>,
}

impl ScriptLinkRenderer {
    /// Create a renderer bound to `view`.
    #[must_use]
    pub fn new(view: Arc<dyn ViewContext>) -> Self {
        Self { view }
    }
}

impl LinkRenderer for ScriptLinkRenderer {
    fn render(
        &self,
        label: &str,
        target: &Route,
        attributes: &HtmlAttributes,
    ) -> Result<String, ViewError> {
        let script = target.as_url().unwrap_or_default();
        self.view.link_to_function(label, script, attributes)
    }
}

/// Built-in renderer selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RendererKind {
    /// [`StandardLinkRenderer`].
    #[default]
    Link,
    /// [`ScriptLinkRenderer`].
    Script,
}

impl RendererKind {
    /// Create the renderer bound to `view`.
    #[must_use]
    pub fn build(self, view: Arc<dyn ViewContext>) -> Arc<dyn LinkRenderer> {
        match self {
            Self::Link => Arc::new(StandardLinkRenderer::new(view)),
            Self::Script => Arc::new(ScriptLinkRenderer::new(view)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::HtmlView;

    fn view() -> Arc<dyn ViewContext> {
        Arc::new(HtmlView::new("/", "home", "index"))
    }

    #[test]
    fn test_standard_renderer_uses_link_to() {
        let renderer = StandardLinkRenderer::new(view());
        let attrs = HtmlAttributes::new().with("class", "tab");

        let html = renderer
            .render("Users", &Route::from("/users"), &attrs)
            .unwrap();

        assert_eq!(html, r#"<a href="/users" class="tab">Users</a>"#);
    }

    #[test]
    fn test_script_renderer_uses_link_to_function() {
        let renderer = ScriptLinkRenderer::new(view());

        let html = renderer
            .render("Toggle", &Route::from("toggleMenu()"), &HtmlAttributes::new())
            .unwrap();

        assert_eq!(
            html,
            r##"<a href="#" onclick="toggleMenu(); return false;">Toggle</a>"##
        );
    }

    #[test]
    fn test_script_renderer_defaults_to_empty_script() {
        let renderer = ScriptLinkRenderer::new(view());

        let html = renderer
            .render(
                "Noop",
                &Route::options([("controller", "users")]),
                &HtmlAttributes::new(),
            )
            .unwrap();

        assert_eq!(html, r##"<a href="#" onclick="; return false;">Noop</a>"##);
    }

    #[test]
    fn test_builtin_renderers_are_not_tab_aware() {
        assert!(RendererKind::Link.build(view()).tab_aware().is_none());
        assert!(RendererKind::Script.build(view()).tab_aware().is_none());
    }
}
