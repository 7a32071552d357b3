//! Route descriptors and late-bound values.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::tab::Tab;

/// Identity of the request currently being rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CurrentRoute {
    /// Controller path (e.g. `"admin/users"`).
    pub controller_path: String,
    /// Action name (e.g. `"edit"`).
    pub action: String,
}

impl CurrentRoute {
    /// Create a route identity from controller path and action.
    #[must_use]
    pub fn new(controller_path: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller_path: controller_path.into(),
            action: action.into(),
        }
    }
}

/// Target of a menu link, interpreted by the view context.
///
/// # Example
///
/// ```
/// use tabmenu::Route;
///
/// let url = Route::from("/users");
/// assert_eq!(url.as_url(), Some("/users"));
///
/// let options = Route::options([("controller", "users"), ("action", "new")]);
/// assert_eq!(options.option("action"), Some("new"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Route {
    /// Literal URL or path.
    Url(String),
    /// Url options (`controller`, `action`, extra parameters).
    Options(BTreeMap<String, String>),
}

impl Route {
    /// Build an options route from key/value pairs.
    #[must_use]
    pub fn options<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Options(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// URL text for [`Route::Url`] targets.
    #[must_use]
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Options(_) => None,
        }
    }

    /// Value of an options key for [`Route::Options`] targets.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&str> {
        match self {
            Self::Url(_) => None,
            Self::Options(options) => options.get(key).map(String::as_str),
        }
    }
}

impl From<&str> for Route {
    fn from(url: &str) -> Self {
        Self::Url(url.to_owned())
    }
}

impl From<String> for Route {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

type ComputedTabValue<T> = Box<dyn Fn(&Tab, &CurrentRoute) -> T + Send + Sync>;

/// Tab property that is either fixed or computed at render time.
///
/// Computed values receive the tab being rendered and the current route.
pub enum TabValue<T> {
    /// Value known when the tab is created.
    Static(T),
    /// Value computed on every render.
    Computed(ComputedTabValue<T>),
}

impl<T: Clone> TabValue<T> {
    /// Create a value computed at render time.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Tab, &CurrentRoute) -> T + Send + Sync + 'static,
    {
        Self::Computed(Box::new(f))
    }

    /// Static value, if this is not computed.
    #[must_use]
    pub fn as_static(&self) -> Option<&T> {
        match self {
            Self::Static(value) => Some(value),
            Self::Computed(_) => None,
        }
    }

    /// Resolve the value for `tab` under `route`.
    pub fn resolve(&self, tab: &Tab, route: &CurrentRoute) -> Cow<'_, T> {
        match self {
            Self::Static(value) => Cow::Borrowed(value),
            Self::Computed(f) => Cow::Owned(f(tab, route)),
        }
    }
}

impl<T> From<T> for TabValue<T> {
    fn from(value: T) -> Self {
        Self::Static(value)
    }
}

impl From<&str> for TabValue<String> {
    fn from(value: &str) -> Self {
        Self::Static(value.to_owned())
    }
}

impl From<&str> for TabValue<Route> {
    fn from(url: &str) -> Self {
        Self::Static(Route::from(url))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for TabValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Route descriptor for options-based selection.
///
/// Computed descriptors are resolved each time the selector is evaluated.
pub enum RouteDescriptor {
    /// Route known at registration time.
    Static(Route),
    /// Route computed at evaluation time.
    Computed(Box<dyn Fn() -> Route + Send + Sync>),
}

impl RouteDescriptor {
    /// Create a descriptor computed at evaluation time.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> Route + Send + Sync + 'static,
    {
        Self::Computed(Box::new(f))
    }

    /// Resolve the descriptor to a concrete route.
    pub fn resolve(&self) -> Cow<'_, Route> {
        match self {
            Self::Static(route) => Cow::Borrowed(route),
            Self::Computed(f) => Cow::Owned(f()),
        }
    }
}

impl From<Route> for RouteDescriptor {
    fn from(route: Route) -> Self {
        Self::Static(route)
    }
}

impl From<&str> for RouteDescriptor {
    fn from(url: &str) -> Self {
        Self::Static(Route::from(url))
    }
}

impl std::fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(route) => f.debug_tuple("Static").field(route).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_options_route_accessors() {
        let route = Route::options([("controller", "users"), ("id", "5")]);

        assert_eq!(route.option("controller"), Some("users"));
        assert_eq!(route.option("action"), None);
        assert_eq!(route.as_url(), None);
    }

    #[test]
    fn test_url_route_has_no_options() {
        let route = Route::from("/users");

        assert_eq!(route.as_url(), Some("/users"));
        assert_eq!(route.option("controller"), None);
    }

    #[test]
    fn test_computed_descriptor_resolves_on_each_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let descriptor = RouteDescriptor::computed(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Route::Url(format!("/page/{n}"))
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(descriptor.resolve().as_url(), Some("/page/0"));
        assert_eq!(descriptor.resolve().as_url(), Some("/page/1"));
    }

    #[test]
    fn test_static_value_is_borrowed() {
        let value: TabValue<String> = "Home".into();
        assert_eq!(value.as_static().map(String::as_str), Some("Home"));
    }
}
