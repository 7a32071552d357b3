//! HTML view context.
//!
//! [`HtmlView`] is a self-contained [`ViewContext`] producing plain HTML5
//! anchors. It suits servers without a template engine of their own and is
//! the context used throughout the test suite.

use std::fmt::Write;
use std::sync::RwLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::attributes::HtmlAttributes;
use crate::error::ViewError;
use crate::route::{CurrentRoute, Route};
use crate::view::ViewContext;

/// Action assumed when an options route does not name one.
const DEFAULT_ACTION: &str = "index";

/// Unreserved characters (A-Z a-z 0-9 - . _ ~) stay literal in query keys and values.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Path segments also keep `/`, so nested controllers stay nested.
const PATH_ENCODE_SET: &AsciiSet = &QUERY_ENCODE_SET.remove(b'/');

/// Escape text for use in HTML content and double-quoted attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug)]
struct Request {
    url: String,
    route: CurrentRoute,
}

/// View context rendering plain HTML anchors.
///
/// Tracks the request being rendered; call [`navigate`](Self::navigate) to
/// switch requests without rebuilding menus bound to the view.
///
/// # Example
///
/// ```
/// use tabmenu::{HtmlAttributes, HtmlView, Route, ViewContext};
///
/// let view = HtmlView::new("/users?page=2", "users", "index");
///
/// assert!(view.is_current_page(&Route::from("/users")).unwrap());
/// assert!(view.is_current_page(&Route::options([("controller", "users")])).unwrap());
///
/// let html = view
///     .link_to("Users", &Route::from("/users"), &HtmlAttributes::new().with("class", "tab"))
///     .unwrap();
/// assert_eq!(html, r#"<a href="/users" class="tab">Users</a>"#);
/// ```
#[derive(Debug)]
pub struct HtmlView {
    request: RwLock<Request>,
}

impl HtmlView {
    /// Create a view rendering the request at `url`.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        controller_path: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            request: RwLock::new(Request {
                url: url.into(),
                route: CurrentRoute::new(controller_path, action),
            }),
        }
    }

    /// Switch to rendering another request.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn navigate(
        &self,
        url: impl Into<String>,
        controller_path: impl Into<String>,
        action: impl Into<String>,
    ) {
        let mut request = self.request.write().unwrap();
        request.url = url.into();
        request.route = CurrentRoute::new(controller_path, action);
    }

    /// URL of the request being rendered.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn current_url(&self) -> String {
        self.request.read().unwrap().url.clone()
    }

    /// Build the URL for `route`.
    ///
    /// Options routes map to `/{controller}[/{action}]`, omitting the
    /// `index` action, with any remaining options as query parameters in key
    /// order. Path segments, keys and values are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns a route-not-found error for options routes without a
    /// `controller` key.
    pub fn url_for(route: &Route) -> Result<String, ViewError> {
        match route {
            Route::Url(url) => Ok(url.clone()),
            Route::Options(options) => {
                let controller = options.get("controller").ok_or_else(|| {
                    ViewError::route_not_found("url options require a controller")
                })?;
                let mut url = format!(
                    "/{}",
                    utf8_percent_encode(controller.trim_start_matches('/'), PATH_ENCODE_SET)
                );
                if let Some(action) = options.get("action").filter(|a| *a != DEFAULT_ACTION) {
                    write!(url, "/{}", utf8_percent_encode(action, PATH_ENCODE_SET)).unwrap();
                }

                let mut separator = '?';
                for (key, value) in options {
                    if key == "controller" || key == "action" {
                        continue;
                    }
                    write!(
                        url,
                        "{separator}{}={}",
                        utf8_percent_encode(key, QUERY_ENCODE_SET),
                        utf8_percent_encode(value, QUERY_ENCODE_SET)
                    )
                    .unwrap();
                    separator = '&';
                }
                Ok(url)
            }
        }
    }
}

impl ViewContext for HtmlView {
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    fn current_route(&self) -> CurrentRoute {
        self.request.read().unwrap().route.clone()
    }

    /// Compares the route's URL with the request URL.
    ///
    /// The query takes part only when the route's URL has one, so `/users`
    /// is current on `/users?page=2` but `/users?page=1` is not.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    fn is_current_page(&self, route: &Route) -> Result<bool, ViewError> {
        let target = Self::url_for(route)?;
        let request = self.request.read().unwrap();
        Ok(same_page(&target, &request.url))
    }

    fn link_to(
        &self,
        label: &str,
        target: &Route,
        attributes: &HtmlAttributes,
    ) -> Result<String, ViewError> {
        let href = Self::url_for(target)?;
        let mut out = String::with_capacity(64);
        write!(out, r#"<a href="{}""#, escape_html(&href)).unwrap();
        write_attributes(attributes, &mut out);
        write!(out, ">{}</a>", escape_html(label)).unwrap();
        Ok(out)
    }

    fn link_to_function(
        &self,
        label: &str,
        script: &str,
        attributes: &HtmlAttributes,
    ) -> Result<String, ViewError> {
        let mut out = String::with_capacity(64);
        write!(
            out,
            r##"<a href="#" onclick="{}; return false;""##,
            escape_html(script)
        )
        .unwrap();
        write_attributes(attributes, &mut out);
        write!(out, ">{}</a>", escape_html(label)).unwrap();
        Ok(out)
    }
}

/// Whether `target` and `current` address the same page.
///
/// Fragments never count; both sides are percent-decoded before comparing.
fn same_page(target: &str, current: &str) -> bool {
    let (target, current) = if target.contains('?') {
        (strip_fragment(target), strip_fragment(current))
    } else {
        (strip_query(target), strip_query(current))
    };
    percent_decode_str(target).decode_utf8_lossy()
        == percent_decode_str(current).decode_utf8_lossy()
}

fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

fn strip_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

fn write_attributes(attributes: &HtmlAttributes, out: &mut String) {
    for (name, value) in attributes.iter() {
        write!(out, r#" {}="{}""#, escape_html(name), escape_html(value)).unwrap();
    }
}
