//! Page selection rules.
//!
//! A [`PageSelector`] decides whether the current request is one of the pages
//! a tab represents. Conditions are independent and ORed together: the
//! selector matches as soon as any condition matches, and a selector with no
//! conditions never matches.
//!
//! Tab-scoped conditions see the [`Tab`] owning the selector. They only take
//! part when the selector is evaluated for a tab, through
//! [`PageSelector::is_selected_for`], which is what [`Tab`] itself does.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tabmenu::{CurrentRoute, HtmlView, PageSelector, Pattern, Route};
//!
//! let view = Arc::new(HtmlView::new("/users/5/edit", "users", "edit"));
//! let mut selector = PageSelector::new(view);
//! selector.add_regex_condition("^admin", Pattern::Any).unwrap();
//! selector.add_options_condition([Route::from("/users/5/edit")]);
//!
//! let route = CurrentRoute::new("users", "edit");
//! assert!(selector.is_selected(&route).unwrap());
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::error::MenuError;
use crate::route::{CurrentRoute, RouteDescriptor};
use crate::tab::Tab;
use crate::view::ViewContext;

type RoutePredicate = Box<dyn Fn(&CurrentRoute) -> bool + Send + Sync>;
type TabPredicate = Box<dyn Fn(&Tab, &CurrentRoute) -> bool + Send + Sync>;

/// Side of a regex condition.
///
/// Pattern sources are compiled once, when the condition is registered.
#[derive(Clone, Debug, Default)]
pub enum Pattern {
    /// Matches anything.
    #[default]
    Any,
    /// Pre-built regular expression.
    Regex(Regex),
    /// Pattern source compiled on registration.
    Source(String),
}

impl Pattern {
    fn compile(self) -> Result<Option<Regex>, MenuError> {
        match self {
            Self::Any => Ok(None),
            Self::Regex(regex) => Ok(Some(regex)),
            Self::Source(source) => Regex::new(&source)
                .map(Some)
                .map_err(|source_err| MenuError::InvalidPattern {
                    pattern: source,
                    source: source_err,
                }),
        }
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::Regex(regex)
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self::Source(source.to_owned())
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Self::Source(source)
    }
}

impl<T: Into<Pattern>> From<Option<T>> for Pattern {
    fn from(pattern: Option<T>) -> Self {
        pattern.map_or(Self::Any, Into::into)
    }
}

/// A single selection rule.
enum Condition {
    /// Controller path and action both match (missing side matches anything).
    Regex {
        controller: Option<Regex>,
        action: Option<Regex>,
    },
    /// Any descriptor resolves to the current page.
    Options(Vec<RouteDescriptor>),
    /// Caller-supplied predicate.
    Custom(RoutePredicate),
    /// Caller-supplied predicate over the owning tab; never matches without one.
    TabCustom(TabPredicate),
}

impl Condition {
    fn kind(&self) -> &'static str {
        match self {
            Self::Regex { .. } => "regex",
            Self::Options(_) => "options",
            Self::Custom(_) => "custom",
            Self::TabCustom(_) => "tab",
        }
    }

    fn matches(
        &self,
        view: &dyn ViewContext,
        tab: Option<&Tab>,
        route: &CurrentRoute,
    ) -> Result<bool, MenuError> {
        match self {
            Self::Regex { controller, action } => Ok(matches_side(
                controller.as_ref(),
                &route.controller_path,
            ) && matches_side(action.as_ref(), &route.action)),
            Self::Options(descriptors) => {
                for descriptor in descriptors {
                    if view.is_current_page(&descriptor.resolve())? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Custom(predicate) => Ok(predicate(route)),
            Self::TabCustom(predicate) => Ok(tab.is_some_and(|tab| predicate(tab, route))),
        }
    }
}

fn matches_side(pattern: Option<&Regex>, value: &str) -> bool {
    pattern.is_none_or(|regex| regex.is_match(value))
}

/// Set of conditions deciding whether the current page is selected.
pub struct PageSelector {
    view: Arc<dyn ViewContext>,
    conditions: Vec<Condition>,
}

impl PageSelector {
    /// Create an empty selector bound to `view`.
    #[must_use]
    pub fn new(view: Arc<dyn ViewContext>) -> Self {
        Self {
            view,
            conditions: Vec::new(),
        }
    }

    /// Create a selector holding a single regex condition.
    ///
    /// See [`add_regex_condition`](Self::add_regex_condition).
    pub fn on_matching_regex(
        view: Arc<dyn ViewContext>,
        controller: impl Into<Pattern>,
        action: impl Into<Pattern>,
    ) -> Result<Self, MenuError> {
        let mut selector = Self::new(view);
        selector.add_regex_condition(controller, action)?;
        Ok(selector)
    }

    /// Create a selector holding a single options condition.
    ///
    /// See [`add_options_condition`](Self::add_options_condition).
    pub fn on_options<I>(view: Arc<dyn ViewContext>, descriptors: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RouteDescriptor>,
    {
        let mut selector = Self::new(view);
        selector.add_options_condition(descriptors);
        selector
    }

    /// Create a selector holding a single custom condition.
    ///
    /// See [`add_custom_condition`](Self::add_custom_condition).
    pub fn on<F>(view: Arc<dyn ViewContext>, predicate: F) -> Self
    where
        F: Fn(&CurrentRoute) -> bool + Send + Sync + 'static,
    {
        let mut selector = Self::new(view);
        selector.add_custom_condition(predicate);
        selector
    }

    /// Create a selector holding a single tab-scoped condition.
    ///
    /// See [`add_tab_condition`](Self::add_tab_condition).
    pub fn on_tab<F>(view: Arc<dyn ViewContext>, predicate: F) -> Self
    where
        F: Fn(&Tab, &CurrentRoute) -> bool + Send + Sync + 'static,
    {
        let mut selector = Self::new(view);
        selector.add_tab_condition(predicate);
        selector
    }

    /// Select when the controller path and action match the given patterns.
    ///
    /// Matching is a regex search, so unanchored patterns match anywhere in
    /// the value. A [`Pattern::Any`] side matches every value, but at least
    /// one side must be given.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::InvalidConfiguration`] if both sides are
    /// [`Pattern::Any`], or [`MenuError::InvalidPattern`] if a pattern source
    /// does not compile.
    pub fn add_regex_condition(
        &mut self,
        controller: impl Into<Pattern>,
        action: impl Into<Pattern>,
    ) -> Result<&mut Self, MenuError> {
        let (controller, action) = (controller.into(), action.into());
        if matches!((&controller, &action), (Pattern::Any, Pattern::Any)) {
            return Err(MenuError::InvalidConfiguration(
                "regular expressions for at least one of controller path and action name must be provided"
                    .to_owned(),
            ));
        }

        let condition = Condition::Regex {
            controller: controller.compile()?,
            action: action.compile()?,
        };
        self.conditions.push(condition);
        Ok(self)
    }

    /// Select when any of `descriptors` resolves to the current page.
    ///
    /// Computed descriptors are resolved on every evaluation, and the check is
    /// delegated to [`ViewContext::is_current_page`].
    pub fn add_options_condition<I>(&mut self, descriptors: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<RouteDescriptor>,
    {
        let descriptors = descriptors.into_iter().map(Into::into).collect();
        self.conditions.push(Condition::Options(descriptors));
        self
    }

    /// Select when `predicate` returns `true` for the current route.
    pub fn add_custom_condition<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&CurrentRoute) -> bool + Send + Sync + 'static,
    {
        self.conditions.push(Condition::Custom(Box::new(predicate)));
        self
    }

    /// Select when `predicate` returns `true` for the owning tab and the
    /// current route.
    ///
    /// The condition is skipped by [`is_selected`](Self::is_selected), which
    /// has no tab to pass.
    pub fn add_tab_condition<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&Tab, &CurrentRoute) -> bool + Send + Sync + 'static,
    {
        self.conditions.push(Condition::TabCustom(Box::new(predicate)));
        self
    }

    /// Whether `route` satisfies any registered condition.
    ///
    /// Conditions are evaluated in registration order and evaluation stops at
    /// the first match. Tab-scoped conditions never match here; use
    /// [`is_selected_for`](Self::is_selected_for) to include them.
    ///
    /// # Errors
    ///
    /// Propagates view context failures raised while checking options
    /// conditions.
    pub fn is_selected(&self, route: &CurrentRoute) -> Result<bool, MenuError> {
        self.evaluate(None, route)
    }

    /// Whether `route` satisfies any registered condition, with `tab` passed
    /// to tab-scoped conditions.
    ///
    /// # Errors
    ///
    /// Propagates view context failures raised while checking options
    /// conditions.
    pub fn is_selected_for(&self, tab: &Tab, route: &CurrentRoute) -> Result<bool, MenuError> {
        self.evaluate(Some(tab), route)
    }

    fn evaluate(&self, tab: Option<&Tab>, route: &CurrentRoute) -> Result<bool, MenuError> {
        for (index, condition) in self.conditions.iter().enumerate() {
            if condition.matches(self.view.as_ref(), tab, route)? {
                tracing::trace!(
                    condition = index,
                    kind = condition.kind(),
                    controller_path = %route.controller_path,
                    action = %route.action,
                    "Selection condition matched"
                );
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Number of registered conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether no conditions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Remove all conditions.
    pub fn clear(&mut self) {
        self.conditions.clear();
    }
}

impl std::fmt::Debug for PageSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSelector")
            .field(
                "conditions",
                &self.conditions.iter().map(Condition::kind).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::{ViewError, ViewErrorKind};
    use crate::html::HtmlView;
    use crate::renderer::StandardLinkRenderer;
    use crate::route::Route;
    use crate::{HtmlAttributes, ViewContext};

    fn view_at(url: &str, controller_path: &str, action: &str) -> Arc<HtmlView> {
        Arc::new(HtmlView::new(url, controller_path, action))
    }

    fn selector() -> PageSelector {
        PageSelector::new(view_at("/", "home", "index"))
    }

    #[test]
    fn test_empty_selector_never_matches() {
        let selector = selector();

        assert!(selector.is_empty());
        assert!(!selector.is_selected(&CurrentRoute::new("home", "index")).unwrap());
        assert!(!selector.is_selected(&CurrentRoute::default()).unwrap());
    }

    #[test]
    fn test_regex_requires_at_least_one_pattern() {
        let mut selector = selector();

        let err = selector
            .add_regex_condition(Pattern::Any, Pattern::Any)
            .unwrap_err();

        assert!(
            matches!(err, MenuError::InvalidConfiguration(_)),
            "Expected InvalidConfiguration, got {err:?}"
        );
        assert!(selector.is_empty());
    }

    #[test]
    fn test_regex_none_sides_are_any() {
        let err = PageSelector::on_matching_regex(
            view_at("/", "home", "index"),
            None::<&str>,
            None::<&str>,
        )
        .unwrap_err();

        assert!(matches!(err, MenuError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_regex_invalid_source() {
        let mut selector = selector();

        let err = selector.add_regex_condition("users(", Pattern::Any).unwrap_err();

        match err {
            MenuError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "users("),
            other => panic!("Expected InvalidPattern, got {other:?}"),
        }
    }

    #[test]
    fn test_controller_only_ignores_action() {
        let mut selector = selector();
        selector.add_regex_condition("^users", Pattern::Any).unwrap();

        assert!(selector.is_selected(&CurrentRoute::new("users", "index")).unwrap());
        assert!(selector.is_selected(&CurrentRoute::new("users", "destroy")).unwrap());
        assert!(!selector.is_selected(&CurrentRoute::new("admin/users", "index")).unwrap());
    }

    #[test]
    fn test_action_only_matches_any_controller() {
        let mut selector = selector();
        selector.add_regex_condition(Pattern::Any, "^edit$").unwrap();

        assert!(selector.is_selected(&CurrentRoute::new("users", "edit")).unwrap());
        assert!(selector.is_selected(&CurrentRoute::new("posts", "edit")).unwrap());
        assert!(!selector.is_selected(&CurrentRoute::new("posts", "editor")).unwrap());
    }

    #[test]
    fn test_both_patterns_must_match() {
        let mut selector = selector();
        selector
            .add_regex_condition(Regex::new("companies").unwrap(), "show")
            .unwrap();

        assert!(selector.is_selected(&CurrentRoute::new("companies", "show")).unwrap());
        assert!(!selector.is_selected(&CurrentRoute::new("companies", "index")).unwrap());
        assert!(!selector.is_selected(&CurrentRoute::new("people", "show")).unwrap());
    }

    #[test]
    fn test_regex_is_unanchored_search() {
        let selector = PageSelector::on_matching_regex(
            view_at("/", "home", "index"),
            "users",
            Pattern::Any,
        )
        .unwrap();

        assert!(selector.is_selected(&CurrentRoute::new("admin/users", "index")).unwrap());
    }

    #[test]
    fn test_options_any_descriptor_matches() {
        let view = view_at("/users", "users", "index");
        let selector = PageSelector::on_options(
            view,
            [Route::from("/accounts"), Route::options([("controller", "users")])],
        );

        assert!(selector.is_selected(&CurrentRoute::new("users", "index")).unwrap());
    }

    #[test]
    fn test_options_no_descriptor_matches() {
        let view = view_at("/users", "users", "index");
        let selector = PageSelector::on_options(view, ["/accounts", "/posts"]);

        assert!(!selector.is_selected(&CurrentRoute::new("users", "index")).unwrap());
    }

    #[test]
    fn test_options_computed_descriptor_resolves_at_evaluation() {
        let view = view_at("/users", "users", "index");
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let selector = PageSelector::on_options(
            view,
            [RouteDescriptor::computed(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Route::from("/users")
            })],
        );

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(selector.is_selected(&CurrentRoute::new("users", "index")).unwrap());
        assert!(selector.is_selected(&CurrentRoute::new("users", "index")).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_custom_condition() {
        let selector = PageSelector::on(view_at("/", "home", "index"), |route| {
            route.action == "dashboard"
        });

        assert!(selector.is_selected(&CurrentRoute::new("home", "dashboard")).unwrap());
        assert!(!selector.is_selected(&CurrentRoute::new("home", "index")).unwrap());
    }

    fn tab_with_id(view: Arc<HtmlView>, id: &str) -> Tab {
        let view = view as Arc<dyn ViewContext>;
        let renderer = Arc::new(StandardLinkRenderer::new(Arc::clone(&view)));
        let mut tab = Tab::new(view, renderer, "Reports", "/reports", None);
        tab.html_attributes_mut().insert("id", id);
        tab
    }

    #[test]
    fn test_tab_condition_reads_owning_tab() {
        let view = view_at("/reports", "reports", "index");
        let selector = PageSelector::on_tab(
            Arc::clone(&view) as Arc<dyn ViewContext>,
            |tab, route| tab.html_attributes().get("id") == Some(route.controller_path.as_str()),
        );
        let route = CurrentRoute::new("reports", "index");
        let reports = tab_with_id(Arc::clone(&view), "reports");
        let billing = tab_with_id(view, "billing");

        assert!(selector.is_selected_for(&reports, &route).unwrap());
        assert!(!selector.is_selected_for(&billing, &route).unwrap());
    }

    #[test]
    fn test_tab_condition_skipped_without_tab() {
        let mut selector = selector();
        selector.add_tab_condition(|_, _| true);

        assert_eq!(selector.len(), 1);
        assert!(!selector.is_selected(&CurrentRoute::default()).unwrap());
    }

    #[test]
    fn test_conditions_are_ored() {
        let view = view_at("/", "home", "index");
        let mut selector = PageSelector::new(view);
        selector
            .add_regex_condition("^admin", Pattern::Any)
            .unwrap()
            .add_options_condition(["/"]);

        assert_eq!(selector.len(), 2);
        assert!(selector.is_selected(&CurrentRoute::new("home", "index")).unwrap());
    }

    #[test]
    fn test_evaluation_short_circuits() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&later_calls);
        let mut selector = selector();
        selector
            .add_custom_condition(|_| true)
            .add_custom_condition(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            });

        assert!(selector.is_selected(&CurrentRoute::default()).unwrap());
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clear_removes_conditions() {
        let mut selector = selector();
        selector.add_custom_condition(|_| true);

        selector.clear();

        assert!(!selector.is_selected(&CurrentRoute::default()).unwrap());
    }

    struct FailingView;

    impl ViewContext for FailingView {
        fn current_route(&self) -> CurrentRoute {
            CurrentRoute::default()
        }

        fn is_current_page(&self, _route: &Route) -> Result<bool, ViewError> {
            Err(ViewError::route_not_found("no route matches"))
        }

        fn link_to(&self, _: &str, _: &Route, _: &HtmlAttributes) -> Result<String, ViewError> {
            Err(ViewError::new(ViewErrorKind::Render))
        }

        fn link_to_function(
            &self,
            _: &str,
            _: &str,
            _: &HtmlAttributes,
        ) -> Result<String, ViewError> {
            Err(ViewError::new(ViewErrorKind::Render))
        }
    }

    #[test]
    fn test_view_errors_propagate() {
        let selector = PageSelector::on_options(Arc::new(FailingView), ["/users"]);

        let err = selector.is_selected(&CurrentRoute::default()).unwrap_err();

        assert!(matches!(err, MenuError::View(ref e) if e.kind == ViewErrorKind::RouteNotFound));
    }

    #[test]
    fn test_regex_before_failing_options_short_circuits() {
        let mut selector = PageSelector::new(Arc::new(FailingView));
        selector
            .add_regex_condition(Pattern::Any, "index")
            .unwrap()
            .add_options_condition(["/users"]);

        assert!(selector.is_selected(&CurrentRoute::new("home", "index")).unwrap());
    }
}
