//! Error types for menu assembly and rendering.
//!
//! [`MenuError`] is returned by every fallible menu operation. Failures raised by
//! the [`ViewContext`](crate::ViewContext) are carried as [`ViewError`] and pass
//! through [`MenuError::View`] without translation.

/// Semantic categories for view context failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ViewErrorKind {
    /// Route descriptor could not be resolved to a URL.
    RouteNotFound,
    /// Markup generation failed.
    Render,
    /// Other/unknown error category.
    Other,
}

/// Error raised by a [`ViewContext`](crate::ViewContext) implementation.
#[derive(Debug)]
pub struct ViewError {
    /// Semantic error category.
    pub kind: ViewErrorKind,
    message: Option<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ViewError {
    /// Create a new view error.
    #[must_use]
    pub fn new(kind: ViewErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Attach a human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a route-not-found error with a message.
    #[must_use]
    pub fn route_not_found(message: impl Into<String>) -> Self {
        Self::new(ViewErrorKind::RouteNotFound).with_message(message)
    }

    /// Error message, if one was attached.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind_str = match self.kind {
            ViewErrorKind::RouteNotFound => "Route not found",
            ViewErrorKind::Render => "Render failed",
            ViewErrorKind::Other => "View error",
        };

        write!(f, "{kind_str}")?;

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error returned by menu assembly and rendering.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// Selection rule was registered without enough information to evaluate it.
    #[error("Invalid menu configuration: {0}")]
    InvalidConfiguration(String),
    /// Pattern source failed to compile.
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// Pattern source as given by the caller.
        pattern: String,
        /// Compilation error.
        #[source]
        source: regex::Error,
    },
    /// Failure raised by the view context.
    #[error(transparent)]
    View(#[from] ViewError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_kind_only() {
        let err = ViewError::new(ViewErrorKind::Render);
        assert_eq!(err.to_string(), "Render failed");
    }

    #[test]
    fn test_display_with_message_and_source() {
        let io = std::io::Error::other("disk gone");
        let err = ViewError::route_not_found("users#show").with_source(io);
        assert_eq!(err.to_string(), "Route not found: users#show: disk gone");
        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_menu_error_is_transparent_for_view_errors() {
        let err: MenuError = ViewError::route_not_found("missing").into();
        assert_eq!(err.to_string(), "Route not found: missing");
        assert!(matches!(err, MenuError::View(ref e) if e.kind == ViewErrorKind::RouteNotFound));
    }
}
