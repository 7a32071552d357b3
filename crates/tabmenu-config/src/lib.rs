//! Declarative menu definitions.
//!
//! Parses TOML menu files with serde and builds a [`MenuBuilder`] from them,
//! so a menu's tabs and selection rules can live next to the application's
//! other configuration instead of in view code.
//!
//! ```toml
//! [defaults]
//! renderer = "link"
//! html = { class = "tab" }
//! selected = { class = "tab selected" }
//!
//! [[tabs]]
//! name = "Home"
//! url = "/"
//!
//! [[tabs]]
//! name = "Users"
//! url = "${APP_ROOT:-}/users"
//! selected_on_options = ["/users/new", { controller = "accounts" }]
//! selected_on_match = { controller = "^users" }
//! ```
//!
//! ## Environment Variable Expansion
//!
//! Tab `url` values and URL entries of `selected_on_options` support:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tabmenu::{
    HtmlAttributes, MenuBuilder, MenuDefaults, MenuError, PageSelector, RendererKind, Route,
    ViewContext,
};

use crate::expand::expand_env;

/// Menu definition.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Defaults applied to every tab.
    pub defaults: DefaultsConfig,
    /// Tabs in display order.
    pub tabs: Vec<TabConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Defaults applied to every tab.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Built-in link renderer.
    pub renderer: RendererKind,
    /// Base HTML attributes.
    pub html: HtmlAttributes,
    /// Attributes merged over `html` when a tab is selected.
    pub selected: HtmlAttributes,
}

/// A single tab.
#[derive(Debug, Deserialize)]
pub struct TabConfig {
    /// Link text.
    pub name: String,
    /// Link URL. Mutually exclusive with `route`.
    #[serde(default)]
    pub url: Option<String>,
    /// Url options (`controller`, `action`, ...). Mutually exclusive with `url`.
    #[serde(default)]
    pub route: Option<BTreeMap<String, String>>,
    /// HTML attributes merged over the defaults.
    #[serde(default)]
    pub html: Option<HtmlAttributes>,
    /// Selected-state attributes merged over the defaults.
    #[serde(default)]
    pub selected: Option<HtmlAttributes>,
    /// Renderer override for this tab.
    #[serde(default)]
    pub renderer: Option<RendererKind>,
    /// Pages on which the tab is selected.
    #[serde(default)]
    pub selected_on_options: Vec<Route>,
    /// Controller/action patterns on which the tab is selected.
    #[serde(default)]
    pub selected_on_match: Option<MatchConfig>,
    /// Never show the tab.
    #[serde(default)]
    pub hidden: bool,
}

/// Regex selection rule.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Pattern searched in the current controller path.
    pub controller: Option<String>,
    /// Pattern searched in the current action.
    pub action: Option<String>,
}

impl TabConfig {
    /// Link target of the tab.
    fn target(&self) -> Option<Route> {
        match (&self.url, &self.route) {
            (Some(url), None) => Some(Route::Url(url.clone())),
            (None, Some(route)) => Some(Route::Options(route.clone())),
            _ => None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Menu configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Menu configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`tabs[1].url`").
        field: String,
        /// Error message (e.g., "${`APP_ROOT`} not set").
        message: String,
    },
    /// Menu assembly error (e.g., invalid selection pattern).
    #[error(transparent)]
    Menu(#[from] MenuError),
}

impl MenuConfig {
    /// Load a menu definition from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, can't be parsed, references an
    /// unset environment variable, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            tabs = config.tabs.len(),
            "Loaded menu configuration"
        );
        Ok(config)
    }

    /// Parse a menu definition from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, environment expansion or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Expand environment variables in URL fields.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        for (index, tab) in self.tabs.iter_mut().enumerate() {
            if let Some(url) = &tab.url {
                tab.url = Some(expand_env(url, &format!("tabs[{index}].url"))?);
            }
            for (option_index, route) in tab.selected_on_options.iter_mut().enumerate() {
                if let Route::Url(url) = route {
                    let field = format!("tabs[{index}].selected_on_options[{option_index}]");
                    *url = expand_env(url, &field)?;
                }
            }
        }
        Ok(())
    }

    /// Validate tab definitions.
    ///
    /// Called automatically by [`load`](Self::load) and
    /// [`from_toml_str`](Self::from_toml_str).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` describing the first invalid tab.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, tab) in self.tabs.iter().enumerate() {
            if tab.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "tabs[{index}].name cannot be empty"
                )));
            }
            if tab.target().is_none() {
                return Err(ConfigError::Validation(format!(
                    "tabs[{index}] ({}) requires exactly one of url or route",
                    tab.name
                )));
            }
            if let Some(route) = &tab.route {
                require_controller(route, &format!("tabs[{index}].route"))?;
            }
            for (option_index, route) in tab.selected_on_options.iter().enumerate() {
                if let Route::Options(options) = route {
                    let field = format!("tabs[{index}].selected_on_options[{option_index}]");
                    require_controller(options, &field)?;
                }
            }
            if let Some(rule) = &tab.selected_on_match
                && rule.controller.is_none()
                && rule.action.is_none()
            {
                return Err(ConfigError::Validation(format!(
                    "tabs[{index}].selected_on_match requires controller or action"
                )));
            }
        }
        Ok(())
    }

    /// Build a menu bound to `view`.
    ///
    /// Tabs without `selected_on_options` or `selected_on_match` are selected
    /// on their own target.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Menu` if a selection pattern does not compile.
    pub fn build(&self, view: Arc<dyn ViewContext>) -> Result<MenuBuilder, ConfigError> {
        self.validate()?;

        let defaults = MenuDefaults {
            html_attributes: self.defaults.html.clone(),
            selected_attributes: self.defaults.selected.clone(),
            renderer: Some(self.defaults.renderer.build(Arc::clone(&view))),
        };
        let mut menu = MenuBuilder::with_defaults(view, defaults);

        for tab_config in &self.tabs {
            let Some(target) = tab_config.target() else {
                continue;
            };
            let view = Arc::clone(menu.view());
            let selector = build_selector(tab_config, &target, Arc::clone(&view))?;

            let tab = menu.add_tab(tab_config.name.clone(), target, Some(selector));
            if let Some(html) = &tab_config.html {
                tab.html_attributes_mut().extend(html.iter());
            }
            if let Some(selected) = &tab_config.selected {
                tab.selected_attributes_mut().extend(selected.iter());
            }
            if let Some(kind) = tab_config.renderer {
                tab.set_renderer(kind.build(view));
            }
            if tab_config.hidden {
                tab.visible_on(|_, _| false);
            }
        }

        tracing::debug!(tabs = menu.len(), "Built menu from configuration");
        Ok(menu)
    }
}

fn build_selector(
    tab: &TabConfig,
    target: &Route,
    view: Arc<dyn ViewContext>,
) -> Result<PageSelector, MenuError> {
    let mut selector = PageSelector::new(view);
    if !tab.selected_on_options.is_empty() {
        selector.add_options_condition(tab.selected_on_options.iter().cloned());
    }
    if let Some(rule) = &tab.selected_on_match {
        selector.add_regex_condition(rule.controller.as_deref(), rule.action.as_deref())?;
    }
    if selector.is_empty() {
        selector.add_options_condition([target.clone()]);
    }
    Ok(selector)
}

/// Require url options to name a controller.
fn require_controller(options: &BTreeMap<String, String>, field: &str) -> Result<(), ConfigError> {
    if options.get("controller").is_none_or(String::is_empty) {
        return Err(ConfigError::Validation(format!(
            "{field} requires a controller"
        )));
    }
    Ok(())
}
