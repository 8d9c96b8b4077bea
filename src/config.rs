//! Theme configuration, read from a JSON file:
//!
//! ```json
//! {
//!     "aliases": {"@app": "/srv/app"},
//!     "app_view_path": "@app/views",
//!     "base_dir": "/srv/thememanager",
//!     "classes": {
//!         "basic": {"dir": "/srv/themes/basic", "settings": "BasicSettings"},
//!         "fancy": {"dir": "/srv/themes/fancy", "parent": "basic"}
//!     },
//!     "path_map": {"@app/mail": "$themedViewPaths/mail"},
//!     "assets": ["AppAsset"],
//!     "default_theme": "fancy",
//!     "themes": [
//!         {"name": "fancy", "label": "Fancy", "class": "fancy",
//!          "path_map": {"@app/views": ["$themedViewPaths", "@app/extra"]}}
//!     ]
//! }
//! ```

use std::path::Path;

use anyhow::{Result, Context, anyhow};
use kstring::KString;
use serde::Deserialize;

use crate::{alias::Aliases,
            alist::AList,
            ancestors::{ClassDecl, ThemeClasses},
            pathmap::PathMap,
            theme::Theme,
            theme_manager::ThemeManager,
            util::{getenv_or, getenv}};

pub const CONFIG_ENV_VAR: &str = "THEMEMAP_CONFIG";
pub const THEME_ENV_VAR: &str = "THEMEMAP_THEME";
pub const DEFAULT_CONFIG_PATH: &str = "thememap.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    pub class: String,
    #[serde(default)]
    pub assets: Vec<String>,
    /// Replaces the default path map of the theme if given.
    #[serde(default)]
    pub path_map: Option<PathMap>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Registered in the given order, later ones may use earlier ones.
    #[serde(default)]
    pub aliases: AList<String, String>,
    pub app_view_path: String,
    /// Directory of the base theme class.
    pub base_dir: String,
    #[serde(default)]
    pub classes: AList<KString, ClassDecl>,
    /// The manager-level path map.
    #[serde(default)]
    pub path_map: PathMap,
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub default_theme: Option<String>,
    #[serde(default)]
    pub themes: Vec<ThemeConfig>,
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).with_context(
            || anyhow!("parsing theme configuration"))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).with_context(
            || anyhow!("can't read theme configuration {:?}",
                       path.to_string_lossy()))?;
        Self::from_json(&s).with_context(
            || anyhow!("in file {:?}", path.to_string_lossy()))
    }

    /// Path given, or from `THEMEMAP_CONFIG`, or `thememap.json`.
    pub fn load_from_env(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_string(),
            None => getenv_or(CONFIG_ENV_VAR, Some(DEFAULT_CONFIG_PATH))?,
        };
        Self::load(path)
    }

    /// Set up the aliases, classes and themes. Themes are not
    /// initialized yet (see `ThemeManager::bootstrap`).
    pub fn into_manager(self) -> Result<ThemeManager> {
        let mut aliases = Aliases::new();
        for (name, path) in &self.aliases {
            aliases.set_alias(name, path).with_context(
                || anyhow!("setting alias {name:?}"))?;
        }

        let mut classes = ThemeClasses::new(&self.base_dir);
        classes.declare_all(&self.classes).with_context(
            || anyhow!("declaring theme classes"))?;

        let mut themes = Vec::new();
        for tc in self.themes {
            let class = classes.lookup(&tc.class).with_context(
                || anyhow!("theme {:?}", tc.name))?;
            let mut theme = Theme::new(&tc.name, class, &classes)
                .with_assets(tc.assets);
            if let Some(label) = &tc.label {
                theme = theme.with_label(label);
            }
            if let Some(path_map) = tc.path_map {
                theme = theme.with_path_map(path_map);
            }
            themes.push(theme);
        }

        let mut manager = ThemeManager::new(&self.app_view_path, aliases, classes);
        manager.path_map = self.path_map;
        manager.assets = self.assets;
        for theme in themes {
            manager.add_theme(theme)?;
        }
        if let Some(default_theme) = &self.default_theme {
            manager.set_default_theme(default_theme);
        }
        Ok(manager)
    }
}

/// The theme to use: the one given, or from `THEMEMAP_THEME`.
pub fn preferred_theme(theme: Option<&str>) -> Result<Option<String>> {
    match theme {
        Some(t) => Ok(Some(t.to_string())),
        None => getenv(THEME_ENV_VAR),
    }
}
