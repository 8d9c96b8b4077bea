//! The registry of themes and the choice of the current one.

use kstring::KString;

use crate::{alias::Aliases,
            alist::AList,
            ancestors::ThemeClasses,
            error::{ThemeError, ThemeErrorKind},
            pathmap::PathMap,
            theme::{Theme, InitContext}};

#[derive(Debug, Clone)]
pub struct ThemeManager {
    themes: AList<KString, Theme>,
    /// Path map shared by all themes, overriding the seed layer but
    /// overridden by each theme's own map.
    pub path_map: PathMap,
    /// Assets of the application, registered before the theme's.
    pub assets: Vec<String>,
    pub app_view_path: String,
    pub aliases: Aliases,
    pub classes: ThemeClasses,
    default_theme: Option<KString>,
    current: Option<KString>,
    is_bootstrapped: bool,
}

impl ThemeManager {
    pub fn new(app_view_path: &str, aliases: Aliases, classes: ThemeClasses) -> Self {
        ThemeManager {
            themes: AList::new(),
            path_map: PathMap::new(),
            assets: Vec::new(),
            app_view_path: app_view_path.to_string(),
            aliases,
            classes,
            default_theme: None,
            current: None,
            is_bootstrapped: false,
        }
    }

    /// Registers `theme`, replacing one with the same name. Its class
    /// must come from `self.classes`.
    pub fn add_theme(&mut self, theme: Theme) -> Result<(), ThemeError> {
        self.classes.check(theme.class)?;
        self.themes.insert(theme.name.clone(), theme);
        Ok(())
    }

    pub fn has_theme(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// In registration order.
    pub fn theme_names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(|k| k.as_str())
    }

    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    pub fn set_default_theme(&mut self, name: &str) {
        self.default_theme = Some(KString::from_ref(name));
    }

    /// The explicitly set default theme, or else the first registered
    /// one.
    pub fn default_theme(&self) -> Option<&str> {
        match &self.default_theme {
            Some(name) => Some(name.as_str()),
            None => self.theme_names().next(),
        }
    }

    /// Select the current theme. Whether it exists is only checked
    /// when it is used.
    pub fn set_theme(&mut self, name: &str) -> Result<(), ThemeError> {
        if name.is_empty() {
            return Err(ThemeErrorKind::NoThemeToSet.into())
        }
        self.current = Some(KString::from_ref(name));
        Ok(())
    }

    pub fn current_theme_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The current theme (the default one if none was set),
    /// initializing it on first use.
    pub fn theme(&mut self) -> Result<&Theme, ThemeError> {
        let name = match &self.current {
            Some(name) => name.clone(),
            None => KString::from_ref(
                self.default_theme().ok_or(ThemeErrorKind::NoThemeToSet)?),
        };
        let ctx = InitContext {
            app_view_path: &self.app_view_path,
            aliases: &self.aliases,
            classes: &self.classes,
            manager_path_map: &self.path_map,
        };
        let theme = self.themes.get_mut(name.as_str()).ok_or_else(
            || ThemeErrorKind::UnknownTheme(name.clone()))?;
        if ! theme.is_initialized() {
            theme.init(&ctx)?;
        }
        Ok(theme)
    }

    /// The application's assets followed by the current theme's.
    pub fn assets(&mut self) -> Result<Vec<String>, ThemeError> {
        let mut assets = self.assets.clone();
        assets.extend(self.theme()?.assets.iter().cloned());
        Ok(assets)
    }

    /// The name of the settings model of the current theme's class,
    /// if any class in its hierarchy declares one.
    pub fn settings(&mut self) -> Result<Option<String>, ThemeError> {
        let class = self.theme()?.class;
        Ok(self.classes.find_settings(class).map(|s| s.to_string()))
    }

    /// Select `preferred` if it's a registered theme, otherwise the
    /// default theme, and initialize it. Only the first call does
    /// anything.
    pub fn bootstrap(&mut self, preferred: Option<&str>) -> Result<(), ThemeError> {
        if self.is_bootstrapped {
            return Ok(())
        }
        self.is_bootstrapped = true;

        let name = match preferred {
            Some(name) if self.has_theme(name) => name.to_string(),
            _ => self.default_theme().ok_or(ThemeErrorKind::NoThemeToSet)?.to_string(),
        };
        self.set_theme(&name)?;
        self.theme()?;
        Ok(())
    }
}
