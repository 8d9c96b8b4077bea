use kstring::KString;

use crate::{alias::AliasResolver,
            ancestors::{ClassId, ThemeClasses},
            error::{ThemeError, ThemeErrorKind},
            pathmap::{PathMap, PathValue, CompiledPathMap,
                      merge_layers, compile_path_map}};

/// Bound to the `views` directories of the theme class and its
/// ancestors.
pub const THEMED_VIEW_PATHS: &str = "$themedViewPaths";
/// Bound to `widgets` below each of `$themedViewPaths`.
pub const THEMED_WIDGET_PATHS: &str = "$themedWidgetPaths";

/// What a theme needs from its surroundings to compile its path map.
pub struct InitContext<'c> {
    /// The application's own view directory, searched in the themes.
    pub app_view_path: &'c str,
    pub aliases: &'c dyn AliasResolver,
    pub classes: &'c ThemeClasses,
    /// Shared path map from the manager, overridden by the theme's.
    pub manager_path_map: &'c PathMap,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: KString,
    pub label: String,
    pub class: ClassId,
    /// Assets to register for this theme, after the manager's.
    pub assets: Vec<String>,
    /// Raw path map of this theme instance, the highest priority layer.
    pub path_map: PathMap,
    compiled: Option<CompiledPathMap>,
}

impl Theme {
    pub fn new(name: &str, class: ClassId, classes: &ThemeClasses) -> Self {
        Theme {
            name: KString::from_ref(name),
            label: name.to_string(),
            class,
            assets: Vec::new(),
            path_map: Self::default_path_map(classes.base_dir()),
            compiled: None,
        }
    }

    /// Widget views of the base theme class are searched in the
    /// `widgets` subdirectories of the themed view paths.
    pub fn default_path_map(base_dir: &str) -> PathMap {
        [
            (KString::from(format!("{base_dir}/widgets/views")),
             PathValue::from(THEMED_WIDGET_PATHS)),
            (KString::from_static(THEMED_WIDGET_PATHS),
             PathValue::from(format!("{THEMED_VIEW_PATHS}/widgets"))),
        ].into_iter().collect()
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_assets(mut self, assets: Vec<String>) -> Self {
        self.assets = assets;
        self
    }

    /// Replaces the default path map.
    pub fn with_path_map(mut self, path_map: PathMap) -> Self {
        self.path_map = path_map;
        self
    }

    /// The lowest priority layer: `$themedViewPaths` from the class
    /// hierarchy, and the application's view directory mapped to it.
    pub fn seed_path_map(&self, ctx: &InitContext) -> PathMap {
        [
            (KString::from_static(THEMED_VIEW_PATHS),
             PathValue::Many(ctx.classes.themed_view_paths(self.class))),
            (KString::from_ref(ctx.app_view_path),
             PathValue::from(THEMED_VIEW_PATHS)),
        ].into_iter().collect()
    }

    /// Compile the path map from the seed, the manager's and this
    /// theme's layers. On error the theme stays uninitialized.
    pub fn init(&mut self, ctx: &InitContext) -> Result<(), ThemeError> {
        ctx.classes.check(self.class)?;
        let seed = self.seed_path_map(ctx);
        let merged = merge_layers([&seed, ctx.manager_path_map, &self.path_map]);
        self.compiled = Some(compile_path_map(merged, ctx.aliases)?);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.compiled.is_some()
    }

    pub fn compiled_path_map(&self) -> Result<&CompiledPathMap, ThemeError> {
        self.compiled.as_ref().ok_or_else(
            || ThemeErrorKind::NotInitialized(self.name.clone()).into())
    }

    /// The themed version of the file at `path` if there is one, else
    /// `path`.
    pub fn apply_to(&self, path: &str) -> Result<String, ThemeError> {
        Ok(self.compiled_path_map()?.apply_to(path))
    }
}
