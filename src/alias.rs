//! Path aliases: `@name` prefixes standing for real directories,
//! e.g. `@app/views` -> `/srv/app/views`.

use kstring::KString;

use crate::{alist::AList,
            error::{ThemeError, ThemeErrorKind}};

pub const ALIAS_SIGIL: char = '@';

/// Turns a path that may start with an alias into a real path.
pub trait AliasResolver {
    fn resolve_alias(&self, path: &str) -> Result<String, ThemeError>;
}

#[derive(Debug, Clone, Default)]
pub struct Aliases {
    aliases: AList<KString, String>,
}

impl Aliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` (which must start with `@`, and may contain
    /// slashes, e.g. `@vendor/theme`) for `path`. An alias in `path`
    /// is resolved right away, so it must already be registered.
    pub fn set_alias(&mut self, name: &str, path: &str) -> Result<(), ThemeError> {
        let name = name.trim_end_matches('/');
        if ! name.starts_with(ALIAS_SIGIL) || name.len() < 2 {
            return Err(ThemeErrorKind::InvalidAliasName(name.to_string()).into())
        }
        let target = self.resolve_alias(path)?;
        let trimmed = target.trim_end_matches('/');
        let target =
            if trimmed.is_empty() && target.starts_with('/') {
                "/".to_string()
            } else {
                trimmed.to_string()
            };
        self.aliases.insert(KString::from_ref(name), target);
        Ok(())
    }

    pub fn remove_alias(&mut self, name: &str) {
        self.aliases.retain(|k, _| k.as_str() != name);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(|s| s.as_str())
    }

    /// The longest alias that `path` starts with, followed by the end
    /// of `path` or a slash.
    fn find(&self, path: &str) -> Option<(&str, &str)> {
        self.aliases.iter()
            .filter(|(name, _)| {
                path.strip_prefix(name.as_str()).map_or(
                    false,
                    |rest| rest.is_empty() || rest.starts_with('/'))
            })
            .max_by_key(|(name, _)| name.len())
            .map(|(name, target)| (name.as_str(), target.as_str()))
    }
}

impl AliasResolver for Aliases {
    /// Paths not starting with `@` are returned unchanged.
    fn resolve_alias(&self, path: &str) -> Result<String, ThemeError> {
        if ! path.starts_with(ALIAS_SIGIL) {
            return Ok(path.to_string())
        }
        if let Some((name, target)) = self.find(path) {
            let rest = &path[name.len()..];
            if target == "/" {
                if let Some(rest) = rest.strip_prefix('/') {
                    return Ok(format!("/{rest}"))
                }
            }
            Ok(format!("{target}{rest}"))
        } else {
            let alias = path.split('/').next().unwrap_or(path);
            Err(ThemeErrorKind::UnknownAlias {
                alias: alias.to_string(),
                path: path.to_string(),
            }.into())
        }
    }
}
