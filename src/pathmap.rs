//! Path maps: which directories to search instead of (or before) a
//! given directory. Raw maps may use variables (see `var`); compiling
//! resolves them and yields a `CompiledPathMap` of plain paths.

use std::path::Path;

use itertools::Itertools;
use kstring::KString;
use serde::{Serialize, Deserialize};

use crate::{alias::AliasResolver,
            alist::AList,
            error::ThemeError,
            path::{normalize_path, strip_dir_prefix, join_path},
            substitute::substitute_vars,
            var::is_var};

/// One or several literal paths or expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathValue {
    One(String),
    Many(Vec<String>),
}

impl PathValue {
    pub fn as_slice(&self) -> &[String] {
        match self {
            PathValue::One(s) => std::slice::from_ref(s),
            PathValue::Many(v) => v,
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            PathValue::One(s) => vec![s],
            PathValue::Many(v) => v,
        }
    }

    /// Whether any of the items is an expression.
    pub fn has_vars(&self) -> bool {
        self.as_slice().iter().any(|s| is_var(s))
    }
}

impl From<&str> for PathValue {
    fn from(s: &str) -> Self {
        PathValue::One(s.to_string())
    }
}

impl From<String> for PathValue {
    fn from(s: String) -> Self {
        PathValue::One(s)
    }
}

impl From<Vec<String>> for PathValue {
    fn from(v: Vec<String>) -> Self {
        PathValue::Many(v)
    }
}

impl<const N: usize> From<[&str; N]> for PathValue {
    fn from(v: [&str; N]) -> Self {
        PathValue::Many(v.iter().map(|s| s.to_string()).collect())
    }
}

/// Raw path map, keyed by directory (or variable), in declaration
/// order.
pub type PathMap = AList<KString, PathValue>;

/// Merge path map layers; for keys present in several layers the
/// value from the later layer replaces the earlier one (it is not
/// appended to it), at the position of the first occurrence.
pub fn merge_layers<'l>(layers: impl IntoIterator<Item = &'l PathMap>) -> PathMap {
    let mut merged = PathMap::new();
    for layer in layers {
        for (k, v) in layer {
            merged.insert(k.clone(), v.clone());
        }
    }
    merged
}

/// Directory -> directories to search, in search order. Keys and
/// values are alias-resolved paths, values are unique per key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledPathMap(AList<String, Vec<String>>);

impl CompiledPathMap {
    pub fn get(&self, dir: &str) -> Option<&[String]> {
        self.0.get(dir).map(|v| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The paths to try instead of `path`, in order: for every key
    /// that `path` lies in (in map order), the key prefix replaced by
    /// each of its search directories.
    pub fn candidates(&self, path: &str) -> Vec<String> {
        let path = normalize_path(path);
        let mut res = Vec::new();
        for (from, tos) in self.iter() {
            if let Some(rest) = strip_dir_prefix(&path, &normalize_path(from)) {
                for to in tos {
                    res.push(join_path(&normalize_path(to), rest));
                }
            }
        }
        res
    }

    /// The first candidate for `path` that is an existing file, or
    /// `path` itself if there is none.
    pub fn apply_to(&self, path: &str) -> String {
        self.candidates(path).into_iter()
            .find(|candidate| Path::new(candidate).is_file())
            .unwrap_or_else(|| path.to_string())
    }
}

/// Resolve the variables in `map`, then for each remaining entry run
/// keys and values through `aliases`, remove duplicate values (also
/// ones that only become equal through an alias; the first declared
/// occurrence counts) and reverse them (the last declared directory is
/// searched first).
pub fn compile_path_map(
    map: PathMap,
    aliases: &dyn AliasResolver
) -> Result<CompiledPathMap, ThemeError> {
    let resolved = substitute_vars(map)?;
    let mut res = AList::new();
    for (from, tos) in resolved {
        let tos = tos.iter()
            .map(|to| aliases.resolve_alias(to))
            .collect::<Result<Vec<_>, _>>()?;
        let mut tos: Vec<String> = tos.into_iter().unique().collect();
        tos.reverse();
        res.insert(aliases.resolve_alias(&from)?, tos);
    }
    Ok(CompiledPathMap(res))
}
