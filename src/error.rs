use kstring::KString;

use crate::def_boxed_thiserror;

def_boxed_thiserror!(ThemeError, pub enum ThemeErrorKind {
    #[error("undefined variable {name:?} in expression {expr:?}")]
    UndefinedVariable { name: KString, expr: String },
    #[error("path map entry {key:?} never resolves to a path, still refers to {expr:?}")]
    UnresolvedVariable { key: KString, expr: String },
    #[error("unknown alias {alias:?} in path {path:?}")]
    UnknownAlias { alias: String, path: String },
    #[error("invalid alias name {0:?}, must start with '@'")]
    InvalidAliasName(String),
    #[error("unknown theme class {0:?}")]
    UnknownClass(KString),
    #[error("theme class {0:?} is declared twice")]
    DuplicateClass(KString),
    #[error("unknown theme: {0}")]
    UnknownTheme(KString),
    #[error("no theme to set")]
    NoThemeToSet,
    #[error("theme {0:?} has not been initialized")]
    NotInitialized(KString),
});
