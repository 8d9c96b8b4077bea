//! Theme type hierarchies and the directories of a theme's ancestors.
//!
//! A theme type lives in a directory (with its `views/` etc.) and
//! extends a parent type, up to the common base theme type. Views are
//! searched in the directories of all the types in the chain.

use std::fmt::Debug;

use kstring::KString;

use crate::{alist::AList,
            error::{ThemeError, ThemeErrorKind},
            warn};

/// Ancestor chains longer than this are cut off.
pub const MAX_DEPTH: usize = 10;

pub trait TypeHierarchy {
    type Type: Clone + PartialEq + Debug;

    fn base_directory_of(&self, ty: &Self::Type) -> &str;

    /// None if `ty` has no parent (only the base type should be like
    /// that).
    fn parent_of(&self, ty: &Self::Type) -> Option<Self::Type>;
}

/// The directories of `ty` and its ancestors, most derived first,
/// excluding `stop` and everything above it. At most `MAX_DEPTH`
/// directories are returned; a longer chain, or one not reaching
/// `stop`, is cut off with a warning but not reported as an error.
pub fn find_parent_paths<H: TypeHierarchy + ?Sized>(
    h: &H,
    ty: &H::Type,
    stop: &H::Type,
) -> Vec<String> {
    let mut dirs = Vec::new();
    if ty == stop {
        return dirs
    }
    let mut current = ty.clone();
    for _ in 0..MAX_DEPTH {
        dirs.push(h.base_directory_of(&current).to_string());
        match h.parent_of(&current) {
            Some(parent) if parent == *stop => return dirs,
            Some(parent) => current = parent,
            None => {
                warn!("theme type {current:?} has no parent, never reached {stop:?}");
                return dirs
            }
        }
    }
    warn!("ancestors of theme type {ty:?} cut off after {MAX_DEPTH} levels");
    dirs
}

/// `views` subdirectory of each of the ancestor directories.
pub fn build_themed_view_paths<H: TypeHierarchy + ?Sized>(
    h: &H,
    ty: &H::Type,
    stop: &H::Type,
) -> Vec<String> {
    find_parent_paths(h, ty, stop).into_iter()
        .map(|dir| format!("{dir}/views"))
        .collect()
}


// ------------------------------------------------------------------
// Declared theme classes

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(usize);

#[derive(Debug, Clone)]
struct ThemeClass {
    name: KString,
    dir: String,
    parent: Option<ClassId>,
    settings: Option<KString>,
}

/// Declaration of a theme class as it comes from configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassDecl {
    pub dir: String,
    /// None for classes extending the base class directly.
    #[serde(default)]
    pub parent: Option<String>,
    /// Name of the settings model used by themes of this class and
    /// the classes derived from it.
    #[serde(default)]
    pub settings: Option<String>,
}

/// Theme classes, declared by name with their directory and
/// parent. A parent has to be declared before its children, so there
/// can't be cycles.
#[derive(Debug, Clone)]
pub struct ThemeClasses {
    classes: Vec<ThemeClass>,
}

pub const BASE_CLASS: &str = "Theme";

impl ThemeClasses {
    /// Just the base class, living in `base_dir`.
    pub fn new(base_dir: &str) -> Self {
        ThemeClasses {
            classes: vec![ThemeClass {
                name: KString::from_static(BASE_CLASS),
                dir: base_dir.to_string(),
                parent: None,
                settings: None,
            }]
        }
    }

    pub fn base(&self) -> ClassId {
        ClassId(0)
    }

    pub fn base_dir(&self) -> &str {
        &self.classes[0].dir
    }

    pub fn lookup(&self, name: &str) -> Result<ClassId, ThemeError> {
        self.classes.iter().position(|c| c.name.as_str() == name)
            .map(ClassId)
            .ok_or_else(|| ThemeErrorKind::UnknownClass(KString::from_ref(name)).into())
    }

    /// `id` if it was handed out by this registry.
    pub fn check(&self, id: ClassId) -> Result<ClassId, ThemeError> {
        if id.0 < self.classes.len() {
            Ok(id)
        } else {
            Err(ThemeErrorKind::UnknownClass(KString::from(format!("#{}", id.0))).into())
        }
    }

    pub fn name_of(&self, id: ClassId) -> &str {
        &self.classes[id.0].name
    }

    pub fn declare(&mut self, name: &str, decl: &ClassDecl) -> Result<ClassId, ThemeError> {
        if self.lookup(name).is_ok() {
            return Err(ThemeErrorKind::DuplicateClass(KString::from_ref(name)).into())
        }
        let parent = match &decl.parent {
            Some(parent) => self.lookup(parent)?,
            None => self.base(),
        };
        self.classes.push(ThemeClass {
            name: KString::from_ref(name),
            dir: decl.dir.clone(),
            parent: Some(parent),
            settings: decl.settings.as_deref().map(KString::from_ref),
        });
        Ok(ClassId(self.classes.len() - 1))
    }

    /// Declare all of `decls`, in whatever order makes the parents
    /// known first.
    pub fn declare_all(&mut self, decls: &AList<KString, ClassDecl>) -> Result<(), ThemeError> {
        let mut todo: Vec<(&KString, &ClassDecl)> = decls.iter().collect();
        loop {
            let before = todo.len();
            let mut rest = Vec::new();
            for (name, decl) in todo {
                let parent_known = decl.parent.as_deref().map_or(
                    true, |parent| self.lookup(parent).is_ok());
                if parent_known {
                    self.declare(name, decl)?;
                } else {
                    rest.push((name, decl));
                }
            }
            if rest.is_empty() {
                return Ok(())
            }
            if rest.len() == before {
                // Only unknown parents or cycles are left
                let parent = rest[0].1.parent.as_deref().unwrap_or(BASE_CLASS);
                return Err(ThemeErrorKind::UnknownClass(KString::from_ref(parent)).into())
            }
            todo = rest;
        }
    }

    /// The settings name declared by `id` or the nearest of its
    /// ancestors that declares one.
    pub fn find_settings(&self, id: ClassId) -> Option<&str> {
        let mut current = Some(id);
        while let Some(id) = current {
            let class = &self.classes[id.0];
            if let Some(settings) = &class.settings {
                return Some(settings.as_str())
            }
            current = class.parent;
        }
        None
    }

    pub fn themed_view_paths(&self, id: ClassId) -> Vec<String> {
        build_themed_view_paths(self, &id, &self.base())
    }
}

impl TypeHierarchy for ThemeClasses {
    type Type = ClassId;

    fn base_directory_of(&self, ty: &ClassId) -> &str {
        &self.classes[ty.0].dir
    }

    fn parent_of(&self, ty: &ClassId) -> Option<ClassId> {
        self.classes[ty.0].parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(dir: &str, parent: Option<&str>) -> ClassDecl {
        ClassDecl {
            dir: dir.to_string(),
            parent: parent.map(|s| s.to_string()),
            settings: None,
        }
    }

    /// A chain of `n` classes below the base, `c1` the most derived.
    fn chain(n: usize) -> (ThemeClasses, ClassId) {
        let mut classes = ThemeClasses::new("/base");
        let mut parent: Option<String> = None;
        let mut id = classes.base();
        for i in (1..=n).rev() {
            id = classes.declare(&format!("c{i}"),
                                 &decl(&format!("/t/c{i}"), parent.as_deref()))
                .unwrap();
            parent = Some(format!("c{i}"));
        }
        (classes, id)
    }

    #[test]
    fn t_find_parent_paths() {
        let (classes, id) = chain(2);
        assert_eq!(find_parent_paths(&classes, &id, &classes.base()),
                   vec!["/t/c1", "/t/c2"]);
        assert_eq!(classes.themed_view_paths(id),
                   vec!["/t/c1/views", "/t/c2/views"]);
    }

    #[test]
    fn t_stop_type_itself() {
        let (classes, id) = chain(1);
        assert_eq!(find_parent_paths(&classes, &classes.base(), &classes.base()),
                   Vec::<String>::new());
        assert_eq!(find_parent_paths(&classes, &id, &id), Vec::<String>::new());
        assert_eq!(classes.themed_view_paths(classes.base()), Vec::<String>::new());
    }

    #[test]
    fn t_check() {
        let (classes, id) = chain(1);
        assert_eq!(classes.check(id).unwrap(), id);
        let (other, far) = chain(3);
        assert_eq!(other.check(far).unwrap(), far);
        assert!(matches!(classes.check(far).unwrap_err().kind(),
                         ThemeErrorKind::UnknownClass(_)));
    }

    #[test]
    fn t_depth_bound() {
        let (classes, id) = chain(MAX_DEPTH);
        let dirs = find_parent_paths(&classes, &id, &classes.base());
        assert_eq!(dirs.len(), MAX_DEPTH);
        assert_eq!(dirs.last().unwrap(), &format!("/t/c{MAX_DEPTH}"));

        // Deeper chains are cut off silently
        let (classes, id) = chain(MAX_DEPTH + 3);
        let dirs = find_parent_paths(&classes, &id, &classes.base());
        assert_eq!(dirs.len(), MAX_DEPTH);
        assert_eq!(dirs[0], "/t/c1");
    }

    #[test]
    fn t_stop_not_reached() {
        let (classes, id) = chain(3);
        let c2 = classes.lookup("c2").unwrap();
        // c1 is below c2 in the chain, never reached when walking up
        // from c2; walking stops at the base class which has no parent
        assert_eq!(find_parent_paths(&classes, &c2, &id),
                   vec!["/t/c2", "/t/c3", "/base"]);
        assert_eq!(find_parent_paths(&classes, &id, &c2), vec!["/t/c1"]);
    }

    struct Fixed(&'static [(&'static str, Option<usize>)]);

    impl TypeHierarchy for Fixed {
        type Type = usize;
        fn base_directory_of(&self, ty: &usize) -> &str {
            self.0[*ty].0
        }
        fn parent_of(&self, ty: &usize) -> Option<usize> {
            self.0[*ty].1
        }
    }

    #[test]
    fn t_cyclic_hierarchy_terminates() {
        let h = Fixed(&[("/root", None), ("/a", Some(2)), ("/b", Some(1))]);
        let dirs = find_parent_paths(&h, &1, &0);
        assert_eq!(dirs.len(), MAX_DEPTH);
        assert_eq!(&dirs[..3], &["/a", "/b", "/a"]);
    }

    #[test]
    fn t_declare_all() {
        let decls: AList<KString, ClassDecl> = serde_json::from_str(r#"{
            "child": {"dir": "/t/child", "parent": "middle"},
            "middle": {"dir": "/t/middle", "settings": "MiddleSettings"},
            "other": {"dir": "/t/other"}
        }"#).unwrap();
        let mut classes = ThemeClasses::new("/base");
        classes.declare_all(&decls).unwrap();
        let child = classes.lookup("child").unwrap();
        assert_eq!(classes.themed_view_paths(child),
                   vec!["/t/child/views", "/t/middle/views"]);
        assert_eq!(classes.find_settings(child), Some("MiddleSettings"));
        assert_eq!(classes.find_settings(classes.lookup("other").unwrap()), None);
        assert_eq!(classes.name_of(child), "child");

        let decls: AList<KString, ClassDecl> = serde_json::from_str(r#"{
            "a": {"dir": "/a", "parent": "b"},
            "b": {"dir": "/b", "parent": "a"}
        }"#).unwrap();
        let mut classes = ThemeClasses::new("/base");
        assert!(matches!(classes.declare_all(&decls).unwrap_err().kind(),
                         ThemeErrorKind::UnknownClass(_)));
        let mut classes = ThemeClasses::new("/base");
        assert!(matches!(classes.declare(BASE_CLASS, &decl("/x", None)).unwrap_err().kind(),
                         ThemeErrorKind::DuplicateClass(_)));
    }
}
