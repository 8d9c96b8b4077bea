//! Resolution of path variables by repeated substitution until
//! nothing changes any more.

use kstring::KString;

use crate::{alist::AList,
            error::{ThemeError, ThemeErrorKind},
            pathmap::{PathMap, PathValue},
            var::{Expr, is_var},
            warn};

/// A path map without variables, neither as keys nor in values.
pub type ResolvedMap = AList<KString, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eval {
    Paths(Vec<String>),
    /// The referenced variable exists but still holds expressions.
    Pending,
}

/// Evaluate a single expression against the current state of `vars`.
pub fn calc_exp(exp: &Expr, vars: &PathMap) -> Result<Eval, ThemeError> {
    let value = vars.get(exp.name).ok_or_else(
        || ThemeErrorKind::UndefinedVariable {
            name: KString::from_ref(exp.name),
            expr: exp.to_string(),
        })?;
    if value.has_vars() {
        return Ok(Eval::Pending)
    }
    Ok(Eval::Paths(value.as_slice().iter().map(|p| exp.apply(p)).collect()))
}

/// Evaluate every expression in `value`, keeping literals. Pending
/// only if at least one expression is; undefined variables are
/// reported even then.
pub fn calc_value(value: &PathValue, vars: &PathMap) -> Result<Eval, ThemeError> {
    let mut paths = Vec::new();
    let mut pending = false;
    for item in value.as_slice() {
        if let Some(exp) = Expr::parse(item) {
            match calc_exp(&exp, vars)? {
                Eval::Paths(p) => paths.extend(p),
                Eval::Pending => pending = true,
            }
        } else {
            paths.push(item.clone());
        }
    }
    if pending {
        Ok(Eval::Pending)
    } else {
        Ok(Eval::Paths(paths))
    }
}

/// Substitute variables until a full pass makes no progress, then
/// drop the variable-keyed (scratch) entries. Entries with path keys
/// that still hold expressions at that point refer to each other in a
/// cycle; that's reported as `UnresolvedVariable`.
pub fn substitute_vars(mut vars: PathMap) -> Result<ResolvedMap, ThemeError> {
    let mut proceed = true;
    while proceed {
        proceed = false;
        for i in 0..vars.len() {
            let value = &vars.0[i].1;
            if ! value.has_vars() {
                continue;
            }
            if let Eval::Paths(paths) = calc_value(value, &vars)? {
                vars.0[i].1 = PathValue::Many(paths);
                proceed = true;
            }
        }
    }

    let mut res = ResolvedMap::new();
    for (key, value) in vars {
        let unresolved = value.as_slice().iter().find(|s| is_var(s)).cloned();
        if is_var(&key) {
            if let Some(expr) = unresolved {
                warn!("dropping variable {key:?} which never resolves, \
                       still refers to {expr:?}");
            }
            continue;
        }
        if let Some(expr) = unresolved {
            return Err(ThemeErrorKind::UnresolvedVariable { key, expr }.into())
        }
        res.insert(key, value.into_vec());
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&'static str, PathValue)]) -> PathMap {
        entries.iter().map(|(k, v)| (KString::from_static(*k), v.clone())).collect()
    }

    fn resolved(entries: &[(&'static str, &[&str])]) -> ResolvedMap {
        entries.iter()
            .map(|(k, v)| (KString::from_static(*k),
                           v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn t_suffix_distribution() {
        let vars = map(&[("$a", PathValue::from(["/p1", "/p2"]))]);
        let exp = Expr::parse("$a/suffix").unwrap();
        assert_eq!(calc_exp(&exp, &vars).unwrap(),
                   Eval::Paths(vec!["/p1/suffix".into(), "/p2/suffix".into()]));
        let exp = Expr::parse("$a").unwrap();
        assert_eq!(calc_exp(&exp, &vars).unwrap(),
                   Eval::Paths(vec!["/p1".into(), "/p2".into()]));
    }

    #[test]
    fn t_pending_and_undefined() {
        let vars = map(&[("$a", PathValue::from("$b")),
                         ("$b", PathValue::from(["/x"]))]);
        assert_eq!(calc_exp(&Expr::parse("$a/w").unwrap(), &vars).unwrap(),
                   Eval::Pending);
        let e = calc_exp(&Expr::parse("$c/w").unwrap(), &vars).unwrap_err();
        match e.kind() {
            ThemeErrorKind::UndefinedVariable { name, expr } => {
                assert_eq!(name.as_str(), "$c");
                assert_eq!(expr, "$c/w");
            }
            _ => panic!("wrong error {e}"),
        }
    }

    #[test]
    fn t_substitute_chain() {
        // Declared in the "wrong" order, needs several passes
        let vars = map(&[
            ("/app/widgets", PathValue::from("$w")),
            ("$w", PathValue::from("$v/widgets")),
            ("$v", PathValue::from(["/theme/a/views", "/theme/b/views"])),
            ("/app/views", PathValue::from("$v")),
            ("/lit", PathValue::from("/just/this")),
        ]);
        assert_eq!(substitute_vars(vars).unwrap(),
                   resolved(&[
                       ("/app/widgets", &["/theme/a/views/widgets",
                                          "/theme/b/views/widgets"]),
                       ("/app/views", &["/theme/a/views", "/theme/b/views"]),
                       ("/lit", &["/just/this"]),
                   ]));
    }

    #[test]
    fn t_mixed_list() {
        let vars = map(&[
            ("$v", PathValue::from(["/t/a", "/t/b"])),
            ("/app", PathValue::from(["/first", "$v/x", "/last"])),
        ]);
        assert_eq!(substitute_vars(vars).unwrap(),
                   resolved(&[("/app", &["/first", "/t/a/x", "/t/b/x", "/last"])]));
    }

    #[test]
    fn t_idempotent() {
        let vars = map(&[
            ("$v", PathValue::from(["/t/a"])),
            ("/app", PathValue::from("$v")),
            ("/other", PathValue::from(["/o1", "/o2"])),
        ]);
        let once = substitute_vars(vars).unwrap();
        let again: PathMap = once.iter()
            .map(|(k, v)| (k.clone(), PathValue::Many(v.clone())))
            .collect();
        assert_eq!(substitute_vars(again).unwrap(), once);
    }

    #[test]
    fn t_no_dangling_vars() {
        let vars = map(&[
            ("$a", PathValue::from(["/a"])),
            ("$b", PathValue::from("$a/b")),
            ("/k", PathValue::from("$b")),
        ]);
        let res = substitute_vars(vars).unwrap();
        assert!(res.keys().all(|k| ! is_var(k)));
        assert!(res.values().flatten().all(|v| ! is_var(v)));
    }

    #[test]
    fn t_undefined() {
        let vars = map(&[("/x", PathValue::from("$undefined"))]);
        let e = substitute_vars(vars).unwrap_err();
        assert!(matches!(e.kind(), ThemeErrorKind::UndefinedVariable { .. }));
    }

    #[test]
    fn t_cycle() {
        let vars = map(&[
            ("$a", PathValue::from("$b")),
            ("$b", PathValue::from("$a/x")),
            ("/k", PathValue::from("$a")),
        ]);
        let e = substitute_vars(vars).unwrap_err();
        match e.kind() {
            ThemeErrorKind::UnresolvedVariable { key, expr } => {
                assert_eq!(key.as_str(), "/k");
                assert_eq!(expr, "$a");
            }
            _ => panic!("wrong error {e}"),
        }

        // A cycle nobody uses is dropped
        let vars = map(&[
            ("$a", PathValue::from("$a")),
            ("/k", PathValue::from("/lit")),
        ]);
        assert_eq!(substitute_vars(vars).unwrap(), resolved(&[("/k", &["/lit"])]));
    }
}
