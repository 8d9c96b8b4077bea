//! Path variables and expressions: `$name` stands for a list of
//! paths, `$name/suffix` for each of those paths with `/suffix`
//! appended. Nothing else is understood.

use std::fmt;

pub const VAR_SIGIL: char = '$';

pub fn is_var(s: &str) -> bool {
    s.starts_with(VAR_SIGIL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expr<'s> {
    pub name: &'s str,
    pub suffix: Option<&'s str>,
}

impl<'s> Expr<'s> {
    /// Returns None if `s` is a literal path. Splits on the first
    /// slash; the suffix is taken verbatim, even if it contains more
    /// slashes or another sigil.
    pub fn parse(s: &'s str) -> Option<Self> {
        if ! is_var(s) {
            return None
        }
        Some(match s.split_once('/') {
            Some((name, suffix)) => Expr { name, suffix: Some(suffix) },
            None => Expr { name: s, suffix: None },
        })
    }

    /// The path that this expression yields for one value of its
    /// variable.
    pub fn apply(&self, base: &str) -> String {
        match self.suffix {
            Some(suffix) => format!("{base}/{suffix}"),
            None => base.to_string(),
        }
    }
}

impl<'s> fmt::Display for Expr<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        if let Some(suffix) = self.suffix {
            write!(f, "/{suffix}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! t {
        ($e:expr, $r:expr) => {
            assert_eq!(Expr::parse($e), $r);
        }
    }

    #[test]
    fn t_parse() {
        t!("/app/views", None);
        t!("@app/views", None);
        t!("", None);
        t!("$themedViewPaths", Some(Expr { name: "$themedViewPaths", suffix: None }));
        t!("$themedViewPaths/widgets",
           Some(Expr { name: "$themedViewPaths", suffix: Some("widgets") }));
        t!("$a/b/c", Some(Expr { name: "$a", suffix: Some("b/c") }));
        t!("$a/", Some(Expr { name: "$a", suffix: Some("") })); // hmm
    }

    #[test]
    fn t_apply_and_display() {
        let e = Expr::parse("$a/widgets").unwrap();
        assert_eq!(e.apply("/theme/x"), "/theme/x/widgets");
        assert_eq!(e.to_string(), "$a/widgets");
        let e = Expr::parse("$a").unwrap();
        assert_eq!(e.apply("/theme/x"), "/theme/x");
        assert_eq!(e.to_string(), "$a");
    }
}
