//! String-level path operations (no file system access).

/// Careful, this drops any empty segments, regardless whether at the
/// beginning, end or in the middle.
pub fn path_segments<'s>(s: &'s str) -> impl Iterator<Item = &'s str>
{
    s.split('/').filter(|s| !s.is_empty())
}

/// Collapses repeated slashes and drops a trailing one; a leading
/// slash is kept. Does not touch `.` or `..` segments.
pub fn normalize_path(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    if s.starts_with('/') {
        res.push('/');
    }
    let mut seen = false;
    for segment in path_segments(s) {
        if seen {
            res.push('/');
        }
        res.push_str(segment);
        seen = true;
    }
    res
}

/// If `path` lies inside directory `dir`, returns the part of `path`
/// after `dir/`. Both are expected to be normalized.
pub fn strip_dir_prefix<'p>(path: &'p str, dir: &str) -> Option<&'p str> {
    if dir == "/" {
        return path.strip_prefix('/')
    }
    path.strip_prefix(dir)?.strip_prefix('/')
}

/// `base/rest`, without doubling the slash if `base` ends in one.
pub fn join_path(base: &str, rest: &str) -> String {
    if base.ends_with('/') || base.is_empty() {
        format!("{base}{rest}")
    } else {
        format!("{base}/{rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_normalize_path() {
        macro_rules! t {
            ($e:expr, $r:expr) => {
                assert_eq!(normalize_path($e), $r);
            }
        }
        t!("/a//b/", "/a/b");
        t!("a/b", "a/b");
        t!("/", "/");
        t!("", "");
        t!("@app//views", "@app/views");
        t!("/a/./b", "/a/./b"); // hmm, no canonicalization
    }

    #[test]
    fn t_strip_dir_prefix() {
        macro_rules! t {
            ($p:expr, $d:expr, $r:expr) => {
                assert_eq!(strip_dir_prefix($p, $d), $r);
            }
        }
        t!("/app/views/site/index.php", "/app/views", Some("site/index.php"));
        t!("/app/viewsx/index.php", "/app/views", None);
        t!("/app/views", "/app/views", None);
        t!("/x", "/", Some("x"));
    }

    #[test]
    fn t_join_path() {
        assert_eq!(join_path("/a", "b/c"), "/a/b/c");
        assert_eq!(join_path("/", "b"), "/b");
    }
}
