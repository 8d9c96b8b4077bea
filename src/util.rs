use std::env::VarError;

use anyhow::{Result, bail};

/// Get an env var as a String; decoding failures are reported as
/// errors. If the var is not set and no fallback was given, an error
/// is reported as well.
pub fn getenv_or(name: &str, fallbackvalue: Option<&str>) -> Result<String> {
    match getenv(name)? {
        Some(s) => Ok(s),
        None => match fallbackvalue {
            Some(v) => Ok(v.to_string()),
            None => bail!("{name:?} env var is missing and \
                           no default provided"),
        }
    }
}

/// Get an env var as a String; decoding failures are reported as
/// errors. Empty values count as not set.
pub fn getenv(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(s) if s.is_empty() => Ok(None),
        Ok(s) => Ok(Some(s)),
        Err(e) => match e {
            VarError::NotPresent => Ok(None),
            VarError::NotUnicode(_) => bail!("{name:?} env var is not unicode"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_getenv_or() {
        assert_eq!(getenv_or("THEMEMAP_SURELY_UNSET_VAR", Some("x")).unwrap(), "x");
        assert!(getenv_or("THEMEMAP_SURELY_UNSET_VAR", None).is_err());
        assert_eq!(getenv("THEMEMAP_SURELY_UNSET_VAR").unwrap(), None);
    }
}
