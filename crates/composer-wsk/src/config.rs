//! Credential discovery (§6.4): `APIHOST`/`AUTH` read from a key-value
//! file, defaulting to `~/.wskprops`, overridable via `$WSK_CONFIG_FILE`.
//! A missing file is not an error — it just yields empty credentials,
//! which a caller can still override explicitly before deploying.

use std::path::PathBuf;

/// The two fields a FaaS deployment needs: an API host and an auth
/// token. Either may be absent — `read_wskprops` never fails on a
/// missing or partial file, it just leaves the corresponding field
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub apihost: Option<String>,
    pub auth: Option<String>,
}

impl Credentials {
    /// Overlays `other` on top of `self`: any field `other` sets wins.
    /// Used to let explicit constructor options override whatever
    /// `read_wskprops` discovered from the environment.
    pub fn merge(self, other: Credentials) -> Credentials {
        Credentials {
            apihost: other.apihost.or(self.apihost),
            auth: other.auth.or(self.auth),
        }
    }
}

fn wskprops_path() -> PathBuf {
    if let Ok(path) = std::env::var("WSK_CONFIG_FILE") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_default();
    PathBuf::from(home).join(".wskprops")
}

/// Reads `APIHOST`/`AUTH` lines (`KEY=value`, `#`-prefixed comments and
/// blank lines ignored) from the path `$WSK_CONFIG_FILE` names, or
/// `~/.wskprops` if unset. Returns `Credentials::default()` if the file
/// doesn't exist or can't be read.
pub fn read_wskprops() -> Credentials {
    read_wskprops_at(&wskprops_path())
}

fn read_wskprops_at(path: &std::path::Path) -> Credentials {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return Credentials::default();
    };
    parse_wskprops(&contents)
}

fn parse_wskprops(contents: &str) -> Credentials {
    let mut credentials = Credentials::default();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            "APIHOST" => credentials.apihost = Some(value.trim().to_string()),
            "AUTH" => credentials.auth = Some(value.trim().to_string()),
            _ => {}
        }
    }
    credentials
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_apihost_and_auth_lines() {
        let creds = parse_wskprops("APIHOST=openwhisk.example.com\nAUTH=abc123\n");
        assert_eq!(creds.apihost.as_deref(), Some("openwhisk.example.com"));
        assert_eq!(creds.auth.as_deref(), Some("abc123"));
    }

    #[test]
    fn ignores_comments_blank_lines_and_unknown_keys() {
        let creds = parse_wskprops("# a comment\n\nOTHER=ignored\nAPIHOST=host\n");
        assert_eq!(creds.apihost.as_deref(), Some("host"));
        assert_eq!(creds.auth, None);
    }

    #[test]
    fn missing_file_yields_default_credentials() {
        let creds = read_wskprops_at(std::path::Path::new("/nonexistent/path/.wskprops"));
        assert_eq!(creds, Credentials::default());
    }

    #[test]
    fn merge_prefers_the_overriding_side() {
        let base = Credentials { apihost: Some("a".to_string()), auth: Some("b".to_string()) };
        let over = Credentials { apihost: Some("c".to_string()), auth: None };
        let merged = base.merge(over);
        assert_eq!(merged.apihost.as_deref(), Some("c"));
        assert_eq!(merged.auth.as_deref(), Some("b"));
    }
}
