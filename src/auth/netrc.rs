//! Minimal netrc parser
//!
//! Understands `machine`, `default`, `login`, `password`, `account` and
//! `macdef` tokens, `#` comments and double-quoted values. Unknown tokens are
//! ignored so that a stray keyword does not hide a valid entry further down.

use std::collections::HashMap;
use std::io;
use std::path::Path;

/// A single `machine` (or `default`) block
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NetrcEntry {
    pub login: String,
    pub account: Option<String>,
    pub password: String,
}

impl std::fmt::Debug for NetrcEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetrcEntry")
            .field("login", &self.login)
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parsed netrc file
#[derive(Debug, Clone, Default)]
pub struct Netrc {
    hosts: HashMap<String, NetrcEntry>,
    default: Option<NetrcEntry>,
}

impl Netrc {
    /// Parse netrc content. A later duplicate `machine` block replaces an
    /// earlier one.
    pub fn parse(content: &str) -> Self {
        let tokens = tokenize(content);
        let mut netrc = Netrc::default();
        let mut current: Option<(Option<String>, NetrcEntry)> = None;
        let mut iter = tokens.into_iter();

        while let Some(token) = iter.next() {
            match token {
                Token::Word(word) => match word.as_str() {
                    "machine" => {
                        netrc.finish(current.take());
                        if let Some(Token::Word(host)) = iter.next() {
                            current = Some((Some(host), NetrcEntry::default()));
                        }
                    }
                    "default" => {
                        netrc.finish(current.take());
                        current = Some((None, NetrcEntry::default()));
                    }
                    "login" | "password" | "account" => {
                        let Some(Token::Word(value)) = iter.next() else {
                            continue;
                        };
                        if let Some((_, entry)) = current.as_mut() {
                            match word.as_str() {
                                "login" => entry.login = value,
                                "password" => entry.password = value,
                                _ => entry.account = Some(value),
                            }
                        }
                    }
                    "macdef" => {
                        // Macro body runs to the next blank line
                        netrc.finish(current.take());
                        for skipped in iter.by_ref() {
                            if skipped == Token::BlankLine {
                                break;
                            }
                        }
                    }
                    _ => {}
                },
                Token::BlankLine => {}
            }
        }
        netrc.finish(current);
        netrc
    }

    /// Read and parse a netrc file
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Read the per-user default netrc file
    ///
    /// On Unix the file must belong to the current user and grant no access
    /// to group or others, otherwise a `PermissionDenied` error is returned.
    pub fn from_private_file(path: &Path) -> io::Result<Self> {
        #[cfg(unix)]
        check_private(&std::fs::metadata(path)?, current_uid())?;
        Self::from_file(path)
    }

    /// Entry for `host`, falling back to the `default` block
    pub fn authenticator(&self, host: &str) -> Option<&NetrcEntry> {
        self.hosts.get(host).or(self.default.as_ref())
    }

    fn finish(&mut self, block: Option<(Option<String>, NetrcEntry)>) {
        match block {
            Some((Some(host), entry)) => {
                self.hosts.insert(host, entry);
            }
            Some((None, entry)) => {
                self.default = Some(entry);
            }
            None => {}
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    BlankLine,
}

fn tokenize(content: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            tokens.push(Token::BlankLine);
            continue;
        }

        let mut chars = line.chars().peekable();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
            } else if c == '#' {
                break;
            } else if c == '"' {
                chars.next();
                let mut word = String::new();
                while let Some(c) = chars.next() {
                    match c {
                        '"' => break,
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                word.push(escaped);
                            }
                        }
                        _ => word.push(c),
                    }
                }
                tokens.push(Token::Word(word));
            } else {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
        }
    }

    tokens
}

#[cfg(unix)]
fn current_uid() -> u32 {
    // SAFETY: getuid has no preconditions and always succeeds
    unsafe { libc::getuid() }
}

#[cfg(unix)]
fn check_private(metadata: &std::fs::Metadata, uid: u32) -> io::Result<()> {
    use std::os::unix::fs::MetadataExt;

    if metadata.uid() != uid {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!(
                "netrc file owner ({}) does not match current user ({})",
                metadata.uid(),
                uid
            ),
        ));
    }
    if metadata.mode() & 0o077 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!(
                "netrc access too permissive (mode {:o}): only the owner may access it",
                metadata.mode() & 0o777
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_machine() {
        let netrc = Netrc::parse("machine qnx.com login alice password s3cret\n");
        let entry = netrc.authenticator("qnx.com").unwrap();
        assert_eq!(entry.login, "alice");
        assert_eq!(entry.password, "s3cret");
        assert_eq!(entry.account, None);
    }

    #[test]
    fn test_multi_line_and_multiple_machines() {
        let content = r#"
machine github.com
  login octocat
  password ghp_token

machine qnx.com
  login bob
  account dev
  password hunter2
"#;
        let netrc = Netrc::parse(content);
        assert_eq!(netrc.authenticator("github.com").unwrap().login, "octocat");
        let entry = netrc.authenticator("qnx.com").unwrap();
        assert_eq!(entry.login, "bob");
        assert_eq!(entry.password, "hunter2");
        assert_eq!(entry.account.as_deref(), Some("dev"));
    }

    #[test]
    fn test_exact_host_match_only() {
        let netrc = Netrc::parse("machine www.qnx.com login a password b\n");
        assert!(netrc.authenticator("qnx.com").is_none());
    }

    #[test]
    fn test_default_fallback() {
        let content = "machine other.org login x password y\ndefault login anon password guest\n";
        let netrc = Netrc::parse(content);
        let entry = netrc.authenticator("qnx.com").unwrap();
        assert_eq!(entry.login, "anon");
        assert_eq!(entry.password, "guest");
        assert_eq!(netrc.authenticator("other.org").unwrap().login, "x");
    }

    #[test]
    fn test_comments_are_ignored() {
        let content = "# machine qnx.com login wrong password wrong\nmachine qnx.com login right password ok # trailing\n";
        let netrc = Netrc::parse(content);
        let entry = netrc.authenticator("qnx.com").unwrap();
        assert_eq!(entry.login, "right");
        assert_eq!(entry.password, "ok");
    }

    #[test]
    fn test_macdef_body_is_skipped() {
        let content = "macdef init\nmachine qnx.com login trap password trap\n\nmachine qnx.com login real password pw\n";
        let netrc = Netrc::parse(content);
        let entry = netrc.authenticator("qnx.com").unwrap();
        assert_eq!(entry.login, "real");
        assert_eq!(entry.password, "pw");
    }

    #[test]
    fn test_quoted_password() {
        let content = r#"machine qnx.com login "carol" password "pass word \"x\"""#;
        let netrc = Netrc::parse(content);
        let entry = netrc.authenticator("qnx.com").unwrap();
        assert_eq!(entry.login, "carol");
        assert_eq!(entry.password, r#"pass word "x""#);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let content = "machine qnx.com login first password one\nmachine qnx.com login second password two\n";
        let netrc = Netrc::parse(content);
        assert_eq!(netrc.authenticator("qnx.com").unwrap().login, "second");
    }

    #[test]
    fn test_debug_redacts_password() {
        let netrc = Netrc::parse("machine qnx.com login dave password topsecret");
        let debug = format!("{:?}", netrc.authenticator("qnx.com").unwrap());
        assert!(debug.contains("dave"));
        assert!(!debug.contains("topsecret"));
    }

    #[cfg(unix)]
    mod permissions {
        use super::*;
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn netrc_with_mode(dir: &TempDir, mode: u32) -> std::path::PathBuf {
            let path = dir.path().join(".netrc");
            std::fs::write(&path, "machine qnx.com login alice password s3cret\n").unwrap();
            std::fs::set_permissions(&path, Permissions::from_mode(mode)).unwrap();
            path
        }

        #[test]
        fn test_world_readable_file_is_refused() {
            let temp_dir = TempDir::new().unwrap();
            let path = netrc_with_mode(&temp_dir, 0o644);

            let error = Netrc::from_private_file(&path).unwrap_err();
            assert_eq!(error.kind(), io::ErrorKind::PermissionDenied);
            assert!(error.to_string().contains("644"));

            // The explicit-path reader does not apply the check
            assert!(Netrc::from_file(&path).is_ok());
        }

        #[test]
        fn test_owner_only_file_is_accepted() {
            let temp_dir = TempDir::new().unwrap();
            let path = netrc_with_mode(&temp_dir, 0o600);

            let netrc = Netrc::from_private_file(&path).unwrap();
            assert_eq!(netrc.authenticator("qnx.com").unwrap().login, "alice");
        }

        #[test]
        fn test_foreign_owner_is_refused() {
            let temp_dir = TempDir::new().unwrap();
            let path = netrc_with_mode(&temp_dir, 0o600);
            let metadata = std::fs::metadata(&path).unwrap();

            let error = check_private(&metadata, current_uid().wrapping_add(1)).unwrap_err();
            assert_eq!(error.kind(), io::ErrorKind::PermissionDenied);
            assert!(error.to_string().contains("owner"));
        }
    }
}
