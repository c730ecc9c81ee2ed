//! Repository source classification.

/// Where an audited repository comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource {
    /// A remote clone URL (`https://`, `ssh://`, `git://`, or scp-like).
    Url(String),
    /// A path to a repository on the local filesystem.
    LocalPath(String),
}

impl RepoSource {
    /// Classifies a repository argument as a clone URL or a local path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.contains("://") || is_scp_like(raw) {
            Self::Url(raw.to_string())
        } else {
            Self::LocalPath(raw.to_string())
        }
    }

    /// The string handed to `git clone`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(s) | Self::LocalPath(s) => s,
        }
    }

    /// Repository name: the last path segment with any `.git` suffix removed.
    ///
    /// Used to derive the report artifact filename.
    #[must_use]
    pub fn name(&self) -> &str {
        let trimmed = self.as_str().trim_end_matches('/');
        let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
        let name = last.strip_suffix(".git").unwrap_or(last);
        if name.is_empty() { "repository" } else { name }
    }
}

/// Recognises `user@host:path` clone addresses.
fn is_scp_like(raw: &str) -> bool {
    raw.split_once(':')
        .is_some_and(|(head, _)| head.contains('@') && !head.contains('/'))
}
