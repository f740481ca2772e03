use std::fmt;

use warp::http::Method;

use super::endpoint::DEFAULT_REVOCATION_PATH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyPath,
    RelativePath(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath => f.write_str("revocation endpoint path cannot be empty"),
            Self::RelativePath(path) => {
                write!(f, "revocation endpoint path must start with '/': {}", path)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// An ant-style path pattern.
///
/// `?` matches one character and `*` any run of characters within a
/// segment; a `**` segment matches any number of segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    pattern: String,
    wildcard: bool,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        if !pattern.starts_with('/') {
            return Err(ConfigError::RelativePath(pattern.to_string()));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            wildcard: pattern.contains(|c| c == '*' || c == '?'),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, path: &str) -> bool {
        if !self.wildcard {
            return self.pattern == path;
        }
        if self.pattern.ends_with('/') != path.ends_with('/') {
            return false;
        }

        let pattern: Vec<&str> = segments(&self.pattern).collect();
        let path: Vec<&str> = segments(path).collect();
        match_segments(&pattern, &path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|i| match_segments(rest, &path[i..])),
        Some((segment, rest)) => match path.split_first() {
            Some((head, tail)) => {
                let segment: Vec<char> = segment.chars().collect();
                let head: Vec<char> = head.chars().collect();
                glob(&segment, &head) && match_segments(rest, tail)
            }
            None => false,
        },
    }
}

fn glob(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => (0..=text.len()).any(|i| glob(rest, &text[i..])),
        Some(('?', rest)) => !text.is_empty() && glob(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && glob(rest, &text[1..]),
    }
}

/// Selects the requests a revocation endpoint answers: `POST` to its path.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    pattern: PathPattern,
}

impl RouteMatcher {
    pub fn new(pattern: PathPattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        method == Method::POST && self.pattern.matches(path)
    }
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self::new(PathPattern {
            pattern: DEFAULT_REVOCATION_PATH.to_string(),
            wildcard: false,
        })
    }
}
