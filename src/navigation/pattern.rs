use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, SiteStackError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Path pattern made of literal and `{param}` segments, e.g. `/users/{userId}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        if !pattern.starts_with('/') {
            return Err(SiteStackError::Navigation(format!(
                "Path pattern must start with '/': {}",
                pattern
            )));
        }

        let mut segments = Vec::new();
        let mut names = Vec::new();

        for raw in split_segments(pattern) {
            if let Some(name) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                if name.is_empty() || name.contains(['{', '}', '/']) {
                    return Err(SiteStackError::Navigation(format!(
                        "Invalid parameter segment '{}' in {}",
                        raw, pattern
                    )));
                }
                if names.contains(&name) {
                    return Err(SiteStackError::Navigation(format!(
                        "Duplicate parameter '{}' in {}",
                        name, pattern
                    )));
                }
                names.push(name);
                segments.push(Segment::Param(name.to_string()));
            } else if raw.contains(['{', '}']) {
                return Err(SiteStackError::Navigation(format!(
                    "Parameters must span a whole segment: {}",
                    pattern
                )));
            } else {
                segments.push(Segment::Literal(raw.to_string()));
            }
        }

        Ok(Self { segments })
    }

    /// Match a request path, returning the captured parameters percent-decoded.
    ///
    /// A parameter that does not decode to UTF-8 makes the path not match.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    let value = percent_decode_str(part).decode_utf8().ok()?;
                    params.insert(name.clone(), value.into_owned());
                }
            }
        }

        Some(params)
    }

    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Number of literal segments; more specific patterns win when several match
    pub fn specificity(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Literal(_)))
            .count()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => write!(f, "/{}", literal)?,
                Segment::Param(name) => write!(f, "/{{{}}}", name)?,
            }
        }
        Ok(())
    }
}

// Empty segments are dropped, so "/users/" and "/users" are the same path
// and "/users//" never satisfies a parameter.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let pattern = PathPattern::parse("/users").unwrap();

        assert!(pattern.matches("/users").unwrap().is_empty());
        assert!(pattern.matches("/users/").is_some());
        assert!(pattern.matches("/posts").is_none());
        assert!(pattern.matches("/users/1").is_none());
    }

    #[test]
    fn test_root_match() {
        let pattern = PathPattern::parse("/").unwrap();

        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/users").is_none());
        assert_eq!(pattern.to_string(), "/");
    }

    #[test]
    fn test_param_capture() {
        let pattern = PathPattern::parse("/users/{userId}").unwrap();
        let params = pattern.matches("/users/5").unwrap();

        assert_eq!(params.get("userId").map(String::as_str), Some("5"));
        assert!(pattern.matches("/users").is_none());
        assert!(pattern.matches("/users//").is_none());
        assert_eq!(pattern.params().collect::<Vec<_>>(), vec!["userId"]);
    }

    #[test]
    fn test_param_is_percent_decoded() {
        let pattern = PathPattern::parse("/users/{userId}").unwrap();

        assert_eq!(pattern.matches("/users/Leanne%20Graham").unwrap()["userId"], "Leanne Graham");
        assert_eq!(pattern.matches("/users/%2E%2E").unwrap()["userId"], "..");
        assert_eq!(pattern.matches("/users/a%2Fb").unwrap()["userId"], "a/b");
        assert_eq!(pattern.matches("/users/100%25").unwrap()["userId"], "100%");
    }

    #[test]
    fn test_param_with_invalid_utf8_does_not_match() {
        let pattern = PathPattern::parse("/users/{userId}").unwrap();

        assert!(pattern.matches("/users/%FF").is_none());
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(PathPattern::parse("users").is_err());
        assert!(PathPattern::parse("/users/{}").is_err());
        assert!(PathPattern::parse("/users/id-{id}").is_err());
        assert!(PathPattern::parse("/{id}/{id}").is_err());
    }

    #[test]
    fn test_specificity() {
        let literal = PathPattern::parse("/users/me").unwrap();
        let param = PathPattern::parse("/users/{userId}").unwrap();

        assert!(literal.specificity() > param.specificity());
    }
}
