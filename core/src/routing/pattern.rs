//! Path patterns such as `/blogs/{blogId}`
//!
//! A pattern is a sequence of segments, each either a literal or a named
//! parameter that captures exactly one non-empty URL segment.

use crate::error::RouteError;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

fn param_name_regex() -> &'static Regex {
    static PARAM_NAME: OnceLock<Regex> = OnceLock::new();
    PARAM_NAME.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("parameter name regex is valid")
    })
}

/// One segment of a path pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal segment that must match exactly
    Static(String),
    /// Named parameter capturing one segment
    Param(String),
}

impl Segment {
    fn is_param(&self) -> bool {
        matches!(self, Segment::Param(_))
    }
}

/// Parameters captured from the path, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathParams(BTreeMap<String, String>);

impl PathParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a captured parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Add or replace a parameter
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A parsed route path pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern like `/blogs/{blogId}/edit`
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| invalid("must start with '/'"))?;

        if rest.is_empty() {
            return Ok(Self {
                segments: Vec::new(),
            });
        }

        let mut segments = Vec::new();
        for raw in rest.split('/') {
            if raw.is_empty() {
                return Err(invalid("empty segment"));
            }

            if let Some(inner) = raw.strip_prefix('{') {
                let name = inner
                    .strip_suffix('}')
                    .ok_or_else(|| invalid("unclosed parameter"))?;
                if !param_name_regex().is_match(name) {
                    return Err(invalid(&format!("bad parameter name '{}'", name)));
                }
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                {
                    return Err(invalid(&format!("parameter '{}' appears twice", name)));
                }
                segments.push(Segment::Param(name.to_string()));
            } else if raw.contains('{') || raw.contains('}') {
                return Err(invalid("parameters must span a whole segment"));
            } else {
                segments.push(Segment::Static(raw.to_string()));
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the pattern has no parameter segments
    pub fn is_static(&self) -> bool {
        self.wildcard_count() == 0
    }

    /// Number of parameter segments; fewer means more specific
    pub fn wildcard_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_param()).count()
    }

    /// Names of the parameters in pattern order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match already-split, percent-decoded URL segments against this pattern
    pub fn matches(&self, segments: &[&str], case_sensitive: bool) -> Option<PathParams> {
        if segments.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (expected, actual) in self.segments.iter().zip(segments) {
            match expected {
                Segment::Static(literal) => {
                    let equal = if case_sensitive {
                        literal == actual
                    } else {
                        literal.eq_ignore_ascii_case(actual)
                    };
                    if !equal {
                        return None;
                    }
                }
                Segment::Param(_) if actual.is_empty() => return None,
                Segment::Param(name) => params.insert(name.as_str(), *actual),
            }
        }

        Some(params)
    }

    /// Whether some concrete path could match both patterns
    pub fn overlaps(&self, other: &PathPattern, case_sensitive: bool) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => {
                        if case_sensitive {
                            a == b
                        } else {
                            a.eq_ignore_ascii_case(b)
                        }
                    }
                    _ => true,
                })
    }

    /// Build a concrete path by substituting parameters
    pub fn fill(&self, params: &PathParams) -> Result<String, String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(literal) => path.push_str(literal),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| name.clone())?;
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Static(literal) => write!(f, "/{}", literal)?,
                Segment::Param(name) => write!(f, "/{{{}}}", name)?,
            }
        }
        Ok(())
    }
}
