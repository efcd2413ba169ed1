//! Sub-document paths
//!
//! A [`SubdocPath`] addresses a location inside a JSON document as a
//! sequence of [`PathComponent`]s. The textual syntax follows N1QL:
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `name` | Object field | `email` |
//! | `a.b` | Nested field | `addresses.delivery` |
//! | `[n]` | Array element | `complete[0]` |
//! | `[-1]` | Last array element | `some.array[-1]` |
//! | `` `a.b` `` | Field containing structural characters | `` `literal.dot` `` |
//! | (empty) | Document root | `` |
//!
//! Each field component must be a valid JSON string body: `"` and `\` must
//! be backslash-escaped (`literal\"quote`). Inside backticks a doubled
//! backtick stands for one literal backtick.
//!
//! # Limits
//!
//! | Limit | Value | Constant |
//! |-------|-------|----------|
//! | Max path text | 1024 characters | [`MAX_PATH_LENGTH`] |
//! | Max components | 32 | [`MAX_PATH_DEPTH`] |

use crate::error::SubdocErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum path length in characters
pub const MAX_PATH_LENGTH: usize = 1024;

/// Maximum number of components in a path
pub const MAX_PATH_DEPTH: usize = 32;

/// Error type for path parsing and validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path text is too long
    #[error("path length {length} exceeds maximum of {max} characters")]
    TooLong {
        /// Actual length in characters
        length: usize,
        /// Maximum allowed length
        max: usize,
    },
    /// Path has too many components
    #[error("path depth {depth} exceeds maximum of {max} components")]
    TooDeep {
        /// Actual number of components
        depth: usize,
        /// Maximum allowed
        max: usize,
    },
    /// Empty field component
    #[error("empty component at position {0}")]
    EmptyComponent(usize),
    /// Unclosed bracket
    #[error("unclosed bracket starting at position {0}")]
    UnclosedBracket(usize),
    /// Unclosed backtick
    #[error("unclosed backtick starting at position {0}")]
    UnclosedBacktick(usize),
    /// Invalid array index
    #[error("invalid array index at position {0}: {1}")]
    InvalidIndex(usize, String),
    /// Unexpected character
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    /// Component is not a valid JSON string body
    #[error("component at position {0} is not a valid JSON string")]
    InvalidComponent(usize),
}

impl PathError {
    /// Map onto the sub-document taxonomy
    pub fn kind(&self) -> SubdocErrorKind {
        match self {
            PathError::TooLong { .. } => SubdocErrorKind::PathTooLong,
            PathError::TooDeep { .. } => SubdocErrorKind::PathTooDeep,
            _ => SubdocErrorKind::InvalidPath,
        }
    }
}

/// A component of a sub-document path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathComponent {
    /// Object field: `.name`
    Field(String),
    /// Array element: `[n]`
    Index(usize),
    /// Last array element: `[-1]`
    LastIndex,
}

impl PathComponent {
    /// Check whether this component addresses an object field
    pub fn is_field(&self) -> bool {
        matches!(self, PathComponent::Field(_))
    }

    /// Check whether this component addresses an array element
    pub fn is_index(&self) -> bool {
        matches!(self, PathComponent::Index(_) | PathComponent::LastIndex)
    }
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathComponent::Field(name) => f.write_str(&render_field(name)),
            PathComponent::Index(i) => write!(f, "[{}]", i),
            PathComponent::LastIndex => f.write_str("[-1]"),
        }
    }
}

/// A path into a JSON document
///
/// # Examples
///
/// ```
/// use subdoc_core::path::{PathComponent, SubdocPath};
///
/// let path: SubdocPath = "purchases.complete[-1]".parse().unwrap();
/// assert_eq!(
///     path.components(),
///     &[
///         PathComponent::Field("purchases".into()),
///         PathComponent::Field("complete".into()),
///         PathComponent::LastIndex,
///     ]
/// );
///
/// let built = SubdocPath::root().field("purchases").field("complete").last();
/// assert_eq!(built, path);
/// assert_eq!(built.to_string(), "purchases.complete[-1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SubdocPath {
    components: Vec<PathComponent>,
}

impl SubdocPath {
    /// Create the root path (empty path)
    pub fn root() -> Self {
        SubdocPath {
            components: Vec::new(),
        }
    }

    /// Create a path from components, checking the depth limit
    pub fn from_components(components: Vec<PathComponent>) -> Result<Self, PathError> {
        let path = SubdocPath { components };
        path.validate()?;
        Ok(path)
    }

    /// Parse a path from text
    pub fn parse(text: &str) -> Result<Self, PathError> {
        text.parse()
    }

    /// Get the path components
    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }

    /// Get the number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if this is the root path (no components)
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// Append a field component (builder pattern)
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.components.push(PathComponent::Field(name.into()));
        self
    }

    /// Append an index component (builder pattern)
    pub fn index(mut self, idx: usize) -> Self {
        self.components.push(PathComponent::Index(idx));
        self
    }

    /// Append a last-element component (builder pattern)
    pub fn last(mut self) -> Self {
        self.components.push(PathComponent::LastIndex);
        self
    }

    /// Get the parent path (None if root)
    pub fn parent(&self) -> Option<SubdocPath> {
        self.split_last().map(|(_, parent)| SubdocPath {
            components: parent.to_vec(),
        })
    }

    /// Get the final component (None if root)
    pub fn last_component(&self) -> Option<&PathComponent> {
        self.components.last()
    }

    /// Split into the final component and the components leading to it
    pub fn split_last(&self) -> Option<(&PathComponent, &[PathComponent])> {
        self.components.split_last()
    }

    /// Validate the depth limit
    pub fn validate(&self) -> Result<(), PathError> {
        let depth = self.components.len();
        if depth > MAX_PATH_DEPTH {
            Err(PathError::TooDeep {
                depth,
                max: MAX_PATH_DEPTH,
            })
        } else {
            Ok(())
        }
    }

    /// Render the path in the syntax accepted by the parser
    pub fn to_path_string(&self) -> String {
        let mut result = String::new();
        for (i, component) in self.components.iter().enumerate() {
            if component.is_field() && i > 0 {
                result.push('.');
            }
            result.push_str(&component.to_string());
        }
        result
    }
}

impl FromStr for SubdocPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() > MAX_PATH_LENGTH {
            return Err(PathError::TooLong {
                length: chars.len(),
                max: MAX_PATH_LENGTH,
            });
        }
        if chars.is_empty() {
            return Ok(SubdocPath::root());
        }

        let mut components = Vec::new();
        let mut i = 0;
        // After a dot only a field may follow
        let mut expect_field = false;

        loop {
            let (component, next) = if !expect_field && chars[i] == '[' {
                parse_index(&chars, i)?
            } else {
                let (name, next) = parse_field(&chars, i)?;
                (PathComponent::Field(name), next)
            };
            components.push(component);
            if components.len() > MAX_PATH_DEPTH {
                return Err(PathError::TooDeep {
                    depth: components.len(),
                    max: MAX_PATH_DEPTH,
                });
            }
            i = next;

            match chars.get(i) {
                None => break,
                Some('.') => {
                    i += 1;
                    if i >= chars.len() {
                        return Err(PathError::EmptyComponent(i));
                    }
                    expect_field = true;
                }
                Some('[') => expect_field = false,
                Some(&c) => return Err(PathError::UnexpectedChar(c, i)),
            }
        }

        Ok(SubdocPath { components })
    }
}

impl fmt::Display for SubdocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path_string())
    }
}

/// Parse `[n]` or `[-1]` starting at the opening bracket
fn parse_index(chars: &[char], start: usize) -> Result<(PathComponent, usize), PathError> {
    let digits_start = start + 1;
    let mut i = digits_start;
    while i < chars.len() && chars[i] != ']' {
        i += 1;
    }
    if i >= chars.len() {
        return Err(PathError::UnclosedBracket(start));
    }

    let text: String = chars[digits_start..i].iter().collect();
    let component = if text == "-1" {
        PathComponent::LastIndex
    } else if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        let idx = text
            .parse::<usize>()
            .map_err(|_| PathError::InvalidIndex(digits_start, text.clone()))?;
        PathComponent::Index(idx)
    } else {
        return Err(PathError::InvalidIndex(digits_start, text));
    };

    Ok((component, i + 1))
}

/// Parse a bare or backtick-quoted field starting at `start`
fn parse_field(chars: &[char], start: usize) -> Result<(String, usize), PathError> {
    if chars.get(start) == Some(&'`') {
        return parse_quoted_field(chars, start);
    }

    let mut raw = String::new();
    let mut i = start;
    while i < chars.len() {
        match chars[i] {
            '.' | '[' => break,
            ']' | '`' => return Err(PathError::UnexpectedChar(chars[i], i)),
            '\\' => {
                // Keep the escape pair intact for JSON decoding
                raw.push('\\');
                i += 1;
                match chars.get(i) {
                    Some(&c) => raw.push(c),
                    None => return Err(PathError::InvalidComponent(start)),
                }
                i += 1;
            }
            c => {
                raw.push(c);
                i += 1;
            }
        }
    }

    if raw.is_empty() {
        return Err(PathError::EmptyComponent(start));
    }
    Ok((decode_json_string(&raw, start)?, i))
}

fn parse_quoted_field(chars: &[char], start: usize) -> Result<(String, usize), PathError> {
    let mut raw = String::new();
    let mut i = start + 1;
    loop {
        match chars.get(i) {
            None => return Err(PathError::UnclosedBacktick(start)),
            Some('`') if chars.get(i + 1) == Some(&'`') => {
                raw.push('`');
                i += 2;
            }
            Some('`') => {
                i += 1;
                break;
            }
            Some(&c) => {
                raw.push(c);
                i += 1;
            }
        }
    }
    Ok((decode_json_string(&raw, start)?, i))
}

/// Decode a component as the body of a JSON string literal
fn decode_json_string(raw: &str, position: usize) -> Result<String, PathError> {
    serde_json::from_str::<String>(&format!("\"{}\"", raw))
        .map_err(|_| PathError::InvalidComponent(position))
}

/// Render a field name, escaping JSON characters and quoting structural ones
fn render_field(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{08}' => escaped.push_str("\\b"),
            '\u{0C}' => escaped.push_str("\\f"),
            c if (c as u32) < 0x20 => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            c => escaped.push(c),
        }
    }

    let needs_quotes =
        escaped.is_empty() || escaped.contains(|c| matches!(c, '.' | '[' | ']' | '`'));
    if needs_quotes {
        format!("`{}`", escaped.replace('`', "``"))
    } else {
        escaped
    }
}
