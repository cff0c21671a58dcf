//! Output file naming
//!
//! File names come from a small template language with four placeholders:
//!
//! | Placeholder   | Value                                   | Example       |
//! |---------------|-----------------------------------------|---------------|
//! | `{kind}`      | `spec.names.kind`                       | `Widget`      |
//! | `{version}`   | version name (`spec.versions[].name`)   | `v1`          |
//! | `{group}`     | first segment of `spec.group`           | `example`     |
//! | `{fullgroup}` | `spec.group`                            | `example.com` |
//!
//! `{{` and `}}` produce literal braces. The rendered name is lowercased and
//! gets a `.json` suffix.

use std::fmt;
use std::str::FromStr;

use crate::error::{KubeError, Result};

/// Template used when `FILENAME_FORMAT` is not set
pub const DEFAULT_FILENAME_FORMAT: &str = "{kind}_{version}";

/// A named slot in a filename template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Kind,
    Version,
    Group,
    FullGroup,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "kind" => Some(Self::Kind),
            "version" => Some(Self::Version),
            "group" => Some(Self::Group),
            "fullgroup" => Some(Self::FullGroup),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// Values substituted into a [`FilenameTemplate`]
#[derive(Debug, Clone, Copy)]
pub struct FilenameFields<'a> {
    pub kind: &'a str,
    pub version: &'a str,
    /// Full API group, e.g. `example.com`
    pub group: &'a str,
}

impl FilenameFields<'_> {
    fn short_group(&self) -> &str {
        self.group.split('.').next().unwrap_or(self.group)
    }
}

/// Parsed filename template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl FilenameTemplate {
    /// Parse a template, rejecting unknown placeholders and unbalanced braces
    pub fn parse(format: &str) -> Result<Self> {
        let invalid = |message: String| KubeError::FilenameFormat {
            format: format.to_string(),
            message,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => return Err(invalid("unterminated '{'".to_string())),
                        }
                    }

                    let field = Placeholder::from_name(&name).ok_or_else(|| {
                        invalid(format!(
                            "unknown placeholder '{{{}}}' (expected kind, version, group or fullgroup)",
                            name
                        ))
                    })?;

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' => return Err(invalid("single '}' encountered".to_string())),
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: format.to_string(),
            segments,
        })
    }

    /// The template text as given
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render the lowercased file name, including the `.json` suffix
    pub fn render(&self, fields: &FilenameFields<'_>) -> String {
        let mut name = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => name.push_str(text),
                Segment::Field(Placeholder::Kind) => name.push_str(fields.kind),
                Segment::Field(Placeholder::Version) => name.push_str(fields.version),
                Segment::Field(Placeholder::Group) => name.push_str(fields.short_group()),
                Segment::Field(Placeholder::FullGroup) => name.push_str(fields.group),
            }
        }
        name.to_lowercase() + ".json"
    }
}

impl Default for FilenameTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_FILENAME_FORMAT.to_string(),
            segments: vec![
                Segment::Field(Placeholder::Kind),
                Segment::Literal("_".to_string()),
                Segment::Field(Placeholder::Version),
            ],
        }
    }
}

impl FromStr for FilenameTemplate {
    type Err = KubeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FilenameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
