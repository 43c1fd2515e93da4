//! YAML frontmatter extraction.
//!
//! Handles the `---` delimited YAML block at the top of a note:
//! ```markdown
//! ---
//! title: Alpha Project
//! tags: [rust, mcp]
//! ---
//!
//! ## Body content here
//! ```
//!
//! Frontmatter is best-effort metadata. A note without a block yields an
//! empty mapping, and a block that is not a YAML mapping yields its raw
//! lines instead of an error.

use serde::Serialize;
use serde_json::{Map, Value};

const DELIMITER: &str = "---";

/// Parsed frontmatter of a note.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Frontmatter {
    /// The block parsed as a YAML mapping (empty when there is no block).
    Parsed(Map<String, Value>),
    /// The block could not be parsed; these are its lines verbatim.
    Raw { raw: Vec<String> },
}

impl Frontmatter {
    pub fn empty() -> Self {
        Self::Parsed(Map::new())
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Parsed(map) => map.get(key),
            Self::Raw { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Parsed(map) => map.is_empty(),
            Self::Raw { raw } => raw.is_empty(),
        }
    }
}

/// Split a note into its frontmatter lines and the body after the block.
///
/// Returns `None` when the first line is not a `---` delimiter. An
/// unterminated block takes every remaining line and leaves an empty body.
pub fn split(content: &str) -> Option<(Vec<&str>, &str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim() != DELIMITER {
        return None;
    }

    let mut block = Vec::new();
    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        if line.trim() == DELIMITER {
            return Some((block, &content[offset..]));
        }
        block.push(strip_line_ending(line));
    }

    Some((block, ""))
}

/// Extract the frontmatter of a note.
pub fn extract(content: &str) -> Frontmatter {
    let Some((block, _body)) = split(content) else {
        return Frontmatter::empty();
    };
    if block.is_empty() {
        return Frontmatter::empty();
    }

    let yaml = block.join("\n");
    match serde_yaml::from_str::<Value>(&yaml) {
        Ok(Value::Object(map)) => Frontmatter::Parsed(map),
        Ok(Value::Null) => Frontmatter::empty(),
        _ => Frontmatter::Raw {
            raw: block.into_iter().map(str::to_string).collect(),
        },
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
