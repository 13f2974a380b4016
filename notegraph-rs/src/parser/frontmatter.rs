//! YAML frontmatter splitting, parsing and serialization.

use crate::error::Result;
use crate::frontmatter::Frontmatter;
use serde_yaml::Value;

/// Frontmatter split result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML between the delimiters (without them).
    pub yaml: Option<&'a str>,
    /// The text after the closing delimiter line.
    pub body: &'a str,
}

/// A note's raw text, split and parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSource<'a> {
    pub frontmatter: Frontmatter,
    pub body: &'a str,
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']).trim_end() == "---"
}

/// Split text into a leading `---` delimited block and the remaining body.
///
/// The opening delimiter must be the very first line. Without a closing
/// delimiter line the whole text is body.
pub fn split_frontmatter(text: &str) -> FrontmatterSplit<'_> {
    let no_block = FrontmatterSplit {
        yaml: None,
        body: text,
    };

    let mut lines = text.split_inclusive('\n');
    let first = match lines.next() {
        Some(line) if is_delimiter(line) && line.ends_with('\n') => line,
        _ => return no_block,
    };

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_delimiter(line) {
            let yaml = text[yaml_start..offset].trim_end_matches(['\n', '\r']);
            return FrontmatterSplit {
                yaml: Some(yaml),
                body: &text[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    no_block
}

/// Split and parse a note's raw text.
///
/// Never fails: malformed YAML, or a block that is not a mapping, degrades to
/// "no frontmatter" with the full text as body.
pub fn parse_note(text: &str) -> ParsedSource<'_> {
    let split = split_frontmatter(text);
    let yaml = match split.yaml {
        Some(yaml) => yaml,
        None => {
            return ParsedSource {
                frontmatter: Frontmatter::new(),
                body: text,
            };
        }
    };

    if yaml.trim().is_empty() {
        return ParsedSource {
            frontmatter: Frontmatter::new(),
            body: split.body,
        };
    }

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(map)) => ParsedSource {
            frontmatter: Frontmatter::from_mapping(map),
            body: split.body,
        },
        Ok(Value::Null) => ParsedSource {
            frontmatter: Frontmatter::new(),
            body: split.body,
        },
        Ok(_) => {
            tracing::debug!("frontmatter block is not a mapping; treating as body");
            ParsedSource {
                frontmatter: Frontmatter::new(),
                body: text,
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "malformed frontmatter; treating as body");
            ParsedSource {
                frontmatter: Frontmatter::new(),
                body: text,
            }
        }
    }
}

/// Serialize frontmatter as a delimited block (with trailing newline).
pub fn serialize_frontmatter(frontmatter: &Frontmatter) -> Result<String> {
    let yaml = serde_yaml::to_string(frontmatter)?;
    Ok(format!("---\n{}---\n", yaml))
}

/// Build a note's full text. Empty frontmatter produces no block, unless the
/// body itself opens with one; then an empty block shields it.
pub fn compose_note(frontmatter: &Frontmatter, body: &str) -> Result<String> {
    if frontmatter.is_empty() {
        if split_frontmatter(body).yaml.is_some() {
            return Ok(format!("---\n---\n{}", body));
        }
        return Ok(body.to_string());
    }
    Ok(format!("{}{}", serialize_frontmatter(frontmatter)?, body))
}
