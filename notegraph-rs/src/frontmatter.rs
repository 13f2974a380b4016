//! Typed frontmatter model.
//!
//! Frontmatter is an open, insertion-ordered mapping from string keys to
//! [`FrontmatterValue`]s. The recognized keys (`title`, `tags`, `aliases`,
//! `status`) have typed accessors; any other key is carried through
//! untouched so a rewrite never loses user fields.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value as YamlValue;
use std::fmt;

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<FrontmatterValue>),
    Map(Frontmatter),
}

impl FrontmatterValue {
    /// Returns the string if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontmatterValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is a list value.
    pub fn as_list(&self) -> Option<&[FrontmatterValue]> {
        match self {
            FrontmatterValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FrontmatterValue::Null)
    }

    /// Convert a parsed YAML value. Tagged values are unwrapped.
    pub fn from_yaml(value: YamlValue) -> Self {
        match value {
            YamlValue::Null => FrontmatterValue::Null,
            YamlValue::Bool(b) => FrontmatterValue::Bool(b),
            YamlValue::Number(n) => match n.as_i64() {
                Some(i) => FrontmatterValue::Integer(i),
                None => FrontmatterValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            YamlValue::String(s) => FrontmatterValue::String(s),
            YamlValue::Sequence(items) => {
                FrontmatterValue::List(items.into_iter().map(Self::from_yaml).collect())
            }
            YamlValue::Mapping(map) => FrontmatterValue::Map(Frontmatter::from_mapping(map)),
            YamlValue::Tagged(tagged) => Self::from_yaml(tagged.value),
        }
    }

    /// Flatten a string-or-list value into its string elements.
    ///
    /// Non-string list elements are coerced with their display form.
    fn string_items(&self) -> Vec<String> {
        match self {
            FrontmatterValue::String(s) => vec![s.clone()],
            FrontmatterValue::List(items) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| item.to_string())
                .collect(),
            FrontmatterValue::Null => Vec::new(),
            other => vec![other.to_string()],
        }
    }
}

/// String coercion used by frontmatter queries.
impl fmt::Display for FrontmatterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontmatterValue::Null => write!(f, "null"),
            FrontmatterValue::Bool(b) => write!(f, "{}", b),
            FrontmatterValue::Integer(i) => write!(f, "{}", i),
            FrontmatterValue::Float(x) => write!(f, "{}", x),
            FrontmatterValue::String(s) => write!(f, "{}", s),
            FrontmatterValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
            FrontmatterValue::Map(map) => {
                let json = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<&str> for FrontmatterValue {
    fn from(s: &str) -> Self {
        FrontmatterValue::String(s.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(s: String) -> Self {
        FrontmatterValue::String(s)
    }
}

impl From<bool> for FrontmatterValue {
    fn from(b: bool) -> Self {
        FrontmatterValue::Bool(b)
    }
}

impl From<i64> for FrontmatterValue {
    fn from(i: i64) -> Self {
        FrontmatterValue::Integer(i)
    }
}

impl From<Vec<&str>> for FrontmatterValue {
    fn from(items: Vec<&str>) -> Self {
        FrontmatterValue::List(items.into_iter().map(FrontmatterValue::from).collect())
    }
}

/// Insertion-ordered frontmatter mapping. Empty means "no frontmatter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    entries: Vec<(String, FrontmatterValue)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a YAML mapping, stringifying any non-string keys.
    pub fn from_mapping(map: serde_yaml::Mapping) -> Self {
        let mut fm = Frontmatter::new();
        for (key, value) in map {
            let key = match key {
                YamlValue::String(s) => s,
                other => match FrontmatterValue::from_yaml(other) {
                    FrontmatterValue::Null => continue,
                    k => k.to_string(),
                },
            };
            fm.insert(key, FrontmatterValue::from_yaml(value));
        }
        fm
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Insert or replace a value. Replacing keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FrontmatterValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontmatterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Shallow merge: every key of `other` overwrites, everything else is kept.
    pub fn merge(&mut self, other: &Frontmatter) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(FrontmatterValue::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status").and_then(FrontmatterValue::as_str)
    }

    /// Tags declared in frontmatter, with any leading `#` stripped.
    ///
    /// Accepts a list, or a single string of comma/space separated tags.
    pub fn tags(&self) -> Vec<String> {
        let raw = match self.get("tags") {
            Some(FrontmatterValue::String(s)) => s
                .split(|c: char| c == ',' || c.is_whitespace())
                .map(str::to_string)
                .collect(),
            Some(value) => value.string_items(),
            None => Vec::new(),
        };
        raw.iter()
            .map(|t| t.trim().trim_start_matches('#').to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Aliases declared in frontmatter (`aliases`, list or single string).
    pub fn aliases(&self) -> Vec<String> {
        self.get("aliases")
            .map(FrontmatterValue::string_items)
            .unwrap_or_default()
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect()
    }
}

impl Serialize for Frontmatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Frontmatter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct FrontmatterVisitor;

        impl<'de> Visitor<'de> for FrontmatterVisitor {
            type Value = Frontmatter;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a mapping of frontmatter fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Frontmatter, A::Error> {
                let mut fm = Frontmatter::new();
                while let Some((key, value)) = access.next_entry::<String, FrontmatterValue>()? {
                    fm.insert(key, value);
                }
                Ok(fm)
            }
        }

        deserializer.deserialize_map(FrontmatterVisitor)
    }
}
