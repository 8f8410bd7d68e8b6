//! Dataset and record types.
//!
//! The dataset document is produced by an external pipeline and is not
//! trusted to be well-formed. Every field is optional and deserializes
//! leniently: a field of the wrong shape becomes absent rather than failing
//! the whole document. Only a top-level value that is not an object is
//! rejected.
//!
//! Records are split per collection ([`Project`], [`Article`], [`Manual`])
//! and viewed uniformly through the borrowed [`Record`] enum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One of the three record groupings in a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    #[default]
    Projects,
    Articles,
    Manuals,
}

impl CollectionKind {
    /// All collections, in tab order.
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::Projects,
        CollectionKind::Articles,
        CollectionKind::Manuals,
    ];

    /// The key used in the dataset document and in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Projects => "projects",
            CollectionKind::Articles => "articles",
            CollectionKind::Manuals => "manuals",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a collection name is not one of the known three.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown collection '{0}'. Use projects, articles, or manuals.")]
pub struct UnknownCollection(pub String);

impl FromStr for CollectionKind {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "projects" | "proyectos" => Ok(CollectionKind::Projects),
            "articles" | "articulos" | "artículos" => Ok(CollectionKind::Articles),
            "manuals" | "manuales" => Ok(CollectionKind::Manuals),
            _ => Err(UnknownCollection(s.to_string())),
        }
    }
}

/// The single fetched document: metadata plus the three collections.
///
/// Immutable once loaded; nothing in this crate mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    #[serde(deserialize_with = "lenient::text")]
    pub version: Option<String>,
    /// Raw publish timestamp, parsed for display by the controller.
    #[serde(
        rename = "fecha_publicacion",
        alias = "publishedAt",
        deserialize_with = "lenient::text"
    )]
    pub published_at: Option<String>,
    #[serde(deserialize_with = "lenient::records")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "lenient::records")]
    pub articles: Vec<Article>,
    #[serde(deserialize_with = "lenient::records")]
    pub manuals: Vec<Manual>,
}

impl Dataset {
    /// Parse a dataset document.
    ///
    /// Fails only when the input is not JSON or its top level is not an
    /// object. Malformed records degrade to empty fields.
    pub fn from_json(text: &str) -> serde_json::Result<Dataset> {
        serde_json::from_str(text)
    }

    /// Records of one collection, in document order.
    pub fn records(&self, kind: CollectionKind) -> Vec<Record<'_>> {
        match kind {
            CollectionKind::Projects => self.projects.iter().map(Record::Project).collect(),
            CollectionKind::Articles => self.articles.iter().map(Record::Article).collect(),
            CollectionKind::Manuals => self.manuals.iter().map(Record::Manual).collect(),
        }
    }

    /// Number of records in one collection.
    pub fn len(&self, kind: CollectionKind) -> usize {
        match kind {
            CollectionKind::Projects => self.projects.len(),
            CollectionKind::Articles => self.articles.len(),
            CollectionKind::Manuals => self.manuals.len(),
        }
    }

    /// Every record across all three collections.
    pub fn all_records(&self) -> impl Iterator<Item = Record<'_>> {
        self.projects
            .iter()
            .map(Record::Project)
            .chain(self.articles.iter().map(Record::Article))
            .chain(self.manuals.iter().map(Record::Manual))
    }
}

/// A research project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub investigators: Option<Vec<String>>,
    pub year: Option<Value>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub area: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub dicith: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub pdf: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: Option<String>,
    #[serde(rename = "isCIA", deserialize_with = "lenient::flag")]
    pub is_cia: bool,
}

/// A published article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub investigators: Option<Vec<String>>,
    pub year: Option<Value>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub area: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub dicith: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub pdf: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: Option<String>,
}

/// A manual, usually backed by a PDF shipped next to the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manual {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub investigators: Option<Vec<String>>,
    pub year: Option<Value>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub area: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub dicith: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub pdf: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: Option<String>,
}

/// Borrowed view over a record of any collection.
///
/// Every collection carries the same searchable fields; a collection's
/// table shows only some of them. `is_cia` is meaningful for projects only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Record<'a> {
    Project(&'a Project),
    Article(&'a Article),
    Manual(&'a Manual),
}

impl<'a> Record<'a> {
    pub fn kind(&self) -> CollectionKind {
        match self {
            Record::Project(_) => CollectionKind::Projects,
            Record::Article(_) => CollectionKind::Articles,
            Record::Manual(_) => CollectionKind::Manuals,
        }
    }

    pub fn id(&self) -> Option<&'a str> {
        match self {
            Record::Project(p) => p.id.as_deref(),
            Record::Article(a) => a.id.as_deref(),
            Record::Manual(m) => m.id.as_deref(),
        }
    }

    pub fn title(&self) -> Option<&'a str> {
        match self {
            Record::Project(p) => p.title.as_deref(),
            Record::Article(a) => a.title.as_deref(),
            Record::Manual(m) => m.title.as_deref(),
        }
    }

    pub fn year(&self) -> Option<&'a Value> {
        match self {
            Record::Project(p) => p.year.as_ref(),
            Record::Article(a) => a.year.as_ref(),
            Record::Manual(m) => m.year.as_ref(),
        }
    }

    pub fn investigators(&self) -> Option<&'a [String]> {
        match self {
            Record::Project(p) => p.investigators.as_deref(),
            Record::Article(a) => a.investigators.as_deref(),
            Record::Manual(m) => m.investigators.as_deref(),
        }
    }

    pub fn status(&self) -> Option<&'a str> {
        match self {
            Record::Project(p) => p.status.as_deref(),
            Record::Article(a) => a.status.as_deref(),
            Record::Manual(m) => m.status.as_deref(),
        }
    }

    pub fn area(&self) -> Option<&'a str> {
        match self {
            Record::Project(p) => p.area.as_deref(),
            Record::Article(a) => a.area.as_deref(),
            Record::Manual(m) => m.area.as_deref(),
        }
    }

    pub fn dicith(&self) -> Option<&'a str> {
        match self {
            Record::Project(p) => p.dicith.as_deref(),
            Record::Article(a) => a.dicith.as_deref(),
            Record::Manual(m) => m.dicith.as_deref(),
        }
    }

    pub fn link(&self) -> Option<&'a str> {
        match self {
            Record::Project(p) => p.link.as_deref(),
            Record::Article(a) => a.link.as_deref(),
            Record::Manual(m) => m.link.as_deref(),
        }
    }

    pub fn pdf(&self) -> Option<&'a str> {
        match self {
            Record::Project(p) => p.pdf.as_deref(),
            Record::Article(a) => a.pdf.as_deref(),
            Record::Manual(m) => m.pdf.as_deref(),
        }
    }

    pub fn summary(&self) -> Option<&'a str> {
        match self {
            Record::Project(p) => p.summary.as_deref(),
            Record::Article(a) => a.summary.as_deref(),
            Record::Manual(m) => m.summary.as_deref(),
        }
    }

    pub fn is_cia(&self) -> bool {
        match self {
            Record::Project(p) => p.is_cia,
            _ => false,
        }
    }
}

/// Deserializers that never fail on a wrongly-typed value.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::extract::format_number;

    /// Strings pass through; numbers and booleans are stringified; anything
    /// else is absent. Integral floats lose their fraction (`17.0` → `"17"`).
    pub(super) fn value_text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
            Value::Number(n) => n.as_f64().map(format_number),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub(super) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value_text(&value))
    }

    pub(super) fn list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => Ok(Some(
                items
                    .iter()
                    .map(|item| value_text(item).unwrap_or_default())
                    .collect(),
            )),
            _ => Ok(None),
        }
    }

    /// Truthiness: `true`, non-zero numbers and non-empty strings.
    pub(super) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
            Value::Null => false,
        })
    }

    pub(super) fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => Ok(items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect()),
            _ => Ok(Vec::new()),
        }
    }
}
