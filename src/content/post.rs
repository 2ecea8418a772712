//! Post model and derived tag set

use chrono::{DateTime, FixedOffset};
use indexmap::IndexSet;
use serde::{Deserialize, Deserializer};

use crate::helpers::parse_date;

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A post from the collection
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Post {
    /// Opaque identifier used in `#/post/<id>` links
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,

    /// Raw publication date as written in the collection
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,

    /// Post body; trusted markup, rendered without escaping
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,

    /// Cover image reference
    #[serde(default)]
    pub cover: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl Post {
    /// Create a post with the given id and title
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    /// Publication date, if the raw date parses
    pub fn published(&self) -> Option<DateTime<FixedOffset>> {
        parse_date(&self.date)
    }

    /// Whether the post carries exactly this tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Cover reference, ignoring empty strings
    pub fn cover(&self) -> Option<&str> {
        self.cover.as_deref().filter(|c| !c.is_empty())
    }

    /// Lowercased text searched by free-text queries
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title,
            self.excerpt,
            self.content,
            self.tags.join(" ")
        )
        .to_lowercase()
    }
}

/// All distinct tags of a collection, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: IndexSet<String>,
}

impl TagSet {
    /// Collect the tags of every post
    pub fn from_posts(posts: &[Post]) -> Self {
        let tags = posts
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect();
        Self { tags }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Tags in display order
    pub fn sorted(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}
