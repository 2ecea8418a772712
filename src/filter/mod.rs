//! Search and tag filtering over the in-memory collection

use crate::content::Post;

/// Current search constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Free-text query as typed
    pub query: String,
    /// Exact tag constraint
    pub tag: Option<String>,
}

impl Filter {
    pub fn new(query: impl Into<String>, tag: Option<String>) -> Self {
        Self {
            query: query.into(),
            tag,
        }
    }

    /// The normalized query; empty means "match everything"
    fn needle(&self) -> String {
        self.query.trim().to_lowercase()
    }

    /// Whether the filter constrains anything
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.tag.is_none()
    }

    /// Whether a single post passes both constraints
    pub fn matches(&self, post: &Post) -> bool {
        matches_needle(post, &self.needle(), self.tag.as_deref())
    }

    /// Posts passing the filter, in collection order
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        let needle = self.needle();
        let tag = self.tag.as_deref();
        let result: Vec<&Post> = posts
            .iter()
            .filter(|p| matches_needle(p, &needle, tag))
            .collect();

        tracing::debug!(
            "Filter query={:?} tag={:?}: {} of {} posts",
            needle,
            tag,
            result.len(),
            posts.len()
        );

        result
    }
}

fn matches_needle(post: &Post, needle: &str, tag: Option<&str>) -> bool {
    if !needle.is_empty() && !post.search_text().contains(needle) {
        return false;
    }
    if let Some(tag) = tag {
        if !post.has_tag(tag) {
            return false;
        }
    }
    true
}
