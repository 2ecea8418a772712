//! Hash router - maps URL fragments to views

use std::fmt;

use crate::helpers::{decode_component, encode_component};

const POST_PREFIX: &str = "/post/";
const TAG_PREFIX: &str = "tag=";

/// What the page is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// The post list with sidebar
    Home,
    /// One post, by id
    SinglePost { id: String },
    /// The post list narrowed to a tag
    TagFiltered { tag: String },
}

impl View {
    /// Map a fragment such as `#/post/a` or `#tag=news` to a view
    ///
    /// The leading `#` is optional. Anything unrecognised is `Home`.
    pub fn from_fragment(fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

        if let Some(id) = fragment.strip_prefix(POST_PREFIX) {
            View::SinglePost {
                id: decode_component(id),
            }
        } else if let Some(tag) = fragment.strip_prefix(TAG_PREFIX) {
            View::TagFiltered {
                tag: decode_component(tag),
            }
        } else {
            View::Home
        }
    }

    /// The fragment that navigates to this view
    pub fn fragment(&self) -> String {
        match self {
            View::Home => "#/".to_string(),
            View::SinglePost { id } => post_fragment(id),
            View::TagFiltered { tag } => tag_fragment(tag),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Home => f.write_str("home"),
            View::SinglePost { id } => write!(f, "post {:?}", id),
            View::TagFiltered { tag } => write!(f, "tag {:?}", tag),
        }
    }
}

/// Fragment linking to a single post
pub fn post_fragment(id: &str) -> String {
    format!("#{}{}", POST_PREFIX, encode_component(id))
}

/// Fragment linking to a tag-filtered list
pub fn tag_fragment(tag: &str) -> String {
    format!("#{}{}", TAG_PREFIX, encode_component(tag))
}
