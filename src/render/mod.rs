//! Render engine - turns posts into HTML fragments

use chrono_tz::Tz;

use crate::config::{Messages, SiteConfig};
use crate::content::{Post, TagSet};
use crate::helpers::{display_date, html_escape, image_tag, link_to, time_tag};
use crate::router::{post_fragment, tag_fragment};

/// Renders cards, the single-post view and the tag navigation
#[derive(Debug, Clone)]
pub struct Renderer {
    date_format: String,
    timezone: Option<Tz>,
    default_author: String,
    messages: Messages,
}

impl Renderer {
    /// Create a renderer from the site configuration
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            date_format: config.date_format.clone(),
            timezone: config.tz(),
            default_author: config.default_author.clone(),
            messages: config.messages.clone(),
        }
    }

    /// Display form of a post date; unparseable dates are shown as written
    pub fn format_date(&self, raw: &str) -> String {
        display_date(raw, &self.date_format, self.timezone)
    }

    fn cover(&self, post: &Post, class: &str) -> String {
        post.cover()
            .map(|src| image_tag(src, &format!("{} cover", post.title), class))
            .unwrap_or_default()
    }

    fn tag_links(tags: &[String]) -> String {
        tags.iter()
            .map(|t| link_to(&tag_fragment(t), &html_escape(t), Some("tag")))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One list card
    pub fn card(&self, post: &Post) -> String {
        let author = if post.author.is_empty() {
            &self.default_author
        } else {
            &post.author
        };

        format!(
            r#"<article class="post-card">
{cover}<div class="post-meta">{time} <span>•</span> <span>{author}</span></div>
<h2 class="post-title">{title}</h2>
<p class="post-excerpt">{excerpt}</p>
<div class="card-footer">
{tags}
<div class="read-more"><a href="{href}" aria-label="Read {title}">{read_more}</a></div>
</div>
</article>
"#,
            cover = self.cover(post, "post-cover"),
            time = time_tag(&post.date, &self.format_date(&post.date)),
            author = html_escape(author),
            title = html_escape(&post.title),
            excerpt = html_escape(&post.excerpt),
            tags = Self::tag_links(&post.tags),
            href = post_fragment(&post.id),
            read_more = html_escape(&self.messages.read_more),
        )
    }

    /// The post list, or the "no matches" placeholder when empty
    pub fn post_list(&self, posts: &[&Post]) -> String {
        if posts.is_empty() {
            return self.no_matches();
        }
        posts.iter().map(|p| self.card(p)).collect()
    }

    /// Header of the single-post view
    pub fn single_header(&self, post: &Post) -> String {
        format!(
            r#"<h1>{title}</h1>
<div class="post-meta">{time} • {author}</div>
{cover}"#,
            title = html_escape(&post.title),
            time = time_tag(&post.date, &self.format_date(&post.date)),
            author = html_escape(&post.author),
            cover = self.cover(post, "single-cover"),
        )
    }

    /// Body of the single-post view
    ///
    /// Content is trusted markup from the collection and is not escaped.
    pub fn single_content(&self, post: &Post) -> String {
        post.content.clone()
    }

    /// Options for the tag selector, led by an "all tags" choice
    pub fn tag_options(&self, tags: &TagSet) -> String {
        let mut html = format!(
            r#"<option value="">{}</option>"#,
            html_escape(&self.messages.all_tags)
        );
        for tag in tags.sorted() {
            let tag = html_escape(tag);
            html.push_str(&format!(r#"<option value="{}">{}</option>"#, tag, tag));
        }
        html
    }

    /// Sidebar list of tag links
    pub fn tag_list(&self, tags: &TagSet) -> String {
        tags.sorted()
            .into_iter()
            .map(|t| link_to(&tag_fragment(t), &html_escape(t), Some("tag")))
            .collect()
    }

    pub fn no_matches(&self) -> String {
        format!("<p>{}</p>", html_escape(&self.messages.no_matches))
    }

    pub fn not_found(&self) -> String {
        format!("<h2>{}</h2>", html_escape(&self.messages.not_found))
    }

    pub fn load_failed(&self) -> String {
        format!("<p>{}</p>", html_escape(&self.messages.load_failed))
    }
}
