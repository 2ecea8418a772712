//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::Post;
use crate::Hashfolio;

/// List site content by type
pub async fn run(site: &Hashfolio, content_type: &str) -> Result<()> {
    let posts = site.source().load().await?;
    print!("{}", render(&posts, content_type)?);
    Ok(())
}

/// Text listing of posts or tags
pub fn render(posts: &[Post], content_type: &str) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            out.push_str(&format!("Posts ({}):\n", posts.len()));
            for post in posts {
                out.push_str(&format!("  {} - {} [{}]\n", post.date, post.title, post.id));
            }
        }
        "tag" | "tags" => {
            let mut tags: HashMap<&str, usize> = HashMap::new();
            for post in posts {
                for tag in &post.tags {
                    *tags.entry(tag.as_str()).or_insert(0) += 1;
                }
            }
            out.push_str(&format!("Tags ({}):\n", tags.len()));
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            for (tag, count) in tags {
                out.push_str(&format!("  {} ({})\n", tag, count));
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(out)
}
