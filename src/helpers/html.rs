//! HTML helper functions

/// Escape HTML special characters
///
/// Quotes are escaped too so the result is safe inside attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate an image tag
///
/// # Examples
/// ```ignore
/// image_tag("/img/cover.png", "My Post cover", "post-cover")
/// ```
pub fn image_tag(src: &str, alt: &str, class: &str) -> String {
    format!(
        r#"<img class="{}" src="{}" alt="{}">"#,
        class,
        html_escape(src),
        html_escape(alt)
    )
}

/// Generate an anchor tag; `text` is inserted as-is
pub fn link_to(href: &str, text: &str, class: Option<&str>) -> String {
    match class {
        Some(class) => format!(r#"<a class="{}" href="{}">{}</a>"#, class, href, text),
        None => format!(r#"<a href="{}">{}</a>"#, href, text),
    }
}

/// Generate a <time> element from a raw date string and its display text
pub fn time_tag(raw: &str, display: &str) -> String {
    format!(
        r#"<time datetime="{}">{}</time>"#,
        html_escape(raw),
        html_escape(display)
    )
}
