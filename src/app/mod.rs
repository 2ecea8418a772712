//! Application state - the loaded collection, current filters and view
//!
//! `App` is built once at startup and owns everything the page shows.
//! Rendering, filtering and routing all go through it.

use chrono::Datelike;

use crate::config::SiteConfig;
use crate::content::{LoadError, Post, PostSource, TagSet};
use crate::filter::Filter;
use crate::page::{Page, Region, ScrollTarget};
use crate::render::Renderer;
use crate::router::View;

/// The running page
#[derive(Debug, Clone)]
pub struct App {
    renderer: Renderer,
    posts: Vec<Post>,
    tags: TagSet,
    filter: Filter,
    view: View,
    /// Ids of the posts currently in the list, in display order
    listed: Vec<String>,
    menu_open: bool,
    page: Page,
}

impl App {
    fn blank(config: &SiteConfig) -> Self {
        let mut page = Page::new();
        page.set_html(Region::Year, chrono::Local::now().year().to_string());

        Self {
            renderer: Renderer::new(config),
            posts: Vec::new(),
            tags: TagSet::default(),
            filter: Filter::default(),
            view: View::Home,
            listed: Vec::new(),
            menu_open: false,
            page,
        }
    }

    /// Load the collection and route to the starting fragment
    pub async fn start(config: &SiteConfig, source: &PostSource, fragment: &str) -> Self {
        match source.load().await {
            Ok(posts) => {
                let mut app = Self::with_posts(config, posts);
                app.navigate(fragment);
                app
            }
            Err(e) => Self::load_failed(config, &e),
        }
    }

    /// An app over an already-sorted collection, with the list and tag
    /// navigation drawn
    pub fn with_posts(config: &SiteConfig, posts: Vec<Post>) -> Self {
        let mut app = Self::blank(config);
        app.tags = TagSet::from_posts(&posts);
        app.posts = posts;

        app.apply_filters();
        app.page
            .set_html(Region::TagFilter, app.renderer.tag_options(&app.tags));
        app.page
            .set_html(Region::TagList, app.renderer.tag_list(&app.tags));

        tracing::debug!(
            "Rendered {} posts with {} tags",
            app.posts.len(),
            app.tags.len()
        );
        app
    }

    /// An empty app showing the load failure in place of the list
    pub fn load_failed(config: &SiteConfig, error: &LoadError) -> Self {
        tracing::error!("Failed to load posts: {}", error);
        let mut app = Self::blank(config);
        let message = app.renderer.load_failed();
        app.page.set_html(Region::Posts, message);
        app
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Ids of the posts currently listed
    pub fn listed_ids(&self) -> Vec<&str> {
        self.listed.iter().map(String::as_str).collect()
    }

    /// First post with the given id
    pub fn find_post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Re-run the filter over the full collection and redraw the list
    pub fn apply_filters(&mut self) -> usize {
        let matched = self.filter.apply(&self.posts);
        let html = self.renderer.post_list(&matched);
        self.listed = matched.iter().map(|p| p.id.clone()).collect();
        self.page.set_html(Region::Posts, html);
        self.listed.len()
    }

    /// Set the search query and refilter
    pub fn set_query(&mut self, query: &str) -> usize {
        self.filter.query = query.to_string();
        self.page.set_value(Region::Search, query);
        self.apply_filters()
    }

    /// Set or clear the tag constraint and refilter
    pub fn select_tag(&mut self, tag: Option<&str>) -> usize {
        self.filter.tag = tag.filter(|t| !t.is_empty()).map(str::to_string);
        self.page
            .set_value(Region::TagFilter, self.filter.tag.clone().unwrap_or_default());
        self.apply_filters()
    }

    /// Route to the view named by a fragment
    pub fn navigate(&mut self, fragment: &str) -> &View {
        let view = View::from_fragment(fragment);
        tracing::debug!("Navigating to {} ({:?})", view, fragment);

        match &view {
            View::SinglePost { id } => self.show_post(id),
            View::TagFiltered { tag } => {
                self.select_tag(Some(tag));
                self.show_list();
                self.page.scroll_to(ScrollTarget::Region(Region::Posts));
            }
            View::Home => self.show_list(),
        }

        self.view = view;
        &self.view
    }

    fn show_post(&mut self, id: &str) {
        let (header, content) = match self.find_post(id) {
            Some(post) => (
                self.renderer.single_header(post),
                self.renderer.single_content(post),
            ),
            None => {
                tracing::debug!("No post with id {:?}", id);
                (self.renderer.not_found(), String::new())
            }
        };

        self.page.set_html(Region::SingleHeader, header);
        self.page.set_html(Region::SingleContent, content);
        self.page.set_hidden(Region::SinglePost, false);
        self.page.set_hidden(Region::Posts, true);
        self.page.set_hidden(Region::Sidebar, true);
        self.page.scroll_to(ScrollTarget::Top);
    }

    fn show_list(&mut self) {
        self.page.set_hidden(Region::SinglePost, true);
        self.page.set_hidden(Region::Posts, false);
        self.page.set_hidden(Region::Sidebar, false);
    }

    /// Open or close the navigation menu
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.page
            .set_value(Region::MenuToggle, self.menu_open.to_string());
        self.page.set_hidden(Region::NavList, !self.menu_open);
        self.menu_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::parse_posts;

    const SAMPLE: &str = r#"[
        {"id": "a", "title": "Hello World", "tags": ["intro"], "date": "2024-01-01",
         "content": "<p>First <strong>body</strong></p>"},
        {"id": "b", "title": "Second Post", "tags": ["intro", "news"], "date": "2024-06-01"}
    ]"#;

    fn app() -> App {
        App::with_posts(&SiteConfig::default(), parse_posts(SAMPLE).unwrap())
    }

    fn list_visible(app: &App) -> bool {
        !app.page().is_hidden(Region::Posts) && !app.page().is_hidden(Region::Sidebar)
    }

    #[test]
    fn test_initial_render() {
        let app = app();
        assert_eq!(app.listed_ids(), vec!["b", "a"]);
        let posts = app.page().html(Region::Posts);
        assert!(posts.find("Second Post").unwrap() < posts.find("Hello World").unwrap());
        assert!(app.page().html(Region::TagFilter).contains(r#"value="news""#));
        assert!(app.page().html(Region::TagList).contains("#tag=intro"));
        assert_eq!(
            app.page().html(Region::Year),
            chrono::Local::now().year().to_string()
        );
        assert_eq!(app.view(), &View::Home);
    }

    #[test]
    fn test_search_and_tag() {
        let mut app = app();
        assert_eq!(app.set_query("second"), 1);
        assert_eq!(app.listed_ids(), vec!["b"]);
        assert_eq!(app.page().value(Region::Search), "second");

        app.set_query("");
        assert_eq!(app.select_tag(Some("news")), 1);
        assert_eq!(app.listed_ids(), vec!["b"]);

        assert_eq!(app.select_tag(Some("missing")), 0);
        assert_eq!(
            app.page().html(Region::Posts),
            "<p>No posts match your search.</p>"
        );

        assert_eq!(app.select_tag(None), 2);
        assert_eq!(app.page().value(Region::TagFilter), "");
    }

    #[test]
    fn test_navigate_to_post() {
        let mut app = app();
        app.navigate("#/post/a");
        assert_eq!(app.view(), &View::SinglePost { id: "a".to_string() });
        assert!(app.page().html(Region::SingleHeader).contains("<h1>Hello World</h1>"));
        assert_eq!(
            app.page().html(Region::SingleContent),
            "<p>First <strong>body</strong></p>"
        );
        assert!(!app.page().is_hidden(Region::SinglePost));
        assert!(app.page().is_hidden(Region::Posts));
        assert!(app.page().is_hidden(Region::Sidebar));
        assert_eq!(app.page().scroll(), Some(ScrollTarget::Top));
    }

    #[test]
    fn test_navigate_to_missing_post() {
        let mut app = app();
        app.navigate("#/post/zzz");
        assert_eq!(app.page().html(Region::SingleHeader), "<h2>Post not found.</h2>");
        assert_eq!(app.page().html(Region::SingleContent), "");
        assert!(!app.page().is_hidden(Region::SinglePost));
        assert!(!list_visible(&app));
    }

    #[test]
    fn test_navigate_home() {
        for fragment in ["", "#/", "#/about"] {
            let mut app = app();
            app.navigate("#/post/a");
            app.navigate(fragment);
            assert_eq!(app.view(), &View::Home);
            assert!(app.page().is_hidden(Region::SinglePost));
            assert!(list_visible(&app));
        }
    }

    #[test]
    fn test_navigate_to_tag() {
        let mut app = app();
        app.navigate("#/post/a");
        app.navigate("#tag=news");
        assert_eq!(app.view(), &View::TagFiltered { tag: "news".to_string() });
        assert_eq!(app.filter().tag.as_deref(), Some("news"));
        assert_eq!(app.page().value(Region::TagFilter), "news");
        assert_eq!(app.listed_ids(), vec!["b"]);
        assert!(app.page().is_hidden(Region::SinglePost));
        assert!(list_visible(&app));
        assert_eq!(
            app.page().scroll(),
            Some(ScrollTarget::Region(Region::Posts))
        );
    }

    #[test]
    fn test_navigation_is_idempotent() {
        for fragment in ["#/post/a", "#tag=intro", "#/", "#/post/nope"] {
            let mut app = app();
            app.navigate(fragment);
            let first = app.page().clone();
            app.navigate(fragment);
            assert_eq!(app.page(), &first, "{}", fragment);
        }
    }

    #[test]
    fn test_home_keeps_filters() {
        let mut app = app();
        app.navigate("#tag=news");
        app.navigate("#/");
        assert_eq!(app.listed_ids(), vec!["b"]);
    }

    #[test]
    fn test_escaped_title_in_views() {
        let json = r#"[{"id": "x", "title": "<script>alert(1)</script>", "date": "2024-01-01"}]"#;
        let mut app = App::with_posts(&SiteConfig::default(), parse_posts(json).unwrap());
        assert!(!app.page().html(Region::Posts).contains("<script>"));
        app.navigate("#/post/x");
        let header = app.page().html(Region::SingleHeader);
        assert!(header.contains("&lt;script&gt;"));
        assert!(!header.contains("<script>"));
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let json = r#"[
            {"id": "d", "title": "Newer", "date": "2024-02-01"},
            {"id": "d", "title": "Older", "date": "2024-01-01"}
        ]"#;
        let app = App::with_posts(&SiteConfig::default(), parse_posts(json).unwrap());
        assert_eq!(app.find_post("d").map(|p| p.title.as_str()), Some("Newer"));
    }

    #[test]
    fn test_toggle_menu() {
        let mut app = app();
        assert!(app.toggle_menu());
        assert_eq!(app.page().value(Region::MenuToggle), "true");
        assert!(!app.page().is_hidden(Region::NavList));
        assert!(!app.toggle_menu());
        assert!(app.page().is_hidden(Region::NavList));
    }

    #[tokio::test]
    async fn test_start_routes_initial_fragment() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("posts.json"), SAMPLE).unwrap();
        let source = PostSource::resolve(dir.path(), "posts.json");

        let app = App::start(&SiteConfig::default(), &source, "#/post/b").await;
        assert_eq!(app.view(), &View::SinglePost { id: "b".to_string() });
        assert!(app.page().html(Region::SingleHeader).contains("Second Post"));
    }

    #[tokio::test]
    async fn test_start_with_broken_collection() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("posts.json"), "{oops").unwrap();
        let source = PostSource::resolve(dir.path(), "posts.json");

        let mut app = App::start(&SiteConfig::default(), &source, "#/").await;
        assert!(app.posts().is_empty());
        assert_eq!(app.page().html(Region::Posts), "<p>Unable to load posts.</p>");

        app.navigate("#/post/a");
        assert_eq!(app.page().html(Region::SingleHeader), "<h2>Post not found.</h2>");
    }
}
