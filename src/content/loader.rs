//! Content loader - fetches the post collection once at startup

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::Post;

/// Errors raised while loading the post collection
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse post collection: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the post collection lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostSource {
    /// A JSON file on disk
    File(PathBuf),
    /// A JSON document served over HTTP
    Remote(String),
}

impl PostSource {
    /// Resolve a configured location against the site directory
    pub fn resolve(base_dir: &Path, location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            PostSource::Remote(location.to_string())
        } else {
            PostSource::File(base_dir.join(location))
        }
    }

    /// Fetch, parse and sort the collection
    pub async fn load(&self) -> Result<Vec<Post>, LoadError> {
        let body = self.fetch().await?;
        let posts = parse_posts(&body)?;
        tracing::info!("Loaded {} posts from {}", posts.len(), self);
        Ok(posts)
    }

    /// Read the raw document, bypassing HTTP caches
    async fn fetch(&self) -> Result<String, LoadError> {
        match self {
            PostSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.clone(),
                        source,
                    })
            }
            PostSource::Remote(url) => {
                let http = |source| LoadError::Http {
                    url: url.clone(),
                    source,
                };
                let response = reqwest::Client::new()
                    .get(url)
                    .header(CACHE_CONTROL, "no-store")
                    .header(PRAGMA, "no-cache")
                    .send()
                    .await
                    .map_err(http)?
                    .error_for_status()
                    .map_err(http)?;
                response.text().await.map_err(http)
            }
        }
    }
}

impl std::fmt::Display for PostSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostSource::File(path) => write!(f, "{}", path.display()),
            PostSource::Remote(url) => f.write_str(url),
        }
    }
}

/// Parse a JSON array of posts and sort it newest first
pub fn parse_posts(json: &str) -> Result<Vec<Post>, LoadError> {
    let mut posts: Vec<Post> = serde_json::from_str(json)?;
    sort_by_date(&mut posts);
    Ok(posts)
}

/// Sort by date descending (newest first)
///
/// The sort is stable; posts whose date does not parse go last.
pub fn sort_by_date(posts: &mut [Post]) {
    posts.sort_by_cached_key(|p| std::cmp::Reverse(p.published()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE: &str = r#"[
        {"id": "a", "title": "Hello World", "tags": ["intro"], "date": "2024-01-01"},
        {"id": "b", "title": "Second Post", "tags": ["intro", "news"], "date": "2024-06-01"}
    ]"#;

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_parse_sorts_newest_first() {
        let posts = parse_posts(SAMPLE).unwrap();
        assert_eq!(ids(&posts), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_is_stable_and_undated_last() {
        let mut posts = vec![
            Post::new("x", "", "garbage"),
            Post::new("t1", "", "2024-03-01"),
            Post::new("old", "", "2020-01-01"),
            Post::new("t2", "", "2024-03-01T00:00:00Z"),
            Post::new("y", "", ""),
        ];
        sort_by_date(&mut posts);
        assert_eq!(ids(&posts), vec!["t1", "t2", "old", "x", "y"]);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(parse_posts("{not json"), Err(LoadError::Parse(_))));
        assert!(matches!(parse_posts(r#"{"id": "a"}"#), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_resolve() {
        let base = Path::new("/site");
        assert_eq!(
            PostSource::resolve(base, "posts.json"),
            PostSource::File(PathBuf::from("/site/posts.json"))
        );
        assert_eq!(
            PostSource::resolve(base, "https://example.com/posts.json"),
            PostSource::Remote("https://example.com/posts.json".to_string())
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("posts.json"), SAMPLE).unwrap();

        let source = PostSource::resolve(dir.path(), "posts.json");
        let posts = source.load().await.unwrap();
        assert_eq!(ids(&posts), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = PostSource::resolve(dir.path(), "missing.json");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[tokio::test]
    async fn test_load_remote_bypasses_cache() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts.json"))
            .and(header("Cache-Control", "no-store"))
            .and(header("Pragma", "no-cache"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/posts.json", mock_server.uri());
        let source = PostSource::resolve(Path::new("/unused"), &url);
        assert_eq!(source, PostSource::Remote(url));

        let posts = source.load().await.unwrap();
        assert_eq!(ids(&posts), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_load_remote_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let url = format!("{}/posts.json", mock_server.uri());
        let err = PostSource::Remote(url.clone()).load().await.unwrap_err();
        assert!(matches!(err, LoadError::Http { .. }));
        assert!(err.to_string().contains(&url));
    }

    #[tokio::test]
    async fn test_load_remote_bad_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let url = format!("{}/posts.json", mock_server.uri());
        let err = PostSource::Remote(url).load().await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
