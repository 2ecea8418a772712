//! Render one page state and print it

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::app::App;
use crate::Hashfolio;

/// Options for a one-shot render
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Starting URL fragment
    pub fragment: String,
    /// Search query applied after routing
    pub query: Option<String>,
    /// Tag selected after routing
    pub tag: Option<String>,
}

/// Open the page, apply the options and write the snapshot
pub async fn run(site: &Hashfolio, options: &ViewOptions, output: Option<&Path>) -> Result<()> {
    let app = site.open(&options.fragment).await;
    let html = render(app, options);

    match output {
        Some(path) => {
            fs::write(path, html)?;
            tracing::info!("Wrote page to {:?}", path);
        }
        None => print!("{}", html),
    }
    Ok(())
}

/// Apply the search options to an opened app and snapshot its page
pub fn render(mut app: App, options: &ViewOptions) -> String {
    if let Some(tag) = &options.tag {
        app.select_tag(Some(tag));
    }
    if let Some(query) = &options.query {
        app.set_query(query);
    }
    app.page().to_html()
}
