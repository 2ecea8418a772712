//! Interactive browsing over stdin

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::app::App;
use crate::page::Region;
use crate::session::{Event, Session, Step};
use crate::Hashfolio;

const HELP: &str = "\
Commands:
  #<fragment>      navigate (#/, #/post/<id>, #tag=<tag>)
  /<text>          search (debounced)
  search <text>    search (debounced)
  tag [name]       select a tag, or all tags
  menu             toggle the navigation menu
  show             print the page
  quit             exit
";

/// Parse one line of input into an event
pub fn parse_command(line: &str) -> Option<Event> {
    let line = line.trim_end_matches(['\r', '\n']);

    if line.starts_with('#') {
        return Some(Event::Navigate(line.to_string()));
    }
    if let Some(query) = line.strip_prefix('/') {
        return Some(Event::Search(query.to_string()));
    }

    let (command, arg) = match line.trim().split_once(' ') {
        Some((command, arg)) => (command, arg.trim()),
        None => (line.trim(), ""),
    };

    match command {
        "search" => Some(Event::Search(arg.to_string())),
        "tag" if arg.is_empty() => Some(Event::SelectTag(None)),
        "tag" => Some(Event::SelectTag(Some(arg.to_string()))),
        "menu" => Some(Event::ToggleMenu),
        "show" => Some(Event::Show),
        "quit" | "exit" => Some(Event::Quit),
        _ => None,
    }
}

/// One-line description of the current state
pub fn status(app: &App) -> String {
    let page = app.page();
    if page.is_hidden(Region::SinglePost) {
        let ids = app.listed_ids();
        format!("[{}] {} posts: {}", app.view(), ids.len(), ids.join(", "))
    } else {
        format!("[{}] {}", app.view(), page.html(Region::SingleHeader).lines().next().unwrap_or(""))
    }
}

/// Run the session until stdin closes or the user quits
pub async fn run(site: &Hashfolio, fragment: &str) -> Result<()> {
    let app = site.open(fragment).await;
    let mut session = Session::new(app, site.config.search_debounce());

    let (tx, mut rx) = mpsc::channel(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_command(&line) {
                    Some(event) => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => eprint!("{}", HELP),
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });

    println!("{}", status(session.app()));
    while let Some(step) = session.next(&mut rx).await {
        match step {
            Step::Scheduled | Step::Stale => {}
            Step::Updated => println!("{}", status(session.app())),
            Step::Show => print!("{}", session.app().page().to_html()),
            Step::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::loader::parse_posts;

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("#/post/a"),
            Some(Event::Navigate("#/post/a".to_string()))
        );
        assert_eq!(parse_command("/rust"), Some(Event::Search("rust".to_string())));
        assert_eq!(parse_command("/"), Some(Event::Search(String::new())));
        assert_eq!(
            parse_command("search hello world"),
            Some(Event::Search("hello world".to_string()))
        );
        assert_eq!(
            parse_command("tag C++"),
            Some(Event::SelectTag(Some("C++".to_string())))
        );
        assert_eq!(parse_command("tag"), Some(Event::SelectTag(None)));
        assert_eq!(parse_command("menu"), Some(Event::ToggleMenu));
        assert_eq!(parse_command("show\r\n"), Some(Event::Show));
        assert_eq!(parse_command("exit"), Some(Event::Quit));
        assert_eq!(parse_command("dance"), None);
    }

    #[test]
    fn test_status() {
        let posts = parse_posts(
            r#"[
            {"id": "a", "title": "Hello World", "date": "2024-01-01"},
            {"id": "b", "title": "Second Post", "date": "2024-06-01"}
        ]"#,
        )
        .unwrap();
        let mut app = App::with_posts(&SiteConfig::default(), posts);
        assert_eq!(status(&app), "[home] 2 posts: b, a");

        app.navigate("#/post/a");
        assert_eq!(status(&app), r#"[post "a"] <h1>Hello World</h1>"#);
    }
}
