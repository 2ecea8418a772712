//! Interactive session - feeds input and navigation events into the app
//!
//! Everything runs on one task. Search input is debounced; tag selection,
//! navigation and the menu toggle apply immediately.

mod debounce;

pub use debounce::Debouncer;

use std::time::Duration;
use tokio::sync::mpsc;

use crate::app::App;

/// Something the user did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Text typed into the search box
    Search(String),
    /// Tag chosen in the selector; `None` is "all tags"
    SelectTag(Option<String>),
    /// The URL fragment changed
    Navigate(String),
    ToggleMenu,
    /// Request to print the page
    Show,
    Quit,
}

/// Outcome of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Search input accepted, results follow once typing pauses
    Scheduled,
    /// The page changed
    Updated,
    /// A search superseded by newer input was discarded
    Stale,
    Show,
    Quit,
}

/// An app plus the debounce state of its search box
pub struct Session {
    app: App,
    search: Debouncer<String>,
    settled: mpsc::UnboundedReceiver<String>,
    /// Typed query whose debounce has not fired yet
    typed: Option<String>,
}

impl Session {
    pub fn new(app: App, debounce: Duration) -> Self {
        let (search, settled) = Debouncer::new(debounce);
        Self {
            app,
            search,
            settled,
            typed: None,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Whether a search is waiting for typing to pause
    pub fn search_pending(&self) -> bool {
        self.typed.is_some()
    }

    /// Handle one event
    pub fn dispatch(&mut self, event: Event) -> Step {
        match event {
            Event::Search(query) => {
                self.typed = Some(query.clone());
                self.search.schedule(query);
                Step::Scheduled
            }
            Event::SelectTag(tag) => {
                self.flush_search();
                self.app.select_tag(tag.as_deref());
                Step::Updated
            }
            Event::Navigate(fragment) => {
                self.flush_search();
                self.app.navigate(&fragment);
                Step::Updated
            }
            Event::ToggleMenu => {
                self.app.toggle_menu();
                Step::Updated
            }
            Event::Show => Step::Show,
            Event::Quit => {
                self.search.cancel();
                Step::Quit
            }
        }
    }

    /// Wait for the next event or settled search and handle it
    ///
    /// Returns `None` once the event channel is closed.
    pub async fn next(&mut self, events: &mut mpsc::Receiver<Event>) -> Option<Step> {
        tokio::select! {
            Some(query) = self.settled.recv() => Some(self.settle(query)),
            event = events.recv() => event.map(|e| self.dispatch(e)),
        }
    }

    fn settle(&mut self, query: String) -> Step {
        // Only the latest typed value may land; anything else was sent
        // before newer input or a flush replaced it.
        if self.typed.as_deref() != Some(query.as_str()) {
            tracing::debug!("Dropping superseded search {:?}", query);
            return Step::Stale;
        }
        self.typed = None;
        let shown = self.app.set_query(&query);
        tracing::debug!("Search {:?} settled, {} posts shown", query, shown);
        Step::Updated
    }

    /// Apply typed-but-unsettled input now, as the filters read the
    /// search box as it currently stands
    fn flush_search(&mut self) {
        self.search.cancel();
        if let Some(query) = self.typed.take() {
            self.app.set_query(&query);
        }
    }
}
