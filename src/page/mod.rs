//! Page surface - the named display regions the renderer writes into

use std::collections::BTreeMap;
use std::fmt;

use crate::helpers::html_escape;

/// A named region of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    MenuToggle,
    NavList,
    Search,
    TagFilter,
    Posts,
    Sidebar,
    TagList,
    SinglePost,
    SingleHeader,
    SingleContent,
    Year,
}

impl Region {
    pub const ALL: [Region; 11] = [
        Region::MenuToggle,
        Region::NavList,
        Region::Search,
        Region::TagFilter,
        Region::Posts,
        Region::Sidebar,
        Region::TagList,
        Region::SinglePost,
        Region::SingleHeader,
        Region::SingleContent,
        Region::Year,
    ];

    /// Element id of the region
    pub fn id(self) -> &'static str {
        match self {
            Region::MenuToggle => "menu-toggle",
            Region::NavList => "nav-list",
            Region::Search => "search",
            Region::TagFilter => "tag-filter",
            Region::Posts => "posts",
            Region::Sidebar => "sidebar",
            Region::TagList => "tag-list",
            Region::SinglePost => "single-post",
            Region::SingleHeader => "single-header",
            Region::SingleContent => "single-content",
            Region::Year => "year",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Where the page was last asked to scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Region(Region),
}

/// Content, value and visibility of one region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionState {
    pub html: String,
    pub value: String,
    pub hidden: bool,
}

/// In-memory page made of named regions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    regions: BTreeMap<Region, RegionState>,
    scroll: Option<ScrollTarget>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A blank page; the single-post view and nav list start hidden
    pub fn new() -> Self {
        let mut regions: BTreeMap<Region, RegionState> = Region::ALL
            .iter()
            .map(|r| (*r, RegionState::default()))
            .collect();
        for region in [Region::SinglePost, Region::NavList] {
            if let Some(state) = regions.get_mut(&region) {
                state.hidden = true;
            }
        }
        regions
            .entry(Region::MenuToggle)
            .or_default()
            .value = "false".to_string();

        Self {
            regions,
            scroll: None,
        }
    }

    fn state_mut(&mut self, region: Region) -> &mut RegionState {
        self.regions.entry(region).or_default()
    }

    pub fn region(&self, region: Region) -> Option<&RegionState> {
        self.regions.get(&region)
    }

    pub fn html(&self, region: Region) -> &str {
        self.region(region).map(|s| s.html.as_str()).unwrap_or("")
    }

    pub fn set_html(&mut self, region: Region, html: impl Into<String>) {
        self.state_mut(region).html = html.into();
    }

    pub fn value(&self, region: Region) -> &str {
        self.region(region).map(|s| s.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, region: Region, value: impl Into<String>) {
        self.state_mut(region).value = value.into();
    }

    pub fn is_hidden(&self, region: Region) -> bool {
        self.region(region).map(|s| s.hidden).unwrap_or(false)
    }

    pub fn set_hidden(&mut self, region: Region, hidden: bool) {
        self.state_mut(region).hidden = hidden;
    }

    pub fn scroll(&self) -> Option<ScrollTarget> {
        self.scroll
    }

    pub fn scroll_to(&mut self, target: ScrollTarget) {
        self.scroll = Some(target);
    }

    /// Snapshot of every region as HTML sections
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for (region, state) in &self.regions {
            html.push_str(&format!(r#"<section id="{}""#, region.id()));
            if !state.value.is_empty() {
                html.push_str(&format!(r#" data-value="{}""#, html_escape(&state.value)));
            }
            if state.hidden {
                html.push_str(" hidden");
            }
            html.push('>');
            html.push_str(&state.html);
            html.push_str("</section>\n");
        }
        html
    }
}
