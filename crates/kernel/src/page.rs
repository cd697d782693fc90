//! Page identifiers and fragment-based navigation.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The closed set of pages the site can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    #[default]
    Home,
    Books,
    Authors,
    About,
    Blog,
    Shop,
    Admin,
    Contact,
    Submissions,
    Press,
    Bookings,
}

impl PageId {
    pub const ALL: [PageId; 11] = [
        PageId::Home,
        PageId::Books,
        PageId::Authors,
        PageId::About,
        PageId::Blog,
        PageId::Shop,
        PageId::Admin,
        PageId::Contact,
        PageId::Submissions,
        PageId::Press,
        PageId::Bookings,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Books => "books",
            PageId::Authors => "authors",
            PageId::About => "about",
            PageId::Blog => "blog",
            PageId::Shop => "shop",
            PageId::Admin => "admin",
            PageId::Contact => "contact",
            PageId::Submissions => "submissions",
            PageId::Press => "press",
            PageId::Bookings => "bookings",
        }
    }

    /// Exact, case-sensitive lookup of an identifier.
    pub fn parse(id: &str) -> Option<PageId> {
        Self::ALL.into_iter().find(|page| page.as_str() == id)
    }

    /// Resolve an identifier, rendering anything unknown as the home page.
    pub fn from_id(id: &str) -> PageId {
        Self::parse(id).unwrap_or_default()
    }

    /// Resolve a raw fragment such as `#/books`.
    ///
    /// Total over all input: a missing `#/` prefix leaves the text as-is, and
    /// empty or unknown identifiers resolve to [`PageId::Home`].
    pub fn from_fragment(raw: &str) -> PageId {
        let id = raw.strip_prefix("#/").unwrap_or(raw);
        if id.is_empty() {
            return PageId::Home;
        }
        Self::from_id(id)
    }

    pub fn fragment(self) -> String {
        format!("#/{}", self.as_str())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the current navigation fragment and notifies on every change.
///
/// The current page is re-derived from the fragment on each read, so changes
/// that did not come through [`Navigator::navigate`] are picked up too.
#[derive(Debug)]
pub struct Navigator {
    fragment: watch::Sender<String>,
}

impl Navigator {
    pub fn new(initial_fragment: impl Into<String>) -> Self {
        let (fragment, _) = watch::channel(initial_fragment.into());
        Self { fragment }
    }

    pub fn current(&self) -> PageId {
        PageId::from_fragment(&self.fragment.borrow())
    }

    pub fn fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    pub fn navigate(&self, page: PageId) {
        self.set_fragment(page.fragment());
    }

    /// Navigate to an arbitrary identifier. Unknown identifiers are accepted
    /// here and read back as [`PageId::Home`].
    pub fn navigate_to(&self, id: &str) {
        self.set_fragment(format!("#/{id}"));
    }

    /// Record a fragment change that originated outside the navigator, such
    /// as history traversal or a manually edited address.
    pub fn set_fragment(&self, raw: impl Into<String>) {
        let raw = raw.into();
        tracing::debug!(fragment = %raw, page = %PageId::from_fragment(&raw), "fragment changed");
        self.fragment.send_replace(raw);
    }

    pub fn subscribe(&self) -> PageChanges {
        PageChanges {
            rx: self.fragment.subscribe(),
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new("")
    }
}

/// Stream of page changes from a [`Navigator`].
#[derive(Debug)]
pub struct PageChanges {
    rx: watch::Receiver<String>,
}

impl PageChanges {
    /// Wait for the next fragment change. Returns `None` once the navigator
    /// is dropped.
    pub async fn next(&mut self) -> Option<PageId> {
        self.rx.changed().await.ok()?;
        let page = PageId::from_fragment(&self.rx.borrow_and_update());
        Some(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_then_read_for_every_page() {
        let navigator = Navigator::default();
        for page in PageId::ALL {
            navigator.navigate(page);
            assert_eq!(navigator.current(), page);
            assert_eq!(navigator.fragment(), format!("#/{page}"));
        }
    }

    #[test]
    fn unknown_identifier_reads_as_home() {
        let navigator = Navigator::new("#/books");
        navigator.navigate_to("nonexistent");
        assert_eq!(navigator.fragment(), "#/nonexistent");
        assert_eq!(navigator.current(), PageId::Home);
    }

    #[test]
    fn initial_page_is_derived_from_fragment() {
        assert_eq!(Navigator::new("#/press").current(), PageId::Press);
        assert_eq!(Navigator::new("").current(), PageId::Home);
        assert_eq!(Navigator::default().current(), PageId::Home);
    }

    #[test]
    fn fragment_matching_is_exact() {
        assert_eq!(PageId::from_fragment("#/shop"), PageId::Shop);
        assert_eq!(PageId::from_fragment("shop"), PageId::Shop);
        assert_eq!(PageId::from_fragment("#/"), PageId::Home);
        assert_eq!(PageId::from_fragment("#shop"), PageId::Home);
        assert_eq!(PageId::from_fragment("#/Shop"), PageId::Home);
        assert_eq!(PageId::from_fragment("#/shop/"), PageId::Home);
    }

    #[test]
    fn identifiers_round_trip_through_serde() {
        let json = serde_json::to_string(&PageId::Submissions).unwrap();
        assert_eq!(json, "\"submissions\"");
        assert_eq!(
            serde_json::from_str::<PageId>(&json).unwrap(),
            PageId::Submissions
        );
    }

    #[tokio::test]
    async fn external_fragment_changes_are_observed() {
        let navigator = Navigator::new("#/home");
        let mut changes = navigator.subscribe();

        navigator.set_fragment("#/blog");
        assert_eq!(changes.next().await, Some(PageId::Blog));

        navigator.navigate(PageId::Bookings);
        assert_eq!(changes.next().await, Some(PageId::Bookings));

        drop(navigator);
        assert_eq!(changes.next().await, None);
    }
}
