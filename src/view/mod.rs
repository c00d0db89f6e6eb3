//! View abstraction driven by the console.
//!
//! The console never touches the terminal (or any other surface) directly.
//! It drives a [`View`] through a small set of capabilities addressed by
//! [`Element`] identifiers.

#[cfg(test)]
pub mod recording;
pub mod terminal;

use crate::report::Badge;
use anyhow::Result;
use std::fmt;

pub use terminal::{TerminalOptions, TerminalView};

/// Elements of the console surface.
///
/// The ids match the page markup the service ships with, so an HTML front end
/// can bind them one to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    MarketStatus,
    WinningDnaResult,
    DnaMotivation,
    DnaPacing,
    DnaMechanic,
    CreativePanel,
    CreativeStatus,
    ReportPanel,
    ReportContent,
    SuccessProbability,
    FileTabButton,
    UrlTabButton,
    FileTabContent,
    UrlTabContent,
}

impl Element {
    pub fn id(&self) -> &'static str {
        match self {
            Element::MarketStatus => "market-status",
            Element::WinningDnaResult => "winning-dna-result",
            Element::DnaMotivation => "dna-motivation",
            Element::DnaPacing => "dna-pacing",
            Element::DnaMechanic => "dna-mechanic",
            Element::CreativePanel => "creative-panel",
            Element::CreativeStatus => "creative-status",
            Element::ReportPanel => "report-panel",
            Element::ReportContent => "report-content",
            Element::SuccessProbability => "success-probability",
            Element::FileTabButton => "tab-button-file",
            Element::UrlTabButton => "tab-button-url",
            Element::FileTabContent => "tab-file",
            Element::UrlTabContent => "tab-url",
        }
    }

    /// Human-readable label used by text front ends.
    pub fn label(&self) -> &'static str {
        match self {
            Element::MarketStatus => "Market analysis",
            Element::WinningDnaResult => "Winning DNA",
            Element::DnaMotivation => "Dominant motivation",
            Element::DnaPacing => "Average pacing",
            Element::DnaMechanic => "Key mechanic",
            Element::CreativePanel => "Creative analysis",
            Element::CreativeStatus => "Creative analysis",
            Element::ReportPanel => "Report",
            Element::ReportContent => "Report content",
            Element::SuccessProbability => "Success probability",
            Element::FileTabButton | Element::FileTabContent => "file",
            Element::UrlTabButton | Element::UrlTabContent => "url",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id())
    }
}

/// Input tabs of the creative panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    File,
    Url,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::File, Tab::Url];

    pub fn button(&self) -> Element {
        match self {
            Tab::File => Element::FileTabButton,
            Tab::Url => Element::UrlTabButton,
        }
    }

    pub fn content(&self) -> Element {
        match self {
            Tab::File => Element::FileTabContent,
            Tab::Url => Element::UrlTabContent,
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Tab::File),
            "url" => Ok(Tab::Url),
            other => Err(format!("Unknown tab '{}': expected 'file' or 'url'", other)),
        }
    }
}

/// Capabilities the console needs from its surface.
pub trait View {
    /// Show or hide an element.
    fn set_hidden(&mut self, element: Element, hidden: bool);

    /// Enable or disable an element.
    fn set_disabled(&mut self, element: Element, disabled: bool);

    /// Add or remove the active marker on an element.
    fn set_active(&mut self, element: Element, active: bool);

    /// Replace the text of an element.
    fn set_text(&mut self, element: Element, text: &str);

    /// Fill the report content with a rendered report.
    fn set_report(&mut self, markdown: &str, html: &str);

    /// Update the success badge.
    fn set_badge(&mut self, badge: &Badge);

    fn scroll_into_view(&mut self, element: Element);

    /// Blocking, user-visible failure message.
    fn alert(&mut self, message: &str);

    /// Informational message that needs no acknowledgement.
    fn notify(&mut self, message: &str);

    /// Hand `contents` to the user as a file called `file_name`.
    fn download(&mut self, file_name: &str, contents: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids_are_unique() {
        let all = [
            Element::MarketStatus,
            Element::WinningDnaResult,
            Element::DnaMotivation,
            Element::DnaPacing,
            Element::DnaMechanic,
            Element::CreativePanel,
            Element::CreativeStatus,
            Element::ReportPanel,
            Element::ReportContent,
            Element::SuccessProbability,
            Element::FileTabButton,
            Element::UrlTabButton,
            Element::FileTabContent,
            Element::UrlTabContent,
        ];
        let ids: std::collections::HashSet<_> = all.iter().map(|e| e.id()).collect();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("file".parse::<Tab>(), Ok(Tab::File));
        assert_eq!("URL".parse::<Tab>(), Ok(Tab::Url));
        assert!("video".parse::<Tab>().is_err());
    }

    #[test]
    fn test_tab_elements() {
        assert_eq!(Tab::File.content().id(), "tab-file");
        assert_eq!(Tab::Url.content().id(), "tab-url");
        assert_eq!(Tab::Url.button(), Element::UrlTabButton);
    }
}
