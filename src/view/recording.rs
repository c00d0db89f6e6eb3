//! In-memory view that records every call, for tests.

use crate::report::Badge;
use crate::view::{Element, View};
use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};

/// Records view state the way a page would hold it.
#[derive(Debug, Clone)]
pub struct RecordingView {
    pub hidden: BTreeSet<Element>,
    pub disabled: BTreeSet<Element>,
    pub active: BTreeSet<Element>,
    pub text: BTreeMap<Element, String>,
    pub report_markdown: Option<String>,
    pub report_html: Option<String>,
    pub badge: Option<Badge>,
    pub scrolled: Vec<Element>,
    pub alerts: Vec<String>,
    pub notices: Vec<String>,
    pub downloads: Vec<(String, String)>,
    /// When set, `download` fails with this message.
    pub download_error: Option<String>,
}

impl RecordingView {
    /// Starts in the page's initial state: status indicators, DNA, report and
    /// badge hidden, creative panel disabled, file tab active.
    pub fn new() -> Self {
        Self {
            hidden: [
                Element::MarketStatus,
                Element::WinningDnaResult,
                Element::CreativeStatus,
                Element::ReportPanel,
                Element::SuccessProbability,
            ]
            .into_iter()
            .collect(),
            disabled: [Element::CreativePanel].into_iter().collect(),
            active: [Element::FileTabButton, Element::FileTabContent]
                .into_iter()
                .collect(),
            text: BTreeMap::new(),
            report_markdown: None,
            report_html: None,
            badge: None,
            scrolled: Vec::new(),
            alerts: Vec::new(),
            notices: Vec::new(),
            downloads: Vec::new(),
            download_error: None,
        }
    }

    pub fn is_hidden(&self, element: Element) -> bool {
        self.hidden.contains(&element)
    }

    pub fn text_of(&self, element: Element) -> Option<&str> {
        self.text.get(&element).map(String::as_str)
    }
}

impl View for RecordingView {
    fn set_hidden(&mut self, element: Element, hidden: bool) {
        if hidden {
            self.hidden.insert(element);
        } else {
            self.hidden.remove(&element);
        }
    }

    fn set_disabled(&mut self, element: Element, disabled: bool) {
        if disabled {
            self.disabled.insert(element);
        } else {
            self.disabled.remove(&element);
        }
    }

    fn set_active(&mut self, element: Element, active: bool) {
        if active {
            self.active.insert(element);
        } else {
            self.active.remove(&element);
        }
    }

    fn set_text(&mut self, element: Element, text: &str) {
        self.text.insert(element, text.to_string());
    }

    fn set_report(&mut self, markdown: &str, html: &str) {
        self.report_markdown = Some(markdown.to_string());
        self.report_html = Some(html.to_string());
    }

    fn set_badge(&mut self, badge: &Badge) {
        self.badge = Some(*badge);
        self.text.insert(Element::SuccessProbability, badge.text());
    }

    fn scroll_into_view(&mut self, element: Element) {
        self.scrolled.push(element);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn download(&mut self, file_name: &str, contents: &str) -> Result<()> {
        if let Some(ref message) = self.download_error {
            anyhow::bail!("{}", message);
        }
        self.downloads
            .push((file_name.to_string(), contents.to_string()));
        Ok(())
    }
}
