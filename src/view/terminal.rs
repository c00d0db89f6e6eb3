//! Terminal front end.
//!
//! Busy indicators become spinners, text updates and reports are printed to
//! stdout, alerts go to stderr, and downloads are written to disk.

use crate::report::{generate_report_page, Badge};
use crate::view::{Element, View};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Options for the terminal view.
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    /// Whether to draw spinners while a request is in flight.
    pub show_progress: bool,
    /// Directory exported files are written to.
    pub export_dir: PathBuf,
    /// Where to write the rendered report page, if anywhere.
    pub html_output: Option<PathBuf>,
}

/// View that renders the console in a terminal.
pub struct TerminalView {
    options: TerminalOptions,
    spinners: HashMap<Element, ProgressBar>,
    report_html: Option<String>,
    badge: Option<Badge>,
}

impl TerminalView {
    pub fn new(options: TerminalOptions) -> Self {
        Self {
            options,
            spinners: HashMap::new(),
            report_html: None,
            badge: None,
        }
    }

    fn start_spinner(&mut self, element: Element) {
        if !self.options.show_progress || self.spinners.contains_key(&element) {
            return;
        }

        let message = match element {
            Element::MarketStatus => "Analyzing market data...",
            _ => "Analyzing creative...",
        };

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        self.spinners.insert(element, pb);
    }

    fn stop_spinner(&mut self, element: Element) {
        if let Some(pb) = self.spinners.remove(&element) {
            pb.finish_and_clear();
        }
    }

    /// Rewrite the standalone report page with the latest report and badge.
    fn write_page(&self) {
        let (Some(path), Some(html)) = (&self.options.html_output, &self.report_html) else {
            return;
        };

        let page = generate_report_page(html, self.badge.as_ref());
        match std::fs::write(path, page) {
            Ok(()) => debug!("Report page written to {}", path.display()),
            Err(e) => warn!("Failed to write report page {}: {}", path.display(), e),
        }
    }
}

impl View for TerminalView {
    fn set_hidden(&mut self, element: Element, hidden: bool) {
        match element {
            Element::MarketStatus | Element::CreativeStatus => {
                if hidden {
                    self.stop_spinner(element);
                } else {
                    self.start_spinner(element);
                }
            }
            Element::WinningDnaResult if !hidden => println!("\n🧬 Winning DNA:"),
            Element::ReportPanel if hidden => {
                self.report_html = None;
                self.badge = None;
            }
            Element::SuccessProbability if hidden => self.badge = None,
            _ => debug!("{} hidden={}", element, hidden),
        }
    }

    fn set_disabled(&mut self, element: Element, disabled: bool) {
        if element == Element::CreativePanel && !disabled {
            println!("\n🔓 {} unlocked.", element.label());
        } else {
            debug!("{} disabled={}", element, disabled);
        }
    }

    fn set_active(&mut self, element: Element, active: bool) {
        if active && matches!(element, Element::FileTabContent | Element::UrlTabContent) {
            println!("📑 Input mode: {}", element.label());
        }
    }

    fn set_text(&mut self, element: Element, text: &str) {
        println!("   {}: {}", element.label(), text);
    }

    fn set_report(&mut self, markdown: &str, html: &str) {
        println!("\n📝 Analysis report\n");
        println!("{}", markdown.trim());
        println!();

        self.report_html = Some(html.to_string());
        self.write_page();
    }

    fn set_badge(&mut self, badge: &Badge) {
        println!("{} {}", badge.tier.emoji(), badge.text());

        self.badge = Some(*badge);
        self.write_page();
    }

    fn scroll_into_view(&mut self, element: Element) {
        if element == Element::ReportPanel {
            if let Some(ref path) = self.options.html_output {
                println!("🌐 Report page: {}", path.display());
            }
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("\n❌ {}", message);
    }

    fn notify(&mut self, message: &str) {
        println!("ℹ️  {}", message);
    }

    fn download(&mut self, file_name: &str, contents: &str) -> Result<()> {
        let dir = &self.options.export_dir;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

        let path = dir.join(file_name);
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;

        println!("💾 Exported analysis to: {}", path.display());
        Ok(())
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        for (_, pb) in self.spinners.drain() {
            pb.finish_and_clear();
        }
    }
}
