//! The analysis console controller.
//!
//! [`Console`] owns the workflow: it triggers service calls, drives the
//! [`View`], and keeps the last successful result for export. Each trigger
//! runs one cycle:
//!
//! ```text
//! Idle -> Busy(activity) -> { Rendered | Failed (alert shown) } -> Idle
//! ```
//!
//! All methods take `&self` so front ends can fire triggers from event
//! handlers on a single thread. A trigger that arrives while a cycle is in
//! flight is rejected instead of overlapping it.

pub mod session;

use crate::api::{AnalysisApi, ApiError, Upload};
use crate::demo::demo_result;
use crate::models::{AnalysisResult, Status, WinningDna};
use crate::report::{badge_for_report, markdown_to_html};
use crate::view::{Element, Tab, View};
use chrono::Utc;
use serde::Serialize;
use std::cell::{Cell, Ref, RefCell};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// File name of the exported analysis.
pub const EXPORT_FILE_NAME: &str = "Creative_Strategy_Analysis.json";

const MARKET_ERROR_ALERT: &str = "An error occurred.";
const CREATIVE_ERROR_ALERT: &str = "Analysis error";
const NO_EXPORT_DATA_ALERT: &str =
    "No analysis data to export. Run an analysis or Load Demo first.";
const BUSY_ALERT: &str = "Another analysis is already running.";

/// What a cycle is busy with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    MarketAnalysis,
    CreativeAnalysis,
    BenchmarkLookup,
    Demo,
}

/// Console state between and during cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Busy(Activity),
}

/// How a trigger ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The step finished and its result is on the view.
    Completed,
    /// The step failed and the user was told.
    Failed,
    /// Nothing to do (empty input, no benchmark yet).
    Skipped,
    /// Another cycle was in flight.
    Rejected,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Completed | Outcome::Skipped)
    }
}

/// Marks the console busy for as long as it lives.
///
/// Dropping the guard (including when a cycle's future is dropped) returns
/// the console to idle.
struct CycleGuard<'a> {
    state: &'a Cell<CycleState>,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.state.set(CycleState::Idle);
    }
}

/// Controller tying the analysis service to a view.
pub struct Console<A, V> {
    api: A,
    view: RefCell<V>,
    state: Cell<CycleState>,
    last_result: RefCell<Option<AnalysisResult>>,
}

impl<A: AnalysisApi, V: View> Console<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view: RefCell::new(view),
            state: Cell::new(CycleState::Idle),
            last_result: RefCell::new(None),
        }
    }

    #[allow(dead_code)] // Inspection hook for embedders and tests
    pub fn state(&self) -> CycleState {
        self.state.get()
    }

    #[allow(dead_code)] // Inspection hook for embedders and tests
    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    /// The result the next export will write, if any.
    pub fn last_result(&self) -> Option<AnalysisResult> {
        self.last_result.borrow().clone()
    }

    /// Enter the busy state, or alert and return `None` if already busy.
    fn begin(&self, activity: Activity) -> Option<CycleGuard<'_>> {
        if let CycleState::Busy(current) = self.state.get() {
            warn!("Rejected {:?}: {:?} still in flight", activity, current);
            self.view.borrow_mut().alert(BUSY_ALERT);
            return None;
        }

        debug!("Cycle started: {:?}", activity);
        self.state.set(CycleState::Busy(activity));
        Some(CycleGuard { state: &self.state })
    }

    // --- Market data ---

    /// Read a CSV from disk and run the market workflow on it.
    pub async fn submit_market_file(&self, path: &Path) -> Outcome {
        match Upload::from_path(path).await {
            Ok(upload) => self.submit_market_data(&upload).await,
            Err(e) => self.fail_read(e),
        }
    }

    /// Upload market data, then trigger the winning-DNA synthesis.
    ///
    /// The trigger is only sent once the upload reports success.
    pub async fn submit_market_data(&self, upload: &Upload) -> Outcome {
        let Some(_guard) = self.begin(Activity::MarketAnalysis) else {
            return Outcome::Rejected;
        };

        info!("Uploading market data: {}", upload.file_name);
        self.view
            .borrow_mut()
            .set_hidden(Element::MarketStatus, false);

        let outcome = match self.run_market_chain(upload).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Market analysis failed: {}", e);
                self.view.borrow_mut().alert(MARKET_ERROR_ALERT);
                Outcome::Failed
            }
        };

        self.view
            .borrow_mut()
            .set_hidden(Element::MarketStatus, true);
        outcome
    }

    async fn run_market_chain(&self, upload: &Upload) -> Result<Outcome, ApiError> {
        let uploaded = self.api.upload_market_data(upload).await?;
        if !uploaded.status.is_success() {
            warn!("Market upload rejected: {}", uploaded.message_text());
            self.view
                .borrow_mut()
                .alert(&format!("Upload failed: {}", uploaded.message_text()));
            return Ok(Outcome::Failed);
        }

        debug!("Upload accepted, triggering market analysis");
        let analyzed = self.api.analyze_market().await?;
        if !analyzed.status.is_success() {
            warn!("Market analysis rejected: {}", analyzed.message_text());
            self.view
                .borrow_mut()
                .alert(&format!("Analysis failed: {}", analyzed.message_text()));
            return Ok(Outcome::Failed);
        }

        let Some(dna) = analyzed.winning_dna else {
            warn!("Market analysis succeeded without a winning DNA");
            self.view
                .borrow_mut()
                .alert("Analysis failed: response did not include the winning DNA");
            return Ok(Outcome::Failed);
        };

        info!("Winning DNA received");
        self.unlock_with(&dna);
        Ok(Outcome::Completed)
    }

    /// Ask the service for a benchmark left by an earlier session.
    ///
    /// A missing benchmark or an unreachable service is reported as a notice,
    /// never as an alert.
    pub async fn check_existing_benchmark(&self) -> Outcome {
        let Some(_guard) = self.begin(Activity::BenchmarkLookup) else {
            return Outcome::Rejected;
        };

        match self.api.winning_dna().await {
            Ok(resp) if resp.status.is_success() => match resp.winning_dna {
                Some(dna) => {
                    info!("Existing winning DNA found");
                    self.unlock_with(&dna);
                    Outcome::Completed
                }
                None => {
                    self.view
                        .borrow_mut()
                        .notify("No benchmark data found. Upload market data first.");
                    Outcome::Skipped
                }
            },
            Ok(resp) => {
                if resp.status != Status::NotFound {
                    warn!("Benchmark lookup returned {}", resp.status);
                }
                self.view.borrow_mut().notify(resp.message_text());
                Outcome::Skipped
            }
            Err(e) => {
                warn!("Benchmark lookup failed: {}", e);
                self.view
                    .borrow_mut()
                    .notify("Could not reach the analysis service.");
                Outcome::Failed
            }
        }
    }

    /// Show the DNA and enable the creative step.
    fn unlock_with(&self, dna: &WinningDna) {
        let mut view = self.view.borrow_mut();
        view.set_hidden(Element::WinningDnaResult, false);
        view.set_text(Element::DnaMotivation, &dna.dominant_motivation);
        view.set_text(Element::DnaPacing, &dna.avg_pacing);
        view.set_text(Element::DnaMechanic, &dna.key_mechanic);
        view.set_disabled(Element::CreativePanel, false);
    }

    // --- Creative analysis ---

    /// Read a creative from disk and analyse it.
    pub async fn analyze_creative_path(&self, path: &Path) -> Outcome {
        match Upload::from_path(path).await {
            Ok(upload) => self.analyze_creative_file(&upload).await,
            Err(e) => self.fail_read(e),
        }
    }

    pub async fn analyze_creative_file(&self, upload: &Upload) -> Outcome {
        let Some(_guard) = self.begin(Activity::CreativeAnalysis) else {
            return Outcome::Rejected;
        };

        info!("Analyzing creative file: {}", upload.file_name);
        self.start_creative_analysis();
        let response = self.api.analyze_creative_file(upload).await;
        self.finish_creative_analysis(response)
    }

    /// Analyse a hosted creative. Blank URLs are ignored.
    pub async fn analyze_creative_url(&self, video_url: &str) -> Outcome {
        let video_url = video_url.trim();
        if video_url.is_empty() {
            debug!("Ignoring empty creative URL");
            return Outcome::Skipped;
        }

        let Some(_guard) = self.begin(Activity::CreativeAnalysis) else {
            return Outcome::Rejected;
        };

        info!("Analyzing creative URL: {}", video_url);
        self.start_creative_analysis();
        let response = self.api.analyze_creative_url(video_url).await;
        self.finish_creative_analysis(response)
    }

    fn start_creative_analysis(&self) {
        let mut view = self.view.borrow_mut();
        view.set_hidden(Element::CreativeStatus, false);
        view.set_hidden(Element::ReportPanel, true);
    }

    fn finish_creative_analysis(&self, response: Result<AnalysisResult, ApiError>) -> Outcome {
        match response {
            Ok(result) => self.render_result(result),
            Err(e) => {
                error!("Creative analysis failed: {}", e);
                let mut view = self.view.borrow_mut();
                view.set_hidden(Element::CreativeStatus, true);
                view.alert(CREATIVE_ERROR_ALERT);
                Outcome::Failed
            }
        }
    }

    /// Render a result and, on success, keep it for export.
    ///
    /// Real and demo results both go through here.
    fn render_result(&self, result: AnalysisResult) -> Outcome {
        let mut view = self.view.borrow_mut();
        view.set_hidden(Element::CreativeStatus, true);

        if !result.status.is_success() {
            warn!("Creative analysis rejected: {}", result.message_text());
            view.alert(&format!("Analysis Failed: {}", result.message_text()));
            return Outcome::Failed;
        }

        let markdown = result.report_text();
        let html = markdown_to_html(markdown);
        view.set_hidden(Element::ReportPanel, false);
        view.set_report(markdown, &html);

        match badge_for_report(markdown) {
            Some(badge) => {
                info!("Success probability: {} ({})", badge.text(), badge.tier);
                view.set_badge(&badge);
                view.set_hidden(Element::SuccessProbability, false);
            }
            None => {
                debug!("Report carries no success probability; badge left unset");
                view.set_hidden(Element::SuccessProbability, true);
            }
        }

        view.scroll_into_view(Element::ReportPanel);
        drop(view);

        *self.last_result.borrow_mut() = Some(result);
        Outcome::Completed
    }

    fn fail_read(&self, err: ApiError) -> Outcome {
        error!("{}", err);
        self.view
            .borrow_mut()
            .alert(&format!("Could not read file: {}", err));
        Outcome::Failed
    }

    // --- Demo, tabs, export ---

    /// Render the canned demo result as if the service had returned it.
    pub fn load_demo(&self) -> Outcome {
        let Some(_guard) = self.begin(Activity::Demo) else {
            return Outcome::Rejected;
        };

        info!("Loading demo analysis");
        self.render_result(demo_result(Utc::now()))
    }

    /// Make `tab` and its content the only active pair.
    pub fn switch_tab(&self, tab: Tab) {
        let mut view = self.view.borrow_mut();
        for t in Tab::ALL {
            view.set_active(t.button(), false);
            view.set_active(t.content(), false);
        }
        view.set_active(tab.button(), true);
        view.set_active(tab.content(), true);
    }

    /// Offer the last result as `Creative_Strategy_Analysis.json`.
    pub fn export(&self) -> Outcome {
        let last = self.last_result.borrow();
        let Some(result) = last.as_ref() else {
            self.view.borrow_mut().alert(NO_EXPORT_DATA_ALERT);
            return Outcome::Failed;
        };

        let json = match to_indented_json(result) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize analysis: {}", e);
                self.view
                    .borrow_mut()
                    .alert(&format!("Export failed: {}", e));
                return Outcome::Failed;
            }
        };

        let written = self.view.borrow_mut().download(EXPORT_FILE_NAME, &json);
        match written {
            Ok(()) => {
                info!("Exported analysis ({} bytes)", json.len());
                Outcome::Completed
            }
            Err(e) => {
                error!("Export failed: {:#}", e);
                self.view
                    .borrow_mut()
                    .alert(&format!("Export failed: {}", e));
                Outcome::Failed
            }
        }
    }
}

/// Serialize with four-space indentation.
fn to_indented_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
