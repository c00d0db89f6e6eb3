//! Interactive command session.
//!
//! Each input line is one user event. The session parses it, dispatches it
//! to the [`Console`], and waits for the cycle to finish before reading the
//! next line.

use crate::api::AnalysisApi;
use crate::console::{Console, Outcome};
use crate::view::{Tab, View};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub const HELP: &str = "\
Commands:
  market <csv-path>   upload market data and synthesise the winning DNA
  file <video-path>   analyse a creative file
  url <video-url>     analyse a creative hosted at a URL
  tab file|url        switch the creative input tab
  demo                load the demo analysis
  export              export the last analysis as JSON
  dna                 look up an existing winning DNA
  help                show this help
  quit                leave the console";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Market(PathBuf),
    File(PathBuf),
    Url(String),
    Tab(Tab),
    Demo,
    Export,
    Dna,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "market" => Command::Market(PathBuf::from(argument(word, rest, "a CSV path")?)),
            "file" => Command::File(PathBuf::from(argument(word, rest, "a video path")?)),
            "url" => Command::Url(argument(word, rest, "a video URL")?.to_string()),
            "tab" => Command::Tab(argument(word, rest, "'file' or 'url'")?.parse()?),
            "demo" => Command::Demo,
            "export" => Command::Export,
            "dna" => Command::Dna,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
        };

        Ok(Some(command))
    }
}

fn argument<'a>(word: &str, rest: &'a str, what: &str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("'{}' needs {}", word, what))
    } else {
        Ok(rest)
    }
}

/// Dispatch one command. Returns `None` for commands that run no cycle.
pub async fn dispatch<A: AnalysisApi, V: View>(
    console: &Console<A, V>,
    command: &Command,
) -> Option<Outcome> {
    match command {
        Command::Market(path) => Some(console.submit_market_file(path).await),
        Command::File(path) => Some(console.analyze_creative_path(path).await),
        Command::Url(url) => Some(console.analyze_creative_url(url).await),
        Command::Tab(tab) => {
            console.switch_tab(*tab);
            None
        }
        Command::Demo => Some(console.load_demo()),
        Command::Export => Some(console.export()),
        Command::Dna => Some(console.check_existing_benchmark().await),
        Command::Help => {
            println!("{}", HELP);
            None
        }
        Command::Quit => None,
    }
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub commands: usize,
    pub failures: usize,
}

/// Run commands from `input` until `quit` or end of input.
pub async fn run<A, V, R>(console: &Console<A, V>, input: R, prompt: bool) -> Result<SessionSummary>
where
    A: AnalysisApi,
    V: View,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut summary = SessionSummary::default();

    loop {
        if prompt {
            print!("creative> ");
            std::io::stdout().flush().context("Failed to flush stdout")?;
        }

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            debug!("End of input");
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(hint) => {
                eprintln!("⚠️  {}", hint);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        summary.commands += 1;
        if let Some(outcome) = dispatch(console, &command).await {
            debug!("{:?} -> {:?}", command, outcome);
            if !outcome.is_success() {
                summary.failures += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Endpoint;
    use crate::console::tests::FakeApi;
    use crate::view::recording::RecordingView;
    use crate::view::Element;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("market data/real-data.csv"),
            Ok(Some(Command::Market(PathBuf::from("data/real-data.csv"))))
        );
        assert_eq!(
            Command::parse("  URL https://cdn.example.com/ad.mp4 "),
            Ok(Some(Command::Url("https://cdn.example.com/ad.mp4".to_string())))
        );
        assert_eq!(Command::parse("tab url"), Ok(Some(Command::Tab(Tab::Url))));
        assert_eq!(Command::parse("demo"), Ok(Some(Command::Demo)));
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("market").is_err());
        assert!(Command::parse("tab video").is_err());
        assert!(Command::parse("launch").unwrap_err().contains("Unknown command"));
    }

    #[test]
    fn test_path_with_spaces() {
        assert_eq!(
            Command::parse("file My Ads/v1 final.mp4"),
            Ok(Some(Command::File(PathBuf::from("My Ads/v1 final.mp4"))))
        );
    }

    #[tokio::test]
    async fn test_session_runs_until_quit() {
        let console = Console::new(FakeApi::new(), RecordingView::new());
        let input: &[u8] = b"tab url\nurl https://x/ad.mp4\nbogus\n\nexport\nquit\ndemo\n";

        let summary = run(&console, input, false).await.unwrap();

        assert_eq!(summary, SessionSummary { commands: 3, failures: 0 });
        assert_eq!(console.api.calls(), vec![Endpoint::AnalyzeCreativeUrl]);
        let view = console.view();
        assert!(view.active.contains(&Element::UrlTabContent));
        assert_eq!(view.downloads.len(), 1);
        // `demo` came after `quit` and never ran.
        assert!(console.last_result().unwrap().extra.get("demo_mode").is_none());
    }

    #[tokio::test]
    async fn test_session_counts_failures() {
        let console = Console::new(FakeApi::new(), RecordingView::new());
        let input: &[u8] = b"export\ndemo\nexport\n";

        let summary = run(&console, input, false).await.unwrap();

        assert_eq!(summary, SessionSummary { commands: 3, failures: 1 });
        assert_eq!(console.view().downloads.len(), 1);
    }
}
