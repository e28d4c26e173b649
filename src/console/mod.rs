//! Scripted command console
//!
//! A scrollback log plus a dispatcher that resolves typed input against
//! the closed command table and appends canned output after a simulated
//! processing delay. Only one dispatch is ever in flight; submissions
//! arriving while busy are queued and drained in order, so output
//! blocks never interleave.
//!
//! Time is injected through `submit`/`tick` rather than read inside the
//! state machine. Pending dispatches are owned by the `Console` value,
//! so dropping the console drops them with it.

pub mod commands;

pub use commands::{Command, Resolved};

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Constant working-path label shown in the prompt
pub const PROMPT_PATH: &str = "~/research-intel";

/// Simulated processing delay for dispatched commands
pub const DISPATCH_DELAY: Duration = Duration::from_millis(300);

/// An output block waiting on its simulated processing delay
#[derive(Debug)]
struct PendingDispatch {
    ready_at: Instant,
    lines: Vec<String>,
}

/// A block queued behind the in-flight dispatch
#[derive(Debug)]
struct QueuedDispatch {
    delay: Duration,
    lines: Vec<String>,
}

/// Console session state: scrollback, input buffer, dispatch queue,
/// and the fullscreen flag. All transient; dies with the value.
#[derive(Debug)]
pub struct Console {
    log: Vec<String>,
    input: String,
    pending: Option<PendingDispatch>,
    queue: VecDeque<QueuedDispatch>,
    fullscreen: bool,
}

impl Console {
    pub fn new() -> Self {
        Self {
            log: vec![
                "RESEARCH ANALYSIS TERMINAL v2.1.0".to_string(),
                "Authorized access granted. Type \"help\" for available commands.".to_string(),
                "Press SPACE to focus terminal input".to_string(),
                "Press F to toggle fullscreen".to_string(),
                String::new(),
            ],
            input: String::new(),
            pending: None,
            queue: VecDeque::new(),
            fullscreen: false,
        }
    }

    /// Scrollback lines, oldest first
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Current unsubmitted input text
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// True while a dispatch is awaiting its deadline
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// The echo line of the in-flight dispatch, for the blinking
    /// "processing" affordance
    pub fn in_flight(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .and_then(|p| p.lines.first())
            .map(String::as_str)
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Flip the fullscreen flag. Pure UI state; the app derives its
    /// active screen from it.
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Submit the current input buffer and reset it.
    pub fn submit_input(&mut self, now: Instant) {
        let line = std::mem::take(&mut self.input);
        self.submit(&line, now);
    }

    /// Submit one line of input.
    ///
    /// `clear` resets the log synchronously to a single empty line.
    /// Everything else becomes a dispatch: known commands and unknown
    /// tokens after [`DISPATCH_DELAY`], a blank line immediately. No
    /// submission is dropped and no error is ever raised; unknown
    /// commands are rendered as log content.
    pub fn submit(&mut self, line: &str, now: Instant) {
        match Command::resolve(line) {
            Resolved::Known(Command::Clear) => {
                self.log = vec![String::new()];
            }
            Resolved::Known(cmd) => {
                let mut lines = vec![format!("{PROMPT_PATH}$ {line}")];
                lines.extend(cmd.output());
                self.enqueue(lines, DISPATCH_DELAY, now);
            }
            Resolved::Empty => {
                self.enqueue(vec![format!("{PROMPT_PATH}$ ")], Duration::ZERO, now);
            }
            Resolved::Unknown(token) => {
                let lines = vec![
                    format!("{PROMPT_PATH}$ {line}"),
                    format!("Command not found: {token}"),
                    "Type \"help\" for available commands.".to_string(),
                    String::new(),
                ];
                self.enqueue(lines, DISPATCH_DELAY, now);
            }
        }
    }

    fn enqueue(&mut self, lines: Vec<String>, delay: Duration, now: Instant) {
        if self.pending.is_some() {
            self.queue.push_back(QueuedDispatch { delay, lines });
        } else {
            self.pending = Some(PendingDispatch {
                ready_at: now + delay,
                lines,
            });
        }
    }

    /// Advance the dispatch machinery. Appends every block whose
    /// deadline has passed, then starts the next queued block.
    pub fn tick(&mut self, now: Instant) {
        loop {
            match self.pending.take() {
                Some(p) if now >= p.ready_at => {
                    self.log.extend(p.lines);
                    if let Some(next) = self.queue.pop_front() {
                        self.pending = Some(PendingDispatch {
                            ready_at: now + next.delay,
                            lines: next.lines,
                        });
                    }
                }
                still_waiting => {
                    self.pending = still_waiting;
                    break;
                }
            }
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(console: &mut Console, start: Instant) {
        // Generous horizon: every queued dispatch fires well within it.
        let mut t = start;
        for _ in 0..16 {
            t += DISPATCH_DELAY;
            console.tick(t);
        }
    }

    #[test]
    fn known_command_echoes_then_appends_block() {
        let t0 = Instant::now();
        let mut console = Console::new();
        let base = console.log().len();

        console.submit("help", t0);
        assert!(console.is_busy());
        assert_eq!(console.log().len(), base, "no output before the delay");

        console.tick(t0 + DISPATCH_DELAY);
        assert!(!console.is_busy());
        assert_eq!(console.log()[base], format!("{PROMPT_PATH}$ help"));
        assert_eq!(console.log()[base + 1], "Available commands:");
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let t0 = Instant::now();
        let variants = ["help", "HELP", "  help  "];
        let mut blocks: Vec<Vec<String>> = Vec::new();

        for variant in variants {
            let mut console = Console::new();
            let base = console.log().len();
            console.submit(variant, t0);
            console.tick(t0 + DISPATCH_DELAY);
            // Skip the echo line; it preserves the raw input.
            blocks.push(console.log()[base + 1..].to_vec());
        }

        assert_eq!(blocks[0], blocks[1]);
        assert_eq!(blocks[0], blocks[2]);
    }

    #[test]
    fn clear_resets_synchronously_to_one_empty_line() {
        let t0 = Instant::now();
        let mut console = Console::new();
        console.submit("help", t0);
        console.tick(t0 + DISPATCH_DELAY);
        assert!(console.log().len() > 1);

        console.submit("clear", t0 + DISPATCH_DELAY);
        assert_eq!(console.log(), &[String::new()]);
        assert!(!console.is_busy(), "clear takes no dispatch slot");
    }

    #[test]
    fn clear_is_case_insensitive_too() {
        let t0 = Instant::now();
        let mut console = Console::new();
        console.submit("  CLEAR ", t0);
        assert_eq!(console.log(), &[String::new()]);
    }

    #[test]
    fn empty_submission_appends_one_bare_prompt_line() {
        let t0 = Instant::now();
        let mut console = Console::new();
        let base = console.log().len();

        console.submit("", t0);
        console.tick(t0);
        assert_eq!(console.log().len(), base + 1);
        assert_eq!(console.log()[base], format!("{PROMPT_PATH}$ "));
    }

    #[test]
    fn unknown_token_renders_echo_error_and_hint() {
        let t0 = Instant::now();
        let mut console = Console::new();
        let base = console.log().len();

        console.submit("frobnicate", t0);
        console.tick(t0 + DISPATCH_DELAY);

        assert_eq!(console.log()[base], format!("{PROMPT_PATH}$ frobnicate"));
        assert_eq!(console.log()[base + 1], "Command not found: frobnicate");
        assert_eq!(
            console.log()[base + 2],
            "Type \"help\" for available commands."
        );
    }

    #[test]
    fn concurrent_submissions_never_interleave() {
        let t0 = Instant::now();
        let mut console = Console::new();
        let base = console.log().len();

        console.submit("analyze", t0);
        console.submit("gap", t0 + Duration::from_millis(10));
        console.submit("cite", t0 + Duration::from_millis(20));
        settle(&mut console, t0);

        let log = &console.log()[base..];
        let analyze_echo = log
            .iter()
            .position(|l| l == &format!("{PROMPT_PATH}$ analyze"))
            .unwrap();
        let gap_echo = log
            .iter()
            .position(|l| l == &format!("{PROMPT_PATH}$ gap"))
            .unwrap();
        let cite_echo = log
            .iter()
            .position(|l| l == &format!("{PROMPT_PATH}$ cite"))
            .unwrap();

        assert!(analyze_echo < gap_echo && gap_echo < cite_echo);

        // Each block is contiguous: the next echo appears exactly one
        // block-length after the previous one.
        let analyze_len = 1 + Command::Analyze.output().len();
        assert_eq!(gap_echo, analyze_echo + analyze_len);
        let gap_len = 1 + Command::Gap.output().len();
        assert_eq!(cite_echo, gap_echo + gap_len);
    }

    #[test]
    fn queued_dispatch_waits_its_own_delay() {
        let t0 = Instant::now();
        let mut console = Console::new();
        let base = console.log().len();

        console.submit("help", t0);
        console.submit("status", t0);

        // First deadline passes: help lands, status is now in flight.
        console.tick(t0 + DISPATCH_DELAY);
        assert!(console.is_busy());
        let after_help = base + 1 + Command::Help.output().len();
        assert_eq!(console.log().len(), after_help);

        // Second deadline passes relative to when status started.
        console.tick(t0 + DISPATCH_DELAY + DISPATCH_DELAY);
        assert!(!console.is_busy());
        assert_eq!(console.log()[after_help], format!("{PROMPT_PATH}$ status"));
    }

    #[test]
    fn in_flight_exposes_echo_line_while_busy() {
        let t0 = Instant::now();
        let mut console = Console::new();
        console.submit("status", t0);
        assert_eq!(console.in_flight(), Some("~/research-intel$ status"));

        console.tick(t0 + DISPATCH_DELAY);
        assert_eq!(console.in_flight(), None);
    }

    #[test]
    fn input_buffer_editing_and_submit() {
        let t0 = Instant::now();
        let mut console = Console::new();
        let base = console.log().len();

        for c in "helpp".chars() {
            console.input_push(c);
        }
        console.input_backspace();
        assert_eq!(console.input(), "help");

        console.submit_input(t0);
        assert_eq!(console.input(), "");
        console.tick(t0 + DISPATCH_DELAY);
        assert_eq!(console.log()[base], format!("{PROMPT_PATH}$ help"));
    }

    #[test]
    fn log_is_append_only_between_clears() {
        let t0 = Instant::now();
        let mut console = Console::new();
        let mut prev_len = console.log().len();

        for (i, line) in ["help", "", "bogus", "status"].iter().enumerate() {
            console.submit(line, t0 + Duration::from_millis(i as u64));
            settle(&mut console, t0);
            assert!(console.log().len() > prev_len);
            prev_len = console.log().len();
        }
    }
}
