//! Progress reporting for the import pipeline
//!
//! The pipeline only talks to the `Ui` trait. Three implementations:
//! - `UiApp`: full-screen ratatui view (stage checklist, row gauge, activity log)
//! - `LogUi`: forwards everything to `tracing`
//! - `SilentUi`: discards everything, for tests

mod components;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

use components::{ActivityPanel, LoadGauge, StagePanel};

/// Import stages, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Connecting,
    CreatingSchema,
    Reading,
    Normalizing,
    Extracting,
    Resolving,
    Loading,
    Complete,
}

impl Phase {
    pub const ALL: [Phase; 8] = [
        Phase::Connecting,
        Phase::CreatingSchema,
        Phase::Reading,
        Phase::Normalizing,
        Phase::Extracting,
        Phase::Resolving,
        Phase::Loading,
        Phase::Complete,
    ];
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Connecting => "Connecting to store",
            Phase::CreatingSchema => "Creating schema",
            Phase::Reading => "Reading source files",
            Phase::Normalizing => "Normalizing",
            Phase::Extracting => "Extracting dimensions",
            Phase::Resolving => "Resolving foreign keys",
            Phase::Loading => "Loading tables",
            Phase::Complete => "Complete",
        };
        f.write_str(label)
    }
}

/// Rows written so far for the table being loaded
#[derive(Debug, Clone, Default)]
pub struct Progress {
    pub current: u64,
    pub total: u64,
    pub label: String,
}

impl Progress {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64).min(1.0)
        }
    }
}

/// Trait for UI implementations - allows the terminal view, log output and silent/test modes
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn clear_progress(&mut self);
    fn log(&mut self, message: impl Into<String>);
}

/// Full-screen terminal view
pub struct UiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    stages: StagePanel,
    gauge: LoadGauge,
    activity: ActivityPanel,
}

impl UiApp {
    /// Enter the alternate screen and draw the initial view
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let mut app = Self {
            terminal,
            stages: StagePanel::new(),
            gauge: LoadGauge::default(),
            activity: ActivityPanel::new(200),
        };
        app.draw()?;
        Ok(app)
    }

    fn draw(&mut self) -> Result<()> {
        let stages = &self.stages;
        let gauge = &self.gauge;
        let activity = &self.activity;

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(Phase::ALL.len() as u16 + 2),
                    Constraint::Length(3),
                    Constraint::Min(4),
                ])
                .split(frame.area());

            stages.render(frame, chunks[0]);
            gauge.render(frame, chunks[1]);
            activity.render(frame, chunks[2]);
        })?;

        Ok(())
    }

    /// Show the summary, wait for a key, then restore the terminal
    pub fn finish(mut self, summary: &str) -> Result<()> {
        self.set_phase(Phase::Complete);
        self.clear_progress();
        self.log(summary);
        self.log("Press any key to exit...");

        loop {
            if event::poll(Duration::from_millis(100))? {
                if let CrosstermEvent::Key(_) = event::read()? {
                    break;
                }
            }
        }

        Ok(())
    }
}

impl Ui for UiApp {
    fn set_phase(&mut self, phase: Phase) {
        self.stages.set_phase(phase);
        self.draw().ok();
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        self.gauge.set(Progress {
            current,
            total,
            label: label.into(),
        });
        self.draw().ok();
    }

    fn clear_progress(&mut self) {
        self.gauge.clear();
        self.draw().ok();
    }

    fn log(&mut self, message: impl Into<String>) {
        self.activity.push(message);
        self.draw().ok();
    }
}

impl Drop for UiApp {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
        self.terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .ok();
        self.terminal.show_cursor().ok();
    }
}

/// Writes stage changes and messages as `tracing` records
#[derive(Default)]
pub struct LogUi;

impl LogUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for LogUi {
    fn set_phase(&mut self, phase: Phase) {
        tracing::info!("{}", phase);
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        tracing::debug!("{}: {}/{}", label.into(), current, total);
    }

    fn clear_progress(&mut self) {}

    fn log(&mut self, message: impl Into<String>) {
        tracing::info!("{}", message.into());
    }
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn clear_progress(&mut self) {}
    fn log(&mut self, _message: impl Into<String>) {}
}
