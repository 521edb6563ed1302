//! Widgets for the import view

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};
use ratatui::Frame;
use std::collections::VecDeque;

use super::{Phase, Progress};

/// Checklist of import stages: done, running, pending
pub struct StagePanel {
    current: Phase,
}

impl StagePanel {
    pub fn new() -> Self {
        Self {
            current: Phase::Connecting,
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.current = phase;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = Phase::ALL
            .iter()
            .map(|&phase| {
                let (marker, style) = if phase < self.current || self.current == Phase::Complete {
                    ("✓", Style::default().fg(Color::Green))
                } else if phase == self.current {
                    (
                        "▶",
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("·", Style::default().fg(Color::DarkGray))
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", marker), style),
                    Span::styled(phase.to_string(), style),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" FIFA import ")
            .border_style(Style::default().fg(Color::Green));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Rows inserted into the current table
#[derive(Default)]
pub struct LoadGauge {
    progress: Option<Progress>,
}

impl LoadGauge {
    pub fn set(&mut self, progress: Progress) {
        self.progress = Some(progress);
    }

    pub fn clear(&mut self) {
        self.progress = None;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Rows ");

        let Some(progress) = &self.progress else {
            frame.render_widget(block, area);
            return;
        };

        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .ratio(progress.ratio())
            .label(format!(
                "{} {}/{}",
                progress.label, progress.current, progress.total
            ));
        frame.render_widget(gauge, area);
    }
}

/// Most recent messages, oldest dropped first
pub struct ActivityPanel {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ActivityPanel {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message.into());
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let skip = self.entries.len().saturating_sub(visible);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .skip(skip)
            .map(|entry| ListItem::new(format!(" {}", entry)))
            .collect();

        let block = Block::default().borders(Borders::ALL).title(" Activity ");
        frame.render_widget(List::new(items).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_panel_drops_oldest() {
        let mut panel = ActivityPanel::new(2);
        panel.push("a");
        panel.push("b");
        panel.push("c");
        assert_eq!(panel.entries, ["b", "c"]);
    }
}
