use plotters::prelude::*;
use std::path::{Path, PathBuf};

use super::summary::FrequencyEntry;
use crate::error::{EtlError, Result};

/// A ranked horizontal bar chart; `bars[0]` is drawn at the top
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<FrequencyEntry>,
}

impl BarChart {
    pub fn nationality_distribution(top_n: usize, bars: Vec<FrequencyEntry>) -> Self {
        Self {
            title: format!("Top {} Nationalities by Player Count", top_n),
            x_label: "Number of Players".to_string(),
            y_label: "Nationality".to_string(),
            bars,
        }
    }
}

/// Somewhere a chart can be rendered to
pub trait ChartSink {
    fn render(&mut self, chart: &BarChart) -> Result<()>;
}

/// Renders charts as SVG files
pub struct SvgChart {
    path: PathBuf,
    size: (u32, u32),
}

impl SvgChart {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: (1400, 800),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartSink for SvgChart {
    fn render(&mut self, chart: &BarChart) -> Result<()> {
        draw_bars(&self.path, self.size, chart).map_err(|e| EtlError::Chart {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

fn draw_bars(path: &Path, size: (u32, u32), chart: &BarChart) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let rows = chart.bars.len() as u32;
    let max_count = chart.bars.iter().map(|b| b.count).max().unwrap_or(0) as u32;

    // Segment 0 is the bottom of the y axis, so labels run in reverse rank
    let labels: Vec<&str> = chart.bars.iter().rev().map(|b| b.label.as_str()).collect();

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(180)
        .build_cartesian_2d(0u32..max_count + 1, (0u32..rows.max(1)).into_segmented())?;

    ctx.configure_mesh()
        .disable_y_mesh()
        .y_labels(labels.len().max(1))
        .y_label_formatter(&|y: &SegmentValue<u32>| match y {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).map(|s| s.to_string()).unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()?;

    let style = RGBColor(64, 96, 160).filled();
    ctx.draw_series(chart.bars.iter().enumerate().map(|(rank, bar)| {
        let y = rows - 1 - rank as u32;
        Rectangle::new(
            [(0, SegmentValue::Exact(y)), (bar.count as u32, SegmentValue::Exact(y + 1))],
            style,
        )
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_names_requested_count() {
        let chart = BarChart::nationality_distribution(
            20,
            vec![FrequencyEntry {
                label: "England".into(),
                count: 3,
            }],
        );
        assert_eq!(chart.title, "Top 20 Nationalities by Player Count");
        assert_eq!(chart.x_label, "Number of Players");
    }

    #[test]
    fn test_svg_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = SvgChart::new(dir.path().join("chart.svg"));
        let chart = BarChart::nationality_distribution(
            2,
            vec![
                FrequencyEntry { label: "Spain".into(), count: 4 },
                FrequencyEntry { label: "Brazil".into(), count: 2 },
            ],
        );

        sink.render(&chart).unwrap();
        let svg = std::fs::read_to_string(sink.path()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Spain"));
    }
}
