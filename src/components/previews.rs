//! Live preview widgets
//!
//! Each preview remembers when it was last mounted; animated previews derive
//! their frame from the time elapsed since then, so a remount restarts them.

use crate::component::Renderable;
use crate::model::catalog::Metric;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Sparkline, Table, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

/// Time for a gauge to fill to its target
const FILL_DURATION: Duration = Duration::from_millis(1200);

/// Interval between sparkline scroll steps
const SCROLL_STEP: Duration = Duration::from_millis(250);

/// Mount bookkeeping shared by all previews
#[derive(Debug, Clone, Copy, Default)]
struct Mount {
    at: Option<Instant>,
}

impl Mount {
    fn start(&mut self) {
        self.at = Some(Instant::now());
    }

    fn unmount(&mut self) {
        self.at = None;
    }

    fn elapsed(&self) -> Duration {
        self.at.map(|at| at.elapsed()).unwrap_or_default()
    }
}

/// Fraction of `target` reached after `elapsed`
fn fill_ratio(elapsed: Duration, target: u16) -> f64 {
    let progress = (elapsed.as_secs_f64() / FILL_DURATION.as_secs_f64()).min(1.0);
    progress * f64::from(target.min(100)) / 100.0
}

/// Rotate `data` left by `offset` positions
fn rotate(data: &[u64], offset: usize) -> Vec<u64> {
    if data.is_empty() {
        return Vec::new();
    }
    let offset = offset % data.len();
    data[offset..].iter().chain(&data[..offset]).copied().collect()
}

fn scroll_offset(elapsed: Duration) -> usize {
    (elapsed.as_millis() / SCROLL_STEP.as_millis()) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// Text
// ─────────────────────────────────────────────────────────────────────────────

/// Static text art
pub struct TextPreview {
    text: String,
    mount: Mount,
}

impl TextPreview {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mount: Mount::default(),
        }
    }
}

impl Renderable for TextPreview {
    fn mount(&mut self, _key: u64) {
        self.mount.start();
    }

    fn unmount(&mut self) {
        self.mount.unmount();
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let content = if self.text.trim().is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "Nothing to preview",
                Style::default().fg(Color::DarkGray),
            )))
            .alignment(Alignment::Center)
        } else {
            Paragraph::new(self.text.as_str()).wrap(Wrap { trim: false })
        };
        frame.render_widget(content, area);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gauge
// ─────────────────────────────────────────────────────────────────────────────

/// Progress gauge that animates from empty to its target percentage
pub struct GaugePreview {
    label: String,
    percent: u16,
    mount: Mount,
}

impl GaugePreview {
    pub fn new(label: impl Into<String>, percent: u16) -> Self {
        Self {
            label: label.into(),
            percent: percent.min(100),
            mount: Mount::default(),
        }
    }
}

impl Renderable for GaugePreview {
    fn mount(&mut self, _key: u64) {
        self.mount.start();
    }

    fn unmount(&mut self) {
        self.mount.unmount();
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let ratio = fill_ratio(self.mount.elapsed(), self.percent);
        let height = area.height.min(3);
        let gauge_area = Rect::new(area.x, area.y + (area.height - height) / 2, area.width, height);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(self.label.as_str()))
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(ratio)
            .label(format!("{:.0}%", ratio * 100.0));
        frame.render_widget(gauge, gauge_area);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sparkline
// ─────────────────────────────────────────────────────────────────────────────

/// Sparkline that scrolls through its samples
pub struct SparklinePreview {
    title: String,
    data: Vec<u64>,
    mount: Mount,
}

impl SparklinePreview {
    pub fn new(title: impl Into<String>, data: Vec<u64>) -> Self {
        Self {
            title: title.into(),
            data,
            mount: Mount::default(),
        }
    }
}

impl Renderable for SparklinePreview {
    fn mount(&mut self, _key: u64) {
        self.mount.start();
    }

    fn unmount(&mut self) {
        self.mount.unmount();
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let data = rotate(&self.data, scroll_offset(self.mount.elapsed()));
        let sparkline = Sparkline::default()
            .block(Block::default().borders(Borders::ALL).title(self.title.as_str()))
            .data(&data)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(sparkline, area);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Table
// ─────────────────────────────────────────────────────────────────────────────

/// Static data table
pub struct TablePreview {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TablePreview {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }
}

impl Renderable for TablePreview {
    fn mount(&mut self, _key: u64) {}

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let columns = self
            .headers
            .len()
            .max(self.rows.iter().map(Vec::len).max().unwrap_or(0))
            .max(1);
        let widths = vec![Constraint::Ratio(1, columns as u32); columns];

        let header = Row::new(self.headers.iter().map(|h| Cell::from(h.as_str()))).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let rows = self
            .rows
            .iter()
            .map(|r| Row::new(r.iter().map(|c| Cell::from(c.as_str()))));

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(table, area);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dashboard
// ─────────────────────────────────────────────────────────────────────────────

/// Grid of metric cards, one trend line per card
pub struct DashboardPreview {
    title: String,
    metrics: Vec<Metric>,
    mount: Mount,
}

impl DashboardPreview {
    pub fn new(title: impl Into<String>, metrics: Vec<Metric>) -> Self {
        Self {
            title: title.into(),
            metrics,
            mount: Mount::default(),
        }
    }

    /// Cards per row for the given width
    fn columns(width: u16) -> usize {
        match width {
            0..=47 => 1,
            48..=89 => 2,
            _ => 3,
        }
    }
}

impl Renderable for DashboardPreview {
    fn mount(&mut self, _key: u64) {
        self.mount.start();
    }

    fn unmount(&mut self) {
        self.mount.unmount();
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let outer = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        if self.metrics.is_empty() || inner.height == 0 {
            return;
        }

        let columns = Self::columns(inner.width);
        let row_count = self.metrics.len().div_ceil(columns);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
            .split(inner);

        let offset = scroll_offset(self.mount.elapsed());
        for (row_idx, chunk) in self.metrics.chunks(columns).enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(rows[row_idx]);

            for (metric, cell) in chunk.iter().zip(cells.iter()) {
                draw_metric_card(frame, *cell, metric, offset);
            }
        }
    }
}

fn draw_metric_card(frame: &mut Frame, area: Rect, metric: &Metric, offset: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(metric.label.as_str());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let value = Paragraph::new(Line::from(Span::styled(
        metric.value.as_str(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(value, Rect::new(inner.x, inner.y, inner.width, 1));

    if inner.height > 1 && !metric.trend.is_empty() {
        let data = rotate(&metric.trend, offset);
        let trend_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
        frame.render_widget(
            Sparkline::default()
                .data(&data)
                .style(Style::default().fg(Color::Cyan)),
            trend_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(preview: &dyn Renderable, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| preview.draw(f, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_fill_ratio_clamps() {
        assert_eq!(fill_ratio(Duration::ZERO, 80), 0.0);
        assert!((fill_ratio(FILL_DURATION, 80) - 0.8).abs() < 1e-9);
        assert!((fill_ratio(FILL_DURATION * 4, 80) - 0.8).abs() < 1e-9);
        assert!((fill_ratio(FILL_DURATION, 250) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate() {
        assert_eq!(rotate(&[1, 2, 3], 1), vec![2, 3, 1]);
        assert_eq!(rotate(&[1, 2, 3], 4), vec![2, 3, 1]);
        assert!(rotate(&[], 3).is_empty());
    }

    #[test]
    fn test_remount_restarts_animation() {
        let mut gauge = GaugePreview::new("Upload", 100);
        gauge.mount(0);
        let first = gauge.mount.at;
        std::thread::sleep(Duration::from_millis(5));
        gauge.mount(1);
        assert!(gauge.mount.at > first);
    }

    #[test]
    fn test_text_preview_renders_text() {
        let mut preview = TextPreview::new("hello");
        preview.mount(0);
        assert!(render(&preview, 20, 3).contains("hello"));
    }

    #[test]
    fn test_empty_text_preview_shows_placeholder() {
        let preview = TextPreview::new("  ");
        assert!(render(&preview, 30, 3).contains("Nothing to preview"));
    }

    #[test]
    fn test_dashboard_renders_metric_values() {
        let mut preview = DashboardPreview::new(
            "Sales",
            vec![
                Metric {
                    label: "Revenue".to_string(),
                    value: "$12k".to_string(),
                    trend: vec![1, 3, 2],
                },
                Metric {
                    label: "Users".to_string(),
                    value: "342".to_string(),
                    trend: vec![],
                },
            ],
        );
        preview.mount(0);
        let out = render(&preview, 60, 12);
        assert!(out.contains("$12k"));
        assert!(out.contains("342"));
    }

    #[test]
    fn test_dashboard_columns() {
        assert_eq!(DashboardPreview::columns(36), 1);
        assert_eq!(DashboardPreview::columns(64), 2);
        assert_eq!(DashboardPreview::columns(120), 3);
    }
}
