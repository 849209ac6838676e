// Terminal module: draws the charts full screen on stderr.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
};

use crate::model::PriceTable;
use crate::visualizer::charts::{PriceChart, ReturnsChart};
use crate::visualizer::{ChartDisplay, DisplayError};

/// Set while raw mode is on, so a restore only undoes what was entered.
static CHART_MODE: AtomicBool = AtomicBool::new(false);

/// Shows each chart full screen until the user dismisses it. Drawing goes
/// to stderr; stdout stays free for the report.
pub struct TerminalDisplay {
    tick_rate: Duration,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    fn present(&self, draw: impl Fn(&mut Frame)) -> Result<(), DisplayError> {
        enable_raw_mode()?;
        CHART_MODE.store(true, Ordering::SeqCst);

        let result = self.enter_and_draw(&draw);
        let restored = restore_terminal().map_err(DisplayError::from);

        // The first failure wins.
        result.and(restored)
    }

    fn enter_and_draw(&self, draw: &impl Fn(&mut Frame)) -> Result<(), DisplayError> {
        execute!(io::stderr(), EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
        self.run_until_dismissed(&mut terminal, draw)
    }

    fn run_until_dismissed<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        draw: &impl Fn(&mut Frame),
    ) -> Result<(), DisplayError> {
        loop {
            terminal.draw(|frame| draw(frame))?;

            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
                    {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Leaves raw mode and the alternate screen if a chart is up. Every step
/// runs; the first error is returned.
pub fn restore_terminal() -> io::Result<()> {
    if !CHART_MODE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    let raw = disable_raw_mode();
    let screen = execute!(io::stderr(), LeaveAlternateScreen, Show);
    raw.and(screen)
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartDisplay for TerminalDisplay {
    fn show_price_chart(&mut self, table: &PriceTable) -> Result<(), DisplayError> {
        let chart = PriceChart::from_table(table);
        self.present(|frame| draw_with_hint(frame, price_chart(&chart)))
    }

    fn show_returns_distribution(&mut self, table: &PriceTable) -> Result<(), DisplayError> {
        let chart = ReturnsChart::from_table(table);
        self.present(|frame| draw_with_hint(frame, returns_chart(&chart)))
    }
}

fn draw_with_hint(frame: &mut Frame, chart: Chart) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(frame.area());

    frame.render_widget(chart, chunks[0]);

    let hint = Paragraph::new("Press q, Esc or Enter to continue")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, chunks[1]);
}

fn price_chart(chart: &PriceChart) -> Chart<'_> {
    let datasets = vec![
        Dataset::default()
            .name("Stock Price")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::White))
            .data(&chart.close),
        Dataset::default()
            .name("50-Day MA")
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&chart.ma_short),
        Dataset::default()
            .name("200-Day MA")
            .marker(Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&chart.ma_long),
    ];

    Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", chart.title)),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds(chart.x_bounds)
                .labels(axis_labels(&chart.x_labels)),
        )
        .y_axis(
            Axis::default()
                .title("Price")
                .style(Style::default().fg(Color::Gray))
                .bounds(chart.y_bounds)
                .labels(axis_labels(&chart.y_labels)),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
}

fn returns_chart(chart: &ReturnsChart) -> Chart<'_> {
    let datasets = vec![
        Dataset::default()
            .name("Count")
            .marker(Marker::Braille)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(Color::Blue))
            .data(&chart.bars),
        Dataset::default()
            .name("Density")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&chart.density),
    ];

    Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", chart.title)),
        )
        .x_axis(
            Axis::default()
                .title("Returns")
                .style(Style::default().fg(Color::Gray))
                .bounds(chart.x_bounds)
                .labels(axis_labels(&chart.x_labels)),
        )
        .y_axis(
            Axis::default()
                .title("Count")
                .style(Style::default().fg(Color::Gray))
                .bounds(chart.y_bounds)
                .labels(axis_labels(&chart.y_labels)),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
}

fn axis_labels(labels: &[String]) -> Vec<Span<'_>> {
    labels.iter().map(|l| Span::raw(l.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{with_monthly_returns, with_moving_averages};
    use crate::model::PriceBar;
    use chrono::{Duration as Days, NaiveDate};
    use ratatui::backend::TestBackend;

    fn table() -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let bars = (0..500)
            .map(|i| {
                let p = 50.0 + i as f64 * 0.05 + (i as f64 * 0.2).cos();
                PriceBar::new(start + Days::days(i), p, p, p, p, 1)
            })
            .collect();
        with_monthly_returns(with_moving_averages(PriceTable::new("TATASTEEL.NS", bars)))
    }

    fn rendered(draw: impl Fn(&mut Frame)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn price_chart_renders_title_and_legend() {
        let chart = PriceChart::from_table(&table());
        let screen = rendered(|frame| draw_with_hint(frame, price_chart(&chart)));
        assert!(screen.contains("TATASTEEL.NS Stock Price with 50 & 200 Moving Averages"));
        assert!(screen.contains("50-Day MA"));
        assert!(screen.contains("200-Day MA"));
        assert!(screen.contains("Press q, Esc or Enter to continue"));
    }

    #[test]
    fn returns_chart_renders_title() {
        let chart = ReturnsChart::from_table(&table());
        let screen = rendered(|frame| draw_with_hint(frame, returns_chart(&chart)));
        assert!(screen.contains("Monthly Returns Distribution"));
        assert!(screen.contains("Density"));
    }

    #[test]
    fn restore_without_chart_mode_is_a_no_op() {
        assert!(!CHART_MODE.load(Ordering::SeqCst));
        assert!(restore_terminal().is_ok());
        assert!(!CHART_MODE.load(Ordering::SeqCst));
    }
}
