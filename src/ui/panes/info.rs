//! Info pane: board statistics, cache state and render progress

use crate::geometry::Region;
use crate::life::Rule;
use crate::renders::controller::RenderProgress;
use crate::renders::GenerationCount;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Everything the info pane shows, gathered by the app each frame
pub struct InfoRenderData<'a> {
    pub generation: usize,
    pub population: usize,
    pub bounds: Option<Region>,
    pub rule: Rule,
    pub transitions: usize,
    pub starters: usize,
    /// Known future of the current board
    pub known_future: GenerationCount,
    pub cycle_period: Option<usize>,
    pub history_index: usize,
    pub history_len: usize,
    pub tool: &'a str,
    pub progress: Option<RenderProgress>,
}

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{:<12}", label),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

fn format_duration_millis(millis: u64) -> String {
    if millis >= 60_000 {
        format!("{}m {}s", millis / 60_000, (millis % 60_000) / 1000)
    } else if millis >= 1000 {
        format!("{:.1}s", millis as f64 / 1000.0)
    } else {
        format!("{}ms", millis)
    }
}

/// Render the info pane
pub fn render_info_pane(frame: &mut Frame, area: Rect, data: &InfoRenderData) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    let bounds = match data.bounds {
        Some(r) => format!("{}x{} @ ({}, {})", r.width, r.height, r.row, r.col),
        None => String::from("-"),
    };
    let future = match data.known_future {
        GenerationCount::Infinite => String::from("∞ (cycle)"),
        GenerationCount::Finite(n) => format!("{} generations", n),
    };
    let period = data
        .cycle_period
        .map(|p| p.to_string())
        .unwrap_or_else(|| String::from("-"));

    let lines = vec![
        field("Generation", data.generation.to_string()),
        field("Population", data.population.to_string()),
        field("Bounds", bounds),
        field("Rule", data.rule.to_string()),
        field("Tool", data.tool.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Cache",
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        )),
        field("Transitions", data.transitions.to_string()),
        field("Starters", data.starters.to_string()),
        field("Known", future),
        field("Period", period),
        Line::from(""),
        field(
            "History",
            format!("{}/{}", data.history_index + 1, data.history_len),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    if let Some(progress) = &data.progress {
        let label = format!(
            "{}/{} · {}% · ETA {}",
            progress.requested.current_generation_count,
            progress.requested.generation_count,
            progress.percentage,
            format_duration_millis(progress.time_to_completion_estimate_millis)
        );
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(" Rendering ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(DEFAULT_THEME.secondary)),
            )
            .gauge_style(
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .bg(Color::Black),
            )
            .percent(progress.percentage.min(100) as u16)
            .label(label);
        frame.render_widget(gauge, chunks[1]);
    }
}
