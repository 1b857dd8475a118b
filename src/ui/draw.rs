use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::error::PredictError;
use crate::types::features::{Feature, FeatureGroup};

use super::app::App;
use super::form::{format_value, slider_ratio};
use super::theme::Theme;

const TITLE: &str = "📱 Mobile Price Range Prediction App";
const SUBTITLE: &str = "Predict mobile price category based on technical specifications.";
const SLIDER_WIDTH: usize = 10;

/// Draws the whole prediction screen.
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // title
            Constraint::Min(18),    // sidebar + inputs
            Constraint::Length(5),  // result box
            Constraint::Length(1),  // hints / error
            Constraint::Length(1),  // footer
        ])
        .split(area);

    draw_header(f, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(40)])
        .split(rows[1]);

    draw_sidebar(f, cols[0], app);
    draw_inputs(f, cols[1], app);
    draw_result(f, rows[2], app);
    draw_status(f, rows[3], app);

    f.render_widget(
        Paragraph::new(Span::styled(app.about.footer.as_str(), Theme::muted()))
            .alignment(Alignment::Center),
        rows[4],
    );
}

fn draw_header(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(TITLE, Theme::title())),
        Line::from(Span::styled(SUBTITLE, Theme::dim())),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let predictor = app.session.predictor();
    let model_line = match predictor.model_name() {
        Some(name) => Span::styled(name.to_string(), Theme::text()),
        None => Span::styled("unavailable", Theme::error()),
    };

    let lines = vec![
        Line::from(Span::styled(
            "Estimates a phone's price range from its hardware specifications using a pre-trained classifier.",
            Theme::text(),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("Model: ", Theme::dim()), model_line]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Developed by {}", app.about.author),
            Theme::text(),
        )),
        Line::from(Span::styled(app.about.github_url.as_str(), Theme::key())),
        Line::from(""),
        key_line("↑/↓", "move"),
        key_line("←/→", "adjust (shift ×10)"),
        key_line("space", "toggle yes/no"),
        key_line("enter", "predict"),
        key_line("r", "reset"),
        key_line("q", "quit"),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border())
                    .title(" About this app ")
                    .title_style(Theme::title()),
            )
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn key_line<'a>(key: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("[{key}] "), Theme::key()),
        Span::styled(action, Theme::dim()),
    ])
}

fn draw_inputs(f: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut cells = Vec::with_capacity(4);
    for half in halves.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*half);
        cells.extend(cols.iter().copied());
    }

    for (group, cell) in FeatureGroup::ALL.iter().zip(cells) {
        draw_group(f, cell, app, *group);
    }
}

fn draw_group(f: &mut Frame, area: Rect, app: &App, group: FeatureGroup) {
    let focused = app.form.focused();
    let active = focused.group() == group;

    let lines: Vec<Line> = group
        .features()
        .iter()
        .map(|feature| control_line(app, *feature, *feature == focused))
        .collect();

    let border = if active {
        Theme::border_active()
    } else {
        Theme::border()
    };

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", group.title()))
                .title_style(Theme::title()),
        ),
        area,
    );
}

fn control_line(app: &App, feature: Feature, focused: bool) -> Line<'static> {
    let value = app.form.specs().get(feature);
    let marker = if focused { "▸ " } else { "  " };

    let mut spans = vec![
        Span::styled(marker, Theme::key()),
        Span::styled(format!("{:<21}", feature.label()), Theme::text()),
    ];

    if feature.domain().is_flag() {
        let on = value >= 0.5;
        let (yes, no) = if on { ("(•)", "( )") } else { ("( )", "(•)") };
        spans.push(Span::styled(format!("{yes} Yes  {no} No"), Theme::text()));
    } else {
        let filled = (slider_ratio(feature, value) * SLIDER_WIDTH as f64).round() as usize;
        spans.push(Span::styled("━".repeat(filled), Theme::title()));
        spans.push(Span::styled("─".repeat(SLIDER_WIDTH - filled), Theme::muted()));
        spans.push(Span::styled(
            format!(" {}", format_value(feature, value)),
            Theme::text(),
        ));
    }

    let mut line = Line::from(spans);
    if focused {
        line.style = Theme::highlight();
    }
    line
}

fn draw_result(f: &mut Frame, area: Rect, app: &App) {
    let predictor = app.session.predictor();

    if let Some(reason) = predictor.unavailable_reason() {
        let message = PredictError::model_unavailable(reason).to_string();
        f.render_widget(
            Paragraph::new(Span::styled(message, Theme::error()))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Theme::error())
                        .title(" Model unavailable ")
                        .title_style(Theme::error()),
                )
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Predicted Price Range ")
        .title_style(Theme::title());

    match app.session.verdict() {
        Some(verdict) => {
            let (label, tier) = verdict.range.presentation();
            let lines = vec![
                Line::from(Span::styled(
                    format!("{} {}", verdict.range.emoji(), label),
                    Theme::range(verdict.range).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!(
                        "{} tier · predicted at {}",
                        tier,
                        verdict.predicted_at.format("%H:%M:%S UTC")
                    ),
                    Theme::dim(),
                )),
            ];
            f.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .block(block.border_style(Theme::tier(tier))),
                area,
            );
        }
        None => {
            f.render_widget(
                Paragraph::new(Span::styled(
                    "Adjust the specifications and press Enter to predict the price range.",
                    Theme::muted(),
                ))
                .alignment(Alignment::Center)
                .block(block.border_style(Theme::border())),
                area,
            );
        }
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.session.last_error() {
        Some(err) if matches!(err, PredictError::Prediction { .. }) => Line::from(vec![
            Span::styled(" ✖ ", Theme::error()),
            Span::styled(err.to_string(), Theme::error()),
        ]),
        _ => Line::from(vec![
            Span::styled("[enter] ", Theme::key()),
            Span::styled("Predict Price Range", Theme::dim()),
        ]),
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::classifier::mock::MockClassifier;
    use crate::models::inference::Predictor;
    use crate::session::PredictionSession;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(120, 36);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app_with(predictor: Predictor) -> App {
        App::new(PredictionSession::new(predictor), AppConfig::default().about)
    }

    fn enter(app: &mut App) {
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    }

    #[test]
    fn test_layout_shows_groups_and_credits() {
        let app = app_with(Predictor::with_classifier(Box::new(MockClassifier::returning(0))));
        let frame = render(&app);

        assert!(frame.contains("Mobile Price Range Prediction App"), "{frame}");
        for group in FeatureGroup::ALL {
            assert!(frame.contains(group.title()), "missing {}:\n{frame}", group.title());
        }
        assert!(frame.contains("About this app"));
        assert!(frame.contains("Developed by Abhishek"));
        assert!(frame.contains("Machine Learning Project"));
        assert!(frame.contains("press Enter to predict"));
    }

    #[test]
    fn test_verdict_rendered() {
        let mut app = app_with(Predictor::with_classifier(Box::new(MockClassifier::returning(1))));
        enter(&mut app);

        let frame = render(&app);
        assert!(frame.contains("Medium Cost"), "{frame}");
        assert!(frame.contains("info tier"));
    }

    #[test]
    fn test_unavailable_model_blocks_result() {
        let mut app = app_with(Predictor::unavailable("models/best_model.json not found"));
        enter(&mut app);

        let frame = render(&app);
        assert!(frame.contains("Model unavailable"), "{frame}");
        assert!(!frame.contains("Predicted Price Range"));
    }

    #[test]
    fn test_prediction_error_shown_in_status() {
        let mut app = app_with(Predictor::with_classifier(Box::new(MockClassifier::failing(
            "bad input shape",
        ))));
        enter(&mut app);

        let frame = render(&app);
        assert!(frame.contains("Prediction failed: bad input shape"), "{frame}");
        assert!(frame.contains("press Enter to predict"));
    }
}
