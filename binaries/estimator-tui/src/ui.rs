//! UI rendering for the estimator TUI

use crate::app::{App, HealthState};
use crate::theme::ThemePalette;
use estimator_form::{ChartInstance, Control};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

/// Width of the label column in the form
const LABEL_WIDTH: usize = 38;

pub fn draw(frame: &mut Frame, app: &App) {
    let palette = &app.palette;
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base_style()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(16),   // Form + output
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, app, palette, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(62), Constraint::Min(30)])
        .split(chunks[1]);

    render_form(frame, app, palette, main[0]);

    let output = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Result
            Constraint::Length(4), // Error
            Constraint::Min(8),    // Chart
        ])
        .split(main[1]);

    render_result(frame, app, palette, output[0]);
    render_error(frame, app, palette, output[1]);
    render_chart(frame, app, palette, output[2]);

    render_footer(frame, app, palette, chunks[2]);
}

fn panel<'a>(title: &'a str, palette: &ThemePalette, active: bool) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style(active))
        .style(palette.base_style())
}

fn render_header(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let health = match &app.health {
        HealthState::Unknown => Span::styled("API: ?", palette.muted_style()),
        HealthState::Checking => Span::styled("API: comprobando...", Style::default().fg(palette.warning)),
        HealthState::Up(status) => {
            let r2 = status
                .model_metrics
                .get("r2")
                .map(|r2| format!(" (R² {:.3})", r2))
                .unwrap_or_default();
            Span::styled(format!("API: {}{}", status.status, r2), palette.success_style())
        }
        HealthState::Down(message) => {
            Span::styled(format!("API: {}", message), palette.error_style())
        }
    };

    let line = Line::from(vec![
        Span::styled(
            " ESTIMADOR ",
            Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled("de precios de vivienda  ", Style::default().fg(palette.accent)),
        Span::styled(app.base_url().to_string(), palette.muted_style()),
        Span::raw("  "),
        health,
    ]);

    frame.render_widget(Paragraph::new(line).block(panel("", palette, false)), area);
}

fn render_form(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let form = &app.page.form;
    let lines: Vec<Line> = Control::ORDER
        .iter()
        .map(|&control| {
            let focused = control == app.focus;
            let marker = if focused { "> " } else { "  " };
            let value = match control {
                Control::FeatureSelect => format!("< {} >", form.feature.name()),
                Control::CurveButton => "[ Calcular curva ]".to_string(),
                _ => form.text(control).unwrap_or_default().to_string(),
            };
            let value_style = if focused {
                palette.focused_style()
            } else {
                Style::default().fg(palette.fg)
            };

            let label = match control {
                Control::CurveButton => String::new(),
                _ => format!("{:<width$}", control.label(), width = LABEL_WIDTH),
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(palette.primary)),
                Span::styled(label, palette.muted_style()),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(panel(" Datos del distrito ", palette, true)),
        area,
    );
}

fn render_result(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let line = match app.page.view.result.shown() {
        Some(text) => Line::from(Span::styled(text, palette.success_style())),
        None => Line::from(Span::styled("Pulsa Enter para estimar", palette.muted_style())),
    };
    frame.render_widget(Paragraph::new(line).block(panel(" Resultado ", palette, false)), area);
}

fn render_error(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let Some(message) = app.page.view.error.shown() else {
        frame.render_widget(panel(" Error ", palette, false), area);
        return;
    };
    let error = Paragraph::new(Span::styled(message, palette.error_style()))
        .wrap(Wrap { trim: true })
        .block(
            panel(" Error ", palette, false).border_style(Style::default().fg(palette.error)),
        );
    frame.render_widget(error, area);
}

fn render_chart(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let Some(chart) = app.page.chart() else {
        let hint = Paragraph::new("Pulsa F5 para calcular la curva")
            .style(palette.muted_style())
            .alignment(Alignment::Center)
            .block(panel(" Curva ", palette, false));
        frame.render_widget(hint, area);
        return;
    };

    let config = chart.config();
    let title = format!(
        " Curva #{}: {} ({}) ",
        app.page.surface().drawn(),
        config.x_title(),
        chart.drawn_at().format("%H:%M:%S")
    );

    let dataset = Dataset::default()
        .name(config.series_label())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(palette.chart_line))
        .data(chart.points());

    let widget = Chart::new(vec![dataset])
        .block(panel(&title, palette, false))
        .x_axis(
            Axis::default()
                .title(config.x_title())
                .bounds(chart.x_bounds())
                .labels(chart.x_labels())
                .style(palette.muted_style()),
        )
        .y_axis(
            Axis::default()
                .title(config.y_title())
                .bounds(chart.y_bounds())
                .labels(chart.y_labels())
                .style(palette.muted_style()),
        );
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, app: &App, palette: &ThemePalette, area: Rect) {
    let shortcuts = [
        ("↑↓", "Campo"),
        ("←→", "Variable"),
        ("Enter", "Estimar"),
        ("F5", "Curva"),
        ("F2", "Estado"),
        ("Esc", "Salir"),
    ];

    let mut spans: Vec<Span> = shortcuts
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{}]", key), palette.shortcut_key()),
                Span::styled(format!("{} ", desc), palette.muted_style()),
            ]
        })
        .collect();

    if app.in_flight > 0 {
        spans.push(Span::styled(
            format!(" en curso: {}", app.in_flight),
            Style::default().fg(palette.warning),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimator_api::{ApiClient, ApiError};
    use estimator_core::CurveResponse;
    use estimator_form::FormState;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        App::new(
            ApiClient::new("http://127.0.0.1:8000").unwrap(),
            FormState::default(),
        )
    }

    #[test]
    fn test_initial_screen() {
        let text = screen(&app());
        assert!(text.contains("ESTIMADOR"));
        assert!(text.contains("Ingresos medios"));
        assert!(text.contains("< med_inc >"));
        assert!(text.contains("Pulsa F5 para calcular la curva"));
        assert!(!text.contains("en curso"));
    }

    #[test]
    fn test_result_error_and_chart() {
        let mut app = app();
        app.page.complete_prediction(Ok(estimator_core::Prediction {
            predicted_price: Some(212000.0),
            predicted_price_formatted: "212,000 $".to_string(),
            details: Default::default(),
        }));
        app.page.complete_curve(Err(ApiError::Status {
            status: 400,
            message: "num_points fuera de rango".to_string(),
        }));
        app.page.render_curve(&CurveResponse {
            feature_name: "house_age".to_string(),
            x_values: vec![1.0, 26.0, 52.0],
            prices: vec![150000.0, 190000.0, 240000.0],
        });

        let text = screen(&app);
        assert!(text.contains("Precio estimado: 212,000 $"));
        assert!(text.contains("num_points fuera de rango"));
        assert!(text.contains("Curva #1: house_age"));
    }
}
