pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

use crate::{
    app::{App, MarkerSeries},
    time_series::epoch_secs,
    ui::charting::{format_label, time_labels, y_bounds, ORANGE, RAW_GREY},
    viewport::Viewport,
};

const HORIZONTAL_MARGIN: u16 = 1;
const X_LABELS: usize = 3;

type Points = Vec<(f64, f64)>;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        if self.readings.is_empty() {
            Paragraph::new(Line::from(vec![
                Span::styled("No readings found", bold_style),
                Span::styled("   (q)uit", italic_style),
            ]))
            .alignment(Alignment::Center)
            .render(area, buf);
            return;
        }

        let hr_height = (area.height.saturating_sub(3) / 4).max(5);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Min(6),             // pressure
                Constraint::Length(hr_height), // heart rate
                Constraint::Length(1),         // legend
                Constraint::Length(1),         // hovered point / summary
                Constraint::Length(1),         // keys
            ])
            .split(area);

        let x_bounds = self.viewport.bounds();
        let x_labels: Vec<Span> = time_labels(x_bounds, X_LABELS)
            .into_iter()
            .map(|l| Span::styled(l, bold_style))
            .collect();

        // raw readings
        let raw_sys: Points = self
            .readings
            .iter()
            .map(|r| (epoch_secs(r.timestamp), r.systolic as f64))
            .collect();
        let raw_dia: Points = self
            .readings
            .iter()
            .map(|r| (epoch_secs(r.timestamp), r.diastolic as f64))
            .collect();
        let raw_hr: Points = self
            .readings
            .iter()
            .map(|r| (epoch_secs(r.timestamp), r.heart_rate as f64))
            .collect();

        // clumped readings
        let sys: Points = self.points.iter().map(|p| (p.x(), p.systolic)).collect();
        let dia: Points = self.points.iter().map(|p| (p.x(), p.diastolic)).collect();
        let hr: Points = self.points.iter().map(|p| (p.x(), p.heart_rate)).collect();

        let hovered_bp: Points = self
            .hovered()
            .map(|p| vec![(p.x(), p.systolic), (p.x(), p.diastolic)])
            .unwrap_or_default();
        let hovered_hr: Points = self
            .hovered()
            .map(|p| vec![(p.x(), p.heart_rate)])
            .unwrap_or_default();

        // blood pressure panel
        let lows: Vec<f64> = raw_dia.iter().map(|&(_, y)| y).collect();
        let highs: Vec<f64> = raw_sys.iter().map(|&(_, y)| y).collect();
        let bp_bounds = y_bounds(&lows, &highs);

        let sys_baseline = horizontal_line(x_bounds, self.systolic_baseline);
        let dia_baseline = horizontal_line(x_bounds, self.diastolic_baseline);
        let bp_markers = marker_lines(&self.markers, &self.viewport, bp_bounds);

        let mut bp_datasets = vec![
            baseline_dataset(&sys_baseline),
            baseline_dataset(&dia_baseline),
        ];
        bp_datasets.extend(bp_markers.iter().map(|(c, l)| marker_dataset(l, *c)));
        bp_datasets.extend([
            scatter_dataset(&raw_sys, RAW_GREY),
            scatter_dataset(&raw_dia, RAW_GREY),
            line_dataset(&sys, Color::Red),
            line_dataset(&dia, ORANGE),
            scatter_dataset(&hovered_bp, Color::White),
        ]);

        Chart::new(bp_datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("Blood Pressure (mmHg)", bold_style)),
            )
            .x_axis(
                Axis::default()
                    .bounds(x_bounds)
                    .labels(x_labels.clone()),
            )
            .y_axis(
                Axis::default()
                    .bounds(bp_bounds)
                    .labels(value_labels(bp_bounds, bold_style)),
            )
            .render(chunks[0], buf);

        // heart rate panel
        let hr_values: Vec<f64> = raw_hr.iter().map(|&(_, y)| y).collect();
        let hr_bounds = y_bounds(&hr_values, &hr_values);
        let hr_markers = marker_lines(&self.markers, &self.viewport, hr_bounds);

        let mut hr_datasets: Vec<Dataset> = hr_markers
            .iter()
            .map(|(c, l)| marker_dataset(l, *c))
            .collect();
        hr_datasets.extend([
            scatter_dataset(&raw_hr, RAW_GREY),
            line_dataset(&hr, Color::Green),
            scatter_dataset(&hovered_hr, Color::White),
        ]);

        Chart::new(hr_datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("Heart Rate (cnt/min)", bold_style)),
            )
            .x_axis(
                Axis::default()
                    .title("Date")
                    .bounds(x_bounds)
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .bounds(hr_bounds)
                    .labels(value_labels(hr_bounds, bold_style)),
            )
            .render(chunks[1], buf);

        Paragraph::new(legend(self))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        Paragraph::new(Span::styled(status_text(self), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(
            "(←/→) pan / (+/-) zoom / ([/]) inspect / (r)eset / (q)uit",
            italic_style,
        ))
        .render(chunks[4], buf);
    }
}

fn horizontal_line(x_bounds: [f64; 2], y: f64) -> Points {
    vec![(x_bounds[0], y), (x_bounds[1], y)]
}

/// One vertical segment per marker date inside the view.
fn marker_lines(
    markers: &[MarkerSeries],
    viewport: &Viewport,
    y_bounds: [f64; 2],
) -> Vec<(Color, Points)> {
    markers
        .iter()
        .flat_map(|m| m.xs.iter().map(move |&x| (m.color, x)))
        .filter(|&(_, x)| viewport.contains(x))
        .map(|(color, x)| (color, vec![(x, y_bounds[0]), (x, y_bounds[1])]))
        .collect()
}

fn scatter_dataset(data: &[(f64, f64)], color: Color) -> Dataset<'_> {
    Dataset::default()
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(color))
        .data(data)
}

fn line_dataset(data: &[(f64, f64)], color: Color) -> Dataset<'_> {
    Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .data(data)
}

fn baseline_dataset(data: &[(f64, f64)]) -> Dataset<'_> {
    Dataset::default()
        .marker(Marker::Dot)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::DarkGray))
        .data(data)
}

fn marker_dataset(data: &[(f64, f64)], color: Color) -> Dataset<'_> {
    Dataset::default()
        .marker(Marker::Dot)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

fn value_labels(bounds: [f64; 2], style: Style) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .into_iter()
        .map(|v| Span::styled(format_label(v.round()), style))
        .collect()
}

fn legend(app: &App) -> Line<'static> {
    let mut spans = vec![
        Span::styled("■ Systolic", Style::default().fg(Color::Red)),
        Span::raw("  "),
        Span::styled("■ Diastolic", Style::default().fg(ORANGE)),
        Span::raw("  "),
        Span::styled(
            format!(
                "┄ {}/{} baseline",
                format_label(app.systolic_baseline),
                format_label(app.diastolic_baseline)
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    for marker in &app.markers {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("┆ {}", marker.label),
            Style::default().fg(marker.color),
        ));
    }
    Line::from(spans)
}

/// The inspected point, or a summary of what is loaded.
pub fn status_text(app: &App) -> String {
    match app.hovered() {
        Some(p) => format!(
            "{}:  {} / {}   {} bpm   ({} {})",
            p.timestamp.format("%b %d %Y %I:%M %p"),
            format_label(p.systolic),
            format_label(p.diastolic),
            format_label(p.heart_rate),
            p.count,
            if p.count == 1 { "reading" } else { "readings" },
        ),
        None => format!(
            "{} readings / {} clumped points / {} min window",
            app.readings.len(),
            app.points.len(),
            app.window_minutes
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clump::{clump, default_window};
    use crate::config::Config;
    use crate::markers::DateMarkerGroup;
    use crate::reading::Reading;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn create_test_app(markers: Vec<DateMarkerGroup>) -> App {
        let base = Utc.with_ymd_and_hms(2022, 6, 1, 7, 0, 0).unwrap();
        let readings: Vec<Reading> = [
            (0, 118, 78, 60),
            (5, 122, 80, 66),
            (10, 126, 85, 75),
            (60 * 24, 131, 84, 70),
            (60 * 48, 140, 92, 81),
        ]
        .iter()
        .map(|&(m, s, d, h)| Reading::new(base + Duration::minutes(m), s, d, h))
        .collect();
        let points = clump(&readings, default_window());
        let config = Config {
            markers,
            ..Config::default()
        };
        App::new(readings, points, &config)
    }

    fn rendered(app: &App, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_both_panels_and_legend() {
        let app = create_test_app(Vec::new());
        let out = rendered(&app, Rect::new(0, 0, 100, 30));
        assert!(out.contains("Blood Pressure (mmHg)"));
        assert!(out.contains("Heart Rate (cnt/min)"));
        assert!(out.contains("Systolic"));
        assert!(out.contains("120/70 baseline"));
        assert!(out.contains("5 readings / 3 clumped points / 60 min window"));
    }

    #[test]
    fn test_renders_marker_labels() {
        let app = create_test_app(vec![DateMarkerGroup::new(
            "Started Medication X",
            "purple",
            vec![NaiveDate::from_ymd_opt(2022, 6, 2).unwrap()],
        )]);
        let out = rendered(&app, Rect::new(0, 0, 120, 30));
        assert!(out.contains("Started Medication X"));
    }

    #[test]
    fn test_renders_empty_message() {
        let app = App::new(Vec::new(), Vec::new(), &Config::default());
        let out = rendered(&app, Rect::new(0, 0, 80, 24));
        assert!(out.contains("No readings found"));
    }

    #[test]
    fn test_small_area_does_not_panic() {
        let app = create_test_app(Vec::new());
        let area = Rect::new(0, 0, 20, 5);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert!(*buffer.area() == area);
    }

    #[test]
    fn test_status_text_for_hovered_point() {
        let mut app = create_test_app(Vec::new());
        app.cursor = Some(0);
        assert_eq!(
            status_text(&app),
            "Jun 01 2022 07:05 AM:  122 / 81   67 bpm   (3 readings)"
        );

        app.cursor = Some(2);
        assert!(status_text(&app).ends_with("140 / 92   81 bpm   (1 reading)"));
    }

    #[test]
    fn test_marker_lines_outside_view_are_skipped() {
        let viewport = Viewport::new(0.0, 100.0);
        let markers = vec![MarkerSeries {
            label: "x".into(),
            color: Color::Blue,
            xs: vec![50.0, 500.0],
        }];
        let lines = marker_lines(&markers, &viewport, [60.0, 150.0]);
        assert_eq!(lines, vec![(Color::Blue, vec![(50.0, 60.0), (50.0, 150.0)])]);
    }
}
