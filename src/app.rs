use chrono::{TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;
use tracing::warn;

use crate::config::Config;
use crate::markers::DateMarkerGroup;
use crate::reading::Reading;
use crate::time_series::{epoch_secs, ClumpedPoint};
use crate::ui::charting::parse_color;
use crate::viewport::Viewport;

/// A marker group with its color resolved and dates placed on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSeries {
    pub label: String,
    pub color: Color,
    pub xs: Vec<f64>,
}

impl From<&DateMarkerGroup> for MarkerSeries {
    fn from(group: &DateMarkerGroup) -> Self {
        let color = parse_color(&group.color).unwrap_or_else(|| {
            warn!(
                "Unknown color {:?} for marker {:?}, using white",
                group.color, group.label
            );
            Color::White
        });
        let xs = group
            .dates
            .iter()
            .filter_map(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| epoch_secs(Utc.from_utc_datetime(&dt)))
            .collect();

        Self {
            label: group.label.clone(),
            color,
            xs,
        }
    }
}

/// State of the chart viewer: the data to draw plus what the user has
/// panned, zoomed or selected.
#[derive(Debug)]
pub struct App {
    pub readings: Vec<Reading>,
    pub points: Vec<ClumpedPoint>,
    pub markers: Vec<MarkerSeries>,
    pub systolic_baseline: f64,
    pub diastolic_baseline: f64,
    pub window_minutes: i64,
    pub viewport: Viewport,
    /// Index into `points` of the inspected point.
    pub cursor: Option<usize>,
    pub should_quit: bool,
}

impl App {
    pub fn new(readings: Vec<Reading>, points: Vec<ClumpedPoint>, config: &Config) -> Self {
        let xs: Vec<f64> = readings.iter().map(|r| epoch_secs(r.timestamp)).collect();

        Self {
            viewport: Viewport::fit(&xs),
            markers: config.markers.iter().map(MarkerSeries::from).collect(),
            systolic_baseline: config.systolic_baseline,
            diastolic_baseline: config.diastolic_baseline,
            window_minutes: config.window_minutes,
            readings,
            points,
            cursor: None,
            should_quit: false,
        }
    }

    pub fn hovered(&self) -> Option<&ClumpedPoint> {
        self.cursor.and_then(|i| self.points.get(i))
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => self.viewport.pan_left(),
            KeyCode::Right | KeyCode::Char('l') => self.viewport.pan_right(),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => self.viewport.zoom_in(),
            KeyCode::Char('-') | KeyCode::Down => self.viewport.zoom_out(),
            KeyCode::Char('r') => {
                self.viewport.reset();
                self.cursor = None;
            }
            KeyCode::Char(']') => self.move_cursor(1),
            KeyCode::Char('[') => self.move_cursor(-1),
            _ => {}
        }
    }

    /// Step the inspected point, starting from the one nearest the middle of
    /// the view, and keep it on screen.
    fn move_cursor(&mut self, step: isize) {
        if self.points.is_empty() {
            return;
        }

        let last = self.points.len() - 1;
        let next = match self.cursor {
            Some(i) => i.saturating_add_signed(step).min(last),
            None => self.nearest_to(self.viewport.center()),
        };
        self.cursor = Some(next);

        let x = self.points[next].x();
        if !self.viewport.contains(x) {
            self.viewport.center_on(x);
        }
    }

    fn nearest_to(&self, x: f64) -> usize {
        let after = self.points.partition_point(|p| p.x() < x);
        match after {
            0 => 0,
            n if n == self.points.len() => n - 1,
            n => {
                if x - self.points[n - 1].x() <= self.points[n].x() - x {
                    n - 1
                } else {
                    n
                }
            }
        }
    }
}
