//! The time range shared by the pressure and heart rate panels.
//!
//! Both panels read their x bounds from one [`Viewport`], so panning or
//! zooming one moves the other. Positions are seconds since the epoch.

const PAN_FRACTION: f64 = 0.1;
const ZOOM_FACTOR: f64 = 1.25;
/// Zooming in stops at one hour.
pub const MIN_SPAN_SECS: f64 = 3600.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    home: (f64, f64),
    start: f64,
    end: f64,
}

impl Viewport {
    /// A viewport covering `start..end`, padded out to an hour either side
    /// when the range is degenerate (a single reading).
    pub fn new(start: f64, end: f64) -> Self {
        let (start, end) = if end - start > 0.0 {
            (start, end)
        } else {
            (start - MIN_SPAN_SECS, start + MIN_SPAN_SECS)
        };
        Self {
            home: (start, end),
            start,
            end,
        }
    }

    /// Fit the viewport to the first and last of `xs`, which must be sorted.
    pub fn fit(xs: &[f64]) -> Self {
        match (xs.first(), xs.last()) {
            (Some(&first), Some(&last)) => Self::new(first, last),
            _ => Self::new(0.0, 0.0),
        }
    }

    pub fn bounds(&self) -> [f64; 2] {
        [self.start, self.end]
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x <= self.end
    }

    pub fn pan_left(&mut self) {
        self.shift(-self.span() * PAN_FRACTION);
    }

    pub fn pan_right(&mut self) {
        self.shift(self.span() * PAN_FRACTION);
    }

    pub fn zoom_in(&mut self) {
        self.set_span((self.span() / ZOOM_FACTOR).max(MIN_SPAN_SECS));
    }

    pub fn zoom_out(&mut self) {
        self.set_span(self.span() * ZOOM_FACTOR);
    }

    /// Move so that `x` sits in the middle, keeping the span.
    pub fn center_on(&mut self, x: f64) {
        self.shift(x - self.center());
    }

    pub fn reset(&mut self) {
        (self.start, self.end) = self.home;
    }

    fn shift(&mut self, by: f64) {
        self.start += by;
        self.end += by;
    }

    fn set_span(&mut self, span: f64) {
        let center = self.center();
        self.start = center - span / 2.0;
        self.end = center + span / 2.0;
    }
}
