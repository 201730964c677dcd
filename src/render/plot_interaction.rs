/// Horizontal (time) view shared by the three stacked panels.
/// Each panel maps its own fixed y-limits; only time pans and zooms.
#[derive(Debug, Clone)]
pub struct TimeView {
    /// Visible time window, Unix seconds.
    pub t_min: f64,
    pub t_max: f64,
    /// Full span of the displayed orbit, restored by `fit`.
    pub full: Option<(f64, f64)>,
}

impl Default for TimeView {
    fn default() -> Self {
        Self {
            t_min: 0.0,
            t_max: 1.0,
            full: None,
        }
    }
}

impl TimeView {
    /// Reset to a new orbit's time span. `None` leaves the view without an axis.
    pub fn reset(&mut self, span: Option<(f64, f64)>) {
        self.full = span;
        self.fit();
    }

    pub fn fit(&mut self) {
        if let Some((lo, hi)) = self.full {
            let pad = if (hi - lo).abs() < 1e-9 { 0.5 } else { 0.0 };
            self.t_min = lo - pad;
            self.t_max = hi + pad;
        }
    }

    pub fn has_axis(&self) -> bool {
        self.full.is_some()
    }

    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Pan with a primary drag, zoom around the pointer with the scroll wheel.
    pub fn handle_input(&mut self, response: &egui::Response, rect: egui::Rect) {
        if !self.has_axis() {
            return;
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            let dx = -(response.drag_delta().x as f64) * self.span() / rect.width() as f64;
            self.t_min += dx;
            self.t_max += dx;
        }

        let scroll = response.ctx.input(|i| {
            if response.hovered() {
                i.smooth_scroll_delta.y
            } else {
                0.0
            }
        });
        if scroll.abs() > 0.0 {
            if let Some(pos) = response.hover_pos() {
                let factor = (1.0 - scroll as f64 * 0.001).clamp(0.5, 2.0);
                self.zoom_around(self.screen_to_time(pos.x, rect), factor);
            }
        }
    }

    pub fn zoom_around(&mut self, center: f64, factor: f64) {
        let new_min = center + (self.t_min - center) * factor;
        let new_max = center + (self.t_max - center) * factor;
        if new_max - new_min > 1e-3 {
            self.t_min = new_min;
            self.t_max = new_max;
        }
    }

    pub fn screen_to_time(&self, x: f32, rect: egui::Rect) -> f64 {
        let frac = (x - rect.left()) as f64 / rect.width() as f64;
        self.t_min + frac * self.span()
    }

    pub fn time_to_screen(&self, t: f64, rect: egui::Rect) -> f32 {
        let frac = (t - self.t_min) / self.span();
        rect.left() + (frac as f32) * rect.width()
    }
}

/// Screen y for `value` in a panel whose axis spans `limits`.
pub fn value_to_screen_y(value: f64, limits: (f64, f64), rect: egui::Rect) -> f32 {
    let frac = (value - limits.0) / (limits.1 - limits.0);
    rect.bottom() - (frac as f32) * rect.height()
}

/// Compute nice grid line positions for an axis range.
/// Returns (value, is_major) pairs.
pub fn compute_grid_lines(min: f64, max: f64) -> Vec<(f64, bool)> {
    let range = max - min;
    if range <= 0.0 || !range.is_finite() {
        return Vec::new();
    }

    let raw_step = range / 4.0;
    let order = 10f64.powf(raw_step.log10().floor());
    let nice_step = match raw_step / order {
        n if n <= 1.0 => order,
        n if n <= 2.0 => 2.0 * order,
        n if n <= 5.0 => 5.0 * order,
        _ => 10.0 * order,
    };
    let minor_step = nice_step / 2.0;

    let start = (min / minor_step).ceil() as i64;
    let end = (max / minor_step).floor() as i64;
    (start..=end)
        .map(|i| {
            let val = i as f64 * minor_step;
            (val, i % 2 == 0)
        })
        .collect()
}

/// Steps, in seconds, a time axis may use between labelled ticks.
const TIME_STEPS: &[f64] = &[
    1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0, 900.0, 1800.0, 3600.0, 7200.0,
    10800.0, 21600.0, 43200.0, 86400.0,
];

/// Tick times for the window, aligned to whole multiples of a round step so
/// that labels read as clock times. Aims for roughly `target` ticks.
pub fn compute_time_ticks(t_min: f64, t_max: f64, target: usize) -> Vec<f64> {
    let span = t_max - t_min;
    if span <= 0.0 || !span.is_finite() || target == 0 {
        return Vec::new();
    }
    let ideal = span / target as f64;
    let step = TIME_STEPS
        .iter()
        .copied()
        .find(|s| *s >= ideal)
        .unwrap_or_else(|| (ideal / 86400.0).ceil() * 86400.0);
    let first = (t_min / step).ceil() as i64;
    let last = (t_max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Format a numeric value for axis tick labels.
pub fn format_tick_value(val: f64) -> String {
    if val.abs() >= 1e6 || (val != 0.0 && val.abs() < 1e-3) {
        format!("{val:.2e}")
    } else if val == 0.0 {
        "0".to_string()
    } else {
        let s = format!("{val:.6}");
        let s = s.trim_end_matches('0');
        let s = s.trim_end_matches('.');
        s.to_string()
    }
}
