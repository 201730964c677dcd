use egui::Color32;

/// Floor applied before taking logarithms of counts.
pub const COUNT_FLOOR: f64 = 1e-5;

/// Diverging colour ramps for the two spectrogram panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// Blue, white, red.
    Bwr,
    /// Muted blue, light grey, muted red.
    Coolwarm,
}

impl Colormap {
    fn stops(&self) -> [[u8; 3]; 3] {
        match self {
            Colormap::Bwr => [[0, 0, 255], [255, 255, 255], [255, 0, 0]],
            Colormap::Coolwarm => [[59, 76, 192], [221, 221, 221], [180, 4, 38]],
        }
    }

    /// Colour for `t` in `[0, 1]`; out-of-range values clamp to the ends.
    pub fn sample(&self, t: f32) -> Color32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let [low, mid, high] = self.stops();
        let (a, b, f) = if t < 0.5 {
            (low, mid, t * 2.0)
        } else {
            (mid, high, (t - 0.5) * 2.0)
        };
        let mix = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * f).round() as u8;
        Color32::from_rgb(mix(0), mix(1), mix(2))
    }
}

/// Linear normalisation of `log10(max(v, COUNT_FLOOR))` between the
/// smallest and largest value of a spectrogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    lo: f64,
    hi: f64,
}

impl LogScale {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (lo, hi) = values
            .iter()
            .filter(|v| v.is_finite())
            .map(|&v| log_count(v))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo.is_finite() && hi.is_finite() {
            Some(Self { lo, hi })
        } else {
            None
        }
    }

    pub fn normalize(&self, value: f64) -> f32 {
        if !value.is_finite() {
            return 0.0;
        }
        let span = self.hi - self.lo;
        if span <= 0.0 {
            return 0.5;
        }
        ((log_count(value) - self.lo) / span) as f32
    }
}

fn log_count(v: f64) -> f64 {
    v.max(COUNT_FLOOR).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_ends_and_middle() {
        assert_eq!(Colormap::Bwr.sample(0.0), Color32::from_rgb(0, 0, 255));
        assert_eq!(Colormap::Bwr.sample(0.5), Color32::WHITE);
        assert_eq!(Colormap::Bwr.sample(2.0), Color32::from_rgb(255, 0, 0));
        assert_eq!(Colormap::Coolwarm.sample(f32::NAN), Color32::from_rgb(59, 76, 192));
    }

    #[test]
    fn log_scale_spans_decades() {
        let scale = LogScale::from_values(&[0.0, 1.0, 1000.0]).unwrap();
        assert_eq!(scale.normalize(1e-5), 0.0);
        assert_eq!(scale.normalize(1000.0), 1.0);
        // Zero and negative counts sit on the floor.
        assert_eq!(scale.normalize(-3.0), 0.0);
        assert!(LogScale::from_values(&[f64::NAN]).is_none());
    }
}
