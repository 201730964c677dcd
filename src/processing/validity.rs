use crate::data::instrument::{Instrument, InstrumentSeries, OrbitBundle, SeriesData};

/// Which panels of an orbit can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Validity {
    pub ima: bool,
    pub els: bool,
    pub mag: bool,
}

impl Validity {
    pub fn get(&self, instrument: Instrument) -> bool {
        match instrument {
            Instrument::Ima => self.ima,
            Instrument::Els => self.els,
            Instrument::Mag => self.mag,
        }
    }

    pub fn any(&self) -> bool {
        self.ima || self.els || self.mag
    }

    pub fn count(&self) -> usize {
        [self.ima, self.els, self.mag].iter().filter(|v| **v).count()
    }
}

pub fn check_validity(bundle: &OrbitBundle) -> Validity {
    Validity {
        ima: bundle.ima.as_ref().is_some_and(ima_is_valid),
        els: bundle.els.as_ref().is_some_and(els_is_valid),
        mag: bundle.mag.as_ref().is_some_and(mag_is_valid),
    }
}

fn ima_is_valid(series: &InstrumentSeries) -> bool {
    if series.timestamps.is_empty() {
        return false;
    }
    match &series.data {
        // A row count equal to the element count means the "2-D" array is
        // really a single column.
        SeriesData::Spectrogram(spec) => {
            !spec.is_empty()
                && spec.rows != spec.values.len()
                && shape_matches(spec.rows, spec.cols, spec.values.len())
        }
        SeriesData::Vector(_) => false,
    }
}

fn els_is_valid(series: &InstrumentSeries) -> bool {
    if series.timestamps.is_empty() {
        return false;
    }
    match &series.data {
        SeriesData::Spectrogram(spec) => {
            !spec.is_empty() && shape_matches(spec.rows, spec.cols, spec.values.len())
        }
        SeriesData::Vector(_) => false,
    }
}

fn mag_is_valid(series: &InstrumentSeries) -> bool {
    if series.timestamps.is_empty() {
        return false;
    }
    match &series.data {
        SeriesData::Vector(field) => {
            !field.is_empty() && field.axes().iter().any(|axis| has_signal(axis))
        }
        SeriesData::Spectrogram(_) => false,
    }
}

fn shape_matches(rows: usize, cols: usize, len: usize) -> bool {
    rows.checked_mul(cols) == Some(len)
}

/// A channel carries signal when some sample is finite and non-zero.
fn has_signal(samples: &[f64]) -> bool {
    samples.iter().any(|v| v.is_finite() && *v != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::instrument::{Spectrogram, VectorSeries};

    fn times(n: usize) -> Vec<f64> {
        (0..n).map(|i| 1_145_836_800.0 + i as f64 * 4.0).collect()
    }

    fn spectrogram(rows: usize, cols: usize) -> InstrumentSeries {
        InstrumentSeries::spectrogram(times(cols), Spectrogram::new(rows, cols, vec![1.0; rows * cols]))
    }

    fn field(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> InstrumentSeries {
        InstrumentSeries::vector(times(x.len()), VectorSeries { x, y, z })
    }

    #[test]
    fn all_zero_field_has_no_signal() {
        let bundle = OrbitBundle::default().with(Instrument::Mag, field(vec![0.0; 10], vec![0.0; 10], vec![0.0; 10]));
        assert!(!check_validity(&bundle).mag);

        let mut x = vec![0.0; 10];
        x[6] = -3.2;
        let bundle = OrbitBundle::default().with(Instrument::Mag, field(x, vec![0.0; 10], vec![0.0; 10]));
        assert!(check_validity(&bundle).mag);
    }

    #[test]
    fn single_column_ion_data_is_rejected() {
        // Ten samples reported as ten rows of one column: flattened count == row count.
        let degenerate = InstrumentSeries::spectrogram(times(1), Spectrogram::new(10, 1, vec![2.0; 10]));
        let bundle = OrbitBundle::default().with(Instrument::Ima, degenerate.clone());
        assert!(!check_validity(&bundle).ima);

        // The same shape is acceptable for the electron spectrometer.
        let bundle = OrbitBundle::default().with(Instrument::Els, degenerate);
        assert!(check_validity(&bundle).els);

        let bundle = OrbitBundle::default().with(Instrument::Ima, spectrogram(96, 20));
        assert!(check_validity(&bundle).ima);
    }

    #[test]
    fn empty_data_or_timestamps_are_invalid() {
        let mut no_times = spectrogram(128, 5);
        no_times.timestamps.clear();
        let no_samples = InstrumentSeries::spectrogram(times(5), Spectrogram::default());
        let bundle = OrbitBundle::default()
            .with(Instrument::Ima, no_samples)
            .with(Instrument::Els, no_times)
            .with(Instrument::Mag, field(Vec::new(), Vec::new(), Vec::new()));
        let validity = check_validity(&bundle);
        assert_eq!(validity, Validity::default());
        assert!(!validity.any());
    }

    #[test]
    fn mismatched_kind_or_shape_is_invalid() {
        let bundle = OrbitBundle::default()
            .with(Instrument::Ima, field(vec![1.0], vec![1.0], vec![1.0]))
            .with(Instrument::Els, InstrumentSeries::spectrogram(times(3), Spectrogram::new(4, 3, vec![1.0; 7])))
            .with(Instrument::Mag, spectrogram(3, 3));
        assert_eq!(check_validity(&bundle), Validity::default());
    }

    #[test]
    fn instruments_are_judged_independently() {
        let bundle = OrbitBundle::default()
            .with(Instrument::Els, spectrogram(128, 8))
            .with(Instrument::Mag, field(vec![1.0; 4], vec![0.0; 4], vec![0.0; 4]));
        let validity = check_validity(&bundle);
        assert!(!validity.ima);
        assert!(validity.els);
        assert!(validity.mag);
        assert_eq!(validity.count(), 2);
    }
}
