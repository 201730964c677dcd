/// Largest-Triangle-Three-Buckets downsampling of one trace.
/// Returns the indices to keep, first and last always included.
pub fn lttb_indices(x: &[f64], y: &[f64], target: usize) -> Vec<usize> {
    let n = x.len().min(y.len());
    if n <= target || target < 3 {
        return (0..n).collect();
    }

    let mut keep = Vec::with_capacity(target);
    keep.push(0);

    let bucket_size = (n - 2) as f64 / (target - 2) as f64;
    let mut prev = 0usize;

    for bucket in 0..(target - 2) {
        let start = (bucket as f64 * bucket_size) as usize + 1;
        let end = (((bucket + 1) as f64 * bucket_size) as usize + 1).min(n - 1);

        // Average of the following bucket is the third triangle corner.
        let next_start = end;
        let next_end = (((bucket + 2) as f64 * bucket_size) as usize + 1).min(n);
        let span = (next_start..next_end).len().max(1) as f64;
        let (avg_x, avg_y) = (next_start..next_end)
            .fold((0.0, 0.0), |(sx, sy), j| (sx + x[j], sy + y[j]));
        let (avg_x, avg_y) = (avg_x / span, avg_y / span);

        let (px, py) = (x[prev], y[prev]);
        let mut best = start;
        let mut best_area = -1.0f64;
        for j in start..end {
            let area = ((px - avg_x) * (y[j] - py) - (px - x[j]) * (avg_y - py)).abs();
            if area > best_area {
                best_area = area;
                best = j;
            }
        }
        keep.push(best);
        prev = best;
    }

    keep.push(n - 1);
    keep
}

/// Gather the kept samples of several traces sharing one time axis.
pub fn select(values: &[f64], indices: &[usize]) -> Vec<f64> {
    indices.iter().filter_map(|&i| values.get(i).copied()).collect()
}

/// Column ranges that merge adjacent heatmap columns so that at most
/// `max_buckets` remain. Each range is `start..end` into the time axis.
pub fn column_buckets(cols: usize, max_buckets: usize) -> Vec<std::ops::Range<usize>> {
    if cols == 0 || max_buckets == 0 {
        return Vec::new();
    }
    if cols <= max_buckets {
        return (0..cols).map(|c| c..c + 1).collect();
    }
    let step = cols as f64 / max_buckets as f64;
    (0..max_buckets)
        .map(|b| {
            let start = (b as f64 * step) as usize;
            let end = (((b + 1) as f64 * step) as usize).min(cols);
            start..end.max(start + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_traces_are_untouched() {
        let x = [0.0, 1.0, 2.0];
        assert_eq!(lttb_indices(&x, &x, 10), vec![0, 1, 2]);
    }

    #[test]
    fn lttb_keeps_endpoints_and_target_size() {
        let x: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| (v / 30.0).sin()).collect();
        let keep = lttb_indices(&x, &y, 100);
        assert_eq!(keep.len(), 100);
        assert_eq!(keep[0], 0);
        assert_eq!(*keep.last().unwrap(), 999);
        assert!(keep.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn lttb_picks_the_spike() {
        let x: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let mut y = vec![0.0; 50];
        y[25] = 40.0;
        let keep = lttb_indices(&x, &y, 5);
        assert!(keep.contains(&25));
    }

    #[test]
    fn buckets_cover_every_column_once() {
        let buckets = column_buckets(1000, 300);
        assert_eq!(buckets.len(), 300);
        assert_eq!(buckets[0].start, 0);
        assert_eq!(buckets.last().unwrap().end, 1000);
        assert!(buckets.windows(2).all(|w| w[0].end == w[1].start));
        assert_eq!(column_buckets(4, 10).len(), 4);
        assert!(column_buckets(0, 10).is_empty());
    }
}
