/// Simple moving average over a series that may carry warm-up nulls
///
/// Position `i` is defined only when all `period` inputs ending at `i` are
/// defined, so upstream nulls propagate instead of silently shrinking the
/// window.
pub fn sma_series(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    for i in (period - 1)..values.len() {
        let window = &values[i + 1 - period..=i];
        if window.iter().all(Option::is_some) {
            let sum: f64 = window.iter().flatten().sum();
            out[i] = Some(sum / period as f64);
        }
    }

    out
}
