/// Average Directional Index (ADX) - measures trend strength
///
/// ADX ranges from 0 to 100:
/// - ADX > 25: strong trend (bull or bear)
/// - ADX 20-25: moderate trend
/// - ADX < 20: weak trend / choppy / ranging market
///
/// Full Wilder construction: smoothed TR and directional movement feed the
/// +DI/-DI columns, DX is the normalized DI spread, and ADX is DX smoothed
/// again with the same method. The first ADX lands at position
/// `2 * period - 1`, everything before that is warm-up.
use crate::indicators::atr::true_range;
use crate::models::Candle;

/// ADX series aligned to candle positions, on the 0-100 scale
pub fn adx_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let n = candles.len();
    let mut out = vec![None; n];
    if period == 0 || n < 2 * period {
        return out;
    }

    // True range and directional movement per bar
    let mut true_ranges = Vec::with_capacity(n - 1);
    let mut plus_dms = Vec::with_capacity(n - 1);
    let mut minus_dms = Vec::with_capacity(n - 1);

    for i in 1..n {
        true_ranges.push(true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));

        let up_move = candles[i].high - candles[i - 1].high;
        let down_move = candles[i - 1].low - candles[i].low;

        plus_dms.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dms.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
    }

    // Wilder-smoothed TR and +/-DM produce one DX per position >= period
    let p = period as f64;
    let mut smoothed_tr = true_ranges[..period].iter().sum::<f64>() / p;
    let mut smoothed_plus = plus_dms[..period].iter().sum::<f64>() / p;
    let mut smoothed_minus = minus_dms[..period].iter().sum::<f64>() / p;

    let mut dx_values = Vec::with_capacity(n - period);
    dx_values.push(dx(smoothed_tr, smoothed_plus, smoothed_minus));
    for k in period..true_ranges.len() {
        smoothed_tr = (smoothed_tr * (p - 1.0) + true_ranges[k]) / p;
        smoothed_plus = (smoothed_plus * (p - 1.0) + plus_dms[k]) / p;
        smoothed_minus = (smoothed_minus * (p - 1.0) + minus_dms[k]) / p;
        dx_values.push(dx(smoothed_tr, smoothed_plus, smoothed_minus));
    }

    // dx_values[j] belongs to candle position period + j; the first ADX is
    // the simple average of the first `period` DX values
    let mut adx = dx_values[..period].iter().sum::<f64>() / p;
    out[2 * period - 1] = Some(adx);
    for j in period..dx_values.len() {
        adx = (adx * (p - 1.0) + dx_values[j]) / p;
        out[period + j] = Some(adx);
    }

    out
}

fn dx(smoothed_tr: f64, smoothed_plus_dm: f64, smoothed_minus_dm: f64) -> f64 {
    if smoothed_tr <= 0.0 {
        return 0.0;
    }

    let plus_di = 100.0 * smoothed_plus_dm / smoothed_tr;
    let minus_di = 100.0 * smoothed_minus_dm / smoothed_tr;

    let di_sum = plus_di + minus_di;
    if di_sum > 0.0 {
        100.0 * (plus_di - minus_di).abs() / di_sum
    } else {
        0.0
    }
}
