/// Average True Range (ATR) indicator
///
/// Measures market volatility as the smoothed average of true ranges.
/// True Range is the greatest of:
/// - Current High - Current Low
/// - Abs(Current High - Previous Close)
/// - Abs(Current Low - Previous Close)
///
/// Uses Wilder's smoothing (same family as ADX): the first value is the
/// simple average of the first `period` true ranges, every later value folds
/// one new true range into the running average.
use crate::models::Candle;

/// True range of a bar given the previous close
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// ATR series aligned to candle positions
///
/// Position `i` carries the ATR of the window ending at `i`, or None while
/// the warm-up is incomplete (the first `period` positions have no value).
pub fn atr_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    if period == 0 || candles.len() < period + 1 {
        return out;
    }

    let true_ranges: Vec<f64> = (1..candles.len())
        .map(|i| true_range(candles[i].high, candles[i].low, candles[i - 1].close))
        .collect();

    // First ATR is the simple average of the first `period` true ranges
    let mut atr = true_ranges.iter().take(period).sum::<f64>() / period as f64;
    out[period] = Some(atr);

    for i in period + 1..candles.len() {
        atr = (atr * (period as f64 - 1.0) + true_ranges[i - 1]) / period as f64;
        out[i] = Some(atr);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(prices: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
        prices
            .iter()
            .map(|&(open, high, low, close)| Candle::new(open, high, low, close))
            .collect()
    }

    #[test]
    fn test_true_range_picks_largest_leg() {
        // Plain range dominates
        assert_eq!(true_range(105.0, 95.0, 100.0), 10.0);
        // Gap up: distance to previous close dominates
        assert_eq!(true_range(110.0, 105.0, 100.0), 10.0);
        // Gap down
        assert_eq!(true_range(95.0, 90.0, 100.0), 10.0);
    }

    #[test]
    fn test_warm_up_positions_are_null() {
        let fixture = candles(&[(100.0, 101.0, 99.0, 100.0); 20]);
        let atr = atr_series(&fixture, 14);

        assert_eq!(atr.len(), 20);
        assert!(atr[..14].iter().all(Option::is_none));
        assert!(atr[14..].iter().all(Option::is_some));
    }

    #[test]
    fn test_constant_range_market_holds_the_range() {
        // Every bar spans exactly 10, closes at the midpoint
        let fixture = candles(&[(100.0, 105.0, 95.0, 100.0); 20]);
        let atr = atr_series(&fixture, 14);

        for value in atr.iter().flatten() {
            assert!((value - 10.0).abs() / 10.0 < 1e-9);
        }
    }

    #[test]
    fn test_matches_reference_wilder_values() {
        // Hand-derived with period 3:
        // TRs are 3, 4, 4, 4, so ATR[3] = 11/3 and ATR[4] = (11/3 * 2 + 4) / 3
        let fixture = candles(&[
            (10.0, 12.0, 9.0, 11.0),
            (11.0, 13.0, 10.0, 12.0),
            (12.0, 15.0, 11.0, 14.0),
            (14.0, 16.0, 12.0, 13.0),
            (13.0, 14.0, 10.0, 11.0),
        ]);
        let atr = atr_series(&fixture, 3);

        assert!(atr[..3].iter().all(Option::is_none));
        let third = atr[3].unwrap();
        let fourth = atr[4].unwrap();
        assert!((third - 11.0 / 3.0).abs() / (11.0 / 3.0) < 1e-9);
        assert!((fourth - 34.0 / 9.0).abs() / (34.0 / 9.0) < 1e-9);
    }

    #[test]
    fn test_insufficient_data_is_all_null() {
        let fixture = candles(&[(100.0, 101.0, 99.0, 100.0); 5]);
        let atr = atr_series(&fixture, 14);
        assert!(atr.iter().all(Option::is_none));
    }
}
