//! Historical candle store
//!
//! The history file is loaded once at startup and treated as read-only for
//! the process lifetime. Requests extend it transiently: `append_to_window`
//! hands back a fresh owned series, so concurrent evaluations never share
//! mutable state and nothing is ever written back.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::SignalError;
use crate::models::Candle;

const REQUIRED_COLUMNS: [&str; 4] = ["open", "high", "low", "close"];

#[derive(Debug)]
pub struct CandleHistory {
    candles: Vec<Candle>,
}

impl CandleHistory {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    /// Load a CSV export, tolerating `<OPEN>`-style broker headers
    pub fn load(path: &Path) -> Result<Self, SignalError> {
        let file = File::open(path).map_err(|e| SignalError::HistoryLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let history = Self::from_reader(file).map_err(|reason| SignalError::HistoryLoad {
            path: path.display().to_string(),
            reason,
        })?;

        tracing::info!(
            "Loaded {} historical candles from {}",
            history.len(),
            path.display()
        );
        Ok(history)
    }

    /// Parse candles from any CSV source
    ///
    /// Headers are normalized (angle brackets stripped, lowercased, trimmed)
    /// before the required OHLC columns are located; extra columns such as
    /// dates or volume are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, String> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader.headers().map_err(|e| e.to_string())?.clone();
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

        let mut column_index = [0usize; 4];
        for (slot, name) in column_index.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = normalized
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| format!("missing required column '{name}'"))?;
        }

        let mut candles = Vec::new();
        for (row, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| e.to_string())?;

            let mut fields = [0.0f64; 4];
            for (value, &idx) in fields.iter_mut().zip(&column_index) {
                let raw = record
                    .get(idx)
                    .ok_or_else(|| format!("row {}: too few columns", row + 1))?;
                *value = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("row {}: '{raw}' is not a number", row + 1))?;
                if !value.is_finite() {
                    return Err(format!("row {}: non-finite price '{raw}'", row + 1));
                }
            }

            candles.push(Candle::new(fields[0], fields[1], fields[2], fields[3]));
        }

        Ok(Self::new(candles))
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Trailing window of the last `n` stored candles
    pub fn window(&self, n: usize) -> Result<&[Candle], SignalError> {
        if self.candles.len() < n {
            return Err(SignalError::InsufficientHistory {
                have: self.candles.len(),
                need: n,
            });
        }
        Ok(&self.candles[self.candles.len() - n..])
    }

    /// Last `n` stored candles plus one transient new candle
    ///
    /// Returns an owned series; the stored history is never touched.
    pub fn append_to_window(&self, n: usize, candle: Candle) -> Result<Vec<Candle>, SignalError> {
        let mut series = self.window(n)?.to_vec();
        series.push(candle);
        Ok(series)
    }
}

/// `<CLOSE>`, `Close ` and `close` all map to `close`
fn normalize_header(raw: &str) -> String {
    raw.replace(['<', '>'], "").trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MT5_CSV: &str = "\
<DATE>,<TIME>,<OPEN>,<HIGH>,<LOW>,<CLOSE>,<TICKVOL>
2024.01.02,00:00:00,2062.91,2072.50,2061.32,2071.48,48752
2024.01.02,04:00:00,2071.48,2079.16,2068.30,2077.22,51209
";

    #[test]
    fn test_normalize_header_variants() {
        assert_eq!(normalize_header("<CLOSE>"), "close");
        assert_eq!(normalize_header("  Open "), "open");
        assert_eq!(normalize_header("low"), "low");
    }

    #[test]
    fn test_loads_mt5_export() {
        let history = CandleHistory::from_reader(MT5_CSV.as_bytes()).unwrap();

        assert_eq!(history.len(), 2);
        let window = history.window(2).unwrap();
        assert_eq!(window[0].open, 2062.91);
        assert_eq!(window[1].close, 2077.22);
    }

    #[test]
    fn test_missing_column_is_reported_by_name() {
        let csv = "open,high,low\n1.0,2.0,0.5\n";
        let err = CandleHistory::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.contains("'close'"));
    }

    #[test]
    fn test_unparseable_cell_is_rejected() {
        let csv = "open,high,low,close\n1.0,2.0,0.5,oops\n";
        assert!(CandleHistory::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_nan_cell_is_rejected() {
        let csv = "open,high,low,close\n1.0,2.0,0.5,NaN\n";
        let err = CandleHistory::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.contains("non-finite"));
    }

    #[test]
    fn test_window_needs_enough_candles() {
        let history = CandleHistory::new(vec![Candle::new(1.0, 2.0, 0.5, 1.5); 3]);
        let err = history.window(5).unwrap_err();
        assert!(matches!(
            err,
            SignalError::InsufficientHistory { have: 3, need: 5 }
        ));
    }

    #[test]
    fn test_append_copies_instead_of_mutating() {
        let history = CandleHistory::new(vec![Candle::new(1.0, 2.0, 0.5, 1.5); 3]);
        let extended = history
            .append_to_window(3, Candle::new(1.5, 2.5, 1.0, 2.0))
            .unwrap();

        assert_eq!(extended.len(), 4);
        assert_eq!(history.len(), 3);
        assert_eq!(extended[3].close, 2.0);
    }
}
