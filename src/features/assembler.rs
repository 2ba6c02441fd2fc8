//! Manifest-driven feature vector assembly
//!
//! The model package carries the ordered list of column names the classifier
//! was trained on. Assembly looks each manifest entry up by name, so manifest
//! order wins over the engine's computation order. Any hole is a hard error
//! rather than a default-substituted value, which would silently corrupt the
//! classifier's input distribution.

use crate::error::SignalError;
use crate::features::IndicatorRow;

/// Build the classifier input vector for one indicator row
pub fn assemble(row: &IndicatorRow, manifest: &[String]) -> Result<Vec<f64>, SignalError> {
    let mut vector = Vec::with_capacity(manifest.len());
    for name in manifest {
        let value = row
            .column(name)
            .ok_or_else(|| SignalError::MissingFeature(name.clone()))?
            .ok_or_else(|| SignalError::NullFeature(name.clone()))?;
        if !value.is_finite() {
            return Err(SignalError::NullFeature(name.clone()));
        }
        vector.push(value);
    }
    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::IndicatorRow;

    fn manifest(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn full_row() -> IndicatorRow {
        IndicatorRow {
            atr: Some(2.4),
            atr_ma: Some(1.1),
            atr_rel: Some(0.0012),
            adx_real: Some(27.5),
            adx: Some(0.275),
            hour: 9.0,
            ret_1: Some(0.0065),
            ret_3: Some(0.009),
            upper_wick: 0.1,
            lower_wick: 0.25,
        }
    }

    #[test]
    fn test_manifest_order_wins() {
        // Deliberately not the computation order
        let vector = assemble(
            &full_row(),
            &manifest(&["hour", "adx_real", "atr", "lower_wick"]),
        )
        .unwrap();

        assert_eq!(vector, vec![9.0, 27.5, 2.4, 0.25]);
    }

    #[test]
    fn test_typo_in_manifest_is_a_missing_feature() {
        let err = assemble(&full_row(), &manifest(&["atr", "adx_rael"])).unwrap_err();
        match err {
            SignalError::MissingFeature(name) => assert_eq!(name, "adx_rael"),
            other => panic!("expected MissingFeature, got {other:?}"),
        }
    }

    #[test]
    fn test_warm_up_null_is_a_null_feature() {
        let mut row = full_row();
        row.atr_ma = None;

        let err = assemble(&row, &manifest(&["atr", "atr_ma"])).unwrap_err();
        match err {
            SignalError::NullFeature(name) => assert_eq!(name, "atr_ma"),
            other => panic!("expected NullFeature, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_value_is_a_null_feature() {
        let mut row = full_row();
        row.ret_1 = Some(f64::NAN);

        let err = assemble(&row, &manifest(&["ret_1"])).unwrap_err();
        assert!(matches!(err, SignalError::NullFeature(_)));
    }
}
