/// Negative log-likelihood of a Cauchy distribution, up to a constant
///
/// Grows quadratically near zero and only logarithmically for large `x`, so a
/// few badly mismatched channels cannot dominate a match cost.
pub fn neglog_cauchy(x: f64) -> f64 {
    x.mul_add(x, 1.0).ln()
}

/// Cauchy penalty of a byte delta, normalised so that `delta = ±256` costs `scale`
///
/// `sensitivity` must be positive; smaller values saturate sooner and tolerate
/// outliers better.
pub fn normalized_cauchy_cost(delta: i32, sensitivity: f64, scale: f64) -> f64 {
    neglog_cauchy(f64::from(delta) / 256.0 / sensitivity) / neglog_cauchy(1.0 / sensitivity)
        * scale
}
