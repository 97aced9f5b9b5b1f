use std::f64::consts::E;

/// The logistic activation used by every hidden and output unit.
pub struct Sigmoid;

impl Sigmoid {
    /// `f(x) = 1 / (1 + e^-x)`
    pub fn function(x: f64) -> f64 {
        1.0 / (1.0 + E.powf(-x))
    }

    /// Slope of the sigmoid expressed through its own output:
    /// `f'(x) = f(x) * (1 - f(x))`.
    ///
    /// The walkthrough stores `out_*` values, never re-derives them from
    /// `net_*`, so this is the form every backward step uses.
    pub fn derivative_from_output(out: f64) -> f64 {
        out * (1.0 - out)
    }
}
