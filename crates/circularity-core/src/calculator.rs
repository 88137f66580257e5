use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate::FlowTotals;
use crate::product_system::ProductSystem;

const UTILITY_NUMERATOR: f64 = 0.9;
const WASTE_FRACTION: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularityResult {
    pub x: f64,
    pub utility_factor: f64,
    pub linear_flow_index: f64,
    pub circularity_index: f64,
}

/// Derives the circularity indices of a product system.
#[derive(Debug, Clone, Copy)]
pub struct CircularityEngine<'a> {
    system: &'a ProductSystem,
}

impl<'a> CircularityEngine<'a> {
    pub fn new(system: &'a ProductSystem) -> Self {
        Self { system }
    }

    /// Runs the indices in dependency order: LFI, X, F(X), then MCI.
    pub fn compute(&self) -> CircularityResult {
        let totals = self.system.totals();
        let linear_flow_index = linear_flow_index(&totals);
        let x = compute_x(
            self.system.processes().len(),
            self.system.product_lifetime(),
            self.system.product_utility(),
        );
        let utility_factor = utility_factor(x);
        let circularity_index = circularity_index(linear_flow_index, utility_factor);

        if !linear_flow_index.is_finite() {
            warn!(
                linear_flow_index,
                mass = totals.mass(),
                "Linear flow index is not finite"
            );
        }
        debug!(
            x,
            utility_factor,
            linear_flow_index,
            circularity_index,
            "Computed circularity indices"
        );

        CircularityResult {
            x,
            utility_factor,
            linear_flow_index,
            circularity_index,
        }
    }
}

/// X = (L / Lavg) * (U / Uavg), with Lavg = L / N and Uavg = U / N.
///
/// Degenerate inputs (no processes, zero averages) give 0.
pub fn compute_x(process_count: usize, product_lifetime: i32, product_utility: i32) -> f64 {
    let lifetime = f64::from(product_lifetime);
    let utility = f64::from(product_utility);
    let (lifetime_avg, utility_avg) = if process_count > 0 {
        let n = process_count as f64;
        (lifetime / n, utility / n)
    } else {
        (0.0, 0.0)
    };

    if lifetime_avg == 0.0 || utility_avg == 0.0 {
        0.0
    } else {
        (lifetime / lifetime_avg) * (utility / utility_avg)
    }
}

pub fn utility_factor(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        UTILITY_NUMERATOR / x
    }
}

/// LFI = (2V - Rr) / (2M + (Wf - Wc) / 2). A zero denominator yields an
/// infinite or NaN index rather than an error.
pub fn linear_flow_index(totals: &FlowTotals) -> f64 {
    let virgin = totals.virgin_material;
    let recovered = totals.recovered_recycled_material;
    let mass = totals.mass();
    let waste_feedstock = virgin * WASTE_FRACTION;
    let waste_collection = totals.recycled_material * WASTE_FRACTION;

    (2.0 * virgin - recovered) / (2.0 * mass + ((waste_feedstock - waste_collection) / 2.0))
}

pub fn circularity_index(linear_flow_index: f64, utility_factor: f64) -> f64 {
    1.0 - (linear_flow_index * utility_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_is_zero_without_processes() {
        assert_eq!(compute_x(0, 100, 100), 0.0);
        assert_eq!(utility_factor(compute_x(0, 100, 100)), 0.0);
    }

    #[test]
    fn x_is_zero_when_lifetime_or_utility_is_zero() {
        assert_eq!(compute_x(3, 0, 100), 0.0);
        assert_eq!(compute_x(3, 100, 0), 0.0);
    }

    #[test]
    fn x_follows_the_literal_formula() {
        assert!((compute_x(3, 100, 100) - 9.0).abs() < 1e-12);
        assert_eq!(compute_x(1, 7, 2), 1.0);
        assert!((compute_x(4, 5, 10) - 16.0).abs() < 1e-12);
        // Negative parameters keep the same shape: L / (L / N) == N.
        assert!((compute_x(2, -4, 6) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn utility_factor_divides_point_nine() {
        assert!((utility_factor(9.0) - 0.1).abs() < 1e-15);
        assert_eq!(utility_factor(0.0), 0.0);
    }

    #[test]
    fn linear_flow_index_of_empty_totals_is_nan() {
        let lfi = linear_flow_index(&FlowTotals::default());
        assert!(lfi.is_nan());
        assert!(circularity_index(lfi, 0.1).is_nan());
    }

    #[test]
    fn linear_flow_index_of_fully_virgin_system() {
        let totals = FlowTotals {
            virgin_material: 100.0,
            ..FlowTotals::default()
        };
        // (200) / (200 + 2.5)
        assert!((linear_flow_index(&totals) - 200.0 / 202.5).abs() < 1e-12);
    }
}
