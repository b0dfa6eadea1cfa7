//! Grid evaluation of the pricing engine.
//!
//! Every cell `(x, y)` is priced with `spot = x_axis[x]`, `volatility =
//! y_axis[y]` and the remaining inputs taken from the base scenario. Cells
//! are independent; a failing cell aborts the whole surface with
//! [`PricingError::CellFailure`] carrying its indices.

use super::metric::{MetricSet, PurchaseCosts, SurfaceMetric};
use super::types::{AxisMetric, Surface, SurfaceAxis};
use crate::pricing::black_scholes::BlackScholes;
use crate::pricing::error::PricingError;
use crate::pricing::types::{ModelInputs, OptionType, PricingResult, require_positive};
use tracing::{debug, trace};

fn check_inputs(
    base: &ModelInputs,
    x_axis: &SurfaceAxis,
    y_axis: &SurfaceAxis,
) -> Result<(), PricingError> {
    require_positive("strike", base.strike)?;
    require_positive("time_to_expiry", base.time_to_expiry)?;
    if !base.risk_free_rate.is_finite() {
        return Err(PricingError::invalid_input(
            "risk_free_rate",
            base.risk_free_rate,
        ));
    }

    if x_axis.metric() != AxisMetric::SpotPrice {
        return Err(PricingError::InvalidAxis {
            message: format!("x axis must vary SpotPrice, got {:?}", x_axis.metric()),
        });
    }
    if y_axis.metric() != AxisMetric::Volatility {
        return Err(PricingError::InvalidAxis {
            message: format!("y axis must vary Volatility, got {:?}", y_axis.metric()),
        });
    }
    x_axis.validate()?;
    y_axis.validate()
}

/// Prices one volatility row across the spot axis.
fn price_row(
    base: &ModelInputs,
    x_axis: &SurfaceAxis,
    y_index: usize,
    volatility: f64,
) -> Result<Vec<PricingResult>, PricingError> {
    x_axis
        .values()
        .iter()
        .enumerate()
        .map(|(x_index, &spot)| {
            let inputs = base.with_spot(spot).with_volatility(volatility);
            BlackScholes::price(&inputs).map_err(|source| {
                trace!("cell [{}][{}] failed: {}", y_index, x_index, source);
                PricingError::CellFailure {
                    x_index,
                    y_index,
                    source: Box::new(source),
                }
            })
        })
        .collect()
}

/// Prices every cell of the grid, row by row along the volatility axis.
///
/// # Errors
/// Invalid base inputs or axes, or [`PricingError::CellFailure`] for the
/// first cell that fails.
pub(crate) fn price_grid(
    base: &ModelInputs,
    x_axis: &SurfaceAxis,
    y_axis: &SurfaceAxis,
) -> Result<Vec<Vec<PricingResult>>, PricingError> {
    check_inputs(base, x_axis, y_axis)?;
    let grid = y_axis
        .values()
        .iter()
        .enumerate()
        .map(|(y_index, &volatility)| price_row(base, x_axis, y_index, volatility))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("priced {}x{} grid", y_axis.len(), x_axis.len());
    Ok(grid)
}

/// Turns priced rows into one surface per metric.
pub(crate) fn assemble(
    x_axis: &SurfaceAxis,
    y_axis: &SurfaceAxis,
    grid: &[Vec<PricingResult>],
    metrics: &[SurfaceMetric],
    costs: &PurchaseCosts,
    option_type: OptionType,
) -> Result<Vec<Surface>, PricingError> {
    metrics
        .iter()
        .map(|metric| {
            let cells = grid
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|result| metric.extract(result, costs, option_type))
                        .collect()
                })
                .collect();
            Surface::new(x_axis.clone(), y_axis.clone(), cells, *metric)
        })
        .collect()
}

/// Generates a single metric surface.
///
/// For P&L metrics `purchase_cost` is subtracted from the matching premium;
/// `option_type` selects the leg for delta, theta and rho.
///
/// # Errors
/// - [`PricingError::InvalidInput`] for an invalid strike, time, rate or cost.
/// - [`PricingError::InvalidAxis`] for swapped or malformed axes.
/// - [`PricingError::CellFailure`] if any cell fails to price.
///
/// # Example
/// ```
/// use pnl_surface_rs::prelude::*;
///
/// let base = ModelInputs::new(100.0, 100.0, 0.25, 0.2, 0.05).unwrap();
/// let x = SurfaceAxis::spot(vec![90.0, 100.0, 110.0]).unwrap();
/// let y = SurfaceAxis::volatility(vec![0.15, 0.25]).unwrap();
/// let surface =
///     generate_surface(&base, &x, &y, SurfaceMetric::CallPL, 4.0, OptionType::Call).unwrap();
/// assert_eq!(surface.dimensions(), (2, 3));
/// ```
pub fn generate_surface(
    base: &ModelInputs,
    x_axis: &SurfaceAxis,
    y_axis: &SurfaceAxis,
    metric: SurfaceMetric,
    purchase_cost: f64,
    option_type: OptionType,
) -> Result<Surface, PricingError> {
    let costs = PurchaseCosts::new(purchase_cost, purchase_cost);
    let mut surfaces = generate_surfaces(base, x_axis, y_axis, metric.into(), costs, option_type)?;
    surfaces.pop().ok_or_else(|| PricingError::InvalidOperation {
        message: format!("no surface produced for {}", metric.name()),
    })
}

/// Generates one surface per selected metric, pricing each cell once.
///
/// Surfaces are returned in [`SurfaceMetric::ALL`] order.
///
/// # Errors
/// Same as [`generate_surface`].
pub fn generate_surfaces(
    base: &ModelInputs,
    x_axis: &SurfaceAxis,
    y_axis: &SurfaceAxis,
    metrics: MetricSet,
    costs: PurchaseCosts,
    option_type: OptionType,
) -> Result<Vec<Surface>, PricingError> {
    costs.validate()?;
    let grid = price_grid(base, x_axis, y_axis)?;
    assemble(x_axis, y_axis, &grid, &metrics.metrics(), &costs, option_type)
}

/// Parallel variant of [`generate_surfaces`], one rayon task per volatility row.
///
/// Produces the same surfaces as the sequential version. When several cells
/// fail, which one is reported is unspecified.
///
/// # Errors
/// Same as [`generate_surface`].
#[cfg(feature = "parallel")]
pub fn generate_surfaces_par(
    base: &ModelInputs,
    x_axis: &SurfaceAxis,
    y_axis: &SurfaceAxis,
    metrics: MetricSet,
    costs: PurchaseCosts,
    option_type: OptionType,
) -> Result<Vec<Surface>, PricingError> {
    use rayon::prelude::*;

    check_inputs(base, x_axis, y_axis)?;
    costs.validate()?;

    let grid = y_axis
        .values()
        .par_iter()
        .enumerate()
        .map(|(y_index, &volatility)| price_row(base, x_axis, y_index, volatility))
        .collect::<Result<Vec<_>, _>>()?;

    let selected = metrics.metrics();
    debug!(
        "generated {}x{} grid for {} metric(s) on {} threads",
        y_axis.len(),
        x_axis.len(),
        selected.len(),
        rayon::current_num_threads()
    );
    assemble(x_axis, y_axis, &grid, &selected, &costs, option_type)
}
