//! Scan size and cost estimate.
//!
//! A flat model: the remote store publishes no statistics, so the estimate
//! only scales the host's row count by predicate selectivity and charges a
//! fixed startup plus a per-row transfer cost.

use scylla_fdw_config::CostConfig;

/// Largest row estimate handed to the planner.
const MAX_ROW_ESTIMATE: f64 = 1e100;

/// Cost of evaluating local predicates, as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QualCost {
    pub startup: f64,
    pub per_tuple: f64,
}

/// What the planner knows about a scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostInput {
    /// Row count from host statistics; zero or negative means unknown.
    pub table_rows: f64,
    /// Combined selectivity of pushed predicates, `None` when there are none.
    pub remote_selectivity: Option<f64>,
    /// Combined selectivity of local predicates, `None` when there are none.
    pub local_selectivity: Option<f64>,
    pub local_qual_cost: QualCost,
    /// Average row width in bytes; zero means unknown.
    pub width: u32,
    /// The host wants sorted output, which the wrapper never provides.
    pub sorted: bool,
}

/// Result handed back to the planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEstimate {
    pub rows: f64,
    pub width: u32,
    pub startup_cost: f64,
    pub total_cost: f64,
}

/// Rounds a row estimate, keeping it in `1..=1e100`.
pub fn clamp_row_est(rows: f64) -> f64 {
    if rows.is_nan() || rows > MAX_ROW_ESTIMATE {
        MAX_ROW_ESTIMATE
    } else if rows <= 1.0 {
        1.0
    } else {
        rows.round()
    }
}

/// Estimates rows and cost for a scan.
pub fn estimate(input: &CostInput, config: &CostConfig) -> CostEstimate {
    let base_rows = if input.table_rows > 0.0 {
        input.table_rows
    } else {
        config.default_rows
    };

    // Rows fetched from the remote store.
    let fetched = match input.remote_selectivity {
        Some(sel) => clamp_row_est(base_rows * sel),
        None => base_rows,
    };
    // Rows left after local filtering.
    let rows = match input.local_selectivity {
        Some(sel) => clamp_row_est(fetched * sel),
        None => fetched,
    };

    let width = if input.width > 0 {
        input.width
    } else {
        config.default_width
    };

    let mut startup_cost = config.startup_cost;
    let mut cpu_per_tuple = config.cpu_tuple_cost + config.fdw_tuple_cost;
    if input.local_selectivity.is_some() {
        cpu_per_tuple += input.local_qual_cost.per_tuple;
        startup_cost += input.local_qual_cost.startup;
    }

    let mut total_cost = startup_cost + cpu_per_tuple * fetched;
    if fetched > rows {
        total_cost += (fetched - rows) * config.cpu_tuple_cost * 0.5;
    }

    if input.sorted && rows > 1.0 {
        let sort_cost = rows * rows.log2() * config.cpu_operator_cost;
        startup_cost += sort_cost;
        total_cost += sort_cost;
    }

    CostEstimate {
        rows,
        width,
        startup_cost,
        total_cost,
    }
}
