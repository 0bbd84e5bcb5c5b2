//! Scan and modify planning.
//!
//! Planning happens once per statement, before any remote call. The plans
//! are plain values the host stores in its plan tree and hands back to
//! [`ScanSession`](crate::ScanSession) or [`ModifySession`](crate::ModifySession).

use scylla_fdw_config::{ConsistencyLevel, CostConfig, FdwOptions};
use scylla_fdw_query::{
    Classifier, CostEstimate, CostInput, Expr, KeyDescriptor, Operation, OperatorCatalog,
    QualCost, RemoteQuery, RequiredColumns, StatementBuilder, estimate,
};
use scylla_fdw_types::{AttrNumber, TableDef};
use tracing::{debug, warn};

use crate::error::Result;

// ============================================================================
// Scan
// ============================================================================

/// What the host asks of a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    /// Restriction predicates, implicitly ANDed.
    pub conditions: Vec<Expr>,
    /// Columns needed by the target list.
    pub required: RequiredColumns,
}

/// Host statistics used for the cost estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RelationStats {
    /// Row count, zero if unknown.
    pub rows: f64,
    /// Average row width, zero if unknown.
    pub width: u32,
    /// Cost of evaluating the local predicates.
    pub local_qual_cost: QualCost,
    /// Sorted output requested.
    pub sorted: bool,
}

/// Planned scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPlan {
    pub query: RemoteQuery,
    /// Predicates rendered into the query.
    pub remote_conditions: Vec<Expr>,
    /// Predicates the host evaluates on fetched rows.
    pub local_conditions: Vec<Expr>,
    pub consistency: ConsistencyLevel,
}

impl ScanPlan {
    /// Sizes the scan. `selectivity` is the host's estimate for a list of
    /// predicates; it is called once per non-empty predicate list.
    pub fn estimate(
        &self,
        stats: &RelationStats,
        selectivity: impl Fn(&[Expr]) -> f64,
        config: &CostConfig,
    ) -> CostEstimate {
        let input = CostInput {
            table_rows: stats.rows,
            remote_selectivity: (!self.remote_conditions.is_empty())
                .then(|| selectivity(&self.remote_conditions)),
            local_selectivity: (!self.local_conditions.is_empty())
                .then(|| selectivity(&self.local_conditions)),
            local_qual_cost: stats.local_qual_cost,
            width: stats.width,
            sorted: stats.sorted,
        };
        estimate(&input, config)
    }

    /// EXPLAIN properties.
    pub fn explain(&self) -> Vec<String> {
        vec![
            format!("CQL: {}", self.query.text),
            format!(
                "Allow Filtering: {}",
                if self.query.allow_filtering { "yes" } else { "no" }
            ),
        ]
    }
}

/// Plans a scan of `table`.
///
/// Predicates are split into remote and local ones; columns referenced by
/// local predicates are added to the projection so the host can evaluate
/// them. A key option naming an unknown column is logged and ignored, which
/// makes the scan fall back to ALLOW FILTERING.
pub fn plan_scan(
    table: &TableDef,
    options: &FdwOptions,
    request: ScanRequest,
    catalog: &dyn OperatorCatalog,
) -> Result<ScanPlan> {
    let keyspace = options.table.keyspace()?;
    let remote_table = options.table.table()?;

    let (remote, local) = Classifier::new(table.relation, catalog).partition(request.conditions);
    let required = with_local_columns(request.required, &local, table);

    let key = KeyDescriptor::resolve(
        options.table.primary_key.as_deref(),
        options.table.clustering_key.as_deref(),
        table,
    )
    .unwrap_or_else(|err| {
        warn!(table = %table.name, error = %err, "ignoring key options for scan");
        KeyDescriptor::unconfigured()
    });

    let query = StatementBuilder::new(table, keyspace, remote_table, catalog)
        .select(&required, &remote, &key)?;

    debug!(
        table = %table.name,
        query = %query.text,
        remote = remote.len(),
        local = local.len(),
        "planned scan"
    );
    Ok(ScanPlan {
        query,
        remote_conditions: remote,
        local_conditions: local,
        consistency: options.server.consistency,
    })
}

fn with_local_columns(required: RequiredColumns, local: &[Expr], table: &TableDef) -> RequiredColumns {
    let RequiredColumns::Only(mut set) = required else {
        return RequiredColumns::All;
    };
    let mut whole_row = false;
    for cond in local {
        cond.visit_columns(&mut |relation, attnum| {
            if relation != table.relation {
                return;
            }
            match attnum {
                0 => whole_row = true,
                n if n > 0 => {
                    set.insert(n);
                }
                _ => {}
            }
        });
    }
    if whole_row {
        RequiredColumns::All
    } else {
        RequiredColumns::Only(set)
    }
}

// ============================================================================
// Modify
// ============================================================================

/// Planned INSERT, UPDATE or DELETE.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifyPlan {
    pub query: RemoteQuery,
    pub consistency: ConsistencyLevel,
}

impl ModifyPlan {
    pub fn operation(&self) -> Operation {
        self.query.operation
    }

    /// Attributes bound to the placeholders, in order.
    pub fn bind_attrs(&self) -> &[AttrNumber] {
        &self.query.attrs
    }

    /// EXPLAIN properties.
    pub fn explain(&self) -> Vec<String> {
        vec![format!("CQL: {}", self.query.text)]
    }
}

/// Plans a modification of `table`.
///
/// INSERT writes every live column. UPDATE writes `targets`, or every live
/// column when `targets` is empty, minus the key columns. DELETE ignores
/// `targets`. UPDATE and DELETE need a valid `primary_key` option.
pub fn plan_modify(
    table: &TableDef,
    options: &FdwOptions,
    operation: Operation,
    targets: &[AttrNumber],
    catalog: &dyn OperatorCatalog,
) -> Result<ModifyPlan> {
    let keyspace = options.table.keyspace()?;
    let remote_table = options.table.table()?;
    let builder = StatementBuilder::new(table, keyspace, remote_table, catalog);
    let live: Vec<AttrNumber> = table.live_columns().map(|c| c.attnum).collect();

    let query = match operation {
        Operation::Insert => builder.insert(&live)?,
        Operation::Update => {
            let key = resolve_key(table, options)?;
            let targets = if targets.is_empty() { &live[..] } else { targets };
            builder.update(targets, &key)?
        }
        Operation::Delete => builder.delete(&resolve_key(table, options)?)?,
        Operation::Select => {
            return Err(scylla_fdw_query::QueryError::Internal(
                "plan_modify called for SELECT".to_string(),
            )
            .into());
        }
    };

    debug!(table = %table.name, query = %query.text, %operation, "planned modify");
    Ok(ModifyPlan {
        query,
        consistency: options.server.consistency,
    })
}

fn resolve_key(table: &TableDef, options: &FdwOptions) -> Result<KeyDescriptor> {
    Ok(KeyDescriptor::resolve(
        options.table.primary_key.as_deref(),
        options.table.clustering_key.as_deref(),
        table,
    )?)
}
