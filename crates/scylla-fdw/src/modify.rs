//! Modify execution.

use scylla_fdw_codec::{RemoteValue, encode};
use scylla_fdw_query::{Operation, QueryError};
use scylla_fdw_types::{TableDef, Value};
use tracing::{debug, info};

use crate::error::{FdwError, Result};
use crate::plan::ModifyPlan;
use crate::transport::Transport;

/// Executes a planned INSERT, UPDATE or DELETE row by row.
///
/// The statement is prepared once when the session begins and bound for
/// each row.
pub struct ModifySession<'a, T: Transport> {
    transport: &'a mut T,
    table: &'a TableDef,
    plan: &'a ModifyPlan,
    prepared: T::Prepared,
    affected: u64,
}

impl<'a, T: Transport> ModifySession<'a, T> {
    /// Prepares the plan's statement.
    pub fn begin(transport: &'a mut T, table: &'a TableDef, plan: &'a ModifyPlan) -> Result<Self> {
        let prepared = transport
            .prepare(&plan.query.text)
            .map_err(|e| FdwError::Prepare(e.message))?;
        info!(
            table = %table.name,
            operation = %plan.operation(),
            query = %plan.query.text,
            "statement prepared"
        );
        Ok(Self {
            transport,
            table,
            plan,
            prepared,
            affected: 0,
        })
    }

    /// Binds `row` and executes the statement once.
    ///
    /// `row` holds one value per attribute slot of the relation, in
    /// attribute order. Only the attributes the plan binds are read.
    pub fn execute_row(&mut self, row: &[Value]) -> Result<()> {
        if row.len() != self.table.natts() {
            return Err(FdwError::RowShape {
                expected: self.table.natts(),
                actual: row.len(),
            });
        }

        let params = self.bind(row)?;
        self.transport
            .execute_prepared(&self.prepared, &params, self.plan.consistency)
            .map_err(|e| FdwError::remote(self.plan.operation(), e))?;

        self.affected += 1;
        debug!(table = %self.table.name, operation = %self.plan.operation(), "row written");
        Ok(())
    }

    fn bind(&self, row: &[Value]) -> Result<Vec<RemoteValue>> {
        self.plan
            .bind_attrs()
            .iter()
            .map(|&attnum| -> Result<RemoteValue> {
                let column = self
                    .table
                    .attribute(attnum)
                    .ok_or_else(|| QueryError::UnknownColumn {
                        table: self.table.name.to_string(),
                        attnum,
                    })?;
                let idx = usize::try_from(attnum - 1).map_err(|_| QueryError::UnknownColumn {
                    table: self.table.name.to_string(),
                    attnum,
                })?;
                Ok(encode(&row[idx], &column.ty)?)
            })
            .collect()
    }

    /// Ends the session.
    pub fn end(self) {
        info!(
            table = %self.table.name,
            operation = %self.plan.operation(),
            rows = self.affected,
            "modify ended"
        );
    }

    /// Rows written so far.
    pub fn affected(&self) -> u64 {
        self.affected
    }

    pub fn operation(&self) -> Operation {
        self.plan.operation()
    }
}
