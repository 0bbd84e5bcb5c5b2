//! Scan execution.

use scylla_fdw_codec::decode;
use scylla_fdw_query::Operation;
use scylla_fdw_types::{TableDef, Value};
use tracing::{debug, info};

use crate::error::{FdwError, Result};
use crate::plan::ScanPlan;
use crate::transport::Transport;

/// Executes a planned scan and turns result rows into host tuples.
///
/// The query is sent on the first [`next_row`](Self::next_row), not at
/// construction, so a scan that is never read costs nothing remotely.
pub struct ScanSession<'a, T: Transport> {
    transport: &'a mut T,
    table: &'a TableDef,
    plan: &'a ScanPlan,
    /// For each attribute slot, the result column holding it.
    mapping: Vec<Option<usize>>,
    cursor: Option<T::Rows>,
    eof: bool,
    fetched: u64,
}

impl<'a, T: Transport> ScanSession<'a, T> {
    pub fn begin(transport: &'a mut T, table: &'a TableDef, plan: &'a ScanPlan) -> Self {
        let mut mapping = vec![None; table.natts()];
        for (idx, attnum) in plan.query.attrs.iter().enumerate() {
            let slot = usize::try_from(*attnum).ok().and_then(|n| n.checked_sub(1));
            if let Some(entry) = slot.and_then(|s| mapping.get_mut(s)) {
                *entry = Some(idx);
            }
        }

        info!(table = %table.name, query = %plan.query.text, "scan begun");
        Self {
            transport,
            table,
            plan,
            mapping,
            cursor: None,
            eof: false,
            fetched: 0,
        }
    }

    /// Returns the next tuple, one value per attribute slot, or `None` at
    /// the end of the result. Columns not retrieved are NULL.
    pub fn next_row(&mut self) -> Result<Option<Vec<Value>>> {
        if self.eof {
            return Ok(None);
        }

        let next = match &mut self.cursor {
            Some(cursor) => cursor.next(),
            None => {
                let mut rows = self
                    .transport
                    .execute(&self.plan.query.text, self.plan.consistency)
                    .map_err(|e| FdwError::remote(Operation::Select, e))?;
                debug!(
                    table = %self.table.name,
                    consistency = %self.plan.consistency,
                    "scan query executed"
                );
                let next = rows.next();
                self.cursor = Some(rows);
                next
            }
        };

        let Some(row) = next else {
            self.eof = true;
            self.cursor = None;
            return Ok(None);
        };
        let row = row.map_err(|e| FdwError::remote(Operation::Select, e))?;

        if row.len() != self.plan.query.attrs.len() {
            return Err(FdwError::RowShape {
                expected: self.plan.query.attrs.len(),
                actual: row.len(),
            });
        }

        let mut tuple = vec![Value::Null; self.table.natts()];
        for ((slot, column), idx) in tuple
            .iter_mut()
            .zip(self.table.columns())
            .zip(&self.mapping)
        {
            if let Some(idx) = idx
                && !column.dropped
            {
                *slot = decode(&row[*idx], &column.ty)?;
            }
        }

        self.fetched += 1;
        Ok(Some(tuple))
    }

    /// Restarts the scan. The cursor is released and the same query is sent
    /// again on the next fetch.
    pub fn rescan(&mut self) {
        info!(table = %self.table.name, fetched = self.fetched, "rescan");
        self.cursor = None;
        self.eof = false;
    }

    /// Releases the cursor and ends the scan.
    pub fn end(self) {
        info!(table = %self.table.name, fetched = self.fetched, "scan ended");
    }

    /// Rows returned so far, across rescans.
    pub fn fetched(&self) -> u64 {
        self.fetched
    }
}
