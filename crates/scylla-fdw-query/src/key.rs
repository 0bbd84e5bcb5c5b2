//! Partition and clustering key descriptors.
//!
//! Parsed once from the `primary_key` / `clustering_key` table options and
//! resolved against the relation, so statement building works with
//! attribute numbers rather than re-reading option strings.

use scylla_fdw_config::{ConfigError, OPT_CLUSTERING_KEY, OPT_PRIMARY_KEY};
use scylla_fdw_types::{AttrNumber, ColumnName, TableDef};

/// A key column resolved to its attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumn {
    pub attnum: AttrNumber,
    pub name: ColumnName,
}

/// Resolved partition and clustering key of a foreign table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDescriptor {
    partition: Vec<KeyColumn>,
    clustering: Vec<KeyColumn>,
}

impl KeyDescriptor {
    /// Resolves the key options against `table`.
    ///
    /// Names are separated by commas and trimmed of spaces and tabs; empty
    /// entries are skipped. A name that is not a live column of the table
    /// is rejected.
    pub fn resolve(
        partition: Option<&str>,
        clustering: Option<&str>,
        table: &TableDef,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            partition: resolve_list(OPT_PRIMARY_KEY, partition, table)?,
            clustering: resolve_list(OPT_CLUSTERING_KEY, clustering, table)?,
        })
    }

    /// A descriptor with no key at all.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn partition_key(&self) -> &[KeyColumn] {
        &self.partition
    }

    pub fn clustering_key(&self) -> &[KeyColumn] {
        &self.clustering
    }

    /// True when a non-empty partition key is configured.
    pub fn is_configured(&self) -> bool {
        !self.partition.is_empty()
    }

    /// Full primary key: partition columns, then clustering columns.
    pub fn primary_key(&self) -> impl Iterator<Item = &KeyColumn> {
        self.partition.iter().chain(&self.clustering)
    }

    /// True if `attnum` is part of the primary key.
    pub fn contains(&self, attnum: AttrNumber) -> bool {
        self.primary_key().any(|k| k.attnum == attnum)
    }
}

fn resolve_list(
    option: &'static str,
    list: Option<&str>,
    table: &TableDef,
) -> Result<Vec<KeyColumn>, ConfigError> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };

    list.split(',')
        .map(|token| token.trim_matches([' ', '\t']))
        .filter(|token| !token.is_empty())
        .map(|name| {
            table
                .find_column(name)
                .map(|column| KeyColumn {
                    attnum: column.attnum,
                    name: column.name.clone(),
                })
                .ok_or_else(|| ConfigError::UnknownKeyColumn {
                    option,
                    column: name.to_string(),
                })
        })
        .collect()
}
