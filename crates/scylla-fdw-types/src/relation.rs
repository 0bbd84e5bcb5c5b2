//! Local relation descriptors.
//!
//! The host describes a foreign table to the wrapper as an ordered list of
//! attributes. Attribute numbers are 1-based; dropped attributes keep their
//! slot so numbering stays stable.

use std::fmt::{self, Debug, Display};

use crate::semantic::SemanticType;

/// 1-based attribute number within a relation. Values `<= 0` denote system columns.
pub type AttrNumber = i16;

/// Host identifier of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationId(pub u32);

impl Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Names
// ============================================================================

/// Local table name.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableName(String);

impl TableName {
    /// Creates a new table name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the table name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableName({:?})", self.0)
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TableName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TableName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Column name, shared by the local and remote side.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnName(String);

impl ColumnName {
    /// Creates a new column name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the column name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColumnName({:?})", self.0)
    }
}

impl Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ColumnName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ColumnName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

// ============================================================================
// Column Definition
// ============================================================================

/// One attribute of a local relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// 1-based attribute number.
    pub attnum: AttrNumber,
    pub name: ColumnName,
    pub ty: SemanticType,
    /// Dropped attributes are never read, written or named in remote statements.
    pub dropped: bool,
}

// ============================================================================
// Table Definition
// ============================================================================

/// Descriptor of a local foreign table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub relation: RelationId,
    pub name: TableName,
    /// Attributes in attribute-number order, dropped ones included.
    columns: Vec<ColumnDef>,
}

impl TableDef {
    /// Creates an empty table definition.
    pub fn new(relation: RelationId, name: impl Into<TableName>) -> Self {
        Self {
            relation,
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Appends a live column; its attribute number is the next free slot.
    pub fn column(mut self, name: impl Into<ColumnName>, ty: SemanticType) -> Self {
        self.push(name.into(), ty, false);
        self
    }

    /// Appends a dropped column slot.
    pub fn dropped_column(mut self, name: impl Into<ColumnName>, ty: SemanticType) -> Self {
        self.push(name.into(), ty, true);
        self
    }

    fn push(&mut self, name: ColumnName, ty: SemanticType, dropped: bool) {
        let attnum = AttrNumber::try_from(self.columns.len() + 1).unwrap_or(AttrNumber::MAX);
        debug_assert!(
            self.columns.last().is_none_or(|c| c.attnum < attnum),
            "attribute numbers must increase"
        );
        self.columns.push(ColumnDef {
            attnum,
            name,
            ty,
            dropped,
        });
    }

    /// Number of attribute slots, dropped ones included.
    pub fn natts(&self) -> usize {
        self.columns.len()
    }

    /// All attribute slots in order.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Non-dropped attributes in order.
    pub fn live_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| !c.dropped)
    }

    /// Looks up an attribute by number. Dropped attributes are returned too.
    pub fn attribute(&self, attnum: AttrNumber) -> Option<&ColumnDef> {
        let idx = usize::try_from(attnum).ok()?.checked_sub(1)?;
        self.columns.get(idx)
    }

    /// Finds a live column by exact name.
    pub fn find_column(&self, name: &str) -> Option<&ColumnDef> {
        self.live_columns().find(|c| c.name.as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> TableDef {
        TableDef::new(RelationId(16384), "users")
            .column("id", SemanticType::Int4)
            .dropped_column("legacy", SemanticType::Text)
            .column("name", SemanticType::Text)
    }

    #[test]
    fn attnums_are_dense_and_one_based() {
        let table = users();
        let nums: Vec<_> = table.columns().iter().map(|c| c.attnum).collect();
        assert_eq!(nums, vec![1, 2, 3]);
        assert_eq!(table.natts(), 3);
    }

    #[test]
    fn dropped_columns_are_skipped_by_name_lookup() {
        let table = users();
        assert!(table.find_column("legacy").is_none());
        assert_eq!(table.find_column("name").map(|c| c.attnum), Some(3));
        assert!(table.attribute(2).is_some_and(|c| c.dropped));
    }

    #[test]
    fn out_of_range_attribute() {
        let table = users();
        assert!(table.attribute(0).is_none());
        assert!(table.attribute(-1).is_none());
        assert!(table.attribute(4).is_none());
    }

    #[test]
    fn name_debug_format() {
        assert_eq!(format!("{:?}", ColumnName::from("id")), "ColumnName(\"id\")");
    }
}
