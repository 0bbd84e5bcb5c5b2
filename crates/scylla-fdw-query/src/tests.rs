//! Cross-module tests for scylla-fdw-query.

#![allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
#![allow(clippy::too_many_lines)] // Test functions can be long
#![allow(clippy::similar_names)] // Test variables can have similar names

mod allow_filtering;
mod property_tests;

use scylla_fdw_types::{RelationId, SemanticType, TableDef, Value};

use crate::expr::{Expr, OperatorId};
use crate::operator::{STANDARD_NAMESPACE, StaticOperatorCatalog};

// ============================================================================
// Fixtures
// ============================================================================

const REL: RelationId = RelationId(16384);

const OP_EQ: OperatorId = OperatorId(96);
const OP_LT: OperatorId = OperatorId(97);
const OP_NE: OperatorId = OperatorId(518);
const OP_GE: OperatorId = OperatorId(525);
const OP_LIKE: OperatorId = OperatorId(1209);
/// `=` declared in a user schema.
const OP_USER_EQ: OperatorId = OperatorId(90_001);

fn catalog() -> StaticOperatorCatalog {
    StaticOperatorCatalog::new()
        .with(OP_EQ, "=", STANDARD_NAMESPACE)
        .with(OP_LT, "<", STANDARD_NAMESPACE)
        .with(OP_NE, "<>", STANDARD_NAMESPACE)
        .with(OP_GE, ">=", STANDARD_NAMESPACE)
        .with(OP_LIKE, "~~", STANDARD_NAMESPACE)
        .with(OP_USER_EQ, "=", "app")
}

/// `t (id int4, col1 text, col2 text, <dropped>, "Score" float8)`
fn table_t() -> TableDef {
    TableDef::new(REL, "t")
        .column("id", SemanticType::Int4)
        .column("col1", SemanticType::Text)
        .column("col2", SemanticType::Text)
        .dropped_column("legacy", SemanticType::Text)
        .column("Score", SemanticType::Float8)
}

fn col(attnum: i16) -> Expr {
    let ty = table_t()
        .attribute(attnum)
        .map_or(SemanticType::Text, |c| c.ty.clone());
    Expr::column(REL, attnum, ty)
}

fn eq(attnum: i16, value: Value) -> Expr {
    Expr::compare(OP_EQ, col(attnum), Expr::literal(value))
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}
