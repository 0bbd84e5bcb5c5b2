//! Rendering of classified predicates as CQL text.
//!
//! Every node renders to `Ok(text)` or fails as a whole; a failure anywhere
//! below a predicate discards everything rendered for it so far. Callers
//! only hand over predicates the [`Classifier`](crate::Classifier) accepted,
//! so a failure here is a defect, reported as [`QueryError::Internal`].

use scylla_fdw_codec::cql_literal;
use scylla_fdw_types::TableDef;

use crate::classify::is_column_term;
use crate::error::{QueryError, Result};
use crate::expr::{BoolOp, Expr};
use crate::operator::{OperatorCatalog, RemoteOperator, resolve_operator};

pub use scylla_fdw_codec::quote_literal;

/// Quotes a CQL identifier when needed.
///
/// Names made only of `[a-z0-9_]` that do not start with a digit are
/// emitted as-is. Anything else is wrapped in double quotes with embedded
/// double quotes doubled, which preserves case.
pub fn quote_identifier(name: &str) -> String {
    let starts_ok = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    let rest_ok = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if starts_ok && rest_ok {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Renders predicates over one table.
pub struct Deparser<'a> {
    table: &'a TableDef,
    catalog: &'a dyn OperatorCatalog,
}

impl<'a> Deparser<'a> {
    pub fn new(table: &'a TableDef, catalog: &'a dyn OperatorCatalog) -> Self {
        Self { table, catalog }
    }

    /// Renders `expr` as CQL.
    pub fn deparse(&self, expr: &Expr) -> Result<String> {
        match expr {
            Expr::Column {
                relation, attnum, ..
            } => {
                if *relation != self.table.relation {
                    return Err(internal(format!(
                        "column of relation {relation} in a predicate over {}",
                        self.table.name
                    )));
                }
                let column = self
                    .table
                    .attribute(*attnum)
                    .filter(|c| !c.dropped)
                    .ok_or_else(|| QueryError::UnknownColumn {
                        table: self.table.name.to_string(),
                        attnum: *attnum,
                    })?;
                Ok(quote_identifier(column.name.as_str()))
            }
            Expr::Literal { value, .. } => {
                cql_literal(value).map_err(|e| internal(format!("literal: {e}")))
            }
            Expr::Relabel { arg, .. } => self.deparse(arg),
            Expr::Comparison { op, args } => {
                let [left, right] = args.as_slice() else {
                    return Err(internal(format!(
                        "comparison with {} operands",
                        args.len()
                    )));
                };
                if !is_column_term(left, right) {
                    return Err(internal("comparison is not `column op constant`".to_string()));
                }
                let op = self.remote_operator(*op)?;
                Ok(format!("{} {op} {}", self.deparse(left)?, self.deparse(right)?))
            }
            Expr::Bool { op: BoolOp::And, args } => {
                if args.is_empty() {
                    return Err(internal("AND without operands".to_string()));
                }
                let parts = args
                    .iter()
                    .map(|arg| self.deparse(arg))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("({})", parts.join(" AND ")))
            }
            Expr::Bool { op, .. } => Err(internal(format!("{op:?} cannot be pushed down"))),
            Expr::NullTest { .. } => Err(internal("null test cannot be pushed down".to_string())),
            Expr::SetMembership {
                op,
                use_or,
                left,
                elements,
            } => {
                if !*use_or || self.remote_operator(*op)? != RemoteOperator::Eq {
                    return Err(internal("only `= ANY` maps to IN".to_string()));
                }
                let items = elements
                    .iter()
                    .map(|e| self.deparse(e))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("{} IN ({})", self.deparse(left)?, items.join(", ")))
            }
            Expr::Opaque { kind } => Err(internal(format!("{kind} cannot be pushed down"))),
        }
    }

    /// Renders the WHERE clause body for `conditions`, joined by ` AND `.
    ///
    /// Returns `None` when there are no conditions.
    pub fn where_clause(&self, conditions: &[Expr]) -> Result<Option<String>> {
        if conditions.is_empty() {
            return Ok(None);
        }
        let parts = conditions
            .iter()
            .map(|c| self.deparse(c))
            .collect::<Result<Vec<_>>>()?;
        debug_assert!(parts.iter().all(|p| !p.is_empty()));
        Ok(Some(parts.join(" AND ")))
    }

    fn remote_operator(&self, op: crate::expr::OperatorId) -> Result<RemoteOperator> {
        resolve_operator(self.catalog, op)
            .ok_or_else(|| internal(format!("operator {} has no remote equivalent", op.0)))
    }
}

fn internal(message: String) -> QueryError {
    QueryError::Internal(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::OperatorId;
    use crate::operator::{STANDARD_NAMESPACE, StaticOperatorCatalog};
    use scylla_fdw_types::{RelationId, SemanticType, Value};
    use test_case::test_case;

    const REL: RelationId = RelationId(7);
    const EQ: OperatorId = OperatorId(1);
    const NE: OperatorId = OperatorId(2);
    const GE: OperatorId = OperatorId(3);

    fn catalog() -> StaticOperatorCatalog {
        StaticOperatorCatalog::new()
            .with(EQ, "=", STANDARD_NAMESPACE)
            .with(NE, "<>", STANDARD_NAMESPACE)
            .with(GE, ">=", STANDARD_NAMESPACE)
    }

    fn table() -> TableDef {
        TableDef::new(REL, "events")
            .column("id", SemanticType::Int8)
            .column("userName", SemanticType::Text)
            .dropped_column("gone", SemanticType::Text)
    }

    fn render(expr: &Expr) -> Result<String> {
        let table = table();
        let catalog = catalog();
        Deparser::new(&table, &catalog).deparse(expr)
    }

    #[test_case("id", "id"; "plain")]
    #[test_case("_x9", "_x9"; "underscore start")]
    #[test_case("UserName", "\"UserName\""; "uppercase")]
    #[test_case("9lives", "\"9lives\""; "digit start")]
    #[test_case("a b", "\"a b\""; "space")]
    #[test_case("say\"hi", "\"say\"\"hi\""; "embedded quote")]
    #[test_case("", "\"\""; "empty")]
    fn quotes_identifiers(name: &str, expected: &str) {
        assert_eq!(quote_identifier(name), expected);
    }

    #[test]
    fn comparison_with_quoted_column() {
        let expr = Expr::compare(
            NE,
            Expr::column(REL, 2, SemanticType::Text),
            Expr::literal(Value::Text("it's".into())),
        );
        assert_eq!(render(&expr).unwrap(), "\"userName\" != 'it''s'");
    }

    #[test]
    fn and_is_parenthesized() {
        let expr = Expr::and(vec![
            Expr::compare(GE, Expr::column(REL, 1, SemanticType::Int8), Expr::literal(Value::Int8(10))),
            Expr::compare(EQ, Expr::column(REL, 2, SemanticType::Text), Expr::literal(Value::Text("a".into()))),
        ]);
        assert_eq!(render(&expr).unwrap(), "(id >= 10 AND \"userName\" = 'a')");
    }

    #[test]
    fn set_membership_renders_in_list() {
        let expr = Expr::any(
            EQ,
            Expr::column(REL, 1, SemanticType::Int8),
            vec![Expr::literal(Value::Int8(1)), Expr::literal(Value::Int8(2))],
        );
        assert_eq!(render(&expr).unwrap(), "id IN (1, 2)");
    }

    #[test]
    fn blob_literal_is_hex() {
        let blob = Value::Bytea(bytes::Bytes::from_static(&[0xde, 0xad, 0x01]));
        let expr = Expr::compare(EQ, Expr::column(REL, 1, SemanticType::Bytea), Expr::literal(blob));
        assert_eq!(render(&expr).unwrap(), "id = 0xdead01");
    }

    #[test]
    fn null_literal_is_bare() {
        let expr = Expr::compare(EQ, Expr::column(REL, 1, SemanticType::Int8), Expr::null(SemanticType::Int8));
        assert_eq!(render(&expr).unwrap(), "id = NULL");
    }

    #[test]
    fn or_is_an_internal_error() {
        let expr = Expr::or(vec![Expr::literal(Value::Boolean(true))]);
        assert!(matches!(render(&expr), Err(QueryError::Internal(_))));
    }

    #[test]
    fn failure_below_and_fails_the_whole_predicate() {
        let expr = Expr::and(vec![
            Expr::compare(EQ, Expr::column(REL, 1, SemanticType::Int8), Expr::literal(Value::Int8(1))),
            Expr::is_null(Expr::column(REL, 2, SemanticType::Text)),
        ]);
        assert!(render(&expr).is_err());
    }

    #[test]
    fn column_against_column_is_an_internal_error() {
        let expr = Expr::compare(
            EQ,
            Expr::column(REL, 1, SemanticType::Int8),
            Expr::column(REL, 2, SemanticType::Text),
        );
        assert!(matches!(render(&expr), Err(QueryError::Internal(_))));

        let flipped = Expr::compare(GE, Expr::literal(Value::Int8(3)), Expr::column(REL, 1, SemanticType::Int8));
        assert!(matches!(render(&flipped), Err(QueryError::Internal(_))));
    }

    #[test]
    fn dropped_column_is_unknown() {
        let expr = Expr::column(REL, 3, SemanticType::Text);
        assert!(matches!(render(&expr), Err(QueryError::UnknownColumn { attnum: 3, .. })));
    }

    #[test]
    fn where_clause_joins_with_and() {
        let table = table();
        let catalog = catalog();
        let deparser = Deparser::new(&table, &catalog);
        let conds = vec![
            Expr::compare(EQ, Expr::column(REL, 1, SemanticType::Int8), Expr::literal(Value::Int8(42))),
            Expr::compare(GE, Expr::column(REL, 2, SemanticType::Text), Expr::literal(Value::Text("m".into()))),
        ];
        assert_eq!(
            deparser.where_clause(&conds).unwrap().as_deref(),
            Some("id = 42 AND \"userName\" >= 'm'")
        );
        assert_eq!(deparser.where_clause(&[]).unwrap(), None);
    }
}
