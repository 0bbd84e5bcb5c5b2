//! Operator resolution.
//!
//! Host operator identifiers differ between installations, so operators are
//! matched by name, and only those living in the standard namespace. A
//! user-defined `=` in some other schema may mean anything.

use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::expr::OperatorId;

/// Namespace holding the built-in operators.
pub const STANDARD_NAMESPACE: &str = "pg_catalog";

/// Looks up an operator's name and namespace.
pub trait OperatorCatalog {
    /// Returns `(name, namespace)`, or `None` if the operator is unknown.
    fn lookup(&self, op: OperatorId) -> Option<(&str, &str)>;
}

/// Comparison operators the remote query language supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperator {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    Ne,
}

impl RemoteOperator {
    /// Maps a host operator name. `<>` and `!=` are synonyms.
    pub fn from_host_name(name: &str) -> Option<Self> {
        match name {
            "=" => Some(RemoteOperator::Eq),
            "<" => Some(RemoteOperator::Lt),
            ">" => Some(RemoteOperator::Gt),
            "<=" => Some(RemoteOperator::Le),
            ">=" => Some(RemoteOperator::Ge),
            "<>" | "!=" => Some(RemoteOperator::Ne),
            _ => None,
        }
    }

    pub fn as_cql(self) -> &'static str {
        match self {
            RemoteOperator::Eq => "=",
            RemoteOperator::Lt => "<",
            RemoteOperator::Gt => ">",
            RemoteOperator::Le => "<=",
            RemoteOperator::Ge => ">=",
            RemoteOperator::Ne => "!=",
        }
    }
}

impl Display for RemoteOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cql())
    }
}

/// Resolves `op` to a remote operator, if it is a standard-namespace
/// operator the remote language can express.
pub fn resolve_operator(catalog: &dyn OperatorCatalog, op: OperatorId) -> Option<RemoteOperator> {
    let (name, namespace) = catalog.lookup(op)?;
    if namespace != STANDARD_NAMESPACE {
        return None;
    }
    RemoteOperator::from_host_name(name)
}

/// In-memory catalog, filled by the host at startup or by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticOperatorCatalog {
    operators: HashMap<OperatorId, (String, String)>,
}

impl StaticOperatorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operator.
    pub fn with(
        mut self,
        op: OperatorId,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        self.insert(op, name, namespace);
        self
    }

    pub fn insert(&mut self, op: OperatorId, name: impl Into<String>, namespace: impl Into<String>) {
        self.operators.insert(op, (name.into(), namespace.into()));
    }
}

impl OperatorCatalog for StaticOperatorCatalog {
    fn lookup(&self, op: OperatorId) -> Option<(&str, &str)> {
        self.operators
            .get(&op)
            .map(|(name, namespace)| (name.as_str(), namespace.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("=", Some("="))]
    #[test_case("<", Some("<"))]
    #[test_case(">", Some(">"))]
    #[test_case("<=", Some("<="))]
    #[test_case(">=", Some(">="))]
    #[test_case("<>", Some("!="))]
    #[test_case("!=", Some("!="))]
    #[test_case("~~", None; "like")]
    #[test_case("+", None; "arithmetic")]
    fn maps_host_names(name: &str, cql: Option<&str>) {
        assert_eq!(RemoteOperator::from_host_name(name).map(RemoteOperator::as_cql), cql);
    }

    #[test]
    fn only_standard_namespace_resolves() {
        let catalog = StaticOperatorCatalog::new()
            .with(OperatorId(1), "=", STANDARD_NAMESPACE)
            .with(OperatorId(2), "=", "myschema");
        assert_eq!(resolve_operator(&catalog, OperatorId(1)), Some(RemoteOperator::Eq));
        assert_eq!(resolve_operator(&catalog, OperatorId(2)), None);
        assert_eq!(resolve_operator(&catalog, OperatorId(3)), None);
    }
}
