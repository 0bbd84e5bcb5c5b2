//! Pushdown classification.
//!
//! Decides, predicate by predicate, whether the remote store can evaluate it.
//! A predicate is pushed down only if every node in it can be; anything else
//! stays with the host, which evaluates it after rows arrive.

use scylla_fdw_codec::is_renderable;
use scylla_fdw_types::{RelationId, SemanticType};
use tracing::debug;

use crate::expr::{BoolOp, Expr};
use crate::operator::{OperatorCatalog, RemoteOperator, resolve_operator};

/// Where a predicate will be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pushdown {
    RemoteSafe,
    LocalOnly,
}

/// Returns true for types that have an exact remote counterpart.
///
/// Arrays, composites and every other host type are excluded.
pub fn is_pushdown_safe_type(ty: &SemanticType) -> bool {
    ty.is_mapped()
}

/// CQL relations take the form `column op term`: a column on the left and
/// a constant on the right.
pub(crate) fn is_column_term(left: &Expr, right: &Expr) -> bool {
    left.as_column().is_some() && matches!(right.strip_relabel(), Expr::Literal { .. })
}

/// Classifies predicates against the relation being scanned.
pub struct Classifier<'a> {
    relation: RelationId,
    catalog: &'a dyn OperatorCatalog,
}

impl<'a> Classifier<'a> {
    pub fn new(relation: RelationId, catalog: &'a dyn OperatorCatalog) -> Self {
        Self { relation, catalog }
    }

    pub fn classify(&self, expr: &Expr) -> Pushdown {
        if self.is_remote_safe(expr) {
            Pushdown::RemoteSafe
        } else {
            Pushdown::LocalOnly
        }
    }

    /// Returns true if every node of `expr` can be evaluated remotely.
    pub fn is_remote_safe(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Column {
                relation, attnum, ty, ..
            } => *relation == self.relation && *attnum > 0 && is_pushdown_safe_type(ty),
            Expr::Literal { ty, value } => is_pushdown_safe_type(ty) && is_renderable(value),
            Expr::Relabel { arg, .. } => self.is_remote_safe(arg),
            Expr::Comparison { op, args } => {
                let [left, right] = args.as_slice() else {
                    return false;
                };
                is_column_term(left, right)
                    && resolve_operator(self.catalog, *op).is_some()
                    && self.is_remote_safe(left)
                    && self.is_remote_safe(right)
            }
            Expr::Bool { op, args } => match op {
                BoolOp::And => !args.is_empty() && args.iter().all(|arg| self.is_remote_safe(arg)),
                BoolOp::Or | BoolOp::Not => false,
            },
            Expr::NullTest { .. } | Expr::Opaque { .. } => false,
            Expr::SetMembership {
                op,
                use_or,
                left,
                elements,
            } => {
                *use_or
                    && resolve_operator(self.catalog, *op) == Some(RemoteOperator::Eq)
                    && left.as_column().is_some()
                    && self.is_remote_safe(left)
                    && !elements.is_empty()
                    && elements.iter().all(|e| {
                        matches!(e, Expr::Literal { value, .. } if !value.is_null())
                            && self.is_remote_safe(e)
                    })
            }
        }
    }

    /// Splits `conditions` into `(remote, local)`, preserving order.
    pub fn partition(&self, conditions: Vec<Expr>) -> (Vec<Expr>, Vec<Expr>) {
        let (remote, local): (Vec<_>, Vec<_>) = conditions
            .into_iter()
            .partition(|cond| self.classify(cond) == Pushdown::RemoteSafe);
        debug!(
            relation = %self.relation,
            remote = remote.len(),
            local = local.len(),
            "classified scan conditions"
        );
        (remote, local)
    }
}

/// Classifies a single predicate against `relation`.
pub fn classify(expr: &Expr, relation: RelationId, catalog: &dyn OperatorCatalog) -> Pushdown {
    Classifier::new(relation, catalog).classify(expr)
}
