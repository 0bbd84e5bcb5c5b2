//! Predicate expression trees handed over by the host planner.
//!
//! Trees are immutable once built; the classifier and deparser only read
//! them. Anything the wrapper does not model explicitly (function calls,
//! sublinks, parameters...) arrives as [`Expr::Opaque`] and is never pushed
//! down.

use scylla_fdw_types::{AttrNumber, RelationId, SemanticType, Value};

/// Host identifier of an operator. Not stable across installations; resolve
/// it through an [`OperatorCatalog`](crate::OperatorCatalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperatorId(pub u32);

/// Boolean combinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
    And,
    Or,
    Not,
}

/// Predicate expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to an attribute of some relation in the query.
    Column {
        relation: RelationId,
        attnum: AttrNumber,
        ty: SemanticType,
    },

    /// Constant. A NULL constant carries [`Value::Null`].
    Literal { ty: SemanticType, value: Value },

    /// Binary-compatible type relabeling; the value is unchanged.
    Relabel { arg: Box<Expr>, ty: SemanticType },

    /// Operator application, normally binary.
    Comparison { op: OperatorId, args: Vec<Expr> },

    /// AND / OR / NOT over the children.
    Bool { op: BoolOp, args: Vec<Expr> },

    /// `arg IS NULL`, or `arg IS NOT NULL` when `negated`.
    NullTest { arg: Box<Expr>, negated: bool },

    /// `left op ANY (elements)` when `use_or`, `left op ALL (elements)` otherwise.
    SetMembership {
        op: OperatorId,
        use_or: bool,
        left: Box<Expr>,
        elements: Vec<Expr>,
    },

    /// Any node kind the wrapper does not model.
    Opaque { kind: String },
}

impl Expr {
    pub fn column(relation: RelationId, attnum: AttrNumber, ty: SemanticType) -> Self {
        Expr::Column {
            relation,
            attnum,
            ty,
        }
    }

    /// Literal whose type follows from the value.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `value` is NULL; use [`Expr::null`] for those.
    pub fn literal(value: Value) -> Self {
        debug_assert!(!value.is_null(), "typed NULL literals need Expr::null");
        let ty = value
            .semantic_type()
            .unwrap_or_else(|| SemanticType::Other("unknown".to_string()));
        Expr::Literal { ty, value }
    }

    /// Literal with an explicit type, e.g. a `varchar` constant.
    pub fn typed_literal(ty: SemanticType, value: Value) -> Self {
        Expr::Literal { ty, value }
    }

    pub fn null(ty: SemanticType) -> Self {
        Expr::Literal {
            ty,
            value: Value::Null,
        }
    }

    pub fn relabel(arg: Expr, ty: SemanticType) -> Self {
        Expr::Relabel {
            arg: Box::new(arg),
            ty,
        }
    }

    pub fn compare(op: OperatorId, left: Expr, right: Expr) -> Self {
        Expr::Comparison {
            op,
            args: vec![left, right],
        }
    }

    pub fn and(args: Vec<Expr>) -> Self {
        Expr::Bool {
            op: BoolOp::And,
            args,
        }
    }

    pub fn or(args: Vec<Expr>) -> Self {
        Expr::Bool {
            op: BoolOp::Or,
            args,
        }
    }

    pub fn not(arg: Expr) -> Self {
        Expr::Bool {
            op: BoolOp::Not,
            args: vec![arg],
        }
    }

    pub fn is_null(arg: Expr) -> Self {
        Expr::NullTest {
            arg: Box::new(arg),
            negated: false,
        }
    }

    pub fn is_not_null(arg: Expr) -> Self {
        Expr::NullTest {
            arg: Box::new(arg),
            negated: true,
        }
    }

    /// `left op ANY (elements)`.
    pub fn any(op: OperatorId, left: Expr, elements: Vec<Expr>) -> Self {
        Expr::SetMembership {
            op,
            use_or: true,
            left: Box::new(left),
            elements,
        }
    }

    /// Skips any relabel wrappers.
    pub fn strip_relabel(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Relabel { arg, .. } = expr {
            expr = arg;
        }
        expr
    }

    /// If this node is (a relabel of) a column reference, returns its relation and attribute.
    pub fn as_column(&self) -> Option<(RelationId, AttrNumber)> {
        match self.strip_relabel() {
            Expr::Column {
                relation, attnum, ..
            } => Some((*relation, *attnum)),
            _ => None,
        }
    }

    /// Calls `f` on every column reference in the tree.
    pub fn visit_columns(&self, f: &mut impl FnMut(RelationId, AttrNumber)) {
        match self {
            Expr::Column {
                relation, attnum, ..
            } => f(*relation, *attnum),
            Expr::Literal { .. } | Expr::Opaque { .. } => {}
            Expr::Relabel { arg, .. } | Expr::NullTest { arg, .. } => arg.visit_columns(f),
            Expr::Comparison { args, .. } | Expr::Bool { args, .. } => {
                for arg in args {
                    arg.visit_columns(f);
                }
            }
            Expr::SetMembership { left, elements, .. } => {
                left.visit_columns(f);
                for element in elements {
                    element.visit_columns(f);
                }
            }
        }
    }
}
