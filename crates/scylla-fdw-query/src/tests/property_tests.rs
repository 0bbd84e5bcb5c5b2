//! Property-based tests for classification, rendering and identifier quoting.

use proptest::prelude::*;

use super::*;
use crate::{Classifier, Deparser, Pushdown, quote_identifier};

/// Reads back a CQL identifier the way the remote parser does: quoted names
/// are taken verbatim with `""` collapsed, bare names fold to lowercase.
fn parse_identifier(text: &str) -> String {
    match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(inner) => inner.replace("\"\"", "\""),
        None => text.to_lowercase(),
    }
}

fn remote_safe_comparison() -> impl Strategy<Value = Expr> {
    let op = prop::sample::select(vec![OP_EQ, OP_LT, OP_NE, OP_GE]);
    let operand = prop_oneof![
        any::<i32>().prop_map(|v| (1_i16, Value::Int4(v))),
        ".{0,12}".prop_map(|s| (2_i16, Value::Text(s))),
        ".{0,12}".prop_map(|s| (3_i16, Value::Text(s))),
        prop::num::f64::NORMAL.prop_map(|v| (5_i16, Value::Float8(v))),
    ];
    (op, operand).prop_map(|(op, (attnum, value))| {
        Expr::compare(op, col(attnum), Expr::literal(value))
    })
}

fn remote_safe_predicate() -> impl Strategy<Value = Expr> {
    prop_oneof![
        remote_safe_comparison(),
        prop::collection::vec(remote_safe_comparison(), 1..4).prop_map(Expr::and),
        prop::collection::vec(any::<i32>(), 1..5).prop_map(|values| {
            Expr::any(
                OP_EQ,
                col(1),
                values.into_iter().map(|v| Expr::literal(Value::Int4(v))).collect(),
            )
        }),
    ]
}

proptest! {
    #[test]
    fn quoted_identifier_reads_back(name in "\\PC{0,16}") {
        prop_assert_eq!(parse_identifier(&quote_identifier(&name)), name);
    }

    #[test]
    fn uppercase_or_special_names_are_quoted(name in "[a-z]{0,4}[A-Z \"\\-.][a-zA-Z0-9 ]{0,4}") {
        let quoted = quote_identifier(&name);
        prop_assert!(quoted.starts_with('"') && quoted.ends_with('"'));
        let inner = &quoted[1..quoted.len() - 1];
        prop_assert_eq!(inner.matches('"').count(), name.matches('"').count() * 2);
    }

    #[test]
    fn lowercase_names_stay_bare(name in "[a-z_][a-z0-9_]{0,15}") {
        prop_assert_eq!(quote_identifier(&name), name);
    }

    #[test]
    fn remote_safe_predicates_render(pred in remote_safe_predicate()) {
        let table = table_t();
        let catalog = catalog();
        prop_assert_eq!(
            Classifier::new(REL, &catalog).classify(&pred),
            Pushdown::RemoteSafe
        );
        let text = Deparser::new(&table, &catalog).deparse(&pred);
        prop_assert!(text.is_ok(), "{:?}", text);
        prop_assert!(!text.unwrap_or_default().is_empty());
    }

    #[test]
    fn top_level_or_is_local(preds in prop::collection::vec(remote_safe_predicate(), 1..4)) {
        let catalog = catalog();
        prop_assert_eq!(
            Classifier::new(REL, &catalog).classify(&Expr::or(preds)),
            Pushdown::LocalOnly
        );
    }

    #[test]
    fn null_tests_are_local(attnum in prop::sample::select(vec![1_i16, 2, 3, 5]), negated in any::<bool>()) {
        let catalog = catalog();
        let test = if negated {
            Expr::is_not_null(col(attnum))
        } else {
            Expr::is_null(col(attnum))
        };
        prop_assert_eq!(Classifier::new(REL, &catalog).classify(&test), Pushdown::LocalOnly);
    }

    #[test]
    fn one_local_child_makes_and_local(
        preds in prop::collection::vec(remote_safe_predicate(), 0..3),
        pattern in ".{0,8}",
    ) {
        let catalog = catalog();
        let mut args = preds;
        args.push(Expr::compare(OP_LIKE, col(2), Expr::literal(text(&pattern))));
        prop_assert_eq!(
            Classifier::new(REL, &catalog).classify(&Expr::and(args)),
            Pushdown::LocalOnly
        );
    }
}
