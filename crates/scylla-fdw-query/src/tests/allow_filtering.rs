//! Partition-key completeness analysis.

use super::*;
use crate::{KeyDescriptor, needs_allow_filtering};

/// `(p1 text, p2 text, ck int4, v text)`
fn table_p() -> TableDef {
    TableDef::new(REL, "p")
        .column("p1", SemanticType::Text)
        .column("p2", SemanticType::Text)
        .column("ck", SemanticType::Int4)
        .column("v", SemanticType::Text)
}

fn pcol(attnum: i16) -> Expr {
    let ty = table_p()
        .attribute(attnum)
        .map_or(SemanticType::Text, |c| c.ty.clone());
    Expr::column(REL, attnum, ty)
}

fn peq(attnum: i16, value: Value) -> Expr {
    Expr::compare(OP_EQ, pcol(attnum), Expr::literal(value))
}

fn needs(conds: &[Expr], key: &KeyDescriptor) -> bool {
    needs_allow_filtering(conds, key, REL, &catalog())
}

fn p1_p2() -> KeyDescriptor {
    KeyDescriptor::resolve(Some("p1,p2"), Some("ck"), &table_p()).unwrap()
}

#[test]
fn full_partition_key_needs_no_marker() {
    assert!(!needs(&[peq(1, text("x")), peq(2, text("y"))], &p1_p2()));
}

#[test]
fn partial_partition_key_needs_marker() {
    assert!(needs(&[peq(1, text("x"))], &p1_p2()));
}

#[test]
fn no_predicates_need_marker() {
    assert!(needs(&[], &p1_p2()));
}

#[test]
fn unconfigured_key_always_needs_marker() {
    let conds = [peq(1, text("x")), peq(2, text("y"))];
    assert!(needs(&conds, &KeyDescriptor::unconfigured()));
}

#[test]
fn set_membership_pins_a_partition_column() {
    let in_list = Expr::any(
        OP_EQ,
        pcol(2),
        vec![Expr::literal(text("a")), Expr::literal(text("b"))],
    );
    assert!(!needs(&[peq(1, text("x")), in_list], &p1_p2()));
}

#[test]
fn range_on_partition_column_does_not_pin_it() {
    let range = Expr::compare(OP_GE, pcol(2), Expr::literal(text("m")));
    assert!(needs(&[peq(1, text("x")), range], &p1_p2()));
}

#[test]
fn clustering_predicates_do_not_replace_partition_ones() {
    let conds = [peq(1, text("x")), peq(3, Value::Int4(5))];
    assert!(needs(&conds, &p1_p2()));
}

#[test]
fn extra_predicates_do_not_force_marker() {
    let conds = [
        peq(1, text("x")),
        peq(2, text("y")),
        Expr::compare(OP_GE, pcol(3), Expr::literal(Value::Int4(10))),
    ];
    assert!(!needs(&conds, &p1_p2()));
}

#[test]
fn literal_on_the_left_does_not_pin() {
    let flipped = Expr::compare(OP_EQ, Expr::literal(text("y")), pcol(2));
    assert!(needs(&[peq(1, text("x")), flipped], &p1_p2()));
}

#[test]
fn relabeled_column_still_pins() {
    let relabeled = Expr::compare(
        OP_EQ,
        Expr::relabel(pcol(2), SemanticType::Varchar),
        Expr::literal(text("y")),
    );
    assert!(!needs(&[peq(1, text("x")), relabeled], &p1_p2()));
}

#[test]
fn equality_nested_in_and_does_not_count() {
    let nested = Expr::and(vec![peq(1, text("x")), peq(2, text("y"))]);
    assert!(needs(&[nested], &p1_p2()));
}

#[test]
fn user_namespace_equality_does_not_pin() {
    let user_eq = Expr::compare(OP_USER_EQ, pcol(2), Expr::literal(text("y")));
    assert!(needs(&[peq(1, text("x")), user_eq], &p1_p2()));
}
