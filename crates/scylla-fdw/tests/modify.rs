//! Modify planning and execution against a mock transport.

#![allow(clippy::unwrap_used)] // Tests use unwrap for simplicity

mod common;

use common::{MockTransport, REL, catalog, options, table_t};
use scylla_fdw::{
    ConfigError, ConsistencyLevel, FdwError, ModifySession, Operation, QueryError, RemoteValue,
    SemanticType, TableDef, Value, plan_modify,
};
use test_case::test_case;

fn row(id: i32, col1: &str, col2: &str) -> Vec<Value> {
    vec![
        Value::Int4(id),
        Value::Text(col1.into()),
        Value::Text(col2.into()),
        Value::Null,
    ]
}

// ============================================================================
// Planning
// ============================================================================

#[test]
fn insert_targets_every_live_column() {
    let table = TableDef::new(REL, "t")
        .column("id", SemanticType::Int4)
        .dropped_column("old", SemanticType::Text)
        .column("Name", SemanticType::Text);
    let plan = plan_modify(&table, &options(&[]), Operation::Insert, &[], &catalog()).unwrap();
    assert_eq!(plan.query.text, "INSERT INTO ks.t (id, \"Name\") VALUES (?, ?)");
    assert_eq!(plan.bind_attrs(), &[1, 3]);
    assert_eq!(
        plan.explain(),
        vec!["CQL: INSERT INTO ks.t (id, \"Name\") VALUES (?, ?)".to_string()]
    );
}

#[test]
fn update_sets_targets_and_keys_by_primary_key() {
    let table = table_t();
    let opts = options(&[("primary_key", "id")]);
    let plan = plan_modify(&table, &opts, Operation::Update, &[2, 3], &catalog()).unwrap();
    assert_eq!(plan.query.text, "UPDATE ks.t SET col1 = ?, col2 = ? WHERE id = ?");
    assert_eq!(plan.bind_attrs(), &[2, 3, 1]);
}

#[test]
fn update_without_targets_sets_every_non_key_column() {
    let table = table_t();
    let opts = options(&[("primary_key", "id"), ("clustering_key", "seen")]);
    let plan = plan_modify(&table, &opts, Operation::Update, &[], &catalog()).unwrap();
    assert_eq!(
        plan.query.text,
        "UPDATE ks.t SET col1 = ?, col2 = ? WHERE id = ? AND seen = ?"
    );
    assert_eq!(plan.bind_attrs(), &[2, 3, 1, 4]);
}

#[test_case(Operation::Update; "update")]
#[test_case(Operation::Delete; "delete")]
fn key_is_required(operation: Operation) {
    let table = table_t();
    let err = plan_modify(&table, &options(&[]), operation, &[2], &catalog()).unwrap_err();
    assert_eq!(
        err,
        FdwError::Query(QueryError::Config(ConfigError::MissingKey {
            operation: operation.as_str()
        }))
    );
}

#[test]
fn unknown_key_column_fails_modify_planning() {
    let table = table_t();
    let opts = options(&[("primary_key", "missing")]);
    let err = plan_modify(&table, &opts, Operation::Delete, &[], &catalog()).unwrap_err();
    assert!(matches!(
        err,
        FdwError::Config(ConfigError::UnknownKeyColumn { .. })
    ));
}

#[test]
fn select_is_not_a_modify_operation() {
    let table = table_t();
    assert!(plan_modify(&table, &options(&[]), Operation::Select, &[], &catalog()).is_err());
}

// ============================================================================
// Execution
// ============================================================================

#[test]
fn insert_prepares_once_and_binds_each_row() {
    let table = table_t();
    let opts = options(&[]);
    let plan = plan_modify(&table, &opts, Operation::Insert, &[], &catalog()).unwrap();
    let mut transport = MockTransport::default();

    let mut session = ModifySession::begin(&mut transport, &table, &plan).unwrap();
    session.execute_row(&row(1, "a", "b")).unwrap();
    session.execute_row(&row(2, "it's", "")).unwrap();
    assert_eq!(session.affected(), 2);
    session.end();

    assert_eq!(
        transport.prepared,
        vec!["INSERT INTO ks.t (id, col1, col2, seen) VALUES (?, ?, ?, ?)".to_string()]
    );
    assert_eq!(transport.writes.len(), 2);
    let (handle, params, consistency) = &transport.writes[1];
    assert_eq!(*handle, 0);
    assert_eq!(*consistency, ConsistencyLevel::LocalQuorum);
    assert_eq!(
        params,
        &vec![
            RemoteValue::Int(2),
            RemoteValue::Text("it's".into()),
            RemoteValue::Text(String::new()),
            RemoteValue::Null,
        ]
    );
}

#[test]
fn update_binds_set_columns_before_keys() {
    let table = table_t();
    let opts = options(&[("primary_key", "id")]);
    let plan = plan_modify(&table, &opts, Operation::Update, &[2, 3], &catalog()).unwrap();
    let mut transport = MockTransport::default();

    let mut session = ModifySession::begin(&mut transport, &table, &plan).unwrap();
    session.execute_row(&row(9, "b", "c")).unwrap();
    session.end();

    assert_eq!(
        transport.writes[0].1,
        vec![
            RemoteValue::Text("b".into()),
            RemoteValue::Text("c".into()),
            RemoteValue::Int(9),
        ]
    );
}

#[test]
fn delete_binds_only_the_key() {
    let table = table_t();
    let opts = options(&[("primary_key", "id")]);
    let plan = plan_modify(&table, &opts, Operation::Delete, &[], &catalog()).unwrap();
    let mut transport = MockTransport::default();

    let mut session = ModifySession::begin(&mut transport, &table, &plan).unwrap();
    session.execute_row(&row(5, "", "")).unwrap();
    session.end();

    assert_eq!(transport.prepared[0], "DELETE FROM ks.t WHERE id = ?");
    assert_eq!(transport.writes[0].1, vec![RemoteValue::Int(5)]);
}

#[test_case(Operation::Insert, "INSERT failed: write timeout")]
#[test_case(Operation::Update, "UPDATE failed: write timeout")]
#[test_case(Operation::Delete, "DELETE failed: write timeout")]
fn remote_write_failure_names_the_operation(operation: Operation, expected: &str) {
    let table = table_t();
    let opts = options(&[("primary_key", "id")]);
    let plan = plan_modify(&table, &opts, operation, &[2], &catalog()).unwrap();
    let mut transport = MockTransport {
        fail_writes: ["write timeout".to_string()].into(),
        ..MockTransport::default()
    };

    let mut session = ModifySession::begin(&mut transport, &table, &plan).unwrap();
    let err = session.execute_row(&row(1, "a", "b")).unwrap_err();
    assert_eq!(err.to_string(), expected);
    assert_eq!(session.affected(), 0);

    // The session stays usable after a failed row.
    session.execute_row(&row(1, "a", "b")).unwrap();
    assert_eq!(session.affected(), 1);
}

#[test]
fn prepare_failure_is_reported() {
    let table = table_t();
    let plan = plan_modify(&table, &options(&[]), Operation::Insert, &[], &catalog()).unwrap();
    let mut transport = MockTransport {
        fail_prepare: Some("unconfigured table t".to_string()),
        ..MockTransport::default()
    };
    let err = ModifySession::begin(&mut transport, &table, &plan)
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "could not prepare statement: unconfigured table t");
}

#[test]
fn value_out_of_column_range_is_a_codec_error() {
    let table = TableDef::new(REL, "t").column("n", SemanticType::Int2);
    let plan = plan_modify(&table, &options(&[]), Operation::Insert, &[], &catalog()).unwrap();
    let mut transport = MockTransport::default();
    let mut session = ModifySession::begin(&mut transport, &table, &plan).unwrap();

    let err = session.execute_row(&[Value::Int8(1 << 20)]).unwrap_err();
    assert!(matches!(err, FdwError::Codec(_)));
    session.end();
    assert!(transport.writes.is_empty());
}

#[test]
fn row_with_wrong_arity_is_rejected() {
    let table = table_t();
    let plan = plan_modify(&table, &options(&[]), Operation::Insert, &[], &catalog()).unwrap();
    let mut transport = MockTransport::default();
    let mut session = ModifySession::begin(&mut transport, &table, &plan).unwrap();
    assert_eq!(
        session.execute_row(&[Value::Int4(1)]).unwrap_err(),
        FdwError::RowShape {
            expected: 4,
            actual: 1
        }
    );
}
