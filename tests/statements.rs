//! End-to-end statement sequences against one session store

use tinysql::render::format_result;
use tinysql::{execute_sql, QueryResult, SqlError, TableStore, Value};

fn select(store: &mut TableStore, sql: &str) -> (Vec<String>, Vec<Vec<Value>>) {
    match execute_sql(store, sql).unwrap() {
        QueryResult::Select { columns, rows } => (columns, rows),
        other => panic!("expected rows from {:?}, got {:?}", sql, other),
    }
}

#[test]
fn create_show_drop_lifecycle() {
    let mut store = TableStore::new();

    let (_, rows) = select(&mut store, "SHOW TABLES;");
    assert!(rows.is_empty());

    execute_sql(&mut store, "CREATE TABLE t (id INT, tag VARCHAR);").unwrap();
    let (cols, rows) = select(&mut store, "SHOW TABLES;");
    assert_eq!(cols, vec!["Tables".to_string()]);
    assert_eq!(rows, vec![vec![Value::Text("t".into())]]);

    // Creating again without IF NOT EXISTS errors and leaves the store alone
    let err = execute_sql(&mut store, "CREATE TABLE t (id INT);").unwrap_err();
    assert_eq!(err, SqlError::DuplicateTable("t".into()));
    let (_, rows) = select(&mut store, "SHOW TABLES;");
    assert_eq!(rows.len(), 1);

    // With IF NOT EXISTS it's a no-op success carrying a warning
    let result = execute_sql(&mut store, "CREATE TABLE IF NOT EXISTS t (id INT);").unwrap();
    assert_eq!(
        result,
        QueryResult::Modification {
            affected_rows: 0,
            warnings: 1
        }
    );
    assert_eq!(
        format_result(&result),
        "Query OK, 0 rows affected, 1 warning"
    );

    execute_sql(&mut store, "DROP TABLE t;").unwrap();
    let (_, rows) = select(&mut store, "SHOW TABLES;");
    assert!(rows.is_empty());
}

#[test]
fn insert_then_select_star_round_trips() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT, tag VARCHAR);").unwrap();

    let result = execute_sql(&mut store, "INSERT INTO t VALUES (1,'a'),(2,'b');").unwrap();
    assert_eq!(result.affected_rows(), 2);

    let (cols, rows) = select(&mut store, "SELECT * FROM t;");
    assert_eq!(cols, vec!["id".to_string(), "tag".to_string()]);
    assert_eq!(
        rows,
        vec![
            vec![Value::Integer(1), Value::Text("a".into())],
            vec![Value::Integer(2), Value::Text("b".into())],
        ]
    );
}

#[test]
fn select_projection_and_predicate() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT, tag VARCHAR);").unwrap();
    execute_sql(&mut store, "INSERT INTO t VALUES (1,'a'),(2,'b'),(3,'c');").unwrap();

    let (cols, rows) = select(&mut store, "SELECT tag FROM t WHERE id > 1;");
    assert_eq!(cols, vec!["tag".to_string()]);
    assert_eq!(
        rows,
        vec![
            vec![Value::Text("b".into())],
            vec![Value::Text("c".into())],
        ]
    );
}

#[test]
fn delete_reports_count_and_removes() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT, tag VARCHAR);").unwrap();
    execute_sql(&mut store, "INSERT INTO t VALUES (1,'a'),(2,'b');").unwrap();

    let result = execute_sql(&mut store, "DELETE FROM t WHERE id = 1;").unwrap();
    assert_eq!(result.affected_rows(), 1);

    let (_, rows) = select(&mut store, "SELECT * FROM t;");
    assert_eq!(rows, vec![vec![Value::Integer(2), Value::Text("b".into())]]);
}

#[test]
fn update_touches_only_matching_rows() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT, tag VARCHAR);").unwrap();
    execute_sql(&mut store, "INSERT INTO t VALUES (1,'a'),(2,'b');").unwrap();

    let result = execute_sql(&mut store, "UPDATE t SET tag = 'x' WHERE id = 2;").unwrap();
    assert_eq!(result.affected_rows(), 1);

    let (_, rows) = select(&mut store, "SELECT * FROM t;");
    assert_eq!(
        rows,
        vec![
            vec![Value::Integer(1), Value::Text("a".into())],
            vec![Value::Integer(2), Value::Text("x".into())],
        ]
    );
}

#[test]
fn update_set_expression_sees_current_row() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT);").unwrap();
    execute_sql(&mut store, "INSERT INTO t VALUES (1),(2);").unwrap();

    execute_sql(&mut store, "UPDATE t SET id = id * 10;").unwrap();
    let (_, rows) = select(&mut store, "SELECT * FROM t;");
    assert_eq!(
        rows,
        vec![vec![Value::Integer(10)], vec![Value::Integer(20)]]
    );
}

#[test]
fn or_and_precedence_in_where() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (a INT, b INT);").unwrap();
    execute_sql(&mut store, "INSERT INTO t VALUES (1,9),(2,3),(2,4);").unwrap();

    // a = 1 OR a = 2 AND b = 3 groups the AND first
    let (_, rows) = select(&mut store, "SELECT * FROM t WHERE a = 1 OR a = 2 AND b = 3;");
    assert_eq!(
        rows,
        vec![
            vec![Value::Integer(1), Value::Integer(9)],
            vec![Value::Integer(2), Value::Integer(3)],
        ]
    );

    // Explicit grouping flips the result set
    let (_, rows) = select(
        &mut store,
        "SELECT * FROM t WHERE (a = 1 OR a = 2) AND b = 3;",
    );
    assert_eq!(rows, vec![vec![Value::Integer(2), Value::Integer(3)]]);
}

#[test]
fn drop_unknown_table_leaves_store_unchanged() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT);").unwrap();

    let before = select(&mut store, "SHOW TABLES;");
    let err = execute_sql(&mut store, "DROP TABLE unknown;").unwrap_err();
    assert_eq!(err, SqlError::UnknownTable("unknown".into()));
    let after = select(&mut store, "SHOW TABLES;");
    assert_eq!(before, after);
}

#[test]
fn round_trip_many_rows() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT, score FLOAT, tag VARCHAR);").unwrap();

    let mut expected = Vec::new();
    for i in 0..25 {
        let sql = format!("INSERT INTO t VALUES ({}, {}.5, 'tag{}');", i, i, i);
        execute_sql(&mut store, &sql).unwrap();
        expected.push(vec![
            Value::Integer(i),
            Value::Float(i as f64 + 0.5),
            Value::Text(format!("tag{}", i)),
        ]);
    }

    let (_, rows) = select(&mut store, "SELECT * FROM t;");
    assert_eq!(rows, expected);
}

#[test]
fn integer_literal_widens_into_float_column() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (score FLOAT);").unwrap();
    execute_sql(&mut store, "INSERT INTO t VALUES (3);").unwrap();
    let (_, rows) = select(&mut store, "SELECT * FROM t;");
    assert_eq!(rows, vec![vec![Value::Float(3.0)]]);
}

#[test]
fn coercion_failure_rejects_insert() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT);").unwrap();
    let err = execute_sql(&mut store, "INSERT INTO t VALUES ('nope');").unwrap_err();
    assert!(matches!(err, SqlError::TypeCoercion(_)));
    let (_, rows) = select(&mut store, "SELECT * FROM t;");
    assert!(rows.is_empty());
}

#[test]
fn syntax_error_leaves_session_usable() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT);").unwrap();

    assert!(matches!(
        execute_sql(&mut store, "SELEKT * FROM t;"),
        Err(SqlError::Syntax(_))
    ));

    // The session carries on: the next statement parses and runs
    execute_sql(&mut store, "INSERT INTO t VALUES (1);").unwrap();
    let (_, rows) = select(&mut store, "SELECT * FROM t;");
    assert_eq!(rows.len(), 1);
}

#[test]
fn division_by_zero_aborts_statement_without_mutation() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT);").unwrap();
    execute_sql(&mut store, "INSERT INTO t VALUES (1),(2);").unwrap();

    let err = execute_sql(&mut store, "DELETE FROM t WHERE id / 0 > 1;").unwrap_err();
    assert_eq!(err, SqlError::DivisionByZero);
    let (_, rows) = select(&mut store, "SELECT * FROM t;");
    assert_eq!(rows.len(), 2);
}

#[test]
fn where_on_missing_column_matches_nothing() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT);").unwrap();
    execute_sql(&mut store, "INSERT INTO t VALUES (1),(2);").unwrap();

    let (_, rows) = select(&mut store, "SELECT * FROM t WHERE ghost = 1;");
    assert!(rows.is_empty());
    let result = execute_sql(&mut store, "DELETE FROM t WHERE ghost <> 1;").unwrap();
    assert_eq!(result.affected_rows(), 0);
}

#[test]
fn rendered_output_shapes() {
    let mut store = TableStore::new();
    execute_sql(&mut store, "CREATE TABLE t (id INT);").unwrap();

    let result = execute_sql(&mut store, "INSERT INTO t VALUES (7);").unwrap();
    assert_eq!(format_result(&result), "Query OK, 1 rows affected");

    let result = execute_sql(&mut store, "SELECT * FROM t WHERE id = 99;").unwrap();
    assert_eq!(format_result(&result), "Empty set");

    let result = execute_sql(&mut store, "SELECT * FROM t;").unwrap();
    let text = format_result(&result);
    assert!(text.contains("| id |"));
    assert!(text.ends_with("1 rows in set"));
}
