use super::*;

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[tokio::test]
async fn test_execute_batch_and_relation_exists() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE t1 (id INT); CREATE TABLE t2 (id INT); INSERT INTO t1 VALUES (1);",
    )
    .await
    .unwrap();

    assert!(db.relation_exists("t1").await.unwrap());
    assert!(db.relation_exists("t2").await.unwrap());
    assert!(!db.relation_exists("nonexistent").await.unwrap());
}

#[tokio::test]
async fn test_execute_returns_affected_rows() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE nums (n INTEGER);").await.unwrap();
    let affected = db
        .execute("INSERT INTO nums VALUES (1), (2), (3)")
        .await
        .unwrap();
    assert_eq!(affected, 3);
}

#[tokio::test]
async fn test_query_value_widening() {
    let db = DuckDbBackend::in_memory().unwrap();
    let rows = db
        .query("SELECT 1::INTEGER, 2.5::DOUBLE, 'hi', true, NULL")
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], Value::Int(1));
    assert_eq!(rows[0][1], Value::Float(2.5));
    assert_eq!(rows[0][2], Value::Text("hi".to_string()));
    assert_eq!(rows[0][3], Value::Bool(true));
    assert!(rows[0][4].is_null());
}

#[tokio::test]
async fn test_query_count_star_is_int() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE nums AS SELECT * FROM range(10) t(n)")
        .await
        .unwrap();

    let rows = db.query("SELECT COUNT(*) FROM nums").await.unwrap();
    assert_eq!(rows[0][0].as_i64(), Some(10));
}

#[tokio::test]
async fn test_query_timestamp() {
    let db = DuckDbBackend::in_memory().unwrap();
    let rows = db
        .query("SELECT TIMESTAMP '2026-01-02 03:04:05'")
        .await
        .unwrap();

    let ts = rows[0][0].as_timestamp().unwrap();
    assert_eq!(ts.to_rfc3339(), "2026-01-02T03:04:05+00:00");
}

#[tokio::test]
async fn test_transaction_rollback() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE t (id INTEGER);").await.unwrap();

    db.begin().await.unwrap();
    db.execute("INSERT INTO t VALUES (1)").await.unwrap();
    db.rollback_tx().await.unwrap();

    let rows = db.query("SELECT COUNT(*) FROM t").await.unwrap();
    assert_eq!(rows[0][0].as_i64(), Some(0));
}

#[tokio::test]
async fn test_transaction_commit() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE t (id INTEGER);").await.unwrap();

    db.begin().await.unwrap();
    db.execute("INSERT INTO t VALUES (1)").await.unwrap();
    db.commit().await.unwrap();

    let rows = db.query("SELECT COUNT(*) FROM t").await.unwrap();
    assert_eq!(rows[0][0].as_i64(), Some(1));
}

#[tokio::test]
async fn test_from_path_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.duckdb");

    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.execute_batch("CREATE TABLE t (id INTEGER); INSERT INTO t VALUES (42);")
            .await
            .unwrap();
    }

    let db = DuckDbBackend::from_path(&path).unwrap();
    let rows = db.query("SELECT id FROM t").await.unwrap();
    assert_eq!(rows[0][0].as_i64(), Some(42));
}
