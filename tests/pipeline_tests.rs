//! End-to-end question pipeline over a real SQLite file.

mod support;

use serde_json::json;

use askdb::adapter::outbound::sqlite::upload::UploadedDatabase;
use askdb::domain::query::EMPTY_QUERY_MESSAGE;
use askdb::error::Error;
use askdb::port::inbound::context::ContextManager;
use askdb::port::inbound::query::TextToSql;
use support::{service, shop_db, ScriptedLlm};

#[tokio::test]
async fn fenced_reply_is_cleaned_and_executed() {
    let dir = tempfile::tempdir().unwrap();
    let db = shop_db(dir.path());
    let llm = ScriptedLlm::replying(
        "```sql\nSELECT name, COUNT(o.id) AS orders FROM customers c \
         JOIN orders o ON o.customer_id = c.id GROUP BY name ORDER BY name;\n```",
    );

    let outcome = service(llm).ask(&db, "orders per customer").await.unwrap();

    assert!(outcome.error.is_none());
    assert!(outcome.sql.starts_with("SELECT name"));
    assert!(!outcome.sql.contains("```"));
    assert_eq!(
        serde_json::to_value(&outcome.result).unwrap(),
        json!([
            {"name": "Ada", "orders": 2},
            {"name": "Grace", "orders": 1}
        ])
    );
}

#[tokio::test]
async fn prompt_carries_schema_context_and_question() {
    let dir = tempfile::tempdir().unwrap();
    let db = shop_db(dir.path());
    let llm = ScriptedLlm::replying("SELECT 1");
    let service = service(llm.clone());

    service
        .add_example("how many customers", "SELECT COUNT(*) FROM customers")
        .await
        .unwrap();
    service
        .add_annotation("amounts are stored in cents")
        .await
        .unwrap();

    service.ask(&db, "total revenue?").await.unwrap();

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.contains("customers"));
    assert!(prompt.contains("amount_cents"));
    assert!(prompt.contains("SELECT COUNT(*) FROM customers"));
    assert!(prompt.contains("amounts are stored in cents"));
    assert!(prompt.contains("total revenue?"));
}

#[tokio::test]
async fn rejected_query_is_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let db = shop_db(dir.path());
    let llm = ScriptedLlm::replying("SELECT * FROM invoices");

    let outcome = service(llm).ask(&db, "list invoices").await.unwrap();

    assert_eq!(outcome.sql, "SELECT * FROM invoices");
    assert!(outcome.result.is_empty());
    assert!(outcome.error.unwrap().contains("no such table"));
}

#[tokio::test]
async fn empty_reply_is_not_executed() {
    let dir = tempfile::tempdir().unwrap();
    let db = shop_db(dir.path());
    let llm = ScriptedLlm::replying("```\n```");

    let outcome = service(llm).ask(&db, "anything").await.unwrap();

    assert_eq!(outcome.sql, "");
    assert_eq!(outcome.error.as_deref(), Some(EMPTY_QUERY_MESSAGE));
}

#[tokio::test]
async fn blank_question_never_reaches_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let db = shop_db(dir.path());
    let llm = ScriptedLlm::replying("SELECT 1");

    let err = service(llm.clone()).ask(&db, "   ").await.unwrap_err();

    assert!(matches!(err, Error::Domain(_)));
    assert!(llm.prompts().is_empty());
}

#[tokio::test]
async fn model_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let db = shop_db(dir.path());
    let llm = ScriptedLlm::failing("quota exceeded");

    let err = service(llm).ask(&db, "how many orders").await.unwrap_err();
    assert!(matches!(err, Error::Llm(_)));
}

#[tokio::test]
async fn garbage_file_is_invalid_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "this is not a database, just some text that is long enough").unwrap();
    let llm = ScriptedLlm::replying("SELECT 1");

    let err = service(llm.clone()).ask(&path, "anything").await.unwrap_err();

    assert!(matches!(err, Error::InvalidDatabase(_)));
    assert!(llm.prompts().is_empty());
}

#[tokio::test]
async fn writes_only_touch_the_scratch_copy() {
    let dir = tempfile::tempdir().unwrap();
    let original = shop_db(dir.path());
    let before = std::fs::read(&original).unwrap();

    let copy = UploadedDatabase::copy_from(&original).unwrap();
    let llm = ScriptedLlm::replying("DELETE FROM orders");
    let outcome = service(llm).ask(copy.path(), "remove all orders").await.unwrap();

    assert!(outcome.error.is_none());
    assert!(outcome.result.is_empty());
    assert_eq!(std::fs::read(&original).unwrap(), before);
}

#[tokio::test]
async fn scratch_copy_is_removed_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let original = shop_db(dir.path());

    let copy = UploadedDatabase::copy_from(&original).unwrap();
    let scratch = copy.path().to_path_buf();
    assert!(scratch.exists());

    drop(copy);
    assert!(!scratch.exists());
}

#[tokio::test]
async fn schema_lists_tables_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let db = shop_db(dir.path());
    let llm = ScriptedLlm::replying("SELECT 1");

    let schema = service(llm.clone()).schema(&db).await.unwrap();

    let names: Vec<_> = schema.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["customers", "orders"]);
    assert!(llm.prompts().is_empty());
}
