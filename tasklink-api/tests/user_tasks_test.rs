/// Integration tests for assigning users to tasks

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;

async fn seed(ctx: &TestContext) {
    ctx.create_user("f1", "Ana", "ana@mail.com").await;
    ctx.create_task("t1", "Write report", "Quarterly numbers").await;
}

async fn assigned_users(ctx: &TestContext, task_id: &str) -> Vec<String> {
    sqlx::query_scalar("SELECT user_id FROM users_tasks WHERE task_id = ? ORDER BY rowid")
        .bind(task_id)
        .fetch_all(&ctx.db)
        .await
        .unwrap()
}

async fn assignment_count(ctx: &TestContext) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users_tasks")
        .fetch_one(&ctx.db)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_assign_user_to_task() {
    let ctx = TestContext::new().await.unwrap();
    seed(&ctx).await;

    let (status, body) = ctx.send("POST", "/tasks/t1/users/f1", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "usuário atribuído à tarefa com sucesso" }));

    assert_eq!(assigned_users(&ctx, "t1").await, ["f1"]);
}

#[tokio::test]
async fn test_assign_twice_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    seed(&ctx).await;

    let (status, _) = ctx.send("POST", "/tasks/t1/users/f1", None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx.send("POST", "/tasks/t1/users/f1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!("usuário já atribuído à tarefa"));

    assert_eq!(assignment_count(&ctx).await, 1);
}

#[tokio::test]
async fn test_assign_checks_prefixes_first() {
    let ctx = TestContext::new().await.unwrap();
    seed(&ctx).await;

    // Task prefix wins even when both ids are wrong
    let (status, body) = ctx.send("POST", "/tasks/x1/users/y1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!("'taskId' deve iniciar com a letra 't'"));

    let (status, body) = ctx.send("POST", "/tasks/t1/users/t1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!("'userId' deve iniciar com a letra 'f'"));

    // Prefix failures are reported before existence
    let (status, _) = ctx.send("POST", "/tasks/x404/users/f1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(assignment_count(&ctx).await, 0);
}

#[tokio::test]
async fn test_assign_missing_task_or_user() {
    let ctx = TestContext::new().await.unwrap();
    seed(&ctx).await;

    let (status, body) = ctx.send("POST", "/tasks/t404/users/f404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!("'taskId' não existe"));

    let (status, body) = ctx.send("POST", "/tasks/t1/users/f404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!("'userId' não existe"));

    assert_eq!(assignment_count(&ctx).await, 0);
}

#[tokio::test]
async fn test_assignments_follow_deletes_and_renames() {
    let ctx = TestContext::new().await.unwrap();
    seed(&ctx).await;
    ctx.create_user("f2", "Bruno", "bruno@mail.com").await;

    ctx.send("POST", "/tasks/t1/users/f1", None).await;
    ctx.send("POST", "/tasks/t1/users/f2", None).await;
    assert_eq!(assignment_count(&ctx).await, 2);

    let (status, _) = ctx.put("/tasks/t1", json!({ "id": "t7" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assigned_users(&ctx, "t7").await, ["f1", "f2"]);

    ctx.delete("/users/f1").await;
    assert_eq!(assignment_count(&ctx).await, 1);

    ctx.delete("/tasks/t7").await;
    assert_eq!(assignment_count(&ctx).await, 0);
}
