/// Integration tests for the Tasknest API
///
/// These tests run against a live PostgreSQL database (`DATABASE_URL`) and
/// verify the behavior that only shows up with a real store:
/// - Deleting a user removes its tasks and their notes
/// - Deleting a task removes its notes but not the owner
/// - A valid token for one user cannot touch another user's resources
/// - Concurrent note creates under one task all land in its note list

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use serde_json::json;
use tasknest_shared::models::note::{CreateNote, Note};
use tasknest_shared::models::task::{CreateTask, Task, TaskPriority, TaskStatus};
use tasknest_shared::models::user::User;
use tower::Service as _;
use uuid::Uuid;

/// Creates a task for the context's user through the API
async fn create_task_via_api(ctx: &TestContext) -> Uuid {
    let request = Request::builder()
        .method("POST")
        .uri("/tasks")
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "description": "integration task",
                "priority": "a",
                "status": "incomplete"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::response_json(response).await;
    body["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_user_delete_cascades_to_tasks_and_notes() {
    let ctx = TestContext::new().await.unwrap();

    let task_id = create_task_via_api(&ctx).await;
    let note = Note::create(
        &ctx.db,
        CreateNote {
            task_id,
            content: "soon to be orphaned".to_string(),
        },
    )
    .await
    .unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/users/{}", ctx.user.id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The user, its task, and the task's note are all gone
    assert!(User::find_by_id(&ctx.db, ctx.user.id)
        .await
        .unwrap()
        .is_none());
    assert!(Task::find_by_id(&ctx.db, task_id).await.unwrap().is_none());
    assert!(Note::find_by_id(&ctx.db, note.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_task_delete_cascades_to_notes_only() {
    let ctx = TestContext::new().await.unwrap();

    let task_id = create_task_via_api(&ctx).await;
    let mut note_ids = Vec::new();
    for i in 0..2 {
        let note = Note::create(
            &ctx.db,
            CreateNote {
                task_id,
                content: format!("note {}", i),
            },
        )
        .await
        .unwrap();
        note_ids.push(note.id);
    }

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/tasks/{}", task_id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Task and its notes are gone; the owner survives
    assert!(Task::find_by_id(&ctx.db, task_id).await.unwrap().is_none());
    for note_id in note_ids {
        assert!(Note::find_by_id(&ctx.db, note_id).await.unwrap().is_none());
    }
    assert!(User::find_by_id(&ctx.db, ctx.user.id)
        .await
        .unwrap()
        .is_some());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_existing_resources_of_another_user_are_unauthorized() {
    let ctx = TestContext::new().await.unwrap();

    let other = common::seed_user(&ctx.db).await.unwrap();
    let other_task = Task::create(
        &ctx.db,
        CreateTask {
            user_id: other.id,
            description: "someone else's task".to_string(),
            priority: TaskPriority::B,
            status: TaskStatus::Incomplete,
        },
    )
    .await
    .unwrap();

    // The task exists, so this is an ownership failure, not a 404
    let request = Request::builder()
        .method("GET")
        .uri(format!("/tasks/{}", other_task.id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Same for another user's account
    let request = Request::builder()
        .method("GET")
        .uri(format!("/users/{}", other.id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The owner still sees the task untouched
    let task = Task::find_by_id(&ctx.db, other_task.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.user_id, other.id);

    User::delete_cascade(&ctx.db, other.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_note_creates_all_append() {
    let ctx = TestContext::new().await.unwrap();

    let task_id = create_task_via_api(&ctx).await;

    let mut handles = Vec::new();
    for i in 0..10 {
        let mut app = ctx.app.clone();
        let token = ctx.auth_header();
        handles.push(tokio::spawn(async move {
            let request = Request::builder()
                .method("POST")
                .uri(format!("/tasks/{}/notes", task_id))
                .header("authorization", token)
                .header("content-type", "application/json")
                .body(Body::from(json!({ "content": format!("note {}", i) }).to_string()))
                .unwrap();

            app.call(request).await.unwrap().status()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    // All ten inserts landed; none were lost to a concurrent writer
    let notes = Note::list_by_task(&ctx.db, task_id).await.unwrap();
    assert_eq!(notes.len(), 10);

    // The task read reflects the same derived list
    let request = Request::builder()
        .method("GET")
        .uri(format!("/tasks/{}", task_id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["notes"].as_array().unwrap().len(), 10);

    ctx.cleanup().await.unwrap();
}
