use autoall::{
    algebra::TaskApi,
    service::{HttpApi, Submitter},
};
use entities::{AutoError, PageQuery, TaskDraft, TaskQuery, TaskStatus, TaskType};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::{sync::Arc, time::Duration};

const TOKEN: &str = "secret";

fn api(server: &ServerGuard) -> HttpApi {
    HttpApi::new(
        &server.url(),
        Some(TOKEN.to_string()),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn task_body(id: u64, task_type: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "task_type": task_type,
        "status": status,
        "success_count": 0,
        "failed_count": 0,
        "total_count": 3,
        "cost": 54,
        "created_at": "2024-05-01T10:00:00Z"
    })
}

#[tokio::test]
async fn create_posts_the_minimal_payload_with_bearer_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/tasks/")
        .match_header("authorization", "Bearer secret")
        .match_body(Matcher::Json(json!({
            "task_type": "one_click",
            "account_ids": [1, 2, 3],
            "config": { "api_key": "k1", "card_id": 42 }
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(task_body(100, "one_click", "pending").to_string())
        .expect(1)
        .create_async()
        .await;

    let mut draft = TaskDraft::new(TaskType::OneClick);
    draft.select_all([3, 2, 1]);
    draft.set_api_key(Some("k1".to_string()));
    draft.set_card_id(Some(42));

    let submission = Submitter::new(Arc::new(api(&server)))
        .submit(&draft)
        .await
        .unwrap();

    assert_eq!(submission.task.id, 100);
    assert_eq!(submission.task.status, TaskStatus::Pending);
    mock.assert_async().await;
}

#[tokio::test]
async fn login_payload_sends_an_empty_config() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/tasks/")
        .match_body(Matcher::Json(json!({
            "task_type": "login",
            "account_ids": [1, 2, 3, 4, 5],
            "config": {}
        })))
        .with_status(201)
        .with_body(task_body(101, "login", "pending").to_string())
        .create_async()
        .await;

    let mut draft = TaskDraft::new(TaskType::OneClick);
    draft.set_card_id(Some(42));
    draft.set_api_key(Some("k1".to_string()));
    draft.select_all(1..=5);
    draft.set_task_type(TaskType::Login);

    let submission = Submitter::new(Arc::new(api(&server)))
        .submit(&draft)
        .await
        .unwrap();

    assert_eq!(submission.estimate.total(), 5);
    mock.assert_async().await;
}

#[tokio::test]
async fn invalid_draft_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/tasks/")
        .expect(0)
        .create_async()
        .await;

    let draft = TaskDraft::new(TaskType::BindCard);
    let result = Submitter::new(Arc::new(api(&server))).submit(&draft).await;

    assert!(matches!(result, Err(AutoError::Validation(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/tasks/")
        .with_status(400)
        .with_body(r#"{"error": "insufficient balance"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut draft = TaskDraft::new(TaskType::Login);
    draft.select(1);

    let err = Submitter::new(Arc::new(api(&server)))
        .submit(&draft)
        .await
        .unwrap_err();

    assert_eq!(err, AutoError::api(400, "insufficient balance"));
}

#[tokio::test]
async fn falls_back_to_a_generic_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/tasks/8/")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let err = api(&server).delete_task(8).await.unwrap_err();

    let AutoError::Api { status, message } = err else {
        panic!("expected an api error");
    };
    assert_eq!(status, Some(502));
    assert!(message.starts_with("Request failed"), "{message}");
}

#[tokio::test]
async fn list_sends_filters_sort_and_page() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tasks/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("page_size".into(), "50".into()),
            Matcher::UrlEncoded("ordering".into(), "-created_at".into()),
            Matcher::UrlEncoded("task_type".into(), "verify".into()),
            Matcher::UrlEncoded("status".into(), "running".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "results": [task_body(1, "verify", "running"), task_body(2, "warm_up", "pending")],
                "count": 52
            })
            .to_string(),
        )
        .create_async()
        .await;

    let query = TaskQuery {
        task_type: Some(TaskType::Verify),
        status: Some(TaskStatus::Running),
        page: PageQuery {
            page: 2,
            page_size: 50,
        },
        ..TaskQuery::default()
    };

    let page = api(&server).list_tasks(&query).await.unwrap();

    assert_eq!(page.count(), 52);
    assert_eq!(page.results().len(), 2);
    assert_eq!(page.results()[1].kind(), None);
    mock.assert_async().await;
}

#[tokio::test]
async fn cancel_posts_to_the_task_action() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/tasks/7/cancel/")
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    api(&server).cancel_task(7).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn retry_creates_a_task_for_the_failed_accounts_only() {
    let mut server = Server::new_async().await;
    let mut failed = task_body(12, "bind_card", "failed");
    failed["failed_account_ids"] = json!([7, 9]);
    failed["config"] = json!({ "card_id": 42 });

    let _mock = server
        .mock("GET", "/tasks/12/")
        .with_status(200)
        .with_body(failed.to_string())
        .create_async()
        .await;
    let create = server
        .mock("POST", "/tasks/")
        .match_body(Matcher::Json(json!({
            "task_type": "bind_card",
            "account_ids": [7, 9],
            "config": { "card_id": 42 }
        })))
        .with_status(201)
        .with_body(task_body(13, "bind_card", "pending").to_string())
        .expect(1)
        .create_async()
        .await;

    let api = Arc::new(api(&server));
    let task = api.get_task(12).await.unwrap();
    let submission = Submitter::new(api)
        .submit(&task.retry_draft().unwrap())
        .await
        .unwrap();

    assert_eq!(submission.task.id, 13);
    assert_eq!(submission.estimate.total(), 20);
    create.assert_async().await;
}

#[tokio::test]
async fn accounts_cards_and_balance_load_together() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/accounts/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "results": [{ "id": 1, "email": "a@example.com", "status": "active" }],
                "count": 1
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _mock = server
        .mock("GET", "/cards/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "results": [{ "id": 42, "card_number": "4111111111111234", "status": "active" }],
                "count": 1
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _mock = server
        .mock("GET", "/balance/")
        .with_status(200)
        .with_body(r#"{"balance": 120.5}"#)
        .create_async()
        .await;

    let api = api(&server);
    let query = PageQuery::default();
    let (accounts, cards, balance) = tokio::try_join!(
        api.list_accounts(&query),
        api.list_cards(&query),
        api.balance()
    )
    .unwrap();

    assert_eq!(accounts.results()[0].email, "a@example.com");
    assert_eq!(cards.results()[0].id, 42);
    assert_eq!(balance.balance, 120.5);
}

#[tokio::test]
async fn unreachable_backend_has_no_status() {
    let api = HttpApi::new("http://127.0.0.1:9/", None, Duration::from_secs(1)).unwrap();

    let err = api.balance().await.unwrap_err();

    assert!(matches!(err, AutoError::Api { status: None, .. }));
}
