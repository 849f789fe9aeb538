use crate::context::{FakeApi, REJECTED};
use autoall::service::Submitter;
use entities::{AutoError, NO_TARGETS_SELECTED_ERR, TaskDraft, TaskType};
use serde_json::json;
use std::sync::Arc;

fn one_click() -> TaskDraft {
    let mut draft = TaskDraft::new(TaskType::OneClick);
    draft.select_all([1, 2, 3]);
    draft.set_api_key(Some("k1".to_string()));
    draft.set_card_id(Some(42));
    draft
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_api() {
    let api = Arc::new(FakeApi::default());
    let submitter = Submitter::new(api.clone());

    let mut draft = one_click();
    draft.clear_selection();

    let Err(AutoError::Validation(errors)) = submitter.submit(&draft).await else {
        panic!("empty selection was submitted");
    };
    assert_eq!(
        errors.get("account_ids").map(|e| e.message()),
        Some(NO_TARGETS_SELECTED_ERR)
    );
    assert!(api.created().is_empty());
    assert!(!submitter.is_submitting());
}

#[tokio::test]
async fn submits_exactly_one_minimal_payload() {
    let api = Arc::new(FakeApi::default());
    let submitter = Submitter::new(api.clone());

    let submission = submitter.submit(&one_click()).await.unwrap();

    assert_eq!(submission.estimate.total(), 54);
    assert_eq!(submission.task.total_count, 3);

    let created = api.created();
    assert_eq!(created.len(), 1);
    assert_eq!(
        serde_json::to_value(&created[0]).unwrap(),
        json!({
            "task_type": "one_click",
            "account_ids": [1, 2, 3],
            "config": { "api_key": "k1", "card_id": 42 }
        })
    );
}

#[tokio::test]
async fn type_change_before_submit_strips_stale_fields() {
    let api = Arc::new(FakeApi::default());
    let submitter = Submitter::new(api.clone());

    let mut draft = one_click();
    draft.select_all([4, 5]);
    draft.set_task_type(TaskType::Login);

    let submission = submitter.submit(&draft).await.unwrap();

    assert_eq!(submission.estimate.total(), 5);
    assert_eq!(api.created()[0].config, serde_json::Map::new());
}

#[tokio::test]
async fn server_error_is_surfaced_and_not_retried() {
    let api = Arc::new(FakeApi::rejecting());
    let submitter = Submitter::new(api.clone());

    let result = submitter.submit(&one_click()).await;

    assert_eq!(result, Err(AutoError::api(400, REJECTED)));
    assert_eq!(api.created().len(), 1);
    assert!(!submitter.is_submitting());
}

#[tokio::test]
async fn second_submit_while_in_flight_is_rejected() {
    let api = Arc::new(FakeApi::gated());
    let submitter = Arc::new(Submitter::new(api.clone()));

    let first = tokio::spawn({
        let submitter = submitter.clone();
        async move { submitter.submit(&one_click()).await }
    });

    while api.created().is_empty() {
        tokio::task::yield_now().await;
    }
    assert!(submitter.is_submitting());

    assert_eq!(submitter.submit(&one_click()).await, Err(AutoError::Busy));
    assert_eq!(api.created().len(), 1);

    api.open_gate();
    assert!(first.await.unwrap().is_ok());
    assert!(!submitter.is_submitting());

    api.open_gate();
    assert!(submitter.submit(&one_click()).await.is_ok());
    assert_eq!(api.created().len(), 2);
}
