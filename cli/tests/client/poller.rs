use crate::context::{FakeApi, REJECTED, task};
use autoall::service::TaskListView;
use entities::{AutoError, PageQuery, TaskQuery, TaskStatus, TaskType};
use std::{sync::Arc, time::Duration};
use tokio::time::sleep;

const PERIOD: Duration = Duration::from_secs(30);

async fn settle() {
    sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn fetches_once_per_change_and_tick_and_never_after_unmount() {
    let api = Arc::new(FakeApi::default());
    let view = TaskListView::mount(api.clone(), TaskQuery::default(), PERIOD);

    settle().await;
    assert_eq!(api.list_calls(), 1);

    view.set_status(Some(TaskStatus::Failed));
    settle().await;
    assert_eq!(api.list_calls(), 2);

    // Same value again is not a change.
    view.set_status(Some(TaskStatus::Failed));
    settle().await;
    assert_eq!(api.list_calls(), 2);

    view.set_task_type(Some(TaskType::Verify));
    settle().await;
    view.set_page(2);
    settle().await;
    view.set_page_size(50);
    settle().await;
    view.set_ordering(Some("cost".to_string()));
    settle().await;
    assert_eq!(api.list_calls(), 6);

    assert_eq!(
        api.last_query(),
        Some(TaskQuery {
            task_type: Some(TaskType::Verify),
            status: Some(TaskStatus::Failed),
            ordering: Some("cost".to_string()),
            page: PageQuery {
                page: 2,
                page_size: 50
            },
        })
    );

    sleep(PERIOD).await;
    assert_eq!(api.list_calls(), 7);

    sleep(PERIOD).await;
    assert_eq!(api.list_calls(), 8);

    drop(view);
    sleep(PERIOD * 4).await;
    assert_eq!(api.list_calls(), 8);
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_the_timer() {
    let api = Arc::new(FakeApi::default());
    let view = TaskListView::mount(api.clone(), TaskQuery::default(), PERIOD);

    settle().await;
    view.unmount().await;

    sleep(PERIOD * 3).await;
    assert_eq!(api.list_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_view_abandons_the_fetch_in_flight() {
    let api = Arc::new(FakeApi::with_list_delay(Duration::from_secs(5)));
    let view = TaskListView::mount(api.clone(), TaskQuery::default(), PERIOD);
    let state = view.subscribe();

    settle().await;
    assert_eq!(api.list_calls(), 1);

    drop(view);
    sleep(Duration::from_secs(10)).await;

    assert_eq!(api.list_completed(), 0);
    assert_eq!(state.borrow().query, None);
}

#[tokio::test(start_paused = true)]
async fn state_mirrors_the_latest_response() {
    let api = Arc::new(FakeApi::default());
    let view = TaskListView::mount(api.clone(), TaskQuery::default(), PERIOD);

    settle().await;

    let state = view.state();
    assert_eq!(state.page.count, 1);
    assert_eq!(state.page.results, vec![task(1, "login", TaskStatus::Running)]);
    assert_eq!(state.query, Some(TaskQuery::default()));
    assert_eq!(state.error, None);
}

#[tokio::test(start_paused = true)]
async fn stale_fetches_are_discarded() {
    let api = Arc::new(FakeApi::with_list_delay(Duration::from_secs(5)));
    let view = TaskListView::mount(api.clone(), TaskQuery::default(), PERIOD);

    settle().await;
    assert_eq!(api.list_calls(), 1);

    view.set_task_type(Some(TaskType::Login));
    settle().await;
    assert_eq!(api.list_calls(), 2);

    sleep(Duration::from_secs(10)).await;

    assert_eq!(api.list_completed(), 1);
    let state = view.state();
    assert_eq!(
        state.query.and_then(|q| q.task_type),
        Some(TaskType::Login)
    );
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_is_reported_in_state() {
    let api = Arc::new(FakeApi::rejecting());
    let view = TaskListView::mount(api.clone(), TaskQuery::default(), PERIOD);

    settle().await;

    let state = view.state();
    assert_eq!(state.error, Some(AutoError::api(400, REJECTED)));
    assert!(state.page.results.is_empty());
}

#[tokio::test(start_paused = true)]
async fn row_actions_refresh_once_on_success() {
    let api = Arc::new(FakeApi::default());
    let view = TaskListView::mount(api.clone(), TaskQuery::default(), PERIOD);
    settle().await;

    view.cancel(5).await.unwrap();
    settle().await;
    assert_eq!(api.cancelled(), vec![5]);
    assert_eq!(api.list_calls(), 2);

    view.delete(6).await.unwrap();
    settle().await;
    assert_eq!(api.deleted(), vec![6]);
    assert_eq!(api.list_calls(), 3);

    let mut failed = task(12, "verify", TaskStatus::Failed);
    failed.failed_account_ids = vec![7, 9];
    failed
        .config
        .insert("api_key".to_string(), serde_json::json!("k1"));

    let submission = view.retry(&failed).await.unwrap();
    settle().await;

    let created = api.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].task_type, TaskType::Verify);
    assert_eq!(created[0].account_ids, vec![7, 9]);
    assert_eq!(submission.estimate.total(), 10);
    assert_eq!(api.list_calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn failed_row_actions_do_not_refresh() {
    let api = Arc::new(FakeApi::rejecting());
    let view = TaskListView::mount(api.clone(), TaskQuery::default(), PERIOD);
    settle().await;

    assert_eq!(view.cancel(5).await, Err(AutoError::api(400, REJECTED)));
    assert!(view.delete(6).await.is_err());

    let nothing_failed = task(13, "login", TaskStatus::Success);
    assert!(view.retry(&nothing_failed).await.is_err());

    settle().await;
    assert_eq!(api.list_calls(), 1);
    assert!(api.created().is_empty());
}
