//! Contract tests of the HTTP client against a mocked REST collection

use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use task_board::client::Client;
use task_board::error::ErrorKind;
use task_board::traits::TaskCollection;
use task_board::{NewTask, TaskId, TaskStatus};

fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn get_tasks() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "text": "Learn Go", "completed": false, "status": "todo", "startDate": "2024-06-01", "endDate": ""},
            {"id": 2, "text": "Learn React", "completed": false, "status": "done", "startDate": "2024-06-01", "endDate": "2024-06-02"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::from_url(server.uri()).unwrap();
    let tasks = client.get_tasks().await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id(), &TaskId::from(1));
    assert_eq!(tasks[1].status(), TaskStatus::Done);
    assert_eq!(tasks[1].end_date(), Some(date(2024, 6, 2)));
}

#[tokio::test]
async fn null_collection_is_empty() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("null\n", "application/json"))
        .mount(&server)
        .await;

    let client = Client::from_url(server.uri()).unwrap();
    assert!(client.get_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_task_request_format() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "text": "Buy milk",
            "startDate": "2024-06-01",
            "endDate": "",
            "status": "todo",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 3, "text": "Buy milk", "completed": false, "status": "todo", "startDate": "2024-06-01", "endDate": "",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::from_url(server.uri()).unwrap();
    let draft = NewTask::new("Buy milk").validate(date(2024, 6, 1)).unwrap();
    let created = client.create_task(&draft).await.unwrap();
    assert_eq!(created.id(), &TaskId::from(3));
    assert_eq!(created.text(), "Buy milk");
}

#[tokio::test]
async fn update_sends_the_whole_record() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    let record = json!({
        "id": 5, "text": "Buy milk", "completed": false, "status": "done", "startDate": "2024-06-01", "endDate": "2024-06-03",
    });
    Mock::given(method("PUT"))
        .and(path("/tasks/5"))
        .and(body_json(record.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(record.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::from_url(server.uri()).unwrap();
    let task = serde_json::from_value(record).unwrap();
    let updated = client.update_task(&task).await.unwrap();
    assert_eq!(updated, task);
}

#[tokio::test]
async fn delete_task() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/tasks/abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::from_url(server.uri()).unwrap();
    client.delete_task(&TaskId::from("abc")).await.unwrap();
}

#[tokio::test]
async fn non_success_statuses_are_errors() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/tasks/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("404 page not found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = Client::from_url(server.uri()).unwrap();
    let err = client.delete_task(&TaskId::from(9)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Status);
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    let err = client.get_tasks().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn invalid_bodies_are_errors() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = Client::from_url(server.uri()).unwrap();
    let err = client.get_tasks().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn unreachable_collection() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Nothing listens on the discard port
    let client = Client::from_url("http://127.0.0.1:9/").unwrap();
    let err = client.get_tasks().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}
