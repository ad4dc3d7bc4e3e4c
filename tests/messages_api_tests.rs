
use reqwest::StatusCode;
use serde_json::{json, Value};
use portfolio_contact::entities::message::Message;
use test_utils::*;

async fn seeded_app() -> (TestApp, Vec<Message>) {
    let app = TestApp::spawn().await;

    app.submit_from(&form("Alan Turing", "alan@example.com", "job", "Would you like to join our team?"), "192.0.2.1").await;
    app.submit_from(&form("Grace Hopper", "grace@example.com", "project", "Compilers are fun, let's write one."), "192.0.2.2").await;
    app.submit_from(&form("Edsger", "edsger@example.com", "other", "Goto statements considered harmful."), "192.0.2.3").await;

    let messages = app.list_messages().await;
    assert_eq!(messages.len(), 3);
    (app, messages)
}

#[actix_rt::test]
async fn list_returns_messages_newest_first() {
    let (_app, messages) = seeded_app().await;

    let names: Vec<&str> = messages.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Edsger", "Grace Hopper", "Alan Turing"]);
}

#[actix_rt::test]
async fn list_can_be_filtered_by_read_state_and_searched() {
    let (app, messages) = seeded_app().await;
    let grace = messages.iter().find(|m| m.name == "Grace Hopper").unwrap();

    let response = app.patch_read(json!({ "id": grace.id, "read": true })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let unread: Vec<Message> = app.get_messages("?status=unread").await.json().await.unwrap();
    assert_eq!(unread.len(), 2);
    assert!(unread.iter().all(|m| !m.read));

    let read: Vec<Message> = app.get_messages("?status=read").await.json().await.unwrap();
    assert_eq!(read.len(), 1);
    assert_eq!(read[0].id, grace.id);

    let by_body: Vec<Message> = app.get_messages("?q=COMPILERS").await.json().await.unwrap();
    assert_eq!(by_body.len(), 1);
    assert_eq!(by_body[0].name, "Grace Hopper");

    let by_email: Vec<Message> = app.get_messages("?q=alan%40example").await.json().await.unwrap();
    assert_eq!(by_email.len(), 1);

    let combined: Vec<Message> = app.get_messages("?status=read&q=alan").await.json().await.unwrap();
    assert!(combined.is_empty());
}

#[actix_rt::test]
async fn unknown_status_filter_is_a_bad_request() {
    let app = TestApp::spawn().await;

    let response = app.get_messages("?status=archived").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn stats_count_read_and_unread() {
    let (app, messages) = seeded_app().await;
    app.patch_read(json!({ "id": messages[0].id })).await;

    let stats: Value = app.client
        .get(format!("{}/api/messages/stats", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats, json!({ "total": 3, "unread": 2, "read": 1 }));
}

#[actix_rt::test]
async fn patch_marks_message_read_and_returns_it() {
    let (app, messages) = seeded_app().await;
    let target = &messages[1];

    let response = app.patch_read(json!({ "id": target.id, "read": true })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"]["id"], target.id);
    assert_eq!(body["message"]["read"], true);

    let listed = app.list_messages().await;
    assert!(listed.iter().find(|m| m.id == target.id).unwrap().read);

    let response = app.patch_read(json!({ "id": target.id, "read": false })).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"]["read"], false);
}

#[actix_rt::test]
async fn patch_without_read_flag_marks_read() {
    let (app, messages) = seeded_app().await;

    let response = app.patch_read(json!({ "id": messages[0].id })).await;

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"]["read"], true);
}

#[actix_rt::test]
async fn patch_with_null_read_flag_marks_read() {
    let (app, messages) = seeded_app().await;

    let response = app.patch_read(json!({ "id": messages[0].id, "read": null })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"]["read"], true);
}

#[actix_rt::test]
async fn patch_unknown_id_returns_404_and_changes_nothing() {
    let (app, before) = seeded_app().await;

    let response = app.patch_read(json!({ "id": 1, "read": true })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Message not found");
    assert_eq!(app.list_messages().await, before);
}

#[actix_rt::test]
async fn patch_without_id_is_a_bad_request() {
    let app = TestApp::spawn().await;

    let response = app.patch_read(json!({ "read": true })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn delete_removes_exactly_one_message() {
    let (app, messages) = seeded_app().await;
    let target = messages[0].id;

    let response = app.delete_message(&format!("?id={}", target)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "message": "Message deleted" }));

    let remaining = app.list_messages().await;
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|m| m.id != target));

    let again = app.delete_message(&format!("?id={}", target)).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn delete_requires_a_numeric_id() {
    let app = TestApp::spawn().await;

    let missing = app.delete_message("").await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "Message ID is required");

    let invalid = app.delete_message("?id=abc").await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let body: Value = invalid.json().await.unwrap();
    assert_eq!(body["error"], "Invalid message ID");
}

#[actix_rt::test]
async fn admin_token_guards_the_inbox_but_not_the_contact_form() {
    let app = TestApp::spawn_with(|config| {
        config.admin_token = Some("super-secret-admin-token".to_string());
    })
    .await;

    let response = app.submit(&valid_form()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let anonymous = app.get_messages("").await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    let body: Value = anonymous.json().await.unwrap();
    assert_eq!(body["error"], "Missing or invalid credentials");

    let wrong = app.client
        .get(format!("{}/api/messages", app.address))
        .bearer_auth("not-the-token")
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let authorized = app.client
        .get(format!("{}/api/messages", app.address))
        .bearer_auth("super-secret-admin-token")
        .send()
        .await
        .unwrap();
    assert_eq!(authorized.status(), StatusCode::OK);
    let messages: Vec<Message> = authorized.json().await.unwrap();
    assert_eq!(messages.len(), 1);

    let delete = app.delete_message(&format!("?id={}", messages[0].id)).await;
    assert_eq!(delete.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn admin_token_must_match_in_full() {
    let app = TestApp::spawn_with(|config| {
        config.admin_token = Some("super-secret-admin-token".to_string());
    })
    .await;

    for candidate in ["super-secret", "super-secret-admin-token-and-more", "SUPER-SECRET-ADMIN-TOKEN"] {
        let response = app.client
            .get(format!("{}/api/messages", app.address))
            .bearer_auth(candidate)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{candidate}");
    }
}
