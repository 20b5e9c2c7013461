mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create_category(server: &common::TestServer, token: &str, text: &str) -> Result<Value> {
    let res = server
        .client
        .post(server.url("/category"))
        .bearer_auth(token)
        .json(&json!({ "text": text }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(res.json::<Value>().await?)
}

async fn todo_ids(server: &common::TestServer, token: &str, cat_id: i64) -> Result<Vec<i64>> {
    let res = server
        .client
        .get(server.url(&format!("/category/{}/todos", cat_id)))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let ids = body
        .as_array()
        .map(|todos| todos.iter().filter_map(|t| t["id"].as_i64()).collect())
        .unwrap_or_default();
    Ok(ids)
}

#[tokio::test]
async fn create_category_returns_owned_category() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (alice, token) = server.user("alice").await?;

    let work = create_category(&server, &token, "Work").await?;
    let home = create_category(&server, &token, "Home").await?;

    assert_eq!(work["text"], "Work");
    assert_eq!(work["user_id"], alice.id);
    assert_ne!(work["id"], home["id"]);
    Ok(())
}

#[tokio::test]
async fn create_category_ignores_client_supplied_owner() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (alice, token) = server.user("alice").await?;
    let (bob, _) = server.user("bob").await?;

    let res = server
        .client
        .post(server.url("/category"))
        .bearer_auth(&token)
        .json(&json!({ "text": "Sneaky", "user_id": bob.id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["user_id"], alice.id);
    Ok(())
}

#[tokio::test]
async fn owner_scenario_attach_then_list() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (alice, alice_token) = server.user("alice").await?;
    let (bob, _) = server.user("bob").await?;

    let work = create_category(&server, &alice_token, "Work").await?;
    let cat_id = work["id"].as_i64().unwrap_or_default();
    let bobs_todo = server.todo(&bob, "Bob's chore").await?;
    let alices_todo = server.todo(&alice, "Write report").await?;

    // Alice cannot tag Bob's todo
    let res = server
        .client
        .post(server.url(&format!("/todo/{}/category/{}", bobs_todo.id, cat_id)))
        .bearer_auth(&alice_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Not authorized");

    // Alice tags her own todo
    let res = server
        .client
        .post(server.url(&format!("/todo/{}/category/{}", alices_todo.id, cat_id)))
        .bearer_auth(&alice_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Category 'Work' added to todo 'Write report'");

    assert_eq!(todo_ids(&server, &alice_token, cat_id).await?, vec![alices_todo.id]);
    Ok(())
}

#[tokio::test]
async fn attach_is_idempotent_and_detach_tolerates_absence() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (alice, token) = server.user("alice").await?;
    let cat_id = create_category(&server, &token, "Errands").await?["id"]
        .as_i64()
        .unwrap_or_default();
    let todo = server.todo(&alice, "Buy milk").await?;
    let path = format!("/todo/{}/category/{}", todo.id, cat_id);

    for _ in 0..2 {
        let res = server.client.post(server.url(&path)).bearer_auth(&token).send().await?;
        assert_eq!(res.status(), StatusCode::OK);
    }
    assert_eq!(todo_ids(&server, &token, cat_id).await?, vec![todo.id]);

    for _ in 0..2 {
        let res = server.client.delete(server.url(&path)).bearer_auth(&token).send().await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body = res.json::<Value>().await?;
        assert_eq!(body["message"], "Category 'Errands' removed from todo 'Buy milk'");
    }
    assert!(todo_ids(&server, &token, cat_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_resources_are_not_found() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (alice, token) = server.user("alice").await?;
    let cat_id = create_category(&server, &token, "Work").await?["id"]
        .as_i64()
        .unwrap_or_default();
    let todo = server.todo(&alice, "Report").await?;

    for path in [
        format!("/todo/999/category/{}", cat_id),
        format!("/todo/{}/category/999", todo.id),
    ] {
        let res = server.client.post(server.url(&path)).bearer_auth(&token).send().await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = res.json::<Value>().await?;
        assert_eq!(body["message"], "Todo or Category not found");

        let res = server.client.delete(server.url(&path)).bearer_auth(&token).send().await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    let res = server
        .client
        .get(server.url("/category/999/todos"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Category not found");
    Ok(())
}

#[tokio::test]
async fn foreign_category_listing_and_detach_are_forbidden() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (alice, alice_token) = server.user("alice").await?;
    let (_bob, bob_token) = server.user("bob").await?;
    let cat_id = create_category(&server, &alice_token, "Private").await?["id"]
        .as_i64()
        .unwrap_or_default();
    let todo = server.todo(&alice, "Secret plan").await?;
    let path = format!("/todo/{}/category/{}", todo.id, cat_id);

    let res = server.client.post(server.url(&path)).bearer_auth(&alice_token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .client
        .get(server.url(&format!("/category/{}/todos", cat_id)))
        .bearer_auth(&bob_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.client.delete(server.url(&path)).bearer_auth(&bob_token).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Association untouched by the rejected detach
    assert_eq!(todo_ids(&server, &alice_token, cat_id).await?, vec![todo.id]);
    Ok(())
}

#[tokio::test]
async fn attaching_anothers_category_to_own_todo_is_allowed() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (_alice, alice_token) = server.user("alice").await?;
    let (bob, bob_token) = server.user("bob").await?;
    let cat_id = create_category(&server, &alice_token, "Work").await?["id"]
        .as_i64()
        .unwrap_or_default();
    let bobs_todo = server.todo(&bob, "Bob's chore").await?;

    let res = server
        .client
        .post(server.url(&format!("/todo/{}/category/{}", bobs_todo.id, cat_id)))
        .bearer_auth(&bob_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(todo_ids(&server, &alice_token, cat_id).await?, vec![bobs_todo.id]);
    Ok(())
}

#[tokio::test]
async fn malformed_category_body_is_rejected() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (_alice, token) = server.user("alice").await?;

    let res = server
        .client
        .post(server.url("/category"))
        .bearer_auth(&token)
        .json(&json!({ "label": "Work" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "UNPROCESSABLE_ENTITY");

    let res = server
        .client
        .post(server.url("/category"))
        .bearer_auth(&token)
        .header("content-type", "application/json")
        .body("{\"text\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "BAD_REQUEST");

    let res = server
        .client
        .post(server.url("/category"))
        .bearer_auth(&token)
        .body("text=Work")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "UNSUPPORTED_MEDIA_TYPE");
    Ok(())
}

#[tokio::test]
async fn non_numeric_ids_are_rejected_as_json() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (_alice, token) = server.user("alice").await?;

    for (method, path) in [
        (reqwest::Method::GET, "/category/abc/todos"),
        (reqwest::Method::POST, "/todo/abc/category/1"),
        (reqwest::Method::DELETE, "/todo/1/category/xyz"),
    ] {
        let res = server
            .client
            .request(method, server.url(path))
            .bearer_auth(&token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", path);
        let body = res.json::<Value>().await?;
        assert_eq!(body["error"], true);
        assert_eq!(body["code"], "BAD_REQUEST");
    }
    Ok(())
}

#[tokio::test]
async fn success_bodies_are_bare() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (alice, token) = server.user("alice").await?;

    let category = create_category(&server, &token, "Work").await?;
    assert!(category.get("success").is_none(), "unexpected envelope: {}", category);
    assert!(category.get("data").is_none());
    let cat_id = category["id"].as_i64().unwrap_or_default();
    assert!(cat_id > 0);
    assert_eq!(category, json!({ "id": cat_id, "text": "Work", "user_id": alice.id }));

    let todo = server.todo(&alice, "Report").await?;
    let res = server
        .client
        .post(server.url(&format!("/todo/{}/category/{}", todo.id, cat_id)))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({ "message": "Category 'Work' added to todo 'Report'" }));

    let res = server
        .client
        .get(server.url(&format!("/category/{}/todos", cat_id)))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!([{ "id": todo.id, "text": "Report", "user_id": alice.id }]));
    Ok(())
}
