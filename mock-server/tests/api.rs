use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Drink};
use serde_json::json;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_drinks_empty() {
    let resp = app().oneshot(empty_request("GET", "/api/drink")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let drinks: Vec<Drink> = body_json(resp).await;
    assert!(drinks.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_drink_returns_201_with_assigned_id() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/drink",
            r#"{"name":"Mojito","ingredients":["rum","mint"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let drink: serde_json::Value = body_json(resp).await;
    assert_eq!(
        drink,
        json!({"id": 1, "name": "Mojito", "ingredients": ["rum", "mint"]})
    );
}

#[tokio::test]
async fn create_drink_ignores_client_id() {
    let resp = app()
        .oneshot(json_request("POST", "/api/drink", r#"{"id":99,"name":"Sour"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let drink: Drink = body_json(resp).await;
    assert_eq!(drink.id, 1);
}

#[tokio::test]
async fn create_drink_rejects_non_object_body() {
    let resp = app()
        .oneshot(json_request("POST", "/api/drink", r#"["not","an","object"]"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_drink_not_found() {
    let resp = app().oneshot(empty_request("GET", "/api/drink/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_drink_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/drink/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_drink_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/api/drink/1", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_drink_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/api/drink/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/drink", r#"{"name":"Mojito"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let mojito: Drink = body_json(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/drink", r#"{"name":"Negroni"}"#))
        .await
        .unwrap();
    let negroni: Drink = body_json(resp).await;
    assert!(negroni.id > mojito.id);

    // list returns id order
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/drink"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let drinks: Vec<Drink> = body_json(resp).await;
    assert_eq!(drinks, vec![mojito.clone(), negroni.clone()]);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/drink/{}", mojito.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Drink = body_json(resp).await;
    assert_eq!(fetched, mojito);

    // update replaces every field but the id
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/drink/{}", mojito.id),
            r#"{"id":500,"name":"Daiquiri","glass":"coupe"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = body_json(resp).await;
    assert_eq!(
        updated,
        json!({"id": mojito.id, "name": "Daiquiri", "glass": "coupe"})
    );

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/drink/{}", mojito.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/drink/{}", mojito.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete holds only the survivor
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/drink"))
        .await
        .unwrap();
    let drinks: Vec<Drink> = body_json(resp).await;
    assert_eq!(drinks, vec![negroni]);
}
