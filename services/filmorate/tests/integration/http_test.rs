use axum::http::StatusCode;
use serde_json::{Value, json};

use filmorate_core::middleware::REQUEST_ID_HEADER;

use crate::helpers::{film_body, test_server, user_body};

#[tokio::test]
async fn should_answer_health_probes() {
    let server = test_server();
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_attach_request_id() {
    let server = test_server();
    let response = server.get("/genres").await;
    assert!(response.headers().get(REQUEST_ID_HEADER).is_some());
}

#[tokio::test]
async fn should_create_user_defaulting_name_to_login() {
    let server = test_server();
    let response = server.post("/users").json(&user_body("dolores")).await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["login"], "dolores");
    assert_eq!(body["name"], "dolores");
    assert_eq!(body["birthday"], "1990-01-01");
}

#[tokio::test]
async fn should_reject_invalid_email_with_kind() {
    let server = test_server();
    let mut body = user_body("bad");
    body["email"] = json!("not-an-email");
    let response = server.post("/users").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["kind"], "INVALID_EMAIL");
}

#[tokio::test]
async fn should_reject_duplicate_email_with_conflict() {
    let server = test_server();
    server.post("/users").json(&user_body("teddy")).await;
    let response = server.post("/users").json(&user_body("teddy")).await;
    response.assert_status(StatusCode::CONFLICT);
    let error: Value = response.json();
    assert_eq!(error["kind"], "USER_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_update_user_by_body_id() {
    let server = test_server();
    let created: Value = server.post("/users").json(&user_body("maeve")).await.json();
    let mut body = user_body("maeve");
    body["id"] = created["id"].clone();
    body["name"] = json!("Maeve Millay");
    let response = server.put("/users").json(&body).await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["name"], "Maeve Millay");

    body["id"] = json!(999);
    server
        .put("/users")
        .json(&body)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_create_film_in_camel_case() {
    let server = test_server();
    let response = server.post("/films").json(&film_body("The Matrix")).await;
    response.assert_status(StatusCode::CREATED);
    let film: Value = response.json();
    assert_eq!(film["releaseDate"], "1999-03-31");
    assert_eq!(film["mpa"], json!({ "id": 4, "name": "R" }));
    assert_eq!(
        film["genres"],
        json!([{ "id": 4, "name": "Thriller" }, { "id": 6, "name": "Action" }])
    );
}

#[tokio::test]
async fn should_reject_film_with_unknown_genre() {
    let server = test_server();
    let mut body = film_body("Nowhere");
    body["genres"] = json!([{ "id": 1 }, { "id": 100 }]);
    let response = server.post("/films").json(&body).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let error: Value = response.json();
    assert_eq!(error["kind"], "GENRE_NOT_FOUND");

    let films: Value = server.get("/films").await.json();
    assert_eq!(films, json!([]));
}

#[tokio::test]
async fn should_reject_overlong_description() {
    let server = test_server();
    let mut body = film_body("Verbose");
    body["description"] = json!("x".repeat(201));
    let response = server.post("/films").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["kind"], "INVALID_DESCRIPTION");
}

#[tokio::test]
async fn should_like_and_rank_films() {
    let server = test_server();
    let first: Value = server.post("/films").json(&film_body("First")).await.json();
    let second: Value = server.post("/films").json(&film_body("Second")).await.json();
    let user: Value = server.post("/users").json(&user_body("fan")).await.json();
    let (first_id, second_id, user_id) = (&first["id"], &second["id"], &user["id"]);

    let liked: Value = server
        .put(&format!("/films/{second_id}/like/{user_id}"))
        .await
        .json();
    assert_eq!(liked["likes"], 1);
    // Repeated like is a no-op.
    server
        .put(&format!("/films/{second_id}/like/{user_id}"))
        .await
        .assert_status_ok();

    let popular: Value = server
        .get("/films/popular")
        .add_query_param("count", 2)
        .await
        .json();
    assert_eq!(popular[0]["id"], *second_id);
    assert_eq!(popular[1]["id"], *first_id);

    let count: Value = server.get(&format!("/films/{second_id}/likes")).await.json();
    assert_eq!(count, json!({ "filmId": second_id, "likes": 1 }));

    server
        .delete(&format!("/films/{second_id}/like/{user_id}"))
        .await
        .assert_status_ok();
    let response = server
        .delete(&format!("/films/{second_id}/like/{user_id}"))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = response.json();
    assert_eq!(error["kind"], "LIKE_NOT_FOUND");
}

#[tokio::test]
async fn should_reject_zero_popular_count() {
    let server = test_server();
    let response = server
        .get("/films/popular")
        .add_query_param("count", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["kind"], "INVALID_COUNT");
}

#[tokio::test]
async fn should_delete_film() {
    let server = test_server();
    let film: Value = server.post("/films").json(&film_body("Gone")).await.json();
    let id = &film["id"];
    server
        .delete(&format!("/films/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/films/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_run_friendship_flow_over_http() {
    let server = test_server();
    let one: Value = server.post("/users").json(&user_body("one")).await.json();
    let two: Value = server.post("/users").json(&user_body("two")).await.json();
    let three: Value = server.post("/users").json(&user_body("three")).await.json();
    let (one, two, three) = (&one["id"], &two["id"], &three["id"]);

    let friend: Value = server
        .put(&format!("/users/{one}/friends/{two}"))
        .await
        .json();
    assert_eq!(friend["id"], *two);
    assert_eq!(friend["friendship"], "pending");

    let friends: Value = server.get(&format!("/users/{two}/friends")).await.json();
    assert_eq!(friends, json!([]));

    let friend: Value = server
        .put(&format!("/users/{two}/friends/{one}"))
        .await
        .json();
    assert_eq!(friend["friendship"], "confirmed");

    server.put(&format!("/users/{one}/friends/{three}")).await;
    server.put(&format!("/users/{two}/friends/{three}")).await;
    let common: Value = server
        .get(&format!("/users/{one}/friends/common/{two}"))
        .await
        .json();
    assert_eq!(common.as_array().unwrap().len(), 1);
    assert_eq!(common[0]["id"], *three);

    server
        .delete(&format!("/users/{one}/friends/{two}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let friends: Value = server.get(&format!("/users/{one}/friends")).await.json();
    assert_eq!(friends.as_array().unwrap().len(), 1);
    assert_eq!(friends[0]["id"], *three);

    let response = server.put(&format!("/users/{one}/friends/{one}")).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["kind"], "SELF_FRIENDSHIP");
}

#[tokio::test]
async fn should_serve_reference_data() {
    let server = test_server();
    let genres: Value = server.get("/genres").await.json();
    assert_eq!(genres.as_array().unwrap().len(), 6);
    let rating: Value = server.get("/mpa/5").await.json();
    assert_eq!(rating, json!({ "id": 5, "name": "NC-17" }));
    server
        .get("/genres/42")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
