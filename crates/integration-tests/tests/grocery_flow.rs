//! End-to-end tests for signup, stores, items and shopping lists.
//!
//! These tests require a running `PostgreSQL` database; see the crate docs.
//!
//! Run with: cargo test -p grocery-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use grocery_integration_tests::{TestContext, id_from_location, location, unique_username};
use reqwest::StatusCode;

const USERNAME_TAKEN: &str = "That username is taken. Please choose a different one.";

async fn count_users(ctx: &TestContext, username: &str) -> i64 {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM grocery."user" WHERE username = $1"#)
        .bind(username)
        .fetch_one(&ctx.pool)
        .await
        .unwrap()
}

async fn count_items_at_store(ctx: &TestContext, store_id: i32) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM grocery.item WHERE store_id = $1")
        .bind(store_id)
        .fetch_one(&ctx.pool)
        .await
        .unwrap()
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_signup_then_login() {
    let ctx = TestContext::spawn().await;
    let client = TestContext::client();
    let username = unique_username("shopper");

    let resp = ctx.signup(&client, &username, "pw1").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
    assert_eq!(count_users(&ctx, &username).await, 1);

    let body = ctx.get(&client, "/login").await.text().await.unwrap();
    assert!(body.contains("Account Created"));

    let resp = ctx.login(&client, &username, "pw1").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let body = ctx.get(&client, "/").await.text().await.unwrap();
    assert!(body.contains(&format!("Signed in as {username}")));
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_signup_with_taken_username() {
    let ctx = TestContext::spawn().await;
    let username = unique_username("taken");

    let resp = ctx.signup(&TestContext::client(), &username, "pw1").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = ctx.signup(&TestContext::client(), &username, "other").await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.unwrap().contains(USERNAME_TAKEN));

    assert_eq!(count_users(&ctx, &username).await, 1);
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_wrong_password_creates_no_session() {
    let ctx = TestContext::spawn().await;
    let client = TestContext::client();
    let username = unique_username("wrongpw");
    ctx.signup(&client, &username, "pw1").await;

    let resp = ctx.login(&client, &username, "not-pw1").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(!body.contains("Signed in as"));
    assert!(!body.contains("field-error"));

    let resp = ctx.get(&client, "/shopping_list").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login?next=%2Fshopping_list");
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_unknown_user_login_is_silent() {
    let ctx = TestContext::spawn().await;
    let resp = ctx
        .login(&TestContext::client(), &unique_username("ghost"), "pw1")
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!resp.text().await.unwrap().contains("field-error"));
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_login_follows_local_next_only() {
    let ctx = TestContext::spawn().await;
    let client = TestContext::client();
    let username = unique_username("next");
    ctx.signup(&client, &username, "pw1").await;

    let form = [("username", username.as_str()), ("password", "pw1")];

    let resp = ctx
        .post_form(&client, "/login?next=%2Fshopping_list", &form)
        .await;
    assert_eq!(location(&resp), "/shopping_list");

    let resp = ctx
        .post_form(&client, "/login?next=https%3A%2F%2Fevil.example", &form)
        .await;
    assert_eq!(location(&resp), "/");
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_logout_ends_session() {
    let ctx = TestContext::spawn().await;
    let (client, _) = ctx.logged_in_client("logout").await;

    assert_eq!(
        ctx.get(&client, "/shopping_list").await.status(),
        StatusCode::OK
    );

    let resp = ctx.get(&client, "/logout").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let resp = ctx.get(&client, "/shopping_list").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

// ============================================================================
// Stores
// ============================================================================

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_store_round_trip() {
    let ctx = TestContext::spawn().await;
    let (client, username) = ctx.logged_in_client("stores").await;

    let store_id = ctx.create_store(&client, "Corner Shop", "1 Main St").await;

    let body = ctx
        .get(&client, &format!("/store/{store_id}"))
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("New store was created successfully."));
    assert!(body.contains("<h1>Corner Shop</h1>"));
    assert!(body.contains("1 Main St"));
    assert!(body.contains(&format!("Created by {username}")));

    let body = ctx.get(&client, "/").await.text().await.unwrap();
    assert!(body.contains(&format!(r#"<a href="/store/{store_id}">Corner Shop</a>"#)));
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_store_edit_only_touches_that_store() {
    let ctx = TestContext::spawn().await;
    let (client, _) = ctx.logged_in_client("edit").await;

    let first = ctx.create_store(&client, "First Shop", "1 First St").await;
    let second = ctx.create_store(&client, "Second Shop", "2 Second St").await;

    let resp = ctx
        .post_form(
            &client,
            &format!("/store/{first}"),
            &[("title", "Renamed Shop"), ("address", "1 First St")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/store/{first}"));

    let body = ctx
        .get(&client, &format!("/store/{first}"))
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Store updated successfully."));
    assert!(body.contains("<h1>Renamed Shop</h1>"));

    let body = ctx
        .get(&client, &format!("/store/{second}"))
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("<h1>Second Shop</h1>"));
    assert!(body.contains("2 Second St"));
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_store_edit_by_another_user_keeps_creator() {
    let ctx = TestContext::spawn().await;
    let (owner, owner_name) = ctx.logged_in_client("owner").await;
    let (other, _) = ctx.logged_in_client("other").await;

    let store_id = ctx.create_store(&owner, "Owner Shop", "3 Owner St").await;

    let resp = ctx
        .post_form(
            &other,
            &format!("/store/{store_id}"),
            &[("title", "Other Shop"), ("address", "3 Owner St")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = ctx
        .get(&other, &format!("/store/{store_id}"))
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("<h1>Other Shop</h1>"));
    assert!(body.contains(&format!("Created by {owner_name}")));
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_invalid_store_is_rejected() {
    let ctx = TestContext::spawn().await;
    let (client, _) = ctx.logged_in_client("badstore").await;

    let resp = ctx
        .post_form(&client, "/new_store", &[("title", "ab"), ("address", "")])
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Field must be between 3 and 80 characters long."));
    assert!(body.contains("This field is required."));
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_missing_store_and_item_are_not_found() {
    let ctx = TestContext::spawn().await;
    let (client, _) = ctx.logged_in_client("missing").await;

    let resp = ctx.get(&client, &format!("/store/{}", i32::MAX)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = ctx.get(&client, &format!("/item/{}", i32::MAX)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = ctx
        .post_form(&client, &format!("/add_to_shopping_list/{}", i32::MAX), &[])
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Items
// ============================================================================

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_item_edit_moves_it_to_another_store() {
    let ctx = TestContext::spawn().await;
    let (client, _) = ctx.logged_in_client("moveitem").await;

    let from = ctx.create_store(&client, "From Shop", "1 From St").await;
    let to = ctx.create_store(&client, "To Shop", "2 To St").await;
    let item_id = ctx.create_item(&client, "Bread", "2.25", "BAKERY", from).await;

    let to_id = to.to_string();
    let resp = ctx
        .post_form(
            &client,
            &format!("/item/{item_id}"),
            &[
                ("name", "Rye Bread"),
                ("price", "2.75"),
                ("category", "BAKERY"),
                ("photo_url", "https://images.example.com/rye.jpg"),
                ("store", to_id.as_str()),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/item/{item_id}"));

    assert_eq!(count_items_at_store(&ctx, from).await, 0);
    assert_eq!(count_items_at_store(&ctx, to).await, 1);

    let body = ctx
        .get(&client, &format!("/item/{item_id}"))
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Item updated successfully."));
    assert!(body.contains("<h1>Rye Bread</h1>"));
    assert!(body.contains("$2.75"));
}

// ============================================================================
// Shopping list
// ============================================================================

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_adding_item_twice_lists_it_twice() {
    let ctx = TestContext::spawn().await;
    let (client, _) = ctx.logged_in_client("twice").await;

    let store_id = ctx.create_store(&client, "Twice Shop", "9 Twice St").await;
    let item_id = ctx
        .create_item(&client, "Oat Milk", "3.10", "PANTRY", store_id)
        .await;

    for _ in 0..2 {
        let resp = ctx
            .post_form(&client, &format!("/add_to_shopping_list/{item_id}"), &[])
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), format!("/item/{item_id}"));
    }

    let body = ctx
        .get(&client, "/shopping_list")
        .await
        .text()
        .await
        .unwrap();
    assert_eq!(body.matches("Oat Milk</a>").count(), 2);
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_shopping_lists_are_per_user() {
    let ctx = TestContext::spawn().await;
    let (first, _) = ctx.logged_in_client("lista").await;
    let (second, _) = ctx.logged_in_client("listb").await;

    let store_id = ctx.create_store(&first, "Shared Shop", "5 Shared St").await;
    let item_id = ctx
        .create_item(&first, "Cheddar", "4.00", "DELI", store_id)
        .await;
    ctx.post_form(&first, &format!("/add_to_shopping_list/{item_id}"), &[])
        .await;

    let body = ctx.get(&second, "/shopping_list").await.text().await.unwrap();
    assert!(!body.contains("Cheddar"));
    assert!(body.contains("Your shopping list is empty."));
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL database"]
async fn test_alice_end_to_end() {
    let ctx = TestContext::spawn().await;
    let client = TestContext::client();
    let username = unique_username("alice");

    let resp = ctx.signup(&client, &username, "pw1").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let resp = ctx.login(&client, &username, "pw1").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let store_id = ctx.create_store(&client, "Corner Shop", "1 Main St").await;
    let store = store_id.to_string();

    let dairy = [
        ("name", "Milk"),
        ("price", "3.5"),
        ("category", "DAIRY"),
        ("photo_url", "https://images.example.com/milk.jpg"),
        ("store", store.as_str()),
    ];
    let resp = ctx.post_form(&client, "/new_item", &dairy).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.unwrap().contains("Not a valid choice."));
    assert_eq!(count_items_at_store(&ctx, store_id).await, 0);

    let pantry = [
        ("name", "Milk"),
        ("price", "3.5"),
        ("category", "PANTRY"),
        ("photo_url", "https://images.example.com/milk.jpg"),
        ("store", store.as_str()),
    ];
    let resp = ctx.post_form(&client, "/new_item", &pantry).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let item_id = id_from_location(&resp, "/item/");

    let body = ctx
        .get(&client, &format!("/item/{item_id}"))
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("$3.50"));
    assert!(body.contains("Pantry"));
    assert!(body.contains("Corner Shop"));

    let resp = ctx
        .post_form(&client, &format!("/add_to_shopping_list/{item_id}"), &[])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = ctx
        .get(&client, "/shopping_list")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Milk"));
}
