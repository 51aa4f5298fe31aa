//! The JSON REST API for categories.
//!
//! The HTML endpoints in the sibling modules respond with page fragments and
//! alerts; this module serves the same operations as plain JSON for
//! programmatic clients, and maps each error kind to a distinct status code.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    category::{
        CategoryData, CategoryId, CategoryName, create_category, delete_category,
        get_all_categories, get_category, update_category,
    },
};

/// The state needed by the JSON API handlers.
#[derive(Debug, Clone)]
pub struct CategoriesApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// An [Error] presented as a JSON response.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match self.0 {
            Error::NotFound | Error::UpdateMissingCategory | Error::DeleteMissingCategory => {
                StatusCode::NOT_FOUND
            }
            Error::DuplicateCategoryName => StatusCode::CONFLICT,
            Error::EmptyCategoryName => StatusCode::UNPROCESSABLE_ENTITY,
            ref error => {
                tracing::error!("An unexpected error occurred: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status_code,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

fn lock_connection(state: &CategoriesApiState) -> Result<std::sync::MutexGuard<'_, Connection>, ApiError> {
    state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        ApiError(Error::DatabaseLockError)
    })
}

/// Create a category from the name in the request body.
///
/// Any `id` in the body is ignored; the response carries the generated one.
pub async fn create_category_api(
    State(state): State<CategoriesApiState>,
    Json(data): Json<CategoryData>,
) -> Result<(StatusCode, Json<CategoryData>), ApiError> {
    let name = CategoryName::try_from(&data)?;
    let connection = lock_connection(&state)?;

    let category = create_category(name, &connection)?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// Get a single category by ID.
pub async fn get_category_api(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoriesApiState>,
) -> Result<Json<CategoryData>, ApiError> {
    let connection = lock_connection(&state)?;

    let category = get_category(category_id, &connection)?;

    Ok(Json(category.into()))
}

/// Get all categories.
pub async fn get_all_categories_api(
    State(state): State<CategoriesApiState>,
) -> Result<Json<Vec<CategoryData>>, ApiError> {
    let connection = lock_connection(&state)?;

    let categories = get_all_categories(&connection)?;

    Ok(Json(categories.into_iter().map(|c| c.into()).collect()))
}

/// Update a category's name. The ID comes from the path, never the body.
pub async fn update_category_api(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoriesApiState>,
    Json(data): Json<CategoryData>,
) -> Result<Json<CategoryData>, ApiError> {
    let name = CategoryName::try_from(&data)?;
    let connection = lock_connection(&state)?;

    let category = update_category(category_id, name, &connection)?;

    Ok(Json(category.into()))
}

/// Delete a category by ID.
pub async fn delete_category_api(
    Path(category_id): Path<CategoryId>,
    State(state): State<CategoriesApiState>,
) -> Result<String, ApiError> {
    let connection = lock_connection(&state)?;

    delete_category(category_id, &connection)?;

    Ok("Category deleted successfully.".to_owned())
}

#[cfg(test)]
mod categories_api_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, build_router, category::CategoryData};

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not create app state");

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn create_category_returns_created_with_generated_id() {
        let server = get_test_server();

        let response = server
            .post("/api/categories")
            .json(&json!({"name": "Groceries"}))
            .await;

        response.assert_status(StatusCode::CREATED);

        let category: CategoryData = response.json();
        assert!(category.id.is_some());
        assert_eq!(category.name, "Groceries");
    }

    #[tokio::test]
    async fn create_category_ignores_supplied_id() {
        let server = get_test_server();

        let response = server
            .post("/api/categories")
            .json(&json!({"id": 9001, "name": "Groceries"}))
            .await;

        response.assert_status(StatusCode::CREATED);

        let category: CategoryData = response.json();
        assert_eq!(category.id, Some(1));
    }

    #[tokio::test]
    async fn create_category_with_empty_name_returns_unprocessable_entity() {
        let server = get_test_server();

        let response = server
            .post("/api/categories")
            .json(&json!({"name": "   "}))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert!(body.get("error").is_some());

        // Nothing should have been persisted.
        let listing: Vec<CategoryData> = server.get("/api/categories").await.json();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn create_category_with_duplicate_name_returns_conflict() {
        let server = get_test_server();
        server
            .post("/api/categories")
            .json(&json!({"name": "Groceries"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/categories")
            .json(&json!({"name": "Groceries"}))
            .await;

        response.assert_status(StatusCode::CONFLICT);

        // The store size must be unchanged.
        let listing: Vec<CategoryData> = server.get("/api/categories").await.json();
        assert_eq!(listing.len(), 1);
    }

    #[tokio::test]
    async fn get_category_returns_matching_record() {
        let server = get_test_server();
        let created: CategoryData = server
            .post("/api/categories")
            .json(&json!({"name": "Groceries"}))
            .await
            .json();
        let id = created.id.expect("Created category should have an id");

        let response = server.get(&format!("/api/categories/{id}")).await;

        response.assert_status_ok();
        let category: CategoryData = response.json();
        assert_eq!(category, created);
    }

    #[tokio::test]
    async fn get_category_with_unknown_id_returns_not_found() {
        let server = get_test_server();

        let response = server.get("/api/categories/999999").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_all_categories_returns_empty_list_for_empty_store() {
        let server = get_test_server();

        let response = server.get("/api/categories").await;

        response.assert_status_ok();
        let listing: Vec<CategoryData> = response.json();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn update_category_changes_name_only() {
        let server = get_test_server();
        let created: CategoryData = server
            .post("/api/categories")
            .json(&json!({"name": "Groceries"}))
            .await
            .json();
        let id = created.id.unwrap();

        let response = server
            .put(&format!("/api/categories/{id}"))
            .json(&json!({"name": "Transport"}))
            .await;

        response.assert_status_ok();
        let updated: CategoryData = response.json();
        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.name, "Transport");

        let fetched: CategoryData = server.get(&format!("/api/categories/{id}")).await.json();
        assert_eq!(fetched.name, "Transport");
    }

    #[tokio::test]
    async fn update_category_with_unknown_id_returns_not_found() {
        let server = get_test_server();

        let response = server
            .put("/api/categories/999999")
            .json(&json!({"name": "Transport"}))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);

        let listing: Vec<CategoryData> = server.get("/api/categories").await.json();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn update_category_to_another_categorys_name_returns_conflict() {
        let server = get_test_server();
        server
            .post("/api/categories")
            .json(&json!({"name": "Groceries"}))
            .await
            .assert_status(StatusCode::CREATED);
        let other: CategoryData = server
            .post("/api/categories")
            .json(&json!({"name": "Transport"}))
            .await
            .json();

        let response = server
            .put(&format!("/api/categories/{}", other.id.unwrap()))
            .json(&json!({"name": "Groceries"}))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn delete_category_returns_confirmation_text() {
        let server = get_test_server();
        let created: CategoryData = server
            .post("/api/categories")
            .json(&json!({"name": "Groceries"}))
            .await
            .json();
        let id = created.id.unwrap();

        let response = server.delete(&format!("/api/categories/{id}")).await;

        response.assert_status_ok();
        assert_eq!(response.text(), "Category deleted successfully.");

        server
            .get(&format!("/api/categories/{id}"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_category_with_unknown_id_returns_not_found() {
        let server = get_test_server();

        let response = server.delete("/api/categories/999999").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    // The end-to-end scenario from the product notes: start empty, create,
    // reject the duplicate, rename, delete, end empty.
    #[tokio::test]
    async fn category_crud_scenario() {
        let server = get_test_server();

        let listing: Vec<CategoryData> = server.get("/api/categories").await.json();
        assert!(listing.is_empty());

        let created: CategoryData = server
            .post("/api/categories")
            .json(&json!({"name": "Groceries"}))
            .await
            .json();
        let id = created.id.expect("Created category should have an id");

        let listing: Vec<CategoryData> = server.get("/api/categories").await.json();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "Groceries");

        server
            .post("/api/categories")
            .json(&json!({"name": "Groceries"}))
            .await
            .assert_status(StatusCode::CONFLICT);
        let listing: Vec<CategoryData> = server.get("/api/categories").await.json();
        assert_eq!(listing.len(), 1);

        server
            .put(&format!("/api/categories/{id}"))
            .json(&json!({"name": "Transport"}))
            .await
            .assert_status_ok();
        let listing: Vec<CategoryData> = server.get("/api/categories").await.json();
        assert_eq!(listing[0].name, "Transport");

        server
            .delete(&format!("/api/categories/{id}"))
            .await
            .assert_status_ok();
        let listing: Vec<CategoryData> = server.get("/api/categories").await.json();
        assert!(listing.is_empty());
    }
}
