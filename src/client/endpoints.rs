//! Thin wrappers over the NutriPlan resource endpoints.
//!
//! Pure pass-through: bodies and responses travel as raw JSON, bearer
//! authentication comes from the client's request interceptor, and errors
//! are whatever [`ApiError`] the pipeline produced. No validation and no
//! retry policy live here.

use serde_json::Value;

use super::http::{ApiClient, ApiError, HttpTransport};

/// Fetches the caller's dependents.
pub async fn my_dependents<T: HttpTransport>(api: &ApiClient<T>) -> Result<Value, ApiError> {
    api.get("/api/v1/dependents/my").await
}

/// Registers a new dependent.
pub async fn create_dependent<T: HttpTransport>(
    api: &ApiClient<T>,
    dependent: &Value,
) -> Result<Value, ApiError> {
    api.post("/api/v1/dependents/create", dependent).await
}

/// Fetches a dependent's meal plan for a day (`YYYY-MM-DD`).
pub async fn dependent_plan_by_date<T: HttpTransport>(
    api: &ApiClient<T>,
    dependent_id: i64,
    date: &str,
) -> Result<Value, ApiError> {
    api.get(&format!(
        "/api/v1/dependents/{}/plan/date/{}",
        dependent_id, date
    ))
    .await
}

/// Fetches full details for a recipe.
pub async fn recipe_details<T: HttpTransport>(
    api: &ApiClient<T>,
    recipe_id: i64,
) -> Result<Value, ApiError> {
    api.get(&format!("/api/v1/recipes/{}", recipe_id)).await
}

/// Updates a medication's details.
pub async fn update_medication_details<T: HttpTransport>(
    api: &ApiClient<T>,
    medication_id: i64,
    details: &Value,
) -> Result<Value, ApiError> {
    api.patch(&format!("/api/v1/medications/{}", medication_id), details)
        .await
}

/// Updates a medication's intake status.
pub async fn update_medication_status<T: HttpTransport>(
    api: &ApiClient<T>,
    medication_id: i64,
    status: &Value,
) -> Result<Value, ApiError> {
    api.patch(
        &format!("/api/v1/medications/{}/medication", medication_id),
        status,
    )
    .await
}

/// Fetches the caller's notifications.
pub async fn my_notifications<T: HttpTransport>(api: &ApiClient<T>) -> Result<Value, ApiError> {
    api.get("/api/v1/notifications/me").await
}

/// Searches recipes by free-text query.
pub async fn search_recipes<T: HttpTransport>(
    api: &ApiClient<T>,
    query: &str,
) -> Result<Value, ApiError> {
    api.get(&format!(
        "/api/v1/meals/search?query={}",
        urlencoding::encode(query)
    ))
    .await
}

/// Replaces a planned meal with another recipe.
pub async fn replace_meal<T: HttpTransport>(
    api: &ApiClient<T>,
    meal_id: i64,
    replacement: &Value,
) -> Result<Value, ApiError> {
    api.put(&format!("/api/v1/meals/{}/replace", meal_id), replacement)
        .await
}

/// Updates a planned meal's details.
pub async fn update_meal_details<T: HttpTransport>(
    api: &ApiClient<T>,
    meal_id: i64,
    details: &Value,
) -> Result<Value, ApiError> {
    api.patch(&format!("/api/v1/meals/{}/details", meal_id), details)
        .await
}

/// Updates a planned meal's status (eaten, skipped, ...).
pub async fn update_meal_status<T: HttpTransport>(
    api: &ApiClient<T>,
    meal_id: i64,
    status: &Value,
) -> Result<Value, ApiError> {
    api.patch(&format!("/api/v1/meals/{}", meal_id), status).await
}

/// Fetches the caller's meal plan for a day (`YYYY-MM-DD`).
pub async fn plan_by_date<T: HttpTransport>(
    api: &ApiClient<T>,
    date: &str,
) -> Result<Value, ApiError> {
    api.get(&format!("/api/v1/meals/date/{}", date)).await
}

/// Fetches a user's health form.
pub async fn health_form<T: HttpTransport>(
    api: &ApiClient<T>,
    user_id: i64,
) -> Result<Value, ApiError> {
    api.get(&format!("/api/v1/health-form/{}", user_id)).await
}

/// Saves a user's health form.
pub async fn save_health_form<T: HttpTransport>(
    api: &ApiClient<T>,
    user_id: i64,
    form: &Value,
) -> Result<Value, ApiError> {
    api.put(&format!("/api/v1/health-form/{}", user_id), form).await
}
