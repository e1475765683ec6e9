use contracts::shared::list_page::{ListResponse, Page};
use contracts::system::users::{AdminUser, AdminUserListParams, AdminUserPayload, UserId};

use crate::shared::api_utils::endpoints;
use crate::shared::http::{ApiClient, ApiError, ApiRequest};

// User records carry their own `status` column, so every call here is raw.

/// Fetch one page of users. Both list shapes of the backend are accepted.
pub async fn list(
    client: &ApiClient,
    params: &AdminUserListParams,
) -> Result<Page<AdminUser>, ApiError> {
    let response: ListResponse<AdminUser> = client
        .get(ApiRequest::new(endpoints::USERS).raw().query(params)?)
        .await?;
    Ok(response.into())
}

/// Fetch a single user
pub async fn detail(client: &ApiClient, id: &UserId) -> Result<AdminUser, ApiError> {
    client.get(ApiRequest::new(endpoints::user(id)).raw()).await
}

/// Create new user
pub async fn create(client: &ApiClient, payload: &AdminUserPayload) -> Result<AdminUser, ApiError> {
    client
        .post(ApiRequest::new(endpoints::USERS).raw().json(payload)?)
        .await
}

/// Partial update (PATCH): a payload without a password keeps the stored one
pub async fn update(
    client: &ApiClient,
    id: &UserId,
    payload: &AdminUserPayload,
) -> Result<AdminUser, ApiError> {
    client
        .patch(ApiRequest::new(endpoints::user(id)).raw().json(payload)?)
        .await
}

/// Delete user
pub async fn remove(client: &ApiClient, id: &UserId) -> Result<(), ApiError> {
    let _: serde_json::Value = client.delete(ApiRequest::new(endpoints::user(id)).raw()).await?;
    Ok(())
}
