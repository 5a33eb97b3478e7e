use crate::db::errors::DbError;
use crate::{
    AppState,
    api::models::users::CurrentUser,
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use sqlx::PgPool;
use tracing::{instrument, trace};

/// Extract user from bearer session token if present and valid
/// Returns:
/// - None: No Authorization header or not a Bearer token
/// - Some(Ok(user)): Valid session found
/// - Some(Err(error)): Bearer token present but malformed or unknown
#[instrument(skip(parts, db))]
async fn try_bearer_session_auth(parts: &Parts, db: &PgPool) -> Option<Result<CurrentUser>> {
    let auth_header = parts.headers.get(axum::http::header::AUTHORIZATION)?;

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid authorization header: {e}"),
            }));
        }
    };

    let token = auth_str.strip_prefix("Bearer ")?;

    let mut conn = match db.acquire().await {
        Ok(conn) => conn,
        Err(e) => return Some(Err(DbError::from(e).into())),
    };

    let session = match sqlx::query!(
        r#"
        SELECT s.user_id, u.email
        FROM sessions s
        INNER JOIN users u ON s.user_id = u.id
        WHERE s.token = $1
        "#,
        token
    )
    .fetch_optional(&mut *conn)
    .await
    {
        Ok(result) => result,
        Err(e) => return Some(Err(DbError::from(e).into())),
    };

    match session {
        Some(row) => Some(Ok(CurrentUser {
            id: row.user_id,
            email: row.email,
        })),
        None => Some(Err(Error::Unauthenticated {
            message: Some("Invalid session token".to_string()),
        })),
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match try_bearer_session_auth(parts, &state.db).await {
            Some(Ok(user)) => {
                trace!("Found session authenticated user: {}", user.id);
                Ok(user)
            }
            Some(Err(e)) => {
                trace!("Bearer session authentication failed: {:?}", e);
                // Collapse to 401 regardless of the failure shape; clients only
                // need to know their credentials were not accepted.
                match e {
                    Error::Database(DbError::Other(inner)) => Err(Error::Database(DbError::Other(inner))),
                    _ => Err(Error::Unauthenticated { message: None }),
                }
            }
            None => {
                trace!("No authentication credentials found in request");
                Err(Error::Unauthenticated { message: None })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        AppState, api::models::users::CurrentUser, test_utils::create_test_config, test_utils::create_user_with_session,
    };
    use axum::{extract::FromRequestParts as _, http::request::Parts};
    use sqlx::PgPool;

    fn create_test_parts_with_header(header_name: &str, header_value: &str) -> Parts {
        let request = axum::http::Request::builder()
            .uri("http://localhost/test")
            .header(header_name, header_value)
            .body(())
            .unwrap();

        let (parts, _body) = request.into_parts();
        parts
    }

    #[sqlx::test]
    async fn test_valid_session_extraction(pool: PgPool) {
        let state = AppState::builder().db(pool.clone()).config(create_test_config()).build();

        let (user, token) = create_user_with_session(&pool).await;
        let mut parts = create_test_parts_with_header("authorization", &format!("Bearer {token}"));

        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(result.is_ok());

        let current_user = result.unwrap();
        assert_eq!(current_user.id, user.id);
        assert_eq!(current_user.email, user.email);
    }

    #[sqlx::test]
    async fn test_unknown_token_returns_unauthorized(pool: PgPool) {
        let state = AppState::builder().db(pool.clone()).config(create_test_config()).build();

        let mut parts = create_test_parts_with_header("authorization", "Bearer not-a-real-token");

        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_missing_header_returns_unauthorized(pool: PgPool) {
        let state = AppState::builder().db(pool.clone()).config(create_test_config()).build();

        let request = axum::http::Request::builder().uri("http://localhost/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_non_bearer_scheme_returns_unauthorized(pool: PgPool) {
        let state = AppState::builder().db(pool.clone()).config(create_test_config()).build();

        let mut parts = create_test_parts_with_header("authorization", "Basic dXNlcjpwYXNz");

        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
