use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use evently_core::auth::strategy::{
    AuthStrategy, Credentials, GoogleCodeStrategy, GoogleOAuthConfig,
};
use evently_sdk::objects::auth::GoogleCallbackQuery;

use super::{AuthApiError, issue_session};
use crate::state::AppState;

/// `GET /auth/google/callback` — OAuth code exchange.
///
/// Exchanges the authorization code for a profile and finds or creates the
/// matching account, then issues a session like any other login.
pub(super) async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<GoogleCallbackQuery>,
) -> Result<Response, AuthApiError> {
    let oauth = state.config.oauth.read().await;
    if !oauth.is_configured() {
        return Err(AuthApiError::OAuthUnavailable);
    }
    let config = GoogleOAuthConfig::new(
        oauth.google_client_id.clone(),
        oauth.google_client_secret.clone(),
        oauth.google_redirect_url.clone(),
    );
    drop(oauth);

    let strategy = GoogleCodeStrategy::new(state.db.clone(), state.http.clone(), config);
    let user = strategy
        .authenticate(Credentials::GoogleCode { code: query.code })
        .await?;

    issue_session(&state, &user, StatusCode::OK, "Login successful").await
}
