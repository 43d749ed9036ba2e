//! Spotify playback and auth routes
//!
//! Playback and device listing proxy straight to the adapter. Token
//! bootstrap has three shapes: the authorization-code flow (auth +
//! callback), and, behind the `spotify.legacy_auth` config flag, a manual
//! code-exchange page and an implicit-grant page where the token arrives
//! in the URL fragment and is extracted client-side.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use hearth_domain::{Credential, HearthError, Vendor};
use hearth_infra::integrations::spotify::AuthFlow;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::auth::CallbackParams;
use super::ApiError;
use crate::context::AppContext;

/// `GET /api/spotify/playback`
pub async fn playback(State(context): State<AppContext>) -> Result<Response, ApiError> {
    let state = context.spotify.playback_state().await?;
    Ok(Json(json!({ "playbackState": state })).into_response())
}

/// `GET /api/spotify/auth`
pub async fn auth(State(context): State<AppContext>) -> Result<Redirect, ApiError> {
    let redirect_uri = context.callback_url("/api/spotify/callback");
    let url = context.spotify_auth.authorize_url(AuthFlow::Code, &redirect_uri)?;
    Ok(Redirect::temporary(&url))
}

/// `GET /api/spotify/callback`
pub async fn callback(
    State(context): State<AppContext>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    let Some(code) = params.code else {
        warn!(error = ?params.error, "Spotify callback arrived without a code");
        return Redirect::temporary("/?error=spotify_auth_failed");
    };

    let redirect_uri = context.callback_url("/api/spotify/callback");
    match context.spotify_auth.exchange_code(&code, &redirect_uri).await {
        Ok(token) => {
            context.credentials.set(Credential::new(Vendor::Spotify, token.clone()));
            info!("Spotify token stored");
            Redirect::temporary(&format!("/?spotify_token={}", urlencoding::encode(&token)))
        }
        Err(err) => {
            warn!(error = %err, "Spotify code exchange failed");
            Redirect::temporary("/?error=spotify_auth_failed")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExchangeParams {
    pub code: Option<String>,
}

/// `GET /api/spotify/exchange` (legacy) — paste a code, read the token off
/// the page, set it in the environment by hand.
pub async fn exchange(
    State(context): State<AppContext>,
    Query(params): Query<ExchangeParams>,
) -> Result<Html<String>, ApiError> {
    let code = params
        .code
        .ok_or_else(|| HearthError::InvalidInput("code query parameter is required".into()))?;

    let redirect_uri = context.callback_url("/api/spotify/callback");
    let token = context.spotify_auth.exchange_code(&code, &redirect_uri).await?;
    context.credentials.set(Credential::new(Vendor::Spotify, token.clone()));

    Ok(Html(format!(
        "<!DOCTYPE html><html><body>\
         <h1>Spotify token</h1>\
         <p>The token below is now active for this process:</p>\
         <pre>{token}</pre>\
         </body></html>"
    )))
}

/// `GET /api/spotify/simple-auth` (legacy) — implicit grant. The token
/// comes back in the URL fragment, which never reaches the server, so a
/// small script forwards it as a query parameter the dashboard can read.
pub async fn simple_auth(State(context): State<AppContext>) -> Result<Html<String>, ApiError> {
    let redirect_uri = context.callback_url("/api/spotify/simple-auth");
    let authorize_url = context.spotify_auth.authorize_url(AuthFlow::Implicit, &redirect_uri)?;

    Ok(Html(format!(
        "<!DOCTYPE html><html><body>\
         <h1>Spotify quick connect</h1>\
         <p><a href=\"{authorize_url}\">Authorize with Spotify</a></p>\
         <script>\
         var match = window.location.hash.match(/access_token=([^&]+)/);\
         if (match) {{ window.location = '/?spotify_token=' + match[1]; }}\
         </script>\
         </body></html>"
    )))
}
