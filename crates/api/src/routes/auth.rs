//! Hue OAuth routes
//!
//! `GET /api/hue/auth` bounces the browser to the vendor's consent page;
//! the callback exchanges the code server-side and redirects back to the
//! dashboard with either the token or an error flag in the query string.

use axum::extract::{Query, State};
use axum::response::Redirect;
use hearth_domain::{Credential, Vendor};
use serde::Deserialize;
use tracing::{info, warn};

use super::ApiError;
use crate::context::AppContext;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// `GET /api/hue/auth`
pub async fn hue_auth(State(context): State<AppContext>) -> Result<Redirect, ApiError> {
    let redirect_uri = context.callback_url("/api/auth/callback/hue");
    let url = context.hue.auth_url(&redirect_uri)?;
    Ok(Redirect::temporary(&url))
}

/// `GET /api/auth/callback/hue`
pub async fn hue_callback(
    State(context): State<AppContext>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    let Some(code) = params.code else {
        warn!(error = ?params.error, "Hue callback arrived without a code");
        return Redirect::temporary("/?error=hue_auth_failed");
    };

    let redirect_uri = context.callback_url("/api/auth/callback/hue");
    match context.hue.exchange_code(&code, &redirect_uri).await {
        Ok(token) => {
            context.credentials.set(Credential::new(Vendor::Hue, token.clone()));
            info!("Hue token stored");
            Redirect::temporary(&format!("/?hue_token={}", urlencoding::encode(&token)))
        }
        Err(err) => {
            warn!(error = %err, "Hue code exchange failed");
            Redirect::temporary("/?error=hue_auth_failed")
        }
    }
}
