use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub google: ProviderStatus,
}

#[derive(Debug, Serialize)]
pub struct ProviderStatus {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// GET /auth/providers
/// Tells clients which external sign-in options the identity provider offers.
pub async fn handle_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    let google = match &state.config.google {
        Some(g) => ProviderStatus {
            enabled: true,
            client_id: Some(g.client_id.clone()),
        },
        None => ProviderStatus {
            enabled: false,
            client_id: None,
        },
    };
    Json(ProvidersResponse { google })
}
