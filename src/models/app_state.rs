use std::sync::Arc;

use crate::domain::MintService;

use super::MintMetadataResponse;

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub mint_service: Arc<MintService>,
    pub metadata: MintMetadataResponse,
}
