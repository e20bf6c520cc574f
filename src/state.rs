use std::sync::Arc;

use crate::auth::TokenService;
use crate::store::Store;

/// Shared application state handed to every handler and the auth middleware.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService) -> Self {
        Self { store, tokens: Arc::new(tokens) }
    }
}
