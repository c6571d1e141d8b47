use crate::og::OgResolver;

/// Shared application state passed to all handlers.
/// The resolver is built once at startup so its HTTP connection pool is
/// reused across requests.
#[derive(Clone)]
pub struct AppState {
    pub resolver: OgResolver,
}
