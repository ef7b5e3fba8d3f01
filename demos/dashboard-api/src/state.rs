/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async Shoplytics SDK instance. Handles dispatching blocking SDK
    /// operations to a thread pool internally.
    pub sdk: shoplytics::AsyncShoplytics,
}
