use crate::db::logs::LogStore;
use crate::db::users::UserStore;
use crate::services::gemini::GeminiClient;

/// Shared handles cloned into every handler. Config is consumed at startup;
/// nothing request-scoped needs it.
#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub logs: LogStore,
    pub gemini: GeminiClient,
}
