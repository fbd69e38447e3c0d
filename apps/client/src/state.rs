use std::sync::Arc;

use crate::api::ApiContext;
use crate::config::Config;
use crate::errors::ClientError;
use crate::gateway::ApiGateway;
use crate::navigation::History;
use crate::notify::Toasts;
use crate::query::QueryClient;
use crate::session::storage::FileStorage;
use crate::session::Session;

/// Process-wide client state. Built once at startup and shared by every view.
/// Holds the single gateway, so authorization handling is registered exactly once.
pub struct ClientState {
    pub api: ApiContext,
    pub history: Arc<History>,
    pub toasts: Arc<Toasts>,
}

impl ClientState {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let session = Arc::new(Session::init(Box::new(FileStorage::new(
            &config.storage_path,
        ))));
        let history = Arc::new(History::default());
        let toasts = Arc::new(Toasts::default());
        let gateway = ApiGateway::new(
            &config.api_url,
            config.http_timeout,
            session,
            history.clone(),
        )?;

        Ok(Self {
            api: ApiContext {
                gateway: Arc::new(gateway),
                queries: Arc::new(QueryClient::default()),
                notifier: toasts.clone(),
            },
            history,
            toasts,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        self.api.session()
    }
}
