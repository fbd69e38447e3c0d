//! Query/mutation hooks, one module per API resource.
//!
//! Every read goes through the query cache under a key from `keys`.
//! Every write goes through `run_mutation`, which applies the cache-coherence
//! rule: on success, each key the write affects is invalidated and a success
//! toast is shown; on failure, the server message is toasted (nothing for a
//! 401, which the gateway already handled) and the error is returned.
//! There are no optimistic updates and no retries.

pub mod analysis;
pub mod areas;
pub mod auth;
pub mod candidates;
pub mod experiences;
pub mod keys;
pub mod skills;
pub mod users;

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::errors::ClientError;
use crate::gateway::ApiGateway;
use crate::notify::{Notice, Notifier};
use crate::query::{QueryClient, QueryKey};
use crate::session::Session;

/// Handles every hook needs. Cheap to clone.
#[derive(Clone)]
pub struct ApiContext {
    pub gateway: Arc<ApiGateway>,
    pub queries: Arc<QueryClient>,
    pub notifier: Arc<dyn Notifier>,
}

impl ApiContext {
    pub fn session(&self) -> &Arc<Session> {
        self.gateway.session()
    }

    pub fn auth(&self) -> auth::AuthApi {
        auth::AuthApi::new(self.clone())
    }

    pub fn users(&self) -> users::UsersApi {
        users::UsersApi::new(self.clone())
    }

    pub fn areas(&self) -> areas::AreasApi {
        areas::AreasApi::new(self.clone())
    }

    pub fn skills(&self) -> skills::SkillsApi {
        skills::SkillsApi::new(self.clone())
    }

    pub fn experiences(&self) -> experiences::ExperiencesApi {
        experiences::ExperiencesApi::new(self.clone())
    }

    pub fn analysis(&self) -> analysis::AnalysisApi {
        analysis::AnalysisApi::new(self.clone())
    }

    pub fn candidates(&self) -> candidates::CandidatesApi {
        candidates::CandidatesApi::new(self.clone())
    }
}

/// What a successful write means for the cache and the user.
pub struct MutationEffects<'a> {
    pub name: &'a str,
    pub invalidates: &'a [QueryKey],
    pub success: Option<&'a str>,
}

pub async fn run_mutation<T, Fut>(
    ctx: &ApiContext,
    effects: MutationEffects<'_>,
    write: Fut,
) -> Result<T, ClientError>
where
    Fut: Future<Output = Result<T, ClientError>>,
{
    match write.await {
        Ok(value) => {
            for key in effects.invalidates {
                ctx.queries.invalidate(key);
            }
            if let Some(message) = effects.success {
                ctx.notifier.notify(Notice::success(message));
            }
            debug!("mutation {} succeeded", effects.name);
            Ok(value)
        }
        Err(e) => {
            match e.notice_message() {
                Some(message) => ctx.notifier.notify(Notice::error(message)),
                None => debug!("mutation {} unauthorized; handled by gateway", effects.name),
            }
            Err(e)
        }
    }
}
