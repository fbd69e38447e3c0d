use serde::Serialize;

use crate::api::{keys, run_mutation, ApiContext, MutationEffects};
use crate::errors::ClientError;
use crate::gateway::RequestOptions;
use crate::models::analysis::AnalysisResponse;

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

pub struct CandidatesApi {
    ctx: ApiContext,
}

impl CandidatesApi {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Runs a candidate search. The endpoint is public; a bearer token is sent
    /// only when a session exists. Each search is stored server-side as a new
    /// analysis, so every cached analysis listing goes stale.
    pub async fn search(&self, query: &str) -> Result<AnalysisResponse, ClientError> {
        let effects = MutationEffects {
            name: "candidates-search",
            invalidates: &[keys::analysis_all()],
            success: None,
        };
        let body = SearchRequest { query };
        let write = self
            .ctx
            .gateway
            .post("/candidates-search", &body, RequestOptions::default());
        run_mutation(&self.ctx, effects, write).await
    }
}
