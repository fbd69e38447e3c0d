use crate::api::{keys, ApiContext};
use crate::errors::ClientError;
use crate::models::analysis::{GetAnalysisByIdResponse, ListAnalysisResponse};

pub const DEFAULT_LIMIT: u32 = 5;

pub struct AnalysisApi {
    ctx: ApiContext,
}

impl AnalysisApi {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// GET /analysis/list-all?page&limit
    pub async fn list(&self, page: u32, limit: u32) -> Result<ListAnalysisResponse, ClientError> {
        let gateway = &self.ctx.gateway;
        let query = [("page", page), ("limit", limit)];
        self.ctx
            .queries
            .fetch(keys::analysis_page(page, limit), || {
                gateway.get_with_query("/analysis/list-all", &query)
            })
            .await
    }

    pub async fn get(&self, id: &str) -> Result<GetAnalysisByIdResponse, ClientError> {
        let gateway = &self.ctx.gateway;
        let path = format!("/analysis/get-by-id/{id}");
        self.ctx
            .queries
            .fetch(keys::analysis_detail(id), || gateway.get(&path))
            .await
    }
}
