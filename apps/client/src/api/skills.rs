use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde::Serialize;

use crate::api::{keys, run_mutation, ApiContext, MutationEffects};
use crate::browse::{Catalog, CatalogPage};
use crate::errors::ClientError;
use crate::gateway::RequestOptions;
use crate::models::catalog::{CatalogQuery, Skill, SkillsResponse};
use crate::models::user::SkillRef;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const PICKER_LIMIT: u32 = 20;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddSkillRequest<'a> {
    skill_id: &'a str,
}

pub struct SkillsApi {
    ctx: ApiContext,
}

impl SkillsApi {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    pub async fn list(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<SkillsResponse, ClientError> {
        let query = CatalogQuery::new(page, limit, search);
        let gateway = &self.ctx.gateway;
        self.ctx
            .queries
            .fetch(keys::skills(page, limit, query.search), || {
                gateway.get_with_query("/skills", &query)
            })
            .await
    }

    /// Skills on the current user's profile. Each `id` is what `remove` takes.
    pub async fn user_skills(&self) -> Result<Vec<SkillRef>, ClientError> {
        let gateway = &self.ctx.gateway;
        self.ctx
            .queries
            .fetch(keys::user_skills(), || gateway.get("/skills/user"))
            .await
    }

    pub async fn add(&self, skill_id: &str) -> Result<(), ClientError> {
        let effects = MutationEffects {
            name: "add-skill",
            invalidates: &[keys::user_skills()],
            success: Some("Skill added successfully"),
        };
        let write = async {
            self.ctx
                .gateway
                .post::<IgnoredAny, _>(
                    "/skills/user",
                    &AddSkillRequest { skill_id },
                    RequestOptions::default(),
                )
                .await
                .map(|_| ())
        };
        run_mutation(&self.ctx, effects, write).await
    }

    pub async fn remove(&self, user_skill_id: &str) -> Result<(), ClientError> {
        let effects = MutationEffects {
            name: "remove-skill",
            invalidates: &[keys::user_skills()],
            success: Some("Skill removed successfully"),
        };
        let path = format!("/skills/user/{user_skill_id}");
        let write = async {
            self.ctx
                .gateway
                .delete::<IgnoredAny>(&path)
                .await
                .map(|_| ())
        };
        run_mutation(&self.ctx, effects, write).await
    }
}

#[async_trait]
impl Catalog for SkillsApi {
    type Item = Skill;

    async fn list(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<CatalogPage<Skill>, ClientError> {
        let response = SkillsApi::list(self, page, limit, search).await?;
        Ok(CatalogPage {
            items: response.skills,
            total: response.total,
            total_pages: response.total_pages,
        })
    }

    async fn choose(&self, item: &Skill) -> Result<(), ClientError> {
        self.add(&item.id).await
    }
}
