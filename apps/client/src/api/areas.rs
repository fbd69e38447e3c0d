use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde::Serialize;

use crate::api::{keys, run_mutation, ApiContext, MutationEffects};
use crate::browse::{Catalog, CatalogPage};
use crate::errors::ClientError;
use crate::gateway::RequestOptions;
use crate::models::catalog::{Area, AreasResponse, CatalogQuery};
use crate::models::user::AreaRef;

pub const PICKER_LIMIT: u32 = 20;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetAreaRequest<'a> {
    area_id: &'a str,
}

pub struct AreasApi {
    ctx: ApiContext,
}

impl AreasApi {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    pub async fn list(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<AreasResponse, ClientError> {
        let query = CatalogQuery::new(page, limit, search);
        let gateway = &self.ctx.gateway;
        self.ctx
            .queries
            .fetch(keys::areas(page, limit, query.search), || {
                gateway.get_with_query("/areas", &query)
            })
            .await
    }

    /// The area currently set on the user's profile, if any.
    pub async fn user_area(&self) -> Result<Option<AreaRef>, ClientError> {
        let gateway = &self.ctx.gateway;
        self.ctx
            .queries
            .fetch(keys::user_area(), || gateway.get("/areas/user"))
            .await
    }

    pub async fn set_user_area(&self, area_id: &str) -> Result<(), ClientError> {
        let effects = MutationEffects {
            name: "set-user-area",
            invalidates: &[keys::user_area(), keys::me()],
            success: Some("Area set successfully"),
        };
        let write = async {
            self.ctx
                .gateway
                .post::<IgnoredAny, _>(
                    "/areas/user",
                    &SetAreaRequest { area_id },
                    RequestOptions::default(),
                )
                .await
                .map(|_| ())
        };
        run_mutation(&self.ctx, effects, write).await
    }
}

// Changing the area replaces the previous one, so it asks first.
#[async_trait]
impl Catalog for AreasApi {
    type Item = Area;

    async fn list(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<CatalogPage<Area>, ClientError> {
        let response = AreasApi::list(self, page, limit, search).await?;
        Ok(CatalogPage {
            items: response.areas,
            total: response.total,
            total_pages: response.total_pages,
        })
    }

    async fn choose(&self, item: &Area) -> Result<(), ClientError> {
        self.set_user_area(&item.id).await
    }

    fn requires_confirmation(&self) -> bool {
        true
    }
}
