use serde::de::IgnoredAny;

use crate::api::{keys, run_mutation, ApiContext, MutationEffects};
use crate::errors::ClientError;
use crate::models::user::User;

pub struct UsersApi {
    ctx: ApiContext,
}

impl UsersApi {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// GET /users/me. Only runs while a session is active.
    pub async fn me(&self) -> Result<Option<User>, ClientError> {
        let gateway = &self.ctx.gateway;
        self.ctx
            .queries
            .fetch_if(self.ctx.session().is_authenticated(), keys::me(), || {
                gateway.get::<User>("/users/me")
            })
            .await
    }

    /// POST /users/summary/request. Asks for the profile evaluation.
    pub async fn request_summary(&self) -> Result<(), ClientError> {
        let effects = MutationEffects {
            name: "request-summary",
            invalidates: &[keys::me()],
            success: Some("Evaluation request sent successfully"),
        };
        let write = async {
            self.ctx
                .gateway
                .post_empty::<IgnoredAny>("/users/summary/request")
                .await
                .map(|_| ())
        };
        run_mutation(&self.ctx, effects, write).await
    }
}
