use tracing::info;

use crate::api::{run_mutation, ApiContext, MutationEffects};
use crate::errors::ClientError;
use crate::gateway::RequestOptions;
use crate::models::auth::{AuthResponse, LoginRequest, RegisterRequest};

pub struct AuthApi {
    ctx: ApiContext,
}

impl AuthApi {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// POST /auth/register, then establishes the session.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        let effects = MutationEffects {
            name: "register",
            invalidates: &[],
            success: Some("Account created successfully"),
        };
        run_mutation(&self.ctx, effects, self.authenticate("/auth/register", request)).await
    }

    /// POST /auth/login, then establishes the session.
    pub async fn login(&self, request: &LoginRequest) -> Result<(), ClientError> {
        let effects = MutationEffects {
            name: "login",
            invalidates: &[],
            success: Some("Logged in successfully"),
        };
        run_mutation(&self.ctx, effects, self.authenticate("/auth/login", request)).await
    }

    /// Ends the session locally and forgets everything cached for it.
    pub fn logout(&self) {
        self.ctx.session().logout();
        self.ctx.queries.clear();
        info!("Logged out");
    }

    async fn authenticate<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        // A 401 here means bad credentials, not an expired session.
        let response: AuthResponse = self
            .ctx
            .gateway
            .post(path, body, RequestOptions::NO_RETRY)
            .await?;
        self.ctx.session().establish(&response.access_token)?;
        // Anything cached belonged to whoever was here before.
        self.ctx.queries.clear();
        info!("Session established via {path}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::notify::Notice;
    use crate::session::ACCESS_TOKEN_KEY;
    use crate::test_support::{login_request, TestClient};

    #[tokio::test]
    async fn test_login_stores_token_and_authenticates() {
        let client = TestClient::start(false).await;
        client
            .ctx
            .auth()
            .login(&login_request("ana@example.com", "secret"))
            .await
            .unwrap();

        let session = client.ctx.session();
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("token-ana@example.com"));
        assert_eq!(
            client.storage_item(ACCESS_TOKEN_KEY).as_deref(),
            Some("token-ana@example.com")
        );
        assert_eq!(client.toasts.drain(), vec![Notice::success("Logged in successfully")]);
    }

    #[tokio::test]
    async fn test_bad_credentials_toast_without_redirect() {
        let client = TestClient::start(false).await;
        let err = client
            .ctx
            .auth()
            .login(&login_request("ana@example.com", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.notice_message().as_deref(), Some("Invalid credentials"));
        assert!(!client.ctx.session().is_authenticated());
        assert_eq!(client.history.current(), None);
        assert_eq!(client.toasts.drain(), vec![Notice::error("Invalid credentials")]);
    }

    #[tokio::test]
    async fn test_register_then_logout() {
        let client = TestClient::start(false).await;
        let request = crate::models::auth::RegisterRequest {
            name: "Bia".into(),
            email: "bia@example.com".into(),
            password: "secret".into(),
        };
        client.ctx.auth().register(&request).await.unwrap();
        assert!(client.ctx.session().is_authenticated());

        client.ctx.auth().logout();
        assert!(!client.ctx.session().is_authenticated());
        assert_eq!(client.storage_item(ACCESS_TOKEN_KEY), None);
    }

    #[tokio::test]
    async fn test_duplicate_registration_surfaces_server_message() {
        let client = TestClient::start(false).await;
        let request = crate::models::auth::RegisterRequest {
            name: "Lia".into(),
            email: "lia@example.com".into(),
            password: "secret".into(),
        };
        client.ctx.auth().register(&request).await.unwrap();
        client.ctx.auth().logout();
        client.toasts.drain();

        assert!(client.ctx.auth().register(&request).await.is_err());
        assert_eq!(client.toasts.drain(), vec![Notice::error("Email already in use")]);
    }
}
