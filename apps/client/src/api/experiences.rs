use serde::de::IgnoredAny;

use crate::api::{keys, run_mutation, ApiContext, MutationEffects};
use crate::errors::ClientError;
use crate::gateway::RequestOptions;
use crate::models::user::NewExperience;

pub struct ExperiencesApi {
    ctx: ApiContext,
}

impl ExperiencesApi {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Experiences are embedded in the profile, so a new one refreshes `me`.
    pub async fn create(&self, experience: &NewExperience) -> Result<(), ClientError> {
        let effects = MutationEffects {
            name: "create-experience",
            invalidates: &[keys::me()],
            success: Some("Experience added successfully"),
        };
        let write = async {
            self.ctx
                .gateway
                .post::<IgnoredAny, _>("/experiences/create", experience, RequestOptions::default())
                .await
                .map(|_| ())
        };
        run_mutation(&self.ctx, effects, write).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::notify::Notice;
    use crate::test_support::TestClient;

    fn experience(start: (i32, u32, u32), end: Option<(i32, u32, u32)>) -> NewExperience {
        let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        NewExperience {
            title: "Backend Developer".into(),
            description: "Payments platform".into(),
            start_date: date(start),
            end_date: end.map(date),
        }
    }

    #[tokio::test]
    async fn test_create_shows_up_in_profile() {
        let client = TestClient::start(true).await;
        client.ctx.users().me().await.unwrap();

        client
            .ctx
            .experiences()
            .create(&experience((2021, 3, 1), None))
            .await
            .unwrap();

        let me = client.ctx.users().me().await.unwrap().unwrap();
        assert_eq!(me.experiences.len(), 1);
        assert!(me.experiences[0].is_current());
        assert_eq!(client.hits("GET /users/me"), 2);
        assert_eq!(
            client.toasts.drain(),
            vec![Notice::success("Experience added successfully")]
        );
    }

    #[tokio::test]
    async fn test_validation_messages_are_joined() {
        let client = TestClient::start(true).await;
        let err = client
            .ctx
            .experiences()
            .create(&experience((2022, 1, 1), Some((2021, 1, 1))))
            .await
            .unwrap_err();
        assert_eq!(
            err.notice_message().as_deref(),
            Some("endDate must not be before startDate; dates are out of order")
        );
    }
}
