//! Leaderboard handlers.
//!
//! ```text
//! GET /api/v1/leaderboard/projects?limit=10
//! GET /api/v1/leaderboard/builders?limit=10
//! ```

use actix_web::{get, web};
use serde::Deserialize;

use crate::domain::Error;
use crate::domain::ports::{
    BuilderLeaderboardEntry, LeaderboardQuery, LeaderboardRequest, ProjectLeaderboardEntry,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query string shared by both leaderboards.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQueryParams {
    limit: Option<usize>,
}

impl LeaderboardQueryParams {
    fn into_request(self) -> LeaderboardRequest {
        self.limit
            .map(|limit| LeaderboardRequest { limit })
            .unwrap_or_default()
    }
}

/// Artifacts ranked by likes, plays, then recency.
///
/// Artifacts nobody has engaged with never appear, so the listing may be
/// shorter than asked for.
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard/projects",
    params(
        ("limit" = Option<usize>, Query, description = "Number of rows to return, default 20")
    ),
    responses(
        (status = 200, description = "Ranked artifacts", body = [ProjectLeaderboardEntry]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["leaderboard"],
    operation_id = "topProjects"
)]
#[get("/leaderboard/projects")]
pub async fn top_projects(
    state: web::Data<HttpState>,
    query: web::Query<LeaderboardQueryParams>,
) -> ApiResult<web::Json<Vec<ProjectLeaderboardEntry>>> {
    let entries = state
        .leaderboard
        .top_projects(query.into_inner().into_request())
        .await?;
    Ok(web::Json(entries))
}

/// Builders ranked by total likes, artifact count, then total plays.
#[utoipa::path(
    get,
    path = "/api/v1/leaderboard/builders",
    params(
        ("limit" = Option<usize>, Query, description = "Number of rows to return, default 20")
    ),
    responses(
        (status = 200, description = "Ranked builders", body = [BuilderLeaderboardEntry]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["leaderboard"],
    operation_id = "topBuilders"
)]
#[get("/leaderboard/builders")]
pub async fn top_builders(
    state: web::Data<HttpState>,
    query: web::Query<LeaderboardQueryParams>,
) -> ApiResult<web::Json<Vec<BuilderLeaderboardEntry>>> {
    let entries = state
        .leaderboard
        .top_builders(query.into_inner().into_request())
        .await?;
    Ok(web::Json(entries))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test as actix_test, web};
    use chrono::Utc;
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::Value;
    use uuid::Uuid;

    use super::*;
    use crate::domain::identity::UserId;
    use crate::domain::ports::{CreatorPayload, DEFAULT_LEADERBOARD_LIMIT, MockLeaderboardQuery};

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(top_projects)
                .service(top_builders),
        )
    }

    #[rstest]
    #[case("", DEFAULT_LEADERBOARD_LIMIT)]
    #[case("?limit=5", 5)]
    #[actix_web::test]
    async fn artifact_ranking_resolves_the_limit(#[case] suffix: &str, #[case] expected: usize) {
        let mut leaderboard = MockLeaderboardQuery::new();
        leaderboard
            .expect_top_projects()
            .with(eq(LeaderboardRequest { limit: expected }))
            .returning(|_| Ok(Vec::new()));
        let state = HttpState {
            leaderboard: Arc::new(leaderboard),
            ..HttpState::fixtures()
        };
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/leaderboard/projects{suffix}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());
    }

    #[actix_web::test]
    async fn builder_ranking_serialises_camel_case() {
        let mut leaderboard = MockLeaderboardQuery::new();
        leaderboard.expect_top_builders().returning(|_| {
            Ok(vec![BuilderLeaderboardEntry {
                id: UserId::random(),
                username: "SwiftPhoenix7".to_owned(),
                game_count: 2,
                total_likes: 9,
                total_plays: 40,
            }])
        });
        let state = HttpState {
            leaderboard: Arc::new(leaderboard),
            ..HttpState::fixtures()
        };
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/leaderboard/builders")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        let first = &value.as_array().expect("array")[0];
        assert_eq!(first.get("totalLikes").and_then(Value::as_i64), Some(9));
        assert_eq!(first.get("totalPlays").and_then(Value::as_i64), Some(40));
        assert_eq!(first.get("gameCount").and_then(Value::as_i64), Some(2));
    }

    #[actix_web::test]
    async fn artifact_entries_embed_their_creator() {
        let mut leaderboard = MockLeaderboardQuery::new();
        leaderboard.expect_top_projects().returning(|_| {
            Ok(vec![ProjectLeaderboardEntry {
                id: Uuid::new_v4(),
                name: "Space Blaster".to_owned(),
                emoji: "🚀".to_owned(),
                play_count: 20,
                like_count: 5,
                created_at: Utc::now(),
                creator: CreatorPayload {
                    id: UserId::random(),
                    username: "SwiftPhoenix7".to_owned(),
                    created_at: Utc::now(),
                    game_count: 1,
                },
            }])
        });
        let state = HttpState {
            leaderboard: Arc::new(leaderboard),
            ..HttpState::fixtures()
        };
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/leaderboard/projects")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        let creator = value.as_array().expect("array")[0]
            .get("creator")
            .expect("creator present")
            .clone();
        assert_eq!(
            creator.get("username").and_then(Value::as_str),
            Some("SwiftPhoenix7")
        );
    }
}
