use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use super::{
    dto::{GameView, PressRequest, StartGameRequest, StartedGame},
    engine::Difficulty,
};
use crate::{auth::extractors::MaybeAuthUser, error::AppError, state::AppState};

pub fn game_routes() -> Router<AppState> {
    Router::new()
        .route("/challenges/codebreaker", post(create_game))
        .route(
            "/challenges/codebreaker/:id",
            get(get_game).delete(delete_game),
        )
        .route("/challenges/codebreaker/:id/start", post(start_game))
        .route("/challenges/codebreaker/:id/press", post(press_button))
}

/// A request without a JSON body means "no difficulty given". A body that
/// is present but does not parse is rejected.
fn requested_difficulty(
    body: Result<Json<StartGameRequest>, JsonRejection>,
) -> Result<Option<Difficulty>, AppError> {
    match body {
        Ok(Json(req)) => Ok(req.difficulty),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(None),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected game request body");
            Err(AppError::BadRequest(rejection.body_text()))
        }
    }
}

#[instrument(skip(state, caller, body))]
pub async fn create_game(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    body: Result<Json<StartGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GameView>), AppError> {
    let difficulty = requested_difficulty(body)?.unwrap_or(state.config.default_difficulty);
    let owner = caller.0.map(|auth| auth.sid);
    let view = state.games.create(difficulty, owner).await;
    Ok((StatusCode::CREATED, Json(view)))
}

#[instrument(skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameView>, AppError> {
    state.games.view(id).await.map(Json)
}

#[instrument(skip(state, body))]
pub async fn start_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<StartGameRequest>, JsonRejection>,
) -> Result<Json<StartedGame>, AppError> {
    let difficulty = requested_difficulty(body)?;
    state
        .games
        .start(id, difficulty, state.config.game_tick)
        .await
        .map(Json)
}

#[instrument(skip(state, body))]
pub async fn press_button(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PressRequest>,
) -> Result<Json<GameView>, AppError> {
    state.games.press(id, body.value).await.map(Json)
}

#[instrument(skip(state))]
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.games.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Game"))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{app::build_app, state::AppState};

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn easy_round_over_http() {
        let app = build_app(AppState::fake());

        let (status, created) = call(
            &app,
            post_json("/api/v1/challenges/codebreaker", json!({"difficulty": "easy"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["phase"], "idle");
        assert_eq!(created["buttons"], json!(["shield", "lock", "key", "zap"]));
        let id = created["id"].as_str().unwrap().to_string();

        let (status, started) = call(
            &app,
            post_json(&format!("/api/v1/challenges/codebreaker/{id}/start"), json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(started["phase"], "playing");
        assert_eq!(started["time_left"], 15);
        assert!(started.get("revealed").is_none());
        let sequence: Vec<u64> = started["sequence"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_u64().unwrap())
            .collect();
        assert_eq!(sequence.len(), 3);

        let (_, polled) = call(
            &app,
            Request::get(format!("/api/v1/challenges/codebreaker/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert!(polled.get("sequence").is_none());
        assert!(polled.get("revealed").is_none());

        let mut last = Value::Null;
        for v in &sequence {
            let (status, body) = call(
                &app,
                post_json(
                    &format!("/api/v1/challenges/codebreaker/{id}/press"),
                    json!({"value": v}),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            last = body;
        }
        assert_eq!(last["phase"], "success");
        assert_eq!(last["score"], 10);
        assert_eq!(last["level"], 2);

        let (status, _) = call(
            &app,
            post_json(
                &format!("/api/v1/challenges/codebreaker/{id}/press"),
                json!({"value": 0}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn bad_button_is_400_and_unknown_game_is_404() {
        let app = build_app(AppState::fake());
        let (_, created) = call(&app, post_json("/api/v1/challenges/codebreaker", json!({}))).await;
        assert_eq!(created["difficulty"], "medium");
        let id = created["id"].as_str().unwrap().to_string();
        call(
            &app,
            post_json(&format!("/api/v1/challenges/codebreaker/{id}/start"), json!({})),
        )
        .await;

        let (status, _) = call(
            &app,
            post_json(
                &format!("/api/v1/challenges/codebreaker/{id}/press"),
                json!({"value": 9}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let missing = uuid::Uuid::new_v4();
        let (status, _) = call(
            &app,
            Request::delete(format!("/api/v1/challenges/codebreaker/{missing}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_or_miscased_difficulty_is_400() {
        let app = build_app(AppState::fake());
        let (status, _) = call(
            &app,
            post_json("/api/v1/challenges/codebreaker", json!({"difficulty": "nightmare"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, created) = call(
            &app,
            Request::post("/api/v1/challenges/codebreaker")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["difficulty"], "medium");
        let id = created["id"].as_str().unwrap().to_string();

        let (status, _) = call(
            &app,
            post_json(
                &format!("/api/v1/challenges/codebreaker/{id}/start"),
                json!({"difficulty": "EASY"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, polled) = call(
            &app,
            Request::get(format!("/api/v1/challenges/codebreaker/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(polled["phase"], "idle");
    }

    #[tokio::test]
    async fn logout_discards_the_callers_games() {
        let app = build_app(AppState::fake());
        let (_, auth) = call(
            &app,
            post_json(
                "/api/v1/auth/login",
                json!({"email": "student@securepath.com", "password": "student123"}),
            ),
        )
        .await;
        let bearer = format!("Bearer {}", auth["access_token"].as_str().unwrap());

        let req = Request::post("/api/v1/challenges/codebreaker")
            .header(header::AUTHORIZATION, &bearer)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"difficulty": "easy"}).to_string()))
            .unwrap();
        let (_, owned) = call(&app, req).await;
        let owned_id = owned["id"].as_str().unwrap().to_string();
        let (_, anonymous) = call(&app, post_json("/api/v1/challenges/codebreaker", json!({}))).await;
        let anonymous_id = anonymous["id"].as_str().unwrap().to_string();

        let logout = Request::post("/api/v1/auth/logout")
            .header(header::AUTHORIZATION, &bearer)
            .body(Body::empty())
            .unwrap();
        let (status, _) = call(&app, logout).await;
        assert_eq!(status, StatusCode::OK);

        let get = |id: &str| {
            Request::get(format!("/api/v1/challenges/codebreaker/{id}"))
                .body(Body::empty())
                .unwrap()
        };
        let (status, _) = call(&app, get(&owned_id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&app, get(&anonymous_id)).await;
        assert_eq!(status, StatusCode::OK);
    }
}
