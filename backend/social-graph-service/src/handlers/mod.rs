/// HTTP surface for the social-graph engine.
///
/// Handlers are thin: parse the request, call the relevant service,
/// let `AppError`'s `ResponseError` impl pick the status code.
use crate::error::Result;
use crate::middleware::UserId;
use crate::repository::GraphRepository;
use crate::services::{MutationService, RecommendationEngine, TimelineService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state, constructed once at startup.
pub struct AppState {
    pub graph: Arc<dyn GraphRepository>,
    pub mutations: MutationService,
    pub recommendations: RecommendationEngine,
    pub timeline: TimelineService,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub image_url: Option<String>,
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    user: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let post = state
        .mutations
        .create_post(user.0, &req.content, req.image_url.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// GET /posts
pub async fn get_all_posts(state: web::Data<AppState>) -> Result<HttpResponse> {
    let posts = state.timeline.get_all_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /recommendations
pub async fn get_recommendations(
    state: web::Data<AppState>,
    user: UserId,
) -> Result<HttpResponse> {
    let users = state.recommendations.recommended_users(user.0).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// POST /users/{id}/follow
pub async fn follow_user(
    state: web::Data<AppState>,
    user: UserId,
    to: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.mutations.follow(user.0, *to).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /users/{id}/follow
pub async fn unfollow_user(
    state: web::Data<AppState>,
    user: UserId,
    to: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.mutations.unfollow(user.0, *to).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /users/{id}/followers
pub async fn get_followers(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let followers = state.graph.list_followers(*user_id).await?;
    Ok(HttpResponse::Ok().json(followers))
}

/// GET /users/{id}/following
pub async fn get_following(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let following = state.graph.list_following(*user_id).await?;
    Ok(HttpResponse::Ok().json(following))
}

/// Route table for the public operations.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/posts", web::post().to(create_post))
            .route("/posts", web::get().to(get_all_posts))
            .route("/recommendations", web::get().to(get_recommendations))
            .route("/users/{id}/follow", web::post().to(follow_user))
            .route("/users/{id}/follow", web::delete().to(unfollow_user))
            .route("/users/{id}/followers", web::get().to(get_followers))
            .route("/users/{id}/following", web::get().to(get_following)),
    );
}
