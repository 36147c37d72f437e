use crate::models::ApiResponse;
use crate::services::TierService;
use actix_web::{HttpResponse, Result, ResponseError, web};

#[utoipa::path(
    get,
    path = "/users/{user_id}/badge",
    tag = "badge",
    params(
        ("user_id" = i64, Path, description = "Profile owner")
    ),
    responses(
        (status = 200, description = "Current badge tier and score")
    )
)]
pub async fn get_badge(
    tier_service: web::Data<TierService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();

    match tier_service.tier_score_of(user_id).await {
        Ok(score) => Ok(HttpResponse::Ok().json(ApiResponse::success(score))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/badge/history",
    tag = "badge",
    params(
        ("user_id" = i64, Path, description = "Profile owner")
    ),
    responses(
        (status = 200, description = "Timestamps of badge threshold crossings")
    )
)]
pub async fn get_badge_history(
    tier_service: web::Data<TierService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();

    match tier_service.tier_history_of(user_id).await {
        Ok(history) => Ok(HttpResponse::Ok().json(ApiResponse::success(history))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn badge_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users/{user_id}/badge")
            .route("", web::get().to(get_badge))
            .route("/history", web::get().to(get_badge_history)),
    );
}
