use crate::models::ApiResponse;
use crate::services::AchievementService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Result, ResponseError, web};

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    get,
    path = "/achievements",
    tag = "achievements",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Catalog with unlock state and progress"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_achievements(
    achievement_service: web::Data<AchievementService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match achievement_service.list_for_user(user_id).await {
        Ok(achievements) => Ok(HttpResponse::Ok().json(ApiResponse::success(achievements))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/achievements/evaluate",
    tag = "achievements",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Newly unlocked achievements"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn evaluate_achievements(
    achievement_service: web::Data<AchievementService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match achievement_service.evaluate_current(user_id).await {
        Ok(unlocked) => Ok(HttpResponse::Ok().json(ApiResponse::success(unlocked))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn achievements_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/achievements")
            .route("", web::get().to(list_achievements))
            .route("/evaluate", web::post().to(evaluate_achievements)),
    );
}
