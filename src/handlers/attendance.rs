use crate::models::ApiResponse;
use crate::services::AttendanceService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Result, ResponseError, web};

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    post,
    path = "/attendance/check-in",
    tag = "attendance",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Checked in"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Already checked in today")
    )
)]
pub async fn check_in(
    attendance_service: web::Data<AttendanceService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match attendance_service.check_in(user_id).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(outcome))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/attendance",
    tag = "attendance",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Attendance stats"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_stats(
    attendance_service: web::Data<AttendanceService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match attendance_service.get_stats(user_id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn attendance_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attendance")
            .route("/check-in", web::post().to(check_in))
            .route("", web::get().to(get_stats)),
    );
}
