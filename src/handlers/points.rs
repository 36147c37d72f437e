use crate::error::AppError;
use crate::models::{ApiResponse, AwardRequest};
use crate::models::pagination::PaginationParams;
use crate::services::PointService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Result, ResponseError, web};

fn get_user_id_from_request(req: &HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[utoipa::path(
    get,
    path = "/points",
    tag = "points",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Point total and level progress"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_points(
    point_service: web::Data<PointService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match point_service.get_points(user_id).await {
        Ok(points) => Ok(HttpResponse::Ok().json(ApiResponse::success(points))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/points/transactions",
    tag = "points",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Ledger history, newest first"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_transactions(
    point_service: web::Data<PointService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match point_service
        .list_transactions(user_id, &query.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/points/award",
    tag = "points",
    request_body = AwardRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Points awarded"),
        (status = 400, description = "Invalid transaction type or amount"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn award_points(
    point_service: web::Data<PointService>,
    req: HttpRequest,
    request: web::Json<AwardRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);
    let request = request.into_inner();

    // Unknown kinds are rejected before anything is written
    let kind = match request.kind.parse() {
        Ok(kind) => kind,
        Err(_) => {
            return Ok(AppError::InvalidTransactionType(request.kind).error_response());
        }
    };

    match point_service
        .award(
            user_id,
            request.points,
            kind,
            &request.description,
            request.reference_id,
        )
        .await
    {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(outcome))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn points_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/points")
            .route("", web::get().to(get_points))
            .route("/transactions", web::get().to(get_transactions))
            .route("/award", web::post().to(award_points)),
    );
}
