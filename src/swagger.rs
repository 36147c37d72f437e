use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{RequirementType, TransactionKind};
use crate::handlers;
use crate::levels::{LevelProgress, LevelTier};
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::attendance::check_in,
        handlers::attendance::get_stats,
        handlers::points::get_points,
        handlers::points::get_transactions,
        handlers::points::award_points,
        handlers::achievements::list_achievements,
        handlers::achievements::evaluate_achievements,
        handlers::badge::get_badge,
        handlers::badge::get_badge_history,
    ),
    components(
        schemas(
            ApiError,
            AwardRequest,
            AwardOutcome,
            PointsResponse,
            PointTransactionResponse,
            TransactionKind,
            LevelTier,
            LevelProgress,
            AttendanceStats,
            CheckInOutcome,
            RequirementType,
            UnlockedAchievement,
            AchievementStatus,
            BadgeTier,
            TierScoreResponse,
            TierCrossing,
            TierHistoryResponse,
            PaginationParams,
            PaginationInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "attendance", description = "Daily check-in and streaks"),
        (name = "points", description = "Point ledger and level progress"),
        (name = "achievements", description = "Achievement catalog and unlocks"),
        (name = "badge", description = "Public profile badge tiers")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
