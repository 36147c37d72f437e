use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use inkwell_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::UnlockNotifier,
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::{JwtService, ServiceClock},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let jwt_service = JwtService::new(&config.jwt.secret);
    let clock = ServiceClock::new(config.progression.utc_offset_minutes);
    let notifier = UnlockNotifier::new(config.notifier.clone());

    let point_service = PointService::new(pool.clone());
    let achievement_service =
        AchievementService::new(pool.clone(), point_service.clone(), notifier);
    let attendance_service = AttendanceService::new(
        pool.clone(),
        point_service.clone(),
        achievement_service.clone(),
        clock,
        config.progression.clone(),
    );
    let tier_service = TierService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(point_service.clone()))
            .app_data(web::Data::new(attendance_service.clone()))
            .app_data(web::Data::new(achievement_service.clone()))
            .app_data(web::Data::new(tier_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::attendance_config)
                    .configure(handlers::points_config)
                    .configure(handlers::achievements_config)
                    .configure(handlers::badge_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
