use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub progression: ProgressionConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Shared secret of the platform auth service; this backend only
    /// verifies tokens, it never issues them.
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Minutes east of UTC used to derive "today" for streaks.
    /// Default 540 = UTC+9 (Asia/Seoul).
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    /// Points granted for a check-in before any streak bonus.
    #[serde(default = "default_attendance_base_points")]
    pub attendance_base_points: i64,
    /// Extra points per consecutive day already on the streak.
    #[serde(default = "default_streak_bonus_step")]
    pub streak_bonus_step: i64,
    /// Streak days counted toward the bonus stop growing past this.
    #[serde(default = "default_streak_bonus_cap")]
    pub streak_bonus_cap: i64,
}

fn default_utc_offset_minutes() -> i32 {
    540
}

fn default_attendance_base_points() -> i64 {
    10
}

fn default_streak_bonus_step() -> i64 {
    2
}

fn default_streak_bonus_cap() -> i64 {
    15
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
            attendance_base_points: default_attendance_base_points(),
            streak_bonus_step: default_streak_bonus_step(),
            streak_bonus_cap: default_streak_bonus_cap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotifierConfig {
    /// Webhook hit after an achievement unlock; empty disables delivery.
    #[serde(default)]
    pub unlock_webhook_url: Option<String>,
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let config_result = std::fs::read_to_string(&config_path);

        let config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse config: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // No config file: build from environment variables and defaults
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and config.toml was not found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                    },
                    progression: ProgressionConfig {
                        utc_offset_minutes: get_env_parse(
                            "PROGRESSION_UTC_OFFSET_MINUTES",
                            default_utc_offset_minutes(),
                        ),
                        attendance_base_points: get_env_parse(
                            "ATTENDANCE_BASE_POINTS",
                            default_attendance_base_points(),
                        ),
                        streak_bonus_step: get_env_parse(
                            "STREAK_BONUS_STEP",
                            default_streak_bonus_step(),
                        ),
                        streak_bonus_cap: get_env_parse(
                            "STREAK_BONUS_CAP",
                            default_streak_bonus_cap(),
                        ),
                    },
                    notifier: NotifierConfig {
                        unlock_webhook_url: get_env("UNLOCK_WEBHOOK_URL"),
                    },
                }
            }
            Err(e) => return Err(Box::new(e)),
        };

        Ok(config)
    }
}
