use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Achievements {
    Table,
    Name,
    Description,
    RequirementType,
    RequirementValue,
    ExperienceReward,
    BadgeReward,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

// (name, description, requirement_type, requirement_value, reward, badge)
const SEED: &[(&str, &str, &str, i64, i64, Option<&str>)] = &[
    ("First Steps", "Check in for the first time", "count", 1, 10, None),
    ("Regular", "Check in on 10 different days", "count", 10, 30, None),
    ("Devoted", "Check in on 100 different days", "count", 100, 200, Some("devoted")),
    ("Week Streak", "Check in 7 days in a row", "streak", 7, 50, None),
    ("Month Streak", "Check in 30 days in a row", "streak", 30, 300, Some("month_streak")),
    ("Rising Star", "Earn 1,000 points", "milestone", 1000, 100, None),
    ("Point Collector", "Earn 5,000 points", "milestone", 5000, 500, Some("collector")),
    ("Crowd Favorite", "Receive 100 likes on published posts", "social", 100, 100, None),
    ("Beloved", "Receive 1,000 likes on published posts", "social", 1000, 500, Some("beloved")),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, description, requirement_type, requirement_value, reward, badge) in SEED {
            let insert = Query::insert()
                .into_table(Achievements::Table)
                .columns([
                    Achievements::Name,
                    Achievements::Description,
                    Achievements::RequirementType,
                    Achievements::RequirementValue,
                    Achievements::ExperienceReward,
                    Achievements::BadgeReward,
                ])
                .values_panic([
                    (*name).into(),
                    (*description).into(),
                    (*requirement_type).into(),
                    (*requirement_value).into(),
                    (*reward).into(),
                    (*badge).into(),
                ])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let names: Vec<Value> = SEED.iter().map(|s| s.0.into()).collect();
        let delete = Query::delete()
            .from_table(Achievements::Table)
            .and_where(Expr::col(Achievements::Name).is_in(names))
            .to_owned();
        manager.exec_stmt(delete).await?;
        Ok(())
    }
}
