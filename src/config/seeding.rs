use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    Academy, AthleteGroup, CreateDrill, CreateRule, CreateTemplate, CreateTemplateDrill, Frequency,
    Level, SessionDuration, UserRole, WorkoutType,
};
use crate::services::{DrillService, RuleService, SessionService, TemplateService};

const DEMO_PASSWORD: &str = "password123";

/// Seeds a demo academy with users, drills, templates, a classification rule
/// and a sample session, mirroring the fixtures coaches expect in a fresh
/// development environment. Safe to run repeatedly.
pub struct DatabaseSeeder {
    pool: PgPool,
}

impl DatabaseSeeder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn seed_all(&self) -> Result<()> {
        tracing::info!("Starting database seeding...");

        let academy_id = self.seed_academy().await?;
        self.seed_users(academy_id).await?;
        self.seed_catalog(academy_id).await?;
        self.seed_sample_session(academy_id).await?;

        tracing::info!("Database seeding completed!");
        Ok(())
    }

    async fn seed_academy(&self) -> Result<Uuid> {
        let existing = sqlx::query_as::<_, Academy>(
            "SELECT id, name, created_at FROM academies WHERE name = $1",
        )
        .bind("Elite Baseball Academy")
        .fetch_optional(&self.pool)
        .await?;

        if let Some(academy) = existing {
            return Ok(academy.id);
        }

        let academy = sqlx::query_as::<_, Academy>(
            "INSERT INTO academies (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind("Elite Baseball Academy")
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Academy created: {}", academy.name);
        Ok(academy.id)
    }

    async fn seed_users(&self, academy_id: Uuid) -> Result<()> {
        self.create_user(academy_id, "admin@elite.com", UserRole::Admin, "James", "Director")
            .await?;
        self.create_user(academy_id, "coach1@elite.com", UserRole::Coach, "John", "Coach")
            .await?;
        let athlete_created = self
            .create_user(academy_id, "athlete1@elite.com", UserRole::Athlete, "Bobby", "Ballplayer")
            .await?;

        if let Some(user_id) = athlete_created {
            sqlx::query(
                "INSERT INTO athlete_profiles (user_id, level, frequency, athlete_group)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(user_id)
            .bind(Level::L1)
            .bind(Frequency::F2X)
            .bind(AthleteGroup::Hs)
            .execute(&self.pool)
            .await?;

            tracing::info!("Athlete profile created");
        }

        Ok(())
    }

    async fn create_user(
        &self,
        academy_id: Uuid,
        email: &str,
        role: UserRole,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Uuid>> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Ok(None);
        }

        let password_hash = bcrypt::hash(DEMO_PASSWORD, bcrypt::DEFAULT_COST)?;

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (academy_id, email, password_hash, role, first_name, last_name)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(academy_id)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Created demo user {email}");
        Ok(Some(id))
    }

    async fn seed_catalog(&self, academy_id: Uuid) -> Result<()> {
        let template_service = TemplateService::new(self.pool.clone());
        if !template_service.list_templates(academy_id).await?.is_empty() {
            return Ok(());
        }

        let drill_service = DrillService::new(self.pool.clone());

        let accuracy = drill_service
            .create_drill(
                academy_id,
                CreateDrill {
                    name: "Fastball Accuracy".to_string(),
                    category: "Pitching".to_string(),
                    description: Some("Focus on hitting the corners".to_string()),
                    video_url: None,
                    difficulty: Some(2),
                    cue1: Some("Drive off the back leg".to_string()),
                    cue2: None,
                    cue3: None,
                    base_sets: Some("3".to_string()),
                    base_reps: Some("10".to_string()),
                    base_rest: Some("60s".to_string()),
                },
            )
            .await?;

        let swing = drill_service
            .create_drill(
                academy_id,
                CreateDrill {
                    name: "Power Swing".to_string(),
                    category: "Hitting".to_string(),
                    description: Some("Focus on hip rotation".to_string()),
                    video_url: None,
                    difficulty: Some(2),
                    cue1: Some("Load, stride, rotate".to_string()),
                    cue2: None,
                    cue3: None,
                    base_sets: Some("3".to_string()),
                    base_reps: Some("15".to_string()),
                    base_rest: Some("45s".to_string()),
                },
            )
            .await?;

        let mobility = drill_service
            .create_drill(
                academy_id,
                CreateDrill {
                    name: "Band Mobility Circuit".to_string(),
                    category: "Recovery".to_string(),
                    description: Some("Light shoulder and hip mobility work".to_string()),
                    video_url: None,
                    difficulty: Some(1),
                    cue1: None,
                    cue2: None,
                    cue3: None,
                    base_sets: Some("2".to_string()),
                    base_reps: Some("12".to_string()),
                    base_rest: Some("30s".to_string()),
                },
            )
            .await?;

        tracing::info!("Drills created");

        let menus = [
            ("HS_L1_2X_TEMPLATE", WorkoutType::ALower, SessionDuration::Min60, vec![accuracy.id, swing.id]),
            ("LOWER_ELITE", WorkoutType::ALower, SessionDuration::Min120, vec![accuracy.id, swing.id]),
            ("RECOVERY_ELITE", WorkoutType::DRecovery, SessionDuration::Min120, vec![mobility.id]),
            ("RECOVERY_BEGINNER", WorkoutType::DRecovery, SessionDuration::Min90, vec![mobility.id]),
        ];

        let mut rule_template = None;
        for (name, workout_type, duration, drill_ids) in menus {
            let drills = drill_ids
                .into_iter()
                .enumerate()
                .map(|(i, drill_id)| CreateTemplateDrill {
                    drill_id,
                    order_index: i as i32 + 1,
                    sets: Some("3".to_string()),
                    reps: Some("10".to_string()),
                    rest: None,
                })
                .collect();

            let template = template_service
                .create_template(
                    academy_id,
                    CreateTemplate {
                        name: name.to_string(),
                        workout_type,
                        duration,
                        drills,
                    },
                )
                .await?;

            if name == "HS_L1_2X_TEMPLATE" {
                rule_template = Some(template.id);
            }
        }

        tracing::info!("Templates created");

        if let Some(template_id) = rule_template {
            RuleService::new(self.pool.clone())
                .create_rule(
                    academy_id,
                    CreateRule {
                        level: Level::L1,
                        frequency: Frequency::F2X,
                        group: AthleteGroup::Hs,
                        template_id,
                    },
                )
                .await?;

            tracing::info!("Rule created: L1/F2X/HS -> HS_L1_2X_TEMPLATE");
        }

        Ok(())
    }

    async fn seed_sample_session(&self, academy_id: Uuid) -> Result<()> {
        let athlete_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT p.id FROM athlete_profiles p
             JOIN users u ON u.id = p.user_id
             WHERE u.academy_id = $1
             LIMIT 1",
        )
        .bind(academy_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(athlete_id) = athlete_id else {
            return Ok(());
        };

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendances WHERE athlete_id = $1",
        )
        .bind(athlete_id)
        .fetch_one(&self.pool)
        .await?;

        if existing == 0 {
            SessionService::new(self.pool.clone())
                .generate_session(athlete_id, Utc::now())
                .await?;
            tracing::info!("Sample session generated for today");
        }

        Ok(())
    }
}
