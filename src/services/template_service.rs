use sqlx::PgPool;
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    CreateTemplate, ResolvedTemplate, SessionDuration, SessionTemplate, TemplateDrillDetail,
    WorkoutType,
};

/// Read/write access to the academy's template catalog. The resolution
/// engine only ever reads it; writes come from coach/admin actions.
pub struct TemplateService {
    db: PgPool,
}

impl TemplateService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list_templates(&self, academy_id: Uuid) -> Result<Vec<SessionTemplate>, EngineError> {
        let templates = sqlx::query_as::<_, SessionTemplate>(
            "SELECT id, academy_id, name, workout_type, duration, created_at
             FROM session_templates WHERE academy_id = $1 ORDER BY name ASC",
        )
        .bind(academy_id)
        .fetch_all(&self.db)
        .await?;

        Ok(templates)
    }

    /// Load a template together with its drill list, ordered ascending.
    pub async fn get_resolved(&self, template_id: Uuid) -> Result<ResolvedTemplate, EngineError> {
        let template = sqlx::query_as::<_, SessionTemplate>(
            "SELECT id, academy_id, name, workout_type, duration, created_at
             FROM session_templates WHERE id = $1",
        )
        .bind(template_id)
        .fetch_one(&self.db)
        .await?;

        let drills = sqlx::query_as::<_, TemplateDrillDetail>(
            "SELECT td.drill_id, td.order_index, td.sets, td.reps, td.rest,
                    d.name, d.category, d.description, d.video_url, d.difficulty
             FROM template_drills td
             JOIN drills d ON d.id = td.drill_id
             WHERE td.template_id = $1
             ORDER BY td.order_index ASC",
        )
        .bind(template_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ResolvedTemplate {
            id: template.id,
            academy_id: template.academy_id,
            name: template.name,
            workout_type: template.workout_type,
            duration: template.duration,
            drills,
        })
    }

    /// Find the academy's template for a (workout type, duration) menu.
    /// The override logic assumes this pair is unique per academy; if data
    /// violates that, the first match wins.
    pub async fn find_by_menu(
        &self,
        academy_id: Uuid,
        workout_type: WorkoutType,
        duration: SessionDuration,
    ) -> Result<Option<SessionTemplate>, EngineError> {
        let template = sqlx::query_as::<_, SessionTemplate>(
            "SELECT id, academy_id, name, workout_type, duration, created_at
             FROM session_templates
             WHERE academy_id = $1 AND workout_type = $2 AND duration = $3
             LIMIT 1",
        )
        .bind(academy_id)
        .bind(workout_type)
        .bind(duration)
        .fetch_optional(&self.db)
        .await?;

        Ok(template)
    }

    pub async fn create_template(
        &self,
        academy_id: Uuid,
        data: CreateTemplate,
    ) -> Result<SessionTemplate, EngineError> {
        let mut tx = self.db.begin().await?;

        let template = sqlx::query_as::<_, SessionTemplate>(
            "INSERT INTO session_templates (academy_id, name, workout_type, duration)
             VALUES ($1, $2, $3, $4)
             RETURNING id, academy_id, name, workout_type, duration, created_at",
        )
        .bind(academy_id)
        .bind(&data.name)
        .bind(data.workout_type)
        .bind(data.duration)
        .fetch_one(&mut *tx)
        .await?;

        for entry in &data.drills {
            sqlx::query(
                "INSERT INTO template_drills (template_id, drill_id, order_index, sets, reps, rest)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(template.id)
            .bind(entry.drill_id)
            .bind(entry.order_index)
            .bind(&entry.sets)
            .bind(&entry.reps)
            .bind(&entry.rest)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(template)
    }
}
