use sqlx::PgPool;
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{CreateDrill, Drill, UpdateDrill};

/// Coach/admin CRUD for the academy's drill library.
pub struct DrillService {
    db: PgPool,
}

impl DrillService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list_drills(&self, academy_id: Uuid) -> Result<Vec<Drill>, EngineError> {
        let drills = sqlx::query_as::<_, Drill>(
            "SELECT id, academy_id, name, category, description, video_url, difficulty,
                    cue1, cue2, cue3, base_sets, base_reps, base_rest, created_at
             FROM drills WHERE academy_id = $1 ORDER BY category ASC",
        )
        .bind(academy_id)
        .fetch_all(&self.db)
        .await?;

        Ok(drills)
    }

    pub async fn create_drill(&self, academy_id: Uuid, data: CreateDrill) -> Result<Drill, EngineError> {
        let drill = sqlx::query_as::<_, Drill>(
            "INSERT INTO drills (academy_id, name, category, description, video_url, difficulty,
                                 cue1, cue2, cue3, base_sets, base_reps, base_rest)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING id, academy_id, name, category, description, video_url, difficulty,
                       cue1, cue2, cue3, base_sets, base_reps, base_rest, created_at",
        )
        .bind(academy_id)
        .bind(&data.name)
        .bind(&data.category)
        .bind(&data.description)
        .bind(&data.video_url)
        .bind(data.difficulty.unwrap_or(1))
        .bind(&data.cue1)
        .bind(&data.cue2)
        .bind(&data.cue3)
        .bind(&data.base_sets)
        .bind(&data.base_reps)
        .bind(&data.base_rest)
        .fetch_one(&self.db)
        .await?;

        Ok(drill)
    }

    pub async fn update_drill(
        &self,
        academy_id: Uuid,
        drill_id: Uuid,
        data: UpdateDrill,
    ) -> Result<Drill, EngineError> {
        let drill = sqlx::query_as::<_, Drill>(
            "UPDATE drills
             SET name = COALESCE($3, name),
                 category = COALESCE($4, category),
                 description = COALESCE($5, description),
                 video_url = COALESCE($6, video_url),
                 difficulty = COALESCE($7, difficulty),
                 cue1 = COALESCE($8, cue1),
                 cue2 = COALESCE($9, cue2),
                 cue3 = COALESCE($10, cue3),
                 base_sets = COALESCE($11, base_sets),
                 base_reps = COALESCE($12, base_reps),
                 base_rest = COALESCE($13, base_rest)
             WHERE id = $1 AND academy_id = $2
             RETURNING id, academy_id, name, category, description, video_url, difficulty,
                       cue1, cue2, cue3, base_sets, base_reps, base_rest, created_at",
        )
        .bind(drill_id)
        .bind(academy_id)
        .bind(&data.name)
        .bind(&data.category)
        .bind(&data.description)
        .bind(&data.video_url)
        .bind(data.difficulty)
        .bind(&data.cue1)
        .bind(&data.cue2)
        .bind(&data.cue3)
        .bind(&data.base_sets)
        .bind(&data.base_reps)
        .bind(&data.base_rest)
        .fetch_optional(&self.db)
        .await?
        .ok_or(EngineError::DrillNotFound(drill_id))?;

        Ok(drill)
    }

    /// Removes a drill along with its template assignments.
    pub async fn delete_drill(&self, academy_id: Uuid, drill_id: Uuid) -> Result<(), EngineError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM template_drills WHERE drill_id = $1")
            .bind(drill_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM drills WHERE id = $1 AND academy_id = $2")
            .bind(drill_id)
            .bind(academy_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(EngineError::DrillNotFound(drill_id));
        }

        tx.commit().await?;

        Ok(())
    }
}
