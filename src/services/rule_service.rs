use sqlx::PgPool;
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{ClassificationRule, CreateRule, RuleWithTemplate, UpdateRule};

/// Admin CRUD for classification rules. Creation enforces the at-most-one
/// rule per (academy, level, frequency, group) invariant; storage backs it
/// up with a unique constraint.
pub struct RuleService {
    db: PgPool,
}

impl RuleService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list_rules(&self, academy_id: Uuid) -> Result<Vec<RuleWithTemplate>, EngineError> {
        let rules = sqlx::query_as::<_, RuleWithTemplate>(
            "SELECT r.id, r.academy_id, r.level, r.frequency, r.athlete_group,
                    r.template_id, t.name AS template_name, r.created_at
             FROM classification_rules r
             JOIN session_templates t ON t.id = r.template_id
             WHERE r.academy_id = $1
             ORDER BY r.level, r.frequency, r.athlete_group",
        )
        .bind(academy_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rules)
    }

    pub async fn create_rule(
        &self,
        academy_id: Uuid,
        data: CreateRule,
    ) -> Result<ClassificationRule, EngineError> {
        let existing = sqlx::query_as::<_, ClassificationRule>(
            "SELECT id, academy_id, level, frequency, athlete_group, template_id, created_at
             FROM classification_rules
             WHERE academy_id = $1 AND level = $2 AND frequency = $3 AND athlete_group = $4",
        )
        .bind(academy_id)
        .bind(data.level)
        .bind(data.frequency)
        .bind(data.group)
        .fetch_optional(&self.db)
        .await?;

        if existing.is_some() {
            return Err(EngineError::DuplicateRule);
        }

        let rule = sqlx::query_as::<_, ClassificationRule>(
            "INSERT INTO classification_rules (academy_id, level, frequency, athlete_group, template_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, academy_id, level, frequency, athlete_group, template_id, created_at",
        )
        .bind(academy_id)
        .bind(data.level)
        .bind(data.frequency)
        .bind(data.group)
        .bind(data.template_id)
        .fetch_one(&self.db)
        .await?;

        Ok(rule)
    }

    pub async fn update_rule(
        &self,
        academy_id: Uuid,
        rule_id: Uuid,
        data: UpdateRule,
    ) -> Result<ClassificationRule, EngineError> {
        // Moving onto another rule's tuple is the same violation as creating
        // a duplicate; the rule itself may keep its tuple
        let clash = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM classification_rules
             WHERE academy_id = $1 AND level = $2 AND frequency = $3 AND athlete_group = $4
               AND id <> $5",
        )
        .bind(academy_id)
        .bind(data.level)
        .bind(data.frequency)
        .bind(data.group)
        .bind(rule_id)
        .fetch_optional(&self.db)
        .await?;

        if clash.is_some() {
            return Err(EngineError::DuplicateRule);
        }

        let rule = sqlx::query_as::<_, ClassificationRule>(
            "UPDATE classification_rules
             SET level = $3, frequency = $4, athlete_group = $5, template_id = $6
             WHERE id = $1 AND academy_id = $2
             RETURNING id, academy_id, level, frequency, athlete_group, template_id, created_at",
        )
        .bind(rule_id)
        .bind(academy_id)
        .bind(data.level)
        .bind(data.frequency)
        .bind(data.group)
        .bind(data.template_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(EngineError::RuleIdNotFound(rule_id))?;

        Ok(rule)
    }

    pub async fn delete_rule(&self, academy_id: Uuid, rule_id: Uuid) -> Result<(), EngineError> {
        let result = sqlx::query("DELETE FROM classification_rules WHERE id = $1 AND academy_id = $2")
            .bind(rule_id)
            .bind(academy_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(EngineError::RuleIdNotFound(rule_id));
        }

        Ok(())
    }
}
