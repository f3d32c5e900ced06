use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AthleteGroup, ClassificationRule, Frequency, Level, ResolvedTemplate};
use crate::services::TemplateService;

/// Resolves an athlete classification to its workout template.
///
/// Resolution is exact-match only: no fallback, no partial match, no default
/// template. A missing rule is a loud failure naming the academy and the
/// full classification tuple.
pub struct RuleEngineService {
    db: PgPool,
    templates: TemplateService,
}

impl RuleEngineService {
    pub fn new(db: PgPool) -> Self {
        let templates = TemplateService::new(db.clone());
        Self { db, templates }
    }

    /// Look up the template mapped by the matching rule, with its drill
    /// list populated in ascending order. Read-only, no side effects.
    pub async fn resolve_template(
        &self,
        academy_id: Uuid,
        level: Level,
        frequency: Frequency,
        group: AthleteGroup,
    ) -> Result<ResolvedTemplate, EngineError> {
        let rule = sqlx::query_as::<_, ClassificationRule>(
            "SELECT id, academy_id, level, frequency, athlete_group, template_id, created_at
             FROM classification_rules
             WHERE academy_id = $1 AND level = $2 AND frequency = $3 AND athlete_group = $4",
        )
        .bind(academy_id)
        .bind(level)
        .bind(frequency)
        .bind(group)
        .fetch_optional(&self.db)
        .await?
        .ok_or(EngineError::RuleNotFound {
            academy_id,
            level,
            frequency,
            group,
        })?;

        debug!(
            "Resolved rule {} -> template {} for {}/{}/{}",
            rule.id, rule.template_id, level, frequency, group
        );

        self.templates.get_resolved(rule.template_id).await
    }
}
