use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    AthleteGroup, AthleteSessionView, Attendance, CoachSessionView, DrillCompletion, Frequency,
    Level, Session, SessionDuration, SessionRosterEntry, UserRole, WorkoutType,
};
use crate::services::{RuleEngineService, TemplateService};

const ATTENDANCE_COLUMNS: &str =
    "id, session_id, athlete_id, status, condition_score, has_pain, pain_area, \
     worked_out_yesterday, sleep_hours, sleep_quality, selected_program, is_forced_tod, \
     created_at, updated_at";

const SESSION_COLUMNS: &str = "id, academy_id, template_id, coach_id, date, created_at";

/// Athlete classification joined with the owning user's academy.
#[derive(Debug, FromRow)]
struct AthleteRow {
    academy_id: Uuid,
    level: Level,
    frequency: Frequency,
    #[sqlx(rename = "athlete_group")]
    group: AthleteGroup,
}

/// Materializes sessions from resolved templates and applies menu overrides
/// onto existing sessions.
pub struct SessionService {
    db: PgPool,
    rule_engine: RuleEngineService,
    templates: TemplateService,
}

impl SessionService {
    pub fn new(db: PgPool) -> Self {
        let rule_engine = RuleEngineService::new(db.clone());
        let templates = TemplateService::new(db.clone());
        Self {
            db,
            rule_engine,
            templates,
        }
    }

    async fn load_athlete(&self, athlete_id: Uuid) -> Result<AthleteRow, EngineError> {
        sqlx::query_as::<_, AthleteRow>(
            "SELECT u.academy_id, p.level, p.frequency, p.athlete_group
             FROM athlete_profiles p
             JOIN users u ON u.id = p.user_id
             WHERE p.id = $1",
        )
        .bind(athlete_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(EngineError::AthleteNotFound)
    }

    /// Generate a session for an athlete on a given date: resolve the
    /// template from the athlete's classification, pick a coach in the same
    /// academy (first found, ties broken arbitrarily) and create the session
    /// together with one PENDING attendance in a single transaction.
    ///
    /// Not idempotent: repeated calls for the same (athlete, date) create
    /// duplicate sessions. Callers check for an existing session first.
    pub async fn generate_session(
        &self,
        athlete_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<(Session, Attendance), EngineError> {
        let athlete = self.load_athlete(athlete_id).await?;

        let template = self
            .rule_engine
            .resolve_template(athlete.academy_id, athlete.level, athlete.frequency, athlete.group)
            .await?;

        let coach_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM users WHERE academy_id = $1 AND role = $2 LIMIT 1",
        )
        .bind(athlete.academy_id)
        .bind(UserRole::Coach)
        .fetch_optional(&self.db)
        .await?
        .ok_or(EngineError::NoCoachAvailable(athlete.academy_id))?;

        let mut tx = self.db.begin().await?;

        let session = sqlx::query_as::<_, Session>(&format!(
            "INSERT INTO sessions (academy_id, template_id, coach_id, date)
             VALUES ($1, $2, $3, $4)
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(athlete.academy_id)
        .bind(template.id)
        .bind(coach_id)
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        let attendance = sqlx::query_as::<_, Attendance>(&format!(
            "INSERT INTO attendances (session_id, athlete_id)
             VALUES ($1, $2)
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(session.id)
        .bind(athlete_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Generated session {} (template {}) for athlete {}",
            session.id, template.id, athlete_id
        );

        Ok((session, attendance))
    }

    pub async fn get_session(
        &self,
        academy_id: Uuid,
        session_id: Uuid,
    ) -> Result<Session, EngineError> {
        sqlx::query_as::<_, Session>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1 AND academy_id = $2"
        ))
        .bind(session_id)
        .bind(academy_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(EngineError::SessionNotFound(session_id))
    }

    /// Swap a session onto the template matching (workout type, duration)
    /// within the session's academy. Prior drill completions tied to the old
    /// template are left as-is.
    pub async fn set_session_menu(
        &self,
        academy_id: Uuid,
        session_id: Uuid,
        workout_type: WorkoutType,
        duration: SessionDuration,
    ) -> Result<Session, EngineError> {
        let session = self.get_session(academy_id, session_id).await?;

        let template = self
            .templates
            .find_by_menu(academy_id, workout_type, duration)
            .await?
            .ok_or(EngineError::TemplateNotFound {
                workout_type,
                duration,
            })?;

        let updated = sqlx::query_as::<_, Session>(&format!(
            "UPDATE sessions SET template_id = $2 WHERE id = $1 RETURNING {SESSION_COLUMNS}"
        ))
        .bind(session.id)
        .bind(template.id)
        .fetch_one(&self.db)
        .await?;

        info!(
            "Session {} menu set to {}/{} (template {})",
            session_id, workout_type, duration, template.id
        );

        Ok(updated)
    }

    /// Sessions run by a coach, with template drills and the attendance roster.
    pub async fn list_coach_sessions(
        &self,
        academy_id: Uuid,
        coach_id: Uuid,
    ) -> Result<Vec<CoachSessionView>, EngineError> {
        let sessions = sqlx::query_as::<_, Session>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions
             WHERE coach_id = $1 AND academy_id = $2
             ORDER BY date DESC"
        ))
        .bind(coach_id)
        .bind(academy_id)
        .fetch_all(&self.db)
        .await?;

        let mut views = Vec::with_capacity(sessions.len());
        for session in sessions {
            let template = self.templates.get_resolved(session.template_id).await?;
            let roster = sqlx::query_as::<_, SessionRosterEntry>(
                "SELECT a.id AS attendance_id, a.athlete_id, u.first_name, u.last_name,
                        a.status, a.is_forced_tod
                 FROM attendances a
                 JOIN athlete_profiles p ON p.id = a.athlete_id
                 JOIN users u ON u.id = p.user_id
                 WHERE a.session_id = $1",
            )
            .bind(session.id)
            .fetch_all(&self.db)
            .await?;

            views.push(CoachSessionView {
                id: session.id,
                date: session.date,
                template,
                roster,
            });
        }

        Ok(views)
    }

    /// An athlete's sessions, flattened with their own attendance and the
    /// drill ids they have completed.
    pub async fn list_athlete_sessions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AthleteSessionView>, EngineError> {
        let attendances = sqlx::query_as::<_, Attendance>(
            "SELECT a.id, a.session_id, a.athlete_id, a.status, a.condition_score, a.has_pain,
                    a.pain_area, a.worked_out_yesterday, a.sleep_hours, a.sleep_quality,
                    a.selected_program, a.is_forced_tod, a.created_at, a.updated_at
             FROM attendances a
             JOIN athlete_profiles p ON p.id = a.athlete_id
             WHERE p.user_id = $1
             ORDER BY a.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        let mut views = Vec::with_capacity(attendances.len());
        for attendance in attendances {
            let session = sqlx::query_as::<_, Session>(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1"
            ))
            .bind(attendance.session_id)
            .fetch_one(&self.db)
            .await?;

            let template = self.templates.get_resolved(session.template_id).await?;

            let completed_drill_ids = sqlx::query_scalar::<_, Uuid>(
                "SELECT drill_id FROM drill_completions WHERE attendance_id = $1",
            )
            .bind(attendance.id)
            .fetch_all(&self.db)
            .await?;

            views.push(AthleteSessionView {
                id: session.id,
                date: session.date,
                template,
                attendance_id: attendance.id,
                status: attendance.status,
                selected_program: attendance.selected_program,
                completed_drill_ids,
            });
        }

        Ok(views)
    }

    /// Append a drill completion to one of the caller's own attendances.
    /// Someone else's attendance is indistinguishable from a missing one.
    /// No uniqueness is enforced; duplicates simply accumulate.
    pub async fn complete_drill(
        &self,
        user_id: Uuid,
        attendance_id: Uuid,
        drill_id: Uuid,
    ) -> Result<DrillCompletion, EngineError> {
        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT a.id FROM attendances a
             JOIN athlete_profiles p ON p.id = a.athlete_id
             WHERE a.id = $1 AND p.user_id = $2",
        )
        .bind(attendance_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        if exists.is_none() {
            return Err(EngineError::AttendanceNotFound(attendance_id));
        }

        let completion = sqlx::query_as::<_, DrillCompletion>(
            "INSERT INTO drill_completions (attendance_id, drill_id)
             VALUES ($1, $2)
             RETURNING id, attendance_id, drill_id, completed_at",
        )
        .bind(attendance_id)
        .bind(drill_id)
        .fetch_one(&self.db)
        .await?;

        Ok(completion)
    }
}
