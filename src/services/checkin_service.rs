use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Utc};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    AthleteProfile, Attendance, AttendanceStatus, CheckinOutcome, CheckinSubmission,
    SessionDuration, SessionTemplate, WorkoutType,
};
use crate::services::{SessionService, TemplateService};

/// The default program when the athlete does not choose one.
pub const DEFAULT_PROGRAM: &str = "elite";

/// Neutral readiness when neither a condition nor a fatigue score was given.
const NEUTRAL_SCORE: i32 = 5;

/// Derive the 1-5 readiness score from the submission. A provided condition
/// score wins; otherwise a 1-10 fatigue value is folded onto the condition
/// scale with ceil((11 - fatigue) / 2), so higher fatigue means a lower
/// score. With neither input the score is neutral.
pub fn readiness_score(condition_score: Option<i32>, fatigue_score: Option<i32>) -> i32 {
    if let Some(score) = condition_score {
        return score;
    }
    match fatigue_score {
        // (a + 1) / 2 is ceil(a / 2) for positive a
        Some(fatigue) => (11 - fatigue + 1) / 2,
        None => NEUTRAL_SCORE,
    }
}

/// Forced-recovery decision. Pure and total in its two inputs; nothing else
/// influences it.
pub fn is_forced_recovery(score: i32, has_pain: bool) -> bool {
    score <= 2 || has_pain
}

/// Map the chosen program onto a duration tier. "beginner" gets the short
/// tier; every other value, including unrecognized ones, falls into the
/// "elite" long tier.
pub fn program_duration(program: &str) -> SessionDuration {
    if program == "beginner" {
        SessionDuration::Min90
    } else {
        SessionDuration::Min120
    }
}

/// The (workout type, duration) menu the session should be swapped to, if
/// any. Forced recovery always targets the recovery category at the mapped
/// duration; otherwise the current workout type is kept and only a changed
/// duration triggers a swap.
pub fn override_menu(
    forced: bool,
    current_type: WorkoutType,
    current_duration: SessionDuration,
    target_duration: SessionDuration,
) -> Option<(WorkoutType, SessionDuration)> {
    if forced {
        Some((WorkoutType::DRecovery, target_duration))
    } else if current_duration != target_duration {
        Some((current_type, target_duration))
    } else {
        None
    }
}

fn local_midnight(day: chrono::NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        // Midnight skipped by a DST transition; fall back to UTC midnight
        None => Utc.from_utc_datetime(&midnight),
    }
}

/// The server-local calendar day containing `date`, as a half-open UTC
/// window [midnight, next midnight). On a DST transition day the window is
/// 23 or 25 hours long.
pub fn day_bounds(date: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_day = date.with_timezone(&Local).date_naive();
    let start = local_midnight(local_day);
    let end = match local_day.succ_opt() {
        Some(next) => local_midnight(next),
        None => start + Duration::days(1),
    };
    (start, end)
}

/// Consumes a daily wellness submission, decides forced recovery and the
/// duration tier, applies the template override and marks the athlete
/// present.
pub struct CheckinService {
    db: PgPool,
    sessions: SessionService,
    templates: TemplateService,
}

impl CheckinService {
    pub fn new(db: PgPool) -> Self {
        let sessions = SessionService::new(db.clone());
        let templates = TemplateService::new(db.clone());
        Self {
            db,
            sessions,
            templates,
        }
    }

    async fn find_today_attendance(
        &self,
        athlete_id: Uuid,
        academy_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Option<Attendance>, EngineError> {
        let (day_start, day_end) = day_bounds(date);

        let attendance = sqlx::query_as::<_, Attendance>(
            "SELECT a.id, a.session_id, a.athlete_id, a.status, a.condition_score, a.has_pain,
                    a.pain_area, a.worked_out_yesterday, a.sleep_hours, a.sleep_quality,
                    a.selected_program, a.is_forced_tod, a.created_at, a.updated_at
             FROM attendances a
             JOIN sessions s ON s.id = a.session_id
             WHERE a.athlete_id = $1 AND s.academy_id = $2 AND s.date >= $3 AND s.date < $4
             LIMIT 1",
        )
        .bind(athlete_id)
        .bind(academy_id)
        .bind(day_start)
        .bind(day_end)
        .fetch_optional(&self.db)
        .await?;

        Ok(attendance)
    }

    /// Run the whole check-in transaction for the authenticated athlete user.
    pub async fn check_in(
        &self,
        user_id: Uuid,
        academy_id: Uuid,
        date: DateTime<Utc>,
        submission: CheckinSubmission,
    ) -> Result<CheckinOutcome, EngineError> {
        let profile = sqlx::query_as::<_, AthleteProfile>(
            "SELECT p.id, p.user_id, p.level, p.frequency, p.athlete_group,
                    p.created_at, p.updated_at
             FROM athlete_profiles p
             JOIN users u ON u.id = p.user_id
             WHERE p.user_id = $1 AND u.academy_id = $2",
        )
        .bind(user_id)
        .bind(academy_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(EngineError::AthleteNotFound)?;
        let athlete_id = profile.id;

        // Locate today's attendance, or materialize a session on the fly.
        let attendance = match self.find_today_attendance(athlete_id, academy_id, date).await? {
            Some(attendance) => attendance,
            None => {
                info!("No session today for athlete {athlete_id}, generating one");
                let (_, attendance) = self.sessions.generate_session(athlete_id, date).await?;
                attendance
            }
        };

        // Re-check-in is a no-op: status and wellness fields stay untouched.
        if attendance.status != AttendanceStatus::Pending {
            return Ok(CheckinOutcome {
                status: "already_checked_in".to_string(),
                session_id: attendance.session_id,
                is_forced_tod: attendance.is_forced_tod,
            });
        }

        let score = readiness_score(submission.condition_score, submission.fatigue_score);
        let forced = is_forced_recovery(score, submission.has_pain);
        let program = submission
            .program
            .clone()
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
        let target_duration = program_duration(&program);

        let session = self
            .sessions
            .get_session(academy_id, attendance.session_id)
            .await?;
        let current = sqlx::query_as::<_, SessionTemplate>(
            "SELECT id, academy_id, name, workout_type, duration, created_at
             FROM session_templates WHERE id = $1",
        )
        .bind(session.template_id)
        .fetch_one(&self.db)
        .await?;

        // A missing override template is a silent no-op: the check-in must
        // not fail because the academy has no matching menu.
        let swap_to = match override_menu(forced, current.workout_type, current.duration, target_duration)
        {
            Some((workout_type, duration)) => {
                let found = self
                    .templates
                    .find_by_menu(academy_id, workout_type, duration)
                    .await?;
                if found.is_none() {
                    warn!(
                        "No {workout_type}/{duration} template in academy {academy_id}, \
                         keeping template {}",
                        current.id
                    );
                }
                found
            }
            None => None,
        };

        // Override write and attendance write commit together so no reader
        // observes a PRESENT attendance with an unswapped template.
        let mut tx = self.db.begin().await?;

        if let Some(template) = &swap_to {
            sqlx::query("UPDATE sessions SET template_id = $2 WHERE id = $1")
                .bind(session.id)
                .bind(template.id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            "UPDATE attendances
             SET status = $2, condition_score = $3, has_pain = $4, pain_area = $5,
                 worked_out_yesterday = $6, sleep_hours = $7, sleep_quality = $8,
                 selected_program = $9, is_forced_tod = $10, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(attendance.id)
        .bind(AttendanceStatus::Present)
        .bind(score)
        .bind(submission.has_pain)
        .bind(&submission.pain_area)
        .bind(submission.worked_out_yesterday)
        .bind(submission.sleep_hours)
        .bind(submission.sleep_quality)
        .bind(&program)
        .bind(forced)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Athlete {athlete_id} checked in to session {} (score {score}, forced {forced})",
            session.id
        );

        Ok(CheckinOutcome {
            status: "success".to_string(),
            session_id: session.id,
            is_forced_tod: forced,
        })
    }
}
