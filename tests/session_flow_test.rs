//! End-to-end flows against a real database. Each test connects to
//! `TEST_DATABASE_URL` and is skipped when no test database is available.

use academy_engine::error::EngineError;
use academy_engine::models::{
    AthleteGroup, AttendanceStatus, CheckinSubmission, CreateRule, CreateTemplate,
    CreateTemplateDrill, Frequency, Level, SessionDuration, UpdateRule, UserRole, WorkoutType,
};
use academy_engine::services::{CheckinService, RuleEngineService, RuleService, SessionService, TemplateService};
use assert_matches::assert_matches;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

async fn test_db() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let db = match PgPool::connect(&url).await {
        Ok(db) => db,
        Err(_) => {
            println!("Test database not available, skipping");
            return None;
        }
    };
    sqlx::migrate!("./migrations").run(&db).await.ok()?;
    Some(db)
}

struct Fixture {
    academy_id: Uuid,
    athlete_user_id: Uuid,
    athlete_id: Uuid,
    template_x: Uuid,
    template_long: Uuid,
    template_recovery: Uuid,
}

async fn create_user(db: &PgPool, academy_id: Uuid, role: UserRole) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (academy_id, email, password_hash, role, first_name, last_name)
         VALUES ($1, $2, 'not-a-real-hash', $3, 'Test', 'User')
         RETURNING id",
    )
    .bind(academy_id)
    .bind(format!("{}@test.local", Uuid::new_v4()))
    .bind(role)
    .fetch_one(db)
    .await
    .expect("create user")
}

async fn create_athlete(db: &PgPool, academy_id: Uuid) -> (Uuid, Uuid) {
    let user_id = create_user(db, academy_id, UserRole::Athlete).await;
    let athlete_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO athlete_profiles (user_id, level, frequency, athlete_group)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(user_id)
    .bind(Level::L1)
    .bind(Frequency::F2X)
    .bind(AthleteGroup::Hs)
    .fetch_one(db)
    .await
    .expect("create athlete profile");
    (user_id, athlete_id)
}

async fn create_academy(db: &PgPool) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("INSERT INTO academies (name) VALUES ($1) RETURNING id")
        .bind(format!("Test Academy {}", Uuid::new_v4()))
        .fetch_one(db)
        .await
        .expect("create academy")
}

async fn create_menu_template(
    db: &PgPool,
    academy_id: Uuid,
    name: &str,
    workout_type: WorkoutType,
    duration: SessionDuration,
    drill_ids: &[Uuid],
) -> Uuid {
    let drills = drill_ids
        .iter()
        .enumerate()
        .map(|(i, &drill_id)| CreateTemplateDrill {
            drill_id,
            // Deliberately reversed insert order; the resolver must sort
            order_index: (drill_ids.len() - i) as i32,
            sets: Some("3".to_string()),
            reps: Some("10".to_string()),
            rest: None,
        })
        .collect();

    TemplateService::new(db.clone())
        .create_template(
            academy_id,
            CreateTemplate {
                name: name.to_string(),
                workout_type,
                duration,
                drills,
            },
        )
        .await
        .expect("create template")
        .id
}

async fn create_drill(db: &PgPool, academy_id: Uuid, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO drills (academy_id, name, category) VALUES ($1, $2, 'Testing') RETURNING id",
    )
    .bind(academy_id)
    .bind(name)
    .fetch_one(db)
    .await
    .expect("create drill")
}

/// Seeds one academy with a coach, an L1/F2X/HS athlete, the rule target
/// template (A_LOWER, MIN_60) and both override targets.
async fn seed_fixture(db: &PgPool) -> Fixture {
    let academy_id = create_academy(db).await;
    create_user(db, academy_id, UserRole::Coach).await;
    let (athlete_user_id, athlete_id) = create_athlete(db, academy_id).await;

    let drill_a = create_drill(db, academy_id, "Fastball Accuracy").await;
    let drill_b = create_drill(db, academy_id, "Power Swing").await;

    let template_x = create_menu_template(
        db,
        academy_id,
        "TemplateX",
        WorkoutType::ALower,
        SessionDuration::Min60,
        &[drill_a, drill_b],
    )
    .await;
    let template_long = create_menu_template(
        db,
        academy_id,
        "LowerLong",
        WorkoutType::ALower,
        SessionDuration::Min120,
        &[drill_a, drill_b],
    )
    .await;
    let template_recovery = create_menu_template(
        db,
        academy_id,
        "RecoveryLong",
        WorkoutType::DRecovery,
        SessionDuration::Min120,
        &[drill_a],
    )
    .await;

    RuleService::new(db.clone())
        .create_rule(
            academy_id,
            CreateRule {
                level: Level::L1,
                frequency: Frequency::F2X,
                group: AthleteGroup::Hs,
                template_id: template_x,
            },
        )
        .await
        .expect("create rule");

    Fixture {
        academy_id,
        athlete_user_id,
        athlete_id,
        template_x,
        template_long,
        template_recovery,
    }
}

async fn session_template_id(db: &PgPool, session_id: Uuid) -> Uuid {
    sqlx::query_scalar::<_, Uuid>("SELECT template_id FROM sessions WHERE id = $1")
        .bind(session_id)
        .fetch_one(db)
        .await
        .expect("session template")
}

#[tokio::test]
async fn resolver_returns_the_seeded_template_with_ordered_drills() {
    let Some(db) = test_db().await else { return };
    let fixture = seed_fixture(&db).await;

    let template = RuleEngineService::new(db.clone())
        .resolve_template(fixture.academy_id, Level::L1, Frequency::F2X, AthleteGroup::Hs)
        .await
        .expect("resolution");

    assert_eq!(template.id, fixture.template_x);
    assert_eq!(template.workout_type, WorkoutType::ALower);
    assert_eq!(template.duration, SessionDuration::Min60);
    assert_eq!(template.drills.len(), 2);
    assert!(template.drills[0].order_index < template.drills[1].order_index);
}

#[tokio::test]
async fn resolver_fails_loudly_without_an_exact_match() {
    let Some(db) = test_db().await else { return };
    let fixture = seed_fixture(&db).await;

    // L2 has no seeded rule; no fallback, no partial match
    let result = RuleEngineService::new(db.clone())
        .resolve_template(fixture.academy_id, Level::L2, Frequency::F2X, AthleteGroup::Hs)
        .await;

    assert_matches!(result, Err(EngineError::RuleNotFound { level: Level::L2, .. }));
}

#[tokio::test]
async fn duplicate_classification_rule_is_rejected() {
    let Some(db) = test_db().await else { return };
    let fixture = seed_fixture(&db).await;

    let result = RuleService::new(db.clone())
        .create_rule(
            fixture.academy_id,
            CreateRule {
                level: Level::L1,
                frequency: Frequency::F2X,
                group: AthleteGroup::Hs,
                template_id: fixture.template_long,
            },
        )
        .await;

    assert_matches!(result, Err(EngineError::DuplicateRule));
}

#[tokio::test]
async fn updating_a_rule_onto_an_occupied_tuple_is_rejected() {
    let Some(db) = test_db().await else { return };
    let fixture = seed_fixture(&db).await;
    let service = RuleService::new(db.clone());

    let second = service
        .create_rule(
            fixture.academy_id,
            CreateRule {
                level: Level::L2,
                frequency: Frequency::F2X,
                group: AthleteGroup::Hs,
                template_id: fixture.template_long,
            },
        )
        .await
        .expect("second rule");

    // L1/F2X/HS is already mapped by the seeded rule
    let result = service
        .update_rule(
            fixture.academy_id,
            second.id,
            UpdateRule {
                level: Level::L1,
                frequency: Frequency::F2X,
                group: AthleteGroup::Hs,
                template_id: fixture.template_long,
            },
        )
        .await;
    assert_matches!(result, Err(EngineError::DuplicateRule));

    // Keeping its own tuple while retargeting the template is fine
    let updated = service
        .update_rule(
            fixture.academy_id,
            second.id,
            UpdateRule {
                level: Level::L2,
                frequency: Frequency::F2X,
                group: AthleteGroup::Hs,
                template_id: fixture.template_recovery,
            },
        )
        .await
        .expect("self update");
    assert_eq!(updated.template_id, fixture.template_recovery);
}

#[tokio::test]
async fn materializer_creates_one_session_and_one_pending_attendance() {
    let Some(db) = test_db().await else { return };
    let fixture = seed_fixture(&db).await;

    let (session, attendance) = SessionService::new(db.clone())
        .generate_session(fixture.athlete_id, Utc::now())
        .await
        .expect("generation");

    assert_eq!(session.academy_id, fixture.academy_id);
    assert_eq!(session.template_id, fixture.template_x);
    assert_eq!(attendance.session_id, session.id);
    assert_eq!(attendance.status, AttendanceStatus::Pending);

    // Generation is documented as non-idempotent: a second call creates a
    // second, independent session
    SessionService::new(db.clone())
        .generate_session(fixture.athlete_id, Utc::now())
        .await
        .expect("second generation");

    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM attendances WHERE athlete_id = $1",
    )
    .bind(fixture.athlete_id)
    .fetch_one(&db)
    .await
    .expect("count");
    assert_eq!(count, 2);
}

#[tokio::test]
async fn generation_without_a_coach_fails_with_no_partial_state() {
    let Some(db) = test_db().await else { return };

    let academy_id = create_academy(&db).await;
    let (_, athlete_id) = create_athlete(&db, academy_id).await;
    let drill = create_drill(&db, academy_id, "Solo Drill").await;
    let template = create_menu_template(
        &db,
        academy_id,
        "TemplateNoCoach",
        WorkoutType::ALower,
        SessionDuration::Min60,
        &[drill],
    )
    .await;
    RuleService::new(db.clone())
        .create_rule(
            academy_id,
            CreateRule {
                level: Level::L1,
                frequency: Frequency::F2X,
                group: AthleteGroup::Hs,
                template_id: template,
            },
        )
        .await
        .expect("rule");

    let result = SessionService::new(db.clone())
        .generate_session(athlete_id, Utc::now())
        .await;
    assert_matches!(result, Err(EngineError::NoCoachAvailable(id)) if id == academy_id);

    let sessions = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM sessions WHERE academy_id = $1",
    )
    .bind(academy_id)
    .fetch_one(&db)
    .await
    .expect("count");
    assert_eq!(sessions, 0);
}

#[tokio::test]
async fn elite_checkin_retargets_duration_and_marks_present() {
    let Some(db) = test_db().await else { return };
    let fixture = seed_fixture(&db).await;

    let outcome = CheckinService::new(db.clone())
        .check_in(
            fixture.athlete_user_id,
            fixture.academy_id,
            Utc::now(),
            CheckinSubmission {
                condition_score: Some(5),
                program: Some("elite".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("check-in");

    assert_eq!(outcome.status, "success");
    assert!(!outcome.is_forced_tod);

    // (A_LOWER, MIN_60) -> elite maps to MIN_120 -> swap to (A_LOWER, MIN_120)
    assert_eq!(
        session_template_id(&db, outcome.session_id).await,
        fixture.template_long
    );

    let (status, score, forced) = sqlx::query_as::<_, (AttendanceStatus, Option<i32>, bool)>(
        "SELECT status, condition_score, is_forced_tod FROM attendances WHERE athlete_id = $1",
    )
    .bind(fixture.athlete_id)
    .fetch_one(&db)
    .await
    .expect("attendance");
    assert_eq!(status, AttendanceStatus::Present);
    assert_eq!(score, Some(5));
    assert!(!forced);
}

#[tokio::test]
async fn repeated_checkin_is_a_no_op() {
    let Some(db) = test_db().await else { return };
    let fixture = seed_fixture(&db).await;
    let service = CheckinService::new(db.clone());

    let first = service
        .check_in(
            fixture.athlete_user_id,
            fixture.academy_id,
            Utc::now(),
            CheckinSubmission {
                condition_score: Some(4),
                ..Default::default()
            },
        )
        .await
        .expect("first check-in");
    assert_eq!(first.status, "success");

    let second = service
        .check_in(
            fixture.athlete_user_id,
            fixture.academy_id,
            Utc::now(),
            CheckinSubmission {
                condition_score: Some(1),
                has_pain: true,
                ..Default::default()
            },
        )
        .await
        .expect("second check-in");

    assert_eq!(second.status, "already_checked_in");
    assert_eq!(second.session_id, first.session_id);

    // No duplicate session/attendance, and the stored wellness snapshot is
    // still the first submission's
    let (count, score) = sqlx::query_as::<_, (i64, Option<i32>)>(
        "SELECT COUNT(*), MAX(condition_score) FROM attendances WHERE athlete_id = $1",
    )
    .bind(fixture.athlete_id)
    .fetch_one(&db)
    .await
    .expect("attendance");
    assert_eq!(count, 1);
    assert_eq!(score, Some(4));
}

#[tokio::test]
async fn low_readiness_forces_the_recovery_menu() {
    let Some(db) = test_db().await else { return };
    let fixture = seed_fixture(&db).await;

    let outcome = CheckinService::new(db.clone())
        .check_in(
            fixture.athlete_user_id,
            fixture.academy_id,
            Utc::now(),
            CheckinSubmission {
                condition_score: Some(1),
                ..Default::default()
            },
        )
        .await
        .expect("check-in");

    assert!(outcome.is_forced_tod);
    assert_eq!(
        session_template_id(&db, outcome.session_id).await,
        fixture.template_recovery
    );
}

#[tokio::test]
async fn missing_override_template_is_a_silent_no_op() {
    let Some(db) = test_db().await else { return };

    // Academy with the rule template only: no recovery menu to swap to
    let academy_id = create_academy(&db).await;
    create_user(&db, academy_id, UserRole::Coach).await;
    let (athlete_user_id, _) = create_athlete(&db, academy_id).await;
    let drill = create_drill(&db, academy_id, "Only Drill").await;
    let template = create_menu_template(
        &db,
        academy_id,
        "OnlyTemplate",
        WorkoutType::ALower,
        SessionDuration::Min60,
        &[drill],
    )
    .await;
    RuleService::new(db.clone())
        .create_rule(
            academy_id,
            CreateRule {
                level: Level::L1,
                frequency: Frequency::F2X,
                group: AthleteGroup::Hs,
                template_id: template,
            },
        )
        .await
        .expect("rule");

    let outcome = CheckinService::new(db.clone())
        .check_in(
            athlete_user_id,
            academy_id,
            Utc::now(),
            CheckinSubmission {
                has_pain: true,
                pain_area: Some("shoulder".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("check-in succeeds despite missing override template");

    assert!(outcome.is_forced_tod);
    assert_eq!(session_template_id(&db, outcome.session_id).await, template);
}

#[tokio::test]
async fn drill_completion_is_scoped_to_the_owning_athlete() {
    let Some(db) = test_db().await else { return };
    let fixture = seed_fixture(&db).await;
    let service = SessionService::new(db.clone());

    let (_, attendance) = service
        .generate_session(fixture.athlete_id, Utc::now())
        .await
        .expect("generation");
    let drill = create_drill(&db, fixture.academy_id, "Scoped Drill").await;

    // Another athlete, another tenant: the attendance must look missing
    let other_academy = create_academy(&db).await;
    let (other_user_id, _) = create_athlete(&db, other_academy).await;
    let result = service
        .complete_drill(other_user_id, attendance.id, drill)
        .await;
    assert_matches!(result, Err(EngineError::AttendanceNotFound(id)) if id == attendance.id);

    let completion = service
        .complete_drill(fixture.athlete_user_id, attendance.id, drill)
        .await
        .expect("owner completes drill");
    assert_eq!(completion.attendance_id, attendance.id);
    assert_eq!(completion.drill_id, drill);
}

#[tokio::test]
async fn manual_override_swaps_menu_or_fails_loudly() {
    let Some(db) = test_db().await else { return };
    let fixture = seed_fixture(&db).await;
    let service = SessionService::new(db.clone());

    let (session, _) = service
        .generate_session(fixture.athlete_id, Utc::now())
        .await
        .expect("generation");

    let updated = service
        .set_session_menu(
            fixture.academy_id,
            session.id,
            WorkoutType::DRecovery,
            SessionDuration::Min120,
        )
        .await
        .expect("override");
    assert_eq!(updated.template_id, fixture.template_recovery);

    // No (C_SPEED, MIN_45) menu exists in this academy
    let result = service
        .set_session_menu(
            fixture.academy_id,
            session.id,
            WorkoutType::CSpeed,
            SessionDuration::Min45,
        )
        .await;
    assert_matches!(
        result,
        Err(EngineError::TemplateNotFound {
            workout_type: WorkoutType::CSpeed,
            duration: SessionDuration::Min45,
        })
    );

    // Sessions are invisible outside their academy
    let other_academy = create_academy(&db).await;
    let result = service
        .set_session_menu(
            other_academy,
            session.id,
            WorkoutType::DRecovery,
            SessionDuration::Min120,
        )
        .await;
    assert_matches!(result, Err(EngineError::SessionNotFound(id)) if id == session.id);
}
