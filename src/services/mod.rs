// Business logic services

pub mod checkin_service;
pub mod drill_service;
pub mod rule_engine_service;
pub mod rule_service;
pub mod session_service;
pub mod template_service;

pub use checkin_service::CheckinService;
pub use drill_service::DrillService;
pub use rule_engine_service::RuleEngineService;
pub use rule_service::RuleService;
pub use session_service::SessionService;
pub use template_service::TemplateService;
