// Application configuration and seeding

pub mod app;
pub mod database;
pub mod seeding;

pub use app::AppConfig;
pub use database::DatabaseConfig;
pub use seeding::DatabaseSeeder;
