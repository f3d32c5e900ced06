// API routes and handlers

pub mod attendance;
pub mod auth;
pub mod drills;
pub mod health;
pub mod routes;
pub mod rules;
pub mod sessions;
