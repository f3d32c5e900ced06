// Data models for the academy training engine

pub mod academy;
pub mod athlete_profile;
pub mod attendance;
pub mod drill;
pub mod rule;
pub mod session;
pub mod template;
pub mod user;

pub use academy::*;
pub use athlete_profile::*;
pub use attendance::*;
pub use drill::*;
pub use rule::*;
pub use session::*;
pub use template::*;
pub use user::*;
