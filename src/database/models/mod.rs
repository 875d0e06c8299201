pub mod user;
pub mod user_settings;

pub use user::User;
pub use user_settings::UserSettings;
