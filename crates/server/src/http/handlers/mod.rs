pub mod comments;
pub mod moderation;
pub mod profile;
pub mod talks;
pub mod unsubscribe;
