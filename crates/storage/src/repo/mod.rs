mod comments;
mod pending_emails;
mod talks;
mod users;
