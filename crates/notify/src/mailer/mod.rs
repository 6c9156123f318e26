mod log;
mod webhook;

pub use log::LogMailer;
pub use webhook::WebhookMailer;
