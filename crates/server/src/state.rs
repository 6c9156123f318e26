use axum::extract::FromRef;
use domain::Notification;
use storage::Db;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    // 工作流视角下的 fire-and-forget 通知出口
    pub notifier: mpsc::Sender<Notification>,
    pub unsubscribe_secret: String,
    pub talks_per_page: i64,
    pub comments_per_page: i64,
}

impl FromRef<AppState> for Db {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
