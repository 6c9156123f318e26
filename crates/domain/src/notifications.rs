use serde::{Deserialize, Serialize};

/// 评论工作流发给通知 worker 的消息。对工作流来说是 fire-and-forget。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Notification {
    /// 评论已发布：给该演讲下订阅了通知的访客发邮件。
    CommentPublished {
        talk_id: i64,
        comment_id: i64,
        /// 发布者自己的邮箱不需要收到通知
        exclude_email: Option<String>,
    },
    /// 有评论等待审核：提醒演讲作者。
    AwaitingReview { talk_id: i64 },
}
