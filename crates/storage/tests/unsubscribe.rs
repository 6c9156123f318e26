mod common;

use chrono::{Duration, Utc};
use common::*;

#[tokio::test]
async fn redeeming_removes_only_the_matching_pending_rows() {
    let db = mk_db().await;
    let alice = mk_user(&db, "alice", false).await;
    let talk = mk_talk(&db, &alice, "Unsubscribe", 1).await;

    db.queue_email(talk.id, "bob@x.com", "s1", "b1").await.unwrap();
    db.queue_email(talk.id, "bob@x.com", "s2", "b2").await.unwrap();
    db.queue_email(talk.id, "carol@x.com", "s3", "b3").await.unwrap();

    let removed = db.remove_pending_for(talk.id, "bob@x.com").await.unwrap();
    assert_eq!(removed, 2);

    // 第二次兑现：已消费
    let removed_again = db.remove_pending_for(talk.id, "bob@x.com").await.unwrap();
    assert_eq!(removed_again, 0);

    let cutoff = Utc::now().naive_utc() + Duration::seconds(1);
    let left = db.due_emails(cutoff).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].email, "carol@x.com");
}

#[tokio::test]
async fn unknown_pair_removes_nothing() {
    let db = mk_db().await;
    let alice = mk_user(&db, "alice", false).await;
    let talk = mk_talk(&db, &alice, "Nothing", 1).await;

    db.queue_email(talk.id, "bob@x.com", "s", "b").await.unwrap();
    assert_eq!(db.remove_pending_for(talk.id, "other@x.com").await.unwrap(), 0);
    assert_eq!(db.remove_pending_for(talk.id + 1, "bob@x.com").await.unwrap(), 0);

    let cutoff = Utc::now().naive_utc() + Duration::seconds(1);
    assert_eq!(db.due_emails(cutoff).await.unwrap().len(), 1);
}

#[tokio::test]
async fn clearing_notify_drops_the_subscriber() {
    let db = mk_db().await;
    let alice = mk_user(&db, "alice", false).await;
    let talk = mk_talk(&db, &alice, "Subscribers", 1).await;

    db.insert_comment(talk.id, &visitor_comment("hi", "bob@x.com", true))
        .await
        .unwrap();
    db.insert_comment(talk.id, &visitor_comment("hey", "carol@x.com", true))
        .await
        .unwrap();
    db.insert_comment(talk.id, &visitor_comment("silent", "dave@x.com", false))
        .await
        .unwrap();

    let subs = db.subscriber_emails(talk.id, None).await.unwrap();
    assert_eq!(subs.len(), 2);

    // 发布者自己被排除
    let subs = db.subscriber_emails(talk.id, Some("bob@x.com")).await.unwrap();
    assert_eq!(subs, vec!["carol@x.com".to_string()]);

    db.clear_notify_flag(talk.id, "bob@x.com").await.unwrap();
    let subs = db.subscriber_emails(talk.id, None).await.unwrap();
    assert_eq!(subs, vec!["carol@x.com".to_string()]);
}

#[tokio::test]
async fn flush_honors_the_batching_window() {
    let db = mk_db().await;
    let alice = mk_user(&db, "alice", false).await;
    let talk = mk_talk(&db, &alice, "Batching", 1).await;

    db.queue_email(talk.id, "bob@x.com", "s", "b").await.unwrap();

    // 还在缓冲窗口内
    let early_cutoff = Utc::now().naive_utc() - Duration::seconds(120);
    assert!(db.due_emails(early_cutoff).await.unwrap().is_empty());

    // 窗口过后可以发了
    let late_cutoff = Utc::now().naive_utc() + Duration::seconds(1);
    let due = db.due_emails(late_cutoff).await.unwrap();
    assert_eq!(due.len(), 1);

    db.delete_pending_email(due[0].id).await.unwrap();
    assert!(db.due_emails(late_cutoff).await.unwrap().is_empty());
}
