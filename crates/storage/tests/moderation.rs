mod common;

use common::*;

#[tokio::test]
async fn personal_queue_returns_only_own_pending_comments() {
    let db = mk_db().await;
    let alice = mk_user(&db, "alice", false).await;
    let bob = mk_user(&db, "bob", false).await;
    let alice_talk = mk_talk(&db, &alice, "Alice's", 1).await;
    let bob_talk = mk_talk(&db, &bob, "Bob's", 2).await;

    db.insert_comment(alice_talk.id, &visitor_comment("for alice", "v1@x.com", false))
        .await
        .unwrap();
    db.insert_comment(bob_talk.id, &visitor_comment("for bob", "v2@x.com", false))
        .await
        .unwrap();
    // 已批准的不进队列
    db.insert_comment(alice_talk.id, &presenter_comment("own", &alice, true))
        .await
        .unwrap();

    let queue = db.moderation_queue_for(alice.id).await.unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].body, "for alice");
    assert!(!queue[0].approved);
}

#[tokio::test]
async fn admin_queue_is_the_union_of_all_pending() {
    let db = mk_db().await;
    let alice = mk_user(&db, "alice", false).await;
    let bob = mk_user(&db, "bob", false).await;
    let alice_talk = mk_talk(&db, &alice, "Alice's", 1).await;
    let bob_talk = mk_talk(&db, &bob, "Bob's", 2).await;

    db.insert_comment(alice_talk.id, &visitor_comment("earlier", "v1@x.com", false))
        .await
        .unwrap();
    db.insert_comment(bob_talk.id, &visitor_comment("later", "v2@x.com", false))
        .await
        .unwrap();

    let queue = db.moderation_queue_all().await.unwrap();
    let bodies: Vec<&str> = queue.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["earlier", "later"]);
}

#[tokio::test]
async fn approve_flips_a_pending_comment_exactly_once() {
    let db = mk_db().await;
    let alice = mk_user(&db, "alice", false).await;
    let talk = mk_talk(&db, &alice, "Approve", 1).await;

    let comment = db
        .insert_comment(talk.id, &visitor_comment("please review", "v@x.com", false))
        .await
        .unwrap();

    assert!(db.approve_comment(comment.id).await.unwrap());
    // 第二次是 no-op
    assert!(!db.approve_comment(comment.id).await.unwrap());

    assert!(db.moderation_queue_for(alice.id).await.unwrap().is_empty());
    let stored = db.get_comment(comment.id).await.unwrap().unwrap();
    assert!(stored.approved);
}
