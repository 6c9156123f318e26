use domain::{Comment, Talk};

const EXCERPT_LEN: usize = 200;

pub fn comment_published(talk: &Talk, comment: &Comment, unsubscribe_url: &str) -> (String, String) {
    let subject = format!("New comment on \"{}\"", talk.title);
    let body = format!(
        "{author} commented on the talk \"{title}\":\n\n{excerpt}\n\n\
         To stop receiving notifications about this talk, visit:\n{unsubscribe_url}\n",
        author = comment.author.display_name(),
        title = talk.title,
        excerpt = excerpt(&comment.body),
    );
    (subject, body)
}

pub fn awaiting_review(talk: &Talk, unsubscribe_url: &str) -> (String, String) {
    let subject = format!("A comment on \"{}\" is awaiting review", talk.title);
    let body = format!(
        "Your talk \"{title}\" received a comment that is waiting for your review.\n\
         It will not be visible to the public until you approve it.\n\n\
         To stop receiving notifications about this talk, visit:\n{unsubscribe_url}\n",
        title = talk.title,
    );
    (subject, body)
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
