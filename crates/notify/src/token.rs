//! 退订 token：`base64url(talk_id|email) . hex(HMAC-SHA256)`。
//! 不透明、可离线验证，一个 token 恰好对应一个 (talk, email)。

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub fn issue(secret: &str, talk_id: i64, email: &str) -> String {
    let payload = format!("{}|{}", talk_id, email);
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    let sig = hex::encode(mac.finalize().into_bytes());
    format!("{}.{}", URL_SAFE_NO_PAD.encode(payload.as_bytes()), sig)
}

/// 校验通过则给出 (talk_id, email)，任何畸形或伪造输入都是 None。
pub fn verify(secret: &str, token: &str) -> Option<(i64, String)> {
    let (payload_b64, sig_hex) = token.split_once('.')?;
    let payload = String::from_utf8(URL_SAFE_NO_PAD.decode(payload_b64).ok()?).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(payload.as_bytes());
    let sig = hex::decode(sig_hex).ok()?;
    // verify_slice 内部是常数时间比较
    mac.verify_slice(&sig).ok()?;

    let (talk_id, email) = payload.split_once('|')?;
    Some((talk_id.parse().ok()?, email.to_string()))
}
