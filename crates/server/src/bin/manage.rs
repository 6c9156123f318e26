//! 用户开通与建库脚本:
//!   manage adduser <email> <username> [--admin]
//!   manage migrate

use anyhow::{bail, Context};
use domain::Username;
use sha2::{Digest, Sha256};
use std::io::{self, BufRead, Write};
use storage::Db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let db_url = std::env::var("TALKS_DATABASE__URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .unwrap_or_else(|_| "sqlite://data/talks.db".to_string());

    match args.first().map(String::as_str) {
        Some("adduser") => {
            let email = args.get(1).context("Usage: manage adduser <email> <username> [--admin]")?;
            let username = args.get(2).context("Usage: manage adduser <email> <username> [--admin]")?;
            let is_admin = args.iter().any(|a| a == "--admin");
            adduser(&db_url, email, username, is_admin).await
        }
        Some("migrate") => {
            // Db::new 开库时自动跑迁移
            Db::new(&db_url).await?;
            println!("Database migrated successfully.");
            Ok(())
        }
        _ => bail!("Usage: manage <adduser|migrate> ..."),
    }
}

async fn adduser(db_url: &str, email: &str, username: &str, is_admin: bool) -> anyhow::Result<()> {
    let username = Username::new(username).map_err(|e| anyhow::anyhow!(e))?;

    let password = prompt("Password: ")?;
    let confirm = prompt("Confirm: ")?;
    if password != confirm {
        bail!("Error: passwords do not match.");
    }
    if password.is_empty() {
        bail!("Error: password cannot be empty.");
    }

    let db = Db::new(db_url).await?;

    let password_hash = hash_password(&password);
    let api_token = generate_token();
    let user = db
        .insert_user(&username, email, &password_hash, &api_token, is_admin)
        .await?;

    println!("User {} was registered successfully.", user.username);
    println!("API token: {}", api_token);
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// 盐化 SHA-256，存成 "salt$hash"
fn hash_password(password: &str) -> String {
    let salt = format!("{:x}", rand::random::<u128>());
    let digest = Sha256::digest(format!("{}{}", salt, password));
    format!("{}${}", salt, hex::encode(digest))
}

fn generate_token() -> String {
    format!("{:x}{:x}", rand::random::<u128>(), rand::random::<u128>())
}
