use crate::{models::SqlUser, Db};
use anyhow::Context;
use domain::{ProfileForm, User, Username};

const USER_COLUMNS: &str = "id, username, email, name, location, bio, is_admin";

impl Db {
    pub async fn insert_user(
        &self,
        username: &Username,
        email: &str,
        password_hash: &str,
        api_token: &str,
        is_admin: bool,
    ) -> anyhow::Result<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, api_token, is_admin)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(username.as_str())
        .bind(email)
        .bind(password_hash)
        .bind(api_token)
        .bind(is_admin)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let row = sqlx::query_as::<_, SqlUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Into::into).context("user vanished right after insert")
    }

    pub async fn get_user(&self, id: i64) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, SqlUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    pub async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, SqlUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    // Bearer token -> 用户，认证提取器用
    pub async fn get_user_by_token(&self, api_token: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, SqlUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE api_token = ?"
        ))
        .bind(api_token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    pub async fn update_profile(&self, user_id: i64, form: &ProfileForm) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET name = ?, location = ?, bio = ? WHERE id = ?")
            .bind(&form.name)
            .bind(&form.location)
            .bind(&form.bio)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
