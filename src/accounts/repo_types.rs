use sqlx::FromRow;

/// Account record in the `usuarios` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Account {
    pub id: i32,
    #[sqlx(rename = "nome")]
    pub first_name: String,
    #[sqlx(rename = "sobrenome")]
    pub last_name: String,
    pub email: String,
    #[sqlx(rename = "senha")]
    pub password_hash: String, // Argon2 PHC string, never serialized
    #[sqlx(rename = "eh_admin")]
    pub is_admin: bool,
}

/// Fields needed to insert an account; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Columns to overwrite on update. `None` leaves the column as it is.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: Option<bool>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.is_admin.is_none()
    }
}
