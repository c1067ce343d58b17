use serde::{Deserialize, Serialize};

use crate::{accounts::repo_types::Account, articles::Article, patch::Patch};

/// Public part of an account. The password hash never leaves the store.
#[derive(Debug, Serialize)]
pub struct AccountPublic {
    pub id: i32,
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "sobrenome")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "eh_admin")]
    pub is_admin: bool,
}

impl From<Account> for AccountPublic {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            first_name: a.first_name,
            last_name: a.last_name,
            email: a.email,
            is_admin: a.is_admin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccountWithArticles {
    #[serde(flatten)]
    pub account: AccountPublic,
    #[serde(rename = "artigos")]
    pub articles: Vec<Article>,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "sobrenome")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "eh_admin", default)]
    pub is_admin: bool,
}

/// Body of `PUT /{id}`; every field may be left out.
#[derive(Deserialize)]
pub struct UpdateRequest {
    #[serde(rename = "nome", default)]
    pub first_name: Patch<String>,
    #[serde(rename = "sobrenome", default)]
    pub last_name: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(rename = "senha", default)]
    pub password: Patch<String>,
    #[serde(rename = "eh_admin", default)]
    pub is_admin: Patch<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_account_has_no_password_field() {
        let json = serde_json::to_value(AccountPublic::from(Account {
            id: 1,
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            is_admin: false,
        }))
        .unwrap();

        assert_eq!(json["nome"], "A");
        assert_eq!(json["eh_admin"], false);
        assert!(json.get("senha").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn signup_admin_flag_defaults_to_false() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"nome":"A","sobrenome":"B","email":"a@x.com","senha":"pw123"}"#,
        )
        .unwrap();
        assert!(!req.is_admin);
    }

    #[test]
    fn detail_view_flattens_account_next_to_articles() {
        let view = AccountWithArticles {
            account: AccountPublic {
                id: 3,
                first_name: "A".into(),
                last_name: "B".into(),
                email: "a@x.com".into(),
                is_admin: true,
            },
            articles: vec![],
        };
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["artigos"], serde_json::json!([]));
    }
}
