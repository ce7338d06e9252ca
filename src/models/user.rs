use serde::{Deserialize, Serialize};

use crate::{
    database::Collection,
    models::{Document, DocumentId, Record},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// bcrypt hash, never served.
    pub password: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub cart: Vec<DocumentId>,
}

impl Document for User {
    const COLLECTION: Collection = Collection::Users;
    const KIND: &'static str = "user";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: DocumentId,
    pub username: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub cart: Vec<DocumentId>,
}

impl From<Record<User>> for UserResponse {
    fn from(record: Record<User>) -> Self {
        let user = record.data;
        Self {
            id: record.id,
            username: user.username,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            cart: user.cart,
        }
    }
}

/// Used for both `POST /users` and `PATCH /users`; `id` only matters on update
/// and `password` is optional there.
#[derive(Debug, Default, Deserialize)]
pub struct UserRequest {
    pub id: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CartRequest {
    pub product_id: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Add,
    Remove,
}

impl CartAction {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }
}
