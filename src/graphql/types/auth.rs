use async_graphql::*;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ActorRef;
use crate::database::entities::{user_roles, users};
use crate::services::{LoginResult, RegisterUser};

/// User without credentials.
#[derive(SimpleObject, Clone, Debug)]
pub struct User {
    pub id: String,
    pub uuid: String,
    pub username: String,
    pub email: String,
    #[graphql(name = "roleUUID")]
    pub role_uuid: String,
    pub status: String,
    #[graphql(name = "lastLoginAt")]
    pub last_login_at: Option<DateTime<Utc>>,
    #[graphql(name = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[graphql(name = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id.to_string(),
            uuid: model.uuid,
            username: model.username,
            email: model.email,
            role_uuid: model.role_uuid,
            status: model.status,
            last_login_at: model.last_login_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct LoginResponse {
    /// Value for `Authorization: Bearer <token>`.
    pub token: String,
    pub user: User,
    #[graphql(name = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token,
            user: User::from(result.user),
            expires_at: result.expires_at,
        }
    }
}

#[derive(InputObject, Clone, Debug)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(InputObject, Clone, Debug)]
pub struct RegisterUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    #[graphql(name = "roleUUID")]
    pub role_uuid: Option<String>,
}

impl From<RegisterUserInput> for RegisterUser {
    fn from(input: RegisterUserInput) -> Self {
        Self {
            username: input.username,
            email: input.email,
            password: input.password,
            role_uuid: input.role_uuid,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct UserRole {
    pub id: String,
    pub uuid: String,
    pub name: String,
    pub privileges: Vec<String>,
    #[graphql(name = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[graphql(name = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[graphql(name = "deletedAt")]
    pub deleted_at: String,
    #[graphql(name = "createdBy")]
    pub created_by: ActorRef,
    #[graphql(name = "updatedBy")]
    pub updated_by: ActorRef,
}

impl From<user_roles::Model> for UserRole {
    fn from(model: user_roles::Model) -> Self {
        let privileges = model.privilege_list();
        Self {
            id: model.id.to_string(),
            uuid: model.uuid,
            name: model.name,
            privileges,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
            created_by: ActorRef::from_json(&model.created_by),
            updated_by: ActorRef::from_json(&model.updated_by),
        }
    }
}

#[derive(InputObject, Serialize, Clone, Debug, Default)]
pub struct UserRoleInput {
    pub name: Option<String>,
    /// `"<Resource>:<Verb>"` strings, e.g. `"FarmerProfile:Read"`.
    pub privileges: Option<Vec<String>>,
}
