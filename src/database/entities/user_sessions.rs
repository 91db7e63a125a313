use chrono::{Duration, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const STATUS_LOGGED_IN: &str = "LOGGED_IN";
pub const STATUS_LOGGED_OUT: &str = "LOGGED_OUT";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_sessions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub uuid: String,
    #[serde(rename = "userUUID")]
    pub user_uuid: String,
    pub status: String,
    pub created_at: ChronoDateTimeUtc,
    pub expires_at: ChronoDateTimeUtc,
    pub logged_out_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserUuid",
        to = "super::users::Column::Uuid"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(user_uuid: String, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: ActiveValue::NotSet,
            uuid: Set(Uuid::new_v4().to_string()),
            user_uuid: Set(user_uuid),
            status: Set(STATUS_LOGGED_IN.to_string()),
            created_at: Set(now),
            expires_at: Set(now + ttl),
            logged_out_at: Set(None),
        }
    }

    pub fn log_out(mut self) -> Self {
        self.status = Set(STATUS_LOGGED_OUT.to_string());
        self.logged_out_at = Set(Some(Utc::now()));
        self
    }
}

impl Model {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn is_logged_in(&self) -> bool {
        self.status == STATUS_LOGGED_IN && !self.is_expired()
    }
}
