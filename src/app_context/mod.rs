use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};

use crate::config::AppConfig;
use crate::errors::{CoreError, CoreResult};
use crate::services::{
    ActivityLogService, AuthService, AuthorizationService, RecordService, SpreadsheetService,
};
use crate::tokenize::TokenSigner;

mod activity_operations;
mod auth_operations;
mod record_operations;

pub use record_operations::ImportSummary;

/// Incoming mutation body: plain GraphQL input or a signed token of it.
#[derive(Clone, Debug)]
pub enum RecordPayload {
    Plain(Map<String, Value>),
    Tokenized(String),
}

impl RecordPayload {
    /// Plain input from any serializable GraphQL input object.
    /// Null members are dropped so updates only touch supplied fields.
    /// Date inputs serialize an explicit `null` as `""` to clear the date.
    pub fn plain<T: serde::Serialize>(input: &T) -> CoreResult<Self> {
        match serde_json::to_value(input) {
            Ok(Value::Object(mut map)) => {
                map.retain(|_, value| !value.is_null());
                Ok(RecordPayload::Plain(map))
            }
            Ok(_) => Err(CoreError::validation("Input must be an object")),
            Err(e) => Err(CoreError::internal(format!("Failed to read input: {}", e))),
        }
    }
}

/// Shared application context exposing the services to GraphQL and the CLI.
#[derive(Clone)]
pub struct AppContext {
    db: DatabaseConnection,
    config: Arc<AppConfig>,
    tokenizer: TokenSigner,
    record_service: Arc<RecordService>,
    activity_log_service: Arc<ActivityLogService>,
    auth_service: Arc<AuthService>,
    authorization_service: Arc<AuthorizationService>,
    spreadsheet_service: Arc<SpreadsheetService>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, config: Arc<AppConfig>) -> Self {
        let tokenizer = config.tokenize_signer();
        let record_service = Arc::new(RecordService::new(db.clone()));
        let activity_log_service = Arc::new(ActivityLogService::new(db.clone()));
        let auth_service = Arc::new(AuthService::new(db.clone(), config.clone()));
        let authorization_service =
            Arc::new(AuthorizationService::new(db.clone(), config.clone()));
        let spreadsheet_service = Arc::new(SpreadsheetService::new(config.export_dir.clone()));

        Self {
            db,
            config,
            tokenizer,
            record_service,
            activity_log_service,
            auth_service,
            authorization_service,
            spreadsheet_service,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn config(&self) -> &Arc<AppConfig> {
        &self.config
    }

    /// Signer for tokenized request and response payloads.
    pub fn tokenizer(&self) -> &TokenSigner {
        &self.tokenizer
    }

    pub fn record_service(&self) -> &Arc<RecordService> {
        &self.record_service
    }

    pub fn activity_log_service(&self) -> &Arc<ActivityLogService> {
        &self.activity_log_service
    }

    pub fn auth_service(&self) -> &Arc<AuthService> {
        &self.auth_service
    }

    pub fn authorization_service(&self) -> &Arc<AuthorizationService> {
        &self.authorization_service
    }

    pub fn spreadsheet_service(&self) -> &Arc<SpreadsheetService> {
        &self.spreadsheet_service
    }

    /// Resolve a payload to its JSON object, verifying tokens first.
    pub fn decode_payload(&self, payload: RecordPayload) -> CoreResult<Map<String, Value>> {
        match payload {
            RecordPayload::Plain(map) => Ok(map),
            RecordPayload::Tokenized(token) => Ok(self.tokenizer.decode(token.trim())?),
        }
    }
}
