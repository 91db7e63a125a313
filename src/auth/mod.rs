use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::{AuthError, CoreError};
use crate::tokenize::TokenSigner;

const BEARER_PREFIX: &str = "Bearer ";
pub const SESSION_TOKEN_PREFIX: &str = "token-";

/// `{uuid, username}` as stored in `createdBy`/`updatedBy`/`deletedBy`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub uuid: String,
    pub username: String,
}

/// Claims carried by a session token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    pub session_uuid: String,
    pub user: ActorSnapshot,
}

/// Session attached to an incoming request.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum RequestSession {
    Authenticated(ActiveSession),
    #[default]
    Anonymous,
}

impl RequestSession {
    /// Parse `Authorization: Bearer token-<jwt>`. Anything unverifiable is anonymous.
    pub fn from_authorization(header: Option<&str>, signer: &TokenSigner) -> Self {
        let Some(raw) = header.map(str::trim).filter(|value| !value.is_empty()) else {
            return RequestSession::Anonymous;
        };

        let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw).trim();
        let token = token.strip_prefix(SESSION_TOKEN_PREFIX).unwrap_or(token);

        match signer.decode_as::<ActiveSession>(token) {
            Ok(session) if !session.user.uuid.is_empty() => RequestSession::Authenticated(session),
            Ok(_) => {
                warn!("Session token without a user identity");
                RequestSession::Anonymous
            }
            Err(err) => {
                warn!("Rejected session token: {}", err);
                RequestSession::Anonymous
            }
        }
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match self {
            RequestSession::Authenticated(session) => Some(session),
            RequestSession::Anonymous => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Actor {
    pub user_uuid: Option<String>,
    pub username: String,
    pub session_uuid: Option<String>,
    privileges: BTreeSet<String>,
    is_system: bool,
}

impl Actor {
    pub fn user(session: &ActiveSession) -> Self {
        Self {
            user_uuid: Some(session.user.uuid.clone()),
            username: session.user.username.clone(),
            session_uuid: Some(session.session_uuid.clone()),
            privileges: BTreeSet::new(),
            is_system: false,
        }
    }

    /// Stand-in actor for development runs and maintenance commands.
    pub fn system() -> Self {
        Self {
            user_uuid: None,
            username: "system".to_string(),
            session_uuid: None,
            privileges: BTreeSet::new(),
            is_system: true,
        }
    }

    pub fn with_privilege(mut self, privilege: impl Into<String>) -> Self {
        self.privileges.insert(privilege.into());
        self
    }

    pub fn with_privileges<I, S>(mut self, privileges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.privileges.extend(privileges.into_iter().map(Into::into));
        self
    }

    pub fn has_privilege(&self, privilege: &str) -> bool {
        self.is_system || self.privileges.contains(privilege)
    }

    pub fn is_system(&self) -> bool {
        self.is_system
    }

    pub fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            uuid: self
                .user_uuid
                .clone()
                .unwrap_or_else(|| Uuid::nil().to_string()),
            username: self.username.clone(),
        }
    }
}

/// `"<Resource>:<Verb>"`
pub fn privilege(resource: &str, verb: &str) -> String {
    format!("{}:{}", resource, verb)
}

pub trait Authorizer {
    fn authorize(&self, actor: &Actor, action: &str) -> Result<(), CoreError>;
}

/// Checks the privileges loaded onto the actor.
pub struct PrivilegeAuthorizer;

impl Authorizer for PrivilegeAuthorizer {
    fn authorize(&self, actor: &Actor, action: &str) -> Result<(), CoreError> {
        if actor.has_privilege(action) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied(action.to_string()).into())
        }
    }
}
