//! # Profiles

use rusqlite::Connection;
use serde::Serialize;

use super::errors::{ServiceError, ServiceResult};
use super::SocialService;
use crate::store::{follows, users, User, UserId, UserSummary};

/// A user with both follow lists resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
}

fn load_profile(conn: &Connection, user: &User) -> ServiceResult<UserProfile> {
    Ok(UserProfile {
        id: user.id,
        name: user.name.clone(),
        followers: follows::followers_of(conn, user.id)?,
        following: follows::following_of(conn, user.id)?,
    })
}

impl SocialService {
    /// Profile of the caller.
    pub fn current_profile(&self, api_key: &str) -> ServiceResult<UserProfile> {
        self.authorized(api_key, load_profile)
    }

    /// Profile of any user. No API key is needed.
    pub fn user_profile(&self, id: UserId) -> ServiceResult<UserProfile> {
        self.store().transaction(|tx| {
            let user = users::find_by_id(tx, id)?.ok_or_else(|| ServiceError::not_found("User"))?;
            load_profile(tx, &user)
        })
    }
}
