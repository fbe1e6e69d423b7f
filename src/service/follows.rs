//! # Follows

use super::errors::{ServiceError, ServiceResult};
use super::SocialService;
use crate::store::{follows, users, UserId};

const SELF_FOLLOW: &str = "You cannot follow yourself";

impl SocialService {
    /// Creates the caller -> `target` edge.
    pub fn follow_user(&self, api_key: &str, target: UserId) -> ServiceResult<()> {
        self.authorized(api_key, |conn, user| {
            if user.id == target {
                return Err(ServiceError::BadRequest(SELF_FOLLOW.to_string()));
            }
            if users::find_by_id(conn, target)?.is_none() {
                return Err(ServiceError::not_found("User"));
            }
            if follows::find(conn, user.id, target)?.is_some() {
                return Err(ServiceError::conflict("You already follow this user"));
            }

            follows::insert(conn, user.id, target)?;
            tracing::debug!(follower = user.id, following = target, "follow created");
            Ok(())
        })
    }

    /// Removes the caller -> `target` edge.
    pub fn unfollow_user(&self, api_key: &str, target: UserId) -> ServiceResult<()> {
        self.authorized(api_key, |conn, user| {
            if user.id == target {
                return Err(ServiceError::BadRequest(SELF_FOLLOW.to_string()));
            }
            if users::find_by_id(conn, target)?.is_none() {
                return Err(ServiceError::not_found("User"));
            }
            let edge = follows::find(conn, user.id, target)?
                .ok_or_else(|| ServiceError::not_found("Follow"))?;

            follows::delete(conn, edge.id)?;
            tracing::debug!(follower = user.id, following = target, "follow removed");
            Ok(())
        })
    }
}
