//! User and session token model -> entity mappers

use blog_core::entities::{RefreshToken, RevokedToken, User};
use blog_core::value_objects::{RecordState, UserId};

use crate::models::{RefreshTokenModel, RevokedTokenModel, UserModel};

/// The password hash stays behind; it is only read through `get_password_hash`.
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            email: model.email,
            username: model.username,
            full_name: model.full_name,
            bio: model.bio,
            avatar: model.avatar,
            created_at: model.created_at,
            updated_at: model.updated_at,
            state: RecordState::from_deleted_at(model.deleted_at),
        }
    }
}

impl From<RefreshTokenModel> for RefreshToken {
    fn from(model: RefreshTokenModel) -> Self {
        RefreshToken {
            id: model.id,
            user_id: UserId::new(model.user_id),
            token: model.token,
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}

impl From<RevokedTokenModel> for RevokedToken {
    fn from(model: RevokedTokenModel) -> Self {
        RevokedToken {
            token: model.token,
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}
