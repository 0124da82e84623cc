//! DTO definitions for the member roster.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::{PlayerEntity, Role};
use crate::dto::{format_system_time, validation::validate_not_blank};

/// Role of a member as exposed over the API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoleDto {
    Member,
    Admin,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        match role {
            Role::Member => RoleDto::Member,
            Role::Admin => RoleDto::Admin,
        }
    }
}

impl From<RoleDto> for Role {
    fn from(role: RoleDto) -> Self {
        match role {
            RoleDto::Member => Role::Member,
            RoleDto::Admin => Role::Admin,
        }
    }
}

/// Payload used to register a new member.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePlayerRequest {
    #[validate(length(max = 80), custom(function = validate_not_blank))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// Skill rating between 1 and 100, defaults to 50.
    #[validate(range(min = 1, max = 100))]
    pub skill: Option<u8>,
    pub position: Option<String>,
    #[validate(url)]
    pub image: Option<String>,
    pub role: Option<RoleDto>,
}

/// Partial update of a member; omitted fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdatePlayerRequest {
    #[validate(length(max = 80), custom(function = validate_not_blank))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 1, max = 100))]
    pub skill: Option<u8>,
    pub position: Option<String>,
    #[validate(url)]
    pub image: Option<String>,
    pub role: Option<RoleDto>,
}

/// Public projection of a member.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub skill: u8,
    pub position: Option<String>,
    pub image: Option<String>,
    pub role: RoleDto,
    pub created_at: String,
}

impl From<PlayerEntity> for PlayerResponse {
    fn from(player: PlayerEntity) -> Self {
        Self {
            id: player.id,
            name: player.name,
            email: player.email,
            skill: player.skill,
            position: player.position,
            image: player.image,
            role: player.role.into(),
            created_at: format_system_time(player.created_at),
        }
    }
}

/// Compact player projection used inside team listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerBrief {
    pub id: Uuid,
    pub name: String,
    pub skill: u8,
    pub position: Option<String>,
}

impl From<&PlayerEntity> for PlayerBrief {
    fn from(player: &PlayerEntity) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            skill: player.skill,
            position: player.position.clone(),
        }
    }
}
