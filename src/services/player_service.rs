use std::time::SystemTime;

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::PlayerEntity,
    dto::player::{CreatePlayerRequest, PlayerResponse, UpdatePlayerRequest},
    error::ServiceError,
    state::SharedState,
};

/// Skill given to members registered without an explicit rating.
pub const DEFAULT_SKILL: u8 = 50;

/// List every member ordered by name.
pub async fn list_players(state: &SharedState) -> Result<Vec<PlayerResponse>, ServiceError> {
    let store = state.require_club_store().await?;
    let mut players = store.list_players().await?;
    players.sort_by_cached_key(|player| (collation_key(&player.name), player.name.clone()));
    Ok(players.into_iter().map(Into::into).collect())
}

pub async fn get_player(state: &SharedState, id: Uuid) -> Result<PlayerResponse, ServiceError> {
    load_player(state, id).await.map(Into::into)
}

/// Register a new member.
pub async fn create_player(
    state: &SharedState,
    request: CreatePlayerRequest,
) -> Result<PlayerResponse, ServiceError> {
    let store = state.require_club_store().await?;

    let player = PlayerEntity {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        skill: checked_skill(request.skill.unwrap_or(DEFAULT_SKILL))?,
        position: request.position.filter(|p| !p.trim().is_empty()),
        image: request.image,
        role: request.role.map(Into::into).unwrap_or_default(),
        created_at: SystemTime::now(),
    };

    store.save_player(player.clone()).await?;
    info!(player_id = %player.id, skill = player.skill, "registered player");
    Ok(player.into())
}

/// Apply the supplied fields to an existing member.
pub async fn update_player(
    state: &SharedState,
    id: Uuid,
    request: UpdatePlayerRequest,
) -> Result<PlayerResponse, ServiceError> {
    let store = state.require_club_store().await?;
    let mut player = load_player(state, id).await?;

    let UpdatePlayerRequest {
        name,
        email,
        skill,
        position,
        image,
        role,
    } = request;

    if let Some(name) = name {
        player.name = name.trim().to_string();
    }
    if let Some(email) = email {
        player.email = email;
    }
    if let Some(skill) = skill {
        player.skill = checked_skill(skill)?;
    }
    if let Some(position) = position {
        player.position = Some(position).filter(|p| !p.trim().is_empty());
    }
    if let Some(image) = image {
        player.image = Some(image);
    }
    if let Some(role) = role {
        player.role = role.into();
    }

    store.save_player(player.clone()).await?;
    Ok(player.into())
}

pub async fn delete_player(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let store = state.require_club_store().await?;
    if !store.delete_player(id).await? {
        return Err(ServiceError::NotFound(format!("player `{id}` not found")));
    }
    info!(player_id = %id, "removed player");
    Ok(())
}

pub(crate) async fn load_player(
    state: &SharedState,
    id: Uuid,
) -> Result<PlayerEntity, ServiceError> {
    let store = state.require_club_store().await?;
    store
        .find_player(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("player `{id}` not found")))
}

/// Case- and accent-insensitive sort key, so "Álvaro" sorts with the other A names.
fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

fn checked_skill(skill: u8) -> Result<u8, ServiceError> {
    if (1..=100).contains(&skill) {
        Ok(skill)
    } else {
        Err(ServiceError::InvalidInput(format!(
            "skill must be between 1 and 100 (got {skill})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig, dao::club_store::memory::MemoryClubStore, dto::player::RoleDto,
        state::AppState,
    };

    fn state() -> SharedState {
        AppState::with_store(AppConfig::default(), Arc::new(MemoryClubStore::new()))
    }

    fn request(name: &str, skill: Option<u8>) -> CreatePlayerRequest {
        CreatePlayerRequest {
            name: name.into(),
            email: "socio@example.com".into(),
            skill,
            position: None,
            image: None,
            role: None,
        }
    }

    #[tokio::test]
    async fn new_players_default_to_mid_skill_members() {
        let state = state();
        let player = create_player(&state, request("  Raúl Díaz ", None))
            .await
            .unwrap();

        assert_eq!(player.name, "Raúl Díaz");
        assert_eq!(player.skill, DEFAULT_SKILL);
        assert_eq!(player.role, RoleDto::Member);
    }

    #[tokio::test]
    async fn players_are_listed_by_name() {
        let state = state();
        for name in ["Pedro", "Carlos", "Javier"] {
            create_player(&state, request(name, Some(60))).await.unwrap();
        }

        let names = list_players(&state)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["Carlos", "Javier", "Pedro"]);
    }

    #[tokio::test]
    async fn listing_ignores_accents_and_case() {
        let state = state();
        for name in ["Zoe", "Álvaro", "beñat", "Íñigo", "Andoni"] {
            create_player(&state, request(name, None)).await.unwrap();
        }

        let names = list_players(&state)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["Álvaro", "Andoni", "beñat", "Íñigo", "Zoe"]);
    }

    #[tokio::test]
    async fn update_only_touches_supplied_fields() {
        let state = state();
        let created = create_player(&state, request("Carlos", Some(70)))
            .await
            .unwrap();

        let updated = update_player(
            &state,
            created.id,
            UpdatePlayerRequest {
                skill: Some(85),
                position: Some("Portero".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Carlos");
        assert_eq!(updated.skill, 85);
        assert_eq!(updated.position.as_deref(), Some("Portero"));
    }

    #[tokio::test]
    async fn zero_skill_is_rejected() {
        let state = state();
        let err = create_player(&state, request("Carlos", Some(0)))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn deleting_unknown_player_is_not_found() {
        let state = state();
        let err = delete_player(&state, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
