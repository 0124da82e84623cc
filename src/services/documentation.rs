use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Peña Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::players::list_players,
        crate::routes::players::create_player,
        crate::routes::players::get_player,
        crate::routes::players::update_player,
        crate::routes::players::delete_player,
        crate::routes::teams::generate_teams,
        crate::routes::teams::save_teams,
        crate::routes::matches::list_matches,
        crate::routes::matches::create_match,
        crate::routes::matches::get_match,
        crate::routes::matches::record_result,
        crate::routes::matches::cancel_match,
        crate::routes::fines::list_fines,
        crate::routes::fines::create_fine,
        crate::routes::fines::fines_summary,
        crate::routes::fines::mark_paid,
        crate::routes::fines::mark_unpaid,
        crate::routes::stats::leaderboard,
        crate::routes::stats::dashboard,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::player::RoleDto,
            crate::dto::player::CreatePlayerRequest,
            crate::dto::player::UpdatePlayerRequest,
            crate::dto::player::PlayerResponse,
            crate::dto::player::PlayerBrief,
            crate::dto::team::GenerateTeamsRequest,
            crate::dto::team::TeamPreview,
            crate::dto::team::GeneratedTeamsResponse,
            crate::dto::team::SaveTeamsRequest,
            crate::dto::matches::MatchStatusDto,
            crate::dto::matches::CreateMatchRequest,
            crate::dto::matches::PlayerStatsInput,
            crate::dto::matches::RecordResultRequest,
            crate::dto::matches::MatchSummary,
            crate::dto::matches::StatLine,
            crate::dto::matches::TeamMemberView,
            crate::dto::matches::MatchTeamView,
            crate::dto::matches::MatchDetail,
            crate::dto::fine::CreateFineRequest,
            crate::dto::fine::FineResponse,
            crate::dto::fine::PlayerAmount,
            crate::dto::fine::FinesSummary,
            crate::dto::stats::LeaderboardEntry,
            crate::dto::stats::PlayerTotal,
            crate::dto::stats::DashboardResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "players", description = "Member roster"),
        (name = "teams", description = "Skill-balanced team generation"),
        (name = "matches", description = "Match scheduling and results"),
        (name = "fines", description = "Fines bookkeeping"),
        (name = "stats", description = "Aggregated statistics"),
    )
)]
pub struct ApiDoc;
