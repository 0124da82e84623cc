/// OpenAPI documentation generation.
pub mod documentation;
/// Fines bookkeeping.
pub mod fine_service;
/// Health check service.
pub mod health_service;
/// Match scheduling and results.
pub mod match_service;
/// Member roster management.
pub mod player_service;
/// Aggregated statistics.
pub mod stats_service;
/// Storage connection supervisor with backoff.
pub mod storage_supervisor;
/// Skill-based team balancing.
pub mod team_balancer;
/// Team generation and persistence.
pub mod team_service;
