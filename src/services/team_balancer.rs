//! Skill-based team balancing.
//!
//! Players are sorted by skill rating (highest first, ties keep their input
//! order) and dealt into two teams in blocks of four: the first and last rank
//! of each block go to team A, the two middle ranks to team B.

use std::collections::HashSet;

use thiserror::Error;
use uuid::Uuid;

/// Minimum pool size so that each team gets at least two players.
pub const DEFAULT_MIN_PLAYERS: usize = 4;

/// Anything that can be balanced: an identifier plus a skill rating.
pub trait Rated {
    fn id(&self) -> Uuid;
    fn skill(&self) -> u8;
}

/// Two teams produced by [`balance`], each in descending skill order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancedTeams<P> {
    pub team_a: Vec<P>,
    pub team_b: Vec<P>,
}

/// Reasons a pool cannot be balanced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("at least {required} players are required to build teams (got {actual})")]
    InsufficientPlayers { actual: usize, required: usize },
    #[error("player `{id}` appears more than once in the pool")]
    DuplicatePlayer { id: Uuid },
}

/// Split `pool` into two teams with similar mean skill.
///
/// A `min_size` of zero is treated as one, so an empty pool is always rejected.
pub fn balance<P>(pool: &[P], min_size: usize) -> Result<BalancedTeams<P>, BalanceError>
where
    P: Rated + Clone,
{
    let required = min_size.max(1);
    if pool.len() < required {
        return Err(BalanceError::InsufficientPlayers {
            actual: pool.len(),
            required,
        });
    }

    let mut seen = HashSet::with_capacity(pool.len());
    if let Some(duplicate) = pool.iter().find(|player| !seen.insert(player.id())) {
        return Err(BalanceError::DuplicatePlayer { id: duplicate.id() });
    }

    // `sort_by` is stable, which keeps equal ratings in caller order.
    let mut sorted = pool.to_vec();
    sorted.sort_by(|a, b| b.skill().cmp(&a.skill()));

    let mut teams = BalancedTeams {
        team_a: Vec::with_capacity(sorted.len().div_ceil(2)),
        team_b: Vec::with_capacity(sorted.len() / 2),
    };
    for (index, player) in sorted.into_iter().enumerate() {
        if matches!(index % 4, 0 | 3) {
            teams.team_a.push(player);
        } else {
            teams.team_b.push(player);
        }
    }

    Ok(teams)
}

/// Average skill of a team, `0.0` for an empty one.
pub fn mean_skill<P: Rated>(team: &[P]) -> f64 {
    if team.is_empty() {
        return 0.0;
    }
    let total: u32 = team.iter().map(|player| u32::from(player.skill())).sum();
    f64::from(total) / team.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Candidate {
        id: Uuid,
        skill: u8,
    }

    impl Rated for Candidate {
        fn id(&self) -> Uuid {
            self.id
        }

        fn skill(&self) -> u8 {
            self.skill
        }
    }

    fn pool(skills: &[u8]) -> Vec<Candidate> {
        skills
            .iter()
            .map(|&skill| Candidate {
                id: Uuid::new_v4(),
                skill,
            })
            .collect()
    }

    fn skills(team: &[Candidate]) -> Vec<u8> {
        team.iter().map(|c| c.skill).collect()
    }

    #[test]
    fn eight_players_follow_the_four_slot_pattern() {
        let teams = balance(&pool(&[90, 80, 70, 60, 50, 40, 30, 20]), 4).unwrap();
        assert_eq!(skills(&teams.team_a), [90, 60, 50, 20]);
        assert_eq!(skills(&teams.team_b), [80, 70, 40, 30]);
    }

    #[test]
    fn exactly_the_minimum_is_accepted() {
        let teams = balance(&pool(&[100, 90, 80, 70]), DEFAULT_MIN_PLAYERS).unwrap();
        assert_eq!(skills(&teams.team_a), [100, 70]);
        assert_eq!(skills(&teams.team_b), [90, 80]);
    }

    #[test]
    fn below_the_minimum_is_rejected() {
        let err = balance(&pool(&[50, 60, 70]), DEFAULT_MIN_PLAYERS).unwrap_err();
        assert_eq!(
            err,
            BalanceError::InsufficientPlayers {
                actual: 3,
                required: 4
            }
        );
    }

    #[test]
    fn empty_pool_is_rejected_even_without_minimum() {
        let err = balance::<Candidate>(&[], 0).unwrap_err();
        assert_eq!(
            err,
            BalanceError::InsufficientPlayers {
                actual: 0,
                required: 1
            }
        );
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let mut players = pool(&[50, 60, 70, 80]);
        players[3].id = players[0].id;
        let err = balance(&players, 4).unwrap_err();
        assert_eq!(err, BalanceError::DuplicatePlayer { id: players[0].id });
    }

    #[test]
    fn every_player_lands_in_exactly_one_team() {
        let players = pool(&[12, 99, 47, 47, 63, 5, 81, 30, 30, 71, 56]);
        let teams = balance(&players, 4).unwrap();

        assert_eq!(teams.team_a.len() + teams.team_b.len(), players.len());
        let a = teams.team_a.iter().map(|p| p.id).collect::<HashSet<_>>();
        let b = teams.team_b.iter().map(|p| p.id).collect::<HashSet<_>>();
        assert!(a.is_disjoint(&b));
        let all = players.iter().map(|p| p.id).collect::<HashSet<_>>();
        assert_eq!(&a | &b, all);
    }

    #[test]
    fn ties_keep_caller_order() {
        let players = pool(&[50, 50, 50, 50, 50]);
        let teams = balance(&players, 4).unwrap();

        assert_eq!(teams.team_a, [players[0].clone(), players[3].clone(), players[4].clone()]);
        assert_eq!(teams.team_b, [players[1].clone(), players[2].clone()]);
    }

    #[test]
    fn same_input_gives_same_teams() {
        let players = pool(&[70, 20, 70, 90, 40, 40, 10]);
        assert_eq!(balance(&players, 4), balance(&players, 4));
    }

    #[test]
    fn input_order_does_not_change_composition() {
        let players = pool(&[35, 88, 61, 14, 73, 49]);
        let mut reversed = players.clone();
        reversed.reverse();
        let mut rotated = players.clone();
        rotated.rotate_left(2);

        let expected = balance(&players, 4).unwrap();
        assert_eq!(balance(&reversed, 4).unwrap(), expected);
        assert_eq!(balance(&rotated, 4).unwrap(), expected);
    }

    #[test]
    fn mean_skill_handles_empty_teams() {
        assert_eq!(mean_skill::<Candidate>(&[]), 0.0);
        assert_eq!(mean_skill(&pool(&[90, 60, 50, 20])), 55.0);
    }
}
