use thiserror::Error;
use serde::{Serialize, Deserialize};

use crate::domain::actor::Actor;
use crate::domain::tournament::Tournament;
use crate::schema::user::UserType;

/// Why a proposed assignment was refused. Checks run in a fixed order and
/// the first failing one wins, so the codes are mutually exclusive per call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentRefusal {
    #[error("actor may not assign referees to this tournament")]
    Forbidden,
    #[error("tournament is not accepting assignments")]
    TournamentNotAcceptingAssignments,
    #[error("tournament already has the maximum number of referees")]
    CapacityExceeded,
    #[error("candidate is not a referee")]
    InvalidReferee,
    #[error("candidate referee is not active")]
    InactiveReferee,
    #[error("candidate is already assigned to this tournament")]
    AlreadyAssigned,
    #[error("candidate referee level is below the required level")]
    LevelTooLow,
    #[error("candidate referee belongs to a different zone")]
    ZoneMismatch,
    #[error("unknown assignment role")]
    InvalidRole,
}

impl AssignmentRefusal {
    pub fn code(&self) -> &'static str {
        match self {
            AssignmentRefusal::Forbidden => "forbidden",
            AssignmentRefusal::TournamentNotAcceptingAssignments => "tournament_not_accepting_assignments",
            AssignmentRefusal::CapacityExceeded => "capacity_exceeded",
            AssignmentRefusal::InvalidReferee => "invalid_referee",
            AssignmentRefusal::InactiveReferee => "inactive_referee",
            AssignmentRefusal::AlreadyAssigned => "already_assigned",
            AssignmentRefusal::LevelTooLow => "level_too_low",
            AssignmentRefusal::ZoneMismatch => "zone_mismatch",
            AssignmentRefusal::InvalidRole => "invalid_role",
        }
    }
}

/// Everything the eligibility check needs, loaded up front. The check
/// itself has no side effects and hits no storage, so repeated calls with
/// the same context give the same verdict. The duplicate and capacity
/// values are an optimistic pre-check only, the unique index and the
/// transactional re-count at insert time remain the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentContext {
    pub tournament: Tournament,
    pub assignment_count: u64,
    pub candidate_already_assigned: bool,
}

pub fn check_assignment(
    actor: &Actor,
    ctx: &AssignmentContext,
    candidate: &Actor,
) -> Result<(), AssignmentRefusal> {
    match actor.user_type {
        UserType::SuperAdmin | UserType::NationalAdmin => {}
        UserType::ZoneAdmin => {
            if actor.zone_id != ctx.tournament.zone_id {
                return Err(AssignmentRefusal::Forbidden);
            }
        }
        UserType::Referee => return Err(AssignmentRefusal::Forbidden),
    }

    if !ctx.tournament.status.accepts_assignments() {
        return Err(AssignmentRefusal::TournamentNotAcceptingAssignments);
    }

    if ctx.assignment_count >= ctx.tournament.max_referees as u64 {
        return Err(AssignmentRefusal::CapacityExceeded);
    }

    if candidate.user_type != UserType::Referee {
        return Err(AssignmentRefusal::InvalidReferee);
    }

    if !candidate.is_active {
        return Err(AssignmentRefusal::InactiveReferee);
    }

    if ctx.candidate_already_assigned {
        return Err(AssignmentRefusal::AlreadyAssigned);
    }

    // A referee without a level can never satisfy the minimum.
    let level_ok = candidate
        .level
        .map(|level| level.ordinal() >= ctx.tournament.required_level.ordinal())
        .unwrap_or(false);
    if !level_ok {
        return Err(AssignmentRefusal::LevelTooLow);
    }

    if !ctx.tournament.is_national && candidate.zone_id != ctx.tournament.zone_id {
        return Err(AssignmentRefusal::ZoneMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::prelude::Uuid;
    use crate::schema::tournament::TournamentStatus;
    use crate::schema::user::RefereeLevel;

    fn zone_admin(zone: u128) -> Actor {
        Actor {
            uuid: Uuid::from_u128(910),
            name: "Zone Admin".into(),
            user_type: UserType::ZoneAdmin,
            zone_id: Some(Uuid::from_u128(zone)),
            level: None,
            is_active: true,
        }
    }

    fn referee(zone: u128, level: RefereeLevel) -> Actor {
        Actor {
            uuid: Uuid::from_u128(1000),
            name: "Referee".into(),
            user_type: UserType::Referee,
            zone_id: Some(Uuid::from_u128(zone)),
            level: Some(level),
            is_active: true,
        }
    }

    fn open_tournament(zone: u128, required_level: RefereeLevel, max_referees: i32) -> Tournament {
        Tournament {
            uuid: Uuid::from_u128(300),
            name: "Test".into(),
            club_id: Uuid::from_u128(100),
            zone_id: Some(Uuid::from_u128(zone)),
            tournament_type_id: Uuid::from_u128(200),
            status: TournamentStatus::Open,
            is_national: false,
            required_level,
            min_referees: 1,
            max_referees,
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(),
            availability_deadline: None,
        }
    }

    fn ctx(tournament: Tournament) -> AssignmentContext {
        AssignmentContext {
            tournament,
            assignment_count: 0,
            candidate_already_assigned: false,
        }
    }

    #[test]
    fn test_valid_assignment_passes() {
        let verdict = check_assignment(
            &zone_admin(10),
            &ctx(open_tournament(10, RefereeLevel::Regionale, 2)),
            &referee(10, RefereeLevel::Regionale),
        );
        assert_eq!(verdict, Ok(()));
    }

    #[test]
    fn test_foreign_zone_admin_is_forbidden() {
        let verdict = check_assignment(
            &zone_admin(11),
            &ctx(open_tournament(10, RefereeLevel::Aspirante, 2)),
            &referee(10, RefereeLevel::Regionale),
        );
        assert_eq!(verdict, Err(AssignmentRefusal::Forbidden));
    }

    #[test]
    fn test_referee_actor_is_forbidden() {
        let verdict = check_assignment(
            &referee(10, RefereeLevel::Internazionale),
            &ctx(open_tournament(10, RefereeLevel::Aspirante, 2)),
            &referee(10, RefereeLevel::Regionale),
        );
        assert_eq!(verdict, Err(AssignmentRefusal::Forbidden));
    }

    #[test]
    fn test_draft_tournament_refuses_assignments() {
        let mut tournament = open_tournament(10, RefereeLevel::Aspirante, 2);
        tournament.status = TournamentStatus::Draft;
        let verdict = check_assignment(&zone_admin(10), &ctx(tournament), &referee(10, RefereeLevel::Regionale));
        assert_eq!(verdict, Err(AssignmentRefusal::TournamentNotAcceptingAssignments));
    }

    #[test]
    fn test_closed_tournament_still_accepts_assignments() {
        let mut tournament = open_tournament(10, RefereeLevel::Aspirante, 2);
        tournament.status = TournamentStatus::Closed;
        let verdict = check_assignment(&zone_admin(10), &ctx(tournament), &referee(10, RefereeLevel::Regionale));
        assert_eq!(verdict, Ok(()));
    }

    #[test]
    fn test_capacity_is_refused_at_the_bound() {
        let mut context = ctx(open_tournament(10, RefereeLevel::Aspirante, 2));
        context.assignment_count = 2;
        let verdict = check_assignment(&zone_admin(10), &context, &referee(10, RefereeLevel::Regionale));
        assert_eq!(verdict, Err(AssignmentRefusal::CapacityExceeded));
    }

    #[test]
    fn test_level_too_low() {
        let verdict = check_assignment(
            &zone_admin(10),
            &ctx(open_tournament(10, RefereeLevel::Nazionale, 2)),
            &referee(10, RefereeLevel::Regionale),
        );
        assert_eq!(verdict, Err(AssignmentRefusal::LevelTooLow));
    }

    #[test]
    fn test_zone_mismatch_for_zonal_tournament() {
        let verdict = check_assignment(
            &zone_admin(10),
            &ctx(open_tournament(10, RefereeLevel::Aspirante, 2)),
            &referee(11, RefereeLevel::Internazionale),
        );
        assert_eq!(verdict, Err(AssignmentRefusal::ZoneMismatch));
    }

    #[test]
    fn test_national_tournament_skips_zone_check() {
        let mut tournament = open_tournament(10, RefereeLevel::Nazionale, 4);
        tournament.is_national = true;
        let verdict = check_assignment(
            &zone_admin(10),
            &ctx(tournament),
            &referee(11, RefereeLevel::Nazionale),
        );
        assert_eq!(verdict, Ok(()));
    }

    #[test]
    fn test_duplicate_assignment_is_refused() {
        let mut context = ctx(open_tournament(10, RefereeLevel::Aspirante, 4));
        context.candidate_already_assigned = true;
        let verdict = check_assignment(&zone_admin(10), &context, &referee(10, RefereeLevel::Regionale));
        assert_eq!(verdict, Err(AssignmentRefusal::AlreadyAssigned));
    }

    #[test]
    fn test_inactive_referee_is_refused() {
        let mut candidate = referee(10, RefereeLevel::Regionale);
        candidate.is_active = false;
        let verdict = check_assignment(&zone_admin(10), &ctx(open_tournament(10, RefereeLevel::Aspirante, 2)), &candidate);
        assert_eq!(verdict, Err(AssignmentRefusal::InactiveReferee));
    }

    #[test]
    fn test_admin_candidate_is_not_a_referee() {
        let verdict = check_assignment(
            &zone_admin(10),
            &ctx(open_tournament(10, RefereeLevel::Aspirante, 2)),
            &zone_admin(10),
        );
        assert_eq!(verdict, Err(AssignmentRefusal::InvalidReferee));
    }

    #[test]
    fn test_capacity_wins_over_duplicate() {
        // Check order is fixed, the earlier refusal is reported.
        let mut context = ctx(open_tournament(10, RefereeLevel::Aspirante, 1));
        context.assignment_count = 1;
        context.candidate_already_assigned = true;
        let verdict = check_assignment(&zone_admin(10), &context, &referee(10, RefereeLevel::Regionale));
        assert_eq!(verdict, Err(AssignmentRefusal::CapacityExceeded));
    }

    #[test]
    fn test_verdict_is_stable_across_calls() {
        let context = ctx(open_tournament(10, RefereeLevel::Nazionale, 2));
        let candidate = referee(10, RefereeLevel::Regionale);
        let first = check_assignment(&zone_admin(10), &context, &candidate);
        let second = check_assignment(&zone_admin(10), &context, &candidate);
        assert_eq!(first, second);
    }
}
