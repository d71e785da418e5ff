use sea_orm::Condition;
use sea_orm::prelude::*;

use crate::domain::actor::Actor;
use crate::domain::tournament::Tournament;
use crate::schema;
use crate::schema::user::UserType;

/// What part of the tournament universe an actor may see. The scope is
/// computed once per actor and backs both the collection filter
/// (`to_condition`) and the single-record check (`allows`), so list and
/// show authorization can not drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentScope {
    All,
    NationalOnly,
    Zone(Uuid),
    ZoneOrNational(Uuid),
}

impl TournamentScope {
    pub fn for_actor(actor: &Actor) -> TournamentScope {
        match (actor.user_type, actor.zone_id) {
            (UserType::SuperAdmin, _) => TournamentScope::All,
            (UserType::NationalAdmin, _) => TournamentScope::NationalOnly,
            (UserType::ZoneAdmin, Some(zone)) => TournamentScope::Zone(zone),
            (UserType::Referee, Some(zone)) => {
                if actor.level.map(|level| level.is_national_rank()).unwrap_or(false) {
                    TournamentScope::ZoneOrNational(zone)
                } else {
                    TournamentScope::Zone(zone)
                }
            }
            // A zonal actor without a zone leaves the zone filter inactive.
            // User creation rejects such rows, this only covers legacy data.
            (UserType::ZoneAdmin, None) | (UserType::Referee, None) => TournamentScope::All,
        }
    }

    /// Single-record authorization. Callers answering direct reads must
    /// translate `false` into a not-found error so filtered records are
    /// indistinguishable from absent ones.
    pub fn allows(&self, tournament: &Tournament) -> bool {
        match self {
            TournamentScope::All => true,
            TournamentScope::NationalOnly => tournament.is_national,
            TournamentScope::Zone(zone) => tournament.zone_id == Some(*zone),
            TournamentScope::ZoneOrNational(zone) => {
                tournament.zone_id == Some(*zone) || tournament.is_national
            }
        }
    }

    /// Filter for selects over `tournament` joined with `tournament_type`.
    /// Entities owned by a tournament (assignments, availabilities) are
    /// filtered with the same condition behind a join through the owning
    /// tournament.
    pub fn to_condition(&self) -> Condition {
        match self {
            TournamentScope::All => Condition::all(),
            TournamentScope::NationalOnly => Condition::all()
                .add(schema::tournament_type::Column::IsNational.eq(true)),
            TournamentScope::Zone(zone) => Condition::all()
                .add(schema::tournament::Column::ZoneId.eq(*zone)),
            TournamentScope::ZoneOrNational(zone) => Condition::any()
                .add(schema::tournament::Column::ZoneId.eq(*zone))
                .add(schema::tournament_type::Column::IsNational.eq(true)),
        }
    }
}

/// Referee roster visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserScope {
    All,
    Zone(Uuid),
    /// Referees have no roster view. `to_condition` yields nothing for
    /// this variant, callers must deny the request outright.
    NotApplicable,
}

impl UserScope {
    pub fn for_actor(actor: &Actor) -> UserScope {
        match (actor.user_type, actor.zone_id) {
            (UserType::SuperAdmin, _) | (UserType::NationalAdmin, _) => UserScope::All,
            (UserType::ZoneAdmin, Some(zone)) => UserScope::Zone(zone),
            (UserType::ZoneAdmin, None) => UserScope::All,
            (UserType::Referee, _) => UserScope::NotApplicable,
        }
    }

    pub fn allows(&self, user: &schema::user::Model) -> bool {
        match self {
            UserScope::All => true,
            UserScope::Zone(zone) => user.zone_id == Some(*zone),
            UserScope::NotApplicable => false,
        }
    }

    pub fn to_condition(&self) -> Option<Condition> {
        match self {
            UserScope::All => Some(Condition::all()),
            UserScope::Zone(zone) => Some(Condition::all().add(schema::user::Column::ZoneId.eq(*zone))),
            UserScope::NotApplicable => None,
        }
    }
}
