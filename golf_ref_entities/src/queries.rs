use sea_orm::{prelude::*, JoinType, PaginatorTrait, QueryFilter, QuerySelect, Select};

use crate::domain::tournament::{Tournament, TournamentLoadError};
use crate::policy::eligibility::AssignmentContext;
use crate::policy::visibility::{TournamentScope, UserScope};
use crate::schema;

pub async fn query_visible_tournaments<C>(db: &C, scope: &TournamentScope) -> Result<Vec<Tournament>, TournamentLoadError> where C: ConnectionTrait {
    let rows = schema::tournament::Entity::find()
        .find_also_related(schema::tournament_type::Entity)
        .filter(scope.to_condition())
        .all(db).await?;

    rows.into_iter().map(|(tournament, tournament_type)| {
        let tournament_type = tournament_type.ok_or(TournamentLoadError::MissingTournamentType)?;
        Ok(Tournament::from_rows(tournament, tournament_type))
    }).collect()
}

/// Assignments filtered by the owning tournament's visibility. The scope
/// condition references the tournament and its type, so both joins are
/// part of the select.
pub fn select_assignments_via_tournament(scope: &TournamentScope) -> Select<schema::assignment::Entity> {
    schema::assignment::Entity::find()
        .join(JoinType::InnerJoin, schema::assignment::Relation::Tournament.def())
        .join(JoinType::InnerJoin, schema::tournament::Relation::TournamentType.def())
        .filter(scope.to_condition())
}

pub fn select_availabilities_via_tournament(scope: &TournamentScope) -> Select<schema::availability::Entity> {
    schema::availability::Entity::find()
        .join(JoinType::InnerJoin, schema::availability::Relation::Tournament.def())
        .join(JoinType::InnerJoin, schema::tournament::Relation::TournamentType.def())
        .filter(scope.to_condition())
}

/// Optimistic pre-check data for the eligibility policy. The count and the
/// duplicate probe are re-run inside the write transaction, the unique
/// index remains the final authority.
pub async fn load_assignment_context<C>(db: &C, tournament: Tournament, candidate_id: Uuid) -> Result<AssignmentContext, DbErr> where C: ConnectionTrait {
    let assignment_count = schema::assignment::Entity::find()
        .filter(schema::assignment::Column::TournamentId.eq(tournament.uuid))
        .count(db).await?;

    let candidate_already_assigned = schema::assignment::Entity::find()
        .filter(
            schema::assignment::Column::TournamentId.eq(tournament.uuid)
                .and(schema::assignment::Column::UserId.eq(candidate_id))
        )
        .one(db).await?
        .is_some();

    Ok(AssignmentContext {
        tournament,
        assignment_count,
        candidate_already_assigned,
    })
}

/// Referee roster for an actor. `None` means the actor has no roster view
/// at all, which callers must answer with an access error rather than an
/// empty list.
pub async fn query_visible_referees<C>(db: &C, scope: &UserScope) -> Result<Option<Vec<schema::user::Model>>, DbErr> where C: ConnectionTrait {
    let condition = match scope.to_condition() {
        Some(condition) => condition,
        None => return Ok(None),
    };

    let referees = schema::user::Entity::find()
        .filter(schema::user::Column::UserType.eq(crate::schema::user::UserType::Referee))
        .filter(condition)
        .all(db).await?;

    Ok(Some(referees))
}
