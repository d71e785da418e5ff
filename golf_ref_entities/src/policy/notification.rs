use sea_orm::prelude::Uuid;
use serde::{Serialize, Deserialize};

use crate::domain::tournament::Tournament;

/// Which administrative mailbox an availability notification goes to.
/// Exactly one route per tournament. A referee submitting for a zonal and
/// a national tournament at the same time produces two independently
/// routed notifications, never a combined one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailboxRoute {
    Zone(Uuid),
    National,
}

impl MailboxRoute {
    pub fn for_tournament(tournament: &Tournament) -> MailboxRoute {
        if tournament.is_national {
            return MailboxRoute::National;
        }
        match tournament.zone_id {
            Some(zone) => MailboxRoute::Zone(zone),
            // A zonal tournament without a zone is a data violation,
            // escalate to the national desk rather than dropping it.
            None => MailboxRoute::National,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tournament::TournamentStatus;
    use crate::schema::user::RefereeLevel;

    fn tournament(zone: Option<u128>, is_national: bool) -> Tournament {
        Tournament {
            uuid: Uuid::from_u128(300),
            name: "Test".into(),
            club_id: Uuid::from_u128(100),
            zone_id: zone.map(Uuid::from_u128),
            tournament_type_id: Uuid::from_u128(200),
            status: TournamentStatus::Open,
            is_national,
            required_level: RefereeLevel::Aspirante,
            min_referees: 1,
            max_referees: 4,
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(),
            availability_deadline: None,
        }
    }

    #[test]
    fn test_zonal_tournament_routes_to_zone_mailbox() {
        let route = MailboxRoute::for_tournament(&tournament(Some(10), false));
        assert_eq!(route, MailboxRoute::Zone(Uuid::from_u128(10)));
    }

    #[test]
    fn test_national_tournament_routes_to_national_mailbox() {
        let route = MailboxRoute::for_tournament(&tournament(None, true));
        assert_eq!(route, MailboxRoute::National);
    }

    #[test]
    fn test_national_tournament_with_zone_still_routes_nationally() {
        // The nationality flag wins over an incidentally set zone.
        let route = MailboxRoute::for_tournament(&tournament(Some(10), true));
        assert_eq!(route, MailboxRoute::National);
    }

    #[test]
    fn test_simultaneous_submissions_route_independently() {
        let zonal = tournament(Some(3), false);
        let national = tournament(Some(7), true);
        assert_eq!(MailboxRoute::for_tournament(&zonal), MailboxRoute::Zone(Uuid::from_u128(3)));
        assert_eq!(MailboxRoute::for_tournament(&national), MailboxRoute::National);
    }
}
