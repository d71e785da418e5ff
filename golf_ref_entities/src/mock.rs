use sea_orm::{prelude::*, ActiveValue, ConnectionTrait};
use itertools::Itertools;

use faker_rand::en_us::names::FullName;

use crate::schema;
use crate::schema::assignment::{AssignmentRole, AssignmentStatus};
use crate::schema::tournament::TournamentStatus;
use crate::schema::user::{RefereeLevel, UserType};

#[derive(Debug)]
pub struct MockOption {
    pub deterministic_uuids: bool,
    pub use_random_names: bool,
}

impl Default for MockOption {
    fn default() -> Self {
        Self {
            deterministic_uuids: false,
            use_random_names: false,
        }
    }
}

fn mock_uuid(options: &MockOption, value: u128) -> Uuid {
    if options.deterministic_uuids {
        Uuid::from_u128(value)
    } else {
        Uuid::new_v4()
    }
}

/// Seeds a small federation environment.
///
/// Deterministic id blocks:
/// Zones: 10, 11
/// Clubs: 100..=103
/// Tournament types: 200 (zonal), 201 (zonal championship), 202 (national)
/// Tournaments: 300 (open, zone 10), 301 (open, zone 11),
///              302 (open, national), 303 (draft, zone 10),
///              304 (open, zone 10, deadline passed)
/// Admins: 900 (super), 901 (national), 910/911 (zones 10/11)
/// Referees: 1000..=1004
pub async fn make_mock_environment<C>(db: &C, options: MockOption) -> Result<(), DbErr> where C: ConnectionTrait {
    let zone_ids = (0..2).map(|i| mock_uuid(&options, 10 + i)).collect_vec();

    schema::zone::Entity::insert_many(
        zone_ids.iter().enumerate().map(|(i, uuid)| schema::zone::ActiveModel {
            uuid: ActiveValue::Set(*uuid),
            name: ActiveValue::Set(format!("Sezione Zonale Regole {}", i + 1)),
            code: ActiveValue::Set(format!("SZR{}", i + 1)),
            mailbox: ActiveValue::Set(format!("szr{}@federgolf.example", i + 1)),
        }).collect_vec()
    ).exec(db).await?;

    let club_ids = (0..4).map(|i| mock_uuid(&options, 100 + i)).collect_vec();
    schema::club::Entity::insert_many(
        club_ids.iter().enumerate().map(|(i, uuid)| schema::club::ActiveModel {
            uuid: ActiveValue::Set(*uuid),
            name: ActiveValue::Set(format!("Golf Club {}", i + 1)),
            zone_id: ActiveValue::Set(zone_ids[i / 2]),
        }).collect_vec()
    ).exec(db).await?;

    let zonal_type = mock_uuid(&options, 200);
    let championship_type = mock_uuid(&options, 201);
    let national_type = mock_uuid(&options, 202);
    schema::tournament_type::Entity::insert_many(vec![
        schema::tournament_type::ActiveModel {
            uuid: ActiveValue::Set(zonal_type),
            name: ActiveValue::Set("Gara zonale 18 buche".into()),
            is_national: ActiveValue::Set(false),
            required_level: ActiveValue::Set(RefereeLevel::Aspirante),
            min_referees: ActiveValue::Set(1),
            max_referees: ActiveValue::Set(2),
        },
        schema::tournament_type::ActiveModel {
            uuid: ActiveValue::Set(championship_type),
            name: ActiveValue::Set("Campionato zonale".into()),
            is_national: ActiveValue::Set(false),
            required_level: ActiveValue::Set(RefereeLevel::Regionale),
            min_referees: ActiveValue::Set(1),
            max_referees: ActiveValue::Set(3),
        },
        schema::tournament_type::ActiveModel {
            uuid: ActiveValue::Set(national_type),
            name: ActiveValue::Set("Open nazionale".into()),
            is_national: ActiveValue::Set(true),
            required_level: ActiveValue::Set(RefereeLevel::Nazionale),
            min_referees: ActiveValue::Set(2),
            max_referees: ActiveValue::Set(4),
        },
    ]).exec(db).await?;

    schema::tournament::Entity::insert_many(vec![
        schema::tournament::ActiveModel {
            uuid: ActiveValue::Set(mock_uuid(&options, 300)),
            name: ActiveValue::Set("Coppa della Sezione".into()),
            club_id: ActiveValue::Set(club_ids[0]),
            zone_id: ActiveValue::Set(Some(zone_ids[0])),
            tournament_type_id: ActiveValue::Set(zonal_type),
            status: ActiveValue::Set(TournamentStatus::Open),
            start_date: ActiveValue::Set(chrono::NaiveDate::from_ymd_opt(2026, 9, 5).unwrap()),
            end_date: ActiveValue::Set(chrono::NaiveDate::from_ymd_opt(2026, 9, 6).unwrap()),
            availability_deadline: ActiveValue::Set(Some(
                chrono::NaiveDate::from_ymd_opt(2030, 12, 31).unwrap().and_hms_opt(23, 59, 0).unwrap()
            )),
        },
        schema::tournament::ActiveModel {
            uuid: ActiveValue::Set(mock_uuid(&options, 301)),
            name: ActiveValue::Set("Trofeo del Golfo".into()),
            club_id: ActiveValue::Set(club_ids[2]),
            zone_id: ActiveValue::Set(Some(zone_ids[1])),
            tournament_type_id: ActiveValue::Set(zonal_type),
            status: ActiveValue::Set(TournamentStatus::Open),
            start_date: ActiveValue::Set(chrono::NaiveDate::from_ymd_opt(2026, 9, 12).unwrap()),
            end_date: ActiveValue::Set(chrono::NaiveDate::from_ymd_opt(2026, 9, 13).unwrap()),
            availability_deadline: ActiveValue::Set(None),
        },
        schema::tournament::ActiveModel {
            uuid: ActiveValue::Set(mock_uuid(&options, 302)),
            name: ActiveValue::Set("Open d'Italia Dilettanti".into()),
            club_id: ActiveValue::Set(club_ids[0]),
            zone_id: ActiveValue::Set(None),
            tournament_type_id: ActiveValue::Set(national_type),
            status: ActiveValue::Set(TournamentStatus::Open),
            start_date: ActiveValue::Set(chrono::NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()),
            end_date: ActiveValue::Set(chrono::NaiveDate::from_ymd_opt(2026, 10, 4).unwrap()),
            availability_deadline: ActiveValue::Set(None),
        },
        schema::tournament::ActiveModel {
            uuid: ActiveValue::Set(mock_uuid(&options, 303)),
            name: ActiveValue::Set("Campionato di Sezione".into()),
            club_id: ActiveValue::Set(club_ids[1]),
            zone_id: ActiveValue::Set(Some(zone_ids[0])),
            tournament_type_id: ActiveValue::Set(championship_type),
            status: ActiveValue::Set(TournamentStatus::Draft),
            start_date: ActiveValue::Set(chrono::NaiveDate::from_ymd_opt(2026, 11, 7).unwrap()),
            end_date: ActiveValue::Set(chrono::NaiveDate::from_ymd_opt(2026, 11, 8).unwrap()),
            availability_deadline: ActiveValue::Set(None),
        },
        schema::tournament::ActiveModel {
            uuid: ActiveValue::Set(mock_uuid(&options, 304)),
            name: ActiveValue::Set("Gara Sociale".into()),
            club_id: ActiveValue::Set(club_ids[1]),
            zone_id: ActiveValue::Set(Some(zone_ids[0])),
            tournament_type_id: ActiveValue::Set(zonal_type),
            status: ActiveValue::Set(TournamentStatus::Open),
            start_date: ActiveValue::Set(chrono::NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()),
            end_date: ActiveValue::Set(chrono::NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()),
            availability_deadline: ActiveValue::Set(Some(
                chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(23, 59, 0).unwrap()
            )),
        },
    ]).exec(db).await?;

    let referee_rows = vec![
        (1000u128, zone_ids[0], RefereeLevel::Aspirante, true),
        (1001, zone_ids[0], RefereeLevel::Regionale, true),
        (1002, zone_ids[0], RefereeLevel::Nazionale, true),
        (1003, zone_ids[1], RefereeLevel::Internazionale, true),
        (1004, zone_ids[1], RefereeLevel::PrimoLivello, false),
    ];

    let mut users = vec![
        mock_user(&options, 900, "Segreteria Federale", UserType::SuperAdmin, None, None, true),
        mock_user(&options, 901, "Commissione Regole", UserType::NationalAdmin, None, None, true),
        mock_user(&options, 910, "Delegato SZR1", UserType::ZoneAdmin, Some(zone_ids[0]), None, true),
        mock_user(&options, 911, "Delegato SZR2", UserType::ZoneAdmin, Some(zone_ids[1]), None, true),
    ];
    users.extend(referee_rows.into_iter().map(|(id, zone, level, is_active)| {
        let name = if options.use_random_names {
            rand::random::<FullName>().to_string()
        } else {
            format!("Arbitro {}", id)
        };
        mock_user(&options, id, &name, UserType::Referee, Some(zone), Some(level), is_active)
    }));

    schema::user::Entity::insert_many(users).exec(db).await?;

    Ok(())
}

fn mock_user(
    options: &MockOption,
    id: u128,
    name: &str,
    user_type: UserType,
    zone_id: Option<Uuid>,
    level: Option<RefereeLevel>,
    is_active: bool,
) -> schema::user::ActiveModel {
    schema::user::ActiveModel {
        uuid: ActiveValue::Set(mock_uuid(options, id)),
        name: ActiveValue::Set(name.to_string()),
        email: ActiveValue::Set(format!("user{}@federgolf.example", id)),
        password_hash: ActiveValue::Set("".into()),
        user_type: ActiveValue::Set(user_type),
        zone_id: ActiveValue::Set(zone_id),
        level: ActiveValue::Set(level),
        is_active: ActiveValue::Set(is_active),
    }
}

/// A committed assignment row for tests that need pre-existing
/// assignments.
pub fn mock_assignment(uuid: u128, user_id: u128, tournament_id: u128, assigned_by: u128) -> schema::assignment::ActiveModel {
    schema::assignment::ActiveModel {
        uuid: ActiveValue::Set(Uuid::from_u128(uuid)),
        user_id: ActiveValue::Set(Uuid::from_u128(user_id)),
        tournament_id: ActiveValue::Set(Uuid::from_u128(tournament_id)),
        role: ActiveValue::Set(AssignmentRole::Arbitro),
        assigned_by: ActiveValue::Set(Uuid::from_u128(assigned_by)),
        assigned_at: ActiveValue::Set(chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap().and_hms_opt(9, 0, 0).unwrap()),
        status: ActiveValue::Set(AssignmentStatus::Pending),
        is_confirmed: ActiveValue::Set(false),
    }
}
