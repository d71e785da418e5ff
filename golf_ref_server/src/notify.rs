use std::{collections::HashMap, convert::Infallible, pin::Pin, time::Duration};

use golf_ref_entities::domain::availability::RefereeAvailability;
use golf_ref_entities::domain::tournament::Tournament;
use golf_ref_entities::policy::notification::MailboxRoute;
use golf_ref_entities::schema;
use golf_ref_entities::schema::user::UserType;
use sea_orm::{prelude::*, ConnectionTrait, DatabaseConnection};
use std::sync::Arc;
use tokio::sync::{broadcast::Sender, RwLock};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use axum::{extract::{Path, State}, response::{sse::Event, Sse}, Router, routing::get};
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::auth::ExtractActor;
use crate::response::{handle_error, APIError};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MailboxEvent {
    AvailabilityDeclared {
        tournament_id: Uuid,
        tournament_name: String,
        referee_id: Uuid,
        referee_name: String,
        submitted_at: chrono::NaiveDateTime,
    },
    AvailabilityWithdrawn {
        tournament_id: Uuid,
        tournament_name: String,
        referee_id: Uuid,
        referee_name: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationEntry {
    pub tournament_id: Uuid,
    pub tournament_name: String,
    pub is_national: bool,
    pub submitted_at: chrono::NaiveDateTime,
}

/// The referee's own confirmation. It always carries the referee's full
/// availability list, no matter which single submission triggered it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefereeConfirmation {
    pub referee_id: Uuid,
    pub tournaments: Vec<ConfirmationEntry>,
}

pub struct MailboxNotificationManager {
    national_mailbox: String,
    mailbox_senders: HashMap<String, Sender<MailboxEvent>>,
    referee_senders: HashMap<Uuid, Sender<RefereeConfirmation>>,
}

impl MailboxNotificationManager {
    pub fn new(national_mailbox: String) -> Self {
        Self {
            national_mailbox,
            mailbox_senders: HashMap::new(),
            referee_senders: HashMap::new(),
        }
    }

    pub fn national_mailbox(&self) -> &str {
        &self.national_mailbox
    }

    async fn resolve_mailbox<C>(&self, db: &C, route: MailboxRoute) -> Result<String, anyhow::Error> where C: ConnectionTrait {
        match route {
            MailboxRoute::National => Ok(self.national_mailbox.clone()),
            MailboxRoute::Zone(zone_id) => {
                let zone = schema::zone::Entity::find_by_id(zone_id).one(db).await?
                    .ok_or_else(|| anyhow::anyhow!("Tournament references a missing zone"))?;
                Ok(zone.mailbox)
            }
        }
    }

    /// Routes one event to the single mailbox responsible for the
    /// tournament. Each tournament is routed on its own, there is no
    /// batching across a referee's submissions.
    pub async fn notify_mailbox<C>(&self, db: &C, tournament: &Tournament, event: MailboxEvent) -> Result<String, anyhow::Error> where C: ConnectionTrait {
        let route = MailboxRoute::for_tournament(tournament);
        let mailbox = self.resolve_mailbox(db, route).await?;

        info!("Routing notification for tournament {} to {}", tournament.uuid, mailbox);
        if let Some(sender) = self.mailbox_senders.get(&mailbox) {
            //Dropped receivers are not an error
            let _ = sender.send(event);
        }

        Ok(mailbox)
    }

    pub async fn send_referee_confirmation<C>(&self, db: &C, referee_id: Uuid) -> Result<(), anyhow::Error> where C: ConnectionTrait {
        let availabilities = RefereeAvailability::get_all_for_referee(db, referee_id).await?;

        let confirmation = RefereeConfirmation {
            referee_id,
            tournaments: availabilities.into_iter().map(|availability| ConfirmationEntry {
                tournament_id: availability.tournament.uuid,
                tournament_name: availability.tournament.name,
                is_national: availability.tournament.is_national,
                submitted_at: availability.submitted_at,
            }).collect(),
        };

        if let Some(sender) = self.referee_senders.get(&referee_id) {
            let _ = sender.send(confirmation);
        }

        Ok(())
    }

    pub fn sender_for_mailbox(&mut self, mailbox: &str) -> Sender<MailboxEvent> {
        self.mailbox_senders
            .entry(mailbox.to_string())
            .or_insert_with(|| Sender::new(100))
            .clone()
    }

    pub fn sender_for_referee(&mut self, referee_id: Uuid) -> Sender<RefereeConfirmation> {
        self.referee_senders
            .entry(referee_id)
            .or_insert_with(|| Sender::new(100))
            .clone()
    }

    pub fn subscribe_to_mailbox(&mut self, mailbox: &str) -> Pin<Box<dyn Stream<Item = Result<Event, Infallible>> + Send>> {
        let receiver = self.sender_for_mailbox(mailbox).subscribe();

        let stream = BroadcastStream::new(receiver);
        let stream = stream.filter_map(|e| e.ok());
        let stream = stream.map(|e| Ok(Event::default().event("mailbox").data(serde_json::to_string(&e).unwrap())));

        Box::pin(stream)
    }

    pub fn subscribe_to_referee(&mut self, referee_id: Uuid) -> Pin<Box<dyn Stream<Item = Result<Event, Infallible>> + Send>> {
        let receiver = self.sender_for_referee(referee_id).subscribe();

        let stream = BroadcastStream::new(receiver);
        let stream = stream.filter_map(|e| e.ok());
        let stream = stream.map(|e| Ok(Event::default().event("confirmation").data(serde_json::to_string(&e).unwrap())));

        Box::pin(stream)
    }
}

pub async fn get_mailbox_events(
    State(db): State<DatabaseConnection>,
    State(notifications): State<Arc<RwLock<MailboxNotificationManager>>>,
    ExtractActor(actor): ExtractActor,
    Path(mailbox): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, APIError> {
    let mut notifications = notifications.write().await;

    let authorized = match actor.user_type {
        UserType::SuperAdmin => true,
        UserType::NationalAdmin => mailbox == notifications.national_mailbox(),
        UserType::ZoneAdmin => {
            match actor.zone_id {
                Some(zone_id) => {
                    let zone = schema::zone::Entity::find_by_id(zone_id).one(&db).await.map_err(handle_error)?;
                    zone.map(|z| z.mailbox == mailbox).unwrap_or(false)
                }
                None => false,
            }
        }
        UserType::Referee => false,
    };

    if !authorized {
        return Err((axum::http::StatusCode::FORBIDDEN, "You are not authorized for this mailbox").into());
    }

    let stream = notifications.subscribe_to_mailbox(&mailbox);

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive-text"),
    ))
}

pub async fn get_referee_events(
    State(notifications): State<Arc<RwLock<MailboxNotificationManager>>>,
    ExtractActor(actor): ExtractActor,
    Path(user_id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, APIError> {
    if actor.uuid != user_id {
        return Err((axum::http::StatusCode::FORBIDDEN, "Referees can only follow their own confirmations").into());
    }

    let mut notifications = notifications.write().await;
    let stream = notifications.subscribe_to_referee(user_id);

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive-text"),
    ))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/notifications/mailbox/:mailbox", get(get_mailbox_events))
        .route("/notifications/referee/:user_id", get(get_referee_events))
}
