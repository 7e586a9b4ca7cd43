//! Calendar event handlers: create and list only.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::domain::event::EventDraft;
use crate::domain::Error;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::schemas::EventResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Event creation request body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct EventCreateRequest {
    /// Short title.
    pub title: String,
    /// Date label, `YYYY-MM-DD`.
    pub date: String,
    /// Optional time label, `HH:MM`.
    pub time: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Display colour; a portal default applies when absent.
    pub color: Option<String>,
}

impl EventCreateRequest {
    /// Validate into a draft.
    pub fn into_draft(self) -> Result<EventDraft, Error> {
        let mut draft = EventDraft::new(self.title, self.date)?;
        draft.time = self.time;
        draft.description = self.description;
        if let Some(color) = self.color {
            draft.color = color;
        }
        Ok(draft)
    }
}

/// The caller's events, date ascending.
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "The caller's events", body = [EventResponse]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["events"],
    operation_id = "listEvents"
)]
#[get("/events")]
pub async fn list_events(
    user: CurrentUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EventResponse>>> {
    let events = state.events.list(&user.into_inner().id).await?;
    Ok(web::Json(events.into_iter().map(EventResponse::from).collect()))
}

/// Create an event owned by the caller.
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = EventCreateRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 422, description = "Blank title or malformed date", body = Error)
    ),
    tags = ["events"],
    operation_id = "createEvent"
)]
#[post("/events")]
pub async fn create_event(
    user: CurrentUser,
    state: web::Data<HttpState>,
    payload: web::Json<EventCreateRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let event = state.events.create(&user.into_inner(), draft).await?;
    Ok(HttpResponse::Created().json(EventResponse::from(event)))
}
