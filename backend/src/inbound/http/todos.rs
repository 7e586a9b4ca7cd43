//! Todo handlers for the authenticated caller.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::todo::{TodoDraft, TodoPatch};
use crate::domain::Error;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::schemas::{explicit_option, TodoResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Todo creation request body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TodoCreateRequest {
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Optional date label, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Optional start time, `HH:MM`.
    pub start_time: Option<String>,
    /// Optional end time, `HH:MM`.
    pub end_time: Option<String>,
    /// Opaque tag text.
    pub tags: Option<String>,
}

impl TodoCreateRequest {
    /// Validate into a draft.
    pub fn into_draft(self) -> Result<TodoDraft, Error> {
        let mut draft = TodoDraft::new(self.title)?;
        draft.description = self.description;
        draft.date = self.date;
        draft.start_time = self.start_time;
        draft.end_time = self.end_time;
        draft.tags = self.tags;
        Ok(draft)
    }
}

/// Field-presence todo patch body.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct TodoUpdateRequest {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement or cleared description.
    #[serde(default, deserialize_with = "explicit_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    /// Replacement or cleared date.
    #[serde(default, deserialize_with = "explicit_option")]
    #[schema(value_type = Option<String>)]
    pub date: Option<Option<String>>,
    /// Replacement or cleared start time.
    #[serde(default, deserialize_with = "explicit_option")]
    #[schema(value_type = Option<String>)]
    pub start_time: Option<Option<String>>,
    /// Replacement or cleared end time.
    #[serde(default, deserialize_with = "explicit_option")]
    #[schema(value_type = Option<String>)]
    pub end_time: Option<Option<String>>,
    /// Replacement or cleared tag text.
    #[serde(default, deserialize_with = "explicit_option")]
    #[schema(value_type = Option<String>)]
    pub tags: Option<Option<String>>,
    /// Replacement done flag.
    pub done: Option<bool>,
}

impl From<TodoUpdateRequest> for TodoPatch {
    fn from(value: TodoUpdateRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
            date: value.date,
            start_time: value.start_time,
            end_time: value.end_time,
            tags: value.tags,
            done: value.done,
        }
    }
}

/// The caller's todos in creation order.
#[utoipa::path(
    get,
    path = "/api/todos",
    responses(
        (status = 200, description = "The caller's todos", body = [TodoResponse]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["todos"],
    operation_id = "listTodos"
)]
#[get("/todos")]
pub async fn list_todos(
    user: CurrentUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TodoResponse>>> {
    let todos = state.todos.list(&user.into_inner().id).await?;
    Ok(web::Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Create a todo owned by the caller.
#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = TodoCreateRequest,
    responses(
        (status = 201, description = "Todo created", body = TodoResponse),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 422, description = "Blank title", body = Error)
    ),
    tags = ["todos"],
    operation_id = "createTodo"
)]
#[post("/todos")]
pub async fn create_todo(
    user: CurrentUser,
    state: web::Data<HttpState>,
    payload: web::Json<TodoCreateRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let todo = state.todos.create_own(&user.into_inner(), draft).await?;
    Ok(HttpResponse::Created().json(TodoResponse::from(todo)))
}

/// Patch a todo scoped by `(id, owner)`.
#[utoipa::path(
    patch,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    request_body = TodoUpdateRequest,
    responses(
        (status = 200, description = "Updated todo", body = TodoResponse),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 404, description = "Unknown id or another owner's todo", body = Error)
    ),
    tags = ["todos"],
    operation_id = "updateTodo"
)]
#[patch("/todos/{id}")]
pub async fn update_todo(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<TodoUpdateRequest>,
) -> ApiResult<web::Json<TodoResponse>> {
    let todo = state
        .todos
        .update(
            &user.into_inner().id,
            path.into_inner(),
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(TodoResponse::from(todo)))
}

/// Delete a todo scoped by `(id, owner)`.
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 404, description = "Unknown id or another owner's todo", body = Error)
    ),
    tags = ["todos"],
    operation_id = "deleteTodo"
)]
#[delete("/todos/{id}")]
pub async fn delete_todo(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .todos
        .delete(&user.into_inner().id, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
