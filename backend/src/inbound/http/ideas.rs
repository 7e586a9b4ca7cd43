//! Idea submission and listing handlers.
//!
//! Submission arrives as `multipart/form-data` so an attachment can ride
//! along with the text fields.

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{get, post, web, HttpResponse};
use pagination::{Page, PageQuery};
use uuid::Uuid;

use crate::domain::idea::IdeaDraft;
use crate::domain::{AttachmentUpload, Error};
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::schemas::{IdeaDetailResponse, IdeaResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Multipart submission form.
#[derive(Debug, MultipartForm)]
pub struct IdeaForm {
    /// Idea title, 3–100 characters.
    pub title: Text<String>,
    /// Idea description, 10–2000 characters.
    pub description: Text<String>,
    /// Free-form category label.
    pub category: Text<String>,
    /// Opaque tag text.
    pub tags: Option<Text<String>>,
    /// Optional problem statement.
    pub problem_statement: Option<Text<String>>,
    /// Optional proposed solution.
    pub solution: Option<Text<String>>,
    /// Optional file attachment.
    pub attachment: Option<TempFile>,
}

fn read_attachment(file: TempFile) -> Result<AttachmentUpload, Error> {
    let original_name = file.file_name.clone().unwrap_or_else(|| "upload".to_owned());
    let bytes = std::fs::read(file.file.path())
        .map_err(|err| Error::internal(format!("attachment unreadable: {err}")))?;
    Ok(AttachmentUpload {
        original_name,
        bytes,
    })
}

fn page_from(query: PageQuery) -> Result<Page, Error> {
    Page::try_from(query).map_err(|err| Error::validation(err.to_string()))
}

/// Submit a new idea.
#[utoipa::path(
    post,
    path = "/api/ideas",
    responses(
        (status = 201, description = "Idea submitted", body = IdeaDetailResponse),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 422, description = "Field out of bounds", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "createIdea"
)]
#[post("/ideas")]
pub async fn create_idea(
    user: CurrentUser,
    state: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<IdeaForm>,
) -> ApiResult<HttpResponse> {
    let draft = IdeaDraft::new(
        form.title.into_inner(),
        form.description.into_inner(),
        form.category.into_inner(),
    )?
    .with_rich_content(
        form.tags.map(Text::into_inner),
        form.problem_statement.map(Text::into_inner),
        form.solution.map(Text::into_inner),
    );
    let attachment = form.attachment.map(read_attachment).transpose()?;

    let caller = user.into_inner();
    let idea = state.ideas.create(&caller, draft, attachment).await?;
    let detail = IdeaDetailResponse {
        idea: IdeaResponse::from(idea),
        owner: Some(caller.public_profile()),
        reviewer: None,
    };
    Ok(HttpResponse::Created().json(detail))
}

/// Page through the caller's own ideas.
#[utoipa::path(
    get,
    path = "/api/ideas",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum rows, clamped to 100")
    ),
    responses(
        (status = 200, description = "The caller's ideas", body = [IdeaResponse]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "listMyIdeas"
)]
#[get("/ideas")]
pub async fn list_my_ideas(
    user: CurrentUser,
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<IdeaResponse>>> {
    let page = page_from(query.into_inner())?;
    let ideas = state
        .ideas
        .list_for_owner(&user.into_inner().id, page)
        .await?;
    Ok(web::Json(ideas.into_iter().map(IdeaResponse::from).collect()))
}

/// Fetch a single idea, owner-or-admin gated, with identities resolved.
#[utoipa::path(
    get,
    path = "/api/ideas/{id}",
    params(("id" = Uuid, Path, description = "Idea identifier")),
    responses(
        (status = 200, description = "The idea", body = IdeaDetailResponse),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Not the owner and not an admin", body = Error),
        (status = 404, description = "Unknown idea", body = Error)
    ),
    tags = ["ideas"],
    operation_id = "getIdea"
)]
#[get("/ideas/{id}")]
pub async fn get_idea(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<IdeaDetailResponse>> {
    let idea = state
        .ideas
        .get(path.into_inner(), &user.into_inner())
        .await?;
    let detail = state.ideas.with_people(idea).await?;
    Ok(web::Json(detail.into()))
}
