//! Idea registry use-cases: submission, listing, access rules, evaluation.

use std::sync::Arc;

use pagination::Page;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::idea::{EvaluationStatus, Idea, IdeaDraft, IdeaWithPeople};
use crate::domain::ports::{
    AttachmentStore, IdeaPersistenceError, IdeaRepository, NewIdea, UserPersistenceError,
    UserRepository,
};
use crate::domain::user::{Role, User, UserId};
use crate::domain::Error;

/// An attachment as received from the transport layer.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    /// Client-supplied file name; only its extension survives storage.
    pub original_name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

/// Idea service implementing the registry use-cases.
#[derive(Clone)]
pub struct IdeaService {
    ideas: Arc<dyn IdeaRepository>,
    users: Arc<dyn UserRepository>,
    attachments: Arc<dyn AttachmentStore>,
}

fn map_idea_error(error: IdeaPersistenceError) -> Error {
    match error {
        IdeaPersistenceError::Connection { message } => Error::service_unavailable(message),
        IdeaPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail => {
            Error::internal("unexpected duplicate email during lookup")
        }
    }
}

impl IdeaService {
    /// Create the service over its ports.
    pub fn new(
        ideas: Arc<dyn IdeaRepository>,
        users: Arc<dyn UserRepository>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            ideas,
            users,
            attachments,
        }
    }

    /// Submit a new idea, storing the attachment first when one was sent.
    pub async fn create(
        &self,
        owner: &User,
        draft: IdeaDraft,
        attachment: Option<AttachmentUpload>,
    ) -> Result<Idea, Error> {
        let file_path = match attachment {
            Some(upload) => Some(
                self.attachments
                    .save(&upload.original_name, &upload.bytes)
                    .map_err(|err| Error::internal(err.to_string()))?,
            ),
            None => None,
        };

        let idea = self
            .ideas
            .insert(NewIdea {
                id: Uuid::new_v4(),
                owner_id: owner.id,
                draft,
                file_path,
            })
            .await
            .map_err(map_idea_error)?;
        info!(idea_id = %idea.id, owner = %owner.id, "idea submitted");
        Ok(idea)
    }

    /// Page through the caller's own ideas.
    pub async fn list_for_owner(&self, owner: &UserId, page: Page) -> Result<Vec<Idea>, Error> {
        self.ideas
            .list_for_owner(owner, page)
            .await
            .map_err(map_idea_error)
    }

    /// Page through every idea; callers must already be admins.
    pub async fn list_all(&self, page: Page) -> Result<Vec<Idea>, Error> {
        self.ideas.list_all(page).await.map_err(map_idea_error)
    }

    /// Fetch a single idea, enforcing the owner-or-admin read rule.
    pub async fn get(&self, id: Uuid, caller: &User) -> Result<Idea, Error> {
        let idea = self
            .ideas
            .find_by_id(id)
            .await
            .map_err(map_idea_error)?
            .ok_or_else(|| Error::not_found("Idea not found"))?;
        if idea.owner_id != caller.id && caller.role != Role::Admin {
            return Err(Error::forbidden("Not enough permissions"));
        }
        Ok(idea)
    }

    /// Evaluate an idea: set status, comment, and reviewer in one unit of
    /// work, then attach the owner and reviewer identities.
    pub async fn evaluate(
        &self,
        id: Uuid,
        status: EvaluationStatus,
        comment: Option<String>,
        reviewer: &User,
    ) -> Result<IdeaWithPeople, Error> {
        let idea = self
            .ideas
            .evaluate(id, status.as_idea_status(), comment, &reviewer.id)
            .await
            .map_err(map_idea_error)?
            .ok_or_else(|| Error::not_found("Idea not found"))?;
        info!(idea_id = %idea.id, status = %idea.status, reviewer = %reviewer.id, "idea evaluated");
        self.with_people(idea).await
    }

    /// Resolve owner and reviewer public profiles onto an idea record.
    ///
    /// A dangling owner reference is logged rather than failing the read.
    pub async fn with_people(&self, idea: Idea) -> Result<IdeaWithPeople, Error> {
        let owner = self
            .users
            .find_by_id(&idea.owner_id)
            .await
            .map_err(map_user_error)?
            .map(|user| user.public_profile());
        if owner.is_none() {
            warn!(idea_id = %idea.id, owner = %idea.owner_id, "idea owner no longer resolvable");
        }
        let reviewer = match idea.reviewer_id {
            Some(reviewer_id) => self
                .users
                .find_by_id(&reviewer_id)
                .await
                .map_err(map_user_error)?
                .map(|user| user.public_profile()),
            None => None,
        };
        Ok(IdeaWithPeople {
            idea,
            owner,
            reviewer,
        })
    }
}
