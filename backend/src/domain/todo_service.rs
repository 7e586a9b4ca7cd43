//! Todo use-cases, including admin assignment with its notification side
//! effect.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::notification::{task_assigned_message, NotificationKind};
use crate::domain::ports::{
    NewNotification, NewTodo, NotificationPersistenceError, NotificationRepository,
    TodoPersistenceError, TodoRepository, UserPersistenceError, UserRepository,
};
use crate::domain::todo::{Todo, TodoDraft, TodoPatch};
use crate::domain::user::{User, UserId};
use crate::domain::Error;

/// Todo service implementing the task-registry use-cases.
#[derive(Clone)]
pub struct TodoService {
    todos: Arc<dyn TodoRepository>,
    notifications: Arc<dyn NotificationRepository>,
    users: Arc<dyn UserRepository>,
}

fn map_todo_error(error: TodoPersistenceError) -> Error {
    match error {
        TodoPersistenceError::Connection { message } => Error::service_unavailable(message),
        TodoPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_notification_error(error: NotificationPersistenceError) -> Error {
    match error {
        NotificationPersistenceError::Connection { message } => {
            Error::service_unavailable(message)
        }
        NotificationPersistenceError::Query { message } => Error::internal(message),
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

impl TodoService {
    /// Create the service over its ports.
    pub fn new(
        todos: Arc<dyn TodoRepository>,
        notifications: Arc<dyn NotificationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            todos,
            notifications,
            users,
        }
    }

    /// Create a todo owned by the caller.
    pub async fn create_own(&self, caller: &User, draft: TodoDraft) -> Result<Todo, Error> {
        self.todos
            .insert(NewTodo {
                id: Uuid::new_v4(),
                owner_id: caller.id,
                draft,
                assigned_by: None,
            })
            .await
            .map_err(map_todo_error)
    }

    /// Admin-only: create a todo for another user, stamping `assigned_by`
    /// and appending a `task_assigned` notification to the target's feed.
    pub async fn assign(
        &self,
        admin: &User,
        target: &UserId,
        draft: TodoDraft,
    ) -> Result<Todo, Error> {
        let target_user = self
            .users
            .find_by_id(target)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;

        let todo = self
            .todos
            .insert(NewTodo {
                id: Uuid::new_v4(),
                owner_id: target_user.id,
                draft,
                assigned_by: Some(admin.id),
            })
            .await
            .map_err(map_todo_error)?;

        self.notifications
            .insert(NewNotification {
                id: Uuid::new_v4(),
                recipient_id: target_user.id,
                message: task_assigned_message(&todo.title, admin.email.as_ref()),
                kind: NotificationKind::TaskAssigned,
            })
            .await
            .map_err(map_notification_error)?;
        info!(todo_id = %todo.id, target = %target_user.id, admin = %admin.id, "todo assigned");
        Ok(todo)
    }

    /// The caller's todos in creation order.
    pub async fn list(&self, caller: &UserId) -> Result<Vec<Todo>, Error> {
        self.todos.list_for_owner(caller).await.map_err(map_todo_error)
    }

    /// Patch a todo scoped by `(id, owner)`.
    ///
    /// A miss — unknown id or another owner's row — is `NotFound`, never
    /// `Forbidden`, so existence does not leak.
    pub async fn update(
        &self,
        caller: &UserId,
        id: Uuid,
        patch: TodoPatch,
    ) -> Result<Todo, Error> {
        patch.validate()?;
        self.todos
            .update(id, caller, &patch)
            .await
            .map_err(map_todo_error)?
            .ok_or_else(|| Error::not_found("Todo not found or not yours."))
    }

    /// Delete a todo scoped by `(id, owner)`; same miss semantics as update.
    pub async fn delete(&self, caller: &UserId, id: Uuid) -> Result<(), Error> {
        let deleted = self
            .todos
            .delete(id, caller)
            .await
            .map_err(map_todo_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found("Todo not found or not yours."))
        }
    }
}
