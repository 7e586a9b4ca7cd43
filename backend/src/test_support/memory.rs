//! In-memory port implementations backed by mutex-guarded vectors.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use pagination::Page;
use uuid::Uuid;

use crate::domain::event::CalendarEvent;
use crate::domain::idea::{Idea, IdeaStatus};
use crate::domain::notification::Notification;
use crate::domain::ports::{
    AttachmentStore, AttachmentStoreError, CredentialHashError, CredentialHasher,
    EventPersistenceError, EventRepository, IdeaPersistenceError, IdeaRepository, NewEvent,
    NewIdea, NewNotification, NewTodo, NewUser, NotificationPersistenceError,
    NotificationRepository, TodoPersistenceError, TodoRepository, TokenIssuer, TokenIssuerError,
    UserPersistenceError, UserRepository,
};
use crate::domain::todo::{Todo, TodoPatch};
use crate::domain::user::{ProfileUpdate, Role, User, UserId};

fn page_slice<T: Clone>(rows: &[T], page: Page) -> Vec<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(0);
    let limit = usize::try_from(page.limit()).unwrap_or(0);
    rows.iter().skip(offset).take(limit).cloned().collect()
}

/// In-memory [`UserRepository`].
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    /// Pre-load a user row, bypassing registration.
    pub fn seed(&self, user: User) {
        self.rows.lock().expect("user rows lock").push(user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut rows = self.rows.lock().expect("user rows lock");
        if rows.iter().any(|row| row.email == user.email) {
            return Err(UserPersistenceError::duplicate_email());
        }
        let row = User {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            is_active: true,
            avatar_url: None,
            bio: None,
            github_link: None,
            linkedin_link: None,
            studio_name: None,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let rows = self.rows.lock().expect("user rows lock");
        Ok(rows.iter().find(|row| row.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let rows = self.rows.lock().expect("user rows lock");
        Ok(rows.iter().find(|row| row.email.as_ref() == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.rows.lock().expect("user rows lock").clone())
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserPersistenceError> {
        let mut rows = self.rows.lock().expect("user rows lock");
        if let Some(row) = rows.iter_mut().find(|row| row.id == *id) {
            row.password_hash = password_hash.to_owned();
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        patch: &ProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut rows = self.rows.lock().expect("user rows lock");
        let Some(row) = rows.iter_mut().find(|row| row.id == *id) else {
            return Ok(None);
        };
        *row = patch.apply(row.clone());
        Ok(Some(row.clone()))
    }

    async fn set_role(
        &self,
        id: &UserId,
        role: Role,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut rows = self.rows.lock().expect("user rows lock");
        let Some(row) = rows.iter_mut().find(|row| row.id == *id) else {
            return Ok(None);
        };
        row.role = role;
        Ok(Some(row.clone()))
    }
}

/// In-memory [`IdeaRepository`].
#[derive(Default)]
pub struct InMemoryIdeas {
    rows: Mutex<Vec<Idea>>,
}

#[async_trait]
impl IdeaRepository for InMemoryIdeas {
    async fn insert(&self, idea: NewIdea) -> Result<Idea, IdeaPersistenceError> {
        let row = Idea {
            id: idea.id,
            owner_id: idea.owner_id,
            title: idea.draft.title().to_owned(),
            description: idea.draft.description().to_owned(),
            category: idea.draft.category().to_owned(),
            file_path: idea.file_path,
            status: IdeaStatus::Submitted,
            admin_comment: None,
            reviewer_id: None,
            tags: idea.draft.tags.clone(),
            problem_statement: idea.draft.problem_statement.clone(),
            solution: idea.draft.solution.clone(),
            created_at: Utc::now(),
        };
        self.rows.lock().expect("idea rows lock").push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Idea>, IdeaPersistenceError> {
        let rows = self.rows.lock().expect("idea rows lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        page: Page,
    ) -> Result<Vec<Idea>, IdeaPersistenceError> {
        let rows = self.rows.lock().expect("idea rows lock");
        let owned: Vec<Idea> = rows
            .iter()
            .filter(|row| row.owner_id == *owner)
            .cloned()
            .collect();
        Ok(page_slice(&owned, page))
    }

    async fn list_all(&self, page: Page) -> Result<Vec<Idea>, IdeaPersistenceError> {
        let rows = self.rows.lock().expect("idea rows lock");
        Ok(page_slice(&rows, page))
    }

    async fn evaluate(
        &self,
        id: Uuid,
        status: IdeaStatus,
        comment: Option<String>,
        reviewer: &UserId,
    ) -> Result<Option<Idea>, IdeaPersistenceError> {
        let mut rows = self.rows.lock().expect("idea rows lock");
        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        row.status = status;
        row.admin_comment = comment;
        row.reviewer_id = Some(*reviewer);
        Ok(Some(row.clone()))
    }

    async fn statuses_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<IdeaStatus>, IdeaPersistenceError> {
        let rows = self.rows.lock().expect("idea rows lock");
        Ok(rows
            .iter()
            .filter(|row| row.owner_id == *owner)
            .map(|row| row.status)
            .collect())
    }

    async fn status_snapshot(
        &self,
    ) -> Result<Vec<(IdeaStatus, chrono::DateTime<Utc>)>, IdeaPersistenceError> {
        let rows = self.rows.lock().expect("idea rows lock");
        Ok(rows.iter().map(|row| (row.status, row.created_at)).collect())
    }
}

/// In-memory [`TodoRepository`].
#[derive(Default)]
pub struct InMemoryTodos {
    rows: Mutex<Vec<Todo>>,
}

#[async_trait]
impl TodoRepository for InMemoryTodos {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, TodoPersistenceError> {
        let row = Todo {
            id: todo.id,
            owner_id: todo.owner_id,
            title: todo.draft.title().to_owned(),
            description: todo.draft.description.clone(),
            date: todo.draft.date.clone(),
            start_time: todo.draft.start_time.clone(),
            end_time: todo.draft.end_time.clone(),
            tags: todo.draft.tags.clone(),
            assigned_by: todo.assigned_by,
            done: false,
            created_at: Utc::now(),
        };
        self.rows.lock().expect("todo rows lock").push(row.clone());
        Ok(row)
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Todo>, TodoPersistenceError> {
        let rows = self.rows.lock().expect("todo rows lock");
        Ok(rows
            .iter()
            .filter(|row| row.owner_id == *owner)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        owner: &UserId,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, TodoPersistenceError> {
        let mut rows = self.rows.lock().expect("todo rows lock");
        let Some(row) = rows
            .iter_mut()
            .find(|row| row.id == id && row.owner_id == *owner)
        else {
            return Ok(None);
        };
        *row = patch.apply(row.clone());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid, owner: &UserId) -> Result<bool, TodoPersistenceError> {
        let mut rows = self.rows.lock().expect("todo rows lock");
        let before = rows.len();
        rows.retain(|row| !(row.id == id && row.owner_id == *owner));
        Ok(rows.len() < before)
    }
}

/// In-memory [`EventRepository`].
#[derive(Default)]
pub struct InMemoryEvents {
    rows: Mutex<Vec<CalendarEvent>>,
}

#[async_trait]
impl EventRepository for InMemoryEvents {
    async fn insert(&self, event: NewEvent) -> Result<CalendarEvent, EventPersistenceError> {
        let row = CalendarEvent {
            id: event.id,
            owner_id: event.owner_id,
            title: event.draft.title().to_owned(),
            date: event.draft.date().to_owned(),
            time: event.draft.time.clone(),
            description: event.draft.description.clone(),
            color: event.draft.color.clone(),
        };
        self.rows.lock().expect("event rows lock").push(row.clone());
        Ok(row)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<CalendarEvent>, EventPersistenceError> {
        let rows = self.rows.lock().expect("event rows lock");
        let mut owned: Vec<CalendarEvent> = rows
            .iter()
            .filter(|row| row.owner_id == *owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(owned)
    }
}

/// In-memory [`NotificationRepository`].
#[derive(Default)]
pub struct InMemoryNotifications {
    rows: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for InMemoryNotifications {
    async fn insert(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, NotificationPersistenceError> {
        let row = Notification {
            id: notification.id,
            recipient_id: notification.recipient_id,
            message: notification.message,
            kind: notification.kind,
            is_read: false,
            created_at: Utc::now(),
        };
        self.rows
            .lock()
            .expect("notification rows lock")
            .push(row.clone());
        Ok(row)
    }

    async fn list_recent(
        &self,
        recipient: &UserId,
        limit: i64,
    ) -> Result<Vec<Notification>, NotificationPersistenceError> {
        let rows = self.rows.lock().expect("notification rows lock");
        let limit = usize::try_from(limit).unwrap_or(0);
        // Rows are appended in creation order, so newest-first is a reverse scan.
        Ok(rows
            .iter()
            .rev()
            .filter(|row| row.recipient_id == *recipient)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn mark_all_read(
        &self,
        recipient: &UserId,
    ) -> Result<u64, NotificationPersistenceError> {
        let mut rows = self.rows.lock().expect("notification rows lock");
        let mut changed = 0_u64;
        for row in rows
            .iter_mut()
            .filter(|row| row.recipient_id == *recipient && !row.is_read)
        {
            row.is_read = true;
            changed += 1;
        }
        Ok(changed)
    }
}

/// Credential hasher with a transparent `plain$` scheme for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainCredentialHasher;

impl CredentialHasher for PlainCredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialHashError> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, credential: &str) -> Result<bool, CredentialHashError> {
        Ok(credential == format!("plain${password}"))
    }
}

/// In-memory [`AttachmentStore`] recording saved names without touching disk.
#[derive(Default)]
pub struct InMemoryAttachments {
    saved: Mutex<Vec<String>>,
}

impl InMemoryAttachments {
    /// Paths handed out so far, in save order.
    pub fn saved_paths(&self) -> Vec<String> {
        self.saved.lock().expect("saved paths lock").clone()
    }
}

impl AttachmentStore for InMemoryAttachments {
    fn save(&self, original_name: &str, _bytes: &[u8]) -> Result<String, AttachmentStoreError> {
        let extension = std::path::Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let path = format!("uploads/{}{extension}", Uuid::new_v4());
        self.saved
            .lock()
            .expect("saved paths lock")
            .push(path.clone());
        Ok(path)
    }
}

/// In-memory [`TokenIssuer`] mapping random tokens to user ids.
#[derive(Default)]
pub struct InMemoryTokens {
    map: Mutex<HashMap<String, UserId>>,
}

#[async_trait]
impl TokenIssuer for InMemoryTokens {
    async fn issue(&self, user: &UserId) -> Result<String, TokenIssuerError> {
        let token = Uuid::new_v4().simple().to_string();
        self.map
            .lock()
            .expect("token map lock")
            .insert(token.clone(), *user);
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> Result<Option<UserId>, TokenIssuerError> {
        Ok(self.map.lock().expect("token map lock").get(token).copied())
    }
}
