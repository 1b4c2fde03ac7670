use crate::entities::{UserDraft, UserRecord};
use crate::errors::DomainError;
use crate::repositories::UserRepository;
use rand::Rng;
use tracing::{debug, info};

pub const ID_LENGTH: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random lowercase base-36 token of [`ID_LENGTH`] characters.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect()
}

/// User Service - owns the record store and its lifecycle rules
pub struct UserService {
    user_repository: Box<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Box<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Store a new user under a freshly generated identifier
    pub fn create_user(&mut self, draft: UserDraft) -> UserRecord {
        let id = self.next_id();
        let user = UserRecord::from_draft(id, draft);

        self.user_repository.insert(user.clone());
        info!(id = %user.id, total = self.user_repository.len(), "User added");
        user
    }

    pub fn find_by_key(&self, id: &str) -> Option<usize> {
        self.user_repository.find_by_key(id)
    }

    /// Get user by ID
    pub fn get_user(&self, id: &str) -> Result<&UserRecord, DomainError> {
        self.find_by_key(id)
            .and_then(|index| self.user_repository.get(index))
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))
    }

    /// Replace every field except the identifier, keeping the record's position
    pub fn update_user(&mut self, id: &str, draft: UserDraft) -> Result<UserRecord, DomainError> {
        let index = self
            .find_by_key(id)
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;

        let user = UserRecord::from_draft(id.to_string(), draft);
        if !self.user_repository.update_at(index, user.clone()) {
            return Err(DomainError::UserNotFound(id.to_string()));
        }
        info!(id, index, "User updated");
        Ok(user)
    }

    /// Delete user
    pub fn delete_user(&mut self, id: &str) -> Result<UserRecord, DomainError> {
        let removed = self
            .find_by_key(id)
            .and_then(|index| self.user_repository.delete_at(index))
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;

        info!(id, total = self.user_repository.len(), "User deleted");
        Ok(removed)
    }

    /// All users in insertion order
    pub fn users(&self) -> &[UserRecord] {
        self.user_repository.find_all()
    }

    pub fn len(&self) -> usize {
        self.user_repository.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_repository.is_empty()
    }

    // Re-draw until the token is unused so ids stay unique within the store.
    fn next_id(&self) -> String {
        loop {
            let id = generate_id();
            if !self.user_repository.contains_key(&id) {
                return id;
            }
            debug!(id, "Generated id already in use, drawing again");
        }
    }
}
