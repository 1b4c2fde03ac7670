use domain::{UserRecord, UserRepository};

/// Vec-backed store; records live for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Vec<UserRecord>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&mut self, user: UserRecord) {
        self.users.push(user);
    }

    fn find_by_key(&self, id: &str) -> Option<usize> {
        self.users.iter().position(|user| user.id == id)
    }

    fn get(&self, index: usize) -> Option<&UserRecord> {
        self.users.get(index)
    }

    fn update_at(&mut self, index: usize, user: UserRecord) -> bool {
        match self.users.get_mut(index) {
            Some(slot) => {
                *slot = user;
                true
            }
            None => false,
        }
    }

    fn delete_at(&mut self, index: usize) -> Option<UserRecord> {
        if index < self.users.len() {
            Some(self.users.remove(index))
        } else {
            None
        }
    }

    fn find_all(&self) -> &[UserRecord] {
        &self.users
    }
}
