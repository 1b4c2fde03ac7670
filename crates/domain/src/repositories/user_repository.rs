use crate::entities::UserRecord;

/// Ordered in-memory collection of user records.
/// This is a PORT; adapters decide how the records are held.
///
/// Insertion order is display order. Index-based operations take an index
/// previously returned by [`UserRepository::find_by_key`].
pub trait UserRepository {
    fn insert(&mut self, user: UserRecord);
    fn find_by_key(&self, id: &str) -> Option<usize>;
    fn get(&self, index: usize) -> Option<&UserRecord>;
    fn update_at(&mut self, index: usize, user: UserRecord) -> bool;
    fn delete_at(&mut self, index: usize) -> Option<UserRecord>;
    fn find_all(&self) -> &[UserRecord];

    fn len(&self) -> usize {
        self.find_all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, id: &str) -> bool {
        self.find_by_key(id).is_some()
    }
}
