//! Plain, non-concurrent key/value maps
//!
//! The types here do no synchronization at all. A value implementing [`Map`]
//! must be owned by a single execution context at a time; sharing one between
//! threads is the job of a wrapper such as `chanmap`.

mod hash_storage;

pub use hash_storage::HashStorage;

/// Contract of a plain key/value container.
///
/// Every operation is total. Mutating operations report the length of the
/// map after they ran. Implementors must be `Clone`: a clone is the "wrapper
/// handle" that can be handed out when a caller wants the map itself.
pub trait Map: Clone {
    type Key;
    type Value;
    /// Raw container the map stores its entries in.
    type Storage: Clone;

    /// Look up a key, `None` if absent.
    fn get(&self, key: &Self::Key) -> Option<Self::Value>;

    /// Insert or overwrite. Returns the new length.
    fn set(&mut self, key: Self::Key, value: Self::Value) -> usize;

    /// Remove a key if present. Returns the new length.
    fn delete(&mut self, key: &Self::Key) -> usize;

    fn contains(&self, key: &Self::Key) -> bool;

    fn length(&self) -> usize;

    /// Remove all entries.
    fn clear(&mut self);

    /// Borrow the raw storage.
    fn underlying_storage(&self) -> &Self::Storage;

    fn is_empty(&self) -> bool {
        self.length() == 0
    }
}
