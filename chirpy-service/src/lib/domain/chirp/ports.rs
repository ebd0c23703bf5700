use async_trait::async_trait;

use super::errors::ChirpError;
use super::models::Chirp;
use super::models::ChirpBody;
use super::models::ChirpFilter;
use super::models::ChirpId;
use crate::domain::user::models::UserId;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Post a chirp on behalf of its author.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, author: UserId, body: ChirpBody) -> Result<Chirp, ChirpError>;

    /// List chirps matching a filter, ordered by creation time.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_chirps(&self, filter: ChirpFilter) -> Result<Vec<Chirp>, ChirpError>;

    /// Retrieve a single chirp.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_chirp(&self, id: ChirpId) -> Result<Chirp, ChirpError>;

    /// Delete a chirp if `requester` is its author.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `NotAuthor` - Requester did not post the chirp; nothing is deleted
    /// * `DatabaseError` - Database operation failed
    async fn delete_chirp(&self, id: ChirpId, requester: UserId) -> Result<(), ChirpError>;
}

/// Persistence operations for chirps.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    async fn find_by_id(&self, id: ChirpId) -> Result<Option<Chirp>, ChirpError>;

    async fn list(&self, filter: &ChirpFilter) -> Result<Vec<Chirp>, ChirpError>;

    /// # Errors
    /// * `NotFound` - Chirp does not exist
    async fn delete(&self, id: ChirpId) -> Result<(), ChirpError>;
}
