use async_trait::async_trait;

use models::booking::{Booking, BookingInput, BookingStatus};

use crate::errors::ServiceError;

/// Trait abstraction for booking storage (CRUD over consultation requests).
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn create(&self, input: BookingInput) -> Result<Booking, ServiceError>;
    async fn list(&self) -> Vec<Booking>;
    async fn get(&self, id: &str) -> Option<Booking>;
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, ServiceError>;
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
}
