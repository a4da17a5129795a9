use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::info;

use models::booking::{Booking, BookingInput, BookingStatus, BOOKING_KEY_PREFIX};

use crate::bookings::store::BookingStore;
use crate::errors::ServiceError;
use crate::storage::json_kv_store::JsonKvStore;

const ID_SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_SUFFIX_LEN: usize = 6;

/// Booking ids look like `booking:1718150400000-k3v9qa`: the storage key
/// prefix, the creation time in unix millis and a short random tail so two
/// submissions in the same millisecond get distinct keys.
fn new_booking_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_SUFFIX_ALPHABET[rng.gen_range(0..ID_SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("{}{}-{}", BOOKING_KEY_PREFIX, Utc::now().timestamp_millis(), suffix)
}

/// File storage: persists bookings through the JSON KV store.
#[derive(Clone)]
pub struct BookingService {
    store: Arc<JsonKvStore<Booking>>,
}

impl BookingService {
    /// Initialize the backing store, creating an empty file when missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonKvStore::<Booking>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// Validate the submission and persist a new pending booking.
    pub async fn create(&self, input: BookingInput) -> Result<Booking, ServiceError> {
        input.validate()?;
        let booking = Booking {
            id: new_booking_id(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            project_type: input.project_type,
            budget: input.budget,
            message: input.message,
            date: input.date,
            created_at: Utc::now(),
            status: BookingStatus::Pending,
            updated_at: None,
        };
        self.store.set(booking.id.clone(), booking.clone()).await?;
        info!(booking_id = %booking.id, name = %booking.name, email = %booking.email, "new booking created");
        Ok(booking)
    }

    /// All bookings, newest first. The prefix scan carries no order of its
    /// own, so equal `created_at` falls back to descending id; ids embed the
    /// creation millis, which keeps newest-first and makes the order
    /// identical across reloads.
    pub async fn list(&self) -> Vec<Booking> {
        let mut bookings = self.store.get_by_prefix(BOOKING_KEY_PREFIX).await;
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        bookings
    }

    /// Look up a booking by its full id (prefix included).
    pub async fn get(&self, id: &str) -> Option<Booking> {
        self.store.get(id).await
    }

    /// Move a booking to a new status and stamp `updated_at`.
    pub async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, ServiceError> {
        let mut booking = self
            .store
            .get(id)
            .await
            .ok_or_else(|| ServiceError::not_found("booking"))?;
        booking.status = status;
        booking.updated_at = Some(Utc::now());
        self.store.set(booking.id.clone(), booking.clone()).await?;
        info!(booking_id = %booking.id, status = %booking.status, "booking status updated");
        Ok(booking)
    }

    /// Delete a booking; returns whether it existed.
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let existed = self.store.delete(id).await?;
        if existed {
            info!(booking_id = %id, "booking deleted");
        }
        Ok(existed)
    }
}

#[async_trait::async_trait]
impl BookingStore for BookingService {
    async fn create(&self, input: BookingInput) -> Result<Booking, ServiceError> { self.create(input).await }
    async fn list(&self) -> Vec<Booking> { self.list().await }
    async fn get(&self, id: &str) -> Option<Booking> { self.get(id).await }
    async fn update_status(&self, id: &str, status: BookingStatus) -> Result<Booking, ServiceError> {
        self.update_status(id, status).await
    }
    async fn delete(&self, id: &str) -> Result<bool, ServiceError> { self.delete(id).await }
}
