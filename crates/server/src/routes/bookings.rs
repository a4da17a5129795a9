use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use models::booking::{Booking, BookingInput, BookingStatus};
use models::errors::ModelError;
use service::errors::ServiceError;

use crate::auth::ServerState;
use crate::errors::JsonApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    pub success: bool,
    pub booking_id: String,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct BookingList {
    pub success: bool,
    pub bookings: Vec<Booking>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct BookingDetail {
    pub success: bool,
    pub booking: Booking,
}

#[derive(Serialize)]
pub struct BookingUpdated {
    pub success: bool,
    pub booking: Booking,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct BookingDeleted {
    pub success: bool,
    pub message: &'static str,
}

/// PATCH body; unknown status strings are rejected at deserialization.
#[derive(Deserialize)]
pub struct UpdateStatusInput {
    pub status: BookingStatus,
}

/// Submit a new booking from the public form.
pub async fn create_booking(
    State(state): State<ServerState>,
    Json(input): Json<BookingInput>,
) -> Result<Json<BookingCreated>, JsonApiError> {
    let store = state.bookings.clone();
    store
        .create(input)
        .await
        .map(|booking| {
            Json(BookingCreated {
                success: true,
                booking_id: booking.id,
                message: "Booking submitted successfully",
            })
        })
        .map_err(|e| match e {
            ServiceError::Validation(msg)
            | ServiceError::Model(ModelError::Validation(msg)) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, msg, None)
            }
            _ => JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create booking",
                Some(e.to_string()),
            ),
        })
}

/// List every booking for the admin dashboard, newest first.
pub async fn list_bookings(State(state): State<ServerState>) -> Json<BookingList> {
    let store = state.bookings.clone();
    let bookings = store.list().await;
    let count = bookings.len();
    Json(BookingList { success: true, bookings, count })
}

/// Fetch a single booking by id.
pub async fn get_booking(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<BookingDetail>, JsonApiError> {
    let store = state.bookings.clone();
    match store.get(&id).await {
        Some(booking) => Ok(Json(BookingDetail { success: true, booking })),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Booking not found", None)),
    }
}

/// Update the status of an existing booking.
pub async fn update_booking_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<BookingUpdated>, JsonApiError> {
    let store = state.bookings.clone();
    store
        .update_status(&id, input.status)
        .await
        .map(|booking| {
            Json(BookingUpdated {
                success: true,
                booking,
                message: "Booking updated successfully",
            })
        })
        .map_err(|e| match e {
            ServiceError::NotFound(_) => {
                JsonApiError::new(StatusCode::NOT_FOUND, "Booking not found", None)
            }
            _ => JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update booking",
                Some(e.to_string()),
            ),
        })
}

/// Delete a booking.
pub async fn delete_booking(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<BookingDeleted>, JsonApiError> {
    let store = state.bookings.clone();
    match store.delete(&id).await {
        Ok(true) => Ok(Json(BookingDeleted {
            success: true,
            message: "Booking deleted successfully",
        })),
        Ok(false) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Booking not found", None)),
        Err(e) => Err(JsonApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to delete booking",
            Some(e.to_string()),
        )),
    }
}
