use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub async fn enqueue_dispatch(state: &AppState, booking_id: Uuid) -> Result<(), AppError> {
    state
        .dispatch_tx
        .send(booking_id)
        .await
        .map_err(|err| AppError::Internal(format!("dispatch queue send failed: {err}")))?;

    state.metrics.bookings_in_queue.inc();
    Ok(())
}
