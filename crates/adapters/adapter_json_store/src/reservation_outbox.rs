//! JSON-lines implementation of [`ReservationGateway`].
//!
//! Each finalized request becomes one line in the outbox file. A separate
//! delivery step (out of scope here) forwards them to the booking API.

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use venuebook_app::ports::ReservationGateway;
use venuebook_domain::error::VenuebookError;
use venuebook_domain::id::BookingId;
use venuebook_domain::reservation::ReservationRequest;
use venuebook_domain::venue::BookingRecord;

use crate::error::JsonStoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutboxAction {
    Create,
    Update,
}

/// One line of the outbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboxEntry {
    pub action: OutboxAction,
    pub booking_id: BookingId,
    #[serde(flatten)]
    pub request: ReservationRequest,
}

impl OutboxEntry {
    fn to_record(&self) -> BookingRecord {
        BookingRecord {
            id: self.booking_id.clone(),
            date_from: self.request.date_from.to_string(),
            date_to: self.request.date_to.to_string(),
            guests: self.request.guests,
        }
    }
}

/// Reservation gateway appending to a JSON-lines file.
pub struct JsonLinesReservationGateway {
    path: PathBuf,
}

impl JsonLinesReservationGateway {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn append(path: &Path, entry: &OutboxEntry) -> Result<(), JsonStoreError> {
    let mut line = serde_json::to_vec(entry).map_err(|err| JsonStoreError::json(path, err))?;
    line.push(b'\n');

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|err| JsonStoreError::io(path, err))?;
    file.write_all(&line)
        .await
        .map_err(|err| JsonStoreError::io(path, err))?;
    file.flush().await.map_err(|err| JsonStoreError::io(path, err))?;

    tracing::debug!(
        path = %path.display(),
        booking_id = %entry.booking_id,
        action = ?entry.action,
        "queued reservation"
    );
    Ok(())
}

impl ReservationGateway for JsonLinesReservationGateway {
    fn create(
        &self,
        request: ReservationRequest,
    ) -> impl Future<Output = Result<BookingRecord, VenuebookError>> + Send {
        let path = self.path.clone();
        let entry = OutboxEntry {
            action: OutboxAction::Create,
            booking_id: BookingId::generate(),
            request,
        };
        async move {
            append(&path, &entry).await?;
            Ok(entry.to_record())
        }
    }

    fn update(
        &self,
        id: BookingId,
        request: ReservationRequest,
    ) -> impl Future<Output = Result<BookingRecord, VenuebookError>> + Send {
        let path = self.path.clone();
        let entry = OutboxEntry {
            action: OutboxAction::Update,
            booking_id: id,
            request,
        };
        async move {
            append(&path, &entry).await?;
            Ok(entry.to_record())
        }
    }
}
