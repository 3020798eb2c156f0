//! JSON-file implementation of [`VenueRepository`].

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use venuebook_app::ports::VenueRepository;
use venuebook_domain::error::VenuebookError;
use venuebook_domain::id::VenueId;
use venuebook_domain::venue::Venue;

use crate::error::JsonStoreError;

/// Accepted file layouts: the API's `{"data": [...]}` envelope or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum VenuesFile {
    Envelope { data: Vec<Venue> },
    Plain(Vec<Venue>),
}

impl VenuesFile {
    fn into_venues(self) -> Vec<Venue> {
        match self {
            Self::Envelope { data } => data,
            Self::Plain(venues) => venues,
        }
    }
}

/// Venue repository reading a JSON snapshot.
///
/// The file is re-read on every call so each selection session starts from
/// the latest snapshot.
pub struct JsonVenueRepository {
    path: PathBuf,
}

impl JsonVenueRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn load(path: &Path) -> Result<Vec<Venue>, JsonStoreError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|err| JsonStoreError::io(path, err))?;
    let file: VenuesFile =
        serde_json::from_slice(&content).map_err(|err| JsonStoreError::json(path, err))?;
    let venues = file.into_venues();
    tracing::debug!(path = %path.display(), venues = venues.len(), "loaded venues snapshot");
    Ok(venues)
}

impl VenueRepository for JsonVenueRepository {
    fn get_by_id(
        &self,
        id: &VenueId,
    ) -> impl Future<Output = Result<Option<Venue>, VenuebookError>> + Send {
        let path = self.path.clone();
        let id = id.clone();
        async move {
            let venues = load(&path).await?;
            Ok(venues.into_iter().find(|venue| venue.id == id))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Venue>, VenuebookError>> + Send {
        let path = self.path.clone();
        async move { Ok(load(&path).await?) }
    }
}
