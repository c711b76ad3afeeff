use crate::domain::model::BookingDraft;
use crate::domain::ports::Storage;
use crate::utils::error::{FareError, Result};
use chrono::{DateTime, Utc};

pub const DEFAULT_DRAFT_FILE: &str = "booking_draft.json";

/// Keeps the in-progress booking as a JSON document, the way the booking
/// page kept it between visits.
pub struct DraftStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> DraftStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_file_name(storage, DEFAULT_DRAFT_FILE)
    }

    pub fn with_file_name(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    /// Stamps `saved_at` with `now` and writes the draft, replacing any
    /// previous one.
    pub async fn save(&self, draft: &BookingDraft, now: DateTime<Utc>) -> Result<BookingDraft> {
        let mut stamped = draft.clone();
        stamped.saved_at = Some(now);
        let data = serde_json::to_vec_pretty(&stamped)?;
        self.storage.write_file(&self.file_name, &data).await?;
        tracing::debug!("draft saved to {}", self.file_name);
        Ok(stamped)
    }

    /// A missing draft is `None`. So is one that no longer parses: it is
    /// logged and ignored rather than blocking a fresh booking.
    pub async fn load(&self) -> Result<Option<BookingDraft>> {
        let data = match self.storage.read_file(&self.file_name).await {
            Ok(data) => data,
            Err(FareError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(None)
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_slice::<BookingDraft>(&data) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::warn!("ignoring unreadable draft {}: {}", self.file_name, e);
                Ok(None)
            }
        }
    }

    pub async fn clear(&self) -> Result<()> {
        self.storage.remove_file(&self.file_name).await
    }
}
