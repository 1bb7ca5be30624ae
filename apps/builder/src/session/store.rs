//! In-memory session store.
//!
//! Each browser session owns one `ResumeRecord` plus its phase flag. Sessions
//! live for the lifetime of the process only; creation and disposal are the
//! explicit `create` / `remove` calls, and nothing is persisted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;

/// The two-phase session lifecycle. `Editing` is the initial phase;
/// `Previewing` is terminal; there is no reverse transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Editing,
    Previewing,
}

/// One resume-builder session.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub record: ResumeRecord,
    pub phase: Phase,
    /// True while a PDF export is running. The page view hides the download
    /// control while set, which also blocks re-entrant exports.
    pub exporting: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        Session {
            id: Uuid::new_v4(),
            record: ResumeRecord::new(),
            phase: Phase::Editing,
            exporting: false,
            created_at: Utc::now(),
        }
    }

    /// Editing→Previewing. One-way: a frozen session stays frozen.
    ///
    /// The controller re-checks the form's required fields here rather than
    /// trusting the browser's `required` attributes alone.
    pub fn submit(&mut self) -> Result<(), AppError> {
        if self.phase == Phase::Previewing {
            return Err(AppError::Conflict(
                "Session is already submitted".to_string(),
            ));
        }
        if let Some(gap) = self.record.first_required_gap() {
            return Err(AppError::Validation(format!(
                "Required field '{gap}' is empty"
            )));
        }
        self.phase = Phase::Previewing;
        Ok(())
    }

    /// Guards every mutation path: a submitted record is read-only.
    pub fn ensure_editable(&self) -> Result<(), AppError> {
        match self.phase {
            Phase::Editing => Ok(()),
            Phase::Previewing => Err(AppError::Conflict(
                "Record is frozen after submit".to_string(),
            )),
        }
    }
}

/// Shared handle to all live sessions.
///
/// The inner lock is never held across an await point: controller operations
/// are synchronous and export clones the record out before rasterizing.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh Editing session and returns a snapshot of it.
    pub fn create(&self) -> Session {
        let session = Session::new();
        self.lock().insert(session.id, session.clone());
        session
    }

    /// Snapshot of one session.
    pub fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Runs `f` against one session under the store lock.
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        f(session)
    }

    /// Disposal point: drops the session and its record.
    pub fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.lock()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Marks a session as exporting and returns a guard that clears the flag
    /// on drop, including on rasterizer or encoder failure, so the download
    /// control never sticks hidden.
    pub fn begin_export(&self, id: Uuid) -> Result<ExportGuard, AppError> {
        self.with_session(id, |session| {
            if session.phase != Phase::Previewing {
                return Err(AppError::Conflict(
                    "Submit the form before exporting".to_string(),
                ));
            }
            if session.exporting {
                return Err(AppError::Conflict(
                    "An export is already in progress".to_string(),
                ));
            }
            session.exporting = true;
            Ok(())
        })?;
        Ok(ExportGuard {
            store: self.clone(),
            id,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Session>> {
        // A poisoned lock means a panic mid-mutation; continuing with the
        // map as-is is safe because every mutation is a single assignment
        // or push.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Scoped acquire/release of a session's `exporting` flag.
#[derive(Debug)]
pub struct ExportGuard {
    store: SessionStore,
    id: Uuid,
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        if let Some(session) = self.store.lock().get_mut(&self.id) {
            session.exporting = false;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::make_filled_record;

    fn make_previewing_session(store: &SessionStore) -> Uuid {
        let id = store.create().id;
        store
            .with_session(id, |session| {
                session.record = make_filled_record();
                session.submit()
            })
            .unwrap();
        id
    }

    #[test]
    fn test_create_starts_in_editing_with_fresh_record() {
        let store = SessionStore::new();
        let session = store.create();
        assert_eq!(session.phase, Phase::Editing);
        assert!(!session.exporting);
        assert_eq!(session.record, ResumeRecord::new());
    }

    #[test]
    fn test_get_unknown_session_is_not_found() {
        let store = SessionStore::new();
        let err = store.get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_submit_with_gaps_is_refused() {
        let store = SessionStore::new();
        let id = store.create().id;
        let err = store.with_session(id, |s| s.submit()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.get(id).unwrap().phase, Phase::Editing);
    }

    #[test]
    fn test_submit_freezes_the_session_one_way() {
        let store = SessionStore::new();
        let id = make_previewing_session(&store);

        let session = store.get(id).unwrap();
        assert_eq!(session.phase, Phase::Previewing);
        assert!(session.ensure_editable().is_err());

        // A second submit is a conflict, not a transition.
        let err = store.with_session(id, |s| s.submit()).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.get(id).unwrap().phase, Phase::Previewing);
    }

    #[test]
    fn test_remove_disposes_the_session() {
        let store = SessionStore::new();
        let id = store.create().id;
        store.remove(id).unwrap();
        assert!(store.get(id).is_err());
        assert!(store.remove(id).is_err());
    }

    #[test]
    fn test_begin_export_requires_previewing_phase() {
        let store = SessionStore::new();
        let id = store.create().id;
        let err = store.begin_export(id).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_begin_export_blocks_reentrancy_until_guard_drops() {
        let store = SessionStore::new();
        let id = make_previewing_session(&store);

        let guard = store.begin_export(id).unwrap();
        assert!(store.get(id).unwrap().exporting);
        let err = store.begin_export(id).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        drop(guard);
        assert!(!store.get(id).unwrap().exporting);
        let _second = store.begin_export(id).unwrap();
    }

    #[test]
    fn test_export_guard_clears_flag_even_after_session_removal() {
        let store = SessionStore::new();
        let id = make_previewing_session(&store);
        let guard = store.begin_export(id).unwrap();
        store.remove(id).unwrap();
        drop(guard); // must not panic
    }
}
