use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use portal_core::{Session, SessionContext};
use portal_engine::AtomicFileWriter;
use portal_logging::{portal_info, portal_warn};
use serde::{Deserialize, Serialize};

const SESSION_FILENAME: &str = ".portal_session.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    user_id: String,
    token: String,
    signed_in_at: DateTime<Utc>,
}

/// Restores the session saved by the last `login`. Any problem reading the
/// file leaves the user signed out.
pub fn load_session(state_dir: &Path) -> SessionContext {
    let mut context = SessionContext::new();
    let path = state_dir.join(SESSION_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return context;
        }
        Err(err) => {
            portal_warn!("Failed to read session from {:?}: {}", path, err);
            return context;
        }
    };

    let persisted: PersistedSession = match ron::from_str(&content) {
        Ok(session) => session,
        Err(err) => {
            portal_warn!("Failed to parse session from {:?}: {}", path, err);
            return context;
        }
    };

    portal_info!("Restored session for user {}", persisted.user_id);
    context.login(Session {
        user_id: persisted.user_id,
        token: persisted.token,
        signed_in_at: persisted.signed_in_at,
    });
    context
}

/// Writes the current session, or removes the file when signed out.
pub fn save_session(state_dir: &Path, context: &SessionContext) -> anyhow::Result<()> {
    let Some(session) = context.current() else {
        clear_session(state_dir)?;
        return Ok(());
    };

    let persisted = PersistedSession {
        user_id: session.user_id.clone(),
        token: session.token.clone(),
        signed_in_at: session.signed_in_at,
    };
    let pretty = ron::ser::PrettyConfig::new();
    let content =
        ron::ser::to_string_pretty(&persisted, pretty).context("serializing session")?;

    let writer = AtomicFileWriter::new(state_dir);
    let path = writer
        .write(SESSION_FILENAME, &content)
        .with_context(|| format!("writing session to {}", state_dir.display()))?;
    portal_info!("Saved session to {:?}", path);
    Ok(())
}

/// Deletes the session file. Returns whether one existed.
pub fn clear_session(state_dir: &Path) -> anyhow::Result<bool> {
    let writer = AtomicFileWriter::new(state_dir);
    let removed = writer
        .remove(SESSION_FILENAME)
        .with_context(|| format!("removing session from {}", state_dir.display()))?;
    if removed {
        portal_info!("Removed session file in {:?}", state_dir);
    }
    Ok(removed)
}
