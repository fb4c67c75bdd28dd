use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;

use crate::error::CoreError;
use crate::session::WorkoutSession;
use crate::types::WorkoutSample;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    if !path.exists() {
        return Err(CoreError::NotFound(path.display().to_string()));
    }
    let contents = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    let mut de = serde_json::Deserializer::from_str(&contents);
    serde_path_to_error::deserialize(&mut de).map_err(CoreError::from_path_error)
}

/// Write a session to disk as pretty JSON. Raw sample arrays are not written.
pub fn save_session<P: AsRef<Path>>(session: &WorkoutSession, path: P) -> Result<(), CoreError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, json).map_err(|e| CoreError::io(path, e))?;
    info!(
        "session {} saved to {} ({} sets)",
        session.id,
        path.display(),
        session.completed.len()
    );
    Ok(())
}

pub fn load_session<P: AsRef<Path>>(path: P) -> Result<WorkoutSession, CoreError> {
    let path = path.as_ref();
    let session: WorkoutSession = read_json(path)?;
    info!("session {} loaded from {}", session.id, path.display());
    Ok(session)
}

/// Load a recorded sample stream (JSON array) for replay.
pub fn load_recording<P: AsRef<Path>>(path: P) -> Result<Vec<WorkoutSample>, CoreError> {
    let path = path.as_ref();
    let samples: Vec<WorkoutSample> = read_json(path)?;
    info!("recording loaded from {} ({} samples)", path.display(), samples.len());
    Ok(samples)
}
