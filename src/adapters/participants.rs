use crate::core::{Participant, Result};
use crate::utils::error::SantaError;
use crate::utils::validation::has_extension;
use std::fs;
use std::path::Path;

pub const DEFAULT_INPUT_PATH: &str = "data.json";

/// Reads a JSON array of participants from `path`.
pub fn load_participants(path: &Path) -> Result<Vec<Participant>> {
    let path_label = path.display().to_string();

    if !path.exists() {
        return Err(SantaError::InputNotFound { path: path_label });
    }
    if !has_extension(path, &["json"]) {
        return Err(SantaError::UnsupportedInputFormat { path: path_label });
    }

    let raw = fs::read(path)?;
    let participants = parse_participants(&raw)?;
    tracing::debug!("Loaded {} participants from {}", participants.len(), path_label);

    Ok(participants)
}

pub fn parse_participants(raw: &[u8]) -> Result<Vec<Participant>> {
    let participants: Vec<Participant> = serde_json::from_slice(raw)?;

    if participants.is_empty() {
        return Err(SantaError::EmptyParticipants);
    }

    for (index, participant) in participants.iter().enumerate() {
        if participant.name.trim().is_empty() {
            return Err(SantaError::InvalidParticipant {
                index,
                reason: "name is empty".to_string(),
            });
        }
        if participant.email.trim().is_empty() {
            return Err(SantaError::InvalidParticipant {
                index,
                reason: format!("{} has no email", participant.name),
            });
        }
    }

    Ok(participants)
}
