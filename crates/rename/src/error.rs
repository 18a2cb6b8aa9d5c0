use quill_primitives::SessionId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenameError {
	#[error("rename {active} is already in progress")]
	SessionAlreadyActive { active: SessionId },
	#[error("no rename session is active")]
	NoActiveSession,
	#[error("{session} has already ended")]
	SessionEnded { session: SessionId },
}

pub type Result<T, E = RenameError> = std::result::Result<T, E>;
