//! Store-tree layout.
//!
//! All knowledge of where things live in the document tree is concentrated
//! here. Caller-supplied identifiers go through path validation, so a
//! malicious uid cannot address a foreign subtree; the resulting rejection
//! is a request-level validation error, not a store fault.

use arena_store::StorePath;
use shared_types::WorkflowError;

/// Append a trusted literal segment.
fn literal(path: StorePath, segment: &'static str) -> StorePath {
    path.child(segment).expect("literal segment is valid")
}

/// Append a caller-supplied identifier, mapping rejection to a 400.
fn id_segment(path: StorePath, id: &str) -> Result<StorePath, WorkflowError> {
    path.child(id)
        .map_err(|_| WorkflowError::Validation(format!("Invalid identifier: {id}")))
}

/// `users`
pub fn users() -> StorePath {
    literal(StorePath::root(), "users")
}

/// `users/{uid}`
pub fn user(uid: &str) -> Result<StorePath, WorkflowError> {
    id_segment(users(), uid)
}

/// `users/{uid}/wallet/greenDiamondBalance`
pub fn balance(uid: &str) -> Result<StorePath, WorkflowError> {
    Ok(literal(literal(user(uid)?, "wallet"), "greenDiamondBalance"))
}

/// `walletHistory/{uid}`
pub fn history(uid: &str) -> Result<StorePath, WorkflowError> {
    id_segment(literal(StorePath::root(), "walletHistory"), uid)
}

/// `tournaments`
pub fn tournaments() -> StorePath {
    literal(StorePath::root(), "tournaments")
}

/// `tournaments/{tid}`
pub fn tournament(tid: &str) -> Result<StorePath, WorkflowError> {
    id_segment(tournaments(), tid)
}

/// `tournaments/{tid}/participants/{uid}`
pub fn participant(tid: &str, uid: &str) -> Result<StorePath, WorkflowError> {
    id_segment(literal(tournament(tid)?, "participants"), uid)
}
