use bson::oid::ObjectId;

use crate::errors::AppError;

/// Parses a hex entity id, rejecting malformed input as a validation error.
pub fn parse_id(s: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(s).map_err(|_| AppError::Validation(format!("invalid id: {s}")))
}
