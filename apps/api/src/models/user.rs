use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The user a request is acting for, as resolved from the identity
/// provider's session tables.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
}
