use serde::{Deserialize, Serialize};

/// One row of the `/players` listing, exactly as the server returns it.
/// `avg_score` comes back as `null` until the player has received a vote.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub is_admin: bool,
    pub votes: i64,
    pub avg_score: Option<f64>,
}
