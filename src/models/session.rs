// src/models/session.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

// Sessão server-side por login. O `id` vai dentro do JWT (claim `sid`)
// e é gerado de novo a cada login. Revogar a linha invalida o token
// antes da expiração (logout normal ou logout forçado).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,
    pub guard: String,
    pub principal_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}
