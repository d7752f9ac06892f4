// src/services/audit_service.rs

use crate::{
    common::error::AppError,
    db::AuditRepository,
    models::audit::{AuditEntry, AuditLog},
};

// ---
// Gravador de auditoria: melhor esforço, nunca derruba quem chamou.
// A escrita roda numa task destacada, DEPOIS do commit da operação
// que a disparou. Falha vira warn no log e mais nada.
// ---
#[derive(Clone)]
pub struct AuditService {
    audit_repo: AuditRepository,
}

impl AuditService {
    pub fn new(audit_repo: AuditRepository) -> Self {
        Self { audit_repo }
    }

    // Fire-and-forget: devolve imediatamente, sem Result.
    pub fn record(&self, entry: AuditEntry) {
        let repo = self.audit_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.insert(&entry).await {
                tracing::warn!(
                    action = entry.action,
                    "Falha ao gravar auditoria (ignorada): {}",
                    e
                );
            }
        });
    }

    // Leitura normal, com Result: aqui falha é falha.
    pub async fn recent(&self, limit: i64) -> Result<Vec<AuditLog>, AppError> {
        self.audit_repo.list_recent(limit).await
    }
}
