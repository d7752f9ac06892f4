use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::principal::Guard;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    // Autenticado, mas o status da conta não permite acesso.
    // Guardamos o guard e o status para escolher a mensagem certa.
    #[error("Conta não ativa ({guard}: {status})")]
    AccountNotActive { guard: Guard, status: String },

    #[error("E-mail já cadastrado como funcionário")]
    EmailAlreadyEmployee,

    #[error("E-mail já cadastrado como usuário")]
    EmailAlreadyUser,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Registro não encontrado")]
    NotFound,

    // Fallback para outras chaves únicas violadas no banco
    #[error("Violação de chave única: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// Mensagem amigável por guard + status. O princípio: o utilizador sabe
// POR QUE foi barrado, mas nunca vê texto interno de exceção.
fn account_not_active_message(guard: Guard, status: &str) -> String {
    match (guard, status) {
        (Guard::ShopOwner, "pending") => {
            "O seu cadastro ainda está em análise. Aguarde a aprovação.".to_string()
        }
        (Guard::ShopOwner, "rejected") => {
            "O seu cadastro foi rejeitado. Entre em contato com o suporte.".to_string()
        }
        (_, "suspended") => "A sua conta está suspensa.".to_string(),
        (_, "on_leave") => "A sua conta está afastada (licença).".to_string(),
        _ => "A sua conta não está ativa.".to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }

            AppError::AccountNotActive { guard, status } => {
                let body = Json(json!({
                    "error": account_not_active_message(guard, &status),
                    "status": status,
                }));
                return (StatusCode::FORBIDDEN, body).into_response();
            }

            // Mesma resposta para e-mail inexistente e senha errada:
            // não entregamos qual dos dois falhou.
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::EmailAlreadyEmployee => (
                StatusCode::CONFLICT,
                "Este e-mail já está em uso por um funcionário.".to_string(),
            ),
            AppError::EmailAlreadyUser => (
                StatusCode::CONFLICT,
                "Este e-mail já está em uso por um usuário.".to_string(),
            ),
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidStatusTransition { from, to } => (
                StatusCode::CONFLICT,
                format!("Não é possível mudar o status de '{}' para '{}'.", from, to),
            ),
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, "Registro não encontrado.".to_string())
            }
            AppError::UniqueConstraintViolation(_) => (
                StatusCode::CONFLICT,
                "Já existe um registro com esses dados.".to_string(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente vê só o genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado. Tente novamente.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_pendente_tem_mensagem_propria() {
        let msg = account_not_active_message(Guard::ShopOwner, "pending");
        assert!(msg.contains("em análise"));
        let msg = account_not_active_message(Guard::ShopOwner, "rejected");
        assert!(msg.contains("rejeitado"));
    }

    #[test]
    fn suspensao_vale_para_qualquer_guard() {
        for guard in [Guard::User, Guard::Employee, Guard::SuperAdmin] {
            let msg = account_not_active_message(guard, "suspended");
            assert!(msg.contains("suspensa"));
        }
    }
}
