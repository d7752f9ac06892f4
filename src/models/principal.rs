// src/models/principal.rs

use serde::{Deserialize, Serialize};
use validator::Validate;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// Guard: o contexto de autenticação de UM tipo de principal.
// Cada guard tem a sua própria tabela, o seu próprio namespace de
// sessões e nunca se mistura com os outros numa mesma verificação.
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    User,
    Employee,
    ShopOwner,
    SuperAdmin,
}

impl Guard {
    pub fn as_str(self) -> &'static str {
        match self {
            Guard::User => "user",
            Guard::Employee => "employee",
            Guard::ShopOwner => "shop_owner",
            Guard::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// A capacidade comum aos quatro tipos: cada um sabe a que guard
// pertence e se o seu status permite autenticar. É a única coisa
// partilhada — os campos de cada tipo não têm nada em comum.
pub trait Principal {
    fn id(&self) -> Uuid;
    fn guard(&self) -> Guard;
    fn is_active(&self) -> bool;
    fn status_label(&self) -> &'static str;
}

// Estrutura de dados ("claims") dentro do JWT.
// `sid` referencia a linha em `sessions`: um novo id a cada login.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,    // ID do principal
    pub guard: Guard, // a que guard este token pertence
    pub sid: Uuid,    // ID da sessão server-side
    pub exp: usize,   // Expiration time
    pub iat: usize,   // Issued At
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Dados para login (igual para os quatro guards)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}
