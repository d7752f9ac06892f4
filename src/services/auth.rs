// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        EmployeeRepository, SessionRepository, ShopOwnerRepository, SuperAdminRepository,
        UserRepository,
    },
    models::{
        employee::Employee,
        principal::{Claims, Guard, Principal},
        shop_owner::ShopOwner,
        super_admin::SuperAdmin,
        user::{SystemRole, User},
    },
};

// O principal resolvido de UM guard. Nunca mistura dois guards:
// cada requisição protegida carrega no máximo um destes por guard.
#[derive(Debug, Clone)]
pub enum AuthPrincipal {
    User(User),
    Employee(Employee),
    ShopOwner(ShopOwner),
    SuperAdmin(SuperAdmin),
}

impl AuthPrincipal {
    fn as_principal(&self) -> &dyn Principal {
        match self {
            AuthPrincipal::User(u) => u,
            AuthPrincipal::Employee(e) => e,
            AuthPrincipal::ShopOwner(s) => s,
            AuthPrincipal::SuperAdmin(a) => a,
        }
    }

    pub fn id(&self) -> Uuid {
        self.as_principal().id()
    }

    pub fn guard(&self) -> Guard {
        self.as_principal().guard()
    }

    pub fn is_active(&self) -> bool {
        self.as_principal().is_active()
    }

    pub fn status_label(&self) -> &'static str {
        self.as_principal().status_label()
    }
}

// Hashing de senha em thread separada (bcrypt é caro, não bloqueia o runtime)
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    let ok = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(ok)
}

// Vida útil do token; sessões mais velhas que isso são lixo
pub const TOKEN_TTL_DAYS: i64 = 7;

// Emite o JWT de uma sessão recém-criada
fn create_token(jwt_secret: &str, guard: Guard, sub: Uuid, sid: Uuid) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

    let claims = Claims {
        sub,
        guard,
        sid,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?)
}

fn decode_claims(jwt_secret: &str, token: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &validation,
    )
    .map_err(|_| AppError::InvalidToken)?;
    Ok(token_data.claims)
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    employee_repo: EmployeeRepository,
    shop_owner_repo: ShopOwnerRepository,
    super_admin_repo: SuperAdminRepository,
    session_repo: SessionRepository,
    jwt_secret: String,
    pool: sqlx::PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        employee_repo: EmployeeRepository,
        shop_owner_repo: ShopOwnerRepository,
        super_admin_repo: SuperAdminRepository,
        session_repo: SessionRepository,
        jwt_secret: String,
        pool: sqlx::PgPool,
    ) -> Self {
        Self {
            user_repo,
            employee_repo,
            shop_owner_repo,
            super_admin_repo,
            session_repo,
            jwt_secret,
            pool,
        }
    }

    // Carrega o principal do guard pelo e-mail. Cada guard consulta
    // SÓ a sua tabela.
    async fn find_by_email(
        &self,
        guard: Guard,
        email: &str,
    ) -> Result<Option<AuthPrincipal>, AppError> {
        let principal = match guard {
            Guard::User => self.user_repo.find_by_email(email).await?.map(AuthPrincipal::User),
            Guard::Employee => self
                .employee_repo
                .find_by_email(email)
                .await?
                .map(AuthPrincipal::Employee),
            Guard::ShopOwner => self
                .shop_owner_repo
                .find_by_email(email)
                .await?
                .map(AuthPrincipal::ShopOwner),
            Guard::SuperAdmin => self
                .super_admin_repo
                .find_by_email(email)
                .await?
                .map(AuthPrincipal::SuperAdmin),
        };
        Ok(principal)
    }

    async fn find_by_id(&self, guard: Guard, id: Uuid) -> Result<Option<AuthPrincipal>, AppError> {
        let principal = match guard {
            Guard::User => self.user_repo.find_by_id(id).await?.map(AuthPrincipal::User),
            Guard::Employee => self.employee_repo.find_by_id(id).await?.map(AuthPrincipal::Employee),
            Guard::ShopOwner => self
                .shop_owner_repo
                .find_by_id(id)
                .await?
                .map(AuthPrincipal::ShopOwner),
            Guard::SuperAdmin => self
                .super_admin_repo
                .find_by_id(id)
                .await?
                .map(AuthPrincipal::SuperAdmin),
        };
        Ok(principal)
    }

    // ---
    // Login de qualquer guard.
    // E-mail inexistente e senha errada produzem o MESMO erro: nada
    // de entregar qual dos dois falhou. Status barrado vem antes da
    // senha e carrega o status concreto para a mensagem.
    // ---
    pub async fn login(
        &self,
        guard: Guard,
        email: &str,
        password: &str,
        origin_ip: Option<&str>,
    ) -> Result<String, AppError> {
        let principal = self
            .find_by_email(guard, email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !principal.is_active() {
            return Err(AppError::AccountNotActive {
                guard,
                status: principal.status_label().to_string(),
            });
        }

        let password_hash = match &principal {
            AuthPrincipal::User(u) => u.password_hash.clone(),
            AuthPrincipal::Employee(e) => e.password_hash.clone(),
            AuthPrincipal::ShopOwner(s) => s.password_hash.clone(),
            AuthPrincipal::SuperAdmin(a) => a.password_hash.clone(),
        };

        if !verify_password(password, &password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        // Sessão nova a cada login: o identificador é sempre regenerado
        let session = self.session_repo.create(guard, principal.id()).await?;

        // Só o guard de usuário registra o último acesso (melhor esforço)
        if let AuthPrincipal::User(user) = &principal {
            if let Err(e) = self.user_repo.record_login(user.id, origin_ip).await {
                tracing::warn!("Falha ao registrar último login: {}", e);
            }
        }

        create_token(&self.jwt_secret, principal.guard(), principal.id(), session.id)
    }

    // ---
    // Autorização por requisição: decodifica o token, confere o guard
    // da rota, confere a sessão e RECARREGA o principal do banco para
    // reavaliar o status. Suspenso depois do login? A sessão é
    // revogada aqui (logout forçado) e a requisição falha.
    // ---
    pub async fn authorize(
        &self,
        required_guard: Guard,
        token: &str,
    ) -> Result<(AuthPrincipal, Uuid), AppError> {
        let claims = decode_claims(&self.jwt_secret, token)?;

        if claims.guard != required_guard {
            return Err(AppError::InvalidToken);
        }

        let session = self
            .session_repo
            .find_by_id(claims.sid)
            .await?
            .ok_or(AppError::InvalidToken)?;
        if session.is_revoked() {
            return Err(AppError::InvalidToken);
        }

        let principal = self
            .find_by_id(claims.guard, claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !principal.is_active() {
            // Logout forçado: a sessão morre junto com o acesso
            self.session_repo.revoke(session.id).await?;
            return Err(AppError::AccountNotActive {
                guard: required_guard,
                status: principal.status_label().to_string(),
            });
        }

        Ok((principal, session.id))
    }

    // Invalida apenas a sessão do guard que está agindo
    pub async fn logout(&self, session_id: Uuid) -> Result<(), AppError> {
        self.session_repo.revoke(session_id).await
    }

    // Auto-cadastro de usuário (cliente): nasce ativo e já logado.
    pub async fn register_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let hashed_password = hash_password(password).await?;

        let new_user = self
            .user_repo
            .create_user(
                &self.pool,
                "",
                "",
                email,
                &hashed_password,
                SystemRole::Staff,
                false,
            )
            .await?;

        let session = self.session_repo.create(Guard::User, new_user.id).await?;
        create_token(&self.jwt_secret, Guard::User, new_user.id, session.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip_preserva_guard_e_sessao() {
        let sub = Uuid::new_v4();
        let sid = Uuid::new_v4();
        let token = create_token("segredo-de-teste", Guard::ShopOwner, sub, sid).unwrap();

        let claims = decode_claims("segredo-de-teste", &token).unwrap();
        assert_eq!(claims.sub, sub);
        assert_eq!(claims.sid, sid);
        assert_eq!(claims.guard, Guard::ShopOwner);
    }

    #[test]
    fn token_com_segredo_errado_e_rejeitado() {
        let token =
            create_token("segredo-de-teste", Guard::User, Uuid::new_v4(), Uuid::new_v4()).unwrap();
        let result = decode_claims("outro-segredo", &token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn guards_distintos_nunca_se_confundem() {
        // O mesmo sub com guards diferentes gera claims diferentes;
        // a checagem de guard na autorização barra o cruzamento.
        let sub = Uuid::new_v4();
        let token = create_token("s", Guard::SuperAdmin, sub, Uuid::new_v4()).unwrap();
        let claims = decode_claims("s", &token).unwrap();
        assert_ne!(claims.guard, Guard::ShopOwner);
        assert_eq!(claims.guard, Guard::SuperAdmin);
    }

    // --- Testes contra o banco (migrações aplicadas pelo sqlx::test) ---

    use crate::models::status::AccountStatus;
    use sqlx::PgPool;

    fn auth_service(pool: &PgPool) -> AuthService {
        AuthService::new(
            UserRepository::new(pool.clone()),
            EmployeeRepository::new(pool.clone()),
            ShopOwnerRepository::new(pool.clone()),
            SuperAdminRepository::new(pool.clone()),
            SessionRepository::new(pool.clone()),
            "segredo-de-teste".to_string(),
            pool.clone(),
        )
    }

    async fn seed_admin(pool: &PgPool, email: &str, password: &str) -> SuperAdmin {
        let password_hash = hash_password(password).await.unwrap();
        sqlx::query_as::<_, SuperAdmin>(
            "INSERT INTO super_admins (name, email, password_hash) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind("Operador de Teste")
        .bind(email)
        .bind(&password_hash)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test]
    async fn senha_errada_e_email_desconhecido_dao_o_mesmo_erro(pool: PgPool) {
        let svc = auth_service(&pool);
        seed_admin(&pool, "op@plataforma.example", "senha-correta").await;

        let senha_errada = svc
            .login(Guard::SuperAdmin, "op@plataforma.example", "senha-errada", None)
            .await
            .unwrap_err();
        let email_desconhecido = svc
            .login(Guard::SuperAdmin, "ninguem@plataforma.example", "tanto-faz", None)
            .await
            .unwrap_err();

        // Nada na resposta pode entregar qual dos dois falhou
        assert!(matches!(senha_errada, AppError::InvalidCredentials));
        assert!(matches!(email_desconhecido, AppError::InvalidCredentials));
        assert_eq!(senha_errada.to_string(), email_desconhecido.to_string());
    }

    #[sqlx::test]
    async fn suspensao_no_meio_da_sessao_derruba_a_proxima_requisicao(pool: PgPool) {
        let svc = auth_service(&pool);
        let admin = seed_admin(&pool, "op@plataforma.example", "senha-correta").await;

        let token = svc
            .login(Guard::SuperAdmin, "op@plataforma.example", "senha-correta", None)
            .await
            .unwrap();
        svc.authorize(Guard::SuperAdmin, &token).await.unwrap();

        // Suspenso DEPOIS do login: o token ainda é criptograficamente válido
        SuperAdminRepository::new(pool.clone())
            .set_status(admin.id, AccountStatus::Suspended)
            .await
            .unwrap();

        let err = svc.authorize(Guard::SuperAdmin, &token).await.unwrap_err();
        assert!(matches!(err, AppError::AccountNotActive { .. }));

        // O logout foi forçado: a sessão morreu junto com o acesso
        let err = svc.authorize(Guard::SuperAdmin, &token).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[sqlx::test]
    async fn cada_login_gera_uma_sessao_nova(pool: PgPool) {
        let svc = auth_service(&pool);
        seed_admin(&pool, "op@plataforma.example", "senha-correta").await;

        let primeiro = svc
            .login(Guard::SuperAdmin, "op@plataforma.example", "senha-correta", None)
            .await
            .unwrap();
        let segundo = svc
            .login(Guard::SuperAdmin, "op@plataforma.example", "senha-correta", None)
            .await
            .unwrap();

        let sid_1 = decode_claims("segredo-de-teste", &primeiro).unwrap().sid;
        let sid_2 = decode_claims("segredo-de-teste", &segundo).unwrap().sid;
        assert_ne!(sid_1, sid_2);

        // Encerrar a segunda sessão não afeta a primeira
        svc.logout(sid_2).await.unwrap();
        assert!(svc.authorize(Guard::SuperAdmin, &segundo).await.is_err());
        assert!(svc.authorize(Guard::SuperAdmin, &primeiro).await.is_ok());
    }
}
