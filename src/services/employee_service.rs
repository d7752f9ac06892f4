// src/services/employee_service.rs

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{employee_repo::NewEmployee, EmployeeRepository, UserRepository},
    models::{
        audit::AuditEntry,
        employee::{CreateEmployeePayload, Employee, ProvisionedEmployee},
        shop_owner::ShopOwner,
        status::{AccountStatus, EmployeeStatus},
    },
    services::{audit_service::AuditService, auth::hash_password},
};

const TEMP_PASSWORD_LEN: usize = 10;

// Divide o nome completo em (primeiro, resto). O resto pode ser vazio
// ("Madonna" -> ("Madonna", "")), nunca nulo.
fn split_full_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or("").to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

// Senha temporária aleatória de 10 caracteres alfanuméricos
fn generate_temp_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMP_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

#[derive(Clone)]
pub struct EmployeeService {
    employee_repo: EmployeeRepository,
    user_repo: UserRepository,
    audit_service: AuditService,
    pool: PgPool,
}

impl EmployeeService {
    pub fn new(
        employee_repo: EmployeeRepository,
        user_repo: UserRepository,
        audit_service: AuditService,
        pool: PgPool,
    ) -> Self {
        Self {
            employee_repo,
            user_repo,
            audit_service,
            pool,
        }
    }

    // ---
    // Provisionamento: cria o par (Employee, User) como UMA unidade.
    // O chamador já chegou aqui autenticado pelo guard de dono de loja.
    // ---
    pub async fn provision(
        &self,
        owner: &ShopOwner,
        payload: &CreateEmployeePayload,
    ) -> Result<ProvisionedEmployee, AppError> {
        // 1. Pré-checagem de unicidade ANTES de qualquer escrita.
        //    É cortesia para a mensagem de erro: a garantia real contra
        //    corridas é a constraint única do banco, logo abaixo.
        if self
            .employee_repo
            .find_by_email_any(&payload.email)
            .await?
            .is_some()
        {
            return Err(AppError::EmailAlreadyEmployee);
        }
        if self.user_repo.find_by_email(&payload.email).await?.is_some() {
            return Err(AppError::EmailAlreadyUser);
        }

        // 2. Credencial temporária: devolvida uma única vez em texto
        //    claro, persistida só como hash.
        let temp_password = generate_temp_password();
        let password_hash = hash_password(&temp_password).await?;

        let name = payload.name.trim();
        let (first_name, last_name) = split_full_name(name);

        // --- INÍCIO DA TRANSAÇÃO ---
        // Os dois INSERTs acontecem juntos ou nenhum acontece.
        let mut tx = self.pool.begin().await?;

        let employee = self
            .employee_repo
            .create(
                &mut *tx,
                NewEmployee {
                    shop_owner_id: owner.id,
                    name,
                    email: &payload.email,
                    password_hash: &password_hash,
                    phone: payload.phone.as_deref(),
                    address: payload.address.as_deref(),
                    position: payload.position.as_deref(),
                    department: payload.department.as_deref(),
                    branch: payload.branch.as_deref(),
                    functional_role: payload.functional_role,
                    salary: payload.salary.unwrap_or(Decimal::ZERO),
                    hire_date: payload.hire_date.unwrap_or_else(|| Utc::now().date_naive()),
                    status: payload.status.unwrap_or(EmployeeStatus::Active),
                },
            )
            .await?; // Se falhar aqui, nada foi escrito

        // A mesma credencial temporária vale para os dois registros do par
        let user = self
            .user_repo
            .create_user(
                &mut *tx,
                &first_name,
                &last_name,
                &payload.email,
                &password_hash,
                payload.role,
                true, // troca de senha obrigatória no primeiro acesso
            )
            .await?; // Se falhar aqui, o funcionário criado acima é desfeito

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        // 3. Auditoria DEPOIS do commit, melhor esforço: uma falha aqui
        //    jamais desfaz ou contamina o provisionamento.
        self.audit_service.record(AuditEntry {
            shop_owner_id: Some(owner.id),
            actor_user_id: None,
            action: "employee_created",
            target_type: "employee",
            target_id: Some(employee.id),
            metadata: json!({
                "assigned_role": payload.role.as_str(),
                "employee_email": payload.email,
                "functional_role": payload.functional_role.map(|r| r.as_str()),
                "branch": payload.branch,
            }),
        });

        Ok(ProvisionedEmployee {
            employee_id: employee.id,
            name: employee.name,
            email: employee.email,
            user_id: user.id,
            temporary_password: temp_password,
        })
    }

    pub async fn list(&self, owner: &ShopOwner) -> Result<Vec<Employee>, AppError> {
        self.employee_repo.list_for_owner(owner.id).await
    }

    // Mudança de status validada pelo ciclo de vida (livre entre os
    // três valores; mesmo status é no-op).
    pub async fn update_status(
        &self,
        owner: &ShopOwner,
        employee_id: Uuid,
        new_status: EmployeeStatus,
    ) -> Result<Employee, AppError> {
        let current = self
            .employee_repo
            .find_by_id(employee_id)
            .await?
            .filter(|e| e.shop_owner_id == owner.id)
            .ok_or(AppError::NotFound)?;

        if current.status == new_status {
            return Ok(current);
        }
        if !current.status.can_transition_to(new_status) {
            return Err(AppError::InvalidStatusTransition {
                from: current.status.to_string(),
                to: new_status.to_string(),
            });
        }

        let updated = self
            .employee_repo
            .update_status(employee_id, owner.id, new_status)
            .await?;

        self.audit_service.record(AuditEntry {
            shop_owner_id: Some(owner.id),
            actor_user_id: None,
            action: "employee_status_changed",
            target_type: "employee",
            target_id: Some(employee_id),
            metadata: json!({
                "from": current.status.as_str(),
                "to": new_status.as_str(),
            }),
        });

        Ok(updated)
    }

    // Desligamento: soft-delete do funcionário + credencial inativada,
    // os dois na mesma transação.
    pub async fn remove(&self, owner: &ShopOwner, employee_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let employee = self
            .employee_repo
            .soft_delete(&mut *tx, employee_id, owner.id)
            .await?;

        self.user_repo
            .set_status_by_email(&mut *tx, &employee.email, AccountStatus::Inactive)
            .await?;

        tx.commit().await?;

        self.audit_service.record(AuditEntry {
            shop_owner_id: Some(owner.id),
            actor_user_id: None,
            action: "employee_removed",
            target_type: "employee",
            target_id: Some(employee_id),
            metadata: json!({ "employee_email": employee.email }),
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn nome_composto_divide_no_primeiro_espaco() {
        assert_eq!(
            split_full_name("Juan Dela Cruz"),
            ("Juan".to_string(), "Dela Cruz".to_string())
        );
    }

    #[test]
    fn nome_unico_fica_sem_sobrenome() {
        // Vazio, não nulo
        assert_eq!(split_full_name("Madonna"), ("Madonna".to_string(), String::new()));
    }

    #[test]
    fn espacos_extras_nao_entram_no_nome() {
        assert_eq!(
            split_full_name("  Maria   da  Silva "),
            ("Maria".to_string(), "da Silva".to_string())
        );
        assert_eq!(split_full_name(""), (String::new(), String::new()));
    }

    #[test]
    fn senha_temporaria_tem_dez_caracteres_alfanumericos() {
        let password = generate_temp_password();
        assert_eq!(password.len(), 10);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn senhas_temporarias_nao_colidem_em_mil_tentativas() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_temp_password()), "senha repetida");
        }
    }

    // --- Testes contra o banco (migrações aplicadas pelo sqlx::test) ---

    use crate::{
        db::{shop_owner_repo::NewShopOwner, AuditRepository, ShopOwnerRepository},
        models::{shop_owner::WeeklySchedule, user::SystemRole},
    };

    fn service(pool: &PgPool) -> EmployeeService {
        EmployeeService::new(
            EmployeeRepository::new(pool.clone()),
            UserRepository::new(pool.clone()),
            AuditService::new(AuditRepository::new(pool.clone())),
            pool.clone(),
        )
    }

    async fn seed_owner(pool: &PgPool) -> ShopOwner {
        ShopOwnerRepository::new(pool.clone())
            .create(NewShopOwner {
                first_name: "Ana",
                last_name: "Souza",
                email: "ana@loja.example",
                password_hash: "$2b$04$hash.fixo.de.teste.sem.uso",
                business_name: "Loja da Ana",
                business_address: "Rua A, 1",
                business_type: "varejo",
                registration_type: "mei",
                operating_hours: WeeklySchedule::default(),
            })
            .await
            .unwrap()
    }

    fn provision_payload(name: &str, email: &str) -> CreateEmployeePayload {
        CreateEmployeePayload {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
            position: None,
            department: None,
            branch: None,
            functional_role: None,
            salary: None,
            hire_date: None,
            status: None,
            role: SystemRole::Hr,
        }
    }

    async fn count_by_email(pool: &PgPool, table: &str, email: &str) -> i64 {
        let (count,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM {} WHERE email = $1", table))
                .bind(email)
                .fetch_one(pool)
                .await
                .unwrap();
        count
    }

    #[sqlx::test]
    async fn provisionar_cria_o_par_ligado_pelo_email(pool: PgPool) {
        let svc = service(&pool);
        let owner = seed_owner(&pool).await;

        let result = svc
            .provision(&owner, &provision_payload("  Juan Dela Cruz ", "juan@loja.example"))
            .await
            .unwrap();

        assert_eq!(result.temporary_password.len(), 10);
        // O nome entra aparado, mesmo que o chamador mande espaços
        assert_eq!(result.name, "Juan Dela Cruz");

        let user = UserRepository::new(pool.clone())
            .find_by_email("juan@loja.example")
            .await
            .unwrap()
            .expect("credencial do par deveria existir");
        assert_eq!(user.id, result.user_id);
        assert_eq!(user.first_name, "Juan");
        assert_eq!(user.last_name, "Dela Cruz");
        assert!(user.force_password_change);

        assert_eq!(count_by_email(&pool, "employees", "juan@loja.example").await, 1);
        assert_eq!(count_by_email(&pool, "users", "juan@loja.example").await, 1);
    }

    #[sqlx::test]
    async fn email_ja_de_funcionario_nao_cria_registro_algum(pool: PgPool) {
        let svc = service(&pool);
        let owner = seed_owner(&pool).await;
        svc.provision(&owner, &provision_payload("Juan Dela Cruz", "juan@loja.example"))
            .await
            .unwrap();

        let err = svc
            .provision(&owner, &provision_payload("Outro Juan", "juan@loja.example"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EmailAlreadyEmployee));
        assert_eq!(count_by_email(&pool, "employees", "juan@loja.example").await, 1);
        assert_eq!(count_by_email(&pool, "users", "juan@loja.example").await, 1);
    }

    #[sqlx::test]
    async fn email_ja_de_usuario_nao_cria_registro_algum(pool: PgPool) {
        let svc = service(&pool);
        let owner = seed_owner(&pool).await;
        UserRepository::new(pool.clone())
            .create_user(
                &pool,
                "Cliente",
                "Antigo",
                "cliente@example.com",
                "$2b$04$hash.fixo.de.teste.sem.uso",
                SystemRole::Staff,
                false,
            )
            .await
            .unwrap();

        let err = svc
            .provision(&owner, &provision_payload("Novo Funcionario", "cliente@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EmailAlreadyUser));
        assert_eq!(count_by_email(&pool, "employees", "cliente@example.com").await, 0);
        assert_eq!(count_by_email(&pool, "users", "cliente@example.com").await, 1);
    }

    // A pré-checagem é cortesia; a garantia contra corridas é a
    // transação + constraint. Reproduz a corrida no nível do repositório:
    // o primeiro INSERT passa, o segundo bate na constraint e o
    // rollback não pode deixar o funcionário para trás.
    #[sqlx::test]
    async fn falha_na_segunda_escrita_nao_deixa_funcionario_para_tras(pool: PgPool) {
        let owner = seed_owner(&pool).await;
        let employee_repo = EmployeeRepository::new(pool.clone());
        let user_repo = UserRepository::new(pool.clone());

        user_repo
            .create_user(
                &pool,
                "Cliente",
                "Concorrente",
                "corrida@example.com",
                "$2b$04$hash.fixo.de.teste.sem.uso",
                SystemRole::Staff,
                false,
            )
            .await
            .unwrap();

        let mut tx = pool.begin().await.unwrap();
        employee_repo
            .create(
                &mut *tx,
                NewEmployee {
                    shop_owner_id: owner.id,
                    name: "Em Corrida",
                    email: "corrida@example.com",
                    password_hash: "$2b$04$hash.fixo.de.teste.sem.uso",
                    phone: None,
                    address: None,
                    position: None,
                    department: None,
                    branch: None,
                    functional_role: None,
                    salary: Decimal::ZERO,
                    hire_date: Utc::now().date_naive(),
                    status: EmployeeStatus::Active,
                },
            )
            .await
            .unwrap();

        let err = user_repo
            .create_user(
                &mut *tx,
                "Em",
                "Corrida",
                "corrida@example.com",
                "$2b$04$hash.fixo.de.teste.sem.uso",
                SystemRole::Hr,
                true,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyUser));
        tx.rollback().await.unwrap();

        assert_eq!(count_by_email(&pool, "employees", "corrida@example.com").await, 0);
    }

    #[sqlx::test]
    async fn falha_na_auditoria_nao_contamina_o_provisionamento(pool: PgPool) {
        let svc = service(&pool);
        let owner = seed_owner(&pool).await;

        // Sem a tabela, a task de auditoria só consegue falhar
        sqlx::query("DROP TABLE audit_logs").execute(&pool).await.unwrap();

        let result = svc
            .provision(&owner, &provision_payload("Juan Dela Cruz", "juan@loja.example"))
            .await
            .expect("a auditoria é melhor esforço, o provisionamento não pode falhar");

        assert_eq!(result.temporary_password.len(), 10);
        assert_eq!(count_by_email(&pool, "employees", "juan@loja.example").await, 1);
        assert_eq!(count_by_email(&pool, "users", "juan@loja.example").await, 1);
    }
}
