// src/models/status.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

// ---
// Ciclo de vida de status por tipo de principal.
// Cada tipo tem o seu próprio conjunto de valores e as suas próprias
// transições permitidas. O predicado central é `is_active`: só ele
// decide se a conta pode autenticar.
// ---

// Status do dono de loja: nasce "pending", um administrador decide.
// Depois de decidido, é terminal (sem voltar atrás pela aplicação).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
pub enum ShopOwnerStatus {
    Pending,
    Approved,
    Rejected,
}

impl ShopOwnerStatus {
    pub fn is_active(self) -> bool {
        self == ShopOwnerStatus::Approved
    }

    // Só "pending" pode ser decidido. Aprovado/rejeitado são terminais.
    pub fn can_transition_to(self, next: ShopOwnerStatus) -> bool {
        matches!(
            (self, next),
            (ShopOwnerStatus::Pending, ShopOwnerStatus::Approved)
                | (ShopOwnerStatus::Pending, ShopOwnerStatus::Rejected)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShopOwnerStatus::Pending => "pending",
            ShopOwnerStatus::Approved => "approved",
            ShopOwnerStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ShopOwnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Status de funcionário: o dono da loja alterna livremente entre os três.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    pub fn is_active(self) -> bool {
        self == EmployeeStatus::Active
    }

    // Livre e bidirecional entre os três valores.
    pub fn can_transition_to(self, next: EmployeeStatus) -> bool {
        self != next
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::OnLeave => "on_leave",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Status de conta para User e SuperAdmin.
// active <-> suspended é livre (ação de administrador); "inactive" é
// o desligamento definitivo (flip no soft-delete do funcionário).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Suspended,
    Inactive,
}

impl AccountStatus {
    pub fn is_active(self) -> bool {
        self == AccountStatus::Active
    }

    pub fn can_transition_to(self, next: AccountStatus) -> bool {
        matches!(
            (self, next),
            (AccountStatus::Active, AccountStatus::Suspended)
                | (AccountStatus::Suspended, AccountStatus::Active)
                | (AccountStatus::Active, AccountStatus::Inactive)
                | (AccountStatus::Suspended, AccountStatus::Inactive)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Suspended => "suspended",
            AccountStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn somente_approved_autentica_dono_de_loja() {
        assert!(!ShopOwnerStatus::Pending.is_active());
        assert!(ShopOwnerStatus::Approved.is_active());
        assert!(!ShopOwnerStatus::Rejected.is_active());
    }

    #[test]
    fn somente_active_autentica_funcionario() {
        assert!(EmployeeStatus::Active.is_active());
        assert!(!EmployeeStatus::Inactive.is_active());
        assert!(!EmployeeStatus::OnLeave.is_active());
    }

    #[test]
    fn somente_active_autentica_conta() {
        assert!(AccountStatus::Active.is_active());
        assert!(!AccountStatus::Suspended.is_active());
        assert!(!AccountStatus::Inactive.is_active());
    }

    #[test]
    fn aprovacao_so_sai_de_pending() {
        use ShopOwnerStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        // Terminais: nenhuma saída
        for from in [Approved, Rejected] {
            for to in [Pending, Approved, Rejected] {
                assert!(!from.can_transition_to(to), "{from} -> {to} deveria ser proibido");
            }
        }
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn funcionario_transita_livremente() {
        use EmployeeStatus::*;
        for from in [Active, Inactive, OnLeave] {
            for to in [Active, Inactive, OnLeave] {
                assert_eq!(from.can_transition_to(to), from != to);
            }
        }
    }

    #[test]
    fn conta_alterna_entre_active_e_suspended() {
        use AccountStatus::*;
        assert!(Active.can_transition_to(Suspended));
        assert!(Suspended.can_transition_to(Active));
        assert!(Active.can_transition_to(Inactive));
        // inactive é terminal
        assert!(!Inactive.can_transition_to(Active));
        assert!(!Inactive.can_transition_to(Suspended));
    }
}
