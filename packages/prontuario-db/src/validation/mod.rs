//! Validação dos cadastros antes da gravação
//!
//! As regras são aplicadas em ordem fixa por entidade e a primeira falha
//! interrompe a verificação:
//! 1. nomes
//! 2. telefones
//! 3. faixa de idade
//! 4. CPF
//! 5. identificador específico (CRM, COREN ou RG)
//! 6. email, quando informado

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub mod license;
mod records;
pub mod rules;
pub mod tables;

pub use license::{CorenNumber, CrmNumber};

/// Campo de nome sendo validado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    Name,
    MotherName,
    FatherName,
    SectorName,
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameField::Name => write!(f, "nome"),
            NameField::MotherName => write!(f, "nome da mãe"),
            NameField::FatherName => write!(f, "nome do pai"),
            NameField::SectorName => write!(f, "nome do setor"),
        }
    }
}

/// Campo de telefone sendo validado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneField {
    Phone,
    PrimaryPhone,
    SecondaryPhone,
}

impl fmt::Display for PhoneField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhoneField::Phone => write!(f, "telefone"),
            PhoneField::PrimaryPhone => write!(f, "telefone principal"),
            PhoneField::SecondaryPhone => write!(f, "telefone secundário"),
        }
    }
}

/// Motivo da rejeição de um cadastro
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("O {0} precisa ter ao menos 3 caracteres")]
    NameTooShort(NameField),

    #[error("O {0} deve conter apenas letras e espaços")]
    NameNotAlphabetic(NameField),

    #[error("O {0} é inválido")]
    InvalidPhone(PhoneField),

    #[error("Idade inválida: {age} anos (permitido de {min} a {max})")]
    InvalidAge { age: i32, min: i32, max: i32 },

    #[error("CPF inválido")]
    InvalidCpf,

    #[error("RG inválido")]
    InvalidRg,

    #[error("CRM inválido (formato esperado: CRM/UF NNNNNN)")]
    InvalidCrm,

    #[error("COREN inválido (formato esperado: COREN-UF NNNNNN-CATEGORIA)")]
    InvalidCoren,

    #[error("Email inválido")]
    InvalidEmail,
}

/// Cadastros que podem ser validados antes da gravação
pub trait Validate {
    /// Valida o cadastro usando `today` como data corrente
    fn validate_at(&self, today: NaiveDate) -> Result<(), ValidationError>;

    /// Valida o cadastro usando a data de hoje
    fn validate(&self) -> Result<(), ValidationError> {
        self.validate_at(Utc::now().date_naive())
    }
}
