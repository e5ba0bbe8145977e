//! Interpretação dos registros profissionais (CRM e COREN)
//!
//! Os códigos são lidos por padrão com grupos nomeados em vez de posições
//! fixas de caracteres. Qualquer entrada fora do formato documentado é
//! rejeitada.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::tables::{is_valid_coren_category, is_valid_uf};
use super::ValidationError;

/// Formato `CRM/UF NNNNNN`
static CRM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:CRM)/(?P<uf>[A-Za-z]{2}) (?P<number>[0-9]{6})$")
        .expect("padrão de CRM inválido")
});

/// Formato `COREN-UF NNNNNN-CATEGORIA`
static COREN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i:COREN)-(?P<uf>[A-Za-z]{2}) (?P<number>[0-9]{6})-(?P<category>[A-Za-z]+)$",
    )
    .expect("padrão de COREN inválido")
});

/// Registro no Conselho Regional de Medicina
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrmNumber {
    /// Sigla da UF em maiúsculas
    pub uf: String,
    /// Número de inscrição (6 dígitos)
    pub number: String,
}

impl CrmNumber {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let caps = CRM_PATTERN
            .captures(value)
            .ok_or(ValidationError::InvalidCrm)?;

        let uf = caps["uf"].to_ascii_uppercase();
        if !is_valid_uf(&uf) {
            return Err(ValidationError::InvalidCrm);
        }

        Ok(Self {
            uf,
            number: caps["number"].to_string(),
        })
    }
}

impl FromStr for CrmNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CrmNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CRM/{} {}", self.uf, self.number)
    }
}

/// Registro no Conselho Regional de Enfermagem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorenNumber {
    /// Sigla da UF em maiúsculas
    pub uf: String,
    /// Número de inscrição (6 dígitos)
    pub number: String,
    /// Categoria profissional em maiúsculas (ENF, TE, AE...)
    pub category: String,
}

impl CorenNumber {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let caps = COREN_PATTERN
            .captures(value)
            .ok_or(ValidationError::InvalidCoren)?;

        let uf = caps["uf"].to_ascii_uppercase();
        let category = caps["category"].to_ascii_uppercase();
        if !is_valid_uf(&uf) || !is_valid_coren_category(&category) {
            return Err(ValidationError::InvalidCoren);
        }

        Ok(Self {
            uf,
            number: caps["number"].to_string(),
            category,
        })
    }
}

impl FromStr for CorenNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CorenNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COREN-{} {}-{}", self.uf, self.number, self.category)
    }
}
