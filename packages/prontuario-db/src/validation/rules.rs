//! Regras de validação por campo
//!
//! Cada função verifica um único campo e devolve o primeiro motivo de falha
//! encontrado. Nenhuma delas realiza I/O nem altera a entrada.

use chrono::{Datelike, NaiveDate};
use std::ops::RangeInclusive;

use super::tables::is_valid_ddd;
use super::{NameField, PhoneField, ValidationError};

/// Faixa de idade aceita para médicos e enfermeiros
pub const STAFF_AGE_RANGE: RangeInclusive<i32> = 18..=140;

/// Faixa de idade aceita para pacientes
pub const PATIENT_AGE_RANGE: RangeInclusive<i32> = 0..=140;

const MIN_NAME_LEN: usize = 3;
const PHONE_LEN_RANGE: RangeInclusive<usize> = 10..=11;
const CPF_LEN: usize = 11;
const RG_LEN_RANGE: RangeInclusive<usize> = 7..=9;

/// Valida um nome: ao menos 3 caracteres, apenas letras e espaços
pub fn validate_name(field: NameField, value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort(field));
    }

    let mut letters = value.chars().filter(|c| *c != ' ').peekable();
    if letters.peek().is_none() || !letters.all(char::is_alphabetic) {
        return Err(ValidationError::NameNotAlphabetic(field));
    }

    Ok(())
}

/// Valida um nome opcional; vazio é aceito
pub fn validate_optional_name(
    field: NameField,
    value: Option<&str>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_empty() => validate_name(field, v),
        _ => Ok(()),
    }
}

/// Valida um telefone: 10 ou 11 dígitos começando por um DDD válido
pub fn validate_phone(field: PhoneField, value: &str) -> Result<(), ValidationError> {
    if !PHONE_LEN_RANGE.contains(&value.chars().count())
        || !value.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ValidationError::InvalidPhone(field));
    }

    // Apenas dígitos ASCII a partir daqui, o fatiamento por bytes é seguro
    let ddd: u8 = value[0..2]
        .parse()
        .map_err(|_| ValidationError::InvalidPhone(field))?;

    if !is_valid_ddd(ddd) {
        return Err(ValidationError::InvalidPhone(field));
    }

    Ok(())
}

/// Valida um telefone opcional; vazio é aceito
pub fn validate_optional_phone(
    field: PhoneField,
    value: Option<&str>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_empty() => validate_phone(field, v),
        _ => Ok(()),
    }
}

/// Idade em anos calculada apenas pela diferença entre os anos
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth_date.year()
}

/// Valida a idade derivada da data de nascimento
pub fn validate_age(
    birth_date: NaiveDate,
    today: NaiveDate,
    range: RangeInclusive<i32>,
) -> Result<(), ValidationError> {
    let age = age_in_years(birth_date, today);
    if !range.contains(&age) {
        return Err(ValidationError::InvalidAge {
            age,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

/// Valida o formato do CPF: exatamente 11 dígitos.
///
/// Os dígitos verificadores não são conferidos.
pub fn validate_cpf(value: &str) -> Result<(), ValidationError> {
    if value.len() != CPF_LEN || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidCpf);
    }
    Ok(())
}

/// Valida o formato do RG: de 7 a 9 dígitos
pub fn validate_rg(value: &str) -> Result<(), ValidationError> {
    if !RG_LEN_RANGE.contains(&value.len()) || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidRg);
    }
    Ok(())
}

/// Valida a sintaxe de um endereço de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !validator::validate_email(value) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Valida um email opcional; vazio é aceito
pub fn validate_optional_email(value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_empty() => validate_email(v),
        _ => Ok(()),
    }
}
