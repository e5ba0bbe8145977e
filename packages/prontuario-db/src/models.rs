//! Modelos de dados do cadastro da clínica
//!
//! Este módulo define os registros persistidos (médicos, setores de atuação,
//! enfermeiros e pacientes), os rascunhos usados para criação e edição, e as
//! enumerações de escolha fixa.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Erro ao interpretar o valor de uma enumeração
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Valor de {kind} inválido: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Define uma enumeração de escolha fixa com código de armazenamento,
/// rótulo de exibição e conversão a partir de texto.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => ($code:tt, $label:tt) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $code)] $variant ),+
        }

        impl $name {
            /// Todos os valores possíveis
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Código gravado no banco de dados
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $code ),+
                }
            }

            /// Rótulo de exibição
            pub fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            /// Aceita o código ou o rótulo, sem diferenciar maiúsculas
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        v.as_str().to_lowercase() == wanted || v.label().to_lowercase() == wanted
                    })
                    .ok_or_else(|| ParseEnumError { kind: $kind, value: s.to_string() })
            }
        }
    };
}

choice_enum! {
    /// Situação de um profissional
    Status, "status" {
        Active => ("active", "Ativo"),
        Inactive => ("inactive", "Inativo"),
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Active
    }
}

choice_enum! {
    /// Turno de trabalho de um enfermeiro
    Shift, "turno" {
        Morning => ("morning", "Manhã"),
        Afternoon => ("afternoon", "Tarde"),
        Night => ("night", "Noite"),
        Full => ("full", "Integral"),
    }
}

choice_enum! {
    /// Sexo do paciente
    Sex, "sexo" {
        Male => ("male", "Masculino"),
        Female => ("female", "Feminino"),
        Other => ("other", "Outro"),
    }
}

choice_enum! {
    /// Tipo sanguíneo
    BloodType, "tipo sanguíneo" {
        APositive => ("A+", "A⁺"),
        ANegative => ("A-", "A⁻"),
        BPositive => ("B+", "B⁺"),
        BNegative => ("B-", "B⁻"),
        AbPositive => ("AB+", "AB⁺"),
        AbNegative => ("AB-", "AB⁻"),
        OPositive => ("O+", "O⁺"),
        ONegative => ("O-", "O⁻"),
    }
}

/// Lê uma coluna de texto e a converte numa enumeração
fn decode_choice<T>(row: &SqliteRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr<Err = ParseEnumError>,
{
    let raw: String = row.try_get(column)?;
    parse_choice(column, &raw)
}

fn decode_optional_choice<T>(row: &SqliteRow, column: &str) -> sqlx::Result<Option<T>>
where
    T: FromStr<Err = ParseEnumError>,
{
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|r| parse_choice(column, &r)).transpose()
}

fn parse_choice<T>(column: &str, raw: &str) -> sqlx::Result<T>
where
    T: FromStr<Err = ParseEnumError>,
{
    raw.parse().map_err(|e: ParseEnumError| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Converte texto vazio em `None`
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Médico cadastrado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub cpf: String,
    pub status: Status,
    /// Registro no formato `CRM/UF NNNNNN`
    pub crm: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for Doctor {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            birth_date: row.try_get("birth_date")?,
            cpf: row.try_get("cpf")?,
            status: decode_choice(row, "status")?,
            crm: row.try_get("crm")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Dados para criação ou edição de um médico
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub cpf: String,
    #[serde(default)]
    pub status: Status,
    pub crm: String,
}

/// Setor de atuação da enfermagem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NursingSector {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for NursingSector {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Dados para criação ou edição de um setor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNursingSector {
    pub name: String,
}

/// Enfermeiro cadastrado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nurse {
    pub id: Uuid,
    pub name: String,
    /// Registro no formato `COREN-UF NNNNNN-CATEGORIA`
    pub coren: String,
    /// Setor de atuação
    pub sector_id: Uuid,
    pub phone: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub cpf: String,
    pub shift: Shift,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for Nurse {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            coren: row.try_get("coren")?,
            sector_id: row.try_get("sector_id")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            birth_date: row.try_get("birth_date")?,
            cpf: row.try_get("cpf")?,
            shift: decode_choice(row, "shift")?,
            status: decode_choice(row, "status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Dados para criação ou edição de um enfermeiro
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNurse {
    pub name: String,
    pub coren: String,
    pub sector_id: Uuid,
    pub phone: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub cpf: String,
    pub shift: Shift,
    #[serde(default)]
    pub status: Status,
}

/// Paciente cadastrado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    pub cpf: String,
    pub rg: String,
    pub mother_name: String,
    pub father_name: Option<String>,
    pub primary_phone: String,
    pub secondary_phone: Option<String>,
    pub email: Option<String>,
    pub blood_type: Option<BloodType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for Patient {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            birth_date: row.try_get("birth_date")?,
            sex: decode_choice(row, "sex")?,
            cpf: row.try_get("cpf")?,
            rg: row.try_get("rg")?,
            mother_name: row.try_get("mother_name")?,
            father_name: row.try_get("father_name")?,
            primary_phone: row.try_get("primary_phone")?,
            secondary_phone: row.try_get("secondary_phone")?,
            email: row.try_get("email")?,
            blood_type: decode_optional_choice(row, "blood_type")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Dados para criação ou edição de um paciente
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    pub cpf: String,
    pub rg: String,
    pub mother_name: String,
    #[serde(default)]
    pub father_name: Option<String>,
    pub primary_phone: String,
    #[serde(default)]
    pub secondary_phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub blood_type: Option<BloodType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_codes_and_labels() {
        assert_eq!(Status::default(), Status::Active);
        assert_eq!(Shift::Morning.as_str(), "morning");
        assert_eq!(Shift::Morning.to_string(), "Manhã");
        assert_eq!(BloodType::AbNegative.as_str(), "AB-");
        assert_eq!(BloodType::ALL.len(), 8);
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!("night".parse::<Shift>(), Ok(Shift::Night));
        assert_eq!("MANHÃ".parse::<Shift>(), Ok(Shift::Morning));
        assert_eq!("Ativo".parse::<Status>(), Ok(Status::Active));
        assert_eq!("o-".parse::<BloodType>(), Ok(BloodType::ONegative));
        assert_eq!("Feminino".parse::<Sex>(), Ok(Sex::Female));

        let err = "C+".parse::<BloodType>().unwrap_err();
        assert_eq!(err.to_string(), "Valor de tipo sanguíneo inválido: C+");
    }

    #[test]
    fn test_draft_from_json_defaults() {
        let patient: NewPatient = serde_json::from_value(serde_json::json!({
            "name": "Maria Souza",
            "birth_date": "1990-05-10",
            "sex": "female",
            "cpf": "12345678901",
            "rg": "1234567",
            "mother_name": "Ana Souza",
            "primary_phone": "11987654321",
            "blood_type": "O+"
        }))
        .unwrap();
        assert_eq!(patient.father_name, None);
        assert_eq!(patient.email, None);
        assert_eq!(patient.blood_type, Some(BloodType::OPositive));

        let doctor: NewDoctor = serde_json::from_value(serde_json::json!({
            "name": "Carlos Lima",
            "phone": "21987654321",
            "email": "carlos@clinica.med.br",
            "birth_date": "1980-01-01",
            "cpf": "12345678901",
            "crm": "CRM/RJ 123456"
        }))
        .unwrap();
        assert_eq!(doctor.status, Status::Active);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("x")), Some("x"));
        assert_eq!(non_empty(None), None);
    }
}
