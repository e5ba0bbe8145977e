//! Repositório de pacientes
//!
//! Campos opcionais vazios são gravados como `NULL`, de modo que vários
//! pacientes sem email ou sem telefone secundário não colidem na restrição
//! de unicidade.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use super::{ensure_valid, not_found, write_error, SearchTerm};
use crate::error::DbResult;
use crate::models::{non_empty, BloodType, NewPatient, Patient, Sex};

const ENTITY: &str = "paciente";

/// Filtros da listagem de pacientes
#[derive(Debug, Clone, Default)]
pub struct PatientFilter {
    /// Busca em nome, CPF, telefones e nomes dos pais
    pub search: Option<String>,
    pub blood_type: Option<BloodType>,
    pub sex: Option<Sex>,
}

/// Cadastra um novo paciente
pub async fn create(pool: &SqlitePool, draft: &NewPatient) -> DbResult<Patient> {
    ensure_valid(ENTITY, draft)?;

    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO patients (
            id, name, birth_date, sex, cpf, rg, mother_name, father_name,
            primary_phone, secondary_phone, email, blood_type, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&draft.name)
    .bind(draft.birth_date)
    .bind(draft.sex.as_str())
    .bind(&draft.cpf)
    .bind(&draft.rg)
    .bind(&draft.mother_name)
    .bind(non_empty(draft.father_name.as_deref()))
    .bind(&draft.primary_phone)
    .bind(non_empty(draft.secondary_phone.as_deref()))
    .bind(non_empty(draft.email.as_deref()))
    .bind(draft.blood_type.map(|b| b.as_str()))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| write_error(ENTITY, e))?;

    info!("Paciente cadastrado: {}", id);
    get(pool, id).await
}

/// Atualiza todos os campos de um paciente existente
pub async fn update(pool: &SqlitePool, id: Uuid, draft: &NewPatient) -> DbResult<Patient> {
    ensure_valid(ENTITY, draft)?;

    let result = sqlx::query(
        r#"
        UPDATE patients
        SET name = ?, birth_date = ?, sex = ?, cpf = ?, rg = ?, mother_name = ?, father_name = ?,
            primary_phone = ?, secondary_phone = ?, email = ?, blood_type = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&draft.name)
    .bind(draft.birth_date)
    .bind(draft.sex.as_str())
    .bind(&draft.cpf)
    .bind(&draft.rg)
    .bind(&draft.mother_name)
    .bind(non_empty(draft.father_name.as_deref()))
    .bind(&draft.primary_phone)
    .bind(non_empty(draft.secondary_phone.as_deref()))
    .bind(non_empty(draft.email.as_deref()))
    .bind(draft.blood_type.map(|b| b.as_str()))
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| write_error(ENTITY, e))?;

    if result.rows_affected() == 0 {
        return Err(not_found("Paciente", id));
    }

    debug!("Paciente atualizado: {}", id);
    get(pool, id).await
}

/// Busca um paciente pelo identificador
pub async fn get(pool: &SqlitePool, id: Uuid) -> DbResult<Patient> {
    sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found("Paciente", id))
}

/// Remove definitivamente um paciente
pub async fn delete(pool: &SqlitePool, id: Uuid) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM patients WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| write_error(ENTITY, e))?;

    if result.rows_affected() == 0 {
        return Err(not_found("Paciente", id));
    }

    info!("Paciente removido: {}", id);
    Ok(())
}

/// Lista pacientes em ordem de nome
pub async fn list(pool: &SqlitePool, filter: &PatientFilter) -> DbResult<Vec<Patient>> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM patients WHERE 1 = 1");
    if let Some(blood_type) = filter.blood_type {
        query.push(" AND blood_type = ").push_bind(blood_type.as_str());
    }
    if let Some(sex) = filter.sex {
        query.push(" AND sex = ").push_bind(sex.as_str());
    }
    query.push(" ORDER BY name");

    let mut patients = query.build_query_as::<Patient>().fetch_all(pool).await?;
    if let Some(term) = SearchTerm::new(filter.search.as_deref()) {
        patients.retain(|p| {
            term.matches(&[
                Some(p.name.as_str()),
                Some(p.cpf.as_str()),
                Some(p.primary_phone.as_str()),
                p.secondary_phone.as_deref(),
                Some(p.mother_name.as_str()),
                p.father_name.as_deref(),
            ])
        });
    }
    Ok(patients)
}
