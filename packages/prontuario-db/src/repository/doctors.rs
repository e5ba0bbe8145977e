//! Repositório de médicos

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use super::{ensure_valid, not_found, write_error, SearchTerm};
use crate::error::DbResult;
use crate::models::{Doctor, NewDoctor, Status};
use crate::validation::CrmNumber;

const ENTITY: &str = "médico";

/// Filtros da listagem de médicos
#[derive(Debug, Clone, Default)]
pub struct DoctorFilter {
    /// Busca em nome, CRM, CPF e telefone
    pub search: Option<String>,
    pub status: Option<Status>,
}

/// Cadastra um novo médico
pub async fn create(pool: &SqlitePool, draft: &NewDoctor) -> DbResult<Doctor> {
    ensure_valid(ENTITY, draft)?;
    let crm = CrmNumber::parse(&draft.crm)?.to_string();

    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO doctors (
            id, name, phone, email, birth_date, cpf, status, crm, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&draft.name)
    .bind(&draft.phone)
    .bind(&draft.email)
    .bind(draft.birth_date)
    .bind(&draft.cpf)
    .bind(draft.status.as_str())
    .bind(&crm)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| write_error(ENTITY, e))?;

    info!("Médico cadastrado: {}", id);
    get(pool, id).await
}

/// Atualiza todos os campos de um médico existente
pub async fn update(pool: &SqlitePool, id: Uuid, draft: &NewDoctor) -> DbResult<Doctor> {
    ensure_valid(ENTITY, draft)?;
    let crm = CrmNumber::parse(&draft.crm)?.to_string();

    let result = sqlx::query(
        r#"
        UPDATE doctors
        SET name = ?, phone = ?, email = ?, birth_date = ?, cpf = ?, status = ?, crm = ?,
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.phone)
    .bind(&draft.email)
    .bind(draft.birth_date)
    .bind(&draft.cpf)
    .bind(draft.status.as_str())
    .bind(&crm)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| write_error(ENTITY, e))?;

    if result.rows_affected() == 0 {
        return Err(not_found("Médico", id));
    }

    debug!("Médico atualizado: {}", id);
    get(pool, id).await
}

/// Busca um médico pelo identificador
pub async fn get(pool: &SqlitePool, id: Uuid) -> DbResult<Doctor> {
    sqlx::query_as::<_, Doctor>("SELECT * FROM doctors WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found("Médico", id))
}

/// Remove definitivamente um médico
pub async fn delete(pool: &SqlitePool, id: Uuid) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM doctors WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| write_error(ENTITY, e))?;

    if result.rows_affected() == 0 {
        return Err(not_found("Médico", id));
    }

    info!("Médico removido: {}", id);
    Ok(())
}

/// Lista médicos em ordem de nome
pub async fn list(pool: &SqlitePool, filter: &DoctorFilter) -> DbResult<Vec<Doctor>> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM doctors WHERE 1 = 1");
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
    query.push(" ORDER BY name");

    let mut doctors = query.build_query_as::<Doctor>().fetch_all(pool).await?;
    if let Some(term) = SearchTerm::new(filter.search.as_deref()) {
        doctors.retain(|d| {
            term.matches(&[
                Some(d.name.as_str()),
                Some(d.crm.as_str()),
                Some(d.cpf.as_str()),
                Some(d.phone.as_str()),
            ])
        });
    }
    Ok(doctors)
}
