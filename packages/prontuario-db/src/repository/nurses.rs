//! Repositório de enfermeiros

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use super::{ensure_valid, not_found, write_error, SearchTerm};
use crate::error::DbResult;
use crate::models::{NewNurse, Nurse, Shift, Status};
use crate::validation::CorenNumber;

const ENTITY: &str = "enfermeiro";

/// Filtros da listagem de enfermeiros
#[derive(Debug, Clone, Default)]
pub struct NurseFilter {
    /// Busca em nome, COREN, CPF e telefone
    pub search: Option<String>,
    pub sector_id: Option<Uuid>,
    pub shift: Option<Shift>,
    pub status: Option<Status>,
}

/// Cadastra um novo enfermeiro; o setor informado precisa existir
pub async fn create(pool: &SqlitePool, draft: &NewNurse) -> DbResult<Nurse> {
    ensure_valid(ENTITY, draft)?;
    let coren = CorenNumber::parse(&draft.coren)?.to_string();

    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO nurses (
            id, name, coren, sector_id, phone, email, birth_date, cpf, shift, status,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&draft.name)
    .bind(&coren)
    .bind(draft.sector_id)
    .bind(&draft.phone)
    .bind(&draft.email)
    .bind(draft.birth_date)
    .bind(&draft.cpf)
    .bind(draft.shift.as_str())
    .bind(draft.status.as_str())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| write_error(ENTITY, e))?;

    info!("Enfermeiro cadastrado: {} (setor {})", id, draft.sector_id);
    get(pool, id).await
}

/// Atualiza todos os campos de um enfermeiro existente
pub async fn update(pool: &SqlitePool, id: Uuid, draft: &NewNurse) -> DbResult<Nurse> {
    ensure_valid(ENTITY, draft)?;
    let coren = CorenNumber::parse(&draft.coren)?.to_string();

    let result = sqlx::query(
        r#"
        UPDATE nurses
        SET name = ?, coren = ?, sector_id = ?, phone = ?, email = ?, birth_date = ?, cpf = ?,
            shift = ?, status = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&draft.name)
    .bind(&coren)
    .bind(draft.sector_id)
    .bind(&draft.phone)
    .bind(&draft.email)
    .bind(draft.birth_date)
    .bind(&draft.cpf)
    .bind(draft.shift.as_str())
    .bind(draft.status.as_str())
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| write_error(ENTITY, e))?;

    if result.rows_affected() == 0 {
        return Err(not_found("Enfermeiro", id));
    }

    debug!("Enfermeiro atualizado: {}", id);
    get(pool, id).await
}

/// Busca um enfermeiro pelo identificador
pub async fn get(pool: &SqlitePool, id: Uuid) -> DbResult<Nurse> {
    sqlx::query_as::<_, Nurse>("SELECT * FROM nurses WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found("Enfermeiro", id))
}

/// Remove definitivamente um enfermeiro
pub async fn delete(pool: &SqlitePool, id: Uuid) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM nurses WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| write_error(ENTITY, e))?;

    if result.rows_affected() == 0 {
        return Err(not_found("Enfermeiro", id));
    }

    info!("Enfermeiro removido: {}", id);
    Ok(())
}

/// Lista enfermeiros em ordem de nome
pub async fn list(pool: &SqlitePool, filter: &NurseFilter) -> DbResult<Vec<Nurse>> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM nurses WHERE 1 = 1");
    if let Some(sector_id) = filter.sector_id {
        query.push(" AND sector_id = ").push_bind(sector_id);
    }
    if let Some(shift) = filter.shift {
        query.push(" AND shift = ").push_bind(shift.as_str());
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
    query.push(" ORDER BY name");

    let mut nurses = query.build_query_as::<Nurse>().fetch_all(pool).await?;
    if let Some(term) = SearchTerm::new(filter.search.as_deref()) {
        nurses.retain(|n| {
            term.matches(&[
                Some(n.name.as_str()),
                Some(n.coren.as_str()),
                Some(n.cpf.as_str()),
                Some(n.phone.as_str()),
            ])
        });
    }
    Ok(nurses)
}
