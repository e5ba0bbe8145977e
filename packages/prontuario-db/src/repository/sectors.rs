//! Repositório de setores de atuação da enfermagem

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{ensure_valid, not_found, write_error, SearchTerm};
use crate::error::{DbError, DbResult};
use crate::models::{NewNursingSector, NursingSector};

const ENTITY: &str = "setor";

/// Filtros da listagem de setores
#[derive(Debug, Clone, Default)]
pub struct SectorFilter {
    /// Busca no nome do setor
    pub search: Option<String>,
}

/// Cadastra um novo setor
pub async fn create(pool: &SqlitePool, draft: &NewNursingSector) -> DbResult<NursingSector> {
    ensure_valid(ENTITY, draft)?;

    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO nursing_sectors (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&draft.name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| write_error(ENTITY, e))?;

    info!("Setor cadastrado: {}", id);
    get(pool, id).await
}

/// Renomeia um setor existente
pub async fn update(
    pool: &SqlitePool,
    id: Uuid,
    draft: &NewNursingSector,
) -> DbResult<NursingSector> {
    ensure_valid(ENTITY, draft)?;

    let result = sqlx::query("UPDATE nursing_sectors SET name = ?, updated_at = ? WHERE id = ?")
        .bind(&draft.name)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| write_error(ENTITY, e))?;

    if result.rows_affected() == 0 {
        return Err(not_found("Setor", id));
    }

    debug!("Setor atualizado: {}", id);
    get(pool, id).await
}

/// Busca um setor pelo identificador
pub async fn get(pool: &SqlitePool, id: Uuid) -> DbResult<NursingSector> {
    sqlx::query_as::<_, NursingSector>("SELECT * FROM nursing_sectors WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found("Setor", id))
}

/// Remove um setor.
///
/// Falha com `ConstraintViolation` enquanto houver enfermeiros no setor.
pub async fn delete(pool: &SqlitePool, id: Uuid) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM nursing_sectors WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| match write_error(ENTITY, e) {
            DbError::ConstraintViolation(_) => {
                warn!("Setor {} possui enfermeiros vinculados", id);
                DbError::ConstraintViolation(format!(
                    "O setor {} possui enfermeiros vinculados e não pode ser removido",
                    id
                ))
            }
            other => other,
        })?;

    if result.rows_affected() == 0 {
        return Err(not_found("Setor", id));
    }

    info!("Setor removido: {}", id);
    Ok(())
}

/// Lista setores em ordem de nome
pub async fn list(pool: &SqlitePool, filter: &SectorFilter) -> DbResult<Vec<NursingSector>> {
    let mut sectors =
        sqlx::query_as::<_, NursingSector>("SELECT * FROM nursing_sectors ORDER BY name")
            .fetch_all(pool)
            .await?;
    if let Some(term) = SearchTerm::new(filter.search.as_deref()) {
        sectors.retain(|s| term.matches(&[Some(s.name.as_str())]));
    }
    Ok(sectors)
}
