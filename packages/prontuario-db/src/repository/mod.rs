//! Repositórios de acesso aos cadastros
//!
//! Cada submódulo oferece criação, edição, consulta, exclusão e listagem de
//! uma entidade. Toda gravação passa pela validação antes de chegar ao banco;
//! unicidade e a restrição de exclusão de setores ficam a cargo do SQLite.

use tracing::warn;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::validation::Validate;

pub mod doctors;
pub mod nurses;
pub mod patients;
pub mod sectors;

/// Valida o rascunho antes da gravação, registrando a rejeição
pub(crate) fn ensure_valid<T: Validate>(entity: &str, draft: &T) -> DbResult<()> {
    draft.validate().map_err(|e| {
        warn!("Cadastro de {} rejeitado: {}", entity, e);
        DbError::from(e)
    })
}

/// Converte um erro de gravação, registrando violações de restrição
pub(crate) fn write_error(entity: &str, error: sqlx::Error) -> DbError {
    let error = DbError::from(error);
    if let DbError::ConstraintViolation(reason) = &error {
        warn!("Gravação de {} recusada pelo banco: {}", entity, reason);
    }
    error
}

pub(crate) fn not_found(entity: &str, id: Uuid) -> DbError {
    DbError::NotFound(format!("{} {}", entity, id))
}

/// Termo de busca por substring, sem distinção de maiúsculas e minúsculas.
///
/// A comparação é feita após a consulta porque o `LIKE` do SQLite só ignora
/// a caixa de letras ASCII, e nomes como "Ávila" precisam casar com "ávila".
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchTerm(String);

impl SearchTerm {
    /// Termo normalizado; `None` quando a busca está vazia
    pub(crate) fn new(term: Option<&str>) -> Option<Self> {
        term.map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| Self(t.to_lowercase()))
    }

    /// Indica se algum dos campos contém o termo
    pub(crate) fn matches(&self, fields: &[Option<&str>]) -> bool {
        fields
            .iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&self.0))
    }
}
