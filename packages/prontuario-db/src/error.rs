//! Definições de erro para a biblioteca prontuario-db
//!
//! Este módulo define os tipos de erro usados pelos repositórios

use thiserror::Error;

use crate::validation::ValidationError;

/// Código primário do SQLite para violações de restrição (SQLITE_CONSTRAINT)
const SQLITE_CONSTRAINT: i32 = 19;

/// Indica se o código (estendido ou primário) é uma violação de restrição.
///
/// O byte baixo do código estendido é o código primário, então UNIQUE (2067),
/// FOREIGNKEY (787) e o TRIGGER (1811) gerado pelo ON DELETE RESTRICT caem
/// todos em SQLITE_CONSTRAINT.
fn is_constraint_code(code: &str) -> bool {
    code.parse::<i32>()
        .map(|c| c & 0xff == SQLITE_CONSTRAINT)
        .unwrap_or(false)
}

/// Erros específicos para operações de banco de dados
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Cadastro inválido: {0}")]
    Validation(#[from] ValidationError),

    #[error("Erro de conexão com banco de dados: {0}")]
    ConnectionError(String),

    #[error("Erro de migração: {0}")]
    MigrationError(String),

    #[error("Erro de consulta: {0}")]
    QueryError(String),

    #[error("Entidade não encontrada: {0}")]
    NotFound(String),

    #[error("Violação de restrição: {0}")]
    ConstraintViolation(String),

    #[error("Erro interno: {0}")]
    InternalError(String),
}

impl DbError {
    /// Indica se o erro é uma rejeição do cadastro (validação ou restrição)
    pub fn is_rejection(&self) -> bool {
        matches!(self, DbError::Validation(_) | DbError::ConstraintViolation(_))
    }
}

/// Resultado das operações dos repositórios
pub type DbResult<T> = Result<T, DbError>;

/// Conversão de erros específicos do SQLx para nossos tipos de erro
impl From<sqlx::Error> for DbError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DbError::NotFound("Registro não encontrado".to_string()),
            sqlx::Error::Database(dbe) => {
                if dbe.code().is_some_and(|code| is_constraint_code(&code)) {
                    return DbError::ConstraintViolation(dbe.message().to_string());
                }
                DbError::QueryError(dbe.message().to_string())
            }
            sqlx::Error::ColumnNotFound(col) => {
                DbError::QueryError(format!("Coluna não encontrada: {}", col))
            }
            sqlx::Error::TypeNotFound { type_name } => {
                DbError::QueryError(format!("Tipo não encontrado: {}", type_name))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                DbError::QueryError(format!("Erro ao decodificar coluna {}: {}", index, source))
            }
            sqlx::Error::Io(io_err) => DbError::ConnectionError(io_err.to_string()),
            sqlx::Error::Configuration(conf_err) => DbError::ConnectionError(conf_err.to_string()),
            sqlx::Error::PoolClosed => {
                DbError::ConnectionError("Pool de conexões fechado".to_string())
            }
            sqlx::Error::PoolTimedOut => {
                DbError::ConnectionError("Timeout no pool de conexões".to_string())
            }
            sqlx::Error::WorkerCrashed => {
                DbError::InternalError("Worker do banco de dados falhou".to_string())
            }
            sqlx::Error::Migrate(err) => DbError::MigrationError(err.to_string()),
            _ => DbError::InternalError(format!("Erro inesperado: {:?}", error)),
        }
    }
}
