//! Prontuário DB - Biblioteca de cadastro da clínica
//!
//! Esta biblioteca fornece:
//! - Modelos de médicos, enfermeiros, setores de atuação e pacientes
//! - Validação dos cadastros antes de cada gravação
//! - Migrações automáticas do banco de dados
//! - Repositórios com criação, edição, exclusão, busca e filtros
//! - Pool de conexão e funções de utilidades para SQLite

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::Path;
use tracing::{info, log::LevelFilter};

pub mod error;
pub mod migrations;
pub mod models;
pub mod repository;
pub mod validation;

pub use error::{DbError, DbResult};
pub use sqlx::SqlitePool;
pub use validation::{Validate, ValidationError};

/// Configuração da conexão com o banco de dados
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Caminho para o arquivo SQLite
    pub db_path: String,
    /// Número máximo de conexões no pool
    pub max_connections: u32,
    /// Nível de trace do SQL (0-3)
    pub trace_level: u8,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            db_path: "data/prontuario.db".to_string(),
            max_connections: 5,
            trace_level: 0,
        }
    }
}

impl DbConfig {
    /// Nível de log das instruções SQL para o `trace_level` configurado
    pub fn statement_log_level(&self) -> LevelFilter {
        match self.trace_level {
            0 => LevelFilter::Off,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Inicializa o pool de conexões com o banco de dados SQLite
pub async fn init_db_pool(config: &DbConfig) -> Result<SqlitePool> {
    let db_path = Path::new(&config.db_path);

    // Verifica se o diretório pai existe
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .context("Falha ao criar diretório para banco de dados")?;
        }
    }

    // Chaves estrangeiras precisam estar ativas para o ON DELETE RESTRICT
    let connection_options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .foreign_keys(true)
        .pragma("synchronous", "NORMAL")
        .log_statements(config.statement_log_level());

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connection_options)
        .await
        .context("Falha ao conectar ao banco de dados SQLite")?;

    migrations::run_migrations(&pool)
        .await
        .context("Falha ao aplicar migrações")?;

    info!("Banco de dados inicializado com sucesso: {}", config.db_path);
    Ok(pool)
}
