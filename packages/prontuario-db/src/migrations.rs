//! Sistema de migrações para banco de dados
//!
//! Este módulo gerencia as migrações do banco de dados SQLite

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{error, info};

/// Lista de migrações SQL a serem aplicadas
pub(crate) const MIGRATIONS: &[&str] = &[
    // 001_cadastro.sql
    r#"
    -- Médicos
    CREATE TABLE IF NOT EXISTS doctors (
        id BLOB PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        phone TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        birth_date DATE NOT NULL,
        cpf TEXT NOT NULL UNIQUE,
        status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'inactive')),
        crm TEXT NOT NULL UNIQUE,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    -- Setores de atuação da enfermagem
    CREATE TABLE IF NOT EXISTS nursing_sectors (
        id BLOB PRIMARY KEY NOT NULL,
        name TEXT NOT NULL UNIQUE,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    -- Enfermeiros
    CREATE TABLE IF NOT EXISTS nurses (
        id BLOB PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        coren TEXT NOT NULL UNIQUE,
        sector_id BLOB NOT NULL,
        phone TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        birth_date DATE NOT NULL,
        cpf TEXT NOT NULL UNIQUE,
        shift TEXT NOT NULL CHECK (shift IN ('morning', 'afternoon', 'night', 'full')),
        status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'inactive')),
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (sector_id) REFERENCES nursing_sectors (id) ON DELETE RESTRICT
    );

    -- Pacientes
    CREATE TABLE IF NOT EXISTS patients (
        id BLOB PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        birth_date DATE NOT NULL,
        sex TEXT NOT NULL CHECK (sex IN ('male', 'female', 'other')),
        cpf TEXT NOT NULL UNIQUE,
        rg TEXT NOT NULL UNIQUE,
        mother_name TEXT NOT NULL,
        father_name TEXT,
        primary_phone TEXT NOT NULL UNIQUE,
        secondary_phone TEXT,
        email TEXT UNIQUE,
        blood_type TEXT CHECK (blood_type IN ('A+', 'A-', 'B+', 'B-', 'AB+', 'AB-', 'O+', 'O-')),
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    -- Índices para ordenação e filtros
    CREATE INDEX IF NOT EXISTS idx_doctors_name ON doctors (name);
    CREATE INDEX IF NOT EXISTS idx_doctors_status ON doctors (status);
    CREATE INDEX IF NOT EXISTS idx_nursing_sectors_name ON nursing_sectors (name);
    CREATE INDEX IF NOT EXISTS idx_nurses_name ON nurses (name);
    CREATE INDEX IF NOT EXISTS idx_nurses_sector_id ON nurses (sector_id);
    CREATE INDEX IF NOT EXISTS idx_patients_name ON patients (name);
    "#,
];

/// Executa todas as migrações pendentes no banco de dados
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Aplicando migrações de banco de dados...");

    // Obter a versão atual do banco de dados
    let version: i64 = match sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
    {
        Ok(v) => v,
        Err(e) => {
            // Pode ser a primeira execução
            error!("Erro ao obter versão do banco: {}", e);
            0
        }
    };

    info!("Versão atual do banco: {}", version);

    for (i, migration_sql) in MIGRATIONS.iter().enumerate() {
        let migration_version = (i + 1) as i64;

        if migration_version <= version {
            info!("Migração {} já aplicada", migration_version);
            continue;
        }

        info!("Aplicando migração {}...", migration_version);

        let mut transaction = pool.begin().await.with_context(|| {
            format!("Falha ao iniciar transação para migração {}", migration_version)
        })?;

        sqlx::query(migration_sql)
            .execute(&mut *transaction)
            .await
            .with_context(|| format!("Falha ao executar migração {}", migration_version))?;

        sqlx::query(&format!("PRAGMA user_version = {}", migration_version))
            .execute(&mut *transaction)
            .await
            .with_context(|| format!("Falha ao atualizar versão para {}", migration_version))?;

        transaction.commit().await.with_context(|| {
            format!("Falha ao confirmar transação para migração {}", migration_version)
        })?;

        info!("Migração {} aplicada com sucesso", migration_version);
    }

    info!("Migrações concluídas. Versão atual: {}", MIGRATIONS.len());
    Ok(())
}
