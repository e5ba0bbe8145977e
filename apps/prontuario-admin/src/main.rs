//! Ferramenta administrativa do cadastro da clínica
//!
//! Cria, edita, remove, lista e valida médicos, enfermeiros, setores de
//! atuação e pacientes.
//!
//! # Variáveis de ambiente
//! - `PRONTUARIO_DB_PATH`: caminho do banco SQLite (padrão: `data/prontuario.db`)
//! - `PRONTUARIO_MAX_CONNECTIONS`: tamanho do pool de conexões (padrão: 5)
//! - `PRONTUARIO_SQL_TRACE`: nível de log das instruções SQL, de 0 a 3
//! - `PRONTUARIO_LOG_JSON`: `true` para logs em JSON
//! - `RUST_LOG`: filtro de logs (padrão: `prontuario_db=info,prontuario_admin=info`)

use anyhow::Result;
use clap::Parser;
use prontuario_db::{init_db_pool, DbConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;

use cli::{Cli, Command};

const DEFAULT_LOG_FILTER: &str = "prontuario_db=info,prontuario_admin=info";

/// Instala o subscriber de logs; a saída vai para stderr para não misturar
/// com o JSON impresso em stdout
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.global.json_logs);

    match cli.command {
        // Validação não precisa de banco
        Command::Validate { entity } => commands::validate(&entity),
        Command::Database(command) => {
            let config = DbConfig::from(&cli.global);
            let pool = init_db_pool(&config).await?;

            let result = commands::run(&pool, command).await;
            pool.close().await;
            result
        }
    }
}
