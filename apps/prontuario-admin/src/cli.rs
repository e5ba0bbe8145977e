//! Definição dos argumentos de linha de comando

use clap::{Args, Parser, Subcommand};
use prontuario_db::models::{BloodType, Sex, Shift, Status};
use prontuario_db::DbConfig;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "prontuario-admin")]
#[command(about = "Administração do cadastro de médicos, enfermeiros, setores e pacientes")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Configuração resolvida uma única vez na inicialização
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Caminho do arquivo SQLite
    #[arg(
        long,
        env = "PRONTUARIO_DB_PATH",
        default_value = "data/prontuario.db",
        global = true
    )]
    pub db_path: String,

    /// Número máximo de conexões no pool
    #[arg(long, env = "PRONTUARIO_MAX_CONNECTIONS", default_value_t = 5, global = true)]
    pub max_connections: u32,

    /// Nível de log das instruções SQL (0-3)
    #[arg(long, env = "PRONTUARIO_SQL_TRACE", default_value_t = 0, global = true)]
    pub sql_trace: u8,

    /// Emite os logs em JSON
    #[arg(long, env = "PRONTUARIO_LOG_JSON", global = true)]
    pub json_logs: bool,
}

impl From<&GlobalArgs> for DbConfig {
    fn from(args: &GlobalArgs) -> Self {
        DbConfig {
            db_path: args.db_path.clone(),
            max_connections: args.max_connections,
            trace_level: args.sql_trace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validação de um cadastro sem gravar
    Validate {
        #[command(subcommand)]
        entity: ValidateTarget,
    },
    #[command(flatten)]
    Database(DatabaseCommand),
}

/// Comandos que abrem o banco de dados
#[derive(Debug, Subcommand)]
pub enum DatabaseCommand {
    /// Cria ou atualiza o esquema do banco de dados
    Migrate,
    /// Médicos
    #[command(subcommand)]
    Doctor(DoctorCommand),
    /// Setores de atuação
    #[command(subcommand)]
    Sector(SectorCommand),
    /// Enfermeiros
    #[command(subcommand)]
    Nurse(NurseCommand),
    /// Pacientes
    #[command(subcommand)]
    Patient(PatientCommand),
}

#[derive(Debug, Subcommand)]
pub enum ValidateTarget {
    Doctor(FileArgs),
    Sector(FileArgs),
    Nurse(FileArgs),
    Patient(FileArgs),
}

/// Arquivo JSON com os dados do cadastro
#[derive(Debug, Clone, Args)]
pub struct FileArgs {
    #[arg(long, short)]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct IdArgs {
    pub id: Uuid,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    pub id: Uuid,
    #[arg(long, short)]
    pub file: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum DoctorCommand {
    Create(FileArgs),
    Update(UpdateArgs),
    Show(IdArgs),
    Delete(IdArgs),
    List(DoctorListArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DoctorListArgs {
    /// Busca em nome, CRM, CPF e telefone
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub status: Option<Status>,
}

#[derive(Debug, Subcommand)]
pub enum SectorCommand {
    Create(FileArgs),
    Update(UpdateArgs),
    Show(IdArgs),
    Delete(IdArgs),
    List(SectorListArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SectorListArgs {
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum NurseCommand {
    Create(FileArgs),
    Update(UpdateArgs),
    Show(IdArgs),
    Delete(IdArgs),
    List(NurseListArgs),
}

#[derive(Debug, Clone, Args)]
pub struct NurseListArgs {
    /// Busca em nome, COREN, CPF e telefone
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub sector: Option<Uuid>,
    #[arg(long)]
    pub shift: Option<Shift>,
    #[arg(long)]
    pub status: Option<Status>,
}

#[derive(Debug, Subcommand)]
pub enum PatientCommand {
    Create(FileArgs),
    Update(UpdateArgs),
    Show(IdArgs),
    Delete(IdArgs),
    List(PatientListArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PatientListArgs {
    /// Busca em nome, CPF, telefones e nomes dos pais
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub blood_type: Option<BloodType>,
    #[arg(long)]
    pub sex: Option<Sex>,
}
