//! Execução dos comandos administrativos

use anyhow::{Context, Result};
use prontuario_db::models::{NewDoctor, NewNurse, NewNursingSector, NewPatient};
use prontuario_db::repository::doctors::{self, DoctorFilter};
use prontuario_db::repository::nurses::{self, NurseFilter};
use prontuario_db::repository::patients::{self, PatientFilter};
use prontuario_db::repository::sectors::{self, SectorFilter};
use prontuario_db::{SqlitePool, Validate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::cli::{
    DatabaseCommand, DoctorCommand, NurseCommand, PatientCommand, SectorCommand, ValidateTarget,
};

/// Lê um rascunho de cadastro de um arquivo JSON
pub fn read_draft<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler arquivo {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("JSON inválido em {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Valida um rascunho sem tocar no banco
pub fn validate(target: &ValidateTarget) -> Result<()> {
    let result = match target {
        ValidateTarget::Doctor(args) => read_draft::<NewDoctor>(&args.file)?.validate(),
        ValidateTarget::Sector(args) => read_draft::<NewNursingSector>(&args.file)?.validate(),
        ValidateTarget::Nurse(args) => read_draft::<NewNurse>(&args.file)?.validate(),
        ValidateTarget::Patient(args) => read_draft::<NewPatient>(&args.file)?.validate(),
    };
    result.context("Cadastro inválido")?;
    println!("Cadastro válido");
    Ok(())
}

/// Executa um comando com o banco já aberto e migrado
pub async fn run(pool: &SqlitePool, command: DatabaseCommand) -> Result<()> {
    match command {
        DatabaseCommand::Migrate => {
            info!("Esquema do banco de dados atualizado");
            Ok(())
        }
        DatabaseCommand::Doctor(command) => doctor(pool, command).await,
        DatabaseCommand::Sector(command) => sector(pool, command).await,
        DatabaseCommand::Nurse(command) => nurse(pool, command).await,
        DatabaseCommand::Patient(command) => patient(pool, command).await,
    }
}

async fn doctor(pool: &SqlitePool, command: DoctorCommand) -> Result<()> {
    match command {
        DoctorCommand::Create(args) => {
            let draft: NewDoctor = read_draft(&args.file)?;
            print_json(&doctors::create(pool, &draft).await?)
        }
        DoctorCommand::Update(args) => {
            let draft: NewDoctor = read_draft(&args.file)?;
            print_json(&doctors::update(pool, args.id, &draft).await?)
        }
        DoctorCommand::Show(args) => print_json(&doctors::get(pool, args.id).await?),
        DoctorCommand::Delete(args) => {
            doctors::delete(pool, args.id).await?;
            info!("Médico {} removido", args.id);
            Ok(())
        }
        DoctorCommand::List(args) => {
            let filter = DoctorFilter {
                search: args.search,
                status: args.status,
            };
            print_json(&doctors::list(pool, &filter).await?)
        }
    }
}

async fn sector(pool: &SqlitePool, command: SectorCommand) -> Result<()> {
    match command {
        SectorCommand::Create(args) => {
            let draft: NewNursingSector = read_draft(&args.file)?;
            print_json(&sectors::create(pool, &draft).await?)
        }
        SectorCommand::Update(args) => {
            let draft: NewNursingSector = read_draft(&args.file)?;
            print_json(&sectors::update(pool, args.id, &draft).await?)
        }
        SectorCommand::Show(args) => print_json(&sectors::get(pool, args.id).await?),
        SectorCommand::Delete(args) => {
            sectors::delete(pool, args.id).await?;
            info!("Setor {} removido", args.id);
            Ok(())
        }
        SectorCommand::List(args) => {
            let filter = SectorFilter {
                search: args.search,
            };
            print_json(&sectors::list(pool, &filter).await?)
        }
    }
}

async fn nurse(pool: &SqlitePool, command: NurseCommand) -> Result<()> {
    match command {
        NurseCommand::Create(args) => {
            let draft: NewNurse = read_draft(&args.file)?;
            print_json(&nurses::create(pool, &draft).await?)
        }
        NurseCommand::Update(args) => {
            let draft: NewNurse = read_draft(&args.file)?;
            print_json(&nurses::update(pool, args.id, &draft).await?)
        }
        NurseCommand::Show(args) => print_json(&nurses::get(pool, args.id).await?),
        NurseCommand::Delete(args) => {
            nurses::delete(pool, args.id).await?;
            info!("Enfermeiro {} removido", args.id);
            Ok(())
        }
        NurseCommand::List(args) => {
            let filter = NurseFilter {
                search: args.search,
                sector_id: args.sector,
                shift: args.shift,
                status: args.status,
            };
            print_json(&nurses::list(pool, &filter).await?)
        }
    }
}

async fn patient(pool: &SqlitePool, command: PatientCommand) -> Result<()> {
    match command {
        PatientCommand::Create(args) => {
            let draft: NewPatient = read_draft(&args.file)?;
            print_json(&patients::create(pool, &draft).await?)
        }
        PatientCommand::Update(args) => {
            let draft: NewPatient = read_draft(&args.file)?;
            print_json(&patients::update(pool, args.id, &draft).await?)
        }
        PatientCommand::Show(args) => print_json(&patients::get(pool, args.id).await?),
        PatientCommand::Delete(args) => {
            patients::delete(pool, args.id).await?;
            info!("Paciente {} removido", args.id);
            Ok(())
        }
        PatientCommand::List(args) => {
            let filter = PatientFilter {
                search: args.search,
                blood_type: args.blood_type,
                sex: args.sex,
            };
            print_json(&patients::list(pool, &filter).await?)
        }
    }
}
