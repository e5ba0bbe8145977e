use anyhow::Result;
use chrono::NaiveDate;
use prontuario_db::models::{
    BloodType, NewDoctor, NewNurse, NewNursingSector, NewPatient, Sex, Shift, Status,
};
use prontuario_db::repository::doctors::{self, DoctorFilter};
use prontuario_db::repository::nurses::{self, NurseFilter};
use prontuario_db::repository::patients::{self, PatientFilter};
use prontuario_db::repository::sectors::{self, SectorFilter};
use prontuario_db::{init_db_pool, DbConfig, DbError, ValidationError};
use sqlx::SqlitePool;
use std::time::Duration;
use tempfile::{tempdir, TempDir};
use uuid::Uuid;

async fn test_pool() -> Result<(TempDir, SqlitePool)> {
    let temp_dir = tempdir()?;
    let config = DbConfig {
        db_path: temp_dir.path().join("prontuario.db").display().to_string(),
        max_connections: 2,
        trace_level: 0,
    };
    let pool = init_db_pool(&config).await?;
    Ok((temp_dir, pool))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn doctor(name: &str, cpf: &str, crm: &str) -> NewDoctor {
    NewDoctor {
        name: name.into(),
        phone: "11987654321".into(),
        email: format!("{}@clinica.med.br", cpf),
        birth_date: date(1975, 4, 2),
        cpf: cpf.into(),
        status: Status::Active,
        crm: crm.into(),
    }
}

fn nurse(name: &str, cpf: &str, coren: &str, sector_id: Uuid) -> NewNurse {
    NewNurse {
        name: name.into(),
        coren: coren.into(),
        sector_id,
        phone: "4132654321".into(),
        email: format!("{}@clinica.med.br", cpf),
        birth_date: date(1988, 9, 12),
        cpf: cpf.into(),
        shift: Shift::Morning,
        status: Status::Active,
    }
}

fn patient(name: &str, cpf: &str, rg: &str, phone: &str) -> NewPatient {
    NewPatient {
        name: name.into(),
        birth_date: date(1995, 1, 20),
        sex: Sex::Female,
        cpf: cpf.into(),
        rg: rg.into(),
        mother_name: "Ana Souza".into(),
        father_name: None,
        primary_phone: phone.into(),
        secondary_phone: None,
        email: None,
        blood_type: None,
    }
}

fn sector(name: &str) -> NewNursingSector {
    NewNursingSector { name: name.into() }
}

fn assert_constraint_violation<T: std::fmt::Debug>(result: Result<T, DbError>) {
    match result {
        Err(err @ DbError::ConstraintViolation(_)) => assert!(err.is_rejection()),
        other => panic!("esperava violação de unicidade, obtido {:?}", other),
    }
}

async fn assert_only_patient(pool: &SqlitePool, id: Uuid) -> Result<()> {
    let all = patients::list(pool, &PatientFilter::default()).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    Ok(())
}

#[tokio::test]
async fn test_doctor_crud() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let draft = doctor("Carlos Lima", "12345678901", "crm/sp 123456");
    let created = doctors::create(&pool, &draft).await?;
    assert_eq!(created.crm, "CRM/SP 123456");
    assert_eq!(created.status, Status::Active);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = doctors::get(&pool, created.id).await?;
    assert_eq!(fetched.name, "Carlos Lima");
    assert_eq!(fetched.birth_date, date(1975, 4, 2));

    tokio::time::sleep(Duration::from_millis(10)).await;

    let mut edit = doctor("Carlos Lima Neto", "12345678901", "CRM/SP 123456");
    edit.status = Status::Inactive;
    let updated = doctors::update(&pool, created.id, &edit).await?;
    assert_eq!(updated.name, "Carlos Lima Neto");
    assert_eq!(updated.status, Status::Inactive);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    doctors::delete(&pool, created.id).await?;
    assert!(matches!(doctors::get(&pool, created.id).await, Err(DbError::NotFound(_))));
    assert!(matches!(doctors::delete(&pool, created.id).await, Err(DbError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_invalid_record_is_not_persisted() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let draft = doctor("Carlos Lima", "12345678901", "CRM/XX 123456");
    let result = doctors::create(&pool, &draft).await;
    assert!(matches!(result, Err(DbError::Validation(ValidationError::InvalidCrm))));
    assert!(doctors::list(&pool, &DoctorFilter::default()).await?.is_empty());

    let draft = doctor("Carlos Lima", "12345678901", "CRM/SP 123456");
    let created = doctors::create(&pool, &draft).await?;
    let mut bad_edit = doctor("Carlos Lima", "1234567890", "CRM/SP 123456");
    bad_edit.name = "Outro Nome".into();
    let result = doctors::update(&pool, created.id, &bad_edit).await;
    assert!(matches!(result, Err(DbError::Validation(ValidationError::InvalidCpf))));
    assert_eq!(doctors::get(&pool, created.id).await?.name, "Carlos Lima");

    Ok(())
}

#[tokio::test]
async fn test_update_missing_record() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let result = patients::update(
        &pool,
        Uuid::new_v4(),
        &patient("Maria Souza", "11122233344", "1234567", "21987654321"),
    )
    .await;
    assert!(matches!(result, Err(DbError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_duplicate_patient_cpf() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let first = patients::create(
        &pool,
        &patient("Maria Souza", "11122233344", "1234567", "21987654321"),
    )
    .await?;

    let result = patients::create(
        &pool,
        &patient("Joana Dias", "11122233344", "7654321", "31987654321"),
    )
    .await;
    match result {
        Err(err @ DbError::ConstraintViolation(_)) => assert!(err.is_rejection()),
        other => panic!("esperava violação de unicidade, obtido {:?}", other),
    }

    assert_only_patient(&pool, first.id).await?;

    Ok(())
}

#[tokio::test]
async fn test_patients_without_email_coexist() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let mut first = patient("Maria Souza", "11122233344", "1234567", "21987654321");
    first.email = Some(String::new());
    first.secondary_phone = Some(String::new());
    let first = patients::create(&pool, &first).await?;
    assert_eq!(first.email, None);
    assert_eq!(first.secondary_phone, None);

    patients::create(
        &pool,
        &patient("Joana Dias", "55566677788", "7654321", "31987654321"),
    )
    .await?;

    let mut third = patient("Paula Reis", "99988877766", "11223344", "41987654321");
    third.email = Some("paula@exemplo.com".into());
    patients::create(&pool, &third).await?;

    let mut fourth = patient("Rita Melo", "12312312312", "55667788", "51987654321");
    fourth.email = Some("paula@exemplo.com".into());
    let result = patients::create(&pool, &fourth).await;
    assert!(matches!(result, Err(DbError::ConstraintViolation(_))));

    Ok(())
}

#[tokio::test]
async fn test_sector_delete_is_restricted() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let sector = sectors::create(&pool, &sector("Pediatria")).await?;
    let draft = nurse("Beatriz Alves", "98765432100", "COREN-SP 123456-ENF", sector.id);
    let n = nurses::create(&pool, &draft).await?;

    let result = sectors::delete(&pool, sector.id).await;
    match result {
        Err(DbError::ConstraintViolation(reason)) => {
            assert!(reason.contains("enfermeiros vinculados"))
        }
        other => panic!("esperava exclusão recusada, obtido {:?}", other),
    }
    assert_eq!(sectors::get(&pool, sector.id).await?.name, "Pediatria");

    nurses::delete(&pool, n.id).await?;
    sectors::delete(&pool, sector.id).await?;
    assert!(matches!(sectors::get(&pool, sector.id).await, Err(DbError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_nurse_requires_existing_sector() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let result = nurses::create(
        &pool,
        &nurse("Beatriz Alves", "98765432100", "COREN-SP 123456-ENF", Uuid::new_v4()),
    )
    .await;
    assert!(matches!(result, Err(DbError::ConstraintViolation(_))));

    Ok(())
}

#[tokio::test]
async fn test_duplicate_sector_name() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    sectors::create(&pool, &sector("Emergencia")).await?;
    let result = sectors::create(&pool, &sector("Emergencia")).await;
    assert!(matches!(result, Err(DbError::ConstraintViolation(_))));

    let result = sectors::create(&pool, &sector("UTI 2")).await;
    assert!(matches!(result, Err(DbError::Validation(_))));

    Ok(())
}

#[tokio::test]
async fn test_doctor_list_search_and_filter() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    doctors::create(&pool, &doctor("Pedro Santos", "11111111111", "CRM/RJ 111111")).await?;
    doctors::create(&pool, &doctor("Ana Ribeiro", "22222222222", "CRM/SP 222222")).await?;
    let mut inactive = doctor("Bruno Costa", "33333333333", "CRM/MG 333333");
    inactive.status = Status::Inactive;
    doctors::create(&pool, &inactive).await?;

    let names: Vec<String> = doctors::list(&pool, &DoctorFilter::default())
        .await?
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["Ana Ribeiro", "Bruno Costa", "Pedro Santos"]);

    let by_crm = doctors::list(
        &pool,
        &DoctorFilter { search: Some("crm/sp".into()), ..Default::default() },
    )
    .await?;
    assert_eq!(by_crm.len(), 1);
    assert_eq!(by_crm[0].name, "Ana Ribeiro");

    let by_cpf = doctors::list(
        &pool,
        &DoctorFilter { search: Some("3333".into()), ..Default::default() },
    )
    .await?;
    assert_eq!(by_cpf.len(), 1);
    assert_eq!(by_cpf[0].name, "Bruno Costa");

    let active = doctors::list(
        &pool,
        &DoctorFilter { status: Some(Status::Active), ..Default::default() },
    )
    .await?;
    assert_eq!(active.len(), 2);

    let none = doctors::list(
        &pool,
        &DoctorFilter { search: Some("%".into()), ..Default::default() },
    )
    .await?;
    assert!(none.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_nurse_filters() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let uti = sectors::create(&pool, &sector("Terapia Intensiva")).await?;
    let ped = sectors::create(&pool, &sector("Pediatria")).await?;

    let draft = nurse("Beatriz Alves", "10000000001", "COREN-SP 100001-ENF", uti.id);
    nurses::create(&pool, &draft).await?;
    let mut night = nurse("Carla Nunes", "10000000002", "COREN-SP 100002-TE", uti.id);
    night.shift = Shift::Night;
    nurses::create(&pool, &night).await?;
    let draft = nurse("Daniel Rocha", "10000000003", "COREN-BA 100003-ENFPED", ped.id);
    nurses::create(&pool, &draft).await?;

    let filter = NurseFilter { sector_id: Some(uti.id), ..Default::default() };
    let in_uti = nurses::list(&pool, &filter).await?;
    assert_eq!(in_uti.len(), 2);

    let filter = NurseFilter { shift: Some(Shift::Night), ..Default::default() };
    let at_night = nurses::list(&pool, &filter).await?;
    assert_eq!(at_night.len(), 1);
    assert_eq!(at_night[0].name, "Carla Nunes");

    let filter = NurseFilter { search: Some("enfped".into()), ..Default::default() };
    let by_coren = nurses::list(&pool, &filter).await?;
    assert_eq!(by_coren.len(), 1);
    assert_eq!(by_coren[0].sector_id, ped.id);

    let filter = SectorFilter { search: Some("TERAPIA".into()) };
    assert_eq!(sectors::list(&pool, &filter).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_patient_filters() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let mut maria = patient("Maria Souza", "11122233344", "1234567", "21987654321");
    maria.blood_type = Some(BloodType::ONegative);
    maria.father_name = Some("Jorge Souza".into());
    patients::create(&pool, &maria).await?;

    let mut joao = patient("Joao Pereira", "55566677788", "7654321", "31987654321");
    joao.sex = Sex::Male;
    joao.blood_type = Some(BloodType::APositive);
    joao.secondary_phone = Some("8532654321".into());
    patients::create(&pool, &joao).await?;

    let negatives = patients::list(
        &pool,
        &PatientFilter { blood_type: Some(BloodType::ONegative), ..Default::default() },
    )
    .await?;
    assert_eq!(negatives.len(), 1);
    assert_eq!(negatives[0].father_name.as_deref(), Some("Jorge Souza"));

    let filter = PatientFilter { sex: Some(Sex::Male), ..Default::default() };
    let men = patients::list(&pool, &filter).await?;
    assert_eq!(men.len(), 1);

    let filter = PatientFilter { search: Some("jorge".into()), ..Default::default() };
    let by_father = patients::list(&pool, &filter).await?;
    assert_eq!(by_father.len(), 1);

    let filter = PatientFilter { search: Some("8532".into()), ..Default::default() };
    let by_secondary = patients::list(&pool, &filter).await?;
    assert_eq!(by_secondary.len(), 1);
    assert_eq!(by_secondary[0].name, "Joao Pereira");

    Ok(())
}

#[tokio::test]
async fn test_crm_collides_regardless_of_case() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let draft = doctor("Carlos Lima", "12345678901", "crm/sp 123456");
    let first = doctors::create(&pool, &draft).await?;

    let draft = doctor("Pedro Santos", "10987654321", "CRM/SP 123456");
    assert_constraint_violation(doctors::create(&pool, &draft).await);

    let all = doctors::list(&pool, &DoctorFilter::default()).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[0].crm, "CRM/SP 123456");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_doctor_email_and_cpf() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let first = doctors::create(&pool, &doctor("Carlos Lima", "12345678901", "CRM/SP 123456"))
        .await?;

    let mut same_email = doctor("Pedro Santos", "10987654321", "CRM/RJ 654321");
    same_email.email = first.email.clone();
    assert_constraint_violation(doctors::create(&pool, &same_email).await);

    let mut same_cpf = doctor("Pedro Santos", "12345678901", "CRM/RJ 654321");
    same_cpf.email = "pedro@clinica.med.br".into();
    assert_constraint_violation(doctors::create(&pool, &same_cpf).await);

    let all = doctors::list(&pool, &DoctorFilter::default()).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, first.id);

    Ok(())
}

#[tokio::test]
async fn test_coren_collides_regardless_of_case() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let uti = sectors::create(&pool, &sector("Terapia Intensiva")).await?;
    let draft = nurse("Beatriz Alves", "10000000001", "coren-sp 100001-enf", uti.id);
    let first = nurses::create(&pool, &draft).await?;
    assert_eq!(first.coren, "COREN-SP 100001-ENF");

    let draft = nurse("Carla Nunes", "10000000002", "COREN-SP 100001-ENF", uti.id);
    assert_constraint_violation(nurses::create(&pool, &draft).await);

    let mut same_email = nurse("Carla Nunes", "10000000002", "COREN-SP 100002-TE", uti.id);
    same_email.email = first.email.clone();
    assert_constraint_violation(nurses::create(&pool, &same_email).await);

    let all = nurses::list(&pool, &NurseFilter::default()).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, first.id);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_patient_rg() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let first = patients::create(
        &pool,
        &patient("Maria Souza", "11122233344", "1234567", "21987654321"),
    )
    .await?;

    let result = patients::create(
        &pool,
        &patient("Joana Dias", "55566677788", "1234567", "31987654321"),
    )
    .await;
    assert_constraint_violation(result);

    assert_only_patient(&pool, first.id).await
}

#[tokio::test]
async fn test_duplicate_patient_primary_phone() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let first = patients::create(
        &pool,
        &patient("Maria Souza", "11122233344", "1234567", "21987654321"),
    )
    .await?;

    let result = patients::create(
        &pool,
        &patient("Joana Dias", "55566677788", "7654321", "21987654321"),
    )
    .await;
    assert_constraint_violation(result);

    assert_only_patient(&pool, first.id).await
}

#[tokio::test]
async fn test_search_ignores_accented_case() -> Result<()> {
    let (_dir, pool) = test_pool().await?;

    let mut joao = patient("João Ávila", "11122233344", "1234567", "21987654321");
    joao.sex = Sex::Male;
    patients::create(&pool, &joao).await?;
    patients::create(
        &pool,
        &patient("Maria Souza", "55566677788", "7654321", "31987654321"),
    )
    .await?;

    let filter = PatientFilter { search: Some("ávila".into()), ..Default::default() };
    let found = patients::list(&pool, &filter).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "João Ávila");

    let filter = PatientFilter { search: Some("JOÃO".into()), ..Default::default() };
    assert_eq!(patients::list(&pool, &filter).await?.len(), 1);

    doctors::create(&pool, &doctor("Érica Gonçalves", "12345678901", "CRM/SP 123456")).await?;
    let filter = DoctorFilter { search: Some("érica".into()), ..Default::default() };
    assert_eq!(doctors::list(&pool, &filter).await?.len(), 1);

    Ok(())
}
