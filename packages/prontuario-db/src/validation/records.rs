use chrono::NaiveDate;

use super::rules::{
    validate_age, validate_cpf, validate_email, validate_name, validate_optional_email,
    validate_optional_name, validate_optional_phone, validate_phone, validate_rg,
    PATIENT_AGE_RANGE, STAFF_AGE_RANGE,
};
use super::{CorenNumber, CrmNumber, NameField, PhoneField, Validate, ValidationError};
use crate::models::{NewDoctor, NewNurse, NewNursingSector, NewPatient};

impl Validate for NewDoctor {
    fn validate_at(&self, today: NaiveDate) -> Result<(), ValidationError> {
        validate_name(NameField::Name, &self.name)?;
        validate_phone(PhoneField::Phone, &self.phone)?;
        validate_age(self.birth_date, today, STAFF_AGE_RANGE)?;
        validate_cpf(&self.cpf)?;
        CrmNumber::parse(&self.crm)?;
        validate_email(&self.email)
    }
}

impl Validate for NewNursingSector {
    fn validate_at(&self, _today: NaiveDate) -> Result<(), ValidationError> {
        validate_name(NameField::SectorName, &self.name)
    }
}

impl Validate for NewNurse {
    fn validate_at(&self, today: NaiveDate) -> Result<(), ValidationError> {
        validate_name(NameField::Name, &self.name)?;
        validate_phone(PhoneField::Phone, &self.phone)?;
        validate_age(self.birth_date, today, STAFF_AGE_RANGE)?;
        validate_cpf(&self.cpf)?;
        CorenNumber::parse(&self.coren)?;
        validate_email(&self.email)
    }
}

impl Validate for NewPatient {
    fn validate_at(&self, today: NaiveDate) -> Result<(), ValidationError> {
        validate_name(NameField::Name, &self.name)?;
        validate_name(NameField::MotherName, &self.mother_name)?;
        validate_optional_name(NameField::FatherName, self.father_name.as_deref())?;
        validate_phone(PhoneField::PrimaryPhone, &self.primary_phone)?;
        validate_optional_phone(PhoneField::SecondaryPhone, self.secondary_phone.as_deref())?;
        validate_age(self.birth_date, today, PATIENT_AGE_RANGE)?;
        validate_cpf(&self.cpf)?;
        validate_rg(&self.rg)?;
        validate_optional_email(self.email.as_deref())
    }
}
