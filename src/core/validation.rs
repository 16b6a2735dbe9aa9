//! 報名表單欄位驗證
//!
//! 每個欄位獨立檢查，所有錯誤一次收集，不會在第一個錯誤就停止。
//! 不做 trim 或大小寫轉換：空字串才算「未填」。

use crate::domain::model::{EmploymentStatus, Field, FieldErrors, FormInput, Registration};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 100;
pub const MIN_REASON_CHARS: usize = 10;
pub const MAX_REASON_CHARS: usize = 500;

pub const MSG_FIRST_NAME_REQUIRED: &str = "Los nombres son requeridos";
pub const MSG_LAST_NAME_REQUIRED: &str = "Los apellidos son requeridos";
pub const MSG_AGE_REQUIRED: &str = "La edad es requerida";
pub const MSG_AGE_NOT_INTEGER: &str = "La edad debe ser un número entero";
pub const MSG_AGE_TOO_LOW: &str = "Debe ser mayor de 18 años";
pub const MSG_AGE_TOO_HIGH: &str = "Edad no válida";
pub const MSG_EMAIL_REQUIRED: &str = "El email es requerido";
pub const MSG_EMAIL_INVALID: &str = "Email inválido";
pub const MSG_STATUS_REQUIRED: &str = "El estatus laboral es requerido";
pub const MSG_STATUS_INVALID: &str = "Estatus laboral no válido";
pub const MSG_REASON_REQUIRED: &str = "El motivo es requerido";
pub const MSG_REASON_TOO_SHORT: &str =
    "Por favor, describa su motivo con al menos 10 caracteres";
pub const MSG_REASON_TOO_LONG: &str = "Máximo 500 caracteres";

// WHATWG "valid e-mail address"
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// 驗證整份表單，成功時回傳可送出的 `Registration`
pub fn validate(input: &FormInput) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let age = check_age(&input.age);
    let status = check_employment_status(&input.employment_status);

    for field in Field::ALL {
        let message = match field {
            Field::Age => age.as_ref().err().copied(),
            Field::EmploymentStatus => status.as_ref().err().copied(),
            other => check_text_field(other, input.get(other)),
        };
        if let Some(message) = message {
            errors.insert(field, message);
        }
    }

    match (age, status) {
        (Ok(age), Ok(employment_status)) if errors.is_empty() => Ok(Registration {
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            age,
            email: input.email.clone(),
            employment_status,
            reason: input.reason.clone(),
        }),
        _ => Err(errors),
    }
}

/// 單一欄位檢查，用於使用者修改欄位後即時重新驗證
pub fn validate_field(field: Field, value: &str) -> Option<&'static str> {
    match field {
        Field::Age => check_age(value).err(),
        Field::EmploymentStatus => check_employment_status(value).err(),
        other => check_text_field(other, value),
    }
}

fn check_text_field(field: Field, value: &str) -> Option<&'static str> {
    match field {
        Field::FirstName => value.is_empty().then_some(MSG_FIRST_NAME_REQUIRED),
        Field::LastName => value.is_empty().then_some(MSG_LAST_NAME_REQUIRED),
        Field::Email => check_email(value),
        Field::Reason => check_reason(value),
        Field::Age | Field::EmploymentStatus => None,
    }
}

fn check_age(value: &str) -> Result<u8, &'static str> {
    if value.is_empty() {
        return Err(MSG_AGE_REQUIRED);
    }

    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MSG_AGE_NOT_INTEGER);
    }

    let negative = value.starts_with('-');
    let age = match value.parse::<i64>() {
        Ok(age) => age,
        // 超出 i64 的整數
        Err(_) if negative => return Err(MSG_AGE_TOO_LOW),
        Err(_) => return Err(MSG_AGE_TOO_HIGH),
    };

    if age < MIN_AGE {
        Err(MSG_AGE_TOO_LOW)
    } else if age > MAX_AGE {
        Err(MSG_AGE_TOO_HIGH)
    } else {
        u8::try_from(age).map_err(|_| MSG_AGE_TOO_HIGH)
    }
}

fn check_email(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some(MSG_EMAIL_REQUIRED)
    } else if !EMAIL_RE.is_match(value) {
        Some(MSG_EMAIL_INVALID)
    } else {
        None
    }
}

fn check_employment_status(value: &str) -> Result<EmploymentStatus, &'static str> {
    if value.is_empty() {
        return Err(MSG_STATUS_REQUIRED);
    }
    value.parse().map_err(|_| MSG_STATUS_INVALID)
}

fn check_reason(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some(MSG_REASON_REQUIRED);
    }
    let len = value.chars().count();
    if len < MIN_REASON_CHARS {
        Some(MSG_REASON_TOO_SHORT)
    } else if len > MAX_REASON_CHARS {
        Some(MSG_REASON_TOO_LONG)
    } else {
        None
    }
}
