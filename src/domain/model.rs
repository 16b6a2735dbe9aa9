use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 表單上的六個使用者欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Age,
    Email,
    EmploymentStatus,
    Reason,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::FirstName,
        Field::LastName,
        Field::Age,
        Field::Email,
        Field::EmploymentStatus,
        Field::Reason,
    ];

    /// 寫入文件時使用的鍵名
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "nombres",
            Field::LastName => "apellidos",
            Field::Age => "edad",
            Field::Email => "email",
            Field::EmploymentStatus => "estatusLaboral",
            Field::Reason => "motivo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "Nombres",
            Field::LastName => "Apellidos",
            Field::Age => "Edad",
            Field::Email => "Correo Electrónico",
            Field::EmploymentStatus => "Estatus Laboral",
            Field::Reason => "Motivo para tomar el programa",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    #[serde(rename = "Empleado/a")]
    Employed,
    #[serde(rename = "Desempleado/a")]
    Unemployed,
    #[serde(rename = "Jubilado/a")]
    Retired,
    #[serde(rename = "Estudiante")]
    Student,
    #[serde(rename = "Independiente")]
    SelfEmployed,
    #[serde(rename = "Dueño de negocio")]
    BusinessOwner,
    #[serde(rename = "Profesionista")]
    Professional,
}

impl EmploymentStatus {
    /// 顯示順序與選單一致
    pub const ALL: [EmploymentStatus; 7] = [
        EmploymentStatus::Employed,
        EmploymentStatus::Unemployed,
        EmploymentStatus::Retired,
        EmploymentStatus::Student,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::BusinessOwner,
        EmploymentStatus::Professional,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "Empleado/a",
            EmploymentStatus::Unemployed => "Desempleado/a",
            EmploymentStatus::Retired => "Jubilado/a",
            EmploymentStatus::Student => "Estudiante",
            EmploymentStatus::SelfEmployed => "Independiente",
            EmploymentStatus::BusinessOwner => "Dueño de negocio",
            EmploymentStatus::Professional => "Profesionista",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown employment status '{0}'")]
pub struct UnknownEmploymentStatus(pub String);

impl FromStr for EmploymentStatus {
    type Err = UnknownEmploymentStatus;

    // 完全比對，不做大小寫轉換
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmploymentStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| UnknownEmploymentStatus(s.to_string()))
    }
}

/// 使用者輸入的原始值，尚未驗證
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub first_name: String,
    pub last_name: String,
    pub age: String,
    pub email: String,
    pub employment_status: String,
    pub reason: String,
}

impl FormInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Age => &self.age,
            Field::Email => &self.email,
            Field::EmploymentStatus => &self.employment_status,
            Field::Reason => &self.reason,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Age => &mut self.age,
            Field::Email => &mut self.email,
            Field::EmploymentStatus => &mut self.employment_status,
            Field::Reason => &mut self.reason,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

/// 每個欄位最多一則錯誤訊息，依欄位順序排列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }
}

/// 通過驗證的報名資料；只能經由 `core::validation::validate` 建立
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    #[serde(rename = "nombres")]
    pub(crate) first_name: String,
    #[serde(rename = "apellidos")]
    pub(crate) last_name: String,
    #[serde(rename = "edad")]
    pub(crate) age: u8,
    #[serde(rename = "email")]
    pub(crate) email: String,
    #[serde(rename = "estatusLaboral")]
    pub(crate) employment_status: EmploymentStatus,
    #[serde(rename = "motivo")]
    pub(crate) reason: String,
}

impl Registration {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn employment_status(&self) -> EmploymentStatus {
        self.employment_status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// 實際寫入資料庫的文件。`submitted_at` 與 `processed` 由送出流程設定。
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationDocument {
    #[serde(flatten)]
    pub registration: Registration,
    #[serde(rename = "fechaRegistro", serialize_with = "serialize_iso_millis")]
    pub submitted_at: DateTime<Utc>,
    #[serde(rename = "procesado")]
    pub processed: bool,
}

impl RegistrationDocument {
    pub fn new(registration: Registration, submitted_at: DateTime<Utc>) -> Self {
        Self {
            registration,
            submitted_at,
            processed: false,
        }
    }
}

// 2024-05-01T12:30:00.000Z
fn serialize_iso_millis<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// 新建立的遠端文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHandle {
    /// 完整資源名稱，例如 `projects/p/databases/(default)/documents/registros/abc`
    pub name: String,
    pub id: String,
}

impl DocumentHandle {
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = name.rsplit('/').next().unwrap_or_default().to_string();
        Self { name, id }
    }
}
