//! 靜態展示層：課程資訊、表單、欄位錯誤與提示訊息。
//! 只讀取 `FormView`，不含任何業務邏輯。

pub mod html;
pub mod text;

pub const ACADEMY_NAME: &str = "Academia Para Adultos";
pub const PROGRAM_SUBTITLE: &str =
    "Formulario de Inscripción - Programa de Educación Continua";
pub const FORM_TITLE: &str = "Formulario de Inscripción";
pub const FORM_INSTRUCTIONS: &str = "Complete la siguiente información para iniciar su proceso \
     de inscripción al Programa de Educación Continua para Adultos.";
pub const SUBMIT_LABEL: &str = "Enviar Solicitud de Inscripción";
pub const SUBMITTING_LABEL: &str = "Enviando...";
pub const REASON_HINT: &str =
    "Describa sus objetivos profesionales/personales (mínimo 10 caracteres)";
pub const REASON_PLACEHOLDER: &str = "Ej: Deseo desarrollar nuevas habilidades para mejorar mi \
     desempeño laboral, adquirir conocimientos actualizados en mi área profesional y ampliar \
     mis oportunidades de crecimiento...";

pub const INFO_TITLE: &str = "Información del Programa";

#[derive(Debug, Clone, Copy)]
pub struct InfoItem {
    pub title: &'static str,
    pub text: &'static str,
}

pub const INFO_ITEMS: [InfoItem; 4] = [
    InfoItem {
        title: "Horarios flexibles",
        text: "Clases disponibles en diferentes horarios para adaptarse a tu rutina",
    },
    InfoItem {
        title: "Instructores certificados",
        text: "Profesionales con amplia experiencia en educación de adultos",
    },
    InfoItem {
        title: "Certificación oficial",
        text: "Al finalizar recibirás un certificado reconocido",
    },
    InfoItem {
        title: "Duración del programa",
        text: "6 meses (240 horas lectivas)",
    },
];

pub const IMPORTANT_NOTE: &str = "Una vez enviado el formulario, recibirás un correo de \
     confirmación y un asesor se pondrá en contacto contigo en un plazo máximo de 48 horas \
     hábiles para programar una entrevista informativa.";

pub const PRIVACY_NOTE: &str = "Su información personal está protegida según nuestra Política \
     de Privacidad y será utilizada exclusivamente para fines académicos y de contacto \
     relacionado con el programa.";

pub const CONTACT_EMAIL: &str = "contacto@academiaadultos.com";
pub const CONTACT_PHONE: &str = "(555) 123-4567";

pub fn copyright(year: i32) -> String {
    format!(
        "© {} {} - Programa de Educación Continua. Todos los derechos reservados.",
        year, ACADEMY_NAME
    )
}

