//! Catalog - the fixed vocabularies offered as choices.
//!
//! Every choice has a stable `key` that travels on the wire and a `label`
//! used when the record is rendered for reviewers. Transports may localize
//! labels for buttons, but the engine only ever compares keys.

use serde::{Deserialize, Serialize};

/// Region every branch belongs to.
pub const REGION: &str = "Andijon";

/// MIME type an IELTS certificate upload must carry.
pub const CERTIFICATE_MIME_TYPE: &str = "application/pdf";

/// One selectable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub key: &'static str,
    pub label: &'static str,
}

const fn opt(key: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { key, label }
}

pub const BRANCHES: [ChoiceOption; 4] = [
    opt("clara", "Clara"),
    opt("severniy", "Severniy"),
    opt("business_center", "Business Center"),
    opt("yangi_bozor", "Yangi Bozor"),
];

pub const DEPARTMENTS: [ChoiceOption; 4] = [
    opt("akademik", "Akademik bo'lim"),
    opt("sotuv", "Sotuv bo'limi"),
    opt("smm", "SMM bo'limi"),
    opt("operational", "Operational Team"),
];

const ACADEMIC_POSITIONS: [ChoiceOption; 5] = [
    opt("sat_teacher", "SAT Teacher"),
    opt("ielts_instructor", "IELTS Instructor"),
    opt("general_english_teacher", "General English Teacher"),
    opt("kids_english_teacher", "Kids English Teacher"),
    opt("assistant_teacher", "Assistant Teacher"),
];

const SALES_POSITIONS: [ChoiceOption; 2] = [
    opt("administrator", "Administrator"),
    opt("operator", "Operator"),
];

const SMM_POSITIONS: [ChoiceOption; 2] = [
    opt("brand_face", "Brand Face"),
    opt("videographer_editor", "Videographer / Editor"),
];

const OPERATIONAL_POSITIONS: [ChoiceOption; 6] = [
    opt("branch_manager", "Branch Manager"),
    opt("hr", "HR"),
    opt("supervisor", "Supervisor"),
    opt("marketing_manager", "Marketing Manager"),
    opt("smm_manager", "SMM Manager"),
    opt("cleaner", "Tozalik hodimasi"),
];

/// Positions open in a department; empty for an unknown department key.
pub fn positions(department_key: &str) -> &'static [ChoiceOption] {
    match department_key {
        "akademik" => &ACADEMIC_POSITIONS,
        "sotuv" => &SALES_POSITIONS,
        "smm" => &SMM_POSITIONS,
        "operational" => &OPERATIONAL_POSITIONS,
        _ => &[],
    }
}

pub const EDUCATION_LEVELS: [ChoiceOption; 3] = [
    opt("secondary", "O'rta"),
    opt("vocational", "O'rta-maxsus"),
    opt("higher", "Oliy"),
];

pub const GENDERS: [ChoiceOption; 2] = [opt("male", "Erkak"), opt("female", "Ayol")];

pub const WORK_EXPERIENCE: [ChoiceOption; 5] = [
    opt("none", "No experience"),
    opt("one_year", "1 year"),
    opt("one_to_three", "1-3 years"),
    opt("three_to_five", "3-5 years"),
    opt("five_plus", "5+ years"),
];

pub const YES_NO: [ChoiceOption; 2] = [opt("yes", "Ha"), opt("no", "Yo'q")];

pub const PHONE_CONFIRMATION: [ChoiceOption; 2] =
    [opt("yes", "Tasdiqlash"), opt("edit", "O'zgartirish")];

pub const SUBMIT_CONFIRMATION: [ChoiceOption; 1] = [opt("yes", "Tasdiqlash")];

/// Self-assessed proficiency in a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageLevel {
    Low,
    Medium,
    Advanced,
}

impl LanguageLevel {
    pub const ALL: [LanguageLevel; 3] = [Self::Low, Self::Medium, Self::Advanced];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Past",
            Self::Medium => "O'rtacha",
            Self::Advanced => "Ilg'or",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.key() == key)
    }

    /// Medium and advanced speakers are asked for a spoken sample.
    pub fn requires_sample(&self) -> bool {
        matches!(self, Self::Medium | Self::Advanced)
    }
}

pub const LANGUAGE_LEVELS: [ChoiceOption; 3] = [
    opt("low", "Past"),
    opt("medium", "O'rtacha"),
    opt("advanced", "Ilg'or"),
];

/// Looks up an option by key.
pub fn find(options: &[ChoiceOption], key: &str) -> Option<ChoiceOption> {
    options.iter().copied().find(|o| o.key == key)
}

/// Resolves a key to its label within a set, if present.
pub fn label_of(options: &[ChoiceOption], key: &str) -> Option<&'static str> {
    find(options, key).map(|o| o.label)
}
