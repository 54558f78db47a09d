//! Static fault-code catalog plus the VIN lookup tables used for offline
//! vehicle identification.

use std::sync::OnceLock;

use regex::Regex;

use crate::diagnostic::{Severity, System};
use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub system: System,
    pub severity: Severity,
    ru: &'static str,
    az: &'static str,
    en: &'static str,
    /// Estimated repair cost range, e.g. "50 - 250 AZN".
    pub cost: &'static str,
}

impl CatalogEntry {
    pub fn description(&self, lang: Language) -> &'static str {
        match lang {
            Language::Ru => self.ru,
            Language::Az => self.az,
            Language::En => self.en,
        }
    }
}

const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        code: "P0300",
        system: System::Engine,
        severity: Severity::High,
        ru: "Обнаружены множественные пропуски зажигания",
        az: "Çoxsaylı alışdırma buraxılışları aşkar edildi",
        en: "Random/multiple cylinder misfire detected",
        cost: "50 - 250 AZN",
    },
    CatalogEntry {
        code: "P0171",
        system: System::Fuel,
        severity: Severity::Medium,
        ru: "Слишком бедная смесь (Банк 1)",
        az: "Həddindən artıq kasıb qarışıq (Bank 1)",
        en: "System too lean (Bank 1)",
        cost: "40 - 120 AZN",
    },
    CatalogEntry {
        code: "P0420",
        system: System::Exhaust,
        severity: Severity::Medium,
        ru: "Эффективность катализатора ниже порога",
        az: "Katalizatorun səmərəliliyi həddindən aşağıdır",
        en: "Catalyst system efficiency below threshold (Bank 1)",
        cost: "300 - 1500 AZN",
    },
    CatalogEntry {
        code: "P0101",
        system: System::Engine,
        severity: Severity::Medium,
        ru: "Проблема с диапазоном/работой датчика MAF",
        az: "MAF sensorunun diapazonu/işində problem",
        en: "Mass air flow sensor range/performance problem",
        cost: "80 - 300 AZN",
    },
    CatalogEntry {
        code: "P0505",
        system: System::Engine,
        severity: Severity::Low,
        ru: "Неисправность системы управления холостым ходом",
        az: "Boş gediş idarəetmə sisteminin nasazlığı",
        en: "Idle air control system malfunction",
        cost: "30 - 100 AZN",
    },
    CatalogEntry {
        code: "C0034",
        system: System::Brakes,
        severity: Severity::High,
        ru: "Датчик скорости правого переднего колеса",
        az: "Sağ ön təkər sürət sensoru",
        en: "Right front wheel speed sensor circuit",
        cost: "45 - 150 AZN",
    },
    CatalogEntry {
        code: "B0001",
        system: System::Airbags,
        severity: Severity::High,
        ru: "Управление развертыванием подушки безопасности водителя",
        az: "Sürücü hava yastığının açılma idarəetməsi",
        en: "Driver frontal airbag deployment control",
        cost: "100 - 400 AZN",
    },
    CatalogEntry {
        code: "P0700",
        system: System::Transmission,
        severity: Severity::Medium,
        ru: "Неисправность системы управления коробкой передач",
        az: "Sürətlər qutusunun idarəetmə sisteminin nasazlığı",
        en: "Transmission control system malfunction",
        cost: "150 - 800 AZN",
    },
    CatalogEntry {
        code: "P0562",
        system: System::Electronics,
        severity: Severity::Low,
        ru: "Низкое напряжение бортовой сети",
        az: "Bort şəbəkəsinin gərginliyi aşağıdır",
        en: "System voltage low",
        cost: "20 - 200 AZN",
    },
    CatalogEntry {
        code: "P0442",
        system: System::Fuel,
        severity: Severity::Low,
        ru: "Малая утечка в системе улавливания паров топлива",
        az: "Yanacaq buxarı sistemində kiçik sızma",
        en: "Evaporative emission system small leak detected",
        cost: "20 - 150 AZN",
    },
];

pub fn lookup(code: &str) -> Option<&'static CatalogEntry> {
    ENTRIES.iter().find(|e| e.code.eq_ignore_ascii_case(code.trim()))
}

pub fn entries() -> &'static [CatalogEntry] {
    ENTRIES
}

fn dtc_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[PCBU][0-3][0-9A-F]{3}$").expect("valid DTC regex"))
}

/// Whether `code` looks like an SAE J2012 trouble code, e.g. `P0300`.
pub fn is_well_formed(code: &str) -> bool {
    dtc_pattern().is_match(&code.trim().to_uppercase())
}

const WMI: &[(&str, &str)] = &[
    ("WBA", "BMW"),
    ("WBS", "BMW M"),
    ("WDC", "Mercedes-Benz"),
    ("WDD", "Mercedes-Benz"),
    ("WVW", "Volkswagen"),
    ("WAU", "Audi"),
    ("VIN", "Volkswagen"),
    ("1G1", "Chevrolet"),
    ("2G1", "Chevrolet"),
    ("5YJ", "Tesla"),
    ("JTD", "Toyota"),
    ("JNK", "Infiniti"),
    ("JHM", "Honda"),
    ("KMH", "Hyundai"),
    ("KNA", "Kia"),
    ("SAL", "Land Rover"),
];

/// Manufacturer for a World Manufacturer Identifier (first three VIN characters).
pub fn manufacturer(wmi: &str) -> Option<&'static str> {
    WMI.iter()
        .find(|(prefix, _)| prefix.eq_ignore_ascii_case(wmi))
        .map(|(_, make)| *make)
}

// I, O, Q, U and Z are never used as model-year codes.
const MODEL_YEARS: &[(char, i32)] = &[
    ('A', 2010),
    ('B', 2011),
    ('C', 2012),
    ('D', 2013),
    ('E', 2014),
    ('F', 2015),
    ('G', 2016),
    ('H', 2017),
    ('J', 2018),
    ('K', 2019),
    ('L', 2020),
    ('M', 2021),
    ('N', 2022),
    ('P', 2023),
    ('R', 2024),
    ('S', 2025),
    ('T', 2026),
    ('V', 2027),
    ('W', 2028),
    ('X', 2029),
    ('Y', 2030),
];

/// Model year encoded by the 10th VIN character.
pub fn model_year(code: char) -> Option<i32> {
    let code = code.to_ascii_uppercase();
    MODEL_YEARS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, year)| *year)
}
