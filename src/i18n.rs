use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    Az,
    En,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Ru => write!(f, "ru"),
            Language::Az => write!(f, "az"),
            Language::En => write!(f, "en"),
        }
    }
}

/// Short UI strings shared by reporters and local fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    UnknownModel,
    ModelNotSpecified,
    TechnicalSystemError,
    NotInLocalDatabase,
    OnlineCheckRequired,
    BeCareful,
    CriticalAdvice,
    WarningAdvice,
    ChatApology,
    Critical,
    Warning,
    NoErrors,
    Vehicle,
    Health,
    ErrorCodes,
    Date,
    ReportHeader,
    MonthlyTotal,
    Resolved,
    Persisting,
    New,
    Improvement,
    Good,
    Fair,
    Poor,
}

impl Text {
    pub fn get(self, lang: Language) -> &'static str {
        use Language::*;
        use Text::*;
        match (self, lang) {
            (UnknownModel, Ru) => "Неизвестная модель",
            (UnknownModel, Az) => "Naməlum model",
            (UnknownModel, En) => "Unknown model",
            (ModelNotSpecified, Ru) => "Модель не указана",
            (ModelNotSpecified, Az) => "Model qeyd olunmayıb",
            (ModelNotSpecified, En) => "Model not specified",
            (TechnicalSystemError, Ru) => "Техническая ошибка системы",
            (TechnicalSystemError, Az) => "Sistemin texniki xətası",
            (TechnicalSystemError, En) => "Technical system error",
            (NotInLocalDatabase, Ru) => "Описание кода отсутствует в локальной базе.",
            (NotInLocalDatabase, Az) => "Kodun təsviri lokal bazada yoxdur.",
            (NotInLocalDatabase, En) => "This code is not described in the local database.",
            (OnlineCheckRequired, Ru) => "Требуется онлайн проверка",
            (OnlineCheckRequired, Az) => "Onlayn yoxlama tələb olunur",
            (OnlineCheckRequired, En) => "Online check required",
            (BeCareful, Ru) => "Соблюдайте осторожность.",
            (BeCareful, Az) => "Ehtiyatlı olun.",
            (BeCareful, En) => "Drive with caution.",
            (CriticalAdvice, Ru) => "Критическая ошибка! Рекомендуется немедленный ремонт.",
            (CriticalAdvice, Az) => "Kritik xəta! Təcili təmir tövsiyə olunur.",
            (CriticalAdvice, En) => "Critical fault! Immediate repair is recommended.",
            (WarningAdvice, Ru) => "Ошибка влияет на расход и динамику.",
            (WarningAdvice, Az) => "Xəta yanacaq sərfiyyatına və dinamikaya təsir edir.",
            (WarningAdvice, En) => "The fault affects fuel consumption and performance.",
            (ChatApology, Ru) => "Извините, механик сейчас недоступен. Попробуйте позже.",
            (ChatApology, Az) => "Bağışlayın, mexanik hazırda əlçatan deyil. Sonra yenidən cəhd edin.",
            (ChatApology, En) => "Sorry, the mechanic is unavailable right now. Please try again later.",
            (Critical, Ru) => "Критично",
            (Critical, Az) => "Kritik",
            (Critical, En) => "Critical",
            (Warning, Ru) => "Внимание",
            (Warning, Az) => "Diqqət",
            (Warning, En) => "Warning",
            (NoErrors, Ru) => "Ошибок не обнаружено",
            (NoErrors, Az) => "Xəta aşkar edilmədi",
            (NoErrors, En) => "No errors found",
            (Vehicle, Ru) => "Автомобиль",
            (Vehicle, Az) => "Avtomobil",
            (Vehicle, En) => "Vehicle",
            (Health, Ru) => "Состояние",
            (Health, Az) => "Vəziyyət",
            (Health, En) => "Health",
            (ErrorCodes, Ru) => "Коды ошибок",
            (ErrorCodes, Az) => "Xəta kodları",
            (ErrorCodes, En) => "Error codes",
            (Date, Ru) => "Дата",
            (Date, Az) => "Tarix",
            (Date, En) => "Date",
            (ReportHeader, Ru) => "Отчет диагностики",
            (ReportHeader, Az) => "Diaqnostika hesabatı",
            (ReportHeader, En) => "Diagnostic report",
            (MonthlyTotal, Ru) => "Проверено за месяц",
            (MonthlyTotal, Az) => "Bu ay yoxlanılıb",
            (MonthlyTotal, En) => "Scanned this month",
            (Resolved, Ru) => "Устранено",
            (Resolved, Az) => "Aradan qaldırıldı",
            (Resolved, En) => "Resolved",
            (Persisting, Ru) => "Осталось",
            (Persisting, Az) => "Qalıb",
            (Persisting, En) => "Persisting",
            (New, Ru) => "Новые",
            (New, Az) => "Yeni",
            (New, En) => "New",
            (Improvement, Ru) => "Изменение состояния",
            (Improvement, Az) => "Vəziyyət dəyişikliyi",
            (Improvement, En) => "Health change",
            (Good, Ru) => "Хорошее",
            (Good, Az) => "Yaxşı",
            (Good, En) => "Good",
            (Fair, Ru) => "Удовлетворительное",
            (Fair, Az) => "Qənaətbəxş",
            (Fair, En) => "Fair",
            (Poor, Ru) => "Плохое",
            (Poor, Az) => "Pis",
            (Poor, En) => "Poor",
        }
    }
}
