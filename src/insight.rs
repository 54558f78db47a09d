//! Plain-language explanations of fault codes and the mechanic chat.
//!
//! Both are normally served by a hosted text model. Every call here has a
//! local fallback, so a failing or absent service never reaches the user.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::diagnostic::{DiagnosticResult, FaultCode, Severity};
use crate::error::InsightError;
use crate::i18n::{Language, Text};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub explanation: String,
    pub possible_causes: Vec<String>,
    pub estimated_repair_cost: String,
    pub severity_advice: String,
}

pub trait InsightProvider: Sync {
    fn insight(&self, fault: &FaultCode, lang: Language) -> Result<Insight, InsightError>;
}

/// Catalog-backed explanations.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalInsight;

impl LocalInsight {
    pub fn for_code(&self, code: &str, lang: Language) -> Insight {
        let Some(entry) = catalog::lookup(code) else {
            return Insight {
                explanation: Text::NotInLocalDatabase.get(lang).to_string(),
                possible_causes: vec![Text::OnlineCheckRequired.get(lang).to_string()],
                estimated_repair_cost: "??? AZN".to_string(),
                severity_advice: Text::BeCareful.get(lang).to_string(),
            };
        };

        let advice = if entry.severity == Severity::High {
            Text::CriticalAdvice
        } else {
            Text::WarningAdvice
        };

        Insight {
            explanation: entry.description(lang).to_string(),
            possible_causes: generic_causes(lang)
                .iter()
                .map(|c| c.to_string())
                .collect(),
            estimated_repair_cost: entry.cost.to_string(),
            severity_advice: advice.get(lang).to_string(),
        }
    }
}

impl InsightProvider for LocalInsight {
    fn insight(&self, fault: &FaultCode, lang: Language) -> Result<Insight, InsightError> {
        Ok(self.for_code(&fault.code, lang))
    }
}

fn generic_causes(lang: Language) -> &'static [&'static str] {
    match lang {
        Language::Ru => &["Свечи зажигания", "Катушки", "Подсос воздуха", "Датчики"],
        Language::Az => &["Alışdırma şamları", "Makaralar", "Hava sızması", "Sensorlar"],
        Language::En => &["Spark plugs", "Ignition coils", "Vacuum leak", "Sensors"],
    }
}

/// Asks `provider` about `fault`, falling back to the local catalog.
pub fn explain(provider: &dyn InsightProvider, fault: &FaultCode, lang: Language) -> Insight {
    let localized = FaultCode {
        description: fault.localized_description(lang).to_string(),
        ..fault.clone()
    };
    match provider.insight(&localized, lang) {
        Ok(insight) => insight,
        Err(e) => {
            tracing::warn!(code = %fault.code, error = %e, "insight lookup failed, using local database");
            LocalInsight.for_code(&fault.code, lang)
        }
    }
}

/// Explains every fault in parallel. Output order follows `faults`.
pub fn explain_all(
    provider: &dyn InsightProvider,
    faults: &[FaultCode],
    lang: Language,
) -> Vec<(String, Insight)> {
    faults
        .par_iter()
        .map(|fault| (fault.code.clone(), explain(provider, fault, lang)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Mechanic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

pub trait MechanicChat: Sync {
    fn reply(
        &self,
        conversation: &[ChatTurn],
        message: &str,
        vehicle: Option<&DiagnosticResult>,
        lang: Language,
    ) -> Result<String, InsightError>;
}

/// Asks `chat` for a reply, answering with an apology if it fails.
pub fn chat_reply(
    chat: &dyn MechanicChat,
    conversation: &[ChatTurn],
    message: &str,
    vehicle: Option<&DiagnosticResult>,
    lang: Language,
) -> String {
    match chat.reply(conversation, message, vehicle, lang) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "mechanic chat failed");
            Text::ChatApology.get(lang).to_string()
        }
    }
}

/// Offline mechanic persona built on the catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedMechanic;

impl MechanicChat for ScriptedMechanic {
    fn reply(
        &self,
        _conversation: &[ChatTurn],
        message: &str,
        vehicle: Option<&DiagnosticResult>,
        lang: Language,
    ) -> Result<String, InsightError> {
        let mentioned = message
            .split(|c: char| !c.is_ascii_alphanumeric())
            .find_map(catalog::lookup);

        if let Some(entry) = mentioned {
            let insight = LocalInsight.for_code(entry.code, lang);
            return Ok(format!(
                "{}: {}. {} ({}).",
                entry.code,
                insight.explanation,
                insight.severity_advice,
                insight.estimated_repair_cost
            ));
        }

        let Some(record) = vehicle else {
            return Err(InsightError::Unavailable(
                "no vehicle context for this question".to_string(),
            ));
        };

        let codes = if record.errors().is_empty() {
            Text::NoErrors.get(lang).to_string()
        } else {
            record
                .errors()
                .iter()
                .map(|e| e.code.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        Ok(format!(
            "{} {} ({}): {} {}%. {}: {}.",
            Text::Vehicle.get(lang),
            record.vehicle_name(),
            record.year(),
            Text::Health.get(lang),
            record.health_score(),
            Text::ErrorCodes.get(lang),
            codes
        ))
    }
}
