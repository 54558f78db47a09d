use serde::Serialize;

use crate::comparison::ComparisonResult;
use crate::diagnostic::DiagnosticResult;
use crate::history::History;
use crate::i18n::Language;
use crate::insight::Insight;
use crate::scoring::compute_score;

use super::Reporter;

pub struct JsonReporter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    version: &'static str,
    record: DiagnosticResult,
    health: HealthJson,
    comparison: Option<ComparisonJson<'a>>,
}

#[derive(Serialize)]
struct HealthJson {
    score: u32,
    label: String,
    critical_penalty: u32,
    warning_penalty: u32,
    minor_penalty: u32,
}

#[derive(Serialize)]
struct ComparisonJson<'a> {
    before_id: String,
    resolved_codes: &'a [String],
    persisting_codes: &'a [String],
    new_codes: &'a [String],
    health_improvement: i32,
}

#[derive(Serialize)]
struct HistoryJson<'a> {
    version: &'static str,
    monthly_count: usize,
    max_entries: usize,
    records: Vec<&'a DiagnosticResult>,
}

#[derive(Serialize)]
struct InsightJson<'a> {
    code: &'a str,
    #[serde(flatten)]
    insight: &'a Insight,
}

impl Reporter for JsonReporter {
    fn format(
        &self,
        record: &DiagnosticResult,
        comparison: Option<&ComparisonResult>,
        lang: Language,
    ) -> String {
        let record = record.relocalized(lang);
        let score = compute_score(record.errors());
        let output = JsonOutput {
            version: env!("CARGO_PKG_VERSION"),
            health: HealthJson {
                score: score.value,
                label: score.band.label(lang).to_string(),
                critical_penalty: score.penalties.critical,
                warning_penalty: score.penalties.warning,
                minor_penalty: score.penalties.minor,
            },
            comparison: comparison.map(|c| ComparisonJson {
                before_id: c.before.id().to_string(),
                resolved_codes: &c.resolved_codes,
                persisting_codes: &c.persisting_codes,
                new_codes: &c.new_codes,
                health_improvement: c.health_improvement,
            }),
            record,
        };
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_history(&self, history: &History, monthly: usize, _lang: Language) -> String {
        let output = HistoryJson {
            version: env!("CARGO_PKG_VERSION"),
            monthly_count: monthly,
            max_entries: history.max_entries(),
            records: history.iter().collect(),
        };
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_insights(&self, insights: &[(String, Insight)], _lang: Language) -> String {
        let items: Vec<InsightJson> = insights
            .iter()
            .map(|(code, insight)| InsightJson { code, insight })
            .collect();
        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
    }
}
