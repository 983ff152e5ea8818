//! Metric snapshot types.
//!
//! A snapshot is a fixed-shape tree: three functional metric groups plus a
//! system health group. Only values change between refreshes, never the shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::HealthStatus;

/// Direction a metric moved since the previous observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Arrow glyph used in tables and cards.
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↗",
            Trend::Down => "↘",
            Trend::Stable => "→",
        }
    }
}

/// Quality annotation attached to a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Warning,
    Critical,
}

impl MetricStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            MetricStatus::Good => "OK",
            MetricStatus::Warning => "WARN",
            MetricStatus::Critical => "CRIT",
        }
    }

    /// Map onto the module health scale so both share one set of colors.
    pub fn health(&self) -> HealthStatus {
        match self {
            MetricStatus::Good => HealthStatus::Healthy,
            MetricStatus::Warning => HealthStatus::Warning,
            MetricStatus::Critical => HealthStatus::Critical,
        }
    }
}

/// A single named, timestamped observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MetricStatus>,
}

/// A metric together with the stable key it is stored under.
///
/// Members of "@K" families get their own key (`precisionAt5`), so keys are
/// unique across a whole snapshot.
#[derive(Debug, Clone, Copy)]
pub struct MetricEntry<'a> {
    pub key: &'static str,
    pub metric: &'a Metric,
}

/// Keys of the members of a "@K" family, in K order.
pub const PRECISION_AT_K: [&str; 3] = ["precisionAt1", "precisionAt5", "precisionAt10"];
pub const RECALL_AT_K: [&str; 3] = ["recallAt1", "recallAt5", "recallAt10"];
pub const HITS_AT_K: [&str; 3] = ["hitsAt1", "hitsAt5", "hitsAt10"];
pub const DOMAIN_ACCURACY: [&str; 4] = [
    "financeDomainAccuracy",
    "technologyDomainAccuracy",
    "legalDomainAccuracy",
    "medicalDomainAccuracy",
];

fn family<'a>(keys: &[&'static str], metrics: &'a [Metric]) -> Vec<MetricEntry<'a>> {
    keys.iter().zip(metrics).map(|(key, metric)| MetricEntry { key: *key, metric }).collect()
}

/// Document parsing quality: text, tables, figures, formulas, layout, speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentParsingMetrics {
    pub text_extraction_accuracy: Metric,
    pub character_error_rate: Metric,
    pub word_error_rate: Metric,
    pub table_detection_recall: Metric,
    pub table_structure_integrity: Metric,
    pub cell_content_accuracy: Metric,
    pub teds_score: Metric,
    pub grits_score: Metric,
    pub image_extraction_rate: Metric,
    pub chart_data_extraction_accuracy: Metric,
    pub formula_detection_recall: Metric,
    pub formula_recognition_accuracy: Metric,
    pub layout_fidelity: Metric,
    pub title_paragraph_recognition: Metric,
    pub style_preservation: Metric,
    pub content_coverage_rate: Metric,
    pub parsing_noise_rate: Metric,
    pub parsing_speed: Metric,
    pub throughput: Metric,
}

impl DocumentParsingMetrics {
    pub fn entries(&self) -> Vec<MetricEntry<'_>> {
        [
            ("textExtractionAccuracy", &self.text_extraction_accuracy),
            ("characterErrorRate", &self.character_error_rate),
            ("wordErrorRate", &self.word_error_rate),
            ("tableDetectionRecall", &self.table_detection_recall),
            ("tableStructureIntegrity", &self.table_structure_integrity),
            ("cellContentAccuracy", &self.cell_content_accuracy),
            ("tedsScore", &self.teds_score),
            ("gritsScore", &self.grits_score),
            ("imageExtractionRate", &self.image_extraction_rate),
            ("chartDataExtractionAccuracy", &self.chart_data_extraction_accuracy),
            ("formulaDetectionRecall", &self.formula_detection_recall),
            ("formulaRecognitionAccuracy", &self.formula_recognition_accuracy),
            ("layoutFidelity", &self.layout_fidelity),
            ("titleParagraphRecognition", &self.title_paragraph_recognition),
            ("stylePreservation", &self.style_preservation),
            ("contentCoverageRate", &self.content_coverage_rate),
            ("parsingNoiseRate", &self.parsing_noise_rate),
            ("parsingSpeed", &self.parsing_speed),
            ("throughput", &self.throughput),
        ]
        .into_iter()
        .map(|(key, metric)| MetricEntry { key, metric })
        .collect()
    }
}

/// Retrieval and knowledge-graph performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataUnlockingMetrics {
    /// Precision at K = 1, 5, 10.
    pub precision_at_k: Vec<Metric>,
    /// Recall at K = 1, 5, 10.
    pub recall_at_k: Vec<Metric>,
    pub f1_score: Metric,
    pub mean_reciprocal_rank: Metric,
    pub mean_average_precision: Metric,
    /// Hits at K = 1, 5, 10.
    pub hits_at_k: Vec<Metric>,
    pub kg_query_accuracy: Metric,
    pub triple_extraction_precision: Metric,
    pub triple_extraction_recall: Metric,
    pub triple_extraction_f1: Metric,
    pub query_latency: Metric,
    pub p95_latency: Metric,
    pub p99_latency: Metric,
    pub query_throughput: Metric,
    pub index_build_time: Metric,
    pub index_size: Metric,
    pub memory_usage: Metric,
    pub knowledge_source_match_rate: Metric,
    pub vector_search_fallback_rate: Metric,
}

impl DataUnlockingMetrics {
    pub fn entries(&self) -> Vec<MetricEntry<'_>> {
        let mut entries = family(&PRECISION_AT_K, &self.precision_at_k);
        entries.extend(family(&RECALL_AT_K, &self.recall_at_k));
        entries.extend(
            [
                ("f1Score", &self.f1_score),
                ("meanReciprocalRank", &self.mean_reciprocal_rank),
                ("meanAveragePrecision", &self.mean_average_precision),
            ]
            .into_iter()
            .map(|(key, metric)| MetricEntry { key, metric }),
        );
        entries.extend(family(&HITS_AT_K, &self.hits_at_k));
        entries.extend(
            [
                ("kgQueryAccuracy", &self.kg_query_accuracy),
                ("tripleExtractionPrecision", &self.triple_extraction_precision),
                ("tripleExtractionRecall", &self.triple_extraction_recall),
                ("tripleExtractionF1", &self.triple_extraction_f1),
                ("queryLatency", &self.query_latency),
                ("p95Latency", &self.p95_latency),
                ("p99Latency", &self.p99_latency),
                ("queryThroughput", &self.query_throughput),
                ("indexBuildTime", &self.index_build_time),
                ("indexSize", &self.index_size),
                ("memoryUsage", &self.memory_usage),
                ("knowledgeSourceMatchRate", &self.knowledge_source_match_rate),
                ("vectorSearchFallbackRate", &self.vector_search_fallback_rate),
            ]
            .into_iter()
            .map(|(key, metric)| MetricEntry { key, metric }),
        );
        entries
    }
}

/// Question answering accuracy, answer quality, reasoning and latency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaMetrics {
    pub qa_accuracy: Metric,
    pub exact_match: Metric,
    pub fuzzy_match_f1: Metric,
    pub rouge_n: Metric,
    pub rouge_l: Metric,
    pub bleu_score: Metric,
    pub readability_score: Metric,
    pub logical_consistency: Metric,
    pub multi_hop_accuracy: Metric,
    pub intermediate_step_accuracy: Metric,
    pub supporting_evidence_accuracy: Metric,
    pub reasoning_path_accuracy: Metric,
    pub logical_consistency_score: Metric,
    pub knowledge_base_hit_rate: Metric,
    pub internet_query_rate: Metric,
    pub response_time: Metric,
    pub complex_query_latency: Metric,
    pub qa_session_throughput: Metric,
    /// Finance, technology, legal and medical accuracy, in that order.
    pub domain_specific_accuracy: Vec<Metric>,
    pub business_term_handling: Metric,
}

impl QaMetrics {
    pub fn entries(&self) -> Vec<MetricEntry<'_>> {
        let mut entries: Vec<MetricEntry<'_>> = [
            ("qaAccuracy", &self.qa_accuracy),
            ("exactMatch", &self.exact_match),
            ("fuzzyMatchF1", &self.fuzzy_match_f1),
            ("rougeN", &self.rouge_n),
            ("rougeL", &self.rouge_l),
            ("bleuScore", &self.bleu_score),
            ("readabilityScore", &self.readability_score),
            ("logicalConsistency", &self.logical_consistency),
            ("multiHopAccuracy", &self.multi_hop_accuracy),
            ("intermediateStepAccuracy", &self.intermediate_step_accuracy),
            ("supportingEvidenceAccuracy", &self.supporting_evidence_accuracy),
            ("reasoningPathAccuracy", &self.reasoning_path_accuracy),
            ("logicalConsistencyScore", &self.logical_consistency_score),
            ("knowledgeBaseHitRate", &self.knowledge_base_hit_rate),
            ("internetQueryRate", &self.internet_query_rate),
            ("responseTime", &self.response_time),
            ("complexQueryLatency", &self.complex_query_latency),
            ("qaSessionThroughput", &self.qa_session_throughput),
        ]
        .into_iter()
        .map(|(key, metric)| MetricEntry { key, metric })
        .collect();
        entries.extend(family(&DOMAIN_ACCURACY, &self.domain_specific_accuracy));
        entries.push(MetricEntry {
            key: "businessTermHandling",
            metric: &self.business_term_handling,
        });
        entries
    }
}

/// Whole-system rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealthMetrics {
    pub overall_score: Metric,
    pub uptime: Metric,
    pub error_rate: Metric,
    pub user_satisfaction: Metric,
}

impl SystemHealthMetrics {
    pub fn entries(&self) -> Vec<MetricEntry<'_>> {
        [
            ("overallScore", &self.overall_score),
            ("uptime", &self.uptime),
            ("errorRate", &self.error_rate),
            ("userSatisfaction", &self.user_satisfaction),
        ]
        .into_iter()
        .map(|(key, metric)| MetricEntry { key, metric })
        .collect()
    }
}

/// One point-in-time read of every metric group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallMetrics {
    pub document_parsing: DocumentParsingMetrics,
    pub data_unlocking: DataUnlockingMetrics,
    pub qa: QaMetrics,
    pub system_health: SystemHealthMetrics,
}

impl OverallMetrics {
    /// Every metric in display order: parsing, unlocking, QA, system health.
    pub fn entries(&self) -> Vec<MetricEntry<'_>> {
        let mut entries = self.document_parsing.entries();
        entries.extend(self.data_unlocking.entries());
        entries.extend(self.qa.entries());
        entries.extend(self.system_health.entries());
        entries
    }

    /// Look up a metric by its key (e.g. `"queryLatency"`).
    pub fn find(&self, key: &str) -> Option<&Metric> {
        self.entries().into_iter().find(|e| e.key == key).map(|e| e.metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock;
    use std::collections::HashSet;

    #[test]
    fn entry_keys_are_unique() {
        let metrics = mock::generate_overall_snapshot(&mut rand::thread_rng());
        let entries = metrics.entries();
        let keys: HashSet<&str> = entries.iter().map(|e| e.key).collect();
        assert_eq!(keys.len(), entries.len());
    }

    #[test]
    fn find_returns_named_metric() {
        let metrics = mock::generate_overall_snapshot(&mut rand::thread_rng());
        let latency = metrics.find("queryLatency").unwrap();
        assert_eq!(latency.unit, "ms");
        assert!(metrics.find("doesNotExist").is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let metrics = mock::generate_overall_snapshot(&mut rand::thread_rng());
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json["documentParsing"]["textExtractionAccuracy"]["value"].is_number());
        assert_eq!(json["dataUnlocking"]["precisionAtK"].as_array().unwrap().len(), 3);
        assert!(json["systemHealth"]["overallScore"].is_object());
    }

    #[test]
    fn status_maps_onto_health_scale() {
        assert_eq!(MetricStatus::Good.health(), HealthStatus::Healthy);
        assert_eq!(MetricStatus::Warning.health(), HealthStatus::Warning);
        assert_eq!(MetricStatus::Critical.health(), HealthStatus::Critical);
    }
}
