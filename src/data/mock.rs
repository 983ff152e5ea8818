//! Random sample data standing in for a real metrics pipeline.
//!
//! Every generator takes the RNG explicitly so tests can seed it. Values are
//! drawn uniformly from fixed per-metric bounds; the bound tables below are
//! domain constants, not configuration.

use chrono::{Days, Local, NaiveDate, Utc};
use rand::Rng;
use tracing::warn;

use super::metric::{
    DataUnlockingMetrics, DocumentParsingMetrics, Metric, MetricStatus, OverallMetrics,
    QaMetrics, SystemHealthMetrics, Trend, DOMAIN_ACCURACY, HITS_AT_K, PRECISION_AT_K,
    RECALL_AT_K,
};
use super::status::{HealthStatus, ModuleStatus};
use super::trend::{TrendPoint, TrendSeries};

/// Default trend window in days; a series has `days + 1` points.
pub const DEFAULT_TREND_DAYS: u32 = 30;

/// Color attached to generated trend series.
pub const TREND_COLOR: &str = "#3b82f6";

/// Decimal places kept on generated metric values.
const VALUE_DECIMALS: i32 = 4;

/// Decimal places kept on trend values.
const TREND_DECIMALS: i32 = 3;

/// Status draw with weights 3/5 good, 1/5 warning, 1/5 critical.
const STATUS_DRAW: [MetricStatus; 5] = [
    MetricStatus::Good,
    MetricStatus::Good,
    MetricStatus::Good,
    MetricStatus::Warning,
    MetricStatus::Critical,
];

const TREND_DRAW: [Trend; 3] = [Trend::Up, Trend::Down, Trend::Stable];

const HEALTH_DRAW: [HealthStatus; 3] =
    [HealthStatus::Healthy, HealthStatus::Warning, HealthStatus::Critical];

/// Functional modules reported in the module status list.
pub const MODULE_NAMES: [&str; 3] = ["Document Parsing", "Data Unlocking", "Question Answering"];

/// Value range and labels for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBounds {
    pub key: &'static str,
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
    pub description: &'static str,
}

impl MetricBounds {
    const fn new(
        key: &'static str,
        name: &'static str,
        min: f64,
        max: f64,
        unit: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            name,
            min,
            max,
            unit,
            description,
        }
    }

    /// Draw a metric within these bounds.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Metric {
        generate_metric(rng, self.name, self.min, self.max, self.unit, self.description)
    }

    /// Whether `value` lies in `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[rustfmt::skip]
pub const DOCUMENT_PARSING_BOUNDS: &[MetricBounds] = &[
    MetricBounds::new("textExtractionAccuracy", "Text Extraction Accuracy", 0.85, 0.98, "%", "Share of document text extracted correctly"),
    MetricBounds::new("characterErrorRate", "Character Error Rate", 0.01, 0.05, "%", "Character-level OCR and extraction error rate"),
    MetricBounds::new("wordErrorRate", "Word Error Rate", 0.02, 0.08, "%", "Word-level extraction error rate"),
    MetricBounds::new("tableDetectionRecall", "Table Detection Recall", 0.80, 0.95, "%", "Share of real tables that were detected"),
    MetricBounds::new("tableStructureIntegrity", "Table Structure Integrity", 0.75, 0.92, "%", "Share of table row/column structure recovered correctly"),
    MetricBounds::new("cellContentAccuracy", "Cell Content Accuracy", 0.88, 0.96, "%", "Share of table cells extracted correctly"),
    MetricBounds::new("tedsScore", "TEDS Score", 0.70, 0.90, "score", "Tree-edit-distance table similarity"),
    MetricBounds::new("gritsScore", "GriTS Score", 0.75, 0.93, "score", "Grid-based table structure recognition score"),
    MetricBounds::new("imageExtractionRate", "Image Extraction Rate", 0.85, 0.98, "%", "Share of images extracted"),
    MetricBounds::new("chartDataExtractionAccuracy", "Chart Data Extraction Accuracy", 0.70, 0.88, "%", "Accuracy of converting charts to data"),
    MetricBounds::new("formulaDetectionRecall", "Formula Detection Recall", 0.82, 0.94, "%", "Share of real formulas that were detected"),
    MetricBounds::new("formulaRecognitionAccuracy", "Formula Recognition Accuracy", 0.78, 0.91, "%", "Share of formula symbols and structure recognized"),
    MetricBounds::new("layoutFidelity", "Layout Fidelity", 0.83, 0.95, "%", "How faithfully page layout is reproduced"),
    MetricBounds::new("titleParagraphRecognition", "Title/Paragraph Recognition", 0.89, 0.97, "%", "Share of headings and paragraphs recognized"),
    MetricBounds::new("stylePreservation", "Style Preservation", 0.72, 0.86, "%", "Share of bold/italic styling preserved"),
    MetricBounds::new("contentCoverageRate", "Content Coverage Rate", 0.92, 0.99, "%", "Completeness of parsed content against the source"),
    MetricBounds::new("parsingNoiseRate", "Parsing Noise Rate", 0.02, 0.08, "%", "Share of noise in parse output"),
    MetricBounds::new("parsingSpeed", "Parsing Speed", 2.1, 8.5, "pages/min", "Pages processed per minute"),
    MetricBounds::new("throughput", "Processing Throughput", 150.0, 450.0, "docs/hour", "Documents processed per hour"),
];

#[rustfmt::skip]
pub const DATA_UNLOCKING_BOUNDS: &[MetricBounds] = &[
    MetricBounds::new("precisionAt1", "Precision@1", 0.85, 0.95, "%", "Precision of the top result"),
    MetricBounds::new("precisionAt5", "Precision@5", 0.75, 0.90, "%", "Precision of the top 5 results"),
    MetricBounds::new("precisionAt10", "Precision@10", 0.68, 0.85, "%", "Precision of the top 10 results"),
    MetricBounds::new("recallAt1", "Recall@1", 0.65, 0.80, "%", "Recall of the top result"),
    MetricBounds::new("recallAt5", "Recall@5", 0.80, 0.92, "%", "Recall of the top 5 results"),
    MetricBounds::new("recallAt10", "Recall@10", 0.88, 0.96, "%", "Recall of the top 10 results"),
    MetricBounds::new("f1Score", "F1 Score", 0.78, 0.89, "score", "Harmonic mean of precision and recall"),
    MetricBounds::new("meanReciprocalRank", "Mean Reciprocal Rank", 0.72, 0.86, "score", "Mean inverse rank of the first correct answer"),
    MetricBounds::new("meanAveragePrecision", "Mean Average Precision", 0.75, 0.88, "score", "Ranking quality over all relevant results"),
    MetricBounds::new("hitsAt1", "Hits@1", 0.82, 0.93, "%", "Hit rate of the top result"),
    MetricBounds::new("hitsAt5", "Hits@5", 0.91, 0.97, "%", "Hit rate of the top 5 results"),
    MetricBounds::new("hitsAt10", "Hits@10", 0.95, 0.99, "%", "Hit rate of the top 10 results"),
    MetricBounds::new("kgQueryAccuracy", "KG Query Accuracy", 0.83, 0.94, "%", "Correctness of structured knowledge graph queries"),
    MetricBounds::new("tripleExtractionPrecision", "Triple Extraction Precision", 0.79, 0.91, "%", "Share of extracted triples that are correct"),
    MetricBounds::new("tripleExtractionRecall", "Triple Extraction Recall", 0.76, 0.87, "%", "Share of expected triples that were extracted"),
    MetricBounds::new("tripleExtractionF1", "Triple Extraction F1", 0.77, 0.89, "score", "Balance of triple extraction precision and recall"),
    MetricBounds::new("queryLatency", "Query Latency", 45.0, 180.0, "ms", "Mean query response time"),
    MetricBounds::new("p95Latency", "P95 Latency", 120.0, 350.0, "ms", "95th percentile query response time"),
    MetricBounds::new("p99Latency", "P99 Latency", 200.0, 500.0, "ms", "99th percentile query response time"),
    MetricBounds::new("queryThroughput", "Query Throughput", 850.0, 1200.0, "QPS", "Queries served per second"),
    MetricBounds::new("indexBuildTime", "Index Build Time", 12.0, 45.0, "min", "Time to build the search index"),
    MetricBounds::new("indexSize", "Index Size", 2.1, 8.7, "GB", "Storage used by vector index and knowledge graph"),
    MetricBounds::new("memoryUsage", "Memory Usage", 4.2, 12.8, "GB", "Resident memory at runtime"),
    MetricBounds::new("knowledgeSourceMatchRate", "Knowledge Source Match Rate", 0.68, 0.84, "%", "Share of queries answered straight from the knowledge graph"),
    MetricBounds::new("vectorSearchFallbackRate", "Vector Search Fallback Rate", 0.16, 0.32, "%", "Share of queries that fell back to vector search"),
];

#[rustfmt::skip]
pub const QA_BOUNDS: &[MetricBounds] = &[
    MetricBounds::new("qaAccuracy", "QA Accuracy", 0.82, 0.94, "%", "Share of questions answered correctly"),
    MetricBounds::new("exactMatch", "Exact Match", 0.76, 0.89, "%", "Share of answers matching the reference exactly"),
    MetricBounds::new("fuzzyMatchF1", "Fuzzy Match F1", 0.83, 0.92, "score", "F1 over partially correct answers"),
    MetricBounds::new("rougeN", "ROUGE-N", 0.74, 0.87, "score", "N-gram overlap"),
    MetricBounds::new("rougeL", "ROUGE-L", 0.78, 0.90, "score", "Longest common subsequence overlap"),
    MetricBounds::new("bleuScore", "BLEU Score", 0.71, 0.85, "score", "Similarity of generated text to the reference"),
    MetricBounds::new("readabilityScore", "Readability Score", 0.80, 0.93, "score", "Fluency and readability of answers"),
    MetricBounds::new("logicalConsistency", "Logical Consistency", 0.85, 0.95, "score", "Coherence of answer logic"),
    MetricBounds::new("multiHopAccuracy", "Multi-hop Accuracy", 0.68, 0.82, "%", "Accuracy on questions needing multi-step reasoning"),
    MetricBounds::new("intermediateStepAccuracy", "Intermediate Step Accuracy", 0.73, 0.86, "%", "Correctness of intermediate reasoning steps"),
    MetricBounds::new("supportingEvidenceAccuracy", "Supporting Evidence Accuracy", 0.79, 0.91, "%", "Share of answers citing the right evidence"),
    MetricBounds::new("reasoningPathAccuracy", "Reasoning Path Accuracy", 0.72, 0.87, "%", "Correctness of the reasoning path"),
    MetricBounds::new("logicalConsistencyScore", "Logical Consistency Score", 0.81, 0.93, "score", "Logical consistency of the reasoning process"),
    MetricBounds::new("knowledgeBaseHitRate", "Knowledge Base Hit Rate", 0.74, 0.88, "%", "Share answered from the internal knowledge base"),
    MetricBounds::new("internetQueryRate", "Internet Query Rate", 0.12, 0.26, "%", "Share of questions needing web search"),
    MetricBounds::new("responseTime", "Response Time", 1.2, 4.8, "s", "Mean answer latency"),
    MetricBounds::new("complexQueryLatency", "Complex Query Latency", 3.5, 8.2, "s", "Latency of complex reasoning questions"),
    MetricBounds::new("qaSessionThroughput", "QA Session Throughput", 120.0, 280.0, "sessions/min", "QA sessions handled per minute"),
    MetricBounds::new("financeDomainAccuracy", "Finance Domain Accuracy", 0.82, 0.94, "%", "Accuracy on finance questions"),
    MetricBounds::new("technologyDomainAccuracy", "Technology Domain Accuracy", 0.78, 0.91, "%", "Accuracy on technology questions"),
    MetricBounds::new("legalDomainAccuracy", "Legal Domain Accuracy", 0.75, 0.87, "%", "Accuracy on legal questions"),
    MetricBounds::new("medicalDomainAccuracy", "Medical Domain Accuracy", 0.80, 0.92, "%", "Accuracy on medical questions"),
    MetricBounds::new("businessTermHandling", "Business Term Handling", 0.79, 0.90, "%", "Share of company-specific terms handled correctly"),
];

#[rustfmt::skip]
pub const SYSTEM_HEALTH_BOUNDS: &[MetricBounds] = &[
    MetricBounds::new("overallScore", "Overall System Score", 0.82, 0.94, "score", "Composite system health"),
    MetricBounds::new("uptime", "Uptime", 0.995, 0.999, "%", "Share of time the system was available"),
    MetricBounds::new("errorRate", "Error Rate", 0.001, 0.01, "%", "Share of requests that failed"),
    MetricBounds::new("userSatisfaction", "User Satisfaction", 0.85, 0.95, "score", "User satisfaction rating"),
];

/// Bounds for a metric key across every group.
pub fn bounds_for(key: &str) -> Option<&'static MetricBounds> {
    DOCUMENT_PARSING_BOUNDS
        .iter()
        .chain(DATA_UNLOCKING_BOUNDS)
        .chain(QA_BOUNDS)
        .chain(SYSTEM_HEALTH_BOUNDS)
        .find(|b| b.key == key)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Order the bounds, replacing non-finite ones with zero.
fn normalize_bounds(min: f64, max: f64) -> (f64, f64) {
    let min = if min.is_finite() { min } else { 0.0 };
    let max = if max.is_finite() { max } else { 0.0 };
    if min > max {
        (max, min)
    } else {
        (min, max)
    }
}

/// Uniform value in `[min, max]`, rounded and kept inside the bounds.
fn random_value<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, decimals: i32) -> f64 {
    let (lo, hi) = normalize_bounds(min, max);
    if lo == hi {
        return lo;
    }
    round_to(rng.gen_range(lo..=hi), decimals).clamp(lo, hi)
}

fn random_status<R: Rng + ?Sized>(rng: &mut R) -> MetricStatus {
    STATUS_DRAW[rng.gen_range(0..STATUS_DRAW.len())]
}

fn random_trend<R: Rng + ?Sized>(rng: &mut R) -> Trend {
    TREND_DRAW[rng.gen_range(0..TREND_DRAW.len())]
}

/// Generate one metric with a value in `[min, max]` and random annotations.
///
/// Swapped bounds are reordered rather than rejected.
pub fn generate_metric<R: Rng + ?Sized>(
    rng: &mut R,
    name: &str,
    min: f64,
    max: f64,
    unit: &str,
    description: &str,
) -> Metric {
    Metric {
        name: name.to_string(),
        value: random_value(rng, min, max, VALUE_DECIMALS),
        unit: unit.to_string(),
        description: description.to_string(),
        timestamp: Utc::now(),
        trend: Some(random_trend(rng)),
        status: Some(random_status(rng)),
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, table: &[MetricBounds], key: &str) -> Metric {
    match table.iter().find(|b| b.key == key) {
        Some(bounds) => bounds.generate(rng),
        None => {
            warn!(metric = key, "no bounds registered for metric");
            generate_metric(rng, key, 0.0, 0.0, "", "")
        }
    }
}

pub fn generate_document_parsing_metrics<R: Rng + ?Sized>(rng: &mut R) -> DocumentParsingMetrics {
    let mut d = |key: &str| draw(&mut *rng, DOCUMENT_PARSING_BOUNDS, key);
    DocumentParsingMetrics {
        text_extraction_accuracy: d("textExtractionAccuracy"),
        character_error_rate: d("characterErrorRate"),
        word_error_rate: d("wordErrorRate"),
        table_detection_recall: d("tableDetectionRecall"),
        table_structure_integrity: d("tableStructureIntegrity"),
        cell_content_accuracy: d("cellContentAccuracy"),
        teds_score: d("tedsScore"),
        grits_score: d("gritsScore"),
        image_extraction_rate: d("imageExtractionRate"),
        chart_data_extraction_accuracy: d("chartDataExtractionAccuracy"),
        formula_detection_recall: d("formulaDetectionRecall"),
        formula_recognition_accuracy: d("formulaRecognitionAccuracy"),
        layout_fidelity: d("layoutFidelity"),
        title_paragraph_recognition: d("titleParagraphRecognition"),
        style_preservation: d("stylePreservation"),
        content_coverage_rate: d("contentCoverageRate"),
        parsing_noise_rate: d("parsingNoiseRate"),
        parsing_speed: d("parsingSpeed"),
        throughput: d("throughput"),
    }
}

pub fn generate_data_unlocking_metrics<R: Rng + ?Sized>(rng: &mut R) -> DataUnlockingMetrics {
    let mut d = |key: &str| draw(&mut *rng, DATA_UNLOCKING_BOUNDS, key);
    DataUnlockingMetrics {
        precision_at_k: PRECISION_AT_K.iter().map(|k| d(k)).collect(),
        recall_at_k: RECALL_AT_K.iter().map(|k| d(k)).collect(),
        f1_score: d("f1Score"),
        mean_reciprocal_rank: d("meanReciprocalRank"),
        mean_average_precision: d("meanAveragePrecision"),
        hits_at_k: HITS_AT_K.iter().map(|k| d(k)).collect(),
        kg_query_accuracy: d("kgQueryAccuracy"),
        triple_extraction_precision: d("tripleExtractionPrecision"),
        triple_extraction_recall: d("tripleExtractionRecall"),
        triple_extraction_f1: d("tripleExtractionF1"),
        query_latency: d("queryLatency"),
        p95_latency: d("p95Latency"),
        p99_latency: d("p99Latency"),
        query_throughput: d("queryThroughput"),
        index_build_time: d("indexBuildTime"),
        index_size: d("indexSize"),
        memory_usage: d("memoryUsage"),
        knowledge_source_match_rate: d("knowledgeSourceMatchRate"),
        vector_search_fallback_rate: d("vectorSearchFallbackRate"),
    }
}

pub fn generate_qa_metrics<R: Rng + ?Sized>(rng: &mut R) -> QaMetrics {
    let mut d = |key: &str| draw(&mut *rng, QA_BOUNDS, key);
    QaMetrics {
        qa_accuracy: d("qaAccuracy"),
        exact_match: d("exactMatch"),
        fuzzy_match_f1: d("fuzzyMatchF1"),
        rouge_n: d("rougeN"),
        rouge_l: d("rougeL"),
        bleu_score: d("bleuScore"),
        readability_score: d("readabilityScore"),
        logical_consistency: d("logicalConsistency"),
        multi_hop_accuracy: d("multiHopAccuracy"),
        intermediate_step_accuracy: d("intermediateStepAccuracy"),
        supporting_evidence_accuracy: d("supportingEvidenceAccuracy"),
        reasoning_path_accuracy: d("reasoningPathAccuracy"),
        logical_consistency_score: d("logicalConsistencyScore"),
        knowledge_base_hit_rate: d("knowledgeBaseHitRate"),
        internet_query_rate: d("internetQueryRate"),
        response_time: d("responseTime"),
        complex_query_latency: d("complexQueryLatency"),
        qa_session_throughput: d("qaSessionThroughput"),
        domain_specific_accuracy: DOMAIN_ACCURACY.iter().map(|k| d(k)).collect(),
        business_term_handling: d("businessTermHandling"),
    }
}

pub fn generate_system_health_metrics<R: Rng + ?Sized>(rng: &mut R) -> SystemHealthMetrics {
    let mut d = |key: &str| draw(&mut *rng, SYSTEM_HEALTH_BOUNDS, key);
    SystemHealthMetrics {
        overall_score: d("overallScore"),
        uptime: d("uptime"),
        error_rate: d("errorRate"),
        user_satisfaction: d("userSatisfaction"),
    }
}

/// Compose all groups into one snapshot.
pub fn generate_overall_snapshot<R: Rng + ?Sized>(rng: &mut R) -> OverallMetrics {
    OverallMetrics {
        document_parsing: generate_document_parsing_metrics(rng),
        data_unlocking: generate_data_unlocking_metrics(rng),
        qa: generate_qa_metrics(rng),
        system_health: generate_system_health_metrics(rng),
    }
}

/// One status per functional module.
///
/// Status and score are drawn independently of each other and of the
/// snapshot, so a "critical" module can carry a high score.
pub fn generate_module_statuses<R: Rng + ?Sized>(rng: &mut R) -> Vec<ModuleStatus> {
    let now = Utc::now();
    MODULE_NAMES
        .iter()
        .map(|name| ModuleStatus {
            name: name.to_string(),
            status: HEALTH_DRAW[rng.gen_range(0..HEALTH_DRAW.len())],
            score: rng.gen_range(0.7..=1.0),
            last_updated: now,
        })
        .collect()
}

/// Random walk around a base value, one point per day ending today.
///
/// Produces `days + 1` points, oldest first, each clamped to `[0, 1]`.
/// Every call yields a fresh series.
pub fn generate_trend_series<R: Rng + ?Sized>(
    rng: &mut R,
    metric_name: &str,
    days: u32,
) -> TrendSeries {
    let today = Local::now().date_naive();
    let base = random_value(rng, 0.7, 0.9, 2);

    let points = (0..=days)
        .rev()
        .map(|offset| {
            let date = today
                .checked_sub_days(Days::new(u64::from(offset)))
                .unwrap_or(NaiveDate::MIN);
            let variation = random_value(rng, -0.05, 0.05, 2);
            TrendPoint {
                date,
                value: round_to((base + variation).clamp(0.0, 1.0), TREND_DECIMALS),
                label: Some(date.format("%m/%d/%Y").to_string()),
            }
        })
        .collect();

    TrendSeries {
        metric_name: metric_name.to_string(),
        points,
        color: Some(TREND_COLOR.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn generated_values_respect_bounds() {
        let mut rng = rng();
        for _ in 0..200 {
            let snapshot = generate_overall_snapshot(&mut rng);
            for entry in snapshot.entries() {
                let bounds = bounds_for(entry.key).unwrap();
                assert!(
                    bounds.contains(entry.metric.value),
                    "{} = {} outside [{}, {}]",
                    entry.key,
                    entry.metric.value,
                    bounds.min,
                    bounds.max
                );
                assert_eq!(entry.metric.name, bounds.name);
                assert_eq!(entry.metric.unit, bounds.unit);
            }
        }
    }

    #[test]
    fn snapshot_shape_is_complete() {
        let snapshot = generate_overall_snapshot(&mut rng());
        assert_eq!(snapshot.document_parsing.entries().len(), DOCUMENT_PARSING_BOUNDS.len());
        assert_eq!(snapshot.data_unlocking.entries().len(), DATA_UNLOCKING_BOUNDS.len());
        assert_eq!(snapshot.qa.entries().len(), QA_BOUNDS.len());
        assert_eq!(snapshot.system_health.entries().len(), SYSTEM_HEALTH_BOUNDS.len());
        assert_eq!(snapshot.data_unlocking.precision_at_k.len(), 3);
        assert_eq!(snapshot.data_unlocking.recall_at_k.len(), 3);
        assert_eq!(snapshot.data_unlocking.hits_at_k.len(), 3);
        assert_eq!(snapshot.qa.domain_specific_accuracy.len(), 4);
        for entry in snapshot.entries() {
            assert!(entry.metric.trend.is_some(), "{} has no trend", entry.key);
            assert!(entry.metric.status.is_some(), "{} has no status", entry.key);
            assert!(!entry.metric.name.is_empty());
        }
    }

    #[test]
    fn swapped_bounds_are_reordered() {
        let mut rng = rng();
        for _ in 0..100 {
            let metric = generate_metric(&mut rng, "inverted", 0.9, 0.1, "%", "");
            assert!((0.1..=0.9).contains(&metric.value));
        }
    }

    #[test]
    fn equal_and_non_finite_bounds_do_not_panic() {
        let mut rng = rng();
        assert_eq!(generate_metric(&mut rng, "fixed", 0.5, 0.5, "", "").value, 0.5);
        assert_eq!(generate_metric(&mut rng, "nan", f64::NAN, f64::NAN, "", "").value, 0.0);
        let inf = generate_metric(&mut rng, "inf", 0.0, f64::INFINITY, "", "");
        assert_eq!(inf.value, 0.0);
    }

    #[test]
    fn status_draw_is_weighted_towards_good() {
        let mut rng = rng();
        let n = 5000;
        let good = (0..n).filter(|_| random_status(&mut rng) == MetricStatus::Good).count();
        let share = good as f64 / n as f64;
        assert!((0.55..0.65).contains(&share), "good share {share}");
    }

    #[test]
    fn trend_series_has_one_point_per_day_ending_today() {
        let series = generate_trend_series(&mut rng(), "queryLatency", DEFAULT_TREND_DAYS);
        assert_eq!(series.metric_name, "queryLatency");
        assert_eq!(series.points.len(), DEFAULT_TREND_DAYS as usize + 1);
        assert_eq!(series.points.last().unwrap().date, Local::now().date_naive());
        for pair in series.points.windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
        assert!(series.points.iter().all(|p| (0.0..=1.0).contains(&p.value)));
        assert!(series.points.iter().all(|p| p.label.is_some()));
    }

    #[test]
    fn trend_series_stays_near_base() {
        let series = generate_trend_series(&mut rng(), "qaAccuracy", 90);
        let (lo, hi) = series.bounds().unwrap();
        // base in [0.7, 0.9], variation in [-0.05, 0.05]
        assert!(lo >= 0.65 - 1e-9);
        assert!(hi <= 0.95 + 1e-9);
        assert!(hi - lo <= 0.1 + 1e-9);
    }

    #[test]
    fn zero_day_window_yields_single_point() {
        let series = generate_trend_series(&mut rng(), "overallScore", 0);
        assert_eq!(series.points.len(), 1);
    }

    #[test]
    fn consecutive_series_differ() {
        let mut rng = rng();
        let a = generate_trend_series(&mut rng, "qaAccuracy", 30);
        let b = generate_trend_series(&mut rng, "qaAccuracy", 30);
        assert_ne!(a.points, b.points);
    }

    #[test]
    fn module_statuses_cover_every_module() {
        let statuses = generate_module_statuses(&mut rng());
        assert_eq!(statuses.len(), MODULE_NAMES.len());
        for (status, name) in statuses.iter().zip(MODULE_NAMES) {
            assert_eq!(status.name, name);
            assert!((0.7..=1.0).contains(&status.score));
        }
    }
}
