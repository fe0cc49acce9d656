//! Turns the model's free-form reply into a complete, in-bounds [`AnalysisResult`].
//!
//! Two tiers of recovery:
//! - a reply that contains a parsable JSON object keeps every field the model got
//!   right, and each missing or malformed field gets its own default;
//! - a reply without a parsable JSON object is replaced by the fixed fallback
//!   result for the mode.

use common_types::{AnalysisMode, AnalysisResult, ExpertAnalysis, NicheAnalysis, VisualFactors};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 10;
pub const MAX_STRENGTHS: usize = 3;
pub const MAX_IMPROVEMENTS: usize = 2;
pub const MAX_SUGGESTIONS: usize = 3;

const EXPERT_DEFAULT_SCORE: u8 = 7;
const NICHE_DEFAULT_SCORE: u8 = 6;
const DEFAULT_CTR_ESTIMATE: &str = "8.0%";
const DEFAULT_ANALYSIS: &str = "Analyse générée avec succès.";
const DEFAULT_EMOTION: &str = "non déterminé";
const DEFAULT_COLOR_SCHEME: &str = "neutre";
const DEFAULT_CONTRAST: &str = "moyen";

/// Normalize a raw model reply for the given mode. Never fails.
#[must_use]
pub fn normalize_reply(raw_text: &str, mode: AnalysisMode) -> AnalysisResult {
    let Some(fields) = parse_reply_object(raw_text) else {
        warn!(
            ?mode,
            "Model reply has no parsable JSON object, using fallback result. Raw reply: {raw_text}"
        );
        return fallback_result(mode);
    };
    debug!(?mode, keys = fields.len(), "Parsed model reply");

    match mode {
        AnalysisMode::Expert => AnalysisResult::Expert(expert_from_fields(&fields)),
        AnalysisMode::Niche => AnalysisResult::Niche(niche_from_fields(&fields)),
    }
}

/// The fixed result used when a reply cannot be parsed at all.
#[must_use]
pub fn fallback_result(mode: AnalysisMode) -> AnalysisResult {
    match mode {
        AnalysisMode::Expert => AnalysisResult::Expert(ExpertAnalysis {
            score: EXPERT_DEFAULT_SCORE,
            ctr_estimate: "8.2%".to_string(),
            analysis: "Cette miniature présente une structure cohérente avec des éléments \
visuels identifiables. L'analyse détaillée nécessiterait un format de réponse optimisé pour \
fournir des insights plus précis sur les facteurs de performance."
                .to_string(),
            visual_factors: VisualFactors {
                face_present: true,
                emotion: DEFAULT_EMOTION.to_string(),
                color_scheme: DEFAULT_COLOR_SCHEME.to_string(),
                text_count: 2,
                mobile_friendly: true,
                contrast: DEFAULT_CONTRAST.to_string(),
            },
            strengths: strings(&[
                "Structure visuelle organisée",
                "Éléments reconnaissables présents",
                "Composition globalement équilibrée",
            ]),
            improvements: strings(&[
                "Optimisation des contrastes nécessaire",
                "Clarification des éléments textuels",
            ]),
            suggestions: strings(&[
                "Renforcer le contraste des couleurs principales",
                "Agrandir les éléments textuels pour la lisibilité mobile",
                "Repositionner les éléments selon la règle des tiers",
            ]),
        }),
        AnalysisMode::Niche => AnalysisResult::Niche(NicheAnalysis {
            score: NICHE_DEFAULT_SCORE,
            analysis_text: "Cette miniature reprend des codes reconnaissables de sa niche. \
Une réponse d'analyse plus structurée serait nécessaire pour détailler précisément ce qui \
favorise ou freine le clic."
                .to_string(),
            suggestions: strings(&[
                "Mettre en avant un seul élément principal immédiatement identifiable",
                "Renforcer le contraste pour ressortir dans le fil d'accueil",
                "Limiter le texte incrusté à trois mots lisibles sur mobile",
            ]),
        }),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// The model often wraps its JSON in prose, so take the outermost `{...}` span.
fn extract_json_candidate(raw_text: &str) -> &str {
    match (raw_text.find('{'), raw_text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw_text[start..=end],
        _ => raw_text,
    }
}

fn parse_reply_object(raw_text: &str) -> Option<Map<String, Value>> {
    let candidate = extract_json_candidate(raw_text);
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(fields)) => Some(fields),
        Ok(other) => {
            debug!("Model reply parsed to a non-object JSON value: {other}");
            None
        }
        Err(e) => {
            debug!("Model reply is not valid JSON: {e}");
            None
        }
    }
}

fn expert_from_fields(fields: &Map<String, Value>) -> ExpertAnalysis {
    ExpertAnalysis {
        score: coerce_score(fields.get("score"), EXPERT_DEFAULT_SCORE),
        ctr_estimate: coerce_ctr_estimate(fields.get("ctrEstimate")),
        analysis: coerce_text(fields, &["analysis", "analysisText"]),
        visual_factors: coerce_visual_factors(fields.get("visualFactors")),
        strengths: coerce_list(fields.get("strengths"), MAX_STRENGTHS),
        improvements: coerce_list(fields.get("improvements"), MAX_IMPROVEMENTS),
        suggestions: coerce_list(fields.get("suggestions"), MAX_SUGGESTIONS),
    }
}

fn niche_from_fields(fields: &Map<String, Value>) -> NicheAnalysis {
    NicheAnalysis {
        score: coerce_score(fields.get("score"), NICHE_DEFAULT_SCORE),
        analysis_text: coerce_text(fields, &["analysisText", "analysis"]),
        suggestions: coerce_list(fields.get("suggestions"), MAX_SUGGESTIONS),
    }
}

fn coerce_score(value: Option<&Value>, default: u8) -> u8 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Some(Value::String(text)) => parse_leading_integer(text),
        _ => None,
    };
    parsed.map_or(default, |score| score.clamp(MIN_SCORE, MAX_SCORE) as u8)
}

/// Reads an integer prefix the way a lenient parser would: `" 8/10"` is 8, `"-3"` is -3,
/// `"huit"` is nothing. Overlong digit runs saturate.
fn parse_leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn coerce_ctr_estimate(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Some(Value::Number(number)) => format!("{number}%"),
        _ => DEFAULT_CTR_ESTIMATE.to_string(),
    }
}

fn coerce_text(fields: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map_or_else(|| DEFAULT_ANALYSIS.to_string(), ToString::to_string)
}

fn coerce_visual_factors(value: Option<&Value>) -> VisualFactors {
    let empty = Map::new();
    let factors = value.and_then(Value::as_object).unwrap_or(&empty);

    VisualFactors {
        face_present: coerce_bool(factors.get("facePresent"), false),
        emotion: coerce_label(factors.get("emotion"), DEFAULT_EMOTION),
        color_scheme: coerce_label(factors.get("colorScheme"), DEFAULT_COLOR_SCHEME),
        text_count: coerce_count(factors.get("textCount")),
        // Assumed mobile friendly unless the model says otherwise.
        mobile_friendly: coerce_bool(factors.get("mobileFriendly"), true),
        contrast: coerce_label(factors.get("contrast"), DEFAULT_CONTRAST),
    }
}

fn coerce_bool(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => match text.trim().to_lowercase().as_str() {
            "true" | "oui" | "yes" => true,
            "false" | "non" | "no" => false,
            _ => default,
        },
        _ => default,
    }
}

fn coerce_label(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn coerce_count(value: Option<&Value>) -> u32 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Some(Value::String(text)) => parse_leading_integer(text),
        _ => None,
    };
    parsed.map_or(0, |count| count.clamp(0, i64::from(u32::MAX)) as u32)
}

/// Keeps non-empty strings, in order, up to `max` of them. Anything but an array is empty.
fn coerce_list(value: Option<&Value>, max: usize) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .take(max)
        .map(ToString::to_string)
        .collect()
}
