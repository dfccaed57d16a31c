//! Dashboard view model: a pure mapping from `AnalysisResult` to the strings
//! the frontend renders verbatim.
//!
//! Every optional or empty field is materialized here as an explicit
//! fallback ("Not identified", "Not specified", placeholder messages for
//! empty lists) so no screen region is ever left blank. An empty citation is
//! treated as "not found", never as an error.

use crate::models::{AnalysisResult, CitationItem, DocItem, Rule, Severity};
use serde::Serialize;

pub const NOT_IDENTIFIED: &str = "Not identified";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const CITATION_NOT_FOUND: &str = "Not found";
pub const NO_REQUIREMENTS: &str = "No specific requirements found.";
pub const NO_ITEMS: &str = "No items found in the technical reference.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub metadata: MetadataView,
    pub go_no_go: Vec<FlagView>,
    pub rules: Vec<RuleView>,
    pub habilitation: Vec<DocSectionView>,
    pub items: Vec<ItemView>,
    /// Set when the item list is empty, rendered in its place.
    pub items_placeholder: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataView {
    pub filename: String,
    pub number: String,
    pub object: String,
    pub agency: String,
    pub opening: String,
    pub dispute_mode: String,
    pub portal: String,
    pub estimated_value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagView {
    pub label: String,
    pub description: String,
    pub citation: String,
    pub severity: String,
    /// Display tone the frontend maps to colors.
    pub tone: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleView {
    pub label: String,
    pub value: String,
    pub citation: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSectionView {
    pub label: String,
    pub count: usize,
    pub docs: Vec<DocView>,
    /// Set when the section is empty, rendered in its place.
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocView {
    pub requirement: String,
    pub citation: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub citation: String,
    pub specs: Vec<String>,
}

impl DashboardView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let meta = &result.metadata;
        let gng = &result.go_no_go;
        let hab = &result.habilitation;

        let opening = match (&meta.opening_date, &meta.opening_time) {
            (Some(date), Some(time)) => format!("{} {}", date, time),
            (Some(date), None) => date.clone(),
            (None, Some(time)) => time.clone(),
            (None, None) => NOT_IDENTIFIED.to_string(),
        };

        let items: Vec<ItemView> = result.items.iter().map(item_view).collect();
        let items_placeholder = items.is_empty().then(|| NO_ITEMS.to_string());

        Self {
            metadata: MetadataView {
                filename: or_fallback(&meta.filename, NOT_IDENTIFIED),
                number: or_fallback(&meta.number, NOT_IDENTIFIED),
                object: or_fallback(&meta.object, NOT_IDENTIFIED),
                agency: or_fallback(&meta.agency, NOT_IDENTIFIED),
                opening,
                dispute_mode: opt_or_fallback(&meta.dispute_mode, NOT_IDENTIFIED),
                portal: opt_or_fallback(&meta.portal, NOT_IDENTIFIED),
                estimated_value: opt_or_fallback(&meta.estimated_value, NOT_IDENTIFIED),
            },
            go_no_go: vec![
                flag_view("Bid Bond", &gng.bid_bond),
                flag_view("Net Worth", &gng.net_worth),
                flag_view("Site Visit", &gng.site_visit),
                flag_view("Sample", &gng.sample),
            ],
            rules: vec![
                rule_view("Delivery Deadline", &result.rules.delivery_deadline),
                rule_view("Contract Term", &result.rules.contract_term),
                rule_view("Equipment Condition", &result.rules.equipment_condition),
            ],
            habilitation: vec![
                doc_section("Legal", &hab.legal),
                doc_section("Fiscal & Labor", &hab.fiscal_labor),
                doc_section("Technical Qualification", &hab.technical),
                doc_section("Economic Qualification", &hab.economic),
                doc_section("Technical Staff", &hab.technical_staff),
            ],
            items,
            items_placeholder,
        }
    }
}

/// Color tone for a severity badge.
pub fn severity_tone(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "danger",
        Severity::Warning => "caution",
        Severity::Info => "notice",
    }
}

fn flag_view(label: &str, item: &CitationItem) -> FlagView {
    FlagView {
        label: label.to_string(),
        description: or_fallback(&item.description, NOT_SPECIFIED),
        citation: or_fallback(&item.citation, CITATION_NOT_FOUND),
        severity: item.severity.as_str().to_string(),
        tone: severity_tone(item.severity).to_string(),
    }
}

fn rule_view(label: &str, rule: &Rule) -> RuleView {
    RuleView {
        label: label.to_string(),
        value: or_fallback(&rule.value, NOT_SPECIFIED),
        citation: or_fallback(&rule.citation, CITATION_NOT_FOUND),
    }
}

fn doc_section(label: &str, docs: &[DocItem]) -> DocSectionView {
    DocSectionView {
        label: label.to_string(),
        count: docs.len(),
        docs: docs
            .iter()
            .map(|d| DocView {
                requirement: or_fallback(&d.requirement, NOT_SPECIFIED),
                citation: or_fallback(&d.citation, CITATION_NOT_FOUND),
            })
            .collect(),
        placeholder: docs.is_empty().then(|| NO_REQUIREMENTS.to_string()),
    }
}

fn item_view(item: &crate::models::BidItem) -> ItemView {
    ItemView {
        id: item.id,
        name: or_fallback(&item.name, NOT_IDENTIFIED),
        quantity: or_fallback(&item.quantity, NOT_SPECIFIED),
        unit: opt_or_fallback(&item.unit, NOT_SPECIFIED),
        citation: or_fallback(&item.citation, CITATION_NOT_FOUND),
        specs: item.specs.clone(),
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn opt_or_fallback(value: &Option<String>, fallback: &str) -> String {
    match value {
        Some(v) => or_fallback(v, fallback),
        None => fallback.to_string(),
    }
}
