//! Wire model for the analysis server's response.
//!
//! Field names on the wire are the Portuguese ones the `/analyze` endpoint
//! has always used; Rust-side names are English, mapped with serde renames.
//! Every extracted fact carries a `citation` pointing back to its source
//! ("File > Item X.Y"). An empty citation means "not found", not an error.

use serde::{Deserialize, Serialize};

/// Tender identity and headline facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Name of the main file, or "Combined Files" for multi-file analyses.
    pub filename: String,
    #[serde(rename = "orgao")]
    pub agency: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "objeto")]
    pub object: String,
    #[serde(rename = "data_abertura", default)]
    pub opening_date: Option<String>,
    #[serde(rename = "horario_abertura", default)]
    pub opening_time: Option<String>,
    #[serde(rename = "modo_disputa", default)]
    pub dispute_mode: Option<String>,
    #[serde(default)]
    pub portal: Option<String>,
    #[serde(rename = "valor_estimado", default)]
    pub estimated_value: Option<String>,
}

/// Severity of a go/no-go finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "critical" => Some(Severity::Critical),
            "warning" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }
}

/// A requirement lifted verbatim from the tender, with its source citation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationItem {
    #[serde(rename = "descricao")]
    pub description: String,
    pub citation: String,
    #[serde(rename = "status")]
    pub severity: Severity,
}

/// The four categorical eligibility flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoNoGo {
    #[serde(rename = "garantia_proposta")]
    pub bid_bond: CitationItem,
    #[serde(rename = "patrimonio_liquido")]
    pub net_worth: CitationItem,
    #[serde(rename = "visita_tecnica")]
    pub site_visit: CitationItem,
    #[serde(rename = "amostra")]
    pub sample: CitationItem,
}

/// A single extracted value with its citation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub value: String,
    pub citation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rules {
    #[serde(rename = "prazo_entrega")]
    pub delivery_deadline: Rule,
    #[serde(rename = "vigencia")]
    pub contract_term: Rule,
    #[serde(rename = "condicao_equipamentos")]
    pub equipment_condition: Rule,
}

/// One required qualification document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocItem {
    #[serde(rename = "requisito")]
    pub requirement: String,
    pub citation: String,
}

/// The five categorized qualification checklists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabilitationDocs {
    #[serde(rename = "juridica", default)]
    pub legal: Vec<DocItem>,
    #[serde(rename = "fiscal_trabalhista", default)]
    pub fiscal_labor: Vec<DocItem>,
    #[serde(rename = "qualificacao_tecnica", default)]
    pub technical: Vec<DocItem>,
    #[serde(rename = "qualificacao_economica", default)]
    pub economic: Vec<DocItem>,
    /// Engineers, technicians, specialized staff certifications.
    #[serde(rename = "equipe_tecnica", default)]
    pub technical_staff: Vec<DocItem>,
}

/// A priced/specified entry from the technical reference document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidItem {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "quantidade")]
    pub quantity: String,
    #[serde(rename = "unidade", default)]
    pub unit: Option<String>,
    pub citation: String,
    #[serde(default)]
    pub specs: Vec<String>,
}

/// Full structured audit returned by the analysis server.
///
/// Display-only from the app's point of view: created fresh per analysis,
/// never edited locally, discarded on reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metadata: Metadata,
    pub go_no_go: GoNoGo,
    #[serde(rename = "regras")]
    pub rules: Rules,
    #[serde(rename = "habilitacao")]
    pub habilitation: HabilitationDocs,
    #[serde(rename = "itens", default)]
    pub items: Vec<BidItem>,
}

/// A complete, well-formed `/analyze` response body, shared by tests across
/// the crate.
#[cfg(test)]
pub(crate) fn sample_result_json() -> serde_json::Value {
    serde_json::json!({
        "metadata": {
            "filename": "edital.pdf",
            "orgao": "Prefeitura Municipal",
            "numero": "90012/2025",
            "objeto": "Aquisição de equipamentos de informática",
            "portal": "Compras.gov",
            "valor_estimado": "R$ 1.200.000,00"
        },
        "go_no_go": {
            "garantia_proposta": {"descricao": "Garantia de 1%", "citation": "edital.pdf > Item 9.1", "status": "warning"},
            "patrimonio_liquido": {"descricao": "PL mínimo de 10%", "citation": "edital.pdf > Item 10.2", "status": "critical"},
            "visita_tecnica": {"descricao": "Facultativa", "citation": "edital.pdf > Item 4.3", "status": "info"},
            "amostra": {"descricao": "Amostra do item 1 em 5 dias", "citation": "tr.pdf > Item 2.8", "status": "warning"}
        },
        "regras": {
            "prazo_entrega": {"value": "30 dias", "citation": "tr.pdf > Item 5.1"},
            "vigencia": {"value": "12 meses", "citation": "edital.pdf > Item 12.1"},
            "condicao_equipamentos": {"value": "Novos, primeiro uso", "citation": "tr.pdf > Item 3.2"}
        },
        "habilitacao": {
            "juridica": [{"requisito": "Ato constitutivo", "citation": "edital.pdf > Item 8.1"}],
            "fiscal_trabalhista": [],
            "qualificacao_tecnica": [{"requisito": "Atestado de capacidade técnica", "citation": "edital.pdf > Item 8.4"}],
            "qualificacao_economica": [],
            "equipe_tecnica": []
        },
        "itens": [
            {
                "id": 1,
                "nome": "Notebook",
                "quantidade": "40",
                "unidade": "UN",
                "citation": "tr.pdf > Item 1.1",
                "specs": ["16 GB RAM", "SSD 512 GB"]
            }
        ]
    })
}
