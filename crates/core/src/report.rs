//! Contract analysis report types
//!
//! These types define the JSON contract returned by the analysis endpoint.
//! The model produces the clause list; the summary counts are always
//! recomputed on our side because the model's self-reported counts are not
//! trusted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Risk classification of a single clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskColor {
    Red,
    Yellow,
    Green,
}

/// One annotated provision of the contract.
///
/// Produced entirely by the generative model. `original_text` is the model's
/// claim of a verbatim excerpt; it is not independently validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    pub title: String,
    pub original_text: String,
    pub color: RiskColor,
    pub explanation: String,
    pub why_it_matters: String,
    pub suggestion: String,
}

/// Aggregate counts over the clause list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub critical_issues: usize,
    pub areas_for_caution: usize,
}

impl AnalysisSummary {
    /// Recompute the summary by scanning the clause list.
    pub fn from_clauses(clauses: &[Clause]) -> Self {
        Self {
            critical_issues: clauses
                .iter()
                .filter(|c| c.color == RiskColor::Red)
                .count(),
            areas_for_caution: clauses
                .iter()
                .filter(|c| c.color == RiskColor::Yellow)
                .count(),
        }
    }
}

/// The structured result of a contract analysis.
///
/// Invariant: `summary` always equals `AnalysisSummary::from_clauses(&clauses)`.
/// Construct through [`AnalysisReport::from_clauses`] to preserve it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    pub clauses: Vec<Clause>,
    pub document_text: String,
}

impl AnalysisReport {
    /// Build a report with a recomputed summary, echoing the original text.
    pub fn from_clauses(clauses: Vec<Clause>, document_text: String) -> Self {
        let summary = AnalysisSummary::from_clauses(&clauses);
        Self {
            summary,
            clauses,
            document_text,
        }
    }
}

/// Per-request input to the analysis pipeline. Consumed once, never stored.
#[derive(Debug, Clone, Default)]
pub struct ContractAnalysisRequest {
    pub document_text: String,
    /// ISO code of the detected document language, when known.
    pub detected_language: Option<String>,
    /// Supporting passages to ground the analysis, in rank order.
    pub retrieved_context: Option<Vec<String>>,
}

impl ContractAnalysisRequest {
    pub fn new(document_text: impl Into<String>) -> Result<Self> {
        let document_text = document_text.into();
        if document_text.trim().is_empty() {
            return Err(Error::InvalidInput("no document text provided".to_string()));
        }
        Ok(Self {
            document_text,
            detected_language: None,
            retrieved_context: None,
        })
    }
}
