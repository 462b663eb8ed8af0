//! Mock research tools: a static knowledge base lookup, a truncating summarizer,
//! a report formatter and an email sender that only pretends to send.

use chrono::{Local, NaiveDate};
use serde::Deserialize;

/// Ordered so the first key found in the query wins.
const KNOWLEDGE_BASE: &[(&str, &str)] = &[
    (
        "ai agents",
        "AI agents are systems that can reason, plan, and act using tools.",
    ),
    ("rag", "RAG stands for Retrieval-Augmented Generation."),
    (
        "llm",
        "Large Language Models generate text based on probability distributions.",
    ),
];

const NO_MATCH: &str = "No relevant information found.";

/// Number of characters kept by `summarize_text`.
const SUMMARY_CHARS: usize = 120;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummarizeParams {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportParams {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailParams {
    pub recipient: String,
    pub report: String,
}

pub fn search_knowledge_base(params: &SearchParams) -> String {
    let query = params.query.to_lowercase();
    KNOWLEDGE_BASE
        .iter()
        .find(|(key, _)| query.contains(key))
        .map(|(_, value)| value.to_string())
        .unwrap_or_else(|| NO_MATCH.to_string())
}

pub fn summarize_text(params: &SummarizeParams) -> String {
    let head: String = params.text.chars().take(SUMMARY_CHARS).collect();
    format!("Summary: {}...", head)
}

pub fn generate_report(params: &ReportParams) -> String {
    generate_report_on(params, Local::now().date_naive())
}

fn generate_report_on(params: &ReportParams, date: NaiveDate) -> String {
    format!(
        "REPORT TITLE: {}\nDATE: {}\n\n{}",
        params.title,
        date.format("%Y-%m-%d"),
        params.summary
    )
}

pub fn send_email(params: &EmailParams) -> String {
    format!("Email successfully sent to {}.", params.recipient)
}
