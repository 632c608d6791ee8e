//! Prompt templates
//!
//! The templates are fixed: each has a persona line, delimited slots for
//! interpolated content, and (where structured output is needed) the exact
//! JSON schema the model must emit. The context slot is always filled —
//! either with retrieved passages or with the explicit placeholder sentence —
//! so the template shape never varies.

/// Placeholder sentence for the context slot when retrieval produced nothing.
pub const CONTEXT_PLACEHOLDER: &str =
    "No specific context was retrieved from the knowledge base for this document.";

/// System prompt for the legal-advice chat flow.
pub const CHAT_SYSTEM_PROMPT: &str = "\
You are a Malaysian AI legal assistant specializing in employment and labor law. \
Your role is to help users understand their rights and obligations under the Employment Act 1955 and other relevant Malaysian regulations.\n\n\
Guidelines:\n\
- Answer in clear, simple sentences so that non-lawyers can understand.\n\
- If the user asks in Malay, reply in Malay. If in English, reply in English.\n\
- Provide short, structured answers. Use bullet points or numbered steps when possible.\n\
- Always focus on employment and labor law (e.g., wages, working hours, termination, leave, contracts, discrimination, unions).\n\
- If the question is outside this domain, politely decline and say it is not within employment law.\n\
- If the law does not specify or you are uncertain, say so clearly instead of guessing.\n\
- When possible, mention the relevant section of the Employment Act or other law.\n\
- Do not provide personal opinions, only legal information and explanations.";

/// The fixed set of legal specialization labels the classifier may return.
pub const SPECIALIZATIONS: &[&str] = &[
    "Employment Law",
    "Industrial Relations",
    "Contract Law",
    "Dispute Resolution",
    "Occupational Safety and Health",
    "Compensation and Benefits",
];

/// Build the contract-analysis prompt.
///
/// `context` must already be joined passages or the placeholder sentence;
/// the context slot is never left empty.
pub fn analysis_prompt(document_text: &str, context: &str) -> String {
    format!(
        r#"You are a specialized AI legal assistant for Malaysian labour contracts. Your task is to conduct a detailed analysis of the provided contract text and return a structured JSON output.

<contract_text>
{document_text}
</contract_text>

<knowledge_base_context>
{context}
</knowledge_base_context>

Your response MUST be a single, valid JSON object and nothing else, following the structure below. Do not include any other text, explanations, or markdown formatting outside of the JSON object.

{{
  "summary": {{
    "criticalIssues": <count_of_red_clauses>,
    "areasForCaution": <count_of_yellow_clauses>
  }},
  "clauses": [
    {{
      "title": "<A concise, descriptive title for the clause>",
      "originalText": "<The exact, verbatim text of the clause from the document>",
      "color": "'Red' or 'Yellow' or 'Green'",
      "explanation": "<A simple, clear explanation of what the clause means>",
      "whyItMatters": "<Explain the potential impact or risk for the user>",
      "suggestion": "<Provide an actionable suggestion, e.g., 'Request clarification on...', 'Negotiate to change...', 'This is a standard clause.'>"
    }}
  ]
}}
"#
    )
}

/// Wrap a system prompt and user message in the model's chat template.
pub fn chat_prompt(system: &str, user: &str) -> String {
    format!(
        "<|begin_of_text|>\n\
         <|start_header_id|>system<|end_header_id|>\n\
         {system}\n\
         <|eot_id|>\n\
         <|start_header_id|>user<|end_header_id|>\n\
         {user}\n\
         <|eot_id|>\n\
         <|start_header_id|>assistant<|end_header_id|>\n"
    )
}

/// Build the specialization-classification prompt.
pub fn classification_prompt(user_prompt: &str) -> String {
    let labels = SPECIALIZATIONS
        .iter()
        .map(|l| format!("\"{l}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are a classifier for a legal expert directory. Given a user request, select every matching specialization from this fixed list: [{labels}].

<user_request>
{user_prompt}
</user_request>

Respond with ONLY a JSON array of the matching specialization names, for example ["Employment Law"]. If nothing matches, respond with [].
"#
    )
}

/// Join retrieved passages for the context slot, or fall back to the
/// placeholder sentence.
pub fn join_context(passages: Option<&[String]>) -> String {
    match passages {
        Some(passages) if !passages.is_empty() => passages.join("\n\n"),
        _ => CONTEXT_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_has_fixed_slots() {
        let prompt = analysis_prompt("the contract", "the context");
        assert!(prompt.contains("<contract_text>\nthe contract\n</contract_text>"));
        assert!(prompt.contains("<knowledge_base_context>\nthe context\n</knowledge_base_context>"));
        assert!(prompt.contains("criticalIssues"));
        assert!(prompt.contains("whyItMatters"));
    }

    #[test]
    fn test_empty_context_uses_placeholder() {
        assert_eq!(join_context(None), CONTEXT_PLACEHOLDER);
        assert_eq!(join_context(Some(&[])), CONTEXT_PLACEHOLDER);
    }

    #[test]
    fn test_context_passages_joined_by_blank_line() {
        let passages = vec!["first".to_string(), "second".to_string()];
        assert_eq!(join_context(Some(&passages)), "first\n\nsecond");
    }

    #[test]
    fn test_classification_prompt_embeds_label_set() {
        let prompt = classification_prompt("I got fired without notice");
        for label in SPECIALIZATIONS {
            assert!(prompt.contains(label));
        }
        assert!(prompt.contains("I got fired without notice"));
    }
}
