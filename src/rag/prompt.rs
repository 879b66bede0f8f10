//! Prompt assembly: advisory persona, provenance-labeled context blocks,
//! conversation history, and the final user message.

use crate::llm::{ChatMessage, Role};

use super::pool::{Document, ScoredDocument};

const SYSTEM_PERSONA: &str = "You are a senior building science and strata engineering advisor. \
Your goal is to help PROJECT MANAGERS answer technical questions that \
they would normally ask an engineer or technician.\n\n\
Use ONLY the provided context from reports and knowledge base. \
Be conservative; if the question requires detailed structural analysis \
or legal advice, clearly say it must be escalated to an engineer.\n\n\
Always:\n\
- Explain in plain language first.\n\
- Then add a short technical note if needed.\n\
- Never give structural sign-off or legal advice.";

const REPORT_PRIORITY_CLAUSE: &str = "\n\nA specific report is associated with this question. \
Give priority to information coming from that report when answering.";

const EMPTY_CONTEXT: &str = "No relevant context found in the knowledge base.";
const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Provenance label for a context block: filename, else title, else a
/// fixed fallback.
pub fn source_label(document: &Document) -> &str {
    if let Some(filename) = document.filename.as_deref() {
        if !filename.is_empty() {
            return filename;
        }
    }
    if !document.title.is_empty() {
        return &document.title;
    }
    "Unknown source"
}

/// One labeled block per result, joined with a visible separator. Empty
/// retrieval yields a literal placeholder so generation still has
/// something to anchor on.
pub fn build_context(results: &[ScoredDocument]) -> String {
    if results.is_empty() {
        return EMPTY_CONTEXT.to_string();
    }

    results
        .iter()
        .map(|result| {
            format!(
                "[Source: {}]\n{}",
                source_label(&result.document),
                result.document.text
            )
        })
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Assemble the full message sequence: system persona (with the report
/// priority clause appended when scoped), caller-supplied history verbatim,
/// then the user message carrying the question and the context block.
pub fn build_messages(
    question: &str,
    history: &[ChatMessage],
    results: &[ScoredDocument],
    report_scoped: bool,
) -> Vec<ChatMessage> {
    let mut system_prompt = SYSTEM_PERSONA.to_string();
    if report_scoped {
        system_prompt.push_str(REPORT_PRIORITY_CLAUSE);
    }

    let context = build_context(results);
    let user_prompt = format!(
        "Question from project manager:\n{question}\n\n\
         Context from past reports and knowledge base:\n{context}\n\n\
         Answer in a way that a project manager can forward parts of it to a strata \
         council or property manager."
    );

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage {
        role: Role::System,
        content: system_prompt,
    });
    messages.extend(history.iter().cloned());
    messages.push(ChatMessage {
        role: Role::User,
        content: user_prompt,
    });
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_doc() -> Document {
        Document {
            id: "kb-1".to_string(),
            title: "Membrane Lifespan".to_string(),
            text: "Membranes last 15 to 25 years.".to_string(),
            report_id: None,
            filename: None,
        }
    }

    fn report_doc() -> Document {
        Document {
            id: "chunk-1".to_string(),
            title: "Report: depreciation.pdf".to_string(),
            text: "Balcony membranes are past service life.".to_string(),
            report_id: Some("r1".to_string()),
            filename: Some("depreciation.pdf".to_string()),
        }
    }

    fn scored(document: Document) -> ScoredDocument {
        ScoredDocument {
            document,
            score: 0.9,
        }
    }

    #[test]
    fn label_prefers_filename_then_title() {
        assert_eq!(source_label(&report_doc()), "depreciation.pdf");
        assert_eq!(source_label(&base_doc()), "Membrane Lifespan");

        let anonymous = Document {
            id: "x".to_string(),
            title: String::new(),
            text: "text".to_string(),
            report_id: None,
            filename: None,
        };
        assert_eq!(source_label(&anonymous), "Unknown source");
    }

    #[test]
    fn empty_retrieval_uses_the_placeholder() {
        assert_eq!(
            build_context(&[]),
            "No relevant context found in the knowledge base."
        );
    }

    #[test]
    fn blocks_are_labeled_and_separated() {
        let context = build_context(&[scored(report_doc()), scored(base_doc())]);
        assert!(context.starts_with("[Source: depreciation.pdf]\n"));
        assert!(context.contains("\n\n---\n\n[Source: Membrane Lifespan]\n"));
        assert!(context.contains("Membranes last 15 to 25 years."));
    }

    #[test]
    fn history_sits_between_system_and_user() {
        let history = vec![
            ChatMessage {
                role: Role::User,
                content: "earlier question".to_string(),
            },
            ChatMessage {
                role: Role::Assistant,
                content: "earlier answer".to_string(),
            },
        ];

        let messages = build_messages("new question", &history, &[scored(base_doc())], false);

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].content, "earlier question");
        assert_eq!(messages[2].content, "earlier answer");
        assert_eq!(messages[3].role, Role::User);
        assert!(messages[3].content.contains("new question"));
        assert!(messages[3].content.contains("[Source: Membrane Lifespan]"));
        assert!(messages[3].content.contains("strata council or property manager"));
    }

    #[test]
    fn report_priority_clause_only_when_scoped() {
        let scoped = build_messages("q", &[], &[], true);
        assert!(scoped[0].content.contains("Give priority to information"));

        let unscoped = build_messages("q", &[], &[], false);
        assert!(!unscoped[0].content.contains("Give priority to information"));
        assert!(unscoped[0]
            .content
            .starts_with("You are a senior building science"));
    }
}
