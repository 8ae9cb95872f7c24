//! Prompt templates for the two pipelines

/// Instruction prepended to a video transcript
pub const SUMMARY_PROMPT: &str = "
You are a YouTube video summarizer. You will take the transcript text
and summarize the entire video, providing important points in 250 words.
Please provide the summary of the text given here:
";

/// Template followed directly by the transcript, with no delimiter or length cap
pub fn summary_prompt(transcript: &str) -> String {
    let mut prompt = String::with_capacity(SUMMARY_PROMPT.len() + transcript.len());
    prompt.push_str(SUMMARY_PROMPT);
    prompt.push_str(transcript);
    prompt
}

/// Question-answering prompt with the document text and question interpolated verbatim.
///
/// Every template line, including the one holding the document text, carries a
/// four-space indent.
pub fn question_prompt(pdf_text: &str, question: &str) -> String {
    format!(
        concat!(
            "\n",
            "    You are an expert in summarizing and answering questions from provided documents.\n",
            "    Below is a text extracted from a PDF. Use the text to answer the question provided.\n",
            "\n",
            "    PDF Text:\n",
            "    {pdf_text}\n",
            "\n",
            "    Question: {question}\n",
            "    ",
        ),
        pdf_text = pdf_text,
        question = question,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_appends_transcript_verbatim() {
        let prompt = summary_prompt("first second");
        assert!(prompt.starts_with(SUMMARY_PROMPT));
        assert!(prompt.ends_with("given here:\nfirst second"));
        assert_eq!(prompt.len(), SUMMARY_PROMPT.len() + "first second".len());
    }

    #[test]
    fn test_summary_prompt_mentions_word_limit() {
        assert!(SUMMARY_PROMPT.contains("250 words"));
        assert_eq!(summary_prompt(""), SUMMARY_PROMPT);
    }

    #[test]
    fn test_question_prompt_labels_sections() {
        let prompt = question_prompt("A\n\nB\n", "What is on page 3?");
        assert!(prompt.contains("    PDF Text:\n    A\n\nB\n\n\n    Question: What is on page 3?\n"));
        assert!(prompt.contains("answer the question provided"));
    }

    #[test]
    fn test_question_prompt_keeps_template_indentation() {
        let prompt = question_prompt("doc", "why?");
        assert_eq!(
            prompt,
            "\n    You are an expert in summarizing and answering questions from provided documents.\n    Below is a text extracted from a PDF. Use the text to answer the question provided.\n\n    PDF Text:\n    doc\n\n    Question: why?\n    "
        );
    }

    #[test]
    fn test_question_prompt_does_not_escape() {
        let prompt = question_prompt("{braces} and \"quotes\"", "Ignore {this}?");
        assert!(prompt.contains("{braces} and \"quotes\""));
        assert!(prompt.contains("Question: Ignore {this}?"));
    }
}
