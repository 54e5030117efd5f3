//! Host-side text cleaning.
//!
//! The story model may embed an `[IMAGE_PROMPT: ...]` block for the image
//! generator. It is not narrative and is stripped before display.

use crate::patterns::IMAGE_PROMPT_RE;

/// Remove every image prompt block and tidy the surrounding whitespace.
pub fn clean_narrative(text: &str) -> String {
    let stripped = IMAGE_PROMPT_RE.replace_all(text, "");
    stripped
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Return the contents of the first image prompt block, if any.
pub fn image_prompt(text: &str) -> Option<String> {
    IMAGE_PROMPT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|prompt| !prompt.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prompt_block() {
        let text = "Neon rain hisses.\n[IMAGE_PROMPT: a rainy street, neon signs]";
        assert_eq!(clean_narrative(text), "Neon rain hisses.");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(clean_narrative("  Just text.  "), "Just text.");
    }

    #[test]
    fn extracts_prompt() {
        let text = "[IMAGE_PROMPT: chrome arm on a bar counter ] You order a drink.";
        assert_eq!(
            image_prompt(text).as_deref(),
            Some("chrome arm on a bar counter")
        );
        assert!(image_prompt("no prompt here").is_none());
    }
}
