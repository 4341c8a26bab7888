//! Parsing model replies: reasoning blocks and embedded atom plans.

/// Splits a leading `<think>…</think>` block off a reply.
///
/// Returns `(thinking, answer)`. The opening tag is optional (some chat
/// templates emit it in the prompt), the closing tag is not: without
/// `</think>` the whole reply is the answer.
pub fn split_thinking(raw: &str) -> (Option<&str>, &str) {
    let trimmed = raw.trim_start();
    let body = trimmed.strip_prefix("<think>").unwrap_or(trimmed);
    match body.split_once("</think>") {
        Some((thinking, answer)) => (Some(thinking.trim()), answer.trim_start()),
        None => (None, raw),
    }
}

/// Returns the text between the first `open` tag and the next `close` tag.
///
/// A Markdown code fence inside the tags is stripped. Empty plans are `None`.
pub fn extract_plan<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let end = start + text[start..].find(close)?;
    let plan = strip_code_fence(text[start..end].trim());
    (!plan.is_empty()).then_some(plan)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. `json`) on the fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_think_block() {
        let (thinking, answer) = split_thinking("<think>\nadd first\n</think>\n\nThe answer is 56.");
        assert_eq!(thinking, Some("add first"));
        assert_eq!(answer, "The answer is 56.");
    }

    #[test]
    fn missing_open_tag_still_splits() {
        let (thinking, answer) = split_thinking("reasoning</think>\n\nok");
        assert_eq!(thinking, Some("reasoning"));
        assert_eq!(answer, "ok");
    }

    #[test]
    fn no_think_block_returns_reply() {
        assert_eq!(split_thinking("plain"), (None, "plain"));
    }

    #[test]
    fn extracts_plan_between_tags() {
        let reply = "Plan:\n<atom_plan>\n{\"atoms\": []}\n</atom_plan>\nDone.";
        assert_eq!(
            extract_plan(reply, "<atom_plan>", "</atom_plan>"),
            Some("{\"atoms\": []}")
        );
    }

    #[test]
    fn strips_code_fence_inside_tags() {
        let reply = "<atom_plan>```json\n{\"atoms\": []}\n```</atom_plan>";
        assert_eq!(
            extract_plan(reply, "<atom_plan>", "</atom_plan>"),
            Some("{\"atoms\": []}")
        );
    }

    #[test]
    fn missing_or_empty_plan_is_none() {
        assert_eq!(extract_plan("no plan here", "<atom_plan>", "</atom_plan>"), None);
        assert_eq!(extract_plan("<atom_plan>  </atom_plan>", "<atom_plan>", "</atom_plan>"), None);
        assert_eq!(extract_plan("<atom_plan>{}", "<atom_plan>", "</atom_plan>"), None);
    }
}
