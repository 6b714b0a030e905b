//! Terminal rendering for model answers.
//!
//! Answers arrive in a constrained markdown subset (`**bold**` plus line
//! breaks). This module converts that subset to ANSI styling for terminal
//! display, or strips the markers when color is disabled.

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render the markdown subset of an answer for terminal display.
///
/// `**text**` pairs become ANSI bold when `use_color` is set and are
/// stripped otherwise. An unpaired `**` is left verbatim. Newlines pass
/// through untouched.
pub fn render_markdown(text: &str, use_color: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("**") else {
            break;
        };
        out.push_str(&rest[..start]);
        if use_color {
            out.push_str(BOLD);
            out.push_str(&after[..end]);
            out.push_str(RESET);
        } else {
            out.push_str(&after[..end]);
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_becomes_ansi() {
        assert_eq!(
            render_markdown("the **X phone** wins", true),
            "the \x1b[1mX phone\x1b[0m wins"
        );
    }

    #[test]
    fn bold_markers_stripped_without_color() {
        assert_eq!(
            render_markdown("the **X phone** wins", false),
            "the X phone wins"
        );
    }

    #[test]
    fn multiple_bold_spans() {
        assert_eq!(render_markdown("**a** and **b**", false), "a and b");
    }

    #[test]
    fn unpaired_marker_left_verbatim() {
        assert_eq!(render_markdown("2 ** 8 = 256", false), "2 ** 8 = 256");
        assert_eq!(render_markdown("**a** then **b", false), "a then **b");
    }

    #[test]
    fn newlines_pass_through() {
        assert_eq!(render_markdown("line one\nline two", true), "line one\nline two");
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(render_markdown("no markup here", true), "no markup here");
    }
}
