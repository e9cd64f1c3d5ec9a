use std::fmt::Write as _;

use chrono::{DateTime, Local};
use regex::{Captures, Regex};

use crate::toggle::ToggleAllocator;

/// Marker persisted in every dump; its presence tells a later writer the
/// script/style header is already in the file.
pub(crate) const LOGGED_ON_MARKER: &str = "<b>Logged on:</b>";

/// One-time header: the `toggleDiv` show/hide script plus the color
/// classes the substitutions below refer to.
const SCRIPT_HEADER: &str = "<script>function toggleDiv(num){var a=document.getElementById('d'+num);var b=document.getElementById('a'+num);var c=a.style.display;if(c=='none'){b.innerHTML='-';a.style.display='inline';}else{b.innerHTML='+';a.style.display='none';}}</script>\n<style type=\"text/css\"><!--.arr {color:#6185A6}.ass {color:#C0C0C0}.ind {color:#00CC00}.pri {color:#CC0000}.pro {color:#9900CC}--></style>\n";

/// Thin horizontal rule separating dumps within one file.
const DIVIDER: &str = "<div style=\"width:100%;height:0;border-top:1px #000 solid;border-bottom:1px #CCC solid;\"></div>";

/// Everything one dump contributes to the `<pre>` block.
pub(crate) struct DumpFragment<'a> {
    pub message: &'a str,
    pub file: &'a str,
    pub line: Option<u32>,
    pub criticality: Option<&'a str>,
    pub user: Option<&'a str>,
    /// Type label plus rendered text of the dumped value, when present.
    pub content: Option<(String, String)>,
}

pub(crate) struct HtmlFormatter {
    line_open: Regex,
    line_close: Regex,
    index: Regex,
}

impl HtmlFormatter {
    pub(crate) fn new() -> Self {
        Self {
            line_open: Regex::new(r"(\s+)\($").expect("valid line-open pattern"),
            line_close: Regex::new(r"(\s+)\)$").expect("valid line-close pattern"),
            index: Regex::new(r"\[(\d*)\]").expect("valid index pattern"),
        }
    }

    /// Render one dump as an appendable HTML fragment.
    pub(crate) fn format(
        &self,
        fragment: &DumpFragment<'_>,
        include_header: bool,
        logged_at: DateTime<Local>,
        toggles: &mut ToggleAllocator,
    ) -> String {
        let mut out = String::new();
        out.push_str(if include_header { SCRIPT_HEADER } else { DIVIDER });
        out.push_str("<pre>");

        let _ = write!(
            out,
            "{} <i>{}</i>",
            LOGGED_ON_MARKER,
            logged_at.format("%d.%m.%y - %-H:%M:%S")
        );
        if let Some(user) = fragment.user {
            let _ = write!(out, " <b>by:</b> <i>{}</i>", user);
        }

        let line = fragment
            .line
            .map(|line| line.to_string())
            .unwrap_or_default();
        let _ = write!(
            out,
            "\n<b>Debug called in file:</b> <i>{}</i> <b>on line:</b> <i>{}</i>",
            fragment.file, line
        );

        if let Some(criticality) = fragment.criticality {
            let _ = write!(out, "\n<b>Criticality:</b> {}", criticality);
        }

        let _ = write!(out, "\n<b>Message:</b> {}", fragment.message);

        if let Some((type_label, rendered)) = &fragment.content {
            let _ = write!(out, "\n<b>Content (Type: {}):</b> ", type_label);
            for line in rendered.split('\n') {
                out.push_str(&self.rewrite_line(line.trim_end_matches('\r'), toggles));
                out.push('\n');
            }
        }

        out.push_str("</pre>\n");
        self.colorize(out)
    }

    /// Turn a parenthesized group boundary into a collapsible region: an
    /// opening paren at end of line becomes a `+` anchor plus a hidden
    /// span, a closing paren gets the matching `</span>`.
    fn rewrite_line(&self, line: &str, toggles: &mut ToggleAllocator) -> String {
        let opened = self.line_open.replace(line, |caps: &Captures<'_>| {
            let id = toggles.next();
            format!(
                "{}<a id=a{} href=\"javascript: toggleDiv({})\">+</a><span id=d{} style=\"display:none\">(",
                &caps[1], id, id, id
            )
        });
        self.line_close.replace(&opened, "$1)</span>").into_owned()
    }

    /// Global substitutions, in order. The bare `=>` pass runs last so it
    /// cannot touch the already-rewritten `=> Array` occurrences.
    fn colorize(&self, text: String) -> String {
        let text = self
            .index
            .replace_all(&text, "[<span class=\"ind\">$1</span>]");
        let text = text.replace("=> Array", "=&gt; <span class=\"arr\">Array</span>");
        let text = text.replace(":protected", ":<span class=\"pro\">protected</span>");
        let text = text.replace(":private", ":<span class=\"pri\">private</span>");
        text.replace("=>", "<span class=\"ass\">=&gt;</span>")
    }
}
