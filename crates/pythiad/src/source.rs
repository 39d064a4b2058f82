//! HTML rendering of source files and pages.
//!
//! The file view escapes the content, drops an `L<n>` anchor at the start of
//! every line and wraps the selected byte range in a `selection` span. The
//! source page pairs that view with a form that posts position queries.

use std::fmt::Write as _;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use pythia_oracle::{DEFINITION, DESCRIBE, QueryMode, REFERRERS};

/// Characters left unescaped in query-string values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

/// Renders a file fragment for display.
pub trait SourceRenderer: Send + Sync {
    /// Renders `content`, marking the byte range `selection` when present.
    fn render(&self, content: &[u8], selection: Option<(usize, usize)>) -> String;
}

/// Renders the HTML pages around the file view.
pub trait PageRenderer: Send + Sync {
    /// Index page listing the scope arguments and in-scope files.
    fn index(&self, scope_args: &[String], files: &[String]) -> String;

    /// Page showing a single in-scope file.
    fn source(&self, file: &str) -> String;
}

/// Modes offered by the source page's query form.
const FORM_MODES: [&str; 4] = [DESCRIBE, DEFINITION, REFERRERS, QueryMode::SCOPE_SUMMARY];

/// Escapes a file, anchors each line and highlights the selection.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlSourceRenderer;

impl SourceRenderer for HtmlSourceRenderer {
    fn render(&self, content: &[u8], selection: Option<(usize, usize)>) -> String {
        let mut out = LineWriter::new(content.len());
        match selection.and_then(|(start, end)| split3(content, start, end)) {
            Some((before, selected, after)) => {
                out.push(before);
                out.markup("<span class=\"selection\">");
                out.push(selected);
                out.markup("</span>");
                out.push(after);
            }
            None => out.push(content),
        }
        out.finish()
    }
}

/// Escaped `<pre>` output that opens each line with an `L<n>` anchor.
struct LineWriter {
    out: String,
    line: usize,
    at_line_start: bool,
}

impl LineWriter {
    fn new(capacity: usize) -> Self {
        let mut out = String::with_capacity(capacity + 64);
        out.push_str("<pre class=\"source\">");
        Self {
            out,
            line: 0,
            at_line_start: true,
        }
    }

    fn push(&mut self, bytes: &[u8]) {
        // '\n' never occurs inside a multi-byte sequence.
        for chunk in bytes.split_inclusive(|&byte| byte == b'\n') {
            if self.at_line_start {
                self.line += 1;
                let _ = write!(self.out, "<a id=\"L{}\"></a>", self.line);
            }
            push_escaped(&mut self.out, chunk);
            self.at_line_start = chunk.ends_with(b"\n");
        }
    }

    fn markup(&mut self, tag: &str) {
        self.out.push_str(tag);
    }

    fn finish(mut self) -> String {
        self.out.push_str("</pre>\n");
        self.out
    }
}

fn split3(content: &[u8], start: usize, end: usize) -> Option<(&[u8], &[u8], &[u8])> {
    let (before, rest) = content.split_at_checked(start)?;
    let (selected, after) = rest.split_at_checked(end.checked_sub(start)?)?;
    Some((before, selected, after))
}

fn push_escaped(out: &mut String, bytes: &[u8]) {
    push_escaped_str(out, &String::from_utf8_lossy(bytes));
}

fn push_escaped_str(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped_str(&mut out, text);
    out
}

fn query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Plain HTML index and source pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicPages;

impl PageRenderer for BasicPages {
    fn index(&self, scope_args: &[String], files: &[String]) -> String {
        let mut page = String::from("<!DOCTYPE html>\n<html><head><title>Pythia</title></head><body>\n");
        page.push_str("<h1>Pythia</h1>\n<p>Scope:");
        for arg in scope_args {
            let _ = write!(page, " <code>{}</code>", escape(arg));
        }
        page.push_str("</p>\n<ul>\n");
        for file in files {
            let _ = writeln!(
                page,
                "<li><a href=\"/source?file={}\">{}</a></li>",
                query_value(file),
                escape(file)
            );
        }
        page.push_str("</ul>\n</body></html>\n");
        page
    }

    fn source(&self, file: &str) -> String {
        let title = escape(file);
        let path = query_value(file);
        let mut modes = String::new();
        for mode in FORM_MODES {
            let _ = write!(modes, "<option>{mode}</option>");
        }
        format!(
            "<!DOCTYPE html>\n<html><head><title>{title}</title></head><body>\n\
             <h1>{title}</h1>\n\
             <p><a href=\"/\">index</a> \
             <a href=\"/query?mode=what&amp;format=plain\">scope summary</a></p>\n\
             <form action=\"/query\" method=\"post\" target=\"result\">\n\
             <select name=\"mode\">{modes}</select>\n\
             <input name=\"pos\" size=\"60\" value=\"{title}:#0\">\n\
             <select name=\"format\"><option>plain</option><option>json</option></select>\n\
             <input type=\"submit\" value=\"query\">\n\
             </form>\n\
             <iframe id=\"file\" src=\"/file?path={path}\"></iframe>\n\
             <iframe id=\"result\" name=\"result\"></iframe>\n\
             </body></html>\n"
        )
    }
}
