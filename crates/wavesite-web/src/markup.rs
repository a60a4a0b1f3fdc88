#![forbid(unsafe_code)]

//! HTML rendering of [`Page`] content.
//!
//! Pure string building, so it is tested natively. All content text is
//! escaped; the only raw markup is the tags written here.

use std::fmt::Write;

use wavesite_runtime::toggle_label;
use wavesite_style::ThemeMode;

use crate::content::{Block, Inline, Page, Section};

/// Element id of the theme toggle button.
pub const TOGGLE_BUTTON_ID: &str = "wavesite-toggle";

/// Escape text for use in element content or a quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Page markup for a container: toggle button, header, sections, footer.
///
/// The button label reflects `mode`; the wasm entry keeps it in sync
/// afterwards.
#[must_use]
pub fn render_page(page: &Page, mode: ThemeMode) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<div class=\"container\">");
    let _ = write!(
        html,
        "<button type=\"button\" class=\"toggle-btn\" id=\"{TOGGLE_BUTTON_ID}\">{}</button>",
        escape_html(&toggle_label(mode))
    );
    let _ = write!(
        html,
        "<header><h1>{}</h1><p>{}</p></header>",
        escape_html(page.title),
        escape_html(page.tagline)
    );
    for section in page.sections {
        render_section(&mut html, section);
    }
    html.push_str("<footer>");
    for line in page.footer {
        let _ = write!(html, "<p>{}</p>", escape_html(line));
    }
    html.push_str("</footer></div>");
    html
}

fn render_section(html: &mut String, section: &Section) {
    let _ = write!(
        html,
        "<section id=\"{}\"><h2>{}</h2>",
        escape_html(section.id),
        escape_html(section.heading)
    );
    for block in section.blocks {
        render_block(html, block);
    }
    html.push_str("</section>");
}

fn render_block(html: &mut String, block: &Block) {
    match *block {
        Block::Heading(text) => {
            let _ = write!(html, "<h3>{}</h3>", escape_html(text));
        }
        Block::Paragraph(runs) => {
            html.push_str("<p>");
            render_inlines(html, runs);
            html.push_str("</p>");
        }
        Block::List(items) => {
            html.push_str("<ul>");
            for item in items {
                html.push_str("<li>");
                render_inlines(html, item);
                html.push_str("</li>");
            }
            html.push_str("</ul>");
        }
        Block::Code(code) => {
            let _ = write!(html, "<pre><code>{}</code></pre>", escape_html(code));
        }
        Block::Table { header, rows } => {
            html.push_str("<table><thead><tr>");
            for cell in header {
                let _ = write!(html, "<th>{}</th>", escape_html(cell));
            }
            html.push_str("</tr></thead><tbody>");
            for row in rows {
                html.push_str("<tr>");
                for cell in *row {
                    let _ = write!(html, "<td>{}</td>", escape_html(cell));
                }
                html.push_str("</tr>");
            }
            html.push_str("</tbody></table>");
        }
    }
}

fn render_inlines(html: &mut String, runs: &[Inline]) {
    for run in runs {
        match run {
            Inline::Text(text) => html.push_str(&escape_html(text)),
            Inline::Code(code) => {
                let _ = write!(html, "<code>{}</code>", escape_html(code));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::GOCHROMEDP;
    use pretty_assertions::assert_eq;

    static TINY: Page = Page {
        title: "T & T",
        tagline: "<tag>",
        sections: &[Section {
            id: "s",
            heading: "S",
            blocks: &[
                Block::Heading("H"),
                Block::Paragraph(&[Inline::Text("see "), Inline::Code("a<b")]),
                Block::List(&[&[Inline::Text("one")], &[Inline::Text("two")]]),
                Block::Code("x = \"1\""),
                Block::Table {
                    header: &["k", "v"],
                    rows: &[&["a", "1"]],
                },
            ],
        }],
        footer: &["bye"],
    };

    #[test]
    fn escapes_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain ✨"), "plain ✨");
    }

    #[test]
    fn renders_every_block_kind() {
        let html = render_page(&TINY, ThemeMode::Dark);
        assert_eq!(
            html,
            concat!(
                "<div class=\"container\">",
                "<button type=\"button\" class=\"toggle-btn\" id=\"wavesite-toggle\">Switch to Light Theme</button>",
                "<header><h1>T &amp; T</h1><p>&lt;tag&gt;</p></header>",
                "<section id=\"s\"><h2>S</h2>",
                "<h3>H</h3>",
                "<p>see <code>a&lt;b</code></p>",
                "<ul><li>one</li><li>two</li></ul>",
                "<pre><code>x = &quot;1&quot;</code></pre>",
                "<table><thead><tr><th>k</th><th>v</th></tr></thead>",
                "<tbody><tr><td>a</td><td>1</td></tr></tbody></table>",
                "</section>",
                "<footer><p>bye</p></footer></div>",
            )
        );
    }

    #[test]
    fn button_label_names_opposite_mode() {
        let html = render_page(&TINY, ThemeMode::Light);
        assert!(html.contains(">Switch to Dark Theme</button>"));
    }

    #[test]
    fn full_page_has_all_sections_and_escaped_code() {
        let html = render_page(&GOCHROMEDP, ThemeMode::Dark);
        for section in GOCHROMEDP.sections {
            assert!(html.contains(&format!("<section id=\"{}\">", section.id)));
        }
        assert!(html.contains("&lt;html&gt;&lt;body&gt;&lt;h1&gt;Hello World!"));
        assert!(!html.contains("<h1>Hello World!"));
        assert!(html.contains("<td>Chromium (modern)</td>"));
        assert!(html.contains("<code>chromedp</code>"));
    }
}
