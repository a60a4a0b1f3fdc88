#![forbid(unsafe_code)]

//! Static page content.
//!
//! The page is plain data: no computed text, rendered verbatim by
//! [`crate::markup`].

/// Inline run inside a paragraph or list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inline {
    Text(&'static str),
    Code(&'static str),
}

/// Block-level content of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Heading(&'static str),
    Paragraph(&'static [Inline]),
    List(&'static [&'static [Inline]]),
    Code(&'static str),
    Table {
        header: &'static [&'static str],
        rows: &'static [&'static [&'static str]],
    },
}

/// A titled section with an anchor id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub heading: &'static str,
    pub blocks: &'static [Block],
}

/// The whole page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub title: &'static str,
    pub tagline: &'static str,
    pub sections: &'static [Section],
    pub footer: &'static [&'static str],
}

impl Page {
    /// Section with anchor `id`.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&'static Section> {
        self.sections.iter().find(|section| section.id == id)
    }
}

use Block::{Code, Heading, List, Paragraph, Table};
use Inline::{Code as C, Text as T};

/// The gochromedp documentation page.
pub static GOCHROMEDP: Page = Page {
    title: "🌐 gochromedp",
    tagline: "A modern command-line tool similar to wkhtmltopdf but powered by \
              Chromium headless for superior rendering and web standards support.",
    sections: &[
        FEATURES,
        INSTALLATION,
        USAGE,
        OPTIONS,
        LIBRARY,
        EXAMPLES,
        ARCHITECTURE,
        COMPARISON,
        TROUBLESHOOTING,
    ],
    footer: &[
        "MIT License - see LICENSE file for details.",
        "Built with ❤️ using Go and Chromium",
    ],
};

const FEATURES: Section = Section {
    id: "features",
    heading: "✨ Features",
    blocks: &[List(&[
        &[T("HTML to PDF conversion with full Chromium rendering")],
        &[T("HTML to Image conversion (PNG/JPEG) with screenshot capabilities")],
        &[T("URL and file input support")],
        &[T("Custom page sizes and margins (A4, A3, Letter, Legal, etc.)")],
        &[T("Page orientation (portrait/landscape)")],
        &[T("High-quality output with modern web standards")],
        &[T("CLI tool similar to wkhtmltopdf interface")],
        &[T("Go library for programmatic use")],
        &[T("Cross-platform (Windows, macOS, Linux)")],
    ])],
};

const INSTALLATION: Section = Section {
    id: "installation",
    heading: "🔧 Installation",
    blocks: &[
        Heading("Prerequisites"),
        List(&[&[T("Go 1.23+")], &[T("Chromium/Chrome browser installed")]]),
        Heading("Install from source"),
        Code(
            "git clone https://github.com/chinmay-sawant/gochromedp.git\n\
             cd gochromedp\n\
             go mod download\n\
             go build -o gochromedp ./cmd/gochromedp",
        ),
        Heading("Install pre-built binary"),
        Code(
            "# download from releases page\n\
             # or build and install globally\n\
             go install github.com/chinmay-sawant/gochromedp/cmd/gochromedp@latest",
        ),
    ],
};

const USAGE: Section = Section {
    id: "usage",
    heading: "📖 Usage",
    blocks: &[
        Heading("Command Line Interface"),
        Code("gochromedp [command]"),
        Paragraph(&[T("Available commands: pdf, image, version")]),
        Heading("Convert URL to PDF"),
        Code(
            "# Basic conversion\n\
             gochromedp pdf https://example.com output.pdf\n\
             \n\
             # With custom page size and margins\n\
             gochromedp pdf --page-size A4 --margin-top 20mm --margin-bottom 20mm https://example.com document.pdf\n\
             \n\
             # Landscape orientation\n\
             gochromedp pdf --orientation landscape --page-size A3 https://example.com landscape.pdf",
        ),
        Heading("Convert HTML file to PDF"),
        Code("gochromedp pdf input.html output.pdf"),
        Heading("Convert URL to Image"),
        Code(
            "# PNG screenshot (default)\n\
             gochromedp image --width 1920 --height 1080 https://example.com screenshot.png\n\
             \n\
             # JPEG with quality setting\n\
             gochromedp image --format jpeg --quality 85 --width 1024 --height 768 https://example.com photo.jpg",
        ),
        Heading("Convert HTML file to Image"),
        Code("gochromedp image input.html screenshot.png"),
    ],
};

const OPTIONS: Section = Section {
    id: "options",
    heading: "⚙️ Command Line Options",
    blocks: &[
        Heading("Global Options"),
        List(&[
            &[C("--page-size string"), T(" Page size (A4, A3, Letter, Legal) (default \"A4\")")],
            &[C("--orientation string"), T(" Page orientation (portrait/landscape) (default \"portrait\")")],
            &[C("--margin-top string"), T(" Top margin (default \"10mm\")")],
            &[C("--margin-right string"), T(" Right margin (default \"10mm\")")],
            &[C("--margin-bottom string"), T(" Bottom margin (default \"10mm\")")],
            &[C("--margin-left string"), T(" Left margin (default \"10mm\")")],
        ]),
        Heading("PDF Options"),
        List(&[
            &[C("--no-background"), T(" Do not print background")],
            &[C("--grayscale"), T(" Generate grayscale PDF")],
        ]),
        Heading("Image Options"),
        List(&[
            &[C("--format string"), T(" Image format (png/jpeg) (default \"png\")")],
            &[C("--quality int"), T(" Image quality (1-100, for JPEG) (default 90)")],
            &[C("--width int"), T(" Viewport width (default 1024)")],
            &[C("--height int"), T(" Viewport height (default 768)")],
        ]),
    ],
};

const LIBRARY: Section = Section {
    id: "library",
    heading: "📚 Go Library Usage",
    blocks: &[Code(
        r#"import (
    "os"
    "github.com/chinmay-sawant/gochromedp"
)

func main() {
    // Convert HTML to PDF
    html := "<html><body><h1>Hello World!</h1></body></html>"
    options := &gochromedp.ConvertOptions{
        PageSize:    "A4",
        Orientation: "portrait",
        MarginTop:   "10mm",
    }

    pdfData, err := gochromedp.ConvertHTMLToPDF(html, options)
    if err != nil {
        panic(err)
    }

    os.WriteFile("output.pdf", pdfData, 0644)

    // Convert URL to PDF
    pdfData, err = gochromedp.ConvertURLToPDF("https://example.com", options)
    if err != nil {
        panic(err)
    }

    os.WriteFile("webpage.pdf", pdfData, 0644)

    // Convert HTML to image
    imageData, err := gochromedp.ConvertHTMLToImage(html, &gochromedp.ConvertOptions{
        Format: "png",
        Width:  1024,
        Height: 768,
    })
    if err != nil {
        panic(err)
    }

    os.WriteFile("html-screenshot.png", imageData, 0644)

    // Convert URL to image
    imageData, err = gochromedp.ConvertURLToImage("https://example.com", &gochromedp.ConvertOptions{
        Format: "png",
        Width:  1024,
        Height: 768,
    })
    if err != nil {
        panic(err)
    }

    os.WriteFile("screenshot.png", imageData, 0644)
}"#,
    )],
};

const EXAMPLES: Section = Section {
    id: "examples",
    heading: "🔍 Examples",
    blocks: &[
        Heading("Basic HTML to PDF"),
        Code("gochromedp pdf example.html output.pdf"),
        Heading("Webpage to high-res screenshot"),
        Code("gochromedp image --width 1920 --height 1080 --quality 95 https://github.com screenshot.png"),
        Heading("Custom margins and page size"),
        Code(
            "gochromedp pdf --page-size Letter --margin-top 25mm --margin-bottom 25mm \
             --margin-left 20mm --margin-right 20mm document.html print.pdf",
        ),
        Heading("Batch conversion script"),
        Code(
            r#"#!/bin/bash
urls=("https://example.com" "https://github.com" "https://golang.org")
for url in "${urls[@]}"; do
    filename=$(echo $url | sed 's|https://||; s|/|_|g')
    gochromedp pdf "$url" "${filename}.pdf"
done"#,
        ),
    ],
};

const ARCHITECTURE: Section = Section {
    id: "architecture",
    heading: "🏗️ Architecture",
    blocks: &[
        Paragraph(&[
            T("gochromedp uses the Chrome DevTools Protocol (CDP) through the "),
            C("chromedp"),
            T(" Go library to control a headless Chromium instance. This provides:"),
        ]),
        List(&[
            &[T("Modern rendering engine with full CSS and JavaScript support")],
            &[T("Better font rendering and layout accuracy")],
            &[T("Web standards compliance (ES6+, CSS3, etc.)")],
            &[T("Security through sandboxed browser execution")],
            &[T("Performance optimizations for headless operation")],
        ]),
    ],
};

const COMPARISON: Section = Section {
    id: "comparison",
    heading: "🤔 Why gochromedp vs wkhtmltopdf?",
    blocks: &[Table {
        header: &["Feature", "wkhtmltopdf", "gochromedp"],
        rows: &[
            &["Rendering Engine", "Qt WebKit (old)", "Chromium (modern)"],
            &["CSS Support", "Limited", "Full CSS3"],
            &["JavaScript", "Basic ES5", "Full ES6+"],
            &["Fonts", "System fonts only", "Web fonts + system"],
            &["Performance", "Fast", "Slightly slower"],
            &["Maintenance", "Unmaintained", "Active development"],
            &["Dependencies", "Qt libraries", "Chrome/Chromium"],
        ],
    }],
};

const TROUBLESHOOTING: Section = Section {
    id: "troubleshooting",
    heading: "🐛 Troubleshooting",
    blocks: &[
        Heading("\"Chrome/Chromium not found\""),
        Paragraph(&[T("Ensure Chrome or Chromium is installed and accessible:")]),
        Code(
            "# Linux\n\
             sudo apt-get install chromium-browser\n\
             # macOS\n\
             brew install chromium\n\
             # Windows - Download from https://www.chromium.org/",
        ),
        Heading("\"Connection refused\" errors"),
        Paragraph(&[T(
            "Try with different Chrome flags or ensure no other Chrome instances are running.",
        )]),
        Heading("Memory issues"),
        Paragraph(&[T("For large documents, increase memory limits:")]),
        Code("gochromedp pdf --memory-pressure-off large-document.html output.pdf"),
    ],
};
