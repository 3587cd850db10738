//! Static page content: header, About blurb and sample requirements.

use crate::config::constants::ui;

/// Title and caption shown above the form
pub fn header_markdown() -> String {
    format!("# {}\n*{}*\n", ui::TITLE, ui::CAPTION)
}

/// About blurb followed by the sample requirements
pub fn sidebar_markdown() -> String {
    let mut out = format!("## {}\n{}\n\n", ui::ABOUT_HEADER, ui::ABOUT_TEXT);
    out.push_str(&format!("## {}\n", ui::SAMPLES_HEADER));
    for (label, sample) in samples() {
        out.push_str(&format!("**{label}:**\n`{sample}`\n\n"));
    }
    out
}

/// Sample requirements with their labels
pub fn samples() -> [(&'static str, &'static str); 2] {
    [
        ("Simple", ui::SAMPLE_SIMPLE),
        ("Complex (HIPAA)", ui::SAMPLE_COMPLEX),
    ]
}
