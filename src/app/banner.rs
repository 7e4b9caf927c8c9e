//! Start-up banner

use terminal_size::{terminal_size, Width};

const FALLBACK_WIDTH: usize = 80;
const MAX_WIDTH: usize = 100;

/// Current terminal width, or 80 columns when there is no terminal
pub fn terminal_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) if w > 0 => usize::from(w),
        _ => FALLBACK_WIDTH,
    }
}

/// Banner text framed to `width` columns
pub fn render(width: usize) -> String {
    let lines = [
        format!("TRIMMER v{}", env!("CARGO_PKG_VERSION")),
        "Cut a video between two timestamps, no re-encoding".to_string(),
    ];

    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = width.min(MAX_WIDTH).max(longest);
    let rule = "=".repeat(width);

    let mut banner = String::new();
    banner.push_str(&rule);
    banner.push('\n');
    for line in &lines {
        banner.push_str(format!("{:^width$}", line, width = width).trim_end());
        banner.push('\n');
    }
    banner.push_str(&rule);
    banner.push('\n');
    banner
}
