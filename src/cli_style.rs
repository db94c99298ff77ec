use clap::builder::styling::{AnsiColor, Color as AnsiStyleColor, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color, Stylize};
use unicode_width::UnicodeWidthStr;

const SECTION_WIDTH: usize = 60;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

fn ansi(color: AnsiColor) -> Style {
    Style::new()
        .bold()
        .fg_color(Some(AnsiStyleColor::Ansi(color)))
}

pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(ansi(AnsiColor::Yellow).underline())
        .header(ansi(AnsiColor::Yellow).underline())
        .literal(ansi(AnsiColor::Green))
        .valid(ansi(AnsiColor::Green))
        .invalid(ansi(AnsiColor::Red))
        .error(ansi(AnsiColor::Red))
        .placeholder(Style::new().fg_color(Some(AnsiStyleColor::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    /// Plex orange, used for frames and labels.
    pub const ACCENT: Color = Color::Rgb { r: 229, g: 160, b: 13 };
    pub const OK: Color = Color::Rgb { r: 0, g: 255, b: 136 };
    pub const FAIL: Color = Color::Rgb { r: 255, g: 85, b: 85 };
    pub const WARN: Color = Color::Rgb { r: 255, g: 165, b: 0 };
    pub const INFO: Color = Color::Rgb { r: 100, g: 149, b: 237 };
    pub const MUTED: Color = Color::Rgb { r: 128, g: 128, b: 128 };
    pub const TEXT: Color = Color::Rgb { r: 255, g: 255, b: 255 };
}

mod glyphs {
    pub const H: &str = "─";
    pub const V: &str = "│";
    pub const TOP: [&str; 3] = ["╭", "┬", "╮"];
    pub const MID: [&str; 3] = ["├", "┼", "┤"];
    pub const BOTTOM: [&str; 3] = ["╰", "┴", "╯"];
    pub const BULLET: &str = "●";
    pub const DIAMOND: &str = "◆";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_banner() {
    println!();
    println!("{}", "  PLEX ▶ STASH  ".with(colors::ACCENT).bold());
    println!(
        "{}",
        "  play counts & ratings migration"
            .with(colors::MUTED)
            .attribute(Attribute::Italic)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Lines
// ═══════════════════════════════════════════════════════════════════════════════

fn status_line(symbol: &str, color: Color, message: &str) -> String {
    format!(
        " {} {}",
        symbol.with(color).bold(),
        message.with(color)
    )
}

pub fn print_success(message: &str) {
    println!("{}", status_line("✓", colors::OK, message));
}

/// Goes to stderr, unlike the other status lines.
pub fn print_error(message: &str) {
    eprintln!("{}", status_line("✗", colors::FAIL, message));
}

pub fn print_warning(message: &str) {
    println!("{}", status_line("⚠", colors::WARN, message));
}

pub fn print_info(message: &str) {
    println!("{}", status_line("ℹ", colors::INFO, message));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════════════════════════════════════════

fn rule(len: usize) -> String {
    glyphs::H.repeat(len)
}

pub fn print_section_header(title: &str) {
    let fill = SECTION_WIDTH.saturating_sub(title.width() + 2);
    let left = fill / 2;
    println!();
    println!(
        "{}{} {} {}{}",
        glyphs::TOP[0].with(colors::ACCENT),
        rule(left).with(colors::ACCENT),
        title.with(colors::ACCENT).bold(),
        rule(fill - left).with(colors::ACCENT),
        glyphs::TOP[2].with(colors::ACCENT)
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        glyphs::BOTTOM[0].with(colors::ACCENT),
        rule(SECTION_WIDTH).with(colors::ACCENT),
        glyphs::BOTTOM[2].with(colors::ACCENT)
    );
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        glyphs::BULLET.with(colors::ACCENT),
        format!("{}:", key).with(colors::MUTED),
        value.with(colors::TEXT)
    );
}

/// Like [`print_key_value`], for a counter shown in `color`.
pub fn print_count(key: &str, count: usize, color: Color) {
    println!(
        "  {} {} {}",
        glyphs::DIAMOND.with(colors::ACCENT),
        format!("{}:", key).with(colors::MUTED),
        count.to_string().with(color).bold()
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tables
// ═══════════════════════════════════════════════════════════════════════════════

/// Print a boxed table with `N` columns, each as wide as its widest cell.
pub fn print_table<const N: usize>(headers: [&str; N], rows: &[[&str; N]]) {
    let mut widths = headers.map(|h| h.width());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let border = |[left, joint, right]: [&str; 3]| {
        let segments: Vec<String> = widths.iter().map(|w| rule(w + 2)).collect();
        println!(
            "{}",
            format!("{}{}{}", left, segments.join(joint), right).with(colors::ACCENT)
        );
    };
    let line = |cells: &[&str; N], color: Color| {
        let mut out = glyphs::V.with(colors::ACCENT).to_string();
        for (cell, width) in cells.iter().zip(widths) {
            let pad = " ".repeat(width - cell.width());
            out.push_str(&format!(" {}{} ", cell.with(color), pad));
            out.push_str(&glyphs::V.with(colors::ACCENT).to_string());
        }
        println!("{}", out);
    };

    border(glyphs::TOP);
    line(&headers, colors::ACCENT);
    border(glyphs::MID);
    for row in rows {
        line(row, colors::TEXT);
    }
    border(glyphs::BOTTOM);
}
