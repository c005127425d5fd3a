//! Block-digit font for the countdown.
//!
//! Each glyph is five rows tall. Rendering joins glyphs with one blank
//! column, so every output row has the same width.

/// Rows per glyph.
pub const GLYPH_HEIGHT: usize = 5;

type Glyph = [&'static str; GLYPH_HEIGHT];

const ZERO: Glyph = ["███", "█ █", "█ █", "█ █", "███"];
const ONE: Glyph = ["  █", "  █", "  █", "  █", "  █"];
const TWO: Glyph = ["███", "  █", "███", "█  ", "███"];
const THREE: Glyph = ["███", "  █", "███", "  █", "███"];
const FOUR: Glyph = ["█ █", "█ █", "███", "  █", "  █"];
const FIVE: Glyph = ["███", "█  ", "███", "  █", "███"];
const SIX: Glyph = ["███", "█  ", "███", "█ █", "███"];
const SEVEN: Glyph = ["███", "  █", "  █", "  █", "  █"];
const EIGHT: Glyph = ["███", "█ █", "███", "█ █", "███"];
const NINE: Glyph = ["███", "█ █", "███", "  █", "███"];
const HOURS: Glyph = ["█  ", "█  ", "███", "█ █", "█ █"];
const MINUTES: Glyph = ["     ", "     ", "█████", "█ █ █", "█ █ █"];
const SECONDS: Glyph = ["   ", " ██", "█  ", " ██", "██ "];
const MINUS: Glyph = ["   ", "   ", "███", "   ", "   "];
const COLON: Glyph = [" ", "█", " ", "█", " "];
const BLANK: Glyph = ["   ", "   ", "   ", "   ", "   "];

fn glyph(c: char) -> &'static Glyph {
    match c {
        '0' => &ZERO,
        '1' => &ONE,
        '2' => &TWO,
        '3' => &THREE,
        '4' => &FOUR,
        '5' => &FIVE,
        '6' => &SIX,
        '7' => &SEVEN,
        '8' => &EIGHT,
        '9' => &NINE,
        'h' => &HOURS,
        'm' => &MINUTES,
        's' => &SECONDS,
        '-' => &MINUS,
        ':' => &COLON,
        _ => &BLANK,
    }
}

/// Renders `text` as `GLYPH_HEIGHT` lines of block characters.
pub fn render(text: &str) -> Vec<String> {
    let mut rows = vec![String::new(); GLYPH_HEIGHT];
    for (i, c) in text.chars().enumerate() {
        let g = glyph(c);
        for (row, part) in rows.iter_mut().zip(g.iter()) {
            if i > 0 {
                row.push(' ');
            }
            row.push_str(part);
        }
    }
    rows
}

/// Display width of the rendered text in terminal columns.
pub fn rendered_width(text: &str) -> usize {
    render(text)
        .first()
        .map(|row| row.chars().count())
        .unwrap_or(0)
}
