use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Semantic text categories. Renderers decide what each one looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Success,
    Error,
    Warning,
    Attention,
    Muted,
    Emphasis,
}

impl Style {
    pub fn color_spec(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            Style::Success => spec.set_fg(Some(Color::Green)).set_bold(true),
            Style::Error => spec.set_fg(Some(Color::Red)).set_bold(true),
            Style::Warning => spec.set_fg(Some(Color::Yellow)).set_bold(true),
            Style::Attention => spec.set_fg(Some(Color::Blue)).set_bold(true),
            Style::Muted => spec.set_fg(Some(Color::Ansi256(240))),
            Style::Emphasis => spec.set_bold(true),
        };
        spec
    }
}

/// Write `text` in `style`, resetting afterwards. Plain writers ignore the color.
pub fn paint<W: WriteColor + ?Sized>(out: &mut W, text: &str, style: Style) -> io::Result<()> {
    out.set_color(&style.color_spec())?;
    write!(out, "{}", text)?;
    out.reset()
}
