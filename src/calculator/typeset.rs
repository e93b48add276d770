//! Typeset renderer: composes "integral = result" and draws it centered on
//! an axis-free, frame-free bitmap.
//!
//! The rendering surface does not understand every command an algebra
//! engine can emit, so the `\limits` placement directive is stripped before
//! composition. A failure here is a rendering-only warning and never
//! invalidates the symbolic result that was already computed.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Removes typesetting commands the rendering surface cannot handle.
pub fn strip_unsupported_markup(latex: &str) -> String {
    latex.replace("\\limits", "")
}

/// Combines the integral statement and the result into one expression.
pub fn compose(integral_latex: &str, result_latex: &str) -> String {
    format!(
        "{} = {}",
        strip_unsupported_markup(integral_latex),
        strip_unsupported_markup(result_latex)
    )
}

/// Draws the combined expression centered on a white canvas with no axes
/// and no frame, sized by the caller.
pub fn render_typeset_image(
    integral_latex: &str,
    result_latex: &str,
    path: &Path,
    size: (u32, u32),
) -> Result<(), String> {
    let content = compose(integral_latex, result_latex);
    let (width, height) = size;

    let root_area = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root_area
        .fill(&WHITE)
        .map_err(|e| format!("typeset surface error: {}", e))?;

    let style = TextStyle::from(("sans-serif", 24))
        .pos(Pos::new(HPos::Center, VPos::Center))
        .color(&BLACK);
    root_area
        .draw(&Text::new(
            content,
            ((width / 2) as i32, (height / 2) as i32),
            style,
        ))
        .map_err(|e| format!("typeset text error: {}", e))?;

    root_area
        .present()
        .map_err(|e| format!("typeset surface error: {}", e))?;
    Ok(())
}
