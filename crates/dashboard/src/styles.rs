//! Inline styles - no external CSS files

pub const TEXT_COLOR: &str = "#333333";
pub const GRID_COLOR: &str = "#e6e6e6";
pub const AXIS_COLOR: &str = "#666666";

pub fn app_style() -> &'static str {
    "min-height: 100vh; \
     font-family: 'Lucida Grande', 'Lucida Sans Unicode', Arial, Helvetica, sans-serif; \
     font-size: 12px; \
     background: #ffffff; \
     color: #333333; \
     margin: 0; \
     padding: 0;"
}

pub fn header_style() -> &'static str {
    "padding: 0.75rem 1rem; \
     background: #f6f8fa; \
     border-bottom: 1px solid #d0d7de;"
}

pub fn title_style() -> &'static str {
    "font-size: 1.1rem; \
     font-weight: 600; \
     margin: 0;"
}

/// Fixed summary layout: one row per profile
pub fn summary_layout_style() -> &'static str {
    "display: flex; \
     flex-direction: column; \
     align-items: center; \
     gap: 1rem; \
     padding: 1rem;"
}

/// Grid container; charts wrap to the viewport width
pub fn grid_layout_style(gutter: u32) -> String {
    format!(
        "display: flex; \
         flex-wrap: wrap; \
         gap: {gutter}px 0; \
         padding: 0.5rem;"
    )
}

pub fn chart_card_style(gutter: u32) -> String {
    format!(
        "position: relative; \
         margin: 0 {half}px; \
         user-select: none;",
        half = gutter / 2
    )
}

pub fn chart_legend_style() -> &'static str {
    "display: flex; \
     flex-wrap: wrap; \
     justify-content: center; \
     gap: 0.75rem; \
     padding: 0.25rem 0; \
     font-size: 11px;"
}

pub fn legend_swatch_style(color: &str) -> String {
    format!(
        "display: inline-block; \
         width: 10px; \
         height: 2px; \
         margin-right: 0.3rem; \
         vertical-align: middle; \
         background: {color};"
    )
}

pub fn hover_tooltip_style(left: f64, top: f64) -> String {
    format!(
        "position: absolute; \
         left: {left}px; \
         top: {top}px; \
         background: rgba(255, 255, 255, 0.95); \
         border: 1px solid #d0d7de; \
         border-radius: 4px; \
         padding: 0.3rem 0.5rem; \
         font-size: 11px; \
         white-space: nowrap; \
         z-index: 100; \
         box-shadow: 0 2px 6px rgba(0,0,0,0.2); \
         pointer-events: none;"
    )
}

pub fn muted_style() -> &'static str {
    "color: #6e7681;"
}
