//! Result narrative composition
//!
//! Each tier has a fixed two-paragraph template; paragraphs are joined with
//! `<br/>`. When a summary exists an "About" block is appended. Substituted
//! text is HTML-escaped.

use crate::tier::Tier;

const LINE_BREAK: &str = "<br/>";

/// Render the narrative for `tier` featuring `name`
pub fn compose(tier: Tier, name: &str, summary: Option<&str>) -> String {
    let name = escape_html(name);
    let mut lines = match tier {
        Tier::Elite => vec![
            format!(
                "<strong>Commanding presence.</strong> You operate at the apex of taste, \
                 convenience and exclusivity, much like {name}. Private lounges, fine dining \
                 tasting menus, and investment-minded decisions define your playbook."
            ),
            "Expect symphonies of craftsmanship in fashion and a calendar of invite-only \
             launches. Recommendations: explore Nigerian luxury houses (e.g., Orange Culture, \
             Lisa Folawiyo), reserve chef's tables, and consider art patron circles."
                .to_string(),
        ],
        Tier::Aspiring => vec![
            format!(
                "<strong>Curated and upwardly mobile.</strong> Your tastes are dialed-in and \
                 evolving, reflecting {name}'s blend of mainstream reach with premium \
                 sensibilities."
            ),
            "Lean into quality staples, experiential travel and networked communities. \
             Recommendations: boutique fitness, mid-to-high tier accessories, and Lagos art \
             nights."
                .to_string(),
        ],
        Tier::Casual => vec![
            format!(
                "<strong>Balanced pragmatism.</strong> Like {name}, you appreciate comfort with \
                 occasional splurges."
            ),
            "Recommendations: dependable tech, high-value local designers, and planned \
             experiences over impulse buys."
                .to_string(),
        ],
        Tier::Minimalist => vec![
            format!(
                "<strong>Intentional minimalism.</strong> Your priorities are clarity and \
                 function, echoing {name}'s low-key approach."
            ),
            "Recommendations: capsule wardrobe, durable essentials, and community-driven \
             leisure."
                .to_string(),
        ],
    };

    if let Some(summary) = summary.filter(|s| !s.is_empty()) {
        lines.push(format!(
            "<span class='text-white/70 text-sm block mt-3'>About {}: {}</span>",
            name,
            escape_html(summary)
        ));
    }

    lines.join(LINE_BREAK)
}

/// Escape `&`, `<` and `>` (ampersand first)
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
