use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::trip::{ReceivedDay, ReceivedPlan};

pub const NO_BUDGET: &str = "No budget information available.";
pub const NO_TRANSPORTATION: &str = "No transportation information available.";
pub const NO_ACTIVITIES: &str = "No activities planned.";
pub const NO_FOOD: &str = "No food recommendations.";
pub const NO_ITINERARY: &str = "No itinerary was generated.";

const DEFAULT_DESTINATION: &str = "your destination";
const UNKNOWN_DAY: &str = "N/A";
const GUTTER: &str = "    ";
const DAY_INDENT: &str = "    ";
const TEXT_INDENT: &str = "      ";

pub const EXPANDED_MARKER: &str = "▾";
pub const COLLAPSED_MARKER: &str = "▸";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Collapsed days show only their title line.
    pub expand_days: bool,
    /// Width of each of the two side-by-side panels, in terminal columns.
    pub panel_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            expand_days: true,
            panel_width: 38,
        }
    }
}

/// Splits a word into pieces no wider than `width` columns.
fn split_to_width(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0;

    for ch in word.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if !piece.is_empty() && piece_width + ch_width > width {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push(ch);
        piece_width += ch_width;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Greedy word wrap measured in terminal columns. Words wider than
/// `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            for piece in split_to_width(word, width) {
                let piece_width = piece.width();

                if current_width > 0 && current_width + 1 + piece_width > width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                if current_width > 0 {
                    current.push(' ');
                    current_width += 1;
                }
                current.push_str(&piece);
                current_width += piece_width;
            }
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn pad(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

fn panel(title: &str, body: &str, width: usize) -> Vec<String> {
    let mut lines = vec![title.to_string(), "-".repeat(title.width())];
    lines.extend(wrap(body, width));
    lines
}

fn side_by_side(left: &[String], right: &[String], width: usize) -> Vec<String> {
    let rows = left.len().max(right.len());
    (0..rows)
        .map(|i| {
            let l = left.get(i).map(String::as_str).unwrap_or("");
            let r = right.get(i).map(String::as_str).unwrap_or("");
            format!("{}{}{}", pad(l, width), GUTTER, r)
                .trim_end()
                .to_string()
        })
        .collect()
}

fn day_section(day: &ReceivedDay, options: &RenderOptions, width: usize) -> Vec<String> {
    let title = day.day.as_deref().unwrap_or(UNKNOWN_DAY);

    if !options.expand_days {
        return vec![format!("{} Day {}", COLLAPSED_MARKER, title)];
    }

    let text_width = width.saturating_sub(TEXT_INDENT.len());
    let mut lines = vec![format!("{} Day {}", EXPANDED_MARKER, title)];

    lines.push(format!("{}Activities", DAY_INDENT));
    lines.extend(
        wrap(day.activities.as_deref().unwrap_or(NO_ACTIVITIES), text_width)
            .into_iter()
            .map(|line| format!("{}{}", TEXT_INDENT, line)),
    );

    lines.push(format!("{}Food Recommendations", DAY_INDENT));
    lines.extend(
        wrap(
            day.food_recommendations.as_deref().unwrap_or(NO_FOOD),
            text_width,
        )
        .into_iter()
        .map(|line| format!("{}{}", TEXT_INDENT, line)),
    );

    lines.push(String::new());
    lines
}

/// Renders a plan as terminal text: destination header, budget and
/// transportation panels side by side, then one section per day.
pub fn render_plan(plan: &ReceivedPlan, options: &RenderOptions) -> String {
    let width = options.panel_width;
    let full_width = width * 2 + GUTTER.len();

    let mut lines = vec![
        format!(
            "Your Trip to {}",
            plan.destination.as_deref().unwrap_or(DEFAULT_DESTINATION)
        ),
        "=".repeat(full_width),
        String::new(),
    ];

    let budget = panel(
        "Budget Breakdown",
        plan.budget_breakdown.as_deref().unwrap_or(NO_BUDGET),
        width,
    );
    let transport = panel(
        "Transportation",
        plan.transportation_suggestions
            .as_deref()
            .unwrap_or(NO_TRANSPORTATION),
        width,
    );
    lines.extend(side_by_side(&budget, &transport, width));

    lines.push(String::new());
    lines.push("-".repeat(full_width));
    lines.push(String::new());
    lines.push("Daily Itinerary".to_string());
    lines.push(String::new());

    match plan.itinerary.as_deref() {
        None | Some([]) => lines.push(format!("! {}", NO_ITINERARY)),
        Some(days) => {
            for day in days {
                lines.extend(day_section(day, options, full_width));
            }
        }
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
