// ABOUTME: HTML fragment rendering for the calendar and day detail views
// ABOUTME: Escapes every upstream-supplied string before it reaches markup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use stride_intelligence::MonthOffset;

use super::{ActivityCard, CalendarCellView, DayDetailView, MonthView};

/// Render a month grid as a `<section>` fragment
#[must_use]
pub fn render_month(view: &MonthView) -> String {
    let mut html = String::with_capacity(8 * 1024);
    let _ = write!(
        html,
        r#"<section class="calendar" data-year="{}" data-month="{}">"#,
        view.month.year(),
        view.month.month()
    );
    let _ = write!(
        html,
        r#"<header><a class="nav prev" href="/calendar?year={}&amp;month={}">&lsaquo;</a><h2>{}</h2><a class="nav next" href="/calendar?year={}&amp;month={}">&rsaquo;</a></header>"#,
        view.previous.year(),
        view.previous.month(),
        encode_text(&view.title),
        view.next.year(),
        view.next.month(),
    );

    html.push_str(r#"<div class="weekdays">"#);
    for header in view.weekday_headers {
        let _ = write!(html, "<span>{}</span>", encode_text(header));
    }
    html.push_str(r#"</div><div class="grid">"#);
    for cell in &view.cells {
        render_cell(&mut html, cell);
    }
    html.push_str("</div></section>");
    html
}

fn render_cell(html: &mut String, cell: &CalendarCellView) {
    let mut classes = String::from("day");
    match cell.month_offset {
        MonthOffset::Previous => classes.push_str(" other-month prev"),
        MonthOffset::Next => classes.push_str(" other-month next"),
        MonthOffset::Current => {}
    }
    if cell.is_today {
        classes.push_str(" today");
    }
    if cell.is_active {
        classes.push_str(" active");
        let _ = write!(
            html,
            r#"<a class="{classes}" href="/calendar/day/{date}" data-date="{date}">"#,
            date = encode_double_quoted_attribute(&cell.date),
        );
    } else {
        let _ = write!(
            html,
            r#"<div class="{classes}" data-date="{}">"#,
            encode_double_quoted_attribute(&cell.date)
        );
    }

    let _ = write!(html, r#"<span class="day-number">{}</span>"#, cell.day_number);
    if let (Some(icon), Some(label)) = (cell.icon, cell.distance_label.as_deref()) {
        let _ = write!(
            html,
            r#"<span class="badge"><span class="icon">{}</span>{}</span>"#,
            icon.emoji(),
            encode_text(label)
        );
    }
    html.push_str(if cell.is_active { "</a>" } else { "</div>" });
}

/// Render one day's activities as a `<section>` fragment
#[must_use]
pub fn render_day(view: &DayDetailView) -> String {
    let mut html = String::with_capacity(2 * 1024);
    let _ = write!(
        html,
        r#"<section class="day-detail" data-date="{}"><h2>{} <small>{}</small></h2>"#,
        encode_double_quoted_attribute(&view.date),
        encode_text(&view.date),
        encode_text(&view.total_distance),
    );
    for card in &view.activities {
        render_card(&mut html, card);
    }
    html.push_str("</section>");
    html
}

/// Render a single activity card
pub fn render_card(html: &mut String, card: &ActivityCard) {
    let effort = &card.effort;
    let _ = write!(
        html,
        r#"<article class="activity-card"><header><span class="icon">{icon}</span><h3>{title}</h3><span class="effort-badge" style="background-color:{color}" title="{score}">{emoji} {label}</span></header>"#,
        icon = card.icon.emoji(),
        title = encode_text(&card.title),
        color = effort.color,
        score = effort.score,
        emoji = effort.emoji,
        label = encode_text(effort.label),
    );
    if let Some(start) = &card.start_time {
        let _ = write!(html, r#"<time>{}</time>"#, encode_text(start));
    }
    let _ = write!(
        html,
        r#"<p class="type">{}</p><dl class="stats"><dt>km</dt><dd>{}</dd><dt>time</dt><dd>{}</dd><dt>/km</dt><dd>{}</dd><dt>bpm</dt><dd>{}</dd><dt>kcal</dt><dd>{}</dd></dl></article>"#,
        encode_text(&card.activity_type),
        encode_text(&card.distance_km),
        encode_text(&card.duration),
        encode_text(&card.pace),
        encode_text(&card.heart_rate),
        encode_text(&card.calories),
    );
}
