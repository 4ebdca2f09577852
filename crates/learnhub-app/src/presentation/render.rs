//! Plain-text rendering of DTOs and UI events

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::application::dtos::{ConversationDto, HeatmapDto, NotificationDto, StreakDto};
use crate::application::services::UiEvent;
use learnhub_domain::preferences::Theme;
use learnhub_domain::streak::{ActivityLevel, StreakEvaluation, StreakTransition, ACHIEVEMENT_THRESHOLD};

/// Relative age such as `5m ago`; unparsable timestamps are shown as-is
pub fn time_ago(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(at) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let elapsed = now.signed_duration_since(at.with_timezone(&Utc));

    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

/// One-line summary of a login evaluation
pub fn check_in(evaluation: &StreakEvaluation) -> String {
    let days = evaluation.record.current_streak();
    let mut line = match evaluation.transition {
        StreakTransition::Started => "👋 Welcome! Your learning streak starts today.".to_string(),
        StreakTransition::Continued => format!("🔥 Streak continued: {} days in a row", days),
        StreakTransition::Reset => "🌱 Streak reset, starting again at day 1".to_string(),
        StreakTransition::Unchanged => format!("✓ Already checked in today ({} day streak)", days),
    };
    if !evaluation.persisted {
        line.push_str(" (not saved)");
    }
    line
}

pub fn streak(status: &StreakDto) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🔥 Current streak: {} day(s)", status.current_streak);
    let _ = writeln!(
        out,
        "   Last login: {}",
        status.last_login_date.as_deref().unwrap_or("never")
    );
    if status.achievement_unlocked {
        let _ = writeln!(out, "   🏆 \"Dedicated Learner\" unlocked");
    } else {
        let _ = writeln!(
            out,
            "   {} more day(s) to reach a {}-day streak",
            status.days_to_achievement, ACHIEVEMENT_THRESHOLD
        );
    }
    if !status.logged_in_today {
        let _ = writeln!(out, "   Not checked in today ({})", status.today);
    }
    out
}

fn heat_cell(level: u8) -> char {
    match level {
        0 => '·',
        1 => '░',
        2 => '▒',
        3 => '▓',
        _ => '█',
    }
}

pub fn heatmap(map: &HeatmapDto) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Activity {} .. {} ({} active day(s))",
        map.start_date, map.end_date, map.active_days
    );
    for week in map.days.chunks(7) {
        let row: String = week.iter().map(|d| heat_cell(d.level)).collect();
        let _ = writeln!(out, "  {}  {}", row, week[0].date);
    }

    let legend: Vec<String> = (0..=ActivityLevel::MAX)
        .filter_map(|level| ActivityLevel::new(level).ok())
        .map(|level| format!("{} {}", heat_cell(level.value()), level.label()))
        .collect();
    let _ = writeln!(out, "  {}", legend.join(" | "));
    out
}

pub fn notifications(items: &[NotificationDto], now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return "No notifications\n".to_string();
    }

    let unread = items.iter().filter(|n| !n.read).count();
    let mut out = format!("Notifications ({} unread)\n", unread);
    for (position, n) in items.iter().enumerate() {
        let marker = if n.read { ' ' } else { '●' };
        let _ = writeln!(
            out,
            "{:>3}. {} [{}] {} ({})",
            position + 1,
            marker,
            n.kind,
            n.title,
            time_ago(&n.created_at, now)
        );
        let _ = writeln!(out, "        {}", n.message);
        if let Some(label) = &n.action_label {
            let _ = writeln!(out, "        → {}", label);
        }
    }
    out
}

pub fn conversations(items: &[ConversationDto], now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return "No conversations\n".to_string();
    }

    let unread = items.iter().filter(|c| c.unread).count();
    let mut out = format!("Conversations ({} unread)\n", unread);
    for (position, c) in items.iter().enumerate() {
        let marker = if c.unread { '●' } else { ' ' };
        let active = if c.active { " *" } else { "" };
        let presence = if c.participant.online { "online" } else { "offline" };
        let _ = writeln!(
            out,
            "{:>3}. {} {} ({}) [{}]{}",
            position + 1,
            marker,
            c.participant.name,
            participant_details(c, ", "),
            presence,
            active
        );
        match &c.last_message {
            Some(last) => {
                let _ = writeln!(out, "        {} ({})", last.text, time_ago(&last.sent_at, now));
            }
            None => {
                let _ = writeln!(out, "        no messages yet");
            }
        }
    }
    out
}

// role, then course when there is one
fn participant_details(c: &ConversationDto, separator: &str) -> String {
    if c.participant.course.is_empty() {
        c.participant.role.clone()
    } else {
        format!("{}{}{}", c.participant.role, separator, c.participant.course)
    }
}

pub fn conversation(c: &ConversationDto, now: DateTime<Utc>) -> String {
    let mut out = format!(
        "{} · {}\n",
        c.participant.name,
        participant_details(c, " · ")
    );
    for m in &c.messages {
        let who = if m.outgoing { "You" } else { c.participant.name.as_str() };
        let _ = writeln!(out, "  {}: {} ({})", who, m.text, time_ago(&m.sent_at, now));
    }
    out
}

pub fn theme(theme: Theme) -> String {
    match theme {
        Theme::Dark => "🌙 dark".to_string(),
        Theme::Light => "☀️ light".to_string(),
    }
}

pub fn ui_event(event: &UiEvent) -> String {
    match event {
        UiEvent::Toast { message, .. } => format!(">> {}", message),
        UiEvent::Celebration { current_streak } => {
            format!(">> 🎊 {} days in a row, keep it up!", current_streak)
        }
        UiEvent::NotificationAdded { title, .. } => format!(">> 🔔 {}", title),
        UiEvent::MessageReceived { sender, text, .. } => format!(">> 💬 {}: {}", sender, text),
    }
}
