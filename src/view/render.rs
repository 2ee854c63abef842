//! HTML rendering of the players and sessions tables.
//!
//! Tables are rendered with `minijinja` from the templates under `templates/`, which escape
//! every interpolated value.

use indexmap::IndexMap;
use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;

use crate::{
    dto::{game::GameSession, player::Player},
    services::totals::{compute_totals, share},
};

const CURRENCY_SUFFIX: &str = " ₫";

const TEMPLATES: [(&str, &str); 3] = [
    ("players.html", include_str!("../../templates/players.html")),
    ("sessions.html", include_str!("../../templates/sessions.html")),
    ("page.html", include_str!("../../templates/page.html")),
];

/// Format `value` the way `vi-VN` locales print numbers: `.` groups thousands, `,` separates
/// at most three fraction digits, trailing zeros dropped.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_owned();
    }

    let text = format!("{:.3}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (index, digit) in int_part.chars().enumerate() {
        if index > 0 && (int_part.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let mut out = String::new();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

/// Amount with the currency suffix, or `-` when the amount is unknown.
fn money(value: f64) -> String {
    if value.is_finite() {
        format!("{}{CURRENCY_SUFFIX}", format_amount(value))
    } else {
        "-".to_owned()
    }
}

#[derive(Serialize)]
struct PlayerRow<'a> {
    id: &'a str,
    name: &'a str,
    total: String,
}

#[derive(Serialize)]
struct SessionRow<'a> {
    date: &'a str,
    id: &'a str,
    names: String,
    amount: String,
    individual: String,
}

fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    for (name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

fn player_rows<'a>(players: &'a [Player], totals: &IndexMap<String, f64>) -> Vec<PlayerRow<'a>> {
    players
        .iter()
        .map(|player| PlayerRow {
            id: &player.id,
            name: &player.name,
            total: money(totals.get(&player.id).copied().unwrap_or(0.0)),
        })
        .collect()
}

/// Participant ids without a matching player are left out of the names column.
fn session_rows<'a>(sessions: &'a [GameSession], players: &[Player]) -> Vec<SessionRow<'a>> {
    sessions
        .iter()
        .map(|session| SessionRow {
            date: &session.date,
            id: &session.id,
            names: session
                .participants
                .iter()
                .filter_map(|id| players.iter().find(|player| &player.id == id))
                .map(|player| player.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            amount: money(session.amount),
            individual: share(session).map(money).unwrap_or_else(|| "-".to_owned()),
        })
        .collect()
}

/// Players with their running totals. A player without sessions shows `0 ₫`.
pub fn players_table(
    players: &[Player],
    totals: &IndexMap<String, f64>,
) -> Result<String, minijinja::Error> {
    environment()?
        .get_template("players.html")?
        .render(context! { players => player_rows(players, totals) })
}

/// Recorded sessions with participant names and the per-head amount.
pub fn sessions_table(
    sessions: &[GameSession],
    players: &[Player],
) -> Result<String, minijinja::Error> {
    environment()?
        .get_template("sessions.html")?
        .render(context! { sessions => session_rows(sessions, players) })
}

/// Full standalone page with both tables.
pub fn page(players: &[Player], sessions: &[GameSession]) -> Result<String, minijinja::Error> {
    let totals = compute_totals(sessions);
    environment()?.get_template("page.html")?.render(context! {
        players => player_rows(players, &totals),
        sessions => session_rows(sessions, players),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, name: &str) -> Player {
        Player {
            id: id.into(),
            name: name.into(),
        }
    }

    fn session(participants: &[&str], amount: f64) -> GameSession {
        GameSession {
            id: "1712345678901".into(),
            date: "2024-04-05".into(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
            amount,
        }
    }

    #[test]
    fn formats_like_vietnamese_locale() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(50.0), "50");
        assert_eq!(format_amount(100000.0), "100.000");
        assert_eq!(format_amount(1234567.5), "1.234.567,5");
        assert_eq!(format_amount(100.0 / 3.0), "33,333");
        assert_eq!(format_amount(-2500.25), "-2.500,25");
        assert_eq!(format_amount(-0.0001), "0");
        assert_eq!(format_amount(f64::NAN), "-");
    }

    #[test]
    fn names_are_escaped() {
        let players = [player("1", r#"<b>"Tom" & Jerry</b>"#)];
        let html = players_table(&players, &IndexMap::new()).unwrap();

        assert!(html.contains("&lt;b&gt;&quot;Tom&quot; &amp; Jerry&lt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn player_without_sessions_shows_zero() {
        let players = [player("1", "Vũ"), player("2", "Dung")];
        let totals = compute_totals(&[session(&["1"], 90000.0)]);
        let html = players_table(&players, &totals).unwrap();

        assert!(html.contains("<td>Vũ</td><td>90.000 ₫</td>"));
        assert!(html.contains("<td>Dung</td><td>0 ₫</td>"));
    }

    #[test]
    fn session_row_lists_known_names_and_share() {
        let players = [player("1", "Bắc"), player("2", "Nhật")];
        let html = sessions_table(&[session(&["1", "2", "gone"], 120000.0)], &players).unwrap();

        assert!(html.contains("<td>Bắc, Nhật</td>"));
        assert!(html.contains("<td>120.000 ₫</td><td>40.000 ₫</td>"));
    }

    #[test]
    fn empty_session_shows_dash_for_share() {
        let html = sessions_table(&[session(&[], 5000.0)], &[]).unwrap();
        assert!(html.contains("<td>5.000 ₫</td><td>-</td>"));
    }

    #[test]
    fn unknown_amount_renders_as_dash() {
        let players = [player("1", "Tuấn")];
        let sessions = [session(&["1"], f64::NAN)];

        let html = sessions_table(&sessions, &players).unwrap();
        assert!(html.contains("<td>Tuấn</td><td>-</td><td>-</td>"));

        let html = players_table(&players, &compute_totals(&sessions)).unwrap();
        assert!(html.contains("<td>Tuấn</td><td>-</td>"));
    }

    #[test]
    fn page_contains_both_tables() {
        let html = page(&[player("1", "Hiếu")], &[session(&["1"], 10.0)]).unwrap();
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("class=\"players\""));
        assert!(html.contains("class=\"sessions\""));
    }
}
