//! Add-game form state and its submission rules.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use validator::{Validate, ValidationError};

use crate::{dto::game::GameSession, view::ids};

/// Wire format of session dates.
pub const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Inputs of the add-game form.
#[derive(Debug, Clone, Default, Validate)]
pub struct GameForm {
    #[validate(required)]
    selected_date: Option<Date>,
    #[validate(length(min = 1))]
    selected_players: Vec<String>,
    #[validate(custom(function = "validate_amount"))]
    amount: String,
}

impl GameForm {
    /// Empty form with `date` preselected.
    pub fn new(date: Option<Date>) -> Self {
        Self {
            selected_date: date,
            ..Self::default()
        }
    }

    /// Currently selected date.
    pub fn selected_date(&self) -> Option<Date> {
        self.selected_date
    }

    /// Ids of the checked players, in the order they were checked.
    pub fn selected_players(&self) -> &[String] {
        &self.selected_players
    }

    /// Raw text of the amount field.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Pick a date, or clear it with `None`.
    pub fn select_date(&mut self, date: Option<Date>) {
        self.selected_date = date;
    }

    /// Check or uncheck a player.
    pub fn set_player_checked(&mut self, player_id: &str, checked: bool) {
        if checked {
            if !self.selected_players.iter().any(|id| id == player_id) {
                self.selected_players.push(player_id.to_owned());
            }
        } else {
            self.selected_players.retain(|id| id != player_id);
        }
    }

    /// Replace the amount text.
    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    /// Drop `player_id` from the selection, e.g. after the player was removed.
    pub fn forget_player(&mut self, player_id: &str) {
        self.set_player_checked(player_id, false);
    }

    /// Build the session to submit, or `None` when a field is missing or invalid.
    pub fn submission(&self) -> Option<GameSession> {
        self.validate().ok()?;
        let date = self.selected_date?.format(DATE_FORMAT).ok()?;
        let amount = parse_amount(&self.amount)?;

        Some(GameSession {
            id: ids::new_session_id(),
            date,
            participants: self.selected_players.clone(),
            amount,
        })
    }

    /// Reset the fields cleared after a successful submission. The date is kept.
    pub fn clear_after_submit(&mut self) {
        self.selected_players.clear();
        self.amount.clear();
    }
}

fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn validate_amount(amount: &str) -> Result<(), ValidationError> {
    if parse_amount(amount).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_format");
        err.message = Some("Amount must be a finite number".into());
        Err(err)
    }
}
