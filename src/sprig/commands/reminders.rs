use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::reminders::{watering_alert, ReminderBoard};
use crate::store::plant_store::PlantStore;
use crate::store::StorageBackend;
use chrono::{DateTime, Utc};

pub fn run<B: StorageBackend>(store: &PlantStore<B>, now: DateTime<Utc>) -> Result<CmdResult> {
    let plants = store.list()?;
    let board = ReminderBoard::build(&plants, now);

    let mut result = CmdResult::default();
    if let Some(count) = watering_alert(&plants, now) {
        result.add_message(CmdMessage::warning(alert_text(count)));
    }
    Ok(result.with_board(board))
}

/// Startup check: a single notice when any plant needs water right now.
pub fn check<B: StorageBackend>(store: &PlantStore<B>, now: DateTime<Utc>) -> Result<CmdResult> {
    let plants = store.list()?;
    let mut result = CmdResult::default();
    if let Some(count) = watering_alert(&plants, now) {
        result.add_message(CmdMessage::info(alert_text(count)));
    }
    Ok(result)
}

fn alert_text(count: usize) -> String {
    if count == 1 {
        "Time to care for your plants: 1 plant needs watering".to_string()
    } else {
        format!(
            "Time to care for your plants: {} plants need watering",
            count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::plant_store::fixtures::{fixed_now, StoreFixture};
    use chrono::Duration;

    #[test]
    fn fresh_plants_are_upcoming_only() {
        let fx = StoreFixture::new().with_plant("A");
        let result = run(&fx.store, fixed_now()).unwrap();
        let board = result.board.unwrap();
        assert!(board.overdue.is_empty());
        assert_eq!(board.upcoming.len(), 2);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn overdue_watering_raises_alert() {
        let fx = StoreFixture::new().with_plant("A").with_plant("B");
        let later = fixed_now() + Duration::days(8);

        let result = run(&fx.store, later).unwrap();

        let board = result.board.unwrap();
        assert_eq!(board.overdue.len(), 2);
        assert_eq!(
            result.messages[0].content,
            "Time to care for your plants: 2 plants need watering"
        );
    }

    #[test]
    fn check_is_silent_when_nothing_is_due() {
        let fx = StoreFixture::new().with_plant("A");
        assert!(check(&fx.store, fixed_now()).unwrap().messages.is_empty());
        let due = check(&fx.store, fixed_now() + Duration::days(7)).unwrap();
        assert_eq!(due.messages.len(), 1);
    }
}
