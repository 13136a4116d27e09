use chrono::{DateTime, Utc};
use colored::*;
use sprig::api::{CmdMessage, MessageLevel};
use sprig::commands::{DisplayPlant, ProfileStats};
use sprig::config::SprigConfig;
use sprig::history::HistoryEntry;
use sprig::identify::IdentifiedPlant;
use sprig::model::{CareAction, Plant, UserProfile};
use sprig::reminders::{watering_status, ReminderBoard, WateringStatus};
use sprig::schedule::{days_until, Task, TaskKind};
use sprig::themes::{hex_to_rgb, Palette, ThemeId};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const NAME_WIDTH: usize = 24;
const SPECIES_WIDTH: usize = 26;
const TIME_WIDTH: usize = 14;

/// Colors output with the active theme's palette.
pub struct Printer {
    palette: Palette,
    soon_days: i64,
}

impl Printer {
    pub fn new(theme: ThemeId, soon_days: i64) -> Self {
        Self {
            palette: theme.palette(),
            soon_days,
        }
    }

    fn paint(&self, text: &str, hex: &str) -> ColoredString {
        match hex_to_rgb(hex) {
            Some((r, g, b)) => text.truecolor(r, g, b),
            None => text.normal(),
        }
    }

    fn heading(&self, text: &str) -> ColoredString {
        self.paint(text, self.palette.primary).bold()
    }

    fn accent(&self, text: &str) -> ColoredString {
        self.paint(text, self.palette.active)
    }

    pub fn messages(&self, messages: &[CmdMessage]) {
        for message in messages {
            match message.level {
                MessageLevel::Info => println!("{}", message.content.dimmed()),
                MessageLevel::Success => println!("{}", message.content.green()),
                MessageLevel::Warning => println!("{}", message.content.yellow()),
                MessageLevel::Error => println!("{}", message.content.red()),
            }
        }
    }

    pub fn plants(&self, plants: &[DisplayPlant], now: DateTime<Utc>) {
        if plants.is_empty() {
            println!("No plants found.");
            return;
        }

        for dp in plants {
            let idx = format!("{:>3}. ", dp.index);
            let name = pad_to_width(&truncate_to_width(&dp.plant.name, NAME_WIDTH), NAME_WIDTH);
            let species =
                pad_to_width(&truncate_to_width(&dp.plant.species, SPECIES_WIDTH), SPECIES_WIDTH);
            let status = self.watering_label(&dp.plant, now);

            println!(
                "{}{} {} {}",
                idx.dimmed(),
                self.accent(&name),
                species.italic(),
                status
            );
        }
    }

    fn watering_label(&self, plant: &Plant, now: DateTime<Utc>) -> ColoredString {
        let text = match plant.next_watering {
            Some(due) => format!("water {}", due_label(days_until(due, now))),
            None => "no watering scheduled".to_string(),
        };
        match watering_status(plant, now, self.soon_days) {
            WateringStatus::Due => text.red(),
            WateringStatus::Soon => text.yellow(),
            WateringStatus::Ok => text.normal(),
            WateringStatus::Unknown => text.dimmed(),
        }
    }

    pub fn plant_details(&self, plants: &[DisplayPlant], now: DateTime<Utc>) {
        for (i, dp) in plants.iter().enumerate() {
            if i > 0 {
                println!("\n{}\n", "─".repeat(LINE_WIDTH).dimmed());
            }
            let p = &dp.plant;
            println!(
                "{} {}",
                format!("{}.", dp.index).dimmed(),
                self.heading(&p.name)
            );
            if !p.species.is_empty() {
                println!("   {}", p.species.italic());
            }
            println!();
            field("Type", p.kind.as_str());
            field("Location", p.location.as_str());
            field("Light", p.light_needs.as_str());
            field("Humidity", p.humidity_needs.as_str());
            field("Temperature", &p.temp_range);
            if let Some(date) = p.acquisition_date {
                field("Acquired", &date.format("%Y-%m-%d").to_string());
            }
            println!();
            field("Water every", &format!("{} days", p.watering_frequency));
            field("Fertilize every", &format!("{} days", p.fertilizing_frequency));
            field("Repot every", &format!("{} years", p.repotting_frequency));
            println!();
            field("Last watered", &format_optional_time(p.last_watered));
            field("Next watering", &format_due(p.next_watering, now));
            field("Last fertilized", &format_optional_time(p.last_fertilized));
            field("Next fertilizing", &format_due(p.next_fertilizing, now));
            field("Last repotted", &format_optional_time(p.last_repotted));

            if let Some(notes) = p.notes.as_deref().filter(|n| !n.is_empty()) {
                println!();
                println!("{}", notes);
            }

            if !p.history.is_empty() {
                println!();
                println!("{}", self.heading("History"));
                for item in p.history.iter().rev() {
                    println!(
                        "   {} {}",
                        action_label(item.action),
                        format_time_ago(item.date, now).dimmed()
                    );
                }
            }
        }
    }

    pub fn board(&self, board: &ReminderBoard) {
        if board.is_empty() {
            println!("No care tasks. Add a plant to get reminders.");
            return;
        }
        if !board.overdue.is_empty() {
            println!("{}", self.heading("Overdue"));
            for task in &board.overdue {
                self.task_line(task, true);
            }
            println!();
        }
        if !board.upcoming.is_empty() {
            println!("{}", self.heading("Upcoming"));
            for task in &board.upcoming {
                self.task_line(task, false);
            }
            println!();
        }
        let days: Vec<String> = board
            .task_dates()
            .iter()
            .map(|d| d.format("%b %d").to_string())
            .collect();
        println!("{} {}", "Days with tasks:".dimmed(), days.join(", "));
    }

    fn task_line(&self, task: &Task, overdue: bool) {
        let kind = match task.kind {
            TaskKind::Water => "water    ",
            TaskKind::Fertilize => "fertilize",
        };
        let when = format!(
            "{} ({})",
            due_label(task.days_until),
            task.due_date.format("%Y-%m-%d")
        );
        let name = pad_to_width(&truncate_to_width(&task.plant_name, NAME_WIDTH), NAME_WIDTH);
        let when = if overdue { when.red() } else { when.normal() };
        println!("   {} {} {}", kind, self.accent(&name), when);
    }

    pub fn history(&self, entries: &[HistoryEntry], now: DateTime<Utc>) {
        if entries.is_empty() {
            println!("No care recorded yet.");
            return;
        }
        for entry in entries {
            let name = pad_to_width(&truncate_to_width(&entry.plant_name, NAME_WIDTH), NAME_WIDTH);
            let time_ago = format!(
                "{:>width$}",
                format_time_ago(entry.date, now),
                width = TIME_WIDTH
            );
            println!(
                "   {} {} {}",
                action_label(entry.action),
                self.accent(&name),
                time_ago.dimmed()
            );
        }
    }

    pub fn profile(&self, profile: &UserProfile, stats: Option<&ProfileStats>) {
        let name = if profile.name.is_empty() {
            "(no name)"
        } else {
            profile.name.as_str()
        };
        println!("{}", self.heading(name));
        if let Some(bio) = &profile.bio {
            println!("   {}", bio.italic());
        }
        println!();
        field("Email", &profile.email);
        field("Phone", &profile.phone);
        field("Location", &profile.location);
        if profile.avatar.is_some() {
            field("Avatar", "set");
        }
        if let Some(stats) = stats {
            println!();
            println!(
                "   {} plants   {} waterings   {} tasks",
                self.accent(&stats.plants.to_string()).bold(),
                self.accent(&stats.waterings.to_string()).bold(),
                self.accent(&stats.open_tasks.to_string()).bold()
            );
        }
    }

    pub fn themes(&self, active: ThemeId) {
        for theme in ThemeId::ALL {
            let palette = theme.palette();
            let marker = if theme == active { "●" } else { "○" };
            let swatch: String = [palette.bg, palette.primary, palette.accent, palette.active]
                .iter()
                .map(|hex| match hex_to_rgb(hex) {
                    Some((r, g, b)) => "██".truecolor(r, g, b).to_string(),
                    None => "  ".to_string(),
                })
                .collect();
            println!("   {} {:<6} {}", marker, theme.display_name(), swatch);
        }
    }

    pub fn config(&self, config: &SprigConfig) {
        for key in sprig::config::CONFIG_KEYS {
            let value = config.get(key).unwrap_or_default();
            println!("{} = {}", key, value);
        }
    }

    pub fn identified(&self, plant: &IdentifiedPlant) {
        println!(
            "{} {}",
            self.heading(&plant.name),
            format!("({:.0}%)", plant.confidence * 100.0).dimmed()
        );
        println!("   {}", plant.species.italic());
        if !plant.common_names.is_empty() {
            println!("   {}", plant.common_names.join(", ").dimmed());
        }
        println!();
        field("Water every", &format!("{} days", plant.watering_frequency));
        field(
            "Fertilize every",
            &format!("{} days", plant.fertilizing_frequency),
        );
        if let Some(month) = plant.repotting_month.and_then(month_name) {
            field("Repot in", month);
        }
        if !plant.care_notes.is_empty() {
            println!();
            println!("{}", plant.care_notes);
        }
        println!();
    }
}

fn field(label: &str, value: &str) {
    let value = if value.is_empty() { "-" } else { value };
    println!("   {:<18}{}", format!("{}:", label).dimmed(), value);
}

fn action_label(action: CareAction) -> ColoredString {
    match action {
        CareAction::Water => "water    ".blue(),
        CareAction::Fertilize => "fertilize".green(),
        CareAction::Repot => "repot    ".yellow(),
    }
}

fn month_name(month: u32) -> Option<&'static str> {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    MONTHS.get(month.checked_sub(1)? as usize).copied()
}

pub fn due_label(days: i64) -> String {
    match days {
        d if d < -1 => format!("{} days overdue", -d),
        -1 => "1 day overdue".to_string(),
        0 => "due today".to_string(),
        1 => "tomorrow".to_string(),
        d => format!("in {} days", d),
    }
}

fn format_due(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match due {
        Some(due) => format!(
            "{} ({})",
            due.format("%Y-%m-%d"),
            due_label(days_until(due, now))
        ),
        None => String::new(),
    }
}

fn format_optional_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}
