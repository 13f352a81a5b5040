//! Terminal renderer.
//!
//! # Responsibility
//! - Implement the core presentation boundary with styled terminal output.
//!   All data arrives pre-computed; this module only formats.

use crate::config::Config;
use chrono::Local;
use crossterm::style::{Color, StyledContent, Stylize};
use std::path::Path;
use tallybook_core::service::parse::parse_calendar_date;
use tallybook_core::{
    BookError, GroupedItems, Item, ItemId, Presenter, Priority, Stats, DEFAULT_BOARD,
    DEFAULT_CATEGORY,
};

const CHECK_SYMBOL: &str = "✔";
const PENDING_SYMBOL: &str = "☐";
const NOTE_SYMBOL: &str = "●";
const ERROR_SYMBOL: &str = "✖";
const DEFAULT_NOTE_COLOR: Color = Color::Blue;

pub struct Renderer {
    config: Config,
}

impl Renderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn success(&self, message: &str, suffix: &str) {
        println!(
            "\n {} {} {}",
            CHECK_SYMBOL.green(),
            message,
            suffix.with(Color::DarkGrey)
        );
    }

    fn join_ids(ids: &[ItemId]) -> String {
        ids.iter()
            .map(ItemId::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn named_color(name: &str) -> Color {
        match name {
            "red" => Color::Red,
            "yellow" => Color::Yellow,
            "green" => Color::Green,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "grey" | "gray" => Color::DarkGrey,
            _ => Color::White,
        }
    }

    fn hex_color(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#')?;
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return None,
        };
        let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
        let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
        let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
        Some(Color::Rgb { r, g, b })
    }

    fn category_color(item: &Item) -> Color {
        item.category()
            .and_then(|category| category.color.as_deref())
            .and_then(Self::hex_color)
            .unwrap_or(DEFAULT_NOTE_COLOR)
    }

    fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Normal => Color::Green,
            Priority::Medium => Self::named_color(&self.config.medium_priority_color),
            Priority::High => Self::named_color(&self.config.high_priority_color),
        }
    }

    /// Age of an item in whole days, empty under one day.
    fn age(item: &Item) -> String {
        let now = Local::now().timestamp_millis();
        let days = (now - item.timestamp).abs() / (24 * 60 * 60 * 1000);
        if days == 0 {
            String::new()
        } else {
            format!("{days}d")
        }
    }

    fn symbol(&self, item: &Item) -> StyledContent<&'static str> {
        if item.is_task() {
            if item.is_complete() {
                CHECK_SYMBOL.green()
            } else {
                PENDING_SYMBOL.magenta()
            }
        } else {
            NOTE_SYMBOL.with(Self::category_color(item))
        }
    }

    fn message(&self, item: &Item) -> String {
        let mut parts: Vec<String> = Vec::new();

        let priority = item.priority().unwrap_or_default();
        if !item.is_complete() && priority > Priority::Normal {
            let color = self.priority_color(priority);
            parts.push(item.description.as_str().with(color).underlined().to_string());
            let marker = if priority == Priority::Medium {
                "(!)"
            } else {
                "(!!)"
            };
            parts.push(marker.with(color).to_string());
        } else if item.is_complete() {
            parts.push(item.description.as_str().with(Color::DarkGrey).to_string());
        } else {
            parts.push(item.description.clone());
        }

        if let Some(due) = item.due_date() {
            let today = Local::now().date_naive();
            let color = match parse_calendar_date(due) {
                Some(day) if day > today => Color::Green,
                _ => Color::Red,
            };
            parts.push(format!("Due:({due})").with(color).to_string());
        }

        parts.join(" ")
    }

    fn star(&self, item: &Item) -> String {
        if item.is_starred {
            self.config.starred_symbol.as_str().yellow().to_string()
        } else {
            String::new()
        }
    }

    fn title(&self, label: &str, items: &[Item]) {
        let tasks = items.iter().filter(|item| item.is_task()).count();
        let complete = items.iter().filter(|item| item.is_complete()).count();
        println!(
            "\n {} {}",
            label.underlined(),
            format!("[{complete}/{tasks}]").with(Color::DarkGrey)
        );
    }

    fn line(&self, item: &Item, suffix: &str) {
        let id = format!("{:>4}.", item.id);
        println!(
            " {} {} {} {}",
            id.with(Color::DarkGrey),
            self.symbol(item),
            self.message(item),
            suffix
        );
    }

    fn board_is_all_complete(items: &[Item]) -> bool {
        items.iter().all(|item| item.is_complete())
    }

    fn display_groups(&self, groups: &GroupedItems, by_date: bool) {
        for (label, items) in groups {
            if Self::board_is_all_complete(items) && !self.config.display_complete_tasks {
                continue;
            }
            self.title(label, items);
            for item in items {
                if item.is_complete() && !self.config.display_complete_tasks {
                    continue;
                }
                let suffix = if by_date {
                    let boards: Vec<&str> = item
                        .boards
                        .iter()
                        .filter(|board| *board != DEFAULT_BOARD)
                        .map(String::as_str)
                        .collect();
                    format!(
                        "{} {}",
                        boards.join(" ").with(Color::DarkGrey),
                        self.star(item)
                    )
                } else {
                    let age = Self::age(item);
                    if age.is_empty() {
                        self.star(item)
                    } else {
                        format!("{} {}", age.with(Color::DarkGrey), self.star(item))
                    }
                };
                self.line(item, suffix.trim_end());
            }
        }
    }
}

impl Presenter for Renderer {
    fn created(&self, item: &Item) {
        let kind = if item.is_task() { "task" } else { "note" };
        self.success(&format!("Created {kind}:"), &item.id.to_string());
    }

    fn checked(&self, ids: &[ItemId]) {
        let noun = if ids.len() > 1 { "tasks" } else { "task" };
        self.success(&format!("Checked {noun}:"), &Self::join_ids(ids));
    }

    fn starred(&self, ids: &[ItemId]) {
        let noun = if ids.len() > 1 { "items" } else { "item" };
        self.success(&format!("Starred {noun}:"), &Self::join_ids(ids));
    }

    fn edited(&self, id: ItemId) {
        self.success("Updated description of item:", &id.to_string());
    }

    fn moved(&self, id: ItemId, boards: &[String]) {
        self.success(&format!("Moved item: {id} to"), &boards.join(", "));
    }

    fn priority_updated(&self, id: ItemId, priority: Priority) {
        let label = priority
            .label()
            .with(self.priority_color(priority))
            .to_string();
        self.success(&format!("Updated priority of task: {id} to"), &label);
    }

    fn deleted(&self, ids: &[ItemId]) {
        let noun = if ids.len() > 1 { "items" } else { "item" };
        self.success(&format!("Deleted {noun}:"), &Self::join_ids(ids));
    }

    fn restored(&self, ids: &[ItemId]) {
        let noun = if ids.len() > 1 { "items" } else { "item" };
        self.success(&format!("Restored {noun}:"), &Self::join_ids(ids));
    }

    fn category_updated(&self, name: &str, color: Option<&str>) {
        let star = color
            .and_then(Self::hex_color)
            .unwrap_or(DEFAULT_NOTE_COLOR);
        self.success(
            &format!("Modified category: {name}"),
            &"*".with(star).to_string(),
        );
    }

    fn imported(&self, path: &Path) {
        self.success("Import successful:", &path.display().to_string());
    }

    fn exported(&self, path: &Path) {
        self.success("Export successful:", &path.display().to_string());
    }

    fn display_by_board(&self, groups: &GroupedItems) {
        self.display_groups(groups, false);
    }

    fn display_by_date(&self, groups: &GroupedItems) {
        self.display_groups(groups, true);
    }

    fn display_stats(&self, stats: &Stats) {
        if !self.config.display_progress_overview {
            return;
        }

        let total = stats.complete + stats.pending;
        if stats.complete > 0 && stats.pending == 0 && stats.notes == 0 {
            println!(
                "\n All done! {}",
                self.config.starred_symbol.as_str().yellow()
            );
        }
        if total + stats.notes == 0 {
            println!(
                "\n Type `tally --help` to get started! {}",
                self.config.starred_symbol.as_str().yellow()
            );
        }

        let percent = format!("{}%", stats.percent);
        let percent = if stats.percent >= 75 {
            percent.green().to_string()
        } else if stats.percent >= 50 {
            percent.yellow().to_string()
        } else {
            percent
        };
        println!(
            "\n {}",
            format!("{percent} of all tasks complete.").with(Color::DarkGrey)
        );

        let mut status: Vec<String> = vec![
            format!(
                "{} {}",
                stats.complete.to_string().green(),
                "done".with(Color::DarkGrey)
            ),
            format!(
                "{} {}",
                stats.pending.to_string().magenta(),
                "pending".with(Color::DarkGrey)
            ),
        ];
        if stats.categories.is_empty() {
            status.push(format!(
                "{} {}",
                "0".with(DEFAULT_NOTE_COLOR),
                DEFAULT_CATEGORY.with(Color::DarkGrey)
            ));
        } else {
            for tally in &stats.categories {
                let color = tally
                    .color
                    .as_deref()
                    .and_then(Self::hex_color)
                    .unwrap_or(DEFAULT_NOTE_COLOR);
                status.push(format!(
                    "{} {}",
                    tally.count.to_string().with(color),
                    tally.name.as_str().with(Color::DarkGrey)
                ));
            }
        }
        let separator = " · ".with(Color::DarkGrey).to_string();
        println!(" {}\n", status.join(&separator));
    }

    fn report(&self, error: &BookError) {
        eprintln!("\n {} {}", ERROR_SYMBOL.red(), error);
    }
}
