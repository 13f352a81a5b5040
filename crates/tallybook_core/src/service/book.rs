//! Lifecycle operations over the item repository.
//!
//! # Responsibility
//! - Implement create/check/star/edit/move/prioritize/delete/restore/clean/
//!   rename/categorize/find plus the read-only display compositions.
//! - Allocate collection-local ids.
//!
//! # Invariants
//! - Every operation is one whole-collection read-modify-write; validation
//!   runs before the first mutation and a failure writes nothing.
//! - Archival and restoration allocate a fresh id in the destination
//!   collection and remove the source entry in the same operation.

use crate::model::item::{
    dedup_labels, is_hex_color, Category, Item, ItemId, ItemKind, ItemMap, DEFAULT_BOARD,
};
use crate::presenter::Presenter;
use crate::query::filter::filter_by_attributes;
use crate::query::group::{group_by_board, group_by_date, list_boards, list_dates};
use crate::query::stats::collect_stats;
use crate::service::parse::{
    parse_calendar_date, parse_create_options, parse_single_target, split_segments,
};
use crate::service::{BookError, BookResult};
use crate::storage::{Storage, StorageError};
use chrono::{Local, TimeZone};
use log::debug;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Smallest positive id unused in `data`: max existing key + 1, or 1 for an
/// empty collection. Recomputed on every allocation.
pub fn next_id(data: &ItemMap) -> ItemId {
    data.keys().next_back().copied().unwrap_or(0) + 1
}

/// The item repository: lifecycle operations over an active and an archive
/// collection, reporting outcomes through a presenter.
pub struct Book<S: Storage, P: Presenter> {
    storage: S,
    presenter: P,
}

impl<S: Storage, P: Presenter> Book<S, P> {
    pub fn new(storage: S, presenter: P) -> Self {
        Self { storage, presenter }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Parses and validates id tokens against one collection.
    ///
    /// Duplicates collapse to the first occurrence. The whole operation
    /// fails on the first token that is not a known id; nothing is applied
    /// partially.
    fn validate_ids(tokens: &[String], existing: &ItemMap) -> BookResult<Vec<ItemId>> {
        if tokens.is_empty() {
            return Err(BookError::MissingId);
        }

        let mut ids: Vec<ItemId> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let id: ItemId = token
                .parse()
                .map_err(|_| BookError::InvalidId(token.clone()))?;
            if !existing.contains_key(&id) {
                return Err(BookError::InvalidId(token.clone()));
            }
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    fn validate_target(target: &str, existing: &ItemMap) -> BookResult<ItemId> {
        let token = target.strip_prefix('@').unwrap_or(target).to_string();
        let ids = Self::validate_ids(&[token], existing)?;
        Ok(ids[0])
    }

    // ---- creation ----

    /// Creates one task per `|`-separated segment.
    ///
    /// All segments parse before the first insert, so a malformed later
    /// segment creates nothing.
    pub fn create_task(&mut self, tokens: &[String]) -> BookResult<()> {
        let mut parsed = Vec::new();
        for segment in split_segments(tokens) {
            parsed.push(parse_create_options(&segment)?);
        }

        let mut data = self.storage.get()?;
        for options in parsed {
            let id = next_id(&data);
            let item = Item::task(
                id,
                options.description,
                options.boards,
                options.priority,
                options.due_date,
            );
            data.insert(id, item);
            debug!("event=create_task status=ok id={id}");
            self.presenter.created(&data[&id]);
        }
        self.storage.set(&data)?;
        Ok(())
    }

    /// Creates a note with the default category.
    pub fn create_note(&mut self, tokens: &[String]) -> BookResult<()> {
        self.insert_note(tokens, None)
    }

    fn insert_note(&mut self, tokens: &[String], category: Option<Category>) -> BookResult<()> {
        let options = parse_create_options(tokens)?;
        let mut data = self.storage.get()?;
        let id = next_id(&data);
        let item = Item::note(id, options.description, options.boards, category);
        data.insert(id, item);
        debug!("event=create_note status=ok id={id}");
        self.presenter.created(&data[&id]);
        self.storage.set(&data)?;
        Ok(())
    }

    // ---- in-place mutation ----

    /// Toggles completion for each validated id. Notes pass id validation
    /// but the toggle itself is a task-only effect.
    pub fn check_tasks(&mut self, tokens: &[String]) -> BookResult<()> {
        let mut data = self.storage.get()?;
        let ids = Self::validate_ids(tokens, &data)?;

        for id in &ids {
            if let Some(item) = data.get_mut(id) {
                if let ItemKind::Task { is_complete, .. } = &mut item.kind {
                    *is_complete = !*is_complete;
                }
            }
        }

        self.storage.set(&data)?;
        self.presenter.checked(&ids);
        Ok(())
    }

    /// Toggles the star flag for each validated id.
    pub fn star_items(&mut self, tokens: &[String]) -> BookResult<()> {
        let mut data = self.storage.get()?;
        let ids = Self::validate_ids(tokens, &data)?;

        for id in &ids {
            if let Some(item) = data.get_mut(id) {
                item.is_starred = !item.is_starred;
            }
        }

        self.storage.set(&data)?;
        self.presenter.starred(&ids);
        Ok(())
    }

    /// Replaces the description of exactly one `@id` target.
    pub fn edit_description(&mut self, tokens: &[String]) -> BookResult<()> {
        let (target, rest) = parse_single_target(tokens)?;
        let mut data = self.storage.get()?;
        let id = Self::validate_target(&target, &data)?;

        let description = rest.join(" ");
        if description.is_empty() {
            return Err(BookError::MissingDescription);
        }

        if let Some(item) = data.get_mut(&id) {
            item.description = description;
        }
        self.storage.set(&data)?;
        self.presenter.edited(id);
        Ok(())
    }

    /// Sets the priority of exactly one `@id` target. The level token is
    /// checked before the target, matching the input contract.
    pub fn update_priority(&mut self, tokens: &[String]) -> BookResult<()> {
        let level = tokens
            .iter()
            .find_map(|token| match token.as_str() {
                "1" | "2" | "3" => token.parse::<u8>().ok(),
                _ => None,
            })
            .and_then(crate::model::item::Priority::from_level)
            .ok_or(BookError::InvalidPriority)?;

        let (target, _) = parse_single_target(tokens)?;
        let mut data = self.storage.get()?;
        let id = Self::validate_target(&target, &data)?;

        if let Some(item) = data.get_mut(&id) {
            if let ItemKind::Task { priority, .. } = &mut item.kind {
                *priority = level;
            }
        }
        self.storage.set(&data)?;
        self.presenter.priority_updated(id, level);
        Ok(())
    }

    /// Replaces the whole board set of exactly one `@id` target.
    ///
    /// `myboard` maps to the sentinel label; every other token gets the `@`
    /// prefix. The resulting set is deduplicated and must be non-empty.
    pub fn move_boards(&mut self, tokens: &[String]) -> BookResult<()> {
        let (target, rest) = parse_single_target(tokens)?;
        let mut data = self.storage.get()?;
        let id = Self::validate_target(&target, &data)?;

        let boards: Vec<String> = rest
            .iter()
            .map(|token| {
                if token == "myboard" {
                    DEFAULT_BOARD.to_string()
                } else {
                    format!("@{token}")
                }
            })
            .collect();
        if boards.is_empty() {
            return Err(BookError::MissingBoards);
        }
        let boards = dedup_labels(boards);

        if let Some(item) = data.get_mut(&id) {
            item.boards = boards.clone();
        }
        self.storage.set(&data)?;
        self.presenter.moved(id, &boards);
        Ok(())
    }

    /// Moves every item on `args[0]` to `args[1]`, one `move_boards` call
    /// per item. The destination set of each item is exactly the new name.
    pub fn rename_board(&mut self, args: &[String]) -> BookResult<()> {
        if args.is_empty() {
            return Err(BookError::MissingBoards);
        }
        if args.len() != 2 {
            return Err(BookError::InvalidBoardArgumentCount(2));
        }

        let data = self.storage.get()?;
        let old_name = &args[0];
        if !list_boards(&data).contains(old_name) {
            return Err(BookError::UnknownBoard(old_name.clone()));
        }

        let matching: Vec<ItemId> = data
            .iter()
            .filter(|(_, item)| item.boards.contains(old_name))
            .map(|(id, _)| *id)
            .collect();

        for id in matching {
            self.move_boards(&[format!("@{id}"), args[1].clone()])?;
        }
        Ok(())
    }

    // ---- archive moves ----

    /// Archives each referenced item under a freshly allocated archive id.
    ///
    /// Tokens naming an existing board expand to every task and note on
    /// that board; the rest must be active ids.
    pub fn delete_items(&mut self, tokens: &[String]) -> BookResult<()> {
        let mut data = self.storage.get()?;
        let boards = list_boards(&data);

        let mut id_tokens: Vec<String> = Vec::new();
        let mut board_refs: Vec<String> = Vec::new();
        for token in tokens {
            if boards.contains(token) {
                board_refs.push(token.clone());
            } else {
                id_tokens.push(token.clone());
            }
        }

        let on_boards =
            |item: &Item| item.boards.iter().any(|board| board_refs.contains(board));
        for class in ["task", "note"] {
            let selected = filter_by_attributes(&[class.to_string()], &data, on_boards);
            id_tokens.extend(selected.keys().map(ItemId::to_string));
        }

        let ids = Self::validate_ids(&id_tokens, &data)?;

        let mut archive = self.storage.get_archive()?;
        for id in &ids {
            if let Some(mut item) = data.remove(id) {
                let archive_id = next_id(&archive);
                item.id = archive_id;
                archive.insert(archive_id, item);
            }
        }

        self.storage.set_archive(&archive)?;
        self.storage.set(&data)?;
        debug!("event=delete status=ok count={}", ids.len());
        self.presenter.deleted(&ids);
        Ok(())
    }

    /// Archives every complete task on the given boards (all boards when
    /// none are given) by delegating to [`Book::delete_items`].
    pub fn clean_boards(&mut self, input: &[String]) -> BookResult<()> {
        let data = self.storage.get()?;
        let boards: Vec<String> = if input.is_empty() {
            list_boards(&data)
        } else {
            input.to_vec()
        };

        let complete = filter_by_attributes(&["complete".to_string()], &data, |item| {
            item.boards.iter().any(|board| boards.contains(board))
        });
        let tokens: Vec<String> = complete.keys().map(ItemId::to_string).collect();
        self.delete_items(&tokens)
    }

    /// Moves archived items back to active under freshly allocated ids.
    pub fn restore_items(&mut self, tokens: &[String]) -> BookResult<()> {
        let mut archive = self.storage.get_archive()?;
        let ids = Self::validate_ids(tokens, &archive)?;

        let mut data = self.storage.get()?;
        for id in &ids {
            if let Some(mut item) = archive.remove(id) {
                let active_id = next_id(&data);
                item.id = active_id;
                data.insert(active_id, item);
            }
        }

        self.storage.set(&data)?;
        self.storage.set_archive(&archive)?;
        debug!("event=restore status=ok count={}", ids.len());
        self.presenter.restored(&ids);
        Ok(())
    }

    // ---- categories ----

    /// Applies a category to existing notes and, when description tokens
    /// remain, creates a new note under it.
    ///
    /// With a `#color` token the color propagates to every note sharing the
    /// category name; without one the new note inherits the category's
    /// current color.
    pub fn categorize(&mut self, tokens: &[String]) -> BookResult<()> {
        let name_token = tokens
            .iter()
            .find(|token| token.starts_with('@') && token.len() > 1)
            .cloned()
            .ok_or(BookError::MissingCategory)?;
        let color_token = tokens.iter().find(|token| token.starts_with('#')).cloned();

        if let Some(color) = &color_token {
            if !is_hex_color(color) {
                return Err(BookError::InvalidColor(color.clone()));
            }
        }

        let name = name_token
            .strip_prefix('@')
            .unwrap_or(&name_token)
            .to_string();
        let color = match &color_token {
            Some(color) => {
                self.update_category_colors(&name, Some(color.as_str()))?;
                Some(color.clone())
            }
            None => self.category_color(&name)?,
        };

        let description: Vec<String> = tokens
            .iter()
            .filter(|token| **token != name_token && Some(*token) != color_token.as_ref())
            .cloned()
            .collect();
        if !description.is_empty() {
            self.insert_note(&description, Some(Category { name, color }))?;
        }
        Ok(())
    }

    /// Propagates a color to every note with the given category name.
    pub fn update_category_colors(&mut self, name: &str, color: Option<&str>) -> BookResult<()> {
        let mut data = self.storage.get()?;
        for item in data.values_mut() {
            if let ItemKind::Note { category } = &mut item.kind {
                if category.name == name {
                    category.color = color.map(str::to_string);
                }
            }
        }
        self.storage.set(&data)?;
        self.presenter.category_updated(name, color);
        Ok(())
    }

    /// Current shared color for a category name, from the first note that
    /// carries it.
    fn category_color(&self, name: &str) -> BookResult<Option<String>> {
        let data = self.storage.get()?;
        for item in data.values() {
            if let ItemKind::Note { category } = &item.kind {
                if category.name == name {
                    return Ok(category.color.clone());
                }
            }
        }
        Ok(None)
    }

    // ---- reads ----

    /// Shows active items whose description contains every term
    /// (case-insensitive substring match), grouped by board.
    pub fn find_items(&self, terms: &[String]) -> BookResult<()> {
        let data = self.storage.get()?;
        let needles: Vec<String> = terms.iter().map(|term| term.to_lowercase()).collect();

        let mut result = ItemMap::new();
        for (id, item) in &data {
            let haystack = item.description.to_lowercase();
            if !needles.is_empty() && needles.iter().all(|needle| haystack.contains(needle)) {
                result.insert(*id, item.clone());
            }
        }

        let boards = list_boards(&data);
        self.presenter
            .display_by_board(&group_by_board(&result, &boards));
        Ok(())
    }

    /// Filters by attribute keywords and/or board names, grouped by board.
    ///
    /// A term naming a stored board (or the literal `myboard`) narrows the
    /// displayed boards; every other term is an attribute keyword.
    pub fn list_by_attributes(&self, terms: &[String]) -> BookResult<()> {
        let data = self.storage.get()?;
        let stored = list_boards(&data);

        let mut boards: Vec<String> = Vec::new();
        let mut attributes: Vec<String> = Vec::new();
        for term in terms {
            let tagged = format!("@{term}");
            if stored.contains(&tagged) {
                boards.push(tagged);
            } else if term == "myboard" {
                boards.push(DEFAULT_BOARD.to_string());
            } else {
                attributes.push(term.clone());
            }
        }
        let boards = dedup_labels(boards);
        let attributes = dedup_labels(attributes);

        let filtered = filter_by_attributes(&attributes, &data, |_| true);
        self.presenter
            .display_by_board(&group_by_board(&filtered, &boards));
        Ok(())
    }

    pub fn display_by_board(&self) -> BookResult<()> {
        let data = self.storage.get()?;
        self.presenter
            .display_by_board(&group_by_board(&data, &list_boards(&data)));
        Ok(())
    }

    pub fn display_by_date(&self) -> BookResult<()> {
        let data = self.storage.get()?;
        self.presenter
            .display_by_date(&group_by_date(&data, &list_dates(&data)));
        Ok(())
    }

    /// Shows the archive grouped by the archive's own dates.
    pub fn display_archive(&self) -> BookResult<()> {
        let archive = self.storage.get_archive()?;
        self.presenter
            .display_by_date(&group_by_date(&archive, &list_dates(&archive)));
        Ok(())
    }

    pub fn display_stats(&self) -> BookResult<()> {
        let data = self.storage.get()?;
        self.presenter.display_stats(&collect_stats(&data));
        Ok(())
    }

    /// Shows active items created strictly before the given day.
    pub fn display_items_before(&self, tokens: &[String]) -> BookResult<()> {
        self.display_items_in_range(tokens, Ordering::Less)
    }

    /// Shows active items created strictly after the given day.
    pub fn display_items_after(&self, tokens: &[String]) -> BookResult<()> {
        self.display_items_in_range(tokens, Ordering::Greater)
    }

    fn display_items_in_range(&self, tokens: &[String], side: Ordering) -> BookResult<()> {
        let token = match tokens {
            [token] => token.clone(),
            _ => return Err(BookError::InvalidRange(tokens.join(" "))),
        };
        let boundary =
            parse_calendar_date(&token).ok_or_else(|| BookError::InvalidRange(token.clone()))?;

        let data = self.storage.get()?;
        let mut selected = ItemMap::new();
        for (id, item) in &data {
            let day = Local
                .timestamp_millis_opt(item.timestamp)
                .single()
                .map(|instant| instant.date_naive());
            if day.is_some_and(|day| day.cmp(&boundary) == side) {
                selected.insert(*id, item.clone());
            }
        }

        self.presenter
            .display_by_date(&group_by_date(&selected, &list_dates(&selected)));
        Ok(())
    }

    // ---- import/export ----

    /// Writes the active collection as JSON to exactly one path.
    pub fn export_items(&self, paths: &[String]) -> BookResult<()> {
        let path = Self::single_path(paths)?;
        let data = self.storage.get()?;

        let text = serde_json::to_string_pretty(&data).map_err(|source| {
            BookError::ExportFailed(StorageError::Format {
                path: path.clone(),
                source,
            })
        })?;
        std::fs::write(&path, text).map_err(|source| {
            BookError::ExportFailed(StorageError::Io {
                path: path.clone(),
                source,
            })
        })?;

        self.presenter.exported(&path);
        Ok(())
    }

    /// Replaces the active collection from a JSON file at exactly one path.
    pub fn import_items(&mut self, paths: &[String]) -> BookResult<()> {
        let path = Self::single_path(paths)?;

        let text = std::fs::read_to_string(&path).map_err(|source| {
            BookError::ImportFailed(StorageError::Io {
                path: path.clone(),
                source,
            })
        })?;
        let data: ItemMap = serde_json::from_str(&text).map_err(|source| {
            BookError::ImportFailed(StorageError::Format {
                path: path.clone(),
                source,
            })
        })?;

        self.storage.set(&data)?;
        self.presenter.imported(&path);
        Ok(())
    }

    fn single_path(paths: &[String]) -> BookResult<PathBuf> {
        match paths {
            [] => Err(BookError::MissingPath),
            [path] => Ok(Path::new(path).to_path_buf()),
            many => Err(BookError::TooManyPaths(many.len())),
        }
    }
}
