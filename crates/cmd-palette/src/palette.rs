//! The palette: effective item list, search state and item selection

use std::rc::Rc;

use crate::context::ExecutionContext;
use crate::error::{PaletteError, Result};
use crate::fuzzy::{MatchPositions, MAX_MATCHES};
use crate::registry::{Command, CommandRegistry};
use crate::search::{search, MatchBackend, SearchResult};

/// Tuning knobs for a palette instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteOptions {
    pub backend: MatchBackend,
    /// Maximum query length that can still be fully highlighted
    pub match_capacity: usize,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            backend: MatchBackend::default(),
            match_capacity: MAX_MATCHES,
        }
    }
}

/// What an item of the effective list stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A registered command (depth 0)
    Command,
    /// One choice of the running command's prompt
    Option,
}

/// How the row index was mapped onto the source list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Empty query: row `i` is source element `i`
    Direct,
    /// Active query: row `i` is search result `i`
    SearchResult,
}

/// A resolved row of the effective item list
///
/// Computed on demand and never cached: add/remove of commands, prompts and
/// query edits all change what a row index means.
#[derive(Debug, Clone)]
pub struct Item {
    pub text: String,
    /// Command the row belongs to (the running command for options)
    pub command: Rc<Command>,
    /// Registry index for commands, option ordinal for options
    pub id: usize,
    pub kind: ItemKind,
    pub index_kind: IndexKind,
    /// Matched byte offsets into `text`, empty in direct mode
    pub positions: MatchPositions,
}

/// Result of [`CommandPalette::select`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The command is waiting on a prompt, keep the palette up
    StillOpen,
    /// The command completed, the host should close the palette
    RequestClose,
}

/// Source list the current search results were computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchSource {
    depth: usize,
    registry_generation: u64,
}

/// Command palette engine
///
/// Owns the execution context, the query and the search results for one
/// palette. Rendering and input handling stay with the host, which reads
/// rows through [`item_count`](Self::item_count) / [`item`](Self::item) and
/// reports activations through [`select`](Self::select).
#[derive(Debug)]
pub struct CommandPalette {
    registry: CommandRegistry,
    ctx: ExecutionContext,
    options: PaletteOptions,
    query: String,
    results: Vec<SearchResult>,
    searched: Option<SearchSource>,
    focused: usize,
    focus_query_requested: bool,
    next_query: Option<String>,
    visible: bool,
}

impl CommandPalette {
    pub fn new(registry: CommandRegistry) -> Self {
        Self::with_options(registry, PaletteOptions::default())
    }

    pub fn with_options(registry: CommandRegistry, options: PaletteOptions) -> Self {
        Self {
            registry,
            ctx: ExecutionContext::new(),
            options,
            query: String::new(),
            results: Vec::new(),
            searched: None,
            focused: 0,
            focus_query_requested: false,
            next_query: None,
            visible: false,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    pub fn options(&self) -> PaletteOptions {
        self.options
    }

    /// Number of prompts the user is currently answering
    ///
    /// 0 while picking a command. If the picked command prompts, 1 while
    /// picking from that prompt, and so on.
    pub fn depth(&self) -> usize {
        self.ctx.depth()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Search results of the active query (empty without a query)
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Replace the query text and re-run the search
    ///
    /// Moves focus back to the first row. A query longer than the match
    /// capacity is refused and leaves the previous query in place.
    pub fn set_query(&mut self, query: &str) -> Result<()> {
        let results = self.run_search(query)?;
        self.query.clear();
        self.query.push_str(query);
        self.results = results;
        self.focused = 0;
        Ok(())
    }

    /// Seed the query for the next time the palette is shown
    pub fn set_next_query(&mut self, query: impl Into<String>) {
        self.next_query = Some(query.into());
    }

    /// Re-run the search if the source list changed since the last one
    ///
    /// The source changes when the depth changes or commands are added or
    /// removed. Hosts call this once per frame before reading items.
    pub fn refresh(&mut self) -> Result<()> {
        if self.query.is_empty() {
            self.searched = None;
            self.results.clear();
        } else if self.searched != Some(self.current_source()) {
            log::debug!("Search source changed, re-running query {:?}", self.query);
            let query = std::mem::take(&mut self.query);
            let outcome = self.run_search(&query);
            self.query = query;
            self.results = outcome?;
        }

        self.focused = self.focused.min(self.item_count().saturating_sub(1));
        Ok(())
    }

    /// Number of rows in the effective item list
    pub fn item_count(&self) -> usize {
        if !self.query.is_empty() {
            self.results.len()
        } else if self.ctx.depth() == 0 {
            self.registry.len()
        } else {
            self.ctx.options().len()
        }
    }

    /// Resolve row `index` of the effective item list
    pub fn item(&self, index: usize) -> Result<Item> {
        let count = self.item_count();
        let out_of_bounds = PaletteError::IndexOutOfBounds { index, count };
        if index >= count {
            return Err(out_of_bounds);
        }

        let (id, index_kind, positions) = if self.query.is_empty() {
            (index, IndexKind::Direct, MatchPositions::new())
        } else {
            let result = &self.results[index];
            (result.item_index, IndexKind::SearchResult, result.positions)
        };

        if self.ctx.depth() == 0 {
            let command = self.registry.get(id).ok_or(out_of_bounds)?;
            Ok(Item {
                text: command.name().to_string(),
                command,
                id,
                kind: ItemKind::Command,
                index_kind,
                positions,
            })
        } else {
            let command = self
                .ctx
                .command_handle()
                .cloned()
                .ok_or(PaletteError::NoActiveCommand)?;
            let text = self.ctx.options().get(id).ok_or(out_of_bounds)?.clone();
            Ok(Item {
                text,
                command,
                id,
                kind: ItemKind::Option,
                index_kind,
                positions,
            })
        }
    }

    /// All rows of the effective item list, in display order
    pub fn items(&self) -> Result<Vec<Item>> {
        (0..self.item_count()).map(|i| self.item(i)).collect()
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn set_focused(&mut self, index: usize) {
        self.focused = index.min(self.item_count().saturating_sub(1));
    }

    pub fn focus_next(&mut self) {
        self.set_focused(self.focused.saturating_add(1));
    }

    pub fn focus_previous(&mut self) {
        self.set_focused(self.focused.saturating_sub(1));
    }

    /// Activate row `index` of the effective item list
    ///
    /// Runs the callbacks of the resolved command synchronously:
    /// - depth 0: initiate the command and call its initiate callback (a
    ///   command without one completes on the spot)
    /// - depth > 0: call the select-option callback with the option ordinal
    ///
    /// When the command ended up finished its terminate callback runs and
    /// [`SelectOutcome::RequestClose`] is returned. If a callback fails, the
    /// command is abandoned without its terminate callback and the error is
    /// returned.
    pub fn select(&mut self, index: usize) -> Result<SelectOutcome> {
        self.refresh()?;
        let item = match self.item(index) {
            Ok(item) => item,
            Err(err) => {
                log::warn!("Rejected selection: {}", err);
                return Err(err);
            }
        };
        let command = item.command.clone();

        let callback_result = if self.ctx.depth() == 0 {
            self.initiate(&command)
        } else {
            self.select_option(&command, item)
        };

        if let Err(err) = callback_result {
            log::warn!("Command '{}' failed: {}", command.name(), err);
            self.ctx.abandon();
            self.reset_search();
            return Err(err);
        }

        if self.ctx.is_initiated() {
            return Ok(SelectOutcome::StillOpen);
        }

        if let Some(on_terminate) = command.terminate_callback() {
            on_terminate();
        }
        log::debug!("Command '{}' completed, closing palette", command.name());
        self.visible = false;
        Ok(SelectOutcome::RequestClose)
    }

    /// Activate the focused row
    pub fn select_focused(&mut self) -> Result<SelectOutcome> {
        self.select(self.focused)
    }

    fn initiate(&mut self, command: &Rc<Command>) -> Result<()> {
        if let Some(active) = self.ctx.current_command() {
            return Err(PaletteError::AlreadyInitiated {
                active: active.name().to_string(),
            });
        }

        self.ctx.initiate(command.clone());
        match command.initiate_callback() {
            Some(on_initiate) => {
                on_initiate(&mut self.ctx)?;
                self.finish_unless_prompted(0)?;
                self.focus_query_requested = true;
                // Only a prompt changes the list; a finished command keeps the search
                if self.ctx.is_initiated() {
                    self.reset_search();
                }
                Ok(())
            }
            None => self.ctx.finish(),
        }
    }

    fn select_option(&mut self, command: &Rc<Command>, item: Item) -> Result<()> {
        if !self.ctx.is_initiated() {
            return Err(PaletteError::NoActiveCommand);
        }
        let on_select_option = command
            .select_option_callback()
            .ok_or_else(|| PaletteError::MissingOptionCallback(command.name().to_string()))?;

        let depth = self.ctx.depth();
        self.ctx.record_choice(item.text);
        let result = on_select_option(&mut self.ctx, item.id)
            .and_then(|()| self.finish_unless_prompted(depth));

        // The option list is gone either way: a new prompt or a finished command
        self.focus_query_requested = true;
        self.reset_search();
        result
    }

    /// A callback that neither prompted again nor finished completes the command
    fn finish_unless_prompted(&mut self, depth_before: usize) -> Result<()> {
        if self.ctx.is_initiated() && self.ctx.depth() <= depth_before {
            log::debug!(
                "Command '{}' returned without prompting, finishing it",
                self.ctx.current_command().map(Command::name).unwrap_or_default()
            );
            self.ctx.finish()?;
        }
        Ok(())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the palette without touching the running command
    ///
    /// Showing a hidden palette requests query focus and applies a query
    /// seeded with [`set_next_query`](Self::set_next_query).
    pub fn set_visible(&mut self, visible: bool) -> Result<()> {
        if !self.visible && visible {
            self.focus_query_requested = true;
            if let Some(query) = self.next_query.take() {
                self.set_query(&query)?;
            }
        }
        self.visible = visible;
        Ok(())
    }

    /// Dismiss the palette and abandon the running command
    ///
    /// Unlike a command finishing by itself this does not call the terminate
    /// callback: a dismissal is not a completion.
    pub fn close(&mut self) {
        if let Some(command) = self.ctx.current_command() {
            log::debug!("Palette closed while '{}' was prompting", command.name());
        }
        self.ctx.abandon();
        self.reset_search();
        self.visible = false;
    }

    /// Returns true once after something asked for query-box focus
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_query_requested)
    }

    fn reset_search(&mut self) {
        self.query.clear();
        self.results.clear();
        self.searched = None;
        self.focused = 0;
    }

    fn current_source(&self) -> SearchSource {
        SearchSource {
            depth: self.ctx.depth(),
            registry_generation: self.registry.generation(),
        }
    }

    fn run_search(&mut self, query: &str) -> Result<Vec<SearchResult>> {
        let PaletteOptions {
            backend,
            match_capacity,
        } = self.options;

        let results = if self.ctx.depth() == 0 {
            let commands = self.registry.commands();
            search(
                query,
                commands.iter().map(|c| c.name()),
                backend,
                match_capacity,
            )?
        } else {
            search(
                query,
                self.ctx.options().iter().map(String::as_str),
                backend,
                match_capacity,
            )?
        };

        self.searched = (!query.is_empty()).then(|| self.current_source());
        Ok(results)
    }
}
