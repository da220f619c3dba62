use super::{EditorView, ViewError};
use crate::commands::{can_set_mark, is_mark_active, Command, CommandError, MarkTypeRef, ToggleMark};
use crate::model::Schema;
use crate::state::EditorState;
use log::trace;
use std::fmt;

type StatusFn<S> = Box<dyn Fn(&EditorState<S>) -> Result<bool, CommandError>>;

/// A button in a menu bar.
///
/// The status (`active` and `enabled`) is computed from the state by [`MenuItem::update`],
/// which should be called after every dispatch.
pub struct MenuItem<S: Schema> {
    label: String,
    command: Box<dyn Command<S>>,
    is_active: Option<StatusFn<S>>,
    is_enabled: Option<StatusFn<S>>,
    active: bool,
    enabled: bool,
}

impl<S: Schema> fmt::Debug for MenuItem<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("active", &self.active)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl<S: Schema> MenuItem<S> {
    /// Create a menu item that runs the command when clicked
    pub fn new<C>(label: impl Into<String>, command: C) -> Self
    where
        C: Command<S> + 'static,
    {
        Self {
            label: label.into(),
            command: Box::new(command),
            is_active: None,
            is_enabled: None,
            active: false,
            enabled: true,
        }
    }

    /// A button that toggles a mark. It is active when the mark is active on the selection
    /// and enabled when the mark can be set.
    pub fn mark<M>(label: impl Into<String>, mark_type: M) -> Self
    where
        M: MarkTypeRef<S> + Clone + 'static,
    {
        let active_type = mark_type.clone();
        let enabled_type = mark_type.clone();
        Self::new(label, ToggleMark::new(mark_type))
            .with_active(move |state| is_mark_active(state, &active_type))
            .with_enabled(move |state| can_set_mark(state, &enabled_type))
    }

    /// Compute the `active` status with the given function
    pub fn with_active<F>(mut self, f: F) -> Self
    where
        F: Fn(&EditorState<S>) -> Result<bool, CommandError> + 'static,
    {
        self.is_active = Some(Box::new(f));
        self
    }

    /// Compute the `enabled` status with the given function
    pub fn with_enabled<F>(mut self, f: F) -> Self
    where
        F: Fn(&EditorState<S>) -> Result<bool, CommandError> + 'static,
    {
        self.is_enabled = Some(Box::new(f));
        self
    }

    /// The label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the button is highlighted
    pub fn active(&self) -> bool {
        self.active
    }

    /// Whether the button can be clicked
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Re-query the status from the state
    pub fn update(&mut self, state: &EditorState<S>) -> Result<(), CommandError> {
        if let Some(is_active) = &self.is_active {
            self.active = is_active(state)?;
        }
        if let Some(is_enabled) = &self.is_enabled {
            self.enabled = is_enabled(state)?;
        }
        trace!(
            "menu item {:?}: active={} enabled={}",
            self.label,
            self.active,
            self.enabled
        );
        Ok(())
    }

    /// Run the command of this item in the view
    pub fn click(&mut self, view: &mut EditorView<S>) -> Result<(), ViewError> {
        view.execute(&*self.command)?;
        self.update(view.state())?;
        Ok(())
    }
}

/// A row of menu items
pub struct MenuBar<S: Schema> {
    items: Vec<MenuItem<S>>,
}

impl<S: Schema> fmt::Debug for MenuBar<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<S: Schema> Default for MenuBar<S> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<S: Schema> MenuBar<S> {
    /// Create an empty menu bar
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item at the end
    pub fn push(&mut self, item: MenuItem<S>) -> &mut Self {
        self.items.push(item);
        self
    }

    /// The items of this menu bar
    pub fn items(&self) -> &[MenuItem<S>] {
        &self.items
    }

    /// Re-query the status of every item
    pub fn update(&mut self, state: &EditorState<S>) -> Result<(), CommandError> {
        for item in &mut self.items {
            item.update(state)?;
        }
        Ok(())
    }

    /// Click the item at `index` and update all items afterwards. Returns `false` if there
    /// is no such item, or if it is disabled.
    pub fn click(&mut self, index: usize, view: &mut EditorView<S>) -> Result<bool, ViewError> {
        match self.items.get(index) {
            Some(item) if item.enabled => {
                view.execute(&*item.command)?;
                self.update(view.state())?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
