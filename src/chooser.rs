use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// The key for the default value.
pub const DEFAULT: &str = "default";
/// The key for the selected option.
pub const SELECTED: &str = "selected";
/// The key for the active option.
pub const ACTIVE: &str = "active";
/// The key for the option array.
pub const OPTIONS: &str = "options";
/// The key for the instance number.
pub const INSTANCE: &str = ".instance";

type Listener<V> = Box<dyn Fn(Option<V>) + Send>;

/// Presents a selection of options to the dashboard, like picking which auto
/// to run. Options are added by name, the dashboard writes a selection back,
/// and `get_selected` hands the robot loop the matching value.
///
/// Selection writes arrive on the dashboard transport's thread while the
/// robot loop reads, so everything mutable sits behind one mutex per
/// chooser.
pub struct SendableChooser<V> {
    instance: usize,
    state: Mutex<ChooserState<V>>,
}

struct ChooserState<V> {
    options: Vec<(String, V)>,
    default_choice: String,
    selected: Option<String>,
    listeners: Vec<Listener<V>>,
}

/// One chooser's table as the dashboard transport publishes it. Field
/// meanings line up with the entry keys above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserSnapshot {
    pub instance: usize,
    pub default_choice: String,
    pub options: Vec<String>,
    pub active: String,
}

impl<V: Clone> SendableChooser<V> {
    pub fn new(instance: usize) -> SendableChooser<V> {
        SendableChooser {
            instance,
            state: Mutex::new(ChooserState {
                options: Vec::new(),
                default_choice: String::new(),
                selected: None,
                listeners: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ChooserState<V>> {
        self.state.lock().unwrap()
    }

    /// Adds the given value to the list of options, shown on the dashboard
    /// under `name`. Re-adding a name replaces its value and keeps its spot.
    pub fn add_option(&self, name: &str, value: V) {
        self.state().put(name, value);
    }

    /// Adds the given value to the list of options and marks it as the
    /// default, used whenever nothing has been explicitly selected.
    ///
    /// Panics if `name` is empty; there is no way to select back into an
    /// unnamed default.
    pub fn set_default_option(&self, name: &str, value: V) {
        assert!(
            !name.is_empty(),
            "set_default_option requires a non-empty name"
        );

        let mut state = self.state();
        state.default_choice = name.to_owned();
        state.put(name, value);
    }

    /// Registers a callback run whenever the active option changes.
    /// Callbacks run in registration order on whatever thread delivered the
    /// update, and must not call back into this chooser - the instance lock
    /// is still held.
    pub fn add_listener(&self, listener: impl Fn(Option<V>) + Send + 'static) {
        self.state().listeners.push(Box::new(listener));
    }

    /// Returns the selected option. If there is none selected, it returns
    /// the default. If there is no default either, `None`.
    pub fn get_selected(&self) -> Option<V> {
        let state = self.state();
        match state.selected {
            Some(ref name) => state.get(name),
            None => state.get(&state.default_choice),
        }
    }

    /// Write hook for the dashboard transport: a remote client wrote `name`
    /// to the `selected` entry. Updates the active option and notifies every
    /// listener with whatever value `name` resolves to.
    pub fn set_selected(&self, name: &str) {
        let mut state = self.state();
        state.selected = Some(name.to_owned());

        let value = state.get(name);
        for listener in &state.listeners {
            listener(value.clone());
        }
    }

    /// The table the dashboard transport publishes for this chooser.
    pub fn snapshot(&self) -> ChooserSnapshot {
        let state = self.state();
        ChooserSnapshot {
            instance: self.instance,
            default_choice: state.default_choice.clone(),
            options: state.options.iter().map(|(name, _)| name.clone()).collect(),
            active: state
                .selected
                .clone()
                .unwrap_or_else(|| state.default_choice.clone()),
        }
    }
}

impl<V: Clone> ChooserState<V> {
    fn put(&mut self, name: &str, value: V) {
        match self.options.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.options.push((name.to_owned(), value)),
        }
    }

    fn get(&self, name: &str) -> Option<V> {
        self.options
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone())
    }
}

/// Hands out choosers with unique dashboard instance numbers. The robot
/// container owns one of these; instance numbers are per-factory rather
/// than hidden process-wide state.
#[derive(Default)]
pub struct ChooserFactory {
    instances: AtomicUsize,
}

impl ChooserFactory {
    pub fn new() -> ChooserFactory {
        ChooserFactory {
            instances: AtomicUsize::new(0),
        }
    }

    pub fn create<V: Clone>(&self) -> SendableChooser<V> {
        SendableChooser::new(self.instances.fetch_add(1, Ordering::Relaxed))
    }
}
