//! Map type
use super::*;
use std::collections::HashMap;

/// Map is a map type where the keys are command names and the values are command handlers.
///
/// Names include the escape character, e.g. `\frac`.
/// Lookups are by exact name: `\fracx` does not match `\frac`.
///
/// The map is populated before parsing.
/// The parser only borrows it immutably, so it cannot change while a parse is running.
/// Handlers are plain function pointers and so the map is [Send] and [Sync].
#[derive(Clone, Debug)]
pub struct Map {
    commands: HashMap<String, BuiltIn>,
}

impl Default for Map {
    /// Returns a map containing all of the built-in commands.
    fn default() -> Self {
        let mut map = Map::empty();
        for (name, built_in) in built_in_commands() {
            map.insert_built_in(name, built_in);
        }
        map
    }
}

/// Returns the built-in commands of Texmath.
pub fn built_in_commands() -> Vec<(&'static str, BuiltIn)> {
    vec![
        (r"\binom", get_binom()),
        (r"\dfrac", get_dfrac()),
        (r"\frac", get_frac()),
        (r"\sqrt", get_sqrt()),
        (r"\text", get_text()),
        (r"\tfrac", get_tfrac()),
    ]
}

impl Map {
    /// Returns a map with no commands.
    ///
    /// With an empty map every command is parsed as a symbol.
    pub fn empty() -> Map {
        Map {
            commands: Default::default(),
        }
    }

    /// Registers a handler for a command, returning the handler previously registered.
    ///
    /// The last registration wins.
    pub fn register(&mut self, name: &str, handler: Handler) -> Option<Handler> {
        self.insert_built_in(name, BuiltIn::new(handler))
            .map(|built_in| built_in.handler())
    }

    /// Registers a built-in command, returning the command previously registered.
    pub fn insert_built_in(&mut self, name: &str, built_in: BuiltIn) -> Option<BuiltIn> {
        let previous = self.commands.insert(name.to_string(), built_in);
        if previous.is_some() {
            log::debug!("overriding the handler for `{name}`");
        }
        previous
    }

    /// Removes a command, returning its handler.
    pub fn unregister(&mut self, name: &str) -> Option<Handler> {
        self.commands.remove(name).map(|built_in| built_in.handler())
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<Handler> {
        self.commands.get(name).map(BuiltIn::handler)
    }

    pub fn get_built_in(&self, name: &str) -> Option<&BuiltIn> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Returns the names of all registered commands, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
