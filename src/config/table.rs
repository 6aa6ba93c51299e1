// src/config/table.rs

//! Named profile lookup.

use super::{VehicleConfig, BUILTIN_PROFILES};
use crate::ControlError;

/// A configuration registered under a name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedProfile<'a, T> {
    /// Lookup key, e.g. `"aggressive"`.
    pub name: &'a str,
    /// The configuration returned for this key.
    pub config: VehicleConfig<T>,
}

/// A borrowed table of named profiles.
///
/// New profiles are added as data; no controller code inspects names.
#[derive(Debug, Clone, Copy)]
pub struct ProfileTable<'a, T> {
    entries: &'a [NamedProfile<'a, T>],
}

impl<'a, T: Copy> ProfileTable<'a, T> {
    /// Wraps a slice of named profiles.
    pub const fn new(entries: &'a [NamedProfile<'a, T>]) -> Self {
        Self { entries }
    }

    /// Returns the configuration registered under `name`.
    pub fn load(&self, name: &str) -> Result<VehicleConfig<T>, ControlError> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.config)
            .ok_or(ControlError::UnknownProfile)
    }

    /// Names of every registered profile.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().map(|entry| entry.name)
    }
}

/// Table over the built-in presets.
pub fn builtin_table() -> ProfileTable<'static, f32> {
    ProfileTable::new(&BUILTIN_PROFILES)
}

/// Loads a built-in preset by name (`"aggressive"` or `"smooth"`).
pub fn load_profile(name: &str) -> Result<VehicleConfig<f32>, ControlError> {
    builtin_table().load(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AGGRESSIVE, SMOOTH};

    #[test]
    fn test_load_builtin_profiles() {
        assert_eq!(load_profile("aggressive"), Ok(AGGRESSIVE));
        assert_eq!(load_profile("smooth"), Ok(SMOOTH));
    }

    #[test]
    fn test_unknown_profile() {
        assert_eq!(load_profile("acrobatic"), Err(ControlError::UnknownProfile));
        assert_eq!(load_profile("Aggressive"), Err(ControlError::UnknownProfile));
        assert_eq!(load_profile(""), Err(ControlError::UnknownProfile));
    }

    #[test]
    fn test_custom_table_adds_profiles_as_data() {
        let mut gentle = SMOOTH;
        gentle.profile.roll_rate.kp = 150.0;
        let entries = [
            NamedProfile {
                name: "gentle",
                config: gentle,
            },
            NamedProfile {
                name: "aggressive",
                config: AGGRESSIVE,
            },
        ];
        let table = ProfileTable::new(&entries);

        assert_eq!(table.load("gentle").map(|c| c.profile.roll_rate.kp), Ok(150.0));
        assert_eq!(table.load("aggressive"), Ok(AGGRESSIVE));
        assert_eq!(table.load("smooth"), Err(ControlError::UnknownProfile));
    }

    #[test]
    fn test_builtin_names() {
        let mut names = builtin_table().names();
        assert_eq!(names.next(), Some("aggressive"));
        assert_eq!(names.next(), Some("smooth"));
        assert_eq!(names.next(), None);
    }
}
