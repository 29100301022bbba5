use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub(crate) struct ThemeState {
    pub dark: bool,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum ThemeAction {
    Toggle,
}

impl ThemeState {
    pub fn reduce(&mut self, action: ThemeAction) {
        match action {
            ThemeAction::Toggle => self.dark = !self.dark,
        }
    }

    /// Class for the app root; Tailwind's `dark:` variants key off it.
    pub fn root_class(&self) -> &'static str {
        if self.dark {
            "dark"
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_value() {
        for start in [false, true] {
            let mut t = ThemeState { dark: start };
            t.reduce(ThemeAction::Toggle);
            assert_eq!(t.dark, !start);
            t.reduce(ThemeAction::Toggle);
            assert_eq!(t.dark, start);
        }
    }

    #[test]
    fn test_persisted_as_bare_bool() {
        let t = ThemeState { dark: true };
        assert_eq!(serde_json::to_string(&t).expect("serialize"), "true");
        let back: ThemeState = serde_json::from_str("false").expect("deserialize");
        assert!(!back.dark);
    }
}
