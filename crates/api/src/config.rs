use std::env;

const DEFAULT_MEAL_OPTIONS: &str = "Beef,Chicken,Fish,Vegetarian,Kids Meal";

/// Event-specific settings read from the environment.
#[derive(Clone, Debug)]
pub struct EventConfig {
    /// Meals guests may pick when they RSVP. Matching is case-insensitive.
    pub meal_options: Vec<String>,
}

impl EventConfig {
    pub fn from_env() -> Self {
        let raw = env::var("MEAL_OPTIONS").unwrap_or_else(|_| DEFAULT_MEAL_OPTIONS.to_string());
        let meal_options = parse_meal_options(&raw);

        if meal_options.is_empty() {
            tracing::warn!("MEAL_OPTIONS is empty, falling back to defaults");
            return Self::default();
        }

        Self { meal_options }
    }

    /// The configured spelling of `meal`, if it is one of the options.
    pub fn canonical_meal(&self, meal: &str) -> Option<&str> {
        let wanted = meal.trim();
        self.meal_options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(wanted))
            .map(String::as_str)
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            meal_options: parse_meal_options(DEFAULT_MEAL_OPTIONS),
        }
    }
}

/// Split a comma separated list, trimming entries and dropping blanks and duplicates.
pub fn parse_meal_options(raw: &str) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for option in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        if !options.iter().any(|o| o.eq_ignore_ascii_case(option)) {
            options.push(option.to_string());
        }
    }
    options
}
