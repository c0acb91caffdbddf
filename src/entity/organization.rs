/// Organization identity printed on every receipt and statement.
#[derive(Debug, Clone)]
pub struct Organization {
    /// Legal name of the nonprofit
    pub name: String,

    /// Employer identification number
    pub ein: String,

    /// Street line of the registered address
    pub street: String,

    /// City, state and zip on a single line
    pub city_line: String,

    /// Logo location: http(s) URL or a local file path (PNG)
    pub logo_source: Option<String>,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            name: "Buffalo United for Peace Inc".to_string(),
            ein: "82-5086497".to_string(),
            street: "1901 N. Market Street".to_string(),
            city_line: "Wilmington, DE 19802".to_string(),
            logo_source: None,
        }
    }
}

impl Organization {
    /// Builds the organization profile from environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        Self {
            name: env::var("ORG_NAME").unwrap_or(defaults.name),
            ein: env::var("ORG_EIN").unwrap_or(defaults.ein),
            street: env::var("ORG_STREET").unwrap_or(defaults.street),
            city_line: env::var("ORG_CITY_LINE").unwrap_or(defaults.city_line),
            logo_source: env::var("ORG_LOGO").ok(),
        }
    }
}
