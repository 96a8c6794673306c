use model::Side;

/// The configuration keys that describe one side of the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideKeys {
    pub driver: String,
    pub url: String,
    pub username: String,
    pub password: String,
    pub query: String,
}

impl SideKeys {
    pub fn for_side(side: Side) -> Self {
        let prefix = side.as_str();
        Self {
            driver: format!("{prefix}.db.driver"),
            url: format!("{prefix}.db.url"),
            username: format!("{prefix}.db.username"),
            password: format!("{prefix}.db.password"),
            query: format!("{prefix}.db.query"),
        }
    }

    /// Keys that must be set before a connection can be opened.
    pub fn connection(&self) -> [&str; 4] {
        [&self.driver, &self.url, &self.username, &self.password]
    }
}
