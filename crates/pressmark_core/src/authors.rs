use std::collections::HashMap;

/// Author login → display name, built once from the export header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorTable {
    by_login: HashMap<String, String>,
}

impl AuthorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logins and display names are trimmed; a later record for the same login wins.
    pub fn insert(&mut self, login: &str, display_name: &str) {
        self.by_login
            .insert(login.trim().to_string(), display_name.trim().to_string());
    }

    pub fn display_name(&self, login: &str) -> Option<&str> {
        self.by_login.get(login.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_login.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_login.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AuthorTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut table = AuthorTable::new();
        for (login, name) in iter {
            table.insert(login, name);
        }
        table
    }
}
