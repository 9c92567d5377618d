//! Header aliasing for uploaded tables
//!
//! Each canonical field has an ordered alias list. Headers and aliases are
//! compared by [`fold_key`], so `Área`, `AREA` and ` area ` all map to the
//! area column. When several columns map to one field, the first alias (in
//! alias order) with a non-empty cell wins.

use shared::util::fold_key;

/// Canonical import field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Document,
    Email,
    Company,
    Area,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::FirstName,
        Field::LastName,
        Field::Document,
        Field::Email,
        Field::Company,
        Field::Area,
    ];

    /// Accepted header spellings, in priority order
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::FirstName => &["nombre", "name", "first name", "first_name"],
            Field::LastName => &["apellido", "surname", "last name", "last_name"],
            Field::Document => &[
                "rut",
                "r.u.t",
                "rut/documento",
                "documento",
                "dni",
                "pasaporte",
                "document",
                "passport",
            ],
            Field::Email => &[
                "correo",
                "email",
                "correo electronico",
                "correo electrónico",
                "e-mail",
            ],
            Field::Company => &["empresa", "empresa/medio", "medio", "company"],
            Field::Area => &["area", "área"],
        }
    }

    const fn slot(&self) -> usize {
        match self {
            Field::FirstName => 0,
            Field::LastName => 1,
            Field::Document => 2,
            Field::Email => 3,
            Field::Company => 4,
            Field::Area => 5,
        }
    }
}

/// One uploaded row reduced to the canonical fields (trimmed, possibly empty)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub first_name: String,
    pub last_name: String,
    pub document: String,
    pub email: String,
    pub company: String,
    pub area: String,
}

/// Column indices per canonical field, ordered by alias priority
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: [Vec<usize>; 6],
}

impl ColumnMap {
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let keys: Vec<String> = headers.iter().map(|h| fold_key(h.as_ref())).collect();
        let mut map = ColumnMap::default();

        for field in Field::ALL {
            let columns = &mut map.columns[field.slot()];
            for alias in field.aliases() {
                let alias = fold_key(alias);
                for (idx, key) in keys.iter().enumerate() {
                    if *key == alias && !columns.contains(&idx) {
                        columns.push(idx);
                    }
                }
            }
        }
        map
    }

    pub fn is_mapped(&self, field: Field) -> bool {
        !self.columns[field.slot()].is_empty()
    }

    /// First non-empty cell among the field's columns, or ""
    pub fn value<'a, S: AsRef<str>>(&self, field: Field, row: &'a [S]) -> &'a str {
        self.columns[field.slot()]
            .iter()
            .filter_map(|&idx| row.get(idx))
            .map(|cell| cell.as_ref().trim())
            .find(|cell| !cell.is_empty())
            .unwrap_or("")
    }

    pub fn record<S: AsRef<str>>(&self, row: &[S]) -> RawRecord {
        RawRecord {
            first_name: self.value(Field::FirstName, row).to_string(),
            last_name: self.value(Field::LastName, row).to_string(),
            document: self.value(Field::Document, row).to_string(),
            email: self.value(Field::Email, row).to_string(),
            company: self.value(Field::Company, row).to_string(),
            area: self.value(Field::Area, row).to_string(),
        }
    }
}
