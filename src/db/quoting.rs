use std::fmt;

/// Optionally schema-qualified table, view or synonym name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn new(schema: &str, name: &str) -> Self {
        Self {
            schema: Some(schema.to_string()),
            name: name.to_string(),
        }
    }

    pub fn unqualified(name: &str) -> Self {
        Self {
            schema: None,
            name: name.to_string(),
        }
    }

    /// Splits `OWNER.TABLE` on the first dot. Surrounding double quotes on
    /// either part are removed.
    pub fn parse(qualified: &str) -> Self {
        let trimmed = qualified.trim();
        match trimmed.split_once('.') {
            Some((schema, name)) if !schema.is_empty() => Self {
                schema: Some(unquote(schema)),
                name: unquote(name),
            },
            _ => Self::unqualified(&unquote(trimmed)),
        }
    }

    /// Schema to use in catalog filters; falls back to the connected user.
    pub fn schema_or<'a>(&'a self, user: &'a str) -> &'a str {
        self.schema.as_deref().unwrap_or(user)
    }

    pub fn quoted(&self) -> String {
        quote_qualified(self)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => f.write_str(&self.name),
        }
    }
}

fn unquote(part: &str) -> String {
    let part = part.trim();
    if part.len() >= 2 && part.starts_with('"') && part.ends_with('"') {
        part[1..part.len() - 1].replace("\"\"", "\"")
    } else {
        part.to_string()
    }
}

pub fn quote_id(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// `"S"."T"`, or `"T"` without a schema.
pub fn quote_qualified(table: &TableRef) -> String {
    match &table.schema {
        Some(schema) => format!("{}.{}", quote_id(schema), quote_id(&table.name)),
        None => quote_id(&table.name),
    }
}

pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_id_doubles_quotes() {
        assert_eq!(quote_id("GEOM"), "\"GEOM\"");
        assert_eq!(quote_id("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_quote_qualified() {
        assert_eq!(quote_qualified(&TableRef::new("GIS", "ROADS")), "\"GIS\".\"ROADS\"");
        assert_eq!(quote_qualified(&TableRef::unqualified("a\"b")), "\"a\"\"b\"");
    }

    #[test]
    fn test_quote_string_doubles_apostrophes() {
        assert_eq!(quote_string("O'Neil"), "'O''Neil'");
    }

    #[test]
    fn test_parse_qualified_name() {
        let table = TableRef::parse("GIS.\"Roads\"");
        assert_eq!(table.schema.as_deref(), Some("GIS"));
        assert_eq!(table.name, "Roads");
        assert_eq!(table.quoted(), "\"GIS\".\"Roads\"");
    }

    #[test]
    fn test_parse_unqualified_name() {
        let table = TableRef::parse("PARCELS");
        assert_eq!(table.schema, None);
        assert_eq!(table.schema_or("SCOTT"), "SCOTT");
        assert_eq!(table.quoted(), "\"PARCELS\"");
    }
}
