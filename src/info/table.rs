use crate::db::models::{
    SchemaPrivileges, TableConstraint, TableEntry, TableField, TableIndex, TablePrivileges,
    TableTrigger,
};
use crate::db::OracleConnector;
use crate::error::Result;

use super::html::{markup, HtmlElem, HtmlSection, HtmlTable, HtmlTableCol};

/// Tables estimated below this many rows are counted when the info page
/// is built.
const AUTO_COUNT_THRESHOLD: i64 = 100;

/// Title of the spatial section.
pub const SPATIAL_SECTION_TITLE: &str = "Oracle";

/// Everything the table page shows, read once from the connector.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSnapshot {
    pub entry: TableEntry,
    pub row_count: Option<i64>,
    pub schema_privileges: SchemaPrivileges,
    pub privileges: TablePrivileges,
    pub fields: Vec<TableField>,
    pub constraints: Vec<TableConstraint>,
    pub indexes: Vec<TableIndex>,
    pub triggers: Vec<TableTrigger>,
}

impl TableSnapshot {
    pub fn collect(connector: &OracleConnector, entry: &TableEntry) -> Result<Self> {
        let table = entry.table_ref();
        let row_count = if entry.estimated_row_count < AUTO_COUNT_THRESHOLD {
            connector.table_row_count(&table).ok()
        } else {
            None
        };
        let constraints = connector.table_constraints(&table)?;
        let mut fields = connector.table_fields(&table)?;
        TableField::mark_primary_keys(&mut fields, &constraints);
        Ok(Self {
            entry: entry.clone(),
            row_count,
            schema_privileges: connector.schema_privileges(Some(&entry.schema)),
            privileges: connector.table_privileges(&table)?,
            fields,
            constraints,
            indexes: connector.table_indexes(&table)?,
            triggers: connector.table_triggers(&table)?,
        })
    }

    pub fn has_primary_key(&self) -> bool {
        self.fields.iter().any(|f| f.primary_key)
    }
}

pub fn general_info(table: &TableSnapshot) -> Vec<HtmlElem> {
    let entry = &table.entry;
    let mut rows: Vec<(&str, HtmlTableCol)> = vec![
        (
            "Relation type:",
            if entry.is_view { "View" } else { "Table" }.into(),
        ),
        ("Owner:", entry.owner.as_str().into()),
    ];
    if let Some(comment) = &entry.comment {
        rows.push(("Comment:", comment.as_str().into()));
    }
    rows.push(("Rows (estimation):", entry.estimated_row_count.into()));

    let privileges = &table.privileges;
    if !table.schema_privileges.usage {
        rows.push((
            "Privileges:",
            markup("<warning> This user doesn't have usage privileges for this schema!").into(),
        ));
    } else {
        if privileges.select {
            let counted: HtmlTableCol = match table.row_count {
                Some(count) => count.into(),
                None => markup("Unknown (<a href=\"action:rows/recount\">find out</a>)").into(),
            };
            rows.push(("Rows (counted):", counted));
        }
        let names = privileges.names();
        let priv_string: HtmlTableCol = if names.is_empty() {
            markup("<warning> This user has no privileges!").into()
        } else {
            names.join(", ").into()
        };
        rows.push(("Privileges:", priv_string));
    }

    let mut ret = vec![HtmlElem::from(HtmlTable::key_values(rows))];

    if table.schema_privileges.usage && privileges.is_read_only() {
        ret.push(HtmlElem::warning("This user has read-only privileges."));
    }
    if !entry.is_view && !table.has_primary_key() {
        ret.push(HtmlElem::warning("No primary key defined for this table!"));
    }
    ret
}

pub fn fields_details(table: &TableSnapshot) -> HtmlTable {
    let mut tbl = HtmlTable::with_header(&["#", "Name", "Type", "Length", "Null", "Default", "Comment"]);
    for field in &table.fields {
        let length = field
            .char_max_len
            .filter(|len| *len != -1)
            .map(|len| len.to_string())
            .unwrap_or_default();
        let mut name = HtmlTableCol::new(field.name.as_str());
        if field.primary_key {
            name = name.with_class("underline");
        }
        tbl.push_row(vec![
            field.num.into(),
            name,
            field.type_to_string().into(),
            length.into(),
            if field.not_null { "N" } else { "Y" }.into(),
            field.default_to_string().into(),
            field.comment.clone().unwrap_or_default().into(),
        ]);
    }
    tbl
}

pub fn constraints_details(table: &TableSnapshot) -> Option<HtmlTable> {
    if table.constraints.is_empty() {
        return None;
    }
    let mut tbl = HtmlTable::with_header(&["Name", "Type", "Column(s)"]);
    for con in &table.constraints {
        tbl.push_row(vec![
            con.name.as_str().into(),
            con.constraint_type.display_name().into(),
            con.column.clone().unwrap_or_default().into(),
        ]);
    }
    Some(tbl)
}

pub fn indexes_details(table: &TableSnapshot) -> Option<HtmlTable> {
    if table.indexes.is_empty() {
        return None;
    }
    let mut tbl = HtmlTable::with_header(&["Name", "Column(s)"]);
    for idx in &table.indexes {
        tbl.push_row(vec![idx.name.as_str().into(), idx.column.as_str().into()]);
    }
    Some(tbl)
}

fn trigger_action_link(trigger: &str, action: &str) -> String {
    format!(
        "<a href=\"action:trigger/{}/{}\">{}</a>",
        super::html::escape(trigger),
        action,
        action
    )
}

pub fn triggers_details(table: &TableSnapshot) -> Option<Vec<HtmlElem>> {
    if table.triggers.is_empty() {
        return None;
    }
    let mut tbl = HtmlTable::with_header(&["Name", "Event", "Type", "Enabled"]);
    for trigger in &table.triggers {
        let name = format!(
            "{} ({})",
            super::html::escape(&trigger.name),
            trigger_action_link(&trigger.name, "delete")
        );
        let (enabled, action) = if trigger.enabled {
            ("Yes", "disable")
        } else {
            ("No", "enable")
        };
        let enabled = format!("{} ({})", enabled, trigger_action_link(&trigger.name, action));
        tbl.push_row(vec![
            markup(name).into(),
            trigger.event.as_str().into(),
            trigger.trigger_type.as_str().into(),
            markup(enabled).into(),
        ]);
    }
    Some(vec![
        tbl.into(),
        HtmlElem::paragraph(markup(
            "<a href=\"action:triggers/enable\">Enable all triggers</a> / \
             <a href=\"action:triggers/disable\">Disable all triggers</a>",
        )),
    ])
}

/// Full table page. `spatial` is the vector section content; an empty one
/// is replaced by a "not a spatial table" warning.
pub fn table_info(table: &TableSnapshot, spatial: Vec<HtmlElem>) -> Vec<HtmlElem> {
    let spatial = if spatial.is_empty() {
        vec![HtmlElem::warning("This is not a spatial table.")]
    } else {
        spatial
    };
    let mut ret: Vec<HtmlElem> = vec![
        HtmlSection::new("General info", general_info(table)).into(),
        HtmlSection::new(SPATIAL_SECTION_TITLE, spatial).into(),
        HtmlSection::new("Fields", vec![fields_details(table).into()]).into(),
    ];
    if let Some(constraints) = constraints_details(table) {
        ret.push(HtmlSection::new("Constraints", vec![constraints.into()]).into());
    }
    if let Some(indexes) = indexes_details(table) {
        ret.push(HtmlSection::new("Indexes", vec![indexes.into()]).into());
    }
    if let Some(triggers) = triggers_details(table) {
        ret.push(HtmlSection::new("Triggers", triggers).into());
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::html::render;

    fn field(num: i64, name: &str, data_type: &str, nullable: &str) -> TableField {
        TableField::from_catalog(num, name, data_type, Some(22), nullable, None, None, data_type, None)
    }

    fn snapshot() -> TableSnapshot {
        let constraints = vec![TableConstraint::from_catalog(
            "PK_ROADS",
            "P",
            None,
            None,
            Some("ID".to_string()),
            None,
        )];
        let mut fields = vec![
            field(1, "ID", "NUMBER", "N"),
            field(2, "NAME", "VARCHAR2", "Y"),
        ];
        TableField::mark_primary_keys(&mut fields, &constraints);
        TableSnapshot {
            entry: TableEntry::plain("ROADS", "GIS", "TABLE", "GIS", Some(42), Some("Road network".into())),
            row_count: Some(42),
            schema_privileges: SchemaPrivileges { create: true, usage: true },
            privileges: TablePrivileges {
                select: true,
                insert: true,
                update: true,
                delete: true,
            },
            fields,
            constraints,
            indexes: vec![TableIndex::from_catalog("PK_ROADS", "ID", "UNIQUE", None)],
            triggers: Vec::new(),
        }
    }

    #[test]
    fn test_general_info_for_full_privileges() {
        let html = render(&general_info(&snapshot()));
        assert!(html.contains("<td>Relation type:</td><td>Table</td>"));
        assert!(html.contains("<td>Comment:</td><td>Road network</td>"));
        assert!(html.contains("<td>Rows (counted):</td><td>42</td>"));
        assert!(html.contains("<td>Privileges:</td><td>select, insert, update, delete</td>"));
        assert!(!html.contains("Warning"));
    }

    #[test]
    fn test_general_info_warnings() {
        let mut table = snapshot();
        table.row_count = None;
        table.privileges = TablePrivileges {
            select: true,
            ..TablePrivileges::default()
        };
        table.fields.iter_mut().for_each(|f| f.primary_key = false);
        let html = render(&general_info(&table));
        assert!(html.contains("<a href=\"action:rows/recount\">find out</a>"));
        assert!(html.contains("This user has read-only privileges."));
        assert!(html.contains("No primary key defined for this table!"));

        table.privileges = TablePrivileges::default();
        table.entry.is_view = true;
        let html = render(&general_info(&table));
        assert!(html.contains("This user has no privileges!"));
        assert!(!html.contains("Rows (counted)"));
        assert!(!html.contains("No primary key"));
    }

    #[test]
    fn test_fields_underline_primary_key() {
        let html = fields_details(&snapshot()).to_html();
        assert!(html.contains("<td class=\"underline\">ID</td>"));
        assert!(html.contains("<td>NAME</td><td>VARCHAR2</td><td>22</td><td>Y</td>"));
    }

    #[test]
    fn test_trigger_links() {
        let mut table = snapshot();
        table.triggers = vec![
            TableTrigger::from_catalog("TRG_AUDIT", "INSERT", "BEFORE EACH ROW", "ENABLED"),
            TableTrigger::from_catalog("TRG_OLD", "UPDATE", "AFTER STATEMENT", "DISABLED"),
        ];
        let html = render(&triggers_details(&table).unwrap());
        assert!(html.contains("TRG_AUDIT (<a href=\"action:trigger/TRG_AUDIT/delete\">delete</a>)"));
        assert!(html.contains("Yes (<a href=\"action:trigger/TRG_AUDIT/disable\">disable</a>)"));
        assert!(html.contains("No (<a href=\"action:trigger/TRG_OLD/enable\">enable</a>)"));
        assert!(html.contains("action:triggers/disable"));
    }

    #[test]
    fn test_table_info_sections() {
        let html = render(&table_info(&snapshot(), Vec::new()));
        for title in ["General info", "Oracle", "Fields", "Constraints", "Indexes"] {
            assert!(html.contains(&format!("<h2>{}</h2>", title)), "{}", title);
        }
        assert!(!html.contains("<h2>Triggers</h2>"));
        assert!(html.contains("This is not a spatial table."));
    }
}
