// SPDX-License-Identifier: MPL-2.0

//! Schema metadata: the tables the migrations create and the foreign keys between them.
//!
//! Every foreign key in the schema is listed here once, and its constraint name is derived
//! from the same `fk_<table>_<column>_<referenced_table>` convention.  The migrations declare
//! their constraints under exactly these names so that schema diffs stay stable between
//! regenerations.

use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
    pub referenced_table: &'static str,
    pub on_delete: OnDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
}

impl ForeignKey {
    pub const fn new(
        table: &'static str,
        column: &'static str,
        referenced_table: &'static str,
        on_delete: OnDelete,
    ) -> Self {
        Self {
            table,
            column,
            referenced_table,
            on_delete,
        }
    }

    pub fn constraint_name(&self) -> String {
        constraint_name(self.table, self.column, self.referenced_table)
    }
}

impl Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}.{} -> {}.id ({})",
            self.constraint_name(),
            self.table,
            self.column,
            self.referenced_table,
            self.on_delete,
        )
    }
}

impl Display for OnDelete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnDelete::Cascade => write!(f, "ON DELETE CASCADE"),
        }
    }
}

pub fn constraint_name(table: &str, column: &str, referenced_table: &str) -> String {
    format!("fk_{table}_{column}_{referenced_table}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub static TABLES: &[Table] = &[
    Table {
        name: "employees",
        columns: &["id", "name", "hire_date"],
    },
    Table {
        name: "meetings",
        columns: &["id", "topic", "scheduled_time", "location"],
    },
    Table {
        name: "projects",
        columns: &["id", "title", "budget"],
    },
    Table {
        name: "assignments",
        columns: &["id", "role", "start_date", "end_date", "employee_id", "project_id"],
    },
    Table {
        name: "employee_meetings",
        columns: &["employee_id", "meeting_id"],
    },
];

pub static FOREIGN_KEYS: &[ForeignKey] = &[
    ForeignKey::new("assignments", "employee_id", "employees", OnDelete::Cascade),
    ForeignKey::new("assignments", "project_id", "projects", OnDelete::Cascade),
    ForeignKey::new("employee_meetings", "employee_id", "employees", OnDelete::Cascade),
    ForeignKey::new("employee_meetings", "meeting_id", "meetings", OnDelete::Cascade),
];

pub fn foreign_keys_of(table: &str) -> impl Iterator<Item = &'static ForeignKey> + '_ {
    FOREIGN_KEYS.iter().filter(move |fk| fk.table == table)
}

/// Foreign keys that point at `table`, i.e. the rows that a delete on `table` will reach.
pub fn dependents_of(table: &str) -> impl Iterator<Item = &'static ForeignKey> + '_ {
    FOREIGN_KEYS
        .iter()
        .filter(move |fk| fk.referenced_table == table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UP_SQL: &str = include_str!("../migrations/2024-09-01-120000_create_staffbook/up.sql");

    #[test]
    fn builds_constraint_names_from_table_column_and_referenced_table() {
        assert_eq!(
            constraint_name("assignments", "employee_id", "employees"),
            "fk_assignments_employee_id_employees"
        );
    }

    #[test]
    fn every_registered_foreign_key_is_declared_by_the_migration() {
        for fk in FOREIGN_KEYS {
            let declaration = format!(
                "CONSTRAINT {}\n        FOREIGN KEY ({}) REFERENCES {} (id) ON DELETE CASCADE",
                fk.constraint_name(),
                fk.column,
                fk.referenced_table
            );
            assert!(UP_SQL.contains(&declaration), "missing {declaration}");
        }
    }

    #[test]
    fn looks_up_foreign_keys_by_owning_table() {
        let names = foreign_keys_of("employee_meetings")
            .map(ForeignKey::constraint_name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "fk_employee_meetings_employee_id_employees",
                "fk_employee_meetings_meeting_id_meetings"
            ]
        );
    }

    #[test]
    fn employees_are_referenced_by_assignments_and_attendance() {
        let tables = dependents_of("employees")
            .map(|fk| fk.table)
            .collect::<Vec<_>>();
        assert_eq!(tables, vec!["assignments", "employee_meetings"]);
        assert_eq!(dependents_of("assignments").count(), 0);
    }

    #[test]
    fn meetings_and_projects_each_have_one_dependent_table() {
        let of = |table| dependents_of(table).map(|fk| fk.table).collect::<Vec<_>>();
        assert_eq!(of("meetings"), vec!["employee_meetings"]);
        assert_eq!(of("projects"), vec!["assignments"]);
    }

    #[test]
    fn displays_constraint_with_its_delete_rule() {
        assert_eq!(
            FOREIGN_KEYS[1].to_string(),
            "fk_assignments_project_id_projects: assignments.project_id -> projects.id (ON DELETE CASCADE)"
        );
    }
}
