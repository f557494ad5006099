// SPDX-License-Identifier: MPL-2.0

use std::fmt::{self, Display};

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::schema::{assignments, employee_meetings, employees, meetings, projects};

#[derive(Queryable, Identifiable, Selectable, Debug, PartialEq, Clone)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Employee {
    pub id: i32,
    pub name: Option<String>,
    pub hire_date: Option<NaiveDate>,
}

#[derive(Queryable, Identifiable, Selectable, Debug, PartialEq, Clone)]
#[diesel(table_name = meetings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Meeting {
    pub id: i32,
    pub topic: Option<String>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

#[derive(Queryable, Identifiable, Selectable, Debug, PartialEq, Clone)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Project {
    pub id: i32,
    pub title: Option<String>,
    pub budget: Option<i64>,
}

/// One employee's tenure with a role on one project.
#[derive(Queryable, Identifiable, Selectable, Associations, Debug, PartialEq, Clone)]
#[diesel(table_name = assignments)]
#[diesel(belongs_to(Employee))]
#[diesel(belongs_to(Project))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Assignment {
    pub id: i32,
    pub role: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub employee_id: i32,
    pub project_id: i32,
}

/// A row of the pure `employee_meetings` join table.
#[derive(Queryable, Identifiable, Selectable, Associations, Insertable, Debug, PartialEq, Clone, Copy)]
#[diesel(table_name = employee_meetings)]
#[diesel(primary_key(employee_id, meeting_id))]
#[diesel(belongs_to(Employee))]
#[diesel(belongs_to(Meeting))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmployeeMeeting {
    pub employee_id: i32,
    pub meeting_id: i32,
}

#[derive(Insertable, Debug, Default, Clone)]
#[diesel(table_name = employees)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewEmployee<'a> {
    pub name: Option<&'a str>,
    pub hire_date: Option<NaiveDate>,
}

#[derive(Insertable, Debug, Default, Clone)]
#[diesel(table_name = meetings)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewMeeting<'a> {
    pub topic: Option<&'a str>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub location: Option<&'a str>,
}

#[derive(Insertable, Debug, Default, Clone)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewProject<'a> {
    pub title: Option<&'a str>,
    pub budget: Option<i64>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = assignments)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewAssignment<'a> {
    pub role: Option<&'a str>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub employee_id: i32,
    pub project_id: i32,
}

// Changesets leave a column untouched when its field is `None`.

#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = employees)]
pub struct EmployeeUpdate<'a> {
    pub name: Option<&'a str>,
    pub hire_date: Option<NaiveDate>,
}

#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = meetings)]
pub struct MeetingUpdate<'a> {
    pub topic: Option<&'a str>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub location: Option<&'a str>,
}

#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = projects)]
pub struct ProjectUpdate<'a> {
    pub title: Option<&'a str>,
    pub budget: Option<i64>,
}

#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = assignments)]
pub struct AssignmentUpdate<'a> {
    pub role: Option<&'a str>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub employee_id: Option<i32>,
    pub project_id: Option<i32>,
}

impl EmployeeUpdate<'_> {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.hire_date.is_none()
    }
}

impl MeetingUpdate<'_> {
    pub fn is_empty(&self) -> bool {
        self.topic.is_none() && self.scheduled_time.is_none() && self.location.is_none()
    }
}

impl ProjectUpdate<'_> {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.budget.is_none()
    }
}

impl AssignmentUpdate<'_> {
    pub fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.employee_id.is_none()
            && self.project_id.is_none()
    }
}

/// Renders an optional column the way the record summaries expect: the value, or `None`.
struct Opt<'a, T>(&'a Option<T>);

impl<T: Display> Display for Opt<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("None"),
        }
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Employee {}, {}, {}>",
            self.id,
            Opt(&self.name),
            Opt(&self.hire_date)
        )
    }
}

impl Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Meeting {}, {}, {}, {}>",
            self.id,
            Opt(&self.topic),
            Opt(&self.scheduled_time),
            Opt(&self.location)
        )
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Project {}, {}, {}>",
            self.id,
            Opt(&self.title),
            Opt(&self.budget)
        )
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Assignment {}, {}, {}, {}, Employee ID: {}, Project ID: {}>",
            self.id,
            Opt(&self.role),
            Opt(&self.start_date),
            Opt(&self.end_date),
            self.employee_id,
            self.project_id
        )
    }
}
