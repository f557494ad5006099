use std::{fmt::Display, io::Write};

use anyhow::Result;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use itertools::Itertools as _;

use crate::{
    models::{Employee, Meeting, Project},
    naming::{foreign_keys_of, TABLES},
    roster::{AssignmentView, EmployeeView, MeetingView, ProjectView},
};

pub fn print_employees(writer: &mut impl Write, employees: &[Employee]) -> Result<()> {
    writeln!(writer, "  id  Name                  Hired")?;
    for employee in employees {
        writeln!(
            writer,
            "{:>4}  {:20}  {}",
            employee.id,
            text(&employee.name),
            date(employee.hire_date),
        )?;
    }
    Ok(())
}

pub fn print_meetings<Tz>(writer: &mut impl Write, meetings: &[Meeting], tz: &Tz) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    writeln!(writer, "  id  When              Location    Topic")?;
    for meeting in meetings {
        writeln!(
            writer,
            "{:>4}  {:16}  {:10}  {}",
            meeting.id,
            datetime(meeting.scheduled_time, tz),
            text(&meeting.location),
            text(&meeting.topic),
        )?;
    }
    Ok(())
}

pub fn print_projects(writer: &mut impl Write, projects: &[Project]) -> Result<()> {
    writeln!(writer, "  id      Budget  Title")?;
    for project in projects {
        let budget = project
            .budget
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".into());
        writeln!(
            writer,
            "{:>4}  {:>10}  {}",
            project.id,
            budget,
            text(&project.title)
        )?;
    }
    Ok(())
}

pub fn print_assignments<Tz>(
    writer: &mut impl Write,
    now: DateTime<Utc>,
    assignments: &[AssignmentView],
    tz: &Tz,
) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    writeln!(
        writer,
        "  id  From              Until             Tenure  Employee      Project     Role"
    )?;
    for view in assignments {
        let assignment = &view.assignment;
        writeln!(
            writer,
            "{:>4}  {:16}  {:16}  {:>6}  {:12}  {:10}  {}",
            assignment.id,
            datetime(assignment.start_date, tz),
            datetime(assignment.end_date, tz),
            tenure(assignment.start_date, assignment.end_date, now),
            text(&view.employee.name),
            text(&view.project.title),
            text(&assignment.role),
        )?;
    }
    Ok(())
}

pub fn print_employee(writer: &mut impl Write, view: &EmployeeView) -> Result<()> {
    writeln!(writer, "{}", view.employee)?;
    print_section(writer, "Meetings", &view.meetings)?;
    print_section(writer, "Assignments", &view.assignments)?;
    print_names(writer, "Projects", view.projects.iter().map(|p| &p.title))?;
    Ok(())
}

pub fn print_meeting(writer: &mut impl Write, view: &MeetingView) -> Result<()> {
    writeln!(writer, "{}", view.meeting)?;
    print_names(writer, "Attendees", view.employees.iter().map(|e| &e.name))?;
    Ok(())
}

pub fn print_project(writer: &mut impl Write, view: &ProjectView) -> Result<()> {
    writeln!(writer, "{}", view.project)?;
    print_section(writer, "Assignments", &view.assignments)?;
    print_names(writer, "Employees", view.employees.iter().map(|e| &e.name))?;
    Ok(())
}

pub fn print_schema(writer: &mut impl Write) -> Result<()> {
    for table in TABLES {
        writeln!(writer, "{} ({})", table.name, table.columns.join(", "))?;
        for fk in foreign_keys_of(table.name) {
            writeln!(writer, "  {fk}")?;
        }
    }
    Ok(())
}

fn print_section(writer: &mut impl Write, title: &str, rows: &[impl Display]) -> Result<()> {
    writeln!(writer, "{title}:")?;
    if rows.is_empty() {
        writeln!(writer, "  (none)")?;
    }
    for row in rows {
        writeln!(writer, "  {row}")?;
    }
    Ok(())
}

fn print_names<'a>(
    writer: &mut impl Write,
    title: &str,
    names: impl Iterator<Item = &'a Option<String>>,
) -> Result<()> {
    let names = names.map(text).join(", ");
    if names.is_empty() {
        writeln!(writer, "{title}: (none)")?;
    } else {
        writeln!(writer, "{title}: {names}")?;
    }
    Ok(())
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".into())
}

fn datetime<Tz>(value: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    value
        .map(|dt| dt.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}

/// Whole days between the start of an assignment and its end, or `now` while it is ongoing.
fn tenure(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match start {
        Some(start) => format!("{}d", (end.unwrap_or(now) - start).num_days()),
        None => "-".into(),
    }
}
