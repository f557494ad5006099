// SPDX-License-Identifier: MPL-2.0

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use itertools::Itertools as _;
use staffbook::{
    commands::{AddEmployee, AddMeeting, AddProject, Assign, Attendance, ById},
    config::Config,
    db::{establish_connection, Conn},
    naming::dependents_of,
    parse::{parse_date, parse_datetime},
    print::{
        print_assignments, print_employee, print_employees, print_meeting, print_meetings,
        print_project, print_projects, print_schema,
    },
    roster::Roster,
};

fn connect(config: &Config) -> Result<Conn> {
    Ok(establish_connection(&config.database_path)?)
}

/// The tables a delete on `table` cascades into, for log messages.
fn cascaded(table: &str) -> String {
    dependents_of(table).map(|fk| fk.table).join(", ")
}

fn today() -> NaiveDate {
    Local::now().naive_local().date()
}

fn date_arg(value: Option<String>, what: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|d| parse_date(&d, today()).ok_or(anyhow!("could not parse {what} {d}")))
        .transpose()
}

fn datetime_arg(value: Option<String>, what: &str) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|dt| {
            parse_datetime(&dt, &Local, today()).ok_or(anyhow!("could not parse {what} {dt}"))
        })
        .transpose()
}

pub fn add_employee(config: Config, add: AddEmployee) -> Result<()> {
    let mut conn = connect(&config)?;
    let hire_date = date_arg(add.hired, "hire date")?;
    let employee = Roster::new(&mut conn).hire(&add.name, hire_date)?;
    log::info!("Added employee {employee}");
    println!("{}", employee.id);
    Ok(())
}

pub fn list_employees(config: Config) -> Result<()> {
    let mut conn = connect(&config)?;
    let employees = Roster::new(&mut conn).employees()?;
    print_employees(&mut std::io::stdout().lock(), &employees)
}

pub fn show_employee(config: Config, by_id: ById) -> Result<()> {
    let mut conn = connect(&config)?;
    let view = Roster::new(&mut conn).employee(by_id.id)?;
    print_employee(&mut std::io::stdout().lock(), &view)
}

pub fn remove_employee(config: Config, by_id: ById) -> Result<()> {
    let mut conn = connect(&config)?;
    Roster::new(&mut conn).dismiss(by_id.id)?;
    log::info!(
        "Deleted employee {} and its rows in {}",
        by_id.id,
        cascaded("employees")
    );
    Ok(())
}

pub fn add_meeting(config: Config, add: AddMeeting) -> Result<()> {
    let mut conn = connect(&config)?;
    let scheduled_time = datetime_arg(add.at, "meeting time")?;
    let meeting =
        Roster::new(&mut conn).schedule(&add.topic, scheduled_time, add.location.as_deref())?;
    log::info!("Added meeting {meeting}");
    println!("{}", meeting.id);
    Ok(())
}

pub fn list_meetings(config: Config) -> Result<()> {
    let mut conn = connect(&config)?;
    let meetings = Roster::new(&mut conn).meetings()?;
    print_meetings(&mut std::io::stdout().lock(), &meetings, &Local)
}

pub fn show_meeting(config: Config, by_id: ById) -> Result<()> {
    let mut conn = connect(&config)?;
    let view = Roster::new(&mut conn).meeting(by_id.id)?;
    print_meeting(&mut std::io::stdout().lock(), &view)
}

pub fn remove_meeting(config: Config, by_id: ById) -> Result<()> {
    let mut conn = connect(&config)?;
    Roster::new(&mut conn).cancel_meeting(by_id.id)?;
    log::info!(
        "Deleted meeting {} and its rows in {}",
        by_id.id,
        cascaded("meetings")
    );
    Ok(())
}

pub fn attend(config: Config, attendance: Attendance) -> Result<()> {
    let mut conn = connect(&config)?;
    let added = Roster::new(&mut conn).attend(attendance.employee_id, attendance.meeting_id)?;
    if added {
        log::info!(
            "Employee {} now attends meeting {}",
            attendance.employee_id,
            attendance.meeting_id
        );
    } else {
        log::warn!(
            "Employee {} already attends meeting {}",
            attendance.employee_id,
            attendance.meeting_id
        );
    }
    Ok(())
}

pub fn leave(config: Config, attendance: Attendance) -> Result<()> {
    let mut conn = connect(&config)?;
    let removed = Roster::new(&mut conn).leave(attendance.employee_id, attendance.meeting_id)?;
    if !removed {
        log::warn!(
            "Employee {} was not attending meeting {}",
            attendance.employee_id,
            attendance.meeting_id
        );
    }
    Ok(())
}

pub fn add_project(config: Config, add: AddProject) -> Result<()> {
    let mut conn = connect(&config)?;
    let project = Roster::new(&mut conn).open_project(&add.title, add.budget)?;
    log::info!("Added project {project}");
    println!("{}", project.id);
    Ok(())
}

pub fn list_projects(config: Config) -> Result<()> {
    let mut conn = connect(&config)?;
    let projects = Roster::new(&mut conn).projects()?;
    print_projects(&mut std::io::stdout().lock(), &projects)
}

pub fn show_project(config: Config, by_id: ById) -> Result<()> {
    let mut conn = connect(&config)?;
    let view = Roster::new(&mut conn).project(by_id.id)?;
    print_project(&mut std::io::stdout().lock(), &view)
}

pub fn remove_project(config: Config, by_id: ById) -> Result<()> {
    let mut conn = connect(&config)?;
    Roster::new(&mut conn).close_project(by_id.id)?;
    log::info!(
        "Deleted project {} and its rows in {}",
        by_id.id,
        cascaded("projects")
    );
    Ok(())
}

pub fn assign(config: Config, assign: Assign) -> Result<()> {
    let mut conn = connect(&config)?;
    let start_date = datetime_arg(assign.start, "start time")?;
    let end_date = datetime_arg(assign.end, "end time")?;
    let assignment = Roster::new(&mut conn).assign(
        assign.employee_id,
        assign.project_id,
        assign.role.as_deref(),
        start_date,
        end_date,
    )?;
    log::info!("Added assignment {assignment}");
    println!("{}", assignment.id);
    Ok(())
}

pub fn unassign(config: Config, by_id: ById) -> Result<()> {
    let mut conn = connect(&config)?;
    Roster::new(&mut conn).unassign(by_id.id)?;
    log::info!("Deleted assignment {}", by_id.id);
    Ok(())
}

pub fn list_assignments(config: Config) -> Result<()> {
    let mut conn = connect(&config)?;
    let assignments = Roster::new(&mut conn).assignments()?;
    print_assignments(
        &mut std::io::stdout().lock(),
        Utc::now(),
        &assignments,
        &Local,
    )
}

pub fn schema() -> Result<()> {
    print_schema(&mut std::io::stdout().lock())
}
