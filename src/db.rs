// SPDX-License-Identifier: MPL-2.0

use std::fs::create_dir_all;
use std::ops::{Deref, DerefMut};
use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::{Connection, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};
use crate::models::{
    Assignment, AssignmentUpdate, Employee, EmployeeMeeting, EmployeeUpdate, Meeting,
    MeetingUpdate, NewAssignment, NewEmployee, NewMeeting, NewProject, Project, ProjectUpdate,
};

pub struct Conn(SqliteConnection);

impl Drop for Conn {
    fn drop(&mut self) {
        // if this fails, we don't really care at this point
        // the goal is just to have the optimize pragma run when the program
        // ends, so that it can potentially update some of the tables based on
        // the queries used during this session.
        // See: https://sqlite.org/pragma.html#pragma_optimize
        let _ = self.0.batch_execute("PRAGMA optimize;");
    }
}

impl Deref for Conn {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Conn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

pub fn establish_connection(database_url: impl AsRef<Path>) -> Result<Conn> {
    let database_url = database_url.as_ref();

    // The database and potentially its parent folders may not yet exist.  SQLite can handle
    // creating the file fine, but we need to make sure all of the parent folders also exist.
    if let Some(parent) = database_url.parent() {
        create_dir_all(parent)?;
    }

    // SQLite only accepts utf-8 or utf-16 paths, and it's easier to type things elsewhere if we
    // assume that the database url is a real path.
    // See: https://github.com/diesel-rs/diesel/discussions/3069
    let database_url = database_url.to_string_lossy();

    log::trace!("Connecting to SQLite DB at {database_url}");
    let conn = SqliteConnection::establish(&database_url)?;
    prepare(conn)
}

/// Opens a private in-memory database with the full schema applied.
pub fn establish_in_memory() -> Result<Conn> {
    log::trace!("Connecting to in-memory SQLite DB");
    let conn = SqliteConnection::establish(":memory:")?;
    prepare(conn)
}

fn prepare(mut conn: SqliteConnection) -> Result<Conn> {
    // foreign key enforcement is off by default in SQLite, and every cascade in the schema
    // depends on it.  It must be set outside of a transaction, so before migrations run.
    conn.batch_execute(
        "PRAGMA application_id = 0x73746166;
        PRAGMA foreign_keys = TRUE;
        PRAGMA ignore_check_constraints = FALSE;",
    )?;
    log::trace!("Connection to SQLite DB successful");
    run_migrations(&mut conn)?;
    Ok(Conn(conn))
}

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn run_migrations(db: &mut SqliteConnection) -> Result<()> {
    let migrated = db
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| Error::Migration(err.to_string()))?
        .len();

    if migrated > 0 {
        // a migration has occurred, so the data may be in a different format to when the last
        // analysis was done.  Run optimize now to update that analysis.
        db.batch_execute("PRAGMA optimize;")?;
        log::trace!("Ran {migrated} migration(s) to update SQLite DB schema to latest version");
    }

    Ok(())
}

// employees

pub fn insert_employee(conn: &mut SqliteConnection, employee: &NewEmployee) -> Result<Employee> {
    use crate::schema::employees;
    let employee = diesel::insert_into(employees::table)
        .values(employee)
        .returning(Employee::as_returning())
        .get_result(conn)?;
    log::debug!("Inserted {employee}");
    Ok(employee)
}

pub fn get_employee(conn: &mut SqliteConnection, employee_id: i32) -> Result<Employee> {
    use crate::schema::employees;
    employees::table
        .find(employee_id)
        .select(Employee::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::NotFound {
            entity: "employee",
            id: employee_id,
        })
}

pub fn list_employees(conn: &mut SqliteConnection) -> Result<Vec<Employee>> {
    use crate::schema::employees;
    Ok(employees::table
        .select(Employee::as_select())
        .order(employees::id)
        .load(conn)?)
}

pub fn update_employee(
    conn: &mut SqliteConnection,
    employee_id: i32,
    changes: &EmployeeUpdate,
) -> Result<Employee> {
    use crate::schema::employees;
    if changes.is_empty() {
        return get_employee(conn, employee_id);
    }

    diesel::update(employees::table.find(employee_id))
        .set(changes)
        .returning(Employee::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or(Error::NotFound {
            entity: "employee",
            id: employee_id,
        })
}

/// Deletes an employee.  Their assignments and meeting attendance go with them.
pub fn delete_employee(conn: &mut SqliteConnection, employee_id: i32) -> Result<()> {
    use crate::schema::employees;
    let count = diesel::delete(employees::table.find(employee_id)).execute(conn)?;
    if count < 1 {
        return Err(Error::NotFound {
            entity: "employee",
            id: employee_id,
        });
    }
    log::debug!("Deleted employee {employee_id}");
    Ok(())
}

// meetings

pub fn insert_meeting(conn: &mut SqliteConnection, meeting: &NewMeeting) -> Result<Meeting> {
    use crate::schema::meetings;
    let meeting = diesel::insert_into(meetings::table)
        .values(meeting)
        .returning(Meeting::as_returning())
        .get_result(conn)?;
    log::debug!("Inserted {meeting}");
    Ok(meeting)
}

pub fn get_meeting(conn: &mut SqliteConnection, meeting_id: i32) -> Result<Meeting> {
    use crate::schema::meetings;
    meetings::table
        .find(meeting_id)
        .select(Meeting::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::NotFound {
            entity: "meeting",
            id: meeting_id,
        })
}

pub fn list_meetings(conn: &mut SqliteConnection) -> Result<Vec<Meeting>> {
    use crate::schema::meetings;
    Ok(meetings::table
        .select(Meeting::as_select())
        .order((meetings::scheduled_time, meetings::id))
        .load(conn)?)
}

pub fn update_meeting(
    conn: &mut SqliteConnection,
    meeting_id: i32,
    changes: &MeetingUpdate,
) -> Result<Meeting> {
    use crate::schema::meetings;
    if changes.is_empty() {
        return get_meeting(conn, meeting_id);
    }

    diesel::update(meetings::table.find(meeting_id))
        .set(changes)
        .returning(Meeting::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or(Error::NotFound {
            entity: "meeting",
            id: meeting_id,
        })
}

pub fn delete_meeting(conn: &mut SqliteConnection, meeting_id: i32) -> Result<()> {
    use crate::schema::meetings;
    let count = diesel::delete(meetings::table.find(meeting_id)).execute(conn)?;
    if count < 1 {
        return Err(Error::NotFound {
            entity: "meeting",
            id: meeting_id,
        });
    }
    log::debug!("Deleted meeting {meeting_id}");
    Ok(())
}

// projects

pub fn insert_project(conn: &mut SqliteConnection, project: &NewProject) -> Result<Project> {
    use crate::schema::projects;
    let project = diesel::insert_into(projects::table)
        .values(project)
        .returning(Project::as_returning())
        .get_result(conn)?;
    log::debug!("Inserted {project}");
    Ok(project)
}

pub fn get_project(conn: &mut SqliteConnection, project_id: i32) -> Result<Project> {
    use crate::schema::projects;
    projects::table
        .find(project_id)
        .select(Project::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::NotFound {
            entity: "project",
            id: project_id,
        })
}

pub fn list_projects(conn: &mut SqliteConnection) -> Result<Vec<Project>> {
    use crate::schema::projects;
    Ok(projects::table
        .select(Project::as_select())
        .order(projects::id)
        .load(conn)?)
}

pub fn update_project(
    conn: &mut SqliteConnection,
    project_id: i32,
    changes: &ProjectUpdate,
) -> Result<Project> {
    use crate::schema::projects;
    if changes.is_empty() {
        return get_project(conn, project_id);
    }

    diesel::update(projects::table.find(project_id))
        .set(changes)
        .returning(Project::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or(Error::NotFound {
            entity: "project",
            id: project_id,
        })
}

/// Deletes a project along with every assignment to it.
pub fn delete_project(conn: &mut SqliteConnection, project_id: i32) -> Result<()> {
    use crate::schema::projects;
    let count = diesel::delete(projects::table.find(project_id)).execute(conn)?;
    if count < 1 {
        return Err(Error::NotFound {
            entity: "project",
            id: project_id,
        });
    }
    log::debug!("Deleted project {project_id}");
    Ok(())
}

// assignments

pub fn insert_assignment(
    conn: &mut SqliteConnection,
    assignment: &NewAssignment,
) -> Result<Assignment> {
    use crate::schema::assignments;
    let assignment = diesel::insert_into(assignments::table)
        .values(assignment)
        .returning(Assignment::as_returning())
        .get_result(conn)?;
    log::debug!("Inserted {assignment}");
    Ok(assignment)
}

pub fn get_assignment(conn: &mut SqliteConnection, assignment_id: i32) -> Result<Assignment> {
    use crate::schema::assignments;
    assignments::table
        .find(assignment_id)
        .select(Assignment::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::NotFound {
            entity: "assignment",
            id: assignment_id,
        })
}

pub fn list_assignments(conn: &mut SqliteConnection) -> Result<Vec<Assignment>> {
    use crate::schema::assignments;
    Ok(assignments::table
        .select(Assignment::as_select())
        .order(assignments::id)
        .load(conn)?)
}

pub fn update_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i32,
    changes: &AssignmentUpdate,
) -> Result<Assignment> {
    use crate::schema::assignments;
    if changes.is_empty() {
        return get_assignment(conn, assignment_id);
    }

    diesel::update(assignments::table.find(assignment_id))
        .set(changes)
        .returning(Assignment::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or(Error::NotFound {
            entity: "assignment",
            id: assignment_id,
        })
}

pub fn delete_assignment(conn: &mut SqliteConnection, assignment_id: i32) -> Result<()> {
    use crate::schema::assignments;
    let count = diesel::delete(assignments::table.find(assignment_id)).execute(conn)?;
    if count < 1 {
        return Err(Error::NotFound {
            entity: "assignment",
            id: assignment_id,
        });
    }
    log::debug!("Deleted assignment {assignment_id}");
    Ok(())
}

// employee_meetings

/// Records that an employee attends a meeting.  Returns `false` if the link already existed.
pub fn add_attendee(conn: &mut SqliteConnection, employee_id: i32, meeting_id: i32) -> Result<bool> {
    use crate::schema::employee_meetings;
    // OR IGNORE only swallows the duplicate primary key; foreign key failures still surface.
    let count = diesel::insert_or_ignore_into(employee_meetings::table)
        .values(&EmployeeMeeting {
            employee_id,
            meeting_id,
        })
        .execute(conn)?;
    if count > 0 {
        log::debug!("Employee {employee_id} now attends meeting {meeting_id}");
    }
    Ok(count > 0)
}

/// Removes an employee from a meeting.  Returns `false` if they were not attending.
pub fn remove_attendee(
    conn: &mut SqliteConnection,
    employee_id: i32,
    meeting_id: i32,
) -> Result<bool> {
    use crate::schema::employee_meetings;
    let count = diesel::delete(employee_meetings::table.find((employee_id, meeting_id)))
        .execute(conn)?;
    if count > 0 {
        log::debug!("Employee {employee_id} no longer attends meeting {meeting_id}");
    }
    Ok(count > 0)
}

// navigation

pub fn meetings_for_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<Vec<Meeting>> {
    use crate::schema::meetings;
    Ok(EmployeeMeeting::belonging_to(employee)
        .inner_join(meetings::table)
        .select(Meeting::as_select())
        .order(meetings::id)
        .load(conn)?)
}

pub fn employees_for_meeting(
    conn: &mut SqliteConnection,
    meeting: &Meeting,
) -> Result<Vec<Employee>> {
    use crate::schema::employees;
    Ok(EmployeeMeeting::belonging_to(meeting)
        .inner_join(employees::table)
        .select(Employee::as_select())
        .order(employees::id)
        .load(conn)?)
}

pub fn assignments_for_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<Vec<Assignment>> {
    use crate::schema::assignments;
    Ok(Assignment::belonging_to(employee)
        .select(Assignment::as_select())
        .order(assignments::id)
        .load(conn)?)
}

pub fn assignments_for_project(
    conn: &mut SqliteConnection,
    project: &Project,
) -> Result<Vec<Assignment>> {
    use crate::schema::assignments;
    Ok(Assignment::belonging_to(project)
        .select(Assignment::as_select())
        .order(assignments::id)
        .load(conn)?)
}

pub fn employee_for_assignment(
    conn: &mut SqliteConnection,
    assignment: &Assignment,
) -> Result<Employee> {
    get_employee(conn, assignment.employee_id)
}

pub fn project_for_assignment(
    conn: &mut SqliteConnection,
    assignment: &Assignment,
) -> Result<Project> {
    get_project(conn, assignment.project_id)
}

/// Projects an employee holds at least one assignment on, each listed once.
pub fn projects_for_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<Vec<Project>> {
    use crate::schema::projects;
    Ok(Assignment::belonging_to(employee)
        .inner_join(projects::table)
        .select(Project::as_select())
        .distinct()
        .order(projects::id)
        .load(conn)?)
}

/// Employees holding at least one assignment on a project, each listed once.
pub fn employees_for_project(
    conn: &mut SqliteConnection,
    project: &Project,
) -> Result<Vec<Employee>> {
    use crate::schema::employees;
    Ok(Assignment::belonging_to(project)
        .inner_join(employees::table)
        .select(Employee::as_select())
        .distinct()
        .order(employees::id)
        .load(conn)?)
}

/// Assignments joined with the employee and project they reference.
pub type AssignmentTuple = (Assignment, Employee, Project);

pub fn query_assignments(conn: &mut SqliteConnection) -> Result<Vec<AssignmentTuple>> {
    use crate::schema::{assignments, employees, projects};
    Ok(assignments::table
        .inner_join(employees::table)
        .inner_join(projects::table)
        .select((
            Assignment::as_select(),
            Employee::as_select(),
            Project::as_select(),
        ))
        .order((assignments::start_date, assignments::id))
        .load(conn)?)
}
