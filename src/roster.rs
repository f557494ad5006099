// SPDX-License-Identifier: MPL-2.0

use chrono::{DateTime, NaiveDate, Utc};
use diesel::SqliteConnection;

use crate::db::{
    add_attendee, assignments_for_employee, assignments_for_project, delete_assignment,
    delete_employee, delete_meeting, delete_project, employees_for_meeting,
    employees_for_project, get_employee, get_meeting, get_project, insert_assignment,
    insert_employee, insert_meeting, insert_project, list_employees, list_meetings,
    list_projects, meetings_for_employee, projects_for_employee, query_assignments,
    remove_attendee,
};
use crate::error::Result;
use crate::models::{
    Assignment, Employee, Meeting, NewAssignment, NewEmployee, NewMeeting, NewProject, Project,
};

/// Id-based access to the staff records over a borrowed connection.
///
/// Relationships are resolved by joining on the foreign-key columns whenever they are read, so
/// a link written through one side is immediately visible from the other.
pub struct Roster<'a> {
    db: &'a mut SqliteConnection,
}

impl<'a> Roster<'a> {
    pub fn new(db: &'a mut SqliteConnection) -> Self {
        Self { db }
    }

    pub fn hire(&mut self, name: &str, hire_date: Option<NaiveDate>) -> Result<Employee> {
        insert_employee(
            self.db,
            &NewEmployee {
                name: Some(name),
                hire_date,
            },
        )
    }

    pub fn schedule(
        &mut self,
        topic: &str,
        scheduled_time: Option<DateTime<Utc>>,
        location: Option<&str>,
    ) -> Result<Meeting> {
        insert_meeting(
            self.db,
            &NewMeeting {
                topic: Some(topic),
                scheduled_time,
                location,
            },
        )
    }

    pub fn open_project(&mut self, title: &str, budget: Option<i64>) -> Result<Project> {
        insert_project(
            self.db,
            &NewProject {
                title: Some(title),
                budget,
            },
        )
    }

    pub fn assign(
        &mut self,
        employee_id: i32,
        project_id: i32,
        role: Option<&str>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Assignment> {
        insert_assignment(
            self.db,
            &NewAssignment {
                role,
                start_date,
                end_date,
                employee_id,
                project_id,
            },
        )
    }

    pub fn unassign(&mut self, assignment_id: i32) -> Result<()> {
        delete_assignment(self.db, assignment_id)
    }

    pub fn attend(&mut self, employee_id: i32, meeting_id: i32) -> Result<bool> {
        add_attendee(self.db, employee_id, meeting_id)
    }

    pub fn leave(&mut self, employee_id: i32, meeting_id: i32) -> Result<bool> {
        remove_attendee(self.db, employee_id, meeting_id)
    }

    pub fn dismiss(&mut self, employee_id: i32) -> Result<()> {
        delete_employee(self.db, employee_id)
    }

    pub fn cancel_meeting(&mut self, meeting_id: i32) -> Result<()> {
        delete_meeting(self.db, meeting_id)
    }

    pub fn close_project(&mut self, project_id: i32) -> Result<()> {
        delete_project(self.db, project_id)
    }

    pub fn employees(&mut self) -> Result<Vec<Employee>> {
        list_employees(self.db)
    }

    pub fn meetings(&mut self) -> Result<Vec<Meeting>> {
        list_meetings(self.db)
    }

    pub fn projects(&mut self) -> Result<Vec<Project>> {
        list_projects(self.db)
    }

    pub fn assignments(&mut self) -> Result<Vec<AssignmentView>> {
        Ok(query_assignments(self.db)?
            .into_iter()
            .map(|(assignment, employee, project)| AssignmentView {
                assignment,
                employee,
                project,
            })
            .collect())
    }

    pub fn employee(&mut self, employee_id: i32) -> Result<EmployeeView> {
        let employee = get_employee(self.db, employee_id)?;
        let meetings = meetings_for_employee(self.db, &employee)?;
        let assignments = assignments_for_employee(self.db, &employee)?;
        let projects = projects_for_employee(self.db, &employee)?;
        Ok(EmployeeView {
            employee,
            meetings,
            assignments,
            projects,
        })
    }

    pub fn meeting(&mut self, meeting_id: i32) -> Result<MeetingView> {
        let meeting = get_meeting(self.db, meeting_id)?;
        let employees = employees_for_meeting(self.db, &meeting)?;
        Ok(MeetingView { meeting, employees })
    }

    pub fn project(&mut self, project_id: i32) -> Result<ProjectView> {
        let project = get_project(self.db, project_id)?;
        let assignments = assignments_for_project(self.db, &project)?;
        let employees = employees_for_project(self.db, &project)?;
        Ok(ProjectView {
            project,
            assignments,
            employees,
        })
    }
}

#[derive(Debug, Clone)]
pub struct EmployeeView {
    pub employee: Employee,
    pub meetings: Vec<Meeting>,
    pub assignments: Vec<Assignment>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone)]
pub struct MeetingView {
    pub meeting: Meeting,
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone)]
pub struct ProjectView {
    pub project: Project,
    pub assignments: Vec<Assignment>,
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone)]
pub struct AssignmentView {
    pub assignment: Assignment,
    pub employee: Employee,
    pub project: Project,
}
