use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use diesel::SqliteConnection;
use staffbook::db::{
    add_attendee, assignments_for_employee, assignments_for_project, delete_employee,
    delete_meeting, delete_project, employee_for_assignment, employees_for_meeting,
    employees_for_project, establish_in_memory, get_assignment, insert_assignment,
    insert_employee, insert_meeting, insert_project, list_assignments, meetings_for_employee,
    project_for_assignment, projects_for_employee, remove_attendee, update_assignment,
};
use staffbook::models::{
    Assignment, AssignmentUpdate, Employee, Meeting, NewAssignment, NewEmployee, NewMeeting,
    NewProject, Project,
};
use staffbook::roster::Roster;
use staffbook::Error;

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn employee(conn: &mut SqliteConnection, name: &str) -> Employee {
    insert_employee(
        conn,
        &NewEmployee {
            name: Some(name),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1),
        },
    )
    .unwrap()
}

fn project(conn: &mut SqliteConnection, title: &str) -> Project {
    insert_project(
        conn,
        &NewProject {
            title: Some(title),
            budget: Some(100000),
        },
    )
    .unwrap()
}

fn meeting(conn: &mut SqliteConnection, topic: &str) -> Meeting {
    insert_meeting(
        conn,
        &NewMeeting {
            topic: Some(topic),
            scheduled_time: Some(at(2020, 3, 2)),
            location: Some("Room 1"),
        },
    )
    .unwrap()
}

fn assign(conn: &mut SqliteConnection, employee_id: i32, project_id: i32) -> Assignment {
    insert_assignment(
        conn,
        &NewAssignment {
            role: Some("Engineer"),
            start_date: Some(at(2020, 2, 1)),
            end_date: None,
            employee_id,
            project_id,
        },
    )
    .unwrap()
}

#[test]
fn ada_leads_core() {
    let mut conn = establish_in_memory().unwrap();
    let mut roster = Roster::new(&mut conn);

    let ada = roster
        .hire("Ada", NaiveDate::from_ymd_opt(2020, 1, 1))
        .unwrap();
    let core = roster.open_project("Core", Some(100000)).unwrap();
    let lead = roster
        .assign(
            ada.id,
            core.id,
            Some("Lead"),
            Some(at(2020, 2, 1)),
            Some(at(2021, 1, 1)),
        )
        .unwrap();

    let ada_view = roster.employee(ada.id).unwrap();
    assert_eq!(ada_view.projects, vec![core.clone()]);
    assert_eq!(ada_view.assignments, vec![lead.clone()]);

    let core_view = roster.project(core.id).unwrap();
    assert_eq!(core_view.employees, vec![ada]);
    assert_eq!(core_view.assignments, vec![lead]);
}

#[test]
fn meeting_attendance_is_visible_from_both_sides() {
    let mut conn = establish_in_memory().unwrap();
    let ada = employee(&mut conn, "Ada");
    let grace = employee(&mut conn, "Grace");
    let standup = meeting(&mut conn, "Standup");
    let review = meeting(&mut conn, "Review");

    add_attendee(&mut conn, ada.id, standup.id).unwrap();
    add_attendee(&mut conn, ada.id, review.id).unwrap();
    add_attendee(&mut conn, grace.id, standup.id).unwrap();

    assert_eq!(
        meetings_for_employee(&mut conn, &ada).unwrap(),
        vec![standup.clone(), review.clone()]
    );
    assert_eq!(
        employees_for_meeting(&mut conn, &standup).unwrap(),
        vec![ada.clone(), grace.clone()]
    );

    assert!(remove_attendee(&mut conn, ada.id, standup.id).unwrap());
    assert_eq!(
        employees_for_meeting(&mut conn, &standup).unwrap(),
        vec![grace]
    );
    assert_eq!(meetings_for_employee(&mut conn, &ada).unwrap(), vec![review]);
    assert!(!remove_attendee(&mut conn, ada.id, standup.id).unwrap());
}

#[test]
fn assignment_resolves_to_its_employee_and_project() {
    let mut conn = establish_in_memory().unwrap();
    let ada = employee(&mut conn, "Ada");
    let core = project(&mut conn, "Core");
    let assignment = assign(&mut conn, ada.id, core.id);

    assert_eq!(
        assignments_for_employee(&mut conn, &ada).unwrap(),
        vec![assignment.clone()]
    );
    assert_eq!(
        assignments_for_project(&mut conn, &core).unwrap(),
        vec![assignment.clone()]
    );
    assert_eq!(employee_for_assignment(&mut conn, &assignment).unwrap(), ada);
    assert_eq!(project_for_assignment(&mut conn, &assignment).unwrap(), core);
}

#[test]
fn projects_are_listed_once_per_employee() {
    let mut conn = establish_in_memory().unwrap();
    let ada = employee(&mut conn, "Ada");
    let core = project(&mut conn, "Core");
    let docs = project(&mut conn, "Docs");
    assign(&mut conn, ada.id, core.id);
    assign(&mut conn, ada.id, core.id);
    assign(&mut conn, ada.id, docs.id);

    assert_eq!(
        projects_for_employee(&mut conn, &ada).unwrap(),
        vec![core.clone(), docs]
    );
    assert_eq!(employees_for_project(&mut conn, &core).unwrap(), vec![ada]);
}

#[test]
fn moving_an_assignment_updates_both_projects() {
    let mut conn = establish_in_memory().unwrap();
    let ada = employee(&mut conn, "Ada");
    let core = project(&mut conn, "Core");
    let docs = project(&mut conn, "Docs");
    let assignment = assign(&mut conn, ada.id, core.id);

    update_assignment(
        &mut conn,
        assignment.id,
        &AssignmentUpdate {
            project_id: Some(docs.id),
            ..Default::default()
        },
    )
    .unwrap();

    assert!(employees_for_project(&mut conn, &core).unwrap().is_empty());
    assert_eq!(employees_for_project(&mut conn, &docs).unwrap(), vec![ada]);
}

#[test]
fn deleting_employee_removes_only_their_assignments() {
    let mut conn = establish_in_memory().unwrap();
    let ada = employee(&mut conn, "Ada");
    let grace = employee(&mut conn, "Grace");
    let core = project(&mut conn, "Core");
    let a1 = assign(&mut conn, ada.id, core.id);
    let a2 = assign(&mut conn, ada.id, core.id);
    let kept = assign(&mut conn, grace.id, core.id);

    delete_employee(&mut conn, ada.id).unwrap();

    assert_eq!(list_assignments(&mut conn).unwrap(), vec![kept]);
    for removed in [a1, a2] {
        assert!(matches!(
            get_assignment(&mut conn, removed.id),
            Err(Error::NotFound { .. })
        ));
    }
}

#[test]
fn deleting_project_removes_its_assignments() {
    let mut conn = establish_in_memory().unwrap();
    let ada = employee(&mut conn, "Ada");
    let core = project(&mut conn, "Core");
    let docs = project(&mut conn, "Docs");
    assign(&mut conn, ada.id, core.id);
    assign(&mut conn, ada.id, core.id);
    let kept = assign(&mut conn, ada.id, docs.id);

    delete_project(&mut conn, core.id).unwrap();

    assert_eq!(list_assignments(&mut conn).unwrap(), vec![kept]);
    assert_eq!(projects_for_employee(&mut conn, &ada).unwrap(), vec![docs]);
}

#[test]
fn deleting_either_side_removes_attendance() {
    let mut conn = establish_in_memory().unwrap();
    let ada = employee(&mut conn, "Ada");
    let grace = employee(&mut conn, "Grace");
    let standup = meeting(&mut conn, "Standup");
    let review = meeting(&mut conn, "Review");
    add_attendee(&mut conn, ada.id, standup.id).unwrap();
    add_attendee(&mut conn, grace.id, standup.id).unwrap();
    add_attendee(&mut conn, grace.id, review.id).unwrap();

    delete_employee(&mut conn, ada.id).unwrap();
    assert_eq!(
        employees_for_meeting(&mut conn, &standup).unwrap(),
        vec![grace.clone()]
    );

    delete_meeting(&mut conn, standup.id).unwrap();
    assert_eq!(meetings_for_employee(&mut conn, &grace).unwrap(), vec![review]);
}

#[test]
fn assignment_to_missing_employee_or_project_is_rejected() {
    let mut conn = establish_in_memory().unwrap();
    let ada = employee(&mut conn, "Ada");
    let core = project(&mut conn, "Core");

    for (employee_id, project_id) in [(ada.id + 100, core.id), (ada.id, core.id + 100)] {
        let result = insert_assignment(
            &mut conn,
            &NewAssignment {
                role: Some("Lead"),
                start_date: None,
                end_date: None,
                employee_id,
                project_id,
            },
        );
        let err = result.unwrap_err();
        assert!(err.is_referential_integrity(), "unexpected error: {err}");
    }
    assert!(list_assignments(&mut conn).unwrap().is_empty());
}

#[test]
fn attending_a_missing_meeting_is_rejected() {
    let mut conn = establish_in_memory().unwrap();
    let ada = employee(&mut conn, "Ada");

    let err = add_attendee(&mut conn, ada.id, 999).unwrap_err();
    assert!(err.is_referential_integrity(), "unexpected error: {err}");
}

#[test]
fn reassigning_to_a_missing_project_is_rejected() {
    let mut conn = establish_in_memory().unwrap();
    let ada = employee(&mut conn, "Ada");
    let core = project(&mut conn, "Core");
    let assignment = assign(&mut conn, ada.id, core.id);

    let err = update_assignment(
        &mut conn,
        assignment.id,
        &AssignmentUpdate {
            project_id: Some(core.id + 100),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(err.is_referential_integrity(), "unexpected error: {err}");
    assert_eq!(get_assignment(&mut conn, assignment.id).unwrap(), assignment);
}
