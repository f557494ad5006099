use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// increase the verbosity
    ///
    /// This flag can be used multiple times to increase the amount of information
    /// produced by staffbook
    #[arg(global = true, short, long, action = clap::ArgAction::Count, help_heading = "Logging")]
    pub verbose: u8,

    /// output no logging
    ///
    /// Setting quiet disables all logging to stderr.  Data will only be printed
    /// to stdout, and only for commands that output information as their main
    /// action.
    #[arg(global = true, long, action = clap::ArgAction::SetTrue, help_heading = "Logging")]
    pub quiet: bool,

    /// path to a configuration file
    ///
    /// Defaults to staffbook/config.toml inside the OS configuration directory.
    #[arg(global = true, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage employees
    #[command(subcommand)]
    Employee(EmployeeCommands),

    /// Manage meetings and who attends them
    #[command(subcommand)]
    Meeting(MeetingCommands),

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Assign an employee to a project
    ///
    /// Creates an assignment with an optional role and date range.  Both the
    /// employee and the project must already exist.
    Assign(Assign),

    /// Remove an assignment
    Unassign(ById),

    /// List all assignments
    #[clap(aliases = &["assignments"])]
    Ls,

    /// Print the tables and foreign key constraints of the database
    Schema,
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommands {
    /// Add a new employee
    Add(AddEmployee),
    /// List all employees
    Ls,
    /// Show an employee with their meetings, assignments and projects
    Show(ById),
    /// Delete an employee along with their assignments and meeting attendance
    Rm(ById),
}

#[derive(Subcommand, Debug)]
pub enum MeetingCommands {
    /// Schedule a new meeting
    Add(AddMeeting),
    /// List all meetings
    Ls,
    /// Show a meeting with its attendees
    Show(ById),
    /// Delete a meeting along with its attendance
    Rm(ById),
    /// Add an employee to a meeting
    Attend(Attendance),
    /// Remove an employee from a meeting
    Leave(Attendance),
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Add a new project
    Add(AddProject),
    /// List all projects
    Ls,
    /// Show a project with its assignments and employees
    Show(ById),
    /// Delete a project along with its assignments
    Rm(ById),
}

#[derive(Args, Debug)]
pub struct ById {
    pub id: i32,
}

#[derive(Args, Debug)]
pub struct AddEmployee {
    /// employee name
    pub name: String,

    /// hire date
    ///
    /// Can be specified as an ISO-8601 date (yyyy-mm-dd), "today", "yesterday",
    /// or the name of a weekday.
    #[arg(short = 'd', long)]
    pub hired: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddMeeting {
    /// meeting topic
    pub topic: String,

    /// scheduled time
    ///
    /// Can be specified as a ISO-8601-style string, or as a time with an
    /// optional relative day (e.g. "monday 09:30").
    #[arg(short = 't', long)]
    pub at: Option<String>,

    /// where the meeting takes place
    #[arg(short = 'l', long)]
    pub location: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddProject {
    /// project title
    pub title: String,

    /// project budget
    #[arg(short = 'b', long)]
    pub budget: Option<i64>,
}

#[derive(Args, Debug)]
pub struct Attendance {
    /// meeting id
    pub meeting_id: i32,
    /// employee id
    pub employee_id: i32,
}

#[derive(Args, Debug)]
pub struct Assign {
    /// employee id
    pub employee_id: i32,

    /// project id
    pub project_id: i32,

    /// role held on the project
    #[arg(short = 'r', long)]
    pub role: Option<String>,

    /// assignment start time
    ///
    /// Can be specified as a ISO-8601-style string, or as a time with an
    /// optional relative day.
    #[arg(short = 's', long)]
    pub start: Option<String>,

    /// assignment end time
    ///
    /// Must not be before the start time.
    #[arg(short = 'e', long)]
    pub end: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_line_is_well_formed() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn parses_assignment_with_date_range() {
        let args = Arguments::parse_from([
            "sb", "assign", "1", "2", "--role", "Lead", "-s", "2020-02-01 00:00", "-e",
            "2021-01-01 00:00",
        ]);
        match args.command {
            Commands::Assign(assign) => {
                assert_eq!(assign.employee_id, 1);
                assert_eq!(assign.project_id, 2);
                assert_eq!(assign.role.as_deref(), Some("Lead"));
                assert_eq!(assign.start.as_deref(), Some("2020-02-01 00:00"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_nested_meeting_commands() {
        let args = Arguments::parse_from(["sb", "-vv", "meeting", "attend", "3", "4"]);
        assert_eq!(args.verbose, 2);
        assert!(matches!(
            args.command,
            Commands::Meeting(MeetingCommands::Attend(Attendance {
                meeting_id: 3,
                employee_id: 4
            }))
        ));
    }
}
