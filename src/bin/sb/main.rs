use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use staffbook::commands::{
    Arguments, Commands, EmployeeCommands, MeetingCommands, ProjectCommands,
};
use staffbook::config::load_config;

mod commands;

fn main() -> Result<()> {
    dotenv().ok();
    let args = Arguments::parse();

    stderrlog::new()
        .quiet(args.quiet)
        .verbosity(args.verbose as usize + 2)
        .init()?;

    let config = load_config(args.config)?;

    match args.command {
        Commands::Employee(command) => match command {
            EmployeeCommands::Add(add) => commands::add_employee(config, add)?,
            EmployeeCommands::Ls => commands::list_employees(config)?,
            EmployeeCommands::Show(by_id) => commands::show_employee(config, by_id)?,
            EmployeeCommands::Rm(by_id) => commands::remove_employee(config, by_id)?,
        },
        Commands::Meeting(command) => match command {
            MeetingCommands::Add(add) => commands::add_meeting(config, add)?,
            MeetingCommands::Ls => commands::list_meetings(config)?,
            MeetingCommands::Show(by_id) => commands::show_meeting(config, by_id)?,
            MeetingCommands::Rm(by_id) => commands::remove_meeting(config, by_id)?,
            MeetingCommands::Attend(attendance) => commands::attend(config, attendance)?,
            MeetingCommands::Leave(attendance) => commands::leave(config, attendance)?,
        },
        Commands::Project(command) => match command {
            ProjectCommands::Add(add) => commands::add_project(config, add)?,
            ProjectCommands::Ls => commands::list_projects(config)?,
            ProjectCommands::Show(by_id) => commands::show_project(config, by_id)?,
            ProjectCommands::Rm(by_id) => commands::remove_project(config, by_id)?,
        },
        Commands::Assign(assign) => commands::assign(config, assign)?,
        Commands::Unassign(by_id) => commands::unassign(config, by_id)?,
        Commands::Ls => commands::list_assignments(config)?,
        Commands::Schema => commands::schema()?,
    }
    Ok(())
}
