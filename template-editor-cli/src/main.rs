//src/main.rs
mod cli; // Keep cli module for parsing args

use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::{self, stdout};
use tracing_subscriber::EnvFilter;

use template_editor_lib::{Exercise, Template, TemplateService};

fn init_logging() {
    // Quiet by default so table and CSV output stay clean
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    // --- Check for completion generation request FIRST ---
    let cli_args = cli::parse_args(); // Parse arguments once
    let export_csv = cli_args.export_csv;

    if let cli::Commands::GenerateCompletion { shell } = cli_args.command {
        let mut cmd = cli::build_cli_command(); // Get the command structure
        let bin_name = cmd.get_name().to_string(); // Get the binary name

        eprintln!("Generating completion script for {shell}..."); // Print to stderr
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout()); // Print script to stdout
        return Ok(());
    }

    init_logging();
    tracing::debug!(command = ?cli_args.command, export_csv, "Running command");

    // Loads config and opens the configured catalog
    let service =
        TemplateService::initialize().context("Failed to initialize template service")?;
    let header_color = template_editor_lib::parse_color(&service.config.theme.header_color)
        .map(Color::from)
        .unwrap_or(Color::Cyan); // Fallback

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. } => {
            unreachable!("Completion generation should have exited already");
        }
        cli::Commands::ListExercises => match service.list_exercises() {
            Ok(exercises) if exercises.is_empty() => println!("The exercise catalog is empty."),
            Ok(exercises) => {
                if export_csv {
                    print_exercise_csv(&exercises)?;
                } else {
                    print_exercise_table(&exercises, header_color);
                }
            }
            Err(e) => bail!("Error listing exercises: {}", e),
        },
        cli::Commands::Search { query, limit } => match service.search_exercises(&query) {
            Ok(matches) => {
                // An explicit --limit wins over the configured one
                let shown = match limit {
                    Some(limit) => &matches[..matches.len().min(limit)],
                    None => service.visible_results(&matches),
                };
                if shown.is_empty() {
                    println!("No exercises match '{query}'.");
                } else if export_csv {
                    print_exercise_csv(shown)?;
                } else {
                    print_exercise_table(shown, header_color);
                    if shown.len() < matches.len() {
                        println!("({} of {} matches shown)", shown.len(), matches.len());
                    }
                }
            }
            Err(e) => bail!("Error searching exercises: {}", e),
        },
        cli::Commands::ListTemplates => {
            let templates = service.templates();
            if templates.is_empty() {
                println!(
                    "No templates defined. Add [[templates]] entries to {:?}.",
                    service.get_config_path()
                );
            } else if export_csv {
                print_template_csv(templates)?;
            } else {
                print_template_table(templates, header_color);
            }
        }
        cli::Commands::ShowTemplate { name } => match service.find_template(&name) {
            Some(template) if export_csv => print_template_sets_csv(template)?,
            Some(template) => print_template_sets_table(template, header_color),
            None => bail!("Template '{}' not found.", name),
        },
        cli::Commands::ConfigPath => {
            println!("Config file is located at: {:?}", service.get_config_path());
        }
    }

    Ok(())
}

/// Prints catalog entries in a formatted table.
fn print_exercise_table(exercises: &[Exercise], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(header_color),
            Cell::new("Exercise").fg(header_color),
        ]);

    for exercise in exercises {
        table.add_row(vec![
            Cell::new(&exercise.id),
            Cell::new(&exercise.label),
        ]);
    }
    println!("{table}");
}

fn print_exercise_csv(exercises: &[Exercise]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["Id", "Label"])?;
    for exercise in exercises {
        writer.write_record([exercise.id.as_str(), exercise.label.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn print_template_table(templates: &[Template], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Template").fg(header_color),
            Cell::new("Exercises").fg(header_color),
            Cell::new("Total Sets").fg(header_color),
        ]);

    for template in templates {
        table.add_row(vec![
            Cell::new(&template.name),
            Cell::new(template.exercises.len()),
            Cell::new(template.total_sets()),
        ]);
    }
    println!("{table}");
}

fn print_template_csv(templates: &[Template]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["Template", "Exercises", "Total_Sets"])?;
    for template in templates {
        writer.write_record(&[
            template.name.clone(),
            template.exercises.len().to_string(),
            template.total_sets().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Prints every set of a template, one row per set.
fn print_template_sets_table(template: &Template, header_color: Color) {
    println!("{}", template.name);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Exercise").fg(header_color),
            Cell::new("Set").fg(header_color),
            Cell::new("Reps").fg(header_color),
            Cell::new("Weight").fg(header_color),
        ]);

    for activity in &template.exercises {
        if activity.sets.is_empty() {
            table.add_row(vec![
                Cell::new(&activity.exercise_name),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ]);
        }
        for set in &activity.sets {
            table.add_row(vec![
                Cell::new(&activity.exercise_name),
                Cell::new(set.set_number),
                Cell::new(set.reps),
                Cell::new(format!("{:.1} {}", set.weight, set.unit)),
            ]);
        }
    }
    println!("{table}");
}

fn print_template_sets_csv(template: &Template) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["Template", "Exercise", "Set", "Reps", "Weight", "Unit"])?;
    for activity in &template.exercises {
        for set in &activity.sets {
            writer.write_record(&[
                template.name.clone(),
                activity.exercise_name.clone(),
                set.set_number.to_string(),
                set.reps.to_string(),
                format!("{:.2}", set.weight),
                set.unit.to_string(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}
