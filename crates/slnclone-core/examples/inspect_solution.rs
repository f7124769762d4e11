use slnclone_core::solution::Solution;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=slnclone_core=debug shows each section the parser claims
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: inspect_solution <sln_file>");
        return;
    }

    let path = &args[1];
    println!("Parsing: {}", path);

    match Solution::from_file(path) {
        Ok(solution) => {
            println!("Successfully parsed solution!");
            println!(
                "Projects: {} (lines {}..={})",
                solution.projects.len(),
                solution.projects_section.begin + 1,
                solution.projects_section.end + 1
            );
            println!(
                "Configured projects: {} (lines {}..={})",
                solution.configurations.len(),
                solution.configurations_section.begin + 1,
                solution.configurations_section.end + 1
            );
            match &solution.folders_section {
                Some(range) => println!("Nested projects: lines {}..={}", range.begin + 1, range.end + 1),
                None => println!("Nested projects: none"),
            }

            println!("\nProjects:");
            for project in &solution.projects {
                let rows = solution
                    .configurations(&project.identifier_guid)
                    .map_or(0, |rows| rows.len());
                println!(
                    "  - {}: path={}, guid={}, rows={}, folder={}",
                    project.name,
                    project.relative_path,
                    project.identifier_guid,
                    rows,
                    solution.folder_of(&project.identifier_guid).unwrap_or("-")
                );
            }
        }
        Err(e) => {
            eprintln!("Failed to parse solution: {:?}", e);
            std::process::exit(1);
        }
    }
}
