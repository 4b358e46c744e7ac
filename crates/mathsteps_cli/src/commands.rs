//! Command implementations for mathstepsctl.

use anyhow::Result;
use mathsteps_core::render::HtmlFallbackEngine;
use mathsteps_core::{render_solution, render_steps, Resolver, SolverConfig};

/// Run the resolution chain and print the result.
///
/// On total failure the problem text is echoed back so nothing the user
/// typed is lost; the process exits non-zero without a panic trace.
pub async fn solve(problem: &str, html: bool) -> Result<()> {
    let config = SolverConfig::load()?;
    let resolver = Resolver::from_config(&config)?;

    match resolver.resolve(problem).await {
        Ok(result) => {
            let engine = HtmlFallbackEngine;
            if html {
                for fragment in render_steps(&result, &engine) {
                    println!("{}", fragment);
                }
                println!("{}", render_solution(&result, &engine));
            } else {
                for step in result.steps() {
                    println!("{}", step);
                }
                println!();
                println!("Answer: {}", result.solution());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try checking your syntax and try again.");
            eprintln!("Your problem: {}", problem);
            std::process::exit(1);
        }
    }
}

/// Show or change the solver configuration.
pub fn config(set_app_id: Option<String>, show: bool) -> Result<()> {
    let mut config = SolverConfig::load()?;

    if let Some(app_id) = set_app_id {
        config.wolfram_app_id = Some(app_id);
        let path = config.save()?;
        println!("Wolfram Alpha AppID saved to {}", path.display());
    }

    if show {
        match config.active_wolfram_app_id() {
            Some(_) => println!("wolfram_app_id: (configured)"),
            None => println!("wolfram_app_id: (not configured - Wolfram provider disabled)"),
        }
        println!("wolfram_base_url: {}", config.wolfram_base_url);
        println!("steps_api_url: {}", config.steps_api_url);
        println!("timeout_secs: {}", config.timeout_secs);
    }

    Ok(())
}
