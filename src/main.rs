#![allow(non_snake_case)]
use RustedIntegral::calculator::input_normalizer::RawInput;
use RustedIntegral::calculator::presenter::{EvaluationOutcome, IntegrationCalculator};
use RustedIntegral::calculator::settings::CalculatorSettings;
use std::io::{self, BufRead, Write};

/// Console front end: each round of prompts is one "Calculate" action.
/// Settings are taken from `calculator.toml` in the working directory when
/// present, otherwise the built-in defaults apply.
fn main() -> io::Result<()> {
    let settings = match std::fs::read_to_string("calculator.toml") {
        Ok(text) => match CalculatorSettings::from_toml_str(&text) {
            Ok(settings) => settings,
            Err(msg) => {
                eprintln!("calculator.toml ignored: {}", msg);
                CalculatorSettings::default()
            }
        },
        Err(_) => CalculatorSettings::default(),
    };
    let calculator = IntegrationCalculator::with_settings(settings);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    println!("Integration calculator. Press Ctrl-D to quit.");
    loop {
        let Some(function_text) = prompt(&mut lines, "Function to integrate: ")? else {
            break;
        };
        let Some(variable_text) = prompt(&mut lines, "Variable of integration: ")? else {
            break;
        };
        let Some(limits_text) =
            prompt(&mut lines, "Limits as lower,upper (empty for indefinite): ")?
        else {
            break;
        };

        let outcome = calculator.calculate(&RawInput {
            function_text,
            variable_text,
            limits_text,
        });
        println!("{}", outcome.text());
        match &outcome {
            EvaluationOutcome::Success {
                typeset_path,
                plot_path,
                ..
            } => {
                println!("Typeset image: {}", typeset_path.display());
                println!("Plot image: {}", plot_path.display());
            }
            EvaluationOutcome::PartialSuccess {
                typeset_path,
                plot_path,
                ..
            } => {
                if let Some(path) = typeset_path {
                    println!("Typeset image: {}", path.display());
                }
                if let Some(path) = plot_path {
                    println!("Plot image: {}", path.display());
                }
            }
            _ => {}
        }
        println!();
    }
    Ok(())
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    message: &str,
) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}
