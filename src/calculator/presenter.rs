//! Presenter: runs the whole pipeline for one "Calculate" action and folds
//! the branch results into a single outcome.
//!
//! The symbolic result is the primary product. Once it exists, the typeset
//! and plot branches are both attempted unconditionally; a failure in
//! either downgrades the outcome to a partial success with a warning
//! appended to the text, it never discards the symbolic result.

use crate::Utils::logger::init_logger;
use crate::calculator::engine::{ExprEngine, SymbolicEngine};
use crate::calculator::evaluator::{SymbolicResult, evaluate};
use crate::calculator::input_normalizer::{LimitPair, RawInput, normalize};
use crate::calculator::plotter::{CurvePlotter, choose_domain, sample_expression};
use crate::calculator::settings::CalculatorSettings;
use crate::calculator::typeset::render_typeset_image;
use crate::symbolic::symbolic_engine::Expr;
use itertools::Itertools;
use log::{error, info, warn};
use std::path::PathBuf;

/// What one "Calculate" action produced. Each evaluation is independent:
/// the same input always maps to the same outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    /// Symbolic result plus both artifacts.
    Success {
        text: String,
        typeset_path: PathBuf,
        plot_path: PathBuf,
    },
    /// Symbolic result is valid but at least one artifact failed; the text
    /// carries the warnings.
    PartialSuccess {
        text: String,
        typeset_path: Option<PathBuf>,
        plot_path: Option<PathBuf>,
    },
    /// The input itself was unusable (empty function, bad variable, bad
    /// limits). Nothing was evaluated.
    InputError(String),
    /// The input was well-formed but the symbolic evaluation failed.
    ComputationError(String),
}

impl EvaluationOutcome {
    /// The user-facing message for this outcome.
    pub fn text(&self) -> &str {
        match self {
            EvaluationOutcome::Success { text, .. } => text,
            EvaluationOutcome::PartialSuccess { text, .. } => text,
            EvaluationOutcome::InputError(text) => text,
            EvaluationOutcome::ComputationError(text) => text,
        }
    }
}

/// The integration calculator: normalization, symbolic evaluation, typeset
/// rendering and plotting behind one `calculate` call.
pub struct IntegrationCalculator {
    engine: Box<dyn SymbolicEngine>,
    pub settings: CalculatorSettings,
}

impl IntegrationCalculator {
    pub fn new() -> Self {
        IntegrationCalculator {
            engine: Box::new(ExprEngine),
            settings: CalculatorSettings::default(),
        }
    }

    pub fn with_settings(settings: CalculatorSettings) -> Self {
        IntegrationCalculator {
            engine: Box::new(ExprEngine),
            settings,
        }
    }

    pub fn with_engine(engine: Box<dyn SymbolicEngine>, settings: CalculatorSettings) -> Self {
        IntegrationCalculator { engine, settings }
    }

    // wrapper around the pipeline to implement logging
    pub fn calculate(&self, input: &RawInput) -> EvaluationOutcome {
        let is_logging_disabled = self
            .settings
            .loglevel
            .as_ref()
            .map(|level| level == "off" || level == "none")
            .unwrap_or(false);
        if !is_logging_disabled {
            init_logger(self.settings.loglevel.as_deref());
        }

        let outcome = self.calculate_inner(input);
        match &outcome {
            EvaluationOutcome::Success { .. } => info!("evaluation finished"),
            EvaluationOutcome::PartialSuccess { text, .. } => {
                warn!("evaluation finished with warnings: {}", text)
            }
            EvaluationOutcome::InputError(text) | EvaluationOutcome::ComputationError(text) => {
                error!("{}", text)
            }
        }
        outcome
    }

    fn calculate_inner(&self, input: &RawInput) -> EvaluationOutcome {
        let (normalized, limits) = match normalize(input) {
            Ok(pair) => pair,
            Err(msg) => return EvaluationOutcome::InputError(format!("Input Error: {}", msg)),
        };
        info!(
            "integrating '{}' with respect to {}",
            normalized.canonical_text, normalized.variable
        );

        // errors short-circuit; the plot surface is not touched until the
        // plot branch itself runs
        let (original, symbolic) = match evaluate(self.engine.as_ref(), &normalized, limits) {
            Ok(pair) => pair,
            Err(msg) => return EvaluationOutcome::ComputationError(format!("Error: {}", msg)),
        };

        let text = format!(
            "Integral result:\n{}\n\nLaTeX: {}",
            symbolic.result, symbolic.result_latex
        );

        let mut warnings: Vec<String> = Vec::new();
        let typeset_path = self.typeset_branch(&symbolic, &mut warnings);
        let plot_path = self.plot_branch(&original, &normalized.variable, limits, &mut warnings);

        let text = format!("{}{}", text, warnings.iter().join(""));
        match (typeset_path, plot_path) {
            (Some(typeset_path), Some(plot_path)) => EvaluationOutcome::Success {
                text,
                typeset_path,
                plot_path,
            },
            (typeset_path, plot_path) => EvaluationOutcome::PartialSuccess {
                text,
                typeset_path,
                plot_path,
            },
        }
    }

    fn typeset_branch(
        &self,
        symbolic: &SymbolicResult,
        warnings: &mut Vec<String>,
    ) -> Option<PathBuf> {
        match render_typeset_image(
            &symbolic.integral_latex,
            &symbolic.result_latex,
            &self.settings.typeset_path,
            self.settings.typeset_size,
        ) {
            Ok(()) => Some(self.settings.typeset_path.clone()),
            Err(msg) => {
                warnings.push(format!("\nWarning: Typeset rendering error: {}", msg));
                None
            }
        }
    }

    fn plot_branch(
        &self,
        original: &Expr,
        var: &str,
        limits: Option<LimitPair>,
        warnings: &mut Vec<String>,
    ) -> Option<PathBuf> {
        let plotter = self.plotter();
        let domain = choose_domain(limits, self.settings.default_domain);
        let label = format!("{}", original);

        let rendered = sample_expression(
            self.engine.as_ref(),
            original,
            var,
            domain,
            self.settings.samples,
        )
        .and_then(|sample| {
            let shaded = limits.map(|_| &sample);
            plotter.render(var, &label, &sample, shaded)
        });

        match rendered {
            Ok(()) => Some(self.settings.plot_path.clone()),
            Err(msg) => {
                if let Err(clear_err) = plotter.render_cleared(var, domain) {
                    warn!("could not clear the plot surface: {}", clear_err);
                }
                warnings.push(format!("\nWarning: Plotting error: {}", msg));
                None
            }
        }
    }

    fn plotter(&self) -> CurvePlotter {
        CurvePlotter::new(
            self.settings.plot_path.clone(),
            self.settings.plot_size,
            self.settings.backend,
        )
    }
}

impl Default for IntegrationCalculator {
    fn default() -> Self {
        IntegrationCalculator::new()
    }
}
