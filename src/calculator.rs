/// narrow capability interface to the symbolic algebra engine
pub mod engine;
/// turns raw user text into a canonical expression and validated limits
pub mod input_normalizer;
/// orchestrates indefinite/definite integration against the engine
pub mod evaluator;
/// renders the combined "integral = result" typeset artifact
pub mod typeset;
/// numeric sampling of the integrand and curve/area drawing
pub mod plotter;
/// aggregates stage outcomes and exposes the calculator entry point
pub mod presenter;
/// configurable defaults for plotting, typesetting and logging
pub mod settings;
