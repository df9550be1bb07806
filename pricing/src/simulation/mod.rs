pub mod antithetic;
pub mod config;
pub mod gbm;
pub mod greek_engine;
pub mod monte_carlo;
pub mod path_generator;
pub mod payoff;
pub mod runner;

pub use antithetic::{AntitheticPathSimulator, Path, PathPair};
pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use gbm::{Euler, Exact, GeometricBrownianMotion, SimulationScheme, StepScheme};
pub use greek_engine::{first_derivative, second_derivative};
pub use monte_carlo::{MonteCarloEngine, SweepResult};
pub use path_generator::{RandomPathGenerator, WienerIncrements};
pub use payoff::{antithetic_payoff, payoff, PayoffEvaluator};
pub use runner::{MonteCarloSimulation, RunState, RunStatistics};
