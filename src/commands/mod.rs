pub mod estimate;
pub mod init;
pub mod plans;

pub use estimate::{run_estimate, EstimateConfig};
pub use init::init_inputs;
pub use plans::print_plans;
