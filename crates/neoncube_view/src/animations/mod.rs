mod celebration;
mod twist;

pub use celebration::CelebrationState;
pub use twist::{Continuation, TwistAnimation};
