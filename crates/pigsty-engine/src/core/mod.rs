pub use self::{die::*, probability::*, sampler::*, scoring::*};

pub(crate) mod die;
pub(crate) mod probability;
pub(crate) mod sampler;
pub(crate) mod scoring;
