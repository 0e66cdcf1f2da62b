// Widget rendering for the explorer dashboard zones.

pub mod results;
pub mod selectors;
pub mod status_bar;
pub mod summary;
