pub mod descent;
pub mod landscape;
pub mod output;
pub mod plots;
pub mod results;
pub mod scene;
