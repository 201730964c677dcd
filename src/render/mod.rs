pub mod colormap;
pub mod figure;
pub mod markers;
pub mod plot_interaction;
pub mod theme;
