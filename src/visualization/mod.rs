pub mod distribution;

pub use distribution::{create_violinplot, render_violin, ViolinPlotConfig};
