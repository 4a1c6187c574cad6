//! Figure builders: plain data in, a drawable figure value out.

pub mod line;
pub mod map;
pub mod table;
pub mod treemap;

pub use line::{line_figure, LineFigure};
pub use map::{map_figure, ColorMapper, MapFigure};
pub use table::{summary_table, SummaryTable};
pub use treemap::{squarify, treemap_figure, TreemapFigure, UnitRect};
