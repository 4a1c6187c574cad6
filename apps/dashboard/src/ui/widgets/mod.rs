pub mod controls;
pub mod line_chart;
pub mod map;
pub mod popup;
pub mod table;
pub mod treemap;
