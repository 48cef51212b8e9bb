pub mod average_chart;
pub mod dataset_list;
pub mod distribution_chart;
pub mod equipment_table;
pub mod error_banner;
pub mod stats_grid;
pub mod upload_form;
