// Adapters between the outside world and the pipeline

pub mod csv_source;
